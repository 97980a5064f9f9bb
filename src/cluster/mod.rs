//! Clustering of named points on the plane.
//!
//! ## K-means
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! ## Groups and classification
//!
//! A run produces one [`Group`] per centroid, labelled with a symbol from a
//! [`Palette`]. New points can then be attached to the existing partition with
//! [`classify`] without re-running the clustering.
//!
//! ## Usage
//!
//! ```rust
//! use plano::cluster::{classify, Clustering, Kmeans};
//! use plano::Point;
//!
//! let mut points = vec![
//!     Point::new("A", 0.0, 0.0),
//!     Point::new("B", 0.1, 0.1),
//!     Point::new("C", 10.0, 10.0),
//!     Point::new("D", 10.1, 10.1),
//! ];
//!
//! let groups = Kmeans::new(2).with_seed(42).fit(&mut points).unwrap();
//! assert_eq!(points[0].group, points[1].group);
//! assert_ne!(points[0].group, points[2].group);
//!
//! let g = classify(&Point::new("E", 9.0, 9.5), &groups).unwrap();
//! assert_eq!(Some(g), points[2].group);
//! ```

mod classify;
mod group;
mod kmeans;
mod traits;

pub use classify::classify;
pub use group::{Group, Palette, DEFAULT_SYMBOLS};
pub use kmeans::{Kmeans, KmeansFit, DEFAULT_MAX_ITER, DEFAULT_SEED};
pub use traits::Clustering;
