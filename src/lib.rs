//! Points on a 2D plane.
//!
//! `plano` keeps a named set of 2D points and answers geometric questions about it:
//! - Euclidean distance ([`distance`])
//! - k-nearest-neighbour queries ([`neighbors::k_nearest`])
//! - k-means clustering (k-means++ seeding, Lloyd iterations) under [`cluster`]
//! - nearest-centroid classification of new points ([`cluster::classify`])
//!
//! [`session::Dataset`] ties these together with the invalidation rules of an
//! interactive session. [`render`] draws the plane as ASCII art and [`console`]
//! is the line-oriented front-end used by the `plano` binary.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod console;
pub mod error;
pub mod geometry;
pub mod neighbors;
pub mod render;
pub mod session;

pub use cluster::{classify, Clustering, Group, Kmeans, KmeansFit, Palette};
pub use error::{Error, Result};
pub use geometry::{distance, Coord, Point};
pub use neighbors::{k_nearest, DistanceResult};
pub use session::{Dataset, SessionParams};
