use super::group::Group;
use crate::error::Result;
use crate::geometry::{Coord, Point};

/// Common interface for hard clustering of named points (one group per point).
pub trait Clustering {
    /// Partition `points`, writing each point's group index in place, and return
    /// the resulting groups in index order.
    fn fit(&self, points: &mut [Point]) -> Result<Vec<Group>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;

    /// Cluster bare coordinates and return one label per coordinate.
    fn fit_predict(&self, coords: &[Coord]) -> Result<Vec<usize>> {
        let mut points: Vec<Point> = coords
            .iter()
            .enumerate()
            .map(|(i, c)| Point::new(i.to_string(), c.x, c.y))
            .collect();
        self.fit(&mut points)?;
        Ok(points.iter().map(|p| p.group.unwrap_or_default()).collect())
    }
}
