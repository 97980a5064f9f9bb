//! Nearest-centroid classification.

use super::group::Group;
use crate::error::{Error, Result};
use crate::geometry::Coord;

/// Index of the group whose centroid is closest to `coord`.
///
/// Ties go to the lower index. An empty group set means no clustering has been
/// run, which is reported as [`Error::NoClustering`].
pub fn classify(coord: impl Into<Coord>, groups: &[Group]) -> Result<usize> {
    nearest_centroid(coord.into(), groups.iter().map(|g| g.centroid)).ok_or(Error::NoClustering)
}

/// Index of the nearest centroid, first index winning ties. `None` if empty.
pub(crate) fn nearest_centroid(
    coord: Coord,
    centroids: impl IntoIterator<Item = Coord>,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in centroids.into_iter().enumerate() {
        let d = coord.distance(c);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Palette;
    use crate::geometry::Point;

    fn groups() -> Vec<Group> {
        let palette = Palette::default();
        vec![
            Group::new(0, Coord::new(0.0, 0.0), &palette),
            Group::new(1, Coord::new(10.0, 0.0), &palette),
            Group::new(2, Coord::new(0.0, 10.0), &palette),
        ]
    }

    #[test]
    fn test_classify_nearest() {
        let gs = groups();
        assert_eq!(classify(Coord::new(9.0, 1.0), &gs).unwrap(), 1);
        assert_eq!(classify(&Point::new("P", 1.0, 8.0), &gs).unwrap(), 2);
    }

    #[test]
    fn test_classify_own_centroid() {
        let gs = groups();
        for (i, g) in gs.iter().enumerate() {
            assert_eq!(classify(g.centroid, &gs).unwrap(), i);
        }
    }

    #[test]
    fn test_classify_tie_goes_to_lower_index() {
        let gs = groups();
        // Equidistant from groups 0 and 1.
        assert_eq!(classify(Coord::new(5.0, -3.0), &gs).unwrap(), 0);
        // Equidistant from groups 1 and 2.
        assert_eq!(classify(Coord::new(10.0, 10.0), &gs).unwrap(), 1);
    }

    #[test]
    fn test_classify_without_groups() {
        assert_eq!(
            classify(Coord::new(0.0, 0.0), &[]),
            Err(Error::NoClustering)
        );
    }
}
