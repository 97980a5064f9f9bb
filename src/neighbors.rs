//! k-nearest-neighbour queries.

use crate::geometry::{distance, Point};

/// One entry of a k-NN answer.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceResult {
    /// Name of the neighbour.
    pub point_name: String,
    /// Euclidean distance from the query point.
    pub distance: f64,
}

/// Rank `pool` by distance to `query` and return the `k` closest.
///
/// Entries whose name equals the query's name are skipped, so a point never
/// appears as its own neighbour even when another point shares its coordinates.
/// Equal distances keep their pool order. When fewer than `k` entries remain,
/// all of them are returned. Callers clamp `k` to at least 1; `k == 0` yields an
/// empty answer.
pub fn k_nearest(query: &Point, pool: &[Point], k: usize) -> Vec<DistanceResult> {
    let mut ranked: Vec<DistanceResult> = pool
        .iter()
        .filter(|p| p.name != query.name)
        .map(|p| DistanceResult {
            point_name: p.name.clone(),
            distance: distance(query, p),
        })
        .collect();

    // `sort_by` is stable: ties stay in pool order.
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<Point> {
        vec![
            Point::new("A", 0.0, 0.0),
            Point::new("B", 1.0, 0.0),
            Point::new("C", 10.0, 10.0),
        ]
    }

    #[test]
    fn test_knn_single_nearest() {
        let pool = abc();
        let nn = k_nearest(&pool[0], &pool, 1);
        assert_eq!(
            nn,
            vec![DistanceResult {
                point_name: "B".into(),
                distance: 1.0
            }]
        );
    }

    #[test]
    fn test_knn_excludes_self_by_name_not_coords() {
        let mut pool = abc();
        pool.push(Point::new("A2", 0.0, 0.0));
        let nn = k_nearest(&pool[0], &pool, 10);
        assert!(nn.iter().all(|r| r.point_name != "A"));
        assert_eq!(nn[0].point_name, "A2");
        assert_eq!(nn[0].distance, 0.0);
    }

    #[test]
    fn test_knn_k_larger_than_pool() {
        let pool = abc();
        let nn = k_nearest(&pool[2], &pool, 50);
        assert_eq!(nn.len(), 2);
        assert!(nn[0].distance <= nn[1].distance);
    }

    #[test]
    fn test_knn_ties_keep_pool_order() {
        let pool = vec![
            Point::new("Q", 0.0, 0.0),
            Point::new("E", 1.0, 0.0),
            Point::new("N", 0.0, 1.0),
            Point::new("W", -1.0, 0.0),
            Point::new("S", 0.0, -1.0),
        ];
        let names: Vec<_> = k_nearest(&pool[0], &pool, 3)
            .into_iter()
            .map(|r| r.point_name)
            .collect();
        assert_eq!(names, vec!["E", "N", "W"]);
    }

    #[test]
    fn test_knn_query_outside_pool() {
        let pool = abc();
        let q = Point::new("Q", 9.0, 9.0);
        let nn = k_nearest(&q, &pool, 1);
        assert_eq!(nn[0].point_name, "C");
    }

    #[test]
    fn test_knn_zero_k_is_empty() {
        let pool = abc();
        assert!(k_nearest(&pool[0], &pool, 0).is_empty());
    }
}
