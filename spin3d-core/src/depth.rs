/// Painter's-algorithm depth ordering
use crate::geometry::Triangle;
use crate::projection::ProjectedPoint;

/// Sort key for one triangle: the sum (not average) of its three
/// projected depths. Only relative comparisons use it, so the missing
/// division by three is irrelevant.
pub fn depth_key(triangle: &Triangle, projected: &[ProjectedPoint]) -> f32 {
    triangle
        .indices
        .iter()
        .map(|&index| projected[index].depth)
        .sum()
}

/// Order triangles back-to-front for drawing. Camera-space depth grows
/// away from the viewer, so larger depth sums are farther and must be
/// painted before nearer ones overdraw them. Ties are left unordered.
///
/// This is an approximation: without a z-buffer, interpenetrating or
/// very large triangles can sort wrong.
pub fn painter_order(triangles: &[Triangle], projected: &[ProjectedPoint]) -> Vec<usize> {
    let mut keyed: Vec<(usize, f32)> = triangles
        .iter()
        .enumerate()
        .map(|(index, triangle)| (index, depth_key(triangle, projected)))
        .collect();
    keyed.sort_by(|a, b| b.1.total_cmp(&a.1));
    keyed.into_iter().map(|(index, _)| index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_at_depth(depth: f32) -> ProjectedPoint {
        ProjectedPoint {
            x: 0.0,
            y: 0.0,
            depth,
        }
    }

    #[test]
    fn test_depth_key_sums_vertices() {
        let projected = vec![point_at_depth(1.0), point_at_depth(2.0), point_at_depth(4.0)];
        let triangle = Triangle::new(0, 1, 2);
        assert!((depth_key(&triangle, &projected) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_farther_triangle_drawn_first() {
        let projected = vec![
            point_at_depth(4.0),
            point_at_depth(4.0),
            point_at_depth(4.0),
            point_at_depth(6.0),
            point_at_depth(6.0),
            point_at_depth(6.0),
        ];
        let near = Triangle::new(0, 1, 2);
        let far = Triangle::new(3, 4, 5);
        let order = painter_order(&[near, far], &projected);
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_order_is_a_permutation() {
        let projected: Vec<ProjectedPoint> =
            (0..9).map(|i| point_at_depth(9.0 - i as f32)).collect();
        let triangles = vec![
            Triangle::new(0, 1, 2),
            Triangle::new(3, 4, 5),
            Triangle::new(6, 7, 8),
        ];
        let mut order = painter_order(&triangles, &projected);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
