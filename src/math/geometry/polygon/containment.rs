// src/math/geometry/polygon/containment.rs

use crate::math::geometry::polygon::properties::point_in_polygon;
use crate::math::geometry::polygon::proximity::nearest_edge;
use crate::math::types::*;
use crate::math::utils::constants;

/// Wählt das Vorzeichen von `dir`, dessen Schritt der Länge `step` im Polygon bleibt.
///
/// Zuerst wird `dir` selbst geprüft, danach `-dir`. Bleibt keiner der beiden Endpunkte
/// innerhalb, ist das Ergebnis `None`. Das ist die Randsperre aller Integratoren.
pub fn orient_vector_inside(
    point: Point2D,
    step: f32,
    dir: Vec2,
    vertices: &[Point2D],
) -> Option<Vec2> {
    if point_in_polygon(point + dir * step, vertices) {
        Some(dir)
    } else if point_in_polygon(point - dir * step, vertices) {
        Some(-dir)
    } else {
        None
    }
}

/// Spiegelt einen Schritt, der das Polygon verlassen würde, an der Normalen der nächsten
/// Kante. Schritte, die ohnehin innen bleiben, werden unverändert zurückgegeben.
pub fn reflect_direction_inside(
    point: Point2D,
    step: f32,
    dir: Vec2,
    vertices: &[Point2D],
) -> Option<Vec2> {
    if point_in_polygon(point + dir * step, vertices) {
        return Some(dir);
    }
    let edge = nearest_edge(point + dir * step, vertices)?;
    let reflected = dir - 2.0 * dir.dot(edge.normal) * edge.normal;
    if reflected.length_squared() < constants::EPSILON_SQUARED {
        return None;
    }
    point_in_polygon(point + reflected * step, vertices).then_some(reflected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::PolygonRegion;
    use approx::assert_abs_diff_eq;

    fn square() -> PolygonRegion {
        PolygonRegion::rectangle(Vec2::ZERO, Vec2::splat(100.0))
    }

    #[test]
    fn test_orient_keeps_inside_direction() {
        let sq = square();
        let dir = orient_vector_inside(Vec2::new(50.0, 50.0), 5.0, Vec2::X, sq.vertices());
        assert_eq!(dir, Some(Vec2::X));
    }

    #[test]
    fn test_orient_flips_at_boundary() {
        let sq = square();
        let dir = orient_vector_inside(Vec2::new(98.0, 50.0), 5.0, Vec2::X, sq.vertices());
        assert_eq!(dir, Some(-Vec2::X));
    }

    #[test]
    fn test_orient_none_when_both_leave() {
        let thin = PolygonRegion::rectangle(Vec2::ZERO, Vec2::new(4.0, 100.0));
        let dir = orient_vector_inside(Vec2::new(2.0, 50.0), 5.0, Vec2::X, thin.vertices());
        assert!(dir.is_none());
    }

    #[test]
    fn test_reflect_at_right_wall() {
        let sq = square();
        let dir = Vec2::new(1.0, 1.0).normalize();
        let reflected =
            reflect_direction_inside(Vec2::new(98.0, 50.0), 4.0, dir, sq.vertices()).unwrap();
        assert_abs_diff_eq!(reflected.x, -dir.x, epsilon = 1e-5);
        assert_abs_diff_eq!(reflected.y, dir.y, epsilon = 1e-5);

        let inside = reflect_direction_inside(Vec2::new(50.0, 50.0), 4.0, dir, sq.vertices());
        assert_eq!(inside, Some(dir));
    }
}
