// src/math/geometry/polygon/intersection.rs

use crate::math::types::*;
use crate::math::utils::constants;

/// Schnittparameter einer unendlichen Geraden `origin + t * dir` mit allen Kanten.
///
/// Die Parameter sind aufsteigend sortiert. Eine Kante zählt nur, wenn ihre Endpunkte auf
/// verschiedenen Seiten der Geraden liegen, wobei ein Punkt auf der Geraden zur negativen
/// Seite gehört (Halboffen-Regel wie beim Ray Casting). Ein Vertex, der die Gerade nur
/// berührt, zählt damit null- oder zweimal. Aufeinanderfolgende Paare `(t0, t1), (t2, t3), …`
/// sind die inneren Abschnitte für einfache Polygone.
pub fn line_intersections(origin: Point2D, dir: Vec2, vertices: &[Point2D]) -> Vec<f32> {
    let n = vertices.len();
    let mut params = Vec::new();
    if n < 3 {
        return params;
    }

    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let a_side = dir.perp_dot(a - origin);
        let b_side = dir.perp_dot(b - origin);
        if (a_side > 0.0) == (b_side > 0.0) {
            continue;
        }
        let edge = b - a;
        let denom = dir.perp_dot(edge);
        if denom.abs() < constants::EPSILON {
            continue;
        }
        params.push((a - origin).perp_dot(edge) / denom);
    }

    params.sort_by(|a, b| a.total_cmp(b));
    params
}

/// Innere Abschnitte einer Geraden als Punktpaare.
///
/// Abschnitte, die sich an einem berührten Vertex treffen, werden zusammengefasst.
pub fn clip_line(origin: Point2D, dir: Vec2, vertices: &[Point2D]) -> Vec<(Point2D, Point2D)> {
    let mut spans: Vec<(f32, f32)> = Vec::new();
    for pair in line_intersections(origin, dir, vertices).chunks_exact(2) {
        match spans.last_mut() {
            Some(last) if (pair[0] - last.1).abs() < constants::EPSILON => last.1 = pair[1],
            _ => spans.push((pair[0], pair[1])),
        }
    }
    spans
        .into_iter()
        .filter(|(t0, t1)| t1 - t0 > constants::EPSILON)
        .map(|(t0, t1)| (origin + dir * t0, origin + dir * t1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::{PolygonRegion, point_in_polygon};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_horizontal_line_through_square() {
        let sq = PolygonRegion::rectangle(Vec2::ZERO, Vec2::splat(100.0));
        let params = line_intersections(Vec2::new(-20.0, 30.0), Vec2::X, sq.vertices());
        assert_eq!(params.len(), 2);
        assert_abs_diff_eq!(params[0], 20.0, epsilon = 1e-4);
        assert_abs_diff_eq!(params[1], 120.0, epsilon = 1e-4);
    }

    #[test]
    fn test_line_missing_polygon() {
        let sq = PolygonRegion::rectangle(Vec2::ZERO, Vec2::splat(100.0));
        assert!(line_intersections(Vec2::new(0.0, 150.0), Vec2::X, sq.vertices()).is_empty());
    }

    #[test]
    fn test_concave_gives_two_spans() {
        // U-Form: eine horizontale Linie durch beide Schenkel
        let u = PolygonRegion::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(60.0, 0.0),
            Vec2::new(60.0, 60.0),
            Vec2::new(40.0, 60.0),
            Vec2::new(40.0, 20.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(20.0, 60.0),
            Vec2::new(0.0, 60.0),
        ]);
        let spans = clip_line(Vec2::new(-10.0, 40.0), Vec2::X, u.vertices());
        assert_eq!(spans.len(), 2);
        assert_abs_diff_eq!(spans[0].0.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(spans[0].1.x, 20.0, epsilon = 1e-4);
        assert_abs_diff_eq!(spans[1].0.x, 40.0, epsilon = 1e-4);
        assert_abs_diff_eq!(spans[1].1.x, 60.0, epsilon = 1e-4);
    }

    fn notched() -> PolygonRegion {
        // Flache Kerbe berührt y = 50 bei (30, 50), die tiefe Kerbe schneidet y = 50
        PolygonRegion::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(80.0, 100.0),
            Vec2::new(70.0, 20.0),
            Vec2::new(60.0, 100.0),
            Vec2::new(40.0, 100.0),
            Vec2::new(30.0, 50.0),
            Vec2::new(20.0, 100.0),
            Vec2::new(0.0, 100.0),
        ])
    }

    #[test]
    fn test_touching_vertex_counts_twice() {
        let poly = notched();
        let params = line_intersections(Vec2::new(-10.0, 50.0), Vec2::X, poly.vertices());
        assert_eq!(params.len(), 6);
        assert_abs_diff_eq!(params[1], 40.0, epsilon = 1e-4);
        assert_abs_diff_eq!(params[2], 40.0, epsilon = 1e-4);
    }

    #[test]
    fn test_clip_line_through_touching_vertex() {
        let poly = notched();
        let spans = clip_line(Vec2::new(-10.0, 50.0), Vec2::X, poly.vertices());
        assert_eq!(spans.len(), 2);
        assert_abs_diff_eq!(spans[0].0.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(spans[0].1.x, 66.25, epsilon = 1e-3);
        assert_abs_diff_eq!(spans[1].0.x, 73.75, epsilon = 1e-3);
        assert_abs_diff_eq!(spans[1].1.x, 100.0, epsilon = 1e-4);
        for (a, b) in &spans {
            assert!(point_in_polygon((*a + *b) * 0.5, poly.vertices()));
        }
        assert!(!point_in_polygon(Vec2::new(70.0, 50.0), poly.vertices()));
    }

    #[test]
    fn test_line_through_tip_from_below_is_ignored() {
        // Die Kerbenspitze (70, 20) liegt auf der Geraden, beide Nachbarn darüber
        let poly = notched();
        let spans = clip_line(Vec2::new(-10.0, 20.0), Vec2::X, poly.vertices());
        assert_eq!(spans.len(), 1);
        assert_abs_diff_eq!(spans[0].0.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(spans[0].1.x, 100.0, epsilon = 1e-4);
    }
}
