// src/math/geometry/polygon/proximity.rs
//
// Abstandsabfragen gegen den Polygonrand. Vorzeichenkonvention überall:
// positiv innerhalb, negativ außerhalb.

use crate::math::geometry::polygon::properties::{orientation, point_in_polygon};
use crate::math::types::*;
use crate::math::utils::constants;

/// Nächster Punkt auf dem Segment `a`-`b` und der zugehörige Parameter `t` in `[0, 1]`.
pub fn closest_point_on_segment(point: Point2D, a: Point2D, b: Point2D) -> (Point2D, f32) {
    let ab = b - a;
    let l2 = ab.length_squared();
    if l2 < constants::EPSILON_SQUARED {
        return (a, 0.0);
    }
    let t = ((point - a).dot(ab) / l2).clamp(0.0, 1.0);
    (a + ab * t, t)
}

pub fn point_segment_distance(point: Point2D, a: Point2D, b: Point2D) -> f32 {
    let (closest, _) = closest_point_on_segment(point, a, b);
    point.distance(closest)
}

/// Kleinster (unsigned) Abstand zu irgendeiner Kante.
pub fn distance_to_boundary(point: Point2D, vertices: &[Point2D]) -> f32 {
    let n = vertices.len();
    match n {
        0 => f32::INFINITY,
        1 => point.distance(vertices[0]),
        _ => (0..n)
            .map(|i| point_segment_distance(point, vertices[i], vertices[(i + 1) % n]))
            .fold(f32::INFINITY, f32::min),
    }
}

/// Vorzeichenbehafteter Abstand: Betrag ist der Randabstand, negativ außerhalb.
pub fn signed_distance(point: Point2D, vertices: &[Point2D]) -> f32 {
    let d = distance_to_boundary(point, vertices);
    if point_in_polygon(point, vertices) {
        d
    } else {
        -d
    }
}

/// Ergebnis von [`nearest_edge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeInfo {
    /// Abstand zum Rand, positiv innerhalb.
    pub distance: f32,
    /// Einheitsnormale, zeigt immer ins Innere des Polygons.
    pub normal: Vec2,
    /// Einheitstangente der nächsten Kante in Umlaufrichtung.
    pub tangent: Vec2,
    pub nearest_point: Point2D,
    pub edge_index: usize,
    pub inside: bool,
}

/// Durchsucht alle Kanten und liefert die global nächste. `None` nur für ein leeres Polygon.
pub fn nearest_edge(point: Point2D, vertices: &[Point2D]) -> Option<EdgeInfo> {
    let n = vertices.len();
    if n == 0 {
        return None;
    }

    let mut best_dist_sq = f32::INFINITY;
    let mut best_point = vertices[0];
    let mut best_index = 0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let (closest, _) = closest_point_on_segment(point, a, b);
        let d2 = point.distance_squared(closest);
        if d2 < best_dist_sq {
            best_dist_sq = d2;
            best_point = closest;
            best_index = i;
        }
    }

    let inside = point_in_polygon(point, vertices);
    let side = if inside { 1.0 } else { -1.0 };
    let edge = vertices[(best_index + 1) % n] - vertices[best_index];
    let tangent = edge.normalize_or_zero();
    let dist = best_dist_sq.sqrt();

    let offset = point - best_point;
    let normal = if dist > constants::EPSILON {
        offset / dist * side
    } else {
        // Punkt liegt auf dem Rand: Kantennormale über die Umlaufrichtung ausrichten
        let orient = match orientation(vertices).sign() {
            s if s == 0.0 => 1.0,
            s => s,
        };
        tangent.perp() * orient
    };

    Some(EdgeInfo {
        distance: dist * side,
        normal,
        tangent,
        nearest_point: best_point,
        edge_index: best_index,
        inside,
    })
}
