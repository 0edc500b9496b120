// src/math/geometry/polygon/properties.rs

use crate::math::geometry::polygon::PolygonRegion;
use crate::math::types::*;
use crate::math::utils::constants;

/// Trait für Polygon-Eigenschaften
pub trait PolygonProperties {
    /// Vorzeichenbehaftete Fläche (Shoelace-Formel), positiv gegen den Uhrzeigersinn
    fn signed_area(&self) -> f32;

    /// Prüft ob ein Punkt innerhalb des Polygons liegt (Ray-Casting)
    fn contains_point(&self, point: Point2D) -> bool;

    /// Prüft die Orientierung (im Uhrzeigersinn oder gegen)
    fn orientation(&self) -> Orientation;

    /// Flächengewichteter Schwerpunkt
    fn centroid(&self) -> Option<Point2D>;

    fn bounds(&self) -> Option<Bounds2D>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

impl Orientation {
    /// +1 gegen den Uhrzeigersinn, -1 im Uhrzeigersinn, 0 sonst.
    pub fn sign(self) -> f32 {
        match self {
            Orientation::CounterClockwise => 1.0,
            Orientation::Clockwise => -1.0,
            Orientation::Collinear => 0.0,
        }
    }
}

pub fn signed_area(vertices: &[Point2D]) -> f32 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }
    area * 0.5
}

/// Paritätstest per Ray-Casting. Der Nenner des Kantenschnitts bekommt ein kleines
/// Epsilon, damit exakt horizontale Kanten keine Division durch Null erzeugen.
pub fn point_in_polygon(point: Point2D, vertices: &[Point2D]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];

        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x
                < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y + constants::INTERSECT_EPSILON)
                    + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

pub fn orientation(vertices: &[Point2D]) -> Orientation {
    let area = signed_area(vertices);
    if area > constants::EPSILON {
        Orientation::CounterClockwise
    } else if area < -constants::EPSILON {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Schwerpunkt der Fläche; bei (nahezu) verschwindender Fläche der Mittelwert der Vertices.
pub fn centroid(vertices: &[Point2D]) -> Option<Point2D> {
    if vertices.is_empty() {
        return None;
    }

    let mean = vertices.iter().fold(Point2D::ZERO, |acc, v| acc + *v) / vertices.len() as f32;
    let area = signed_area(vertices);
    if area.abs() < constants::EPSILON {
        return Some(mean);
    }

    // Relativ zum Mittelwert rechnen, das hält die Produkte klein
    let n = vertices.len();
    let mut acc = Point2D::ZERO;
    for i in 0..n {
        let a = vertices[i] - mean;
        let b = vertices[(i + 1) % n] - mean;
        let cross = a.perp_dot(b);
        acc += (a + b) * cross;
    }
    Some(mean + acc / (6.0 * area))
}

impl PolygonProperties for PolygonRegion {
    fn signed_area(&self) -> f32 {
        signed_area(self.vertices())
    }

    fn contains_point(&self, point: Point2D) -> bool {
        point_in_polygon(point, self.vertices())
    }

    fn orientation(&self) -> Orientation {
        orientation(self.vertices())
    }

    fn centroid(&self) -> Option<Point2D> {
        centroid(self.vertices())
    }

    fn bounds(&self) -> Option<Bounds2D> {
        Bounds2D::from_points_iter(self.vertices().iter().copied())
    }
}
