// src/math/geometry/polygon/region.rs

use crate::math::{error::*, types::*};
use std::fmt;

/// Geschlossener Umriss, in den gezeichnet wird.
///
/// Die Vertices sind implizit geschlossen: der letzte Punkt verbindet sich mit dem ersten.
/// Ein explizit doppelter Schlusspunkt wird beim Erstellen entfernt. Während eines
/// Render-Durchlaufs ist die Region unveränderlich.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonRegion {
    vertices: Vec<Point2D>,
}

impl PolygonRegion {
    /// Erstellt eine Region ohne Validierung. Auch weniger als drei Punkte sind erlaubt;
    /// Aufrufer prüfen mit [`PolygonRegion::is_renderable`], bevor sie zeichnen.
    pub fn new(mut vertices: Vec<Point2D>) -> Self {
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Self { vertices }
    }

    /// Erstellt eine Region und verlangt mindestens drei Punkte mit endlichen Koordinaten.
    pub fn try_new(vertices: Vec<Point2D>) -> MathResult<Self> {
        let region = Self::new(vertices);
        if region.vertices.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: region.vertices.len(),
            });
        }
        if !region.has_finite_vertices() {
            return Err(MathError::DegeneratePolygon {
                reason: "vertex with non-finite coordinate".to_string(),
            });
        }
        Ok(region)
    }

    /// Achsenparalleles Rechteck, gegen den Uhrzeigersinn.
    pub fn rectangle(min: Point2D, max: Point2D) -> Self {
        let b = Bounds2D::from_points(min, max);
        Self::new(b.corners().to_vec())
    }

    /// Regelmäßiges n-Eck um `center`.
    pub fn regular(center: Point2D, radius: f32, sides: usize) -> Self {
        let sides = sides.max(3);
        let vertices = (0..sides)
            .map(|i| {
                let angle = i as f32 / sides as f32 * std::f32::consts::TAU;
                center + Vec2::from_angle(angle) * radius
            })
            .collect();
        Self::new(vertices)
    }

    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iteriert über alle Kanten `(a, b)` inklusive der schließenden Kante.
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn has_finite_vertices(&self) -> bool {
        self.vertices.iter().all(|v| v.is_finite())
    }

    /// Prüfung auf Aufruferseite: mindestens drei endliche Punkte und eine Fläche
    /// von mindestens `min_area`. Alles andere wird nicht gezeichnet.
    pub fn is_renderable(&self, min_area: f32) -> bool {
        self.vertices.len() >= 3
            && self.has_finite_vertices()
            && super::properties::signed_area(&self.vertices).abs() >= min_area
    }
}

impl fmt::Display for PolygonRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolygonRegion({} vertices)", self.vertices.len())
    }
}

impl From<Vec<Point2D>> for PolygonRegion {
    fn from(vertices: Vec<Point2D>) -> Self {
        Self::new(vertices)
    }
}

impl AsRef<[Point2D]> for PolygonRegion {
    fn as_ref(&self) -> &[Point2D] {
        &self.vertices
    }
}
