// src/modes/sink.rs

use crate::math::types::*;

/// Empfänger der erzeugten Geometrie. Strichstil, Farbe und Komposition liegen beim Empfänger.
pub trait DrawingSink {
    fn polyline(&mut self, points: &[Point2D]);

    fn segment(&mut self, a: Point2D, b: Point2D) {
        self.polyline(&[a, b]);
    }
}

/// Sammelt alles im Speicher, z.B. für Tests oder spätere Weiterverarbeitung.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    pub polylines: Vec<Vec<Point2D>>,
    pub segments: Vec<(Point2D, Point2D)>,
}

impl RecordingSink {
    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty() && self.segments.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.polylines.iter().map(Vec::len).sum::<usize>() + self.segments.len() * 2
    }

    pub fn points(&self) -> impl Iterator<Item = Point2D> + '_ {
        self.polylines
            .iter()
            .flatten()
            .copied()
            .chain(self.segments.iter().flat_map(|(a, b)| [*a, *b]))
    }

    pub fn clear(&mut self) {
        self.polylines.clear();
        self.segments.clear();
    }
}

impl DrawingSink for RecordingSink {
    fn polyline(&mut self, points: &[Point2D]) {
        if points.len() >= 2 {
            self.polylines.push(points.to_vec());
        }
    }

    fn segment(&mut self, a: Point2D, b: Point2D) {
        self.segments.push((a, b));
    }
}
