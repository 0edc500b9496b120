// src/math/field/grid.rs

use crate::math::types::*;
use bevy::log::warn;

/// Rand um die Polygon-Bounding-Box, damit der Nulldurchgang vollständig im Gitter liegt.
pub const GRID_MARGIN: f32 = 12.0;

/// Obergrenze für Gitterpunkte pro Feld. Größere Gitter werden vergröbert.
pub const MAX_GRID_SAMPLES: usize = 4_000_000;

/// Achsenparalleles Gitter in Weltkoordinaten.
///
/// Gitterpunkt `(i, j)` liegt bei `origin + (i, j) * step`. Werte werden zeilenweise
/// (row-major) mit `index = j * columns + i` abgelegt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub origin: Point2D,
    pub step: f32,
    pub columns: usize,
    pub rows: usize,
}

/// Zelle `(i, j)` plus Bruchanteile `(tx, ty)` in `[0, 1)` für die bilineare Interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLocation {
    pub i: usize,
    pub j: usize,
    pub tx: f32,
    pub ty: f32,
}

impl Grid {
    pub fn new(origin: Point2D, step: f32, columns: usize, rows: usize) -> Self {
        Self {
            origin,
            step,
            columns,
            rows,
        }
    }

    /// Gitter ohne Punkte; jede Abtastung liefert den neutralen Wert.
    pub fn empty(step: f32) -> Self {
        Self::new(Point2D::ZERO, step, 0, 0)
    }

    /// Gitter über `bounds`, erweitert um `margin`, auf die Zeichenfläche geklemmt und
    /// nach außen auf Vielfache von `step` eingerastet.
    pub fn covering(bounds: &Bounds2D, step: f32, margin: f32, canvas: CanvasBounds) -> Self {
        if !bounds.is_valid() || !step.is_finite() || step <= 0.0 {
            return Self::empty(step);
        }

        let padded = bounds.expand(margin).intersection(&canvas.to_bounds());
        if padded.is_empty() {
            return Self::empty(step);
        }

        let mut step = step;
        loop {
            let snapped = padded.snap_outward(step);
            let columns = Self::count(snapped.min.x, snapped.max.x, step);
            let rows = Self::count(snapped.min.y, snapped.max.y, step);
            let samples = columns.saturating_mul(rows);
            if samples <= MAX_GRID_SAMPLES {
                return Self::new(snapped.min, step, columns, rows);
            }

            let coarser = step * (samples as f32 / MAX_GRID_SAMPLES as f32).sqrt() * 1.01;
            warn!(
                "Grid with {} samples exceeds budget of {}, step {} -> {}",
                samples, MAX_GRID_SAMPLES, step, coarser
            );
            step = coarser;
        }
    }

    /// `floor((max - min) / step) + 1`, robust gegen Rundungsfehler beim Einrasten.
    fn count(min: f32, max: f32, step: f32) -> usize {
        ((max - min) / step + 1e-4).floor().max(0.0) as usize + 1
    }

    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.columns && j < self.rows).then(|| j * self.columns + i)
    }

    pub fn position(&self, i: usize, j: usize) -> Point2D {
        self.origin + Vec2::new(i as f32, j as f32) * self.step
    }

    /// Letzter Gitterpunkt (Ecke gegenüber von `origin`).
    pub fn extent(&self) -> Bounds2D {
        if self.is_empty() {
            return Bounds2D::empty();
        }
        Bounds2D::from_points(self.origin, self.position(self.columns - 1, self.rows - 1))
    }

    /// Zelle, die `point` enthält. `None` außerhalb von `[0, columns-2] × [0, rows-2]`.
    pub fn locate(&self, point: Point2D) -> Option<CellLocation> {
        if self.columns < 2 || self.rows < 2 {
            return None;
        }
        let fx = (point.x - self.origin.x) / self.step;
        let fy = (point.y - self.origin.y) / self.step;
        let ix = fx.floor();
        let iy = fy.floor();

        // Vergleiche so formuliert, dass NaN ebenfalls herausfällt
        let max_i = (self.columns - 2) as f32;
        let max_j = (self.rows - 2) as f32;
        if !(ix >= 0.0 && ix <= max_i && iy >= 0.0 && iy <= max_j) {
            return None;
        }

        Some(CellLocation {
            i: ix as usize,
            j: iy as usize,
            tx: fx - ix,
            ty: fy - iy,
        })
    }
}
