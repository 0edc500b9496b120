// src/math/field/gradient.rs

use crate::math::field::distance::ScalarField;
use crate::math::field::grid::Grid;
use crate::math::field::sampler::{FieldSampler, VectorSampler};
use crate::math::types::*;

/// Gradient eines [`ScalarField`] per zentraler Differenz auf demselben Gitter.
///
/// Nur innere Gitterpunkte werden berechnet; die Randzeilen und -spalten bleiben 0.
/// Für ein Abstandsfeld zeigt der Gradient ins Innere, weg vom nächsten Rand.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    grid: Grid,
    gx: Vec<f32>,
    gy: Vec<f32>,
}

impl VectorField {
    pub fn from_scalar(field: &ScalarField) -> Self {
        let grid = *field.grid();
        let mut gx = vec![0.0; grid.len()];
        let mut gy = vec![0.0; grid.len()];
        let inv = 1.0 / (2.0 * grid.step);

        for j in 1..grid.rows.saturating_sub(1) {
            for i in 1..grid.columns.saturating_sub(1) {
                let idx = j * grid.columns + i;
                gx[idx] = (field.value(i + 1, j) - field.value(i - 1, j)) * inv;
                gy[idx] = (field.value(i, j + 1) - field.value(i, j - 1)) * inv;
            }
        }

        Self { grid, gx, gy }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn gx(&self) -> &[f32] {
        &self.gx
    }

    pub fn gy(&self) -> &[f32] {
        &self.gy
    }

    /// Gradient am Gitterpunkt; `Vec2::ZERO` außerhalb.
    pub fn get(&self, i: usize, j: usize) -> Vec2 {
        self.grid
            .index(i, j)
            .map(|idx| Vec2::new(self.gx[idx], self.gy[idx]))
            .unwrap_or(Vec2::ZERO)
    }

    pub fn sampler(&self) -> VectorSampler<'_> {
        VectorSampler::new(&self.grid, &self.gx, &self.gy)
    }

    /// Interpolierte Tangente (senkrecht zum Gradienten), normiert oder `Vec2::ZERO`.
    pub fn tangent_at(&self, point: Point2D) -> Vec2 {
        self.sampler().sample(point).perp().normalize_or_zero()
    }
}
