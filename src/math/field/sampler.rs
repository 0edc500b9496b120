// src/math/field/sampler.rs
//
// Bilineare Abtastung von Gitterwerten an beliebigen Weltkoordinaten. Außerhalb des
// Gitters liefern die Sampler den neutralen Wert (0 bzw. Vec2::ZERO) statt eines Fehlers;
// Aufrufer werten das als "keine Information".

use crate::math::field::grid::{CellLocation, Grid};
use crate::math::types::*;

/// Gemeinsame Schnittstelle der Sampler.
pub trait FieldSampler {
    type Output;

    fn sample(&self, point: Point2D) -> Self::Output;
}

#[inline]
fn bilinear(c00: f32, c10: f32, c01: f32, c11: f32, tx: f32, ty: f32) -> f32 {
    let top = c00 + (c10 - c00) * tx;
    let bottom = c01 + (c11 - c01) * tx;
    top + (bottom - top) * ty
}

/// Die vier Eckwerte einer Zelle, `None` wenn das Array nicht zum Gitter passt.
#[inline]
fn corners(grid: &Grid, values: &[f32], loc: &CellLocation) -> Option<[f32; 4]> {
    let i00 = grid.index(loc.i, loc.j)?;
    let i01 = grid.index(loc.i, loc.j + 1)?;
    Some([
        *values.get(i00)?,
        *values.get(i00 + 1)?,
        *values.get(i01)?,
        *values.get(i01 + 1)?,
    ])
}

/// Sampler für ein Skalarfeld; leiht sich Gitter und Werte.
#[derive(Debug, Clone, Copy)]
pub struct ScalarSampler<'a> {
    grid: &'a Grid,
    values: &'a [f32],
}

impl<'a> ScalarSampler<'a> {
    pub fn new(grid: &'a Grid, values: &'a [f32]) -> Self {
        Self { grid, values }
    }
}

impl FieldSampler for ScalarSampler<'_> {
    type Output = f32;

    fn sample(&self, point: Point2D) -> f32 {
        let Some(loc) = self.grid.locate(point) else {
            return 0.0;
        };
        match corners(self.grid, self.values, &loc) {
            Some([c00, c10, c01, c11]) => bilinear(c00, c10, c01, c11, loc.tx, loc.ty),
            None => 0.0,
        }
    }
}

/// Sampler für ein zweikomponentiges Vektorfeld (`gx`, `gy`).
#[derive(Debug, Clone, Copy)]
pub struct VectorSampler<'a> {
    grid: &'a Grid,
    gx: &'a [f32],
    gy: &'a [f32],
}

impl<'a> VectorSampler<'a> {
    pub fn new(grid: &'a Grid, gx: &'a [f32], gy: &'a [f32]) -> Self {
        Self { grid, gx, gy }
    }
}

impl FieldSampler for VectorSampler<'_> {
    type Output = Vec2;

    fn sample(&self, point: Point2D) -> Vec2 {
        let Some(loc) = self.grid.locate(point) else {
            return Vec2::ZERO;
        };
        match (
            corners(self.grid, self.gx, &loc),
            corners(self.grid, self.gy, &loc),
        ) {
            (Some([x00, x10, x01, x11]), Some([y00, y10, y01, y11])) => Vec2::new(
                bilinear(x00, x10, x01, x11, loc.tx, loc.ty),
                bilinear(y00, y10, y01, y11, loc.tx, loc.ty),
            ),
            _ => Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn grid() -> Grid {
        Grid::new(Vec2::new(0.0, 0.0), 10.0, 3, 3)
    }

    #[test]
    fn test_exact_at_lattice_points() {
        let g = grid();
        let values: Vec<f32> = (0..9).map(|v| v as f32).collect();
        let s = ScalarSampler::new(&g, &values);
        assert_abs_diff_eq!(s.sample(Vec2::new(0.0, 0.0)), 0.0);
        assert_abs_diff_eq!(s.sample(Vec2::new(10.0, 10.0)), 4.0);
        assert_abs_diff_eq!(s.sample(Vec2::new(5.0, 0.0)), 0.5);
        assert_abs_diff_eq!(s.sample(Vec2::new(5.0, 5.0)), 2.0);
    }

    #[test]
    fn test_neutral_outside_domain() {
        let g = grid();
        let values = vec![7.0; 9];
        let s = ScalarSampler::new(&g, &values);
        assert_eq!(s.sample(Vec2::new(-0.1, 5.0)), 0.0);
        assert_eq!(s.sample(Vec2::new(5.0, 20.0)), 0.0);
        assert_eq!(s.sample(Vec2::new(f32::NAN, 5.0)), 0.0);

        let short = vec![1.0; 4];
        let mismatched = ScalarSampler::new(&g, &short);
        assert_eq!(mismatched.sample(Vec2::new(15.0, 15.0)), 0.0);
    }

    #[test]
    fn test_interpolation_bounded_by_corners() {
        let g = Grid::new(Vec2::new(-3.0, 4.0), 2.5, 6, 5);
        let mut rng = StdRng::seed_from_u64(11);
        let values: Vec<f32> = (0..g.len()).map(|_| rng.random_range(-50.0..50.0)).collect();
        let s = ScalarSampler::new(&g, &values);

        for _ in 0..1000 {
            let p = Vec2::new(rng.random_range(-3.0..9.5), rng.random_range(4.0..14.0));
            let Some(loc) = g.locate(p) else {
                assert_eq!(s.sample(p), 0.0);
                continue;
            };
            let c = [
                values[g.index(loc.i, loc.j).unwrap()],
                values[g.index(loc.i + 1, loc.j).unwrap()],
                values[g.index(loc.i, loc.j + 1).unwrap()],
                values[g.index(loc.i + 1, loc.j + 1).unwrap()],
            ];
            let lo = c.iter().copied().fold(f32::INFINITY, f32::min);
            let hi = c.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            let v = s.sample(p);
            assert!(v >= lo - 1e-4 && v <= hi + 1e-4, "{v} not in [{lo}, {hi}]");
        }
    }

    #[test]
    fn test_vector_sampler() {
        let g = grid();
        let gx = vec![1.0; 9];
        let gy: Vec<f32> = (0..9).map(|v| (v / 3) as f32).collect();
        let s = VectorSampler::new(&g, &gx, &gy);
        let v = s.sample(Vec2::new(5.0, 15.0));
        assert_abs_diff_eq!(v.x, 1.0);
        assert_abs_diff_eq!(v.y, 1.5);
        assert_eq!(s.sample(Vec2::new(30.0, 0.0)), Vec2::ZERO);
    }
}
