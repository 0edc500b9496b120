// src/math/field/distance.rs

use crate::math::field::grid::{GRID_MARGIN, Grid};
use crate::math::field::sampler::ScalarSampler;
use crate::math::geometry::polygon::{PolygonProperties, PolygonRegion, signed_distance};
use crate::math::scalar_field::ScalarField2D;
use crate::math::types::*;
use bevy::log::debug;

/// Vorzeichenbehaftetes Abstandsfeld über einem [`Grid`].
///
/// Positiv innerhalb des Polygons, negativ außerhalb, Betrag = euklidischer Abstand zur
/// nächsten Kante. Wird einmal pro Render-Aufruf gebaut und danach nicht mehr verändert.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    grid: Grid,
    values: Vec<f32>,
}

impl ScalarField {
    /// Rastert das Abstandsfeld von `region` mit Gitterabstand `step`.
    ///
    /// Kosten: `O(columns × rows × edges)`. Es gibt kein Caching zwischen Aufrufen.
    /// Bei weniger als drei Punkten entsteht ein Feld mit einheitlichem Vorzeichen.
    pub fn build(step: f32, region: &PolygonRegion, canvas: CanvasBounds) -> Self {
        let grid = match region.bounds() {
            Some(bounds) => Grid::covering(&bounds, step, GRID_MARGIN, canvas),
            None => Grid::empty(step),
        };
        let vertices = region.vertices();
        let field = Self::from_fn(grid, |p| signed_distance(p, vertices));
        debug!(
            "Distance field: {}x{} samples, step {}, {} edges",
            field.grid.columns,
            field.grid.rows,
            field.grid.step,
            vertices.len()
        );
        field
    }

    /// Wertet `f` an jedem Gitterpunkt aus.
    pub fn from_fn(grid: Grid, f: impl Fn(Point2D) -> f32) -> Self {
        let mut values = Vec::with_capacity(grid.len());
        for j in 0..grid.rows {
            for i in 0..grid.columns {
                values.push(f(grid.position(i, j)));
            }
        }
        Self { grid, values }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Wert am Gitterpunkt; 0.0 außerhalb.
    pub fn value(&self, i: usize, j: usize) -> f32 {
        self.grid
            .index(i, j)
            .and_then(|idx| self.values.get(idx).copied())
            .unwrap_or(0.0)
    }

    /// Kleinster und größter Wert, `None` für ein leeres Feld.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn sampler(&self) -> ScalarSampler<'_> {
        ScalarSampler::new(&self.grid, &self.values)
    }
}

impl ScalarField2D for ScalarField {
    fn width(&self) -> usize {
        self.grid.columns
    }
    fn height(&self) -> usize {
        self.grid.rows
    }
    fn cell_size(&self) -> f32 {
        self.grid.step
    }
    fn origin(&self) -> Vec2 {
        self.grid.origin
    }
    fn get_value(&self, x_idx: usize, y_idx: usize) -> f32 {
        self.value(x_idx, y_idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::field::sampler::FieldSampler;
    use approx::assert_abs_diff_eq;

    fn square() -> PolygonRegion {
        PolygonRegion::rectangle(Vec2::ZERO, Vec2::splat(100.0))
    }

    #[test]
    fn test_square_field_center_and_outside() {
        let field = ScalarField::build(8.0, &square(), CanvasBounds::new(400, 400));
        let sampler = field.sampler();
        // (50, 50) liegt zwischen Gitterpunkten 48 und 56, am First des Abstandsfelds
        // unterschätzt die Interpolation um höchstens einen halben Gitterschritt
        let center = sampler.sample(Vec2::new(50.0, 50.0));
        assert!((center - 50.0).abs() <= 4.0, "center {center}");
        assert_abs_diff_eq!(field.value(6, 6), 48.0, epsilon = 1e-4);

        // Links vom Quadrat ist der Canvas zu Ende, der Abstand selbst stimmt trotzdem
        assert_abs_diff_eq!(signed_distance(Vec2::new(-10.0, 50.0), square().vertices()), -10.0);
        assert_abs_diff_eq!(sampler.sample(Vec2::new(-10.0, 50.0)), 0.0);
    }

    #[test]
    fn test_field_outside_is_negative() {
        let region = PolygonRegion::rectangle(Vec2::splat(50.0), Vec2::splat(150.0));
        let field = ScalarField::build(5.0, &region, CanvasBounds::new(400, 400));
        let origin = field.grid().origin;
        assert!(field.value(0, 0) < 0.0);
        assert_abs_diff_eq!(
            field.value(0, 0),
            signed_distance(origin, region.vertices()),
            epsilon = 1e-4
        );
        let (lo, hi) = field.min_max().unwrap();
        assert!(lo < 0.0 && hi > 0.0);
        assert_abs_diff_eq!(hi, 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_degenerate_region_has_uniform_sign() {
        let line = PolygonRegion::new(vec![Vec2::new(10.0, 10.0), Vec2::new(60.0, 10.0)]);
        let field = ScalarField::build(5.0, &line, CanvasBounds::new(100, 100));
        assert!(!field.is_empty());
        assert!(field.values().iter().all(|v| *v <= 0.0));

        let empty = ScalarField::build(5.0, &PolygonRegion::default(), CanvasBounds::new(100, 100));
        assert!(empty.is_empty());
        assert!(empty.min_max().is_none());
    }

    #[test]
    fn test_scalar_field_trait_view() {
        let field = ScalarField::build(10.0, &square(), CanvasBounds::new(200, 200));
        assert_eq!(field.width(), field.grid().columns);
        assert_eq!(field.cell_to_world(2, 3), Vec2::new(20.0, 30.0));
        assert_eq!(field.get_value(10_000, 0), 0.0);
    }
}
