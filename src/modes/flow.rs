// src/modes/flow.rs

use super::{
    DrawingMode, DrawingSink, RenderContext, RenderStats, emit_path, ensure_renderable,
    ensure_valid,
};
use crate::math::algorithms::{
    DashPattern, DensityConfig, DensityGrid, DirectionField, StreamlineConfig,
    StreamlineIntegrator, TangentField, TurnPolicy,
};
use crate::math::error::{MathError, MathResult};
use crate::math::field::{ScalarField, VectorField};
use crate::math::geometry::polygon::{PolygonProperties, PolygonRegion, point_in_polygon};
use crate::math::types::*;
use bevy::log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Welchem Feld die Linien folgen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowFollow {
    /// Parallel zum Rand (senkrecht zum Gradienten).
    Tangent,
    /// Vom Rand nach innen.
    Gradient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    pub grid_step: f32,
    /// Abstand der Startpunkte im Raster.
    pub seed_spacing: f32,
    /// Zufällige Verschiebung der Startpunkte, relativ zu `seed_spacing`.
    pub seed_jitter: f32,
    pub follow: FlowFollow,
    pub streamline: StreamlineConfig,
    pub turn: Option<TurnPolicy>,
    pub density: DensityConfig,
    pub dash: Option<DashPattern>,
    /// Kürzere Linien werden verworfen.
    pub min_points: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            grid_step: 4.0,
            seed_spacing: 8.0,
            seed_jitter: 0.35,
            follow: FlowFollow::Tangent,
            streamline: StreamlineConfig::default(),
            turn: Some(TurnPolicy::default()),
            density: DensityConfig::default(),
            dash: None,
            min_points: 4,
        }
    }
}

impl FlowConfig {
    pub fn with_follow(mut self, follow: FlowFollow) -> Self {
        self.follow = follow;
        self
    }

    pub fn with_seed_spacing(mut self, spacing: f32) -> Self {
        self.seed_spacing = spacing;
        self
    }

    pub fn with_streamline(mut self, streamline: StreamlineConfig) -> Self {
        self.streamline = streamline;
        self
    }

    pub fn with_turn(mut self, turn: Option<TurnPolicy>) -> Self {
        self.turn = turn;
        self
    }

    pub fn with_density(mut self, density: DensityConfig) -> Self {
        self.density = density;
        self
    }

    pub fn with_dash(mut self, dash: Option<DashPattern>) -> Self {
        self.dash = dash;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if !(self.grid_step > 0.0 && self.seed_spacing > 0.0 && self.seed_spacing.is_finite()) {
            return Err(MathError::config(
                "flow grid_step and seed_spacing must be positive",
            ));
        }
        if !(0.0..=0.5).contains(&self.seed_jitter) {
            return Err(MathError::config("seed_jitter must lie in [0, 0.5]"));
        }
        self.streamline.validate()?;
        self.density.validate()?;
        if let Some(turn) = &self.turn {
            turn.validate()?;
        }
        if let Some(dash) = &self.dash {
            dash.validate()?;
        }
        Ok(())
    }
}

/// Streamlines durch das Gradienten- oder Tangentenfeld, ausgedünnt über ein [`DensityGrid`].
#[derive(Debug, Clone, Default)]
pub struct FlowMode {
    pub config: FlowConfig,
}

impl FlowMode {
    pub fn new(config: FlowConfig) -> Self {
        Self { config }
    }

    /// Wie [`Self::new`], prüft die Konfiguration aber vorab.
    pub fn try_new(config: FlowConfig) -> MathResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Gejittertes Raster von Startpunkten innerhalb der Region, in zufälliger Reihenfolge.
    pub fn seeds<R: Rng + ?Sized>(
        &self,
        region: &PolygonRegion,
        canvas: CanvasBounds,
        rng: &mut R,
    ) -> Vec<Point2D> {
        let Some(bounds) = region.bounds() else {
            return Vec::new();
        };
        let bounds = bounds.intersection(&canvas.to_bounds());
        if bounds.is_empty() {
            return Vec::new();
        }

        let spacing = self.config.seed_spacing;
        if !(spacing.is_finite() && spacing > 0.0) {
            return Vec::new();
        }
        let jitter = spacing * self.config.seed_jitter;
        let columns = (bounds.width() / spacing).floor() as usize + 1;
        let rows = (bounds.height() / spacing).floor() as usize + 1;

        let mut seeds = Vec::with_capacity(columns * rows);
        for j in 0..rows {
            for i in 0..columns {
                let mut p = bounds.min + Vec2::new(i as f32 + 0.5, j as f32 + 0.5) * spacing;
                if jitter > 0.0 {
                    p += Vec2::new(
                        rng.random_range(-jitter..jitter),
                        rng.random_range(-jitter..jitter),
                    );
                }
                if point_in_polygon(p, region.vertices()) {
                    seeds.push(p);
                }
            }
        }
        seeds.shuffle(rng);
        seeds
    }

    fn trace_all<D: DirectionField + ?Sized>(
        &self,
        field: &D,
        region: &PolygonRegion,
        ctx: &mut RenderContext,
        sink: &mut dyn DrawingSink,
    ) -> RenderStats {
        let mut stats = RenderStats::default();
        let mut integrator =
            StreamlineIntegrator::new(field, region, self.config.streamline.clone());
        if let Some(turn) = &self.config.turn {
            integrator = integrator.with_turn_policy(turn.clone());
        }
        let mut density = DensityGrid::new(self.config.density.clone());

        let seeds = self.seeds(region, ctx.canvas, &mut ctx.rng);
        for seed in seeds {
            // Schon dicht belegte Startzellen gar nicht erst integrieren
            if density.coverage_at(seed) > 0 {
                continue;
            }
            let Some(line) = integrator.trace_bidirectional(seed) else {
                continue;
            };
            if line.len() < self.config.min_points.max(2) || !density.offer(&line.points) {
                stats.rejected += 1;
                continue;
            }
            emit_path(&line.points, self.config.dash.as_ref(), ctx, sink, &mut stats);
        }
        stats
    }
}

impl DrawingMode for FlowMode {
    fn name(&self) -> &'static str {
        "flow"
    }

    fn render(
        &self,
        region: &PolygonRegion,
        ctx: &mut RenderContext,
        sink: &mut dyn DrawingSink,
    ) -> RenderStats {
        if !ensure_valid(self.name(), self.config.validate())
            || !ensure_renderable(self.name(), region)
        {
            return RenderStats::default();
        }

        let field = ScalarField::build(self.config.grid_step, region, ctx.canvas);
        let gradient = VectorField::from_scalar(&field);
        let sampler = gradient.sampler();

        let stats = match self.config.follow {
            FlowFollow::Tangent => {
                self.trace_all(&TangentField::new(sampler), region, ctx, sink)
            }
            FlowFollow::Gradient => self.trace_all(&sampler, region, ctx, sink),
        };

        debug!(
            "flow ({:?}): {} polylines drawn, {} rejected",
            self.config.follow, stats.polylines, stats.rejected
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::RecordingSink;
    use rand::{SeedableRng, rngs::StdRng};

    fn hexagon() -> PolygonRegion {
        PolygonRegion::regular(Vec2::splat(100.0), 80.0, 6)
    }

    #[test]
    fn test_seeds_inside_and_shuffled() {
        let mode = FlowMode::default();
        let region = hexagon();
        let mut rng = StdRng::seed_from_u64(5);
        let seeds = mode.seeds(&region, CanvasBounds::new(200, 200), &mut rng);
        assert!(seeds.len() > 50);
        assert!(seeds.iter().all(|p| point_in_polygon(*p, region.vertices())));
        // Nicht in Rasterreihenfolge
        assert!(seeds.windows(2).any(|w| w[1].y < w[0].y));
    }

    #[test]
    fn test_all_points_stay_inside() {
        let region = hexagon();
        for follow in [FlowFollow::Tangent, FlowFollow::Gradient] {
            let mode = FlowMode::new(FlowConfig::default().with_follow(follow));
            let mut ctx = RenderContext::new(CanvasBounds::new(200, 200), 9);
            let mut sink = RecordingSink::default();
            let stats = mode.render(&region, &mut ctx, &mut sink);
            assert!(stats.polylines > 0);
            for p in sink.points() {
                assert!(point_in_polygon(p, region.vertices()), "{p:?}");
            }
        }
    }

    #[test]
    fn test_density_thins_lines() {
        let region = hexagon();
        let sparse = FlowMode::new(FlowConfig::default().with_density(DensityConfig::new(24.0)));
        let dense = FlowMode::new(FlowConfig::default().with_density(DensityConfig::new(3.0)));

        let mut a = RecordingSink::default();
        let mut b = RecordingSink::default();
        sparse.render(&region, &mut RenderContext::new(CanvasBounds::new(200, 200), 1), &mut a);
        dense.render(&region, &mut RenderContext::new(CanvasBounds::new(200, 200), 1), &mut b);
        assert!(a.polylines.len() < b.polylines.len());
    }

    #[test]
    fn test_dashed_output_has_more_pieces() {
        let region = hexagon();
        let solid = FlowMode::default();
        let dashed =
            FlowMode::new(FlowConfig::default().with_dash(Some(DashPattern::new(4.0, 4.0))));
        let mut a = RecordingSink::default();
        let mut b = RecordingSink::default();
        solid.render(&region, &mut RenderContext::new(CanvasBounds::new(200, 200), 2), &mut a);
        dashed.render(&region, &mut RenderContext::new(CanvasBounds::new(200, 200), 2), &mut b);
        assert!(b.polylines.len() > a.polylines.len());
        assert!(b.polylines.iter().all(|d| d.len() >= 2));
    }

    #[test]
    fn test_zero_spacing_yields_no_seeds() {
        let mode = FlowMode::new(FlowConfig::default().with_seed_spacing(0.0));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(mode.seeds(&hexagon(), CanvasBounds::new(200, 200), &mut rng).is_empty());
    }

    #[test]
    fn test_validate() {
        assert!(FlowConfig::default().validate().is_ok());
        assert!(FlowConfig::default().with_seed_spacing(0.0).validate().is_err());
        let bad_turn = TurnPolicy::default().with_reach(4.0, 1.0);
        assert!(FlowConfig::default().with_turn(Some(bad_turn)).validate().is_err());
    }
}
