// src/modes/contour.rs

use super::{
    DrawingMode, DrawingSink, RenderContext, RenderStats, ensure_renderable, ensure_valid,
};
use crate::math::algorithms::MarchingSquares;
use crate::math::error::{MathError, MathResult};
use crate::math::field::ScalarField;
use crate::math::geometry::polygon::PolygonRegion;
use bevy::log::debug;
use serde::{Deserialize, Serialize};

/// Iso-Linien des Abstandsfelds bei `spacing`, `2 * spacing`, … innerhalb der Region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourConfig {
    /// Gitterschritt des Abstandsfelds.
    pub grid_step: f32,
    /// Abstand zwischen zwei Iso-Leveln.
    pub spacing: f32,
    pub max_levels: usize,
    /// Segmente zu Polylines verketten; sonst einzeln ausgeben.
    pub chain_segments: bool,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            grid_step: 4.0,
            spacing: 8.0,
            max_levels: 64,
            chain_segments: true,
        }
    }
}

impl ContourConfig {
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_grid_step(mut self, step: f32) -> Self {
        self.grid_step = step;
        self
    }

    pub fn with_chain_segments(mut self, chain: bool) -> Self {
        self.chain_segments = chain;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if !(self.grid_step > 0.0 && self.spacing > 0.0) {
            return Err(MathError::config(
                "contour grid_step and spacing must be positive",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContourMode {
    pub config: ContourConfig,
}

impl ContourMode {
    pub fn new(config: ContourConfig) -> Self {
        Self { config }
    }

    /// Wie [`Self::new`], prüft die Konfiguration aber vorab.
    pub fn try_new(config: ContourConfig) -> MathResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Iso-Level, die im Wertebereich des Felds liegen.
    pub fn levels(&self, field: &ScalarField) -> Vec<f32> {
        let Some((_, max)) = field.min_max() else {
            return Vec::new();
        };
        (1..=self.config.max_levels)
            .map(|k| k as f32 * self.config.spacing)
            .take_while(|level| *level < max)
            .collect()
    }
}

impl DrawingMode for ContourMode {
    fn name(&self) -> &'static str {
        "contour"
    }

    fn render(
        &self,
        region: &PolygonRegion,
        ctx: &mut RenderContext,
        sink: &mut dyn DrawingSink,
    ) -> RenderStats {
        let mut stats = RenderStats::default();
        if !ensure_valid(self.name(), self.config.validate())
            || !ensure_renderable(self.name(), region)
        {
            return stats;
        }

        let field = ScalarField::build(self.config.grid_step, region, ctx.canvas);
        let tolerance = field.grid().step * 1e-3;

        for level in self.levels(&field) {
            if self.config.chain_segments {
                let segments = MarchingSquares::extract_segments(&field, level);
                for contour in MarchingSquares::chain_segments(&segments, tolerance) {
                    let mut points = contour.vertices;
                    if contour.is_closed {
                        if let Some(first) = points.first().copied() {
                            points.push(first);
                        }
                    }
                    if points.len() >= 2 {
                        sink.polyline(&points);
                        stats.polylines += 1;
                    }
                }
            } else {
                MarchingSquares::march(&field, level, |a, b| {
                    sink.segment(a, b);
                    stats.segments += 1;
                });
            }
        }

        debug!(
            "contour: {} polylines, {} segments",
            stats.polylines, stats.segments
        );
        stats
    }
}
