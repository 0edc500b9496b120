// src/modes/hatch.rs

use super::{
    DrawingMode, DrawingSink, RenderContext, RenderStats, emit_path, ensure_renderable,
    ensure_valid,
};
use crate::math::algorithms::DashPattern;
use crate::math::error::{MathError, MathResult};
use crate::math::geometry::polygon::{PolygonRegion, clip_line};
use crate::math::types::*;
use crate::math::utils::angles;
use bevy::log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Parallele Schraffur, an der Region abgeschnitten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HatchConfig {
    pub angle_deg: f32,
    pub spacing: f32,
    /// Zufälliger Versatz jeder Linie, relativ zu `spacing`.
    pub jitter: f32,
    /// Zweite Lage um 90° gedreht.
    pub cross: bool,
    pub dash: Option<DashPattern>,
}

impl Default for HatchConfig {
    fn default() -> Self {
        Self {
            angle_deg: 45.0,
            spacing: 6.0,
            jitter: 0.0,
            cross: false,
            dash: None,
        }
    }
}

impl HatchConfig {
    pub fn with_angle(mut self, angle_deg: f32) -> Self {
        self.angle_deg = angle_deg;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_cross(mut self, cross: bool) -> Self {
        self.cross = cross;
        self
    }

    pub fn with_dash(mut self, dash: Option<DashPattern>) -> Self {
        self.dash = dash;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(MathError::config("hatch spacing must be positive"));
        }
        if !(0.0..0.5).contains(&self.jitter) {
            return Err(MathError::config("hatch jitter must lie in [0, 0.5)"));
        }
        if let Some(dash) = &self.dash {
            dash.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct HatchMode {
    pub config: HatchConfig,
}

impl HatchMode {
    pub fn new(config: HatchConfig) -> Self {
        Self { config }
    }

    /// Wie [`Self::new`], prüft die Konfiguration aber vorab.
    pub fn try_new(config: HatchConfig) -> MathResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Alle inneren Abschnitte einer Lage unter `angle_deg`.
    pub fn hatch_lines<R: Rng + ?Sized>(
        &self,
        region: &PolygonRegion,
        angle_deg: f32,
        rng: &mut R,
    ) -> Vec<(Point2D, Point2D)> {
        let vertices = region.vertices();
        let dir = angles::unit_from_degrees(angle_deg);
        let normal = dir.perp();

        // Ausdehnung der Region quer zur Schraffur
        let (lo, hi) = vertices
            .iter()
            .map(|v| v.dot(normal))
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), o| {
                (lo.min(o), hi.max(o))
            });
        if !(lo.is_finite() && hi.is_finite()) {
            return Vec::new();
        }

        let spacing = self.config.spacing;
        if !(spacing.is_finite() && spacing > 0.0) {
            return Vec::new();
        }
        let jitter = spacing * self.config.jitter;
        let mut lines = Vec::new();
        let mut offset = lo + spacing * 0.5;
        while offset < hi {
            let shifted = if jitter > 0.0 {
                offset + rng.random_range(-jitter..jitter)
            } else {
                offset
            };
            lines.extend(clip_line(normal * shifted, dir, vertices));
            offset += spacing;
        }
        lines
    }
}

impl DrawingMode for HatchMode {
    fn name(&self) -> &'static str {
        "hatch"
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

        let mut layers = vec![self.config.angle_deg];
        if self.config.cross {
            layers.push(self.config.angle_deg + 90.0);
        }

        for angle in layers {
            for (a, b) in self.hatch_lines(region, angle, &mut ctx.rng) {
                match self.config.dash.as_ref() {
                    Some(pattern) => emit_path(&[a, b], Some(pattern), ctx, sink, &mut stats),
                    None => {
                        sink.segment(a, b);
                        stats.segments += 1;
                    }
                }
            }
        }

        debug!(
            "hatch: {} segments, {} dashes",
            stats.segments, stats.polylines
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::RecordingSink;
    use approx::assert_abs_diff_eq;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_horizontal_hatch_in_square() {
        let square = PolygonRegion::rectangle(Vec2::ZERO, Vec2::splat(100.0));
        let mode = HatchMode::new(HatchConfig::default().with_angle(0.0).with_spacing(10.0));
        let lines = mode.hatch_lines(&square, 0.0, &mut StdRng::seed_from_u64(0));
        assert_eq!(lines.len(), 10);
        for (a, b) in &lines {
            assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-4);
            assert_abs_diff_eq!((b.x - a.x).abs(), 100.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_concave_region_splits_lines() {
        // U-Form: horizontale Linien im oberen Teil treffen beide Schenkel
        let u = PolygonRegion::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 0.0),
            Vec2::new(30.0, 70.0),
            Vec2::new(70.0, 70.0),
            Vec2::new(70.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 100.0),
        ]);
        let mode = HatchMode::new(HatchConfig::default().with_spacing(10.0));
        let lines = mode.hatch_lines(&u, 0.0, &mut StdRng::seed_from_u64(0));
        let low: Vec<_> = lines.iter().filter(|(a, _)| a.y < 70.0).collect();
        let high: Vec<_> = lines.iter().filter(|(a, _)| a.y > 70.0).collect();
        assert_eq!(low.len(), 14);
        assert_eq!(high.len(), 3);
    }

    #[test]
    fn test_cross_hatch_doubles_layers() {
        let square = PolygonRegion::rectangle(Vec2::ZERO, Vec2::splat(100.0));
        let single = HatchMode::new(HatchConfig::default().with_angle(0.0).with_spacing(10.0));
        let cross = HatchMode::new(
            HatchConfig::default()
                .with_angle(0.0)
                .with_spacing(10.0)
                .with_cross(true),
        );
        let mut a = RecordingSink::default();
        let mut b = RecordingSink::default();
        let mut ctx = RenderContext::new(CanvasBounds::new(100, 100), 0);
        let sa = single.render(&square, &mut ctx, &mut a);
        let sb = cross.render(&square, &mut ctx, &mut b);
        assert_eq!(sa.segments, 10);
        assert_eq!(sb.segments, 20);
    }

    #[test]
    fn test_dashed_hatch_emits_polylines() {
        let square = PolygonRegion::rectangle(Vec2::ZERO, Vec2::splat(100.0));
        let mode = HatchMode::new(
            HatchConfig::default()
                .with_angle(0.0)
                .with_spacing(10.0)
                .with_dash(Some(DashPattern::new(10.0, 10.0))),
        );
        let mut sink = RecordingSink::default();
        let stats = mode.render(&square, &mut RenderContext::new(CanvasBounds::new(100, 100), 0), &mut sink);
        assert_eq!(stats.segments, 0);
        // 100er-Linie mit Periode 20: fünf Striche pro Linie
        assert_eq!(stats.polylines, 50);
    }

    #[test]
    fn test_zero_spacing_yields_no_lines() {
        let square = PolygonRegion::rectangle(Vec2::ZERO, Vec2::splat(100.0));
        let mode = HatchMode::new(HatchConfig::default().with_spacing(0.0));
        assert!(mode.hatch_lines(&square, 0.0, &mut StdRng::seed_from_u64(0)).is_empty());
    }

    #[test]
    fn test_validate() {
        assert!(HatchConfig::default().validate().is_ok());
        assert!(HatchConfig::default().with_jitter(0.7).validate().is_err());
        assert!(HatchConfig::default().with_spacing(-1.0).validate().is_err());
    }
}
