// src/modes/mod.rs
//
// Zeichenmodi: verbrauchen Felder, Konturen und Streamlines und geben Polylines an eine
// Senke weiter. Stil (Farbe, Breite) gehört der Senke.

pub mod contour;
pub mod flow;
pub mod guided;
pub mod hatch;
pub mod sink;

pub use self::contour::{ContourConfig, ContourMode};
pub use self::flow::{FlowConfig, FlowFollow, FlowMode};
pub use self::guided::{GuidedFlowConfig, GuidedFlowMode};
pub use self::hatch::{HatchConfig, HatchMode};
pub use self::sink::{DrawingSink, RecordingSink};

use crate::math::algorithms::{DashPattern, dash_polyline};
use crate::math::error::MathResult;
use crate::math::geometry::polygon::PolygonRegion;
use crate::math::probability::SeedResource;
use crate::math::types::*;
use bevy::log::warn;
use rand::{SeedableRng, rngs::StdRng};

/// Kleinste Fläche, ab der eine Region gezeichnet wird.
pub const MIN_RENDER_AREA: f32 = 1.0;

/// Zustand eines einzelnen Render-Aufrufs. Wird vom Aufrufer erzeugt und besessen.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub canvas: CanvasBounds,
    pub rng: StdRng,
}

impl RenderContext {
    pub fn new(canvas: CanvasBounds, seed: u64) -> Self {
        Self {
            canvas,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Kontext mit eigenem Generator pro Modus, abgeleitet vom globalen Seed.
    pub fn from_seed(seed: &SeedResource, canvas: CanvasBounds, category: &str) -> Self {
        Self {
            canvas,
            rng: seed.rng_for(category),
        }
    }
}

/// Zähler eines Render-Aufrufs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub polylines: usize,
    pub segments: usize,
    /// Vom Dichte-Filter oder wegen zu weniger Punkte verworfene Pfade.
    pub rejected: usize,
}

impl RenderStats {
    pub fn is_empty(&self) -> bool {
        self.polylines == 0 && self.segments == 0
    }
}

pub trait DrawingMode {
    fn name(&self) -> &'static str;

    /// Füllt `region` mit Strichen. Eine degenerierte Region oder eine ungültige
    /// Konfiguration erzeugt keine Ausgabe.
    fn render(
        &self,
        region: &PolygonRegion,
        ctx: &mut RenderContext,
        sink: &mut dyn DrawingSink,
    ) -> RenderStats;
}

/// Ungültige Konfigurationen erzeugen keine Ausgabe.
pub(crate) fn ensure_valid(mode: &str, check: MathResult<()>) -> bool {
    match check {
        Ok(()) => true,
        Err(e) => {
            warn!("{mode}: skipping render, {e}");
            false
        }
    }
}

/// Gemeinsame Vorprüfung aller Modi.
pub(crate) fn ensure_renderable(mode: &str, region: &PolygonRegion) -> bool {
    if region.is_renderable(MIN_RENDER_AREA) {
        return true;
    }
    warn!(
        "{mode}: skipping degenerate region ({} vertices)",
        region.len()
    );
    false
}

/// Gibt einen Pfad an die Senke, optional gestrichelt.
pub(crate) fn emit_path(
    points: &[Point2D],
    dash: Option<&DashPattern>,
    ctx: &mut RenderContext,
    sink: &mut dyn DrawingSink,
    stats: &mut RenderStats,
) {
    match dash {
        Some(pattern) => {
            for piece in dash_polyline(points, pattern, &mut ctx.rng) {
                sink.polyline(&piece);
                stats.polylines += 1;
            }
        }
        None => {
            sink.polyline(points);
            stats.polylines += 1;
        }
    }
}
