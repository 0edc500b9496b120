// ./src/lib.rs
//
// Polygon-begrenzte Skalar- und Vektorfelder mit Streamline-Integration und
// Konturextraktion, dazu die Zeichenmodi, die darauf aufbauen.

pub mod debug;
pub mod math;
pub mod modes;

pub mod prelude {
    pub use crate::debug::visualization::SvgSink;
    pub use crate::math::prelude::*;
    pub use crate::modes::{
        ContourConfig, ContourMode, DrawingMode, DrawingSink, FlowConfig, FlowFollow, FlowMode,
        GuidedFlowConfig, GuidedFlowMode, HatchConfig, HatchMode, RecordingSink, RenderContext,
        RenderStats,
    };
}
