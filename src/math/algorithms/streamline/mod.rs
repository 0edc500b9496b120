// src/math/algorithms/streamline/mod.rs

// Streamline-Integration innerhalb eines Polygons
pub mod config;
pub mod dash;
pub mod direction;
pub mod integrator;

pub use self::config::{ExitAlignment, StreamlineConfig, TurnPolicy};
pub use self::dash::{DashPattern, dash_polyline};
pub use self::direction::{DirectionField, TangentField, UniformField};
pub use self::integrator::{Streamline, StreamlineIntegrator, Termination, TraceResult};
