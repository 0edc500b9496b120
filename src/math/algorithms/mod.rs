// src/math/algorithms/mod.rs

// Algorithmen über Feldern und Polygonen
pub mod density;
pub mod marching_squares;
pub mod streamline;

pub use self::density::{DensityConfig, DensityGrid};
pub use self::marching_squares::{Contour, MarchingSquares};
pub use self::streamline::{
    DashPattern, DirectionField, ExitAlignment, Streamline, StreamlineConfig,
    StreamlineIntegrator, TangentField, Termination, TraceResult, TurnPolicy, UniformField,
    dash_polyline,
};
