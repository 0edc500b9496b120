// src/math/field/mod.rs

// Gitter, Abstandsfeld, Gradient und bilineare Sampler
pub mod distance;
pub mod gradient;
pub mod grid;
pub mod sampler;

pub use self::distance::ScalarField;
pub use self::gradient::VectorField;
pub use self::grid::{CellLocation, GRID_MARGIN, Grid, MAX_GRID_SAMPLES};
pub use self::sampler::{FieldSampler, ScalarSampler, VectorSampler};
