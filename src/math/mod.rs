pub mod algorithms;
pub mod error;
pub mod field;
pub mod geometry;
pub mod probability;
pub mod scalar_field;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        algorithms::*,
        error::{MathError, MathResult},
        field::{FieldSampler, Grid, ScalarField, VectorField},
        geometry::polygon::{PolygonProperties, PolygonRegion},
        probability::SeedResource,
        scalar_field::ScalarField2D,
        types::*,
    };
}
