// src/math/error.rs
use thiserror::Error;

/// Fehler, die an den Rändern der Bibliothek entstehen (Konfiguration, Eingaben, Ausgabe).
/// Der numerische Kern selbst liefert keine Fehler, sondern neutrale Werte.
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Degenerate polygon: {reason}")]
    DegeneratePolygon { reason: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MathResult<T> = Result<T, MathError>;

impl MathError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        MathError::InvalidConfiguration {
            message: message.into(),
        }
    }
}
