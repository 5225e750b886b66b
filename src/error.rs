//! Error types for stiffness assembly

use thiserror::Error;

use crate::elements::PlaneFormulation;

/// Main error type for model construction and assembly
#[derive(Error, Debug)]
pub enum FemError {
    #[error("Degenerate mesh: {axis} needs at least 2 nodes, got {count}")]
    DegenerateMesh { axis: char, count: usize },

    #[error("Invalid length along {axis}: {value} (must be positive and finite)")]
    InvalidLength { axis: char, value: f64 },

    #[error("Invalid elastic modulus: {0} (must be positive and finite)")]
    InvalidModulus(f64),

    #[error("Invalid Poisson ratio {nu} for {formulation:?}")]
    InvalidPoissonRatio {
        nu: f64,
        formulation: PlaneFormulation,
    },

    #[error("Invalid thickness: {0} (must be positive and finite)")]
    InvalidThickness(f64),

    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Design variable {index} out of range ({count} variables)")]
    DesignVariableOutOfRange { index: usize, count: usize },

    #[error("Sparse format error: {0}")]
    SparseFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for stiffness operations
pub type FemResult<T> = Result<T, FemError>;

/// Check that a caller-provided slice has the expected length
pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> FemResult<()> {
    if expected != actual {
        return Err(FemError::LengthMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
