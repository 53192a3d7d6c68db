//! Error types for the beam solver driver

use thiserror::Error;

/// Main error type for beam driver operations
#[derive(Error, Debug)]
pub enum FEAError {
    #[error("No Kirchhoff-Love beam problem is attached to the model")]
    NoBeamProblem,

    #[error("No materials have been defined")]
    NoMaterials,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Node {node} is outside the equation system (1..={max})")]
    NodeOutOfRange { node: usize, max: usize },

    #[error("Load vector has {len} entries, equation {eqn} requested")]
    EquationOutOfRange { eqn: usize, len: usize },

    #[error("Point load on patch #{patch} at xi = {xi} is not resolved to a node")]
    UnresolvedPointLoad { patch: usize, xi: f64 },

    #[error("Primary solution is missing or too short for node {0}")]
    SolutionOutOfRange(usize),

    #[error("Invalid norm vector: {0}")]
    InvalidNorms(String),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("XML error: {0}")]
    XmlError(#[from] roxmltree::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for beam driver operations
pub type FEAResult<T> = Result<T, FEAError>;
