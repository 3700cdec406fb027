//! Error types for the QAOA workspace
//!
//! Gantree: L0_Foundation → Errors
//!
//! Every failure is raised at the call that caused it and is never retried
//! internally.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QAOA parameter handling
/// Gantree: QaoaError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QaoaError {
    // ========================================================================
    // Construction Errors
    // ========================================================================
    /// Bad term structure in a cost Hamiltonian
    #[error("Malformed Hamiltonian: {0}")]
    MalformedHamiltonian(String),

    /// Number of QAOA steps must be positive
    #[error("Invalid step count {0}: n_steps must be >= 1")]
    InvalidStepCount(usize),

    /// Element count of an angle array disagrees with the hyperparameters
    #[error("Shape mismatch for '{name}': expected shape {expected:?}, got {found}")]
    ShapeMismatch {
        name: String,
        expected: (usize, usize),
        found: String,
    },

    /// Flat parameter vector has the wrong length
    #[error("Raw parameter vector has length {found}, expected {expected}")]
    RawLengthMismatch { expected: usize, found: usize },

    /// Annealing or ramp time must be positive and finite
    #[error("Invalid time {0}: must be positive and finite")]
    InvalidTime(f64),

    /// Fourier parametrization needs at least one coefficient
    #[error("Invalid Fourier degree {0}: q must be >= 1")]
    InvalidFourierDegree(usize),

    // ========================================================================
    // Sweep Errors
    // ========================================================================
    /// Unparseable or out-of-range parameter address
    #[error("Invalid parameter address: {0}")]
    InvalidParameterAddress(String),

    /// Bad sweep range
    #[error("Invalid sweep range: {0}")]
    InvalidSweepRange(String),

    // ========================================================================
    // Conversion Errors
    // ========================================================================
    /// No edge in the conversion graph between two parametrizations
    #[error("Unsupported conversion from {from} to {to}")]
    UnsupportedConversion { from: String, to: String },

    // ========================================================================
    // Cost Function Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Evaluator (simulator or backend) failure
    #[error("Evaluator error: {0}")]
    EvaluatorError(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for QAOA operations
/// Gantree: QaoaResult<T> // type alias
pub type QaoaResult<T> = Result<T, QaoaError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QaoaError {
    fn from(err: serde_json::Error) -> Self {
        QaoaError::JsonError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QaoaError {
    /// Check if error was raised while building a Hamiltonian or parameter set
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            QaoaError::MalformedHamiltonian(_)
                | QaoaError::InvalidStepCount(_)
                | QaoaError::InvalidTime(_)
                | QaoaError::InvalidFourierDegree(_)
                | QaoaError::InvalidParameterAddress(_)
                | QaoaError::InvalidSweepRange(_)
        )
    }

    /// Check if error is an angle-shape disagreement
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            QaoaError::ShapeMismatch { .. } | QaoaError::RawLengthMismatch { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
