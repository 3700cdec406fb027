//! Core types for QAOA parameter handling
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Type aliases and small validated wrappers shared by every crate.

use crate::error::{QaoaError, QaoaResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed)
pub type QubitId = usize;

/// Flat parameter vector exchanged with optimizers
pub type ParamVec = Vec<f64>;

// ============================================================================
// QubitPair
// ============================================================================

/// Unordered pair of distinct qubits
///
/// Always stored with the smaller index first, so `(1, 0)` and `(0, 1)`
/// denote the same coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(QubitId, QubitId)")]
pub struct QubitPair(QubitId, QubitId);

impl QubitPair {
    /// Create a normalized pair; both qubits must differ
    pub fn new(a: QubitId, b: QubitId) -> QaoaResult<Self> {
        if a == b {
            return Err(QaoaError::MalformedHamiltonian(format!(
                "coupling term repeats qubit {}",
                a
            )));
        }
        Ok(if a < b { Self(a, b) } else { Self(b, a) })
    }

    /// Smaller qubit index
    #[inline]
    pub fn first(&self) -> QubitId {
        self.0
    }

    /// Larger qubit index
    #[inline]
    pub fn second(&self) -> QubitId {
        self.1
    }
}

impl TryFrom<(QubitId, QubitId)> for QubitPair {
    type Error = QaoaError;

    fn try_from((a, b): (QubitId, QubitId)) -> QaoaResult<Self> {
        Self::new(a, b)
    }
}

impl fmt::Display for QubitPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

// ============================================================================
// Tests
// ============================================================================
