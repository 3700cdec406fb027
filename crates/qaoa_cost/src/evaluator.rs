//! Evaluator boundary
//!
//! Gantree: L6_Evaluator → EvaluatorTrait
//!
//! An evaluator turns resolved rotation angles into an expectation value of
//! the cost Hamiltonian. Circuits, simulators and hardware all sit behind
//! this trait.

use qaoa_core::{HamiltonianModel, QaoaResult};
use qaoa_params::RotationAngles;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expectation value of the cost Hamiltonian
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    /// `⟨C⟩`, including the constant offset
    pub value: f64,

    /// `⟨C²⟩ − ⟨C⟩²`, when the evaluator can report it
    pub variance: Option<f64>,
}

impl Expectation {
    /// Exact value with known variance
    pub fn new(value: f64, variance: f64) -> Self {
        Self {
            value,
            variance: Some(variance),
        }
    }

    /// Value only
    pub fn value_only(value: f64) -> Self {
        Self {
            value,
            variance: None,
        }
    }

    /// Standard deviation of the mean over `nshots` samples
    pub fn standard_error(&self, nshots: u64) -> Option<f64> {
        match (self.variance, nshots) {
            (_, 0) => None,
            (Some(var), n) => Some((var.max(0.0) / n as f64).sqrt()),
            (None, _) => None,
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variance {
            Some(var) => write!(f, "{:.6} (var={:.6})", self.value, var),
            None => write!(f, "{:.6}", self.value),
        }
    }
}

/// Prepared quantum state
pub trait QuantumState {
    /// Probability of each computational basis state
    fn probabilities(&self) -> Vec<f64>;
}

/// Quantum evaluator trait
/// Gantree: EvaluatorTrait // 평가기 인터페이스
pub trait Evaluator: Send + Sync {
    /// State returned by [`Evaluator::evaluate_state`]
    type State: QuantumState;

    /// Get evaluator name
    fn name(&self) -> &str;

    /// Evaluate `⟨C⟩` for the state prepared by `angles`
    /// Gantree: evaluate(hamiltonian, angles) -> Result<Expectation>
    fn evaluate(
        &self,
        hamiltonian: &HamiltonianModel,
        angles: &RotationAngles,
    ) -> QaoaResult<Expectation>;

    /// Prepare the state for `angles`
    fn evaluate_state(&self, angles: &RotationAngles) -> QaoaResult<Self::State>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_error() {
        let e = Expectation::new(1.0, 4.0);
        assert_relative_eq!(e.standard_error(100).unwrap(), 0.2);
        assert!(e.standard_error(0).is_none());
        assert!(Expectation::value_only(1.0).standard_error(100).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Expectation::new(-1.5, 0.25).to_string(), "-1.500000 (var=0.250000)");
        assert_eq!(Expectation::value_only(2.0).to_string(), "2.000000");
    }
}
