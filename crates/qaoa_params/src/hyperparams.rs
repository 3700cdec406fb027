//! Hyperparameter binding
//!
//! Gantree: L2_Params → HyperParams
//!
//! The structural values that stay fixed for a whole optimization run. Every
//! parametrization keeps an `Arc` to one of these and uses it as its shape
//! oracle.

use qaoa_core::{HamiltonianModel, QaoaError, QaoaResult, QubitId, QubitPair, Term};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hyperparameters bound from a Hamiltonian and a step count
/// Gantree: HyperParams // 하이퍼파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HyperParamsRepr")]
pub struct HyperParams {
    register: Vec<QubitId>,
    qubits_singles: Vec<QubitId>,
    single_qubit_coeffs: Vec<f64>,
    qubits_pairs: Vec<QubitPair>,
    pair_qubit_coeffs: Vec<f64>,
    n_steps: usize,
}

impl HyperParams {
    /// Bind hyperparameters from `(hamiltonian, n_steps)`
    /// Gantree: bind(hamiltonian,n_steps) -> Result<Self> // 바인딩
    pub fn bind(hamiltonian: &HamiltonianModel, n_steps: usize) -> QaoaResult<Self> {
        if n_steps == 0 {
            return Err(QaoaError::InvalidStepCount(n_steps));
        }

        let (qubits_singles, single_qubit_coeffs): (Vec<_>, Vec<_>) =
            hamiltonian.singles().iter().copied().unzip();
        let (qubits_pairs, pair_qubit_coeffs): (Vec<_>, Vec<_>) =
            hamiltonian.pairs().iter().copied().unzip();

        Ok(Self {
            register: hamiltonian.register().to_vec(),
            qubits_singles,
            single_qubit_coeffs,
            qubits_pairs,
            pair_qubit_coeffs,
            n_steps,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Qubit register, sorted
    pub fn register(&self) -> &[QubitId] {
        &self.register
    }

    /// Qubits carrying a bias term, in first-seen order
    pub fn qubits_singles(&self) -> &[QubitId] {
        &self.qubits_singles
    }

    /// Bias coefficients, parallel to [`Self::qubits_singles`]
    pub fn single_qubit_coeffs(&self) -> &[f64] {
        &self.single_qubit_coeffs
    }

    /// Coupled pairs, in first-seen order
    pub fn qubits_pairs(&self) -> &[QubitPair] {
        &self.qubits_pairs
    }

    /// Coupling coefficients, parallel to [`Self::qubits_pairs`]
    pub fn pair_qubit_coeffs(&self) -> &[f64] {
        &self.pair_qubit_coeffs
    }

    /// Number of QAOA steps `p`
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Register size
    pub fn n_qubits(&self) -> usize {
        self.register.len()
    }

    /// Number of bias terms
    pub fn n_singles(&self) -> usize {
        self.qubits_singles.len()
    }

    /// Number of coupling terms
    pub fn n_pairs(&self) -> usize {
        self.qubits_pairs.len()
    }

    /// Position of `qubit` within the register
    pub fn register_position(&self, qubit: QubitId) -> Option<usize> {
        self.register.binary_search(&qubit).ok()
    }
}

/// Stored fields, re-bound from their own terms when read back
#[derive(Deserialize)]
struct HyperParamsRepr {
    register: Vec<QubitId>,
    qubits_singles: Vec<QubitId>,
    single_qubit_coeffs: Vec<f64>,
    qubits_pairs: Vec<QubitPair>,
    pair_qubit_coeffs: Vec<f64>,
    n_steps: usize,
}

impl TryFrom<HyperParamsRepr> for HyperParams {
    type Error = QaoaError;

    fn try_from(repr: HyperParamsRepr) -> QaoaResult<Self> {
        if repr.qubits_singles.len() != repr.single_qubit_coeffs.len()
            || repr.qubits_pairs.len() != repr.pair_qubit_coeffs.len()
        {
            return Err(QaoaError::MalformedHamiltonian(format!(
                "{} bias qubits with {} coefficients, {} pairs with {} coefficients",
                repr.qubits_singles.len(),
                repr.single_qubit_coeffs.len(),
                repr.qubits_pairs.len(),
                repr.pair_qubit_coeffs.len()
            )));
        }

        let singles = repr
            .qubits_singles
            .iter()
            .zip(&repr.single_qubit_coeffs)
            .map(|(&q, &h)| Term::single(q, h));
        let pairs = repr
            .qubits_pairs
            .iter()
            .zip(&repr.pair_qubit_coeffs)
            .map(|(p, &g)| Term::pair(p.first(), p.second(), g));
        let model = HamiltonianModel::build(singles.chain(pairs))?;
        let bound = Self::bind(&model, repr.n_steps)?;

        let stored = Self {
            register: repr.register,
            qubits_singles: repr.qubits_singles,
            single_qubit_coeffs: repr.single_qubit_coeffs,
            qubits_pairs: repr.qubits_pairs,
            pair_qubit_coeffs: repr.pair_qubit_coeffs,
            n_steps: repr.n_steps,
        };
        if stored != bound {
            return Err(QaoaError::MalformedHamiltonian(format!(
                "stored hyperparameters over register {:?} disagree with their terms over {:?}",
                stored.register, bound.register
            )));
        }
        Ok(stored)
    }
}

impl fmt::Display for HyperParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HyperParams(n_steps={}, qubits={}, singles={}, pairs={})",
            self.n_steps,
            self.n_qubits(),
            self.n_singles(),
            self.n_pairs()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qaoa_core::Term;

    fn hamiltonian() -> HamiltonianModel {
        HamiltonianModel::build(vec![
            Term::pair(2, 0, 1.2),
            Term::single(1, 0.3),
            Term::pair(0, 1, 0.7),
            Term::single(0, -0.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_bind_preserves_first_seen_order() {
        let hp = HyperParams::bind(&hamiltonian(), 3).unwrap();
        assert_eq!(hp.register(), &[0, 1, 2]);
        assert_eq!(hp.qubits_singles(), &[1, 0]);
        assert_eq!(hp.single_qubit_coeffs(), &[0.3, -0.5]);
        assert_eq!(
            hp.qubits_pairs(),
            &[QubitPair::new(0, 2).unwrap(), QubitPair::new(0, 1).unwrap()]
        );
        assert_eq!(hp.pair_qubit_coeffs(), &[1.2, 0.7]);
        assert_eq!(hp.n_steps(), 3);
    }

    #[test]
    fn test_bind_rejects_zero_steps() {
        let err = HyperParams::bind(&hamiltonian(), 0).unwrap_err();
        assert_eq!(err, QaoaError::InvalidStepCount(0));
    }

    #[test]
    fn test_register_position() {
        let h = HamiltonianModel::build(vec![Term::pair(5, 9, 1.0)]).unwrap();
        let hp = HyperParams::bind(&h, 1).unwrap();
        assert_eq!(hp.register_position(9), Some(1));
        assert_eq!(hp.register_position(4), None);
    }

    #[test]
    fn test_serde_roundtrip() {
        let hp = HyperParams::bind(&hamiltonian(), 2).unwrap();
        let json = serde_json::to_string(&hp).unwrap();
        assert_eq!(serde_json::from_str::<HyperParams>(&json).unwrap(), hp);
    }

    #[test]
    fn test_deserialize_rebinds() {
        let hp = HyperParams::bind(&hamiltonian(), 2).unwrap();
        let stored = serde_json::to_value(&hp).unwrap();

        let mut zero_steps = stored.clone();
        zero_steps["n_steps"] = serde_json::json!(0);
        let err = serde_json::from_value::<HyperParams>(zero_steps).unwrap_err();
        assert!(err.to_string().contains("Invalid step count"), "{}", err);

        let mut unsorted = stored.clone();
        unsorted["register"] = serde_json::json!([2, 1, 0]);
        assert!(serde_json::from_value::<HyperParams>(unsorted).is_err());

        let mut short = stored.clone();
        short["pair_qubit_coeffs"] = serde_json::json!([1.2]);
        assert!(serde_json::from_value::<HyperParams>(short).is_err());

        let mut repeated = stored;
        repeated["qubits_singles"] = serde_json::json!([0, 0]);
        assert!(serde_json::from_value::<HyperParams>(repeated).is_err());
    }

    #[test]
    fn test_display() {
        let hp = HyperParams::bind(&hamiltonian(), 2).unwrap();
        assert_eq!(
            hp.to_string(),
            "HyperParams(n_steps=2, qubits=3, singles=2, pairs=2)"
        );
    }
}
