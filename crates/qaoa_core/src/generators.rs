//! Hamiltonian generators for tests and benchmarks
//!
//! Gantree: L1_Model → HamiltonianGenerator

use crate::error::{QaoaError, QaoaResult};
use crate::hamiltonian::{HamiltonianModel, Term};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Seeded generator of standard problem Hamiltonians
/// Gantree: HamiltonianGenerator // 해밀토니안 생성기
#[derive(Debug, Clone, Default)]
pub struct HamiltonianGenerator {
    /// Random seed
    seed: Option<u64>,
}

impl HamiltonianGenerator {
    /// Create new generator
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Create generator with seed
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Ring of disagrees: `0.5 Σ Z_i Z_{i+1}` with periodic boundary
    pub fn ring_of_disagrees(&self, n: usize) -> QaoaResult<HamiltonianModel> {
        if n < 3 {
            return Err(QaoaError::InvalidConfig(format!(
                "ring of disagrees needs at least 3 qubits, got {}",
                n
            )));
        }
        HamiltonianModel::build((0..n).map(|i| Term::pair(i, (i + 1) % n, 0.5)))
    }

    /// Fully connected graph with uniform coupling
    pub fn complete(&self, n: usize, weight: f64) -> QaoaResult<HamiltonianModel> {
        let mut terms = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                terms.push(Term::pair(i, j, weight));
            }
        }
        HamiltonianModel::build(terms)
    }

    /// Random Ising model on `n` qubits
    ///
    /// Every qubit gets a bias in `[-1, 1)`; every pair is coupled with
    /// probability `edge_prob` and a weight in `[-1, 1)`.
    pub fn random(&self, n: usize, edge_prob: f64) -> QaoaResult<HamiltonianModel> {
        if !(0.0..=1.0).contains(&edge_prob) {
            return Err(QaoaError::InvalidConfig(format!(
                "edge probability {} must be in [0, 1]",
                edge_prob
            )));
        }

        let mut rng = self.rng();
        let mut terms: Vec<Term> = (0..n)
            .map(|q| Term::single(q, rng.gen_range(-1.0..1.0)))
            .collect();

        for i in 0..n {
            for j in (i + 1)..n {
                if rng.gen::<f64>() < edge_prob {
                    terms.push(Term::pair(i, j, rng.gen_range(-1.0..1.0)));
                }
            }
        }

        HamiltonianModel::build(terms)
    }
}

// ============================================================================
// Tests
// ============================================================================
