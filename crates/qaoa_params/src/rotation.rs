//! Resolved per-operator rotation angles
//!
//! Gantree: L2_Params → RotationAngles
//!
//! Angles multiply their operator directly. A backend evolves the cost
//! terms as `exp(-i·z·Z_q)` and `exp(-i·zz·Z_a Z_b)`, and the mixer
//! Hamiltonian `−ΣX` as `exp(i·x·X_q)`.

use crate::hyperparams::HyperParams;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Rotation angles for one parameter set, one row per step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationAngles {
    /// Hyperparameters mapping columns to qubits, singles and pairs
    pub hyperparams: Arc<HyperParams>,

    /// Mixer angles, `n_steps × |register|`
    pub x: Array2<f64>,

    /// Bias angles, `n_steps × |qubits_singles|`
    pub z: Array2<f64>,

    /// Coupling angles, `n_steps × |qubits_pairs|`
    pub zz: Array2<f64>,
}

impl RotationAngles {
    /// Broadcast one `beta` and one `gamma` per step over every operator
    pub(crate) fn from_steps(
        hyperparams: &Arc<HyperParams>,
        betas: &Array1<f64>,
        gammas: &Array1<f64>,
    ) -> Self {
        let p = hyperparams.n_steps();
        let x = Array2::from_shape_fn((p, hyperparams.n_qubits()), |(s, _)| betas[s]);
        let z = Array2::from_shape_fn((p, hyperparams.n_singles()), |(s, i)| {
            gammas[s] * hyperparams.single_qubit_coeffs()[i]
        });
        let zz = Array2::from_shape_fn((p, hyperparams.n_pairs()), |(s, j)| {
            gammas[s] * hyperparams.pair_qubit_coeffs()[j]
        });

        Self {
            hyperparams: Arc::clone(hyperparams),
            x,
            z,
            zz,
        }
    }

    /// Scale per-operator angles by the fixed coefficients
    pub(crate) fn from_operators(
        hyperparams: &Arc<HyperParams>,
        betas: &Array2<f64>,
        gammas_singles: &Array2<f64>,
        gammas_pairs: &Array2<f64>,
    ) -> Self {
        let h = Array1::from(hyperparams.single_qubit_coeffs().to_vec());
        let g = Array1::from(hyperparams.pair_qubit_coeffs().to_vec());

        Self {
            hyperparams: Arc::clone(hyperparams),
            x: betas.clone(),
            z: gammas_singles * &h.insert_axis(Axis(0)),
            zz: gammas_pairs * &g.insert_axis(Axis(0)),
        }
    }

    /// Number of steps
    pub fn n_steps(&self) -> usize {
        self.x.nrows()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use qaoa_core::{HamiltonianModel, Term};

    fn hyperparams() -> Arc<HyperParams> {
        let h = HamiltonianModel::build(vec![
            Term::pair(0, 1, 0.7),
            Term::pair(0, 2, 1.2),
            Term::single(0, -0.5),
        ])
        .unwrap();
        Arc::new(HyperParams::bind(&h, 2).unwrap())
    }

    #[test]
    fn test_from_steps_broadcasts() {
        let hp = hyperparams();
        let angles = RotationAngles::from_steps(&hp, &array![0.1, 0.2], &array![0.3, 0.4]);

        assert_eq!(angles.x, array![[0.1, 0.1, 0.1], [0.2, 0.2, 0.2]]);
        assert_relative_eq!(angles.z[[1, 0]], 0.4 * -0.5);
        assert_relative_eq!(angles.zz[[0, 1]], 0.3 * 1.2);
        assert_eq!(angles.n_steps(), 2);
    }

    #[test]
    fn test_from_operators_scales_columns() {
        let hp = hyperparams();
        let betas = array![[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]];
        let gs = array![[1.0], [2.0]];
        let gp = array![[1.0, 2.0], [3.0, 4.0]];
        let angles = RotationAngles::from_operators(&hp, &betas, &gs, &gp);

        assert_eq!(angles.x, betas);
        assert_relative_eq!(angles.z[[1, 0]], -1.0);
        assert_relative_eq!(angles.zz[[1, 0]], 3.0 * 0.7);
        assert_relative_eq!(angles.zz[[1, 1]], 4.0 * 1.2);
    }
}
