//! Standard QAOA parametrization
//!
//! Gantree: L3_Variants → StandardParams
//!
//! One `beta` and one `gamma` per step, shared by every mixer, bias and
//! coupling operator in that step.

use crate::hyperparams::HyperParams;
use crate::parametrization::check_raw_len;
use crate::ramp::LinearRamp;
use crate::rotation::RotationAngles;
use crate::shape::{AngleInput, ShapeReconciler};
use ndarray::{Array1, Array2, ArrayViewMut1};
use qaoa_core::{HamiltonianModel, ParamVec, QaoaError, QaoaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Standard parameters: `betas[p]`, `gammas[p]`
/// Gantree: StandardParams // 표준 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StandardParamsRepr")]
pub struct StandardParams {
    hyperparams: Arc<HyperParams>,
    betas: Array1<f64>,
    gammas: Array1<f64>,
}

impl StandardParams {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from hyperparameters and angle arrays of shape `(n_steps,)`
    pub fn new(
        hyperparams: Arc<HyperParams>,
        betas: impl Into<AngleInput>,
        gammas: impl Into<AngleInput>,
    ) -> QaoaResult<Self> {
        let p = hyperparams.n_steps();
        let betas = ShapeReconciler::new("betas", p, 1).reconcile_vector(betas)?;
        let gammas = ShapeReconciler::new("gammas", p, 1).reconcile_vector(gammas)?;

        Ok(Self {
            hyperparams,
            betas,
            gammas,
        })
    }

    /// Correctly shaped storage filled with `NaN`, to be written before use
    pub fn empty(hamiltonian: &HamiltonianModel, n_steps: usize) -> QaoaResult<Self> {
        let hyperparams = Arc::new(HyperParams::bind(hamiltonian, n_steps)?);
        log::debug!("empty standard parameters: {}", hyperparams);

        Ok(Self {
            hyperparams,
            betas: Array1::from_elem(n_steps, f64::NAN),
            gammas: Array1::from_elem(n_steps, f64::NAN),
        })
    }

    /// Linear-ramp initial guess; `time` defaults to `0.7 × n_steps`
    pub fn linear_ramp(
        hamiltonian: &HamiltonianModel,
        n_steps: usize,
        time: Option<f64>,
    ) -> QaoaResult<Self> {
        let hyperparams = Arc::new(HyperParams::bind(hamiltonian, n_steps)?);
        Self::with_linear_ramp(hyperparams, time)
    }

    /// Linear-ramp initial guess for existing hyperparameters
    pub fn with_linear_ramp(hyperparams: Arc<HyperParams>, time: Option<f64>) -> QaoaResult<Self> {
        let ramp = LinearRamp::new(hyperparams.n_steps(), time)?;
        Ok(Self {
            hyperparams,
            betas: ramp.betas(),
            gammas: ramp.gammas(),
        })
    }

    /// Assemble from already-shaped step arrays
    pub(crate) fn from_parts(
        hyperparams: Arc<HyperParams>,
        betas: Array1<f64>,
        gammas: Array1<f64>,
    ) -> Self {
        Self {
            hyperparams,
            betas,
            gammas,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Shared hyperparameters
    pub fn hyperparams(&self) -> &Arc<HyperParams> {
        &self.hyperparams
    }

    /// Mixer angles, one per step
    pub fn betas(&self) -> &Array1<f64> {
        &self.betas
    }

    /// Cost angles, one per step
    pub fn gammas(&self) -> &Array1<f64> {
        &self.gammas
    }

    /// Writable view of the mixer angles
    pub fn betas_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.betas.view_mut()
    }

    /// Writable view of the cost angles
    pub fn gammas_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.gammas.view_mut()
    }

    // ========================================================================
    // Flat Vector
    // ========================================================================

    /// Length of the flat vector: `2·n_steps`
    pub fn n_raw(&self) -> usize {
        2 * self.hyperparams.n_steps()
    }

    /// Flat vector `betas ++ gammas`
    pub fn raw(&self) -> ParamVec {
        self.betas.iter().chain(self.gammas.iter()).copied().collect()
    }

    /// Overwrite all angles from a flat vector
    pub fn update_from_raw(&mut self, raw: &[f64]) -> QaoaResult<()> {
        check_raw_len(self.n_raw(), raw)?;
        let (betas, gammas) = raw.split_at(self.hyperparams.n_steps());
        self.betas.assign(&Array1::from(betas.to_vec()));
        self.gammas.assign(&Array1::from(gammas.to_vec()));
        Ok(())
    }

    // ========================================================================
    // Rotation Angles
    // ========================================================================

    /// Derive the per-operator rotation angles
    pub fn rotation_angles(&self) -> RotationAngles {
        RotationAngles::from_steps(&self.hyperparams, &self.betas, &self.gammas)
    }

    /// Mixer rotation angles, `n_steps × |register|`
    pub fn x_rotation_angles(&self) -> Array2<f64> {
        self.rotation_angles().x
    }

    /// Bias rotation angles, `n_steps × |qubits_singles|`
    pub fn z_rotation_angles(&self) -> Array2<f64> {
        self.rotation_angles().z
    }

    /// Coupling rotation angles, `n_steps × |qubits_pairs|`
    pub fn zz_rotation_angles(&self) -> Array2<f64> {
        self.rotation_angles().zz
    }
}

/// Stored fields, reshaped through [`StandardParams::new`] when read back
#[derive(Deserialize)]
pub(crate) struct StandardParamsRepr {
    hyperparams: Arc<HyperParams>,
    betas: Array1<f64>,
    gammas: Array1<f64>,
}

impl TryFrom<StandardParamsRepr> for StandardParams {
    type Error = QaoaError;

    fn try_from(repr: StandardParamsRepr) -> QaoaResult<Self> {
        Self::new(repr.hyperparams, repr.betas, repr.gammas)
    }
}

impl fmt::Display for StandardParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hyperparameters:")?;
        writeln!(f, "\tregister: {:?}", self.hyperparams.register())?;
        writeln!(f, "\tqubits_singles: {:?}", self.hyperparams.qubits_singles())?;
        writeln!(f, "\tqubits_pairs: {:?}", self.hyperparams.qubits_pairs())?;
        writeln!(f, "Parameters:")?;
        writeln!(f, "\tbetas: {}", self.betas)?;
        write!(f, "\tgammas: {}", self.gammas)
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
    use qaoa_core::Term;

    fn hamiltonian() -> HamiltonianModel {
        HamiltonianModel::build(vec![
            Term::pair(0, 1, 0.7),
            Term::pair(0, 2, 1.2),
            Term::single(0, -0.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_linear_ramp_unit_time() {
        let params = StandardParams::linear_ramp(&hamiltonian(), 2, Some(1.0)).unwrap();
        assert_eq!(params.betas(), &array![0.375, 0.125]);
        assert_eq!(params.gammas(), &array![0.125, 0.375]);
    }

    #[test]
    fn test_linear_ramp_default_time() {
        let default = StandardParams::linear_ramp(&hamiltonian(), 3, None).unwrap();
        let explicit = StandardParams::linear_ramp(&hamiltonian(), 3, Some(2.1)).unwrap();
        assert_eq!(default, explicit);

        let other = StandardParams::linear_ramp(&hamiltonian(), 3, Some(1.0)).unwrap();
        assert_ne!(default, other);
    }

    #[test]
    fn test_new_validates_shapes() {
        let hp = Arc::new(HyperParams::bind(&hamiltonian(), 2).unwrap());
        assert!(StandardParams::new(hp.clone(), [0.1, 0.2], [0.3, 0.4]).is_ok());
        assert!(StandardParams::new(hp.clone(), vec![vec![0.1, 0.2]], [0.3, 0.4]).is_ok());

        let err = StandardParams::new(hp, [0.1, 0.2, 0.3], [0.3, 0.4]).unwrap_err();
        assert!(matches!(
            err,
            QaoaError::ShapeMismatch {
                expected: (2, 1),
                ..
            }
        ));
    }

    #[test]
    fn test_raw_layout_and_update() {
        let hp = Arc::new(HyperParams::bind(&hamiltonian(), 2).unwrap());
        let mut params = StandardParams::new(hp, [0.1, 0.2], [0.3, 0.4]).unwrap();
        assert_eq!(params.raw(), vec![0.1, 0.2, 0.3, 0.4]);

        params.update_from_raw(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(params.betas(), &array![1.0, 2.0]);
        assert_eq!(params.gammas(), &array![3.0, 4.0]);

        let err = params.update_from_raw(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            QaoaError::RawLengthMismatch {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_rotation_angles() {
        let params = StandardParams::linear_ramp(&hamiltonian(), 2, Some(1.0)).unwrap();
        let x = params.x_rotation_angles();
        assert_eq!(x.dim(), (2, 3));
        assert!(x.row(0).iter().all(|&b| b == 0.375));

        let z = params.z_rotation_angles();
        assert_relative_eq!(z[[1, 0]], 0.375 * -0.5);

        let zz = params.zz_rotation_angles();
        assert_relative_eq!(zz[[0, 0]], 0.125 * 0.7);
        assert_relative_eq!(zz[[1, 1]], 0.375 * 1.2);
    }

    #[test]
    fn test_views_write_in_place() {
        let mut params = StandardParams::linear_ramp(&hamiltonian(), 2, Some(1.0)).unwrap();
        params.betas_mut()[1] = 0.5;
        params.gammas_mut().fill(0.25);
        assert_eq!(params.raw(), vec![0.375, 0.5, 0.25, 0.25]);
        assert_eq!(params.x_rotation_angles().dim(), (2, 3));
    }

    #[test]
    fn test_deserialize_rechecks_shape() {
        let params = StandardParams::linear_ramp(&hamiltonian(), 3, None).unwrap();
        let mut stored = serde_json::to_value(&params).unwrap();
        assert_eq!(serde_json::from_value::<StandardParams>(stored.clone()).unwrap(), params);

        stored["betas"] = serde_json::to_value(array![0.1, 0.2]).unwrap();
        let err = serde_json::from_value::<StandardParams>(stored).unwrap_err();
        assert!(err.to_string().contains("'betas'"), "{}", err);
    }

    #[test]
    fn test_empty_is_nan() {
        let params = StandardParams::empty(&hamiltonian(), 3).unwrap();
        assert_eq!(params.n_raw(), 6);
        assert!(params.raw().iter().all(|v| v.is_nan()));
        assert!(StandardParams::empty(&hamiltonian(), 0).is_err());
    }
}
