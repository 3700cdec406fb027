//! Extended QAOA parametrization
//!
//! Gantree: L3_Variants → ExtendedParams
//!
//! Every operator in every step gets its own angle: one `beta` per qubit,
//! one `gamma` per bias term and one `gamma` per coupling.

use crate::hyperparams::HyperParams;
use crate::parametrization::check_raw_len;
use crate::ramp::LinearRamp;
use crate::rotation::RotationAngles;
use crate::shape::{AngleInput, ShapeReconciler};
use crate::standard::StandardParams;
use ndarray::{Array1, Array2, ArrayViewMut2};
use qaoa_core::{HamiltonianModel, ParamVec, QaoaError, QaoaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Extended parameters, all arrays `n_steps × k`
/// Gantree: ExtendedParams // 확장 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExtendedParamsRepr")]
pub struct ExtendedParams {
    hyperparams: Arc<HyperParams>,
    betas: Array2<f64>,
    gammas_singles: Array2<f64>,
    gammas_pairs: Array2<f64>,
}

impl ExtendedParams {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from hyperparameters and per-operator angle arrays
    pub fn new(
        hyperparams: Arc<HyperParams>,
        betas: impl Into<AngleInput>,
        gammas_singles: impl Into<AngleInput>,
        gammas_pairs: impl Into<AngleInput>,
    ) -> QaoaResult<Self> {
        let p = hyperparams.n_steps();
        let betas = ShapeReconciler::new("betas", p, hyperparams.n_qubits()).reconcile(betas)?;
        let gammas_singles = ShapeReconciler::new("gammas_singles", p, hyperparams.n_singles())
            .reconcile(gammas_singles)?;
        let gammas_pairs = ShapeReconciler::new("gammas_pairs", p, hyperparams.n_pairs())
            .reconcile(gammas_pairs)?;

        Ok(Self {
            hyperparams,
            betas,
            gammas_singles,
            gammas_pairs,
        })
    }

    /// Correctly shaped storage filled with `NaN`, to be written before use
    pub fn empty(hamiltonian: &HamiltonianModel, n_steps: usize) -> QaoaResult<Self> {
        let hyperparams = Arc::new(HyperParams::bind(hamiltonian, n_steps)?);
        log::debug!("empty extended parameters: {}", hyperparams);

        Ok(Self {
            betas: Array2::from_elem((n_steps, hyperparams.n_qubits()), f64::NAN),
            gammas_singles: Array2::from_elem((n_steps, hyperparams.n_singles()), f64::NAN),
            gammas_pairs: Array2::from_elem((n_steps, hyperparams.n_pairs()), f64::NAN),
            hyperparams,
        })
    }

    /// Linear-ramp initial guess, broadcast over every operator
    pub fn linear_ramp(
        hamiltonian: &HamiltonianModel,
        n_steps: usize,
        time: Option<f64>,
    ) -> QaoaResult<Self> {
        let hyperparams = Arc::new(HyperParams::bind(hamiltonian, n_steps)?);
        let ramp = LinearRamp::new(n_steps, time)?;
        Ok(Self::broadcast(hyperparams, &ramp.betas(), &ramp.gammas()))
    }

    /// Exact image of a standard parameter set
    pub fn from_standard(standard: &StandardParams) -> Self {
        Self::broadcast(
            Arc::clone(standard.hyperparams()),
            standard.betas(),
            standard.gammas(),
        )
    }

    fn broadcast(hyperparams: Arc<HyperParams>, betas: &Array1<f64>, gammas: &Array1<f64>) -> Self {
        let column =
            |v: &Array1<f64>, width: usize| Array2::from_shape_fn((v.len(), width), |(s, _)| v[s]);

        Self {
            betas: column(betas, hyperparams.n_qubits()),
            gammas_singles: column(gammas, hyperparams.n_singles()),
            gammas_pairs: column(gammas, hyperparams.n_pairs()),
            hyperparams,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Shared hyperparameters
    pub fn hyperparams(&self) -> &Arc<HyperParams> {
        &self.hyperparams
    }

    /// Mixer angles, `n_steps × |register|`
    pub fn betas(&self) -> &Array2<f64> {
        &self.betas
    }

    /// Bias angles, `n_steps × |qubits_singles|`
    pub fn gammas_singles(&self) -> &Array2<f64> {
        &self.gammas_singles
    }

    /// Coupling angles, `n_steps × |qubits_pairs|`
    pub fn gammas_pairs(&self) -> &Array2<f64> {
        &self.gammas_pairs
    }

    /// Writable view of the mixer angles
    pub fn betas_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.betas.view_mut()
    }

    /// Writable view of the bias angles
    pub fn gammas_singles_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.gammas_singles.view_mut()
    }

    /// Writable view of the coupling angles
    pub fn gammas_pairs_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.gammas_pairs.view_mut()
    }

    // ========================================================================
    // Flat Vector
    // ========================================================================

    /// Length of the flat vector: `n_steps·(n + s + m)`
    pub fn n_raw(&self) -> usize {
        self.betas.len() + self.gammas_singles.len() + self.gammas_pairs.len()
    }

    /// Flat vector `betas ++ gammas_singles ++ gammas_pairs`, each step-major
    pub fn raw(&self) -> ParamVec {
        self.betas
            .iter()
            .chain(self.gammas_singles.iter())
            .chain(self.gammas_pairs.iter())
            .copied()
            .collect()
    }

    /// Overwrite all angles from a flat vector
    pub fn update_from_raw(&mut self, raw: &[f64]) -> QaoaResult<()> {
        check_raw_len(self.n_raw(), raw)?;

        let (betas, rest) = raw.split_at(self.betas.len());
        let (singles, pairs) = rest.split_at(self.gammas_singles.len());
        for (dst, src) in self.betas.iter_mut().zip(betas) {
            *dst = *src;
        }
        for (dst, src) in self.gammas_singles.iter_mut().zip(singles) {
            *dst = *src;
        }
        for (dst, src) in self.gammas_pairs.iter_mut().zip(pairs) {
            *dst = *src;
        }
        Ok(())
    }

    // ========================================================================
    // Rotation Angles
    // ========================================================================

    /// Derive the per-operator rotation angles
    pub fn rotation_angles(&self) -> RotationAngles {
        RotationAngles::from_operators(
            &self.hyperparams,
            &self.betas,
            &self.gammas_singles,
            &self.gammas_pairs,
        )
    }

    /// Mixer rotation angles: the betas themselves
    pub fn x_rotation_angles(&self) -> Array2<f64> {
        self.betas.clone()
    }

    /// Bias rotation angles, scaled by each bias coefficient
    pub fn z_rotation_angles(&self) -> Array2<f64> {
        self.rotation_angles().z
    }

    /// Coupling rotation angles, scaled by each coupling coefficient
    pub fn zz_rotation_angles(&self) -> Array2<f64> {
        self.rotation_angles().zz
    }
}

/// Stored fields, reshaped through [`ExtendedParams::new`] when read back
#[derive(Deserialize)]
pub(crate) struct ExtendedParamsRepr {
    hyperparams: Arc<HyperParams>,
    betas: Array2<f64>,
    gammas_singles: Array2<f64>,
    gammas_pairs: Array2<f64>,
}

impl TryFrom<ExtendedParamsRepr> for ExtendedParams {
    type Error = QaoaError;

    fn try_from(repr: ExtendedParamsRepr) -> QaoaResult<Self> {
        Self::new(
            repr.hyperparams,
            repr.betas,
            repr.gammas_singles,
            repr.gammas_pairs,
        )
    }
}

impl fmt::Display for ExtendedParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hyperparameters:")?;
        writeln!(f, "\tregister: {:?}", self.hyperparams.register())?;
        writeln!(f, "\tqubits_singles: {:?}", self.hyperparams.qubits_singles())?;
        writeln!(f, "\tqubits_pairs: {:?}", self.hyperparams.qubits_pairs())?;
        writeln!(f, "Parameters:")?;
        writeln!(f, "\tbetas: {}", self.betas)?;
        writeln!(f, "\tgammas_singles: {}", self.gammas_singles)?;
        write!(f, "\tgammas_pairs: {}", self.gammas_pairs)
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

    fn hyperparams(p: usize) -> Arc<HyperParams> {
        Arc::new(HyperParams::bind(&hamiltonian(), p).unwrap())
    }

    #[test]
    fn test_new_shapes() {
        let params = ExtendedParams::new(
            hyperparams(2),
            [[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]],
            [0.7, 0.8],
            [[0.9, 1.0], [1.1, 1.2]],
        )
        .unwrap();

        assert_eq!(params.betas().dim(), (2, 3));
        assert_eq!(params.gammas_singles(), &array![[0.7], [0.8]]);
        assert_eq!(params.n_raw(), 12);
    }

    #[test]
    fn test_new_rejects_wrong_width() {
        let err = ExtendedParams::new(hyperparams(2), [0.1, 0.2], [0.7, 0.8], [0.9, 1.0, 1.1, 1.2])
            .unwrap_err();
        match err {
            QaoaError::ShapeMismatch { name, expected, .. } => {
                assert_eq!(name, "betas");
                assert_eq!(expected, (2, 3));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_raw_is_step_major() {
        let params = ExtendedParams::new(
            hyperparams(2),
            [[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]],
            [0.7, 0.8],
            [[0.9, 1.0], [1.1, 1.2]],
        )
        .unwrap();

        assert_eq!(
            params.raw(),
            vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2]
        );
    }

    #[test]
    fn test_update_from_raw() {
        let mut params = ExtendedParams::empty(&hamiltonian(), 2).unwrap();
        let raw: Vec<f64> = (0..12).map(|i| i as f64).collect();
        params.update_from_raw(&raw).unwrap();

        assert_eq!(params.raw(), raw);
        assert_eq!(params.gammas_pairs(), &array![[8.0, 9.0], [10.0, 11.0]]);
        assert!(params.update_from_raw(&raw[..11]).is_err());
    }

    #[test]
    fn test_from_standard_broadcasts_and_scales() {
        let standard = StandardParams::linear_ramp(&hamiltonian(), 2, Some(1.0)).unwrap();
        let extended = ExtendedParams::from_standard(&standard);

        assert_eq!(
            extended.betas(),
            &array![[0.375, 0.375, 0.375], [0.125, 0.125, 0.125]]
        );
        assert_eq!(extended.gammas_pairs(), &array![[0.125, 0.125], [0.375, 0.375]]);

        let zz = extended.zz_rotation_angles();
        assert_relative_eq!(zz[[0, 0]], 0.125 * 0.7);
        assert_relative_eq!(zz[[1, 1]], 0.375 * 1.2);
        assert_eq!(extended.rotation_angles(), standard.rotation_angles());
    }

    #[test]
    fn test_linear_ramp_matches_standard() {
        let standard = StandardParams::linear_ramp(&hamiltonian(), 3, None).unwrap();
        let extended = ExtendedParams::linear_ramp(&hamiltonian(), 3, None).unwrap();
        assert_eq!(extended, ExtendedParams::from_standard(&standard));
    }

    #[test]
    fn test_views_keep_shape() {
        let mut params = ExtendedParams::linear_ramp(&hamiltonian(), 2, None).unwrap();
        params.betas_mut()[[1, 2]] = 0.9;
        params.gammas_pairs_mut().row_mut(0).fill(0.0);
        params.gammas_singles_mut().fill(1.0);

        assert_eq!(params.betas()[[1, 2]], 0.9);
        assert_eq!(params.gammas_pairs().row(0).to_vec(), vec![0.0, 0.0]);
        assert_eq!(params.raw().len(), params.n_raw());
    }

    #[test]
    fn test_deserialize_rechecks_shape() {
        let params = ExtendedParams::linear_ramp(&hamiltonian(), 2, None).unwrap();
        let stored = serde_json::to_value(&params).unwrap();
        assert_eq!(serde_json::from_value::<ExtendedParams>(stored.clone()).unwrap(), params);

        // same element count in another rectangular layout is accepted
        let mut transposed = stored.clone();
        transposed["gammas_pairs"] = serde_json::to_value(Array2::<f64>::zeros((1, 4))).unwrap();
        let back = serde_json::from_value::<ExtendedParams>(transposed).unwrap();
        assert_eq!(back.gammas_pairs().dim(), (2, 2));

        let mut narrow = stored;
        narrow["betas"] = serde_json::to_value(Array2::<f64>::zeros((2, 2))).unwrap();
        let err = serde_json::from_value::<ExtendedParams>(narrow).unwrap_err();
        assert!(err.to_string().contains("'betas'"), "{}", err);
    }

    #[test]
    fn test_no_bias_terms() {
        let h = HamiltonianModel::build(vec![Term::pair(0, 1, 1.0)]).unwrap();
        let params = ExtendedParams::linear_ramp(&h, 2, None).unwrap();
        assert_eq!(params.gammas_singles().dim(), (2, 0));
        assert_eq!(params.n_raw(), 2 * 2 + 2);
    }
}
