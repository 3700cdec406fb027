//! Fourier-coefficient parametrization
//!
//! Gantree: L3_Variants → FourierParams
//!
//! The step angles are reconstructed from `q` frequency components
//! (1-indexed `i` over steps, `k` over components):
//!
//! ```text
//! gamma_i = Σ_k u_k · sin((k − ½)(i − ½)π / p)
//! beta_i  = Σ_k v_k · cos((k − ½)(i − ½)π / p)
//! ```
//!
//! Few components describe smooth schedules, so the search space stays small
//! as `p` grows.

use crate::hyperparams::HyperParams;
use crate::parametrization::check_raw_len;
use crate::ramp::LinearRamp;
use crate::rotation::RotationAngles;
use crate::shape::{AngleInput, ShapeReconciler};
use crate::standard::StandardParams;
use ndarray::{Array1, Array2, ArrayViewMut1};
use qaoa_core::{HamiltonianModel, ParamVec, QaoaError, QaoaResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

/// Fourier parameters: `v[q]` (betas) and `u[q]` (gammas)
/// Gantree: FourierParams // 푸리에 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FourierParamsRepr")]
pub struct FourierParams {
    hyperparams: Arc<HyperParams>,
    q: usize,
    v: Array1<f64>,
    u: Array1<f64>,
}

fn check_degree(q: usize) -> QaoaResult<usize> {
    if q == 0 {
        return Err(QaoaError::InvalidFourierDegree(q));
    }
    Ok(q)
}

/// `f(k, i)` summed over components for every step
fn synthesize(
    coeffs: &Array1<f64>,
    n_steps: usize,
    basis: impl Fn(f64) -> f64,
) -> Array1<f64> {
    let p = n_steps as f64;
    Array1::from_shape_fn(n_steps, |i| {
        coeffs
            .iter()
            .enumerate()
            .map(|(k, c)| c * basis((k as f64 + 0.5) * (i as f64 + 0.5) * PI / p))
            .sum()
    })
}

impl FourierParams {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from hyperparameters, degree `q` and coefficient arrays of shape `(q,)`
    pub fn new(
        hyperparams: Arc<HyperParams>,
        q: usize,
        v: impl Into<AngleInput>,
        u: impl Into<AngleInput>,
    ) -> QaoaResult<Self> {
        let q = check_degree(q)?;
        let v = ShapeReconciler::new("v", q, 1).reconcile_vector(v)?;
        let u = ShapeReconciler::new("u", q, 1).reconcile_vector(u)?;

        Ok(Self {
            hyperparams,
            q,
            v,
            u,
        })
    }

    /// `NaN`-filled coefficients of degree `q`
    pub fn empty(hamiltonian: &HamiltonianModel, n_steps: usize, q: usize) -> QaoaResult<Self> {
        let hyperparams = Arc::new(HyperParams::bind(hamiltonian, n_steps)?);
        let q = check_degree(q)?;
        log::debug!("empty fourier parameters (q={}): {}", q, hyperparams);

        Ok(Self {
            hyperparams,
            q,
            v: Array1::from_elem(q, f64::NAN),
            u: Array1::from_elem(q, f64::NAN),
        })
    }

    /// First-component ramp `u = v = (0.5·time/p, 0, …)`
    pub fn linear_ramp(
        hamiltonian: &HamiltonianModel,
        n_steps: usize,
        q: usize,
        time: Option<f64>,
    ) -> QaoaResult<Self> {
        let hyperparams = Arc::new(HyperParams::bind(hamiltonian, n_steps)?);
        let q = check_degree(q)?;
        let amplitude = 0.5 * LinearRamp::new(n_steps, time)?.dt();

        let mut v = Array1::zeros(q);
        v[0] = amplitude;
        let u = v.clone();

        Ok(Self {
            hyperparams,
            q,
            v,
            u,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Shared hyperparameters
    pub fn hyperparams(&self) -> &Arc<HyperParams> {
        &self.hyperparams
    }

    /// Number of frequency components
    pub fn q(&self) -> usize {
        self.q
    }

    /// Mixer coefficients
    pub fn v(&self) -> &Array1<f64> {
        &self.v
    }

    /// Cost coefficients
    pub fn u(&self) -> &Array1<f64> {
        &self.u
    }

    /// Writable view of the mixer coefficients
    pub fn v_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.v.view_mut()
    }

    /// Writable view of the cost coefficients
    pub fn u_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.u.view_mut()
    }

    /// Reconstructed mixer angles, one per step
    pub fn betas(&self) -> Array1<f64> {
        synthesize(&self.v, self.hyperparams.n_steps(), f64::cos)
    }

    /// Reconstructed cost angles, one per step
    pub fn gammas(&self) -> Array1<f64> {
        synthesize(&self.u, self.hyperparams.n_steps(), f64::sin)
    }

    /// Standard image from the reconstructed angles
    pub fn to_standard(&self) -> StandardParams {
        StandardParams::from_parts(Arc::clone(&self.hyperparams), self.betas(), self.gammas())
    }

    /// Raise the degree to `q`, zero-padding the new components
    pub fn extend_degree(&self, q: usize) -> QaoaResult<Self> {
        if q < self.q {
            return Err(QaoaError::InvalidFourierDegree(q));
        }
        let pad = |c: &Array1<f64>| Array1::from_shape_fn(q, |k| c.get(k).copied().unwrap_or(0.0));

        Ok(Self {
            hyperparams: Arc::clone(&self.hyperparams),
            q,
            v: pad(&self.v),
            u: pad(&self.u),
        })
    }

    // ========================================================================
    // Flat Vector
    // ========================================================================

    /// Length of the flat vector: `2q`
    pub fn n_raw(&self) -> usize {
        2 * self.q
    }

    /// Flat vector `v ++ u`
    pub fn raw(&self) -> ParamVec {
        self.v.iter().chain(self.u.iter()).copied().collect()
    }

    /// Overwrite both coefficient arrays from a flat vector
    pub fn update_from_raw(&mut self, raw: &[f64]) -> QaoaResult<()> {
        check_raw_len(self.n_raw(), raw)?;
        let (v, u) = raw.split_at(self.q);
        for (dst, src) in self.v.iter_mut().zip(v) {
            *dst = *src;
        }
        for (dst, src) in self.u.iter_mut().zip(u) {
            *dst = *src;
        }
        Ok(())
    }

    // ========================================================================
    // Rotation Angles
    // ========================================================================

    /// Derive the per-operator rotation angles from the reconstructed steps
    pub fn rotation_angles(&self) -> RotationAngles {
        RotationAngles::from_steps(&self.hyperparams, &self.betas(), &self.gammas())
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

/// Stored fields, rechecked through [`FourierParams::new`] when read back
#[derive(Deserialize)]
pub(crate) struct FourierParamsRepr {
    hyperparams: Arc<HyperParams>,
    q: usize,
    v: Array1<f64>,
    u: Array1<f64>,
}

impl TryFrom<FourierParamsRepr> for FourierParams {
    type Error = QaoaError;

    fn try_from(repr: FourierParamsRepr) -> QaoaResult<Self> {
        Self::new(repr.hyperparams, repr.q, repr.v, repr.u)
    }
}

impl fmt::Display for FourierParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hyperparameters:")?;
        writeln!(f, "\tregister: {:?}", self.hyperparams.register())?;
        writeln!(f, "\tq: {}", self.q)?;
        writeln!(f, "Parameters:")?;
        writeln!(f, "\tv: {}", self.v)?;
        write!(f, "\tu: {}", self.u)
    }
}

// ============================================================================
// Tests
// ============================================================================
