//! Annealing-schedule parametrization
//!
//! Gantree: L3_Variants → AnnealingParams
//!
//! The variable angles are the schedule values `s ∈ [0, 1]` at each step.
//! With `dt = total_time / n_steps` a step applies `beta = dt·(1 − s)` and
//! `gamma = dt·s`.

use crate::hyperparams::HyperParams;
use crate::parametrization::check_raw_len;
use crate::ramp::LinearRamp;
use crate::rotation::RotationAngles;
use crate::shape::{AngleInput, ShapeReconciler};
use crate::standard::StandardParams;
use ndarray::{Array1, Array2, ArrayViewMut1};
use qaoa_core::{ramp, HamiltonianModel, ParamVec, QaoaError, QaoaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Annealing parameters: `schedule[p]` under a fixed total time
/// Gantree: AnnealingParams // 어닐링 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AnnealingParamsRepr")]
pub struct AnnealingParams {
    hyperparams: Arc<HyperParams>,
    total_time: f64,
    schedule: Array1<f64>,
}

fn check_time(time: f64) -> QaoaResult<f64> {
    if !time.is_finite() || time <= 0.0 {
        return Err(QaoaError::InvalidTime(time));
    }
    Ok(time)
}

impl AnnealingParams {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from hyperparameters, total time and a schedule of shape `(n_steps,)`
    pub fn new(
        hyperparams: Arc<HyperParams>,
        total_time: f64,
        schedule: impl Into<AngleInput>,
    ) -> QaoaResult<Self> {
        let total_time = check_time(total_time)?;
        let schedule =
            ShapeReconciler::new("schedule", hyperparams.n_steps(), 1).reconcile_vector(schedule)?;

        Ok(Self {
            hyperparams,
            total_time,
            schedule,
        })
    }

    /// `NaN`-filled schedule; `total_time` defaults to `0.7 × n_steps`
    pub fn empty(
        hamiltonian: &HamiltonianModel,
        n_steps: usize,
        total_time: Option<f64>,
    ) -> QaoaResult<Self> {
        let hyperparams = Arc::new(HyperParams::bind(hamiltonian, n_steps)?);
        let total_time = check_time(total_time.unwrap_or_else(|| ramp::default_time(n_steps)))?;
        log::debug!("empty annealing parameters: {}", hyperparams);

        Ok(Self {
            hyperparams,
            total_time,
            schedule: Array1::from_elem(n_steps, f64::NAN),
        })
    }

    /// Linear schedule `s_i = (i + ½)/n_steps` over `time`
    pub fn linear_ramp(
        hamiltonian: &HamiltonianModel,
        n_steps: usize,
        time: Option<f64>,
    ) -> QaoaResult<Self> {
        let hyperparams = Arc::new(HyperParams::bind(hamiltonian, n_steps)?);
        let ramp = LinearRamp::new(n_steps, time)?;

        Ok(Self {
            hyperparams,
            total_time: ramp.time(),
            schedule: ramp.schedule(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Shared hyperparameters
    pub fn hyperparams(&self) -> &Arc<HyperParams> {
        &self.hyperparams
    }

    /// Total annealing time `T`
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Schedule values, one per step
    pub fn schedule(&self) -> &Array1<f64> {
        &self.schedule
    }

    /// Writable view of the schedule
    pub fn schedule_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.schedule.view_mut()
    }

    fn dt(&self) -> f64 {
        self.total_time / self.hyperparams.n_steps() as f64
    }

    /// Effective mixer angles `dt·(1 − s)`
    pub fn betas(&self) -> Array1<f64> {
        let dt = self.dt();
        self.schedule.mapv(|s| dt * (1.0 - s))
    }

    /// Effective cost angles `dt·s`
    pub fn gammas(&self) -> Array1<f64> {
        let dt = self.dt();
        self.schedule.mapv(|s| dt * s)
    }

    /// Exact standard image of this schedule
    pub fn to_standard(&self) -> StandardParams {
        StandardParams::from_parts(Arc::clone(&self.hyperparams), self.betas(), self.gammas())
    }

    // ========================================================================
    // Flat Vector
    // ========================================================================

    /// Length of the flat vector: `n_steps`
    pub fn n_raw(&self) -> usize {
        self.hyperparams.n_steps()
    }

    /// Flat vector: the schedule itself
    pub fn raw(&self) -> ParamVec {
        self.schedule.to_vec()
    }

    /// Overwrite the schedule from a flat vector
    pub fn update_from_raw(&mut self, raw: &[f64]) -> QaoaResult<()> {
        check_raw_len(self.n_raw(), raw)?;
        for (dst, src) in self.schedule.iter_mut().zip(raw) {
            *dst = *src;
        }
        Ok(())
    }

    // ========================================================================
    // Rotation Angles
    // ========================================================================

    /// Derive the per-operator rotation angles from the effective step angles
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

/// Stored fields, rechecked through [`AnnealingParams::new`] when read back
#[derive(Deserialize)]
pub(crate) struct AnnealingParamsRepr {
    hyperparams: Arc<HyperParams>,
    total_time: f64,
    schedule: Array1<f64>,
}

impl TryFrom<AnnealingParamsRepr> for AnnealingParams {
    type Error = QaoaError;

    fn try_from(repr: AnnealingParamsRepr) -> QaoaResult<Self> {
        Self::new(repr.hyperparams, repr.total_time, repr.schedule)
    }
}

impl fmt::Display for AnnealingParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hyperparameters:")?;
        writeln!(f, "\tregister: {:?}", self.hyperparams.register())?;
        writeln!(f, "\ttotal_time: {}", self.total_time)?;
        writeln!(f, "Parameters:")?;
        write!(f, "\tschedule: {}", self.schedule)
    }
}

// ============================================================================
// Tests
// ============================================================================
