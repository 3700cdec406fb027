//! Linear-ramp initialization
//!
//! Gantree: L2_Params → LinearRamp
//!
//! Discretizes the annealing schedule `s(t) = t / T` over `[0, T]` at the
//! midpoints of `n_steps` equal intervals. With `dt = T / n_steps` and
//! midpoint `t`, the step angles are `beta = dt·(1 − t/T)` and
//! `gamma = dt·t/T`.

use ndarray::Array1;
use qaoa_core::{ramp, QaoaError, QaoaResult};

/// Linear annealing ramp discretized over `n_steps` intervals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRamp {
    n_steps: usize,
    time: f64,
}

impl LinearRamp {
    /// Create a ramp; `time` defaults to `0.7 × n_steps`
    pub fn new(n_steps: usize, time: Option<f64>) -> QaoaResult<Self> {
        if n_steps == 0 {
            return Err(QaoaError::InvalidStepCount(n_steps));
        }
        let time = time.unwrap_or_else(|| ramp::default_time(n_steps));
        if !time.is_finite() || time <= 0.0 {
            return Err(QaoaError::InvalidTime(time));
        }
        Ok(Self { n_steps, time })
    }

    /// Total annealing time `T`
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Interval width `dt = T / n_steps`
    pub fn dt(&self) -> f64 {
        self.time / self.n_steps as f64
    }

    /// Schedule value `s = t/T` at each interval midpoint
    pub fn schedule(&self) -> Array1<f64> {
        let dt = self.dt();
        Array1::from_shape_fn(self.n_steps, |i| dt * (i as f64 + 0.5) / self.time)
    }

    /// Mixer angles `dt·(1 − s)`
    pub fn betas(&self) -> Array1<f64> {
        let dt = self.dt();
        self.schedule().mapv(|s| dt * (1.0 - s))
    }

    /// Cost angles `dt·s`
    pub fn gammas(&self) -> Array1<f64> {
        let dt = self.dt();
        self.schedule().mapv(|s| dt * s)
    }
}
