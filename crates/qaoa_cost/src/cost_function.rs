//! Cost-function adapter
//!
//! Gantree: L7_Cost → CostFunctionAdapter
//!
//! Exposes a parametrization plus an evaluator as a function of a flat
//! vector, the shape black-box optimizers expect.

use crate::config::CostConfig;
use crate::evaluator::{Evaluator, Expectation};
use qaoa_core::{HamiltonianModel, ParamVec, QaoaError, QaoaResult};
use qaoa_params::Parametrization;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One recorded cost-function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Flat vector passed in
    pub x: ParamVec,

    /// Returned cost
    pub value: f64,
}

/// Flat-vector cost function over a parametrization
/// Gantree: CostFunctionAdapter // 비용 함수 어댑터
pub struct CostFunctionAdapter<E: Evaluator> {
    hamiltonian: HamiltonianModel,
    params: Parametrization,
    evaluator: E,
    config: CostConfig,
    rng: ChaCha8Rng,
    log: VecDeque<LogEntry>,
    n_calls: usize,
}

impl<E: Evaluator> CostFunctionAdapter<E> {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Wrap `params`; its register must match the Hamiltonian's
    pub fn new(
        hamiltonian: HamiltonianModel,
        params: impl Into<Parametrization>,
        evaluator: E,
    ) -> QaoaResult<Self> {
        let params = params.into();
        if params.hyperparams().register() != hamiltonian.register() {
            return Err(QaoaError::InvalidConfig(format!(
                "parameter register {:?} does not match hamiltonian register {:?}",
                params.hyperparams().register(),
                hamiltonian.register()
            )));
        }

        log::info!(
            "cost function: {} parameters ({} values) on {} via {}",
            params.kind(),
            params.n_raw(),
            params.hyperparams(),
            evaluator.name()
        );

        Ok(Self {
            hamiltonian,
            params,
            evaluator,
            config: CostConfig::default(),
            rng: ChaCha8Rng::from_entropy(),
            log: VecDeque::new(),
            n_calls: 0,
        })
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: CostConfig) -> QaoaResult<Self> {
        config.validate().map_err(QaoaError::InvalidConfig)?;

        self.rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => {
                if config.is_sampled() {
                    log::warn!("sampling {} shots without a seed", config.nshots);
                }
                ChaCha8Rng::from_entropy()
            }
        };
        self.config = config;
        Ok(self)
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Evaluate the cost at flat vector `x`
    /// Gantree: call(x) -> Result<f64> // 비용 평가
    pub fn call(&mut self, x: &[f64]) -> QaoaResult<f64> {
        self.params.update_from_raw(x)?;
        log::trace!("cost call {} at {:?}", self.n_calls, x);

        let angles = self.params.rotation_angles();
        let expectation = self.evaluator.evaluate(&self.hamiltonian, &angles)?;
        let value = self.sample(expectation)?;

        self.n_calls += 1;
        log::debug!("cost call {}: {}", self.n_calls, value);
        if self.config.enable_logging {
            self.record(x, value);
        }
        Ok(value)
    }

    /// Prepared state at flat vector `x`
    pub fn get_state(&mut self, x: &[f64]) -> QaoaResult<E::State> {
        self.params.update_from_raw(x)?;
        self.evaluator.evaluate_state(&self.params.rotation_angles())
    }

    /// Cost of a separate parametrization over the same hyperparameters
    ///
    /// The adapter's own parametrization is left untouched.
    pub fn evaluate_params(&mut self, params: &Parametrization) -> QaoaResult<f64> {
        if params.hyperparams() != self.params.hyperparams() {
            return Err(QaoaError::InvalidConfig(format!(
                "{} differs from {}",
                params.hyperparams(),
                self.params.hyperparams()
            )));
        }

        let expectation = self
            .evaluator
            .evaluate(&self.hamiltonian, &params.rotation_angles())?;
        let value = self.sample(expectation)?;
        self.n_calls += 1;
        Ok(value)
    }

    /// Closure view of [`Self::call`] for optimizers
    pub fn objective(&mut self) -> impl FnMut(&[f64]) -> QaoaResult<f64> + '_ {
        move |x: &[f64]| self.call(x)
    }

    /// Exact value, or value plus `N(0, 1)·sqrt(variance/nshots)`
    fn sample(&mut self, expectation: Expectation) -> QaoaResult<f64> {
        if !self.config.is_sampled() {
            return Ok(expectation.value);
        }

        let sigma = expectation
            .standard_error(self.config.nshots)
            .ok_or_else(|| {
                QaoaError::EvaluatorError(format!(
                    "{} reports no variance for {}-shot sampling",
                    self.evaluator.name(),
                    self.config.nshots
                ))
            })?;
        let z: f64 = StandardNormal.sample(&mut self.rng);
        Ok(expectation.value + sigma * z)
    }

    fn record(&mut self, x: &[f64], value: f64) {
        if let Some(max) = self.config.max_log_entries {
            while self.log.len() >= max {
                self.log.pop_front();
            }
        }
        self.log.push_back(LogEntry {
            x: x.to_vec(),
            value,
        });
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Cost Hamiltonian
    pub fn hamiltonian(&self) -> &HamiltonianModel {
        &self.hamiltonian
    }

    /// Parametrization holding the most recent flat vector
    pub fn parametrization(&self) -> &Parametrization {
        &self.params
    }

    /// Release the parametrization, e.g. after optimization
    pub fn into_parametrization(self) -> Parametrization {
        self.params
    }

    /// Wrapped evaluator
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Active configuration
    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    /// Number of evaluations so far
    pub fn n_calls(&self) -> usize {
        self.n_calls
    }

    /// Recorded calls, oldest first
    pub fn log(&self) -> Vec<LogEntry> {
        self.log.iter().cloned().collect()
    }

    /// Recorded call with the lowest value
    pub fn best(&self) -> Option<&LogEntry> {
        self.log
            .iter()
            .min_by(|a, b| a.value.total_cmp(&b.value))
    }

    /// Drop every recorded call; the call count is kept
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
