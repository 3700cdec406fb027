//! Python bindings for CostFunctionAdapter
//!
//! Gantree: L8_Python → PyCostFunction

use crate::hamiltonian::PyHamiltonian;
use crate::params::PyParams;
use crate::to_py_err;
use pyo3::prelude::*;
use qaoa_cost::{
    scan_1d, CostConfig, CostFunctionAdapter, QuantumState, WavefunctionSimulator,
};
use qaoa_params::{ParameterIterator, SweepRange};

/// Python wrapper for CostFunctionAdapter over the wavefunction simulator
/// Gantree: PyCostFunction // 비용 함수 바인딩
#[pyclass(name = "CostFunction")]
pub struct PyCostFunction {
    inner: CostFunctionAdapter<WavefunctionSimulator>,
}

#[pymethods]
impl PyCostFunction {
    /// Create a cost function; `nshots > 0` adds sampling noise
    #[new]
    #[pyo3(signature = (hamiltonian, params, nshots=0, seed=None, enable_logging=false, max_log_entries=None))]
    pub fn new(
        hamiltonian: PyHamiltonian,
        params: PyParams,
        nshots: u64,
        seed: Option<u64>,
        enable_logging: bool,
        max_log_entries: Option<usize>,
    ) -> PyResult<Self> {
        let config = CostConfig {
            nshots,
            enable_logging,
            max_log_entries,
            seed,
        };
        let inner = CostFunctionAdapter::new(
            hamiltonian.inner,
            params.inner,
            WavefunctionSimulator::new(),
        )
        .and_then(|adapter| adapter.with_config(config))
        .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Cost at flat vector `x`
    pub fn __call__(&mut self, x: Vec<f64>) -> PyResult<f64> {
        self.inner.call(&x).map_err(to_py_err)
    }

    /// Same as calling the object
    pub fn call(&mut self, x: Vec<f64>) -> PyResult<f64> {
        self.__call__(x)
    }

    /// Basis-state probabilities of the state prepared at `x`
    pub fn probabilities(&mut self, x: Vec<f64>) -> PyResult<Vec<f64>> {
        let state = self.inner.get_state(&x).map_err(to_py_err)?;
        Ok(state.probabilities())
    }

    /// Most likely bitstring of the state prepared at `x`
    pub fn most_probable(&mut self, x: Vec<f64>) -> PyResult<String> {
        let state = self.inner.get_state(&x).map_err(to_py_err)?;
        Ok(state.bitstring(state.most_probable()))
    }

    /// Cost along one addressed angle, as `(value, cost)` pairs
    pub fn scan(
        &mut self,
        address: &str,
        start: f64,
        stop: f64,
        step: f64,
    ) -> PyResult<Vec<(f64, f64)>> {
        let range = SweepRange::new(start, stop, step).map_err(to_py_err)?;
        let sweep = ParameterIterator::parse(self.inner.parametrization(), address, range)
            .map_err(to_py_err)?;
        scan_1d(&mut self.inner, &sweep).map_err(to_py_err)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Parameters holding the most recent flat vector
    #[getter]
    pub fn params(&self) -> PyParams {
        PyParams::from(self.inner.parametrization().clone())
    }

    /// Number of evaluations so far
    #[getter]
    pub fn n_calls(&self) -> usize {
        self.inner.n_calls()
    }

    /// Recorded calls as `(x, value)`, oldest first
    pub fn log(&self) -> Vec<(Vec<f64>, f64)> {
        self.inner
            .log()
            .into_iter()
            .map(|entry| (entry.x, entry.value))
            .collect()
    }

    /// Recorded call with the lowest value
    pub fn best(&self) -> Option<(Vec<f64>, f64)> {
        self.inner
            .best()
            .map(|entry| (entry.x.clone(), entry.value))
    }

    pub fn clear_log(&mut self) {
        self.inner.clear_log();
    }

    fn __repr__(&self) -> String {
        format!(
            "CostFunction({}, {}, calls={})",
            self.inner.parametrization().kind(),
            self.inner.config(),
            self.inner.n_calls()
        )
    }
}
