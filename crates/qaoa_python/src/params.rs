//! Python bindings for the parametrizations
//!
//! Gantree: L8_Python → PyParams

use crate::hamiltonian::PyHamiltonian;
use crate::to_py_err;
use ndarray::Array2;
use pyo3::prelude::*;
use qaoa_core::{HamiltonianModel, QaoaResult};
use qaoa_params::{
    AnnealingParams, ConversionGraph, ExtendedParams, FourierParams, ParamKind, ParameterAddress,
    ParameterIterator, Parametrization, StandardParams, SweepRange,
};

fn parse_kind(kind: &str) -> PyResult<ParamKind> {
    kind.parse::<ParamKind>().map_err(to_py_err)
}

fn parse_address(address: &str) -> PyResult<ParameterAddress> {
    address.parse::<ParameterAddress>().map_err(to_py_err)
}

fn rows(a: Array2<f64>) -> Vec<Vec<f64>> {
    a.outer_iter().map(|row| row.to_vec()).collect()
}

fn ramp(
    kind: ParamKind,
    hamiltonian: &HamiltonianModel,
    n_steps: usize,
    time: Option<f64>,
    q: usize,
) -> QaoaResult<Parametrization> {
    Ok(match kind {
        ParamKind::Standard => StandardParams::linear_ramp(hamiltonian, n_steps, time)?.into(),
        ParamKind::Extended => ExtendedParams::linear_ramp(hamiltonian, n_steps, time)?.into(),
        ParamKind::Annealing => AnnealingParams::linear_ramp(hamiltonian, n_steps, time)?.into(),
        ParamKind::Fourier => FourierParams::linear_ramp(hamiltonian, n_steps, q, time)?.into(),
    })
}

fn empty(
    kind: ParamKind,
    hamiltonian: &HamiltonianModel,
    n_steps: usize,
    total_time: Option<f64>,
    q: usize,
) -> QaoaResult<Parametrization> {
    Ok(match kind {
        ParamKind::Standard => StandardParams::empty(hamiltonian, n_steps)?.into(),
        ParamKind::Extended => ExtendedParams::empty(hamiltonian, n_steps)?.into(),
        ParamKind::Annealing => AnnealingParams::empty(hamiltonian, n_steps, total_time)?.into(),
        ParamKind::Fourier => FourierParams::empty(hamiltonian, n_steps, q)?.into(),
    })
}

/// Python wrapper for Parametrization
/// Gantree: PyParams // 파라미터 바인딩
#[pyclass(name = "Params")]
#[derive(Clone)]
pub struct PyParams {
    pub(crate) inner: Parametrization,
}

impl From<Parametrization> for PyParams {
    fn from(inner: Parametrization) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyParams {
    /// Linear-ramp initial angles of the given kind
    #[staticmethod]
    #[pyo3(signature = (hamiltonian, n_steps, kind="standard", time=None, q=1))]
    pub fn linear_ramp(
        hamiltonian: PyHamiltonian,
        n_steps: usize,
        kind: &str,
        time: Option<f64>,
        q: usize,
    ) -> PyResult<Self> {
        let kind = parse_kind(kind)?;
        ramp(kind, &hamiltonian.inner, n_steps, time, q)
            .map(Self::from)
            .map_err(to_py_err)
    }

    /// NaN-filled angles, to be set with `update_from_raw`
    #[staticmethod]
    #[pyo3(signature = (hamiltonian, n_steps, kind="standard", total_time=None, q=1))]
    pub fn empty(
        hamiltonian: PyHamiltonian,
        n_steps: usize,
        kind: &str,
        total_time: Option<f64>,
        q: usize,
    ) -> PyResult<Self> {
        let kind = parse_kind(kind)?;
        empty(kind, &hamiltonian.inner, n_steps, total_time, q)
            .map(Self::from)
            .map_err(to_py_err)
    }

    /// Restore from `to_json` output
    #[staticmethod]
    pub fn from_json(json: &str) -> PyResult<Self> {
        Parametrization::from_json(json)
            .map(Self::from)
            .map_err(to_py_err)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Variant name
    #[getter]
    pub fn kind(&self) -> String {
        self.inner.kind().name().to_string()
    }

    #[getter]
    pub fn n_steps(&self) -> usize {
        self.inner.hyperparams().n_steps()
    }

    #[getter]
    pub fn n_qubits(&self) -> usize {
        self.inner.hyperparams().n_qubits()
    }

    /// Length of the flat vector
    #[getter]
    pub fn n_raw(&self) -> usize {
        self.inner.n_raw()
    }

    /// Flat vector of the variable angles
    pub fn raw(&self) -> Vec<f64> {
        self.inner.raw()
    }

    /// Overwrite every variable angle from a flat vector
    pub fn update_from_raw(&mut self, x: Vec<f64>) -> PyResult<()> {
        self.inner.update_from_raw(&x).map_err(to_py_err)
    }

    /// Value at an address such as `"betas[1][1]"`
    pub fn get(&self, address: &str) -> PyResult<f64> {
        parse_address(address)?.get(&self.inner).map_err(to_py_err)
    }

    /// Overwrite the value at an address
    pub fn set(&mut self, address: &str, value: f64) -> PyResult<()> {
        parse_address(address)?
            .set(&mut self.inner, value)
            .map_err(to_py_err)
    }

    // ========================================================================
    // Rotation angles
    // ========================================================================

    /// Mixer angles, one row per step
    pub fn x_rotation_angles(&self) -> Vec<Vec<f64>> {
        rows(self.inner.x_rotation_angles())
    }

    /// Bias angles, one row per step
    pub fn z_rotation_angles(&self) -> Vec<Vec<f64>> {
        rows(self.inner.z_rotation_angles())
    }

    /// Coupling angles, one row per step
    pub fn zz_rotation_angles(&self) -> Vec<Vec<f64>> {
        rows(self.inner.zz_rotation_angles())
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Convert to another kind, e.g. `"extended"`
    pub fn convert(&self, kind: &str) -> PyResult<Self> {
        let target = parse_kind(kind)?;
        ConversionGraph::convert(&self.inner, target)
            .map(Self::from)
            .map_err(to_py_err)
    }

    /// Raise the Fourier degree, zero-padding new coefficients
    pub fn extend_degree(&self, q: usize) -> PyResult<Self> {
        let fourier = self.inner.as_fourier().ok_or_else(|| {
            pyo3::exceptions::PyValueError::new_err(format!(
                "extend_degree needs fourier parameters, got {}",
                self.inner.kind()
            ))
        })?;
        fourier
            .extend_degree(q)
            .map(|p| Self::from(Parametrization::from(p)))
            .map_err(to_py_err)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> PyResult<String> {
        serde_json::to_string_pretty(&self.inner)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn __len__(&self) -> usize {
        self.inner.n_raw()
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

/// Linear-ramp parameters
///
/// Shortcut for `Params.linear_ramp`.
#[pyfunction]
#[pyo3(signature = (hamiltonian, n_steps, kind="standard", time=None, q=1))]
pub fn linear_ramp(
    hamiltonian: PyHamiltonian,
    n_steps: usize,
    kind: &str,
    time: Option<f64>,
    q: usize,
) -> PyResult<PyParams> {
    PyParams::linear_ramp(hamiltonian, n_steps, kind, time, q)
}

/// Copies of `params` with one addressed angle swept over `[start, stop)`
#[pyfunction]
pub fn sweep(
    params: PyParams,
    address: &str,
    start: f64,
    stop: f64,
    step: f64,
) -> PyResult<Vec<PyParams>> {
    let range = SweepRange::new(start, stop, step).map_err(to_py_err)?;
    let sweep = ParameterIterator::parse(&params.inner, address, range).map_err(to_py_err)?;
    sweep
        .into_iter()
        .map(|item| item.map(PyParams::from))
        .collect::<QaoaResult<Vec<_>>>()
        .map_err(to_py_err)
}
