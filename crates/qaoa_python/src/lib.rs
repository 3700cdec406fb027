#![allow(non_local_definitions)]
//! # QAOA Python Bindings
//!
//! Python bindings for the QAOA parameter and cost-function crates.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qaoa_python // L8: Python Bindings
//!     PyHamiltonian // 해밀토니안 바인딩
//!         parse, from_terms(), from_graph()
//!         ring_of_disagrees(), random()
//!     PyParams // 파라미터 바인딩
//!         linear_ramp(), empty(), from_json()
//!         raw(), update_from_raw(), get(), set()
//!         convert(), extend_degree()
//!     PyCostFunction // 비용 함수 바인딩
//!         __call__(x), probabilities(x), scan()
//!         log(), best()
//!     sweep(), linear_ramp() // 편의 함수
//! ```
//!
//! ## Quick Start (Python)
//!
//! ```python
//! import qaoa
//!
//! h = qaoa.Hamiltonian("0.7*Z0*Z1 + 1.2*Z0*Z2 - 0.5*Z0")
//! params = qaoa.linear_ramp(h, 2, kind="extended")
//!
//! cost = qaoa.CostFunction(h, params, enable_logging=True)
//! print(cost(params.raw()))
//!
//! # Landscape along one angle
//! for p in qaoa.sweep(params, "betas[1][1]", 0.0, 3.14, 0.1):
//!     print(cost(p.raw()))
//! ```
//!
//! ## Installation
//!
//! ```bash
//! pip install maturin
//! cd crates/qaoa_python
//! maturin develop --release
//! ```

use pyo3::prelude::*;
use qaoa_core::QaoaError;

// ============================================================================
// Module Declarations
// ============================================================================

/// Hamiltonian bindings
pub mod hamiltonian;

/// Parameter bindings
pub mod params;

/// Cost-function bindings
pub mod cost;

// ============================================================================
// Re-exports
// ============================================================================

pub use cost::PyCostFunction;
pub use hamiltonian::PyHamiltonian;
pub use params::PyParams;

// ============================================================================
// Error Mapping
// ============================================================================

/// Evaluator failures become `RuntimeError`, everything else `ValueError`
pub(crate) fn to_py_err(err: QaoaError) -> PyErr {
    match err {
        QaoaError::EvaluatorError(_) => pyo3::exceptions::PyRuntimeError::new_err(err.to_string()),
        _ => pyo3::exceptions::PyValueError::new_err(err.to_string()),
    }
}

// ============================================================================
// Python Module
// ============================================================================

/// QAOA parametrizations and cost functions
///
/// ## Example
///
/// ```python
/// import qaoa
///
/// h = qaoa.Hamiltonian.ring_of_disagrees(6)
/// params = qaoa.Params.linear_ramp(h, 3, kind="fourier", q=2)
/// cost = qaoa.CostFunction(h, params, nshots=1000, seed=7)
/// print(cost(params.raw()))
/// ```
#[pymodule]
fn qaoa(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    // ========================================================================
    // Classes
    // ========================================================================

    m.add_class::<PyHamiltonian>()?;
    m.add_class::<PyParams>()?;
    m.add_class::<PyCostFunction>()?;

    // ========================================================================
    // Convenience Functions
    // ========================================================================

    m.add_function(wrap_pyfunction!(params::linear_ramp, m)?)?;
    m.add_function(wrap_pyfunction!(params::sweep, m)?)?;

    // ========================================================================
    // Module Metadata
    // ========================================================================

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("__author__", "Jung Wook Yang <sadpig70@gmail.com>")?;
    m.add("__doc__", "QAOA parametrizations and cost functions")?;

    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() {
        let h = PyHamiltonian::new("0.7*Z0*Z1 + 1.2*Z0*Z2 - 0.5*Z0").unwrap();
        let params = params::linear_ramp(h.clone(), 2, "extended", None, 1).unwrap();
        let mut cost = PyCostFunction::new(h, params.clone(), 0, None, true, Some(5)).unwrap();

        for item in params::sweep(params, "betas[1][1]", 0.0, 1.0, 0.1).unwrap() {
            cost.call(item.raw()).unwrap();
        }
        assert_eq!(cost.n_calls(), 10);
        assert_eq!(cost.log().len(), 5);
        assert!(cost.best().is_some());
    }

    #[test]
    fn test_sampled_cost_reproducible() {
        let h = PyHamiltonian::ring_of_disagrees(4).unwrap();
        let params = PyParams::linear_ramp(h.clone(), 2, "annealing", None, 1).unwrap();
        let x = params.raw();

        let mut a = PyCostFunction::new(h.clone(), params.clone(), 500, Some(3), false, None).unwrap();
        let mut b = PyCostFunction::new(h, params, 500, Some(3), false, None).unwrap();
        assert_eq!(a.call(x.clone()).unwrap(), b.call(x).unwrap());
    }

    #[test]
    fn test_invalid_config() {
        let h = PyHamiltonian::new("Z0*Z1").unwrap();
        let params = PyParams::linear_ramp(h.clone(), 1, "standard", None, 1).unwrap();
        assert!(PyCostFunction::new(h, params, 0, None, false, Some(3)).is_err());
    }
}
