//! Python bindings for HamiltonianModel
//!
//! Gantree: L8_Python → PyHamiltonian

use crate::to_py_err;
use pyo3::prelude::*;
use qaoa_core::{HamiltonianGenerator, HamiltonianModel, Term};

/// Python wrapper for HamiltonianModel
/// Gantree: PyHamiltonian // 해밀토니안 바인딩
#[pyclass(name = "Hamiltonian")]
#[derive(Clone)]
pub struct PyHamiltonian {
    pub(crate) inner: HamiltonianModel,
}

#[pymethods]
impl PyHamiltonian {
    /// Parse a Hamiltonian such as `"0.7*Z0*Z1 - 0.5*Z0"`
    #[new]
    pub fn new(text: &str) -> PyResult<Self> {
        let inner = text.parse::<HamiltonianModel>().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Build from `(qubits, weight)` terms
    #[staticmethod]
    pub fn from_terms(terms: Vec<(Vec<usize>, f64)>) -> PyResult<Self> {
        let inner = HamiltonianModel::build(terms.into_iter().map(|(q, w)| Term::new(q, w)))
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Build from weighted edges `(i, j, w)`
    #[staticmethod]
    pub fn from_graph(edges: Vec<(usize, usize, f64)>) -> PyResult<Self> {
        let inner = HamiltonianModel::from_graph(&edges).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// `0.5 Σ Z_i Z_{i+1}` on a ring
    #[staticmethod]
    pub fn ring_of_disagrees(n: usize) -> PyResult<Self> {
        let inner = HamiltonianGenerator::new()
            .ring_of_disagrees(n)
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Random biases and couplings drawn from `[-1, 1)`
    #[staticmethod]
    #[pyo3(signature = (n, edge_prob=0.5, seed=None))]
    pub fn random(n: usize, edge_prob: f64, seed: Option<u64>) -> PyResult<Self> {
        let generator = match seed {
            Some(s) => HamiltonianGenerator::with_seed(s),
            None => HamiltonianGenerator::new(),
        };
        let inner = generator.random(n, edge_prob).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Qubits in ascending order
    #[getter]
    pub fn register(&self) -> Vec<usize> {
        self.inner.register().to_vec()
    }

    #[getter]
    pub fn n_qubits(&self) -> usize {
        self.inner.n_qubits()
    }

    /// Single-qubit terms as `(qubit, weight)`
    #[getter]
    pub fn singles(&self) -> Vec<(usize, f64)> {
        self.inner.singles().to_vec()
    }

    /// Two-qubit terms as `(i, j, weight)`
    #[getter]
    pub fn pairs(&self) -> Vec<(usize, usize, f64)> {
        self.inner
            .pairs()
            .iter()
            .map(|(p, w)| (p.first(), p.second(), *w))
            .collect()
    }

    #[getter]
    pub fn constant(&self) -> f64 {
        self.inner.constant()
    }

    /// Classical energy of a `±1` spin assignment over the register
    pub fn energy(&self, spins: Vec<f64>) -> PyResult<f64> {
        if spins.len() != self.inner.n_qubits() {
            return Err(pyo3::exceptions::PyValueError::new_err(format!(
                "expected {} spins, got {}",
                self.inner.n_qubits(),
                spins.len()
            )));
        }
        let register = self.inner.register();
        Ok(self.inner.energy(|q| {
            register
                .iter()
                .position(|&r| r == q)
                .map_or(1.0, |k| spins[k])
        }))
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!("Hamiltonian('{}')", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_py_hamiltonian_parse() {
        let h = PyHamiltonian::new("0.7*Z0*Z1 + 1.2*Z0*Z2 - 0.5*Z0").unwrap();
        assert_eq!(h.register(), vec![0, 1, 2]);
        assert_eq!(h.singles(), vec![(0, -0.5)]);
        assert_eq!(h.pairs().len(), 2);
    }

    #[test]
    fn test_py_hamiltonian_builders() {
        let a = PyHamiltonian::from_terms(vec![(vec![0, 1], 1.0), (vec![1], -0.5)]).unwrap();
        let b = PyHamiltonian::new("Z0*Z1 - 0.5*Z1").unwrap();
        assert_eq!(a.inner, b.inner);

        let ring = PyHamiltonian::ring_of_disagrees(4).unwrap();
        assert_eq!(ring.pairs().len(), 4);
        assert!(PyHamiltonian::ring_of_disagrees(2).is_err());
    }

    #[test]
    fn test_py_hamiltonian_energy() {
        let h = PyHamiltonian::new("Z0*Z1 + 2.0").unwrap();
        assert_relative_eq!(h.energy(vec![1.0, -1.0]).unwrap(), 1.0);
        assert!(h.energy(vec![1.0]).is_err());
    }
}
