//! Reference wavefunction simulator
//!
//! Gantree: L6_Evaluator → WavefunctionSimulator
//!
//! Exact state-vector evaluation of the QAOA circuit. Each step applies the
//! cost phase `exp(-i·(z·Z + zz·ZZ))` and then the mixer `exp(i·x·X)`, which
//! starts the evolution in the ground state `|+⟩^n` of `−ΣX`. Register
//! position `k` maps to bit `k` of the basis index, and bit value 0 is
//! spin `+1`.

use crate::evaluator::{Evaluator, Expectation, QuantumState};
use num_complex::Complex64;
use qaoa_core::{simulation, HamiltonianModel, QaoaError, QaoaResult, QubitId};
use qaoa_params::{HyperParams, RotationAngles};
use serde::{Deserialize, Serialize};

// ============================================================================
// Wavefunction
// ============================================================================

/// State vector over the register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wavefunction {
    register: Vec<QubitId>,
    amplitudes: Vec<Complex64>,
}

impl Wavefunction {
    /// Uniform superposition `|+⟩^n`
    fn plus_state(register: &[QubitId]) -> Self {
        let dim = 1usize << register.len();
        let amp = Complex64::new(1.0 / (dim as f64).sqrt(), 0.0);
        Self {
            register: register.to_vec(),
            amplitudes: vec![amp; dim],
        }
    }

    /// Qubits in bit order
    pub fn register(&self) -> &[QubitId] {
        &self.register
    }

    /// Number of qubits
    pub fn n_qubits(&self) -> usize {
        self.register.len()
    }

    /// Raw amplitudes
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Basis index with the largest probability
    pub fn most_probable(&self) -> usize {
        self.amplitudes
            .iter()
            .map(Complex64::norm_sqr)
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, p)| {
                if p > best.1 {
                    (i, p)
                } else {
                    best
                }
            })
            .0
    }

    /// Bitstring of a basis index, highest register position first
    pub fn bitstring(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.n_qubits())
    }

    /// Spin `±1` of register position `k` in basis state `index`
    pub fn spin(index: usize, k: usize) -> f64 {
        if index >> k & 1 == 0 {
            1.0
        } else {
            -1.0
        }
    }

    fn apply_single_qubit_gate<F>(&mut self, k: usize, f: F)
    where
        F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
    {
        let mask = 1 << k;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let (new_i, new_j) = f(self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = new_i;
                self.amplitudes[j] = new_j;
            }
        }
    }

    /// `exp(i·beta·X)` on register position `k`, the mixer `−X` evolved for `beta`
    fn apply_mixer(&mut self, k: usize, beta: f64) {
        let c = beta.cos();
        let s = Complex64::new(0.0, beta.sin());
        self.apply_single_qubit_gate(k, |a, b| (a * c + b * s, a * s + b * c));
    }

    /// Diagonal `exp(-i·phase(index))`
    fn apply_phase<F>(&mut self, phase: F)
    where
        F: Fn(usize) -> f64,
    {
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= Complex64::from_polar(1.0, -phase(i));
        }
    }
}

impl QuantumState for Wavefunction {
    fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }
}

// ============================================================================
// WavefunctionSimulator
// ============================================================================

/// Exact state-vector evaluator
/// Gantree: WavefunctionSimulator // 파동함수 시뮬레이터
#[derive(Debug, Clone)]
pub struct WavefunctionSimulator {
    name: String,
    max_qubits: usize,
}

impl Default for WavefunctionSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl WavefunctionSimulator {
    /// Create simulator
    pub fn new() -> Self {
        Self {
            name: "wavefunction_simulator".to_string(),
            max_qubits: simulation::MAX_QUBITS,
        }
    }

    /// Set evaluator name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Lower the register size limit
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits.min(simulation::MAX_QUBITS);
        self
    }

    /// Register size limit
    pub fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    fn positions(hyperparams: &HyperParams, qubits: &[QubitId]) -> QaoaResult<Vec<usize>> {
        qubits
            .iter()
            .map(|&q| {
                hyperparams.register_position(q).ok_or_else(|| {
                    QaoaError::EvaluatorError(format!("qubit {} outside the register", q))
                })
            })
            .collect()
    }

    fn check_angles(&self, angles: &RotationAngles) -> QaoaResult<()> {
        let hp = &angles.hyperparams;
        if hp.n_qubits() > self.max_qubits {
            return Err(QaoaError::EvaluatorError(format!(
                "{} qubits exceeds simulator limit of {}",
                hp.n_qubits(),
                self.max_qubits
            )));
        }
        let p = hp.n_steps();
        let expected = [
            (p, hp.n_qubits()),
            (p, hp.n_singles()),
            (p, hp.n_pairs()),
        ];
        let found = [angles.x.dim(), angles.z.dim(), angles.zz.dim()];
        if expected != found {
            return Err(QaoaError::EvaluatorError(format!(
                "rotation angle shapes {:?} do not match hyperparameters {:?}",
                found, expected
            )));
        }
        Ok(())
    }
}

impl Evaluator for WavefunctionSimulator {
    type State = Wavefunction;

    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(
        &self,
        hamiltonian: &HamiltonianModel,
        angles: &RotationAngles,
    ) -> QaoaResult<Expectation> {
        let hp = &angles.hyperparams;
        if hamiltonian.register() != hp.register() {
            return Err(QaoaError::EvaluatorError(format!(
                "hamiltonian register {:?} differs from parameter register {:?}",
                hamiltonian.register(),
                hp.register()
            )));
        }

        let state = self.evaluate_state(angles)?;
        let mut mean = 0.0;
        let mut second = 0.0;
        for (i, prob) in state.probabilities().into_iter().enumerate() {
            let energy = hamiltonian.energy(|q| {
                hp.register_position(q)
                    .map_or(1.0, |k| Wavefunction::spin(i, k))
            });
            mean += prob * energy;
            second += prob * energy * energy;
        }

        Ok(Expectation::new(mean, (second - mean * mean).max(0.0)))
    }

    fn evaluate_state(&self, angles: &RotationAngles) -> QaoaResult<Wavefunction> {
        self.check_angles(angles)?;
        let hp = &angles.hyperparams;

        let singles = Self::positions(hp, hp.qubits_singles())?;
        let pairs: Vec<(usize, usize)> = {
            let firsts: Vec<QubitId> = hp.qubits_pairs().iter().map(|p| p.first()).collect();
            let seconds: Vec<QubitId> = hp.qubits_pairs().iter().map(|p| p.second()).collect();
            Self::positions(hp, &firsts)?
                .into_iter()
                .zip(Self::positions(hp, &seconds)?)
                .collect()
        };

        let mut state = Wavefunction::plus_state(hp.register());
        for s in 0..hp.n_steps() {
            let z = angles.z.row(s);
            let zz = angles.zz.row(s);
            state.apply_phase(|i| {
                let bias: f64 = singles
                    .iter()
                    .zip(z.iter())
                    .map(|(&k, angle)| angle * Wavefunction::spin(i, k))
                    .sum();
                let coupling: f64 = pairs
                    .iter()
                    .zip(zz.iter())
                    .map(|(&(a, b), angle)| {
                        angle * Wavefunction::spin(i, a) * Wavefunction::spin(i, b)
                    })
                    .sum();
                bias + coupling
            });

            for (k, &beta) in angles.x.row(s).iter().enumerate() {
                state.apply_mixer(k, beta);
            }
        }

        Ok(state)
    }
}

// ============================================================================
// Tests
// ============================================================================
