//! # QAOA Cost
//!
//! Evaluator boundary, reference simulator, and flat-vector cost functions.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qaoa_cost // L6-L7: Evaluation (완료)
//!     L6_Evaluator // 평가기 경계 (완료)
//!         EvaluatorTrait // evaluate(), evaluate_state() (완료)
//!         Expectation // ⟨C⟩ + 분산 (완료)
//!         WavefunctionSimulator // 상태 벡터 시뮬레이션 (완료)
//!     L7_Cost // 비용 함수 (완료)
//!         CostConfig // nshots, logging, seed (완료)
//!         CostFunctionAdapter // call(x) -> f64 (완료)
//!         Landscape // 1D/2D 스캔 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qaoa_core::prelude::*;
//! use qaoa_params::prelude::*;
//! use qaoa_cost::prelude::*;
//!
//! let hamiltonian = HamiltonianGenerator::new().ring_of_disagrees(4).unwrap();
//! let params = StandardParams::linear_ramp(&hamiltonian, 2, None).unwrap();
//! let x0 = params.raw();
//!
//! let mut cost = CostFunctionAdapter::new(hamiltonian, params, WavefunctionSimulator::new())
//!     .unwrap();
//! let value = cost.call(&x0).unwrap();
//! assert!(value < 0.0);
//! ```
//!
//! ## Sampling Noise
//!
//! ```rust
//! use qaoa_core::prelude::*;
//! use qaoa_params::prelude::*;
//! use qaoa_cost::prelude::*;
//!
//! let hamiltonian: HamiltonianModel = "Z0*Z1".parse().unwrap();
//! let params = StandardParams::linear_ramp(&hamiltonian, 1, None).unwrap();
//! let x0 = params.raw();
//!
//! let config = CostConfig::sampled(1000, 42).with_logging(true);
//! let mut cost = CostFunctionAdapter::new(hamiltonian, params, WavefunctionSimulator::new())
//!     .unwrap()
//!     .with_config(config)
//!     .unwrap();
//!
//! cost.call(&x0).unwrap();
//! assert_eq!(cost.log().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Evaluator trait (Gantree: L6_Evaluator → EvaluatorTrait)
pub mod evaluator;

/// Wavefunction simulator (Gantree: L6_Evaluator → WavefunctionSimulator)
pub mod simulator;

/// Cost configuration (Gantree: L7_Cost → CostConfig)
pub mod config;

/// Cost-function adapter (Gantree: L7_Cost → CostFunctionAdapter)
pub mod cost_function;

/// Landscape scans (Gantree: L7_Cost → Landscape)
pub mod landscape;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::CostConfig;
pub use cost_function::{CostFunctionAdapter, LogEntry};
pub use evaluator::{Evaluator, Expectation, QuantumState};
pub use landscape::{scan_1d, scan_2d, Landscape};
pub use simulator::{Wavefunction, WavefunctionSimulator};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qaoa_cost::prelude::*;
    //! ```

    pub use crate::config::CostConfig;
    pub use crate::cost_function::{CostFunctionAdapter, LogEntry};
    pub use crate::evaluator::{Evaluator, Expectation, QuantumState};
    pub use crate::landscape::{scan_1d, scan_2d, Landscape};
    pub use crate::simulator::{Wavefunction, WavefunctionSimulator};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_relative_eq;
    use qaoa_core::prelude::*;
    use qaoa_params::prelude::*;

    fn hamiltonian() -> HamiltonianModel {
        "0.7*Z0*Z1 + 1.2*Z0*Z2 - 0.5*Z0".parse().unwrap()
    }

    #[test]
    fn test_every_variant_through_adapter() {
        let h = hamiltonian();
        let standard: Parametrization = StandardParams::linear_ramp(&h, 3, None).unwrap().into();
        let reference = CostFunctionAdapter::new(h.clone(), standard.clone(), WavefunctionSimulator::new())
            .unwrap()
            .call(&standard.raw())
            .unwrap();

        let extended = ConversionGraph::convert(&standard, ParamKind::Extended).unwrap();
        let x = extended.raw();
        let mut cost =
            CostFunctionAdapter::new(h.clone(), extended, WavefunctionSimulator::new()).unwrap();
        assert_relative_eq!(cost.call(&x).unwrap(), reference, epsilon = 1e-12);

        let annealing: Parametrization = AnnealingParams::linear_ramp(&h, 3, None).unwrap().into();
        let x = annealing.raw();
        let mut cost = CostFunctionAdapter::new(h, annealing, WavefunctionSimulator::new()).unwrap();
        assert_relative_eq!(cost.call(&x).unwrap(), reference, epsilon = 1e-12);
    }

    #[test]
    fn test_fourier_matches_its_standard_image() {
        let h = hamiltonian();
        let fourier: Parametrization = FourierParams::linear_ramp(&h, 4, 2, None).unwrap().into();
        let standard = ConversionGraph::convert(&fourier, ParamKind::Standard).unwrap();

        let mut via_fourier =
            CostFunctionAdapter::new(h.clone(), fourier.clone(), WavefunctionSimulator::new()).unwrap();
        let mut via_standard =
            CostFunctionAdapter::new(h, standard.clone(), WavefunctionSimulator::new()).unwrap();

        assert_relative_eq!(
            via_fourier.call(&fourier.raw()).unwrap(),
            via_standard.call(&standard.raw()).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_mixer_keeps_uniform_energy() {
        // with β = 0 only phases act, so ⟨C⟩ equals the uniform average
        let h: HamiltonianModel = "0.5*Z0*Z1 - 0.3*Z1 + 2.0".parse().unwrap();
        let params = StandardParams::linear_ramp(&h, 2, None).unwrap();
        let mut cost = CostFunctionAdapter::new(h, params, WavefunctionSimulator::new()).unwrap();
        assert_relative_eq!(cost.call(&[0.0, 0.0, 0.4, 0.9]).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ramp_lowers_ring_energy() {
        let h = HamiltonianGenerator::new().ring_of_disagrees(6).unwrap();
        let mut cost = CostFunctionAdapter::new(
            h.clone(),
            StandardParams::linear_ramp(&h, 1, None).unwrap(),
            WavefunctionSimulator::new(),
        )
        .unwrap();
        let x = cost.parametrization().raw();
        let energy = cost.call(&x).unwrap();
        assert!(energy < 0.0);

        // alternating spins reach the ground energy −3
        assert!(energy > -3.0 - 1e-12);
    }

    #[test]
    fn test_logged_calls_track_best() {
        let h = hamiltonian();
        let params = StandardParams::linear_ramp(&h, 1, None).unwrap();
        let mut cost = CostFunctionAdapter::new(h, params, WavefunctionSimulator::new())
            .unwrap()
            .with_config(CostConfig::logged())
            .unwrap();

        let mut lowest = f64::INFINITY;
        for k in 0..5 {
            let x = [0.1 * k as f64, 0.3];
            lowest = lowest.min(cost.call(&x).unwrap());
        }

        assert_eq!(cost.log().len(), 5);
        assert_eq!(cost.best().unwrap().value, lowest);
    }

    #[test]
    fn test_sampled_mean_converges() {
        let h: HamiltonianModel = "Z0".parse().unwrap();
        let params = StandardParams::new(
            std::sync::Arc::new(HyperParams::bind(&h, 1).unwrap()),
            [0.3],
            [0.5],
        )
        .unwrap();
        let exact = -(0.6f64).sin() * (1.0f64).sin();

        let mut cost = CostFunctionAdapter::new(h, params, WavefunctionSimulator::new())
            .unwrap()
            .with_config(CostConfig::sampled(100, 11))
            .unwrap();
        let n = 400;
        let mean: f64 = (0..n).map(|_| cost.call(&[0.3, 0.5]).unwrap()).sum::<f64>() / n as f64;

        // σ ≤ 0.1 per call, so the mean of 400 is within 0.025 at 5σ
        assert!((mean - exact).abs() < 0.025);
    }
}
