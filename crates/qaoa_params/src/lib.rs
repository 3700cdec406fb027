//! # QAOA Params
//!
//! Structured representations of the variable QAOA angles.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qaoa_params // L2-L5: Parameters (완료)
//!     L2_Params // 공통 파라미터 기반 (완료)
//!         HyperParams // bind(hamiltonian, n_steps) (완료)
//!         ShapeReconciler // 형상 검증/재배열 (완료)
//!         LinearRamp // 선형 램프 초기값 (완료)
//!         RotationAngles // x / z / zz (완료)
//!     L3_Variants // 파라미터화 (완료)
//!         StandardParams // betas[p], gammas[p] (완료)
//!         ExtendedParams // 연산자별 각도 (완료)
//!         AnnealingParams // schedule[p] (완료)
//!         FourierParams // v[q], u[q] (완료)
//!         Parametrization // 닫힌 열거형 (완료)
//!     L4_Conversion // 변환 (완료)
//!         ConversionGraph // BFS 경로 + 정확한 사상 (완료)
//!     L5_Sweep // 스윕 (완료)
//!         ParameterAddress // "betas[1][1]" (완료)
//!         SweepRange // [start, stop) step (완료)
//!         ParameterIterator // 독립 복사본 생성 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qaoa_core::prelude::*;
//! use qaoa_params::prelude::*;
//!
//! let hamiltonian: HamiltonianModel = "0.7*Z0*Z1 + 1.2*Z0*Z2 - 0.5*Z0".parse().unwrap();
//! let params = StandardParams::linear_ramp(&hamiltonian, 2, Some(1.0)).unwrap();
//!
//! assert_eq!(params.betas().to_vec(), vec![0.375, 0.125]);
//! assert_eq!(params.gammas().to_vec(), vec![0.125, 0.375]);
//! assert_eq!(params.raw(), vec![0.375, 0.125, 0.125, 0.375]);
//! ```
//!
//! ## Conversion
//!
//! ```rust
//! use qaoa_core::prelude::*;
//! use qaoa_params::prelude::*;
//!
//! let hamiltonian: HamiltonianModel = "0.5*Z0*Z1 + 0.5*Z1*Z2".parse().unwrap();
//! let fourier: Parametrization = FourierParams::linear_ramp(&hamiltonian, 4, 2, None)
//!     .unwrap()
//!     .into();
//!
//! let extended = ConversionGraph::convert(&fourier, ParamKind::Extended).unwrap();
//! assert_eq!(extended.kind(), ParamKind::Extended);
//! assert!(ConversionGraph::convert(&extended, ParamKind::Standard).is_err());
//! ```
//!
//! ## Sweeps
//!
//! ```rust
//! use qaoa_core::prelude::*;
//! use qaoa_params::prelude::*;
//! use std::f64::consts::PI;
//!
//! let hamiltonian: HamiltonianModel = "0.7*Z0*Z1 + 1.2*Z0*Z2 - 0.5*Z0".parse().unwrap();
//! let base: Parametrization = ExtendedParams::linear_ramp(&hamiltonian, 2, None)
//!     .unwrap()
//!     .into();
//!
//! let range = SweepRange::new(0.0, 2.0 * PI, 2.0 * PI / 100.0).unwrap();
//! let sweep = ParameterIterator::parse(&base, "betas[1][1]", range).unwrap();
//! assert_eq!(sweep.iter().count(), 100);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Hyperparameters (Gantree: L2_Params → HyperParams)
pub mod hyperparams;

/// Shape reconciliation (Gantree: L2_Params → ShapeReconciler)
pub mod shape;

/// Linear ramp (Gantree: L2_Params → LinearRamp)
pub mod ramp;

/// Rotation angles (Gantree: L2_Params → RotationAngles)
pub mod rotation;

/// Standard parameters (Gantree: L3_Variants → StandardParams)
pub mod standard;

/// Extended parameters (Gantree: L3_Variants → ExtendedParams)
pub mod extended;

/// Annealing parameters (Gantree: L3_Variants → AnnealingParams)
pub mod annealing;

/// Fourier parameters (Gantree: L3_Variants → FourierParams)
pub mod fourier;

/// Closed enum over the variants (Gantree: L3_Variants → Parametrization)
pub mod parametrization;

/// Conversions (Gantree: L4_Conversion → ConversionGraph)
pub mod conversion;

/// Parameter addresses (Gantree: L5_Sweep → ParameterAddress)
pub mod address;

/// Sweeps (Gantree: L5_Sweep → ParameterIterator)
pub mod sweep;

// ============================================================================
// Re-exports
// ============================================================================

pub use address::{AngleKind, ParameterAddress};
pub use annealing::AnnealingParams;
pub use conversion::ConversionGraph;
pub use extended::ExtendedParams;
pub use fourier::FourierParams;
pub use hyperparams::HyperParams;
pub use parametrization::{ParamKind, Parametrization};
pub use ramp::LinearRamp;
pub use rotation::RotationAngles;
pub use shape::{AngleInput, ShapeReconciler};
pub use standard::StandardParams;
pub use sweep::{ParameterIterator, SweepIter, SweepRange};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qaoa_params::prelude::*;
    //! ```

    pub use crate::address::{AngleKind, ParameterAddress};
    pub use crate::annealing::AnnealingParams;
    pub use crate::conversion::ConversionGraph;
    pub use crate::extended::ExtendedParams;
    pub use crate::fourier::FourierParams;
    pub use crate::hyperparams::HyperParams;
    pub use crate::parametrization::{ParamKind, Parametrization};
    pub use crate::ramp::LinearRamp;
    pub use crate::rotation::RotationAngles;
    pub use crate::shape::{AngleInput, ShapeReconciler};
    pub use crate::standard::StandardParams;
    pub use crate::sweep::{ParameterIterator, SweepRange};
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
    use std::f64::consts::PI;
    use std::sync::Arc;

    fn hamiltonian() -> HamiltonianModel {
        HamiltonianModel::build(vec![
            Term::pair(0, 1, 0.7),
            Term::pair(0, 2, 1.2),
            Term::single(0, -0.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_end_to_end_linear_ramp() {
        let params = StandardParams::linear_ramp(&hamiltonian(), 2, Some(1.0)).unwrap();
        assert_eq!(params.betas().to_vec(), vec![0.375, 0.125]);
        assert_eq!(params.gammas().to_vec(), vec![0.125, 0.375]);
    }

    #[test]
    fn test_empty_extended_filled_from_converted_ramp() {
        let h = hamiltonian();
        let mut empty = ExtendedParams::empty(&h, 3).unwrap();
        let ramp: Parametrization = StandardParams::linear_ramp(&h, 3, None).unwrap().into();
        let converted = ConversionGraph::convert(&ramp, ParamKind::Extended).unwrap();

        empty.update_from_raw(&converted.raw()).unwrap();
        let raw = empty.raw();
        empty.update_from_raw(&raw).unwrap();
        assert_eq!(empty.raw(), raw);
        assert_eq!(Parametrization::from(empty), converted);
    }

    #[test]
    fn test_standard_to_extended_scaling() {
        let h = hamiltonian();
        let standard = StandardParams::linear_ramp(&h, 2, Some(1.0)).unwrap();
        let extended =
            ConversionGraph::convert(&standard.clone().into(), ParamKind::Extended).unwrap();

        let zz = extended.zz_rotation_angles();
        let z = extended.z_rotation_angles();
        for s in 0..2 {
            let gamma = standard.gammas()[s];
            assert_relative_eq!(zz[[s, 0]], gamma * 0.7);
            assert_relative_eq!(zz[[s, 1]], gamma * 1.2);
            assert_relative_eq!(z[[s, 0]], gamma * -0.5);
            assert!(extended.x_rotation_angles().row(s).iter().all(|&b| b == standard.betas()[s]));
        }
    }

    #[test]
    fn test_default_time_override() {
        let h = hamiltonian();
        let default = StandardParams::linear_ramp(&h, 5, None).unwrap();
        let explicit = StandardParams::linear_ramp(&h, 5, Some(0.7 * 5.0)).unwrap();
        let other = StandardParams::linear_ramp(&h, 5, Some(1.0)).unwrap();
        for (a, b) in default.raw().iter().zip(explicit.raw().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
        assert_ne!(default.raw(), other.raw());
    }

    #[test]
    fn test_reconciler_any_nesting() {
        let hp = Arc::new(HyperParams::bind(&hamiltonian(), 2).unwrap());
        let flat = ExtendedParams::new(hp.clone(), vec![0.1; 6], vec![0.2; 2], vec![0.3; 4]).unwrap();
        let nested = ExtendedParams::new(
            hp.clone(),
            [[0.1, 0.1], [0.1, 0.1], [0.1, 0.1]],
            vec![vec![0.2, 0.2]],
            [[0.3, 0.3], [0.3, 0.3]],
        )
        .unwrap();
        assert_eq!(flat, nested);

        let err = ExtendedParams::new(hp.clone(), vec![0.1; 5], vec![0.2; 2], vec![0.3; 4]).unwrap_err();
        assert!(matches!(err, QaoaError::ShapeMismatch { expected: (2, 3), .. }));

        let ragged = vec![vec![0.3, 0.3, 0.3], vec![0.3]];
        let err = ExtendedParams::new(hp, vec![0.1; 6], vec![0.2; 2], ragged).unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_sweep_hundred_items() {
        let base: Parametrization = ExtendedParams::linear_ramp(&hamiltonian(), 2, None)
            .unwrap()
            .into();
        let address: ParameterAddress = "betas[1][1]".parse().unwrap();
        let range = SweepRange::new(0.0, 2.0 * PI, 2.0 * PI / 100.0).unwrap();
        let sweep = ParameterIterator::new(&base, address.clone(), range).unwrap();

        let items: Vec<Parametrization> = sweep.iter().collect::<QaoaResult<_>>().unwrap();
        assert_eq!(items.len(), 100);
        for (item, value) in items.iter().zip(sweep.values()) {
            assert_eq!(address.get(item).unwrap(), value);
            let betas = item.as_extended().unwrap().betas();
            let base_betas = base.as_extended().unwrap().betas();
            assert_eq!(betas[[0, 0]], base_betas[[0, 0]]);
            assert_eq!(betas[[1, 0]], base_betas[[1, 0]]);
        }
    }

    #[test]
    fn test_nested_sweeps_no_cross_contamination() {
        let base: Parametrization = StandardParams::linear_ramp(&hamiltonian(), 2, None)
            .unwrap()
            .into();
        let outer = ParameterIterator::parse(&base, "betas[0]", SweepRange::with_count(0.0, PI, 5).unwrap())
            .unwrap();

        let mut seen = Vec::new();
        for outer_item in &outer {
            let outer_item = outer_item.unwrap();
            let inner = ParameterIterator::parse(
                &outer_item,
                "gammas[0]",
                SweepRange::with_count(0.0, PI, 5).unwrap(),
            )
            .unwrap();
            for item in &inner {
                let raw = item.unwrap().raw();
                seen.push((raw[0], raw[2]));
            }
            assert_eq!(inner.base(), &outer_item);
        }

        assert_eq!(seen.len(), 25);
        let mut unique = seen.clone();
        unique.sort_by(|a, b| a.partial_cmp(b).unwrap());
        unique.dedup();
        assert_eq!(unique.len(), 25);
    }

    #[test]
    fn test_extended_to_standard_always_fails() {
        let h = hamiltonian();
        for p in 1..4 {
            let extended: Parametrization = ExtendedParams::linear_ramp(&h, p, None).unwrap().into();
            let err = ConversionGraph::convert(&extended, ParamKind::Standard).unwrap_err();
            assert!(matches!(err, QaoaError::UnsupportedConversion { .. }));
        }
    }

    #[test]
    fn test_ramp_consistent_across_variants() {
        let h = hamiltonian();
        let standard: Parametrization = StandardParams::linear_ramp(&h, 4, Some(2.0)).unwrap().into();
        let annealing: Parametrization = AnnealingParams::linear_ramp(&h, 4, Some(2.0)).unwrap().into();
        let via_annealing = ConversionGraph::convert(&annealing, ParamKind::Standard).unwrap();

        for (a, b) in standard.raw().iter().zip(via_annealing.raw().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }

        // first-mode Fourier ramp is monotone like the linear ramp
        let fourier: Parametrization = FourierParams::linear_ramp(&h, 4, 1, Some(2.0)).unwrap().into();
        let via_fourier = ConversionGraph::convert(&fourier, ParamKind::Standard).unwrap();
        let fs = via_fourier.as_standard().unwrap();
        assert!(fs.betas().iter().all(|&b| b > 0.0));
        assert!(fs.gammas().iter().all(|&g| g > 0.0));
        assert!(fs.betas()[0] > fs.betas()[3]);
        assert!(fs.gammas()[0] < fs.gammas()[3]);
    }

    #[test]
    fn test_shared_hyperparams() {
        let h = hamiltonian();
        let hp = Arc::new(HyperParams::bind(&h, 2).unwrap());
        let a = StandardParams::with_linear_ramp(hp.clone(), None).unwrap();
        let b = StandardParams::new(hp.clone(), [0.0, 0.0], [0.0, 0.0]).unwrap();
        assert!(Arc::ptr_eq(a.hyperparams(), b.hyperparams()));
        assert_eq!(Arc::strong_count(&hp), 3);
    }
}
