//! # QAOA Core
//!
//! Foundation types, errors, and cost Hamiltonians for QAOA parameter handling.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qaoa_core // L0+L1: Foundation + Model (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         CoreTypes // QubitId, QubitPair, ParamVec (완료)
//!         Constants // ramp/sweep/simulation 상수 (완료)
//!         Errors // QaoaError 분류 (완료)
//!     L1_Model // 비용 모델 (완료)
//!         HamiltonianModel // build(), parse, energy() (완료)
//!         HamiltonianGenerator // ring, complete, random (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qaoa_core::prelude::*;
//!
//! // H = 0.7·Z0Z1 + 1.2·Z0Z2 − 0.5·Z0
//! let hamiltonian = HamiltonianModel::build(vec![
//!     Term::pair(0, 1, 0.7),
//!     Term::pair(0, 2, 1.2),
//!     Term::single(0, -0.5),
//! ])
//! .unwrap();
//!
//! assert_eq!(hamiltonian.register(), &[0, 1, 2]);
//! assert_eq!(hamiltonian.to_string(), "-0.5*Z0 + 0.7*Z0*Z1 + 1.2*Z0*Z2");
//! ```
//!
//! ## Text Form
//!
//! ```rust
//! use qaoa_core::prelude::*;
//!
//! let h: HamiltonianModel = "0.5*Z0*Z1 + 0.5*Z1*Z2 - Z2".parse().unwrap();
//! assert_eq!(h.n_qubits(), 3);
//! assert_eq!(h.single_coeff(2), Some(-1.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Cost Hamiltonian (Gantree: L1_Model → HamiltonianModel)
pub mod hamiltonian;

/// Hamiltonian generators (Gantree: L1_Model → HamiltonianGenerator)
pub mod generators;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{ramp, simulation, sweep};
pub use error::{QaoaError, QaoaResult};
pub use generators::HamiltonianGenerator;
pub use hamiltonian::{HamiltonianModel, Term};
pub use types::{ParamVec, QubitId, QubitPair};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qaoa_core::prelude::*;
    //! ```

    pub use crate::constants::{ramp, simulation, sweep};
    pub use crate::error::{QaoaError, QaoaResult};
    pub use crate::generators::HamiltonianGenerator;
    pub use crate::hamiltonian::{HamiltonianModel, Term};
    pub use crate::types::{ParamVec, QubitId, QubitPair};
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

    #[test]
    fn test_parse_matches_build() {
        let parsed: HamiltonianModel = "0.7*Z0*Z1 + 1.2*Z0*Z2 - 0.5*Z0".parse().unwrap();
        let built = HamiltonianModel::build(vec![
            Term::pair(0, 1, 0.7),
            Term::pair(0, 2, 1.2),
            Term::single(0, -0.5),
        ])
        .unwrap();
        assert_eq!(parsed, built);
    }

    #[test]
    fn test_serde_roundtrip() {
        let h = HamiltonianGenerator::with_seed(3).random(4, 0.7).unwrap();
        let json = serde_json::to_string(&h).unwrap();
        let back: HamiltonianModel = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }

    #[test]
    fn test_ring_ground_energy() {
        // Alternating spins minimize an even ring of disagrees
        let h = HamiltonianGenerator::new().ring_of_disagrees(4).unwrap();
        let e = h.energy(|q| if q % 2 == 0 { 1.0 } else { -1.0 });
        assert_relative_eq!(e, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_errors_are_construction_errors() {
        let err = HamiltonianModel::build(vec![Term::new(vec![0, 1, 2], 1.0)]).unwrap_err();
        assert!(err.is_construction_error());
    }
}
