//! Constants for QAOA parameter handling
//!
//! Gantree: L0_Foundation → Constants

/// Linear-ramp initialization constants
pub mod ramp {
    /// Default annealing time per QAOA step: `time = 0.7 × n_steps`
    pub const TIME_PER_STEP: f64 = 0.7;

    /// Default total ramp time for `n_steps` steps
    #[inline]
    pub fn default_time(n_steps: usize) -> f64 {
        TIME_PER_STEP * n_steps as f64
    }
}

/// Parameter sweep constants
pub mod sweep {
    /// Fraction of a step below `stop` that still counts as reaching `stop`
    pub const STOP_TOLERANCE: f64 = 1e-10;

    /// Most values a single sweep range may hold
    pub const MAX_POINTS: usize = 1 << 24;
}

/// Simulation limits for the reference evaluator
pub mod simulation {
    /// Largest register the wavefunction simulator accepts
    pub const MAX_QUBITS: usize = 24;
}
