//! Cost-function configuration
//!
//! Gantree: L7_Cost → CostConfig

use qaoa_core::QaoaResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cost-function configuration
/// Gantree: CostConfig // 비용 함수 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostConfig {
    /// Simulated measurement shots; 0 returns the exact expectation
    /// Gantree: nshots: u64 // 샷 수 (0 = 정확값)
    pub nshots: u64,

    /// Record every call in the call log
    /// Gantree: enable_logging: bool // 호출 기록
    pub enable_logging: bool,

    /// Upper bound on retained log entries; the oldest are dropped first
    pub max_log_entries: Option<usize>,

    /// Seed for sampling noise
    /// Gantree: seed: Option<u64> // 시드
    pub seed: Option<u64>,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            nshots: 0,
            enable_logging: false,
            max_log_entries: None,
            seed: None,
        }
    }
}

impl CostConfig {
    // ========================================================================
    // Presets
    // ========================================================================

    /// Exact expectation, every call logged
    pub fn logged() -> Self {
        Self::default().with_logging(true)
    }

    /// Reproducible sampling noise
    pub fn sampled(nshots: u64, seed: u64) -> Self {
        Self::default().with_nshots(nshots).with_seed(seed)
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set the number of simulated shots
    pub fn with_nshots(mut self, nshots: u64) -> Self {
        self.nshots = nshots;
        self
    }

    /// Enable or disable the call log
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Bound the call log to `max` entries
    pub fn with_max_log_entries(mut self, max: usize) -> Self {
        self.max_log_entries = Some(max);
        self
    }

    /// Fix the sampling-noise seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_log_entries == Some(0) {
            return Err("max_log_entries must be > 0".to_string());
        }

        if self.max_log_entries.is_some() && !self.enable_logging {
            return Err("max_log_entries requires enable_logging".to_string());
        }

        Ok(())
    }

    /// Check if sampling noise is added
    pub fn is_sampled(&self) -> bool {
        self.nshots > 0
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Serialize to JSON
    pub fn to_json(&self) -> QaoaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> QaoaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for CostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CostConfig(nshots={}, logging={}, seed={:?})",
            self.nshots, self.enable_logging, self.seed
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = CostConfig::default();
        assert_eq!(config.nshots, 0);
        assert!(!config.enable_logging);
        assert!(!config.is_sampled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = CostConfig::default()
            .with_nshots(1000)
            .with_logging(true)
            .with_max_log_entries(50)
            .with_seed(7);

        assert_eq!(config.nshots, 1000);
        assert_eq!(config.max_log_entries, Some(50));
        assert_eq!(config.seed, Some(7));
        assert!(config.is_sampled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(CostConfig::logged().with_max_log_entries(0).validate().is_err());
        assert!(CostConfig::default().with_max_log_entries(5).validate().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CostConfig::sampled(256, 42).with_logging(true);
        let json = config.to_json().unwrap();
        assert!(json.contains("\"nshots\": 256"));
        assert_eq!(CostConfig::from_json(&json).unwrap(), config);
        assert!(CostConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_display() {
        let config = CostConfig::sampled(10, 1);
        assert_eq!(
            config.to_string(),
            "CostConfig(nshots=10, logging=false, seed=Some(1))"
        );
    }
}
