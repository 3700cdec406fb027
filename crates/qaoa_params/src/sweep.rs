//! Landscape sweeps over one variable angle
//!
//! Gantree: L5_Sweep → ParameterIterator
//!
//! A sweep overwrites a single addressed angle of a base parametrization with
//! each value of a [`SweepRange`]. Every item is an independent deep copy, so
//! sweeps can be nested to build Cartesian grids.

use crate::address::ParameterAddress;
use crate::parametrization::Parametrization;
use qaoa_core::{sweep, QaoaError, QaoaResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// SweepRange
// ============================================================================

/// Half-open range `[start, stop)` walked in fixed steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SweepRangeRepr")]
pub struct SweepRange {
    start: f64,
    stop: f64,
    step: f64,
}

#[derive(Deserialize)]
struct SweepRangeRepr {
    start: f64,
    stop: f64,
    step: f64,
}

impl TryFrom<SweepRangeRepr> for SweepRange {
    type Error = QaoaError;

    fn try_from(repr: SweepRangeRepr) -> QaoaResult<Self> {
        Self::new(repr.start, repr.stop, repr.step)
    }
}

impl SweepRange {
    /// Create a range; `step` must be positive, all bounds finite and the
    /// value count at most [`sweep::MAX_POINTS`]
    pub fn new(start: f64, stop: f64, step: f64) -> QaoaResult<Self> {
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(QaoaError::InvalidSweepRange(format!(
                "non-finite bounds ({}, {}, {})",
                start, stop, step
            )));
        }
        if step <= 0.0 {
            return Err(QaoaError::InvalidSweepRange(format!(
                "step must be positive, got {}",
                step
            )));
        }

        let count = (stop - start) / step;
        if count.is_nan() || count > sweep::MAX_POINTS as f64 {
            return Err(QaoaError::InvalidSweepRange(format!(
                "[{}, {}) step {} spans {} values, limit is {}",
                start,
                stop,
                step,
                count,
                sweep::MAX_POINTS
            )));
        }
        Ok(Self { start, stop, step })
    }

    /// `n` equally spaced values over `[start, stop)`
    pub fn with_count(start: f64, stop: f64, n: usize) -> QaoaResult<Self> {
        if n == 0 {
            return Err(QaoaError::InvalidSweepRange("zero sweep points".to_string()));
        }
        Self::new(start, stop, (stop - start) / n as f64)
    }

    /// First value
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Exclusive upper bound
    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Distance between consecutive values
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of values
    pub fn len(&self) -> usize {
        let span = (self.stop - self.start) / self.step - sweep::STOP_TOLERANCE;
        if span <= 0.0 {
            0
        } else {
            span.ceil() as usize
        }
    }

    /// Check if the range holds no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at position `i`
    pub fn value(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    /// All values, in order
    pub fn values(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.value(i)).collect()
    }
}

impl fmt::Display for SweepRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) step {}", self.start, self.stop, self.step)
    }
}

// ============================================================================
// ParameterIterator
// ============================================================================

/// Sweep of one addressed angle over a range
/// Gantree: ParameterIterator // 파라미터 스윕
#[derive(Debug, Clone)]
pub struct ParameterIterator {
    base: Parametrization,
    address: ParameterAddress,
    range: SweepRange,
}

impl ParameterIterator {
    /// Create a sweep; the address is validated against `base` here
    pub fn new(
        base: &Parametrization,
        address: ParameterAddress,
        range: SweepRange,
    ) -> QaoaResult<Self> {
        address.resolve(base)?;
        Ok(Self {
            base: base.clone(),
            address,
            range,
        })
    }

    /// Parse the address, then create the sweep
    pub fn parse(base: &Parametrization, address: &str, range: SweepRange) -> QaoaResult<Self> {
        Self::new(base, address.parse()?, range)
    }

    /// Parametrization every item is copied from
    pub fn base(&self) -> &Parametrization {
        &self.base
    }

    /// Swept angle
    pub fn address(&self) -> &ParameterAddress {
        &self.address
    }

    /// Swept values
    pub fn range(&self) -> &SweepRange {
        &self.range
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Check if the sweep yields nothing
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Swept values, in order
    pub fn values(&self) -> Vec<f64> {
        self.range.values()
    }

    /// Fresh pass over the sweep
    pub fn iter(&self) -> SweepIter<'_> {
        SweepIter {
            sweep: self,
            position: 0,
        }
    }
}

impl<'a> IntoIterator for &'a ParameterIterator {
    type Item = QaoaResult<Parametrization>;
    type IntoIter = SweepIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ParameterIterator {
    type Item = QaoaResult<Parametrization>;
    type IntoIter = std::vec::IntoIter<QaoaResult<Parametrization>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter().collect::<Vec<_>>().into_iter()
    }
}

/// Iterator over the parametrizations of one sweep
///
/// Yields exactly [`ParameterIterator::len`] items. Each is the base with the
/// addressed angle overwritten, or the error that write raised.
#[derive(Debug, Clone)]
pub struct SweepIter<'a> {
    sweep: &'a ParameterIterator,
    position: usize,
}

impl Iterator for SweepIter<'_> {
    type Item = QaoaResult<Parametrization>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.sweep.len() {
            return None;
        }
        let value = self.sweep.range.value(self.position);
        self.position += 1;
        log::trace!("sweep {} = {}", self.sweep.address, value);

        let mut params = self.sweep.base.clone();
        Some(self.sweep.address.set(&mut params, value).map(|()| params))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sweep.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SweepIter<'_> {}

// ============================================================================
// Tests
// ============================================================================
