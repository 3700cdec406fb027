//! Shape reconciliation for caller-supplied angle arrays
//!
//! Gantree: L2_Params → ShapeReconciler
//!
//! Decision table applied by [`ShapeReconciler::reconcile`] against a target
//! shape `(n_steps, k)`:
//!
//! | input                          | condition                    | result                  |
//! |--------------------------------|------------------------------|-------------------------|
//! | flat (scalar, slice, `Vec`)    | `len == n_steps·k`           | reshaped row-major      |
//! | nested, rectangular            | `rows·cols == n_steps·k`     | reshaped row-major      |
//! | nested, ragged                 | any                          | `ShapeMismatch`         |
//! | any                            | element count differs        | `ShapeMismatch`         |
//!
//! Ragged input is rejected even when its element count happens to match:
//! the row grouping the caller wrote disagrees with every rectangular shape,
//! which almost always signals a systematic mistake.

use ndarray::{Array1, Array2};
use qaoa_core::{QaoaError, QaoaResult};

// ============================================================================
// AngleInput
// ============================================================================

/// Array-like angle input of arbitrary nesting
#[derive(Debug, Clone, PartialEq)]
pub enum AngleInput {
    /// Scalar or one-dimensional data
    Flat(Vec<f64>),
    /// Rows of data, possibly ragged
    Nested(Vec<Vec<f64>>),
}

impl AngleInput {
    /// Total element count
    pub fn len(&self) -> usize {
        match self {
            AngleInput::Flat(v) => v.len(),
            AngleInput::Nested(rows) => rows.iter().map(Vec::len).sum(),
        }
    }

    /// Check if there are no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if nested rows have differing lengths
    pub fn is_ragged(&self) -> bool {
        match self {
            AngleInput::Flat(_) => false,
            AngleInput::Nested(rows) => rows.windows(2).any(|w| w[0].len() != w[1].len()),
        }
    }

    fn describe(&self) -> String {
        match self {
            AngleInput::Flat(v) => format!("flat array of {} elements", v.len()),
            AngleInput::Nested(rows) if self.is_ragged() => {
                let lengths: Vec<usize> = rows.iter().map(Vec::len).collect();
                format!("ragged rows of lengths {:?}", lengths)
            }
            AngleInput::Nested(rows) => format!(
                "nested array of shape ({}, {})",
                rows.len(),
                rows.first().map_or(0, Vec::len)
            ),
        }
    }

    fn into_flat(self) -> Vec<f64> {
        match self {
            AngleInput::Flat(v) => v,
            AngleInput::Nested(rows) => rows.into_iter().flatten().collect(),
        }
    }
}

impl From<f64> for AngleInput {
    fn from(value: f64) -> Self {
        AngleInput::Flat(vec![value])
    }
}

impl From<Vec<f64>> for AngleInput {
    fn from(values: Vec<f64>) -> Self {
        AngleInput::Flat(values)
    }
}

impl From<&Vec<f64>> for AngleInput {
    fn from(values: &Vec<f64>) -> Self {
        AngleInput::Flat(values.clone())
    }
}

impl From<&[f64]> for AngleInput {
    fn from(values: &[f64]) -> Self {
        AngleInput::Flat(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for AngleInput {
    fn from(values: [f64; N]) -> Self {
        AngleInput::Flat(values.to_vec())
    }
}

impl<const N: usize> From<&[f64; N]> for AngleInput {
    fn from(values: &[f64; N]) -> Self {
        AngleInput::Flat(values.to_vec())
    }
}

impl From<Vec<Vec<f64>>> for AngleInput {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        AngleInput::Nested(rows)
    }
}

impl<const N: usize> From<Vec<[f64; N]>> for AngleInput {
    fn from(rows: Vec<[f64; N]>) -> Self {
        AngleInput::Nested(rows.into_iter().map(|r| r.to_vec()).collect())
    }
}

impl<const N: usize, const M: usize> From<[[f64; N]; M]> for AngleInput {
    fn from(rows: [[f64; N]; M]) -> Self {
        AngleInput::Nested(rows.iter().map(|r| r.to_vec()).collect())
    }
}

impl From<Array1<f64>> for AngleInput {
    fn from(values: Array1<f64>) -> Self {
        AngleInput::Flat(values.to_vec())
    }
}

impl From<&Array1<f64>> for AngleInput {
    fn from(values: &Array1<f64>) -> Self {
        AngleInput::Flat(values.to_vec())
    }
}

impl From<Array2<f64>> for AngleInput {
    fn from(values: Array2<f64>) -> Self {
        AngleInput::from(&values)
    }
}

impl From<&Array2<f64>> for AngleInput {
    fn from(values: &Array2<f64>) -> Self {
        AngleInput::Nested(values.rows().into_iter().map(|r| r.to_vec()).collect())
    }
}

// ============================================================================
// ShapeReconciler
// ============================================================================

/// Reconciles angle input against a hyperparameter-implied shape
/// Gantree: ShapeReconciler // 형상 조정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeReconciler {
    name: &'static str,
    n_steps: usize,
    width: usize,
}

impl ShapeReconciler {
    /// Target shape `(n_steps, width)` for the array called `name`
    pub fn new(name: &'static str, n_steps: usize, width: usize) -> Self {
        Self {
            name,
            n_steps,
            width,
        }
    }

    /// Expected `(n_steps, k)` shape
    pub fn expected(&self) -> (usize, usize) {
        (self.n_steps, self.width)
    }

    /// Expected element count
    pub fn expected_len(&self) -> usize {
        self.n_steps * self.width
    }

    /// Apply the decision table without consuming the input
    pub fn check(&self, input: &AngleInput) -> QaoaResult<()> {
        if input.is_ragged() || input.len() != self.expected_len() {
            return Err(QaoaError::ShapeMismatch {
                name: self.name.to_string(),
                expected: self.expected(),
                found: input.describe(),
            });
        }
        Ok(())
    }

    /// Reconcile to an `(n_steps, k)` matrix, step-major
    pub fn reconcile(&self, input: impl Into<AngleInput>) -> QaoaResult<Array2<f64>> {
        let input = input.into();
        self.check(&input)?;

        Array2::from_shape_vec(self.expected(), input.into_flat()).map_err(|e| {
            QaoaError::ShapeMismatch {
                name: self.name.to_string(),
                expected: self.expected(),
                found: e.to_string(),
            }
        })
    }

    /// Reconcile to a flat vector of `n_steps·k` elements
    pub fn reconcile_vector(&self, input: impl Into<AngleInput>) -> QaoaResult<Array1<f64>> {
        let input = input.into();
        self.check(&input)?;
        Ok(Array1::from_vec(input.into_flat()))
    }
}

// ============================================================================
// Tests
// ============================================================================
