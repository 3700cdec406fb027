//! Cost landscape scans
//!
//! Gantree: L7_Cost → Landscape
//!
//! Evaluates a cost function over one or two parameter sweeps.

use crate::cost_function::CostFunctionAdapter;
use crate::evaluator::Evaluator;
use ndarray::Array2;
use qaoa_core::QaoaResult;
use qaoa_params::{ParameterAddress, ParameterIterator, SweepRange};
use serde::{Deserialize, Serialize};

/// Two-dimensional cost landscape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landscape {
    /// Outer sweep values (rows)
    pub x_values: Vec<f64>,

    /// Inner sweep values (columns)
    pub y_values: Vec<f64>,

    /// `values[[i, j]]` is the cost at `(x_values[i], y_values[j])`
    pub values: Array2<f64>,
}

impl Landscape {
    /// Grid point with the lowest cost as `(x, y, value)`
    pub fn minimum(&self) -> Option<(f64, f64, f64)> {
        self.values
            .indexed_iter()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|((i, j), &v)| (self.x_values[i], self.y_values[j], v))
    }
}

/// Cost at every item of `sweep`, as `(value, cost)` pairs
pub fn scan_1d<E: Evaluator>(
    cost: &mut CostFunctionAdapter<E>,
    sweep: &ParameterIterator,
) -> QaoaResult<Vec<(f64, f64)>> {
    sweep
        .values()
        .into_iter()
        .zip(sweep.iter())
        .map(|(x, params)| Ok((x, cost.evaluate_params(&params?)?)))
        .collect()
}

/// Cost over the Cartesian product of `outer` and an inner sweep
pub fn scan_2d<E: Evaluator>(
    cost: &mut CostFunctionAdapter<E>,
    outer: &ParameterIterator,
    inner_address: &ParameterAddress,
    inner_range: SweepRange,
) -> QaoaResult<Landscape> {
    let x_values = outer.values();
    let y_values = inner_range.values();
    let mut values = Array2::zeros((x_values.len(), y_values.len()));

    for (i, outer_item) in outer.iter().enumerate() {
        let inner = ParameterIterator::new(&outer_item?, inner_address.clone(), inner_range)?;
        for (j, params) in inner.iter().enumerate() {
            values[[i, j]] = cost.evaluate_params(&params?)?;
        }
    }
    log::debug!(
        "scanned {} × {} landscape over {} and {}",
        x_values.len(),
        y_values.len(),
        outer.address(),
        inner_address
    );

    Ok(Landscape {
        x_values,
        y_values,
        values,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::WavefunctionSimulator;
    use approx::assert_relative_eq;
    use qaoa_core::HamiltonianModel;
    use qaoa_params::{Parametrization, StandardParams};
    use std::f64::consts::PI;

    fn setup() -> (CostFunctionAdapter<WavefunctionSimulator>, Parametrization) {
        let h: HamiltonianModel = "Z0".parse().unwrap();
        let params: Parametrization = StandardParams::linear_ramp(&h, 1, None).unwrap().into();
        let cost = CostFunctionAdapter::new(h, params.clone(), WavefunctionSimulator::new()).unwrap();
        (cost, params)
    }

    #[test]
    fn test_scan_1d_matches_closed_form() {
        let (mut cost, base) = setup();
        let sweep =
            ParameterIterator::parse(&base, "betas", SweepRange::with_count(0.0, PI, 8).unwrap())
                .unwrap();
        let gamma = base.as_standard().unwrap().gammas()[0];

        let scan = scan_1d(&mut cost, &sweep).unwrap();
        assert_eq!(scan.len(), 8);
        for (beta, value) in scan {
            let expected = -(2.0 * beta).sin() * (2.0 * gamma).sin();
            assert_relative_eq!(value, expected, epsilon = 1e-12);
        }
        assert_eq!(cost.parametrization(), &base);
    }

    #[test]
    fn test_scan_2d_grid() {
        let (mut cost, base) = setup();
        let outer =
            ParameterIterator::parse(&base, "betas", SweepRange::with_count(0.0, PI / 2.0, 4).unwrap())
                .unwrap();
        let inner_address: ParameterAddress = "gammas".parse().unwrap();
        let inner_range = SweepRange::with_count(0.0, PI / 2.0, 6).unwrap();

        let landscape = scan_2d(&mut cost, &outer, &inner_address, inner_range).unwrap();
        assert_eq!(landscape.values.dim(), (4, 6));
        for (i, &beta) in landscape.x_values.iter().enumerate() {
            for (j, &gamma) in landscape.y_values.iter().enumerate() {
                let expected = -(2.0 * beta).sin() * (2.0 * gamma).sin();
                assert_relative_eq!(landscape.values[[i, j]], expected, epsilon = 1e-12);
            }
        }

        // β = γ = π/4 reaches the ground energy −1
        let (x, y, v) = landscape.minimum().unwrap();
        assert_relative_eq!(x, PI / 4.0, epsilon = 1e-12);
        assert_relative_eq!(y, PI / 4.0, epsilon = 1e-12);
        assert_relative_eq!(v, -1.0, epsilon = 1e-12);
        assert_eq!(cost.n_calls(), 24);
    }
}
