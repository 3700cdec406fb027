//! Conversions between parametrizations
//!
//! Gantree: L4_Conversion → ConversionGraph
//!
//! Only exact mappings are edges:
//!
//! ```text
//! Annealing ─┐
//!            ├─► Standard ─► Extended
//! Fourier ───┘
//! ```
//!
//! Paths through several edges are composed. Extended is terminal, and
//! Standard never maps back to Annealing or Fourier: those would be fits,
//! not projections.

use crate::extended::ExtendedParams;
use crate::parametrization::{ParamKind, Parametrization};
use qaoa_core::{QaoaError, QaoaResult};
use std::collections::VecDeque;

/// Directed graph of exact conversions
/// Gantree: ConversionGraph // 변환 그래프
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionGraph;

impl ConversionGraph {
    /// Direct edges `(from, to)`
    pub const EDGES: [(ParamKind, ParamKind); 3] = [
        (ParamKind::Standard, ParamKind::Extended),
        (ParamKind::Annealing, ParamKind::Standard),
        (ParamKind::Fourier, ParamKind::Standard),
    ];

    /// Shortest chain of kinds from `from` to `to`, both ends included
    pub fn path(from: ParamKind, to: ParamKind) -> Option<Vec<ParamKind>> {
        let mut queue = VecDeque::from([vec![from]]);

        while let Some(path) = queue.pop_front() {
            let last = *path.last()?;
            if last == to {
                return Some(path);
            }
            for (_, next) in Self::EDGES.iter().filter(|(src, _)| *src == last) {
                if !path.contains(next) {
                    let mut extended = path.clone();
                    extended.push(*next);
                    queue.push_back(extended);
                }
            }
        }
        None
    }

    /// Check if `from` can be converted to `to`
    pub fn can_convert(from: ParamKind, to: ParamKind) -> bool {
        Self::path(from, to).is_some()
    }

    /// Convert `source` to the `target` variant
    ///
    /// The source is never modified. Converting to the same kind returns a
    /// deep copy.
    pub fn convert(source: &Parametrization, target: ParamKind) -> QaoaResult<Parametrization> {
        let from = source.kind();
        let path = Self::path(from, target).ok_or_else(|| QaoaError::UnsupportedConversion {
            from: from.to_string(),
            to: target.to_string(),
        })?;

        let mut current = source.clone();
        for next in path.into_iter().skip(1) {
            current = Self::step(&current, next)?;
        }
        log::debug!("converted {} parameters to {}", from, target);
        Ok(current)
    }

    fn step(source: &Parametrization, to: ParamKind) -> QaoaResult<Parametrization> {
        match (source, to) {
            (Parametrization::Standard(p), ParamKind::Extended) => {
                Ok(ExtendedParams::from_standard(p).into())
            }
            (Parametrization::Annealing(p), ParamKind::Standard) => Ok(p.to_standard().into()),
            (Parametrization::Fourier(p), ParamKind::Standard) => Ok(p.to_standard().into()),
            _ => Err(QaoaError::UnsupportedConversion {
                from: source.kind().to_string(),
                to: to.to_string(),
            }),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annealing::AnnealingParams;
    use crate::fourier::FourierParams;
    use crate::standard::StandardParams;
    use approx::assert_relative_eq;
    use qaoa_core::{HamiltonianModel, Term};

    fn hamiltonian() -> HamiltonianModel {
        HamiltonianModel::build(vec![
            Term::pair(0, 1, 0.7),
            Term::pair(0, 2, 1.2),
            Term::single(0, -0.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_paths() {
        use ParamKind::*;
        assert_eq!(ConversionGraph::path(Standard, Extended), Some(vec![Standard, Extended]));
        assert_eq!(
            ConversionGraph::path(Fourier, Extended),
            Some(vec![Fourier, Standard, Extended])
        );
        assert_eq!(ConversionGraph::path(Annealing, Annealing), Some(vec![Annealing]));
        assert_eq!(ConversionGraph::path(Extended, Standard), None);
        assert_eq!(ConversionGraph::path(Standard, Annealing), None);
        assert!(!ConversionGraph::can_convert(Annealing, Fourier));
    }

    #[test]
    fn test_extended_to_standard_unsupported() {
        let extended: Parametrization = ExtendedParams::linear_ramp(&hamiltonian(), 2, None)
            .unwrap()
            .into();
        let err = ConversionGraph::convert(&extended, ParamKind::Standard).unwrap_err();
        assert_eq!(
            err,
            QaoaError::UnsupportedConversion {
                from: "extended".to_string(),
                to: "standard".to_string(),
            }
        );
    }

    #[test]
    fn test_same_kind_is_copy() {
        let standard: Parametrization = StandardParams::linear_ramp(&hamiltonian(), 2, None)
            .unwrap()
            .into();
        let copy = ConversionGraph::convert(&standard, ParamKind::Standard).unwrap();
        assert_eq!(copy, standard);
    }

    #[test]
    fn test_standard_to_extended_rotation_angles_agree() {
        let standard: Parametrization = StandardParams::linear_ramp(&hamiltonian(), 3, None)
            .unwrap()
            .into();
        let extended = ConversionGraph::convert(&standard, ParamKind::Extended).unwrap();
        assert_eq!(extended.kind(), ParamKind::Extended);
        assert_eq!(extended.rotation_angles(), standard.rotation_angles());
    }

    #[test]
    fn test_annealing_to_extended_composes() {
        let annealing: Parametrization = AnnealingParams::linear_ramp(&hamiltonian(), 2, Some(1.0))
            .unwrap()
            .into();
        let extended = ConversionGraph::convert(&annealing, ParamKind::Extended).unwrap();
        let betas = extended.as_extended().unwrap().betas();
        assert_eq!(betas.row(0).to_vec(), vec![0.375; 3]);
        assert_eq!(betas.row(1).to_vec(), vec![0.125; 3]);
    }

    #[test]
    fn test_fourier_to_standard_preserves_angles() {
        let fourier: Parametrization = FourierParams::linear_ramp(&hamiltonian(), 4, 2, None)
            .unwrap()
            .into();
        let standard = ConversionGraph::convert(&fourier, ParamKind::Standard).unwrap();

        let a = fourier.rotation_angles();
        let b = standard.rotation_angles();
        for (x, y) in a.zz.iter().zip(b.zz.iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }
}
