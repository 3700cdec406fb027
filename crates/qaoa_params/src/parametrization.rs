//! Closed set of parametrizations
//!
//! Gantree: L3_Variants → Parametrization
//!
//! [`Parametrization`] wraps each variant and dispatches the shared surface:
//! flat-vector access, rotation angles and hyperparameters.

use crate::annealing::{AnnealingParams, AnnealingParamsRepr};
use crate::extended::{ExtendedParams, ExtendedParamsRepr};
use crate::fourier::{FourierParams, FourierParamsRepr};
use crate::hyperparams::HyperParams;
use crate::rotation::RotationAngles;
use crate::standard::{StandardParams, StandardParamsRepr};
use ndarray::Array2;
use qaoa_core::{ParamVec, QaoaError, QaoaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Validate a flat vector length before unpacking
pub(crate) fn check_raw_len(expected: usize, raw: &[f64]) -> QaoaResult<()> {
    if raw.len() != expected {
        return Err(QaoaError::RawLengthMismatch {
            expected,
            found: raw.len(),
        });
    }
    Ok(())
}

// ============================================================================
// ParamKind
// ============================================================================

/// Parametrization variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// One beta and one gamma per step
    Standard,
    /// One angle per operator per step
    Extended,
    /// Schedule values under a fixed total time
    Annealing,
    /// Frequency components of the step angles
    Fourier,
}

impl ParamKind {
    /// All variants
    pub const ALL: [ParamKind; 4] = [
        ParamKind::Standard,
        ParamKind::Extended,
        ParamKind::Annealing,
        ParamKind::Fourier,
    ];

    /// Lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Standard => "standard",
            ParamKind::Extended => "extended",
            ParamKind::Annealing => "annealing",
            ParamKind::Fourier => "fourier",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ParamKind {
    type Err = QaoaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ParamKind::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| QaoaError::InvalidConfig(format!("unknown parametrization '{}'", s)))
    }
}

// ============================================================================
// Parametrization
// ============================================================================

/// Any parametrization
/// Gantree: Parametrization // 파라미터화
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Parametrization {
    /// [`StandardParams`]
    Standard(StandardParams),
    /// [`ExtendedParams`]
    Extended(ExtendedParams),
    /// [`AnnealingParams`]
    Annealing(AnnealingParams),
    /// [`FourierParams`]
    Fourier(FourierParams),
}

/// Unchecked tagged form, so `from_json` can report the construction error
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ParametrizationRepr {
    Standard(StandardParamsRepr),
    Extended(ExtendedParamsRepr),
    Annealing(AnnealingParamsRepr),
    Fourier(FourierParamsRepr),
}

impl TryFrom<ParametrizationRepr> for Parametrization {
    type Error = QaoaError;

    fn try_from(repr: ParametrizationRepr) -> QaoaResult<Self> {
        Ok(match repr {
            ParametrizationRepr::Standard(p) => StandardParams::try_from(p)?.into(),
            ParametrizationRepr::Extended(p) => ExtendedParams::try_from(p)?.into(),
            ParametrizationRepr::Annealing(p) => AnnealingParams::try_from(p)?.into(),
            ParametrizationRepr::Fourier(p) => FourierParams::try_from(p)?.into(),
        })
    }
}

macro_rules! dispatch {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            Parametrization::Standard($p) => $body,
            Parametrization::Extended($p) => $body,
            Parametrization::Annealing($p) => $body,
            Parametrization::Fourier($p) => $body,
        }
    };
}

impl Parametrization {
    /// Restore from JSON written by `serde_json`
    ///
    /// Angle arrays are reshaped against the stored hyperparameters, so an
    /// inconsistent document fails with the same error the constructor gives.
    pub fn from_json(json: &str) -> QaoaResult<Self> {
        let repr: ParametrizationRepr = serde_json::from_str(json)?;
        Self::try_from(repr)
    }

    /// Variant tag
    pub fn kind(&self) -> ParamKind {
        match self {
            Parametrization::Standard(_) => ParamKind::Standard,
            Parametrization::Extended(_) => ParamKind::Extended,
            Parametrization::Annealing(_) => ParamKind::Annealing,
            Parametrization::Fourier(_) => ParamKind::Fourier,
        }
    }

    /// Shared hyperparameters
    pub fn hyperparams(&self) -> &Arc<HyperParams> {
        dispatch!(self, p => p.hyperparams())
    }

    /// Length of the flat vector
    pub fn n_raw(&self) -> usize {
        dispatch!(self, p => p.n_raw())
    }

    /// Flat vector in the variant's canonical layout
    pub fn raw(&self) -> ParamVec {
        dispatch!(self, p => p.raw())
    }

    /// Overwrite all variable angles from a flat vector
    pub fn update_from_raw(&mut self, raw: &[f64]) -> QaoaResult<()> {
        dispatch!(self, p => p.update_from_raw(raw))
    }

    /// Derive the per-operator rotation angles
    pub fn rotation_angles(&self) -> RotationAngles {
        dispatch!(self, p => p.rotation_angles())
    }

    /// Mixer rotation angles, `n_steps × |register|`
    pub fn x_rotation_angles(&self) -> Array2<f64> {
        dispatch!(self, p => p.x_rotation_angles())
    }

    /// Bias rotation angles, `n_steps × |qubits_singles|`
    pub fn z_rotation_angles(&self) -> Array2<f64> {
        dispatch!(self, p => p.z_rotation_angles())
    }

    /// Coupling rotation angles, `n_steps × |qubits_pairs|`
    pub fn zz_rotation_angles(&self) -> Array2<f64> {
        dispatch!(self, p => p.zz_rotation_angles())
    }

    /// Standard parameters, if that is the variant
    pub fn as_standard(&self) -> Option<&StandardParams> {
        match self {
            Parametrization::Standard(p) => Some(p),
            _ => None,
        }
    }

    /// Extended parameters, if that is the variant
    pub fn as_extended(&self) -> Option<&ExtendedParams> {
        match self {
            Parametrization::Extended(p) => Some(p),
            _ => None,
        }
    }

    /// Annealing parameters, if that is the variant
    pub fn as_annealing(&self) -> Option<&AnnealingParams> {
        match self {
            Parametrization::Annealing(p) => Some(p),
            _ => None,
        }
    }

    /// Fourier parameters, if that is the variant
    pub fn as_fourier(&self) -> Option<&FourierParams> {
        match self {
            Parametrization::Fourier(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for Parametrization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, p => write!(f, "{}", p))
    }
}

impl From<StandardParams> for Parametrization {
    fn from(p: StandardParams) -> Self {
        Parametrization::Standard(p)
    }
}

impl From<ExtendedParams> for Parametrization {
    fn from(p: ExtendedParams) -> Self {
        Parametrization::Extended(p)
    }
}

impl From<AnnealingParams> for Parametrization {
    fn from(p: AnnealingParams) -> Self {
        Parametrization::Annealing(p)
    }
}

impl From<FourierParams> for Parametrization {
    fn from(p: FourierParams) -> Self {
        Parametrization::Fourier(p)
    }
}

// ============================================================================
// Tests
// ============================================================================
