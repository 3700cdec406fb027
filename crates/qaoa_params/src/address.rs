//! Parameter addresses
//!
//! Gantree: L5_Sweep → ParameterAddress
//!
//! Grammar: `<kind>`, `<kind>[i]` or `<kind>[i][j]`, e.g. `"betas[1][1]"`.
//! Parsing only checks syntax. [`ParameterAddress::resolve`] checks the
//! address against a concrete parametrization and maps it to a position in
//! that parametrization's flat vector.

use crate::parametrization::{ParamKind, Parametrization};
use qaoa_core::{QaoaError, QaoaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// AngleKind
// ============================================================================

/// Named angle array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleKind {
    /// Mixer angles (standard, extended)
    Betas,
    /// Cost angles (standard)
    Gammas,
    /// Bias angles (extended)
    GammasSingles,
    /// Coupling angles (extended)
    GammasPairs,
    /// Schedule values (annealing)
    Schedule,
    /// Cost coefficients (fourier)
    U,
    /// Mixer coefficients (fourier)
    V,
}

impl AngleKind {
    /// All array names
    pub const ALL: [AngleKind; 7] = [
        AngleKind::Betas,
        AngleKind::Gammas,
        AngleKind::GammasSingles,
        AngleKind::GammasPairs,
        AngleKind::Schedule,
        AngleKind::U,
        AngleKind::V,
    ];

    /// Name as written in an address
    pub fn name(&self) -> &'static str {
        match self {
            AngleKind::Betas => "betas",
            AngleKind::Gammas => "gammas",
            AngleKind::GammasSingles => "gammas_singles",
            AngleKind::GammasPairs => "gammas_pairs",
            AngleKind::Schedule => "schedule",
            AngleKind::U => "u",
            AngleKind::V => "v",
        }
    }
}

impl fmt::Display for AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// ParameterAddress
// ============================================================================

/// Address of one variable angle
/// Gantree: ParameterAddress // 파라미터 주소
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterAddress {
    kind: AngleKind,
    indices: Vec<usize>,
}

/// Layout of one named array within a flat vector
struct Slot {
    offset: usize,
    shape: Vec<usize>,
}

impl ParameterAddress {
    /// Address `kind[indices[0]][indices[1]]…`; checked only by [`Self::resolve`]
    pub fn new(kind: AngleKind, indices: Vec<usize>) -> Self {
        Self { kind, indices }
    }

    /// Addressed array
    pub fn kind(&self) -> AngleKind {
        self.kind
    }

    /// Indices into the addressed array, outermost first
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    fn invalid(&self, reason: impl fmt::Display) -> QaoaError {
        QaoaError::InvalidParameterAddress(format!("'{}': {}", self, reason))
    }

    fn slot(&self, params: &Parametrization) -> QaoaResult<Slot> {
        let hp = params.hyperparams();
        let p = hp.n_steps();
        let (n, s, m) = (hp.n_qubits(), hp.n_singles(), hp.n_pairs());

        let layout = |offset: usize, shape: &[usize]| -> QaoaResult<Slot> {
            Ok(Slot {
                offset,
                shape: shape.to_vec(),
            })
        };

        match (params, self.kind) {
            (Parametrization::Standard(_), AngleKind::Betas) => layout(0, &[p]),
            (Parametrization::Standard(_), AngleKind::Gammas) => layout(p, &[p]),
            (Parametrization::Extended(_), AngleKind::Betas) => layout(0, &[p, n]),
            (Parametrization::Extended(_), AngleKind::GammasSingles) => layout(p * n, &[p, s]),
            (Parametrization::Extended(_), AngleKind::GammasPairs) => {
                layout(p * (n + s), &[p, m])
            }
            (Parametrization::Annealing(_), AngleKind::Schedule) => layout(0, &[p]),
            (Parametrization::Fourier(f), AngleKind::V) => layout(0, &[f.q()]),
            (Parametrization::Fourier(f), AngleKind::U) => layout(f.q(), &[f.q()]),
            _ => {
                let owners: Vec<&str> = self.applies_to().iter().map(ParamKind::name).collect();
                Err(self.invalid(format!(
                    "no '{}' array in {} parameters (only {})",
                    self.kind,
                    params.kind(),
                    owners.join(", ")
                )))
            }
        }
    }

    /// Position of the addressed angle in `params.raw()`
    pub fn resolve(&self, params: &Parametrization) -> QaoaResult<usize> {
        let slot = self.slot(params)?;

        if self.indices.len() > slot.shape.len() {
            return Err(self.invalid(format!(
                "{} indices for a {}-dimensional array",
                self.indices.len(),
                slot.shape.len()
            )));
        }

        let mut flat = 0;
        for (axis, &extent) in slot.shape.iter().enumerate() {
            let index = match self.indices.get(axis) {
                Some(&i) if i < extent => i,
                Some(&i) => {
                    return Err(self.invalid(format!(
                        "index {} out of bounds for axis {} of extent {}",
                        i, axis, extent
                    )))
                }
                None if extent == 1 => 0,
                None => {
                    return Err(self.invalid(format!(
                        "missing index for axis {} of extent {}",
                        axis, extent
                    )))
                }
            };
            flat = flat * extent + index;
        }

        Ok(slot.offset + flat)
    }

    /// Read the addressed angle
    pub fn get(&self, params: &Parametrization) -> QaoaResult<f64> {
        let index = self.resolve(params)?;
        params
            .raw()
            .get(index)
            .copied()
            .ok_or_else(|| self.invalid("outside the flat vector"))
    }

    /// Overwrite the addressed angle
    pub fn set(&self, params: &mut Parametrization, value: f64) -> QaoaResult<()> {
        let index = self.resolve(params)?;
        let mut raw = params.raw();
        match raw.get_mut(index) {
            Some(slot) => *slot = value,
            None => return Err(self.invalid("outside the flat vector")),
        }
        params.update_from_raw(&raw)
    }

    /// Variants that carry this address's array
    pub fn applies_to(&self) -> &'static [ParamKind] {
        match self.kind {
            AngleKind::Betas => &[ParamKind::Standard, ParamKind::Extended],
            AngleKind::Gammas => &[ParamKind::Standard],
            AngleKind::GammasSingles | AngleKind::GammasPairs => &[ParamKind::Extended],
            AngleKind::Schedule => &[ParamKind::Annealing],
            AngleKind::U | AngleKind::V => &[ParamKind::Fourier],
        }
    }
}

impl fmt::Display for ParameterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for i in &self.indices {
            write!(f, "[{}]", i)?;
        }
        Ok(())
    }
}

impl FromStr for ParameterAddress {
    type Err = QaoaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = |reason: &str| {
            QaoaError::InvalidParameterAddress(format!("'{}': {}", text, reason))
        };

        let (name, mut rest) = match text.find('[') {
            Some(pos) => text.split_at(pos),
            None => (text, ""),
        };
        let kind = AngleKind::ALL
            .into_iter()
            .find(|k| k.name() == name)
            .ok_or_else(|| invalid("unknown angle array"))?;

        let mut indices = Vec::new();
        while !rest.is_empty() {
            let inner = rest
                .strip_prefix('[')
                .ok_or_else(|| invalid("expected '['"))?;
            let close = inner.find(']').ok_or_else(|| invalid("unclosed '['"))?;
            let index = inner[..close]
                .trim()
                .parse::<usize>()
                .map_err(|_| invalid("index is not a non-negative integer"))?;
            indices.push(index);
            rest = &inner[close + 1..];
        }

        Ok(Self { kind, indices })
    }
}

// ============================================================================
// Tests
// ============================================================================
