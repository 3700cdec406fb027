//! Cost Hamiltonian model
//!
//! Gantree: L1_Model → HamiltonianModel
//!
//! An Ising-type cost objective `C = c + Σ h_j Z_j + Σ g_jk Z_j Z_k` over an
//! ordered register of qubits. Coupling coefficients are stored exactly as
//! given; any ½ convention of a source model has to be folded into `g_jk`
//! before the terms are handed to [`HamiltonianModel::build`].

use crate::error::{QaoaError, QaoaResult};
use crate::types::{QubitId, QubitPair};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Term
// ============================================================================

/// A weighted product of at most two Pauli-Z operators
///
/// Zero qubits is an identity (constant) term, one qubit a bias term and two
/// qubits a coupling term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Qubits acted on
    pub qubits: Vec<QubitId>,

    /// Real coefficient
    pub weight: f64,
}

impl Term {
    /// Create a term from raw parts
    pub fn new(qubits: Vec<QubitId>, weight: f64) -> Self {
        Self { qubits, weight }
    }

    /// Identity term
    pub fn constant(weight: f64) -> Self {
        Self::new(Vec::new(), weight)
    }

    /// Bias term `weight·Z_q`
    pub fn single(qubit: QubitId, weight: f64) -> Self {
        Self::new(vec![qubit], weight)
    }

    /// Coupling term `weight·Z_i Z_j`
    pub fn pair(i: QubitId, j: QubitId, weight: f64) -> Self {
        Self::new(vec![i, j], weight)
    }
}

// ============================================================================
// HamiltonianModel
// ============================================================================

/// Immutable diagonal cost Hamiltonian
/// Gantree: HamiltonianModel // 비용 해밀토니안
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HamiltonianRepr")]
pub struct HamiltonianModel {
    /// Sorted set of every referenced qubit
    register: Vec<QubitId>,

    /// Bias terms in first-seen order
    singles: Vec<(QubitId, f64)>,

    /// Coupling terms in first-seen order
    pairs: Vec<(QubitPair, f64)>,

    /// Identity offset
    constant: f64,
}

impl HamiltonianModel {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Build from a term list, summing duplicate terms
    /// Gantree: build(terms) -> Result<Self> // 생성+검증
    pub fn build<I>(terms: I) -> QaoaResult<Self>
    where
        I: IntoIterator<Item = Term>,
    {
        let mut register = BTreeSet::new();
        let mut singles: Vec<(QubitId, f64)> = Vec::new();
        let mut pairs: Vec<(QubitPair, f64)> = Vec::new();
        let mut single_index: HashMap<QubitId, usize> = HashMap::new();
        let mut pair_index: HashMap<QubitPair, usize> = HashMap::new();
        let mut constant = 0.0;

        for term in terms {
            if !term.weight.is_finite() {
                return Err(QaoaError::MalformedHamiltonian(format!(
                    "term on qubits {:?} has non-finite weight {}",
                    term.qubits, term.weight
                )));
            }

            match term.qubits.as_slice() {
                [] => constant += term.weight,
                [q] => {
                    register.insert(*q);
                    match single_index.get(q) {
                        Some(&i) => singles[i].1 += term.weight,
                        None => {
                            single_index.insert(*q, singles.len());
                            singles.push((*q, term.weight));
                        }
                    }
                }
                [a, b] => {
                    let pair = QubitPair::new(*a, *b)?;
                    register.insert(*a);
                    register.insert(*b);
                    match pair_index.get(&pair) {
                        Some(&i) => pairs[i].1 += term.weight,
                        None => {
                            pair_index.insert(pair, pairs.len());
                            pairs.push((pair, term.weight));
                        }
                    }
                }
                qubits => {
                    let distinct: BTreeSet<_> = qubits.iter().collect();
                    let reason = if distinct.len() > 2 {
                        format!(
                            "term references {} distinct qubits {:?}; at most 2 are allowed",
                            distinct.len(),
                            qubits
                        )
                    } else {
                        format!("term repeats a qubit index: {:?}", qubits)
                    };
                    return Err(QaoaError::MalformedHamiltonian(reason));
                }
            }
        }

        Ok(Self {
            register: register.into_iter().collect(),
            singles,
            pairs,
            constant,
        })
    }

    /// Build a MaxCut-style Hamiltonian from weighted edges
    pub fn from_graph(edges: &[(QubitId, QubitId, f64)]) -> QaoaResult<Self> {
        Self::build(edges.iter().map(|&(i, j, w)| Term::pair(i, j, w)))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Sorted qubit register
    pub fn register(&self) -> &[QubitId] {
        &self.register
    }

    /// Number of qubits in the register
    pub fn n_qubits(&self) -> usize {
        self.register.len()
    }

    /// Bias terms `(qubit, h)` in first-seen order
    pub fn singles(&self) -> &[(QubitId, f64)] {
        &self.singles
    }

    /// Coupling terms `(pair, g)` in first-seen order
    pub fn pairs(&self) -> &[(QubitPair, f64)] {
        &self.pairs
    }

    /// Identity offset
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Bias coefficient of `qubit`, if it has one
    pub fn single_coeff(&self, qubit: QubitId) -> Option<f64> {
        self.singles
            .iter()
            .find(|(q, _)| *q == qubit)
            .map(|&(_, h)| h)
    }

    /// Coupling coefficient between `i` and `j`, if there is one
    pub fn pair_coeff(&self, i: QubitId, j: QubitId) -> Option<f64> {
        let pair = QubitPair::new(i, j).ok()?;
        self.pairs
            .iter()
            .find(|(p, _)| *p == pair)
            .map(|&(_, g)| g)
    }

    /// Number of non-identity terms
    pub fn n_terms(&self) -> usize {
        self.singles.len() + self.pairs.len()
    }

    /// Check if there are no non-identity terms
    pub fn is_empty(&self) -> bool {
        self.n_terms() == 0
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Diagonal energy for a spin assignment (`spin(q)` is ±1)
    pub fn energy<F>(&self, spin: F) -> f64
    where
        F: Fn(QubitId) -> f64,
    {
        let bias: f64 = self.singles.iter().map(|&(q, h)| h * spin(q)).sum();
        let coupling: f64 = self
            .pairs
            .iter()
            .map(|&(p, g)| g * spin(p.first()) * spin(p.second()))
            .sum();
        self.constant + bias + coupling
    }
}

// ============================================================================
// Serde Form
// ============================================================================

/// Stored fields, rebuilt through [`HamiltonianModel::build`] when read back
#[derive(Deserialize)]
struct HamiltonianRepr {
    register: Vec<QubitId>,
    singles: Vec<(QubitId, f64)>,
    pairs: Vec<(QubitPair, f64)>,
    constant: f64,
}

impl TryFrom<HamiltonianRepr> for HamiltonianModel {
    type Error = QaoaError;

    fn try_from(repr: HamiltonianRepr) -> QaoaResult<Self> {
        let terms = std::iter::once(Term::constant(repr.constant))
            .chain(repr.singles.iter().map(|&(q, h)| Term::single(q, h)))
            .chain(
                repr.pairs
                    .iter()
                    .map(|&(p, g)| Term::pair(p.first(), p.second(), g)),
            );
        let model = Self::build(terms)?;

        if model.register != repr.register {
            return Err(QaoaError::MalformedHamiltonian(format!(
                "stored register {:?} does not match the qubits {:?} of its terms",
                repr.register, model.register
            )));
        }
        if model.singles.len() != repr.singles.len() || model.pairs.len() != repr.pairs.len() {
            return Err(QaoaError::MalformedHamiltonian(
                "stored terms repeat a bias qubit or a coupled pair".into(),
            ));
        }
        Ok(model)
    }
}

// ============================================================================
// Text Form
// ============================================================================

impl FromStr for HamiltonianModel {
    type Err = QaoaError;

    /// Parse `"0.7*Z0*Z1 + 1.2*Z0*Z2 - 0.5*Z0 + 0.1"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(QaoaError::MalformedHamiltonian("empty expression".into()));
        }

        let terms = split_terms(&compact)
            .into_iter()
            .map(parse_term)
            .collect::<QaoaResult<Vec<_>>>()?;

        Self::build(terms)
    }
}

/// Split at `+`/`-` signs that start a new term
fn split_terms(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;

    for i in 1..bytes.len() {
        let starts_term = matches!(bytes[i], b'+' | b'-')
            && !matches!(bytes[i - 1], b'e' | b'E' | b'+' | b'-' | b'*');
        if starts_term {
            out.push(&s[start..i]);
            start = i;
        }
    }
    out.push(&s[start..]);
    out
}

fn parse_term(text: &str) -> QaoaResult<Term> {
    let malformed = |why: &str| QaoaError::MalformedHamiltonian(format!("term '{}': {}", text, why));

    let (sign, body) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    if body.is_empty() {
        return Err(malformed("missing factors"));
    }

    let mut weight = sign;
    let mut qubits = Vec::new();

    for factor in body.split('*') {
        if let Some(index) = factor.strip_prefix(['Z', 'z']) {
            let q = index
                .parse::<QubitId>()
                .map_err(|_| malformed("bad qubit index"))?;
            qubits.push(q);
        } else {
            let value = factor
                .parse::<f64>()
                .map_err(|_| malformed("expected a number or Z<index>"))?;
            weight *= value;
        }
    }

    Ok(Term::new(qubits, weight))
}

impl fmt::Display for HamiltonianModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<(f64, String)> = Vec::with_capacity(self.n_terms() + 1);
        for &(q, h) in &self.singles {
            parts.push((h, format!("Z{}", q)));
        }
        for &(p, g) in &self.pairs {
            parts.push((g, format!("Z{}*Z{}", p.first(), p.second())));
        }
        if self.constant != 0.0 {
            parts.push((self.constant, String::new()));
        }

        if parts.is_empty() {
            return write!(f, "0");
        }

        for (i, (w, ops)) in parts.iter().enumerate() {
            let sign = if *w < 0.0 { "-" } else { "+" };
            if i == 0 {
                if *w < 0.0 {
                    write!(f, "-")?;
                }
            } else {
                write!(f, " {} ", sign)?;
            }
            if ops.is_empty() {
                write!(f, "{}", w.abs())?;
            } else {
                write!(f, "{}*{}", w.abs(), ops)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
