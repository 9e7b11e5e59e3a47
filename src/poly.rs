//! Polynomials over exact rings.
//!
//! [UnivariatePolynomial](univariate::UnivariatePolynomial) is a dense
//! representation in one variable, [MultivariatePolynomial](polynomial::MultivariatePolynomial)
//! a sparse list of [Term](monomial::Term)s whose exponents are keyed positionally
//! by a shared [VariableMap].
pub mod division;
pub mod factor;
pub mod factor_set;
pub mod mfactor;
pub mod monomial;
pub mod parse;
pub mod polynomial;
pub mod univariate;

use std::fmt::{Display, Formatter};

use smallvec::SmallVec;
use smartstring::{LazyCompact, SmartString};

pub const INLINED_EXPONENTS: usize = 6;

/// The exponents of a term, one entry per variable of its [VariableMap].
pub type ExponentVector = SmallVec<[u32; INLINED_EXPONENTS]>;

/// A named polynomial variable.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Variable(SmartString<LazyCompact>);

impl Variable {
    pub fn new(name: &str) -> Variable {
        Variable(name.into())
    }

    pub fn name(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for Variable {
    fn from(value: &str) -> Self {
        Variable::new(value)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered list of variables. A map is built once and then shared
/// read-only between all polynomials that use it.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct VariableMap {
    variables: Vec<Variable>,
}

impl VariableMap {
    pub fn new(variables: Vec<Variable>) -> VariableMap {
        VariableMap { variables }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name() == name)
    }

    #[inline]
    pub fn get(&self, index: usize) -> &Variable {
        &self.variables[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }
}

impl<'a> FromIterator<&'a str> for VariableMap {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        VariableMap::new(iter.into_iter().map(Variable::new).collect())
    }
}

/// Write `coeff*monomial` as a summand, omitting unit coefficients and
/// folding the sign of the coefficient into the separator.
pub(crate) fn write_term(
    f: &mut Formatter<'_>,
    first: bool,
    coeff: &str,
    monomial: &str,
) -> std::fmt::Result {
    let (negative, abs) = match coeff.strip_prefix('-') {
        Some(abs) => (true, abs),
        None => (false, coeff),
    };

    if negative {
        f.write_str("-")?;
    } else if !first {
        f.write_str("+")?;
    }

    if monomial.is_empty() {
        f.write_str(abs)
    } else if abs == "1" {
        f.write_str(monomial)
    } else {
        write!(f, "{}*{}", abs, monomial)
    }
}

/// Errors raised when building or dividing polynomials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolynomialError {
    /// The input is not a polynomial: a negative, non-integer or symbolic power,
    /// a function application or a division by a non-constant.
    NotPolynomial { reason: String },
    /// The input text could not be read.
    Syntax { position: usize, message: String },
    /// Division by the zero polynomial.
    DivisionDegenerate,
}

impl Display for PolynomialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PolynomialError::NotPolynomial { reason } => {
                write!(f, "Expression is not a polynomial: {}", reason)
            }
            PolynomialError::Syntax { position, message } => {
                write!(f, "Syntax error at position {}: {}", position, message)
            }
            PolynomialError::DivisionDegenerate => write!(f, "Cannot divide by the zero polynomial"),
        }
    }
}

impl std::error::Error for PolynomialError {}
