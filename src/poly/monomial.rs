use std::cmp::Ordering;

use crate::domains::{Field, Ring};

use super::ExponentVector;

/// A single term `coefficient * x_1^e_1 * ... * x_n^e_n` of a multivariate polynomial.
///
/// The total degree and the number of variables with a nonzero exponent are
/// computed once on construction. Exponents are positional with respect to
/// the [VariableMap](super::VariableMap) of the polynomial that owns the term.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Term<F: Ring> {
    pub coefficient: F::Element,
    exponents: ExponentVector,
    total_degree: u32,
    nonzero_count: usize,
}

impl<F: Ring> Term<F> {
    pub fn new(coefficient: F::Element, exponents: ExponentVector) -> Term<F> {
        let total_degree = exponents.iter().sum();
        let nonzero_count = exponents.iter().filter(|e| **e > 0).count();
        Term {
            coefficient,
            exponents,
            total_degree,
            nonzero_count,
        }
    }

    #[inline]
    pub fn exponents(&self) -> &[u32] {
        &self.exponents
    }

    #[inline]
    pub fn exponent_vector(&self) -> &ExponentVector {
        &self.exponents
    }

    #[inline]
    pub fn total_degree(&self) -> u32 {
        self.total_degree
    }

    /// The number of variables that occur in the term.
    #[inline]
    pub fn nonzero_count(&self) -> usize {
        self.nonzero_count
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.nonzero_count == 0
    }

    /// The variable whose exponent is strictly larger than all others, if any.
    pub fn lead_variable(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        let mut unique = false;
        for (i, e) in self.exponents.iter().enumerate() {
            match best {
                Some((_, b)) if *e < b => {}
                Some((_, b)) if *e == b => unique = false,
                _ => {
                    best = Some((i, *e));
                    unique = true;
                }
            }
        }

        match best {
            Some((i, e)) if unique && e > 0 => Some(i),
            _ => None,
        }
    }

    /// Check if every exponent of `self` is at least the exponent of `other`.
    #[inline]
    pub fn is_divisible_by(&self, other: &Term<F>) -> bool {
        self.exponents
            .iter()
            .zip(&other.exponents)
            .all(|(a, b)| a >= b)
    }

    /// Multiply two terms.
    ///
    /// Panics when an exponent exceeds `u32::MAX`.
    pub fn mul(&self, other: &Term<F>, field: &F) -> Term<F> {
        Term::new(
            field.mul(&self.coefficient, &other.coefficient),
            self.exponents
                .iter()
                .zip(&other.exponents)
                .map(|(a, b)| a.checked_add(*b).expect("overflow in adding exponents"))
                .collect(),
        )
    }

    /// The graded ordering used to sort terms: higher total degree first, then
    /// lexicographically larger exponent vectors first.
    #[inline]
    pub fn graded_cmp(&self, other: &Term<F>) -> Ordering {
        other
            .total_degree
            .cmp(&self.total_degree)
            .then_with(|| other.exponents.cmp(&self.exponents))
    }
}

impl<F: Field> Term<F> {
    /// Divide two terms, if every exponent of `other` is at most the exponent in `self`.
    pub fn try_div(&self, other: &Term<F>, field: &F) -> Option<Term<F>> {
        if !self.is_divisible_by(other) {
            return None;
        }

        Some(Term::new(
            field.div(&self.coefficient, &other.coefficient),
            self.exponents
                .iter()
                .zip(&other.exponents)
                .map(|(a, b)| a - b)
                .collect(),
        ))
    }
}
