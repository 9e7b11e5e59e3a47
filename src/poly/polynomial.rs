use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use ahash::{HashMap, HashMapExt};
use smallvec::smallvec;

use crate::domains::{
    rational::{Rational, RationalField},
    EuclideanDomain, Field, Ring,
};

use super::{
    monomial::Term, univariate::UnivariatePolynomial, write_term, ExponentVector, VariableMap,
};

/// A sparse multivariate polynomial.
///
/// Terms are kept normalized: like terms are merged, zero terms are dropped and
/// the terms are sorted by descending total degree, ties broken by the
/// lexicographically larger exponent vector.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MultivariatePolynomial<F: Ring> {
    terms: Vec<Term<F>>,
    pub variables: Arc<VariableMap>,
    pub field: F,
}

impl<F: Ring> std::fmt::Display for MultivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        for (i, t) in self.terms.iter().enumerate() {
            let mut monomial = String::new();
            for (v, e) in t.exponents().iter().enumerate() {
                if *e == 0 {
                    continue;
                }

                if !monomial.is_empty() {
                    monomial.push('*');
                }
                monomial.push_str(self.variables.get(v).name());
                if *e > 1 {
                    monomial.push_str(&format!("^{}", e));
                }
            }

            write_term(f, i == 0, &t.coefficient.to_string(), &monomial)?;
        }
        Ok(())
    }
}

impl<F: Ring> MultivariatePolynomial<F> {
    /// Constructs a zero polynomial.
    #[inline]
    pub fn new(field: &F, variables: Arc<VariableMap>) -> Self {
        Self {
            terms: vec![],
            variables,
            field: field.clone(),
        }
    }

    /// Constructs a polynomial from a list of `(coefficient, exponents)` pairs.
    /// Like terms are merged.
    pub fn from_terms(
        field: &F,
        variables: Arc<VariableMap>,
        terms: impl IntoIterator<Item = (F::Element, ExponentVector)>,
    ) -> Self {
        let mut p = Self::new(field, variables);
        p.terms = terms
            .into_iter()
            .map(|(c, e)| {
                assert_eq!(e.len(), p.variables.len());
                Term::new(c, e)
            })
            .collect();
        p.normalize();
        p
    }

    /// Constructs a zero polynomial, inheriting the field and variable map from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self::new(&self.field, self.variables.clone())
    }

    /// Constructs a constant polynomial, inheriting the field and variable map from `self`.
    pub fn constant(&self, coeff: F::Element) -> Self {
        self.monomial(coeff, smallvec![0; self.variables.len()])
    }

    #[inline]
    pub fn one(&self) -> Self {
        self.constant(self.field.one())
    }

    /// Constructs a polynomial with a single term.
    pub fn monomial(&self, coeff: F::Element, exponents: ExponentVector) -> Self {
        let mut p = self.zero();
        if !F::is_zero(&coeff) {
            p.terms.push(Term::new(coeff, exponents));
        }
        p
    }

    /// The polynomial `x_i`.
    pub fn variable(&self, index: usize) -> Self {
        let mut exponents: ExponentVector = smallvec![0; self.variables.len()];
        exponents[index] = 1;
        self.monomial(self.field.one(), exponents)
    }

    #[inline]
    pub fn terms(&self) -> &[Term<F>] {
        &self.terms
    }

    #[inline]
    pub fn nterms(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn nvars(&self) -> usize {
        self.variables.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(|t| t.is_constant())
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.terms.len() == 1
            && self.terms[0].is_constant()
            && self.field.is_one(&self.terms[0].coefficient)
    }

    /// Get the constant term.
    pub fn get_constant(&self) -> F::Element {
        self.terms
            .iter()
            .find(|t| t.is_constant())
            .map(|t| t.coefficient.clone())
            .unwrap_or_else(|| self.field.zero())
    }

    /// The coefficient of the first term in graded order.
    pub fn lcoeff(&self) -> F::Element {
        self.terms
            .first()
            .map(|t| t.coefficient.clone())
            .unwrap_or_else(|| self.field.zero())
    }

    /// The highest power of variable `var`.
    pub fn degree(&self, var: usize) -> u32 {
        self.terms
            .iter()
            .map(|t| t.exponents()[var])
            .max()
            .unwrap_or(0)
    }

    pub fn total_degree(&self) -> u32 {
        self.terms.first().map(|t| t.total_degree()).unwrap_or(0)
    }

    /// The indices of the variables that occur in the polynomial.
    pub fn occurring_variables(&self) -> Vec<usize> {
        (0..self.nvars()).filter(|v| self.degree(*v) > 0).collect()
    }

    /// The smallest exponent of every variable over all terms.
    pub fn min_exponents(&self) -> ExponentVector {
        let mut min: ExponentVector = match self.terms.first() {
            Some(t) => t.exponent_vector().clone(),
            None => smallvec![0; self.nvars()],
        };

        for t in self.terms.iter().skip(1) {
            for (m, e) in min.iter_mut().zip(t.exponents()) {
                *m = (*m).min(*e);
            }
        }
        min
    }

    /// Merge like terms, drop zeros and sort.
    fn normalize(&mut self) {
        let mut index: HashMap<ExponentVector, usize> = HashMap::with_capacity(self.terms.len());
        let mut merged: Vec<(F::Element, ExponentVector)> = Vec::with_capacity(self.terms.len());

        for t in self.terms.drain(..) {
            if let Some(i) = index.get(t.exponent_vector()) {
                self.field.add_assign(&mut merged[*i].0, &t.coefficient);
            } else {
                index.insert(t.exponent_vector().clone(), merged.len());
                merged.push((t.coefficient.clone(), t.exponent_vector().clone()));
            }
        }

        self.terms = merged
            .into_iter()
            .filter(|(c, _)| !F::is_zero(c))
            .map(|(c, e)| Term::new(c, e))
            .collect();
        self.terms.sort_by(|a, b| a.graded_cmp(b));
    }

    /// Replace the terms of the polynomial.
    pub(crate) fn set_terms(&mut self, terms: Vec<Term<F>>) {
        self.terms = terms;
        self.normalize();
    }

    pub fn mul_coeff(mut self, coeff: &F::Element) -> Self {
        for t in &mut self.terms {
            self.field.mul_assign(&mut t.coefficient, coeff);
        }
        self.terms.retain(|t| !F::is_zero(&t.coefficient));
        self
    }

    /// Multiply every term by a single term.
    pub fn mul_term(&self, term: &Term<F>) -> Self {
        let mut p = self.zero();
        p.terms = self.terms.iter().map(|t| t.mul(term, &self.field)).collect();
        p.normalize();
        p
    }

    /// Compute `self^pow`.
    pub fn pow(&self, mut pow: usize) -> Self {
        if pow == 0 {
            return self.one();
        }

        let mut x = self.clone();
        let mut y = self.one();
        while pow != 1 {
            if pow % 2 == 1 {
                y = &y * &x;
                pow -= 1;
            }

            x = &x * &x;
            pow /= 2;
        }

        &x * &y
    }

    /// Compute the partial derivative in variable `var`.
    pub fn derivative(&self, var: usize) -> Self {
        let mut p = self.zero();
        p.terms = self
            .terms
            .iter()
            .filter(|t| t.exponents()[var] > 0)
            .map(|t| {
                let e = t.exponents()[var];
                let mut exponents = t.exponent_vector().clone();
                exponents[var] -= 1;
                Term::new(
                    self.field.mul(&t.coefficient, &self.field.nth(e as i64)),
                    exponents,
                )
            })
            .collect();
        p.normalize();
        p
    }

    /// Group the terms by the power of `var`. Each coefficient has `var` removed.
    pub fn coefficients_in(&self, var: usize) -> Vec<(u32, Self)> {
        let mut groups: Vec<(u32, Vec<Term<F>>)> = vec![];
        for t in &self.terms {
            let e = t.exponents()[var];
            let mut exponents = t.exponent_vector().clone();
            exponents[var] = 0;
            let term = Term::new(t.coefficient.clone(), exponents);

            match groups.iter_mut().find(|(k, _)| *k == e) {
                Some((_, g)) => g.push(term),
                None => groups.push((e, vec![term])),
            }
        }

        groups.sort_by(|a, b| b.0.cmp(&a.0));
        groups
            .into_iter()
            .map(|(e, terms)| {
                let mut p = self.zero();
                p.set_terms(terms);
                (e, p)
            })
            .collect()
    }

    /// Convert to a univariate polynomial in `var`, if no other variable occurs.
    pub fn to_univariate(&self, var: usize) -> Option<UnivariatePolynomial<F>> {
        let mut coefficients = vec![self.field.zero(); self.degree(var) as usize + 1];
        for t in &self.terms {
            if t
                .exponents()
                .iter()
                .enumerate()
                .any(|(i, e)| i != var && *e > 0)
            {
                return None;
            }
            coefficients[t.exponents()[var] as usize] = t.coefficient.clone();
        }

        Some(UnivariatePolynomial::from_coefficients(
            &self.field,
            self.variables.get(var).clone(),
            coefficients,
        ))
    }

    /// Embed a univariate polynomial as variable `var` of the variable map `variables`.
    pub fn from_univariate(
        poly: &UnivariatePolynomial<F>,
        variables: Arc<VariableMap>,
        var: usize,
    ) -> Self {
        let nvars = variables.len();
        Self::from_terms(
            &poly.field,
            variables,
            poly.coefficients.iter().enumerate().map(|(e, c)| {
                let mut exponents: ExponentVector = smallvec![0; nvars];
                exponents[var] = e as u32;
                (c.clone(), exponents)
            }),
        )
    }
}

impl<F: Ring> UnivariatePolynomial<F> {
    /// Convert to a multivariate polynomial over a map holding only this variable.
    pub fn to_multivariate(&self) -> MultivariatePolynomial<F> {
        MultivariatePolynomial::from_univariate(
            self,
            Arc::new(VariableMap::new(vec![self.variable.clone()])),
            0,
        )
    }
}

impl<'a, 'b, F: Ring> Add<&'a MultivariatePolynomial<F>> for &'b MultivariatePolynomial<F> {
    type Output = MultivariatePolynomial<F>;

    fn add(self, other: &'a MultivariatePolynomial<F>) -> Self::Output {
        assert_eq!(self.variables, other.variables);
        let mut p = self.clone();
        p.terms.extend(other.terms.iter().cloned());
        p.normalize();
        p
    }
}

impl<'a, 'b, F: Ring> Sub<&'a MultivariatePolynomial<F>> for &'b MultivariatePolynomial<F> {
    type Output = MultivariatePolynomial<F>;

    fn sub(self, other: &'a MultivariatePolynomial<F>) -> Self::Output {
        self + &(-other.clone())
    }
}

impl<F: Ring> Neg for MultivariatePolynomial<F> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for t in &mut self.terms {
            t.coefficient = self.field.neg(&t.coefficient);
        }
        self
    }
}

impl<'a, 'b, F: Ring> Mul<&'a MultivariatePolynomial<F>> for &'b MultivariatePolynomial<F> {
    type Output = MultivariatePolynomial<F>;

    fn mul(self, other: &'a MultivariatePolynomial<F>) -> Self::Output {
        assert_eq!(self.variables, other.variables);
        let mut p = self.zero();
        p.terms = Vec::with_capacity(self.nterms() * other.nterms());
        for t1 in &self.terms {
            for t2 in &other.terms {
                p.terms.push(t1.mul(t2, &self.field));
            }
        }
        p.normalize();
        p
    }
}

impl<F: EuclideanDomain> MultivariatePolynomial<F> {
    /// Get the content from the coefficients.
    pub fn content(&self) -> F::Element {
        let mut c = self.field.zero();
        for t in &self.terms {
            if F::one_is_gcd_unit() && self.field.is_one(&c) {
                break;
            }
            c = self.field.gcd(&c, &t.coefficient);
        }
        c
    }

    /// Divide every coefficient by `other`. The division must be exact.
    pub fn div_coeff(mut self, other: &F::Element) -> Self {
        for t in &mut self.terms {
            let (quot, rem) = self.field.quot_rem(&t.coefficient, other);
            debug_assert!(F::is_zero(&rem));
            t.coefficient = quot;
        }
        self
    }
}

impl<F: Field> MultivariatePolynomial<F> {
    /// Divide every term by the monomial `x^exponents`, if possible.
    pub fn try_div_monomial(&self, exponents: &ExponentVector) -> Option<Self> {
        let divisor = Term::new(self.field.one(), exponents.clone());
        let mut p = self.zero();
        p.terms = self
            .terms
            .iter()
            .map(|t| t.try_div(&divisor, &self.field))
            .collect::<Option<_>>()?;
        p.normalize();
        Some(p)
    }
}

impl MultivariatePolynomial<RationalField> {
    /// Split the polynomial into a rational content whose sign is that of the first
    /// term and a primitive part with integer coefficients.
    pub fn content_and_primitive(&self) -> (Rational, Self) {
        if self.is_zero() {
            return (Rational::zero(), self.clone());
        }

        let mut c = self.content();
        if self.lcoeff().is_negative() {
            c = -c;
        }

        (c.clone(), self.clone().div_coeff(&c))
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use smallvec::smallvec;

    use crate::domains::rational::{Rational, Q};
    use crate::poly::VariableMap;

    use super::MultivariatePolynomial;

    fn vars() -> Arc<VariableMap> {
        Arc::new(["x", "y"].into_iter().collect())
    }

    #[test]
    fn merge_and_order() {
        let p = MultivariatePolynomial::from_terms(
            &Q,
            vars(),
            [
                (Rational::from(1), smallvec![0, 1]),
                (Rational::from(2), smallvec![2, 0]),
                (Rational::from(3), smallvec![0, 1]),
                (Rational::from(-1), smallvec![1, 1]),
                (Rational::from(5), smallvec![0, 0]),
            ],
        );
        assert_eq!(p.nterms(), 4);
        assert_eq!(format!("{}", p), "2*x^2-x*y+4*y+5");

        let z = &p - &p;
        assert!(z.is_zero());
    }

    #[test]
    fn product_and_derivative() {
        let x = MultivariatePolynomial::new(&Q, vars()).variable(0);
        let y = x.variable(1);
        let s = &x + &y;
        let sq = s.pow(2);
        assert_eq!(format!("{}", sq), "x^2+2*x*y+y^2");
        assert_eq!(sq.derivative(0), s.clone().mul_coeff(&Rational::from(2)));
        assert_eq!(sq.degree(1), 2);
        assert_eq!(sq.coefficients_in(0).len(), 3);
    }

    #[test]
    fn univariate_conversion() {
        let x = MultivariatePolynomial::new(&Q, vars()).variable(1);
        let p = &x.pow(2) + &x.one();
        let u = p.to_univariate(1).unwrap();
        assert_eq!(format!("{}", u), "y^2+1");
        assert_eq!(MultivariatePolynomial::from_univariate(&u, vars(), 1), p);
        assert!(p.variable(0).to_univariate(1).is_none());
    }

    #[test]
    fn content() {
        let x = MultivariatePolynomial::new(&Q, vars()).variable(0);
        let p = (&x.pow(2) + &x).mul_coeff(&Rational::new(-2, 3));
        let (c, prim) = p.content_and_primitive();
        assert_eq!(c, Rational::new(-2, 3));
        assert_eq!(prim, &x.pow(2) + &x);
        assert_eq!(p.min_exponents().as_slice(), &[1, 0]);
    }
}
