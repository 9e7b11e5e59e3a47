use std::ops::{Add, Mul, Neg, Sub};

use tracing::debug;

use crate::domains::{
    integer::{Integer, IntegerRing},
    rational::{Rational, RationalField},
    EuclideanDomain, Field, Ring,
};

use super::{write_term, PolynomialError, Variable};

/// A dense univariate polynomial. The coefficient of `x^i` is stored at index `i`.
///
/// The coefficient list is never empty: the zero polynomial is a single zero
/// coefficient and otherwise the last coefficient is nonzero.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct UnivariatePolynomial<F: Ring> {
    pub coefficients: Vec<F::Element>,
    pub variable: Variable,
    pub field: F,
}

impl<F: Ring> std::fmt::Display for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (e, c) in self.coefficients.iter().enumerate().rev() {
            if F::is_zero(c) {
                continue;
            }

            let monomial = match e {
                0 => String::new(),
                1 => self.variable.to_string(),
                _ => format!("{}^{}", self.variable, e),
            };
            write_term(f, first, &c.to_string(), &monomial)?;
            first = false;
        }
        Ok(())
    }
}

impl<F: Ring> UnivariatePolynomial<F> {
    /// Constructs a zero polynomial.
    #[inline]
    pub fn new(field: &F, variable: Variable) -> Self {
        Self {
            coefficients: vec![field.zero()],
            field: field.clone(),
            variable,
        }
    }

    /// Constructs a polynomial from its coefficients, lowest degree first.
    pub fn from_coefficients(field: &F, variable: Variable, coefficients: Vec<F::Element>) -> Self {
        let mut p = Self {
            coefficients,
            field: field.clone(),
            variable,
        };
        p.truncate();
        p
    }

    /// Constructs a zero polynomial, inheriting the field and variable from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self::new(&self.field, self.variable.clone())
    }

    /// Constructs a constant polynomial, inheriting the field and variable from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        Self {
            coefficients: vec![coeff],
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Constructs a polynomial that is one, inheriting the field and variable from `self`.
    #[inline]
    pub fn one(&self) -> Self {
        self.constant(self.field.one())
    }

    /// Constructs a polynomial with a single term.
    pub fn monomial(&self, coeff: F::Element, exponent: usize) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        let mut coefficients = vec![self.field.zero(); exponent + 1];
        coefficients[exponent] = coeff;

        Self {
            coefficients,
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficients.len() == 1 && F::is_zero(&self.coefficients[0])
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.coefficients.len() == 1 && self.field.is_one(&self.coefficients[0])
    }

    /// Returns true if the polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coefficients.len() == 1
    }

    /// Get the constant term of the polynomial.
    #[inline]
    pub fn get_constant(&self) -> F::Element {
        self.coefficients[0].clone()
    }

    /// Get the leading coefficient.
    #[inline]
    pub fn lcoeff(&self) -> F::Element {
        self.coefficients[self.coefficients.len() - 1].clone()
    }

    /// The degree of the polynomial. The zero polynomial has degree 0.
    #[inline]
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// The lowest power with a nonzero coefficient.
    pub fn lowest_degree(&self) -> usize {
        self.coefficients
            .iter()
            .position(|c| !F::is_zero(c))
            .unwrap_or(0)
    }

    /// The number of nonzero coefficients.
    pub fn nterms(&self) -> usize {
        self.coefficients.iter().filter(|c| !F::is_zero(c)).count()
    }

    /// Remove trailing zero coefficients, keeping at least one.
    fn truncate(&mut self) {
        while self.coefficients.len() > 1
            && F::is_zero(&self.coefficients[self.coefficients.len() - 1])
        {
            self.coefficients.pop();
        }

        if self.coefficients.is_empty() {
            self.coefficients.push(self.field.zero());
        }
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

        x * &y
    }

    /// Multiply by `x^exp`.
    pub fn mul_exp(&self, exp: usize) -> Self {
        if exp == 0 || self.is_zero() {
            return self.clone();
        }

        let mut coefficients = vec![self.field.zero(); exp];
        coefficients.extend(self.coefficients.iter().cloned());

        Self {
            coefficients,
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Divide by `x^exp`. The caller must make sure that all lower coefficients are zero.
    pub fn div_exp(&self, exp: usize) -> Self {
        if exp == 0 {
            return self.clone();
        }

        debug_assert!(self.coefficients[..exp.min(self.coefficients.len())]
            .iter()
            .all(|c| F::is_zero(c)));

        if exp >= self.coefficients.len() {
            return self.zero();
        }

        Self {
            coefficients: self.coefficients[exp..].to_vec(),
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    pub fn mul_coeff(mut self, coeff: &F::Element) -> Self {
        for c in &mut self.coefficients {
            if !F::is_zero(c) {
                self.field.mul_assign(c, coeff);
            }
        }

        self.truncate();
        self
    }

    /// Map the coefficients to another ring.
    pub fn map_coeff<U: Ring, T: Fn(&F::Element) -> U::Element>(
        &self,
        f: T,
        field: U,
    ) -> UnivariatePolynomial<U> {
        UnivariatePolynomial::from_coefficients(
            &field,
            self.variable.clone(),
            self.coefficients.iter().map(f).collect(),
        )
    }

    /// Evaluate the polynomial at `x` using Horner's scheme.
    pub fn evaluate(&self, x: &F::Element) -> F::Element {
        let mut res = self.field.zero();
        for c in self.coefficients.iter().rev() {
            self.field.mul_assign(&mut res, x);
            self.field.add_assign(&mut res, c);
        }
        res
    }

    /// Compute the derivative.
    pub fn derivative(&self) -> Self {
        if self.is_constant() {
            return self.zero();
        }

        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(e, c)| self.field.mul(c, &self.field.nth(e as i64)))
            .collect();

        Self::from_coefficients(&self.field, self.variable.clone(), coefficients)
    }
}

impl<F: Ring> Add for UnivariatePolynomial<F> {
    type Output = Self;

    fn add(mut self, mut other: Self) -> Self::Output {
        assert_eq!(self.variable, other.variable);

        if self.coefficients.len() < other.coefficients.len() {
            std::mem::swap(&mut self, &mut other);
        }

        for (i, c) in other.coefficients.iter().enumerate() {
            self.field.add_assign(&mut self.coefficients[i], c);
        }

        self.truncate();
        self
    }
}

impl<'a, 'b, F: Ring> Add<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn add(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        self.clone().add(other.clone())
    }
}

impl<F: Ring> Sub for UnivariatePolynomial<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.add(other.neg())
    }
}

impl<'a, 'b, F: Ring> Sub<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn sub(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        self.clone().add(other.clone().neg())
    }
}

impl<F: Ring> Neg for UnivariatePolynomial<F> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for c in &mut self.coefficients {
            *c = self.field.neg(c);
        }
        self
    }
}

impl<'a, 'b, F: Ring> Mul<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn mul(self, rhs: &'a UnivariatePolynomial<F>) -> Self::Output {
        assert_eq!(self.variable, rhs.variable);

        if self.is_zero() || rhs.is_zero() {
            return self.zero();
        }

        let n = self.degree();
        let m = rhs.degree();

        let mut coefficients = vec![self.field.zero(); n + m + 1];
        for (e1, c1) in self.coefficients.iter().enumerate() {
            if F::is_zero(c1) {
                continue;
            }

            for (e2, c2) in rhs.coefficients.iter().enumerate() {
                if !F::is_zero(c2) {
                    self.field.add_mul_assign(&mut coefficients[e1 + e2], c1, c2);
                }
            }
        }

        UnivariatePolynomial::from_coefficients(&self.field, self.variable.clone(), coefficients)
    }
}

impl<'a, F: Ring> Mul<&'a UnivariatePolynomial<F>> for UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    #[inline]
    fn mul(self, rhs: &'a UnivariatePolynomial<F>) -> Self::Output {
        (&self) * rhs
    }
}

impl<F: EuclideanDomain> UnivariatePolynomial<F> {
    /// Get the content from the coefficients.
    pub fn content(&self) -> F::Element {
        let mut c = self.field.zero();
        for cc in &self.coefficients {
            // early return if possible (not possible for rationals)
            if F::one_is_gcd_unit() && self.field.is_one(&c) {
                break;
            }

            if !F::is_zero(cc) {
                c = self.field.gcd(&c, cc);
            }
        }
        c
    }

    /// Divide every coefficient by `other`. The division must be exact.
    pub fn div_coeff(mut self, other: &F::Element) -> Self {
        for c in &mut self.coefficients {
            let (quot, rem) = self.field.quot_rem(c, other);
            debug_assert!(F::is_zero(&rem));
            *c = quot;
        }
        self
    }

    /// Make the polynomial primitive by removing the content.
    pub fn make_primitive(self) -> Self {
        if self.is_zero() {
            return self;
        }

        let c = self.content();
        self.div_coeff(&c)
    }
}

impl<F: Field> UnivariatePolynomial<F> {
    /// Divide `self` by `div`, returning the quotient and the remainder.
    ///
    /// Long division proceeds from the highest power of the dividend and stops
    /// once the remaining degree is lower than the degree of the divisor.
    pub fn divide(&self, div: &Self) -> Result<(Self, Self), PolynomialError> {
        if div.is_zero() {
            return Err(PolynomialError::DivisionDegenerate);
        }

        Ok(self.quot_rem(div))
    }

    /// Division with remainder by a nonzero divisor.
    pub(crate) fn quot_rem(&self, div: &Self) -> (Self, Self) {
        debug_assert!(!div.is_zero());

        let n = self.degree();
        let m = div.degree();
        if self.is_zero() || n < m {
            return (self.zero(), self.clone());
        }

        let inv = self.field.inv(&div.lcoeff());
        let mut r = self.coefficients.clone();
        let mut q = vec![self.field.zero(); n - m + 1];

        for p in (m..=n).rev() {
            if F::is_zero(&r[p]) {
                continue;
            }

            let qq = self.field.mul(&r[p], &inv);
            for (i, c) in div.coefficients.iter().enumerate() {
                if !F::is_zero(c) {
                    self.field.sub_mul_assign(&mut r[p - m + i], &qq, c);
                }
            }
            q[p - m] = qq;
        }

        r.truncate(m.max(1));
        if m == 0 {
            r[0] = self.field.zero();
        }

        (
            Self::from_coefficients(&self.field, self.variable.clone(), q),
            Self::from_coefficients(&self.field, self.variable.clone(), r),
        )
    }

    /// Return the quotient if `div` divides `self`.
    pub fn divides(&self, div: &Self) -> Option<Self> {
        if div.is_zero() {
            return None;
        }

        let (q, r) = self.quot_rem(div);
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    /// Compute the remainder `self % div`.
    pub fn rem(&self, div: &Self) -> Result<Self, PolynomialError> {
        Ok(self.divide(div)?.1)
    }

    /// Compute the antiderivative with integration constant zero.
    pub fn integrate(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }

        let mut coefficients = vec![self.field.zero(); self.coefficients.len() + 1];
        for (e, c) in self.coefficients.iter().enumerate() {
            if !F::is_zero(c) {
                coefficients[e + 1] = self.field.div(c, &self.field.nth(e as i64 + 1));
            }
        }

        Self::from_coefficients(&self.field, self.variable.clone(), coefficients)
    }

    /// Remainder sequence of Euclid's algorithm, without normalization.
    fn euclid(&self, b: &Self) -> Self {
        if self.is_zero() {
            return b.clone();
        }
        if b.is_zero() {
            return self.clone();
        }

        let mut c = self.clone();
        let mut d = b.clone();
        if c.degree() < d.degree() {
            std::mem::swap(&mut c, &mut d);
        }

        let mut r = c.quot_rem(&d).1;
        while !r.is_zero() {
            c = d;
            d = r;
            r = c.quot_rem(&d).1;
        }

        d
    }

    /// Exact division by a nonzero divisor that is known to divide `self`.
    fn exact_div(&self, div: &Self) -> Self {
        let (q, r) = self.quot_rem(div);
        debug_assert!(r.is_zero(), "{} does not divide {}", div, self);
        q
    }
}

impl UnivariatePolynomial<RationalField> {
    /// Split the polynomial into a rational content whose sign is that of the leading
    /// coefficient and a primitive part with integer coefficients and positive leading coefficient.
    pub fn content_and_primitive(&self) -> (Rational, Self) {
        if self.is_zero() {
            return (Rational::zero(), self.clone());
        }

        let mut c = self.content();
        if self.lcoeff().is_negative() {
            c = -c;
        }

        let p = self.clone().div_coeff(&c);
        (c, p)
    }

    /// Compute the greatest common divisor with Euclid's algorithm. The result is
    /// primitive with a positive leading coefficient.
    pub fn gcd(&self, b: &Self) -> Self {
        self.euclid(b).content_and_primitive().1
    }

    /// Split off the square-free part of highest multiplicity.
    ///
    /// Returns `(part, cofactor, k)` with `self = part^k * cofactor`, where `part` is the
    /// product of all irreducible factors that occur exactly `k` times and `k` is the
    /// highest multiplicity. For a square-free input this is `(self, 1, 1)`.
    pub fn square_free(&self) -> (Self, Self, usize) {
        if self.is_constant() {
            return (self.clone(), self.one(), 1);
        }

        let d = self.derivative();
        let mut c = self.gcd(&d);
        if c.is_constant() {
            return (self.clone(), self.one(), 1);
        }

        let mut w = self.exact_div(&c);
        let mut k = 1;
        while !c.is_constant() {
            let y = w.gcd(&c);
            c = c.exact_div(&y);
            w = y;
            k += 1;
        }

        let cofactor = self.exact_div(&w.pow(k));
        debug!("square-free part ({})^{} of {}", w, k, self);
        (w, cofactor, k)
    }

    /// Perform a square-free factorization.
    /// The output is `a_1^e1*...*a_n^e_n` where each `a_i` is square-free
    /// and relatively prime to the others. Constant factors are not included.
    pub fn square_free_factorization(&self) -> Vec<(Self, usize)> {
        let mut factors = vec![];
        let mut rest = self.clone();
        while !rest.is_constant() {
            let (part, cofactor, k) = rest.square_free();
            factors.push((part.content_and_primitive().1, k));
            rest = cofactor;
        }

        factors.sort_by_key(|(_, k)| *k);
        factors
    }

    /// Convert a polynomial whose coefficients are all integers.
    pub fn to_integer_polynomial(&self) -> Option<UnivariatePolynomial<IntegerRing>> {
        if self.coefficients.iter().any(|c| !c.is_integer()) {
            return None;
        }

        Some(self.map_coeff(|c| c.numerator(), IntegerRing::new()))
    }

    /// The coefficients as floats, from the highest degree down.
    pub fn to_f64_coefficients(&self) -> Vec<f64> {
        self.coefficients.iter().rev().map(|c| c.to_f64()).collect()
    }
}

impl UnivariatePolynomial<IntegerRing> {
    pub fn to_rational_polynomial(&self) -> UnivariatePolynomial<RationalField> {
        self.map_coeff(|c| c.into(), RationalField::new())
    }

    /// Reconstruct the degree-`p` integer polynomial with leading coefficient `c1` and
    /// constant term `c2` whose value at `base` is `n`.
    ///
    /// The middle coefficients are read off as balanced digits of `n` in base `base`,
    /// highest power first. Returns `None` if the digits do not account for `n` exactly.
    pub fn fit(
        c1: &Integer,
        c2: &Integer,
        n: &Integer,
        base: &Integer,
        p: usize,
        variable: Variable,
    ) -> Option<Self> {
        let field = IntegerRing::new();
        if p == 0 {
            return if c1 == c2 && c1 == n && !c1.is_zero() {
                Some(UnivariatePolynomial::from_coefficients(
                    &field,
                    variable,
                    vec![c1.clone()],
                ))
            } else {
                None
            };
        }

        if c1.is_zero() || *base < Integer::new(2) {
            return None;
        }

        let mut coefficients = vec![Integer::zero(); p + 1];
        coefficients[0] = c2.clone();
        coefficients[p] = c1.clone();

        let mut r = &(n - &(c1 * &base.pow(p as u32))) - c2;
        for k in (1..p).rev() {
            let bk = base.pow(k as u32);
            let a = r.div_round(&bk);
            r = &r - &(&a * &bk);
            coefficients[k] = a;
        }

        if !r.is_zero() {
            return None;
        }

        Some(UnivariatePolynomial::from_coefficients(
            &field,
            variable,
            coefficients,
        ))
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{
        integer::{Integer, Z},
        rational::{Rational, Q},
    };
    use crate::poly::{PolynomialError, Variable};

    use super::UnivariatePolynomial;

    fn poly(coeffs: &[i64]) -> UnivariatePolynomial<crate::domains::rational::RationalField> {
        UnivariatePolynomial::from_coefficients(
            &Q,
            Variable::new("x"),
            coeffs.iter().map(|c| Rational::from(*c)).collect(),
        )
    }

    #[test]
    fn zero_is_single_coefficient() {
        let p = poly(&[1, 2, 0, 0]);
        assert_eq!(p.degree(), 1);
        let z = &p - &p;
        assert!(z.is_zero());
        assert_eq!(z.coefficients.len(), 1);
        assert_eq!(format!("{}", z), "0");
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", poly(&[1, -2, 0, 3])), "3*x^3-2*x+1");
        assert_eq!(format!("{}", poly(&[0, -1, 1])), "x^2-x");
    }

    #[test]
    fn divide_by_linear() {
        let (q, r) = poly(&[1, 2, 1]).divide(&poly(&[1, 1])).unwrap();
        assert_eq!(q, poly(&[1, 1]));
        assert!(r.is_zero());
    }

    #[test]
    fn divide_by_constant() {
        let (q, r) = poly(&[1, 2, 1]).divide(&poly(&[2])).unwrap();
        assert_eq!(q.coefficients[2], Rational::new(1, 2));
        assert!(r.is_zero());
    }

    #[test]
    fn divide_by_zero() {
        assert_eq!(
            poly(&[1, 1]).divide(&poly(&[0])),
            Err(PolynomialError::DivisionDegenerate)
        );
    }

    #[test]
    fn gcd() {
        assert_eq!(poly(&[1, 2, 1]).gcd(&poly(&[1, 1])), poly(&[1, 1]));
        assert_eq!(poly(&[0]).gcd(&poly(&[-2, -4])), poly(&[1, 2]));

        let a = poly(&[15, 24, 6, 0, 0, 0, 0, 15, 24, 6]);
        let b = poly(&[5, 8, 2]);
        assert_eq!(a.gcd(&b), b);
    }

    #[test]
    fn calculus() {
        let p = poly(&[1, 2, 3]);
        assert_eq!(p.derivative(), poly(&[2, 6]));
        assert_eq!(p.derivative().integrate(), poly(&[0, 2, 3]));
        assert_eq!(poly(&[1]).integrate(), poly(&[0, 1]));
    }

    #[test]
    fn square_free() {
        // (x+1)^2 (x+2)^3
        let a = poly(&[1, 1]).pow(2) * &poly(&[2, 1]).pow(3);
        let (part, cofactor, k) = a.square_free();
        assert_eq!(part, poly(&[2, 1]));
        assert_eq!(k, 3);
        assert_eq!(cofactor, poly(&[1, 1]).pow(2));

        let (part, cofactor, k) = poly(&[-1, 0, 1]).square_free();
        assert_eq!((part, cofactor.is_one(), k), (poly(&[-1, 0, 1]), true, 1));

        let sff = a.square_free_factorization();
        assert_eq!(sff, vec![(poly(&[1, 1]), 2), (poly(&[2, 1]), 3)]);
    }

    #[test]
    fn fit() {
        let x = Variable::new("x");
        let f = UnivariatePolynomial::fit(
            &Integer::new(1),
            &Integer::new(1),
            &Integer::new(71),
            &Integer::new(10),
            2,
            x.clone(),
        )
        .unwrap();
        assert_eq!(
            f,
            UnivariatePolynomial::from_coefficients(
                &Z,
                x.clone(),
                vec![Integer::new(1), Integer::new(-3), Integer::new(1)]
            )
        );

        assert!(UnivariatePolynomial::fit(
            &Integer::new(1),
            &Integer::new(1),
            &Integer::new(76),
            &Integer::new(10),
            1,
            x
        )
        .is_none());
    }

    #[test]
    fn evaluate() {
        let p = poly(&[1, 0, 2]);
        assert_eq!(p.evaluate(&Rational::new(1, 2)), Rational::new(3, 2));
        let i = p.to_integer_polynomial().unwrap();
        assert_eq!(i.evaluate(&Integer::new(10)), Integer::new(201));
    }
}
