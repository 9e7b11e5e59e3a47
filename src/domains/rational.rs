use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    ops::{Add, Div, Mul, Neg, Sub},
};

use rug::{ops::Pow, Integer as MultiPrecisionInteger, Rational as ArbitraryPrecisionRational};

use crate::utils;

use super::{integer::Integer, EuclideanDomain, Field, Ring};

/// The field of rational numbers.
pub type Q = RationalField;
/// The field of rational numbers.
pub const Q: RationalField = RationalField::new();

/// The field of rational numbers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RationalField;

impl Default for RationalField {
    fn default() -> Self {
        Self::new()
    }
}

impl RationalField {
    pub const fn new() -> RationalField {
        RationalField
    }
}

/// An exact rational number. The fraction is always reduced and the denominator
/// is positive. Values whose numerator and denominator fit in an `i64` are always
/// stored as [Rational::Natural], so that derived equality and hashing are structural.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Rational {
    Natural(i64, i64),
    Large(ArbitraryPrecisionRational),
}

impl Rational {
    /// Create the reduced fraction `num/den`.
    pub fn new(num: i64, den: i64) -> Rational {
        if den == 0 {
            panic!("Division by zero in rational {}/0", num);
        }
        Rational::from_i128(num as i128, den as i128)
    }

    /// Create the reduced fraction `num/den` from values that are known to fit in an `i128`.
    fn from_i128(mut num: i128, mut den: i128) -> Rational {
        if den < 0 {
            num = -num;
            den = -den;
        }

        let g = utils::gcd_signed_i128(num, den) as i128;
        if g > 1 {
            num /= g;
            den /= g;
        }

        if num >= i64::MIN as i128 && num <= i64::MAX as i128 && den <= i64::MAX as i128 {
            Rational::Natural(num as i64, den as i64)
        } else {
            Rational::Large(ArbitraryPrecisionRational::from((
                MultiPrecisionInteger::from(num),
                MultiPrecisionInteger::from(den),
            )))
        }
    }

    fn from_large(r: ArbitraryPrecisionRational) -> Rational {
        if let (Some(n), Some(d)) = (r.numer().to_i64(), r.denom().to_i64()) {
            Rational::Natural(n, d)
        } else {
            Rational::Large(r)
        }
    }

    /// Create the reduced fraction `num/den` from two integers.
    pub fn from_integers(num: &Integer, den: &Integer) -> Rational {
        if den.is_zero() {
            panic!("Division by zero in rational {}/0", num);
        }

        match (num, den) {
            (Integer::Natural(n), Integer::Natural(d)) => Rational::from_i128(*n as i128, *d as i128),
            _ => Rational::from_large(ArbitraryPrecisionRational::from((
                num.to_multi_prec(),
                den.to_multi_prec(),
            ))),
        }
    }

    pub fn to_multi_prec(&self) -> ArbitraryPrecisionRational {
        match self {
            Rational::Natural(n, d) => ArbitraryPrecisionRational::from((*n, *d)),
            Rational::Large(r) => r.clone(),
        }
    }

    #[inline]
    pub fn zero() -> Rational {
        Rational::Natural(0, 1)
    }

    #[inline]
    pub fn one() -> Rational {
        Rational::Natural(1, 1)
    }

    pub fn numerator(&self) -> Integer {
        match self {
            Rational::Natural(n, _) => Integer::Natural(*n),
            Rational::Large(r) => Integer::from(r.numer().clone()),
        }
    }

    pub fn denominator(&self) -> Integer {
        match self {
            Rational::Natural(_, d) => Integer::Natural(*d),
            Rational::Large(r) => Integer::from(r.denom().clone()),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self, Rational::Natural(0, _))
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        matches!(self, Rational::Natural(1, 1))
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        match self {
            Rational::Natural(n, _) => *n < 0,
            Rational::Large(r) => r.cmp0() == Ordering::Less,
        }
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        match self {
            Rational::Natural(_, d) => *d == 1,
            Rational::Large(r) => *r.denom() == 1,
        }
    }

    pub fn abs(&self) -> Rational {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    pub fn inv(&self) -> Rational {
        if self.is_zero() {
            panic!("Cannot invert zero");
        }

        match self {
            Rational::Natural(n, d) => Rational::from_i128(*d as i128, *n as i128),
            Rational::Large(r) => Rational::from_large(r.clone().recip()),
        }
    }

    pub fn pow(&self, e: u32) -> Rational {
        if let Rational::Natural(n, d) = self {
            if let (Some(pn), Some(pd)) = (n.checked_pow(e), d.checked_pow(e)) {
                return Rational::Natural(pn, pd);
            }
        }

        Rational::from_large(self.to_multi_prec().pow(e))
    }

    /// Raise to a signed power. Negative powers of zero panic.
    pub fn powi(&self, e: i64) -> Rational {
        if e >= 0 {
            self.pow(e as u32)
        } else {
            self.inv().pow(e.unsigned_abs() as u32)
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Rational::Natural(n, d) => *n as f64 / *d as f64,
            Rational::Large(r) => r.to_f64(),
        }
    }

    /// The exact `n`th root, if both numerator and denominator are perfect powers.
    pub fn exact_root(&self, n: u32) -> Option<Rational> {
        let num = self.numerator().exact_root(n)?;
        let den = self.denominator().exact_root(n)?;
        Some(Rational::from_integers(&num, &den))
    }

    /// The gcd of two rationals: `gcd(n1, n2) / lcm(d1, d2)`. The result is non-negative.
    pub fn gcd(&self, other: &Rational) -> Rational {
        if self.is_zero() {
            return other.abs();
        }
        if other.is_zero() {
            return self.abs();
        }

        let n = self.numerator().gcd(&other.numerator());
        let d = self.denominator().lcm(&other.denominator());
        Rational::from_integers(&n, &d)
    }
}

impl From<i64> for Rational {
    #[inline]
    fn from(value: i64) -> Self {
        Rational::Natural(value, 1)
    }
}

impl From<i32> for Rational {
    #[inline]
    fn from(value: i32) -> Self {
        Rational::Natural(value as i64, 1)
    }
}

impl From<(i64, i64)> for Rational {
    #[inline]
    fn from((num, den): (i64, i64)) -> Self {
        Rational::new(num, den)
    }
}

impl From<Integer> for Rational {
    fn from(value: Integer) -> Self {
        match value {
            Integer::Natural(n) => Rational::Natural(n, 1),
            Integer::Large(r) => Rational::Large(ArbitraryPrecisionRational::from(r)),
        }
    }
}

impl<'a> From<&'a Integer> for Rational {
    fn from(value: &'a Integer) -> Self {
        value.clone().into()
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rational::Natural(n, d) => {
                if *d == 1 {
                    write!(f, "{}", n)
                } else {
                    write!(f, "{}/{}", n, d)
                }
            }
            Rational::Large(r) => r.fmt(f),
        }
    }
}

impl std::fmt::Debug for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for RationalField {
    fn fmt(&self, _: &mut Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => {
                (*n1 as i128 * *d2 as i128).cmp(&(*n2 as i128 * *d1 as i128))
            }
            _ => self.to_multi_prec().cmp(&other.to_multi_prec()),
        }
    }
}

impl<'a, 'b> Add<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn add(self, rhs: &'b Rational) -> Rational {
        match (self, rhs) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => {
                let (n1, d1, n2, d2) = (*n1 as i128, *d1 as i128, *n2 as i128, *d2 as i128);
                Rational::from_i128(n1 * d2 + n2 * d1, d1 * d2)
            }
            _ => Rational::from_large(self.to_multi_prec() + rhs.to_multi_prec()),
        }
    }
}

impl<'a, 'b> Sub<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn sub(self, rhs: &'b Rational) -> Rational {
        match (self, rhs) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => {
                let (n1, d1, n2, d2) = (*n1 as i128, *d1 as i128, *n2 as i128, *d2 as i128);
                Rational::from_i128(n1 * d2 - n2 * d1, d1 * d2)
            }
            _ => Rational::from_large(self.to_multi_prec() - rhs.to_multi_prec()),
        }
    }
}

impl<'a, 'b> Mul<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn mul(self, rhs: &'b Rational) -> Rational {
        match (self, rhs) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => {
                Rational::from_i128(*n1 as i128 * *n2 as i128, *d1 as i128 * *d2 as i128)
            }
            _ => Rational::from_large(self.to_multi_prec() * rhs.to_multi_prec()),
        }
    }
}

impl<'a, 'b> Div<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn div(self, rhs: &'b Rational) -> Rational {
        if rhs.is_zero() {
            panic!("Division by zero");
        }

        match (self, rhs) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => {
                Rational::from_i128(*n1 as i128 * *d2 as i128, *d1 as i128 * *n2 as i128)
            }
            _ => Rational::from_large(self.to_multi_prec() / rhs.to_multi_prec()),
        }
    }
}

impl<'a> Neg for &'a Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        match self {
            Rational::Natural(n, d) => Rational::from_i128(-(*n as i128), *d as i128),
            Rational::Large(r) => Rational::from_large(-r.clone()),
        }
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        (&self).neg()
    }
}

macro_rules! forward_owned_binop {
    ($tr: ident, $f: ident) => {
        impl $tr<Rational> for Rational {
            type Output = Rational;

            #[inline]
            fn $f(self, rhs: Rational) -> Rational {
                (&self).$f(&rhs)
            }
        }

        impl<'a> $tr<&'a Rational> for Rational {
            type Output = Rational;

            #[inline]
            fn $f(self, rhs: &'a Rational) -> Rational {
                (&self).$f(rhs)
            }
        }

        impl<'a> $tr<Rational> for &'a Rational {
            type Output = Rational;

            #[inline]
            fn $f(self, rhs: Rational) -> Rational {
                self.$f(&rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);
forward_owned_binop!(Div, div);

impl Ring for RationalField {
    type Element = Rational;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a + b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a - b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a * b;
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = &*a + &(b * c);
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = &*a - &(b * c);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        -a
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Rational::zero()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Rational::one()
    }

    #[inline]
    fn nth(&self, n: i64) -> Self::Element {
        Rational::Natural(n, 1)
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        if e > u32::MAX as u64 {
            panic!("Power of exponentation is larger than 2^32: {}", e);
        }
        b.pow(e as u32)
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn one_is_gcd_unit() -> bool {
        false
    }
}

impl EuclideanDomain for RationalField {
    fn rem(&self, _: &Self::Element, _: &Self::Element) -> Self::Element {
        Rational::zero()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (a / b, Rational::zero())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.gcd(b)
    }
}

impl Field for RationalField {
    #[inline]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a / b
    }

    #[inline]
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a / b;
    }

    #[inline]
    fn inv(&self, a: &Self::Element) -> Self::Element {
        a.inv()
    }
}

#[cfg(test)]
mod test {
    use crate::domains::integer::Integer;

    use super::Rational;

    #[test]
    fn normalized() {
        assert_eq!(Rational::new(4, -6), Rational::Natural(-2, 3));
        assert_eq!(Rational::new(0, -5), Rational::zero());
        assert_eq!(&Rational::new(1, 3) + &Rational::new(2, 3), Rational::one());
        assert_eq!(&Rational::new(1, 2) - &Rational::new(1, 2), Rational::zero());
        assert!(Rational::new(-1, 2) < Rational::new(1, 3));
    }

    #[test]
    fn large_values_fold_back() {
        let big = Rational::from(i64::MAX);
        let sq = &big * &big;
        assert!(matches!(sq, Rational::Large(_)));
        assert_eq!(&sq / &big, big);
        assert_eq!(-Rational::from(i64::MIN), &big + &Rational::one());
    }

    #[test]
    fn gcd_of_fractions() {
        assert_eq!(
            Rational::new(2, 3).gcd(&Rational::new(-4, 9)),
            Rational::new(2, 9)
        );
        assert_eq!(Rational::zero().gcd(&Rational::new(-5, 2)), Rational::new(5, 2));
    }

    #[test]
    fn roots() {
        assert_eq!(Rational::new(4, 9).exact_root(2), Some(Rational::new(2, 3)));
        assert_eq!(Rational::new(-8, 27).exact_root(3), Some(Rational::new(-2, 3)));
        assert_eq!(Rational::new(2, 9).exact_root(2), None);
        assert_eq!(Rational::from(Integer::new(-3)).powi(-2), Rational::new(1, 9));
    }
}
