use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    ops::{Add, Mul, Neg, Sub},
};

use rug::{ops::Pow, Complete, Integer as MultiPrecisionInteger};

use crate::utils;

use super::{EuclideanDomain, Ring};

/// The integer ring.
pub type Z = IntegerRing;
/// The integer ring.
pub const Z: IntegerRing = IntegerRing::new();

/// The integer ring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct IntegerRing;

impl Default for IntegerRing {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegerRing {
    pub const fn new() -> IntegerRing {
        IntegerRing
    }
}

/// An arbitrary-precision integer. Values that fit in an `i64` are always
/// stored as [Integer::Natural], so that equality and hashing are structural.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Integer {
    Natural(i64),
    Large(MultiPrecisionInteger),
}

macro_rules! from_with_cast {
    ($base: ty) => {
        impl From<$base> for Integer {
            #[inline]
            fn from(value: $base) -> Self {
                Integer::Natural(value as i64)
            }
        }
    };
}

from_with_cast!(i8);
from_with_cast!(i16);
from_with_cast!(i32);
from_with_cast!(i64);
from_with_cast!(u8);
from_with_cast!(u16);
from_with_cast!(u32);

impl From<u64> for Integer {
    #[inline]
    fn from(value: u64) -> Self {
        if value <= i64::MAX as u64 {
            Integer::Natural(value as i64)
        } else {
            Integer::Large(value.into())
        }
    }
}

impl From<i128> for Integer {
    #[inline]
    fn from(value: i128) -> Self {
        Integer::from_double(value)
    }
}

impl From<MultiPrecisionInteger> for Integer {
    #[inline]
    fn from(n: MultiPrecisionInteger) -> Self {
        if let Some(n) = n.to_i64() {
            Integer::Natural(n)
        } else {
            Integer::Large(n)
        }
    }
}

impl std::fmt::Debug for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Integer::Natural(n) => std::fmt::Debug::fmt(n, f),
            Integer::Large(n) => std::fmt::Debug::fmt(n, f),
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Integer::Natural(n) => n.fmt(f),
            Integer::Large(n) => n.fmt(f),
        }
    }
}

impl Display for IntegerRing {
    fn fmt(&self, _: &mut Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl Integer {
    pub fn new(num: i64) -> Integer {
        Integer::Natural(num)
    }

    #[inline]
    pub fn from_double(n: i128) -> Integer {
        if n >= i64::MIN as i128 && n <= i64::MAX as i128 {
            Integer::Natural(n as i64)
        } else {
            Integer::Large(MultiPrecisionInteger::from(n))
        }
    }

    /// Round a finite float to the nearest integer.
    pub fn from_f64_rounded(f: f64) -> Option<Integer> {
        MultiPrecisionInteger::from_f64(f.round()).map(Integer::from)
    }

    pub fn to_multi_prec(&self) -> MultiPrecisionInteger {
        match self {
            Integer::Natural(n) => MultiPrecisionInteger::from(*n),
            Integer::Large(l) => l.clone(),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Integer::Natural(n) => *n as f64,
            Integer::Large(l) => l.to_f64(),
        }
    }

    #[inline]
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Integer::Natural(n) => Some(*n),
            Integer::Large(_) => None,
        }
    }

    #[inline]
    pub fn zero() -> Integer {
        Integer::Natural(0)
    }

    #[inline]
    pub fn one() -> Integer {
        Integer::Natural(1)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self, Integer::Natural(0))
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        matches!(self, Integer::Natural(1))
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Natural(n) => *n < 0,
            Integer::Large(r) => r.cmp0() == Ordering::Less,
        }
    }

    pub fn abs(&self) -> Integer {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    pub fn pow(&self, e: u32) -> Integer {
        match self {
            Integer::Natural(n) => {
                if let Some(p) = n.checked_pow(e) {
                    Integer::Natural(p)
                } else {
                    Integer::from(MultiPrecisionInteger::from(*n).pow(e))
                }
            }
            Integer::Large(r) => Integer::from(r.clone().pow(e)),
        }
    }

    /// Euclidean division: the remainder is always non-negative.
    pub fn quot_rem(&self, b: &Integer) -> (Integer, Integer) {
        if b.is_zero() {
            panic!("Cannot divide by zero");
        }

        match (self, b) {
            (Integer::Natural(a), Integer::Natural(b)) => {
                let (a, b) = (*a as i128, *b as i128);
                (
                    Integer::from_double(a.div_euclid(b)),
                    Integer::from_double(a.rem_euclid(b)),
                )
            }
            _ => {
                let (q, r) = self.to_multi_prec().div_rem_euc(b.to_multi_prec());
                (Integer::from(q), Integer::from(r))
            }
        }
    }

    /// Divide and round to the nearest integer, with ties rounded up.
    pub fn div_round(&self, b: &Integer) -> Integer {
        let b_abs = b.abs();
        let num = if b.is_negative() { -self } else { self.clone() };
        // floor((2 * num + |b|) / (2 * |b|))
        let two = Integer::Natural(2);
        (&(&two * &num) + &b_abs).quot_rem(&(&two * &b_abs)).0
    }

    pub fn divides(&self, n: &Integer) -> bool {
        !self.is_zero() && n.quot_rem(self).1.is_zero()
    }

    pub fn gcd(&self, b: &Integer) -> Integer {
        match (self, b) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                Integer::from(utils::gcd_signed(*n1, *n2))
            }
            _ => Integer::from(self.to_multi_prec().gcd(&b.to_multi_prec())),
        }
    }

    /// Compute the least common multiple of two integers.
    pub fn lcm(&self, b: &Integer) -> Integer {
        let g = self.gcd(b);
        if g.is_zero() {
            Integer::zero()
        } else {
            (&self.quot_rem(&g).0 * b).abs()
        }
    }

    /// Return the exact `n`th root, if it exists. Odd roots of negative numbers are allowed.
    pub fn exact_root(&self, n: u32) -> Option<Integer> {
        if n == 0 || (n % 2 == 0 && self.is_negative()) {
            return None;
        }

        let m = self.to_multi_prec();
        let r = m.clone().root(n);
        if (&r).pow(n).complete() == m {
            Some(Integer::from(r))
        } else {
            None
        }
    }

    /// Split off all prime factors up to `limit` by trial division. The returned
    /// cofactor is the unfactored part and is `1` when the factorization is complete.
    pub fn trial_factor(&self, limit: u64) -> (Vec<(Integer, u32)>, Integer) {
        let mut n = self.abs().to_multi_prec();
        let mut factors = vec![];

        if n.cmp0() == Ordering::Equal {
            return (factors, Integer::zero());
        }

        let limit = limit.min(u32::MAX as u64) as u32;
        let mut complete = false;
        let mut p = 2u32;
        while p <= limit {
            if n < p as u64 * p as u64 {
                complete = true;
                break;
            }

            let mut e = 0;
            while n.is_divisible_u(p) {
                n /= p;
                e += 1;
            }
            if e > 0 {
                factors.push((Integer::from(p), e));
            }

            p = if p == 2 { 3 } else { p + 2 };
        }

        let cofactor = Integer::from(n);
        if complete {
            // the remainder has no divisor below its square root
            if !cofactor.is_one() {
                factors.push((cofactor, 1));
            }
            (factors, Integer::one())
        } else {
            (factors, cofactor)
        }
    }

    /// Enumerate the positive divisors of `|self|`, treating an unfactored cofactor
    /// as if it were prime. Returns `None` for zero or when more than `max_count`
    /// divisors would be produced.
    pub fn divisors(&self, limit: u64, max_count: usize) -> Option<Vec<Integer>> {
        if self.is_zero() {
            return None;
        }

        let (mut factors, cofactor) = self.trial_factor(limit);
        if !cofactor.is_one() {
            factors.push((cofactor, 1));
        }

        let count = factors
            .iter()
            .try_fold(1usize, |acc, (_, e)| acc.checked_mul(*e as usize + 1))?;
        if count > max_count {
            return None;
        }

        let mut divisors = vec![Integer::one()];
        for (p, e) in &factors {
            let len = divisors.len();
            let mut pk = Integer::one();
            for _ in 0..*e {
                pk = &pk * p;
                for i in 0..len {
                    let d = &divisors[i] * &pk;
                    divisors.push(d);
                }
            }
        }

        divisors.sort();
        Some(divisors)
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Integer::Natural(n1), Integer::Natural(n2)) => n1.cmp(n2),
            // a large integer never fits in an i64
            (Integer::Natural(_), Integer::Large(n2)) => n2.cmp0().reverse(),
            (Integer::Large(n1), Integer::Natural(_)) => n1.cmp0(),
            (Integer::Large(n1), Integer::Large(n2)) => n1.cmp(n2),
        }
    }
}

impl<'a, 'b> Add<&'b Integer> for &'a Integer {
    type Output = Integer;

    #[inline]
    fn add(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                Integer::from_double(*n1 as i128 + *n2 as i128)
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => Integer::from((*n1 + r2).complete()),
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from((r1 + r2).complete()),
        }
    }
}

impl<'a, 'b> Sub<&'b Integer> for &'a Integer {
    type Output = Integer;

    #[inline]
    fn sub(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                Integer::from_double(*n1 as i128 - *n2 as i128)
            }
            (Integer::Natural(n1), Integer::Large(r2)) => Integer::from((*n1 - r2).complete()),
            (Integer::Large(r1), Integer::Natural(n2)) => Integer::from((r1 - *n2).complete()),
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from((r1 - r2).complete()),
        }
    }
}

impl<'a, 'b> Mul<&'b Integer> for &'a Integer {
    type Output = Integer;

    #[inline]
    fn mul(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                Integer::from_double(*n1 as i128 * *n2 as i128)
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => Integer::from((*n1 * r2).complete()),
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from((r1 * r2).complete()),
        }
    }
}

impl<'a> Neg for &'a Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        match self {
            Integer::Natural(n) => Integer::from_double(-(*n as i128)),
            Integer::Large(r) => Integer::from((-r).complete()),
        }
    }
}

impl Neg for Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        (&self).neg()
    }
}

macro_rules! forward_owned_binop {
    ($tr: ident, $f: ident) => {
        impl $tr<Integer> for Integer {
            type Output = Integer;

            #[inline]
            fn $f(self, rhs: Integer) -> Integer {
                (&self).$f(&rhs)
            }
        }

        impl<'a> $tr<&'a Integer> for Integer {
            type Output = Integer;

            #[inline]
            fn $f(self, rhs: &'a Integer) -> Integer {
                (&self).$f(rhs)
            }
        }

        impl<'a> $tr<Integer> for &'a Integer {
            type Output = Integer;

            #[inline]
            fn $f(self, rhs: Integer) -> Integer {
                self.$f(&rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);

impl Ring for IntegerRing {
    type Element = Integer;

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
        Integer::zero()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Integer::one()
    }

    #[inline]
    fn nth(&self, n: i64) -> Self::Element {
        Integer::Natural(n)
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
        true
    }
}

impl EuclideanDomain for IntegerRing {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.quot_rem(b).1
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        a.quot_rem(b)
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.gcd(b)
    }
}

#[cfg(test)]
mod test {
    use super::Integer;

    #[test]
    fn overflow_promotes() {
        let a = Integer::new(i64::MAX);
        let b = &a + &Integer::one();
        assert!(matches!(b, Integer::Large(_)));
        assert_eq!(&b - &Integer::one(), a);

        let c = &a * &a;
        assert_eq!(c.quot_rem(&a), (a.clone(), Integer::zero()));
        assert_eq!(-Integer::new(i64::MIN), &a + &Integer::one());
    }

    #[test]
    fn euclidean_division() {
        assert_eq!(
            Integer::new(-7).quot_rem(&Integer::new(2)),
            (Integer::new(-4), Integer::new(1))
        );
        assert_eq!(Integer::new(7).div_round(&Integer::new(2)), Integer::new(4));
        assert_eq!(Integer::new(-7).div_round(&Integer::new(2)), Integer::new(-3));
        assert_eq!(Integer::new(-8).div_round(&Integer::new(3)), Integer::new(-3));
        assert_eq!(Integer::new(10).div_round(&Integer::new(-4)), Integer::new(-2));
    }

    #[test]
    fn roots() {
        assert_eq!(Integer::new(49).exact_root(2), Some(Integer::new(7)));
        assert_eq!(Integer::new(-27).exact_root(3), Some(Integer::new(-3)));
        assert_eq!(Integer::new(-4).exact_root(2), None);
        assert_eq!(Integer::new(50).exact_root(2), None);
    }

    #[test]
    fn divisors() {
        let d = Integer::new(-12).divisors(1000, 100).unwrap();
        let expected: Vec<Integer> = [1, 2, 3, 4, 6, 12].into_iter().map(Integer::new).collect();
        assert_eq!(d, expected);

        let (f, rest) = Integer::new(2 * 3 * 3 * 1_000_003).trial_factor(100);
        assert_eq!(f, vec![(Integer::new(2), 1), (Integer::new(3), 2)]);
        assert_eq!(rest, Integer::new(1_000_003));

        let (f, rest) = Integer::new(97).trial_factor(1000);
        assert_eq!(f, vec![(Integer::new(97), 1)]);
        assert!(rest.is_one());

        assert_eq!(Integer::zero().divisors(100, 10), None);
    }
}
