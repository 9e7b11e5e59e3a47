use std::{
    fmt::{Display, Formatter},
    ops::{Add, Mul, Sub},
};

/// A complex number, `re + i * im`, where `i` is the imaginary unit.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    #[inline]
    pub fn new(re: T, im: T) -> Complex<T> {
        Complex { re, im }
    }
}

impl Complex<f64> {
    #[inline]
    pub fn is_real(&self) -> bool {
        self.im == 0.0
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.re.hypot(self.im)
    }

    #[inline]
    pub fn conj(&self) -> Self {
        Complex::new(self.re, -self.im)
    }

    /// Evaluate a polynomial with real coefficients, given from the highest degree down,
    /// at this point using Horner's scheme.
    pub fn evaluate_polynomial(&self, coefficients: &[f64]) -> Self {
        let mut r = Complex::new(0., 0.);
        for c in coefficients {
            r = r * *self + Complex::new(*c, 0.);
        }
        r
    }
}

impl Add for Complex<f64> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex<f64> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex<f64> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl<T: Display + Default + PartialEq + PartialOrd> Display for Complex<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let zero = T::default();
        if self.im == zero {
            return write!(f, "{}", self.re);
        }

        if self.re == zero {
            return write!(f, "{}i", self.im);
        }

        if self.im < zero {
            write!(f, "{}{}i", self.re, self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod test {
    use super::Complex;

    #[test]
    fn horner() {
        // x^2 + 1 at i
        let i = Complex::new(0., 1.);
        assert_eq!(i.evaluate_polynomial(&[1., 0., 1.]), Complex::new(0., 0.));
        assert_eq!(format!("{}", Complex::new(1.5, -2.)), "1.5-2i");
        assert_eq!(format!("{}", Complex::new(0., 3.)), "3i");
    }
}
