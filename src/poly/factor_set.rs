use std::fmt::Display;
use std::sync::Arc;

use ahash::{HashMap, HashMapExt};
use smallvec::smallvec;

use crate::domains::rational::{Rational, RationalField, Q};

use super::{polynomial::MultivariatePolynomial, ExponentVector, VariableMap};

/// A factor `base^power` of a [FactorSet].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Factor {
    pub base: MultivariatePolynomial<RationalField>,
    pub power: i64,
}

impl Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.base.nterms() > 1 || self.base.lcoeff().is_negative() {
            write!(f, "({})", self.base)?;
        } else {
            write!(f, "{}", self.base)?;
        }

        if self.power != 1 {
            write!(f, "^{}", self.power)?;
        }
        Ok(())
    }
}

/// A product of powers of polynomials and a rational constant.
///
/// Every non-constant base is stored primitive with a positive leading coefficient,
/// keyed by its printed form, so that equal factors merge by adding their powers.
/// The content that is split off is moved into the constant.
#[derive(Clone, Debug)]
pub struct FactorSet {
    variables: Arc<VariableMap>,
    constant: Rational,
    factors: HashMap<String, Factor>,
}

impl FactorSet {
    /// Create the empty product, which is 1.
    pub fn new(variables: Arc<VariableMap>) -> FactorSet {
        FactorSet {
            variables,
            constant: Rational::one(),
            factors: HashMap::new(),
        }
    }

    pub fn variables(&self) -> &Arc<VariableMap> {
        &self.variables
    }

    /// The constant multiplier, before any sign folding.
    pub fn constant(&self) -> &Rational {
        &self.constant
    }

    /// The number of non-constant factors.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.constant.is_zero()
    }

    /// Multiply the constant by `c^power`.
    pub fn add_constant(&mut self, c: &Rational, power: i64) {
        if self.constant.is_zero() {
            return;
        }

        if c.is_zero() {
            self.constant = Rational::zero();
            self.factors.clear();
            return;
        }

        self.constant = &self.constant * &c.powi(power);
    }

    /// Multiply the set by `base^power`.
    pub fn add(&mut self, base: &MultivariatePolynomial<RationalField>, power: i64) {
        assert_eq!(base.variables, self.variables);

        if power == 0 || self.constant.is_zero() {
            return;
        }

        if base.is_constant() {
            self.add_constant(&base.get_constant(), power);
            return;
        }

        if base.nterms() == 1 {
            let t = &base.terms()[0];
            self.add_constant(&t.coefficient, power);
            for (v, e) in t.exponents().iter().enumerate() {
                if *e > 0 {
                    self.add_entry(base.variable(v), *e as i64 * power);
                }
            }
            return;
        }

        let (content, primitive) = base.content_and_primitive();
        self.add_constant(&content, power);
        self.add_entry(primitive, power);
    }

    fn add_entry(&mut self, base: MultivariatePolynomial<RationalField>, power: i64) {
        let key = base.to_string();
        match self.factors.get_mut(&key) {
            Some(f) => {
                f.power += power;
                if f.power == 0 {
                    self.factors.remove(&key);
                }
            }
            None => {
                self.factors.insert(key, Factor { base, power });
            }
        }
    }

    /// Multiply by all factors of `other`.
    pub fn merge(&mut self, other: FactorSet) {
        self.add_constant(&other.constant, 1);
        for (_, f) in other.factors {
            self.add(&f.base, f.power);
        }
    }

    /// The factors sorted by their key.
    pub fn factors(&self) -> Vec<&Factor> {
        let mut keys: Vec<_> = self.factors.iter().collect();
        keys.sort_by(|a, b| a.0.cmp(b.0));
        keys.into_iter().map(|(_, f)| f).collect()
    }

    /// Return the constant and the sorted factors. A constant of `-1` is
    /// absorbed into the first factor with an odd power, if there is one.
    pub fn into_factors(self) -> (Rational, Vec<Factor>) {
        let mut constant = self.constant.clone();
        let mut factors: Vec<Factor> = self.factors().into_iter().cloned().collect();

        if constant == Rational::from(-1) {
            if let Some(f) = factors.iter_mut().find(|f| f.power % 2 != 0) {
                f.base = -f.base.clone();
                constant = Rational::one();
            }
        }

        (constant, factors)
    }

    /// Multiply out the product. Returns `None` if a factor has a negative power.
    pub fn expand(&self) -> Option<MultivariatePolynomial<RationalField>> {
        let exponents: ExponentVector = smallvec![0; self.variables.len()];
        let mut p = MultivariatePolynomial::new(&Q, self.variables.clone())
            .monomial(self.constant.clone(), exponents);

        for f in self.factors() {
            if f.power < 0 {
                return None;
            }
            p = &p * &f.base.pow(f.power as usize);
        }
        Some(p)
    }
}

impl Display for FactorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (constant, factors) = self.clone().into_factors();

        if constant.is_zero() || factors.is_empty() {
            return write!(f, "{}", constant);
        }

        if constant == Rational::from(-1) {
            f.write_str("-")?;
        } else if !constant.is_one() {
            write!(f, "{}*", constant)?;
        }

        for (i, factor) in factors.iter().enumerate() {
            if i > 0 {
                f.write_str("*")?;
            }
            write!(f, "{}", factor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::domains::rational::Rational;
    use crate::poly::parse::{parse_polynomial, parse_polynomials};

    use super::FactorSet;

    #[test]
    fn merge_powers() {
        let ps = parse_polynomials(&["2x+2", "x+1", "-3x^2*y"]).unwrap();
        let mut set = FactorSet::new(ps[0].variables.clone());
        set.add(&ps[0], 2);
        set.add(&ps[1], 1);
        set.add(&ps[2], 1);

        assert_eq!(set.len(), 3);
        assert_eq!(set.constant(), &Rational::from(-12));
        assert_eq!(format!("{}", set), "-12*x^2*(x+1)^3*y");
        assert_eq!(set.expand().unwrap(), &ps[0].pow(2) * &(&ps[1] * &ps[2]));

        set.add(&ps[1], -3);
        assert_eq!(set.len(), 2);
        assert!(set.expand().is_some());
    }

    #[test]
    fn sign_folding() {
        let p = parse_polynomial("-x+1", None).unwrap();
        let mut set = FactorSet::new(p.variables.clone());
        set.add(&p, 1);
        assert_eq!(set.constant(), &Rational::from(-1));
        assert_eq!(format!("{}", set), "(-x+1)");

        let (c, factors) = set.clone().into_factors();
        assert!(c.is_one());
        assert_eq!(factors[0].base, p);

        let mut squared = FactorSet::new(p.variables.clone());
        squared.add(&p, 2);
        squared.add_constant(&Rational::from(-1), 1);
        assert_eq!(format!("{}", squared), "-(x-1)^2");
    }

    #[test]
    fn zero() {
        let p = parse_polynomial("x+1", None).unwrap();
        let mut set = FactorSet::new(p.variables.clone());
        set.add(&p, 1);
        set.add(&p.zero(), 1);
        assert!(set.is_zero());
        assert!(set.is_empty());
        assert_eq!(format!("{}", set), "0");
    }
}
