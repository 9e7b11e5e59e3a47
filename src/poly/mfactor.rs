//! Factoring stages for polynomials in several variables.
//!
//! Each stage looks for a single split `p = a * b` of a primitive polynomial
//! without a monomial content and reports it as a [StageOutcome]. The
//! orchestrator in [factor](super::factor) recurses on both parts.
use ahash::HashSet;
use tracing::debug;

use crate::domains::rational::RationalField;
use crate::settings::Settings;

use super::{factor::StageOutcome, polynomial::MultivariatePolynomial, ExponentVector};

type Poly = MultivariatePolynomial<RationalField>;

impl MultivariatePolynomial<RationalField> {
    /// Strip the content and the monomial content.
    fn primitive_part(&self) -> Poly {
        let (_, p) = self.content_and_primitive();
        let m = p.min_exponents();
        if m.iter().all(|e| *e == 0) {
            return p;
        }

        match p.try_div_monomial(&m) {
            Some(q) => q,
            None => p,
        }
    }

    /// Try the primitive part of every partial derivative as a divisor.
    /// A repeated factor `f^k` leaves `f^(k-1)` in the derivative.
    pub fn m_sqfr_factor(&self, settings: &Settings) -> StageOutcome<(Poly, Poly)> {
        for v in self.occurring_variables() {
            let d = self.derivative(v).primitive_part();
            if d.nterms() < 2 {
                continue;
            }

            if let Some(q) = self.divides(&d, settings) {
                debug!("Derivative in {} divides {}", self.variables.get(v), self);
                return StageOutcome::Factored((d, q));
            }
        }

        StageOutcome::Unchanged
    }

    /// The square or cube root of a term, if the coefficient and all exponents allow it.
    fn term_root(&self, index: usize, n: u32) -> Option<Poly> {
        let t = &self.terms()[index];
        if t.exponents().iter().any(|e| e % n != 0) {
            return None;
        }

        let c = t.coefficient.exact_root(n)?;
        let exponents: ExponentVector = t.exponents().iter().map(|e| e / n).collect();
        Some(self.monomial(c, exponents))
    }

    /// Factor `a^2 - b^2 = (a - b)(a + b)` for a binomial.
    pub fn difference_of_squares(&self) -> StageOutcome<(Poly, Poly)> {
        if self.nterms() != 2 {
            return StageOutcome::Unchanged;
        }

        let (c1, c2) = (&self.terms()[0].coefficient, &self.terms()[1].coefficient);
        if c1.is_negative() == c2.is_negative() {
            return StageOutcome::Unchanged;
        }

        // move the sign out of the negative term so that both roots exist
        let (pos, neg) = if c2.is_negative() { (0, 1) } else { (1, 0) };
        let neg_term = -self.monomial(
            self.terms()[neg].coefficient.clone(),
            self.terms()[neg].exponent_vector().clone(),
        );

        let (Some(a), Some(b)) = (self.term_root(pos, 2), neg_term.term_root(0, 2)) else {
            return StageOutcome::Unchanged;
        };

        debug!("Difference of squares: {}", self);
        StageOutcome::Factored((&a - &b, &a + &b))
    }

    /// Factor `a^3 + b^3 = (a + b)(a^2 - a*b + b^2)` for a binomial. A difference
    /// of cubes is covered by a negative `b`.
    pub fn sum_of_cubes(&self) -> StageOutcome<(Poly, Poly)> {
        if self.nterms() != 2 {
            return StageOutcome::Unchanged;
        }

        let (Some(a), Some(b)) = (self.term_root(0, 3), self.term_root(1, 3)) else {
            return StageOutcome::Unchanged;
        };

        debug!("Sum of cubes: {}", self);
        let ab = &a * &b;
        let quadratic = &(&a.pow(2) - &ab) + &b.pow(2);
        StageOutcome::Factored((&a + &b, quadratic))
    }

    /// Group the terms by the power of each variable and try the primitive part
    /// of every group coefficient as a divisor.
    pub fn group_factor(&self, settings: &Settings) -> StageOutcome<(Poly, Poly)> {
        let mut tried: HashSet<Poly> = HashSet::default();

        for v in self.occurring_variables() {
            for (_, c) in self.coefficients_in(v) {
                let g = c.primitive_part();
                if g.nterms() < 2 || g == *self || !tried.insert(g.clone()) {
                    continue;
                }

                if let Some(q) = self.divides(&g, settings) {
                    if !q.is_constant() {
                        debug!(
                            "Grouping by {} gives factor {} of {}",
                            self.variables.get(v),
                            g,
                            self
                        );
                        return StageOutcome::Factored((g, q));
                    }
                }
            }
        }

        StageOutcome::Unchanged
    }
}

#[cfg(test)]
mod test {
    use crate::poly::factor::StageOutcome;
    use crate::poly::parse::parse_polynomials;
    use crate::settings::Settings;

    #[test]
    fn squares() {
        let ps = parse_polynomials(&["4x^2-9y^4", "2x-3y^2", "2x+3y^2"]).unwrap();
        assert_eq!(
            ps[0].difference_of_squares(),
            StageOutcome::Factored((ps[1].clone(), ps[2].clone()))
        );

        let ps = parse_polynomials(&["x^2+y^2", "x^2-2y^2"]).unwrap();
        assert_eq!(ps[0].difference_of_squares(), StageOutcome::Unchanged);
        assert_eq!(ps[1].difference_of_squares(), StageOutcome::Unchanged);
    }

    #[test]
    fn cubes() {
        let ps = parse_polynomials(&["x^3-8y^3", "x-2y", "x^2+2x*y+4y^2"]).unwrap();
        assert_eq!(
            ps[0].sum_of_cubes(),
            StageOutcome::Factored((ps[1].clone(), ps[2].clone()))
        );
    }

    #[test]
    fn repeated_factor() {
        let ps = parse_polynomials(&["(x+y)^3", "(x+y)^2", "x+y", "(x+y)^2*(x-y)"]).unwrap();
        let settings = Settings::default();
        assert_eq!(
            ps[0].m_sqfr_factor(&settings),
            StageOutcome::Factored((ps[1].clone(), ps[2].clone()))
        );

        // neither partial derivative divides a product with distinct factors
        assert_eq!(ps[3].m_sqfr_factor(&settings), StageOutcome::Unchanged);
    }

    #[test]
    fn grouping() {
        let ps = parse_polynomials(&[
            "x^2*y^3+b*y^2+3*a*x^2*y+3*a*b",
            "y^2+3*a",
            "x^2*y+b",
        ])
        .unwrap();
        assert_eq!(
            ps[0].group_factor(&Settings::default()),
            StageOutcome::Factored((ps[1].clone(), ps[2].clone()))
        );
    }
}
