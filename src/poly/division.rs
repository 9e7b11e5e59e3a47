//! Heuristic division of multivariate polynomials.
//!
//! There is no fixed monomial order. The leading term of a polynomial is chosen
//! per call: among the terms of highest total degree, the variable whose highest
//! exponent stands out most from the runner-up governs, and the term with the
//! highest power of that variable leads. When no variable stands out the first
//! term in graded order leads. The division is best-effort: it always satisfies
//! `quotient * divisor + remainder == dividend`, but the remainder need not be
//! reduced with respect to any fixed order.
use tracing::debug;

use crate::domains::{Field, Ring};
use crate::settings::Settings;

use super::{
    monomial::Term, polynomial::MultivariatePolynomial, ExponentVector, PolynomialError,
};

/// The result of a heuristic division.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DivisionOutcome<F: Ring> {
    Divided {
        quotient: MultivariatePolynomial<F>,
        remainder: MultivariatePolynomial<F>,
    },
    /// The reduction did not settle within the iteration cap, or the divisor
    /// uses a different variable map. The dividend is returned unchanged.
    DegenerateStop { dividend: MultivariatePolynomial<F> },
}

/// Select the index of the leading term of a list of terms sorted in graded order.
pub fn leading_term_index<F: Ring>(terms: &[Term<F>]) -> Option<usize> {
    let top = terms.first()?.total_degree();
    let tied = terms
        .iter()
        .take_while(|t| t.total_degree() == top)
        .count();
    if tied == 1 {
        return Some(0);
    }

    let nvars = terms[0].exponents().len();
    let mut governing: Option<(usize, u32)> = None;
    let mut unique = false;
    for v in 0..nvars {
        let (mut max, mut second) = (0, 0);
        for t in &terms[..tied] {
            let e = t.exponents()[v];
            if e > max {
                second = max;
                max = e;
            } else if e > second {
                second = e;
            }
        }

        let gap = max - second;
        match governing {
            Some((_, g)) if gap < g => {}
            Some((_, g)) if gap == g => unique = false,
            _ => {
                governing = Some((v, gap));
                unique = true;
            }
        }
    }

    match governing {
        Some((v, gap)) if unique && gap > 0 => terms[..tied]
            .iter()
            .enumerate()
            .max_by(|(i, a), (j, b)| a.exponents()[v].cmp(&b.exponents()[v]).then(j.cmp(i)))
            .map(|(i, _)| i),
        _ => Some(0),
    }
}

impl<F: Field> MultivariatePolynomial<F> {
    /// The leading term according to the division heuristic.
    pub fn heuristic_leading_term(&self) -> Option<&Term<F>> {
        leading_term_index(self.terms()).map(|i| &self.terms()[i])
    }

    /// Divide `self` by `div` with the leading-term heuristic.
    ///
    /// Only a zero divisor is an error. A run that does not settle within
    /// [Settings::max_division_iterations] steps, or a divisor over a different
    /// variable map, yields [DivisionOutcome::DegenerateStop].
    pub fn heuristic_divide(
        &self,
        div: &Self,
        settings: &Settings,
    ) -> Result<DivisionOutcome<F>, PolynomialError> {
        if div.is_zero() {
            return Err(PolynomialError::DivisionDegenerate);
        }

        if self.variables != div.variables {
            debug!("Cannot divide {} by {} over a different variable map", self, div);
            return Ok(DivisionOutcome::DegenerateStop {
                dividend: self.clone(),
            });
        }

        let (Some(div_lead), Some(lead)) = (div.heuristic_leading_term(), self.heuristic_leading_term())
        else {
            return Ok(DivisionOutcome::Divided {
                quotient: self.zero(),
                remainder: self.zero(),
            });
        };

        // a divisor whose governing variable has a higher power than the dividend
        // leader can never divide it, so the dividend is scaled up first
        let compensation: Option<ExponentVector> = div_lead.lead_variable().and_then(|v| {
            let (need, have) = (div_lead.exponents()[v], lead.exponents()[v]);
            (need > have).then(|| {
                let mut m: ExponentVector = smallvec::smallvec![0; self.nvars()];
                m[v] = need - have;
                m
            })
        });

        if let Some(m) = compensation {
            let scaled = self.mul_term(&Term::new(self.field.one(), m.clone()));
            let Some((q, r)) = self.reduce(scaled, div, div_lead, settings) else {
                return Ok(self.degenerate(div, settings));
            };

            if let (Some(quotient), Some(remainder)) = (q.try_div_monomial(&m), r.try_div_monomial(&m)) {
                return Ok(DivisionOutcome::Divided {
                    quotient,
                    remainder,
                });
            }

            debug!(
                "Compensating monomial does not divide the result of {} / {}, dividing without it",
                self, div
            );
        }

        Ok(match self.reduce(self.clone(), div, div_lead, settings) {
            Some((quotient, remainder)) => DivisionOutcome::Divided {
                quotient,
                remainder,
            },
            None => self.degenerate(div, settings),
        })
    }

    /// Reduce `rem` by `div`. A leading term that `div_lead` does not divide is
    /// moved to the remainder. Returns `None` when the number of reduction steps
    /// exceeds the iteration cap.
    fn reduce(
        &self,
        mut rem: Self,
        div: &Self,
        div_lead: &Term<F>,
        settings: &Settings,
    ) -> Option<(Self, Self)> {
        let mut quotient = vec![];
        let mut remainder = vec![];
        let mut iterations = 0;
        while let Some(lt) = rem.heuristic_leading_term() {
            match lt.try_div(div_lead, &self.field) {
                Some(q) => {
                    iterations += 1;
                    if iterations > settings.max_division_iterations {
                        return None;
                    }

                    rem = &rem - &div.mul_term(&q);
                    quotient.push(q);
                }
                None => {
                    let lt = lt.clone();
                    rem = &rem - &rem.monomial(lt.coefficient.clone(), lt.exponent_vector().clone());
                    remainder.push(lt);
                }
            }
        }

        let mut q = self.zero();
        q.set_terms(quotient);
        let mut r = self.zero();
        r.set_terms(remainder);
        Some((q, r))
    }

    fn degenerate(&self, div: &Self, settings: &Settings) -> DivisionOutcome<F> {
        debug!(
            "Division of {} by {} did not settle after {} steps",
            self, div, settings.max_division_iterations
        );
        DivisionOutcome::DegenerateStop {
            dividend: self.clone(),
        }
    }

    /// Divide `self` by `div`, returning `(quotient, remainder)`. A degenerate
    /// run returns `(0, self)`.
    pub fn quot_rem(&self, div: &Self, settings: &Settings) -> Result<(Self, Self), PolynomialError> {
        Ok(match self.heuristic_divide(div, settings)? {
            DivisionOutcome::Divided {
                quotient,
                remainder,
            } => (quotient, remainder),
            DivisionOutcome::DegenerateStop { dividend } => (self.zero(), dividend),
        })
    }

    /// Return the quotient if the heuristic division by `div` leaves no remainder.
    pub fn divides(&self, div: &Self, settings: &Settings) -> Option<Self> {
        match self.heuristic_divide(div, settings) {
            Ok(DivisionOutcome::Divided {
                quotient,
                remainder,
            }) if remainder.is_zero() => Some(quotient),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use smallvec::smallvec;

    use crate::domains::rational::{Rational, RationalField, Q};
    use crate::poly::{monomial::Term, polynomial::MultivariatePolynomial, PolynomialError, VariableMap};
    use crate::settings::Settings;

    use super::{leading_term_index, DivisionOutcome};

    fn xy() -> (MultivariatePolynomial<RationalField>, MultivariatePolynomial<RationalField>) {
        let vars: Arc<VariableMap> = Arc::new(["x", "y"].into_iter().collect());
        let zero = MultivariatePolynomial::new(&Q, vars);
        (zero.variable(0), zero.variable(1))
    }

    #[test]
    fn governing_variable() {
        let terms: Vec<Term<RationalField>> = vec![
            Term::new(Rational::one(), smallvec![2, 1]),
            Term::new(Rational::one(), smallvec![0, 3]),
            Term::new(Rational::one(), smallvec![1, 0]),
        ];
        // y has gap 2 against gap 2 for x: no unique governing variable
        assert_eq!(leading_term_index(&terms), Some(0));

        let terms: Vec<Term<RationalField>> = vec![
            Term::new(Rational::one(), smallvec![2, 1]),
            Term::new(Rational::one(), smallvec![1, 2]),
            Term::new(Rational::one(), smallvec![0, 3]),
        ];
        // x: 2 vs 1, y: 3 vs 2, equal gaps again
        assert_eq!(leading_term_index(&terms), Some(0));

        let terms: Vec<Term<RationalField>> = vec![
            Term::new(Rational::one(), smallvec![1, 1, 1]),
            Term::new(Rational::one(), smallvec![0, 3, 0]),
        ];
        assert_eq!(leading_term_index(&terms), Some(1));
    }

    #[test]
    fn exact_division() {
        let (x, y) = xy();
        let s = &x + &y;
        let p = s.pow(3);
        let settings = Settings::default();
        let (q, r) = p.quot_rem(&s, &settings).unwrap();
        assert_eq!(q, s.pow(2));
        assert!(r.is_zero());
    }

    #[test]
    fn remainder_round_trip() {
        let (x, y) = xy();
        let p = &(&x.pow(3) + &y.pow(2)) + &x.one();
        let d = &x - &y;
        let (q, r) = p.quot_rem(&d, &Settings::default()).unwrap();
        assert_eq!(&(&q * &d) + &r, p);
    }

    #[test]
    fn compensation() {
        let vars: Arc<VariableMap> = Arc::new(["x", "y", "z"].into_iter().collect());
        let zero = MultivariatePolynomial::new(&Q, vars);
        let (x, y, z) = (zero.variable(0), zero.variable(1), zero.variable(2));

        // the leader x^6 has no y while the divisor leads with y^2*z
        let d = &(&y.pow(2) * &z) + &x;
        let p = &x.pow(6) + &(&y.pow(2) * &d);
        assert_eq!(
            p.heuristic_divide(&d, &Settings::default()).unwrap(),
            DivisionOutcome::Divided {
                quotient: y.pow(2),
                remainder: x.pow(6),
            }
        );
    }

    #[test]
    fn compensation_fallback() {
        let (x, y) = xy();
        let p = &(&x.pow(2) * &y) + &x.pow(3);
        let d = &y.pow(2) + &x;
        assert_eq!(
            p.heuristic_divide(&d, &Settings::default()).unwrap(),
            DivisionOutcome::Divided {
                quotient: p.zero(),
                remainder: p.clone(),
            }
        );

        let p = &(&x * &y.pow(2)) + &y.pow(3);
        let d = y.pow(3).mul_coeff(&Rational::from(3));
        let (q, r) = p.quot_rem(&d, &Settings::default()).unwrap();
        assert_eq!(q, p.constant(Rational::new(1, 3)));
        assert_eq!(r, &x * &y.pow(2));
    }

    #[test]
    fn different_maps() {
        let (x, _) = xy();
        let vars: Arc<VariableMap> = Arc::new(["x"].into_iter().collect());
        let other = MultivariatePolynomial::new(&Q, vars).variable(0);
        assert_eq!(
            x.heuristic_divide(&other, &Settings::default()).unwrap(),
            DivisionOutcome::DegenerateStop { dividend: x.clone() }
        );
    }

    #[test]
    fn iteration_cap() {
        let (x, y) = xy();
        let p = (&x + &y).pow(6);
        let d = &x + &y;
        let settings = Settings::default().with_max_division_iterations(2);
        assert_eq!(
            p.heuristic_divide(&d, &settings).unwrap(),
            DivisionOutcome::DegenerateStop {
                dividend: p.clone()
            }
        );
        assert_eq!(p.quot_rem(&d, &settings).unwrap(), (p.zero(), p.clone()));
    }

    #[test]
    fn zero_divisor() {
        let (x, _) = xy();
        assert_eq!(
            x.quot_rem(&x.zero(), &Settings::default()),
            Err(PolynomialError::DivisionDegenerate)
        );
    }
}
