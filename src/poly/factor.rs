//! Factorization of polynomials with rational coefficients.
//!
//! The orchestrator splits off the content and the monomial content, then
//! dispatches polynomials in one variable to the univariate pipeline:
//! square-free decomposition, trial division by candidates built from numerical
//! roots, and a digit-fit search for factors without rational roots. Polynomials
//! in several variables go through the heuristic stages of
//! [mfactor](super::mfactor). All stages are best-effort: a factor that is
//! reported is always exact, but a reported factor need not be irreducible.
use ahash::HashSet;
use tracing::{debug, instrument};

use crate::domains::{
    float::Complex,
    integer::Integer,
    rational::{Rational, RationalField, Q},
};
use crate::root_finding::RootFinder;
use crate::settings::Settings;

use super::{
    factor_set::FactorSet, polynomial::MultivariatePolynomial, univariate::UnivariatePolynomial,
};

type UPoly = UnivariatePolynomial<RationalField>;
type MPoly = MultivariatePolynomial<RationalField>;

/// The result of a single factoring stage.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum StageOutcome<T> {
    Factored(T),
    /// The stage found nothing to split.
    Unchanged,
    /// The stage hit one of the search limits of [Settings].
    Aborted,
}

/// The result of a factorization.
#[derive(Clone, Debug)]
pub enum FactorOutcome {
    Factored(FactorSet),
    /// No split was found apart from a sign.
    Unchanged,
    /// The factorization did not multiply back to the input and was discarded.
    Aborted,
}

/// Factorization of polynomials into a [FactorSet].
pub trait Factorize {
    /// Factor the polynomial, reporting whether anything was split.
    fn try_factor(&self, settings: &Settings) -> FactorOutcome;

    /// Factor the polynomial. When nothing is split, the set holds the input.
    fn factor(&self, settings: &Settings) -> FactorSet;
}

impl Factorize for MultivariatePolynomial<RationalField> {
    #[instrument(level = "debug", skip_all, fields(poly = %self))]
    fn try_factor(&self, settings: &Settings) -> FactorOutcome {
        let mut factorizer = Factorizer::new(settings);
        let mut set = FactorSet::new(self.variables.clone());
        factorizer.multivariate(self, 1, 0, &mut set);

        if set.expand().as_ref() != Some(self) {
            debug!("Factors {} do not multiply to {}", set, self);
            return FactorOutcome::Aborted;
        }

        let trivial = set.constant().abs().is_one()
            && set.len() <= 1
            && set.factors().iter().all(|f| f.power == 1);
        if trivial {
            FactorOutcome::Unchanged
        } else {
            FactorOutcome::Factored(set)
        }
    }

    fn factor(&self, settings: &Settings) -> FactorSet {
        match self.try_factor(settings) {
            FactorOutcome::Factored(set) => set,
            FactorOutcome::Unchanged | FactorOutcome::Aborted => {
                let mut set = FactorSet::new(self.variables.clone());
                set.add(self, 1);
                set
            }
        }
    }
}

impl Factorize for UnivariatePolynomial<RationalField> {
    fn try_factor(&self, settings: &Settings) -> FactorOutcome {
        self.to_multivariate().try_factor(settings)
    }

    fn factor(&self, settings: &Settings) -> FactorSet {
        self.to_multivariate().factor(settings)
    }
}

/// The state of one factorization: the settings and the number of candidate
/// factors tested so far.
pub(crate) struct Factorizer<'a> {
    settings: &'a Settings,
    candidates: usize,
}

impl<'a> Factorizer<'a> {
    pub(crate) fn new(settings: &'a Settings) -> Factorizer<'a> {
        Factorizer {
            settings,
            candidates: 0,
        }
    }

    /// Count a candidate. Returns `false` once the budget is exhausted.
    fn spend_candidate(&mut self) -> bool {
        self.candidates += 1;
        self.candidates <= self.settings.max_search_candidates
    }

    /// Multiply `set` by the factors of `p^power`.
    pub(crate) fn multivariate(&mut self, p: &MPoly, power: i64, depth: usize, set: &mut FactorSet) {
        if p.is_constant() {
            set.add(p, power);
            return;
        }

        let (content, mut prim) = p.content_and_primitive();
        set.add_constant(&content, power);

        let m = prim.min_exponents();
        if m.iter().any(|e| *e > 0) {
            set.add(&prim.monomial(Rational::one(), m.clone()), power);
            if let Some(q) = prim.try_div_monomial(&m) {
                prim = q;
            }
        }

        if prim.is_constant() {
            set.add(&prim, power);
            return;
        }

        let vars = prim.occurring_variables();
        if let [var] = vars[..] {
            if let Some(u) = prim.to_univariate(var) {
                self.univariate(&u, var, power, depth, set);
                return;
            }
        }

        if depth >= self.settings.max_factor_depth {
            debug!("Maximum factoring depth reached for {}", prim);
            set.add(&prim, power);
            return;
        }

        let stages: [fn(&MPoly, &Settings) -> StageOutcome<(MPoly, MPoly)>; 4] = [
            MPoly::m_sqfr_factor,
            |p, _| p.difference_of_squares(),
            |p, _| p.sum_of_cubes(),
            MPoly::group_factor,
        ];

        for stage in stages {
            match stage(&prim, self.settings) {
                StageOutcome::Factored((a, b)) => {
                    self.multivariate(&a, power, depth + 1, set);
                    self.multivariate(&b, power, depth + 1, set);
                    return;
                }
                StageOutcome::Aborted => break,
                StageOutcome::Unchanged => {}
            }
        }

        set.add(&prim, power);
    }

    /// Multiply `set` by the factors of `p^power`, where `p` is a polynomial in
    /// the variable with index `var` of the set.
    pub(crate) fn univariate(
        &mut self,
        p: &UPoly,
        var: usize,
        power: i64,
        depth: usize,
        set: &mut FactorSet,
    ) {
        let (content, mut prim) = p.content_and_primitive();
        set.add_constant(&content, power);

        let e = prim.lowest_degree();
        if e > 0 {
            let x = lift(&prim.monomial(Rational::one(), 1), var, set);
            set.add(&x, e as i64 * power);
            prim = prim.div_exp(e);
        }

        if prim.is_constant() {
            return;
        }

        for (part, k) in prim.square_free_factorization() {
            self.split_square_free(&part, var, power * k as i64, depth, set);
        }
    }

    /// Split a square-free polynomial with trial division and the digit-fit search.
    fn split_square_free(
        &mut self,
        p: &UPoly,
        var: usize,
        power: i64,
        depth: usize,
        set: &mut FactorSet,
    ) {
        let (content, p) = p.content_and_primitive();
        set.add_constant(&content, power);

        if p.degree() <= 1 || depth >= self.settings.max_factor_depth {
            let p = lift(&p, var, set);
            set.add(&p, power);
            return;
        }

        let mut outcome = self.trial_and_error(&p);
        if outcome == StageOutcome::Unchanged && p.degree() >= 4 {
            outcome = self.search(&p);
        }

        match outcome {
            StageOutcome::Factored((a, b)) => {
                self.split_square_free(&a, var, power, depth + 1, set);
                self.split_square_free(&b, var, power, depth + 1, set);
            }
            StageOutcome::Unchanged | StageOutcome::Aborted => {
                let p = lift(&p, var, set);
                set.add(&p, power);
            }
        }
    }

    /// Test `candidate` as a proper divisor of `p`.
    fn try_candidate(
        &mut self,
        p: &UPoly,
        candidate: UPoly,
        tried: &mut HashSet<UPoly>,
    ) -> StageOutcome<(UPoly, UPoly)> {
        if candidate.is_constant() || candidate.degree() >= p.degree() {
            return StageOutcome::Unchanged;
        }

        let (_, candidate) = candidate.content_and_primitive();
        if !tried.insert(candidate.clone()) {
            return StageOutcome::Unchanged;
        }

        if !self.spend_candidate() {
            return StageOutcome::Aborted;
        }

        match p.divides(&candidate) {
            Some(q) => {
                debug!("Found factor {} of {}", candidate, p);
                StageOutcome::Factored((candidate, q))
            }
            None => StageOutcome::Unchanged,
        }
    }

    /// Turn the numerical roots of a primitive square-free polynomial into linear
    /// and quadratic candidates with integer coefficients and test them by exact
    /// division. When the numerical candidates fail, all rational roots `d/q`
    /// with `q` dividing the leading coefficient and `d` the constant are tested,
    /// provided that there are not too many of them.
    pub(crate) fn trial_and_error(&mut self, p: &UPoly) -> StageOutcome<(UPoly, UPoly)> {
        let lead = p.lcoeff().numerator();
        let constant = p.get_constant().numerator();
        let limit = self.settings.trial_division_limit;
        let max_count = self.settings.max_search_candidates;

        let Some(lead_divisors) = lead.divisors(limit, max_count) else {
            return StageOutcome::Aborted;
        };

        let mut tried = HashSet::default();

        let roots = match RootFinder::new(self.settings).solve(&p.to_f64_coefficients()) {
            Ok(r) => r.roots,
            Err(e) => {
                debug!("No numerical roots for {}: {}", p, e);
                vec![]
            }
        };

        let (real, complex): (Vec<Complex<f64>>, Vec<Complex<f64>>) =
            roots.into_iter().partition(|r| r.is_real());

        let linear = |q: &Integer, r: f64| {
            let d = Integer::from_f64_rounded(r * q.to_f64())?;
            Some(from_integers(p, &[-d, q.clone()]))
        };
        let quadratic = |q: &Integer, sum: f64, product: f64| {
            let qf = q.to_f64();
            let b = Integer::from_f64_rounded(-sum * qf)?;
            let c = Integer::from_f64_rounded(product * qf)?;
            Some(from_integers(p, &[c, b, q.clone()]))
        };

        let mut candidates = vec![];
        for r in &real {
            candidates.extend(lead_divisors.iter().filter_map(|q| linear(q, r.re)));
        }
        for r in complex.iter().filter(|r| r.im > 0.) {
            candidates.extend(
                lead_divisors
                    .iter()
                    .filter_map(|q| quadratic(q, 2. * r.re, r.re * r.re + r.im * r.im)),
            );
        }
        for (i, r1) in real.iter().enumerate() {
            for r2 in &real[i + 1..] {
                candidates.extend(
                    lead_divisors
                        .iter()
                        .filter_map(|q| quadratic(q, r1.re + r2.re, r1.re * r2.re)),
                );
            }
        }

        for c in candidates {
            match self.try_candidate(p, c, &mut tried) {
                StageOutcome::Unchanged => {}
                o => return o,
            }
        }

        // exhaustive rational root test
        let Some(constant_divisors) = constant.divisors(limit, max_count) else {
            return StageOutcome::Unchanged;
        };
        if lead_divisors.len() * constant_divisors.len() * 2 > max_count {
            return StageOutcome::Unchanged;
        }

        for q in &lead_divisors {
            for d in &constant_divisors {
                for d in [d.clone(), -d] {
                    if !q.gcd(&d).is_one() {
                        continue;
                    }

                    let root = Rational::from_integers(&d, q);
                    if p.evaluate(&root).is_zero() {
                        match self.try_candidate(p, from_integers(p, &[-d, q.clone()]), &mut tried)
                        {
                            StageOutcome::Unchanged => {}
                            o => return o,
                        }
                    }
                }
            }
        }

        StageOutcome::Unchanged
    }

    /// Search for a factor `g` of degree `k` by its value at a large integer `base`.
    ///
    /// For `base > 2 max |c_i| + 1`, the value `g(base)` of an integer factor with
    /// small coefficients is a divisor of `p(base)` and its coefficients are the
    /// balanced digits of `g(base)` in base `base`. Every combination of a leading
    /// coefficient dividing the leading coefficient of `p`, a constant dividing the
    /// constant of `p` and a divisor of `p(base)` is fitted and tested.
    pub(crate) fn search(&mut self, p: &UPoly) -> StageOutcome<(UPoly, UPoly)> {
        let Some(pz) = p.to_integer_polynomial() else {
            return StageOutcome::Unchanged;
        };

        let max = pz
            .coefficients
            .iter()
            .map(|c| c.abs())
            .max()
            .unwrap_or_else(Integer::zero);
        let two = Integer::new(2);
        let base = &(&two * &max) + &two;
        let value = pz.evaluate(&base);

        let limit = self.settings.trial_division_limit;
        let max_count = self.settings.max_search_candidates;
        let (Some(lead_divisors), Some(constant_divisors), Some(value_divisors)) = (
            pz.lcoeff().divisors(limit, max_count),
            pz.get_constant().divisors(limit, max_count),
            value.divisors(limit, max_count),
        ) else {
            debug!("Too many divisors to search for factors of {}", p);
            return StageOutcome::Aborted;
        };

        let signed = |divisors: &[Integer]| -> Vec<Integer> {
            divisors.iter().flat_map(|d| [d.clone(), -d]).collect()
        };
        let constant_divisors = signed(&constant_divisors);
        let value_divisors = signed(&value_divisors);

        let mut tried = HashSet::default();
        for k in 1..=p.degree() / 2 {
            for c1 in &lead_divisors {
                for c2 in &constant_divisors {
                    for n in &value_divisors {
                        // g(base) - g(0) is a multiple of the base
                        if !(n - c2).quot_rem(&base).1.is_zero() {
                            continue;
                        }

                        let Some(g) =
                            UnivariatePolynomial::fit(c1, c2, n, &base, k, p.variable.clone())
                        else {
                            continue;
                        };

                        match self.try_candidate(p, g.to_rational_polynomial(), &mut tried) {
                            StageOutcome::Unchanged => {}
                            o => return o,
                        }
                    }
                }
            }
        }

        StageOutcome::Unchanged
    }
}

/// A polynomial in the variable of `p` with integer coefficients, lowest power first.
fn from_integers(p: &UPoly, coefficients: &[Integer]) -> UPoly {
    UnivariatePolynomial::from_coefficients(
        &Q,
        p.variable.clone(),
        coefficients.iter().map(|c| Rational::from(c.clone())).collect(),
    )
}

fn lift(p: &UPoly, var: usize, set: &FactorSet) -> MPoly {
    MultivariatePolynomial::from_univariate(p, set.variables().clone(), var)
}

#[cfg(test)]
mod test {
    use crate::domains::rational::Rational;
    use crate::poly::parse::parse_polynomial;
    use crate::poly::univariate::UnivariatePolynomial;
    use crate::settings::Settings;

    use super::{FactorOutcome, Factorize, Factorizer, StageOutcome};

    fn factor_string(input: &str) -> String {
        let p = parse_polynomial(input, None).unwrap();
        p.factor(&Settings::default()).to_string()
    }

    #[test]
    fn univariate() {
        assert_eq!(factor_string("x^2+2x+1"), "(x+1)^2");
        assert_eq!(factor_string("x^3-6x^2+11x-6"), "(x-1)*(x-2)*(x-3)");
        assert_eq!(factor_string("2x^4-2"), "2*(x+1)*(x-1)*(x^2+1)");
        assert_eq!(factor_string("x^4+4"), "(x^2+2*x+2)*(x^2-2*x+2)");
        assert_eq!(factor_string("3x^5+6x^4+3x^3"), "3*x^3*(x+1)^2");
    }

    #[test]
    fn rational_content() {
        let p = parse_polynomial("x^2/2-1/2", None).unwrap();
        let set = p.factor(&Settings::default());
        assert_eq!(set.constant(), &Rational::new(1, 2));
        assert_eq!(set.expand().unwrap(), p);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn irreducible() {
        let p = parse_polynomial("x^2+x+1", None).unwrap();
        assert!(matches!(
            p.try_factor(&Settings::default()),
            FactorOutcome::Unchanged
        ));

        let p = parse_polynomial("-x^2-x-1", None).unwrap();
        assert!(matches!(
            p.try_factor(&Settings::default()),
            FactorOutcome::Unchanged
        ));
        assert_eq!(p.factor(&Settings::default()).to_string(), "(-x^2-x-1)");
    }

    #[test]
    fn digit_search() {
        let p = UnivariatePolynomial::parse("x^4+3x^3+6x^2+5x+3", "x").unwrap();
        let g = UnivariatePolynomial::parse("x^2+x+1", "x").unwrap();
        let h = UnivariatePolynomial::parse("x^2+2x+3", "x").unwrap();

        let settings = Settings::default();
        let mut f = Factorizer::new(&settings);
        match f.search(&p) {
            StageOutcome::Factored((a, b)) => {
                assert_eq!(&a * &b, p);
                assert!(a == g || a == h);
            }
            o => panic!("Expected a factor, got {:?}", o),
        }
    }

    #[test]
    fn search_budget() {
        let p = UnivariatePolynomial::parse("x^4+3x^3+6x^2+5x+3", "x").unwrap();
        let settings = Settings::default().with_max_search_candidates(0);
        let mut f = Factorizer::new(&settings);
        assert_eq!(f.search(&p), StageOutcome::Aborted);
    }

    #[test]
    fn multivariate() {
        let p = parse_polynomial("x^2*y^3+b*y^2+3*a*x^2*y+3*a*b", None).unwrap();
        let set = p.factor(&Settings::default());
        assert_eq!(set.len(), 2);
        assert_eq!(set.expand().unwrap(), p);

        let p = parse_polynomial("x^6*y - y^7", None).unwrap();
        let set = p.factor(&Settings::default());
        assert_eq!(set.expand().unwrap(), p);
        assert_eq!(set.len(), 5);

        let p = parse_polynomial("2*x*y^2+4*x^2*y", None).unwrap();
        assert_eq!(p.factor(&Settings::default()).to_string(), "2*(2*x+y)*x*y");
    }
}
