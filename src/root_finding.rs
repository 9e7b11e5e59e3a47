//! Numerical roots of polynomials with real coefficients.
//!
//! The roots are computed with the three-stage Jenkins-Traub algorithm for
//! real polynomials (RPOLY): a few unshifted K-polynomial steps, a fixed
//! quadratic shift on the circle that bounds the smallest root, and a variable
//! shift iteration that converges to a real root or a complex conjugate pair.
//! Every root that is found is deflated from the polynomial and the process
//! restarts on the quotient.
//!
//! ```
//! use polyalg::root_finding::find_roots;
//!
//! let roots = find_roots(&[1., -6., 11., -6.], 7).unwrap();
//! assert_eq!(roots.len(), 3);
//! assert!(roots.iter().all(|r| r.is_real()));
//! ```
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt::Display;

use tracing::{debug, instrument};

use crate::domains::float::Complex;
use crate::settings::Settings;
use crate::utils::round_to_precision;

/// Rotation of the fixed shift between two attempts, in degrees.
const SHIFT_ROTATION: f64 = 94.;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootFinderError {
    /// The coefficients are not finite or cannot be scaled to finite values.
    Overflow,
    /// There are no coefficients or all of them are zero.
    EmptyInput,
}

impl Display for RootFinderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RootFinderError::Overflow => {
                write!(f, "Coefficients overflow the floating point range")
            }
            RootFinderError::EmptyInput => write!(f, "The polynomial has no nonzero coefficient"),
        }
    }
}

impl std::error::Error for RootFinderError {}

/// The roots found by a [RootFinder].
#[derive(Debug, Clone, PartialEq)]
pub struct Roots {
    pub roots: Vec<Complex<f64>>,
    /// The number of roots that could not be found because the shift
    /// iteration did not converge.
    pub unresolved: usize,
}

impl Roots {
    pub fn is_complete(&self) -> bool {
        self.unresolved == 0
    }
}

/// Compute all roots of the polynomial with `coefficients`, given from the
/// highest degree down. The real and imaginary parts are rounded to
/// `precision` decimal digits. If the iteration stalls, the roots found so far
/// are returned.
pub fn find_roots(
    coefficients: &[f64],
    precision: u32,
) -> Result<Vec<Complex<f64>>, RootFinderError> {
    let settings = Settings::default().with_decimal_precision(precision);
    RootFinder::new(&settings)
        .solve(coefficients)
        .map(|r| r.roots)
}

/// A Jenkins-Traub root finder with configurable iteration limits.
#[derive(Debug, Clone, Copy)]
pub struct RootFinder {
    settings: Settings,
}

impl RootFinder {
    pub fn new(settings: &Settings) -> RootFinder {
        RootFinder {
            settings: *settings,
        }
    }

    /// Compute the roots of the polynomial with `coefficients`, highest degree first.
    #[instrument(level = "debug", skip_all)]
    pub fn solve(&self, coefficients: &[f64]) -> Result<Roots, RootFinderError> {
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(RootFinderError::Overflow);
        }

        let start = coefficients
            .iter()
            .position(|c| *c != 0.)
            .ok_or(RootFinderError::EmptyInput)?;
        let mut p = coefficients[start..].to_vec();

        let rotation = SHIFT_ROTATION.to_radians();
        let (cosr, sinr) = (rotation.cos(), rotation.sin());
        let (mut xx, mut yy) = (FRAC_1_SQRT_2, -FRAC_1_SQRT_2);

        let mut roots = Vec::with_capacity(p.len());
        let mut unresolved = 0;
        loop {
            while p.len() > 1 && p[p.len() - 1] == 0. {
                p.pop();
                roots.push(Complex::new(0., 0.));
            }

            let n = p.len() - 1;
            match n {
                0 => break,
                1 => {
                    roots.push(Complex::new(-p[1] / p[0], 0.));
                    break;
                }
                2 => {
                    let (s, l) = quadratic(p[0], p[1], p[2]);
                    roots.push(s);
                    roots.push(l);
                    break;
                }
                _ => {}
            }

            scale(&mut p)?;
            let bound = lower_root_bound(&p);

            let mut it = ShiftIteration::new(p, &self.settings);
            it.no_shift(self.settings.no_shift_iterations);
            let saved_k = it.k.clone();

            let mut zeros = vec![];
            for attempt in 1..=self.settings.max_shift_attempts {
                let x = cosr * xx - sinr * yy;
                yy = sinr * xx + cosr * yy;
                xx = x;
                let sr = bound * xx;

                zeros = it.fixed_shift(20 * attempt, sr, bound, -2. * sr);
                if !zeros.is_empty() {
                    break;
                }

                it.k.copy_from_slice(&saved_k);
            }

            if zeros.is_empty() {
                debug!(
                    "No convergence after {} shifts, {} roots unresolved",
                    self.settings.max_shift_attempts, n
                );
                unresolved = n;
                break;
            }

            p = it.deflate(zeros.len());
            roots.extend(zeros);
        }

        if roots.iter().any(|r| !r.re.is_finite() || !r.im.is_finite()) {
            return Err(RootFinderError::Overflow);
        }

        let precision = self.settings.decimal_precision;
        Ok(Roots {
            roots: roots
                .into_iter()
                .map(|r| {
                    Complex::new(
                        round_to_precision(r.re, precision),
                        round_to_precision(r.im, precision),
                    )
                })
                .collect(),
            unresolved,
        })
    }
}

/// Multiply the coefficients by a power of two such that the smallest one is
/// well above the underflow threshold while the largest one stays finite.
fn scale(p: &mut [f64]) -> Result<(), RootFinderError> {
    let lo = f64::MIN_POSITIVE / f64::EPSILON;

    let (mut max, mut min) = (0f64, f64::MAX);
    for x in p.iter().map(|x| x.abs()) {
        if x > max {
            max = x;
        }
        if x != 0. && x < min {
            min = x;
        }
    }

    let mut sc = lo / min;
    let rescale = if sc > 1. {
        f64::MAX / sc >= max
    } else {
        max >= 10.
    };

    if rescale {
        if sc == 0. {
            sc = f64::MIN_POSITIVE;
        }
        let l = (sc.log2() + 0.5) as i32;
        let factor = 2f64.powi(l);
        if factor != 1. {
            for x in p.iter_mut() {
                *x *= factor;
            }
        }
    }

    if p[0] == 0. || p.iter().any(|x| !x.is_finite()) {
        return Err(RootFinderError::Overflow);
    }
    Ok(())
}

/// A lower bound on the moduli of the roots: the positive root of the
/// polynomial with coefficients `|p_0|, ..., |p_{n-1}|, -|p_n|`, refined by
/// Newton iteration to two decimal places.
fn lower_root_bound(p: &[f64]) -> f64 {
    let n = p.len() - 1;
    let mut pt: Vec<f64> = p.iter().map(|x| x.abs()).collect();
    pt[n] = -pt[n];

    let mut x = ((-pt[n]).ln() - pt[0].ln()) / n as f64;
    x = x.exp();
    if pt[n - 1] != 0. {
        // Newton step at the origin
        x = x.min(-pt[n] / pt[n - 1]);
    }

    let eval = |x: f64| pt.iter().fold(0f64, |acc, c| acc * x + c);

    // chop the interval (0, x) until the modulus polynomial is non-positive
    let mut xm = x;
    let mut ff;
    loop {
        x = xm;
        xm = 0.1 * x;
        ff = eval(xm);
        if ff <= 0. {
            break;
        }
    }

    loop {
        let mut f = pt[0];
        let mut df = pt[0];
        for c in &pt[1..n] {
            f = x * f + c;
            df = x * df + f;
        }
        f = x * f + pt[n];
        let dx = f / df;
        x -= dx;
        if !((dx / x).abs() > 0.005) {
            break;
        }
    }

    x
}

/// The roots of `a*z^2 + b1*z + c`, the smaller one first. The discriminant is
/// computed without overflow.
fn quadratic(a: f64, b1: f64, c: f64) -> (Complex<f64>, Complex<f64>) {
    let zero = Complex::new(0., 0.);

    if a == 0. {
        let sr = if b1 != 0. { -c / b1 } else { 0. };
        return (Complex::new(sr, 0.), zero);
    }

    if c == 0. {
        return (zero, Complex::new(-b1 / a, 0.));
    }

    let b = b1 / 2.;
    let (e, mut d) = if b.abs() < c.abs() {
        let e = if c >= 0. { a } else { -a };
        let e = b * (b / c.abs()) - e;
        (e, e.abs().sqrt() * c.abs().sqrt())
    } else {
        let e = 1. - (a / b) * (c / b);
        (e, e.abs().sqrt() * b.abs())
    };

    if e >= 0. {
        if b >= 0. {
            d = -d;
        }
        let lr = (d - b) / a;
        let sr = if lr != 0. { (c / lr) / a } else { 0. };
        (Complex::new(sr, 0.), Complex::new(lr, 0.))
    } else {
        let re = -b / a;
        let im = (d / a).abs();
        (Complex::new(re, im), Complex::new(re, -im))
    }
}

/// Divide `p` by the quadratic `z^2 + u*z + v`. The quotient is written to `q`
/// and the remainder `(a, b)` is returned, such that the last two entries of
/// `q` are `b` and `a`.
fn quad_sd(u: f64, v: f64, p: &[f64], q: &mut [f64]) -> (f64, f64) {
    let mut b = p[0];
    q[0] = b;
    let mut a = p[1] - b * u;
    q[1] = a;

    for i in 2..p.len() {
        q[i] = p[i] - (a * u + b * v);
        b = a;
        a = q[i];
    }
    (a, b)
}

/// How the scalars of the K-polynomial recurrence are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Normalization {
    ByC,
    ByD,
    /// The quadratic is almost a factor of K.
    AlmostFactor,
}

enum RealStep {
    Converged(f64),
    /// The iterates stall close to a double real root at the given point.
    NearDoubleRoot(f64),
    Failed,
}

#[derive(Clone, Copy)]
enum Step {
    Quadratic,
    Real,
    Restore,
}

/// The state of the shifted iterations for one polynomial of degree `n >= 3`.
struct ShiftIteration {
    n: usize,
    p: Vec<f64>,
    qp: Vec<f64>,
    k: Vec<f64>,
    qk: Vec<f64>,
    svk: Vec<f64>,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    g: f64,
    h: f64,
    a1: f64,
    a3: f64,
    a7: f64,
    max_real_iterations: usize,
    max_quadratic_iterations: usize,
}

impl ShiftIteration {
    /// Start with the scaled derivative as K polynomial.
    fn new(p: Vec<f64>, settings: &Settings) -> ShiftIteration {
        let n = p.len() - 1;
        let mut k = vec![0.; n];
        k[0] = p[0];
        for i in 1..n {
            k[i] = (n - i) as f64 * p[i] / n as f64;
        }

        ShiftIteration {
            n,
            qp: vec![0.; n + 1],
            qk: vec![0.; n],
            svk: vec![0.; n],
            p,
            k,
            a: 0.,
            b: 0.,
            c: 0.,
            d: 0.,
            e: 0.,
            f: 0.,
            g: 0.,
            h: 0.,
            a1: 0.,
            a3: 0.,
            a7: 0.,
            max_real_iterations: settings.max_real_iterations,
            max_quadratic_iterations: settings.max_quadratic_iterations,
        }
    }

    /// The quotient left after `found` roots converged.
    fn deflate(&self, found: usize) -> Vec<f64> {
        self.qp[..self.n + 1 - found].to_vec()
    }

    /// Perform K-polynomial steps without a shift.
    fn no_shift(&mut self, iterations: usize) {
        let n = self.n;
        let (aa, bb) = (self.p[n], self.p[n - 1]);
        let mut zerok = self.k[n - 1] == 0.;

        for _ in 0..iterations {
            let cc = self.k[n - 1];
            if zerok {
                for j in (1..n).rev() {
                    self.k[j] = self.k[j - 1];
                }
                self.k[0] = 0.;
                zerok = self.k[n - 1] == 0.;
            } else {
                let t = -aa / cc;
                for j in (1..n).rev() {
                    self.k[j] = t * self.k[j - 1] + self.p[j];
                }
                self.k[0] = self.p[0];
                zerok = self.k[n - 1].abs() <= bb.abs() * f64::EPSILON * 10.;
            }
        }
    }

    /// Compute the scalars used for the next K polynomial and the new estimate
    /// of the quadratic.
    fn calc_sc(&mut self, u: f64, v: f64) -> Normalization {
        let n = self.n;
        (self.c, self.d) = quad_sd(u, v, &self.k, &mut self.qk);

        if self.c.abs() <= 100. * f64::EPSILON * self.k[n - 1].abs()
            && self.d.abs() <= 100. * f64::EPSILON * self.k[n - 2].abs()
        {
            return Normalization::AlmostFactor;
        }

        let (a, b, c, d) = (self.a, self.b, self.c, self.d);
        self.h = v * b;
        if d.abs() >= c.abs() {
            self.e = a / d;
            self.f = c / d;
            self.g = u * b;
            self.a3 = self.e * (self.g + a) + self.h * (b / d);
            self.a1 = self.f * b - a;
            self.a7 = self.h + (self.f + u) * a;
            Normalization::ByD
        } else {
            self.e = a / c;
            self.f = d / c;
            self.g = self.e * u;
            self.a3 = self.e * a + (self.g + self.h / c) * b;
            self.a1 = b - a * (d / c);
            self.a7 = self.g * d + self.h * self.f + a;
            Normalization::ByC
        }
    }

    /// Compute the next K polynomial.
    fn next_k(&mut self, kind: Normalization) {
        let n = self.n;

        if kind == Normalization::AlmostFactor {
            self.k[0] = 0.;
            self.k[1] = 0.;
            for i in 2..n {
                self.k[i] = self.qk[i - 2];
            }
            return;
        }

        let temp = if kind == Normalization::ByC {
            self.b
        } else {
            self.a
        };

        if self.a1.abs() > 10. * f64::EPSILON * temp.abs() {
            let a7 = self.a7 / self.a1;
            let a3 = self.a3 / self.a1;
            self.k[0] = self.qp[0];
            self.k[1] = self.qp[1] - a7 * self.qp[0];
            for i in 2..n {
                self.k[i] = a3 * self.qk[i - 2] - a7 * self.qp[i - 1] + self.qp[i];
            }
        } else {
            // a1 is nearly zero
            self.k[0] = 0.;
            self.k[1] = -self.a7 * self.qp[0];
            for i in 2..n {
                self.k[i] = self.a3 * self.qk[i - 2] - self.a7 * self.qp[i - 1];
            }
        }
    }

    /// New estimates `(u, v)` of the quadratic coefficients. Both are zero when
    /// the quadratic is almost a factor of K.
    fn newest(&self, kind: Normalization, u: f64, v: f64) -> (f64, f64) {
        let n = self.n;
        let (a4, a5) = match kind {
            Normalization::AlmostFactor => return (0., 0.),
            Normalization::ByC => (
                self.a + u * self.b + self.h * self.f,
                self.c + (u + v * self.f) * self.d,
            ),
            Normalization::ByD => (
                (self.a + self.g) * self.f + self.h,
                (self.f + u) * self.c + v * self.d,
            ),
        };

        let b1 = -self.k[n - 1] / self.p[n];
        let b2 = -(self.k[n - 2] + b1 * self.p[n - 1]) / self.p[n];
        let c1 = v * b2 * self.a1;
        let c2 = b1 * self.a7;
        let c3 = b1 * b1 * self.a3;
        let c4 = c1 - c2 - c3;
        let temp = a5 + b1 * a4 - c4;
        if temp == 0. {
            return (0., 0.);
        }

        (
            u - (u * (c3 + c2) + v * (b1 * self.a1 + b2 * self.a7)) / temp,
            v * (1. + c4 / temp),
        )
    }

    /// Variable-shift iteration for a quadratic factor `z^2 + u*z + v`. On
    /// convergence the two roots are returned and `qp` holds the quotient.
    fn quadratic_iteration(&mut self, uu: f64, vv: f64) -> Option<Vec<Complex<f64>>> {
        let n = self.n;
        let (mut u, mut v) = (uu, vv);
        let mut j = 0;
        let mut tried = false;
        let (mut omp, mut relstp) = (0f64, 0f64);

        loop {
            let (sz, lz) = quadratic(1., u, v);

            // real roots that are not close to a double root or a pair of
            // opposite roots are left to the real iteration
            if (sz.re.abs() - lz.re.abs()).abs() > 0.01 * lz.re.abs() {
                return None;
            }

            (self.a, self.b) = quad_sd(u, v, &self.p, &mut self.qp);
            let (a, b) = (self.a, self.b);

            let mp = (a - sz.re * b).abs() + (sz.im * b).abs();

            // rigorous bound on the rounding error in evaluating p
            let zm = v.abs().sqrt();
            let t = -sz.re * b;
            let mut ee = 2. * self.qp[0].abs();
            for q in &self.qp[1..n] {
                ee = ee * zm + q.abs();
            }
            ee = ee * zm + (a + t).abs();
            ee = (9. * ee + 2. * t.abs() - 7. * ((a + t).abs() + zm * b.abs())) * f64::EPSILON;

            if mp <= 20. * ee {
                return Some(vec![sz, lz]);
            }

            j += 1;
            if j > self.max_quadratic_iterations {
                return None;
            }

            if j >= 2 && relstp <= 0.01 && mp >= omp && !tried {
                // a cluster of zeros stalls the convergence: take five fixed
                // shift steps with a quadratic close to the cluster
                relstp = if relstp < f64::EPSILON {
                    f64::EPSILON.sqrt()
                } else {
                    relstp.sqrt()
                };

                u -= u * relstp;
                v += v * relstp;

                (self.a, self.b) = quad_sd(u, v, &self.p, &mut self.qp);
                for _ in 0..5 {
                    let kind = self.calc_sc(u, v);
                    self.next_k(kind);
                }

                tried = true;
                j = 0;
            }

            omp = mp;

            let kind = self.calc_sc(u, v);
            self.next_k(kind);
            let kind = self.calc_sc(u, v);
            let (ui, vi) = self.newest(kind, u, v);

            if vi == 0. {
                return None;
            }

            relstp = ((vi - v) / vi).abs();
            u = ui;
            v = vi;
        }
    }

    /// Variable-shift iteration for a real root, starting at `s`. On
    /// convergence `qp` holds the quotient.
    fn real_iteration(&mut self, mut s: f64) -> RealStep {
        let n = self.n;
        let mut j = 0;
        let (mut omp, mut t) = (0f64, 0f64);

        loop {
            // evaluate p at s
            let mut pv = self.p[0];
            self.qp[0] = pv;
            for i in 1..=n {
                pv = pv * s + self.p[i];
                self.qp[i] = pv;
            }
            let mp = pv.abs();

            // rigorous bound on the rounding error in evaluating p
            let ms = s.abs();
            let mut ee = 0.5 * self.qp[0].abs();
            for q in &self.qp[1..] {
                ee = ee * ms + q.abs();
            }

            if mp <= 20. * f64::EPSILON * (2. * ee - mp) {
                return RealStep::Converged(s);
            }

            j += 1;
            if j > self.max_real_iterations {
                return RealStep::Failed;
            }

            if j >= 2 && t.abs() <= 0.001 * (s - t).abs() && mp > omp {
                return RealStep::NearDoubleRoot(s);
            }

            omp = mp;

            // the next K polynomial and the new iterate
            let mut kv = self.k[0];
            self.qk[0] = kv;
            for i in 1..n {
                kv = kv * s + self.k[i];
                self.qk[i] = kv;
            }

            if kv.abs() > self.k[n - 1].abs() * 10. * f64::EPSILON {
                let t = -pv / kv;
                self.k[0] = self.qp[0];
                for i in 1..n {
                    self.k[i] = t * self.qk[i - 1] + self.qp[i];
                }
            } else {
                self.k[0] = 0.;
                for i in 1..n {
                    self.k[i] = self.qk[i - 1];
                }
            }

            let kv = self.k.iter().skip(1).fold(self.k[0], |acc, c| acc * s + c);
            t = if kv.abs() > self.k[n - 1].abs() * 10. * f64::EPSILON {
                -pv / kv
            } else {
                0.
            };
            s += t;
        }
    }

    /// Compute up to `l2` fixed-shift K polynomials for the quadratic
    /// `z^2 + u*z + v`, watching the convergence of the real and quadratic
    /// estimates. Once one of them settles, the matching variable-shift
    /// iteration is started. Returns the roots that were found.
    fn fixed_shift(&mut self, l2: usize, sr: f64, v: f64, u: f64) -> Vec<Complex<f64>> {
        let n = self.n;
        let (mut betas, mut betav) = (0.25, 0.25);
        let (mut oss, mut ovv) = (sr, v);
        let (mut ots, mut otv) = (0., 0.);

        (self.a, self.b) = quad_sd(u, v, &self.p, &mut self.qp);
        let mut kind = self.calc_sc(u, v);

        for j in 0..l2 {
            self.next_k(kind);
            kind = self.calc_sc(u, v);
            let (mut ui, mut vi) = self.newest(kind, u, v);
            let vv = vi;

            let ss = if self.k[n - 1] != 0. {
                -self.p[n] / self.k[n - 1]
            } else {
                0.
            };

            let (mut tv, mut ts) = (1., 1.);
            if j != 0 && kind != Normalization::AlmostFactor {
                if vv != 0. {
                    tv = ((vv - ovv) / vv).abs();
                }
                if ss != 0. {
                    ts = ((ss - oss) / ss).abs();
                }

                // multiply the two most recent measures if they decrease
                let tvv = if tv < otv { tv * otv } else { 1. };
                let tss = if ts < ots { ts * ots } else { 1. };

                let vpass = tvv < betav;
                let spass = tss < betas;

                if spass || vpass {
                    self.svk.copy_from_slice(&self.k);
                    let mut s = ss;
                    let (mut stry, mut vtry) = (false, false);

                    let mut step = if spass && (!vpass || tss < tvv) {
                        Step::Real
                    } else {
                        Step::Quadratic
                    };

                    loop {
                        match step {
                            Step::Quadratic => {
                                if let Some(zeros) = self.quadratic_iteration(ui, vi) {
                                    return zeros;
                                }

                                vtry = true;
                                betav *= 0.25;

                                if stry || !spass {
                                    step = Step::Restore;
                                } else {
                                    self.k.copy_from_slice(&self.svk);
                                    step = Step::Real;
                                }
                            }
                            Step::Real => {
                                let r = self.real_iteration(s);
                                if let RealStep::Converged(z) = r {
                                    return vec![Complex::new(z, 0.)];
                                }

                                stry = true;
                                betas *= 0.25;

                                if let RealStep::NearDoubleRoot(z) = r {
                                    s = z;
                                    ui = -(s + s);
                                    vi = s * s;
                                    step = Step::Quadratic;
                                } else {
                                    step = Step::Restore;
                                }
                            }
                            Step::Restore => {
                                self.k.copy_from_slice(&self.svk);
                                if vpass && !vtry {
                                    step = Step::Quadratic;
                                } else {
                                    break;
                                }
                            }
                        }
                    }

                    (self.a, self.b) = quad_sd(u, v, &self.p, &mut self.qp);
                    kind = self.calc_sc(u, v);
                }
            }

            ovv = vv;
            oss = ss;
            otv = tv;
            ots = ts;
        }

        vec![]
    }
}

#[cfg(test)]
mod test {
    use crate::domains::float::Complex;
    use crate::settings::Settings;

    use super::{find_roots, RootFinder, RootFinderError};

    fn sorted(mut roots: Vec<Complex<f64>>) -> Vec<(f64, f64)> {
        roots.sort_by(|a, b| a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im)));
        roots.into_iter().map(|r| (r.re, r.im)).collect()
    }

    #[test]
    fn imaginary_pair() {
        let roots = find_roots(&[1., 0., 1.], 7).unwrap();
        assert_eq!(sorted(roots), vec![(0., -1.), (0., 1.)]);
    }

    #[test]
    fn cubic() {
        let roots = find_roots(&[1., -6., 11., -6.], 7).unwrap();
        assert_eq!(sorted(roots), vec![(1., 0.), (2., 0.), (3., 0.)]);
    }

    #[test]
    fn quintic_with_complex_pair() {
        // (x^2 + 2x + 5)(x - 1)(x + 2)(x - 3)
        let p = [1., 0., -4., -14., -13., 30.];
        let expected = [
            Complex::new(-1., 2.),
            Complex::new(-1., -2.),
            Complex::new(1., 0.),
            Complex::new(-2., 0.),
            Complex::new(3., 0.),
        ];

        let roots = find_roots(&p, 6).unwrap();
        assert_eq!(roots.len(), 5);
        assert_eq!(sorted(roots), sorted(expected.to_vec()));
    }

    #[test]
    fn zero_roots_and_leading_zeros() {
        let roots = find_roots(&[0., 2., -2., 0., 0.], 7).unwrap();
        assert_eq!(sorted(roots), vec![(0., 0.), (0., 0.), (1., 0.)]);

        assert!(find_roots(&[3.], 7).unwrap().is_empty());
    }

    #[test]
    fn residuals() {
        let p = [2., -3., 0.5, 7., -1., 4., -2.];
        let roots = RootFinder::new(&Settings::default().with_decimal_precision(12))
            .solve(&p)
            .unwrap();
        assert!(roots.is_complete());
        assert_eq!(roots.roots.len(), 6);
        for r in &roots.roots {
            assert!(r.evaluate_polynomial(&p).norm() < 1e-6, "{}", r);
        }
    }

    #[test]
    fn partial_result() {
        let settings = Settings::default().with_max_shift_attempts(0);
        let roots = RootFinder::new(&settings)
            .solve(&[1., -6., 11., -6., 0.])
            .unwrap();
        assert_eq!(roots.roots, vec![Complex::new(0., 0.)]);
        assert_eq!(roots.unresolved, 3);
    }

    #[test]
    fn invalid_input() {
        assert_eq!(find_roots(&[], 7), Err(RootFinderError::EmptyInput));
        assert_eq!(find_roots(&[0., 0.], 7), Err(RootFinderError::EmptyInput));
        assert_eq!(find_roots(&[1., f64::NAN], 7), Err(RootFinderError::Overflow));
        assert_eq!(
            find_roots(&[1., f64::INFINITY, 1.], 7),
            Err(RootFinderError::Overflow)
        );
    }

    #[test]
    fn scaling_overflow() {
        // the power-of-two scale factor rounds up past what the largest
        // coefficient can absorb
        let lo = f64::MIN_POSITIVE / f64::EPSILON;
        let s = 2f64.powf(10.6);
        let p = [lo / s, 0., 0., f64::MAX / s * 0.999];
        assert!(p.iter().all(|x| x.is_finite()));
        assert_eq!(find_roots(&p, 7), Err(RootFinderError::Overflow));
    }
}
