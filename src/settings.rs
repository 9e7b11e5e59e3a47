//! Configuration shared by all entry points.
//!
//! A [Settings] value is immutable once constructed and is passed by reference
//! to the division engine, the factoring orchestrator and the root finder.

/// Maximum number of reduction steps of the multivariate division loop.
pub const MAX_DIVISION_ITERATIONS: usize = 200;
/// Maximum number of fixed-shift attempts of the root finder.
pub const MAX_SHIFT_ATTEMPTS: usize = 20;
/// Maximum number of steps of the real variable-shift iteration.
pub const MAX_REAL_ITERATIONS: usize = 10;
/// Maximum number of steps of the quadratic variable-shift iteration.
pub const MAX_QUADRATIC_ITERATIONS: usize = 20;
/// Number of unshifted K-polynomial steps before the fixed-shift stage.
pub const NO_SHIFT_ITERATIONS: usize = 5;
/// Default number of decimal digits kept in reported roots.
pub const DEFAULT_DECIMAL_PRECISION: u32 = 7;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Decimal digits kept in roots returned by the root finder.
    pub decimal_precision: u32,
    pub max_division_iterations: usize,
    pub max_shift_attempts: usize,
    pub no_shift_iterations: usize,
    pub max_real_iterations: usize,
    pub max_quadratic_iterations: usize,
    /// Recursion depth after which the factoring orchestrator stops splitting.
    pub max_factor_depth: usize,
    /// Number of candidate polynomials the digit-fit search may test.
    pub max_search_candidates: usize,
    /// Largest trial divisor used when factoring integers for candidate generation.
    pub trial_division_limit: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            decimal_precision: DEFAULT_DECIMAL_PRECISION,
            max_division_iterations: MAX_DIVISION_ITERATIONS,
            max_shift_attempts: MAX_SHIFT_ATTEMPTS,
            no_shift_iterations: NO_SHIFT_ITERATIONS,
            max_real_iterations: MAX_REAL_ITERATIONS,
            max_quadratic_iterations: MAX_QUADRATIC_ITERATIONS,
            max_factor_depth: 64,
            max_search_candidates: 20_000,
            trial_division_limit: 100_000,
        }
    }
}

impl Settings {
    pub fn with_decimal_precision(self, decimal_precision: u32) -> Self {
        Self {
            decimal_precision,
            ..self
        }
    }

    pub fn with_max_division_iterations(self, max_division_iterations: usize) -> Self {
        Self {
            max_division_iterations,
            ..self
        }
    }

    pub fn with_max_shift_attempts(self, max_shift_attempts: usize) -> Self {
        Self {
            max_shift_attempts,
            ..self
        }
    }

    pub fn with_max_factor_depth(self, max_factor_depth: usize) -> Self {
        Self {
            max_factor_depth,
            ..self
        }
    }

    pub fn with_max_search_candidates(self, max_search_candidates: usize) -> Self {
        Self {
            max_search_candidates,
            ..self
        }
    }
}
