//! Polyalg is a library for exact polynomial algebra over the rationals.
//!
//! It provides univariate arithmetic with gcd and square-free decomposition,
//! a heuristic division for polynomials in several variables, a best-effort
//! factorizer and a Jenkins-Traub root finder for real polynomials.
//!
//! For example:
//!
//! ```
//! use polyalg::{
//!     poly::{factor::Factorize, parse::parse_polynomial},
//!     settings::Settings,
//! };
//!
//! let p = parse_polynomial("x^3-6x^2+11x-6", None).unwrap();
//! let factors = p.factor(&Settings::default());
//! assert_eq!(factors.to_string(), "(x-1)*(x-2)*(x-3)");
//! ```
//!
//! All limits of the heuristic algorithms are collected in an immutable
//! [Settings](settings::Settings) value that is passed to every operation.

pub mod domains;
pub mod poly;
pub mod root_finding;
pub mod settings;
pub mod utils;
