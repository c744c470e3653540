//! Exact real algebraic numbers for nonlinear arithmetic decision procedures.
//!
//! This crate represents real algebraic numbers — roots of univariate
//! polynomials with rational coefficients — as first-class, totally ordered
//! values. Equality, ordering, sign, integrality, floor and ceiling are all
//! exact, and witness rationals strictly below, above, or between two values
//! can be extracted, with no floating point anywhere and guaranteed
//! termination of every refinement loop.
//!
//! ## Representations
//!
//! A [`RealAlgebraicNumber`] is one of four cases: an exact rational, the
//! unique root of a squarefree polynomial in an isolating interval, a Thom
//! encoding (derivative sign conditions plus a rational offset), or a value
//! owned by a pluggable external engine. Interval-backed values refine
//! in place — the interval only ever shrinks — and transparently reclassify
//! to the rational case when it collapses onto a point.
//!
//! ## Example
//!
//! ```
//! use num_bigint::BigInt;
//! use num_rational::BigRational;
//! use ranum::{sample_above, sample_below, Interval, RealAlgebraicNumber, UnivariatePolynomial};
//!
//! let rat = |n: i64| BigRational::from_integer(BigInt::from(n));
//!
//! // sqrt(2) as the root of x^2 - 2 isolated in (1, 2)
//! let poly = UnivariatePolynomial::from_int_coeffs(&[-2, 0, 1]);
//! let mut sqrt2 = RealAlgebraicNumber::new_root(poly, Interval::open(rat(1), rat(2))).unwrap();
//!
//! assert_eq!(sample_below(&sqrt2).value(), &rat(0));
//! assert_eq!(sample_above(&sqrt2).value(), &rat(3));
//! assert!(!sqrt2.is_integral());
//! assert_eq!(sqrt2.floor(), BigInt::from(1));
//!
//! let mut three_halves = RealAlgebraicNumber::from_rational(BigRational::new(
//!     BigInt::from(3),
//!     BigInt::from(2),
//! ));
//! assert!(sqrt2.less(&mut three_halves));
//! ```
//!
//! ## References
//!
//! - Basu et al.: "Algorithms in Real Algebraic Geometry" (2006)
//! - Z3's `math/realclosure/` and `math/polynomial/` directories

pub mod interval;
pub mod polynomial;
pub mod ran;

pub use interval::Interval;
pub use polynomial::{IsolatedRoot, UnivariatePolynomial};
pub use ran::{
    sample_above, sample_below, sample_between, ExternalHandle, ExternalRan, IntervalRan,
    RanError, RealAlgebraicNumber, SampleHeuristic, ThomEncoding,
};
