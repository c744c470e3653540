//! Real Algebraic Numbers.
//!
//! Represents real algebraic numbers — roots of univariate polynomials with
//! rational coefficients — as exact, totally ordered values for nonlinear
//! real arithmetic solving.
//!
//! ## Representation
//!
//! A [`RealAlgebraicNumber`] is a closed sum over four cases:
//!
//! - `Numeric`: an exact rational; every query is an exact rational
//!   operation.
//! - `Interval`: a squarefree defining polynomial together with an open
//!   isolating interval containing exactly one of its roots. Refinement
//!   shrinks the interval and promotes the value to `Numeric` when it
//!   collapses onto an exact rational.
//! - `Thom`: a root pinned by the signs of successive derivatives at the
//!   root, plus a signed rational offset (see [`thom::ThomEncoding`]).
//! - `External`: an opaque, reference-counted handle to a pluggable
//!   algebraic-number engine (see [`external::ExternalRan`]).
//!
//! Every operation dispatches exhaustively over the four cases, so an
//! unsupported representation combination is unrepresentable rather than a
//! runtime fallback.
//!
//! ## References
//!
//! - Basu et al.: "Algorithms in Real Algebraic Geometry" (2006)
//! - Z3's `math/realclosure/` directory

mod compare;
mod refine;
mod sample;

pub mod external;
pub mod thom;

pub use external::{ExternalHandle, ExternalRan};
pub use sample::{sample_above, sample_below, sample_between, SampleHeuristic};
pub use thom::ThomEncoding;

use crate::interval::Interval;
use crate::polynomial::{sign_of, IsolatedRoot, UnivariatePolynomial};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::fmt;
use thiserror::Error;
use thom::ThomRan;

/// Errors raised when constructing an algebraic number from unusable input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RanError {
    /// The zero polynomial has every real as a root.
    #[error("zero polynomial does not define an algebraic number")]
    ZeroPolynomial,
    /// The isolating interval contains no rational at all.
    #[error("isolating interval is empty")]
    EmptyInterval,
    /// The interval does not contain exactly one root.
    #[error("interval is not isolating: contains {0} roots")]
    NotIsolating(usize),
    /// Thom sign conditions match none of the polynomial's real roots.
    #[error("sign conditions match no real root")]
    NoMatchingRoot,
    /// Thom sign conditions match more than one real root.
    #[error("sign conditions match {0} real roots")]
    AmbiguousSignCondition(usize),
}

/// Interval-backed algebraic number content.
///
/// Invariant: `poly` is squarefree and monic, `interval` is open at both
/// ends, neither endpoint is a root of `poly`, and `poly` has exactly one
/// root strictly inside the interval.
#[derive(Debug, Clone)]
pub struct IntervalRan {
    pub(crate) poly: UnivariatePolynomial,
    pub(crate) interval: Interval,
}

impl IntervalRan {
    /// Defining polynomial.
    pub fn poly(&self) -> &UnivariatePolynomial {
        &self.poly
    }

    /// Current isolating interval.
    pub fn interval(&self) -> &Interval {
        &self.interval
    }
}

/// An exact real algebraic number.
#[derive(Debug, Clone)]
pub enum RealAlgebraicNumber {
    /// An exact rational value.
    Numeric(BigRational),
    /// The unique root of a squarefree polynomial in an isolating interval.
    Interval(IntervalRan),
    /// A root pinned by derivative sign conditions, plus a rational offset.
    Thom(ThomRan),
    /// A value owned by an external algebraic-number engine.
    External(ExternalHandle),
}

impl RealAlgebraicNumber {
    /// Construct from an exact rational.
    pub fn from_rational(value: BigRational) -> Self {
        Self::Numeric(value)
    }

    /// Construct the unique root of `poly` inside `interval`.
    ///
    /// The polynomial is replaced by its squarefree part. A root sitting on
    /// a closed interval boundary is accepted and comes back already
    /// promoted to `Numeric`; roots at open boundaries are outside the
    /// interval and are divided out of the stored polynomial, so the stored
    /// interval is always open with non-root endpoints.
    pub fn new_root(poly: UnivariatePolynomial, interval: Interval) -> Result<Self, RanError> {
        if poly.is_zero() {
            return Err(RanError::ZeroPolynomial);
        }
        if interval.is_empty() {
            return Err(RanError::EmptyInterval);
        }
        let p = poly.square_free_part();
        if p.is_constant() {
            return Err(RanError::NotIsolating(0));
        }
        if interval.is_point() {
            let v = interval.lower().clone();
            return if p.sign_at(&v) == 0 {
                Ok(Self::Numeric(v))
            } else {
                Err(RanError::NotIsolating(0))
            };
        }
        let l = interval.lower().clone();
        let u = interval.upper().clone();
        let mut q = p;
        let mut boundary_root = None;
        let mut boundary_count = 0usize;
        if q.sign_at(&l) == 0 {
            if interval.lower_closed() {
                boundary_root = Some(l.clone());
                boundary_count += 1;
            }
            q = q.deflate(&l);
        }
        if q.sign_at(&u) == 0 {
            if interval.upper_closed() {
                boundary_root = Some(u.clone());
                boundary_count += 1;
            }
            q = q.deflate(&u);
        }
        if q.is_constant() {
            return match (boundary_count, boundary_root) {
                (1, Some(v)) => Ok(Self::Numeric(v)),
                (n, _) => Err(RanError::NotIsolating(n)),
            };
        }
        let interior = q.count_roots_in(&l, &u);
        match (boundary_count, interior, boundary_root) {
            (0, 1, _) => Ok(Self::Interval(IntervalRan {
                poly: q.monic(),
                interval: Interval::open(l, u),
            })),
            (1, 0, Some(v)) => Ok(Self::Numeric(v)),
            (b, n, _) => Err(RanError::NotIsolating(b + n)),
        }
    }

    /// All distinct real roots of `poly`, ascending. Rational roots come
    /// back as `Numeric`.
    pub fn real_roots(poly: &UnivariatePolynomial) -> Result<Vec<Self>, RanError> {
        if poly.is_zero() {
            return Err(RanError::ZeroPolynomial);
        }
        Ok(poly
            .isolate_real_roots()
            .into_iter()
            .map(|root| match root {
                IsolatedRoot::Exact(v) => Self::Numeric(v),
                IsolatedRoot::Bracketed { poly, lower, upper } => Self::Interval(IntervalRan {
                    poly,
                    interval: Interval::open(lower, upper),
                }),
            })
            .collect())
    }

    /// Construct from a Thom encoding.
    pub fn from_thom(encoding: ThomEncoding) -> Self {
        Self::Thom(ThomRan::new(encoding))
    }

    /// Construct from an external engine handle.
    pub fn from_external(handle: ExternalHandle) -> Self {
        Self::External(handle)
    }

    /// Returns true for the `Numeric` representation.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    /// Returns true for the `Interval` representation.
    #[inline]
    pub fn is_interval(&self) -> bool {
        matches!(self, Self::Interval(_))
    }

    /// Returns true for the `Thom` representation.
    #[inline]
    pub fn is_thom(&self) -> bool {
        matches!(self, Self::Thom(_))
    }

    /// Returns true for the `External` representation.
    #[inline]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// The exact rational value.
    ///
    /// # Panics
    ///
    /// Panics when the representation is not `Numeric`.
    pub fn value(&self) -> &BigRational {
        match self {
            Self::Numeric(v) => v,
            other => panic!("value() called on a non-numeric algebraic number: {}", other),
        }
    }

    /// Lower endpoint of the isolating interval.
    ///
    /// # Panics
    ///
    /// Panics when the representation is not `Interval`.
    pub fn lower(&self) -> &BigRational {
        match self {
            Self::Interval(ir) => ir.interval.lower(),
            other => panic!("lower() called on a non-interval algebraic number: {}", other),
        }
    }

    /// Upper endpoint of the isolating interval.
    ///
    /// # Panics
    ///
    /// Panics when the representation is not `Interval`.
    pub fn upper(&self) -> &BigRational {
        match self {
            Self::Interval(ir) => ir.interval.upper(),
            other => panic!("upper() called on a non-interval algebraic number: {}", other),
        }
    }

    /// Exact zero test. Never refines: for interval-backed values it checks
    /// whether 0 lies in the interval and is a root of the defining
    /// polynomial, which the one-root invariant makes decisive.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Numeric(v) => v.is_zero(),
            Self::Interval(ir) => {
                let zero = BigRational::zero();
                ir.interval.contains(&zero) && ir.poly.sign_at(&zero) == 0
            }
            Self::Thom(t) => t.encoding.is_rational_value(&BigRational::zero()),
            Self::External(h) => h.is_zero(),
        }
    }

    /// Returns true when the denoted real is an integer. May refine.
    pub fn is_integral(&mut self) -> bool {
        if self.is_thom() {
            return self.thom_inner_mut().is_integral();
        }
        if self.is_interval() {
            self.refine_to_integrality();
        }
        match &*self {
            Self::Numeric(v) => v.is_integer(),
            Self::Interval(_) => false,
            Self::External(h) => h.is_integral(),
            Self::Thom(_) => unreachable!("thom values delegate to their materialized form"),
        }
    }

    /// Exact mathematical floor. Refines until the representation is
    /// precise enough, then reads it off via [`Self::floor_fast`].
    pub fn floor(&mut self) -> BigInt {
        self.refine_to_integrality();
        self.floor_fast()
    }

    /// Exact mathematical ceiling, the symmetric counterpart of
    /// [`Self::floor`].
    pub fn ceil(&mut self) -> BigInt {
        self.refine_to_integrality();
        self.ceil_fast()
    }

    /// Floor read directly from the current representation.
    ///
    /// Assumes the value has already been refined so that both interval
    /// endpoints share their floor (see [`Self::floor`]).
    ///
    /// # Panics
    ///
    /// Panics on a Thom value that has never been refined.
    pub fn floor_fast(&self) -> BigInt {
        match self {
            Self::Numeric(v) => v.floor().to_integer(),
            Self::Interval(ir) => ir.interval.lower().floor().to_integer(),
            Self::Thom(t) => match &t.materialized {
                Some(inner) => inner.floor_fast(),
                None => panic!("floor_fast() called on an unrefined thom value"),
            },
            Self::External(h) => h.lower().floor().to_integer(),
        }
    }

    /// Ceiling read directly from the current representation; same
    /// precondition as [`Self::floor_fast`].
    pub fn ceil_fast(&self) -> BigInt {
        match self {
            Self::Numeric(v) => v.ceil().to_integer(),
            Self::Interval(ir) => ir.interval.upper().ceil().to_integer(),
            Self::Thom(t) => match &t.materialized {
                Some(inner) => inner.ceil_fast(),
                None => panic!("ceil_fast() called on an unrefined thom value"),
            },
            Self::External(h) => h.upper().ceil().to_integer(),
        }
    }

    /// Exact sign of the value: -1, 0, or 1. May refine.
    pub fn sign(&mut self) -> i8 {
        if self.is_thom() {
            return self.thom_inner_mut().sign();
        }
        if self.is_interval() {
            self.refine_avoiding(&BigRational::zero());
        }
        match &*self {
            Self::Numeric(v) => sign_of(v),
            Self::Interval(ir) => {
                if *ir.interval.upper() <= BigRational::zero() {
                    -1
                } else {
                    1
                }
            }
            Self::External(h) => h.sign(),
            Self::Thom(_) => unreachable!("thom values delegate to their materialized form"),
        }
    }

    /// Absolute value. May refine to decide the sign first.
    pub fn abs(&mut self) -> Self {
        if self.is_thom() {
            return self.thom_inner_mut().abs();
        }
        match self.sign() {
            0 => Self::Numeric(BigRational::zero()),
            s => match &*self {
                Self::Numeric(v) => Self::Numeric(v.abs()),
                Self::Interval(ir) => {
                    if s > 0 {
                        self.clone()
                    } else {
                        Self::Interval(IntervalRan {
                            poly: ir.poly.reflect().monic(),
                            interval: Interval::open(
                                -ir.interval.upper().clone(),
                                -ir.interval.lower().clone(),
                            ),
                        })
                    }
                }
                Self::External(h) => Self::External(h.abs()),
                Self::Thom(_) => unreachable!("thom values delegate to their materialized form"),
            },
        }
    }

    /// Exact sign of an arbitrary polynomial evaluated at this value.
    /// May refine but never floats: the zero case is decided through
    /// `gcd` with the defining polynomial.
    pub fn sign_of_polynomial(&mut self, q: &UnivariatePolynomial) -> i8 {
        if q.is_zero() {
            return 0;
        }
        if self.is_thom() {
            return self.thom_inner_mut().sign_of_polynomial(q);
        }
        match &*self {
            Self::Numeric(v) => q.sign_at(v),
            Self::Interval(ir) => {
                let g = ir.poly.gcd(q);
                if g.degree() >= 1
                    && g.count_roots_in(ir.interval.lower(), ir.interval.upper()) > 0
                {
                    return 0;
                }
                crate::polynomial::sign_at_root(
                    &ir.poly,
                    ir.interval.lower(),
                    ir.interval.upper(),
                    q,
                )
            }
            Self::External(h) => h.sign_of_polynomial(q),
            Self::Thom(_) => unreachable!("thom values delegate to their materialized form"),
        }
    }

    /// Mutable access to the materialized form of a Thom value.
    ///
    /// # Panics
    ///
    /// Panics when the representation is not `Thom`.
    pub(crate) fn thom_inner_mut(&mut self) -> &mut RealAlgebraicNumber {
        match self {
            Self::Thom(t) => t.value_mut(),
            other => panic!("thom_inner_mut() on a non-thom algebraic number: {}", other),
        }
    }
}

impl From<BigRational> for RealAlgebraicNumber {
    fn from(value: BigRational) -> Self {
        Self::Numeric(value)
    }
}

impl From<BigInt> for RealAlgebraicNumber {
    fn from(value: BigInt) -> Self {
        Self::Numeric(BigRational::from_integer(value))
    }
}

impl From<i64> for RealAlgebraicNumber {
    fn from(value: i64) -> Self {
        Self::Numeric(BigRational::from_integer(BigInt::from(value)))
    }
}

impl fmt::Display for RealAlgebraicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "{}", v),
            Self::Interval(ir) => write!(f, "root of {} in {}", ir.poly, ir.interval),
            Self::Thom(t) => write!(f, "{}", t.encoding),
            Self::External(h) => write!(f, "external({:?})", h),
        }
    }
}
