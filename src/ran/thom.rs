//! Thom encodings of algebraic numbers.
//!
//! A Thom encoding pins one real root of a squarefree polynomial by the
//! signs of the successive derivatives at that root; the sign sequence of a
//! polynomial's derivatives is distinct at each of its real roots, so a
//! matching sequence identifies at most one of them. On top of the root the
//! encoding carries a signed rational offset, which is how values adjacent
//! to a given root ("this root minus one") are expressed.
//!
//! ## References
//!
//! - Basu et al.: "Algorithms in Real Algebraic Geometry" (2006), Thom's lemma
//! - Z3's `math/realclosure/` directory

use super::sample::{sample_between, SampleHeuristic};
use super::{IntervalRan, RanError, RealAlgebraicNumber};
use crate::interval::Interval;
use crate::polynomial::{sign_at_root, IsolatedRoot, UnivariatePolynomial};
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use smallvec::SmallVec;
use std::fmt;

/// Sign conditions on successive derivatives, `signs[i]` applying to the
/// `(i + 1)`-th derivative.
pub type SignConditions = SmallVec<[i8; 4]>;

/// A root pinned by derivative sign conditions, plus a rational offset.
#[derive(Debug, Clone)]
pub struct ThomEncoding {
    /// Squarefree monic polynomial whose root is encoded.
    poly: UnivariatePolynomial,
    /// Signs of the successive derivatives at the root.
    signs: SignConditions,
    /// Signed rational offset added to the root.
    offset: BigRational,
    /// The root the conditions pin down, resolved at construction.
    pinned: IsolatedRoot,
}

impl ThomEncoding {
    /// Encode the unique root of `poly` whose derivative signs match
    /// `signs` (`signs[i]` constrains the `(i + 1)`-th derivative).
    ///
    /// The polynomial is replaced by its squarefree part. An empty sign
    /// sequence is allowed when the polynomial has exactly one real root.
    pub fn new(poly: &UnivariatePolynomial, signs: &[i8]) -> Result<Self, RanError> {
        if poly.is_zero() {
            return Err(RanError::ZeroPolynomial);
        }
        let p = poly.square_free_part();
        let mut derivatives = Vec::with_capacity(signs.len());
        let mut d = p.derivative();
        for _ in 0..signs.len() {
            derivatives.push(d.clone());
            d = d.derivative();
        }
        let mut matches = Vec::new();
        for root in p.isolate_real_roots() {
            let agrees = derivatives.iter().zip(signs.iter()).all(|(di, want)| {
                let s = match &root {
                    IsolatedRoot::Exact(r) => di.sign_at(r),
                    IsolatedRoot::Bracketed { poly, lower, upper } => {
                        sign_at_root(poly, lower, upper, di)
                    }
                };
                s == *want
            });
            if agrees {
                matches.push(root);
            }
        }
        match matches.len() {
            0 => Err(RanError::NoMatchingRoot),
            1 => Ok(Self {
                poly: p,
                signs: SignConditions::from_slice(signs),
                offset: BigRational::zero(),
                pinned: matches.remove(0),
            }),
            n => Err(RanError::AmbiguousSignCondition(n)),
        }
    }

    /// The trivial encoding of an exact rational, as the root of `x - q`.
    pub fn from_rational(q: BigRational) -> Self {
        Self {
            poly: UnivariatePolynomial::from_root(&q),
            signs: SignConditions::new(),
            offset: BigRational::zero(),
            pinned: IsolatedRoot::Exact(q),
        }
    }

    /// The encoded polynomial.
    pub fn poly(&self) -> &UnivariatePolynomial {
        &self.poly
    }

    /// The derivative sign conditions.
    pub fn signs(&self) -> &[i8] {
        &self.signs
    }

    /// The rational offset added to the pinned root.
    pub fn offset(&self) -> &BigRational {
        &self.offset
    }

    /// The same root with `delta` added to the offset.
    pub fn offset_by(&self, delta: &BigRational) -> Self {
        Self {
            poly: self.poly.clone(),
            signs: self.signs.clone(),
            offset: &self.offset + delta,
            pinned: self.pinned.clone(),
        }
    }

    /// Exact test for "the denoted value equals the rational `v`".
    /// Never refines: the pinned root region is decisive.
    pub(crate) fn is_rational_value(&self, v: &BigRational) -> bool {
        let target = v - &self.offset;
        match &self.pinned {
            IsolatedRoot::Exact(r) => r == &target,
            IsolatedRoot::Bracketed { poly, lower, upper } => {
                &target > lower && &target < upper && poly.sign_at(&target) == 0
            }
        }
    }

    /// Materialize the denoted value as a `Numeric` or `Interval` number.
    ///
    /// The offset is folded in by shifting the defining polynomial and the
    /// isolating interval.
    pub(crate) fn materialize(&self) -> RealAlgebraicNumber {
        match &self.pinned {
            IsolatedRoot::Exact(r) => RealAlgebraicNumber::Numeric(r + &self.offset),
            IsolatedRoot::Bracketed { poly, lower, upper } => {
                let (poly, lower, upper) = if self.offset.is_zero() {
                    (poly.clone(), lower.clone(), upper.clone())
                } else {
                    (
                        poly.shift_by(&self.offset).monic(),
                        lower + &self.offset,
                        upper + &self.offset,
                    )
                };
                RealAlgebraicNumber::Interval(IntervalRan {
                    poly,
                    interval: Interval::open(lower, upper),
                })
            }
        }
    }

    /// A Thom point strictly between `a` and `b`.
    ///
    /// Precondition: `a < b` as real values; the caller establishes this.
    /// Two encodings of the same root average their offsets and stay on
    /// that root; otherwise the values are separated through their
    /// materialized forms and the midpoint of the gap is returned as a
    /// trivially encoded rational.
    pub fn intermediate_point(a: &Self, b: &Self) -> Self {
        if a.poly == b.poly && a.signs == b.signs {
            let mid = (&a.offset + &b.offset) / BigRational::from_integer(2.into());
            return a.offset_by(&(&mid - &a.offset));
        }
        let mut x = a.materialize();
        let mut y = b.materialize();
        match sample_between(&mut x, &mut y, SampleHeuristic::Center) {
            RealAlgebraicNumber::Numeric(q) => Self::from_rational(q),
            other => unreachable!("center sampling of materialized values is rational: {}", other),
        }
    }

    /// A Thom point strictly between the rational `a` and the encoding `b`.
    pub fn intermediate_point_from_rational(a: &BigRational, b: &Self) -> Self {
        Self::intermediate_point(&Self::from_rational(a.clone()), b)
    }

    /// A Thom point strictly between the encoding `a` and the rational `b`.
    pub fn intermediate_point_to_rational(a: &Self, b: &BigRational) -> Self {
        Self::intermediate_point(a, &Self::from_rational(b.clone()))
    }
}

impl PartialEq for ThomEncoding {
    fn eq(&self, other: &Self) -> bool {
        self.poly == other.poly && self.signs == other.signs && self.offset == other.offset
    }
}

impl Eq for ThomEncoding {}

impl fmt::Display for ThomEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thom(root of {} with signs [", self.poly)?;
        for (i, s) in self.signs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match s {
                1 => write!(f, "+")?,
                -1 => write!(f, "-")?,
                _ => write!(f, "0")?,
            }
        }
        write!(f, "])")?;
        if self.offset.is_positive() {
            write!(f, " + {}", self.offset)?;
        } else if self.offset.is_negative() {
            write!(f, " - {}", -self.offset.clone())?;
        }
        Ok(())
    }
}

/// Thom-backed algebraic number content: the encoding plus a lazily
/// materialized interval form used for comparison and refinement.
#[derive(Debug, Clone)]
pub struct ThomRan {
    pub(crate) encoding: ThomEncoding,
    pub(crate) materialized: Option<Box<RealAlgebraicNumber>>,
}

impl ThomRan {
    pub(crate) fn new(encoding: ThomEncoding) -> Self {
        Self {
            encoding,
            materialized: None,
        }
    }

    /// The materialized value, computed on first use.
    pub(crate) fn value_mut(&mut self) -> &mut RealAlgebraicNumber {
        let encoding = &self.encoding;
        &mut **self
            .materialized
            .get_or_insert_with(|| Box::new(encoding.materialize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use std::cmp::Ordering;

    fn rat(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn x2_minus_2() -> UnivariatePolynomial {
        UnivariatePolynomial::from_int_coeffs(&[-2, 0, 1])
    }

    #[test]
    fn test_positive_root_by_derivative_sign() {
        // the derivative 2x is positive at sqrt(2), negative at -sqrt(2)
        let pos = ThomEncoding::new(&x2_minus_2(), &[1]).expect("unique match");
        let neg = ThomEncoding::new(&x2_minus_2(), &[-1]).expect("unique match");
        let mut a = RealAlgebraicNumber::from_thom(neg);
        let mut b = RealAlgebraicNumber::from_thom(pos);
        assert_eq!(a.compare(&mut b), Ordering::Less);
    }

    #[test]
    fn test_empty_signs_need_unique_root() {
        assert_eq!(
            ThomEncoding::new(&x2_minus_2(), &[]).unwrap_err(),
            RanError::AmbiguousSignCondition(2)
        );
        // x - 3 has a single root, no conditions needed
        let enc = ThomEncoding::new(&UnivariatePolynomial::from_int_coeffs(&[-3, 1]), &[])
            .expect("unique root");
        assert!(enc.is_rational_value(&rat(3)));
    }

    #[test]
    fn test_no_matching_root() {
        // x^2 + 1 has no real roots at all
        let p = UnivariatePolynomial::from_int_coeffs(&[1, 0, 1]);
        assert_eq!(ThomEncoding::new(&p, &[1]).unwrap_err(), RanError::NoMatchingRoot);
    }

    #[test]
    fn test_offsets_order() {
        let enc = ThomEncoding::new(&x2_minus_2(), &[1]).expect("unique match");
        let mut base = RealAlgebraicNumber::from_thom(enc.clone());
        let mut below = RealAlgebraicNumber::from_thom(enc.offset_by(&rat(-1)));
        let mut above = RealAlgebraicNumber::from_thom(enc.offset_by(&rat(1)));
        assert_eq!(below.compare(&mut base), Ordering::Less);
        assert_eq!(base.compare(&mut above), Ordering::Less);
        assert_eq!(below.compare(&mut above), Ordering::Less);
    }

    #[test]
    fn test_thom_equals_interval_form() {
        let enc = ThomEncoding::new(&x2_minus_2(), &[1]).expect("unique match");
        let mut a = RealAlgebraicNumber::from_thom(enc);
        let mut b = RealAlgebraicNumber::new_root(
            x2_minus_2(),
            crate::interval::Interval::open(rat(1), rat(2)),
        )
        .expect("isolating");
        assert_eq!(a.compare(&mut b), Ordering::Equal);
    }

    #[test]
    fn test_same_root_intermediate_averages_offsets() {
        let enc = ThomEncoding::new(&x2_minus_2(), &[1]).expect("unique match");
        let below = enc.offset_by(&rat(-1));
        let mid = ThomEncoding::intermediate_point(&below, &enc);
        assert_eq!(mid.offset(), &ratio(-1, 2));
        assert_eq!(mid.poly(), enc.poly());
    }

    #[test]
    fn test_intermediate_point_between_distinct_roots() {
        let pos = ThomEncoding::new(&x2_minus_2(), &[1]).expect("unique match");
        let neg = ThomEncoding::new(&x2_minus_2(), &[-1]).expect("unique match");
        let mid = ThomEncoding::intermediate_point(&neg, &pos);
        let mut m = RealAlgebraicNumber::from_thom(mid);
        let mut a = RealAlgebraicNumber::from_thom(neg);
        let mut b = RealAlgebraicNumber::from_thom(pos);
        assert_eq!(a.compare(&mut m), Ordering::Less);
        assert_eq!(m.compare(&mut b), Ordering::Less);
    }

    #[test]
    fn test_intermediate_with_rational() {
        let pos = ThomEncoding::new(&x2_minus_2(), &[1]).expect("unique match");
        let mid = ThomEncoding::intermediate_point_from_rational(&rat(0), &pos);
        let mut m = RealAlgebraicNumber::from_thom(mid);
        let mut zero = RealAlgebraicNumber::from(0i64);
        let mut b = RealAlgebraicNumber::from_thom(pos);
        assert_eq!(zero.compare(&mut m), Ordering::Less);
        assert_eq!(m.compare(&mut b), Ordering::Less);
    }

    #[test]
    fn test_thom_floor_and_integrality() {
        let enc = ThomEncoding::new(&x2_minus_2(), &[1]).expect("unique match");
        let mut n = RealAlgebraicNumber::from_thom(enc.clone());
        assert_eq!(n.floor(), BigInt::from(1));
        assert!(!n.is_integral());
        // sqrt(2) + 1 floors to 2
        let mut shifted = RealAlgebraicNumber::from_thom(enc.offset_by(&rat(1)));
        assert_eq!(shifted.floor(), BigInt::from(2));
    }

    #[test]
    fn test_materialize_offset_shifts_interval() {
        let enc = ThomEncoding::new(&x2_minus_2(), &[1]).expect("unique match");
        let shifted = enc.offset_by(&rat(5));
        match shifted.materialize() {
            RealAlgebraicNumber::Interval(ir) => {
                assert_eq!(ir.poly().count_roots_in(ir.interval().lower(), ir.interval().upper()), 1);
                assert!(*ir.interval().lower() >= rat(5) - rat(3));
            }
            other => panic!("expected an interval form, got {}", other),
        }
    }
}
