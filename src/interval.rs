//! Rational intervals with per-endpoint closedness.
//!
//! Used for isolating intervals of algebraic numbers and for the candidate
//! windows the sampler selects witnesses from. Integer selection follows the
//! sampler heuristics: leftmost, rightmost, closest to zero, farthest from
//! zero, or closest to the center.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

/// A rational interval; each endpoint is independently open or closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    lower: BigRational,
    upper: BigRational,
    lower_closed: bool,
    upper_closed: bool,
}

impl Interval {
    /// Create an interval with explicit endpoint closedness.
    ///
    /// Inverted bounds are allowed and yield an empty interval.
    pub fn new(lower: BigRational, lower_closed: bool, upper: BigRational, upper_closed: bool) -> Self {
        Self {
            lower,
            upper,
            lower_closed,
            upper_closed,
        }
    }

    /// The open interval `(lower, upper)`.
    pub fn open(lower: BigRational, upper: BigRational) -> Self {
        Self::new(lower, false, upper, false)
    }

    /// The closed interval `[lower, upper]`.
    pub fn closed(lower: BigRational, upper: BigRational) -> Self {
        Self::new(lower, true, upper, true)
    }

    /// The point interval `[v, v]`.
    pub fn point(v: BigRational) -> Self {
        Self::new(v.clone(), true, v, true)
    }

    /// Lower endpoint.
    #[inline]
    pub fn lower(&self) -> &BigRational {
        &self.lower
    }

    /// Upper endpoint.
    #[inline]
    pub fn upper(&self) -> &BigRational {
        &self.upper
    }

    /// Whether the lower endpoint is included.
    #[inline]
    pub fn lower_closed(&self) -> bool {
        self.lower_closed
    }

    /// Whether the upper endpoint is included.
    #[inline]
    pub fn upper_closed(&self) -> bool {
        self.upper_closed
    }

    /// Replace the lower endpoint.
    pub fn set_lower(&mut self, v: BigRational, closed: bool) {
        self.lower = v;
        self.lower_closed = closed;
    }

    /// Replace the upper endpoint.
    pub fn set_upper(&mut self, v: BigRational, closed: bool) {
        self.upper = v;
        self.upper_closed = closed;
    }

    /// Returns true if no rational lies in the interval.
    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
            || (self.lower == self.upper && !(self.lower_closed && self.upper_closed))
    }

    /// Returns true if the interval is the single point `[v, v]`.
    pub fn is_point(&self) -> bool {
        self.lower == self.upper && self.lower_closed && self.upper_closed
    }

    /// Width `upper - lower` (negative when inverted).
    pub fn width(&self) -> BigRational {
        &self.upper - &self.lower
    }

    /// Exact midpoint.
    pub fn center(&self) -> BigRational {
        (&self.lower + &self.upper) / BigRational::from_integer(BigInt::from(2))
    }

    /// Membership test respecting endpoint closedness.
    pub fn contains(&self, v: &BigRational) -> bool {
        let above = if self.lower_closed { v >= &self.lower } else { v > &self.lower };
        let below = if self.upper_closed { v <= &self.upper } else { v < &self.upper };
        above && below
    }

    /// Intersection; the tighter bound wins at each end.
    pub fn intersect(&self, other: &Self) -> Self {
        let (lower, lower_closed) = match self.lower.cmp(&other.lower) {
            std::cmp::Ordering::Greater => (self.lower.clone(), self.lower_closed),
            std::cmp::Ordering::Less => (other.lower.clone(), other.lower_closed),
            std::cmp::Ordering::Equal => (self.lower.clone(), self.lower_closed && other.lower_closed),
        };
        let (upper, upper_closed) = match self.upper.cmp(&other.upper) {
            std::cmp::Ordering::Less => (self.upper.clone(), self.upper_closed),
            std::cmp::Ordering::Greater => (other.upper.clone(), other.upper_closed),
            std::cmp::Ordering::Equal => (self.upper.clone(), self.upper_closed && other.upper_closed),
        };
        Self::new(lower, lower_closed, upper, upper_closed)
    }

    /// Smallest and largest integers in the interval, or `None` when the
    /// interval contains no integer.
    fn int_bounds(&self) -> Option<(BigInt, BigInt)> {
        let lo = if self.lower_closed {
            self.lower.ceil().to_integer()
        } else {
            self.lower.floor().to_integer() + BigInt::one()
        };
        let hi = if self.upper_closed {
            self.upper.floor().to_integer()
        } else {
            self.upper.ceil().to_integer() - BigInt::one()
        };
        if lo > hi {
            None
        } else {
            Some((lo, hi))
        }
    }

    /// Leftmost integer in the interval.
    pub fn int_left(&self) -> Option<BigInt> {
        self.int_bounds().map(|(lo, _)| lo)
    }

    /// Rightmost integer in the interval.
    pub fn int_right(&self) -> Option<BigInt> {
        self.int_bounds().map(|(_, hi)| hi)
    }

    /// Integer in the interval closest to zero.
    pub fn int_zero(&self) -> Option<BigInt> {
        self.int_bounds().map(|(lo, hi)| {
            if lo.is_positive() {
                lo
            } else if hi.is_negative() {
                hi
            } else {
                BigInt::zero()
            }
        })
    }

    /// Integer in the interval farthest from zero.
    pub fn int_infty(&self) -> Option<BigInt> {
        self.int_bounds().map(|(lo, hi)| {
            if hi.abs() >= lo.abs() {
                hi
            } else {
                lo
            }
        })
    }

    /// Integer in the interval closest to the center.
    pub fn int_center(&self) -> Option<BigInt> {
        self.int_bounds().map(|(lo, hi)| {
            let rounded = self.center().round().to_integer();
            rounded.clamp(lo, hi)
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}, {}{}",
            if self.lower_closed { '[' } else { '(' },
            self.lower,
            self.upper,
            if self.upper_closed { ']' } else { ')' },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_emptiness() {
        assert!(Interval::open(rat(1), rat(1)).is_empty());
        assert!(Interval::new(rat(2), true, rat(1), true).is_empty());
        assert!(!Interval::point(rat(1)).is_empty());
        assert!(!Interval::open(rat(1), rat(2)).is_empty());
    }

    #[test]
    fn test_contains() {
        let i = Interval::new(rat(0), true, rat(2), false);
        assert!(i.contains(&rat(0)));
        assert!(i.contains(&rat(1)));
        assert!(!i.contains(&rat(2)));
    }

    #[test]
    fn test_open_unit_interval_has_no_integer() {
        let i = Interval::open(rat(1), rat(2));
        assert_eq!(i.int_left(), None);
        assert_eq!(i.int_infty(), None);
    }

    #[test]
    fn test_integer_selection() {
        let i = Interval::open(rat(-3), ratio(5, 2));
        assert_eq!(i.int_left(), Some(BigInt::from(-2)));
        assert_eq!(i.int_right(), Some(BigInt::from(2)));
        assert_eq!(i.int_zero(), Some(BigInt::from(0)));
        assert_eq!(i.int_infty(), Some(BigInt::from(2)));
    }

    #[test]
    fn test_int_infty_prefers_magnitude() {
        let i = Interval::closed(rat(-5), rat(3));
        assert_eq!(i.int_infty(), Some(BigInt::from(-5)));
    }

    #[test]
    fn test_int_center_clamps() {
        let i = Interval::open(rat(0), rat(10));
        assert_eq!(i.int_center(), Some(BigInt::from(5)));
        let j = Interval::open(ratio(1, 2), ratio(3, 2));
        assert_eq!(j.int_center(), Some(BigInt::from(1)));
    }

    #[test]
    fn test_intersect() {
        let a = Interval::open(rat(0), rat(2));
        let b = Interval::open(rat(1), rat(3));
        let i = a.intersect(&b);
        assert_eq!(i.lower(), &rat(1));
        assert_eq!(i.upper(), &rat(2));
        assert!(!i.lower_closed() && !i.upper_closed());
    }
}
