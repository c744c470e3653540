//! Witness selection strictly below, above, or between algebraic numbers.
//!
//! Samplers hand back concrete values a decision procedure can case-split
//! on: integers just outside a value, or a point from the gap between two
//! distinct values. Thom-encoded values sample through offset arithmetic on
//! their encodings; external values delegate to their engine.

use super::thom::{ThomEncoding, ThomRan};
use super::RealAlgebraicNumber;
use crate::interval::Interval;
use num_rational::BigRational;
use num_traits::One;
use tracing::trace;

/// Strategy for picking a witness from the gap between two values.
///
/// The integer strategies fall back to the exact center of the candidate
/// interval when the gap contains no admissible integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleHeuristic {
    /// Exact midpoint of the candidate interval, possibly non-integer.
    Center,
    /// Integer closest to the midpoint.
    CenterInt,
    /// Integer at the left end of the candidate interval.
    LeftInt,
    /// Integer at the right end of the candidate interval.
    RightInt,
    /// Integer closest to zero.
    ZeroInt,
    /// Integer farthest from zero.
    #[default]
    InftyInt,
}

/// An integer (or Thom point) strictly below `n`.
pub fn sample_below(n: &RealAlgebraicNumber) -> RealAlgebraicNumber {
    let witness = match n {
        RealAlgebraicNumber::Numeric(v) => {
            RealAlgebraicNumber::Numeric(v.ceil() - BigRational::one())
        }
        RealAlgebraicNumber::Interval(ir) => {
            RealAlgebraicNumber::Numeric(ir.interval.lower().ceil() - BigRational::one())
        }
        RealAlgebraicNumber::Thom(t) => {
            RealAlgebraicNumber::Thom(ThomRan::new(t.encoding.offset_by(&-BigRational::one())))
        }
        RealAlgebraicNumber::External(h) => RealAlgebraicNumber::External(h.sample_below()),
    };
    trace!("selected {} from (-oo, {})", witness, n);
    witness
}

/// An integer (or Thom point) strictly above `n`.
pub fn sample_above(n: &RealAlgebraicNumber) -> RealAlgebraicNumber {
    let witness = match n {
        RealAlgebraicNumber::Numeric(v) => {
            RealAlgebraicNumber::Numeric(v.floor() + BigRational::one())
        }
        RealAlgebraicNumber::Interval(ir) => {
            RealAlgebraicNumber::Numeric(ir.interval.upper().floor() + BigRational::one())
        }
        RealAlgebraicNumber::Thom(t) => {
            RealAlgebraicNumber::Thom(ThomRan::new(t.encoding.offset_by(&BigRational::one())))
        }
        RealAlgebraicNumber::External(h) => RealAlgebraicNumber::External(h.sample_above()),
    };
    trace!("selected {} from ({}, oo)", witness, n);
    witness
}

/// A value strictly between `lower` and `upper`.
///
/// Precondition: `lower < upper`. The caller establishes this; it is not
/// re-verified here.
///
/// Thom values on either side keep the result in Thom form through the
/// encoding's intermediate-point operation (rational partners included);
/// a Thom value facing an interval or external partner samples through its
/// materialized form. When both sides are external the engine's own
/// between-sampler answers. Otherwise a candidate interval is assembled
/// from the extracted bounds, both sides are refined until it is
/// non-empty, and the heuristic picks the witness; integer heuristics
/// fall back to the exact center when the candidate interval contains no
/// admissible integer.
pub fn sample_between(
    lower: &mut RealAlgebraicNumber,
    upper: &mut RealAlgebraicNumber,
    heuristic: SampleHeuristic,
) -> RealAlgebraicNumber {
    use RealAlgebraicNumber as Ran;
    match (&*lower, &*upper) {
        (Ran::Thom(a), Ran::Thom(b)) => {
            return Ran::from_thom(ThomEncoding::intermediate_point(&a.encoding, &b.encoding));
        }
        (Ran::Numeric(q), Ran::Thom(b)) => {
            return Ran::from_thom(ThomEncoding::intermediate_point_from_rational(
                q,
                &b.encoding,
            ));
        }
        (Ran::Thom(a), Ran::Numeric(q)) => {
            return Ran::from_thom(ThomEncoding::intermediate_point_to_rational(&a.encoding, q));
        }
        (Ran::External(ha), Ran::External(hb)) => {
            return Ran::External(ha.sample_between(&**hb));
        }
        _ => {}
    }
    if lower.is_thom() {
        return sample_between(lower.thom_inner_mut(), upper, heuristic);
    }
    if upper.is_thom() {
        return sample_between(lower, upper.thom_inner_mut(), heuristic);
    }

    let mut candidate = candidate_interval(lower, upper);
    while candidate.is_empty() {
        lower.refine();
        upper.refine();
        candidate = candidate_interval(lower, upper);
    }
    trace!("selecting from ({}, {}) -> candidates {}", lower, upper, candidate);
    let choice = match heuristic {
        SampleHeuristic::Center => return Ran::Numeric(candidate.center()),
        SampleHeuristic::CenterInt => candidate.int_center(),
        SampleHeuristic::LeftInt => candidate.int_left(),
        SampleHeuristic::RightInt => candidate.int_right(),
        SampleHeuristic::ZeroInt => candidate.int_zero(),
        SampleHeuristic::InftyInt => candidate.int_infty(),
    };
    match choice {
        Some(z) => Ran::Numeric(BigRational::from_integer(z)),
        None => {
            trace!("no integer witness in {}, falling back to the center", candidate);
            Ran::Numeric(candidate.center())
        }
    }
}

/// The window of admissible witnesses between the two values, read off
/// their current representations. The bound facing a `Numeric` side is the
/// value itself, excluded; the bound facing an interval-shaped side is the
/// isolating bound, which already lies strictly beyond the value and is
/// therefore included.
fn candidate_interval(lower: &RealAlgebraicNumber, upper: &RealAlgebraicNumber) -> Interval {
    use RealAlgebraicNumber as Ran;
    let (lo, lo_closed) = match lower {
        Ran::Numeric(v) => (v.clone(), false),
        Ran::Interval(ir) => (ir.interval.upper().clone(), true),
        Ran::External(h) => match h.to_rational() {
            Some(q) => (q, false),
            None => (h.upper(), true),
        },
        Ran::Thom(_) => unreachable!("thom values are sampled through their materialized form"),
    };
    let (hi, hi_closed) = match upper {
        Ran::Numeric(v) => (v.clone(), false),
        Ran::Interval(ir) => (ir.interval.lower().clone(), true),
        Ran::External(h) => match h.to_rational() {
            Some(q) => (q, false),
            None => (h.lower(), true),
        },
        Ran::Thom(_) => unreachable!("thom values are sampled through their materialized form"),
    };
    Interval::new(lo, lo_closed, hi, hi_closed)
}
