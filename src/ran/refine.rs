//! Interval refinement for algebraic numbers.
//!
//! Refinement shrinks an isolating interval by bisection while preserving
//! the one-root invariant. An exact hit at the bisection point collapses
//! the interval and promotes the value to `Numeric` in place; afterwards
//! every call behaves as on a plain rational.

use super::{IntervalRan, RealAlgebraicNumber};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use tracing::trace;

/// Integrality refinement probes every integer candidate left in the
/// interval once at most this many remain; wider intervals just bisect.
const INTEGER_PROBE_SPAN: u32 = 8;

impl IntervalRan {
    /// One bisection step. Returns the exact root when the bisection point
    /// hits it; otherwise keeps the half with the sign change.
    pub(crate) fn bisect(&mut self) -> Option<BigRational> {
        let mid = self.interval.center();
        match self.poly.sign_at(&mid) {
            0 => Some(mid),
            sm => {
                if self.poly.sign_at(self.interval.lower()) != sm {
                    self.interval.set_upper(mid, false);
                } else {
                    self.interval.set_lower(mid, false);
                }
                trace!("refined isolating interval to {}", self.interval);
                None
            }
        }
    }
}

impl RealAlgebraicNumber {
    /// Refine the representation one step.
    ///
    /// `Interval` values halve their isolating interval (or promote to
    /// `Numeric` on an exact hit), `Thom` values refine their materialized
    /// form, `External` values delegate to the engine, and `Numeric` values
    /// are already exact, so this is a no-op for them.
    pub fn refine(&mut self) {
        let collapsed = match self {
            Self::Numeric(_) => None,
            Self::Interval(ir) => ir.bisect(),
            Self::Thom(t) => {
                t.value_mut().refine();
                None
            }
            Self::External(h) => {
                h.refine();
                None
            }
        };
        if let Some(root) = collapsed {
            trace!("isolating interval collapsed onto {}", root);
            *self = Self::Numeric(root);
        }
    }

    /// Refine until the representation is exact or narrower than `width`.
    pub fn refine_to_width(&mut self, width: &BigRational) {
        if self.is_thom() {
            self.thom_inner_mut().refine_to_width(width);
            return;
        }
        loop {
            let current = match &*self {
                Self::Numeric(_) => return,
                Self::Interval(ir) => ir.interval.width(),
                Self::External(h) => {
                    if h.to_rational().is_some() {
                        return;
                    }
                    h.upper() - h.lower()
                }
                Self::Thom(_) => unreachable!("thom values delegate to their materialized form"),
            };
            if &current <= width {
                return;
            }
            self.refine();
        }
    }

    /// Shrink the isolating interval until it excludes the rational `q`,
    /// promoting to `Numeric(q)` when `q` turns out to be the root.
    /// No-op for representations other than `Interval`.
    pub(crate) fn refine_avoiding(&mut self, q: &BigRational) {
        let adopt = match self {
            Self::Interval(ir) => {
                if !ir.interval.contains(q) {
                    return;
                }
                match ir.poly.sign_at(q) {
                    0 => true,
                    sq => {
                        if ir.poly.sign_at(ir.interval.lower()) != sq {
                            ir.interval.set_upper(q.clone(), false);
                        } else {
                            ir.interval.set_lower(q.clone(), false);
                        }
                        false
                    }
                }
            }
            _ => return,
        };
        if adopt {
            trace!("isolating interval pinned onto {}", q);
            *self = Self::Numeric(q.clone());
        }
    }

    /// Refine until `floor` and `ceil` can be read off the representation:
    /// either the value is `Numeric`, or both interval endpoints share
    /// their floor.
    ///
    /// A value that is exactly an integer can never satisfy the shared-floor
    /// condition, so once few enough integer candidates remain in the
    /// interval each one is tested against the defining polynomial and an
    /// exact hit promotes to `Numeric`.
    pub fn refine_to_integrality(&mut self) {
        if self.is_thom() {
            self.thom_inner_mut().refine_to_integrality();
            return;
        }
        if let Self::External(h) = &*self {
            loop {
                if h.to_rational().is_some() {
                    return;
                }
                if h.lower().floor() == h.upper().floor() {
                    return;
                }
                h.refine();
            }
        }
        loop {
            let exact_hit = match &*self {
                Self::Numeric(_) => return,
                Self::Interval(ir) => {
                    let fl = ir.interval.lower().floor().to_integer();
                    let fu = ir.interval.upper().floor().to_integer();
                    if fl == fu {
                        return;
                    }
                    let mut hit = None;
                    if &fu - &fl <= BigInt::from(INTEGER_PROBE_SPAN) {
                        let mut k = &fl + BigInt::one();
                        while k <= fu {
                            let kq = BigRational::from_integer(k.clone());
                            if ir.interval.contains(&kq) && ir.poly.sign_at(&kq) == 0 {
                                hit = Some(kq);
                                break;
                            }
                            k += BigInt::one();
                        }
                    }
                    hit
                }
                _ => unreachable!("thom and external handled above"),
            };
            match exact_hit {
                Some(kq) => {
                    trace!("integrality refinement pinned onto {}", kq);
                    *self = Self::Numeric(kq);
                    return;
                }
                None => self.refine(),
            }
        }
    }
}
