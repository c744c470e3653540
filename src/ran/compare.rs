//! Total order and equality over algebraic numbers.
//!
//! Comparison across all representation pairs terminates and never answers
//! "unknown". Equality between two interval-backed values is decided once,
//! through the GCD of the defining polynomials having a root in the
//! intersection of the isolating intervals; distinct values are then
//! separated by finitely many refinement steps, since distinct algebraic
//! numbers are bounded apart by their defining polynomials.

use super::{ExternalHandle, RealAlgebraicNumber};
use num_rational::BigRational;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::trace;

impl RealAlgebraicNumber {
    /// Compare two algebraic numbers, refining both sides as far as needed.
    pub fn compare(&mut self, other: &mut Self) -> Ordering {
        if let (Self::Thom(a), Self::Thom(b)) = (&*self, &*other) {
            if a.encoding == b.encoding {
                return Ordering::Equal;
            }
        }
        if self.is_thom() {
            return self.thom_inner_mut().compare(other);
        }
        if other.is_thom() {
            return self.compare(other.thom_inner_mut());
        }
        if let Self::Numeric(q) = &*self {
            let q = q.clone();
            return Self::cmp_with_rational(other, &q).reverse();
        }
        if let Self::Numeric(q) = &*other {
            let q = q.clone();
            return Self::cmp_with_rational(self, &q);
        }
        if let (Self::External(ha), Self::External(hb)) = (&*self, &*other) {
            return if ha.engine_eq(&**hb) {
                Ordering::Equal
            } else if ha.engine_lt(&**hb) {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        if self.is_interval() && other.is_interval() {
            return Self::cmp_interval_interval(self, other);
        }
        if self.is_interval() {
            Self::cmp_interval_external(self, other)
        } else {
            Self::cmp_interval_external(other, self).reverse()
        }
    }

    /// Equality; the only tie of the strict total order.
    pub fn equal(&mut self, other: &mut Self) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Strict less-than.
    pub fn less(&mut self, other: &mut Self) -> bool {
        self.compare(other) == Ordering::Less
    }

    /// Compare against a plain rational, refining as needed.
    fn cmp_with_rational(x: &mut Self, q: &BigRational) -> Ordering {
        if x.is_thom() {
            return Self::cmp_with_rational(x.thom_inner_mut(), q);
        }
        if x.is_interval() {
            x.refine_avoiding(q);
        }
        match &*x {
            Self::Numeric(v) => v.cmp(q),
            Self::Interval(ir) => {
                if ir.interval.upper() <= q {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            Self::External(h) => {
                if h.eq_rational(q) {
                    Ordering::Equal
                } else if h.lt_rational(q) {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            Self::Thom(_) => unreachable!("thom values delegate to their materialized form"),
        }
    }

    /// Interval vs. interval: decide equality once via the polynomial GCD,
    /// then separate by refinement.
    fn cmp_interval_interval(a: &mut Self, b: &mut Self) -> Ordering {
        if let (Self::Interval(ia), Self::Interval(ib)) = (&*a, &*b) {
            let overlap = ia.interval.intersect(&ib.interval);
            if !overlap.is_empty() {
                let g = ia.poly.gcd(&ib.poly);
                if g.degree() >= 1 && g.count_roots_in(overlap.lower(), overlap.upper()) > 0 {
                    trace!("common root of {} found in {}", g, overlap);
                    return Ordering::Equal;
                }
            }
        }
        loop {
            if let Self::Numeric(q) = &*a {
                let q = q.clone();
                return Self::cmp_with_rational(b, &q).reverse();
            }
            if let Self::Numeric(q) = &*b {
                let q = q.clone();
                return Self::cmp_with_rational(a, &q);
            }
            if let (Self::Interval(ia), Self::Interval(ib)) = (&*a, &*b) {
                if ia.interval.upper() <= ib.interval.lower() {
                    return Ordering::Less;
                }
                if ib.interval.upper() <= ia.interval.lower() {
                    return Ordering::Greater;
                }
            }
            a.refine();
            b.refine();
        }
    }

    /// Interval vs. external: equality goes through the engine's defining
    /// polynomial; order falls out of bound refinement.
    fn cmp_interval_external(a: &mut Self, e: &mut Self) -> Ordering {
        let h: ExternalHandle = match &*e {
            Self::External(h) => Arc::clone(h),
            other => panic!("expected an external value, found {}", other),
        };
        if let Some(q) = h.to_rational() {
            return Self::cmp_with_rational(a, &q);
        }
        let pe = h.defining_polynomial().square_free_part();
        if pe.degree() >= 1 && a.sign_of_polynomial(&pe) == 0 {
            // a is a root of the engine's polynomial; it is the engine's
            // value exactly when it lies strictly inside the engine bounds.
            let le = h.lower();
            let ue = h.upper();
            if Self::cmp_with_rational(a, &le) == Ordering::Greater
                && Self::cmp_with_rational(a, &ue) == Ordering::Less
            {
                return Ordering::Equal;
            }
        }
        loop {
            if let Some(q) = h.to_rational() {
                return Self::cmp_with_rational(a, &q);
            }
            if let Self::Numeric(q) = &*a {
                let q = q.clone();
                return Self::cmp_with_rational(e, &q);
            }
            if let Self::Interval(ia) = &*a {
                if *ia.interval.upper() <= h.lower() {
                    return Ordering::Less;
                }
                if h.upper() <= *ia.interval.lower() {
                    return Ordering::Greater;
                }
            }
            a.refine();
            h.refine();
        }
    }
}

impl PartialEq for RealAlgebraicNumber {
    fn eq(&self, other: &Self) -> bool {
        self.clone().compare(&mut other.clone()) == Ordering::Equal
    }
}

impl Eq for RealAlgebraicNumber {}

impl PartialOrd for RealAlgebraicNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RealAlgebraicNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.clone().compare(&mut other.clone())
    }
}
