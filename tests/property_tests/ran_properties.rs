//! Property-based tests for ordering, refinement, and floor/ceil.

use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;
use ranum::{Interval, RealAlgebraicNumber, UnivariatePolynomial};
use std::cmp::Ordering;

/// Strategy for rational values with small numerators and denominators.
fn rational_strategy() -> impl Strategy<Value = BigRational> {
    (-50i64..50i64, 1i64..20i64)
        .prop_map(|(n, d)| BigRational::new(BigInt::from(n), BigInt::from(d)))
}

/// Strategy for non-square integers whose square root is irrational.
fn non_square_strategy() -> impl Strategy<Value = i64> {
    (2i64..60i64).prop_filter("perfect squares have rational roots", |c| {
        let isqrt = (0..=*c).take_while(|k| k * k <= *c).last().unwrap_or(0);
        isqrt * isqrt != *c
    })
}

fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

/// The positive square root of `c`, interval-backed.
fn sqrt_of(c: i64) -> RealAlgebraicNumber {
    let p = UnivariatePolynomial::from_int_coeffs(&[-c, 0, 1]);
    RealAlgebraicNumber::new_root(p, Interval::open(rat(0), rat(c + 1)))
        .expect("positive square root is isolated")
}

/// Integer part of the square root of a non-negative integer.
fn integer_sqrt(c: i64) -> i64 {
    (0..=c).take_while(|k| k * k <= c).last().unwrap_or(0)
}

#[cfg(test)]
mod order_properties {
    use super::*;

    proptest! {
        /// Comparison of numeric values matches rational comparison.
        #[test]
        fn numeric_order_matches_rationals(a in rational_strategy(), b in rational_strategy()) {
            let mut x = RealAlgebraicNumber::from_rational(a.clone());
            let mut y = RealAlgebraicNumber::from_rational(b.clone());
            prop_assert_eq!(x.compare(&mut y), a.cmp(&b));
        }

        /// Exactly one of <, ==, > holds for any pair.
        #[test]
        fn order_is_total(a in rational_strategy(), c in non_square_strategy()) {
            let x = RealAlgebraicNumber::from_rational(a);
            let y = sqrt_of(c);
            for (p, q) in [(&x, &y), (&y, &x), (&x, &x), (&y, &y)] {
                let lt = p < q;
                let eq = p == q;
                let gt = p > q;
                prop_assert_eq!(u8::from(lt) + u8::from(eq) + u8::from(gt), 1);
            }
        }

        /// An irrational square root never equals a rational.
        #[test]
        fn irrational_root_never_rational(a in rational_strategy(), c in non_square_strategy()) {
            let mut x = sqrt_of(c);
            let mut y = RealAlgebraicNumber::from_rational(a);
            prop_assert_ne!(x.compare(&mut y), Ordering::Equal);
        }

        /// Comparing a root against its own squared bounds is consistent.
        #[test]
        fn root_sits_between_rational_bounds(c in non_square_strategy()) {
            let isqrt = integer_sqrt(c);
            let mut x = sqrt_of(c);
            let mut below = RealAlgebraicNumber::from_rational(rat(isqrt));
            let mut above = RealAlgebraicNumber::from_rational(rat(isqrt + 1));
            prop_assert_eq!(below.compare(&mut x), Ordering::Less);
            prop_assert_eq!(x.compare(&mut above), Ordering::Less);
        }
    }
}

#[cfg(test)]
mod floor_ceil_properties {
    use super::*;

    proptest! {
        /// Floor and ceiling of numeric values match the exact rational ones.
        #[test]
        fn numeric_floor_ceil_exact(a in rational_strategy()) {
            let mut x = RealAlgebraicNumber::from_rational(a.clone());
            prop_assert_eq!(x.floor(), a.floor().to_integer());
            prop_assert_eq!(x.ceil(), a.ceil().to_integer());
        }

        /// Floor of an irrational square root is the integer square root.
        #[test]
        fn root_floor_matches_integer_sqrt(c in non_square_strategy()) {
            let mut x = sqrt_of(c);
            prop_assert_eq!(x.floor(), BigInt::from(integer_sqrt(c)));
            prop_assert_eq!(x.ceil(), BigInt::from(integer_sqrt(c) + 1));
            prop_assert!(!x.is_integral());
        }

        /// Perfect squares collapse onto their rational root.
        #[test]
        fn perfect_square_root_is_integral(k in 1i64..8i64) {
            let mut x = sqrt_of(k * k);
            prop_assert!(x.is_integral());
            prop_assert!(x.is_numeric());
            prop_assert_eq!(x.value(), &rat(k));
        }
    }
}

#[cfg(test)]
mod refinement_properties {
    use super::*;
    use num_traits::Zero;

    proptest! {
        /// Refinement never widens the isolating interval and keeps the
        /// value in place.
        #[test]
        fn refinement_is_monotone(c in non_square_strategy(), steps in 1usize..16) {
            let mut x = sqrt_of(c);
            let mut last = rat(c);
            for _ in 0..steps {
                x.refine();
                match &x {
                    RealAlgebraicNumber::Interval(ir) => {
                        let w = ir.interval().width();
                        prop_assert!(w <= last);
                        prop_assert!(!w.is_zero());
                        last = w;
                    }
                    other => prop_assert!(false, "irrational root became {}", other),
                }
            }
            // still the same value
            let mut fresh = sqrt_of(c);
            prop_assert_eq!(x.compare(&mut fresh), Ordering::Equal);
        }

        /// Once numeric, further refinement changes nothing.
        #[test]
        fn numeric_refinement_idempotent(a in rational_strategy(), steps in 1usize..8) {
            let mut x = RealAlgebraicNumber::from_rational(a.clone());
            for _ in 0..steps {
                x.refine();
                prop_assert!(x.is_numeric());
                prop_assert_eq!(x.value(), &a);
            }
        }

        /// The sign of a value agrees with the rational it was built from.
        #[test]
        fn sign_matches_rational(a in rational_strategy()) {
            let mut x = RealAlgebraicNumber::from_rational(a.clone());
            let expected = match a.cmp(&BigRational::zero()) {
                Ordering::Less => -1,
                Ordering::Equal => 0,
                Ordering::Greater => 1,
            };
            prop_assert_eq!(x.sign(), expected);
        }
    }
}
