//! Property-based tests for the sampler laws.

use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;
use ranum::{
    sample_above, sample_below, sample_between, Interval, RealAlgebraicNumber, SampleHeuristic,
    UnivariatePolynomial,
};
use std::cmp::Ordering;

fn rational_strategy() -> impl Strategy<Value = BigRational> {
    (-50i64..50i64, 1i64..20i64)
        .prop_map(|(n, d)| BigRational::new(BigInt::from(n), BigInt::from(d)))
}

fn heuristic_strategy() -> impl Strategy<Value = SampleHeuristic> {
    prop_oneof![
        Just(SampleHeuristic::Center),
        Just(SampleHeuristic::CenterInt),
        Just(SampleHeuristic::LeftInt),
        Just(SampleHeuristic::RightInt),
        Just(SampleHeuristic::ZeroInt),
        Just(SampleHeuristic::InftyInt),
    ]
}

fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

fn non_square_strategy() -> impl Strategy<Value = i64> {
    (2i64..60i64).prop_filter("perfect squares have rational roots", |c| {
        let isqrt = (0..=*c).take_while(|k| k * k <= *c).last().unwrap_or(0);
        isqrt * isqrt != *c
    })
}

fn sqrt_of(c: i64) -> RealAlgebraicNumber {
    let p = UnivariatePolynomial::from_int_coeffs(&[-c, 0, 1]);
    RealAlgebraicNumber::new_root(p, Interval::open(rat(0), rat(c + 1)))
        .expect("positive square root is isolated")
}

#[cfg(test)]
mod sample_order_laws {
    use super::*;

    proptest! {
        /// sample_below(n) < n and n < sample_above(n) for numeric values,
        /// and both witnesses are integers.
        #[test]
        fn below_and_above_bracket_numeric(a in rational_strategy()) {
            let n = RealAlgebraicNumber::from_rational(a);
            let mut below = sample_below(&n);
            let mut above = sample_above(&n);
            prop_assert_eq!(below.compare(&mut n.clone()), Ordering::Less);
            prop_assert_eq!(above.compare(&mut n.clone()), Ordering::Greater);
            prop_assert!(below.is_integral());
            prop_assert!(above.is_integral());
        }

        /// The same laws across the interval representation.
        #[test]
        fn below_and_above_bracket_roots(c in non_square_strategy()) {
            let n = sqrt_of(c);
            let mut below = sample_below(&n);
            let mut above = sample_above(&n);
            prop_assert_eq!(below.compare(&mut n.clone()), Ordering::Less);
            prop_assert_eq!(above.compare(&mut n.clone()), Ordering::Greater);
        }
    }
}

#[cfg(test)]
mod sample_between_laws {
    use super::*;

    proptest! {
        /// Whatever the heuristic, the witness lands strictly between.
        #[test]
        fn between_lands_strictly_inside(
            a in rational_strategy(),
            b in rational_strategy(),
            heuristic in heuristic_strategy(),
        ) {
            prop_assume!(a != b);
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            let mut lower = RealAlgebraicNumber::from_rational(lo);
            let mut upper = RealAlgebraicNumber::from_rational(hi);
            let mut s = sample_between(&mut lower, &mut upper, heuristic);
            prop_assert_eq!(lower.compare(&mut s), Ordering::Less);
            prop_assert_eq!(s.compare(&mut upper), Ordering::Less);
        }

        /// Between a rational and an irrational root, in either order.
        #[test]
        fn between_rational_and_root(
            c in non_square_strategy(),
            heuristic in heuristic_strategy(),
        ) {
            let mut root = sqrt_of(c);
            let mut zero = RealAlgebraicNumber::from(0i64);
            let mut s = sample_between(&mut zero, &mut root, heuristic);
            prop_assert_eq!(zero.compare(&mut s), Ordering::Less);
            prop_assert_eq!(s.compare(&mut root), Ordering::Less);

            let mut root2 = sqrt_of(c);
            let mut big = RealAlgebraicNumber::from(c);
            let mut t = sample_between(&mut root2, &mut big, heuristic);
            prop_assert_eq!(root2.compare(&mut t), Ordering::Less);
            prop_assert_eq!(t.compare(&mut big), Ordering::Less);
        }

        /// The center heuristic is the exact midpoint for numeric pairs.
        #[test]
        fn center_is_exact_midpoint(a in rational_strategy(), b in rational_strategy()) {
            prop_assume!(a != b);
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            let expected = (&lo + &hi) / BigRational::from_integer(BigInt::from(2));
            let mut lower = RealAlgebraicNumber::from_rational(lo);
            let mut upper = RealAlgebraicNumber::from_rational(hi);
            let s = sample_between(&mut lower, &mut upper, SampleHeuristic::Center);
            prop_assert_eq!(s.value(), &expected);
        }
    }
}
