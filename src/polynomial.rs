//! Univariate polynomial arithmetic over the rationals.
//!
//! This module provides the polynomial capabilities the real-algebraic-number
//! core consumes: evaluation, sign queries, derivatives, Euclidean GCD,
//! squarefree parts, Sturm sequences with root counting, and real-root
//! isolation into disjoint regions.
//!
//! Polynomials are dense, with coefficients stored lowest degree first.
//!
//! ## References
//!
//! - Basu et al.: "Algorithms in Real Algebraic Geometry" (2006)
//! - Knuth: "The Art of Computer Programming Vol. 2" (GCD algorithms)
//! - Z3's `math/polynomial/` directory

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Sign of a rational as -1, 0, or 1.
#[inline]
pub(crate) fn sign_of(x: &BigRational) -> i8 {
    if x.is_zero() {
        0
    } else if x.is_positive() {
        1
    } else {
        -1
    }
}

/// A univariate polynomial with rational coefficients.
///
/// Coefficients are stored lowest degree first with no trailing zeros;
/// the zero polynomial has an empty coefficient vector.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UnivariatePolynomial {
    coeffs: Vec<BigRational>,
}

impl UnivariatePolynomial {
    /// Create a polynomial from coefficients, lowest degree first.
    pub fn new(mut coeffs: Vec<BigRational>) -> Self {
        while coeffs.last().is_some_and(Zero::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The constant polynomial 1.
    pub fn one() -> Self {
        Self::constant(BigRational::one())
    }

    /// A constant polynomial.
    pub fn constant(c: BigRational) -> Self {
        Self::new(vec![c])
    }

    /// The polynomial `x - r`, whose only root is `r`.
    pub fn from_root(r: &BigRational) -> Self {
        Self::new(vec![-r.clone(), BigRational::one()])
    }

    /// Create a polynomial from integer coefficients, lowest degree first.
    pub fn from_int_coeffs(coeffs: &[i64]) -> Self {
        Self::new(
            coeffs
                .iter()
                .map(|c| BigRational::from_integer(BigInt::from(*c)))
                .collect(),
        )
    }

    /// Degree of the polynomial. Constants (including zero) have degree 0.
    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Returns true if this is the zero polynomial.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns true if this polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// Coefficient of `x^k` (zero when `k` exceeds the degree).
    pub fn coeff(&self, k: usize) -> BigRational {
        self.coeffs.get(k).cloned().unwrap_or_else(BigRational::zero)
    }

    /// Leading coefficient, if the polynomial is nonzero.
    pub fn leading_coeff(&self) -> Option<&BigRational> {
        self.coeffs.last()
    }

    /// Evaluate at a point using Horner's scheme.
    pub fn eval(&self, x: &BigRational) -> BigRational {
        let mut acc = BigRational::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// Sign of the polynomial at a point: -1, 0, or 1.
    pub fn sign_at(&self, x: &BigRational) -> i8 {
        sign_of(&self.eval(x))
    }

    /// Formal derivative.
    pub fn derivative(&self) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero();
        }
        Self::new(
            self.coeffs[1..]
                .iter()
                .enumerate()
                .map(|(i, c)| c * BigRational::from_integer(BigInt::from(i + 1)))
                .collect(),
        )
    }

    /// The polynomial `p(-x)`; its roots are the negated roots of `p`.
    pub fn reflect(&self) -> Self {
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .map(|(i, c)| if i % 2 == 1 { -c.clone() } else { c.clone() })
                .collect(),
        )
    }

    /// The polynomial `p(x - delta)`; its roots are the roots of `p`
    /// shifted by `+delta`.
    pub fn shift_by(&self, delta: &BigRational) -> Self {
        let lin = Self::new(vec![-delta.clone(), BigRational::one()]);
        let mut acc = Self::zero();
        for c in self.coeffs.iter().rev() {
            acc = &(&acc * &lin) + &Self::constant(c.clone());
        }
        acc
    }

    /// Divide out a known rational root: returns `p / (x - root)`.
    ///
    /// The root must be exact; this is checked in debug builds.
    pub fn deflate(&self, root: &BigRational) -> Self {
        debug_assert_eq!(self.sign_at(root), 0, "deflate called with a non-root");
        let n = self.coeffs.len();
        if n <= 1 {
            return Self::zero();
        }
        let mut q = vec![BigRational::zero(); n - 1];
        q[n - 2] = self.coeffs[n - 1].clone();
        for k in (0..n.saturating_sub(2)).rev() {
            q[k] = &self.coeffs[k + 1] + &(root * &q[k + 1]);
        }
        Self::new(q)
    }

    /// Quotient and remainder of polynomial long division.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "division by the zero polynomial");
        let dl = divisor.coeffs.len();
        if self.coeffs.len() < dl {
            return (Self::zero(), self.clone());
        }
        let mut rem = self.coeffs.clone();
        let mut quo = vec![BigRational::zero(); self.coeffs.len() - dl + 1];
        let lead = &divisor.coeffs[dl - 1];
        for k in (0..quo.len()).rev() {
            let head = rem[k + dl - 1].clone();
            if head.is_zero() {
                continue;
            }
            let c = head / lead;
            for (j, d) in divisor.coeffs.iter().enumerate() {
                rem[k + j] = &rem[k + j] - &(&c * d);
            }
            quo[k] = c;
        }
        (Self::new(quo), Self::new(rem))
    }

    /// Scale so the leading coefficient is 1. Zero stays zero.
    pub fn monic(&self) -> Self {
        match self.leading_coeff() {
            None => Self::zero(),
            Some(lc) if lc.is_one() => self.clone(),
            Some(lc) => {
                let lc = lc.clone();
                Self::new(self.coeffs.iter().map(|c| c / &lc).collect())
            }
        }
    }

    /// Monic greatest common divisor via the Euclidean algorithm.
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = a.div_rem(&b).1;
            a = b;
            b = r;
        }
        a.monic()
    }

    /// The squarefree part `p / gcd(p, p')`, normalized monic.
    pub fn square_free_part(&self) -> Self {
        if self.is_constant() {
            return self.monic();
        }
        let g = self.gcd(&self.derivative());
        if g.is_constant() {
            return self.monic();
        }
        self.div_rem(&g).0.monic()
    }

    /// Returns true if the polynomial has no repeated roots.
    pub fn is_square_free(&self) -> bool {
        self.is_constant() || self.gcd(&self.derivative()).is_constant()
    }

    /// Sturm sequence: `p, p'`, then negated remainders until exhaustion.
    pub fn sturm_sequence(&self) -> Vec<Self> {
        let mut seq = vec![self.clone()];
        let d = self.derivative();
        if d.is_zero() {
            return seq;
        }
        seq.push(d);
        loop {
            let r = {
                let a = &seq[seq.len() - 2];
                let b = &seq[seq.len() - 1];
                a.div_rem(b).1
            };
            if r.is_zero() {
                break;
            }
            seq.push(-&r);
        }
        seq
    }

    /// Number of distinct real roots in the open interval `(lower, upper)`.
    ///
    /// Both endpoints must be non-roots of the polynomial; this is checked
    /// in debug builds.
    pub fn count_roots_in(&self, lower: &BigRational, upper: &BigRational) -> usize {
        count_roots_with_seq(&self.sturm_sequence(), lower, upper)
    }

    /// A positive rational `M` with every real root strictly inside
    /// `(-M, M)` (Cauchy bound, rounded up to an integer).
    ///
    /// # Panics
    ///
    /// Panics if the polynomial is constant.
    pub fn root_bound(&self) -> BigRational {
        let lc = match self.leading_coeff() {
            Some(lc) if !self.is_constant() => lc,
            _ => panic!("root_bound requires a non-constant polynomial"),
        };
        let mut max_ratio = BigRational::zero();
        for c in &self.coeffs[..self.coeffs.len() - 1] {
            let r = (c / lc).abs();
            if r > max_ratio {
                max_ratio = r;
            }
        }
        (BigRational::one() + max_ratio).ceil()
    }

    /// Isolate all distinct real roots into disjoint regions, ascending.
    ///
    /// Works on the squarefree part, so multiplicities are ignored. Exact
    /// rational roots come back as [`IsolatedRoot::Exact`]; the remaining
    /// roots come back bracketed by an open interval whose endpoints are
    /// non-roots of the reported polynomial (a squarefree polynomial with
    /// exactly one root in that interval). Returns an empty vector for
    /// constant polynomials, including zero.
    pub fn isolate_real_roots(&self) -> Vec<IsolatedRoot> {
        if self.is_constant() {
            return Vec::new();
        }
        let p = self.square_free_part();
        let bound = p.root_bound();
        let lower = -bound.clone();
        let seq = p.sturm_sequence();
        let total = count_roots_with_seq(&seq, &lower, &bound);
        let mut out = Vec::with_capacity(total);
        isolate_rec(&p, &seq, &lower, &bound, total, &mut out);
        out
    }
}

/// A single isolated real root of a polynomial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsolatedRoot {
    /// The root is an exact rational.
    Exact(BigRational),
    /// The root is the unique root of `poly` in the open interval
    /// `(lower, upper)`; neither endpoint is a root of `poly`.
    Bracketed {
        /// Squarefree polynomial with exactly one root in the interval.
        poly: UnivariatePolynomial,
        /// Lower endpoint, excluded.
        lower: BigRational,
        /// Upper endpoint, excluded.
        upper: BigRational,
    },
}

/// Number of sign variations in the sequence evaluated at `x`, zeros skipped.
fn sign_variations_at(seq: &[UnivariatePolynomial], x: &BigRational) -> usize {
    let mut variations = 0;
    let mut last = 0i8;
    for p in seq {
        let s = p.sign_at(x);
        if s != 0 {
            if last != 0 && s != last {
                variations += 1;
            }
            last = s;
        }
    }
    variations
}

/// Sturm root count over `(lower, upper)` with a precomputed sequence.
pub(crate) fn count_roots_with_seq(
    seq: &[UnivariatePolynomial],
    lower: &BigRational,
    upper: &BigRational,
) -> usize {
    debug_assert!(lower < upper, "inverted interval in root counting");
    debug_assert_ne!(seq[0].sign_at(lower), 0, "lower endpoint is a root");
    debug_assert_ne!(seq[0].sign_at(upper), 0, "upper endpoint is a root");
    let va = sign_variations_at(seq, lower);
    let vb = sign_variations_at(seq, upper);
    debug_assert!(va >= vb);
    va - vb
}

/// Recursive bisection step of root isolation.
///
/// `n_roots` is the number of roots of `p` in `(lower, upper)`; both
/// endpoints are non-roots of `p`. When a bisection point lands exactly on
/// a root, the root is emitted as exact and divided out, so all Sturm
/// evaluations stay anchored at non-root points.
fn isolate_rec(
    p: &UnivariatePolynomial,
    seq: &[UnivariatePolynomial],
    lower: &BigRational,
    upper: &BigRational,
    n_roots: usize,
    out: &mut Vec<IsolatedRoot>,
) {
    if n_roots == 0 {
        return;
    }
    if n_roots == 1 {
        out.push(IsolatedRoot::Bracketed {
            poly: p.clone(),
            lower: lower.clone(),
            upper: upper.clone(),
        });
        return;
    }
    let mid = (lower + upper) / BigRational::from_integer(BigInt::from(2));
    if p.sign_at(&mid) == 0 {
        let q = p.deflate(&mid);
        let qseq = q.sturm_sequence();
        let left = count_roots_with_seq(&qseq, lower, &mid);
        let right = count_roots_with_seq(&qseq, &mid, upper);
        isolate_rec(&q, &qseq, lower, &mid, left, out);
        out.push(IsolatedRoot::Exact(mid.clone()));
        isolate_rec(&q, &qseq, &mid, upper, right, out);
    } else {
        let left = count_roots_with_seq(seq, lower, &mid);
        isolate_rec(p, seq, lower, &mid, left, out);
        isolate_rec(p, seq, &mid, upper, n_roots - left, out);
    }
}

/// Exact sign of `q` at the unique root of `p` in `(lower, upper)`.
///
/// `p` must be squarefree with exactly one root in the open interval and
/// non-root endpoints. The zero case is decided through `gcd(p, q)`; the
/// nonzero case refines the interval until `q` has constant sign over it.
pub fn sign_at_root(
    p: &UnivariatePolynomial,
    lower: &BigRational,
    upper: &BigRational,
    q: &UnivariatePolynomial,
) -> i8 {
    if q.is_zero() {
        return 0;
    }
    let g = p.gcd(q);
    if g.degree() >= 1 && g.count_roots_in(lower, upper) > 0 {
        return 0;
    }
    let qseq = q.sturm_sequence();
    let mut l = lower.clone();
    let mut u = upper.clone();
    loop {
        // An endpoint sitting exactly on a root of q blocks the Sturm
        // count and plain bisection may never move it; walk it strictly
        // inside the interval first.
        if q.sign_at(&l) == 0 {
            match step_off_endpoint(p, &l, &u, q) {
                Ok(t) => l = t,
                Err(sign) => return sign,
            }
            continue;
        }
        if q.sign_at(&u) == 0 {
            match step_off_endpoint(p, &u, &l, q) {
                Ok(t) => u = t,
                Err(sign) => return sign,
            }
            continue;
        }
        if count_roots_with_seq(&qseq, &l, &u) == 0 {
            return q.sign_at(&l);
        }
        let mid = (&l + &u) / BigRational::from_integer(BigInt::from(2));
        let sm = p.sign_at(&mid);
        if sm == 0 {
            return q.sign_at(&mid);
        }
        if p.sign_at(&l) != sm {
            u = mid;
        } else {
            l = mid;
        }
    }
}

/// A point strictly between `from` and the root of `p` that is not a root
/// of `q`, found by halving toward `from`. `Err` carries `q`'s sign at the
/// root when a probe lands on the root exactly.
fn step_off_endpoint(
    p: &UnivariatePolynomial,
    from: &BigRational,
    toward: &BigRational,
    q: &UnivariatePolynomial,
) -> Result<BigRational, i8> {
    let two = BigRational::from_integer(BigInt::from(2));
    let from_sign = p.sign_at(from);
    let mut t = (from + toward) / &two;
    loop {
        match p.sign_at(&t) {
            0 => return Err(q.sign_at(&t)),
            s if s == from_sign && q.sign_at(&t) != 0 => return Ok(t),
            _ => t = (from + &t) / &two,
        }
    }
}

impl Add for &UnivariatePolynomial {
    type Output = UnivariatePolynomial;

    fn add(self, rhs: &UnivariatePolynomial) -> UnivariatePolynomial {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        let mut out = Vec::with_capacity(n);
        for k in 0..n {
            let a = self.coeffs.get(k).cloned().unwrap_or_else(BigRational::zero);
            let b = rhs.coeffs.get(k).cloned().unwrap_or_else(BigRational::zero);
            out.push(a + b);
        }
        UnivariatePolynomial::new(out)
    }
}

impl Sub for &UnivariatePolynomial {
    type Output = UnivariatePolynomial;

    fn sub(self, rhs: &UnivariatePolynomial) -> UnivariatePolynomial {
        self + &(-rhs)
    }
}

impl Neg for &UnivariatePolynomial {
    type Output = UnivariatePolynomial;

    fn neg(self) -> UnivariatePolynomial {
        UnivariatePolynomial::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }
}

impl Mul for &UnivariatePolynomial {
    type Output = UnivariatePolynomial;

    fn mul(self, rhs: &UnivariatePolynomial) -> UnivariatePolynomial {
        if self.is_zero() || rhs.is_zero() {
            return UnivariatePolynomial::zero();
        }
        let mut out = vec![BigRational::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] = &out[i + j] + &(a * b);
            }
        }
        UnivariatePolynomial::new(out)
    }
}

impl fmt::Display for UnivariatePolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for k in (0..self.coeffs.len()).rev() {
            let c = &self.coeffs[k];
            if c.is_zero() {
                continue;
            }
            if first {
                if c.is_negative() {
                    write!(f, "-")?;
                }
                first = false;
            } else if c.is_negative() {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            let mag = c.abs();
            if k == 0 || !mag.is_one() {
                write!(f, "{}", mag)?;
                if k > 0 {
                    write!(f, "*")?;
                }
            }
            if k == 1 {
                write!(f, "x")?;
            } else if k > 1 {
                write!(f, "x^{}", k)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for UnivariatePolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnivariatePolynomial({})", self)
    }
}
