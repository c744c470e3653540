//! Pluggable external algebraic-number engines.
//!
//! An [`ExternalRan`] value is owned by an independently implemented,
//! trusted engine; the core never inspects it beyond this query surface.
//! The representation is a permanent enum variant dispatched through an
//! ordinary trait object, so the core's logic is the same whether or not an
//! engine is plugged in — there is no conditional compilation involved.

use crate::polynomial::UnivariatePolynomial;
use num_rational::BigRational;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Reference-counted handle to an engine-owned value. Engine contents are
/// expected to be immutable-or-interior-mutable, so handles clone freely.
pub type ExternalHandle = Arc<dyn ExternalRan>;

/// Query surface an external algebraic-number engine must expose.
///
/// Contracts the core relies on:
///
/// - When `is_numeric()` is false, `lower() < value < upper()` holds
///   strictly, `defining_polynomial()` is nonzero with exactly one root in
///   `(lower(), upper())`, and `refine()` at least halves the bound width
///   (collapsing onto `Numeric` form when the value is rational).
/// - When `is_numeric()` is true, `to_rational()` returns the exact value,
///   `lower()` and `upper()` both equal it, and `refine()` may do nothing.
/// - `eq`/`lt` answer exactly and always terminate; they are only required
///   to handle values of the engine's own kind (recover them through
///   [`ExternalRan::as_any`]).
pub trait ExternalRan: fmt::Debug {
    /// The value as `Any`, for engines to recover their own concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Returns true when the engine knows the value to be rational.
    fn is_numeric(&self) -> bool;

    /// The exact rational value, when `is_numeric()`.
    fn to_rational(&self) -> Option<BigRational>;

    /// Exact zero test.
    fn is_zero(&self) -> bool;

    /// Exact integrality test.
    fn is_integral(&self) -> bool;

    /// Rational lower bound on the value.
    fn lower(&self) -> BigRational;

    /// Rational upper bound on the value.
    fn upper(&self) -> BigRational;

    /// A nonzero polynomial with the value among its roots, isolating it
    /// within the current bounds.
    fn defining_polynomial(&self) -> UnivariatePolynomial;

    /// Tighten the bounds one step. Interior mutability is the engine's
    /// concern; the core only ever holds shared references.
    fn refine(&self);

    /// Exact sign of the value: -1, 0, or 1.
    fn sign(&self) -> i8;

    /// Exact sign of an arbitrary polynomial evaluated at the value.
    fn sign_of_polynomial(&self, q: &UnivariatePolynomial) -> i8;

    /// The absolute value, as a new engine value.
    fn abs(&self) -> ExternalHandle;

    /// Exact equality against another engine value.
    fn engine_eq(&self, other: &dyn ExternalRan) -> bool;

    /// Exact strict order against another engine value.
    fn engine_lt(&self, other: &dyn ExternalRan) -> bool;

    /// Exact equality against a plain rational.
    fn eq_rational(&self, q: &BigRational) -> bool;

    /// Exact `value < q` against a plain rational.
    fn lt_rational(&self, q: &BigRational) -> bool;

    /// A value strictly below this one, chosen by the engine.
    fn sample_below(&self) -> ExternalHandle;

    /// A value strictly above this one, chosen by the engine.
    fn sample_above(&self) -> ExternalHandle;

    /// A value strictly between this one and `upper`, chosen by the engine.
    /// Precondition: `self < upper`.
    fn sample_between(&self, upper: &dyn ExternalRan) -> ExternalHandle;
}
