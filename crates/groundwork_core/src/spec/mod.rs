//! Composable specifications (predicates) over domain entities.
//!
//! # Responsibility
//! - Define the `Specification` contract every predicate node satisfies.
//! - Provide the atomic closure-backed predicate (`FnSpec`).
//! - Expose fluent combinators that build immutable predicate trees.
//!
//! # Invariants
//! - Evaluation is pure and total: any well-typed entity yields a bool.
//! - Composition allocates a new node; operands are never mutated.
//! - Trees are acyclic by construction (children are fixed at build time).

mod combine;
mod expr;
mod filter;

pub use combine::{And, AndNot, Not, Or, OrNot};
pub use expr::FilterSpec;
pub use filter::{CmpOp, FieldAccess, Filter, ScalarValue};

/// A composable boolean test over entities of type `E`.
///
/// Implementors provide `is_satisfied_by`; the fluent combinators come for
/// free and build a new tree without touching the operands. Predicates that
/// can be handed to a store as a native filter additionally override
/// `to_filter`.
pub trait Specification<E> {
    /// Evaluates this predicate against one entity.
    ///
    /// Must not mutate the entity and must not fail; a panic raised inside a
    /// caller-supplied closure propagates unchanged.
    fn is_satisfied_by(&self, entity: &E) -> bool;

    /// Translatable form of this predicate, when one exists.
    ///
    /// Returns `None` for opaque predicates (closures). Stores use this to
    /// push filtering down instead of scanning every candidate.
    fn to_filter(&self) -> Option<Filter> {
        None
    }

    /// Both `self` and `other` must hold.
    fn and<S>(self, other: S) -> And<Self, S>
    where
        Self: Sized,
        S: Specification<E>,
    {
        And::new(self, other)
    }

    /// `self` must hold and `other` must not.
    fn and_not<S>(self, other: S) -> AndNot<Self, S>
    where
        Self: Sized,
        S: Specification<E>,
    {
        AndNot::new(self, other)
    }

    /// At least one of `self` and `other` must hold.
    fn or<S>(self, other: S) -> Or<Self, S>
    where
        Self: Sized,
        S: Specification<E>,
    {
        Or::new(self, other)
    }

    /// Either `self` holds or `other` does not.
    fn or_not<S>(self, other: S) -> OrNot<Self, S>
    where
        Self: Sized,
        S: Specification<E>,
    {
        OrNot::new(self, other)
    }

    /// `self` must not hold.
    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not::new(self)
    }
}

impl<'a, E, S: Specification<E> + ?Sized> Specification<E> for &'a S {
    fn is_satisfied_by(&self, entity: &E) -> bool {
        (**self).is_satisfied_by(entity)
    }

    fn to_filter(&self) -> Option<Filter> {
        (**self).to_filter()
    }
}

impl<E, S: Specification<E> + ?Sized> Specification<E> for Box<S> {
    fn is_satisfied_by(&self, entity: &E) -> bool {
        (**self).is_satisfied_by(entity)
    }

    fn to_filter(&self) -> Option<Filter> {
        (**self).to_filter()
    }
}

/// Atomic predicate backed by a caller-supplied closure.
///
/// Opaque to stores: `to_filter` stays `None`, so queries using it filter
/// candidates in memory.
pub struct FnSpec<F> {
    test: F,
}

/// Builds an atomic predicate from a boolean closure.
pub fn from_fn<E, F>(test: F) -> FnSpec<F>
where
    F: Fn(&E) -> bool,
{
    FnSpec { test }
}

impl<E, F> Specification<E> for FnSpec<F>
where
    F: Fn(&E) -> bool,
{
    fn is_satisfied_by(&self, entity: &E) -> bool {
        (self.test)(entity)
    }
}
