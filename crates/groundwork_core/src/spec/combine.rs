//! Boolean combinators over specifications.
//!
//! # Responsibility
//! - Provide the five composite nodes: AND, OR, NOT, AND-NOT, OR-NOT.
//!
//! # Invariants
//! - Children are owned by value and never mutated after construction.
//! - Binary nodes evaluate left-to-right and short-circuit.
//! - A composite translates to a native filter only when all children do.

use super::{Filter, Specification};

/// Holds when both children hold. Skips `right` once `left` is false.
pub struct And<L, R> {
    left: L,
    right: R,
}

impl<L, R> And<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<E, L, R> Specification<E> for And<L, R>
where
    L: Specification<E>,
    R: Specification<E>,
{
    fn is_satisfied_by(&self, entity: &E) -> bool {
        self.left.is_satisfied_by(entity) && self.right.is_satisfied_by(entity)
    }

    fn to_filter(&self) -> Option<Filter> {
        Some(Filter::and(self.left.to_filter()?, self.right.to_filter()?))
    }
}

/// Holds when at least one child holds. Skips `right` once `left` is true.
pub struct Or<L, R> {
    left: L,
    right: R,
}

impl<L, R> Or<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<E, L, R> Specification<E> for Or<L, R>
where
    L: Specification<E>,
    R: Specification<E>,
{
    fn is_satisfied_by(&self, entity: &E) -> bool {
        self.left.is_satisfied_by(entity) || self.right.is_satisfied_by(entity)
    }

    fn to_filter(&self) -> Option<Filter> {
        Some(Filter::or(self.left.to_filter()?, self.right.to_filter()?))
    }
}

/// Holds when the inner child does not.
pub struct Not<S> {
    inner: S,
}

impl<S> Not<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<E, S> Specification<E> for Not<S>
where
    S: Specification<E>,
{
    fn is_satisfied_by(&self, entity: &E) -> bool {
        !self.inner.is_satisfied_by(entity)
    }

    fn to_filter(&self) -> Option<Filter> {
        Some(Filter::negate(self.inner.to_filter()?))
    }
}

/// Holds when `left` holds and `right` does not.
pub struct AndNot<L, R> {
    left: L,
    right: R,
}

impl<L, R> AndNot<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<E, L, R> Specification<E> for AndNot<L, R>
where
    L: Specification<E>,
    R: Specification<E>,
{
    fn is_satisfied_by(&self, entity: &E) -> bool {
        self.left.is_satisfied_by(entity) && !self.right.is_satisfied_by(entity)
    }

    fn to_filter(&self) -> Option<Filter> {
        Some(Filter::and(
            self.left.to_filter()?,
            Filter::negate(self.right.to_filter()?),
        ))
    }
}

/// Holds when `left` holds or `right` does not.
pub struct OrNot<L, R> {
    left: L,
    right: R,
}

impl<L, R> OrNot<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<E, L, R> Specification<E> for OrNot<L, R>
where
    L: Specification<E>,
    R: Specification<E>,
{
    fn is_satisfied_by(&self, entity: &E) -> bool {
        self.left.is_satisfied_by(entity) || !self.right.is_satisfied_by(entity)
    }

    fn to_filter(&self) -> Option<Filter> {
        Some(Filter::or(
            self.left.to_filter()?,
            Filter::negate(self.right.to_filter()?),
        ))
    }
}
