//! Expression-based specification.
//!
//! # Responsibility
//! - Bridge the filter vocabulary into the specification algebra.
//!
//! # Invariants
//! - `FilterSpec` is evaluable in memory and translatable to a store filter;
//!   stores prefer the translated form and fall back to evaluation.

use super::{FieldAccess, Filter, Specification};
use std::marker::PhantomData;

/// Specification backed by a translatable filter expression.
///
/// Unlike `FnSpec`, the predicate body is data: a store that understands the
/// filter vocabulary can run it natively, while in-memory callers evaluate
/// it against `FieldAccess` entities. Composites built from `FilterSpec`
/// nodes stay translatable end to end.
pub struct FilterSpec<E> {
    filter: Filter,
    _entity: PhantomData<fn(&E)>,
}

impl<E> FilterSpec<E> {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            _entity: PhantomData,
        }
    }

    /// The stored expression, borrowed.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}

impl<E> Clone for FilterSpec<E> {
    fn clone(&self) -> Self {
        Self::new(self.filter.clone())
    }
}

impl<E: FieldAccess> Specification<E> for FilterSpec<E> {
    fn is_satisfied_by(&self, entity: &E) -> bool {
        self.filter.matches(entity)
    }

    fn to_filter(&self) -> Option<Filter> {
        Some(self.filter.clone())
    }
}
