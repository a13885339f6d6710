//! Translatable filter expressions over entity fields.
//!
//! # Responsibility
//! - Define the storage-neutral expression vocabulary for push-down.
//! - Evaluate a filter in memory against any `FieldAccess` entity.
//!
//! # Invariants
//! - Evaluation is total: unknown fields behave as null and match nothing
//!   except explicit null tests, mirroring SQL comparison semantics.
//! - The tree is immutable; combinators allocate new nodes.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Scalar value a filter can compare an entity field against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
    Uuid(Uuid),
}

impl ScalarValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Orders two scalars when they are comparable.
    ///
    /// Int and Real compare numerically; any other cross-type pair (and any
    /// null operand) is incomparable and yields `None`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Real(a), Self::Real(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Real(b)) => (*a as f64).partial_cmp(b),
            (Self::Real(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Uuid(a), Self::Uuid(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Uuid> for ScalarValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

/// Comparison operator for a single field test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Read access to named scalar fields of an entity.
///
/// Entities that want expression-based filtering expose their queryable
/// fields here; field names double as store column names for push-down.
pub trait FieldAccess {
    /// Returns the named field, or `None` when the entity has no such field.
    fn field(&self, name: &str) -> Option<ScalarValue>;
}

/// Storage-neutral boolean expression over entity fields.
///
/// A filter is what a store receives when a predicate is pushed down, and
/// what `FilterSpec` evaluates in memory when it is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    Cmp {
        field: String,
        op: CmpOp,
        value: ScalarValue,
    },
    And(Box<Filter>, Box<Filter>),
    Or(Box<Filter>, Box<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn cmp(field: impl Into<String>, op: CmpOp, value: impl Into<ScalarValue>) -> Self {
        Self::Cmp {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self::cmp(field, CmpOp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self::cmp(field, CmpOp::Ne, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self::cmp(field, CmpOp::Lt, value)
    }

    pub fn le(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self::cmp(field, CmpOp::Le, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self::cmp(field, CmpOp::Gt, value)
    }

    pub fn ge(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self::cmp(field, CmpOp::Ge, value)
    }

    pub fn and(left: Filter, right: Filter) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Filter, right: Filter) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    pub fn negate(inner: Filter) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Evaluates this filter against one entity.
    ///
    /// # Contract
    /// - A field the entity does not expose evaluates as null.
    /// - `Eq`/`Ne` against an explicit null value act as null tests.
    /// - Any other comparison involving null or mismatched types is false.
    pub fn matches<E: FieldAccess>(&self, entity: &E) -> bool {
        match self {
            Self::Cmp { field, op, value } => {
                let actual = entity.field(field).unwrap_or(ScalarValue::Null);
                compare_matches(&actual, *op, value)
            }
            Self::And(left, right) => left.matches(entity) && right.matches(entity),
            Self::Or(left, right) => left.matches(entity) || right.matches(entity),
            Self::Not(inner) => !inner.matches(entity),
        }
    }

    /// Collects every field name referenced by this filter.
    pub fn fields(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_fields(&mut names);
        names
    }

    fn collect_fields<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Cmp { field, .. } => names.push(field.as_str()),
            Self::And(left, right) | Self::Or(left, right) => {
                left.collect_fields(names);
                right.collect_fields(names);
            }
            Self::Not(inner) => inner.collect_fields(names),
        }
    }
}

fn compare_matches(actual: &ScalarValue, op: CmpOp, expected: &ScalarValue) -> bool {
    if expected.is_null() {
        return match op {
            CmpOp::Eq => actual.is_null(),
            CmpOp::Ne => !actual.is_null(),
            _ => false,
        };
    }
    if actual.is_null() {
        return false;
    }
    match actual.compare(expected) {
        Some(ordering) => match op {
            CmpOp::Eq => ordering == Ordering::Equal,
            CmpOp::Ne => ordering != Ordering::Equal,
            CmpOp::Lt => ordering == Ordering::Less,
            CmpOp::Le => ordering != Ordering::Greater,
            CmpOp::Gt => ordering == Ordering::Greater,
            CmpOp::Ge => ordering != Ordering::Less,
        },
        // Mismatched types match nothing rather than failing evaluation.
        None => false,
    }
}
