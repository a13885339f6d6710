//! SQLite-backed repository.
//!
//! # Responsibility
//! - Map entities to rows through the `SqlRecord` contract.
//! - Translate filter expressions into `WHERE` clauses with bound params.
//!
//! # Invariants
//! - Writes call `SqlRecord::validate()` before any SQL mutation.
//! - Translatable predicates are pushed down; everything else falls back to
//!   an in-memory scan with `is_satisfied_by`.
//! - Statements run inside whatever transaction the caller holds on the
//!   connection; this layer never commits.

use crate::domain::Entity;
use crate::guard::ValidationError;
use crate::repo::{RepoError, RepoResult, Repository};
use crate::spec::{CmpOp, Filter, ScalarValue, Specification};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::marker::PhantomData;

/// Row mapping contract for entities persisted in SQLite.
///
/// Field names used in filters must match column names for push-down to
/// apply; unmapped fields force the in-memory fallback.
pub trait SqlRecord: Entity + Sized {
    /// Table holding this entity type.
    const TABLE: &'static str;
    /// Identity column.
    const ID_COLUMN: &'static str;
    /// Remaining columns, in the order `data_params` emits them.
    const DATA_COLUMNS: &'static [&'static str];

    /// Decodes one row selected as `ID_COLUMN, DATA_COLUMNS...`.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;

    /// Bound values for `DATA_COLUMNS`, in declaration order.
    fn data_params(&self) -> Vec<Value>;

    /// Bound value for a key in the identity column.
    fn key_param(key: &Self::Key) -> Value;

    /// Precondition check run before every write.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Repository over one entity table in a SQLite connection.
pub struct SqliteRepository<'conn, E> {
    conn: &'conn Connection,
    _entity: PhantomData<fn() -> E>,
}

impl<'conn, E: SqlRecord> SqliteRepository<'conn, E> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    /// Runs a filter natively, without an in-memory fallback.
    ///
    /// # Errors
    /// - `Translation` when the filter references an unmapped field.
    pub fn find_native(&self, filter: &Filter) -> RepoResult<Vec<E>> {
        let clause = translate::<E>(filter)?;
        self.select_where(Some(clause), None)
    }

    fn select_where(
        &self,
        clause: Option<(String, Vec<Value>)>,
        limit: Option<u32>,
    ) -> RepoResult<Vec<E>> {
        let mut sql = format!("SELECT {} FROM {}", column_list::<E>(), E::TABLE);
        let params = match clause {
            Some((where_sql, params)) => {
                sql.push_str(" WHERE ");
                sql.push_str(&where_sql);
                params
            }
            None => Vec::new(),
        };
        sql.push_str(" ORDER BY ");
        sql.push_str(E::ID_COLUMN);
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(params))?;
        let mut entities = Vec::new();
        while let Some(row) = rows.next()? {
            entities.push(E::from_row(row)?);
        }
        Ok(entities)
    }
}

impl<E: SqlRecord> Repository<E> for SqliteRepository<'_, E> {
    fn find(&self, spec: Option<&dyn Specification<E>>) -> RepoResult<Vec<E>> {
        let spec = match spec {
            None => return self.select_where(None, None),
            Some(spec) => spec,
        };
        match spec.to_filter().and_then(|f| translate::<E>(&f).ok()) {
            Some(clause) => self.select_where(Some(clause), None),
            // Opaque or untranslatable: scan and filter in memory.
            None => {
                let rows = self.select_where(None, None)?;
                Ok(rows
                    .into_iter()
                    .filter(|entity| spec.is_satisfied_by(entity))
                    .collect())
            }
        }
    }

    fn find_one(&self, spec: Option<&dyn Specification<E>>) -> RepoResult<Option<E>> {
        let spec = match spec {
            None => return Ok(self.select_where(None, Some(1))?.into_iter().next()),
            Some(spec) => spec,
        };
        match spec.to_filter().and_then(|f| translate::<E>(&f).ok()) {
            Some(clause) => Ok(self.select_where(Some(clause), Some(1))?.into_iter().next()),
            None => {
                let rows = self.select_where(None, None)?;
                Ok(rows.into_iter().find(|entity| spec.is_satisfied_by(entity)))
            }
        }
    }

    fn find_by_id(&self, id: &E::Key) -> RepoResult<Option<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            column_list::<E>(),
            E::TABLE,
            E::ID_COLUMN
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([E::key_param(id)])?;
        match rows.next()? {
            Some(row) => Ok(Some(E::from_row(row)?)),
            None => Ok(None),
        }
    }

    fn create(&self, entity: &E) -> RepoResult<E::Key> {
        entity.validate()?;

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::TABLE,
            column_list::<E>(),
            placeholders(1 + E::DATA_COLUMNS.len())
        );
        let mut params = vec![E::key_param(entity.id())];
        params.extend(entity.data_params());
        self.conn.execute(&sql, params_from_iter(params))?;

        Ok(entity.id().clone())
    }

    fn update(&self, entity: &E) -> RepoResult<()> {
        entity.validate()?;

        let assignments = E::DATA_COLUMNS
            .iter()
            .map(|col| format!("{col} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE {} = ?",
            E::TABLE,
            E::ID_COLUMN
        );
        let mut params = entity.data_params();
        params.push(E::key_param(entity.id()));

        let changed = self.conn.execute(&sql, params_from_iter(params))?;
        if changed == 0 {
            return Err(RepoError::NotFound(entity.id().to_string()));
        }
        Ok(())
    }

    fn delete(&self, entity: &E) -> RepoResult<()> {
        let sql = format!("DELETE FROM {} WHERE {} = ?", E::TABLE, E::ID_COLUMN);
        let changed = self
            .conn
            .execute(&sql, [E::key_param(entity.id())])?;
        if changed == 0 {
            return Err(RepoError::NotFound(entity.id().to_string()));
        }
        Ok(())
    }
}

fn column_list<E: SqlRecord>() -> String {
    let mut columns = vec![E::ID_COLUMN];
    columns.extend_from_slice(E::DATA_COLUMNS);
    columns.join(", ")
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Renders a filter as a `WHERE` clause with positional parameters.
fn translate<E: SqlRecord>(filter: &Filter) -> RepoResult<(String, Vec<Value>)> {
    let mut sql = String::new();
    let mut params = Vec::new();
    render::<E>(filter, &mut sql, &mut params)?;
    Ok((sql, params))
}

fn render<E: SqlRecord>(
    filter: &Filter,
    sql: &mut String,
    params: &mut Vec<Value>,
) -> RepoResult<()> {
    match filter {
        Filter::Cmp { field, op, value } => {
            if field.as_str() != E::ID_COLUMN && !E::DATA_COLUMNS.contains(&field.as_str()) {
                return Err(RepoError::Translation(field.clone()));
            }
            if value.is_null() {
                // Null comparisons mirror the in-memory semantics.
                match op {
                    CmpOp::Eq => sql.push_str(&format!("{field} IS NULL")),
                    CmpOp::Ne => sql.push_str(&format!("{field} IS NOT NULL")),
                    _ => sql.push_str("0 = 1"),
                }
            } else {
                // IFNULL collapses SQL's three-valued comparison to a plain
                // boolean, so NOT over a null column stays boolean negation
                // and agrees with the in-memory evaluation.
                sql.push_str(&format!("IFNULL({field} {} ?, 0)", sql_op(*op)));
                params.push(bind_value(value));
            }
        }
        Filter::And(left, right) => {
            sql.push('(');
            render::<E>(left, sql, params)?;
            sql.push_str(" AND ");
            render::<E>(right, sql, params)?;
            sql.push(')');
        }
        Filter::Or(left, right) => {
            sql.push('(');
            render::<E>(left, sql, params)?;
            sql.push_str(" OR ");
            render::<E>(right, sql, params)?;
            sql.push(')');
        }
        Filter::Not(inner) => {
            sql.push_str("(NOT ");
            render::<E>(inner, sql, params)?;
            sql.push(')');
        }
    }
    Ok(())
}

fn sql_op(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "=",
        CmpOp::Ne => "<>",
        CmpOp::Lt => "<",
        CmpOp::Le => "<=",
        CmpOp::Gt => ">",
        CmpOp::Ge => ">=",
    }
}

fn bind_value(value: &ScalarValue) -> Value {
    match value {
        ScalarValue::Null => Value::Null,
        ScalarValue::Bool(b) => Value::Integer(i64::from(*b)),
        ScalarValue::Int(n) => Value::Integer(*n),
        ScalarValue::Real(r) => Value::Real(*r),
        ScalarValue::Text(s) => Value::Text(s.clone()),
        ScalarValue::Uuid(u) => Value::Text(u.to_string()),
    }
}
