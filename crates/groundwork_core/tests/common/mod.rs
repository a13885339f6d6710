#![allow(dead_code)]

//! Shared test fixture: a `Person` entity mapped to a `people` table.

use groundwork_core::db::open_db_in_memory;
use groundwork_core::domain::Entity;
use groundwork_core::guard::{self, ValidationError};
use groundwork_core::repo::{RepoResult, SqlRecord};
use groundwork_core::spec::{FieldAccess, ScalarValue};
use groundwork_core::RepoError;
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub age: i64,
    pub email: Option<String>,
}

impl Person {
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            age,
            email: None,
        }
    }
}

impl Entity for Person {
    type Key = Uuid;

    fn id(&self) -> &Uuid {
        &self.id
    }
}

impl FieldAccess for Person {
    fn field(&self, name: &str) -> Option<ScalarValue> {
        match name {
            "id" => Some(ScalarValue::Uuid(self.id)),
            "name" => Some(ScalarValue::Text(self.name.clone())),
            "age" => Some(ScalarValue::Int(self.age)),
            "email" => Some(
                self.email
                    .clone()
                    .map_or(ScalarValue::Null, ScalarValue::Text),
            ),
            _ => None,
        }
    }
}

impl SqlRecord for Person {
    const TABLE: &'static str = "people";
    const ID_COLUMN: &'static str = "id";
    const DATA_COLUMNS: &'static [&'static str] = &["name", "age", "email"];

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let id_text: String = row.get("id")?;
        let id = Uuid::parse_str(&id_text).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid value `{id_text}` in people.id"))
        })?;
        Ok(Self {
            id,
            name: row.get("name")?,
            age: row.get("age")?,
            email: row.get("email")?,
        })
    }

    fn data_params(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Integer(self.age),
            self.email.clone().map_or(Value::Null, Value::Text),
        ]
    }

    fn key_param(key: &Uuid) -> Value {
        Value::Text(key.to_string())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        guard::not_empty(&self.name, "name")?;
        guard::in_range(self.age, 0, 150, "age")?;
        Ok(())
    }
}

/// Opens an in-memory store with the `people` schema applied.
pub fn people_store() -> Connection {
    let conn = open_db_in_memory().expect("in-memory store should open");
    conn.execute_batch(
        "CREATE TABLE people (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            email TEXT
        );",
    )
    .expect("schema should apply");
    conn
}
