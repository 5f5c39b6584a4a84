//! In-memory content store for tests.
//!
//! [`MemoryContentStore`] behaves like the MySQL store: it orders rows by `PublishedDate`
//! descending, applies the limit, and can be told to fail on connect or on query so the error
//! paths of the service and the HTTP layer can be exercised without a database.

use crate::content::columns;
use crate::row::RowReader;
use crate::store::{ContentSession, ContentStore};
use crate::{ContentError, ContentItem, ContentResult};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A single column value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
}

/// A result row keyed by column name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueRow {
    values: BTreeMap<String, Value>,
}

impl ValueRow {
    /// Row holding exactly the columns of `item`.
    pub fn from_item(item: &ContentItem) -> Self {
        Self::default()
            .with(columns::ID, Value::Int(item.id.into()))
            .with(columns::TITLE, Value::Text(item.title.clone()))
            .with(columns::SUMMARY, Value::Text(item.summary.clone()))
            .with(columns::BODY, Value::Text(item.body.clone()))
            .with(columns::CONTENT_TYPE, Value::Text(item.content_type.clone()))
            .with(columns::AUTHOR_ID, Value::Int(item.author_id.into()))
            .with(columns::PUBLISHED_DATE, Value::DateTime(item.published_date))
            .with(columns::VIEW_COUNT, Value::Int(item.view_count.into()))
            .with(columns::IS_PUBLISHED, Value::Bool(item.is_published))
            .with(columns::CREATED_DATE, Value::DateTime(item.created_date))
    }

    /// Set `column` to `value`, replacing any previous value.
    pub fn with(mut self, column: &str, value: Value) -> Self {
        self.values.insert(column.to_owned(), value);
        self
    }

    /// Drop `column` from the row entirely.
    pub fn without(mut self, column: &str) -> Self {
        self.values.remove(column);
        self
    }

    fn value(&self, column: &str) -> ContentResult<&Value> {
        self.values
            .get(column)
            .ok_or_else(|| ContentError::mapping(column, "no such column"))
    }

    fn required(&self, column: &str) -> ContentResult<&Value> {
        match self.value(column)? {
            Value::Null => Err(ContentError::mapping(column, "unexpected NULL")),
            value => Ok(value),
        }
    }
}

fn type_mismatch(column: &str, expected: &str, found: &Value) -> ContentError {
    ContentError::mapping(column, format!("expected {expected}, found {found:?}"))
}

impl RowReader for ValueRow {
    fn get_i32(&self, column: &str) -> ContentResult<i32> {
        match self.required(column)? {
            Value::Int(v) => i32::try_from(*v).map_err(|e| ContentError::mapping(column, e)),
            other => Err(type_mismatch(column, "integer", other)),
        }
    }

    fn get_string(&self, column: &str) -> ContentResult<String> {
        match self.required(column)? {
            Value::Text(v) => Ok(v.clone()),
            other => Err(type_mismatch(column, "text", other)),
        }
    }

    fn get_opt_string(&self, column: &str) -> ContentResult<Option<String>> {
        match self.value(column)? {
            Value::Null => Ok(None),
            Value::Text(v) => Ok(Some(v.clone())),
            other => Err(type_mismatch(column, "text", other)),
        }
    }

    fn get_datetime(&self, column: &str) -> ContentResult<NaiveDateTime> {
        match self.required(column)? {
            Value::DateTime(v) => Ok(*v),
            other => Err(type_mismatch(column, "datetime", other)),
        }
    }

    fn get_bool(&self, column: &str) -> ContentResult<bool> {
        match self.required(column)? {
            Value::Bool(v) => Ok(*v),
            Value::Int(v) => Ok(*v != 0),
            other => Err(type_mismatch(column, "boolean", other)),
        }
    }
}

#[derive(Clone, Debug)]
enum Failure {
    Connect(String),
    Query(String),
}

fn simulated(message: &str) -> sqlx::Error {
    sqlx::Error::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        message.to_owned(),
    ))
}

/// Content table held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryContentStore {
    rows: Arc<Vec<ValueRow>>,
    failure: Option<Failure>,
}

impl MemoryContentStore {
    pub fn with_rows(rows: Vec<ValueRow>) -> Self {
        Self {
            rows: Arc::new(rows),
            failure: None,
        }
    }

    pub fn with_items<'a>(items: impl IntoIterator<Item = &'a ContentItem>) -> Self {
        Self::with_rows(items.into_iter().map(ValueRow::from_item).collect())
    }

    /// Store whose every `connect` fails with `message`.
    pub fn unreachable(message: &str) -> Self {
        Self {
            rows: Arc::default(),
            failure: Some(Failure::Connect(message.to_owned())),
        }
    }

    /// Store that connects but fails every query with `message`.
    pub fn failing_queries(message: &str) -> Self {
        Self {
            rows: Arc::default(),
            failure: Some(Failure::Query(message.to_owned())),
        }
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    type Session = MemorySession;

    async fn connect(&self) -> ContentResult<MemorySession> {
        if let Some(Failure::Connect(message)) = &self.failure {
            return Err(ContentError::Connection(simulated(message)));
        }
        let query_failure = match &self.failure {
            Some(Failure::Query(message)) => Some(message.clone()),
            _ => None,
        };
        Ok(MemorySession {
            rows: self.rows.clone(),
            query_failure,
        })
    }
}

pub struct MemorySession {
    rows: Arc<Vec<ValueRow>>,
    query_failure: Option<String>,
}

impl MemorySession {
    fn check(&self) -> ContentResult<()> {
        match &self.query_failure {
            Some(message) => Err(ContentError::Query(sqlx::Error::Protocol(message.clone()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentSession for MemorySession {
    type Row = ValueRow;

    async fn count_items(&mut self) -> ContentResult<i64> {
        self.check()?;
        Ok(self.rows.len() as i64)
    }

    async fn fetch_items(&mut self, limit: Option<u32>) -> ContentResult<Vec<ValueRow>> {
        self.check()?;
        let mut rows: Vec<ValueRow> = self.rows.iter().cloned().collect();
        // NULL or missing dates sort last, as MySQL does for DESC.
        rows.sort_by_key(|row| Reverse(row.get_datetime(columns::PUBLISHED_DATE).ok()));
        if let Some(limit) = limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }
}
