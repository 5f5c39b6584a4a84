//! Typed, column-name based access to result rows.
//!
//! [`RowReader`] is the only thing [`ContentItem::from_row`](crate::ContentItem::from_row)
//! needs from a row, so the same mapping serves MySQL rows in production and in-memory rows in
//! tests.

use crate::{ContentError, ContentResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::mysql::{MySqlRow, MySqlTypeInfo};
use sqlx::{Column, MySql, Row, Type};

/// Reads typed values from a single result row by column name.
///
/// Every getter fails with [`ContentError::Mapping`] when the column is missing, NULL (for the
/// non-optional getters) or holds an incompatible type.
pub trait RowReader {
    fn get_i32(&self, column: &str) -> ContentResult<i32>;
    fn get_string(&self, column: &str) -> ContentResult<String>;
    /// Returns `Ok(None)` for a NULL value.
    fn get_opt_string(&self, column: &str) -> ContentResult<Option<String>>;
    fn get_datetime(&self, column: &str) -> ContentResult<NaiveDateTime>;
    fn get_bool(&self, column: &str) -> ContentResult<bool>;
}

/// Decoding used for an integer column.
#[derive(Debug, PartialEq, Eq)]
enum IntColumn {
    Signed,
    Unsigned,
}

impl IntColumn {
    fn of(ty: &MySqlTypeInfo) -> Self {
        if <u64 as Type<MySql>>::compatible(ty) {
            Self::Unsigned
        } else {
            Self::Signed
        }
    }
}

/// Decoding used for a date/time column. `TIMESTAMP` values arrive in UTC.
#[derive(Debug, PartialEq, Eq)]
enum DateTimeColumn {
    Naive,
    Utc,
}

impl DateTimeColumn {
    fn of(ty: &MySqlTypeInfo) -> Self {
        if <NaiveDateTime as Type<MySql>>::compatible(ty) {
            Self::Naive
        } else {
            Self::Utc
        }
    }
}

fn column_type<'r>(row: &'r MySqlRow, column: &str) -> ContentResult<&'r MySqlTypeInfo> {
    row.try_column(column)
        .map(|col| col.type_info())
        .map_err(|e| ContentError::mapping(column, e))
}

impl RowReader for MySqlRow {
    fn get_i32(&self, column: &str) -> ContentResult<i32> {
        let wide = match IntColumn::of(column_type(self, column)?) {
            IntColumn::Signed => self.try_get::<i64, _>(column).map(i128::from),
            IntColumn::Unsigned => self.try_get::<u64, _>(column).map(i128::from),
        }
        .map_err(|e| ContentError::mapping(column, e))?;
        i32::try_from(wide).map_err(|e| ContentError::mapping(column, e))
    }

    fn get_string(&self, column: &str) -> ContentResult<String> {
        self.try_get(column).map_err(|e| ContentError::mapping(column, e))
    }

    fn get_opt_string(&self, column: &str) -> ContentResult<Option<String>> {
        self.try_get(column).map_err(|e| ContentError::mapping(column, e))
    }

    fn get_datetime(&self, column: &str) -> ContentResult<NaiveDateTime> {
        match DateTimeColumn::of(column_type(self, column)?) {
            DateTimeColumn::Naive => self.try_get(column),
            DateTimeColumn::Utc => self
                .try_get::<DateTime<Utc>, _>(column)
                .map(|at| at.naive_utc()),
        }
        .map_err(|e| ContentError::mapping(column, e))
    }

    fn get_bool(&self, column: &str) -> ContentResult<bool> {
        self.try_get(column).map_err(|e| ContentError::mapping(column, e))
    }
}
