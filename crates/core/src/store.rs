//! Storage seam for the content table.
//!
//! A [`ContentStore`] opens one [`ContentSession`] per operation; the session runs the fixed read
//! queries and hands back raw rows for [`ContentItem::from_row`](crate::ContentItem::from_row) to
//! map. Connection pooling, if any, is left to the driver.

use crate::config::DbSettings;
use crate::constants::{COUNT_CONTENT_SQL, SELECT_CONTENT_SQL, SELECT_RECENT_CONTENT_SQL};
use crate::row::RowReader;
use crate::{ContentError, ContentResult};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::Connection;

/// Opens sessions against the content table.
#[async_trait]
pub trait ContentStore: Send + Sync {
    type Session: ContentSession;

    /// Open a new session.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Connection` if the database cannot be reached.
    async fn connect(&self) -> ContentResult<Self::Session>;
}

/// A single open connection running the fixed content queries.
#[async_trait]
pub trait ContentSession: Send {
    type Row: RowReader + Send;

    /// Number of rows in the content table.
    async fn count_items(&mut self) -> ContentResult<i64>;

    /// Rows ordered by `PublishedDate` descending, at most `limit` of them when given.
    async fn fetch_items(&mut self, limit: Option<u32>) -> ContentResult<Vec<Self::Row>>;
}

/// MySQL-backed store opening a fresh connection for every session.
#[derive(Clone, Debug)]
pub struct MySqlContentStore {
    options: MySqlConnectOptions,
}

impl MySqlContentStore {
    pub fn new(settings: &DbSettings) -> Self {
        Self {
            options: settings.connect_options(),
        }
    }
}

#[async_trait]
impl ContentStore for MySqlContentStore {
    type Session = MySqlSession;

    async fn connect(&self) -> ContentResult<MySqlSession> {
        let conn = MySqlConnection::connect_with(&self.options)
            .await
            .map_err(ContentError::Connection)?;
        Ok(MySqlSession { conn })
    }
}

pub struct MySqlSession {
    conn: MySqlConnection,
}

#[async_trait]
impl ContentSession for MySqlSession {
    type Row = MySqlRow;

    async fn count_items(&mut self) -> ContentResult<i64> {
        sqlx::query_scalar::<_, i64>(COUNT_CONTENT_SQL)
            .fetch_one(&mut self.conn)
            .await
            .map_err(ContentError::Query)
    }

    async fn fetch_items(&mut self, limit: Option<u32>) -> ContentResult<Vec<MySqlRow>> {
        let rows = match limit {
            Some(limit) => {
                sqlx::query(SELECT_RECENT_CONTENT_SQL)
                    .bind(limit)
                    .fetch_all(&mut self.conn)
                    .await
            }
            None => sqlx::query(SELECT_CONTENT_SQL).fetch_all(&mut self.conn).await,
        };
        rows.map_err(ContentError::Query)
    }
}
