//! The content record and its mapping from storage rows.

use crate::row::RowReader;
use crate::ContentResult;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Column names of the `ContentItems` table.
pub mod columns {
    pub const ID: &str = "Id";
    pub const TITLE: &str = "Title";
    pub const SUMMARY: &str = "Summary";
    pub const BODY: &str = "Body";
    pub const CONTENT_TYPE: &str = "ContentType";
    pub const AUTHOR_ID: &str = "AuthorId";
    pub const PUBLISHED_DATE: &str = "PublishedDate";
    pub const VIEW_COUNT: &str = "ViewCount";
    pub const IS_PUBLISHED: &str = "IsPublished";
    pub const CREATED_DATE: &str = "CreatedDate";
}

/// A single post or page read from the `ContentItems` table.
///
/// Timestamps are naive because the table stores `DATETIME` values without a zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: i32,
    pub title: String,
    /// Empty when the stored value is NULL.
    pub summary: String,
    /// Empty when the stored value is NULL.
    pub body: String,
    pub content_type: String,
    pub author_id: i32,
    pub published_date: NaiveDateTime,
    pub view_count: i32,
    pub is_published: bool,
    pub created_date: NaiveDateTime,
}

impl ContentItem {
    /// Map one result row into a `ContentItem`.
    ///
    /// NULL `Summary` and `Body` become empty strings; every other column is required.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Mapping` naming the first required column that is missing, NULL or
    /// of an unexpected type.
    pub fn from_row<R: RowReader + ?Sized>(row: &R) -> ContentResult<Self> {
        Ok(Self {
            id: row.get_i32(columns::ID)?,
            title: row.get_string(columns::TITLE)?,
            summary: row.get_opt_string(columns::SUMMARY)?.unwrap_or_default(),
            body: row.get_opt_string(columns::BODY)?.unwrap_or_default(),
            content_type: row.get_string(columns::CONTENT_TYPE)?,
            author_id: row.get_i32(columns::AUTHOR_ID)?,
            published_date: row.get_datetime(columns::PUBLISHED_DATE)?,
            view_count: row.get_i32(columns::VIEW_COUNT)?,
            is_published: row.get_bool(columns::IS_PUBLISHED)?,
            created_date: row.get_datetime(columns::CREATED_DATE)?,
        })
    }
}
