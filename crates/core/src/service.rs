//! Read-only content operations.
//!
//! Each operation opens its own session, runs its fixed queries, maps the rows and returns. There
//! is no retry: the first failure ends the operation and is returned to the caller.

use crate::constants::RECENT_CONTENT_LIMIT;
use crate::store::{ContentSession, ContentStore};
use crate::{ContentItem, ContentResult};
use serde::Serialize;

/// Items returned by a listing together with the number of rows in the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContentListing {
    pub items: Vec<ContentItem>,
    /// For the recent listing this is the table's row count and may exceed `items.len()`.
    pub total_records: i64,
}

/// Pure content read operations - no API concerns
#[derive(Clone, Debug)]
pub struct ContentReadService<S> {
    store: S,
}

impl<S: ContentStore> ContentReadService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The most recent items by publication date, plus the total row count.
    ///
    /// # Returns
    /// At most [`RECENT_CONTENT_LIMIT`] items, newest first.
    ///
    /// # Errors
    ///
    /// Returns a `ContentError` if:
    /// - the connection cannot be opened,
    /// - the count or select query fails,
    /// - any row cannot be mapped.
    pub async fn recent_content(&self) -> ContentResult<ContentListing> {
        let mut session = self.store.connect().await?;
        let total_records = session.count_items().await?;
        let rows = session.fetch_items(Some(RECENT_CONTENT_LIMIT)).await?;
        let items = map_rows(&rows)?;

        tracing::debug!(total_records, returned = items.len(), "loaded recent content");
        Ok(ContentListing {
            items,
            total_records,
        })
    }

    /// Every item, newest first. The total is the number of items returned.
    ///
    /// # Errors
    ///
    /// Returns a `ContentError` if:
    /// - the connection cannot be opened,
    /// - the select query fails,
    /// - any row cannot be mapped.
    pub async fn all_content(&self) -> ContentResult<ContentListing> {
        let mut session = self.store.connect().await?;
        let rows = session.fetch_items(None).await?;
        let items = map_rows(&rows)?;

        tracing::debug!(returned = items.len(), "loaded all content");
        Ok(ContentListing {
            total_records: items.len() as i64,
            items,
        })
    }
}

fn map_rows<R: crate::row::RowReader>(rows: &[R]) -> ContentResult<Vec<ContentItem>> {
    rows.iter().map(ContentItem::from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::columns;
    use crate::memory::{MemoryContentStore, Value, ValueRow};
    use crate::ContentError;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    // Published dates are deliberately out of insertion order.
    fn items(n: i32) -> Vec<ContentItem> {
        (1..=n)
            .map(|id| ContentItem {
                id,
                title: format!("Post {id}"),
                summary: format!("Summary {id}"),
                body: format!("Body {id}"),
                content_type: (if id % 2 == 0 { "Page" } else { "BlogPost" }).into(),
                author_id: id % 3 + 1,
                published_date: base() + Duration::hours(i64::from((id * 7) % n)),
                view_count: id * 10,
                is_published: id % 4 != 0,
                created_date: base(),
            })
            .collect()
    }

    fn assert_newest_first(listing: &ContentListing) {
        for pair in listing.items.windows(2) {
            assert!(pair[0].published_date >= pair[1].published_date);
        }
    }

    #[tokio::test]
    async fn empty_table_gives_empty_listing() {
        let service = ContentReadService::new(MemoryContentStore::default());

        let listing = service.recent_content().await.unwrap();

        assert_eq!(listing.total_records, 0);
        assert!(listing.items.is_empty());
    }

    #[tokio::test]
    async fn recent_content_is_capped_at_twenty_with_full_total() {
        let items = items(25);
        let service = ContentReadService::new(MemoryContentStore::with_items(&items));

        let listing = service.recent_content().await.unwrap();

        assert_eq!(listing.items.len(), 20);
        assert_eq!(listing.total_records, 25);
        assert_newest_first(&listing);

        let newest = items.iter().map(|i| i.published_date).max().unwrap();
        assert_eq!(listing.items[0].published_date, newest);
    }

    #[tokio::test]
    async fn recent_content_returns_everything_when_small() {
        let items = items(5);
        let service = ContentReadService::new(MemoryContentStore::with_items(&items));

        let listing = service.recent_content().await.unwrap();

        assert_eq!(listing.items.len(), 5);
        assert_eq!(listing.total_records, 5);
        assert_newest_first(&listing);
    }

    #[tokio::test]
    async fn all_content_has_no_limit_and_counts_items() {
        let items = items(25);
        let service = ContentReadService::new(MemoryContentStore::with_items(&items));

        let listing = service.all_content().await.unwrap();

        assert_eq!(listing.items.len(), 25);
        assert_eq!(listing.total_records, 25);
        assert_newest_first(&listing);
    }

    #[tokio::test]
    async fn null_summary_and_body_are_mapped_to_empty() {
        let item = items(1).remove(0);
        let row = ValueRow::from_item(&item)
            .with(columns::SUMMARY, Value::Null)
            .with(columns::BODY, Value::Null);
        let service = ContentReadService::new(MemoryContentStore::with_rows(vec![row]));

        let listing = service.recent_content().await.unwrap();

        assert_eq!(
            listing.items,
            vec![ContentItem {
                summary: String::new(),
                body: String::new(),
                ..item
            }]
        );
    }

    #[tokio::test]
    async fn connection_failure_is_returned_not_raised() {
        let service = ContentReadService::new(MemoryContentStore::unreachable(
            "Unable to connect to any of the specified MySQL hosts",
        ));

        let recent = service.recent_content().await.unwrap_err();
        let all = service.all_content().await.unwrap_err();

        for err in [recent, all] {
            assert!(matches!(err, ContentError::Connection(_)));
            assert!(err
                .to_string()
                .contains("Unable to connect to any of the specified MySQL hosts"));
        }
    }

    #[tokio::test]
    async fn query_failure_is_reported_as_query_error() {
        let service =
            ContentReadService::new(MemoryContentStore::failing_queries("Table doesn't exist"));

        let err = service.recent_content().await.unwrap_err();

        assert_eq!(err.kind(), "query");
        assert!(err.to_string().contains("Table doesn't exist"));
    }

    #[tokio::test]
    async fn one_bad_row_fails_the_whole_listing() {
        let mut rows: Vec<ValueRow> = items(3).iter().map(ValueRow::from_item).collect();
        rows[1] = rows[1].clone().with(columns::TITLE, Value::Null);
        let service = ContentReadService::new(MemoryContentStore::with_rows(rows));

        let err = service.all_content().await.unwrap_err();

        assert!(matches!(err, ContentError::Mapping { ref column, .. } if column == "Title"));
    }
}
