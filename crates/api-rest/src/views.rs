//! HTML views rendered with Tera.
//!
//! Templates are embedded at compile time and parsed once when [`Views`] is built, so a
//! template syntax error fails startup rather than a request.

use orchard_core::{ContentItem, ContentListing, CoreConfig};
use serde::Serialize;
use tera::{Context, Tera};

pub const INDEX_TEMPLATE: &str = "index.html";
pub const ALL_CONTENT_TEMPLATE: &str = "all_content.html";
pub const ERROR_TEMPLATE: &str = "error.html";

const PUBLISHED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One listed item, with its date preformatted for display.
#[derive(Debug, Serialize)]
struct ItemView<'a> {
    id: i32,
    title: &'a str,
    summary: &'a str,
    content_type: &'a str,
    author_id: i32,
    published: String,
    view_count: i32,
    is_published: bool,
}

impl<'a> From<&'a ContentItem> for ItemView<'a> {
    fn from(item: &'a ContentItem) -> Self {
        Self {
            id: item.id,
            title: &item.title,
            summary: &item.summary,
            content_type: &item.content_type,
            author_id: item.author_id,
            published: item.published_date.format(PUBLISHED_FORMAT).to_string(),
            view_count: item.view_count,
            is_published: item.is_published,
        }
    }
}

#[derive(Debug, Serialize)]
struct IndexPage<'a> {
    items: Vec<ItemView<'a>>,
    total_records: i64,
    db_host: &'a str,
    db_port: u16,
    runtime: &'a str,
    database_type: &'a str,
}

#[derive(Debug, Serialize)]
struct AllContentPage<'a> {
    items: Vec<ItemView<'a>>,
    total_records: i64,
}

#[derive(Debug, Serialize)]
struct ErrorPage<'a> {
    error: &'a str,
    db_host: Option<&'a str>,
}

/// Compiled page templates.
#[derive(Debug)]
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Parse the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns a `tera::Error` if any template fails to parse.
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("../templates/layout.html")),
            ("_items.html", include_str!("../templates/_items.html")),
            (INDEX_TEMPLATE, include_str!("../templates/index.html")),
            (ALL_CONTENT_TEMPLATE, include_str!("../templates/all_content.html")),
            (ERROR_TEMPLATE, include_str!("../templates/error.html")),
        ])?;
        Ok(Self { tera })
    }

    /// Recent-content page with the connection target and deployment labels in the footer.
    pub fn index(&self, listing: &ContentListing, cfg: &CoreConfig) -> tera::Result<String> {
        let page = IndexPage {
            items: listing.items.iter().map(ItemView::from).collect(),
            total_records: listing.total_records,
            db_host: cfg.db().host(),
            db_port: cfg.db().port(),
            runtime: &cfg.labels().runtime,
            database_type: &cfg.labels().database_type,
        };
        self.render(INDEX_TEMPLATE, &page)
    }

    pub fn all_content(&self, listing: &ContentListing) -> tera::Result<String> {
        let page = AllContentPage {
            items: listing.items.iter().map(ItemView::from).collect(),
            total_records: listing.total_records,
        };
        self.render(ALL_CONTENT_TEMPLATE, &page)
    }

    /// Error page carrying the failure message and, when given, the database host.
    pub fn error(&self, message: &str, db_host: Option<&str>) -> tera::Result<String> {
        let page = ErrorPage {
            error: message,
            db_host,
        };
        self.render(ERROR_TEMPLATE, &page)
    }

    fn render<T: Serialize>(&self, template: &str, page: &T) -> tera::Result<String> {
        let ctx = Context::from_serialize(page)?;
        self.tera.render(template, &ctx)
    }
}
