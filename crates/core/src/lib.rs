//! # Orchard Core
//!
//! Core business logic for the Orchard Lite content listing.
//!
//! This crate contains pure data operations against the `ContentItems` table:
//! - Connection target resolution (`config`)
//! - The `ContentItem` record and its row mapping
//! - The storage seam, with a MySQL implementation
//! - `ContentReadService`, the recent and full listings
//!
//! **No API concerns**: HTTP servers, views, and health reporting belong in `api-rest` or
//! `api-shared`.

pub mod config;
pub mod constants;
pub mod content;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod row;
pub mod service;
pub mod store;

pub use config::{CoreConfig, DbSettings, DeploymentLabels};
pub use content::ContentItem;
pub use error::{ContentError, ContentResult};
pub use row::RowReader;
pub use service::{ContentListing, ContentReadService};
pub use store::{ContentSession, ContentStore, MySqlContentStore};
