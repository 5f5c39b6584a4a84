//! Constants used throughout the Orchard Lite core crate.
//!
//! Defaults for the connection target, the fixed deployment labels, and the
//! SQL statements issued against the `ContentItems` table live here so the
//! service and its tests agree on them.

/// Environment variable naming the database host.
pub const DB_HOST_VAR: &str = "DB_HOST";

/// Environment variable naming the database port.
pub const DB_PORT_VAR: &str = "DB_PORT";

/// Environment variable naming the database (schema).
pub const DB_NAME_VAR: &str = "DB_NAME";

/// Environment variable naming the database user.
pub const DB_USER_VAR: &str = "DB_USER";

/// Environment variable carrying the database password.
pub const DB_PASSWORD_VAR: &str = "DB_PASSWORD";

/// Default database host when `DB_HOST` is not set.
pub const DEFAULT_DB_HOST: &str = "localhost";

/// Default database port when `DB_PORT` is not set.
pub const DEFAULT_DB_PORT: u16 = 3306;

/// Default database name when `DB_NAME` is not set.
pub const DEFAULT_DB_NAME: &str = "OrchardLiteDB";

/// Default database user when `DB_USER` is not set.
pub const DEFAULT_DB_USER: &str = "root";

/// Default database password when `DB_PASSWORD` is not set.
pub const DEFAULT_DB_PASSWORD: &str = "password";

/// Environment variable overriding the phase label.
pub const PHASE_VAR: &str = "ORCHARD_PHASE";

/// Environment variable overriding the deployment type label.
pub const DEPLOYMENT_TYPE_VAR: &str = "ORCHARD_DEPLOYMENT_TYPE";

/// Environment variable overriding the database type label.
pub const DATABASE_TYPE_VAR: &str = "ORCHARD_DATABASE_TYPE";

/// Phase label when `ORCHARD_PHASE` is not set.
pub const DEFAULT_PHASE: &str = "Phase 1 - Current State";

/// Runtime label reported by the health check and the home view.
pub const RUNTIME_LABEL: &str = "Rust 1.75";

/// Deployment type label when `ORCHARD_DEPLOYMENT_TYPE` is not set.
pub const DEFAULT_DEPLOYMENT_TYPE: &str = "CloudFormation Automated";

/// Database type label when `ORCHARD_DATABASE_TYPE` is not set.
pub const DEFAULT_DATABASE_TYPE: &str = "RDS MySQL 8.0";

/// Number of items shown by the recent-content listing.
pub const RECENT_CONTENT_LIMIT: u32 = 20;

/// Counts every row in the content table.
pub const COUNT_CONTENT_SQL: &str = "SELECT COUNT(*) FROM ContentItems";

/// Selects every row, newest publication first.
pub const SELECT_CONTENT_SQL: &str = "SELECT * FROM ContentItems ORDER BY PublishedDate DESC";

/// Selects the newest rows, bounded by a bound `LIMIT` parameter.
pub const SELECT_RECENT_CONTENT_SQL: &str =
    "SELECT * FROM ContentItems ORDER BY PublishedDate DESC LIMIT ?";
