//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handlers never read process-wide environment variables;
//! they receive the resolved [`CoreConfig`] instead.
//!
//! Resolution is written against a lookup closure so tests can supply their own variables
//! without mutating the environment of the test process.

use crate::constants::{
    DATABASE_TYPE_VAR, DB_HOST_VAR, DB_NAME_VAR, DB_PASSWORD_VAR, DB_PORT_VAR, DB_USER_VAR,
    DEFAULT_DATABASE_TYPE, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PASSWORD,
    DEFAULT_DB_PORT, DEFAULT_DB_USER, DEFAULT_DEPLOYMENT_TYPE, DEFAULT_PHASE,
    DEPLOYMENT_TYPE_VAR, PHASE_VAR, RUNTIME_LABEL,
};
use crate::{ContentError, ContentResult};
use sqlx::mysql::MySqlConnectOptions;
use std::fmt;

/// Resolved database connection target.
#[derive(Clone, PartialEq, Eq)]
pub struct DbSettings {
    host: String,
    port: u16,
    database: String,
    user: String,
    password: String,
}

impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.into(),
            port: DEFAULT_DB_PORT,
            database: DEFAULT_DB_NAME.into(),
            user: DEFAULT_DB_USER.into(),
            password: DEFAULT_DB_PASSWORD.into(),
        }
    }
}

impl DbSettings {
    /// Create settings from explicit values.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Resolve settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::InvalidConfig` if `DB_PORT` is set but is not a valid port.
    pub fn from_env() -> ContentResult<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`, falling back to the defaults for unset variables.
    ///
    /// Each of `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER` and `DB_PASSWORD` is consulted once.
    /// Values are taken verbatim; an empty string is a valid override.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::InvalidConfig` if the port override is not a valid `u16`.
    pub fn resolve<F>(lookup: F) -> ContentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(DB_PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ContentError::InvalidConfig(format!("{DB_PORT_VAR} must be a port number: {e}"))
            })?,
            None => DEFAULT_DB_PORT,
        };

        Ok(Self {
            host: lookup(DB_HOST_VAR).unwrap_or_else(|| DEFAULT_DB_HOST.into()),
            port,
            database: lookup(DB_NAME_VAR).unwrap_or_else(|| DEFAULT_DB_NAME.into()),
            user: lookup(DB_USER_VAR).unwrap_or_else(|| DEFAULT_DB_USER.into()),
            password: lookup(DB_PASSWORD_VAR).unwrap_or_else(|| DEFAULT_DB_PASSWORD.into()),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Connection descriptor for logs, with the password redacted.
    pub fn descriptor(&self) -> String {
        format!(
            "Server={};Port={};Database={};Uid={};Pwd=********",
            self.host, self.port, self.database, self.user
        )
    }

    /// Build MySQL connect options for this target.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

/// Fixed labels describing the deployment, reported by the health check and the home page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentLabels {
    pub phase: String,
    pub runtime: String,
    pub deployment_type: String,
    pub database_type: String,
}

impl Default for DeploymentLabels {
    fn default() -> Self {
        Self {
            phase: DEFAULT_PHASE.into(),
            runtime: RUNTIME_LABEL.into(),
            deployment_type: DEFAULT_DEPLOYMENT_TYPE.into(),
            database_type: DEFAULT_DATABASE_TYPE.into(),
        }
    }
}

impl DeploymentLabels {
    /// Resolve labels through `lookup`. The runtime label is fixed and cannot be overridden.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            phase: lookup(PHASE_VAR).unwrap_or(defaults.phase),
            runtime: defaults.runtime,
            deployment_type: lookup(DEPLOYMENT_TYPE_VAR).unwrap_or(defaults.deployment_type),
            database_type: lookup(DATABASE_TYPE_VAR).unwrap_or(defaults.database_type),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    db: DbSettings,
    labels: DeploymentLabels,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(db: DbSettings, labels: DeploymentLabels) -> Self {
        Self { db, labels }
    }

    /// Resolve the whole configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::InvalidConfig` if the database settings cannot be resolved.
    pub fn from_env() -> ContentResult<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve the whole configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::InvalidConfig` if the database settings cannot be resolved.
    pub fn resolve<F>(lookup: F) -> ContentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            db: DbSettings::resolve(&lookup)?,
            labels: DeploymentLabels::resolve(&lookup),
        })
    }

    pub fn db(&self) -> &DbSettings {
        &self.db
    }

    pub fn labels(&self) -> &DeploymentLabels {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = DbSettings::resolve(|_| None).unwrap();

        assert_eq!(settings.host(), "localhost");
        assert_eq!(settings.port(), 3306);
        assert_eq!(settings.database(), "OrchardLiteDB");
        assert_eq!(settings.user(), "root");
        assert_eq!(settings, DbSettings::default());
    }

    #[test]
    fn host_override_is_reflected_in_target() {
        let settings = DbSettings::resolve(lookup_from(&[("DB_HOST", "db.example.com")])).unwrap();

        assert_eq!(settings.host(), "db.example.com");
        assert_eq!(settings.port(), 3306);
        assert!(settings.descriptor().starts_with("Server=db.example.com;Port=3306;"));
    }

    #[test]
    fn every_override_is_applied() {
        let settings = DbSettings::resolve(lookup_from(&[
            ("DB_HOST", "mysql.internal"),
            ("DB_PORT", "3307"),
            ("DB_NAME", "Orchard"),
            ("DB_USER", "reader"),
            ("DB_PASSWORD", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(
            settings,
            DbSettings::new("mysql.internal", 3307, "Orchard", "reader", "s3cret")
        );
        assert_eq!(
            settings.descriptor(),
            "Server=mysql.internal;Port=3307;Database=Orchard;Uid=reader;Pwd=********"
        );
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let err = DbSettings::resolve(lookup_from(&[("DB_PORT", "mysql")])).unwrap_err();

        assert!(matches!(err, ContentError::InvalidConfig(_)));
        assert!(err.to_string().contains("DB_PORT"));
    }

    #[test]
    fn password_never_appears_in_debug_or_descriptor() {
        let settings = DbSettings::new("h", 1, "d", "u", "hunter2");

        assert!(!format!("{settings:?}").contains("hunter2"));
        assert!(!settings.descriptor().contains("hunter2"));
    }

    #[test]
    fn labels_take_overrides_but_keep_runtime() {
        let labels = DeploymentLabels::resolve(lookup_from(&[
            ("ORCHARD_PHASE", "Phase 2"),
            ("ORCHARD_DATABASE_TYPE", "Aurora MySQL"),
        ]));

        assert_eq!(labels.phase, "Phase 2");
        assert_eq!(labels.database_type, "Aurora MySQL");
        assert_eq!(labels.deployment_type, "CloudFormation Automated");
        assert_eq!(labels.runtime, RUNTIME_LABEL);
    }

    #[test]
    fn core_config_resolves_both_parts() {
        let cfg = CoreConfig::resolve(lookup_from(&[("DB_HOST", "db.example.com")])).unwrap();

        assert_eq!(cfg.db().host(), "db.example.com");
        assert_eq!(cfg.labels(), &DeploymentLabels::default());
    }
}
