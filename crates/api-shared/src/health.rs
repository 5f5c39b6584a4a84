use chrono::{SecondsFormat, Utc};
use orchard_core::CoreConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Health payload returned by `GET /Home/Health`.
///
/// Field names are serialised in camelCase; `dotnetVersion` is kept as the key for the runtime
/// label so existing monitors keep parsing the payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthRes {
    /// Always `"OK"`.
    pub status: String,
    pub phase: String,
    pub dotnet_version: String,
    pub deployment_type: String,
    pub database_type: String,
    /// Resolved database host; the database itself is never contacted.
    pub database_host: String,
    /// Current UTC time, ISO-8601 with a `Z` suffix.
    pub timestamp: String,
}

/// Simple health service that can be used by both the REST API and the CLI
///
/// Reports static deployment metadata from the resolved configuration. It never touches the
/// database and never fails.
#[derive(Clone)]
pub struct HealthService {
    cfg: Arc<CoreConfig>,
}

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` with status `"OK"` and the current UTC timestamp.
    pub fn check_health(cfg: &CoreConfig) -> HealthRes {
        let labels = cfg.labels();
        HealthRes {
            status: "OK".into(),
            phase: labels.phase.clone(),
            dotnet_version: labels.runtime.clone(),
            deployment_type: labels.deployment_type.clone(),
            database_type: labels.database_type.clone(),
            database_host: cfg.db().host().to_owned(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    /// Instance method delegating to [`HealthService::check_health`].
    pub fn check(&self) -> HealthRes {
        Self::check_health(&self.cfg)
    }
}
