#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("failed to query content: {0}")]
    Query(#[source] sqlx::Error),
    #[error("failed to read column {column}: {reason}")]
    Mapping { column: String, reason: String },
}

impl ContentError {
    /// Builds a mapping error for `column` from any displayable cause.
    pub fn mapping(column: &str, reason: impl std::fmt::Display) -> Self {
        Self::Mapping {
            column: column.to_owned(),
            reason: reason.to_string(),
        }
    }

    /// Short label for the failure class, used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "config",
            Self::Connection(_) => "connection",
            Self::Query(_) => "query",
            Self::Mapping { .. } => "mapping",
        }
    }
}

pub type ContentResult<T> = std::result::Result<T, ContentError>;
