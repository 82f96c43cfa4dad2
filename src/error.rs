use thiserror::Error;

/// Errors surfaced by the console library
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("plan not found: {0}")]
    PlanNotFound(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unknown route: {0}")]
    UnknownRoute(String),

    #[error("failed to parse dataset: {0}")]
    Fixtures(#[from] serde_json::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("operation canceled")]
    Canceled,
}

impl DashboardError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
