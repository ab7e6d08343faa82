use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A name-equality lookup matched zero remote records.
    #[error("No {kind} found with name \"{name}\"")]
    NotFound { kind: &'static str, name: String },

    /// A required configuration key was never set.
    #[error("No configuration value for {0}")]
    ConfigMissing(String),

    #[error("No auth token available")]
    TokenMissing,

    #[error("Unable to determine the host from \"{0}\"")]
    InvalidBaseUri(String),

    /// The transport reported a network error or a non-success response.
    /// Surfaced as-is; nothing is retried.
    #[error("Remote request failed: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn account_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "account",
            name: name.into(),
        }
    }

    pub fn entity_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "entity",
            name: name.into(),
        }
    }

    pub fn config_missing(key: impl Into<String>) -> Self {
        Self::ConfigMissing(key.into())
    }
}
