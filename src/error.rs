use thiserror::Error;

/// Errors returned by Prodia operations.
#[derive(Error, Debug)]
pub enum ProdiaError {
    /// Prodia rejected the request parameters (HTTP 400).
    #[error("The provided parameters are invalid")]
    InvalidParameters,

    /// The API key was not recognised (HTTP 401).
    #[error("The provided API key is invalid")]
    InvalidApiKey,

    /// The API key exists but has no API access (HTTP 402).
    #[error("The API key is not enabled")]
    ApiKeyNotEnabled,

    /// Any other non-200 status.
    #[error("Prodia returned HTTP {status}")]
    RequestFailed { status: u16 },

    /// Prodia answered 200 with an empty or null body.
    #[error("Failed to receive a valid response")]
    EmptyResponse,

    /// The job finished with status `failed`.
    #[error("Generation failed for job {job}")]
    GenerationFailed { job: String },

    /// Timed out waiting for a job to finish.
    #[error("Timed out waiting for job {job}")]
    Timeout { job: String },

    /// Network-level request failure with context.
    #[error("{context}: {source}")]
    Network {
        context: String,
        source: reqwest::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A job id that cannot be used as a URL path segment.
    #[error("Invalid job id: {0:?}")]
    InvalidJobId(String),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProdiaError {
    /// Map a non-200 HTTP status to its error. Returns `None` for 200.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200 => None,
            400 => Some(Self::InvalidParameters),
            401 => Some(Self::InvalidApiKey),
            402 => Some(Self::ApiKeyNotEnabled),
            status => Some(Self::RequestFailed { status }),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ProdiaError>;
