/// Local checks that fail before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a search query")]
    EmptyQuery,
    #[error("Please enter document content")]
    EmptyContent,
    #[error("Metadata must be valid JSON: {0}")]
    InvalidMetadata(String),
    #[error("Message content must not be empty")]
    EmptyMessage,
    #[error("Prompt and response are both required")]
    IncompleteFeedback,
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Please login to continue")]
    NotAuthenticated,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response was received.
    #[error("{0}")]
    Network(String),
    /// Non-2xx status. `detail` is the backend's own `error`/`msg` text.
    #[error("request failed with status {status}")]
    Backend { status: u16, detail: Option<String> },
    /// 2xx with `{"success": false}`.
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// The text backends put in `error`/`msg`, if the failure carried any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Backend { detail, .. } => detail.as_deref(),
            ApiError::Rejected(message) => Some(message),
            _ => None,
        }
    }

    /// Backend text if present, otherwise `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(error) => error.to_string(),
            other => other
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// Short description for "<action> failed: <reason>" banners.
    pub fn reason(&self) -> String {
        match self {
            ApiError::Network(message) => format!("network error ({message})"),
            other => other
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        }
    }
}
