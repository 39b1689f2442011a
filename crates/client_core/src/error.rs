use thiserror::Error;

/// Message shown inline when the user submits without choosing an image.
pub const MISSING_IMAGE_MESSAGE: &str = "Please upload an image first.";

/// The one message shown for every failed boundary call.
pub const FAILED_TO_GENERATE_MESSAGE: &str =
    "Failed to generate recipe. The server might be down or an error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{}", MISSING_IMAGE_MESSAGE)]
    MissingImage,
}

/// Why a boundary call failed. Diagnostic only; never rendered to the user.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("recipe service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid recipe service response: {0}")]
    Decode(String),

    #[error("invalid recipe service url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl TransportError {
    /// Connect failures, timeouts and 5xx responses. A later retry policy could key
    /// off this; today it only feeds the diagnostic log.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(err) => err.is_connect() || err.is_timeout(),
            Self::Status { status, .. } => *status >= 500,
            Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Request(value)
        }
    }
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no recipe to copy")]
    NothingToCopy,

    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}
