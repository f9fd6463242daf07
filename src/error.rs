/// All errors that can occur while talking to the activities API.
#[derive(thiserror::Error, Debug)]
pub enum RosterError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the JSON we expected.
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// Server answered with a non-success status, optionally explaining why.
    #[error("server rejected request to {url} with {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Rejected {
        url: String,
        status: reqwest::StatusCode,
        detail: Option<String>,
    },

    /// The configured base URL cannot be used to build API URLs.
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}

impl RosterError {
    /// Whether the failure happened before a usable response was obtained.
    ///
    /// Malformed bodies count as transport failures; only [`RosterError::Rejected`]
    /// is a failure reported by the server itself.
    pub fn is_transport(&self) -> bool {
        !matches!(self, RosterError::Rejected { .. })
    }

    /// The server-provided `detail`, if the server rejected the request with one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            RosterError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
