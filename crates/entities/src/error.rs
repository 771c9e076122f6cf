//! Error type shared by every entity client implementation.

/// Errors from the entity client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The entity service returned a non-2xx status code.
    #[error("Entity service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response body did not match the expected shape.
    #[error("Response decoding failed: {0}")]
    Decode(String),
}

impl ClientError {
    /// Build the error for a non-2xx response.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            body: body.into(),
        }
    }

    /// Status code for [`ClientError::Api`] errors, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
