use std::error::Error;

/// Why a call to the image tokenizer did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvocationError {
    /// The request never got a response: connection refused, DNS, TLS, timeouts.
    #[error("network error: {0}")]
    Network(String),
    /// The tokenizer answered, but with a failure.
    #[error("{0}")]
    Collaborator(String),
}

impl From<reqwest::Error> for InvocationError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest hides the interesting part (e.g. "Connection refused") in the source chain
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }

        if err.is_decode() || err.is_status() {
            Self::Collaborator(message)
        } else {
            Self::Network(message)
        }
    }
}
