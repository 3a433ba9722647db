use thiserror::Error;

/// The crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The crate-wide error type.
///
/// Every failure an operation can hit has an explicit kind here; the tool
/// facade relies on [`Error::kind`] to build its in-band error payloads, so
/// nothing below it is allowed to panic or raise past the facade.
#[derive(Debug, Error)]
pub enum Error {
    /// The input source cannot be handled (e.g. a local path that is not a
    /// readable file).
    #[error("unsupported input '{input}': {reason}")]
    UnsupportedInput { input: String, reason: String },

    /// The upstream API answered with a non-success status.
    #[error("Audion API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    /// The HTTP request itself failed (connect, timeout, TLS, ...).
    #[error("failed to call Audion API: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub(crate) fn unsupported_input(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedInput {
            input: source.into(),
            reason: reason.into(),
        }
    }

    /// A short stable tag naming the failure kind, used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedInput { .. } => "unsupported_input",
            Self::Api { .. } => "api_status",
            Self::Http(_) => "http",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Message(_) => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_are_stable() {
        assert_eq!(Error::msg("nope").kind(), "other");
        assert_eq!(
            Error::unsupported_input("x.wav", "no such file").kind(),
            "unsupported_input"
        );
        assert_eq!(
            Error::Api {
                status: 500,
                body: "boom".into()
            }
            .kind(),
            "api_status"
        );
    }

    #[test]
    fn api_error_message_carries_status_and_body() {
        let err = Error::Api {
            status: 403,
            body: "invalid token".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("invalid token"));
    }
}
