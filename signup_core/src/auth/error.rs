use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while talking to the auth provider. The `Display`
/// impl is meant to be shown to the user as-is.
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We couldn't talk to the server at all, or it sent back something we
    /// couldn't read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider turned us down (4xx) and told us why.
    #[error("{0}")]
    Client(String),

    /// The provider had a problem on its end (5xx).
    #[error("The server had a problem. Please try again later.")]
    Server,

    /// The provider returned a status we don't know what to do with.
    #[error("Unexpected response from the server: {0}")]
    Unexpected(reqwest::StatusCode),
}

/// The body the server sends along with a client error.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResp {
    /// What went wrong, in words suitable to show to the user.
    pub error: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn client_errors_show_the_server_message() {
        let err = Error::Client("An account with this email already exists".to_string());

        assert_eq!(err.to_string(), "An account with this email already exists");
    }

    #[test]
    fn unexpected_shows_status() {
        let err = Error::Unexpected(reqwest::StatusCode::MOVED_PERMANENTLY);

        assert_eq!(
            err.to_string(),
            "Unexpected response from the server: 301 Moved Permanently"
        );
    }

    #[test]
    fn error_resp_reads_json() {
        let resp: ErrorResp = serde_json::from_str(r#"{"error": "nope"}"#).unwrap();

        assert_eq!(resp.error, "nope");
    }
}
