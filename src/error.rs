//! Error types for stub building and admin API calls.
//!
//! Protocol errors keep the raw response body, since the mock server explains
//! rejected mappings in it.

use http::{HeaderMap, StatusCode};

/// The main error type of this crate.
///
/// # Examples
///
/// ```no_run
/// use wiremock_client::{Client, Error, get, url_path_equal_to};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("http://localhost:8080")?;
///
/// match client.stub_for(&get(url_path_equal_to("/ping"))).await {
///     Ok(()) => println!("registered"),
///     Err(Error::HttpError { status, raw_response, .. }) => {
///         eprintln!("mock server rejected the stub ({}): {}", status, raw_response);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection refused, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request took longer than the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The admin API answered with a status other than the one the operation expects.
    ///
    /// # Fields
    ///
    /// * `status` - The HTTP status code received
    /// * `expected` - The status code the operation expects on success
    /// * `raw_response` - The raw response body
    /// * `headers` - The response headers
    #[error("HTTP error {status} (expected {expected}): {raw_response}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The status the operation expects
        expected: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The response headers
        headers: HeaderMap,
    },

    /// Failed to deserialize the response body into the expected type.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// A stub, criteria or response body could not be serialized to JSON.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// A checked matcher constructor was given an invalid value.
    #[error("Invalid matcher: {0}")]
    InvalidMatcher(String),

    /// Invalid client configuration, such as a malformed header.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns `true` if the server answered `404 Not Found`.
    ///
    /// ```
    /// use wiremock_client::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::HttpError {
    ///     status: StatusCode::NOT_FOUND,
    ///     expected: StatusCode::OK,
    ///     raw_response: String::new(),
    ///     headers: http::HeaderMap::new(),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationFailed(err.to_string())
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
