//! Successful admin API replies.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A successful admin API reply: the decoded body plus transport details.
///
/// `T` is `()` for endpoints whose body is ignored.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    /// The decoded body.
    pub data: T,

    /// The raw response body as a string.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from sending the request until the body was read.
    pub latency: Duration,
}

impl<T> Reply<T> {
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            headers,
            latency,
        }
    }

    /// Maps the body to a different type, keeping the transport details.
    ///
    /// ```
    /// # use wiremock_client::Reply;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let reply = Reply::new(
    ///     42,
    ///     "{\"count\":42}".to_string(),
    ///     StatusCode::OK,
    ///     HeaderMap::new(),
    ///     Duration::from_millis(3),
    /// );
    ///
    /// let reply = reply.map(|n| n * 2);
    /// assert_eq!(reply.data, 84);
    /// ```
    pub fn map<U, F>(self, f: F) -> Reply<U>
    where
        F: FnOnce(T) -> U,
    {
        Reply {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
        }
    }

    /// Returns a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> std::ops::Deref for Reply<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
