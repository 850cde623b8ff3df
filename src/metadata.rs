//! Description of a single admin API call.

use http::{Method, StatusCode};

/// Admin API root on the mock server.
pub const ADMIN_PATH: &str = "__admin";

/// Metadata for one call against the admin API.
///
/// Carries the method, the path below the client's base URL and the status
/// that counts as success for this endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRequest {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// The path relative to the base URL, e.g. `__admin/mappings`.
    pub path: String,

    /// The only status accepted as success.
    pub expected_status: StatusCode,
}

impl AdminRequest {
    /// Creates metadata for `method` on `/__admin/<path>`, expecting `200 OK`.
    pub fn new(method: Method, path: impl AsRef<str>) -> Self {
        let path = path.as_ref().trim_start_matches('/');
        let path = if path.is_empty() {
            ADMIN_PATH.to_string()
        } else {
            format!("{}/{}", ADMIN_PATH, path)
        };
        Self {
            method,
            path,
            expected_status: StatusCode::OK,
        }
    }

    /// Overrides the expected success status.
    pub fn expecting(mut self, status: StatusCode) -> Self {
        self.expected_status = status;
        self
    }
}
