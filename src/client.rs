//! Client for the mock server's admin API.
//!
//! The [`Client`] type registers stubs and queries the request journal.
//! Use [`ClientBuilder`] to configure it.

use crate::journal::{
    CountRequestsResponse, DeleteRequestsByCriteriaResponse, FindRequestsResponse,
    GetAllRequestsResponse, ServeEvent,
};
use crate::{metadata::AdminRequest, Error, Reply, Request, Result, StubRule};
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// An admin API client for a WireMock-compatible server.
///
/// The client is cheap to clone and meant to be shared across a test suite.
/// Every operation makes exactly one HTTP call and fails on any status other
/// than the one the endpoint documents for success.
///
/// # Examples
///
/// ```no_run
/// use wiremock_client::{Client, post, url_path_equal_to, ResponseSpec, matcher::equal_to};
///
/// # async fn example() -> Result<(), wiremock_client::Error> {
/// let client = Client::new("http://localhost:8080")?;
///
/// let rule = post(url_path_equal_to("/example"))
///     .with_query_param("firstName", equal_to("John"))
///     .will_return_response(ResponseSpec::new().with_status(201).with_body("created"));
///
/// client.stub_for(&rule).await?;
/// // ... exercise the code under test ...
/// assert!(client.verify(rule.request(), 1).await?);
/// client.delete_stub(&rule).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

struct RawReply {
    raw_body: String,
    status: StatusCode,
    headers: HeaderMap,
    latency: Duration,
}

impl Client {
    /// Creates a client for the server at `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        ClientBuilder::new().base_url(base_url)?.build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The server URL admin paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Makes an admin call and decodes the JSON reply.
    ///
    /// This is the building block behind every typed operation; use it for
    /// endpoints this client does not wrap.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wiremock_client::{Client, metadata::AdminRequest};
    /// use http::Method;
    ///
    /// # async fn example() -> Result<(), wiremock_client::Error> {
    /// let client = Client::new("http://localhost:8080")?;
    ///
    /// let metadata = AdminRequest::new(Method::GET, "mappings");
    /// let reply = client.call::<(), serde_json::Value>(metadata, None).await?;
    /// println!("{} mappings", reply.data["meta"]["total"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<Req, Res>(
        &self,
        metadata: AdminRequest,
        body: Option<&Req>,
    ) -> Result<Reply<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let raw = self.send(&metadata, body).await?;

        match serde_json::from_str::<Res>(&raw.raw_body) {
            Ok(data) => Ok(Reply::new(
                data,
                raw.raw_body,
                raw.status,
                raw.headers,
                raw.latency,
            )),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %raw.raw_body,
                    path = %metadata.path,
                    "Failed to deserialize admin response"
                );

                Err(Error::DeserializationFailed {
                    raw_response: raw.raw_body,
                    serde_error: e.to_string(),
                    status: raw.status,
                })
            }
        }
    }

    /// Makes an admin call whose reply body carries nothing of interest.
    async fn call_unit<Req>(&self, metadata: AdminRequest, body: Option<&Req>) -> Result<Reply<()>>
    where
        Req: Serialize + ?Sized,
    {
        let raw = self.send(&metadata, body).await?;
        Ok(Reply::new((), raw.raw_body, raw.status, raw.headers, raw.latency))
    }

    /// Sends one request and checks the status against the expected one.
    async fn send<Req>(&self, metadata: &AdminRequest, body: Option<&Req>) -> Result<RawReply>
    where
        Req: Serialize + ?Sized,
    {
        let url = self.endpoint(&metadata.path);

        tracing::debug!(
            method = %metadata.method,
            url = %url,
            "Executing admin request"
        );

        let mut request = self.inner.http_client.request(metadata.method.clone(), url);

        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            let json = serde_json::to_value(body)
                .map_err(|e| Error::SerializationFailed(e.to_string()))?;
            request = request.json(&json);
        }

        let start_time = Instant::now();
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::Network(e)
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response.text().await?;
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            path = %metadata.path,
            "Received admin response"
        );

        if status != metadata.expected_status {
            if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    response = %raw_body,
                    "Mock server error"
                );
            } else {
                tracing::error!(
                    status = status.as_u16(),
                    expected = metadata.expected_status.as_u16(),
                    response = %raw_body,
                    "Unexpected admin response status"
                );
            }

            return Err(Error::HttpError {
                status,
                expected: metadata.expected_status,
                raw_response: raw_body,
                headers,
            });
        }

        Ok(RawReply {
            raw_body,
            status,
            headers,
            latency,
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.inner.base_url.clone();
        let joined = format!("{}/{}", url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url
    }

    /// Registers a stub mapping (`POST /__admin/mappings`, expects `201`).
    pub async fn stub_for(&self, stub_rule: &StubRule) -> Result<()> {
        let metadata = AdminRequest::new(Method::POST, "mappings").expecting(StatusCode::CREATED);
        self.call_unit(metadata, Some(stub_rule)).await?;
        tracing::debug!(uuid = %stub_rule.uuid(), "Registered stub mapping");
        Ok(())
    }

    /// Deletes the stub mapping with the given id.
    pub async fn delete_stub_by_id(&self, id: &str) -> Result<()> {
        let metadata = AdminRequest::new(Method::DELETE, format!("mappings/{}", id));
        self.call_unit::<()>(metadata, None).await?;
        Ok(())
    }

    /// Deletes a previously registered stub mapping.
    pub async fn delete_stub(&self, stub_rule: &StubRule) -> Result<()> {
        self.delete_stub_by_id(stub_rule.uuid()).await
    }

    /// Deletes all stub mappings.
    pub async fn clear(&self) -> Result<()> {
        let metadata = AdminRequest::new(Method::DELETE, "mappings");
        self.call_unit::<()>(metadata, None).await?;
        Ok(())
    }

    /// Restores stub mappings to the defaults defined in the server's backing store.
    pub async fn reset(&self) -> Result<()> {
        let metadata = AdminRequest::new(Method::POST, "mappings/reset");
        self.call_unit::<()>(metadata, None).await?;
        Ok(())
    }

    /// Moves every scenario back to its `Started` state.
    pub async fn reset_all_scenarios(&self) -> Result<()> {
        let metadata = AdminRequest::new(Method::POST, "scenarios/reset");
        self.call_unit::<()>(metadata, None).await?;
        Ok(())
    }

    /// Counts journal entries matching `criteria`.
    pub async fn get_count_requests(&self, criteria: &Request) -> Result<i64> {
        let metadata = AdminRequest::new(Method::POST, "requests/count");
        let reply = self
            .call::<_, CountRequestsResponse>(metadata, Some(criteria))
            .await?;
        Ok(reply.data.count)
    }

    /// Returns `true` if exactly `expected_count` received requests match `criteria`.
    pub async fn verify(&self, criteria: &Request, expected_count: i64) -> Result<bool> {
        let actual_count = self.get_count_requests(criteria).await?;
        Ok(actual_count == expected_count)
    }

    /// Lists every request in the journal.
    pub async fn get_all_requests(&self) -> Result<GetAllRequestsResponse> {
        let metadata = AdminRequest::new(Method::GET, "requests");
        Ok(self.call::<(), GetAllRequestsResponse>(metadata, None).await?.into_data())
    }

    /// Fetches a single journal entry. A missing id yields an
    /// [`Error::HttpError`] with status `404`.
    pub async fn get_request_by_id(&self, request_id: &str) -> Result<ServeEvent> {
        let metadata = AdminRequest::new(Method::GET, format!("requests/{}", request_id));
        Ok(self.call::<(), ServeEvent>(metadata, None).await?.into_data())
    }

    /// Lists journal entries matching `criteria`.
    pub async fn find_requests_by_criteria(
        &self,
        criteria: &Request,
    ) -> Result<FindRequestsResponse> {
        let metadata = AdminRequest::new(Method::POST, "requests/find");
        let reply = self
            .call::<_, FindRequestsResponse>(metadata, Some(criteria))
            .await?;
        Ok(reply.into_data())
    }

    /// Lists requests that matched no stub.
    pub async fn find_unmatched_requests(&self) -> Result<FindRequestsResponse> {
        let metadata = AdminRequest::new(Method::GET, "requests/unmatched");
        Ok(self.call::<(), FindRequestsResponse>(metadata, None).await?.into_data())
    }

    /// Empties the journal.
    pub async fn delete_all_requests(&self) -> Result<()> {
        let metadata = AdminRequest::new(Method::DELETE, "requests");
        self.call_unit::<()>(metadata, None).await?;
        Ok(())
    }

    /// Removes a single journal entry.
    pub async fn delete_request_by_id(&self, request_id: &str) -> Result<()> {
        let metadata = AdminRequest::new(Method::DELETE, format!("requests/{}", request_id));
        self.call_unit::<()>(metadata, None).await?;
        Ok(())
    }

    /// Removes journal entries matching `criteria` and returns them.
    pub async fn delete_requests_by_criteria(
        &self,
        criteria: &Request,
    ) -> Result<DeleteRequestsByCriteriaResponse> {
        let metadata = AdminRequest::new(Method::POST, "requests/remove");
        let reply = self
            .call::<_, DeleteRequestsByCriteriaResponse>(metadata, Some(criteria))
            .await?;
        Ok(reply.into_data())
    }

    /// Starts recording traffic proxied to `target_base_url`.
    pub async fn start_recording(&self, target_base_url: &str) -> Result<()> {
        let metadata = AdminRequest::new(Method::POST, "recordings/start");
        let body = serde_json::json!({ "targetBaseUrl": target_base_url });
        self.call_unit(metadata, Some(&body)).await?;
        Ok(())
    }

    /// Stops the current recording.
    pub async fn stop_recording(&self) -> Result<()> {
        let metadata = AdminRequest::new(Method::POST, "recordings/stop");
        self.call_unit::<()>(metadata, None).await?;
        Ok(())
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use wiremock_client::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), wiremock_client::Error> {
/// let client = ClientBuilder::new()
///     .base_url("http://localhost:8080")?
///     .timeout(Duration::from_secs(5))
///     .default_header("X-Test-Run", "nightly")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Sets the mock server URL. A path component is kept, so servers mounted
    /// below a prefix work too.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Adds a header sent with every admin call.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets a per-call timeout. Without one, calls wait as long as the transport does.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was provided or the HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::ConfigurationError("Base URL is required".to_string()))?;

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                default_headers: self.default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
