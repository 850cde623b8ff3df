//! # wiremock-client - Stub builder and admin client for WireMock
//!
//! Build stub mappings with a fluent, typed DSL and manage them on a running
//! WireMock (or compatible) server through its `/__admin` REST API.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wiremock_client::{post, url_path_equal_to, Client, ResponseSpec, Request};
//! use wiremock_client::matcher::{equal_to, equal_to_json, not, contains};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), wiremock_client::Error> {
//!     let client = Client::builder()
//!         .base_url("http://localhost:8080")?
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     let rule = post(url_path_equal_to("/example"))
//!         .with_query_param("firstName", equal_to("John").or(equal_to("Jack")))
//!         .with_header("User-Agent", not(contains("curl")))
//!         .with_body_pattern(equal_to_json(r#"{"meta": "information"}"#, &[]))
//!         .with_bearer_token(equal_to("s3cr3t"))
//!         .at_priority(1)
//!         .will_return_response(
//!             ResponseSpec::new()
//!                 .with_status(200)
//!                 .with_header("Content-Type", "application/json")
//!                 .with_body(r#"{"code": 200}"#),
//!         );
//!
//!     client.stub_for(&rule).await?;
//!
//!     // ... exercise the system under test ...
//!
//!     let hits = client
//!         .get_count_requests(&Request::new("POST", url_path_equal_to("/example")))
//!         .await?;
//!     println!("/example was called {} times", hits);
//!
//!     client.delete_stub(&rule).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Matcher algebra** - string matchers combined with `and`, `or` and `not`, plus multi-value and JSON schema matchers
//! - **Full request criteria** - URL strategies, headers, query/path/form parameters, cookies, multipart parts, auth helpers
//! - **Rich responses** - text, binary, file and JSON bodies, delay distributions, dribbling, faults, transformers
//! - **Scenarios and webhooks** - stateful stubs and post-serve callbacks
//! - **Admin client** - stubs, request journal, scenarios and recordings over `reqwest`
//! - **Raw responses on failure** - protocol errors keep the server's explanation
//! - **Structured logging** - every admin call is traced with `tracing`
//!
//! ## Wire format
//!
//! Every builder serializes to the admin API's JSON with `serde`, so stubs can be
//! inspected or written to mapping files without a server:
//!
//! ```
//! use wiremock_client::{get, url_path_equal_to, ok};
//!
//! let rule = get(url_path_equal_to("/health")).will_return_response(ok());
//! let json: serde_json::Value = serde_json::from_str(&rule.to_json()?)?;
//!
//! assert_eq!(json["request"]["urlPath"], "/health");
//! assert_eq!(json["response"]["status"], 200);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! ```no_run
//! use wiremock_client::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("http://localhost:8080")?;
//! match client.get_request_by_id("2b5c0a3e-6a4b-4cb3-9d0b-3d2a27c7f0c1").await {
//!     Ok(event) => println!("{} {}", event.request.method, event.request.url),
//!     Err(e) if e.is_not_found() => println!("no such request"),
//!     Err(Error::DeserializationFailed { raw_response, serde_error, .. }) => {
//!         eprintln!("unexpected body {}: {}", raw_response, serde_error);
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod delay;
mod error;
pub mod grpc;
pub mod journal;
pub mod matcher;
pub mod matching;
pub mod metadata;
mod multipart;
mod reply;
mod request;
mod response;
mod stub_rule;
mod url_matcher;
mod webhook;

pub use client::{Client, ClientBuilder};
pub use delay::{ChunkedDribbleDelay, DelayDistribution};
pub use error::{Error, Result};
pub use multipart::{MultipartMatchingType, MultipartPattern};
pub use reply::Reply;
pub use request::{BasicAuthCredentials, Request};
pub use response::{ok, Fault, ResponseSpec};
pub use stub_rule::{delete, get, patch, post, put, StubRule, SCENARIO_STATE_STARTED};
pub use url_matcher::{
    url_equal_to, url_matching, url_path_equal_to, url_path_matching, url_path_template,
    UrlMatcher,
};
pub use webhook::Webhook;
