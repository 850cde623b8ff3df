//! Stubs for gRPC services served through the mock server's gRPC extension.
//!
//! The extension maps a call to `POST /{service}/{method}` with the JSON encoding
//! of the request message as body, and reads the reply status from response
//! headers.
//!
//! ```no_run
//! use wiremock_client::{grpc, Client};
//! use wiremock_client::grpc::{Code, ResponseBuilder};
//!
//! # async fn example() -> Result<(), wiremock_client::Error> {
//! let client = Client::new("http://localhost:8080")?;
//! let greeting = grpc::Service::new("com.example.grpc.GreetingService", client);
//!
//! greeting
//!     .stub_for(
//!         grpc::method("greeting")
//!             .with_request_message(grpc::equal_to_message(&serde_json::json!({"name": "Tom"}))?)
//!             .will_return(ResponseBuilder::json(r#"{"greeting":"Hello Tom"}"#)),
//!     )
//!     .await?;
//!
//! greeting
//!     .stub_for(
//!         grpc::method("farewell")
//!             .will_return(ResponseBuilder::error(Code::Unimplemented, "not yet")),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod response;
mod stub;

pub use response::{status_name, ResponseBuilder};
pub use stub::{equal_to_message, method, StubRuleBuilder};
pub use tonic::Code;

use crate::{Client, Result};

/// A gRPC service whose methods are stubbed on one mock server.
#[derive(Clone)]
pub struct Service {
    service_name: String,
    client: Client,
}

impl Service {
    pub fn new(service_name: impl Into<String>, client: Client) -> Self {
        Self {
            service_name: service_name.into(),
            client,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Registers the stub built by `builder` for this service.
    pub async fn stub_for(&self, builder: StubRuleBuilder) -> Result<()> {
        let rule = builder.build(&self.service_name);
        self.client.stub_for(&rule).await
    }
}
