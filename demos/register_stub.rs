//! Registers a few stubs on a local WireMock server and removes them again.
//!
//! This example shows how to:
//! - Create a client for a running mock server
//! - Combine matchers for query parameters, headers and bodies
//! - Return responses with delays, faults and scenarios
//! - Stub a gRPC method
//!
//! Start a server first, e.g. `docker run -p 8080:8080 wiremock/wiremock`.
//!
//! Run with: `cargo run --example register_stub`

use std::time::Duration;
use wiremock_client::grpc::{self, Code, ResponseBuilder};
use wiremock_client::matcher::{contains, equal_to, equal_to_json, not};
use wiremock_client::{
    get, post, url_path_equal_to, url_path_template, Client, Error, Fault, ResponseSpec,
    Webhook, SCENARIO_STATE_STARTED,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("wiremock_client=debug,register_stub=info")
        .init();

    let client = Client::builder()
        .base_url("http://localhost:8080")?
        .timeout(Duration::from_secs(5))
        .build()?;

    println!("=== Matchers ===");
    let greeting = post(url_path_equal_to("/example"))
        .with_query_param("firstName", equal_to("John").or(equal_to("Jack")))
        .with_header("User-Agent", not(contains("curl")))
        .with_body_pattern(equal_to_json(r#"{"meta": "information"}"#, &[]))
        .with_bearer_token(equal_to("s3cr3t"))
        .will_return_response(
            ResponseSpec::new()
                .with_header("Content-Type", "application/json")
                .with_json_body(serde_json::json!({"greeting": "hello"}))
                .with_uniform_random_delay(Duration::from_millis(20), Duration::from_millis(80)),
        );
    println!("{}", greeting.to_json()?);
    client.stub_for(&greeting).await?;

    println!("=== Scenario ===");
    let first = get(url_path_template("/orders/{orderId}"))
        .with_path_param("orderId", equal_to("42"))
        .in_scenario("order")
        .when_scenario_state_is(SCENARIO_STATE_STARTED)
        .will_set_state_to("shipped")
        .will_return_response(ResponseSpec::new().with_body("pending"))
        .with_post_serve_action(
            "webhook",
            Webhook::new()
                .with_method("POST")
                .with_url("http://localhost:9090/notify")
                .with_body("order 42 read"),
        );
    let broken = get(url_path_equal_to("/flaky"))
        .at_priority(1)
        .will_return_response(ResponseSpec::new().with_fault(Fault::ConnectionResetByPeer));
    client.stub_for(&first).await?;
    client.stub_for(&broken).await?;

    println!("=== gRPC ===");
    let service = grpc::Service::new("com.example.grpc.GreetingService", client.clone());
    service
        .stub_for(
            grpc::method("greeting")
                .with_request_message(grpc::equal_to_message(&serde_json::json!({"name": "Tom"}))?)
                .will_return(ResponseBuilder::json(r#"{"greeting":"Hello Tom"}"#)),
        )
        .await?;
    service
        .stub_for(
            grpc::method("farewell")
                .will_return(ResponseBuilder::error(Code::Unimplemented, "not yet")),
        )
        .await?;

    println!("=== Cleanup ===");
    for rule in [&greeting, &first, &broken] {
        client.delete_stub(rule).await?;
        println!("Deleted {}", rule.uuid());
    }
    client.reset_all_scenarios().await?;

    Ok(())
}
