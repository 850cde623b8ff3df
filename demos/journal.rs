//! Inspects the request journal of a local WireMock server.
//!
//! Run with: `cargo run --example journal`

use wiremock_client::{url_path_matching, Client, Error, Request};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("wiremock_client=debug,journal=info")
        .init();

    let client = Client::new("http://localhost:8080")?;

    let all = client.get_all_requests().await?;
    println!("{} requests in the journal", all.meta.total);
    for event in &all.requests {
        println!(
            "{} {} {} (matched: {})",
            event.id, event.request.method, event.request.url, event.was_matched
        );
    }

    let criteria = Request::new("ANY", url_path_matching("/api/.*"));
    println!(
        "{} requests under /api",
        client.get_count_requests(&criteria).await?
    );

    let unmatched = client.find_unmatched_requests().await?;
    for request in &unmatched.requests {
        println!("Unmatched: {} {}", request.method, request.absolute_url);
    }

    if let Some(event) = all.requests.first() {
        match client.get_request_by_id(&event.id).await {
            Ok(event) => println!("Served with status {}", event.response.status),
            Err(e) if e.is_not_found() => println!("{} was already removed", event.id),
            Err(e) => return Err(e),
        }
    }

    let removed = client.delete_requests_by_criteria(&criteria).await?;
    println!("Removed {} entries", removed.serve_events.len());

    Ok(())
}
