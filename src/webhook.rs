//! Post-serve webhooks: an outbound HTTP call the server makes after responding.

use crate::delay::DelayDistribution;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// A webhook fired by the server once a stub has been served.
///
/// # Examples
///
/// ```
/// use wiremock_client::Webhook;
/// use std::time::Duration;
///
/// let webhook = Webhook::new()
///     .with_method("POST")
///     .with_url("http://callback.local/notify")
///     .with_header("Content-Type", "application/json")
///     .with_body(r#"{"result": "SUCCESS"}"#)
///     .with_fixed_delay(Duration::from_millis(100));
///
/// let json = serde_json::to_value(&webhook).unwrap();
/// assert_eq!(json["name"], "webhook");
/// assert_eq!(json["parameters"]["delay"]["milliseconds"], 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Webhook {
    name: String,
    parameters: WebhookParameters,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct WebhookParameters {
    #[serde(skip_serializing_if = "String::is_empty")]
    method: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    body: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delay: Option<DelayDistribution>,
}

impl Webhook {
    /// Creates a webhook registered under the server's `webhook` extension.
    pub fn new() -> Self {
        Self {
            name: "webhook".to_string(),
            parameters: WebhookParameters::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the post-serve extension name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.parameters.method = method.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.parameters.url = url.into();
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.parameters.body = body.into();
        self
    }

    pub fn with_delay(mut self, delay: DelayDistribution) -> Self {
        self.parameters.delay = Some(delay);
        self
    }

    pub fn with_fixed_delay(self, delay: Duration) -> Self {
        self.with_delay(DelayDistribution::fixed(delay))
    }

    pub fn with_log_normal_random_delay(self, median: Duration, sigma: f64) -> Self {
        self.with_delay(DelayDistribution::log_normal(median, sigma))
    }

    pub fn with_uniform_random_delay(self, lower: Duration, upper: Duration) -> Self {
        self.with_delay(DelayDistribution::uniform(lower, upper))
    }
}

impl Default for Webhook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_webhook() {
        let webhook = Webhook::new()
            .with_method("POST")
            .with_url("http://localhost/callback")
            .with_header("X-Id", "1")
            .with_body("done")
            .with_log_normal_random_delay(Duration::from_millis(200), 0.5);

        assert_eq!(
            serde_json::to_value(&webhook).unwrap(),
            json!({
                "name": "webhook",
                "parameters": {
                    "method": "POST",
                    "url": "http://localhost/callback",
                    "body": "done",
                    "headers": {"X-Id": "1"},
                    "delay": {"type": "lognormal", "median": 200, "sigma": 0.5}
                }
            })
        );
    }

    #[test]
    fn test_unset_parameters_omitted() {
        let webhook = Webhook::new().with_name("notifier").with_url("http://x");
        assert_eq!(
            serde_json::to_value(&webhook).unwrap(),
            json!({"name": "notifier", "parameters": {"url": "http://x"}})
        );
    }
}
