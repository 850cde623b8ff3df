//! Artificial latency applied by the server before (or while) responding.

use serde::Serialize;
use std::time::Duration;

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// A delay model for responses and webhooks.
///
/// Serialized with a `type` discriminator, all durations in whole milliseconds:
///
/// ```
/// use wiremock_client::DelayDistribution;
/// use std::time::Duration;
///
/// let delay = DelayDistribution::uniform(Duration::from_millis(15), Duration::from_secs(1));
/// assert_eq!(
///     serde_json::to_value(&delay).unwrap(),
///     serde_json::json!({"type": "uniform", "lower": 15, "upper": 1000})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DelayDistribution {
    Fixed { milliseconds: u64 },
    #[serde(rename = "lognormal")]
    LogNormal { median: u64, sigma: f64 },
    Uniform { lower: u64, upper: u64 },
}

impl DelayDistribution {
    pub fn fixed(delay: Duration) -> Self {
        DelayDistribution::Fixed {
            milliseconds: millis(delay),
        }
    }

    /// Log-normal delay around `median`; `sigma` controls the tail.
    pub fn log_normal(median: Duration, sigma: f64) -> Self {
        DelayDistribution::LogNormal {
            median: millis(median),
            sigma,
        }
    }

    pub fn uniform(lower: Duration, upper: Duration) -> Self {
        DelayDistribution::Uniform {
            lower: millis(lower),
            upper: millis(upper),
        }
    }
}

/// Sends the response body in `number_of_chunks` pieces spread over `total_duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkedDribbleDelay {
    pub number_of_chunks: u32,
    /// Milliseconds.
    pub total_duration: u64,
}

impl ChunkedDribbleDelay {
    pub fn new(number_of_chunks: u32, total_duration: Duration) -> Self {
        Self {
            number_of_chunks,
            total_duration: millis(total_duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variants_carry_type_tag() {
        assert_eq!(
            serde_json::to_value(DelayDistribution::fixed(Duration::from_secs(5))).unwrap(),
            json!({"type": "fixed", "milliseconds": 5000})
        );
        assert_eq!(
            serde_json::to_value(DelayDistribution::log_normal(
                Duration::from_millis(90),
                0.1
            ))
            .unwrap(),
            json!({"type": "lognormal", "median": 90, "sigma": 0.1})
        );
    }

    #[test]
    fn test_sub_millisecond_durations_truncate() {
        assert_eq!(
            DelayDistribution::fixed(Duration::from_micros(1999)),
            DelayDistribution::Fixed { milliseconds: 1 }
        );
    }

    #[test]
    fn test_chunked_dribble() {
        assert_eq!(
            serde_json::to_value(ChunkedDribbleDelay::new(5, Duration::from_secs(1))).unwrap(),
            json!({"numberOfChunks": 5, "totalDuration": 1000})
        );
    }
}
