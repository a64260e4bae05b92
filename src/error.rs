use thiserror::Error;

/// Message reported when the upstream signals failure without providing one.
pub const FALLBACK_MESSAGE: &str = "OpenWeatherMap request failed";

/// Failures surfaced to the GraphQL executor as query errors.
///
/// Errors are never caught or retried; the executor reports them to the caller
/// alongside a null data field. No partial results are ever returned.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The upstream answered, but its embedded status code signalled failure.
    #[error("{0}")]
    Upstream(String),

    /// The HTTP call itself failed, or the body was not valid JSON.
    #[error("Upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The payload parsed as JSON but did not match the expected shape.
    #[error("Failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Malformed upstream payload: {0}")]
    Malformed(&'static str),
}

impl GatewayError {
    pub fn upstream(message: Option<&str>) -> Self {
        Self::Upstream(message.unwrap_or(FALLBACK_MESSAGE).to_string())
    }
}
