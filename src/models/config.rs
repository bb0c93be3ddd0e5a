//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Deadline for a single search request, including both store round trips.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How long to wait for a pooled connection.
    #[serde(default = "default_pool_timeout_secs")]
    pub pool_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_pool_timeout_secs() -> u64 {
    30
}
