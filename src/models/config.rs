//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Shared secret used to verify bearer tokens.
    pub secret: String,
    /// Directory with the compiled dashboard bundle served under `/assets`.
    #[serde(default)]
    pub assets_dir: Option<String>,
    /// Tax rate in percent applied to quotations that do not set one.
    #[serde(default = "default_tax_rate")]
    pub default_tax_rate: i32,
}

fn default_tax_rate() -> i32 {
    10
}
