//! Configuration for the HTTP front-end.
//!
//! A plain struct with a `Default` impl and named fields, loaded from a
//! handful of environment variables with documented fallbacks. There is
//! nothing here that warrants a config-file format or a builder.

/// Bind address, port, and log filter for the HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to. Defaults to `0.0.0.0`.
    pub bind: String,
    /// Port to bind the HTTP listener to. Defaults to `7002`.
    pub port: u16,
    /// `env_logger` filter string. Defaults to `info`.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: "0.0.0.0".to_string(), port: 7002, log_filter: "info".to_string() }
    }
}

impl ServerConfig {
    /// Reads `RANKDB_BIND`, `RANKDB_PORT`, and a log filter from the
    /// environment, falling back to [`ServerConfig::default`] for anything
    /// unset or unparsable. The log filter prefers `RANKDB_LOG`, then falls
    /// back to `RUST_LOG`, then to the default.
    pub fn from_env() -> Self {
        let default = Self::default();
        let bind = std::env::var("RANKDB_BIND").unwrap_or(default.bind);
        let port = std::env::var("RANKDB_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.port);
        let log_filter = std::env::var("RANKDB_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default.log_filter);
        Self { bind, port, log_filter }
    }
}
