//! Server settings from flags, environment variables and `.env`.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "assay_planner=info,tower_http=info";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "assay_server",
    version = crate::about::ASSAY_DISPLAY_VERSION,
    about = "Antibody assay setup HTTP API"
)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "ASSAY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port to listen on
    #[arg(long, short, env = "ASSAY_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Directory of static files served at `/`
    #[arg(long, env = "ASSAY_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Tracing filter directives
    #[arg(long, env = "RUST_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

impl ServerConfig {
    /// Reads `.env` (if present) before parsing so its values act as
    /// environment fallbacks.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn bind_address(&self) -> anyhow::Result<SocketAddr> {
        let text = format!("{}:{}", self.host, self.port);
        text.parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{text}': {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "assay_server",
            "--host",
            "127.0.0.1",
            "--port",
            "9100",
            "--static-dir",
            "web",
            "--log-filter",
            "debug",
        ])
        .unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.static_dir, Some(PathBuf::from("web")));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(
            config.bind_address().unwrap(),
            "127.0.0.1:9100".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_bad_host_is_reported() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            port: 8000,
            static_dir: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        };
        assert!(config.bind_address().is_err());
    }
}
