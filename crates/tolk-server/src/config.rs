use std::path::PathBuf;

use crate::error::Result;
pub use clap::Parser;
use tolk_app::state::AppConfig;
use url::Url;

#[derive(Debug, Clone, clap::Parser)]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3000,
        env = "TOLK_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "TOLK_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "TOLK_BASE_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of server, as visible to clients"
    )]
    pub base_url: Url,

    #[arg(
        long,
        env = "TOLK_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db, default is sqlite://[data-dir]/tolk.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "TOLK_DATA_DIR",
        help = "Data directory (database etc.), default is system default like ~/.local/share/tolk"
    )]
    data_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "TOLK_LIST_LIMIT",
        default_value = "100",
        help = "Maximum number of records returned by list endpoints"
    )]
    pub list_limit: usize,

    #[arg(long, env = "TOLK_CORS", help = "Enable permissive CORS")]
    pub cors: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|p| p.join("tolk"))
                .unwrap_or_else(|| PathBuf::from("tolk"))
        })
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}/tolk.db", self.data_dir().display()))
    }
}

impl From<&ServerConfig> for AppConfig {
    fn from(config: &ServerConfig) -> Self {
        AppConfig {
            list_limit: config.list_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config =
            ServerConfig::try_parse_from(["tolk-server", "--data-dir", "/tmp/tolk-test"]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.listen_address, "127.0.0.1");
        assert_eq!(config.list_limit, 100);
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/");
        assert!(!config.cors);
        assert_eq!(config.database_url(), "sqlite:///tmp/tolk-test/tolk.db");
    }

    #[test]
    fn test_explicit_database_url() {
        let config = ServerConfig::try_parse_from([
            "tolk-server",
            "--database-url",
            "sqlite::memory:",
            "--port",
            "3456",
            "--list-limit",
            "10",
        ])
        .unwrap();
        assert_eq!(config.port, 3456);
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(AppConfig::from(&config).list_limit, 10);
    }
}
