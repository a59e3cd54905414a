pub mod rest;

use std::{path::Path, time::Duration};

use anyhow::{Result, anyhow};
use rand::Rng as _;
use reqwest::Url;
use tempfile::TempDir;
use tolk_server::config::{Parser, ServerConfig};
use tracing::debug;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
}

pub fn test_config(test_name: &str, base_dir: &Path) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix_in(format!("{}_", test_name), base_dir)?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?.to_string();
    let base_url = format!("http://localhost:{}", port);
    let args = &[
        "tolk-e2e-tests",
        "--data-dir",
        &data_dir,
        "--port",
        &port,
        "--base-url",
        &base_url,
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

/// Prepares configuration and migrated database in fresh temporary directory.
pub async fn prepare_env(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let base_dir = std::env::temp_dir();
    let (config, guard) = test_config(test_name, &base_dir)?;
    tokio::fs::create_dir_all(config.data_dir()).await?;
    let pool = tolk_dal::new_pool(&config.database_url()).await?;
    tolk_dal::migrate(&pool).await?;
    pool.close().await;
    Ok((config, guard))
}

/// Starts server in background task and waits until it answers health check.
pub async fn spawn_server(args: ServerConfig) -> Result<()> {
    let health_url = args.base_url.join("health")?;
    tokio::spawn(async move {
        if let Err(e) = tolk_server::run::run(args).await {
            tracing::error!("Server error: {e}");
        }
    });

    let client = reqwest::Client::new();
    for _ in 0..50 {
        match client.get(health_url.clone()).send().await {
            Ok(response) if response.status().is_success() => return Ok(()),
            _ => {
                debug!("Server not ready yet");
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
    }
    Err(anyhow!("Server did not start"))
}

pub async fn launch_env(args: ServerConfig) -> Result<(reqwest::Client, Url)> {
    let base_url = args.base_url.clone();
    spawn_server(args).await?;
    Ok((reqwest::Client::new(), base_url))
}

pub fn extend_url(url: &Url, segment: impl ToString) -> Url {
    let mut url = url.clone();
    url.path_segments_mut()
        .expect("URL cannot be base")
        .push(&segment.to_string());
    url
}
