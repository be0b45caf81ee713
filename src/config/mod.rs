use std::time::Duration;

use crate::errors::{DashboardError, DashboardResult};

const DEFAULT_BIND: &str = "0.0.0.0:4000";
const DEFAULT_CACHE_CAPACITY: usize = 1024;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub bind_addr: String,
    /// Maximum entries kept per cache namespace
    pub cache_capacity: usize,
    /// Timeout for feed and subreddit fetches (favicon probes use their own)
    pub upstream_timeout: Duration,
    pub sweep_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "./dashboard.db".to_string(),
            bind_addr: DEFAULT_BIND.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> DashboardResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        // Default db_path is relative to executable directory
        let db_path = std::env::var("DASHBOARD_DB_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("dashboard.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./dashboard.db".to_string())
        });

        let bind_addr =
            std::env::var("DASHBOARD_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

        let cache_capacity = parse_var("DASHBOARD_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?;
        if cache_capacity == 0 {
            return Err(DashboardError::Config(
                "DASHBOARD_CACHE_CAPACITY must be at least 1".to_string(),
            ));
        }

        let upstream_timeout = Duration::from_secs(parse_var(
            "DASHBOARD_UPSTREAM_TIMEOUT_SECS",
            DEFAULT_UPSTREAM_TIMEOUT_SECS,
        )?);
        let sweep_interval = Duration::from_secs(parse_var(
            "DASHBOARD_SWEEP_INTERVAL_SECS",
            DEFAULT_SWEEP_INTERVAL_SECS,
        )?);

        if upstream_timeout.is_zero() || sweep_interval.is_zero() {
            return Err(DashboardError::Config(
                "timeouts and intervals must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            db_path,
            bind_addr,
            cache_capacity,
            upstream_timeout,
            sweep_interval,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> DashboardResult<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DashboardError::Config(format!("{} is not a valid number: {}", name, raw))),
        Err(_) => Ok(default),
    }
}
