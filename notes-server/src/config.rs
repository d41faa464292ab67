use serde::{Deserialize, Serialize};

use std::{
    env, fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub database_path: PathBuf,
    /// gRPC listen address
    pub listen_addr: SocketAddr,
    /// Maximum number of pooled store connections
    pub pool_size: u32,
    /// How long a call waits for a free store connection
    #[serde(with = "humantime_serde")]
    pub connection_timeout: Duration,
    /// How long SQLite retries on a locked database
    #[serde(with = "humantime_serde")]
    pub busy_timeout: Duration,
    /// Default deadline for calls that carry no timeout of their own
    #[serde(with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
    /// Maximum in-flight calls per client connection
    pub concurrency_limit_per_connection: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/notes.db"),
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 50051)),
            pool_size: 10,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(5),
            request_timeout: None,
            concurrency_limit_per_connection: None,
        }
    }
}

impl Config {
    pub fn from_yaml(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        serde_yaml::from_str(contents).map_err(Into::into)
    }

    /// Applies `NOTES_*` overrides fetched through `lookup`, then validates.
    fn apply_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = lookup("NOTES_DB_PATH") {
            self.database_path = PathBuf::from(path);
        }

        if let Some(addr) = lookup("NOTES_LISTEN_ADDR") {
            self.listen_addr = addr
                .parse()
                .map_err(|e| format!("Failed to parse NOTES_LISTEN_ADDR: {e}"))?;
        }

        if let Some(size) = lookup("NOTES_POOL_SIZE") {
            self.pool_size = size
                .parse()
                .map_err(|e| format!("Failed to parse NOTES_POOL_SIZE: {e}"))?;
        }

        self.validate()?;

        Ok(self)
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.pool_size == 0 {
            return Err("pool_size must be greater than zero".into());
        }

        // r2d2 asserts on a zero timeout instead of returning an error
        if self.connection_timeout.is_zero() {
            return Err("connection_timeout must be greater than zero".into());
        }

        Ok(())
    }
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    load_config_with(|key| env::var(key).ok())
}

fn load_config_with(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path = lookup("NOTES_SERVER_CONFIG").unwrap_or_else(|| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        let contents = fs::read_to_string(&config_path)?;
        return Config::from_yaml(&contents)?.apply_env(lookup);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        let contents = fs::read_to_string("config.yaml")?;
        return Config::from_yaml(&contents)?.apply_env(lookup);
    }

    // Fallback to defaults and environment variables
    tracing::info!("No config file found, using defaults and environment variables");
    Config::default().apply_env(lookup)
}
