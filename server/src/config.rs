//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or through the environment. The
//! production switch (`PROD=true`) selects the public base URL and a TLS
//! connection to Redis, mirroring how the service is deployed.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use steer_diagnose::{DiagnosticReporter, NoopReporter, OpenAiConfig, OpenAiReporter};
use steer_store::{ConditionStore, MemoryConditionStore, RedisConditionStore, SqliteConditionStore};
use thiserror::Error;
use tracing::info;

const REDIS_PORT: u16 = 6379;
const CHATGPT_ORIGIN: &str = "https://chat.openai.com";

/// Errors in resolving derived settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--base-url (PROD_URL) is required in production")]
    MissingBaseUrl,

    #[error("--redis-host (REDIS_HOST) is required in production")]
    MissingRedisHost,

    #[error("diagnostic reporter: {0}")]
    Reporter(#[from] steer_diagnose::DiagnoseError),
}

/// Which condition store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Memory,
    Sqlite,
    Redis,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "steer-server")]
#[command(about = "Stores per-user string conditions and validates candidates against them")]
#[command(version)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "STEER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// HTTP port
    #[arg(short, long, env = "STEER_PORT", default_value_t = 8001)]
    pub port: u16,

    /// Run with production settings
    #[arg(long, env = "PROD")]
    pub prod: bool,

    /// Public base URL used in issued links
    #[arg(long, env = "PROD_URL")]
    pub base_url: Option<String>,

    /// Condition store backend
    #[arg(long, env = "STEER_STORE", value_enum, default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    /// SQLite database file (sqlite backend)
    #[arg(long, env = "STEER_SQLITE_PATH", default_value = "steer.db")]
    pub sqlite_path: PathBuf,

    /// Full Redis URL; overrides the host/username/password options
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,

    #[arg(long, env = "REDIS_HOST")]
    pub redis_host: Option<String>,

    #[arg(long, env = "REDIS_USERNAME")]
    pub redis_username: Option<String>,

    #[arg(long, env = "REDIS_PW", hide_env_values = true)]
    pub redis_password: Option<String>,

    /// Prefix prepended to every storage key
    #[arg(long, env = "STEER_KEY_PREFIX")]
    pub key_prefix: Option<String>,

    /// Plugin manifest served at /.well-known/ai-plugin.json
    #[arg(long, env = "STEER_MANIFEST", default_value = ".well-known/ai-plugin.json")]
    pub manifest: PathBuf,

    /// Allowed CORS origin (repeatable)
    #[arg(long = "cors-origin", env = "STEER_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Enables failure diagnosis through OpenAI
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "STEER_DIAGNOSE_MODEL", default_value = "gpt-4")]
    pub diagnose_model: String,

    #[arg(long, env = "STEER_DIAGNOSE_TIMEOUT_SECS", default_value_t = 60)]
    pub diagnose_timeout_secs: u64,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Base URL for issued links.
    pub fn base_url(&self) -> Result<String, ConfigError> {
        match (&self.base_url, self.prod) {
            (Some(url), _) => Ok(url.trim_end_matches('/').to_string()),
            (None, true) => Err(ConfigError::MissingBaseUrl),
            (None, false) => Ok(format!("http://localhost:{}", self.port)),
        }
    }

    /// Redis connection URL, built from parts unless given whole.
    ///
    /// Production connections use TLS (`rediss://`).
    pub fn redis_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = &self.redis_url {
            return Ok(url.clone());
        }

        let host = match (&self.redis_host, self.prod) {
            (Some(host), _) => host.as_str(),
            (None, true) => return Err(ConfigError::MissingRedisHost),
            (None, false) => "localhost",
        };
        let scheme = if self.prod { "rediss" } else { "redis" };

        let userinfo = match (&self.redis_username, &self.redis_password) {
            (None, None) => String::new(),
            (user, pass) => format!(
                "{}:{}@",
                urlencoding::encode(user.as_deref().unwrap_or_default()),
                urlencoding::encode(pass.as_deref().unwrap_or_default()),
            ),
        };

        Ok(format!("{scheme}://{userinfo}{host}:{REDIS_PORT}/0"))
    }

    /// Allowed CORS origins, defaulting to ChatGPT and the local server.
    pub fn cors_origins(&self) -> Vec<String> {
        if self.cors_origins.is_empty() {
            vec![
                CHATGPT_ORIGIN.to_string(),
                format!("http://localhost:{}", self.port),
            ]
        } else {
            self.cors_origins.clone()
        }
    }

    pub fn key_prefix(&self) -> &str {
        self.key_prefix.as_deref().unwrap_or_default()
    }

    /// OpenAI settings when an API key is configured.
    pub fn diagnose_config(&self) -> Option<OpenAiConfig> {
        let api_key = self.openai_api_key.as_ref().filter(|k| !k.trim().is_empty())?;
        Some(OpenAiConfig {
            api_key: api_key.clone(),
            model: self.diagnose_model.clone(),
            timeout: Duration::from_secs(self.diagnose_timeout_secs),
            ..Default::default()
        })
    }

    /// Builds the diagnostic reporter: OpenAI when configured, otherwise none.
    pub fn reporter(&self) -> Result<Arc<dyn DiagnosticReporter>, ConfigError> {
        match self.diagnose_config() {
            Some(cfg) => {
                info!(model = %cfg.model, "failure diagnosis enabled");
                Ok(Arc::new(OpenAiReporter::new(cfg)?))
            }
            None => Ok(Arc::new(NoopReporter)),
        }
    }

    /// Opens the configured condition store.
    pub async fn open_store(&self) -> anyhow::Result<Arc<dyn ConditionStore>> {
        let prefix = self.key_prefix().to_string();
        let store: Arc<dyn ConditionStore> = match self.store {
            StoreKind::Memory => Arc::new(MemoryConditionStore::new().with_prefix(prefix)),
            StoreKind::Sqlite => {
                Arc::new(SqliteConditionStore::open(&self.sqlite_path)?.with_prefix(prefix))
            }
            StoreKind::Redis => {
                let url = self.redis_url()?;
                Arc::new(RedisConditionStore::connect(&url).await?.with_prefix(prefix))
            }
        };
        info!(backend = store.backend(), "condition store ready");
        Ok(store)
    }
}
