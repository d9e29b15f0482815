use crate::session::SessionStore;
use crate::store::Store;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const CONFIG_FILE: &str = "lostfound.toml";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: i64,
    #[serde(default = "default_admin_user")]
    pub default_admin_user: String,
    #[serde(default = "default_admin_password")]
    pub default_admin_password: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_session_ttl() -> i64 {
    480
}

fn default_admin_user() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: default_data_dir(),
            session_ttl_minutes: default_session_ttl(),
            default_admin_user: default_admin_user(),
            default_admin_password: default_admin_password(),
        }
    }
}

impl AppConfig {
    /// Load from the given toml file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }
}

/// Shared across all request handlers. The store mutex serializes the
/// read-rewrite cycles on the flat files within this process.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Mutex<Store>,
    pub sessions: SessionStore,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig) -> Result<SharedState> {
        let store = Store::open(
            Path::new(&config.data_dir),
            &config.default_admin_user,
            &config.default_admin_password,
        )?;
        let sessions = SessionStore::new(config.session_ttl_minutes);
        Ok(Arc::new(Self {
            config: Arc::new(config),
            store: Mutex::new(store),
            sessions,
        }))
    }
}
