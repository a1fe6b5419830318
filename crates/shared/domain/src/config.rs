use crate::constants::{CORE_TOURS_DIR, PLUGINS_DIR};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub tours: ToursConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Backoffice onboarding tours.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToursConfig {
    /// When `false` the catalog is always empty and the filesystem is never touched.
    pub enabled: bool,
    pub core_path: PathBuf,
    pub plugins_path: PathBuf,
    /// Exclusion rules, applied in order.
    pub filters: Vec<TourFilterConfig>,
}

/// A single exclusion rule as written in the configuration file.
///
/// A plugin pattern alone hides a whole plugin, a file pattern hides a file,
/// and any rule with an alias hides matching tours within the narrowed scope.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TourFilterConfig {
    pub plugin_name: Option<String>,
    pub tour_file_name: Option<String>,
    pub tour_alias: Option<String>,
    pub match_mode: MatchMode,
}

/// How the patterns of a [`TourFilterConfig`] are interpreted.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive equality.
    #[default]
    Exact,
    /// Unanchored regular expression search.
    Regex,
}

/// Console/file logging knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub env_filter: Option<String>,
    pub directory: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4583, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for ToursConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            core_path: PathBuf::from(CORE_TOURS_DIR),
            plugins_path: PathBuf::from(PLUGINS_DIR),
            filters: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), env_filter: None, directory: None, json: false }
    }
}
