use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default configuration file stem, resolved against the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "backoffice";
/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "BACKOFFICE";

/// Custom error type for config loading.
#[bo_derive::bo_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file with environment overrides on top.
///
/// Layering:
/// 1. **Base File**: `path` (defaults to [`DEFAULT_CONFIG_PATH`]); the extension is optional and
///    any format supported by the `config` crate works. A missing file is not an error, the
///    target type's defaults apply instead.
/// 2. **Environment Overrides**: variables prefixed with `BACKOFFICE__`, nested with double
///    underscores (`BACKOFFICE__TOURS__ENABLED=false` maps to `tours.enabled`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is malformed or does not match `T`.
///
/// # Example
/// ```rust
/// use bo_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), |p| p.as_ref().to_path_buf());

    if has_config_file(&effective_path) {
        info!("Loading config from {}", effective_path.display());
    } else {
        warn!("Config file {} not found, using defaults", effective_path.display());
    }

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

/// `config` resolves extension-less paths by probing known formats.
fn has_config_file(path: &Path) -> bool {
    if path.is_file() {
        return true;
    }
    ["toml", "json", "yaml", "yml", "ini", "ron", "json5"]
        .iter()
        .any(|ext| path.with_extension(ext).is_file())
}
