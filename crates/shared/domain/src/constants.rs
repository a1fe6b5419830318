//! Shared string constants (OpenAPI tags, conventional paths).

/// `OpenAPI` tag for infrastructure endpoints.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the onboarding tours endpoints.
pub const TOURS_TAG: &str = "Tours";

/// Default directory holding the core tour files.
pub const CORE_TOURS_DIR: &str = "config/BackOfficeTours";
/// Default root directory holding one subdirectory per plugin.
pub const PLUGINS_DIR: &str = "App_Plugins";
/// Directory inside a plugin that holds backoffice assets.
pub const PLUGIN_BACKOFFICE_DIR: &str = "backoffice";
/// Directory inside [`PLUGIN_BACKOFFICE_DIR`] that holds tour files.
pub const PLUGIN_TOURS_DIR: &str = "tours";
/// Extension of tour definition files.
pub const TOUR_FILE_EXTENSION: &str = "json";
