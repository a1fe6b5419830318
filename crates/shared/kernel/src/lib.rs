//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it hosts config loading, string cleaning and the HTTP state.
//!
//! ## Alias cleaning
//! ```rust
//! use bo_kernel::strings::{CleanMode, DefaultStringCleaner, StringCleaner};
//!
//! let alias = DefaultStringCleaner.clean("Site Editors", CleanMode::ALIAS | CleanMode::CAMEL_CASE);
//! assert_eq!(alias, "siteEditors");
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use bo_kernel::config::load_config;
//! let cfg: bo_kernel::domain::config::ApiConfig = load_config(Some("backoffice")).unwrap();
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;
pub mod strings;

pub use bo_domain as domain;
