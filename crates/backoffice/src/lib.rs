//! Facade crate for the backoffice features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `backoffice` with the `server` feature for the HTTP surface.
//! - Call [`init`] to build the feature slices and register them with the API state.

use bo_domain::config::ApiConfig;
pub use bo_domain as domain;
use bo_domain::registry::InitializedSlice;
pub use bo_kernel as kernel;
use std::borrow::Cow;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use bo_kernel::server::router::system_router;
        pub use bo_tours::server::router as tours_router;
    }
}

/// Feature crates, for callers that need their types directly.
pub mod features {
    pub use bo_membership as membership;
    pub use bo_tours as tours;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "tours",
        "membership",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

#[bo_derive::bo_error]
pub enum BackofficeError {
    #[error("Tours initialization failed{}: {source}", format_context(.context))]
    Tours { source: bo_tours::ToursError, context: Option<Cow<'static, str>> },
}

/// Initialize every feature slice that carries runtime state.
///
/// Membership is a plain library without state and registers nothing.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(config: &ApiConfig) -> Result<Vec<InitializedSlice>, BackofficeError> {
    let mut slices = Vec::new();

    // Tours
    slices.push(features::tours::init(&config.tours).context("tours")?);

    tracing::debug!(slices = slices.len(), "Feature slices initialized");
    Ok(slices)
}
