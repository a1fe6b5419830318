//! Backoffice onboarding tours.
//!
//! Tours are JSON files shipped by the core (`config/BackOfficeTours/*.json`) and by plugins
//! (`App_Plugins/<plugin>/backoffice/tours/*.json`). [`TourCatalog`] collects them, drops what
//! the configured [`BackOfficeTourFilter`]s exclude and returns the rest ordered by file name.
//!
//! ```rust,no_run
//! use bo_tours::{BackOfficeTourFilter, TourCatalog, TourFilterCollection};
//!
//! let catalog = TourCatalog::builder()
//!     .core_path("config/BackOfficeTours")
//!     .plugins_path("App_Plugins")
//!     .resolver(TourFilterCollection::new().with(BackOfficeTourFilter::by_plugin("Legacy")))
//!     .build();
//!
//! for file in catalog.get_tours()? {
//!     println!("{} ({} tours)", file.file_name, file.tours.len());
//! }
//! # Ok::<(), bo_tours::ToursError>(())
//! ```

mod catalog;
mod error;
mod filter;
mod model;
#[cfg(feature = "server")]
pub mod server;
mod source;

pub use crate::catalog::{TourCatalog, TourCatalogBuilder};
pub use crate::error::{ToursError, ToursErrorExt};
pub use crate::filter::{
    BackOfficeTourFilter, ExactMatcher, RegexMatcher, TourFilterCollection, TourFilterResolver,
    TourMatcher,
};
pub use crate::model::{BackOfficeTour, BackOfficeTourFile};
pub use crate::source::{LocalFileSystem, TourFileSystem};
use bo_kernel::domain::config::ToursConfig;
use bo_kernel::domain::registry::InitializedSlice;

/// Tours feature state.
#[bo_derive::bo_slice]
pub struct Tours {
    pub catalog: TourCatalog,
}

/// Initialize the tours feature from the `[tours]` configuration section.
///
/// # Errors
/// Returns [`ToursError::Filter`] if a configured filter pattern is invalid.
pub fn init(config: &ToursConfig) -> Result<InitializedSlice, ToursError> {
    let catalog = TourCatalog::from_config(config)?;

    tracing::info!(
        enabled = config.enabled,
        filters = config.filters.len(),
        core = %config.core_path.display(),
        plugins = %config.plugins_path.display(),
        "Tours slice initialized"
    );

    Ok(InitializedSlice::new(Tours::new(ToursInner { catalog })))
}
