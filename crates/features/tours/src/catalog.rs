use crate::error::{ToursError, ToursErrorExt};
use crate::filter::{BackOfficeTourFilter, TourFilterCollection, TourFilterResolver};
use crate::model::{BackOfficeTour, BackOfficeTourFile};
use crate::source::{LocalFileSystem, TourFileSystem};
use bo_kernel::domain::config::ToursConfig;
use bo_kernel::domain::constants::{PLUGIN_BACKOFFICE_DIR, PLUGIN_TOURS_DIR};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Discovers tour files in the core directory and in every plugin, applies the exclusion
/// filters and returns them ordered by file name.
///
/// Every call rescans; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct TourCatalog {
    enabled: bool,
    core_path: PathBuf,
    plugins_path: PathBuf,
    resolver: Arc<dyn TourFilterResolver>,
    fs: Arc<dyn TourFileSystem>,
}

impl TourCatalog {
    pub fn builder() -> TourCatalogBuilder {
        TourCatalogBuilder::default()
    }

    /// Builds a catalog on the local disk from the `[tours]` configuration section.
    ///
    /// # Errors
    /// Returns [`ToursError::Filter`] if a configured pattern is invalid.
    pub fn from_config(config: &ToursConfig) -> Result<Self, ToursError> {
        let filters = TourFilterCollection::from_config(&config.filters)?;
        Ok(Self::builder()
            .enabled(config.enabled)
            .core_path(&config.core_path)
            .plugins_path(&config.plugins_path)
            .resolver(filters)
            .build())
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Scans, filters and sorts all tour files.
    ///
    /// A missing core directory or plugins root contributes nothing. Any tour file that
    /// cannot be read or parsed fails the whole call.
    ///
    /// # Errors
    /// Returns [`ToursError::Io`] or [`ToursError::Parse`] with the offending path as context.
    pub fn get_tours(&self) -> Result<Vec<BackOfficeTourFile>, ToursError> {
        if !self.enabled {
            debug!("Tours are disabled");
            return Ok(Vec::new());
        }

        let filters = self.resolver.filters();
        let alias_only: Vec<&BackOfficeTourFilter> =
            filters.iter().filter(|f| !f.has_plugin() && !f.has_file()).collect();
        let non_plugin: Vec<&BackOfficeTourFilter> =
            filters.iter().filter(|f| !f.has_plugin()).collect();

        let mut result = Vec::new();

        if self.fs.dir_exists(&self.core_path) {
            for path in self.list_json(&self.core_path)? {
                result.extend(self.read_tour_file(&path, &non_plugin, &alias_only, None)?);
            }
        }

        if self.fs.dir_exists(&self.plugins_path) {
            let plugins = self
                .fs
                .subdirectories(&self.plugins_path)
                .context(format!("Error while listing plugins in {}", self.plugins_path.display()))?;

            for plugin_dir in plugins {
                let Some(plugin) = plugin_dir.file_name().and_then(|n| n.to_str()) else {
                    warn!(path = %plugin_dir.display(), "Skipping plugin with a non UTF-8 name");
                    continue;
                };

                let plugin_filters: Vec<&BackOfficeTourFilter> =
                    filters.iter().filter(|f| f.matches_plugin(plugin)).collect();

                if plugin_filters.iter().any(|f| !f.has_file() && !f.has_alias()) {
                    debug!(plugin, "Plugin tours filtered out");
                    continue;
                }

                let combined: Vec<&BackOfficeTourFilter> =
                    non_plugin.iter().chain(&plugin_filters).copied().collect();

                let tours_dir = plugin_dir.join(PLUGIN_BACKOFFICE_DIR).join(PLUGIN_TOURS_DIR);
                if !self.fs.dir_exists(&tours_dir) {
                    continue;
                }
                for path in self.list_json(&tours_dir)? {
                    result.extend(self.read_tour_file(&path, &combined, &alias_only, Some(plugin))?);
                }
            }
        }

        // Directory listings are unordered; this sort is what makes the output deterministic.
        result.sort_by_cached_key(|file| file.file_name.to_lowercase());

        info!(files = result.len(), "Tour catalog built");
        Ok(result)
    }

    fn list_json(&self, dir: &Path) -> Result<Vec<PathBuf>, ToursError> {
        self.fs
            .json_files(dir)
            .context(format!("Error while listing tour files in {}", dir.display()))
    }

    /// Filters and parses one file; `Ok(None)` when the file is filtered out or left empty.
    fn read_tour_file(
        &self,
        path: &Path,
        filters: &[&BackOfficeTourFilter],
        alias_only: &[&BackOfficeTourFilter],
        plugin: Option<&str>,
    ) -> Result<Option<BackOfficeTourFile>, ToursError> {
        let Some(file_name) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!(path = %path.display(), "Skipping tour file with a non UTF-8 name");
            return Ok(None);
        };

        let file_filters: Vec<&BackOfficeTourFilter> =
            filters.iter().copied().filter(|f| f.matches_file(file_name)).collect();

        if file_filters.iter().any(|f| !f.has_alias()) {
            debug!(file = file_name, plugin, "Tour file filtered out");
            return Ok(None);
        }

        // Alias rules apply everywhere (alias only) or within the scope their other
        // fields select: the plugin already matched, and the file when one is given.
        let scoped = filters.iter().copied().filter(|f| {
            let unscoped = !f.has_plugin() && !f.has_file();
            f.has_alias() && !unscoped && (!f.has_file() || f.matches_file(file_name))
        });
        let alias_filters: Vec<&BackOfficeTourFilter> =
            alias_only.iter().copied().chain(scoped).collect();

        let contents = self
            .fs
            .read_to_string(path)
            .context(format!("Error while trying to read file: {}", path.display()))?;
        let tours: Vec<BackOfficeTour> = serde_json::from_str(&contents)
            .context(format!("Error while trying to parse content as tour data: {}", path.display()))?;

        let total = tours.len();
        let tours: Vec<BackOfficeTour> = tours
            .into_iter()
            .filter(|tour| !alias_filters.iter().any(|f| f.matches_alias(tour.alias())))
            .collect();

        debug!(file = file_name, plugin, total, kept = tours.len(), "Parsed tour file");

        if tours.is_empty() {
            return Ok(None);
        }

        Ok(Some(BackOfficeTourFile {
            file_name: file_name.to_owned(),
            plugin_name: plugin.map(str::to_owned),
            tours,
        }))
    }
}

/// Builder for [`TourCatalog`]; defaults to an enabled catalog over the local disk with no filters.
#[derive(Debug)]
#[must_use = "builders do nothing unless you call .build()"]
pub struct TourCatalogBuilder {
    enabled: bool,
    core_path: PathBuf,
    plugins_path: PathBuf,
    resolver: Arc<dyn TourFilterResolver>,
    fs: Arc<dyn TourFileSystem>,
}

impl Default for TourCatalogBuilder {
    fn default() -> Self {
        let defaults = ToursConfig::default();
        Self {
            enabled: defaults.enabled,
            core_path: defaults.core_path,
            plugins_path: defaults.plugins_path,
            resolver: Arc::new(TourFilterCollection::new()),
            fs: Arc::new(LocalFileSystem),
        }
    }
}

impl TourCatalogBuilder {
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn core_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.core_path = path.into();
        self
    }

    pub fn plugins_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.plugins_path = path.into();
        self
    }

    pub fn resolver(mut self, resolver: impl TourFilterResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn file_system(mut self, fs: impl TourFileSystem + 'static) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    pub fn build(self) -> TourCatalog {
        TourCatalog {
            enabled: self.enabled,
            core_path: self.core_path,
            plugins_path: self.plugins_path,
            resolver: self.resolver,
            fs: self.fs,
        }
    }
}
