//! Exclusion rules for tours.
//!
//! A [`BackOfficeTourFilter`] narrows its scope with the fields it sets:
//!
//! | plugin | file | alias | effect |
//! |:------:|:----:|:-----:|--------|
//! | ✓ | | | the whole plugin is hidden |
//! | any | ✓ | | the whole file is hidden |
//! | any | any | ✓ | matching tours are hidden inside the narrowed scope |
//!
//! Filters only ever remove tours; there is no allow-list.

use crate::error::{ToursError, ToursErrorExt};
use bo_kernel::domain::config::{MatchMode, TourFilterConfig};
use regex::Regex;
use std::fmt::Debug;
use std::sync::Arc;

/// A predicate over plugin names, file names or tour aliases.
pub trait TourMatcher: Debug + Send + Sync {
    fn is_match(&self, candidate: &str) -> bool;
}

/// Case-insensitive string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactMatcher {
    expected: String,
}

impl ExactMatcher {
    pub fn new(expected: impl AsRef<str>) -> Self {
        Self { expected: expected.as_ref().to_lowercase() }
    }
}

impl TourMatcher for ExactMatcher {
    fn is_match(&self, candidate: &str) -> bool {
        candidate.to_lowercase() == self.expected
    }
}

/// Unanchored regular expression search; use `^...$` for a full match.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// # Errors
    /// Returns the compile error for an invalid pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self { regex: Regex::new(pattern)? })
    }
}

impl From<Regex> for RegexMatcher {
    fn from(regex: Regex) -> Self {
        Self { regex }
    }
}

impl TourMatcher for RegexMatcher {
    fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

/// A single exclusion rule. Unset fields do not narrow the scope.
#[derive(Debug, Clone, Default)]
pub struct BackOfficeTourFilter {
    plugin_name: Option<Arc<dyn TourMatcher>>,
    tour_file_name: Option<Arc<dyn TourMatcher>>,
    tour_alias: Option<Arc<dyn TourMatcher>>,
}

impl BackOfficeTourFilter {
    /// Hides every tour of the plugins named `plugin` (exact match).
    pub fn by_plugin(plugin: &str) -> Self {
        Self::default().with_plugin(ExactMatcher::new(plugin))
    }

    /// Hides every file named `file` (exact match, without extension), in core and plugins.
    pub fn by_file(file: &str) -> Self {
        Self::default().with_file(ExactMatcher::new(file))
    }

    /// Hides every tour aliased `alias` (exact match), everywhere.
    pub fn by_alias(alias: &str) -> Self {
        Self::default().with_alias(ExactMatcher::new(alias))
    }

    #[must_use]
    pub fn with_plugin(mut self, matcher: impl TourMatcher + 'static) -> Self {
        self.plugin_name = Some(Arc::new(matcher));
        self
    }

    #[must_use]
    pub fn with_file(mut self, matcher: impl TourMatcher + 'static) -> Self {
        self.tour_file_name = Some(Arc::new(matcher));
        self
    }

    #[must_use]
    pub fn with_alias(mut self, matcher: impl TourMatcher + 'static) -> Self {
        self.tour_alias = Some(Arc::new(matcher));
        self
    }

    /// Compiles a configuration rule.
    ///
    /// # Errors
    /// Returns [`ToursError::Filter`] if a pattern is an invalid regular expression.
    pub fn from_config(rule: &TourFilterConfig) -> Result<Self, ToursError> {
        Ok(Self {
            plugin_name: compile(rule.plugin_name.as_deref(), rule.match_mode)?,
            tour_file_name: compile(rule.tour_file_name.as_deref(), rule.match_mode)?,
            tour_alias: compile(rule.tour_alias.as_deref(), rule.match_mode)?,
        })
    }

    #[must_use]
    pub const fn has_plugin(&self) -> bool {
        self.plugin_name.is_some()
    }

    #[must_use]
    pub const fn has_file(&self) -> bool {
        self.tour_file_name.is_some()
    }

    #[must_use]
    pub const fn has_alias(&self) -> bool {
        self.tour_alias.is_some()
    }

    /// `true` when a plugin pattern is set and matches.
    #[must_use]
    pub fn matches_plugin(&self, plugin: &str) -> bool {
        self.plugin_name.as_ref().is_some_and(|m| m.is_match(plugin))
    }

    /// `true` when a file pattern is set and matches.
    #[must_use]
    pub fn matches_file(&self, file: &str) -> bool {
        self.tour_file_name.as_ref().is_some_and(|m| m.is_match(file))
    }

    /// `true` when an alias pattern is set and matches.
    #[must_use]
    pub fn matches_alias(&self, alias: &str) -> bool {
        self.tour_alias.as_ref().is_some_and(|m| m.is_match(alias))
    }
}

fn compile(
    pattern: Option<&str>,
    mode: MatchMode,
) -> Result<Option<Arc<dyn TourMatcher>>, ToursError> {
    let Some(pattern) = pattern else {
        return Ok(None);
    };

    let matcher: Arc<dyn TourMatcher> = match mode {
        MatchMode::Exact => Arc::new(ExactMatcher::new(pattern)),
        MatchMode::Regex => Arc::new(
            RegexMatcher::new(pattern).context(format!("Invalid tour filter pattern '{pattern}'"))?,
        ),
    };
    Ok(Some(matcher))
}

/// Supplies the ordered list of exclusion rules for a catalog build.
pub trait TourFilterResolver: Debug + Send + Sync {
    fn filters(&self) -> Vec<BackOfficeTourFilter>;
}

/// An ordered, appendable set of filters.
#[derive(Debug, Clone, Default)]
pub struct TourFilterCollection {
    filters: Vec<BackOfficeTourFilter>,
}

impl TourFilterCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles every configured rule, in order.
    ///
    /// # Errors
    /// Returns [`ToursError::Filter`] for the first invalid regular expression.
    pub fn from_config(rules: &[TourFilterConfig]) -> Result<Self, ToursError> {
        let filters =
            rules.iter().map(BackOfficeTourFilter::from_config).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { filters })
    }

    pub fn add(&mut self, filter: BackOfficeTourFilter) -> &mut Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn with(mut self, filter: BackOfficeTourFilter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FromIterator<BackOfficeTourFilter> for TourFilterCollection {
    fn from_iter<I: IntoIterator<Item = BackOfficeTourFilter>>(iter: I) -> Self {
        Self { filters: iter.into_iter().collect() }
    }
}

impl TourFilterResolver for TourFilterCollection {
    fn filters(&self) -> Vec<BackOfficeTourFilter> {
        self.filters.clone()
    }
}
