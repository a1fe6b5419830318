use bo_tours::{
    BackOfficeTourFile, BackOfficeTourFilter, ExactMatcher, RegexMatcher, TourCatalog,
    TourFileSystem, TourFilterCollection, ToursError,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A backoffice root with the core tours directory and plugins root.
struct Fixture {
    root: TempDir,
}

impl Fixture {
    fn new() -> io::Result<Self> {
        Ok(Self { root: tempfile::tempdir()? })
    }

    fn core_dir(&self) -> PathBuf {
        self.root.path().join("config").join("BackOfficeTours")
    }

    fn plugins_dir(&self) -> PathBuf {
        self.root.path().join("App_Plugins")
    }

    fn core(&self, file: &str, aliases: &[&str]) -> io::Result<&Self> {
        write_tours(&self.core_dir(), file, aliases)?;
        Ok(self)
    }

    fn plugin(&self, plugin: &str, file: &str, aliases: &[&str]) -> io::Result<&Self> {
        let dir = self.plugins_dir().join(plugin).join("backoffice").join("tours");
        write_tours(&dir, file, aliases)?;
        Ok(self)
    }

    fn catalog(&self, filters: TourFilterCollection) -> TourCatalog {
        TourCatalog::builder()
            .core_path(self.core_dir())
            .plugins_path(self.plugins_dir())
            .resolver(filters)
            .build()
    }
}

fn write_tours(dir: &Path, file: &str, aliases: &[&str]) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let tours: Vec<serde_json::Value> = aliases
        .iter()
        .map(|alias| serde_json::json!({ "alias": alias, "name": format!("Tour {alias}"), "steps": [] }))
        .collect();
    fs::write(dir.join(format!("{file}.json")), serde_json::to_string(&tours)?)
}

fn aliases(file: &BackOfficeTourFile) -> Vec<&str> {
    file.tours.iter().map(|t| t.alias()).collect()
}

fn summary(files: &[BackOfficeTourFile]) -> Vec<(&str, Option<&str>)> {
    files.iter().map(|f| (f.file_name.as_str(), f.plugin_name.as_deref())).collect()
}

#[test]
fn no_filters_returns_core_and_plugin_files() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("welcome", &["intro", "advanced"])?.plugin("MyPkg", "help", &["help1"])?;

    let files = fx.catalog(TourFilterCollection::new()).get_tours()?;

    assert_eq!(summary(&files), [("help", Some("MyPkg")), ("welcome", None)]);
    assert_eq!(aliases(&files[1]), ["intro", "advanced"]);
    Ok(())
}

#[test]
fn alias_filter_hides_matching_tours_everywhere() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("welcome", &["intro", "advanced"])?.plugin("MyPkg", "more", &["intro", "extra"])?;

    let files = fx
        .catalog(TourFilterCollection::new().with(BackOfficeTourFilter::by_alias("intro")))
        .get_tours()?;

    assert_eq!(summary(&files), [("more", Some("MyPkg")), ("welcome", None)]);
    assert_eq!(aliases(&files[0]), ["extra"]);
    assert_eq!(aliases(&files[1]), ["advanced"]);
    Ok(())
}

#[test]
fn plugin_filter_hides_whole_plugin() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("welcome", &["intro"])?
        .plugin("MyPkg", "help", &["help1"])?
        .plugin("Other", "guide", &["guide1"])?;

    let files = fx
        .catalog(TourFilterCollection::new().with(BackOfficeTourFilter::by_plugin("mypkg")))
        .get_tours()?;

    assert_eq!(summary(&files), [("guide", Some("Other")), ("welcome", None)]);
    Ok(())
}

#[test]
fn files_are_sorted_case_insensitively() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("Zeta", &["z"])?.core("alpha", &["a"])?.plugin("Pkg", "Beta", &["b"])?;

    let files = fx.catalog(TourFilterCollection::new()).get_tours()?;

    let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, ["alpha", "Beta", "Zeta"]);
    Ok(())
}

#[test]
fn file_filter_applies_to_core_and_plugins() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("getting-started", &["gs"])?
        .core("welcome", &["intro"])?
        .plugin("Pkg", "getting-started", &["pkg-gs"])?;

    let files = fx
        .catalog(TourFilterCollection::new().with(BackOfficeTourFilter::by_file("getting-started")))
        .get_tours()?;

    assert_eq!(summary(&files), [("welcome", None)]);
    Ok(())
}

#[test]
fn plugin_scoped_file_filter_leaves_core_alone() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("help", &["core-help"])?.plugin("Pkg", "help", &["pkg-help"])?;

    let filter = BackOfficeTourFilter::default()
        .with_plugin(ExactMatcher::new("Pkg"))
        .with_file(ExactMatcher::new("help"));
    let files = fx.catalog(TourFilterCollection::new().with(filter)).get_tours()?;

    assert_eq!(summary(&files), [("help", None)]);
    Ok(())
}

#[test]
fn plugin_scoped_alias_filter_only_touches_that_plugin() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("welcome", &["intro"])?
        .plugin("Pkg", "help", &["intro", "pkg-only"])?
        .plugin("Other", "guide", &["intro"])?;

    let filter = BackOfficeTourFilter::default()
        .with_plugin(ExactMatcher::new("Pkg"))
        .with_alias(ExactMatcher::new("intro"));
    let files = fx.catalog(TourFilterCollection::new().with(filter)).get_tours()?;

    assert_eq!(
        summary(&files),
        [("guide", Some("Other")), ("help", Some("Pkg")), ("welcome", None)]
    );
    assert_eq!(aliases(&files[1]), ["pkg-only"]);
    assert_eq!(aliases(&files[0]), ["intro"]);
    Ok(())
}

#[test]
fn file_scoped_alias_filter_only_touches_that_file() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("welcome", &["intro", "advanced"])?.core("other", &["intro"])?;

    let filter = BackOfficeTourFilter::default()
        .with_file(ExactMatcher::new("welcome"))
        .with_alias(ExactMatcher::new("intro"));
    let files = fx.catalog(TourFilterCollection::new().with(filter)).get_tours()?;

    assert_eq!(summary(&files), [("other", None), ("welcome", None)]);
    assert_eq!(aliases(&files[0]), ["intro"]);
    assert_eq!(aliases(&files[1]), ["advanced"]);
    Ok(())
}

#[test]
fn regex_alias_filter_searches_unanchored() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("welcome", &["umbIntro", "intro-umb", "content"])?;

    let filter = BackOfficeTourFilter::default().with_alias(RegexMatcher::new("umb")?);
    let files = fx.catalog(TourFilterCollection::new().with(filter)).get_tours()?;

    assert_eq!(aliases(&files[0]), ["content"]);
    Ok(())
}

#[test]
fn file_emptied_by_filters_is_omitted() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("welcome", &["intro"])?.core("other", &["keep"])?;

    let files = fx
        .catalog(TourFilterCollection::new().with(BackOfficeTourFilter::by_alias("intro")))
        .get_tours()?;

    assert_eq!(summary(&files), [("other", None)]);
    Ok(())
}

#[test]
fn empty_tour_file_is_omitted() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("empty", &[])?.core("welcome", &["intro"])?;

    let files = fx.catalog(TourFilterCollection::new()).get_tours()?;

    assert_eq!(summary(&files), [("welcome", None)]);
    Ok(())
}

#[test]
fn tours_keep_file_order_and_payload() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("welcome", &["c", "a", "b"])?;

    let files = fx.catalog(TourFilterCollection::new()).get_tours()?;

    assert_eq!(aliases(&files[0]), ["c", "a", "b"]);
    assert_eq!(files[0].tours[0].data().get("name"), Some(&serde_json::json!("Tour c")));
    Ok(())
}

#[test]
fn missing_directories_yield_nothing() -> TestResult {
    let fx = Fixture::new()?;

    let files = fx.catalog(TourFilterCollection::new()).get_tours()?;

    assert!(files.is_empty());
    Ok(())
}

#[test]
fn plugin_without_tours_directory_is_skipped() -> TestResult {
    let fx = Fixture::new()?;
    fs::create_dir_all(fx.plugins_dir().join("NoTours").join("backoffice"))?;
    fx.plugin("Pkg", "help", &["help1"])?;

    let files = fx.catalog(TourFilterCollection::new()).get_tours()?;

    assert_eq!(summary(&files), [("help", Some("Pkg"))]);
    Ok(())
}

#[test]
fn non_json_files_are_ignored() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("welcome", &["intro"])?;
    fs::write(fx.core_dir().join("readme.txt"), "not a tour")?;

    let files = fx.catalog(TourFilterCollection::new()).get_tours()?;

    assert_eq!(summary(&files), [("welcome", None)]);
    Ok(())
}

#[test]
fn malformed_file_fails_with_its_path() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("welcome", &["intro"])?;
    let broken = fx.core_dir().join("broken.json");
    fs::write(&broken, "{ not json")?;

    let err = fx.catalog(TourFilterCollection::new()).get_tours().expect_err("broken file");

    assert!(matches!(err, ToursError::Parse { .. }));
    let message = err.to_string();
    assert!(message.contains("Error while trying to parse content as tour data"), "{message}");
    assert!(message.contains(&broken.display().to_string()), "{message}");
    Ok(())
}

#[test]
fn filtered_out_file_is_never_parsed() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("welcome", &["intro"])?;
    fs::write(fx.core_dir().join("broken.json"), "{ not json")?;

    let files = fx
        .catalog(TourFilterCollection::new().with(BackOfficeTourFilter::by_file("broken")))
        .get_tours()?;

    assert_eq!(summary(&files), [("welcome", None)]);
    Ok(())
}

/// Serves a single core file whose read always fails.
#[derive(Debug)]
struct UnreadableFileSystem;

impl TourFileSystem for UnreadableFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        path == Path::new("core")
    }

    fn json_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        Ok(vec![dir.join("locked.json")])
    }

    fn subdirectories(&self, _dir: &Path) -> io::Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }

    fn read_to_string(&self, _path: &Path) -> io::Result<String> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"))
    }
}

#[test]
fn unreadable_file_fails_with_its_path() {
    let catalog = TourCatalog::builder()
        .core_path("core")
        .plugins_path("plugins")
        .file_system(UnreadableFileSystem)
        .build();

    let err = catalog.get_tours().expect_err("read fails");

    assert!(matches!(err, ToursError::Io { .. }));
    let message = err.to_string();
    assert!(message.contains("Error while trying to read file"), "{message}");
    assert!(message.contains("locked.json"), "{message}");
}

/// Fails the test on any access.
#[derive(Debug)]
struct UntouchableFileSystem;

impl TourFileSystem for UntouchableFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        panic!("unexpected access to {}", path.display())
    }

    fn json_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        panic!("unexpected listing of {}", dir.display())
    }

    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        panic!("unexpected listing of {}", dir.display())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        panic!("unexpected read of {}", path.display())
    }
}

#[test]
fn disabled_catalog_does_not_touch_the_disk() -> TestResult {
    let catalog = TourCatalog::builder().enabled(false).file_system(UntouchableFileSystem).build();

    assert!(!catalog.is_enabled());
    assert!(catalog.get_tours()?.is_empty());
    Ok(())
}

#[test]
fn catalog_from_config_applies_configured_rules() -> TestResult {
    use bo_kernel::domain::config::{MatchMode, TourFilterConfig, ToursConfig};

    let fx = Fixture::new()?;
    fx.core("welcome", &["intro", "advanced"])?.plugin("Legacy", "old", &["old1"])?;

    let config = ToursConfig {
        enabled: true,
        core_path: fx.core_dir(),
        plugins_path: fx.plugins_dir(),
        filters: vec![
            TourFilterConfig { plugin_name: Some("legacy".to_owned()), ..Default::default() },
            TourFilterConfig {
                tour_alias: Some("^adv".to_owned()),
                match_mode: MatchMode::Regex,
                ..Default::default()
            },
        ],
    };

    let files = TourCatalog::from_config(&config)?.get_tours()?;

    assert_eq!(summary(&files), [("welcome", None)]);
    assert_eq!(aliases(&files[0]), ["intro"]);
    Ok(())
}

#[test]
fn advanced_tour_hidden_from_welcome_file() -> TestResult {
    let fx = Fixture::new()?;
    fx.core("welcome", &["intro", "advanced"])?.plugin("MyPkg", "setup", &["setup"])?;

    let filters = TourFilterCollection::new()
        .with(BackOfficeTourFilter::by_alias("advanced"))
        .with(BackOfficeTourFilter::by_plugin("MyPkg"));
    let files = fx.catalog(filters).get_tours()?;

    assert_eq!(
        serde_json::to_value(&files)?,
        serde_json::json!([{
            "fileName": "welcome",
            "pluginName": null,
            "tours": [{ "alias": "intro", "name": "Tour intro", "steps": [] }]
        }])
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn dangling_non_tour_links_do_not_fail_the_catalog() -> TestResult {
    use std::os::unix::fs::symlink;

    let fx = Fixture::new()?;
    fx.core("welcome", &["intro"])?.plugin("Pkg", "a", &["a1"])?;
    symlink(fx.root.path().join("missing.txt"), fx.core_dir().join("readme.txt"))?;
    symlink(fx.root.path().join("removed-package"), fx.plugins_dir().join("OldPkg"))?;

    let files = fx.catalog(TourFilterCollection::new()).get_tours()?;

    assert_eq!(summary(&files), [("a", Some("Pkg")), ("welcome", None)]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn dangling_tour_link_fails_with_its_path() -> TestResult {
    use std::os::unix::fs::symlink;

    let fx = Fixture::new()?;
    fx.core("welcome", &["intro"])?;
    let stale = fx.core_dir().join("stale.json");
    symlink(fx.root.path().join("missing.json"), &stale)?;

    let err = fx.catalog(TourFilterCollection::new()).get_tours().expect_err("link is broken");

    assert!(matches!(err, ToursError::Io { .. }));
    let message = err.to_string();
    assert!(message.contains("Error while trying to read file"), "{message}");
    assert!(message.contains(&stale.display().to_string()), "{message}");
    Ok(())
}
