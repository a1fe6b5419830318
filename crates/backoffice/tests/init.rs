use backoffice::domain::config::{ApiConfig, MatchMode, TourFilterConfig};
use backoffice::features::tours::Tours;
use backoffice::{BackofficeError, init};

#[test]
fn init_registers_the_tours_slice() -> Result<(), BackofficeError> {
    let slices = init(&ApiConfig::default())?;

    assert_eq!(slices.len(), 1);
    assert!(slices[0].downcast_ref::<Tours>().is_some());
    Ok(())
}

#[test]
fn invalid_filter_pattern_fails_init() {
    let mut config = ApiConfig::default();
    config.tours.filters.push(TourFilterConfig {
        tour_alias: Some("[broken".to_owned()),
        match_mode: MatchMode::Regex,
        ..Default::default()
    });

    let err = init(&config).expect_err("regex is invalid");

    assert!(matches!(err, BackofficeError::Tours { .. }));
    assert!(err.to_string().contains("tours"), "{err}");
}

#[test]
fn configured_slice_serves_the_configured_directory() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempfile::tempdir()?;
    let core = root.path().join("tours");
    std::fs::create_dir_all(&core)?;
    std::fs::write(core.join("welcome.json"), r#"[{ "alias": "intro" }]"#)?;

    let mut config = ApiConfig::default();
    config.tours.core_path = core;
    config.tours.plugins_path = root.path().join("plugins");

    let slices = init(&config)?;
    let tours = slices[0].downcast_ref::<Tours>().ok_or("tours slice missing")?;
    let files = tours.catalog.get_tours()?;

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name, "welcome");
    Ok(())
}

#[test]
fn membership_is_always_compiled_in() {
    assert!(backoffice::features::is_enabled("membership"));
    assert!(!backoffice::features::is_enabled("licensing"));
}
