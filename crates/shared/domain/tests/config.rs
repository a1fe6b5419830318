use bo_domain::config::{ApiConfig, LoggingConfig, MatchMode, ServerConfig, ToursConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());

    let tours = ToursConfig::default();
    assert!(tours.enabled);
    assert_eq!(tours.core_path, std::path::PathBuf::from("config/BackOfficeTours"));
    assert_eq!(tours.plugins_path, std::path::PathBuf::from("App_Plugins"));
    assert!(tours.filters.is_empty());

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.directory.is_none());
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "tours": {
            "enabled": false,
            "core_path": "/srv/tours",
            "filters": [
                { "plugin_name": "MyPkg" },
                { "tour_alias": "^umb", "match_mode": "regex" }
            ]
        }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert!(!cfg.tours.enabled);
    assert_eq!(cfg.tours.core_path, std::path::PathBuf::from("/srv/tours"));
    assert_eq!(cfg.tours.plugins_path, std::path::PathBuf::from("App_Plugins"));

    let filters = &cfg.tours.filters;
    assert_eq!(filters.len(), 2);
    assert_eq!(filters[0].plugin_name.as_deref(), Some("MyPkg"));
    assert_eq!(filters[0].match_mode, MatchMode::Exact);
    assert!(filters[0].tour_alias.is_none());
    assert_eq!(filters[1].tour_alias.as_deref(), Some("^umb"));
    assert_eq!(filters[1].match_mode, MatchMode::Regex);
}

#[test]
fn mutating_a_clone_leaves_the_original_untouched() {
    let original = ApiConfig::default();
    let mut copy = original.clone();
    copy.tours.enabled = false;

    assert!(original.tours.enabled);
    assert!(!copy.tours.enabled);
}
