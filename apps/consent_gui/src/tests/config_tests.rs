use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

fn temp_config(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("geo_consent_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(DEFAULT_CONFIG_FILE);
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_point_at_google_maps_and_ip_lookup() {
    let settings = Settings::default();
    assert_eq!(settings.maps_base_url, "https://www.google.com/maps");
    assert_eq!(settings.location.provider, ProviderKind::IpLookup);
    assert_eq!(settings.log_filter, "info");
    assert!(settings.maps_base_url().is_ok());
}

#[test]
fn parses_partial_file_with_location_table() {
    let path = PathBuf::from("inline.toml");
    let settings = parse_settings_file(
        &path,
        r#"
            log_filter = "debug"

            [location]
            provider = "fixed"
            fixed_latitude = 10.0
            fixed_longitude = 20.0
        "#,
    )
    .expect("parse");

    assert_eq!(settings.log_filter, "debug");
    assert_eq!(settings.location.provider, ProviderKind::Fixed);
    assert_eq!(settings.location.fixed_latitude, Some(10.0));
    assert_eq!(settings.location.fixed_longitude, Some(20.0));
    assert_eq!(settings.maps_base_url, DEFAULT_MAPS_BASE_URL);
}

#[test]
fn malformed_file_is_an_error() {
    let path = PathBuf::from("broken.toml");
    assert!(parse_settings_file(&path, "location = [").is_err());
}

#[test]
fn env_overrides_file_values() {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("APP__LOCATION_PROVIDER", "fixed"),
            ("APP__FIXED_LATITUDE", "-34.6"),
            ("APP__FIXED_LONGITUDE", "-58.4"),
            ("APP__LOOKUP_TIMEOUT_SECS", "3"),
            ("APP__MAPS_BASE_URL", "https://maps.example.test/"),
        ]),
        &mut warnings,
    );

    assert!(warnings.is_empty());
    assert_eq!(settings.location.provider, ProviderKind::Fixed);
    assert_eq!(settings.location.fixed_latitude, Some(-34.6));
    assert_eq!(settings.location.fixed_longitude, Some(-58.4));
    assert_eq!(settings.location.lookup_timeout_secs, 3);
    assert_eq!(settings.maps_base_url, "https://maps.example.test/");
}

#[test]
fn invalid_env_values_are_reported_and_ignored() {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("APP__LOCATION_PROVIDER", "gps"),
            ("APP__FIXED_LATITUDE", "north"),
            ("APP__LOG_FILTER", "  "),
        ]),
        &mut warnings,
    );

    assert_eq!(warnings.len(), 3);
    assert_eq!(settings, Settings::default());
}

#[test]
fn cli_flags_win_over_env() {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();
    apply_env_overrides(
        &mut settings,
        env_from(&[("APP__LOCATION_PROVIDER", "denied"), ("APP__LOG_FILTER", "warn")]),
        &mut warnings,
    );
    let args = Args {
        provider: Some(ProviderKind::Fixed),
        latitude: Some(10.0),
        longitude: Some(20.0),
        log_filter: Some("trace".to_string()),
        ..Args::default()
    };
    apply_cli_overrides(&mut settings, &args);

    assert_eq!(settings.location.provider, ProviderKind::Fixed);
    assert_eq!(settings.location.fixed_latitude, Some(10.0));
    assert_eq!(settings.location.fixed_longitude, Some(20.0));
    assert_eq!(settings.log_filter, "trace");
}

#[test]
fn explicit_config_path_is_loaded() {
    let path = temp_config(
        r#"
            window_title = "Kiosk"
            maps_base_url = "https://maps.example.test/view"

            [location]
            provider = "none"
        "#,
    );
    let args = Args {
        config: Some(path.clone()),
        ..Args::default()
    };

    let loaded = load_settings(&args).expect("load");

    assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
    assert_eq!(loaded.settings.window_title, "Kiosk");
    assert_eq!(loaded.settings.maps_base_url, "https://maps.example.test/view");
    if env::var("APP__LOCATION_PROVIDER").is_err() {
        assert_eq!(loaded.settings.location.provider, ProviderKind::None);
    }

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn missing_explicit_config_path_is_an_error() {
    let args = Args {
        config: Some(env::temp_dir().join("geo_consent_missing_dir").join("nope.toml")),
        ..Args::default()
    };
    assert!(load_settings(&args).is_err());
}

#[test]
fn invalid_maps_base_url_fails_startup() {
    let path = temp_config(r#"maps_base_url = "not a url""#);
    let args = Args {
        config: Some(path.clone()),
        maps_base_url: None,
        ..Args::default()
    };

    let result = load_settings(&args);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
    if env::var("APP__MAPS_BASE_URL").is_err() {
        assert!(result.is_err());
    }
}
