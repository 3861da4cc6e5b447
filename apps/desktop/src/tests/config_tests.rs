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
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_point_at_local_service() {
    let settings = settings_from_sources(None, env_from(&[])).expect("defaults");

    assert_eq!(settings, Settings::default());
    assert_eq!(
        settings.api_url().expect("api url").as_str(),
        "http://localhost:3000/api"
    );
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn file_values_override_defaults() {
    let file = r#"
        api_url = "http://captions.internal:8080/api"
        asset_url = "http://captions.internal:8080/media/"
        request_timeout_secs = 5
        log = "debug"
    "#;

    let settings = settings_from_sources(Some(file), env_from(&[])).expect("file");

    assert_eq!(settings.api_url, "http://captions.internal:8080/api");
    assert_eq!(settings.asset_base_url, "http://captions.internal:8080/media/");
    assert_eq!(settings.request_timeout_secs, 5);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn environment_overrides_file_and_app_prefix_wins() {
    let file = r#"api_url = "http://from-file/api""#;
    let env = env_from(&[
        ("CAPTIONER_API_URL", "http://from-env/api"),
        ("APP__API_URL", "http://from-app-env/api"),
        ("CAPTIONER_ASSET_URL", "http://assets/"),
        ("APP__REQUEST_TIMEOUT_SECS", "0"),
        ("RUST_LOG", "warn"),
    ]);

    let settings = settings_from_sources(Some(file), env).expect("env");

    assert_eq!(settings.api_url, "http://from-app-env/api");
    assert_eq!(settings.asset_base_url, "http://assets/");
    assert_eq!(settings.request_timeout(), None);
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn timeout_accepts_quoted_numbers_and_rejects_garbage() {
    let settings = settings_from_sources(Some(r#"request_timeout_secs = "12""#), env_from(&[]))
        .expect("quoted");
    assert_eq!(settings.request_timeout_secs, 12);

    assert!(settings_from_sources(Some("request_timeout_secs = -1"), env_from(&[])).is_err());
    assert!(settings_from_sources(
        None,
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")])
    )
    .is_err());
}

#[test]
fn rejects_malformed_file_and_non_string_urls() {
    assert!(settings_from_sources(Some("api_url = "), env_from(&[])).is_err());
    assert!(settings_from_sources(Some("api_url = 3"), env_from(&[])).is_err());
}

#[test]
fn invalid_url_is_reported_on_use() {
    let settings = settings_from_sources(None, env_from(&[("APP__API_URL", "not a url")]))
        .expect("settings");

    let err = settings.api_url().expect_err("invalid");
    assert!(err.to_string().contains("not a url"));
}

#[test]
fn explicit_config_path_must_exist() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let missing = env::temp_dir().join(format!("captioner_missing_{suffix}.toml"));

    assert!(load_settings(Some(&missing)).is_err());
}

#[test]
fn explicit_config_path_is_read() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("captioner_config_{suffix}.toml"));
    fs::write(&path, "asset_url = \"http://images.local/\"\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.asset_base_url, "http://images.local/");

    fs::remove_file(path).expect("cleanup");
}
