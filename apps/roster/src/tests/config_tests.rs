use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_point_at_local_backend() {
    let settings = Settings::default();
    assert_eq!(settings.api_url, "http://localhost:3000");
    assert_eq!(settings.currency().symbol, "₹");
    assert_eq!(settings.request_timeout(), Duration::from_secs(10));
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
api_url = "http://hr.internal:8080/api"
currency_symbol = "$"
group_thousands = true
request_timeout_secs = 3
"#,
    )
    .expect("valid file");

    assert_eq!(settings.api_url, "http://hr.internal:8080/api");
    assert_eq!(settings.currency_symbol, "$");
    assert!(settings.group_thousands);
    assert_eq!(settings.request_timeout_secs, 3);
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn string_typed_file_values_are_accepted() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        "group_thousands = \"yes\"\nrequest_timeout_secs = \"7\"\n",
    )
    .expect("valid file");
    assert!(settings.group_thousands);
    assert_eq!(settings.request_timeout_secs, 7);
}

#[test]
fn malformed_file_values_are_errors() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "request_timeout_secs = -5").is_err());
    assert!(apply_file(&mut settings, "group_thousands = \"sometimes\"").is_err());
    assert!(apply_file(&mut settings, "api_url = ").is_err());
}

#[test]
fn app_prefixed_env_wins_over_short_names() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("ROSTER_API_URL", "http://short:1"),
            ("APP__API_URL", "http://long:2"),
            ("ROSTER_CURRENCY", "€"),
            ("APP__GROUP_THOUSANDS", "on"),
            ("APP__REQUEST_TIMEOUT_SECS", "not-a-number"),
            ("APP__LOG_FILTER", "client_core=debug"),
        ]),
    );
    assert_eq!(settings.api_url, "http://long:2");
    assert_eq!(settings.currency_symbol, "€");
    assert!(settings.group_thousands);
    assert_eq!(settings.request_timeout_secs, 10);
    assert_eq!(settings.log_filter, "client_core=debug");
}

#[test]
fn zero_timeout_is_clamped() {
    let settings = Settings {
        request_timeout_secs: 0,
        ..Settings::default()
    };
    assert_eq!(settings.request_timeout(), Duration::from_secs(1));
}

#[test]
fn explicit_config_path_must_exist() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let missing = env::temp_dir().join(format!("roster_missing_{suffix}.toml"));
    let err = load_settings(Some(&missing)).expect_err("missing file");
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn explicit_config_path_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("roster_config_{suffix}.toml"));
    fs::write(&path, "currency_symbol = \"Rs \"\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.currency_symbol, "Rs ");

    fs::remove_file(path).expect("cleanup");
}
