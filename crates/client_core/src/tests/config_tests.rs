use super::*;

#[test]
fn defaults_point_at_local_booking_service() {
    let settings = load_settings_from(None, |_| None);
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn file_values_apply_and_env_wins() {
    let raw = r#"
api_url = "https://file.example/"
session_path = "/tmp/from-file.json"
"#;
    let settings = load_settings_from(Some(raw), |key| match key {
        "APP__API_URL" => Some("https://env.example/api/".to_string()),
        _ => None,
    });

    assert_eq!(settings.api_url, "https://env.example/api");
    assert_eq!(
        settings.session_path,
        Some(PathBuf::from("/tmp/from-file.json"))
    );
}

#[test]
fn unparseable_file_falls_back_to_defaults() {
    let settings = load_settings_from(Some("api_url = ["), |_| None);
    assert_eq!(settings.api_url, ClientSettings::default().api_url);
}

#[test]
fn trailing_slashes_are_trimmed() {
    assert_eq!(
        normalize_api_url(" http://localhost:5004// "),
        "http://localhost:5004"
    );
}

#[test]
fn non_http_urls_are_rejected() {
    assert!(validate_api_url("http://localhost:5004").is_ok());
    assert!(validate_api_url("ftp://localhost").is_err());
    assert!(validate_api_url("not a url").is_err());
}
