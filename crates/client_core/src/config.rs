use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::{bail, Context};
use url::Url;

pub const SETTINGS_FILE: &str = "booking.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_url: String,
    /// `None` means the platform data dir (see `session::default_session_path`).
    pub session_path: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5004".into(),
            session_path: None,
        }
    }
}

impl ClientSettings {
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = normalize_api_url(&api_url.into());
        self
    }

    fn apply_file(&mut self, raw: &str) {
        let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
            tracing::warn!("ignoring unparseable {SETTINGS_FILE}");
            return;
        };
        if let Some(v) = file_cfg.get("api_url") {
            self.api_url = v.clone();
        }
        if let Some(v) = file_cfg.get("session_path") {
            self.session_path = Some(PathBuf::from(v));
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("BOOKING_API_URL") {
            self.api_url = v;
        }
        if let Some(v) = lookup("APP__API_URL") {
            self.api_url = v;
        }
        if let Some(v) = lookup("BOOKING_SESSION_PATH") {
            self.session_path = Some(PathBuf::from(v));
        }
    }
}

/// Defaults, then `booking.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    let raw_file = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(raw_file.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn load_settings_from(
    raw_file: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();
    if let Some(raw) = raw_file {
        settings.apply_file(raw);
    }
    settings.apply_env(lookup);
    settings.api_url = normalize_api_url(&settings.api_url);
    settings
}

pub fn normalize_api_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Rejects base URLs reqwest could never reach, before any booking is attempted.
pub fn validate_api_url(api_url: &str) -> anyhow::Result<()> {
    let parsed =
        Url::parse(api_url).with_context(|| format!("invalid booking api url '{api_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "booking api url '{api_url}' must use http or https, not '{}'",
            parsed.scheme()
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
