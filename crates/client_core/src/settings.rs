use std::{fs, time::Duration};

use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_DIAGNOSTIC_URL: &str = "https://revdx.vercel.app/api/diagnostic";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub diagnostic_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            diagnostic_url: DEFAULT_DIAGNOSTIC_URL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Total bound on one diagnostic round trip. The upstream analysis is
    /// slow by nature, so the default is generous rather than snappy.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    diagnostic_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, overridden by `revdx.toml` when present, overridden by
/// `REVDX_*` environment variables. Malformed values are ignored rather
/// than fatal so the client still starts out of the box.
pub fn load_settings() -> Settings {
    from_sources(
        fs::read_to_string("revdx.toml").ok().as_deref(),
        std::env::var("REVDX_DIAGNOSTIC_URL").ok().as_deref(),
        std::env::var("REVDX_REQUEST_TIMEOUT_SECS").ok().as_deref(),
    )
}

fn from_sources(
    file: Option<&str>,
    env_url: Option<&str>,
    env_timeout: Option<&str>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<SettingsFile>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.diagnostic_url {
                    settings.diagnostic_url = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = v;
                }
            }
            Err(err) => warn!("ignoring malformed revdx.toml: {err}"),
        }
    }

    if let Some(v) = env_url {
        settings.diagnostic_url = v.to_string();
    }
    if let Some(v) = env_timeout {
        match v.parse::<u64>() {
            Ok(secs) => settings.request_timeout_secs = secs,
            Err(_) => warn!("ignoring non-numeric REVDX_REQUEST_TIMEOUT_SECS: {v}"),
        }
    }

    if Url::parse(&settings.diagnostic_url).is_err() {
        warn!(
            url = %settings.diagnostic_url,
            "configured diagnostic URL is not a valid URL; using the default"
        );
        settings.diagnostic_url = DEFAULT_DIAGNOSTIC_URL.into();
    }

    settings
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
