// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Endpoint and behaviour settings loaded from JSON with environment overrides.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::contact::ValidationPolicy;
use crate::ui::components::toasts::DEFAULT_TOAST_LIFETIME;

pub const DEFAULT_CONFIG_PATH: &str = "config/contact.json";
/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONTACT_CONFIG";
/// Overrides the configured endpoint.
pub const ENDPOINT_ENV: &str = "FOLIO_CONTACT_ENDPOINT";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/contact";

const TOAST_SECONDS_RANGE: (f32, f32) = (1.0, 60.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Message-delivery endpoint receiving the multipart POST.
    pub endpoint: String,
    pub validation: ValidationPolicy,
    /// Seconds a notification stays on screen.
    pub toast_seconds: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            validation: ValidationPolicy::default(),
            toast_seconds: DEFAULT_TOAST_LIFETIME.as_secs_f32(),
        }
    }
}

impl AppConfig {
    /// Toast lifetime clamped to a sane range.
    pub fn toast_lifetime(&self) -> Duration {
        if !self.toast_seconds.is_finite() {
            return DEFAULT_TOAST_LIFETIME;
        }
        let (min, max) = TOAST_SECONDS_RANGE;
        Duration::from_secs_f32(self.toast_seconds.clamp(min, max))
    }
}

/// Load configuration from the file named by `FOLIO_CONTACT_CONFIG` (or the default path),
/// then apply `FOLIO_CONTACT_ENDPOINT`.
pub fn load() -> AppConfig {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(Path::new(&path));
    apply_endpoint_override(config, std::env::var(ENDPOINT_ENV).ok())
}

/// Read a JSON config file, falling back to defaults when it is missing or malformed.
pub fn load_config(path: &Path) -> AppConfig {
    let mut config = match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    };

    match checked_endpoint(&config.endpoint) {
        Ok(endpoint) => config.endpoint = endpoint,
        Err(err) => {
            log::warn!("{err:#}; using {DEFAULT_ENDPOINT}");
            config.endpoint = DEFAULT_ENDPOINT.to_string();
        }
    }
    config
}

/// Replace the endpoint when `endpoint` is a valid http(s) URL.
pub fn apply_endpoint_override(mut config: AppConfig, endpoint: Option<String>) -> AppConfig {
    let Some(raw) = endpoint else {
        return config;
    };
    match checked_endpoint(&raw) {
        Ok(endpoint) => {
            log::info!("Endpoint overridden by {ENDPOINT_ENV}");
            config.endpoint = endpoint;
        }
        Err(err) => log::warn!("Ignoring {ENDPOINT_ENV}: {err:#}"),
    }
    config
}

fn checked_endpoint(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let url = Url::parse(raw).with_context(|| format!("Invalid endpoint URL {raw:?}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Endpoint {raw:?} must use http or https");
    }
    Ok(raw.to_string())
}
