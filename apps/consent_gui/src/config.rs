use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use location_core::{LocationSettings, ProviderKind, DEFAULT_MAPS_BASE_URL};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "geo_consent.toml";
const CONFIG_DIR_NAME: &str = "geo_consent";

#[derive(Parser, Debug, Default)]
#[command(name = "consent_gui", about = "Consent-gated location capture window")]
pub struct Args {
    /// Path to a TOML settings file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Location provider: none, fixed, ip_lookup or denied.
    #[arg(long)]
    pub provider: Option<ProviderKind>,
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,
    #[arg(long)]
    pub maps_base_url: Option<String>,
    #[arg(long)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub location: LocationSettings,
    pub maps_base_url: String,
    pub log_filter: String,
    pub window_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            location: LocationSettings::default(),
            maps_base_url: DEFAULT_MAPS_BASE_URL.into(),
            log_filter: "info".into(),
            window_title: "Autorización de ubicación".into(),
        }
    }
}

impl Settings {
    pub fn maps_base_url(&self) -> Result<Url> {
        Url::parse(&self.maps_base_url)
            .with_context(|| format!("invalid maps_base_url '{}'", self.maps_base_url))
    }
}

/// Settings plus the non-fatal problems found while layering them. The
/// warnings are logged once tracing is up.
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

pub fn load_settings(args: &Args) -> Result<LoadedSettings> {
    let mut warnings = Vec::new();
    let (mut settings, source) = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            (parse_settings_file(path, &raw)?, Some(path.clone()))
        }
        None => match default_config_candidates()
            .into_iter()
            .find(|candidate| candidate.is_file())
        {
            Some(path) => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file '{}'", path.display()))?;
                (parse_settings_file(&path, &raw)?, Some(path))
            }
            None => (Settings::default(), None),
        },
    };

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok(), &mut warnings);
    apply_cli_overrides(&mut settings, args);
    settings.maps_base_url()?;

    Ok(LoadedSettings {
        settings,
        source,
        warnings,
    })
}

fn default_config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join(CONFIG_DIR_NAME).join(DEFAULT_CONFIG_FILE));
    }
    candidates
}

fn parse_settings_file(path: &Path, raw: &str) -> Result<Settings> {
    toml::from_str::<Settings>(raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))
}

fn read_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    warnings: &mut Vec<String>,
) -> Option<String> {
    match lookup(name) {
        Some(value) if value.trim().is_empty() => {
            warnings.push(format!("{name} was set but empty; ignoring"));
            None
        }
        Some(value) => Some(value.trim().to_string()),
        None => None,
    }
}

fn read_parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    warnings: &mut Vec<String>,
) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    let raw = read_non_empty(lookup, name, warnings)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            warnings.push(format!("{name}='{raw}' ignored: {err}"));
            None
        }
    }
}

pub(crate) fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
    warnings: &mut Vec<String>,
) {
    if let Some(v) = read_parsed::<ProviderKind>(&lookup, "APP__LOCATION_PROVIDER", warnings) {
        settings.location.provider = v;
    }
    if let Some(v) = read_parsed::<f64>(&lookup, "APP__FIXED_LATITUDE", warnings) {
        settings.location.fixed_latitude = Some(v);
    }
    if let Some(v) = read_parsed::<f64>(&lookup, "APP__FIXED_LONGITUDE", warnings) {
        settings.location.fixed_longitude = Some(v);
    }
    if let Some(v) = read_non_empty(&lookup, "APP__IP_LOOKUP_URL", warnings) {
        settings.location.ip_lookup_url = v;
    }
    if let Some(v) = read_parsed::<u64>(&lookup, "APP__LOOKUP_TIMEOUT_SECS", warnings) {
        settings.location.lookup_timeout_secs = v;
    }
    if let Some(v) = read_non_empty(&lookup, "APP__MAPS_BASE_URL", warnings) {
        settings.maps_base_url = v;
    }
    if let Some(v) = read_non_empty(&lookup, "APP__LOG_FILTER", warnings) {
        settings.log_filter = v;
    }
}

pub(crate) fn apply_cli_overrides(settings: &mut Settings, args: &Args) {
    if let Some(provider) = args.provider {
        settings.location.provider = provider;
    }
    if let Some(latitude) = args.latitude {
        settings.location.fixed_latitude = Some(latitude);
    }
    if let Some(longitude) = args.longitude {
        settings.location.fixed_longitude = Some(longitude);
    }
    if let Some(maps_base_url) = &args.maps_base_url {
        settings.maps_base_url = maps_base_url.clone();
    }
    if let Some(log_filter) = &args.log_filter {
        settings.log_filter = log_filter.clone();
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
