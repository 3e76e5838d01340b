//! Location capability: the provider seam, the concrete providers and the
//! map-link builder used by the result screen.

use std::{str::FromStr, sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{Coordinate, Position},
    error::PositionError,
};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

mod ip_lookup;
pub use ip_lookup::IpLookupProvider;

pub const DEFAULT_IP_LOOKUP_URL: &str = "http://ip-api.com/json";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAPS_BASE_URL: &str = "https://www.google.com/maps";
pub const MAP_LINK_PLACEHOLDER: &str = "#";

#[async_trait]
pub trait LocationProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn current_position(&self) -> Result<Position, PositionError>;
}

/// Always reports the coordinate it was configured with.
pub struct FixedLocationProvider {
    coordinate: Coordinate,
}

impl FixedLocationProvider {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn current_position(&self) -> Result<Position, PositionError> {
        Ok(Position::now(self.coordinate, self.name()))
    }
}

/// Answers every request as if the user refused the permission prompt.
pub struct DeniedLocationProvider;

#[async_trait]
impl LocationProvider for DeniedLocationProvider {
    fn name(&self) -> &'static str {
        "denied"
    }

    async fn current_position(&self) -> Result<Position, PositionError> {
        Err(PositionError::PermissionDenied(
            "location access refused by configuration".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    None,
    Fixed,
    #[default]
    IpLookup,
    Denied,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fixed => "fixed",
            Self::IpLookup => "ip_lookup",
            Self::Denied => "denied",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" | "unsupported" => Ok(Self::None),
            "fixed" => Ok(Self::Fixed),
            "ip_lookup" | "ip" => Ok(Self::IpLookup),
            "denied" => Ok(Self::Denied),
            other => Err(format!(
                "unknown location provider '{other}' (expected none, fixed, ip_lookup or denied)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSettings {
    pub provider: ProviderKind,
    pub fixed_latitude: Option<f64>,
    pub fixed_longitude: Option<f64>,
    pub ip_lookup_url: String,
    pub lookup_timeout_secs: u64,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            fixed_latitude: None,
            fixed_longitude: None,
            ip_lookup_url: DEFAULT_IP_LOOKUP_URL.into(),
            lookup_timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderConfigError {
    #[error("fixed provider requires both fixed_latitude and fixed_longitude")]
    MissingFixedCoordinate,
    #[error("fixed provider coordinate rejected: {0}")]
    InvalidFixedCoordinate(#[source] PositionError),
    #[error("invalid ip lookup url '{url}': {source}")]
    InvalidLookupUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client for ip lookup: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Builds the configured provider. `Ok(None)` means geolocation is
/// unsupported in this deployment.
pub fn build_provider(
    settings: &LocationSettings,
) -> Result<Option<Arc<dyn LocationProvider>>, ProviderConfigError> {
    let provider: Arc<dyn LocationProvider> = match settings.provider {
        ProviderKind::None => {
            info!("no location provider configured; geolocation unsupported");
            return Ok(None);
        }
        ProviderKind::Fixed => {
            let (Some(latitude), Some(longitude)) =
                (settings.fixed_latitude, settings.fixed_longitude)
            else {
                return Err(ProviderConfigError::MissingFixedCoordinate);
            };
            let coordinate = Coordinate::new(latitude, longitude)
                .map_err(ProviderConfigError::InvalidFixedCoordinate)?;
            Arc::new(FixedLocationProvider::new(coordinate))
        }
        ProviderKind::IpLookup => {
            let endpoint = Url::parse(&settings.ip_lookup_url).map_err(|source| {
                ProviderConfigError::InvalidLookupUrl {
                    url: settings.ip_lookup_url.clone(),
                    source,
                }
            })?;
            Arc::new(IpLookupProvider::new(
                endpoint,
                Duration::from_secs(settings.lookup_timeout_secs.max(1)),
            )?)
        }
        ProviderKind::Denied => Arc::new(DeniedLocationProvider),
    };
    debug!(provider = provider.name(), "location provider ready");
    Ok(Some(provider))
}

/// Map link for the result screen. Any query already present on `base` is
/// replaced by `q=<lat>,<lon>`.
pub fn map_url(base: &Url, location: Option<Coordinate>) -> String {
    match location {
        Some(coordinate) => {
            let mut url = base.clone();
            url.set_query(Some(&format!("q={coordinate}")));
            url.to_string()
        }
        None => MAP_LINK_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
