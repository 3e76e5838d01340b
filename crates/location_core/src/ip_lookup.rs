use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared::{
    domain::{Coordinate, Position},
    error::PositionError,
};
use tracing::{debug, warn};
use url::Url;

use crate::{LocationProvider, ProviderConfigError};

/// Network-based lookup against an ip-api.com compatible JSON endpoint.
pub struct IpLookupProvider {
    http: Client,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: Option<String>,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    accuracy: Option<f64>,
}

impl IpLookupProvider {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, ProviderConfigError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProviderConfigError::HttpClient)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn map_transport_error(err: reqwest::Error) -> PositionError {
    if err.is_timeout() {
        PositionError::Timeout(format!("lookup endpoint did not answer in time: {err}"))
    } else {
        PositionError::PositionUnavailable(format!("failed to reach lookup endpoint: {err}"))
    }
}

#[async_trait]
impl LocationProvider for IpLookupProvider {
    fn name(&self) -> &'static str {
        "ip_lookup"
    }

    async fn current_position(&self) -> Result<Position, PositionError> {
        debug!(endpoint = %self.endpoint, "requesting ip-based position");
        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PositionError::PermissionDenied(format!(
                "lookup endpoint refused the request ({status})"
            )));
        }
        if !status.is_success() {
            warn!(%status, "lookup endpoint returned an error status");
            return Err(PositionError::PositionUnavailable(format!(
                "lookup endpoint returned {status}"
            )));
        }

        let body: IpLookupResponse = response.json().await.map_err(|err| {
            if err.is_timeout() {
                map_transport_error(err)
            } else {
                PositionError::PositionUnavailable(format!("invalid lookup payload: {err}"))
            }
        })?;

        if body.status.as_deref() == Some("fail") {
            return Err(PositionError::PositionUnavailable(
                body.message
                    .unwrap_or_else(|| "lookup endpoint reported failure".to_string()),
            ));
        }

        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(PositionError::PositionUnavailable(
                "lookup payload is missing lat/lon".to_string(),
            ));
        };

        let position = Position::now(Coordinate::new(lat, lon)?, self.name());
        Ok(match body.accuracy {
            Some(accuracy) => position.with_accuracy(accuracy),
            None => position,
        })
    }
}

#[cfg(test)]
#[path = "tests/ip_lookup_tests.rs"]
mod tests;
