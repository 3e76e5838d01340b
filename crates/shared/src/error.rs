use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unsupported,
    InvalidCoordinate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("location permission denied: {0}")]
    PermissionDenied(String),
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
    #[error("location request timed out: {0}")]
    Timeout(String),
    #[error("geolocation unsupported: {0}")]
    Unsupported(String),
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

impl PositionError {
    pub fn code(&self) -> PositionErrorCode {
        match self {
            Self::PermissionDenied(_) => PositionErrorCode::PermissionDenied,
            Self::PositionUnavailable(_) => PositionErrorCode::PositionUnavailable,
            Self::Timeout(_) => PositionErrorCode::Timeout,
            Self::Unsupported(_) => PositionErrorCode::Unsupported,
            Self::InvalidCoordinate(_) => PositionErrorCode::InvalidCoordinate,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::PermissionDenied(message)
            | Self::PositionUnavailable(message)
            | Self::Timeout(message)
            | Self::Unsupported(message)
            | Self::InvalidCoordinate(message) => message,
        }
    }
}
