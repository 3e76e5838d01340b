//! Backend-to-UI events and error modeling for the consent controller.

use shared::{
    domain::Position,
    error::{PositionError, PositionErrorCode},
};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    PositionObtained { request_id: u64, position: Position },
    PositionFailed { request_id: u64, error: PositionError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Permission,
    Timeout,
    Transport,
    Validation,
    Unsupported,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LocationRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("permission")
            || message_lower.contains("denied")
            || message_lower.contains("forbidden")
        {
            UiErrorCategory::Permission
        } else if message_lower.contains("timed out") || message_lower.contains("timeout") {
            UiErrorCategory::Timeout
        } else if message_lower.contains("unsupported") {
            UiErrorCategory::Unsupported
        } else if message_lower.contains("invalid") || message_lower.contains("malformed") {
            UiErrorCategory::Validation
        } else if message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
            || message_lower.contains("queue")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_position_error(error: &PositionError) -> Self {
        let category = match error.code() {
            PositionErrorCode::PermissionDenied => UiErrorCategory::Permission,
            PositionErrorCode::PositionUnavailable => UiErrorCategory::Transport,
            PositionErrorCode::Timeout => UiErrorCategory::Timeout,
            PositionErrorCode::Unsupported => UiErrorCategory::Unsupported,
            PositionErrorCode::InvalidCoordinate => UiErrorCategory::Validation,
        };
        Self {
            category,
            context: UiErrorContext::LocationRequest,
            message: error.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Short Spanish sentence shown on the consent screen banner.
    pub fn user_message(&self) -> String {
        let summary = match (self.context, self.category) {
            (UiErrorContext::BackendStartup, _) => {
                "El servicio de ubicación no pudo iniciarse."
            }
            (_, UiErrorCategory::Permission) => "Se denegó el permiso de ubicación.",
            (_, UiErrorCategory::Timeout) => "La solicitud de ubicación tardó demasiado.",
            (_, UiErrorCategory::Unsupported) => {
                "La geolocalización no está disponible en este dispositivo."
            }
            (_, UiErrorCategory::Validation) => "Se recibió una ubicación no válida.",
            (_, UiErrorCategory::Transport) | (_, UiErrorCategory::Unknown) => {
                "No se pudo obtener la ubicación."
            }
        };
        format!("{summary} Intente nuevamente.")
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Permission => "Permission",
        UiErrorCategory::Timeout => "Timeout",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unsupported => "Unsupported",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_maps_to_permission_category() {
        let err = UiError::from_position_error(&PositionError::PermissionDenied(
            "user refused".to_string(),
        ));
        assert_eq!(err.category(), UiErrorCategory::Permission);
        assert_eq!(err.context(), UiErrorContext::LocationRequest);
        assert!(err.message().contains("user refused"));
        assert_eq!(
            err.user_message(),
            "Se denegó el permiso de ubicación. Intente nuevamente."
        );
    }

    #[test]
    fn classifies_command_queue_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::LocationRequest,
            "Location worker disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err_label(err.category()), "Transport");
    }

    #[test]
    fn startup_failures_use_startup_wording() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "failed to build runtime: no threads",
        );
        assert!(err.user_message().starts_with("El servicio de ubicación no pudo iniciarse."));
    }
}
