//! Consent flow state and the transitions driven by UI actions and location outcomes.

use shared::{
    domain::{Coordinate, Position},
    error::PositionError,
};

use crate::controller::events::{err_label, UiError, UiEvent};

/// Blocking alert that must be dismissed before anything else reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ConsentRequired,
    Unsupported,
    Cancelled,
}

impl Notice {
    pub fn text(self) -> &'static str {
        match self {
            Self::ConsentRequired => "Debe marcar la casilla antes de continuar.",
            Self::Unsupported => "Geolocation is not supported by this device.",
            Self::Cancelled => "Process cancelled.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ToggleConsent,
    Continue,
    Cancel,
    DismissNotice,
}

/// Whether a location provider is available in this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Supported,
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RequestPosition { request_id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBanner {
    pub severity: StatusBannerSeverity,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConsentState {
    consent_given: bool,
    call_confirmed: bool,
    location: Option<Coordinate>,
    notice: Option<Notice>,
    status_banner: Option<StatusBanner>,
    outstanding_requests: u32,
    next_request_id: u64,
}

impl ConsentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consent_given(&self) -> bool {
        self.consent_given
    }

    pub fn call_confirmed(&self) -> bool {
        self.call_confirmed
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn status_banner(&self) -> Option<&StatusBanner> {
        self.status_banner.as_ref()
    }

    pub fn outstanding_requests(&self) -> u32 {
        self.outstanding_requests
    }

    pub fn reduce(&mut self, action: UiAction, capability: Capability) -> Option<Effect> {
        if let Some(notice) = self.notice {
            if action == UiAction::DismissNotice {
                tracing::debug!(?notice, "notice dismissed");
                self.notice = None;
            } else {
                tracing::debug!(?action, ?notice, "action ignored while notice is open");
            }
            return None;
        }

        match action {
            UiAction::ToggleConsent => {
                self.consent_given = !self.consent_given;
                tracing::debug!(consent_given = self.consent_given, "consent toggled");
                None
            }
            UiAction::Continue => self.continue_with_consent(capability),
            UiAction::Cancel => {
                tracing::info!("consent flow cancelled by user");
                self.notice = Some(Notice::Cancelled);
                None
            }
            UiAction::DismissNotice => None,
        }
    }

    fn continue_with_consent(&mut self, capability: Capability) -> Option<Effect> {
        if !self.consent_given {
            self.notice = Some(Notice::ConsentRequired);
            return None;
        }
        if capability == Capability::Unsupported {
            tracing::warn!("continue requested but no location provider is available");
            self.notice = Some(Notice::Unsupported);
            return None;
        }

        self.next_request_id += 1;
        self.outstanding_requests += 1;
        self.status_banner = None;
        let request_id = self.next_request_id;
        if self.outstanding_requests > 1 {
            tracing::debug!(
                request_id,
                outstanding = self.outstanding_requests,
                "issuing location request while another is outstanding"
            );
        }
        Some(Effect::RequestPosition { request_id })
    }

    /// Folds one worker event into the state. Worker progress notes are
    /// diagnostics and only reach the log.
    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => tracing::debug!("{message}"),
            UiEvent::Error(err) => self.report_error(&err),
            UiEvent::PositionObtained {
                request_id,
                position,
            } => self.apply_position(request_id, &position),
            UiEvent::PositionFailed { request_id, error } => self.apply_failure(request_id, &error),
        }
    }

    pub fn apply_position(&mut self, request_id: u64, position: &Position) {
        self.outstanding_requests = self.outstanding_requests.saturating_sub(1);
        tracing::info!(
            request_id,
            latitude = position.coordinate.latitude(),
            longitude = position.coordinate.longitude(),
            accuracy_m = ?position.accuracy_m,
            source = %position.source,
            captured_at = %position.captured_at,
            "location obtained"
        );

        if self.location.is_some() {
            tracing::debug!(request_id, "location already fixed for this session; ignoring");
            return;
        }
        self.location = Some(position.coordinate);
        self.call_confirmed = true;
        self.status_banner = None;
    }

    pub fn apply_failure(&mut self, request_id: u64, error: &PositionError) {
        self.outstanding_requests = self.outstanding_requests.saturating_sub(1);
        tracing::error!(request_id, code = ?error.code(), "error obtaining location: {error}");
        if self.call_confirmed {
            return;
        }
        self.report_error(&UiError::from_position_error(error));
    }

    /// A request that never reached the worker counts as answered.
    pub fn apply_dispatch_failure(&mut self, err: &UiError) {
        self.outstanding_requests = self.outstanding_requests.saturating_sub(1);
        self.report_error(err);
    }

    pub fn report_error(&mut self, err: &UiError) {
        tracing::warn!(
            category = err_label(err.category()),
            context = ?err.context(),
            "{}",
            err.message()
        );
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: err.user_message(),
        });
    }

    pub fn dismiss_status_banner(&mut self) {
        self.status_banner = None;
    }

    #[cfg(test)]
    pub(crate) fn awaiting_location() -> Self {
        Self {
            consent_given: true,
            call_confirmed: true,
            outstanding_requests: 1,
            next_request_id: 1,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
