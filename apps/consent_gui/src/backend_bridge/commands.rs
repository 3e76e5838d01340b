//! Commands queued from the UI to the location worker.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    RequestPosition { request_id: u64 },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RequestPosition { .. } => "request_position",
        }
    }
}
