//! Location worker: owns a tokio runtime and answers position requests.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use location_core::LocationProvider;
use shared::error::PositionError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    provider: Option<Arc<dyn LocationProvider>>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        send_ui_event(&ui_tx, UiEvent::Info("Location worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("location-worker")
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                send_ui_event(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("location worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                tracing::error!("failed to build location worker runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let provider_name = provider.as_ref().map(|p| p.name()).unwrap_or("none");
            tracing::info!(provider = provider_name, "location worker ready");
            send_ui_event(&ui_tx, UiEvent::Info("Location worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::RequestPosition { request_id } => {
                        let Some(provider) = provider.clone() else {
                            send_outcome(
                                &ui_tx,
                                UiEvent::PositionFailed {
                                    request_id,
                                    error: PositionError::Unsupported(
                                        "no location provider configured".to_string(),
                                    ),
                                },
                            )
                            .await;
                            continue;
                        };
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            tracing::debug!(
                                request_id,
                                provider = provider.name(),
                                "requesting position"
                            );
                            let event = match provider.current_position().await {
                                Ok(position) => UiEvent::PositionObtained {
                                    request_id,
                                    position,
                                },
                                Err(error) => UiEvent::PositionFailed { request_id, error },
                            };
                            send_outcome(&ui_tx, event).await;
                        });
                    }
                }
            }
            tracing::info!("command queue closed; location worker stopping");
        });
    })
}

/// Outcomes settle an outstanding request, so they wait for queue space
/// instead of being dropped.
async fn send_outcome(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    let ui_tx = ui_tx.clone();
    let sent = tokio::task::spawn_blocking(move || ui_tx.send(event)).await;
    match sent {
        Ok(Ok(())) => {}
        Ok(Err(_)) => tracing::debug!("ui event queue disconnected; dropping location outcome"),
        Err(err) => tracing::error!("failed to deliver location outcome: {err}"),
    }
}

fn send_ui_event(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => tracing::warn!("backend->ui event queue is full; dropping event"),
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event queue disconnected; dropping event")
        }
    }
}
