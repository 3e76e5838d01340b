use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::{Capability, ConsentState, Effect, Notice, StatusBannerSeverity, UiAction},
    view::{
        screen_for, ConsentView, LocationView, ResultView, Screen, CANCEL_LABEL,
        CONSENT_CHECKBOX_LABEL, CONSENT_MESSAGE, CONSENT_TITLE, CONTINUE_LABEL, LOADING_MESSAGE,
        MAP_BUTTON_LABEL, NOTICE_ACCEPT_LABEL, RESULT_TITLE,
    },
};
use crate::ui::theme;

/// Things the user asked for during one frame; applied after painting.
enum UiIntent {
    Action(UiAction),
    DismissBanner,
    OpenMap(String),
}

pub struct ConsentApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    state: ConsentState,
    capability: Capability,
    maps_base: Url,

    theme_applied: bool,
}

impl ConsentApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        capability: Capability,
        maps_base: Url,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: ConsentState::new(),
            capability,
            maps_base,
            theme_applied: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply_event(event);
        }
    }

    fn dispatch(&mut self, action: UiAction) {
        let Some(effect) = self.state.reduce(action, self.capability) else {
            return;
        };
        match effect {
            Effect::RequestPosition { request_id } => {
                if let Err(err) = dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::RequestPosition { request_id },
                ) {
                    self.state.apply_dispatch_failure(&err);
                }
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if !self.theme_applied {
            ctx.set_visuals(theme::visuals());
            self.theme_applied = true;
        }
    }

    fn show_consent_screen(ui: &mut egui::Ui, view: &ConsentView, intents: &mut Vec<UiIntent>) {
        ui.label(
            egui::RichText::new(CONSENT_TITLE)
                .size(theme::TITLE_SIZE)
                .strong(),
        );
        ui.add_space(12.0);

        if let Some(banner) = &view.banner {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    theme::BANNER_FILL,
                    egui::Stroke::new(1.0, theme::BANNER_STROKE),
                ),
            };
            egui::Frame::new()
                .fill(fill)
                .stroke(stroke)
                .corner_radius(theme::BUTTON_RADIUS)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(theme::BANNER_TEXT));
                        if ui.small_button("✕").clicked() {
                            intents.push(UiIntent::DismissBanner);
                        }
                    });
                });
            ui.add_space(8.0);
        }

        ui.label(egui::RichText::new(CONSENT_MESSAGE).size(theme::BODY_SIZE));
        ui.add_space(18.0);

        ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
            let mut checked = view.consent_given;
            let checkbox = ui.checkbox(
                &mut checked,
                egui::RichText::new(CONSENT_CHECKBOX_LABEL)
                    .size(theme::CHECKBOX_TEXT_SIZE)
                    .color(theme::CHECKBOX_TEXT),
            );
            if checkbox.changed() {
                intents.push(UiIntent::Action(UiAction::ToggleConsent));
            }
        });
        ui.add_space(18.0);

        ui.horizontal(|ui| {
            if ui
                .add(theme::filled_button(CONTINUE_LABEL, theme::CONFIRM))
                .clicked()
            {
                intents.push(UiIntent::Action(UiAction::Continue));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add(theme::filled_button(CANCEL_LABEL, theme::CANCEL))
                    .clicked()
                {
                    intents.push(UiIntent::Action(UiAction::Cancel));
                }
            });
        });
    }

    fn show_result_screen(ui: &mut egui::Ui, view: &ResultView, intents: &mut Vec<UiIntent>) {
        ui.label(
            egui::RichText::new(RESULT_TITLE)
                .size(theme::TITLE_SIZE)
                .strong(),
        );
        ui.add_space(12.0);

        match view {
            ResultView::Loading => {
                ui.label(egui::RichText::new(LOADING_MESSAGE).size(theme::BODY_SIZE));
                ui.spinner();
            }
            ResultView::Location(location) => Self::show_location(ui, location, intents),
        }
    }

    fn show_location(ui: &mut egui::Ui, location: &LocationView, intents: &mut Vec<UiIntent>) {
        for line in [location.latitude_text(), location.longitude_text()] {
            ui.label(egui::RichText::new(line).size(theme::BODY_SIZE));
        }
        ui.add_space(10.0);

        let button = ui
            .add(theme::filled_button(MAP_BUTTON_LABEL, theme::MAP_LINK))
            .on_hover_text(location.map_url.as_str());
        if button.clicked() {
            intents.push(UiIntent::OpenMap(location.map_url.clone()));
        }
    }

    fn show_notice(ctx: &egui::Context, notice: Notice, intents: &mut Vec<UiIntent>) {
        let modal = egui::Modal::new(egui::Id::new("blocking_notice")).show(ctx, |ui| {
            ui.set_max_width(320.0);
            ui.label(egui::RichText::new(notice.text()).size(theme::BODY_SIZE));
            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.button(NOTICE_ACCEPT_LABEL).clicked()
            })
            .inner
        });
        if modal.inner || modal.should_close() {
            intents.push(UiIntent::Action(UiAction::DismissNotice));
        }
    }

    fn apply_intents(&mut self, ctx: &egui::Context, intents: Vec<UiIntent>) {
        for intent in intents {
            match intent {
                UiIntent::Action(action) => self.dispatch(action),
                UiIntent::DismissBanner => self.state.dismiss_status_banner(),
                UiIntent::OpenMap(url) => {
                    tracing::info!(%url, "opening map link");
                    ctx.open_url(egui::OpenUrl::new_tab(url));
                }
            }
        }
    }
}

impl eframe::App for ConsentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        let screen = screen_for(&self.state, &self.maps_base);
        let mut intents = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            ui.add_space((avail.y * 0.1).clamp(12.0, 80.0));
            ui.vertical_centered(|ui| {
                ui.set_max_width(theme::CARD_MAX_WIDTH.min(avail.x));
                theme::card_frame().show(ui, |ui| {
                    ui.vertical_centered(|ui| match &screen {
                        Screen::Consent(view) => Self::show_consent_screen(ui, view, &mut intents),
                        Screen::Result(view) => Self::show_result_screen(ui, view, &mut intents),
                    });
                });
            });
        });

        if let Some(notice) = self.state.notice() {
            Self::show_notice(ctx, notice, &mut intents);
        }

        self.apply_intents(ctx, intents);

        if self.state.outstanding_requests() > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
