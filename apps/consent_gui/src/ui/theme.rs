//! Light card palette used by both screens.

use eframe::egui;

pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0xf4, 0xf4, 0xf9);
pub const CARD: egui::Color32 = egui::Color32::WHITE;
pub const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(0xe2, 0xe2, 0xea);
pub const TEXT: egui::Color32 = egui::Color32::from_rgb(0x33, 0x33, 0x33);
pub const CHECKBOX_TEXT: egui::Color32 = egui::Color32::BLACK;
pub const CONFIRM: egui::Color32 = egui::Color32::from_rgb(0x28, 0xa7, 0x45);
pub const CANCEL: egui::Color32 = egui::Color32::from_rgb(0xdc, 0x35, 0x45);
pub const MAP_LINK: egui::Color32 = egui::Color32::from_rgb(0x00, 0x7b, 0xff);
pub const BANNER_FILL: egui::Color32 = egui::Color32::from_rgb(0xf8, 0xd7, 0xda);
pub const BANNER_STROKE: egui::Color32 = egui::Color32::from_rgb(0xf1, 0xae, 0xb5);
pub const BANNER_TEXT: egui::Color32 = egui::Color32::from_rgb(0x72, 0x1c, 0x24);

pub const CARD_MAX_WIDTH: f32 = 400.0;
pub const CARD_RADIUS: u8 = 12;
pub const BUTTON_RADIUS: u8 = 8;
pub const TITLE_SIZE: f32 = 24.0;
pub const BODY_SIZE: f32 = 16.0;
pub const CHECKBOX_TEXT_SIZE: f32 = 14.4;

pub fn visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = CARD;
    visuals.override_text_color = Some(TEXT);
    visuals.hyperlink_color = MAP_LINK;
    visuals.selection.bg_fill = MAP_LINK;

    let radius = egui::CornerRadius::same(BUTTON_RADIUS);
    visuals.widgets.noninteractive.corner_radius = radius;
    visuals.widgets.inactive.corner_radius = radius;
    visuals.widgets.hovered.corner_radius = radius;
    visuals.widgets.active.corner_radius = radius;
    visuals.widgets.open.corner_radius = radius;
    visuals
}

pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(CARD)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .corner_radius(CARD_RADIUS)
        .inner_margin(egui::Margin::same(20))
        .shadow(egui::Shadow {
            offset: [0, 4],
            blur: 6,
            spread: 0,
            color: egui::Color32::from_black_alpha(26),
        })
}

pub fn filled_button(label: &str, fill: egui::Color32) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(label.to_owned())
            .size(BODY_SIZE)
            .color(egui::Color32::WHITE),
    )
    .fill(fill)
    .stroke(egui::Stroke::NONE)
    .corner_radius(BUTTON_RADIUS)
    .min_size(egui::vec2(120.0, 38.0))
}
