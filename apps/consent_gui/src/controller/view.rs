//! Screen model derived from controller state; the egui layer only paints it.

use location_core::map_url;
use shared::domain::format_degrees;
use url::Url;

use crate::controller::reducer::{ConsentState, StatusBanner};

pub const CONSENT_TITLE: &str = "Bienvenido";
pub const CONSENT_MESSAGE: &str = "Para continuar con el proceso de autorización de crédito, se iniciará una video llamada. Se solicita permiso para acceder a su ubicación física, la cual será tomada del dispositivo desde el cual se realice la llamada.";
pub const CONSENT_CHECKBOX_LABEL: &str =
    "Autorizo a dar mis datos de ubicación y ser contactado para una video llamada.";
pub const CONTINUE_LABEL: &str = "Continuar";
pub const CANCEL_LABEL: &str = "Cancelar";

pub const RESULT_TITLE: &str = "Datos de Ubicación";
pub const LOADING_MESSAGE: &str = "Obteniendo los datos de ubicación...";
pub const LATITUDE_LABEL: &str = "Latitud:";
pub const LONGITUDE_LABEL: &str = "Longitud:";
pub const MAP_BUTTON_LABEL: &str = "Ver en Google Maps";

pub const NOTICE_ACCEPT_LABEL: &str = "Aceptar";

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Consent(ConsentView),
    Result(ResultView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsentView {
    pub consent_given: bool,
    pub banner: Option<StatusBanner>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Loading,
    Location(LocationView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationView {
    pub latitude: f64,
    pub longitude: f64,
    pub map_url: String,
}

impl LocationView {
    pub fn latitude_text(&self) -> String {
        format!("{LATITUDE_LABEL} {}", format_degrees(self.latitude))
    }

    pub fn longitude_text(&self) -> String {
        format!("{LONGITUDE_LABEL} {}", format_degrees(self.longitude))
    }
}

pub fn screen_for(state: &ConsentState, maps_base: &Url) -> Screen {
    if !state.call_confirmed() {
        return Screen::Consent(ConsentView {
            consent_given: state.consent_given(),
            banner: state.status_banner().cloned(),
        });
    }

    match state.location() {
        Some(coordinate) => Screen::Result(ResultView::Location(LocationView {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
            map_url: map_url(maps_base, Some(coordinate)),
        })),
        None => Screen::Result(ResultView::Loading),
    }
}

#[cfg(test)]
#[path = "../tests/view_tests.rs"]
mod tests;
