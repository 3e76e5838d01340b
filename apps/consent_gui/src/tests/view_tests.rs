use super::*;
use crate::controller::reducer::{Capability, Effect, UiAction};
use location_core::{DEFAULT_MAPS_BASE_URL, MAP_LINK_PLACEHOLDER};
use shared::{
    domain::{Coordinate, Position},
    error::PositionError,
};

fn maps_base() -> Url {
    Url::parse(DEFAULT_MAPS_BASE_URL).expect("maps url")
}

#[test]
fn unconfirmed_state_renders_consent_screen() {
    let state = ConsentState::new();
    assert_eq!(
        screen_for(&state, &maps_base()),
        Screen::Consent(ConsentView {
            consent_given: false,
            banner: None,
        })
    );
}

#[test]
fn confirmed_call_renders_coordinates_and_map_link() {
    let mut state = ConsentState::new();
    state.reduce(UiAction::ToggleConsent, Capability::Supported);
    let Some(Effect::RequestPosition { request_id }) =
        state.reduce(UiAction::Continue, Capability::Supported)
    else {
        panic!("expected a location request");
    };
    state.apply_position(
        request_id,
        &Position::now(Coordinate::new(10.0, 20.0).expect("coordinate"), "fixed"),
    );

    let Screen::Result(ResultView::Location(view)) = screen_for(&state, &maps_base()) else {
        panic!("expected the result screen with a location");
    };
    assert_eq!(view.latitude_text(), "Latitud: 10");
    assert_eq!(view.longitude_text(), "Longitud: 20");
    assert_eq!(view.map_url, "https://www.google.com/maps?q=10,20");
}

#[test]
fn result_screen_without_location_shows_loading() {
    let state = ConsentState::awaiting_location();
    assert_eq!(
        screen_for(&state, &maps_base()),
        Screen::Result(ResultView::Loading)
    );
    assert_eq!(LOADING_MESSAGE, "Obteniendo los datos de ubicación...");
}

#[test]
fn failure_keeps_consent_screen_with_banner() {
    let mut state = ConsentState::new();
    state.reduce(UiAction::ToggleConsent, Capability::Supported);
    state.reduce(UiAction::Continue, Capability::Supported);
    state.apply_failure(1, &PositionError::PositionUnavailable("offline".to_string()));

    let Screen::Consent(view) = screen_for(&state, &maps_base()) else {
        panic!("expected the consent screen");
    };
    assert!(view.consent_given);
    assert!(view.banner.is_some());
}

#[test]
fn placeholder_link_is_used_without_coordinates() {
    assert_eq!(location_core::map_url(&maps_base(), None), MAP_LINK_PLACEHOLDER);
}

#[test]
fn coordinate_lines_match_browser_number_text() {
    let view = LocationView {
        latitude: 0.0,
        longitude: 1e-7,
        map_url: String::new(),
    };
    assert_eq!(view.latitude_text(), "Latitud: 0");
    assert_eq!(view.longitude_text(), "Longitud: 1e-7");

    let mut state = ConsentState::new();
    state.reduce(UiAction::ToggleConsent, Capability::Supported);
    state.reduce(UiAction::Continue, Capability::Supported);
    state.apply_position(
        1,
        &Position::now(Coordinate::new(-0.0, 1e-7).expect("coordinate"), "fixed"),
    );
    let Screen::Result(ResultView::Location(view)) = screen_for(&state, &maps_base()) else {
        panic!("expected the result screen with a location");
    };
    assert_eq!(view.latitude_text(), "Latitud: 0");
    assert_eq!(view.map_url, "https://www.google.com/maps?q=0,1e-7");
}
