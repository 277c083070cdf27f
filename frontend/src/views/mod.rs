//! Page layouts. Each page reads state from [`DashboardApp`] and reports
//! user actions through its relays.

mod dashboard;
mod landing_page;
mod login;
mod overview;
mod vendor;
mod widgets;

use crate::app::DashboardApp;
use crate::routing::{LOGIN_PATH, Route};
use crate::theme::*;
use zoon::*;

pub fn root(app: &DashboardApp) -> impl Element + use<> {
    let route = map_ref! {
        let path = app.router.path_signal(),
        let settings = app.data.settings_signal(),
        let logged_in = app.session.state.signal().map(|state| state.is_logged_in()) =>
        match Route::resolve(path, &settings.route) {
            Route::Dashboard if !*logged_in => Route::Login,
            route => route,
        }
    };

    let app = app.clone();
    El::new()
        .s(Width::fill())
        .s(Height::fill())
        .s(Background::new().color(BG_COLOR))
        .s(Font::new().family([FontFamily::new("Inter"), FontFamily::SansSerif]))
        .s(Scrollbars::y_and_clip_x())
        .child_signal(route.dedupe_cloned().map(move |route| match route {
            Route::Landing => landing_page::landing_page(&app).unify(),
            Route::Login => login::login_page(&app).unify(),
            Route::Dashboard => dashboard::dashboard_page(&app).unify(),
            Route::NotFound(path) => not_found_page(path, &app).unify(),
        }))
}

fn not_found_page(path: String, app: &DashboardApp) -> impl Element + use<> {
    let router = app.router.clone();
    let data = app.data.clone();
    Column::new()
        .s(Align::center())
        .s(Gap::new().y(SPACING_12))
        .item(
            El::new()
                .s(Align::new().center_x())
                .s(Font::new().size(48).weight(FontWeight::Bold).color(DARK_GREEN))
                .child("404"),
        )
        .item(
            El::new()
                .s(Align::new().center_x())
                .s(Font::new().size(FONT_SIZE_BODY).color(TEXT_MUTED))
                .child(format!("Page '{path}' not found")),
        )
        .item(
            Button::new()
                .s(Align::new().center_x())
                .s(Padding::new().x(SPACING_16).y(6))
                .s(RoundedCorners::all(6))
                .s(Background::new().color(DARK_GREEN))
                .s(Font::new().color(CARD_BG))
                .label("Back to landing page")
                .on_press(move || router.navigate(&data.landing_route())),
        )
        .item(
            Button::new()
                .s(Align::new().center_x())
                .s(Font::new().size(FONT_SIZE_SMALL).color(DARK_GREEN))
                .label("Login")
                .on_press({
                    let router = app.router.clone();
                    move || router.navigate(LOGIN_PATH)
                }),
        )
}
