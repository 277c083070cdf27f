use super::overview::overview_content;
use super::vendor::vendor_content;
use super::widgets::{error_card, muted};
use crate::app::DashboardApp;
use crate::landing::LandingView;
use crate::routing::LOGIN_PATH;
use crate::theme::*;
use shared::LandingContent;
use zoon::*;

pub fn landing_page(app: &DashboardApp) -> impl Element + use<> {
    Column::new()
        .s(Width::fill())
        .s(Height::fill())
        .s(Padding::new().x(SPACING_16).y(SPACING_8))
        .s(Gap::new().y(SPACING_12))
        .item(status_bar(app))
        .item(title())
        .item(error_banner(app))
        .item(El::new().s(Width::fill()).child_signal(app.landing.signal().map(rotating_content)))
        .item(login_prompt(app))
        .item(footer())
}

fn status_bar(app: &DashboardApp) -> impl Element + use<> {
    Row::new()
        .s(Width::fill())
        .s(Padding::new().x(SPACING_16).y(SPACING_4))
        .s(Background::new().color(CARD_BG))
        .s(RoundedCorners::all(6))
        .s(card_shadow())
        .item(
            El::new()
                .s(Font::new().weight(FontWeight::Medium).color(TEXT_DARK))
                .child_signal(app.clock.signal()),
        )
        .item(
            Row::new()
                .s(Align::new().right())
                .s(Gap::new().x(SPACING_8))
                .item(El::new().s(Font::new().color(TEXT_DARK)).child("Auto-refreshing data"))
                .item(refresh_icon(app)),
        )
}

fn refresh_icon(app: &DashboardApp) -> impl Element + use<> {
    let spinning = app.landing.signal().map(|view| view.icon.is_spinning());
    El::new()
        .s(Font::new().color(DARK_GREEN))
        .update_raw_el(|el| el.class("refresh-icon"))
        .update_raw_el(move |el| el.class_signal("spinning", spinning))
        .child("⟳")
}

fn title() -> impl Element {
    Column::new()
        .s(Width::fill())
        .s(Align::new().center_x())
        .item(
            El::new()
                .s(Align::new().center_x())
                .s(Font::new().size(26).weight(FontWeight::SemiBold).color(DARK_GREEN))
                .child("Swaccha Andhra Waste Remediation"),
        )
        .item(
            El::new()
                .s(Align::new().center_x())
                .s(Font::new().size(FONT_SIZE_BODY).color(DARK_GREEN))
                .child("Real-time monitoring dashboard"),
        )
}

fn error_banner(app: &DashboardApp) -> impl Element + use<> {
    El::new()
        .s(Width::fill())
        .child_signal(app.data.state.signal().map(|state| state.error.map(error_card)))
}

fn rotating_content(view: LandingView) -> RawElOrText {
    match view.step.map(|step| step.content) {
        Some(LandingContent::Overview(content)) => overview_content(content).unify(),
        Some(LandingContent::Vendor(content)) => vendor_content(content).unify(),
        None => El::new()
            .s(Padding::all(SPACING_24))
            .s(Align::new().center_x())
            .child(muted("Loading remediation data..."))
            .unify(),
    }
}

fn login_prompt(app: &DashboardApp) -> impl Element + use<> {
    let router = app.router.clone();
    Row::new()
        .s(Width::fill())
        .s(Padding::new().x(SPACING_16).y(SPACING_8))
        .s(Background::new().color(CARD_BG))
        .s(RoundedCorners::all(8))
        .s(card_shadow())
        .s(Gap::new().x(SPACING_8))
        .item(
            El::new()
                .s(Font::new().size(FONT_SIZE_BODY).weight(FontWeight::Medium).color(TEXT_DARK))
                .child("Dashboard auto-rotates to show all vendor data"),
        )
        .item(
            Button::new()
                .s(Align::new().right())
                .s(Padding::new().x(SPACING_16).y(6))
                .s(RoundedCorners::all(6))
                .s(Background::new().color(DARK_GREEN))
                .s(Font::new().size(FONT_SIZE_BODY).weight(FontWeight::SemiBold).color(CARD_BG))
                .label("Login for Controls")
                .on_press(move || router.navigate(LOGIN_PATH)),
        )
}

pub fn footer() -> impl Element {
    El::new()
        .s(Width::fill())
        .s(Padding::new().y(SPACING_8))
        .s(Borders::new().top(Border::new().width(1).color(BORDER)))
        .s(Font::new().size(FONT_SIZE_SMALL).color(TEXT_MUTED).center())
        .child("Made in Andhra Pradesh, with ♥ • © 2025 Advitia Labs")
}
