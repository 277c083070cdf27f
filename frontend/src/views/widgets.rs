//! Small building blocks shared by the landing and dashboard pages.

use crate::theme::*;
use shared::content::Tone;
use zoon::*;

pub fn card(title: impl Into<String>, content: impl Element) -> impl Element {
    Column::new()
        .s(Width::fill().min(260))
        .s(Padding::all(SPACING_16))
        .s(Gap::new().y(SPACING_12))
        .s(Background::new().color(CARD_BG))
        .s(RoundedCorners::all(8))
        .s(card_shadow())
        .update_raw_el(|el| el.class("dashboard-card"))
        .item(
            El::new()
                .s(Font::new().size(FONT_SIZE_TITLE).weight(FontWeight::SemiBold).color(DARK_GREEN))
                .child(title.into()),
        )
        .item(content)
}

/// Cards laid out side by side, wrapping on narrow screens.
pub fn card_grid(cards: impl IntoIterator<Item = RawElOrText>) -> impl Element {
    Row::new()
        .multiline()
        .s(Width::fill())
        .s(Gap::both(SPACING_16))
        .s(Align::new().top())
        .update_raw_el(|el| el.class("card-grid"))
        .items(cards)
}

pub fn stat_card(label: &str, value: String, caption: String, accent: &'static str) -> impl Element + use<> {
    Column::new()
        .s(Width::fill().min(200))
        .s(Padding::all(SPACING_16))
        .s(Gap::new().y(SPACING_4))
        .s(Background::new().color(CARD_BG))
        .s(RoundedCorners::all(8))
        .s(Borders::new().left(Border::new().width(4).color(accent)))
        .s(card_shadow())
        .update_raw_el(|el| el.class("stat-card"))
        .item(El::new().s(Font::new().size(FONT_SIZE_SMALL).color(TEXT_MUTED)).child(label.to_string()))
        .item(
            El::new()
                .s(Font::new().size(FONT_SIZE_HERO).weight(FontWeight::Bold).color(TEXT_DARK))
                .child(value),
        )
        .item(El::new().s(Font::new().size(FONT_SIZE_SMALL).color(TEXT_MUTED)).child(caption))
}

pub fn progress_bar(percent: f64, color: &'static str) -> impl Element {
    El::new()
        .s(Width::fill())
        .s(Height::exact(10))
        .s(Background::new().color(VERY_LIGHT_GREEN))
        .s(RoundedCorners::all_max())
        .child(
            El::new()
                .s(Width::percent(percent.clamp(0.0, 100.0)))
                .s(Height::fill())
                .s(Background::new().color(color))
                .s(RoundedCorners::all_max()),
        )
}

/// Labelled horizontal bar. `fraction` is relative to the largest bar.
pub fn bar_row(label: String, value: String, fraction: f64, color: &'static str) -> impl Element {
    Row::new()
        .s(Width::fill())
        .s(Gap::new().x(SPACING_8))
        .s(Align::new().center_y())
        .item(
            El::new()
                .s(Width::exact(140))
                .s(Font::new().size(FONT_SIZE_BODY).color(TEXT_DARK).no_wrap())
                .child(label),
        )
        .item(progress_bar(fraction * 100.0, color))
        .item(
            El::new()
                .s(Width::exact(90))
                .s(Font::new().size(FONT_SIZE_SMALL).color(TEXT_MUTED).right())
                .child(value),
        )
}

/// One bar per item, scaled to the largest value.
pub fn bar_chart(
    items: Vec<(String, f64)>,
    format_value: impl Fn(f64) -> String,
    color: impl Fn(f64) -> &'static str,
) -> impl Element {
    let max = items.iter().map(|(_, value)| *value).fold(0.0, f64::max);
    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(SPACING_8))
        .items(items.into_iter().map(|(label, value)| {
            let fraction = if max > 0.0 { value / max } else { 0.0 };
            bar_row(label, format_value(value), fraction, color(value))
        }))
}

pub fn badge(text: String, tone: Tone) -> impl Element {
    El::new()
        .s(Padding::new().x(SPACING_8).y(2))
        .s(RoundedCorners::all_max())
        .s(Background::new().color(tone_color(tone)))
        .s(Font::new().size(FONT_SIZE_SMALL).weight(FontWeight::SemiBold).color(CARD_BG))
        .child(text)
}

pub fn table(headers: &[&str], rows: Vec<Vec<String>>) -> impl Element + use<> {
    let header = Row::new()
        .s(Width::fill())
        .s(Padding::new().y(SPACING_8))
        .s(Borders::new().bottom(Border::new().width(2).color(LIGHT_GREEN)))
        .s(Font::new().size(FONT_SIZE_SMALL).weight(FontWeight::Bold).color(DARK_GREEN))
        .items(headers.iter().map(|title| El::new().s(Width::fill()).child(title.to_string())));

    Column::new()
        .s(Width::fill())
        .s(Scrollbars::both())
        .update_raw_el(|el| el.class("data-table"))
        .item(header)
        .items(rows.into_iter().map(|row| {
            Row::new()
                .s(Width::fill())
                .s(Padding::new().y(6))
                .s(Borders::new().bottom(Border::new().width(1).color(BORDER)))
                .s(Font::new().size(FONT_SIZE_BODY).color(TEXT_DARK))
                .items(row.into_iter().map(|cell| El::new().s(Width::fill()).child(cell)))
        }))
}

pub fn error_card(message: String) -> impl Element {
    Column::new()
        .s(Width::fill())
        .s(Padding::all(SPACING_16))
        .s(Gap::new().y(SPACING_4))
        .s(Background::new().color("#fdecea"))
        .s(Borders::all(Border::new().width(1).color(ACCENT_ORANGE)))
        .s(RoundedCorners::all(8))
        .item(
            El::new()
                .s(Font::new().weight(FontWeight::SemiBold).color(ACCENT_ORANGE))
                .child("Could not load remediation data"),
        )
        .item(El::new().s(Font::new().size(FONT_SIZE_SMALL).color(TEXT_DARK)).child(message))
}

pub fn muted(text: impl Into<String>) -> impl Element {
    El::new()
        .s(Font::new().size(FONT_SIZE_SMALL).color(TEXT_MUTED))
        .child(text.into())
}
