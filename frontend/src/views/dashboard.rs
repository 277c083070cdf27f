use super::widgets::*;
use crate::app::DashboardApp;
use crate::dashboard::{DashboardFilters, FilterView};
use crate::dataflow::Relay;
use crate::theme::*;
use shared::ProgressPoint;
use shared::format::{format_mt, format_percent, format_thousands, short_date};
use std::collections::BTreeMap;
use std::sync::Arc;
use zoon::*;

pub fn dashboard_page(app: &DashboardApp) -> impl Element + use<> {
    let filters = app.filters.clone();
    Column::new()
        .s(Width::fill())
        .s(Height::fill())
        .s(Gap::new().y(SPACING_16))
        .item(navbar(app))
        .item(
            Column::new()
                .s(Width::fill())
                .s(Padding::new().x(SPACING_16))
                .s(Gap::new().y(SPACING_16))
                .item(El::new().s(Width::fill()).child_signal(
                    app.data.state.signal().map(|state| state.error.map(error_card)),
                ))
                .item(El::new().s(Width::fill()).child_signal(app.filters.view_signal().map(
                    move |view| match view {
                        Some(view) => dashboard_content(&filters, view).unify(),
                        None => El::new()
                            .s(Padding::all(SPACING_24))
                            .child(muted("Loading remediation data..."))
                            .unify(),
                    },
                )))
                .item(El::new().child_signal(app.data.state.signal().map(|state| {
                    state
                        .modified
                        .map(|modified| muted(format!("Data file last modified: {}", modified.formatted)))
                }))),
        )
        .item(super::landing_page::footer())
}

fn navbar(app: &DashboardApp) -> impl Element + use<> {
    let session = app.session.clone();
    Row::new()
        .s(Width::fill())
        .s(Padding::new().x(SPACING_24).y(SPACING_12))
        .s(Gap::new().x(SPACING_16))
        .s(Background::new().color(DARK_GREEN))
        .s(Font::new().color(CARD_BG))
        .item(
            El::new()
                .s(Font::new().size(FONT_SIZE_TITLE).weight(FontWeight::Bold))
                .child("Swaccha Andhra Dashboard"),
        )
        .item(
            Row::new()
                .s(Align::new().right())
                .s(Gap::new().x(SPACING_16))
                .item(El::new().s(Font::new().size(FONT_SIZE_BODY)).child_signal(app.clock.signal()))
                .item(El::new().s(Font::new().size(FONT_SIZE_BODY)).child_signal(
                    app.session.state.signal().map(|state| state.user.map(|user| format!("Signed in as {user}"))),
                ))
                .item(
                    Button::new()
                        .s(Padding::new().x(SPACING_12).y(SPACING_4))
                        .s(RoundedCorners::all(4))
                        .s(Background::new().color(CARD_BG))
                        .s(Font::new().size(FONT_SIZE_SMALL).weight(FontWeight::SemiBold).color(DARK_GREEN))
                        .label("Logout")
                        .on_press(move || session.logout_pressed_relay.send(())),
                ),
        )
}

fn dashboard_content(filters: &DashboardFilters, view: Arc<FilterView>) -> impl Element + use<> {
    let metrics = &view.metrics;
    let daily = view
        .daily
        .iter()
        .map(|point| (short_date(&point.date), point.total_mt))
        .collect();
    let vendors = metrics
        .vendor_stats
        .iter()
        .map(|stats| (stats.key.clone(), stats.percent_complete))
        .collect();

    let cluster_rows = metrics
        .cluster_stats
        .iter()
        .map(|stats| {
            vec![
                stats.key.clone(),
                format_mt(stats.target_mt),
                format_mt(stats.remediated_mt),
                format_percent(stats.percent_complete),
            ]
        })
        .collect();
    let ulb_rows = metrics
        .ulb_stats
        .iter()
        .map(|stats| {
            vec![
                stats.ulb.clone(),
                stats.cluster.clone(),
                format_mt(stats.target_mt),
                format_mt(stats.remediated_mt),
                format_percent(stats.percent_complete),
            ]
        })
        .collect();

    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(SPACING_16))
        .item(card_grid([
            stat_card(
                "Total Waste Target",
                format_mt(metrics.total_to_remediate),
                format!("{} ULBs", metrics.ulb_stats.len()),
                ACCENT_BLUE,
            )
            .unify(),
            stat_card(
                "Remediated So Far",
                format_mt(metrics.total_remediated),
                format!("As of {}", metrics.latest_date),
                EMERALD,
            )
            .unify(),
            stat_card(
                "Overall Progress",
                format_percent(metrics.percent_complete),
                format!("Before May: {}", format_mt(metrics.april_remediated)),
                DARK_GREEN,
            )
            .unify(),
        ]))
        .item(filter_panel(filters, &view))
        .item(card_grid([
            card("Daily Remediation Progress", bar_chart(daily, format_thousands, |_| EMERALD)).unify(),
            card("Vendor Performance", bar_chart(vendors, format_percent, percent_color)).unify(),
        ]))
        .item(card_grid([
            card(
                "Cluster Progress",
                table(&["Cluster", "Target", "Remediated", "Progress"], cluster_rows),
            )
            .unify(),
            card(
                "ULB Details",
                table(&["ULB", "Cluster", "Target", "Remediated", "Progress"], ulb_rows),
            )
            .unify(),
        ]))
        .item(card_grid([
            card("Vendor Trend", trend_table("Vendor", &view.daily, &view.vendor_trend)).unify(),
            card("Cluster Trend", trend_table("Cluster", &view.daily, &view.cluster_trend)).unify(),
        ]))
}

/// Cumulative tonnage per group, one column per date.
fn trend_table(
    group: &str,
    dates: &[ProgressPoint],
    trend: &BTreeMap<String, Vec<ProgressPoint>>,
) -> impl Element + use<> {
    let headers: Vec<String> = std::iter::once(group.to_string())
        .chain(dates.iter().map(|point| short_date(&point.date)))
        .collect();
    let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
    let rows = trend
        .iter()
        .map(|(name, series)| {
            std::iter::once(name.clone())
                .chain(series.iter().map(|point| format_thousands(point.total_mt)))
                .collect()
        })
        .collect();
    table(&headers, rows)
}

fn filter_panel(filters: &DashboardFilters, view: &FilterView) -> impl Element + use<> {
    let options = &view.options;
    let filter = &options.filter;
    let reset = filters.reset_pressed_relay.clone();

    Column::new()
        .s(Width::fill())
        .s(Padding::all(SPACING_16))
        .s(Gap::new().y(SPACING_12))
        .s(Background::new().color(CARD_BG))
        .s(RoundedCorners::all(8))
        .s(card_shadow())
        .item(
            Row::new()
                .s(Width::fill())
                .item(
                    El::new()
                        .s(Font::new().size(FONT_SIZE_TITLE).weight(FontWeight::SemiBold).color(DARK_GREEN))
                        .child("Filters"),
                )
                .item(
                    Button::new()
                        .s(Align::new().right())
                        .s(Padding::new().x(SPACING_12).y(SPACING_4))
                        .s(RoundedCorners::all(4))
                        .s(Borders::all(Border::new().width(1).color(DARK_GREEN)))
                        .s(Font::new().size(FONT_SIZE_SMALL).color(DARK_GREEN))
                        .label("Reset Filters")
                        .on_press(move || reset.send(())),
                ),
        )
        .item(chip_row("Vendors", &options.vendors, &filter.vendors, &filters.vendor_toggled_relay))
        .item(chip_row("Clusters", &options.clusters, &filter.clusters, &filters.cluster_toggled_relay))
        .item(chip_row("ULBs", &options.sites, &filter.sites, &filters.site_toggled_relay))
        .item(date_stepper(
            "From",
            &options.dates,
            filter.start_date.clone(),
            &filters.start_date_selected_relay,
        ))
        .item(date_stepper(
            "To",
            &options.dates,
            filter.end_date.clone(),
            &filters.end_date_selected_relay,
        ))
}

fn chip_row(label: &str, options: &[String], selected: &[String], relay: &Relay<String>) -> impl Element + use<> {
    Row::new()
        .multiline()
        .s(Width::fill())
        .s(Gap::both(SPACING_8))
        .item(
            El::new()
                .s(Width::exact(80))
                .s(Font::new().size(FONT_SIZE_SMALL).weight(FontWeight::SemiBold).color(TEXT_MUTED))
                .child(label.to_string()),
        )
        .items(options.iter().map(|option| {
            let active = selected.contains(option);
            chip(option.clone(), active, relay.clone())
        }))
}

fn chip(value: String, active: bool, relay: Relay<String>) -> impl Element {
    let (background, color) = if active { (DARK_GREEN, CARD_BG) } else { (VERY_LIGHT_GREEN, TEXT_DARK) };
    Button::new()
        .s(Padding::new().x(SPACING_12).y(SPACING_4))
        .s(RoundedCorners::all_max())
        .s(Background::new().color(background))
        .s(Font::new().size(FONT_SIZE_SMALL).color(color))
        .label(value.clone())
        .on_press(move || select_value(&relay, value.clone()))
}

fn select_value(relay: &Relay<String>, value: String) {
    relay.send(value);
}

/// Steps through the dataset's date columns.
fn date_stepper(label: &str, dates: &[String], current: Option<String>, relay: &Relay<String>) -> impl Element + use<> {
    let position = current
        .as_ref()
        .and_then(|date| dates.iter().position(|d| d == date));
    let previous = position.and_then(|idx| idx.checked_sub(1)).and_then(|idx| dates.get(idx).cloned());
    let next = match position {
        Some(idx) => dates.get(idx + 1).cloned(),
        None => dates.first().cloned(),
    };

    Row::new()
        .s(Gap::new().x(SPACING_8))
        .s(Align::new().center_y())
        .item(
            El::new()
                .s(Width::exact(80))
                .s(Font::new().size(FONT_SIZE_SMALL).weight(FontWeight::SemiBold).color(TEXT_MUTED))
                .child(label.to_string()),
        )
        .item(step_button("◀", previous, relay.clone()))
        .item(
            El::new()
                .s(Width::exact(90))
                .s(Font::new().size(FONT_SIZE_BODY).color(TEXT_DARK).center())
                .child(current.as_deref().map(short_date).unwrap_or_else(|| "-".to_string())),
        )
        .item(step_button("▶", next, relay.clone()))
}

fn step_button(label: &'static str, target: Option<String>, relay: Relay<String>) -> impl Element {
    let enabled = target.is_some();
    Button::new()
        .s(Padding::new().x(SPACING_8).y(2))
        .s(RoundedCorners::all(4))
        .s(Background::new().color(if enabled { VERY_LIGHT_GREEN } else { BORDER }))
        .s(Font::new().size(FONT_SIZE_SMALL).color(if enabled { DARK_GREEN } else { TEXT_MUTED }))
        .label(label)
        .on_press(move || {
            if let Some(date) = target.clone() {
                select_value(&relay, date);
            }
        })
}
