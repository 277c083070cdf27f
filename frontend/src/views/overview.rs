use super::widgets::*;
use crate::theme::*;
use shared::content::{OVERVIEW_VENDOR_SLOTS, Progress, VendorCard};
use shared::format::{day_of_month, format_mt, format_percent, format_thousands};
use shared::OverviewContent;
use zoon::*;

pub fn overview_content(content: OverviewContent) -> impl Element {
    let padding = OVERVIEW_VENDOR_SLOTS.saturating_sub(content.vendor_cards.len());
    let vendor_cards = content
        .vendor_cards
        .into_iter()
        .map(|vendor_card| vendor_summary_card(vendor_card).unify())
        .chain((0..padding).map(|_| empty_vendor_card().unify()));

    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(SPACING_16))
        .item(card_grid([
            card("Overall Progress", overall_progress(&content.progress)).unify(),
            card(
                "Lagging Clusters",
                bar_chart(
                    content
                        .lagging_clusters
                        .into_iter()
                        .map(|cluster| (cluster.key, cluster.percent_complete))
                        .collect(),
                    format_percent,
                    percent_color,
                ),
            )
            .unify(),
        ]))
        .item(card_grid(vendor_cards))
}

pub fn overall_progress(progress: &Progress) -> impl Element + use<> {
    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(SPACING_8))
        .item(
            Row::new()
                .s(Gap::new().x(SPACING_4))
                .item(muted("Data as of"))
                .item(
                    El::new()
                        .s(Font::new().size(FONT_SIZE_SMALL).weight(FontWeight::Medium).color(ACCENT_ORANGE))
                        .child(progress.latest_date.clone()),
                ),
        )
        .item(
            El::new()
                .s(Font::new().size(FONT_SIZE_HERO).weight(FontWeight::Bold).color(DARK_GREEN))
                .child(format_percent(progress.percent)),
        )
        .item(progress_bar(progress.percent, EMERALD))
        .item(muted(format!("{} of waste remediated", format_percent(progress.percent))))
        .item(
            Row::new()
                .s(Gap::new().x(SPACING_16))
                .item(muted(format!("Remediated: {}", format_mt(progress.remediated_mt))))
                .item(muted(format!("Target: {}", format_mt(progress.target_mt)))),
        )
}

fn vendor_summary_card(vendor_card: VendorCard) -> impl Element {
    let lagging = vendor_card.lagging_cluster.clone().unwrap_or_else(|| "-".to_string());
    let daily: Vec<(String, f64)> = vendor_card
        .daily
        .iter()
        .map(|point| (day_of_month(&point.date), point.total_mt))
        .collect();

    card(
        vendor_card.vendor.clone(),
        Column::new()
            .s(Width::fill())
            .s(Gap::new().y(SPACING_8))
            .item(
                Row::new()
                    .s(Width::fill())
                    .s(Gap::new().x(SPACING_8))
                    .s(Align::new().center_y())
                    .item(
                        El::new()
                            .s(Font::new().size(FONT_SIZE_TITLE).weight(FontWeight::Bold).color(TEXT_DARK))
                            .child(format_thousands(vendor_card.remediated_mt)),
                    )
                    .item(muted(format!("of {}", format_mt(vendor_card.target_mt))))
                    .item(El::new().s(Align::new().right()).child(badge(
                        format_percent(vendor_card.percent),
                        vendor_card.tone,
                    ))),
            )
            .item(progress_bar(vendor_card.percent, tone_color(vendor_card.tone)))
            .item(muted(format!("Lagging: {lagging}")))
            .item(muted("Weekly"))
            .item(bar_chart(daily, format_thousands, |_| ACCENT_BLUE)),
    )
}

fn empty_vendor_card() -> impl Element {
    card("No Data", muted("No vendor data available"))
}
