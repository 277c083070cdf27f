use super::overview::overall_progress;
use super::widgets::*;
use crate::theme::*;
use shared::content::{SiteCard, Sites, VendorSummary};
use shared::format::{format_mt, format_percent, format_thousands, short_date};
use shared::VendorContent;
use zoon::*;

pub fn vendor_content(content: VendorContent) -> impl Element {
    match content {
        VendorContent::Missing { vendor } => El::new()
            .s(Width::fill())
            .s(Padding::all(SPACING_24))
            .s(Font::new().size(FONT_SIZE_TITLE).color(TEXT_MUTED).center())
            .child(format!("No data available for {vendor}"))
            .unify(),
        VendorContent::Summary(summary) => vendor_summary(summary).unify(),
    }
}

fn vendor_summary(summary: VendorSummary) -> impl Element {
    let header = Column::new()
        .s(Width::fill())
        .s(Padding::all(SPACING_12))
        .s(Background::new().color(CARD_BG))
        .s(RoundedCorners::all(8))
        .s(card_shadow())
        .item(
            El::new()
                .s(Font::new().size(22).weight(FontWeight::SemiBold).color(DARK_GREEN))
                .child(format!("Vendor: {}", summary.vendor)),
        )
        .item(
            El::new().s(Font::new().size(FONT_SIZE_BODY).color(TEXT_DARK)).child(format!(
                "Progress Summary: {} Complete ({} of {})",
                format_percent(summary.progress.percent),
                format_mt(summary.progress.remediated_mt),
                format_mt(summary.progress.target_mt),
            )),
        );

    let clusters = summary
        .clusters
        .into_iter()
        .map(|cluster| (cluster.key, cluster.percent_complete))
        .collect();
    let weekly = summary
        .weekly
        .into_iter()
        .map(|point| (short_date(&point.date), point.total_mt))
        .collect();

    let metrics_row = card_grid([
        card(format!("{} Progress", summary.vendor), overall_progress(&summary.progress)).unify(),
        card("Cluster Performance", bar_chart(clusters, format_percent, percent_color)).unify(),
        card("Weekly Progress", bar_chart(weekly, format_thousands, |_| ACCENT_BLUE)).unify(),
    ]);

    let sites = match summary.sites {
        Sites::Chart(sites) => card_grid([card(
            "Sites Progress",
            bar_chart(
                sites.into_iter().map(|site| (site.key, site.target_mt)).collect(),
                format_mt,
                |_| LIGHT_GREEN,
            ),
        )
        .unify()])
        .unify(),
        Sites::Cards(cards) => card_grid(cards.into_iter().map(|site| site_card(site).unify())).unify(),
    };

    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(SPACING_16))
        .item(header)
        .item(metrics_row)
        .item(sites)
}

fn site_card(site: SiteCard) -> impl Element {
    card(
        format!("Site: {}", site.site),
        Column::new()
            .s(Width::fill())
            .s(Gap::new().y(SPACING_8))
            .item(
                Row::new()
                    .s(Width::fill())
                    .s(Align::new().center_y())
                    .item(
                        El::new()
                            .s(Font::new().size(FONT_SIZE_TITLE).weight(FontWeight::Bold).color(TEXT_DARK))
                            .child(format_mt(site.remediated_mt)),
                    )
                    .item(El::new().s(Align::new().right()).child(badge(format_percent(site.percent), site.tone))),
            )
            .item(progress_bar(site.percent, tone_color(site.tone)))
            .item(muted(format!("Target: {}", format_mt(site.target_mt)))),
    )
}
