//! Landing page content model.
//!
//! [`SummaryRenderer`] turns a dataset plus its metrics into plain data that
//! the frontend lays out. Keeping this free of UI types lets the rotation
//! machine and these summaries be tested without a browser.

use crate::dataset::Dataset;
use crate::metrics::{
    DashboardMetrics, FirstIncrement, GroupStats, ProgressPoint, daily_increments, daily_progress,
    last_points, percent_of, stats_by,
};
use serde::{Deserialize, Serialize};

pub const OVERVIEW_VENDOR_SLOTS: usize = 4;
pub const LAGGING_CLUSTERS: usize = 5;
const VENDOR_CARD_DAYS: usize = 5;
const VENDOR_CLUSTER_LIMIT: usize = 5;
const WEEKLY_DAYS: usize = 7;
const SITE_CARDS: usize = 3;
const SUCCESS_THRESHOLD: f64 = 50.0;

pub trait ContentRenderer {
    type Content;

    fn render_overview(&self, dataset: &Dataset, metrics: &DashboardMetrics) -> Self::Content;

    fn render_vendor(&self, dataset: &Dataset, metrics: &DashboardMetrics, vendor: &str) -> Self::Content;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
}

impl Tone {
    pub fn for_percent(percent: f64) -> Self {
        if percent > SUCCESS_THRESHOLD { Tone::Success } else { Tone::Warning }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Progress {
    pub percent: f64,
    pub remediated_mt: f64,
    pub target_mt: f64,
    pub latest_date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VendorCard {
    pub vendor: String,
    pub target_mt: f64,
    pub remediated_mt: f64,
    pub percent: f64,
    pub tone: Tone,
    /// First word of the vendor's lowest-percent cluster.
    pub lagging_cluster: Option<String>,
    pub daily: Vec<ProgressPoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OverviewContent {
    pub progress: Progress,
    /// Lowest percent first.
    pub lagging_clusters: Vec<GroupStats>,
    /// At most [`OVERVIEW_VENDOR_SLOTS`]; the view pads the rest.
    pub vendor_cards: Vec<VendorCard>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SiteCard {
    pub site: String,
    pub target_mt: f64,
    pub remediated_mt: f64,
    pub percent: f64,
    pub tone: Tone,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Sites {
    /// Every site, largest target first.
    Chart(Vec<GroupStats>),
    Cards(Vec<SiteCard>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VendorSummary {
    pub vendor: String,
    pub progress: Progress,
    pub clusters: Vec<GroupStats>,
    pub weekly: Vec<ProgressPoint>,
    pub sites: Sites,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum VendorContent {
    Missing { vendor: String },
    Summary(VendorSummary),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum LandingContent {
    Overview(OverviewContent),
    Vendor(VendorContent),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryRenderer;

impl SummaryRenderer {
    pub fn overview(&self, dataset: &Dataset, metrics: &DashboardMetrics) -> OverviewContent {
        let mut lagging_clusters = metrics.cluster_stats.clone();
        sort_by_percent(&mut lagging_clusters);
        lagging_clusters.truncate(LAGGING_CLUSTERS);

        let vendor_cards = metrics
            .vendor_stats
            .iter()
            .take(OVERVIEW_VENDOR_SLOTS)
            .map(|stats| vendor_card(dataset, stats))
            .collect();

        OverviewContent {
            progress: Progress {
                percent: metrics.percent_complete,
                remediated_mt: metrics.total_remediated,
                target_mt: metrics.total_to_remediate,
                latest_date: metrics.latest_date.clone(),
            },
            lagging_clusters,
            vendor_cards,
        }
    }

    pub fn vendor(&self, dataset: &Dataset, vendor: &str) -> VendorContent {
        let vendor_data = dataset.for_vendor(vendor);
        if vendor_data.is_empty() {
            return VendorContent::Missing {
                vendor: vendor.to_string(),
            };
        }

        let target_mt = vendor_data.total_target();
        let remediated_mt = vendor_data.total_latest();

        let mut clusters = stats_by(&vendor_data, |r| r.cluster.clone());
        sort_by_percent(&mut clusters);
        let keep_from = clusters.len().saturating_sub(VENDOR_CLUSTER_LIMIT);
        clusters.drain(..keep_from);

        let series = daily_progress(&vendor_data);
        let weekly = daily_increments(last_points(&series, WEEKLY_DAYS), FirstIncrement::Total);

        VendorContent::Summary(VendorSummary {
            vendor: vendor.to_string(),
            progress: Progress {
                percent: percent_of(remediated_mt, target_mt),
                remediated_mt,
                target_mt,
                latest_date: vendor_data.latest_label(),
            },
            clusters,
            weekly,
            sites: sites(&vendor_data),
        })
    }
}

impl ContentRenderer for SummaryRenderer {
    type Content = LandingContent;

    fn render_overview(&self, dataset: &Dataset, metrics: &DashboardMetrics) -> LandingContent {
        LandingContent::Overview(self.overview(dataset, metrics))
    }

    fn render_vendor(&self, dataset: &Dataset, _metrics: &DashboardMetrics, vendor: &str) -> LandingContent {
        LandingContent::Vendor(self.vendor(dataset, vendor))
    }
}

fn vendor_card(dataset: &Dataset, stats: &GroupStats) -> VendorCard {
    let vendor_data = dataset.for_vendor(&stats.key);

    let mut clusters = stats_by(&vendor_data, |r| r.cluster.clone());
    sort_by_percent(&mut clusters);
    let lagging_cluster = clusters
        .first()
        .and_then(|cluster| cluster.key.split_whitespace().next())
        .map(str::to_string);

    let series = daily_progress(&vendor_data);
    let daily = daily_increments(last_points(&series, VENDOR_CARD_DAYS), FirstIncrement::Zero);

    VendorCard {
        vendor: stats.key.clone(),
        target_mt: stats.target_mt,
        remediated_mt: stats.remediated_mt,
        percent: stats.percent_complete,
        tone: Tone::for_percent(stats.percent_complete),
        lagging_cluster,
        daily,
    }
}

fn sites(vendor_data: &Dataset) -> Sites {
    let mut by_target = stats_by(vendor_data, |r| r.ulb.clone());
    by_target.sort_by(|a, b| b.target_mt.total_cmp(&a.target_mt));

    if by_target.len() < SITE_CARDS {
        return Sites::Chart(by_target);
    }

    Sites::Cards(
        by_target
            .into_iter()
            .take(SITE_CARDS)
            .map(|stats| SiteCard {
                tone: Tone::for_percent(stats.percent_complete),
                site: stats.key,
                target_mt: stats.target_mt,
                remediated_mt: stats.remediated_mt,
                percent: stats.percent_complete,
            })
            .collect(),
    )
}

/// Stable, so equal percentages keep their key order.
fn sort_by_percent(stats: &mut [GroupStats]) {
    stats.sort_by(|a, b| a.percent_complete.total_cmp(&b.percent_complete));
}
