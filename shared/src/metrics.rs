use crate::dataset::{Dataset, RemediationRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated target vs. remediated tonnage for one group (vendor, cluster, ...).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub key: String,
    pub target_mt: f64,
    pub remediated_mt: f64,
    /// Rounded to one decimal, 0 when the target is not positive.
    pub percent_complete: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UlbStats {
    pub ulb: String,
    pub cluster: String,
    pub target_mt: f64,
    pub remediated_mt: f64,
    pub percent_complete: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProgressPoint {
    pub date: String,
    pub total_mt: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    pub total_to_remediate: f64,
    pub total_remediated: f64,
    /// Not rounded; views format it with one decimal.
    pub percent_complete: f64,
    pub april_remediated: f64,
    pub latest_date: String,
    pub vendor_stats: Vec<GroupStats>,
    pub cluster_stats: Vec<GroupStats>,
    pub ulb_stats: Vec<UlbStats>,
}

impl DashboardMetrics {
    pub fn compute(dataset: &Dataset) -> Self {
        let total_to_remediate = dataset.total_target();
        let total_remediated = dataset.total_latest();

        Self {
            total_to_remediate,
            total_remediated,
            percent_complete: percent_of(total_remediated, total_to_remediate),
            april_remediated: dataset.records.iter().map(|r| r.april_mt).sum(),
            latest_date: dataset.latest_label(),
            vendor_stats: stats_by(dataset, |r| r.vendor.clone()),
            cluster_stats: stats_by(dataset, |r| r.cluster.clone()),
            ulb_stats: group_stats(dataset, |r| (r.ulb.clone(), r.cluster.clone()))
                .into_iter()
                .map(|((ulb, cluster), stats)| UlbStats {
                    ulb,
                    cluster,
                    target_mt: stats.target_mt,
                    remediated_mt: stats.remediated_mt,
                    percent_complete: stats.percent_complete,
                })
                .collect(),
        }
    }

    pub fn vendor(&self, vendor: &str) -> Option<&GroupStats> {
        self.vendor_stats.iter().find(|stats| stats.key == vendor)
    }
}

pub fn percent_of(done: f64, target: f64) -> f64 {
    if target > 0.0 { done / target * 100.0 } else { 0.0 }
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Groups records by `key` (sorted by key) and sums target and latest tonnage.
pub fn group_stats<K, F>(dataset: &Dataset, key: F) -> Vec<(K, GroupStats)>
where
    K: Ord + Clone + GroupKey,
    F: Fn(&RemediationRecord) -> K,
{
    let mut sums: BTreeMap<K, (f64, f64)> = BTreeMap::new();
    for record in &dataset.records {
        let entry = sums.entry(key(record)).or_insert((0.0, 0.0));
        entry.0 += record.target_mt;
        entry.1 += dataset.latest_value(record);
    }

    sums.into_iter()
        .map(|(key, (target_mt, remediated_mt))| {
            let stats = GroupStats {
                key: key.label(),
                target_mt,
                remediated_mt,
                percent_complete: round1(percent_of(remediated_mt, target_mt)),
            };
            (key, stats)
        })
        .collect()
}

/// Display label of a grouping key.
pub trait GroupKey {
    fn label(&self) -> String;
}

impl GroupKey for String {
    fn label(&self) -> String {
        self.clone()
    }
}

impl GroupKey for (String, String) {
    fn label(&self) -> String {
        format!("{} ({})", self.0, self.1)
    }
}

/// Convenience wrapper for single-string grouping used by views.
pub fn stats_by(dataset: &Dataset, key: impl Fn(&RemediationRecord) -> String) -> Vec<GroupStats> {
    group_stats(dataset, key).into_iter().map(|(_, stats)| stats).collect()
}

/// Total cumulative tonnage per date column.
pub fn daily_progress(dataset: &Dataset) -> Vec<ProgressPoint> {
    dataset
        .date_labels
        .iter()
        .enumerate()
        .map(|(idx, date)| ProgressPoint {
            date: date.clone(),
            total_mt: dataset.total_at(idx),
        })
        .collect()
}

pub fn vendor_progress(dataset: &Dataset) -> BTreeMap<String, Vec<ProgressPoint>> {
    dataset
        .vendors()
        .into_iter()
        .map(|vendor| {
            let series = daily_progress(&dataset.for_vendor(&vendor));
            (vendor, series)
        })
        .collect()
}

pub fn cluster_progress(dataset: &Dataset) -> BTreeMap<String, Vec<ProgressPoint>> {
    dataset
        .clusters()
        .into_iter()
        .map(|cluster| {
            let series = daily_progress(&dataset.subset(|r| r.cluster == cluster));
            (cluster, series)
        })
        .collect()
}

/// How the first point of an increment series is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstIncrement {
    Zero,
    Total,
}

/// Day-over-day differences of a cumulative series.
pub fn daily_increments(series: &[ProgressPoint], first: FirstIncrement) -> Vec<ProgressPoint> {
    series
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let total_mt = match (idx, first) {
                (0, FirstIncrement::Zero) => 0.0,
                (0, FirstIncrement::Total) => point.total_mt,
                _ => point.total_mt - series[idx - 1].total_mt,
            };
            ProgressPoint {
                date: point.date.clone(),
                total_mt,
            }
        })
        .collect()
}

/// The trailing `count` points of a series.
pub fn last_points(series: &[ProgressPoint], count: usize) -> &[ProgressPoint] {
    &series[series.len().saturating_sub(count)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::sample;

    #[test]
    fn totals_use_latest_cumulative_column() {
        let metrics = DashboardMetrics::compute(&sample());
        assert_eq!(metrics.total_to_remediate, 430.0);
        assert_eq!(metrics.total_remediated, 150.0);
        assert!((metrics.percent_complete - 150.0 / 430.0 * 100.0).abs() < 1e-9);
        assert_eq!(metrics.april_remediated, 23.0);
        assert_eq!(metrics.latest_date, "2025-05-03");
    }

    #[test]
    fn vendor_stats_are_sorted_and_rounded() {
        let metrics = DashboardMetrics::compute(&sample());
        let keys: Vec<_> = metrics.vendor_stats.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["tharuni", "zigma"]);

        let zigma = metrics.vendor("zigma").unwrap();
        assert_eq!(zigma.target_mt, 350.0);
        assert_eq!(zigma.remediated_mt, 110.0);
        assert_eq!(zigma.percent_complete, 31.4);
    }

    #[test]
    fn zero_target_groups_report_zero_percent() {
        let metrics = DashboardMetrics::compute(&sample());
        let kurnool = metrics
            .cluster_stats
            .iter()
            .find(|s| s.key == "Kurnool, West")
            .unwrap();
        assert_eq!(kurnool.percent_complete, 0.0);
        assert_eq!(percent_of(5.0, 0.0), 0.0);
    }

    #[test]
    fn ulb_stats_carry_cluster() {
        let metrics = DashboardMetrics::compute(&sample());
        let gudur = metrics.ulb_stats.iter().find(|s| s.ulb == "Gudur").unwrap();
        assert_eq!(gudur.cluster, "Nellore North");
        assert_eq!(gudur.percent_complete, 50.0);
    }

    #[test]
    fn empty_dataset_has_zero_metrics() {
        let metrics = DashboardMetrics::compute(&Dataset::default());
        assert_eq!(metrics.total_to_remediate, 0.0);
        assert_eq!(metrics.percent_complete, 0.0);
        assert!(metrics.vendor_stats.is_empty());
    }

    #[test]
    fn progress_series_per_date_and_group() {
        let dataset = sample();
        let totals: Vec<f64> = daily_progress(&dataset).iter().map(|p| p.total_mt).collect();
        assert_eq!(totals, vec![41.0, 84.0, 150.0]);

        let by_vendor = vendor_progress(&dataset);
        assert_eq!(by_vendor["tharuni"][2].total_mt, 40.0);

        let by_cluster = cluster_progress(&dataset);
        assert_eq!(by_cluster["Guntur"][0].total_mt, 25.0);
    }

    #[test]
    fn increments_differ_only_in_first_point() {
        let series = daily_progress(&sample());
        let from_zero: Vec<f64> = daily_increments(&series, FirstIncrement::Zero)
            .iter()
            .map(|p| p.total_mt)
            .collect();
        let from_total: Vec<f64> = daily_increments(&series, FirstIncrement::Total)
            .iter()
            .map(|p| p.total_mt)
            .collect();
        assert_eq!(from_zero, vec![0.0, 43.0, 66.0]);
        assert_eq!(from_total, vec![41.0, 43.0, 66.0]);
    }

    #[test]
    fn last_points_handles_short_series() {
        let series = daily_progress(&sample());
        assert_eq!(last_points(&series, 2).len(), 2);
        assert_eq!(last_points(&series, 7).len(), 3);
    }
}
