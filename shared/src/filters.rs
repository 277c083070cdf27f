//! Cross-filtering for the authenticated dashboard.

use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};

pub const DEFAULT_START_DATE: &str = "2025-05-01";
pub const FALLBACK_END_DATE: &str = "2025-05-12";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DashboardFilter {
    pub vendors: Vec<String>,
    pub clusters: Vec<String>,
    pub sites: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DashboardFilter {
    /// Empty selections and the full date range of `dataset`.
    pub fn reset(dataset: &Dataset) -> Self {
        Self {
            start_date: Some(DEFAULT_START_DATE.to_string()),
            end_date: Some(
                dataset
                    .date_labels
                    .last()
                    .cloned()
                    .unwrap_or_else(|| FALLBACK_END_DATE.to_string()),
            ),
            ..Self::default()
        }
    }

    /// Adds `value` when absent, removes it otherwise.
    pub fn toggle(selection: &mut Vec<String>, value: &str) {
        match selection.iter().position(|v| v == value) {
            Some(idx) => {
                selection.remove(idx);
            }
            None => selection.push(value.to_string()),
        }
    }

    fn date_in_range(&self, date: &str) -> bool {
        let after_start = self.start_date.as_deref().is_none_or(|start| start <= date);
        let before_end = self.end_date.as_deref().is_none_or(|end| date <= end);
        after_start && before_end
    }
}

/// Options offered by each filter given the current selections.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub vendors: Vec<String>,
    pub clusters: Vec<String>,
    pub sites: Vec<String>,
    pub dates: Vec<String>,
    /// `filter` with selections that are no longer offered removed.
    pub filter: DashboardFilter,
}

impl FilterOptions {
    pub fn resolve(dataset: &Dataset, filter: &DashboardFilter) -> Self {
        let mut pruned = filter.clone();

        let by_vendor = dataset.subset(|r| selected(&filter.vendors, &r.vendor));
        let clusters = by_vendor.clusters();

        pruned.clusters.retain(|c| clusters.contains(c));
        let by_cluster = by_vendor.subset(|r| selected(&pruned.clusters, &r.cluster));
        let sites = by_cluster.sites();

        pruned.sites.retain(|s| sites.contains(s));

        Self {
            vendors: dataset.vendors(),
            clusters,
            sites,
            dates: dataset.date_labels.clone(),
            filter: pruned,
        }
    }
}

impl Dataset {
    /// Records matching every non-empty selection, restricted to the date range.
    ///
    /// When no date column falls inside the range the latest column is kept so
    /// the result still has a "remediated so far" figure.
    pub fn filter(&self, filter: &DashboardFilter) -> Dataset {
        let records = self.subset(|r| {
            selected(&filter.vendors, &r.vendor)
                && selected(&filter.clusters, &r.cluster)
                && selected(&filter.sites, &r.ulb)
        });

        if self.date_labels.is_empty() {
            return records;
        }

        let mut columns: Vec<usize> = self
            .date_labels
            .iter()
            .enumerate()
            .filter(|(_, date)| filter.date_in_range(date))
            .map(|(idx, _)| idx)
            .collect();
        if columns.is_empty() {
            columns.push(self.date_labels.len() - 1);
        }
        records.with_date_columns(&columns)
    }
}

fn selected(selection: &[String], value: &str) -> bool {
    selection.is_empty() || selection.iter().any(|s| s == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::sample;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn vendor_selection_narrows_cluster_and_site_options() {
        let filter = DashboardFilter {
            vendors: strings(&["tharuni"]),
            ..Default::default()
        };
        let options = FilterOptions::resolve(&sample(), &filter);
        assert_eq!(options.clusters, strings(&["Kurnool, West", "Nellore North"]));
        assert_eq!(options.sites, strings(&["Adoni", "Gudur"]));
        assert_eq!(options.vendors, strings(&["tharuni", "zigma"]));
    }

    #[test]
    fn stale_selections_are_pruned() {
        let filter = DashboardFilter {
            vendors: strings(&["tharuni"]),
            clusters: strings(&["Guntur"]),
            sites: strings(&["Tenali", "Gudur"]),
            ..Default::default()
        };
        let options = FilterOptions::resolve(&sample(), &filter);
        assert!(options.filter.clusters.is_empty());
        assert_eq!(options.filter.sites, strings(&["Gudur"]));
    }

    #[test]
    fn filter_applies_selections_and_date_range() {
        let filter = DashboardFilter {
            clusters: strings(&["Guntur"]),
            start_date: Some("2025-05-02".to_string()),
            end_date: Some("2025-05-02".to_string()),
            ..Default::default()
        };
        let filtered = sample().filter(&filter);
        assert_eq!(filtered.records.len(), 2);
        assert_eq!(filtered.date_labels, strings(&["2025-05-02"]));
        assert_eq!(filtered.total_latest(), 40.0);
    }

    #[test]
    fn empty_date_range_keeps_latest_column() {
        let filter = DashboardFilter {
            start_date: Some("2026-01-01".to_string()),
            ..Default::default()
        };
        let filtered = sample().filter(&filter);
        assert_eq!(filtered.date_labels, strings(&["2025-05-03"]));
    }

    #[test]
    fn reset_spans_dataset_dates() {
        let reset = DashboardFilter::reset(&sample());
        assert_eq!(reset.start_date.as_deref(), Some(DEFAULT_START_DATE));
        assert_eq!(reset.end_date.as_deref(), Some("2025-05-03"));
        assert!(reset.vendors.is_empty());

        let bare = DashboardFilter::reset(&Dataset::default());
        assert_eq!(bare.end_date.as_deref(), Some(FALLBACK_END_DATE));
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut selection = Vec::new();
        DashboardFilter::toggle(&mut selection, "zigma");
        assert_eq!(selection, strings(&["zigma"]));
        DashboardFilter::toggle(&mut selection, "zigma");
        assert!(selection.is_empty());
    }
}
