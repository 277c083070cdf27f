//! Filter state for the authenticated dashboard.

use crate::data::DashboardData;
use crate::dataflow::{Actor, Relay, relay};
use futures::{StreamExt, select};
use shared::metrics::{cluster_progress, daily_progress, vendor_progress};
use shared::{DashboardFilter, DashboardMetrics, DashboardSnapshot, Dataset, FilterOptions, ProgressPoint};
use std::collections::BTreeMap;
use std::sync::Arc;
use zoon::{Signal, SignalExt};

/// Everything the dashboard renders for the current filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterView {
    pub options: FilterOptions,
    pub dataset: Dataset,
    pub metrics: DashboardMetrics,
    pub daily: Vec<ProgressPoint>,
    /// Cumulative series per vendor and per cluster, keyed by name.
    pub vendor_trend: BTreeMap<String, Vec<ProgressPoint>>,
    pub cluster_trend: BTreeMap<String, Vec<ProgressPoint>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    VendorToggled(String),
    ClusterToggled(String),
    SiteToggled(String),
    StartDateSelected(String),
    EndDateSelected(String),
    ResetPressed,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub filter: DashboardFilter,
    pub view: Option<Arc<FilterView>>,
    source: Option<Arc<DashboardSnapshot>>,
}

impl DashboardState {
    /// The first dataset resets the filter; later reloads keep the user's
    /// selections, minus values that disappeared.
    pub fn set_snapshot(&mut self, snapshot: Option<Arc<DashboardSnapshot>>) {
        let Some(snapshot) = snapshot else {
            self.source = None;
            self.view = None;
            return;
        };
        if self.source.as_ref().is_some_and(|source| Arc::ptr_eq(source, &snapshot)) {
            return;
        }
        if self.source.is_none() {
            self.filter = DashboardFilter::reset(&snapshot.dataset);
        }
        self.source = Some(snapshot);
        self.recompute();
    }

    pub fn apply(&mut self, event: FilterEvent) {
        let filter = &mut self.filter;
        match event {
            FilterEvent::VendorToggled(vendor) => DashboardFilter::toggle(&mut filter.vendors, &vendor),
            FilterEvent::ClusterToggled(cluster) => DashboardFilter::toggle(&mut filter.clusters, &cluster),
            FilterEvent::SiteToggled(site) => DashboardFilter::toggle(&mut filter.sites, &site),
            FilterEvent::StartDateSelected(date) => {
                if filter.end_date.as_deref().is_some_and(|end| end < date.as_str()) {
                    filter.end_date = Some(date.clone());
                }
                filter.start_date = Some(date);
            }
            FilterEvent::EndDateSelected(date) => {
                if filter.start_date.as_deref().is_some_and(|start| start > date.as_str()) {
                    filter.start_date = Some(date.clone());
                }
                filter.end_date = Some(date);
            }
            FilterEvent::ResetPressed => {
                if let Some(source) = &self.source {
                    self.filter = DashboardFilter::reset(&source.dataset);
                }
            }
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        let Some(source) = &self.source else {
            return;
        };
        let options = FilterOptions::resolve(&source.dataset, &self.filter);
        self.filter = options.filter.clone();

        let dataset = source.dataset.filter(&self.filter);
        let metrics = DashboardMetrics::compute(&dataset);
        let daily = daily_progress(&dataset);
        let vendor_trend = vendor_progress(&dataset);
        let cluster_trend = cluster_progress(&dataset);
        self.view = Some(Arc::new(FilterView {
            options,
            dataset,
            metrics,
            daily,
            vendor_trend,
            cluster_trend,
        }));
    }
}

#[derive(Clone, Debug)]
pub struct DashboardFilters {
    pub state: Actor<DashboardState>,
    pub vendor_toggled_relay: Relay<String>,
    pub cluster_toggled_relay: Relay<String>,
    pub site_toggled_relay: Relay<String>,
    pub start_date_selected_relay: Relay<String>,
    pub end_date_selected_relay: Relay<String>,
    pub reset_pressed_relay: Relay<()>,
}

impl DashboardFilters {
    pub fn new(data: &DashboardData) -> Self {
        let (vendor_toggled_relay, mut vendor_toggled_stream) = relay();
        let (cluster_toggled_relay, mut cluster_toggled_stream) = relay();
        let (site_toggled_relay, mut site_toggled_stream) = relay();
        let (start_date_selected_relay, mut start_date_selected_stream) = relay();
        let (end_date_selected_relay, mut end_date_selected_stream) = relay();
        let (reset_pressed_relay, mut reset_pressed_stream) = relay::<()>();
        let mut snapshot_stream = data.snapshot_signal().to_stream().boxed_local().fuse();

        let state = Actor::new(DashboardState::default(), async move |state| {
            loop {
                let event = select! {
                    snapshot = snapshot_stream.next() => {
                        let Some(snapshot) = snapshot else { break };
                        state.lock_mut().set_snapshot(snapshot);
                        continue;
                    }
                    vendor = vendor_toggled_stream.next() => vendor.map(FilterEvent::VendorToggled),
                    cluster = cluster_toggled_stream.next() => cluster.map(FilterEvent::ClusterToggled),
                    site = site_toggled_stream.next() => site.map(FilterEvent::SiteToggled),
                    date = start_date_selected_stream.next() => date.map(FilterEvent::StartDateSelected),
                    date = end_date_selected_stream.next() => date.map(FilterEvent::EndDateSelected),
                    reset = reset_pressed_stream.next() => reset.map(|()| FilterEvent::ResetPressed),
                };
                match event {
                    Some(event) => state.lock_mut().apply(event),
                    None => break,
                }
            }
        });

        Self {
            state,
            vendor_toggled_relay,
            cluster_toggled_relay,
            site_toggled_relay,
            start_date_selected_relay,
            end_date_selected_relay,
            reset_pressed_relay,
        }
    }

    pub fn filter_signal(&self) -> impl Signal<Item = DashboardFilter> + use<> {
        self.state.signal().map(|state| state.filter).dedupe_cloned()
    }

    pub fn view_signal(&self) -> impl Signal<Item = Option<Arc<FilterView>>> + use<> {
        self.state.signal().map(|state| state.view)
    }
}
