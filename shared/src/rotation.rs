//! Landing page content rotation.
//!
//! The public landing page cycles `Overview -> vendor 0 -> ... -> vendor N-1 ->
//! Overview` on every rotation tick. [`Rotator`] owns an immutable
//! [`DashboardSnapshot`] and turns `(tick, previous state)` into the next
//! state plus the content rendered for it.
//!
//! # Transition rules
//!
//! - no previous state: start at `Overview` with a count of 0
//! - no tick: render the current view, state unchanged
//! - `Overview` + tick: `VendorAt(0)`
//! - `VendorAt(i)` + tick: `VendorAt(i + 1)`, or `Overview` after the last vendor
//!
//! Every tick-driven step bumps `rotation_count` and stamps `last_updated_ms`.
//! With no vendors at all the machine stays on `Overview`.

use crate::content::ContentRenderer;
use crate::dataset::Dataset;
use crate::metrics::DashboardMetrics;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    VendorAt(usize),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RotationState {
    pub view: View,
    pub rotation_count: u64,
    /// Milliseconds since the Unix epoch of the last tick-driven step.
    pub last_updated_ms: Option<i64>,
}

impl RotationState {
    pub fn initial() -> Self {
        Self {
            view: View::Overview,
            rotation_count: 0,
            last_updated_ms: None,
        }
    }

    /// Drops a `VendorAt` index that no longer exists, e.g. after a data reload.
    pub fn normalized(self, vendor_count: usize) -> Self {
        match self.view {
            View::VendorAt(idx) if idx >= vendor_count => Self {
                view: View::Overview,
                ..self
            },
            _ => self,
        }
    }

    /// Applies one transition.
    pub fn advance(current: Option<Self>, tick: Option<Tick>, vendor_count: usize, now_ms: i64) -> Self {
        let state = current.unwrap_or_else(Self::initial).normalized(vendor_count);
        if tick.is_none() {
            return state;
        }

        let view = match state.view {
            _ if vendor_count == 0 => View::Overview,
            View::Overview => View::VendorAt(0),
            View::VendorAt(idx) => match (idx + 1) % vendor_count {
                0 => View::Overview,
                next => View::VendorAt(next),
            },
        };

        Self {
            view,
            rotation_count: state.rotation_count + 1,
            last_updated_ms: Some(now_ms),
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::initial()
    }
}

/// One firing of the rotation interval. The counter only grows; its value is
/// not interpreted beyond "an interval elapsed".
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tick(pub u64);

/// What the renderer is asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSelector {
    Overview,
    Vendor(String),
}

/// Everything rotation needs, built once per loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub dataset: Dataset,
    pub metrics: DashboardMetrics,
    pub vendors: Vec<String>,
}

impl DashboardSnapshot {
    pub fn new(dataset: Dataset) -> Self {
        let metrics = DashboardMetrics::compute(&dataset);
        let vendors = dataset.vendors();
        Self {
            dataset,
            metrics,
            vendors,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotationStep<C> {
    pub content: C,
    pub state: RotationState,
    pub selector: ContentSelector,
}

#[derive(Debug, Clone)]
pub struct Rotator {
    snapshot: Arc<DashboardSnapshot>,
}

impl Rotator {
    pub fn new(snapshot: Arc<DashboardSnapshot>) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &Arc<DashboardSnapshot> {
        &self.snapshot
    }

    pub fn vendor_count(&self) -> usize {
        self.snapshot.vendors.len()
    }

    pub fn selector(&self, view: View) -> ContentSelector {
        match view {
            View::VendorAt(idx) => self
                .snapshot
                .vendors
                .get(idx)
                .map(|vendor| ContentSelector::Vendor(vendor.clone()))
                .unwrap_or(ContentSelector::Overview),
            View::Overview => ContentSelector::Overview,
        }
    }

    /// Advances the state and renders the resulting view.
    pub fn step<R: ContentRenderer>(
        &self,
        renderer: &R,
        tick: Option<Tick>,
        current: Option<RotationState>,
        now_ms: i64,
    ) -> RotationStep<R::Content> {
        let state = RotationState::advance(current, tick, self.vendor_count(), now_ms);
        let selector = self.selector(state.view);
        let snapshot = &self.snapshot;
        let content = match &selector {
            ContentSelector::Overview => renderer.render_overview(&snapshot.dataset, &snapshot.metrics),
            ContentSelector::Vendor(vendor) => {
                renderer.render_vendor(&snapshot.dataset, &snapshot.metrics, vendor)
            }
        };
        RotationStep {
            content,
            state,
            selector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders selectors as plain strings so the sequence is easy to assert.
    struct LabelRenderer;

    impl ContentRenderer for LabelRenderer {
        type Content = String;

        fn render_overview(&self, _dataset: &Dataset, _metrics: &DashboardMetrics) -> String {
            "overview".to_string()
        }

        fn render_vendor(&self, _dataset: &Dataset, _metrics: &DashboardMetrics, vendor: &str) -> String {
            vendor.to_string()
        }
    }

    fn rotator(vendors: &[&str]) -> Rotator {
        let mut csv = String::from("Vendor,Cluster,ULB,Quantity to be remediated in MT\n");
        for vendor in vendors {
            csv.push_str(&format!("{vendor},North,Site,10\n"));
        }
        let snapshot = DashboardSnapshot::new(Dataset::from_csv_str(&csv).unwrap());
        Rotator::new(Arc::new(snapshot))
    }

    fn run_ticks(rotator: &Rotator, ticks: u64) -> Vec<String> {
        let mut state = Some(RotationState::initial());
        (1..=ticks)
            .map(|n| {
                let step = rotator.step(&LabelRenderer, Some(Tick(n)), state.take(), n as i64);
                state = Some(step.state);
                step.content
            })
            .collect()
    }

    #[test]
    fn first_render_without_state_is_overview() {
        let step = rotator(&["zigma"]).step(&LabelRenderer, None, None, 0);
        assert_eq!(step.content, "overview");
        assert_eq!(step.state, RotationState::initial());
        assert_eq!(step.selector, ContentSelector::Overview);
    }

    #[test]
    fn two_vendor_example_sequence() {
        let rotator = rotator(&["zigma", "tharuni"]);
        // vendor list is sorted: ["tharuni", "zigma"]
        let first = rotator.step(&LabelRenderer, Some(Tick(1)), Some(RotationState::initial()), 100);
        assert_eq!(first.state.view, View::VendorAt(0));
        assert_eq!(first.content, "tharuni");
        assert_eq!(first.state.rotation_count, 1);
        assert_eq!(first.state.last_updated_ms, Some(100));

        let second = rotator.step(&LabelRenderer, Some(Tick(2)), Some(first.state), 200);
        assert_eq!(second.state.view, View::VendorAt(1));
        assert_eq!(second.content, "zigma");
        assert_eq!(second.state.rotation_count, 2);

        let third = rotator.step(&LabelRenderer, Some(Tick(3)), Some(second.state), 300);
        assert_eq!(third.state.view, View::Overview);
        assert_eq!(third.content, "overview");
        assert_eq!(third.state.rotation_count, 3);
    }

    #[test]
    fn transition_table_matches_given_vendor_order() {
        let mut state = RotationState::initial();
        let mut views = Vec::new();
        for n in 0..3 {
            state = RotationState::advance(Some(state), Some(Tick(n)), 2, 0);
            views.push((state.view, state.rotation_count));
        }
        assert_eq!(
            views,
            vec![(View::VendorAt(0), 1), (View::VendorAt(1), 2), (View::Overview, 3)]
        );
    }

    #[test]
    fn sequence_has_period_n_plus_one() {
        for n in 1..=5usize {
            let names: Vec<String> = (0..n).map(|i| format!("vendor{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let rotator = rotator(&refs);

            let rendered = run_ticks(&rotator, (3 * (n + 1)) as u64);
            let mut expected: Vec<String> = names.clone();
            expected.push("overview".to_string());
            let cycle: Vec<String> = expected.iter().cycle().take(rendered.len()).cloned().collect();
            assert_eq!(rendered, cycle, "vendor count {n}");
        }
    }

    #[test]
    fn no_tick_render_keeps_state() {
        let rotator = rotator(&["zigma", "tharuni"]);
        let state = RotationState {
            view: View::VendorAt(1),
            rotation_count: 7,
            last_updated_ms: Some(42),
        };
        let step = rotator.step(&LabelRenderer, None, Some(state.clone()), 999);
        assert_eq!(step.state, state);
        assert_eq!(step.content, "zigma");
    }

    #[test]
    fn count_grows_by_one_per_tick() {
        let rotator = rotator(&["a", "b", "c"]);
        let mut state = None;
        for n in 1..=10u64 {
            let step = rotator.step(&LabelRenderer, Some(Tick(n)), state, 0);
            assert_eq!(step.state.rotation_count, n);
            state = Some(step.state);
        }
    }

    #[test]
    fn empty_vendor_list_stays_on_overview() {
        let rotator = Rotator::new(Arc::new(DashboardSnapshot::new(Dataset::default())));
        let mut state = None;
        for n in 1..=6u64 {
            let step = rotator.step(&LabelRenderer, Some(Tick(n)), state, 0);
            assert_eq!(step.content, "overview");
            assert_eq!(step.state.view, View::Overview);
            state = Some(step.state);
        }
    }

    #[test]
    fn stale_vendor_index_falls_back_to_overview() {
        let stale = RotationState {
            view: View::VendorAt(4),
            rotation_count: 9,
            last_updated_ms: None,
        };
        let rotator = rotator(&["zigma"]);
        let step = rotator.step(&LabelRenderer, None, Some(stale), 0);
        assert_eq!(step.state.view, View::Overview);
        assert_eq!(step.state.rotation_count, 9);
        assert_eq!(step.content, "overview");
    }

    #[test]
    fn tick_without_state_starts_rotation() {
        let step = rotator(&["zigma"]).step(&LabelRenderer, Some(Tick(1)), None, 5);
        assert_eq!(step.state.view, View::VendorAt(0));
        assert_eq!(step.state.rotation_count, 1);
    }
}
