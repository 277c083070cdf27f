//! Auto-rotating public landing page state.

use crate::clock::now_ms;
use crate::data::DashboardData;
use crate::dataflow::Actor;
use crate::routing::Router;
use futures::future::{self, FutureExt};
use futures::{StreamExt, select};
use shared::{
    DashboardSnapshot, LandingContent, LandingSettings, RefreshIcon, RotationState, RotationStep, Rotator,
    SummaryRenderer, Tick, auto_rotation_enabled, refresh_indicator,
};
use std::sync::Arc;
use zoon::{Signal, SignalExt, Timer};

#[derive(Debug, Clone, PartialEq)]
pub struct LandingView {
    pub step: Option<RotationStep<LandingContent>>,
    pub icon: RefreshIcon,
}

impl Default for LandingView {
    fn default() -> Self {
        Self {
            step: None,
            icon: RefreshIcon::Idle,
        }
    }
}

/// Owns the rotation state between renders and decides when ticks fire.
#[derive(Debug, Clone)]
pub struct RotationDriver {
    rotator: Option<Rotator>,
    state: Option<RotationState>,
    path: String,
    settings: LandingSettings,
    ticks: u64,
    deadline: Option<Deadline>,
}

/// When the pending tick fires, and the interval it was armed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deadline {
    at_ms: i64,
    interval_ms: u32,
}

impl RotationDriver {
    pub fn new(path: String) -> Self {
        Self {
            rotator: None,
            state: None,
            path,
            settings: LandingSettings::default(),
            ticks: 0,
            deadline: None,
        }
    }

    /// Returns `true` when the snapshot actually changed.
    pub fn set_snapshot(&mut self, snapshot: Option<Arc<DashboardSnapshot>>) -> bool {
        let unchanged = match (&self.rotator, &snapshot) {
            (Some(rotator), Some(snapshot)) => Arc::ptr_eq(rotator.snapshot(), snapshot),
            (None, None) => true,
            _ => false,
        };
        self.rotator = snapshot.map(Rotator::new);
        !unchanged
    }

    pub fn set_settings(&mut self, settings: LandingSettings) {
        self.settings = settings;
    }

    pub fn set_path(&mut self, path: String) {
        self.path = path;
    }

    pub fn enabled(&self) -> bool {
        auto_rotation_enabled(&self.path, &self.settings.route)
    }

    /// Interval until the next tick, or `None` while rotation is paused.
    pub fn tick_interval(&self) -> Option<u32> {
        (self.enabled() && self.rotator.is_some()).then_some(self.settings.rotation_interval_ms)
    }

    /// Milliseconds left until the pending tick. Arms a deadline when none is
    /// pending or the interval changed; unrelated events keep the elapsed time.
    pub fn time_to_tick(&mut self, now_ms: i64) -> Option<u32> {
        let Some(interval_ms) = self.tick_interval() else {
            self.deadline = None;
            return None;
        };
        let deadline = match self.deadline {
            Some(deadline) if deadline.interval_ms == interval_ms => deadline,
            _ => {
                let deadline = Deadline {
                    at_ms: now_ms + i64::from(interval_ms),
                    interval_ms,
                };
                self.deadline = Some(deadline);
                deadline
            }
        };
        let remaining = (deadline.at_ms - now_ms).max(0);
        Some(u32::try_from(remaining).unwrap_or(interval_ms))
    }

    pub fn next_tick(&mut self) -> Tick {
        self.deadline = None;
        self.ticks += 1;
        Tick(self.ticks)
    }

    pub fn render(&mut self, tick: Option<Tick>, now_ms: i64) -> Option<RotationStep<LandingContent>> {
        let rotator = self.rotator.as_ref()?;
        let step = rotator.step(&SummaryRenderer, tick, self.state.take(), now_ms);
        self.state = Some(step.state.clone());
        Some(step)
    }

    pub fn state(&self) -> Option<&RotationState> {
        self.state.as_ref()
    }
}

#[derive(Clone, Debug)]
pub struct Landing {
    pub view: Actor<LandingView>,
}

impl Landing {
    pub fn new(data: &DashboardData, router: &Router) -> Self {
        let mut snapshot_stream = data.snapshot_signal().to_stream().boxed_local().fuse();
        let mut settings_stream = data.settings_signal().to_stream().boxed_local().fuse();
        let mut path_stream = router.path_signal().to_stream().boxed_local().fuse();
        let initial_path = crate::routing::current_path();

        let view = Actor::new(LandingView::default(), async move |state| {
            let mut driver = RotationDriver::new(initial_path);
            loop {
                let timer = match driver.time_to_tick(now_ms()) {
                    Some(remaining_ms) => Timer::sleep(remaining_ms).left_future(),
                    None => future::pending::<()>().right_future(),
                };
                let tick = select! {
                    snapshot = snapshot_stream.next() => {
                        let Some(snapshot) = snapshot else { break };
                        if !driver.set_snapshot(snapshot) {
                            continue;
                        }
                        None
                    }
                    settings = settings_stream.next() => {
                        let Some(settings) = settings else { break };
                        driver.set_settings(settings);
                        continue;
                    }
                    path = path_stream.next() => {
                        let Some(path) = path else { break };
                        driver.set_path(path);
                        None
                    }
                    _ = timer.fuse() => Some(driver.next_tick()),
                };

                let step = driver.render(tick, now_ms());
                state.set(LandingView {
                    step,
                    icon: refresh_indicator(tick),
                });
            }
        });

        Self { view }
    }

    pub fn signal(&self) -> impl Signal<Item = LandingView> + use<> {
        self.view.signal()
    }
}
