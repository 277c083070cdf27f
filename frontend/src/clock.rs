use crate::data::DashboardData;
use crate::dataflow::Actor;
use chrono::{NaiveDate, NaiveDateTime};
use futures::{FutureExt, StreamExt, select};
use shared::{LandingSettings, format_clock};
use zoon::{Signal, SignalExt, Timer};

/// Wall clock shown in the landing status bar and the dashboard navbar.
#[derive(Clone, Debug)]
pub struct Clock {
    pub text: Actor<String>,
}

impl Clock {
    pub fn new(data: &DashboardData) -> Self {
        let mut settings_stream = data.settings_signal().to_stream().boxed_local().fuse();

        let text = Actor::new(format_clock(local_now()), async move |state| {
            let mut interval_ms = LandingSettings::default().clock_interval_ms;
            loop {
                select! {
                    settings = settings_stream.next() => {
                        let Some(settings) = settings else { break };
                        interval_ms = settings.clock_interval_ms;
                    }
                    _ = Timer::sleep(interval_ms).fuse() => {}
                }
                state.set_neq(format_clock(local_now()));
            }
        });

        Self { text }
    }

    pub fn signal(&self) -> impl Signal<Item = String> + use<> {
        self.text.signal()
    }
}

/// Browser local time. Falls back to the epoch if the browser reports a
/// date chrono cannot represent.
pub fn local_now() -> NaiveDateTime {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .and_then(|date| date.and_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds()))
        .unwrap_or_default()
}

pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}
