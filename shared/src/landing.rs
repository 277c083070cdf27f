//! Stateless helpers driven by the landing page timers.

use crate::rotation::Tick;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const CLOCK_FORMAT: &str = "%b %d, %Y • %I:%M:%S %p";

/// `May 12, 2025 • 03:04:05 PM`
pub fn format_clock(now: NaiveDateTime) -> String {
    now.format(CLOCK_FORMAT).to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshIcon {
    Idle,
    Spinning,
}

impl RefreshIcon {
    pub fn is_spinning(self) -> bool {
        self == RefreshIcon::Spinning
    }
}

pub fn refresh_indicator(tick: Option<Tick>) -> RefreshIcon {
    match tick {
        Some(_) => RefreshIcon::Spinning,
        None => RefreshIcon::Idle,
    }
}

/// Rotation only runs while the browser sits on the landing route.
pub fn auto_rotation_enabled(path: &str, landing_route: &str) -> bool {
    path == landing_route
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn clock_uses_twelve_hour_time() {
        assert_eq!(format_clock(at(2025, 5, 12, 15, 4, 5)), "May 12, 2025 • 03:04:05 PM");
        assert_eq!(format_clock(at(2025, 1, 2, 0, 0, 9)), "Jan 02, 2025 • 12:00:09 AM");
        assert_eq!(format_clock(at(2025, 12, 31, 12, 30, 0)), "Dec 31, 2025 • 12:30:00 PM");
    }

    #[test]
    fn indicator_spins_only_with_tick() {
        assert_eq!(refresh_indicator(Some(Tick(3))), RefreshIcon::Spinning);
        assert_eq!(refresh_indicator(None), RefreshIcon::Idle);
        assert!(refresh_indicator(Some(Tick(0))).is_spinning());
        assert!(!RefreshIcon::Idle.is_spinning());
    }

    #[test]
    fn gate_follows_landing_route() {
        assert!(auto_rotation_enabled("/", "/"));
        assert!(!auto_rotation_enabled("/login", "/"));
        assert!(!auto_rotation_enabled("/dashboard", "/"));
        assert!(auto_rotation_enabled("/public", "/public"));
    }
}
