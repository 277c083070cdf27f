// Color and spacing tokens for the dashboard's single light theme.

use shared::content::Tone;
use zoon::*;

pub const EMERALD: &str = "#2ecc71";
pub const DARK_GREEN: &str = "#27ae60";
pub const LIGHT_GREEN: &str = "#a9dfbf";
pub const VERY_LIGHT_GREEN: &str = "#ebf7f0";
pub const ACCENT_BLUE: &str = "#3498db";
pub const ACCENT_ORANGE: &str = "#e74c3c";
pub const WARNING_AMBER: &str = "#f39c12";
pub const TEXT_DARK: &str = "#2c3e50";
pub const TEXT_MUTED: &str = "#7f8c8d";
pub const BG_COLOR: &str = "#f1f9f5";
pub const CARD_BG: &str = "#ffffff";
pub const BORDER: &str = "#dfe9e3";

pub const FONT_SIZE_SMALL: u32 = 12;
pub const FONT_SIZE_BODY: u32 = 14;
pub const FONT_SIZE_TITLE: u32 = 18;
pub const FONT_SIZE_HERO: u32 = 30;

pub const SPACING_4: u32 = 4;
pub const SPACING_8: u32 = 8;
pub const SPACING_12: u32 = 12;
pub const SPACING_16: u32 = 16;
pub const SPACING_24: u32 = 24;

pub fn tone_color(tone: Tone) -> &'static str {
    match tone {
        Tone::Success => DARK_GREEN,
        Tone::Warning => WARNING_AMBER,
    }
}

/// Bar color scale used by the completion charts: grey, light green, dark green.
pub fn percent_color(percent: f64) -> &'static str {
    match percent {
        p if p >= 66.0 => DARK_GREEN,
        p if p >= 33.0 => LIGHT_GREEN,
        _ => "#d5dbdb",
    }
}

pub fn card_shadow() -> Shadows<'static> {
    Shadows::new([Shadow::new().y(2).blur(6).color("rgba(39, 174, 96, 0.12)")])
}
