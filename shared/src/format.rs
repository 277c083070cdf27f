//! Number and date formatting shared by the landing and dashboard views.

use chrono::NaiveDate;

const ISO_DATE: &str = "%Y-%m-%d";

/// `1234567.8` -> `1,234,568`
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Tonnage with unit, e.g. `1,250 MT`.
pub fn format_mt(value: f64) -> String {
    format!("{} MT", format_thousands(value))
}

/// One decimal and a percent sign.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// `2025-05-03` -> `03`; anything unparseable is returned unchanged.
pub fn day_of_month(date: &str) -> String {
    reformat_date(date, "%d")
}

/// `2025-05-03` -> `03 May`
pub fn short_date(date: &str) -> String {
    reformat_date(date, "%d %b")
}

fn reformat_date(date: &str, pattern: &str) -> String {
    NaiveDate::parse_from_str(date, ISO_DATE)
        .map(|parsed| parsed.format(pattern).to_string())
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_grouped_and_rounded() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(1234567.8), "1,234,568");
        assert_eq!(format_thousands(-4321.0), "-4,321");
        assert_eq!(format_mt(150.0), "150 MT");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(34.883720930232556), "34.9%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn date_labels_shorten_or_pass_through() {
        assert_eq!(day_of_month("2025-05-03"), "03");
        assert_eq!(short_date("2025-05-03"), "03 May");
        assert_eq!(short_date("week 3"), "week 3");
    }
}
