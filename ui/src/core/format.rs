//! Formatting helpers for presenting metrics.

use time::{format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime};

const BYTE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Human byte size with up to `decimals` fraction digits, trailing zeros dropped
/// (`1914820` → `"1.83 MB"`, `1024` → `"1 KB"`).
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_fraction(format!("{value:.decimals$}")), BYTE_UNITS[unit])
}

/// Locale-style (en-US) number: thousands separators, between `min_fraction` and
/// `max_fraction` fraction digits.
pub fn format_grouped(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let max_fraction = max_fraction.max(min_fraction);
    let fixed = format!("{:.max_fraction$}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < min_fraction {
        frac.push('0');
    }

    let mut out = String::new();
    let is_zero = int_part.chars().chain(frac.chars()).all(|c| c == '0');
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// Default locale rendering (up to three fraction digits) used for axes and tooltips.
pub fn format_number(value: f64) -> String {
    format_grouped(value, 0, 3)
}

/// Value shown on a metric card while counting toward `target`. Whole-number
/// targets render without decimals; fractional targets always show two.
pub fn format_card_value(shown: f64, target: f64) -> String {
    let min_fraction = if target.fract() == 0.0 { 0 } else { 2 };
    format_grouped(shown, min_fraction, 2)
}

pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{}%", value.round() as i64)
    } else {
        "0%".to_string()
    }
}

/// `"2025-03-05T00:12:16.599Z"` → `"March 5, 2025 at 12:12 AM"` (UTC).
pub fn format_capture_time(iso: &str) -> Option<String> {
    let parsed = OffsetDateTime::parse(iso, &Rfc3339).ok()?;
    parsed
        .to_offset(time::UtcOffset::UTC)
        .format(&format_description!(
            "[month repr:long] [day padding:none], [year] at [hour repr:12]:[minute] [period]"
        ))
        .ok()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn trim_fraction(fixed: String) -> String {
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_zero() {
        assert_eq!(format_bytes(0, 2), "0 Bytes");
    }

    #[test]
    fn bytes_scale_to_megabytes() {
        assert_eq!(format_bytes(1_914_820, 2), "1.83 MB");
        assert_eq!(format_bytes(3_047_424, 2), "2.91 MB");
        assert_eq!(format_bytes(1024, 2), "1 KB");
        assert_eq!(format_bytes(512, 2), "512 Bytes");
    }

    #[test]
    fn bytes_clamp_to_largest_unit() {
        let huge = 1024u64.pow(5) * 3;
        assert_eq!(format_bytes(huge, 2), "3072 TB");
    }

    #[test]
    fn grouped_numbers() {
        assert_eq!(format_grouped(15_777_792.0, 0, 2), "15,777,792");
        assert_eq!(format_grouped(1234.5, 2, 2), "1,234.50");
        assert_eq!(format_grouped(999.999, 0, 2), "1,000");
        assert_eq!(format_grouped(0.0, 0, 2), "0");
        assert_eq!(format_grouped(-1500.25, 0, 2), "-1,500.25");
    }

    #[test]
    fn card_value_fraction_rules() {
        assert_eq!(format_card_value(284.0, 284.0), "284");
        assert_eq!(format_card_value(142.3, 284.0), "142.3");
        assert_eq!(format_card_value(11.057, 11.057), "11.06");
        assert_eq!(format_card_value(5.5, 11.057), "5.50");
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(format_percent(62.83), "63%");
        assert_eq!(format_percent(f64::NAN), "0%");
    }

    #[test]
    fn capture_time_long_form() {
        assert_eq!(
            format_capture_time("2025-03-05T00:12:16.599Z").as_deref(),
            Some("March 5, 2025 at 12:12 AM")
        );
        assert_eq!(
            format_capture_time("2024-11-21T14:05:00+00:00").as_deref(),
            Some("November 21, 2024 at 02:05 PM")
        );
        assert!(format_capture_time("yesterday").is_none());
    }
}
