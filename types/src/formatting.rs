//! Countdown formatting for tooltips and slot badges.
//!
//! Cooldown text shown anywhere in the HUD goes through this module so the
//! alert tooltip and the hotbar agree on rounding, and so European-style
//! decimals (`3,5` instead of `3.5`) apply uniformly.

/// Swap `.` and `,` in a formatted number.
fn europeanize(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '.' => ',',
            ',' => '.',
            other => other,
        })
        .collect()
}

#[inline]
fn maybe_eu(s: String, european: bool) -> String {
    if european { europeanize(&s) } else { s }
}

/// Rounded whole seconds, or `None` while the value still rounds to under `10.0`.
fn whole_seconds(secs: f32) -> Option<f32> {
    let tenths = (secs * 10.0).round() / 10.0;
    (tenths >= 10.0).then(|| secs.round())
}

/// Minute forms floor, but never below the minute a value rounded up to.
fn total_seconds(secs: f32) -> u32 {
    secs.floor().max(60.0) as u32
}

/// Format remaining cooldown time for a tooltip line.
///
/// Thresholds apply to the rounded value, so `59.96` reads `1:00`.
///
/// - Values >= 60s: `M:SS`
/// - Values >= 10s: whole seconds
/// - Values < 10s: one decimal place
/// - Values <= 0: the provided `zero_label`
///
/// `suffix` is appended to the second-based forms (e.g. `"s"`).
///
/// # Examples
/// ```
/// use hudsync_types::formatting::format_countdown;
/// assert_eq!(format_countdown(75.3, "", "0:00", false), "1:15");
/// assert_eq!(format_countdown(15.7, "s", "Ready", false), "16s");
/// assert_eq!(format_countdown(3.5, "s", "Ready", false), "3.5s");
/// assert_eq!(format_countdown(3.5, "s", "Ready", true), "3,5s");
/// assert_eq!(format_countdown(0.0, "s", "Ready", false), "Ready");
/// ```
pub fn format_countdown(secs: f32, suffix: &str, zero_label: &str, european: bool) -> String {
    if secs <= 0.0 {
        return zero_label.to_string();
    }
    match whole_seconds(secs) {
        None => maybe_eu(format!("{:.1}{}", secs, suffix), european),
        Some(whole) if whole < 60.0 => format!("{:.0}{}", whole, suffix),
        Some(_) => {
            let total = total_seconds(secs);
            format!("{}:{:02}", total / 60, total % 60)
        }
    }
}

/// Compact countdown for the small badge drawn over a hotbar slot.
///
/// Minutes collapse to `Xm`; otherwise same thresholds as [`format_countdown`].
///
/// # Examples
/// ```
/// use hudsync_types::formatting::format_countdown_compact;
/// assert_eq!(format_countdown_compact(75.3, "", false), "1m");
/// assert_eq!(format_countdown_compact(15.7, "", false), "16");
/// assert_eq!(format_countdown_compact(3.5, "", true), "3,5");
/// ```
pub fn format_countdown_compact(secs: f32, zero_label: &str, european: bool) -> String {
    if secs <= 0.0 {
        return zero_label.to_string();
    }
    match whole_seconds(secs) {
        None => maybe_eu(format!("{:.1}", secs), european),
        Some(whole) if whole < 60.0 => format!("{:.0}", whole),
        Some(_) => format!("{}m", total_seconds(secs) / 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(75.3, "", "0:00", false), "1:15");
        assert_eq!(format_countdown(60.0, "", "0:00", false), "1:00");
        assert_eq!(format_countdown(15.7, "", "0:00", false), "16");
        assert_eq!(format_countdown(3.5, "", "0:00", true), "3,5");
        assert_eq!(format_countdown(-1.0, "s", "Ready", false), "Ready");
    }

    #[test]
    fn test_thresholds_use_rounded_value() {
        assert_eq!(format_countdown(9.96, "s", "Ready", false), "10s");
        assert_eq!(format_countdown(9.94, "s", "Ready", false), "9.9s");
        assert_eq!(format_countdown(59.96, "s", "Ready", false), "1:00");
        assert_eq!(format_countdown(59.4, "s", "Ready", false), "59s");
        assert_eq!(format_countdown(119.7, "s", "Ready", false), "1:59");

        assert_eq!(format_countdown_compact(9.96, "", false), "10");
        assert_eq!(format_countdown_compact(59.96, "", false), "1m");
    }

    #[test]
    fn test_format_countdown_compact() {
        assert_eq!(format_countdown_compact(120.0, "", false), "2m");
        assert_eq!(format_countdown_compact(3.5, "", false), "3.5");
        assert_eq!(format_countdown_compact(0.0, "-", false), "-");
    }

    #[test]
    fn test_europeanize() {
        assert_eq!(europeanize("3.5s"), "3,5s");
        assert_eq!(europeanize("1,500"), "1.500");
        assert_eq!(europeanize("16"), "16");
    }
}
