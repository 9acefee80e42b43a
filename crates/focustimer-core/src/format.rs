//! Display formatting. Aggregation works in fractional minutes; these
//! helpers are where truncation happens.

/// `MM:SS` countdown text.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `"45m"` under an hour, `"1h 30m"` from an hour up.
pub fn format_minutes(minutes: f64) -> String {
    let whole = if minutes.is_finite() && minutes > 0.0 {
        minutes as u64
    } else {
        0
    };
    if whole < 60 {
        format!("{whole}m")
    } else {
        format!("{}h {}m", whole / 60, whole % 60)
    }
}

/// `"12m 5s"` for a recorded duration.
pub fn format_duration(secs: f64) -> String {
    let whole = if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    };
    format!("{}m {}s", whole / 60, whole % 60)
}

/// Goal completion as a whole percentage, `"72%"`.
pub fn format_percent(ratio: f64) -> String {
    let pct = if ratio.is_finite() { ratio * 100.0 } else { 0.0 };
    format!("{}%", pct.clamp(0.0, 100.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(120 * 60 + 5), "120:05");
    }

    #[test]
    fn minutes_truncate() {
        assert_eq!(format_minutes(0.0), "0m");
        assert_eq!(format_minutes(44.9), "44m");
        assert_eq!(format_minutes(60.0), "1h 0m");
        assert_eq!(format_minutes(90.5), "1h 30m");
        assert_eq!(format_minutes(f64::NAN), "0m");
    }

    #[test]
    fn durations_show_minutes_and_seconds() {
        assert_eq!(format_duration(725.9), "12m 5s");
        assert_eq!(format_duration(-1.0), "0m 0s");
    }

    #[test]
    fn percent_is_clamped() {
        assert_eq!(format_percent(0.725), "72%");
        assert_eq!(format_percent(1.4), "100%");
        assert_eq!(format_percent(-0.2), "0%");
    }
}
