/// Format milliseconds as `mm:ss.mmm`.
pub fn format_duration_ms(total_ms: f64) -> String {
    let total_ms = total_ms.max(0.0).round() as u64;
    let minutes = total_ms / 60_000;
    let seconds = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;
    format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
}

pub const MIN_BPM: f64 = 1.0;
pub const MAX_BPM: f64 = 1000.0;

/// Parse a tempo override given in beats per minute.
pub fn parse_bpm(value: &str) -> Result<f64, String> {
    let bpm: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if !(MIN_BPM..=MAX_BPM).contains(&bpm) {
        return Err(format!("BPM must be between {MIN_BPM} and {MAX_BPM}, got {value}"));
    }
    Ok(bpm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_seconds_millis() {
        assert_eq!(format_duration_ms(0.0), "00:00.000");
        assert_eq!(format_duration_ms(61_234.4), "01:01.234");
        assert_eq!(format_duration_ms(3_600_000.0), "60:00.000");
    }

    #[test]
    fn bpm_must_be_in_range() {
        assert_eq!(parse_bpm("120"), Ok(120.0));
        assert_eq!(parse_bpm("92.5"), Ok(92.5));
        assert!(parse_bpm("0").is_err());
        assert!(parse_bpm("-10").is_err());
        assert!(parse_bpm("inf").is_err());
        assert!(parse_bpm("NaN").is_err());
        assert!(parse_bpm("1e-300").is_err());
        assert!(parse_bpm("1000").is_ok());
        assert!(parse_bpm("1000.5").is_err());
        assert!(parse_bpm("fast").is_err());
    }
}
