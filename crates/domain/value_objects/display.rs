//! Display helpers for executor-written recording metrics.

const PLACEHOLDER: &str = "-";
const FILE_SIZE_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Formats a duration as `H:MM:SS`. Missing or zero durations render as `-`.
pub fn format_duration(seconds: Option<i32>) -> String {
    let seconds = match seconds {
        Some(seconds) if seconds > 0 => seconds as u64,
        _ => return PLACEHOLDER.to_string(),
    };

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Formats a byte count with 1024-based units, rounded to whole numbers.
pub fn format_file_size(bytes: Option<i64>) -> String {
    let bytes = match bytes {
        Some(bytes) if bytes > 0 => bytes as f64,
        _ => return PLACEHOLDER.to_string(),
    };

    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < FILE_SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!(
        "{} {}",
        group_thousands(value.round() as u64),
        FILE_SIZE_UNITS[unit]
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_render_as_hours_minutes_seconds() {
        assert_eq!(format_duration(Some(59)), "0:00:59");
        assert_eq!(format_duration(Some(3_725)), "1:02:05");
        assert_eq!(format_duration(Some(90_000)), "25:00:00");
    }

    #[test]
    fn missing_metrics_render_placeholder() {
        assert_eq!(format_duration(None), "-");
        assert_eq!(format_duration(Some(0)), "-");
        assert_eq!(format_file_size(None), "-");
        assert_eq!(format_file_size(Some(0)), "-");
    }

    #[test]
    fn file_sizes_use_binary_units() {
        assert_eq!(format_file_size(Some(512)), "512 B");
        assert_eq!(format_file_size(Some(1_023)), "1,023 B");
        assert_eq!(format_file_size(Some(1_536)), "2 KB");
        assert_eq!(format_file_size(Some(5 * 1024 * 1024)), "5 MB");
        assert_eq!(format_file_size(Some(3 * 1024 * 1024 * 1024)), "3 GB");
    }
}
