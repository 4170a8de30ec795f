//! Human-readable byte formatting.

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Format a byte count with binary (1024-based) units and two decimals.
///
/// Counts below one kilobyte are printed as whole bytes (`"0 B"`, `"512 B"`).
/// TB is the largest unit; larger values keep growing in TB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    // Compare the printed value so 1023.999 KB becomes 1.00 MB, not 1024.00 KB.
    while round_to_hundredths(value) >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", value, UNITS[unit])
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Signed convenience wrapper for sizes stored as `i64`; negatives format as zero.
pub fn format_size(size_bytes: i64) -> String {
    format_bytes(size_bytes.max(0) as u64)
}
