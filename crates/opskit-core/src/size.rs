//! Human-readable byte sizes.

/// Formats a byte count: plain bytes below 1 KiB, otherwise two decimals in KB..PB (1024 steps).
pub fn human_readable_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    for unit in ["KB", "MB", "GB", "TB"] {
        value /= 1024.0;
        if value < 1024.0 {
            return format!("{:.2} {}", value, unit);
        }
    }
    format!("{:.2} PB", value / 1024.0)
}
