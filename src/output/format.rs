/// Humanizes a byte count, `N/A` when the value is absent.
///
/// Absence must stay distinguishable from zero: `Some(0)` renders `0.0 B`,
/// `None` renders `N/A`.
pub fn format_bytes(bytes: Option<u64>) -> String {
    let Some(bytes) = bytes else {
        return "N/A".to_owned();
    };

    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} PB")
}

/// Truncates a container name for table display, marking the cut with `…`.
pub fn truncate_name(name: &str, width: usize) -> String {
    if name.chars().count() > width {
        let mut truncated: String = name.chars().take(width - 1).collect();
        truncated.push('…');
        truncated
    } else {
        name.to_owned()
    }
}
