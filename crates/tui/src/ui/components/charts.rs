/// A block-character horizontal bar representing `value / max`.
///
/// Returns a string like `████████░░░░░░░░░░░░`.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// A percentage bar with trailing label, e.g. `████████░░  80%`.
///
/// Only the fill is clamped to 0..=100; the label prints the raw value, so
/// a deficit shows as a negative percentage over an empty bar.
#[must_use]
pub fn percentage_bar(percentage: f64, width: usize) -> String {
    let fill_ratio = percentage.clamp(0.0, 100.0) / 100.0;
    let filled = ((fill_ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!(
        "{}{} {:>3.0}%",
        "█".repeat(filled),
        "░".repeat(empty),
        percentage
    )
}
