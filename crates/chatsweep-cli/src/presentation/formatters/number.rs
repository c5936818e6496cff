/// `1234` -> `1.2k`, `2500000` -> `2.5M`.
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}k", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Added and removed lines as `+12 -3`.
pub fn format_delta(added: u64, removed: u64) -> String {
    format!("+{} -{}", format_count(added), format_count(removed))
}

/// A usage fraction as a whole percentage, `-` when unknown.
pub fn format_percent(fraction: Option<f64>) -> String {
    match fraction {
        Some(f) => format!("{:.0}%", f * 100.0),
        None => "-".to_string(),
    }
}
