//! Duration parsing and formatting.
//!
//! Durations are plain second counts everywhere in the timer; these helpers
//! turn them into what a person types and reads.

/// Format seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so 90 minutes reads `90:00`.
#[must_use]
pub fn format_mmss(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format minutes as a human-readable string.
#[must_use]
pub fn format_minutes(total_minutes: u64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    let plural = |n: u64| if n == 1 { "" } else { "s" };

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{hours} hour{}, {minutes} minute{}",
                plural(hours),
                plural(minutes)
            )
        } else {
            format!("{hours} hour{}", plural(hours))
        }
    } else {
        format!("{minutes} minute{}", plural(minutes))
    }
}

/// Parse a duration like `25`, `25m`, `1h30m` or `90s` into seconds.
///
/// A bare number (or a trailing number without unit) means minutes.
/// Returns `None` for empty, malformed or zero durations.
#[must_use]
pub fn parse_duration_secs(s: &str) -> Option<u64> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<u64>() {
        return minutes.checked_mul(60).filter(|secs| *secs > 0);
    }

    let mut total: u64 = 0;
    let mut current = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current.push(c);
            continue;
        }

        if current.is_empty() {
            return None;
        }

        let num: u64 = current.parse().ok()?;
        current.clear();

        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total = total.checked_add(num.checked_mul(unit)?)?;
    }

    if !current.is_empty() {
        let num: u64 = current.parse().ok()?;
        total = total.checked_add(num.checked_mul(60)?)?;
    }

    (total > 0).then_some(total)
}

/// Parse a duration and round it to whole minutes (at least one).
#[must_use]
pub fn parse_duration_minutes(s: &str) -> Option<u32> {
    let secs = parse_duration_secs(s)?;
    let minutes = secs.div_ceil(60);
    u32::try_from(minutes).ok()
}

/// Render a progress bar for a ratio in `0.0..=1.0`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = (progress.clamp(0.0, 1.0) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
