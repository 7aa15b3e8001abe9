use crate::error::MetricsError;

/// Characters that make up one "word" for speed purposes.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Words per minute for `character_count` keystrokes over `duration_ms`.
pub fn calculate_wpm(character_count: u64, duration_ms: f64) -> Result<u32, MetricsError> {
    // written this way round so NaN is rejected too
    if !(duration_ms > 0.0) {
        return Err(MetricsError::NonPositiveDuration(duration_ms));
    }
    if character_count == 0 {
        return Ok(0);
    }

    let words = character_count as f64 / CHARS_PER_WORD;
    let minutes = duration_ms / 60_000.0;

    Ok((words / minutes).round() as u32)
}

/// Percentage of `total` keystrokes that were not errors, clamped at zero.
pub fn calculate_accuracy(total: u64, errors: u64) -> Result<u32, MetricsError> {
    if total == 0 {
        return Err(MetricsError::ZeroTotal);
    }

    let correct = total as f64 - errors as f64;
    let accuracy = (correct / total as f64 * 100.0).max(0.0);

    Ok(accuracy.round() as u32)
}
