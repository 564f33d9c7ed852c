//! Scroll offset to normalized progress.

/// Clamp any upstream progress value into [0, 1]. Non-finite input maps to 0.
#[inline]
pub fn clamp_progress(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// `p = consumed / distance`, clamped. A degenerate distance yields 0.
#[inline]
pub fn progress_from_offset(consumed_px: f64, distance_px: f64) -> f64 {
    if distance_px.is_nan() || distance_px <= 0.0 || distance_px.is_infinite() {
        return 0.0;
    }
    clamp_progress(consumed_px / distance_px)
}

/// Scroll offset, relative to the pin start, that reproduces `p` over `distance_px`.
///
/// Used to re-anchor after a resize so progress stays where it was.
#[inline]
pub fn offset_for_progress(p: f64, distance_px: f64) -> f64 {
    clamp_progress(p) * distance_px.max(0.0)
}
