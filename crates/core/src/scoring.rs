//! Scoring module - points per lock and gravity speed-up
//!
//! A lock that clears `n` rows earns `n * n` points (1, 4, 9 or 16), and every cleared
//! row multiplies the gravity interval by a constant factor below one.

use crate::types::LINE_POINTS;

/// Points awarded for clearing `rows` rows with one lock. Zero for no rows.
pub fn points_for_rows(rows: usize) -> u32 {
    if rows == 0 {
        return 0;
    }
    LINE_POINTS
        .get(rows - 1)
        .copied()
        .unwrap_or(LINE_POINTS[LINE_POINTS.len() - 1])
}

/// Gravity interval after clearing `rows` rows, compounding once per row.
pub fn speed_after_clear(speed: f64, factor: f64, rows: usize) -> f64 {
    (0..rows).fold(speed, |s, _| s * factor)
}
