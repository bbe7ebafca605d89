//! Experience curve maths. Everything here is pure.

use crate::ingredient::MAX_LEVEL;

/// Cumulative experience needed to have reached `level`: `level^3`.
///
/// Levels past the cap use the cap's own threshold, so the curve is flat
/// above level 100 instead of dropping.
pub fn total_points_needed_for_level(level: u8) -> u32 {
    u32::from(level.min(MAX_LEVEL)).pow(3)
}

/// Experience still missing before the next level. Zero at the cap, and
/// negative when `current_exp` already overshoots the next threshold.
pub fn exp_needed_for_next_level(level: u8, current_exp: u32) -> i64 {
    if level >= MAX_LEVEL {
        return 0;
    }
    i64::from(total_points_needed_for_level(level + 1)) - i64::from(current_exp)
}

/// How full the experience bar is for the current level, in `[0, 1]`.
pub fn progress_ratio(level: u8, current_exp: u32) -> f64 {
    if level >= MAX_LEVEL {
        return 1.0;
    }
    let floor = total_points_needed_for_level(level);
    let ceiling = total_points_needed_for_level(level + 1);
    let into_level = current_exp.saturating_sub(floor);

    (f64::from(into_level) / f64::from(ceiling - floor)).clamp(0.0, 1.0)
}
