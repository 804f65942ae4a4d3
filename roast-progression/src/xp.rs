//! Creator XP curve.
//!
//! Each level costs 15% more XP than the one before it, starting at 1000 XP
//! for the step from level 1 to level 2.

/// XP cost of the step from level 1 to level 2.
pub const BASE_LEVEL_XP: f64 = 1000.0;
/// Growth factor applied per level.
pub const LEVEL_GROWTH_RATE: f64 = 1.15;
/// Highest level whose step cost fits in a `u64`; the schedule is strictly
/// increasing up to here and flat at `u64::MAX` beyond it.
pub const MAX_EXACT_LEVEL: u32 = 268;

/// XP required to advance from `level` to `level + 1`.
///
/// Level 0 is treated as level 1. Levels above [`MAX_EXACT_LEVEL`] saturate
/// at `u64::MAX`.
pub fn xp_for_level(level: u32) -> u64 {
    let exponent = f64::from(level.max(1) - 1);
    let required = (BASE_LEVEL_XP * LEVEL_GROWTH_RATE.powf(exponent)).floor();

    // `as` saturates for values beyond u64 range (and infinity).
    required as u64
}

/// Total XP needed from zero to reach `level`, saturating at `u64::MAX`.
pub fn total_xp_for_level(level: u32) -> u64 {
    // Stops at the first overflow, so huge stored levels cost a few hundred steps.
    (1..level)
        .try_fold(0_u64, |total, step| total.checked_add(xp_for_level(step)))
        .unwrap_or(u64::MAX)
}

/// Rounded progress percentage (0-100) towards the next level.
///
/// A zero threshold reads as fully progressed rather than dividing by zero.
pub fn level_progress(current_xp: u64, xp_to_next: u64) -> u8 {
    if xp_to_next == 0 {
        return 100;
    }

    let percent = (current_xp as f64 / xp_to_next as f64 * 100.0).min(100.0);
    percent.round() as u8
}

/// Display title for a creator level.
pub fn level_title(level: u32) -> &'static str {
    match level {
        0..=4 => "Rookie Roaster",
        5..=9 => "Spicy Starter",
        10..=19 => "Heat Seeker",
        20..=29 => "Flame Thrower",
        30..=49 => "Inferno",
        _ => "Roast God",
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_EXACT_LEVEL, level_progress, level_title, total_xp_for_level, xp_for_level};

    #[test]
    fn first_levels_follow_growth_curve() {
        assert_eq!(xp_for_level(1), 1000);
        assert_eq!(xp_for_level(2), 1150);
        assert_eq!(xp_for_level(3), 1322);
        assert_eq!(xp_for_level(0), xp_for_level(1));
    }

    #[test]
    fn xp_schedule_is_positive_and_strictly_increasing() {
        for level in 1..MAX_EXACT_LEVEL {
            let current = xp_for_level(level);
            assert!(current > 0, "level {level} costs nothing");
            assert!(
                xp_for_level(level + 1) > current,
                "level {} is not more expensive than level {level}",
                level + 1
            );
        }
    }

    #[test]
    fn levels_past_exact_range_saturate() {
        assert!(xp_for_level(MAX_EXACT_LEVEL) < u64::MAX);
        assert_eq!(xp_for_level(MAX_EXACT_LEVEL + 1), u64::MAX);
        assert_eq!(xp_for_level(u32::MAX), u64::MAX);
    }

    #[test]
    fn cumulative_xp_saturates_without_walking_every_level() {
        assert_eq!(total_xp_for_level(300), u64::MAX);
        assert_eq!(total_xp_for_level(i32::MAX as u32), u64::MAX);
        assert_eq!(total_xp_for_level(u32::MAX), u64::MAX);
        assert!(total_xp_for_level(200) < u64::MAX);
    }

    #[test]
    fn cumulative_xp_sums_previous_levels() {
        assert_eq!(total_xp_for_level(0), 0);
        assert_eq!(total_xp_for_level(1), 0);
        assert_eq!(total_xp_for_level(2), 1000);
        assert_eq!(total_xp_for_level(3), 2150);
        assert_eq!(total_xp_for_level(4), 2150 + 1322);
    }

    #[test]
    fn progress_is_rounded_and_clamped() {
        assert_eq!(level_progress(0, 1000), 0);
        assert_eq!(level_progress(1000, 1000), 100);
        assert_eq!(level_progress(2500, 1000), 100);
        assert_eq!(level_progress(333, 1000), 33);
        assert_eq!(level_progress(335, 1000), 34);
    }

    #[test]
    fn zero_threshold_reads_as_complete() {
        assert_eq!(level_progress(0, 0), 100);
        assert_eq!(level_progress(42, 0), 100);
    }

    #[test]
    fn titles_cover_every_level() {
        assert_eq!(level_title(1), "Rookie Roaster");
        assert_eq!(level_title(10), "Heat Seeker");
        assert_eq!(level_title(75), "Roast God");
    }
}
