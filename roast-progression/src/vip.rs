//! VIP club levels.
//!
//! Members start at level 1 and climb a linear schedule: every level costs
//! `25000 / 19` SEK (about 1316), so level 20 is reached at exactly 25000 SEK
//! gifted in total.

pub const MIN_VIP_LEVEL: u8 = 1;
pub const MAX_VIP_LEVEL: u8 = 20;
/// Total gifted SEK required for the max level.
pub const MAX_LEVEL_SEK: u64 = 25_000;

const LEVEL_STEPS: u64 = (MAX_VIP_LEVEL - MIN_VIP_LEVEL) as u64;

/// Total gifted SEK required to hold `level`.
///
/// Levels 0 and 1 cost nothing; anything above the max level is clamped.
pub fn cumulative_requirement(level: u8) -> f64 {
    (steps_below(level) * MAX_LEVEL_SEK) as f64 / LEVEL_STEPS as f64
}

/// Highest level whose cumulative requirement `total_gifted_sek` meets.
pub fn vip_level_for_total(total_gifted_sek: u64) -> u8 {
    // Integer form of `total / (25000 / 19)` to keep exact thresholds exact.
    let steps = total_gifted_sek.saturating_mul(LEVEL_STEPS) / MAX_LEVEL_SEK;
    let steps = steps.min(LEVEL_STEPS) as u8;
    MIN_VIP_LEVEL + steps
}

/// Whole SEK still missing to reach `target_level`, rounded up.
pub fn sek_to_level(target_level: u8, total_gifted_sek: u64) -> u64 {
    // requirement - total = (steps * 25000 - total * 19) / 19
    let required_scaled = steps_below(target_level) * MAX_LEVEL_SEK;
    let gifted_scaled = total_gifted_sek.saturating_mul(LEVEL_STEPS);

    required_scaled
        .saturating_sub(gifted_scaled)
        .div_ceil(LEVEL_STEPS)
}

/// SEK missing to reach the level after `level`, or `None` at the max level.
pub fn sek_to_next_level(level: u8, total_gifted_sek: u64) -> Option<u64> {
    if level >= MAX_VIP_LEVEL {
        return None;
    }

    Some(sek_to_level(level.max(MIN_VIP_LEVEL) + 1, total_gifted_sek))
}

/// Progress (0-100) through `level` towards the next one.
pub fn level_progress(level: u8, total_gifted_sek: u64) -> f64 {
    let level = level.clamp(MIN_VIP_LEVEL, MAX_VIP_LEVEL);
    if level == MAX_VIP_LEVEL {
        return 100.0;
    }

    let floor = cumulative_requirement(level);
    let ceiling = cumulative_requirement(level + 1);
    let percent = (total_gifted_sek as f64 - floor) / (ceiling - floor) * 100.0;

    percent.clamp(0.0, 100.0)
}

fn steps_below(level: u8) -> u64 {
    u64::from(level.clamp(MIN_VIP_LEVEL, MAX_VIP_LEVEL) - MIN_VIP_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::{
        MAX_VIP_LEVEL, cumulative_requirement, level_progress, sek_to_level, sek_to_next_level,
        vip_level_for_total,
    };

    #[test]
    fn schedule_endpoints() {
        assert_eq!(cumulative_requirement(0), 0.0);
        assert_eq!(cumulative_requirement(1), 0.0);
        assert_eq!(cumulative_requirement(20), 25_000.0);
        assert_eq!(cumulative_requirement(42), 25_000.0);
        assert_eq!(cumulative_requirement(2).round(), 1316.0);
    }

    #[test]
    fn schedule_is_monotonic() {
        for level in 1..MAX_VIP_LEVEL {
            assert!(cumulative_requirement(level + 1) > cumulative_requirement(level));
        }
    }

    #[test]
    fn level_from_total() {
        assert_eq!(vip_level_for_total(0), 1);
        assert_eq!(vip_level_for_total(1315), 1);
        assert_eq!(vip_level_for_total(1316), 2);
        assert_eq!(vip_level_for_total(24_999), 19);
        assert_eq!(vip_level_for_total(25_000), 20);
        assert_eq!(vip_level_for_total(u64::MAX), 20);
    }

    #[test]
    fn missing_sek_rounds_up() {
        assert_eq!(sek_to_level(2, 0), 1316);
        assert_eq!(sek_to_level(2, 1316), 0);
        assert_eq!(sek_to_level(20, 20_000), 5_000);
        assert_eq!(sek_to_level(20, 30_000), 0);
        assert_eq!(sek_to_level(1, 0), 0);
    }

    #[test]
    fn next_level_stops_at_max() {
        assert_eq!(sek_to_next_level(1, 0), Some(1316));
        assert_eq!(sek_to_next_level(19, 24_000), Some(1_000));
        assert_eq!(sek_to_next_level(20, 25_000), None);
    }

    #[test]
    fn progress_is_clamped_within_level() {
        assert_eq!(level_progress(1, 0), 0.0);
        assert!((level_progress(1, 658) - 50.0).abs() < 0.1);
        assert_eq!(level_progress(1, 5_000), 100.0);
        assert_eq!(level_progress(5, 0), 0.0);
        assert_eq!(level_progress(20, 25_000), 100.0);
    }
}
