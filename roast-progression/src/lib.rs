/// Shared display formatting (SEK amounts, XP, percentages, durations).
pub mod formatting;
/// Season tier table and percentile labels.
pub mod season;
/// VIP club level schedule.
pub mod vip;
/// Creator XP curve and level progress.
pub mod xp;

pub use season::SeasonTier;
