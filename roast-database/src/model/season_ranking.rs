use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonRankingEntry {
    pub season_id: String,
    pub creator_id: String,
    pub composite_score: f64,
    /// 1-based leaderboard position.
    pub rank: u32,
    pub current_tier: Option<String>,
    pub percentile: f64,
    pub progress_to_next_tier: f64,
}
