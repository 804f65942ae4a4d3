use anyhow::Context as _;

use crate::cache::{
    LEADERBOARD_CACHE_TTL, SNAPSHOT_CACHE_TTL, season_leaderboard_key, season_ranking_key,
};
use crate::database::Database;
use crate::model::season_ranking::SeasonRankingEntry;

/// Upper bound on leaderboard page size.
pub const MAX_LEADERBOARD_LIMIT: u32 = 100;

#[derive(sqlx::FromRow)]
struct SeasonRankingRow {
    season_id: String,
    creator_id: String,
    composite_score: f64,
    rank: i32,
    current_tier: Option<String>,
    percentile: f64,
    progress_to_next_tier: f64,
}

impl SeasonRankingRow {
    fn into_model(self) -> anyhow::Result<SeasonRankingEntry> {
        let rank = u32::try_from(self.rank).context("rank row out of u32 range")?;

        Ok(SeasonRankingEntry {
            season_id: self.season_id,
            creator_id: self.creator_id,
            composite_score: self.composite_score.max(0.0),
            rank,
            current_tier: self.current_tier,
            percentile: self.percentile.clamp(0.0, 100.0),
            progress_to_next_tier: self.progress_to_next_tier.clamp(0.0, 100.0),
        })
    }
}

pub async fn get_season_ranking(
    db: &Database,
    season_id: &str,
    creator_id: &str,
) -> anyhow::Result<Option<SeasonRankingEntry>> {
    let cache_key = season_ranking_key(db.cache(), season_id, creator_id);
    db.cache()
        .get_or_load_json(&cache_key, SNAPSHOT_CACHE_TTL, || async {
            let row: Option<SeasonRankingRow> = sqlx::query_as(
                "SELECT season_id, creator_id, composite_score, rank, current_tier,
                        percentile, progress_to_next_tier
                 FROM season_rankings
                 WHERE season_id = $1 AND creator_id = $2",
            )
            .bind(season_id)
            .bind(creator_id)
            .fetch_optional(db.pool())
            .await?;

            row.map(SeasonRankingRow::into_model).transpose()
        })
        .await
}

/// Return the top `limit` entries of a season, best rank first.
pub async fn list_season_leaderboard(
    db: &Database,
    season_id: &str,
    limit: u32,
) -> anyhow::Result<Vec<SeasonRankingEntry>> {
    let limit = limit.clamp(1, MAX_LEADERBOARD_LIMIT);
    let cache_key = season_leaderboard_key(db.cache(), season_id, limit);

    db.cache()
        .get_or_load_json(&cache_key, LEADERBOARD_CACHE_TTL, || async {
            let rows: Vec<SeasonRankingRow> = sqlx::query_as(
                "SELECT season_id, creator_id, composite_score, rank, current_tier,
                        percentile, progress_to_next_tier
                 FROM season_rankings
                 WHERE season_id = $1
                 ORDER BY rank ASC, composite_score DESC
                 LIMIT $2",
            )
            .bind(season_id)
            .bind(i64::from(limit))
            .fetch_all(db.pool())
            .await?;

            let mut entries = rows
                .into_iter()
                .map(SeasonRankingRow::into_model)
                .collect::<anyhow::Result<Vec<_>>>()?;
            entries.sort_by_key(|entry| entry.rank);
            Ok(entries)
        })
        .await
}
