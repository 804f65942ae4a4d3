use anyhow::Context as _;
use roast_progression::xp::xp_for_level;
use tracing::debug;

use crate::cache::{SNAPSHOT_CACHE_TTL, creator_level_key};
use crate::database::Database;
use crate::model::creator_level::CreatorLevel;

#[derive(sqlx::FromRow)]
struct CreatorLevelRow {
    creator_id: String,
    current_xp: i64,
    level: i32,
    xp_to_next_level: Option<i64>,
}

impl CreatorLevelRow {
    fn into_model(self) -> anyhow::Result<CreatorLevel> {
        let current_xp = u64::try_from(self.current_xp).context("current_xp row out of u64 range")?;
        let level = u32::try_from(self.level)
            .context("level row out of u32 range")?
            .max(1);

        // Older rows leave the threshold to the client; derive it from the curve.
        let xp_to_next_level = match self.xp_to_next_level {
            Some(value) => u64::try_from(value).context("xp_to_next_level row out of u64 range")?,
            None => xp_for_level(level),
        };

        Ok(CreatorLevel {
            creator_id: self.creator_id,
            current_xp,
            level,
            xp_to_next_level,
        })
    }
}

/// Load the stored XP snapshot for a creator.
pub async fn get_creator_level(
    db: &Database,
    creator_id: &str,
) -> anyhow::Result<Option<CreatorLevel>> {
    let cache_key = creator_level_key(db.cache(), creator_id);
    db.cache()
        .get_or_load_json(&cache_key, SNAPSHOT_CACHE_TTL, || async {
            let row: Option<CreatorLevelRow> = sqlx::query_as(
                "SELECT creator_id, current_xp, level, xp_to_next_level
                 FROM creator_levels
                 WHERE creator_id = $1",
            )
            .bind(creator_id)
            .fetch_optional(db.pool())
            .await?;

            if row.is_none() {
                debug!(creator_id, "no creator level row");
            }

            row.map(CreatorLevelRow::into_model).transpose()
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::CreatorLevelRow;

    fn row(current_xp: i64, level: i32, xp_to_next_level: Option<i64>) -> CreatorLevelRow {
        CreatorLevelRow {
            creator_id: "creator-1".to_owned(),
            current_xp,
            level,
            xp_to_next_level,
        }
    }

    #[test]
    fn stored_threshold_is_kept() {
        let model = row(400, 3, Some(900)).into_model().expect("valid row");
        assert_eq!(model.current_xp, 400);
        assert_eq!(model.level, 3);
        assert_eq!(model.xp_to_next_level, 900);
    }

    #[test]
    fn missing_threshold_is_derived_from_curve() {
        let model = row(0, 2, None).into_model().expect("valid row");
        assert_eq!(model.xp_to_next_level, 1150);
    }

    #[test]
    fn negative_xp_is_rejected() {
        assert!(row(-5, 1, None).into_model().is_err());
    }
}
