use anyhow::Context as _;
use roast_progression::vip::{MAX_VIP_LEVEL, MIN_VIP_LEVEL, vip_level_for_total};
use tracing::info;

use crate::cache::{SNAPSHOT_CACHE_TTL, invalidate_vip_member, vip_member_key};
use crate::database::Database;
use crate::model::vip_member::{VipClubMember, VipGiftRecord};

/// Upper bound on club listing page size.
pub const MAX_CLUB_MEMBERS_LIMIT: u32 = 100;

#[derive(sqlx::FromRow)]
struct VipMemberRow {
    club_id: String,
    user_id: String,
    vip_level: i16,
    total_gifted_sek: i64,
    joined_at: i64,
}

impl VipMemberRow {
    fn into_model(self) -> anyhow::Result<VipClubMember> {
        let vip_level = u8::try_from(self.vip_level)
            .context("vip_level row out of u8 range")?
            .clamp(MIN_VIP_LEVEL, MAX_VIP_LEVEL);
        let total_gifted_sek =
            u64::try_from(self.total_gifted_sek).context("total_gifted_sek row out of u64 range")?;
        let joined_at = u64::try_from(self.joined_at).context("joined_at row out of u64 range")?;

        Ok(VipClubMember {
            club_id: self.club_id,
            user_id: self.user_id,
            vip_level,
            total_gifted_sek,
            joined_at,
        })
    }
}

pub async fn get_vip_membership(
    db: &Database,
    club_id: &str,
    user_id: &str,
) -> anyhow::Result<Option<VipClubMember>> {
    let cache_key = vip_member_key(db.cache(), club_id, user_id);
    db.cache()
        .get_or_load_json(&cache_key, SNAPSHOT_CACHE_TTL, || async {
            let row: Option<VipMemberRow> = sqlx::query_as(
                "SELECT club_id, user_id, vip_level, total_gifted_sek, joined_at
                 FROM vip_club_members
                 WHERE club_id = $1 AND user_id = $2",
            )
            .bind(club_id)
            .bind(user_id)
            .fetch_optional(db.pool())
            .await?;

            row.map(VipMemberRow::into_model).transpose()
        })
        .await
}

/// Return up to `limit` members of a club, biggest gifters first.
pub async fn list_club_members(
    db: &Database,
    club_id: &str,
    limit: u32,
) -> anyhow::Result<Vec<VipClubMember>> {
    let rows: Vec<VipMemberRow> = sqlx::query_as(
        "SELECT club_id, user_id, vip_level, total_gifted_sek, joined_at
         FROM vip_club_members
         WHERE club_id = $1
         ORDER BY total_gifted_sek DESC, joined_at ASC
         LIMIT $2",
    )
    .bind(club_id)
    .bind(i64::from(club_list_limit(limit)))
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(VipMemberRow::into_model).collect()
}

fn club_list_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_CLUB_MEMBERS_LIMIT)
}

/// Add a gift to a member's running total and recompute their level.
///
/// The first gift creates the membership at level 1 and stamps `joined_at`.
/// Totals only grow and levels never drop.
pub async fn record_vip_gift(
    db: &Database,
    club_id: &str,
    user_id: &str,
    amount_sek: u64,
    now_unix_secs: u64,
) -> anyhow::Result<VipGiftRecord> {
    if amount_sek == 0 {
        anyhow::bail!("gift amount must be positive");
    }

    let amount_i64 = i64::try_from(amount_sek).context("amount_sek out of i64 range")?;
    let joined_at_i64 = i64::try_from(now_unix_secs).context("joined_at out of i64 range")?;

    let mut tx = db.pool().begin().await?;

    // The upsert takes the row lock, so concurrent gifts serialize here.
    let row: VipMemberRow = sqlx::query_as(
        "INSERT INTO vip_club_members (club_id, user_id, vip_level, total_gifted_sek, joined_at)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (club_id, user_id) DO UPDATE
         SET total_gifted_sek = vip_club_members.total_gifted_sek + EXCLUDED.total_gifted_sek
         RETURNING club_id, user_id, vip_level, total_gifted_sek, joined_at",
    )
    .bind(club_id)
    .bind(user_id)
    .bind(i16::from(MIN_VIP_LEVEL))
    .bind(amount_i64)
    .bind(joined_at_i64)
    .fetch_one(&mut *tx)
    .await?;

    let mut member = row.into_model()?;
    let previous_level = member.vip_level;
    let new_level = vip_level_for_total(member.total_gifted_sek).max(previous_level);

    if new_level != previous_level {
        sqlx::query(
            "UPDATE vip_club_members SET vip_level = $3 WHERE club_id = $1 AND user_id = $2",
        )
        .bind(club_id)
        .bind(user_id)
        .bind(i16::from(new_level))
        .execute(&mut *tx)
        .await?;
        member.vip_level = new_level;
    }

    tx.commit().await?;

    invalidate_vip_member(db.cache(), club_id, user_id).await;

    let record = VipGiftRecord {
        member,
        previous_level,
    };

    if record.leveled_up() {
        info!(
            club_id,
            user_id,
            previous_level,
            vip_level = record.member.vip_level,
            "vip member leveled up"
        );
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::{MAX_CLUB_MEMBERS_LIMIT, VipMemberRow, club_list_limit};

    fn row(vip_level: i16, total_gifted_sek: i64) -> VipMemberRow {
        VipMemberRow {
            club_id: "club-1".to_owned(),
            user_id: "user-1".to_owned(),
            vip_level,
            total_gifted_sek,
            joined_at: 1_700_000_000,
        }
    }

    #[test]
    fn row_converts_to_member() {
        let member = row(4, 5_000).into_model().expect("valid row");
        assert_eq!(member.vip_level, 4);
        assert_eq!(member.total_gifted_sek, 5_000);
        assert_eq!(member.joined_at, 1_700_000_000);
    }

    #[test]
    fn level_is_clamped_into_schedule() {
        assert_eq!(row(0, 0).into_model().expect("valid row").vip_level, 1);
        assert_eq!(row(25, 0).into_model().expect("valid row").vip_level, 20);
    }

    #[test]
    fn club_listing_limit_is_bounded() {
        assert_eq!(club_list_limit(0), 1);
        assert_eq!(club_list_limit(25), 25);
        assert_eq!(club_list_limit(10_000), MAX_CLUB_MEMBERS_LIMIT);
        assert_eq!(club_list_limit(u32::MAX), MAX_CLUB_MEMBERS_LIMIT);
    }

    #[test]
    fn negative_totals_are_rejected() {
        assert!(row(1, -10).into_model().is_err());
        assert!(row(-1, 10).into_model().is_err());
    }
}
