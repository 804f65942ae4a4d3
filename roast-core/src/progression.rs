//! Display views built from stored progression snapshots.

use std::time::{SystemTime, UNIX_EPOCH};

use roast_database::Database;
use roast_database::impls::{creator_levels, season_rankings, vip_members};
use roast_database::model::creator_level::CreatorLevel;
use roast_database::model::season_ranking::SeasonRankingEntry;
use roast_database::model::vip_member::VipClubMember;
use roast_progression::SeasonTier;
use roast_progression::formatting::format_membership_age;
use roast_progression::{season, vip, xp};
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreatorProgress {
    pub creator_id: String,
    pub level: u32,
    pub title: &'static str,
    pub current_xp: u64,
    pub xp_to_next_level: u64,
    pub total_xp_to_reach_level: u64,
    pub progress_percent: u8,
}

impl CreatorProgress {
    pub fn from_snapshot(snapshot: &CreatorLevel) -> Self {
        Self {
            creator_id: snapshot.creator_id.clone(),
            level: snapshot.level,
            title: xp::level_title(snapshot.level),
            current_xp: snapshot.current_xp,
            xp_to_next_level: snapshot.xp_to_next_level,
            total_xp_to_reach_level: xp::total_xp_for_level(snapshot.level),
            progress_percent: xp::level_progress(snapshot.current_xp, snapshot.xp_to_next_level),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeasonStanding {
    pub season_id: String,
    pub creator_id: String,
    pub rank: u32,
    pub composite_score: f64,
    pub tier: SeasonTier,
    /// Set when the stored tier name was missing or unknown and the tier
    /// was resolved from the percentile instead.
    pub tier_from_percentile: bool,
    pub tier_name: &'static str,
    pub tier_color: &'static str,
    pub tier_icon: &'static str,
    pub next_tier: Option<SeasonTier>,
    pub near_rank_up: bool,
    pub percentile_label: String,
    pub progress_percent: f64,
}

impl SeasonStanding {
    pub fn from_snapshot(entry: &SeasonRankingEntry) -> Self {
        let stored_name = entry.current_tier.as_deref();
        let stored_tier = stored_name.and_then(SeasonTier::from_name);

        let (tier, tier_color, tier_icon, progress_percent) = match stored_tier {
            Some(tier) => (
                tier,
                season::tier_color(stored_name),
                season::tier_icon(stored_name),
                entry.progress_to_next_tier,
            ),
            None => {
                let tier = SeasonTier::for_percentile(entry.percentile);
                (
                    tier,
                    tier.color(),
                    tier.icon(),
                    season::progress_to_next_tier(entry.percentile),
                )
            }
        };

        let tier_from_percentile = stored_tier.is_none();
        if tier_from_percentile {
            debug!(
                creator_id = %entry.creator_id,
                stored_tier = ?stored_name,
                tier = tier.key(),
                "resolved season tier from percentile"
            );
        }

        Self {
            season_id: entry.season_id.clone(),
            creator_id: entry.creator_id.clone(),
            rank: entry.rank,
            composite_score: entry.composite_score,
            tier,
            tier_from_percentile,
            tier_name: tier.name(),
            tier_color,
            tier_icon,
            next_tier: tier.next(),
            near_rank_up: season::is_near_rank_up(progress_percent),
            percentile_label: season::percentile_description(entry.percentile),
            progress_percent,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VipStatus {
    pub club_id: String,
    pub user_id: String,
    pub level: u8,
    pub total_gifted_sek: u64,
    pub progress_percent: f64,
    /// `None` once the member holds the max level.
    pub sek_to_next_level: Option<u64>,
    pub joined_at: u64,
    pub member_for: String,
}

impl VipStatus {
    pub fn from_snapshot(member: &VipClubMember, now_unix_secs: u64) -> Self {
        Self {
            club_id: member.club_id.clone(),
            user_id: member.user_id.clone(),
            level: member.vip_level,
            total_gifted_sek: member.total_gifted_sek,
            progress_percent: vip::level_progress(member.vip_level, member.total_gifted_sek),
            sek_to_next_level: vip::sek_to_next_level(member.vip_level, member.total_gifted_sek),
            joined_at: member.joined_at,
            member_for: format_membership_age(member.joined_at, now_unix_secs),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VipGiftOutcome {
    pub status: VipStatus,
    pub previous_level: u8,
    pub leveled_up: bool,
}

/// Loads snapshots and turns them into views.
#[derive(Clone, Copy, Debug)]
pub struct ProgressionService<'a> {
    db: &'a Database,
}

impl<'a> ProgressionService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn creator_progress(
        &self,
        creator_id: &str,
    ) -> anyhow::Result<Option<CreatorProgress>> {
        let snapshot = creator_levels::get_creator_level(self.db, creator_id).await?;
        debug!(creator_id, found = snapshot.is_some(), "loaded creator level");
        Ok(snapshot.as_ref().map(CreatorProgress::from_snapshot))
    }

    pub async fn season_standing(
        &self,
        season_id: &str,
        creator_id: &str,
    ) -> anyhow::Result<Option<SeasonStanding>> {
        let entry = season_rankings::get_season_ranking(self.db, season_id, creator_id).await?;
        Ok(entry.as_ref().map(SeasonStanding::from_snapshot))
    }

    pub async fn season_leaderboard(
        &self,
        season_id: &str,
        limit: u32,
    ) -> anyhow::Result<Vec<SeasonStanding>> {
        let entries = season_rankings::list_season_leaderboard(self.db, season_id, limit).await?;
        Ok(entries.iter().map(SeasonStanding::from_snapshot).collect())
    }

    pub async fn vip_status(
        &self,
        club_id: &str,
        user_id: &str,
    ) -> anyhow::Result<Option<VipStatus>> {
        let member = vip_members::get_vip_membership(self.db, club_id, user_id).await?;
        let now = now_unix_secs();
        Ok(member
            .as_ref()
            .map(|member| VipStatus::from_snapshot(member, now)))
    }

    pub async fn club_members(&self, club_id: &str, limit: u32) -> anyhow::Result<Vec<VipStatus>> {
        let members = vip_members::list_club_members(self.db, club_id, limit).await?;
        let now = now_unix_secs();
        Ok(members
            .iter()
            .map(|member| VipStatus::from_snapshot(member, now))
            .collect())
    }

    pub async fn record_gift(
        &self,
        club_id: &str,
        user_id: &str,
        amount_sek: u64,
    ) -> anyhow::Result<VipGiftOutcome> {
        let now = now_unix_secs();
        let record =
            vip_members::record_vip_gift(self.db, club_id, user_id, amount_sek, now).await?;

        Ok(VipGiftOutcome {
            status: VipStatus::from_snapshot(&record.member, now),
            previous_level: record.previous_level,
            leveled_up: record.leveled_up(),
        })
    }
}

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

#[cfg(test)]
mod tests {
    use roast_database::model::creator_level::CreatorLevel;
    use roast_database::model::season_ranking::SeasonRankingEntry;
    use roast_database::model::vip_member::VipClubMember;
    use roast_progression::SeasonTier;

    use super::{CreatorProgress, SeasonStanding, VipStatus};

    fn ranking(tier: Option<&str>, percentile: f64, progress: f64) -> SeasonRankingEntry {
        SeasonRankingEntry {
            season_id: "season-4".to_owned(),
            creator_id: "creator-1".to_owned(),
            composite_score: 812.5,
            rank: 7,
            current_tier: tier.map(str::to_owned),
            percentile,
            progress_to_next_tier: progress,
        }
    }

    fn member(vip_level: u8, total_gifted_sek: u64) -> VipClubMember {
        VipClubMember {
            club_id: "club-1".to_owned(),
            user_id: "user-1".to_owned(),
            vip_level,
            total_gifted_sek,
            joined_at: 0,
        }
    }

    #[test]
    fn creator_progress_uses_snapshot_threshold() {
        let progress = CreatorProgress::from_snapshot(&CreatorLevel {
            creator_id: "creator-1".to_owned(),
            current_xp: 575,
            level: 2,
            xp_to_next_level: 1150,
        });

        assert_eq!(progress.progress_percent, 50);
        assert_eq!(progress.total_xp_to_reach_level, 1000);
        assert_eq!(progress.title, "Rookie Roaster");
    }

    #[test]
    fn known_tier_resolves_display_fields() {
        let standing = SeasonStanding::from_snapshot(&ranking(Some("Golden Roast"), 80.0, 92.0));

        assert_eq!(standing.tier, SeasonTier::GoldenRoast);
        assert!(!standing.tier_from_percentile);
        assert_eq!(standing.tier_name, "Golden Roast");
        assert_eq!(standing.tier_color, "#FFD700");
        assert_eq!(standing.next_tier, Some(SeasonTier::PlatinumBurn));
        assert!(standing.near_rank_up);
        assert_eq!(standing.progress_percent, 92.0);
        assert_eq!(standing.percentile_label, "Top 25%");
    }

    #[test]
    fn missing_tier_is_resolved_from_percentile() {
        let standing = SeasonStanding::from_snapshot(&ranking(None, 97.0, 0.0));

        assert_eq!(standing.tier, SeasonTier::DiamondSavage);
        assert!(standing.tier_from_percentile);
        assert_eq!(standing.tier_name, "Diamond Savage");
        assert_eq!(standing.tier_color, SeasonTier::DiamondSavage.color());
        assert_eq!(standing.tier_icon, "diamond");
        assert_eq!(standing.next_tier, Some(SeasonTier::LegendaryMenace));
        assert_eq!(standing.progress_percent, 50.0);
        assert!(!standing.near_rank_up);
        assert_eq!(standing.percentile_label, "Top 5%");
    }

    #[test]
    fn unknown_tier_name_is_resolved_from_percentile() {
        let standing = SeasonStanding::from_snapshot(&ranking(Some("Wooden Spoon"), 10.0, 20.0));

        assert_eq!(standing.tier, SeasonTier::BronzeMouth);
        assert!(standing.tier_from_percentile);
        assert_eq!(standing.tier_color, "#CD7F32");
        assert_eq!(standing.progress_percent, 20.0);
        assert!(!standing.near_rank_up);
        assert_eq!(standing.percentile_label, "Top 90%");
    }

    #[test]
    fn vip_status_reports_next_level_gap() {
        let status = VipStatus::from_snapshot(&member(1, 0), 86_400 * 3);
        assert_eq!(status.sek_to_next_level, Some(1316));
        assert_eq!(status.progress_percent, 0.0);
        assert_eq!(status.member_for, "3d");
    }

    #[test]
    fn max_level_vip_has_no_gap() {
        let status = VipStatus::from_snapshot(&member(20, 30_000), 0);
        assert_eq!(status.sek_to_next_level, None);
        assert_eq!(status.progress_percent, 100.0);
    }
}
