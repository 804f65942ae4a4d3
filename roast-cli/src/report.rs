use roast_core::locale::LocaleStore;
use roast_core::progression::{CreatorProgress, SeasonStanding, VipGiftOutcome, VipStatus};
use roast_progression::formatting::{format_progress, format_sek, format_xp};

pub fn creator(progress: &CreatorProgress, locale: &LocaleStore) -> String {
    format!(
        "{} {} ({})\n{} / {} ({})",
        locale.translate("level"),
        progress.level,
        progress.title,
        format_xp(progress.current_xp),
        format_xp(progress.xp_to_next_level),
        format_progress(f64::from(progress.progress_percent)),
    )
}

pub fn season(standing: &SeasonStanding, locale: &LocaleStore) -> String {
    let mut out = format!(
        "{} #{}: {} [{}] {}\n{}",
        locale.translate("season_rank"),
        standing.rank,
        standing.tier_name,
        standing.tier_icon,
        standing.percentile_label,
        format_progress(standing.progress_percent),
    );

    if standing.near_rank_up {
        out.push_str(" - ");
        out.push_str(locale.translate("near_rank_up"));
    }

    out
}

pub fn leaderboard(standings: &[SeasonStanding]) -> String {
    if standings.is_empty() {
        return "No rankings yet.".to_owned();
    }

    standings
        .iter()
        .map(|standing| {
            format!(
                "{:>3}. {:<24} {:<18} {:.1}",
                standing.rank, standing.creator_id, standing.tier_name, standing.composite_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn vip(status: &VipStatus, locale: &LocaleStore) -> String {
    let next = match status.sek_to_next_level {
        Some(missing) => format!(
            "{} {}",
            format_sek(missing),
            locale.translate("sek_to_next")
        ),
        None => locale.translate("max_level").to_owned(),
    };

    format!(
        "{} {} ({} / {})\n{}\n{} {}",
        locale.translate("vip_level"),
        status.level,
        format_sek(status.total_gifted_sek),
        format_progress(status.progress_percent),
        next,
        locale.translate("member_since"),
        status.member_for,
    )
}

pub fn club(members: &[VipStatus]) -> String {
    if members.is_empty() {
        return "No members yet.".to_owned();
    }

    members
        .iter()
        .enumerate()
        .map(|(idx, member)| {
            format!(
                "{:>3}. {:<24} VIP {:<2} {}",
                idx + 1,
                member.user_id,
                member.level,
                format_sek(member.total_gifted_sek)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn gift(outcome: &VipGiftOutcome, locale: &LocaleStore) -> String {
    let mut out = vip(&outcome.status, locale);
    if outcome.leveled_up {
        out.insert_str(
            0,
            &format!(
                "Level up! {} -> {}\n",
                outcome.previous_level, outcome.status.level
            ),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use roast_core::locale::{Language, LocaleStore};
    use roast_core::progression::{VipGiftOutcome, VipStatus};

    fn status(level: u8, total: u64, next: Option<u64>) -> VipStatus {
        VipStatus {
            club_id: "club".to_owned(),
            user_id: "fan".to_owned(),
            level,
            total_gifted_sek: total,
            progress_percent: 50.0,
            sek_to_next_level: next,
            joined_at: 0,
            member_for: "3d".to_owned(),
        }
    }

    #[test]
    fn vip_report_is_localized() {
        let locale = LocaleStore::new(Language::Swedish);
        let text = super::vip(&status(2, 2_000, Some(632)), &locale);

        assert!(text.starts_with("VIP-nivå 2 (2 000 kr / 50%)"));
        assert!(text.contains("632 kr till nästa nivå"));
        assert!(text.ends_with("Medlem i 3d"));
    }

    #[test]
    fn max_level_report_has_no_gap() {
        let locale = LocaleStore::default();
        let text = super::vip(&status(20, 25_000, None), &locale);
        assert!(text.contains("Max level reached"));
    }

    #[test]
    fn gift_report_announces_level_up() {
        let locale = LocaleStore::default();
        let outcome = VipGiftOutcome {
            status: status(3, 2_700, Some(1_248)),
            previous_level: 2,
            leveled_up: true,
        };

        assert!(super::gift(&outcome, &locale).starts_with("Level up! 2 -> 3\n"));
    }

    #[test]
    fn empty_lists_have_placeholders() {
        assert_eq!(super::leaderboard(&[]), "No rankings yet.");
        assert_eq!(super::club(&[]), "No members yet.");
    }
}
