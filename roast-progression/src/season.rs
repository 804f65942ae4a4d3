//! Season tiers and percentile labels.

use serde::{Deserialize, Serialize};

/// Color used for tiers that are missing or not in the table.
pub const FALLBACK_TIER_COLOR: &str = "#9E9E9E";
/// Icon used for tiers that are missing or not in the table.
pub const FALLBACK_TIER_ICON: &str = "medal";
/// Progress (percent) at which a creator is flagged as close to ranking up.
pub const NEAR_RANK_UP_THRESHOLD: f64 = 90.0;

/// Named season tiers, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonTier {
    BronzeMouth,
    SilverTongue,
    GoldenRoast,
    PlatinumBurn,
    DiamondSavage,
    LegendaryMenace,
}

impl SeasonTier {
    pub const ALL: [SeasonTier; 6] = [
        SeasonTier::BronzeMouth,
        SeasonTier::SilverTongue,
        SeasonTier::GoldenRoast,
        SeasonTier::PlatinumBurn,
        SeasonTier::DiamondSavage,
        SeasonTier::LegendaryMenace,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SeasonTier::BronzeMouth => "Bronze Mouth",
            SeasonTier::SilverTongue => "Silver Tongue",
            SeasonTier::GoldenRoast => "Golden Roast",
            SeasonTier::PlatinumBurn => "Platinum Burn",
            SeasonTier::DiamondSavage => "Diamond Savage",
            SeasonTier::LegendaryMenace => "Legendary Menace",
        }
    }

    /// Storage key, e.g. `golden_roast`.
    pub fn key(self) -> &'static str {
        match self {
            SeasonTier::BronzeMouth => "bronze_mouth",
            SeasonTier::SilverTongue => "silver_tongue",
            SeasonTier::GoldenRoast => "golden_roast",
            SeasonTier::PlatinumBurn => "platinum_burn",
            SeasonTier::DiamondSavage => "diamond_savage",
            SeasonTier::LegendaryMenace => "legendary_menace",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            SeasonTier::BronzeMouth => "#CD7F32",
            SeasonTier::SilverTongue => "#C0C0C0",
            SeasonTier::GoldenRoast => "#FFD700",
            SeasonTier::PlatinumBurn => "#E5E4E2",
            SeasonTier::DiamondSavage => "#B9F2FF",
            SeasonTier::LegendaryMenace => "#FF4500",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SeasonTier::BronzeMouth => "medal-bronze",
            SeasonTier::SilverTongue => "medal-silver",
            SeasonTier::GoldenRoast => "trophy",
            SeasonTier::PlatinumBurn => "flame",
            SeasonTier::DiamondSavage => "diamond",
            SeasonTier::LegendaryMenace => "crown",
        }
    }

    /// Resolve a tier from its display name or storage key.
    ///
    /// Matching ignores case, surrounding whitespace, and `_`/space differences.
    pub fn from_name(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace(' ', "_");
        if normalized.is_empty() {
            return None;
        }

        Self::ALL.into_iter().find(|tier| tier.key() == normalized)
    }

    /// Lowest percentile (inclusive) that belongs to this tier.
    pub fn percentile_floor(self) -> f64 {
        match self {
            SeasonTier::BronzeMouth => 0.0,
            SeasonTier::SilverTongue => 50.0,
            SeasonTier::GoldenRoast => 75.0,
            SeasonTier::PlatinumBurn => 90.0,
            SeasonTier::DiamondSavage => 95.0,
            SeasonTier::LegendaryMenace => 99.0,
        }
    }

    /// Tier that a percentile (0-100) falls into.
    pub fn for_percentile(percentile: f64) -> Self {
        let percentile = clamp_percent(percentile);
        Self::ALL
            .into_iter()
            .rev()
            .find(|tier| percentile >= tier.percentile_floor())
            .unwrap_or(SeasonTier::BronzeMouth)
    }

    pub fn next(self) -> Option<Self> {
        match self {
            SeasonTier::BronzeMouth => Some(SeasonTier::SilverTongue),
            SeasonTier::SilverTongue => Some(SeasonTier::GoldenRoast),
            SeasonTier::GoldenRoast => Some(SeasonTier::PlatinumBurn),
            SeasonTier::PlatinumBurn => Some(SeasonTier::DiamondSavage),
            SeasonTier::DiamondSavage => Some(SeasonTier::LegendaryMenace),
            SeasonTier::LegendaryMenace => None,
        }
    }
}

/// Display color for a stored tier name, gray when unknown.
pub fn tier_color(tier_name: Option<&str>) -> &'static str {
    tier_name
        .and_then(SeasonTier::from_name)
        .map_or(FALLBACK_TIER_COLOR, SeasonTier::color)
}

/// Icon for a stored tier name, the default medal when unknown.
pub fn tier_icon(tier_name: Option<&str>) -> &'static str {
    tier_name
        .and_then(SeasonTier::from_name)
        .map_or(FALLBACK_TIER_ICON, SeasonTier::icon)
}

pub fn is_near_rank_up(progress_to_next_tier: f64) -> bool {
    progress_to_next_tier >= NEAR_RANK_UP_THRESHOLD
}

/// Human label for a percentile, e.g. 99 -> "Top 1%", 10 -> "Top 90%".
pub fn percentile_description(percentile: f64) -> String {
    let percentile = clamp_percent(percentile);

    let top = match percentile {
        p if p >= 99.0 => 1,
        p if p >= 95.0 => 5,
        p if p >= 90.0 => 10,
        p if p >= 75.0 => 25,
        p if p >= 50.0 => 50,
        p => (100.0 - p).round() as u32,
    };

    format!("Top {top}%")
}

/// Position (0-100) of a percentile inside its tier bracket.
///
/// The top tier has nowhere left to go and always reports 100.
pub fn progress_to_next_tier(percentile: f64) -> f64 {
    let percentile = clamp_percent(percentile);
    let tier = SeasonTier::for_percentile(percentile);

    let Some(next) = tier.next() else {
        return 100.0;
    };

    let floor = tier.percentile_floor();
    let span = next.percentile_floor() - floor;
    ((percentile - floor) / span * 100.0).clamp(0.0, 100.0)
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }

    value.clamp(0.0, 100.0)
}
