pub mod creator_levels;
pub mod season_rankings;
pub mod vip_members;
