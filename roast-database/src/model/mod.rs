pub mod creator_level;
pub mod season_ranking;
pub mod vip_member;
