use serde::{Deserialize, Serialize};

/// Stored XP snapshot for a creator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorLevel {
    pub creator_id: String,
    pub current_xp: u64,
    pub level: u32,
    pub xp_to_next_level: u64,
}
