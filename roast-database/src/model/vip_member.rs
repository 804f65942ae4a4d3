use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VipClubMember {
    pub club_id: String,
    pub user_id: String,
    pub vip_level: u8,
    pub total_gifted_sek: u64,
    /// Unix seconds; never changes after the first gift.
    pub joined_at: u64,
}

#[derive(Clone, Debug)]
pub struct VipGiftRecord {
    pub member: VipClubMember,
    pub previous_level: u8,
}

impl VipGiftRecord {
    pub fn leveled_up(&self) -> bool {
        self.member.vip_level > self.previous_level
    }
}
