// Reward catalog and claim audit entities

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub name: String,
    pub cost: u32,
    pub description: String,
    pub image_url: Option<String>,
}

/// Append-only audit row for a successful reward claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimedReward {
    pub id: String,
    pub id_number: String,
    pub reward_name: String,
    pub points_spent: u32,
    pub claimed_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardUpsert {
    pub name: String,
    pub cost: u32,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClaimReceipt {
    pub balance: u64,
    pub claim: ClaimedReward,
}
