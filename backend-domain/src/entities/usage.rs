// Points usage entity
// Append-only transaction log of catering spends

use serde::{Deserialize, Serialize};

use crate::value_objects::MealType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageItem {
    pub name: String,
    pub quantity: u32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsUsage {
    pub id: String,
    pub id_number: String,
    pub meal_type: MealType,
    pub store: String,
    pub items: Vec<UsageItem>,
    pub points_spent: u32,
    pub recorded_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsageRequest {
    pub meal_type: String,
    pub store: String,
    pub items: Vec<UsageItem>,
    pub total_amount: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageReceipt {
    /// Remaining allowance for the debited meal.
    pub remaining: u64,
    pub usage: PointsUsage,
}
