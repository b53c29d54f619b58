// User entity
// The per-person points ledger record

use serde::{Deserialize, Serialize};

use crate::value_objects::{MealType, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CateringDefaults {
    pub breakfast: u32,
    pub lunch: u32,
    pub dinner: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CateringAllowance {
    pub breakfast: u32,
    pub lunch: u32,
    pub dinner: u32,
    pub last_reset: i64,
}

impl CateringAllowance {
    pub fn fresh(defaults: &CateringDefaults, now: i64) -> Self {
        Self {
            breakfast: defaults.breakfast,
            lunch: defaults.lunch,
            dinner: defaults.dinner,
            last_reset: now,
        }
    }

    pub fn for_meal(&self, meal: MealType) -> u32 {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
        }
    }

    /// Caller must have checked sufficiency; saturates rather than wraps.
    pub fn debit(&mut self, meal: MealType, amount: u32) {
        let slot = match meal {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        };
        *slot = slot.saturating_sub(amount);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id_number: String,
    pub name: String,
    pub email: String,
    pub university: String,
    pub role: Role,
    pub password_hash: String,
    pub points: u64,
    pub points_used: u64,
    pub catering: CateringAllowance,
    pub last_feedback_at: Option<i64>,
    pub created_at: i64,
}

/// API shape of a user, without the credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id_number: String,
    pub name: String,
    pub email: String,
    pub university: String,
    pub role: Role,
    pub points: u64,
    pub points_used: u64,
    pub catering: CateringAllowance,
    pub created_at: i64,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id_number: user.id_number.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            university: user.university.clone(),
            role: user.role,
            points: user.points,
            points_used: user.points_used,
            catering: user.catering.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub id_number: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub university: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub id_number: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}
