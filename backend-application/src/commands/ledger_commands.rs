use uuid::Uuid;

use backend_domain::ports::{DebitOutcome, FeedbackOutcome};
use backend_domain::services::catering::feedback_window_start;
use backend_domain::utils::current_millis;
use backend_domain::{
    ClaimReceipt, ClaimedReward, FeedbackEntry, FeedbackReceipt, FeedbackRequest, MealType,
    PointsUsage, UsageItem, UsageReceipt, UsageRequest,
};

use crate::{AppError, AppState};

pub async fn claim_reward(
    state: &AppState,
    id_number: &str,
    reward_id: &str,
) -> Result<ClaimReceipt, AppError> {
    let reward = state
        .rewards
        .fetch_reward(reward_id.trim())
        .await?
        .ok_or_else(|| AppError::NotFound("reward not found".to_string()))?;
    if reward.cost == 0 {
        return Err(AppError::BadRequest(
            "reward cost must be positive".to_string(),
        ));
    }
    let claim = ClaimedReward {
        id: Uuid::new_v4().to_string(),
        id_number: id_number.to_string(),
        reward_name: reward.name.clone(),
        points_spent: reward.cost,
        claimed_at: current_millis(),
    };
    match state.ledger.debit_for_claim(claim.clone()).await? {
        DebitOutcome::Applied { balance } => {
            state.metrics.record_reward_claim();
            state.dashboard.invalidate_prefix("dashboard");
            Ok(ClaimReceipt { balance, claim })
        }
        DebitOutcome::Insufficient {
            required,
            available,
        } => Err(AppError::BadRequest(format!(
            "insufficient points: required {}, available {}",
            required, available
        ))),
        DebitOutcome::UserMissing => Err(AppError::NotFound("user not found".to_string())),
    }
}

pub async fn record_points_usage(
    state: &AppState,
    id_number: &str,
    payload: UsageRequest,
) -> Result<UsageReceipt, AppError> {
    let meal_type = MealType::parse(&payload.meal_type).ok_or_else(|| {
        AppError::BadRequest(format!("invalid meal type '{}'", payload.meal_type.trim()))
    })?;
    let store = payload.store.trim().to_string();
    {
        let stores = state.stores.read().await;
        if !stores.iter().any(|candidate| candidate == &store) {
            return Err(AppError::BadRequest(format!(
                "store '{}' is not an approved store",
                store
            )));
        }
    }
    validate_usage_items(&payload.items, payload.total_amount)?;

    let usage = PointsUsage {
        id: Uuid::new_v4().to_string(),
        id_number: id_number.to_string(),
        meal_type,
        store,
        items: payload.items,
        points_spent: payload.total_amount,
        recorded_at: current_millis(),
    };
    match state
        .ledger
        .debit_for_usage(usage.clone(), &state.config.catering_defaults)
        .await?
    {
        DebitOutcome::Applied { balance } => {
            state.metrics.record_usage();
            state.dashboard.invalidate_prefix("dashboard");
            Ok(UsageReceipt {
                remaining: balance,
                usage,
            })
        }
        DebitOutcome::Insufficient {
            required,
            available,
        } => Err(AppError::BadRequest(format!(
            "insufficient {} allowance: required {}, available {}",
            meal_type.as_str(),
            required,
            available
        ))),
        DebitOutcome::UserMissing => Err(AppError::NotFound("user not found".to_string())),
    }
}

pub async fn submit_feedback(
    state: &AppState,
    id_number: &str,
    payload: FeedbackRequest,
) -> Result<FeedbackReceipt, AppError> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    let now = current_millis();
    let window_start = feedback_window_start(now, state.config.feedback_cutover_hour);
    let entry = FeedbackEntry {
        id: Uuid::new_v4().to_string(),
        id_number: id_number.to_string(),
        rating: payload.rating,
        comment: payload
            .comment
            .map(|comment| comment.trim().to_string())
            .unwrap_or_default(),
        awarded_points: state.config.feedback_award_points,
        submitted_at: now,
    };
    match state.ledger.credit_for_feedback(entry, window_start).await? {
        FeedbackOutcome::Awarded { balance } => {
            state.metrics.record_feedback();
            Ok(FeedbackReceipt {
                balance,
                awarded_points: state.config.feedback_award_points,
            })
        }
        FeedbackOutcome::AlreadySubmitted => Err(AppError::BadRequest(
            "feedback already submitted for today".to_string(),
        )),
        FeedbackOutcome::UserMissing => Err(AppError::NotFound("user not found".to_string())),
    }
}

fn validate_usage_items(items: &[UsageItem], total_amount: u32) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(AppError::BadRequest("items must not be empty".to_string()));
    }
    if total_amount == 0 {
        return Err(AppError::BadRequest(
            "total_amount must be positive".to_string(),
        ));
    }
    let mut sum: u64 = 0;
    for item in items {
        if item.name.trim().is_empty() {
            return Err(AppError::BadRequest("item name must not be empty".to_string()));
        }
        if item.quantity == 0 {
            return Err(AppError::BadRequest(format!(
                "quantity must be positive for '{}'",
                item.name
            )));
        }
        sum += u64::from(item.points);
    }
    if sum != u64::from(total_amount) {
        return Err(AppError::BadRequest(format!(
            "total_amount {} does not match item sum {}",
            total_amount, sum
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: u32, points: u32) -> UsageItem {
        UsageItem {
            name: name.to_string(),
            quantity,
            points,
        }
    }

    #[test]
    fn usage_items_must_sum_exactly_to_total() {
        let items = vec![item("Noodles", 1, 12), item("Tea", 2, 6)];
        validate_usage_items(&items, 18).expect("exact sum accepted");
        let err = validate_usage_items(&items, 20).expect_err("reject mismatch");
        match err {
            AppError::BadRequest(message) => assert!(message.contains("does not match")),
            _ => panic!("unexpected error type"),
        }
    }

    #[test]
    fn usage_items_reject_empty_and_zero_quantity() {
        assert!(validate_usage_items(&[], 10).is_err());
        let err = validate_usage_items(&[item("Rice", 0, 10)], 10).expect_err("reject zero");
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
