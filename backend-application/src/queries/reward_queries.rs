use backend_domain::{ClaimedReward, PointsUsage, Reward};

use crate::{AppError, AppState};

pub async fn list_rewards(state: &AppState) -> Result<Vec<Reward>, AppError> {
    let mut rewards = state.rewards.list_rewards().await?;
    rewards.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(rewards)
}

pub async fn claim_history(
    state: &AppState,
    id_number: &str,
    limit: Option<usize>,
) -> Result<Vec<ClaimedReward>, AppError> {
    let limit = limit.unwrap_or(100).clamp(1, 500);
    Ok(state.ledger.list_claims(Some(id_number), limit).await?)
}

pub async fn usage_history(
    state: &AppState,
    id_number: &str,
    limit: Option<usize>,
) -> Result<Vec<PointsUsage>, AppError> {
    let limit = limit.unwrap_or(100).clamp(1, 500);
    Ok(state.ledger.list_usage(Some(id_number), limit).await?)
}
