use uuid::Uuid;

use backend_domain::{Reward, RewardUpsert};

use crate::{AppError, AppState};

pub async fn create_reward(state: &AppState, payload: RewardUpsert) -> Result<Reward, AppError> {
    let reward = Reward {
        id: Uuid::new_v4().to_string(),
        name: String::new(),
        cost: 0,
        description: String::new(),
        image_url: None,
    };
    let reward = apply_upsert(reward, payload)?;
    state.rewards.insert_reward(&reward).await?;
    Ok(reward)
}

pub async fn update_reward(
    state: &AppState,
    reward_id: &str,
    payload: RewardUpsert,
) -> Result<Reward, AppError> {
    let existing = state
        .rewards
        .fetch_reward(reward_id.trim())
        .await?
        .ok_or_else(|| AppError::NotFound("reward not found".to_string()))?;
    let reward = apply_upsert(existing, payload)?;
    if !state.rewards.update_reward(&reward).await? {
        return Err(AppError::NotFound("reward not found".to_string()));
    }
    Ok(reward)
}

pub async fn delete_reward(state: &AppState, reward_id: &str) -> Result<(), AppError> {
    if !state.rewards.delete_reward(reward_id.trim()).await? {
        return Err(AppError::NotFound("reward not found".to_string()));
    }
    Ok(())
}

fn apply_upsert(mut reward: Reward, payload: RewardUpsert) -> Result<Reward, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    if payload.cost == 0 {
        return Err(AppError::BadRequest(
            "reward cost must be positive".to_string(),
        ));
    }
    reward.name = name;
    reward.cost = payload.cost;
    reward.description = payload
        .description
        .map(|description| description.trim().to_string())
        .unwrap_or_default();
    reward.image_url = payload
        .image_url
        .and_then(|url| {
            let trimmed = url.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        });
    Ok(reward)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert(name: &str, cost: u32) -> RewardUpsert {
        RewardUpsert {
            name: name.to_string(),
            cost,
            description: None,
            image_url: Some("  ".to_string()),
        }
    }

    #[test]
    fn upsert_rejects_zero_cost() {
        let reward = Reward {
            id: "r1".to_string(),
            name: String::new(),
            cost: 0,
            description: String::new(),
            image_url: None,
        };
        let err = apply_upsert(reward, upsert("Mug", 0)).expect_err("reject zero cost");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn upsert_normalizes_optional_fields() {
        let reward = Reward {
            id: "r1".to_string(),
            name: String::new(),
            cost: 0,
            description: String::new(),
            image_url: None,
        };
        let reward = apply_upsert(reward, upsert(" Mug ", 40)).expect("apply");
        assert_eq!(reward.name, "Mug");
        assert_eq!(reward.cost, 40);
        assert_eq!(reward.image_url, None);
    }
}
