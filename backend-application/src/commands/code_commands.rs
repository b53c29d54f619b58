use anyhow::anyhow;
use rand::Rng;

use backend_domain::ports::CodeClaimOutcome;
use backend_domain::utils::current_millis;
use backend_domain::RedemptionCode;

use crate::{AppError, AppState};

const CODE_SPACE: u32 = 1_000_000;

pub async fn generate_code(state: &AppState, cashier_id: &str) -> Result<RedemptionCode, AppError> {
    let attempts = state.config.code_insert_attempts.max(1);
    for _ in 0..attempts {
        let digits = format_code(rand::thread_rng().gen_range(0..CODE_SPACE));
        let code = RedemptionCode::issue(digits, cashier_id.to_string(), current_millis());
        // Uniqueness is enforced at insert; a duplicate draw just retries.
        if state.codes.insert_code(&code).await? {
            return Ok(code);
        }
    }
    Err(AppError::Internal(anyhow!(
        "could not allocate a unique code after {} attempts",
        attempts
    )))
}

pub async fn claim_code(
    state: &AppState,
    redeemer_id: &str,
    code: &str,
) -> Result<RedemptionCode, AppError> {
    let digits = code.trim();
    if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(AppError::BadRequest("code must be 6 digits".to_string()));
    }
    match state
        .codes
        .claim_code(digits, redeemer_id, current_millis())
        .await?
    {
        CodeClaimOutcome::Claimed(code) => {
            state.metrics.record_code_claim();
            Ok(code)
        }
        CodeClaimOutcome::AlreadyClaimed => {
            Err(AppError::BadRequest("code already claimed".to_string()))
        }
        CodeClaimOutcome::NotFound => Err(AppError::NotFound("code not found".to_string())),
    }
}

fn format_code(value: u32) -> String {
    format!("{:06}", value % CODE_SPACE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_zero_padded_to_six_digits() {
        assert_eq!(format_code(7), "000007");
        assert_eq!(format_code(123_456), "123456");
        assert_eq!(format_code(999_999), "999999");
    }
}
