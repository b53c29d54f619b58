use anyhow::anyhow;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use backend_domain::Role;

use crate::AppError;

const TOKEN_PREFIX: &str = "mensa";
const TOKEN_VERSION: &str = "v1";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone)]
pub struct AuthClaims {
    pub id_number: String,
    pub role: Role,
    pub expires_at: i64,
}

pub fn issue_token(
    secret: &str,
    id_number: &str,
    role: Role,
    ttl_millis: i64,
    now: i64,
) -> Result<String, AppError> {
    let expires_at = now + ttl_millis;
    let signature = sign_hmac_sha256(secret, &signing_payload(id_number, role, expires_at))?;
    Ok(format!(
        "{}.{}.{}.{}.{}.{}",
        TOKEN_PREFIX,
        TOKEN_VERSION,
        id_number,
        role.as_str(),
        expires_at,
        signature
    ))
}

pub fn verify_token(secret: &str, token: &str, now: i64) -> Result<AuthClaims, AppError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 6 || parts[0] != TOKEN_PREFIX || parts[1] != TOKEN_VERSION {
        return Err(AppError::Unauthorized);
    }
    let id_number = parts[2];
    let role = Role::parse(parts[3]).ok_or(AppError::Unauthorized)?;
    let expires_at: i64 = parts[4].parse().map_err(|_| AppError::Unauthorized)?;
    if id_number.is_empty() || now >= expires_at {
        return Err(AppError::Unauthorized);
    }
    let expected = sign_hmac_sha256(secret, &signing_payload(id_number, role, expires_at))?;
    if expected != parts[5] {
        return Err(AppError::Unauthorized);
    }
    Ok(AuthClaims {
        id_number: id_number.to_string(),
        role,
        expires_at,
    })
}

fn signing_payload(id_number: &str, role: Role, expires_at: i64) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        TOKEN_PREFIX,
        TOKEN_VERSION,
        id_number,
        role.as_str(),
        expires_at
    )
}

fn sign_hmac_sha256(secret: &str, payload: &str) -> Result<String, AppError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|err| AppError::Internal(anyhow!("hmac init failed: {err}")))?;
    mac.update(payload.as_bytes());
    let digest = mac.finalize().into_bytes();

    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip_verifies() {
        let token = issue_token("secret", "2021001", Role::Student, 3_600_000, 1_000)
            .expect("issue token");
        let claims = verify_token("secret", &token, 2_000).expect("verify token");
        assert_eq!(claims.id_number, "2021001");
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.expires_at, 3_601_000);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue_token("secret", "2021001", Role::Student, 1_000, 0).expect("issue token");
        let err = verify_token("secret", &token, 1_000).expect_err("reject expired");
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn tampered_role_is_rejected() {
        let token = issue_token("secret", "2021001", Role::Student, 3_600_000, 0)
            .expect("issue token")
            .replace(".student.", ".admin.");
        let err = verify_token("secret", &token, 1).expect_err("reject tampered");
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token("secret", "2021001", Role::Admin, 3_600_000, 0).expect("issue token");
        let err = verify_token("other", &token, 1).expect_err("reject wrong secret");
        assert!(matches!(err, AppError::Unauthorized));
    }
}
