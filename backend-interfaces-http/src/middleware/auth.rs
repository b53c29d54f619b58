use std::io::Read;

use anyhow::{anyhow, Result};
use axum::http::HeaderMap;
use flate2::read::GzDecoder;

use backend_application::token::{verify_token, AuthClaims};
use backend_domain::utils::current_millis;
use backend_domain::{BorrowScanEnvelope, BorrowScanEvent, Role, RuntimeConfig};

use crate::error::HttpError;

pub fn authenticate(config: &RuntimeConfig, headers: &HeaderMap) -> Result<AuthClaims, HttpError> {
    let token = extract_bearer(headers).ok_or(HttpError::Unauthorized)?;
    verify_token(&config.auth_token_secret, &token, current_millis())
        .map_err(|_| HttpError::Unauthorized)
}

pub fn require_role(claims: &AuthClaims, allowed: &[Role]) -> Result<(), HttpError> {
    if allowed.contains(&claims.role) {
        Ok(())
    } else {
        Err(HttpError::Forbidden)
    }
}

pub fn parse_scan_events(headers: &HeaderMap, body: &[u8]) -> Result<Vec<BorrowScanEvent>> {
    let content = maybe_gunzip(headers, body)?;
    let envelope: BorrowScanEnvelope = serde_json::from_str(&content)?;
    if envelope.schema_version.trim() != "v1" {
        return Err(anyhow!(
            "unsupported schema_version '{}', expected 'v1'",
            envelope.schema_version
        ));
    }
    Ok(envelope.events)
}

fn maybe_gunzip(headers: &HeaderMap, body: &[u8]) -> Result<String> {
    if let Some(encoding) = headers.get("Content-Encoding") {
        if encoding.to_str().unwrap_or("") == "gzip" {
            let mut decoder = GzDecoder::new(body);
            let mut out = String::new();
            decoder.read_to_string(&mut out)?;
            return Ok(out);
        }
    }
    Ok(String::from_utf8(body.to_vec())?)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
