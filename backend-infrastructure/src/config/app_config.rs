use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{CateringDefaults, RuntimeConfig};

const DEV_TOKEN_SECRET: &str = "mensa-dev-secret";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub public_base_url: String,
    pub auth_token_secret: String,
    pub token_ttl_hours: u64,
    pub data_dir: String,
    pub stores_path: String,
    pub report_dir: String,
    pub webhook_url: Option<String>,
    pub webhook_template: Option<String>,
    pub default_stores: Vec<String>,
    pub catering_breakfast: u32,
    pub catering_lunch: u32,
    pub catering_dinner: u32,
    pub feedback_award_points: u32,
    pub feedback_cutover_hour: u32,
    pub max_login_attempts: u32,
    pub login_window_seconds: u64,
    pub code_insert_attempts: u32,
    pub export_row_cap: usize,
    pub dashboard_cache_seconds: u64,
    pub dashboard_cache_capacity: usize,
    pub dashboard_refresh_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub report_hour: u32,
    pub report_minute: u32,
    pub admin_id_number: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3180".to_string(),
            public_base_url: "http://127.0.0.1:3180".to_string(),
            auth_token_secret: DEV_TOKEN_SECRET.to_string(),
            token_ttl_hours: 24,
            data_dir: "./data".to_string(),
            stores_path: "./stores.yaml".to_string(),
            report_dir: "./reports".to_string(),
            webhook_url: None,
            webhook_template: None,
            default_stores: vec![
                "North Canteen".to_string(),
                "South Canteen".to_string(),
                "Cafe West".to_string(),
            ],
            catering_breakfast: 20,
            catering_lunch: 35,
            catering_dinner: 35,
            feedback_award_points: 3,
            feedback_cutover_hour: 6,
            max_login_attempts: 5,
            login_window_seconds: 900,
            code_insert_attempts: 8,
            export_row_cap: 500,
            dashboard_cache_seconds: 30,
            dashboard_cache_capacity: 32,
            dashboard_refresh_seconds: 60,
            max_body_bytes: 2 * 1024 * 1024,
            request_timeout_seconds: 15,
            report_hour: 23,
            report_minute: 55,
            admin_id_number: None,
            admin_password: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("MENSA_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(webhook_url) = &self.webhook_url {
            if webhook_url.trim().is_empty() {
                self.webhook_url = None;
            }
        }
        if let Some(template) = &self.webhook_template {
            if template.trim().is_empty() {
                self.webhook_template = None;
            }
        }
        if let Some(id_number) = &self.admin_id_number {
            if id_number.trim().is_empty() {
                self.admin_id_number = None;
            }
        }
        if let Some(password) = &self.admin_password {
            if password.trim().is_empty() {
                self.admin_password = None;
            }
        }
        self.default_stores = normalize_store_names(std::mem::take(&mut self.default_stores));
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_dir = resolve_path(base, &self.data_dir);
        self.stores_path = resolve_path(base, &self.stores_path);
        self.report_dir = resolve_path(base, &self.report_dir);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.public_base_url.trim().is_empty() {
            return Err(anyhow!("public_base_url must not be empty"));
        }
        if self.auth_token_secret.trim().is_empty() {
            return Err(anyhow!("auth_token_secret must not be empty"));
        }
        if self.auth_token_secret == DEV_TOKEN_SECRET {
            warn!("auth_token_secret is the development default; set MENSA_AUTH_TOKEN_SECRET");
        }
        if self.token_ttl_hours == 0 {
            return Err(anyhow!("token_ttl_hours must be greater than 0"));
        }
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("data_dir must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.feedback_cutover_hour > 23 {
            return Err(anyhow!("feedback_cutover_hour out of range"));
        }
        if self.report_hour > 23 || self.report_minute > 59 {
            return Err(anyhow!("report_hour or report_minute out of range"));
        }
        if self.max_login_attempts == 0 {
            return Err(anyhow!("max_login_attempts must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            public_base_url: self.public_base_url.clone(),
            auth_token_secret: self.auth_token_secret.clone(),
            token_ttl_hours: self.token_ttl_hours,
            data_dir: self.data_dir.clone(),
            stores_path: self.stores_path.clone(),
            report_dir: self.report_dir.clone(),
            webhook_url: self.webhook_url.clone(),
            webhook_template: self.webhook_template.clone(),
            default_stores: self.default_stores.clone(),
            catering_defaults: CateringDefaults {
                breakfast: self.catering_breakfast,
                lunch: self.catering_lunch,
                dinner: self.catering_dinner,
            },
            feedback_award_points: self.feedback_award_points,
            feedback_cutover_hour: self.feedback_cutover_hour,
            max_login_attempts: self.max_login_attempts,
            login_window_seconds: self.login_window_seconds,
            code_insert_attempts: self.code_insert_attempts,
            export_row_cap: self.export_row_cap,
            dashboard_cache_seconds: self.dashboard_cache_seconds,
            dashboard_cache_capacity: self.dashboard_cache_capacity,
            dashboard_refresh_seconds: self.dashboard_refresh_seconds,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            report_hour: self.report_hour,
            report_minute: self.report_minute,
            admin_id_number: self.admin_id_number.clone(),
            admin_password: self.admin_password.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("MENSA_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("MENSA_PUBLIC_BASE_URL") {
            self.public_base_url = value;
        }
        if let Ok(value) = env::var("MENSA_AUTH_TOKEN_SECRET") {
            self.auth_token_secret = value;
        }
        if let Ok(value) = env::var("MENSA_TOKEN_TTL_HOURS") {
            self.token_ttl_hours = value.parse().unwrap_or(self.token_ttl_hours);
        }
        if let Ok(value) = env::var("MENSA_DATA_DIR") {
            self.data_dir = value;
        }
        if let Ok(value) = env::var("MENSA_STORES_PATH") {
            self.stores_path = value;
        }
        if let Ok(value) = env::var("MENSA_REPORT_DIR") {
            self.report_dir = value;
        }
        if let Ok(value) = env::var("MENSA_WEBHOOK_URL") {
            self.webhook_url = Some(value);
        }
        if let Ok(value) = env::var("MENSA_WEBHOOK_TEMPLATE") {
            self.webhook_template = Some(value);
        }
        if let Ok(value) = env::var("MENSA_DEFAULT_STORES") {
            self.default_stores = parse_env_list(&value);
        }
        if let Ok(value) = env::var("MENSA_CATERING_BREAKFAST") {
            self.catering_breakfast = value.parse().unwrap_or(self.catering_breakfast);
        }
        if let Ok(value) = env::var("MENSA_CATERING_LUNCH") {
            self.catering_lunch = value.parse().unwrap_or(self.catering_lunch);
        }
        if let Ok(value) = env::var("MENSA_CATERING_DINNER") {
            self.catering_dinner = value.parse().unwrap_or(self.catering_dinner);
        }
        if let Ok(value) = env::var("MENSA_FEEDBACK_AWARD_POINTS") {
            self.feedback_award_points = value.parse().unwrap_or(self.feedback_award_points);
        }
        if let Ok(value) = env::var("MENSA_FEEDBACK_CUTOVER_HOUR") {
            self.feedback_cutover_hour = value.parse().unwrap_or(self.feedback_cutover_hour);
        }
        if let Ok(value) = env::var("MENSA_MAX_LOGIN_ATTEMPTS") {
            self.max_login_attempts = value.parse().unwrap_or(self.max_login_attempts);
        }
        if let Ok(value) = env::var("MENSA_LOGIN_WINDOW_SECONDS") {
            self.login_window_seconds = value.parse().unwrap_or(self.login_window_seconds);
        }
        if let Ok(value) = env::var("MENSA_CODE_INSERT_ATTEMPTS") {
            self.code_insert_attempts = value.parse().unwrap_or(self.code_insert_attempts);
        }
        if let Ok(value) = env::var("MENSA_EXPORT_ROW_CAP") {
            self.export_row_cap = value.parse().unwrap_or(self.export_row_cap);
        }
        if let Ok(value) = env::var("MENSA_DASHBOARD_CACHE_SECONDS") {
            self.dashboard_cache_seconds = value.parse().unwrap_or(self.dashboard_cache_seconds);
        }
        if let Ok(value) = env::var("MENSA_DASHBOARD_CACHE_CAPACITY") {
            self.dashboard_cache_capacity =
                value.parse().unwrap_or(self.dashboard_cache_capacity);
        }
        if let Ok(value) = env::var("MENSA_DASHBOARD_REFRESH_SECONDS") {
            self.dashboard_refresh_seconds =
                value.parse().unwrap_or(self.dashboard_refresh_seconds);
        }
        if let Ok(value) = env::var("MENSA_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("MENSA_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds =
                value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("MENSA_REPORT_HOUR") {
            self.report_hour = value.parse().unwrap_or(self.report_hour);
        }
        if let Ok(value) = env::var("MENSA_REPORT_MINUTE") {
            self.report_minute = value.parse().unwrap_or(self.report_minute);
        }
        if let Ok(value) = env::var("MENSA_ADMIN_ID_NUMBER") {
            self.admin_id_number = Some(value);
        }
        if let Ok(value) = env::var("MENSA_ADMIN_PASSWORD") {
            self.admin_password = Some(value);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

fn parse_env_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn normalize_store_names(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = values
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        let config = AppConfig::default();
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn validation_rejects_empty_secret() {
        let mut config = AppConfig::default();
        config.auth_token_secret = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_list_parsing_splits_and_trims() {
        let stores = parse_env_list("North Canteen , , Cafe West");
        assert_eq!(stores, vec!["North Canteen", "Cafe West"]);
    }
}
