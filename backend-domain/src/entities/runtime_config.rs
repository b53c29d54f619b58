// Immutable runtime configuration shared through AppState

use crate::entities::CateringDefaults;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
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
    pub catering_defaults: CateringDefaults,
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
