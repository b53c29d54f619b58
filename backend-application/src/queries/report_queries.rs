use anyhow::anyhow;
use tracing::warn;

use backend_domain::utils::current_millis;
use backend_domain::{
    BoundedResult, DashboardSnapshot, LoanQuery, LoanRecord, PointsUsage,
};

use crate::{AppError, AppState};

/// Dashboard read, answered from the tab cache when fresh.
pub async fn dashboard(
    state: &AppState,
    from: Option<i64>,
    to: Option<i64>,
) -> Result<DashboardSnapshot, AppError> {
    let key = dashboard_key(from, to);
    let now = current_millis();
    if let Some(value) = state.dashboard.get(&key, now) {
        match serde_json::from_value(value) {
            Ok(snapshot) => return Ok(snapshot),
            Err(err) => warn!("discarding malformed dashboard cache entry: {}", err),
        }
    }
    let snapshot = compute_dashboard(state, from, to).await?;
    match serde_json::to_value(&snapshot) {
        Ok(value) => state.dashboard.set(&key, value, now),
        Err(err) => warn!("dashboard snapshot not cacheable: {}", err),
    }
    Ok(snapshot)
}

pub async fn compute_dashboard(
    state: &AppState,
    from: Option<i64>,
    to: Option<i64>,
) -> Result<DashboardSnapshot, AppError> {
    let usage = state.ledger.usage_summary(from, to).await?;
    let loans = state.loans.loan_summary().await?;
    let users = state.users.count_users().await?;
    Ok(DashboardSnapshot {
        generated_at: current_millis(),
        users,
        usage,
        loans,
    })
}

/// Background refresh of the unfiltered snapshot; overwrites silently.
pub async fn refresh_dashboard(state: &AppState) -> Result<(), AppError> {
    let snapshot = compute_dashboard(state, None, None).await?;
    let value = serde_json::to_value(&snapshot)
        .map_err(|err| AppError::Internal(anyhow!("dashboard snapshot not serializable: {err}")))?;
    state
        .dashboard
        .set(&dashboard_key(None, None), value, current_millis());
    Ok(())
}

pub async fn export_usage(state: &AppState) -> Result<BoundedResult<PointsUsage>, AppError> {
    let cap = state.config.export_row_cap.max(1);
    let mut rows = state.ledger.list_usage(None, cap + 1).await?;
    let limited = rows.len() > cap;
    rows.truncate(cap);
    Ok(BoundedResult { rows, limited })
}

pub async fn export_loans(state: &AppState) -> Result<BoundedResult<LoanRecord>, AppError> {
    let cap = state.config.export_row_cap.max(1);
    let mut rows = state
        .loans
        .list_loans(LoanQuery {
            limit: cap + 1,
            ..LoanQuery::default()
        })
        .await?;
    let limited = rows.len() > cap;
    rows.truncate(cap);
    Ok(BoundedResult { rows, limited })
}

fn dashboard_key(from: Option<i64>, to: Option<i64>) -> String {
    format!(
        "dashboard:{}:{}",
        from.map(|value| value.to_string()).unwrap_or_default(),
        to.map(|value| value.to_string()).unwrap_or_default()
    )
}
