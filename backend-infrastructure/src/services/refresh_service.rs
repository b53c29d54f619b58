use tokio::time::Duration;
use tracing::error;

use backend_application::queries::report_queries;
use backend_application::AppState;

/// Recomputes the dashboard snapshot on a fixed interval, overwriting
/// the cached entry regardless of its freshness.
pub async fn schedule_dashboard_refresh(state: AppState) {
    let period = state.config.dashboard_refresh_seconds.max(5);
    loop {
        tokio::time::sleep(Duration::from_secs(period)).await;
        if let Err(err) = report_queries::refresh_dashboard(&state).await {
            error!("dashboard refresh failed: {}", err);
        }
    }
}
