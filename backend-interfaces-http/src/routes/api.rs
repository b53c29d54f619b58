use axum::Router;

use backend_application::AppState;

use crate::handlers::{
    admin_handlers, auth_handlers, cashier_handlers, concierge_handlers, ops_handlers,
    student_handlers,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", axum::routing::post(auth_handlers::register))
        .route("/auth/login", axum::routing::post(auth_handlers::login))
        .route(
            "/student/profile",
            axum::routing::get(student_handlers::profile),
        )
        .route("/rewards", axum::routing::get(student_handlers::list_rewards))
        .route(
            "/student/claim-reward/:id",
            axum::routing::post(student_handlers::claim_reward),
        )
        .route(
            "/student/claim-code",
            axum::routing::post(student_handlers::claim_code),
        )
        .route(
            "/student/points-usage",
            axum::routing::post(student_handlers::points_usage),
        )
        .route(
            "/student/borrow-items",
            axum::routing::post(student_handlers::borrow_items),
        )
        .route(
            "/student/feedback",
            axum::routing::post(student_handlers::feedback),
        )
        .route(
            "/student/history/claims",
            axum::routing::get(student_handlers::claim_history),
        )
        .route(
            "/student/history/usage",
            axum::routing::get(student_handlers::usage_history),
        )
        .route(
            "/cashier/generate-code",
            axum::routing::post(cashier_handlers::generate_code),
        )
        .route(
            "/cashier/codes",
            axum::routing::get(cashier_handlers::list_codes),
        )
        .route(
            "/concierge/scan-borrow",
            axum::routing::post(concierge_handlers::scan_borrow),
        )
        .route(
            "/concierge/return-item",
            axum::routing::post(concierge_handlers::return_item),
        )
        .route(
            "/concierge/manual-return",
            axum::routing::post(concierge_handlers::manual_return),
        )
        .route(
            "/concierge/loans",
            axum::routing::get(concierge_handlers::list_loans),
        )
        .route("/admin/users", axum::routing::get(admin_handlers::list_users)
            .post(admin_handlers::create_user))
        .route(
            "/admin/rewards",
            axum::routing::post(admin_handlers::create_reward),
        )
        .route(
            "/admin/rewards/:id",
            axum::routing::put(admin_handlers::update_reward)
                .delete(admin_handlers::delete_reward),
        )
        .route(
            "/admin/stores",
            axum::routing::get(admin_handlers::get_stores).put(admin_handlers::update_stores),
        )
        .route(
            "/admin/dashboard",
            axum::routing::get(admin_handlers::dashboard),
        )
        .route(
            "/admin/export/points-usage",
            axum::routing::get(admin_handlers::export_usage),
        )
        .route(
            "/admin/export/loans",
            axum::routing::get(admin_handlers::export_loans),
        )
        .route("/ops/health/live", axum::routing::get(ops_handlers::health_live))
        .route(
            "/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
