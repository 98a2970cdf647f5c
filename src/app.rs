use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/auth/login", post(handlers::login))
        .route("/auth/register", post(handlers::register))
        .route("/auth/logout", post(handlers::logout))
        .route("/prayers/:id", post(handlers::set_completed))
        .route("/view/daily", post(handlers::view_daily))
        .route("/view/monthly", post(handlers::view_monthly))
        .route("/view/weekly", post(handlers::view_weekly))
        .route("/view/settings", post(handlers::view_settings))
        .route("/monthly/prev", post(handlers::previous_month))
        .route("/monthly/next", post(handlers::next_month))
        .route("/monthly/select", post(handlers::select_month))
        .route("/monthly/day", post(handlers::select_day))
        .route("/weekly/prev", post(handlers::previous_week))
        .route("/weekly/next", post(handlers::next_week))
        .route("/telegram/link", post(handlers::link_telegram))
        .route("/telegram/test", post(handlers::test_telegram))
        .route("/language", post(handlers::set_language))
        .with_state(state)
}
