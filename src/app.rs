use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", post(handlers::login_form))
        .route("/logout", post(handlers::logout_form))
        .route("/entries", post(handlers::submit_form))
        .route("/entries/action", post(handlers::action_form))
        .route("/entries/cancel", post(handlers::cancel_form))
        .route("/entries/confirm-delete", post(handlers::confirm_delete_form))
        .route("/entries/dismiss-delete", post(handlers::dismiss_delete_form))
        .route("/api/session", get(handlers::api_session))
        .route("/api/login", post(handlers::api_login))
        .route("/api/logout", post(handlers::api_logout))
        .route("/api/entries", get(handlers::api_entries).post(handlers::api_submit))
        .route("/api/stats", get(handlers::api_stats))
        .route("/api/form", get(handlers::api_form))
        .route("/api/action", post(handlers::api_action))
        .route("/api/cancel", post(handlers::api_cancel))
        .route("/api/confirm-delete", post(handlers::api_confirm_delete))
        .route("/api/dismiss-delete", post(handlers::api_dismiss_delete))
        .with_state(state)
}
