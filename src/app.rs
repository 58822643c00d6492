use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/navigate/:page", post(handlers::navigate))
        .route("/donate", post(handlers::donate))
        .route("/donate/amount/:preset", post(handlers::donate_preset))
        .route("/contact", post(handlers::contact))
        .route("/api/health", get(handlers::health))
        .route("/api/state", get(handlers::get_state))
        .route("/api/drafts/donation", post(handlers::edit_donation))
        .route("/api/drafts/contact", post(handlers::edit_contact))
        .route("/api/submit/donation", post(handlers::submit_donation))
        .route("/api/submit/contact", post(handlers::submit_contact))
        .route("/api/stats/refresh", post(handlers::refresh_stats))
        .with_state(state)
}
