use axum::{
    Router,
    routing::{get, post, put},
};

pub mod auth;
pub mod dashboards;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/auth/password", put(auth::update_password))
        .route("/api/auth/me", get(auth::me))
        .route("/therapist", get(dashboards::therapist_home))
        .route("/client", get(dashboards::client_home))
        .route("/admin", get(dashboards::admin_home))
}
