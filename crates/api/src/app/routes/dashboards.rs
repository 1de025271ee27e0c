//! Role-home dashboard endpoints.
//!
//! The interceptor has already enforced the role by the time these run;
//! handlers only render for whoever got through.

use axum::{Extension, Json, response::Response};
use serde_json::json;

use crate::context::CurrentSession;

pub async fn therapist_home(Extension(session): Extension<CurrentSession>) -> Response {
    dashboard("therapist", &session)
}

pub async fn client_home(Extension(session): Extension<CurrentSession>) -> Response {
    dashboard("client", &session)
}

pub async fn admin_home(Extension(session): Extension<CurrentSession>) -> Response {
    dashboard("admin", &session)
}

fn dashboard(area: &'static str, session: &CurrentSession) -> Response {
    use axum::response::IntoResponse;

    let user = session.user.as_ref();
    Json(json!({
        "area": area,
        "email": user.map(|u| u.profile.email.clone()),
        "role": user.map(|u| u.profile.role),
    }))
    .into_response()
}
