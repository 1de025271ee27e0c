//! Auth flow endpoints: sign-in/out/up, password reset, current user.
//!
//! These sit outside the protected prefixes, so the interceptor lets them
//! through; each one talks to the identity gateway itself and manages the
//! session cookies on the way out.

use std::borrow::Cow;
use std::sync::Arc;

use axum::{
    Extension, Json,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use therabook_core::{NewProfile, Role};

use crate::app::Services;
use crate::app::errors::{gateway_error_to_response, json_error};
use crate::context::CurrentSession;
use crate::middleware::{append_cleared_cookies, append_session_cookies, session_from_headers};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Original path captured from `/login?redirect=...`, possibly still
    /// URL-encoded.
    pub redirect: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub redirect_to: String,
}

pub async fn login(
    Extension(services): Extension<Arc<Services>>,
    Json(body): Json<LoginRequest>,
) -> Response {
    let session = match services
        .identity
        .sign_in_with_password(&body.email, &body.password)
        .await
    {
        Ok(session) => session,
        Err(error) => return gateway_error_to_response(error),
    };

    // Same invariant the interceptor enforces: no usable profile, no session.
    let profile = match services
        .profiles
        .profile_by_id(&session.tokens, session.identity.id)
        .await
    {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return json_error(
                StatusCode::FORBIDDEN,
                "profile_missing",
                "no profile exists for this account",
            );
        }
        Err(error) => return gateway_error_to_response(error),
    };

    if !profile.is_usable() {
        if let Err(error) = services.identity.sign_out(&session.tokens).await {
            tracing::warn!(%error, "sign-out of deactivated account failed");
        }
        return json_error(
            StatusCode::FORBIDDEN,
            "account_deactivated",
            "this account has been deactivated",
        );
    }

    let redirect_to = body
        .redirect
        .as_deref()
        .and_then(|raw| urlencoding::decode(raw).ok().map(Cow::into_owned))
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .unwrap_or_else(|| services.policy.role_home(profile.role).to_string());

    let mut response = (StatusCode::OK, Json(LoginResponse { redirect_to })).into_response();
    append_session_cookies(response.headers_mut(), &session.tokens);
    response
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

pub async fn signup(
    Extension(services): Extension<Arc<Services>>,
    Json(body): Json<SignupRequest>,
) -> Response {
    // Admin accounts are provisioned administratively, never self-served.
    if body.role == Role::Admin {
        return json_error(
            StatusCode::BAD_REQUEST,
            "invalid_role",
            "accounts can register as therapist or client only",
        );
    }

    let session = match services
        .identity
        .sign_up(&body.email, &body.password, &body.full_name, body.role)
        .await
    {
        Ok(session) => session,
        Err(error) => return gateway_error_to_response(error),
    };

    let record = NewProfile {
        id: session.identity.id,
        role: body.role,
        email: body.email.clone(),
        full_name: body.full_name.clone(),
    };
    if let Err(error) = services.profiles.insert_profile(&session.tokens, &record).await {
        // Without the 1:1 record the account cannot pass any access check.
        return gateway_error_to_response(error);
    }

    let redirect_to = services.policy.role_home(body.role).to_string();
    let mut response = (StatusCode::CREATED, Json(LoginResponse { redirect_to })).into_response();
    append_session_cookies(response.headers_mut(), &session.tokens);
    response
}

pub async fn logout(
    Extension(services): Extension<Arc<Services>>,
    headers: HeaderMap,
) -> Response {
    if let Some(tokens) = session_from_headers(&headers)
        && let Err(error) = services.identity.sign_out(&tokens).await
    {
        tracing::warn!(%error, "sign-out failed; clearing cookies anyway");
    }
    let mut response = StatusCode::NO_CONTENT.into_response();
    append_cleared_cookies(response.headers_mut());
    response
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

pub async fn reset_password(
    Extension(services): Extension<Arc<Services>>,
    Json(body): Json<ResetPasswordRequest>,
) -> Response {
    let redirect_to = format!("{}/reset-password", services.site_url);
    match services
        .identity
        .reset_password_for_email(&body.email, &redirect_to)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => gateway_error_to_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

pub async fn update_password(
    Extension(services): Extension<Arc<Services>>,
    Extension(session): Extension<CurrentSession>,
    Json(body): Json<UpdatePasswordRequest>,
) -> Response {
    let (Some(_), Some(tokens)) = (&session.user, &session.tokens) else {
        return json_error(StatusCode::UNAUTHORIZED, "unauthorized", "authentication required");
    };
    match services.identity.update_password(tokens, &body.password).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => gateway_error_to_response(error),
    }
}

pub async fn me(Extension(session): Extension<CurrentSession>) -> Response {
    match session.user {
        Some(user) => Json(user.profile).into_response(),
        None => json_error(StatusCode::UNAUTHORIZED, "unauthorized", "authentication required"),
    }
}
