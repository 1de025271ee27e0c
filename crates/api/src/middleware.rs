use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use therabook_auth::{RoutePolicy, auth_user, decide};
use therabook_core::{Identity, Profile, SessionTokens};
use therabook_gateway::{IdentityGateway, ProfileStore};

use crate::context::CurrentSession;

pub const ACCESS_COOKIE: &str = "tb-access-token";
pub const REFRESH_COOKIE: &str = "tb-refresh-token";

/// Dependencies for the request interceptor, injected at router build time.
#[derive(Clone)]
pub struct InterceptorState {
    pub identity: Arc<dyn IdentityGateway>,
    pub profiles: Arc<dyn ProfileStore>,
    pub policy: Arc<RoutePolicy>,
    /// Path prefixes the interceptor never sees (static assets, health).
    /// Configured once at startup, not per-request logic.
    pub bypass: Arc<[String]>,
}

/// Request interceptor: runs before any page/API logic.
///
/// Resolves identity first, then the profile that hangs off it, asks the
/// decision engine what to do, and acts on the answer. Fetch
/// failures are treated as "absent", never as allow: availability of the
/// identity backend is a precondition for anything role-gated.
pub async fn access_interceptor(
    State(state): State<InterceptorState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if state.bypass.iter().any(|prefix| path.starts_with(prefix.as_str())) {
        return next.run(req).await;
    }

    let tokens = session_from_headers(req.headers());
    let (identity, rotated) = resolve_identity(&state, tokens.as_ref()).await;
    // The provider may have rotated the pair while answering the read; any
    // follow-up call must use the fresh pair.
    let effective = rotated.as_ref().or(tokens.as_ref());
    let profile = resolve_profile(&state, identity.as_ref(), effective).await;

    let decision = decide(&state.policy, &path, identity.as_ref(), profile.as_ref());

    if decision.requires_sign_out() {
        // Kill the stale session before the redirect goes out so it cannot
        // be replayed.
        if let Some(tokens) = effective
            && let Err(error) = state.identity.sign_out(tokens).await
        {
            tracing::warn!(%error, "sign-out of deactivated account failed");
        }
    }

    match decision.destination(&state.policy) {
        None => {
            let session = CurrentSession {
                user: auth_user(identity, profile),
                tokens: rotated.clone().or(tokens),
            };
            req.extensions_mut().insert(session);
            let mut response = next.run(req).await;
            if let Some(rotated) = rotated {
                append_session_cookies(response.headers_mut(), &rotated);
            }
            response
        }
        Some(destination) => {
            tracing::debug!(%path, %destination, "request redirected");
            let mut response = Redirect::temporary(&destination).into_response();
            if decision.requires_sign_out() {
                append_cleared_cookies(response.headers_mut());
            }
            response
        }
    }
}

async fn resolve_identity(
    state: &InterceptorState,
    tokens: Option<&SessionTokens>,
) -> (Option<Identity>, Option<SessionTokens>) {
    let Some(tokens) = tokens else {
        return (None, None);
    };
    match state.identity.current_user(tokens).await {
        Ok(Some(session)) => (Some(session.identity), session.rotated),
        Ok(None) => (None, None),
        Err(error) => {
            tracing::warn!(%error, "identity fetch failed; treating request as unauthenticated");
            (None, None)
        }
    }
}

async fn resolve_profile(
    state: &InterceptorState,
    identity: Option<&Identity>,
    tokens: Option<&SessionTokens>,
) -> Option<Profile> {
    let (identity, tokens) = identity.zip(tokens)?;
    match state.profiles.profile_by_id(tokens, identity.id).await {
        Ok(profile) => profile,
        Err(error) => {
            tracing::warn!(%error, "profile fetch failed; treating profile as absent");
            None
        }
    }
}

/// Extract the session token pair from request cookies, if present.
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionTokens> {
    let access = cookie_value(headers, ACCESS_COOKIE)?;
    let refresh = cookie_value(headers, REFRESH_COOKIE).unwrap_or_default();
    Some(SessionTokens::new(access, refresh))
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            if parts.next() == Some(name) {
                return parts.next().map(str::to_string);
            }
        }
    }
    None
}

pub fn append_session_cookies(headers: &mut HeaderMap, tokens: &SessionTokens) {
    for (name, value) in [
        (ACCESS_COOKIE, &tokens.access_token),
        (REFRESH_COOKIE, &tokens.refresh_token),
    ] {
        if let Ok(cookie) =
            HeaderValue::from_str(&format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax"))
        {
            headers.append(header::SET_COOKIE, cookie);
        }
    }
}

pub fn append_cleared_cookies(headers: &mut HeaderMap) {
    for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
        if let Ok(cookie) = HeaderValue::from_str(&format!(
            "{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
        )) {
            headers.append(header::SET_COOKIE, cookie);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(raw).unwrap());
        headers
    }

    #[test]
    fn parses_both_session_cookies() {
        let headers = headers_with_cookie("tb-access-token=abc; tb-refresh-token=def; other=1");
        let tokens = session_from_headers(&headers).unwrap();
        assert_eq!(tokens.access_token, "abc");
        assert_eq!(tokens.refresh_token, "def");
    }

    #[test]
    fn missing_access_cookie_means_no_session() {
        let headers = headers_with_cookie("tb-refresh-token=def");
        assert!(session_from_headers(&headers).is_none());
        assert!(session_from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn cookie_values_may_contain_equals_signs() {
        let headers = headers_with_cookie("tb-access-token=a=b=c");
        let tokens = session_from_headers(&headers).unwrap();
        assert_eq!(tokens.access_token, "a=b=c");
    }

    #[test]
    fn cleared_cookies_expire_immediately() {
        let mut headers = HeaderMap::new();
        append_cleared_cookies(&mut headers);
        let cookies: Vec<_> = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    }
}
