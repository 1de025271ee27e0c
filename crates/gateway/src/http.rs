//! HTTP implementation of the gateway traits.
//!
//! Speaks the hosted platform's REST surface: the auth endpoints under
//! `/auth/v1` (password and refresh grants, signup, logout, recover,
//! update-user) and the row-level-secured table API under `/rest/v1`.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use therabook_core::{Identity, NewProfile, Profile, Role, SessionTokens, UserId};

use crate::error::GatewayError;
use crate::identity::{AuthSession, IdentityGateway, SessionUser};
use crate::profiles::ProfileStore;

/// Connection settings for the hosted platform.
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Base URL of the platform, e.g. `https://xyz.example-baas.co`.
    pub base_url: String,
    /// Public (anon) API key sent with every request.
    pub api_key: String,
}

impl HttpGatewayConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

// ── wire types ──

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: Uuid,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    user: UserPayload,
}

#[derive(Debug, Deserialize, Default)]
struct ErrorPayload {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
}

impl ErrorPayload {
    fn into_message(self) -> String {
        self.msg
            .or(self.error_description)
            .or(self.message)
            .unwrap_or_else(|| "no error detail".to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: Uuid,
    role: Role,
    email: String,
    full_name: String,
    is_active: bool,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: UserId::from_uuid(row.id),
            role: row.role,
            email: row.email,
            full_name: row.full_name,
            is_active: row.is_active,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
        }
    }
}

fn identity_from(user: UserPayload, expires_at: Option<DateTime<Utc>>) -> Identity {
    Identity {
        id: UserId::from_uuid(user.id),
        email: user.email.unwrap_or_default(),
        expires_at,
    }
}

fn tokens_from(payload: &SessionPayload) -> SessionTokens {
    SessionTokens {
        access_token: payload.access_token.clone(),
        refresh_token: payload.refresh_token.clone(),
        expires_at: payload.expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
    }
}

async fn rejection(response: reqwest::Response) -> GatewayError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorPayload>()
        .await
        .unwrap_or_default()
        .into_message();
    GatewayError::rejected(status, message)
}

// ── identity gateway ──

/// Identity provider client over its REST auth endpoints.
#[derive(Debug, Clone)]
pub struct HttpIdentityGateway {
    client: reqwest::Client,
    config: HttpGatewayConfig,
}

impl HttpIdentityGateway {
    pub fn new(config: HttpGatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    async fn grant(&self, grant_type: &str, body: serde_json::Value) -> Result<SessionPayload, GatewayError> {
        let response = self
            .client
            .post(self.url("/auth/v1/token"))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        response
            .json::<SessionPayload>()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))
    }

    /// `Ok(None)` when the provider answers 401/403 for the access token.
    async fn fetch_user(&self, access_token: &str) -> Result<Option<UserPayload>, GatewayError> {
        let response = self
            .client
            .get(self.url("/auth/v1/user"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status().as_u16() {
            200 => response
                .json::<UserPayload>()
                .await
                .map(Some)
                .map_err(|e| GatewayError::Malformed(e.to_string())),
            401 | 403 => Ok(None),
            _ => Err(rejection(response).await),
        }
    }
}

#[async_trait]
impl IdentityGateway for HttpIdentityGateway {
    async fn current_user(
        &self,
        tokens: &SessionTokens,
    ) -> Result<Option<SessionUser>, GatewayError> {
        if let Some(user) = self.fetch_user(&tokens.access_token).await? {
            return Ok(Some(SessionUser {
                identity: identity_from(user, tokens.expires_at),
                rotated: None,
            }));
        }

        // Stale access token: attempt a silent rotation with the refresh
        // token, treating a refused refresh as plain "unauthenticated".
        let rotated = match self.refresh_session(&tokens.refresh_token).await {
            Ok(rotated) => rotated,
            Err(GatewayError::Rejected { .. } | GatewayError::Unauthenticated) => return Ok(None),
            Err(other) => return Err(other),
        };

        match self.fetch_user(&rotated.access_token).await? {
            Some(user) => Ok(Some(SessionUser {
                identity: identity_from(user, rotated.expires_at),
                rotated: Some(rotated),
            })),
            None => Ok(None),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, GatewayError> {
        let payload = self
            .grant("password", json!({ "email": email, "password": password }))
            .await?;
        let tokens = tokens_from(&payload);
        Ok(AuthSession {
            identity: identity_from(payload.user, tokens.expires_at),
            tokens,
        })
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<AuthSession, GatewayError> {
        let response = self
            .client
            .post(self.url("/auth/v1/signup"))
            .header("apikey", &self.config.api_key)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name, "role": role },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        let payload = response
            .json::<SessionPayload>()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        let tokens = tokens_from(&payload);
        Ok(AuthSession {
            identity: identity_from(payload.user, tokens.expires_at),
            tokens,
        })
    }

    async fn sign_out(&self, tokens: &SessionTokens) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url("/auth/v1/logout"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&tokens.access_token)
            .send()
            .await?;

        // An already-dead session is fine: sign-out is idempotent.
        match response.status().as_u16() {
            200 | 204 | 401 | 403 => Ok(()),
            _ => Err(rejection(response).await),
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionTokens, GatewayError> {
        let payload = self
            .grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await?;
        Ok(tokens_from(&payload))
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url("/auth/v1/recover"))
            .query(&[("redirect_to", redirect_to)])
            .header("apikey", &self.config.api_key)
            .json(&json!({ "email": email }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(())
    }

    async fn update_password(
        &self,
        tokens: &SessionTokens,
        new_password: &str,
    ) -> Result<(), GatewayError> {
        let response = self
            .client
            .put(self.url("/auth/v1/user"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&tokens.access_token)
            .json(&json!({ "password": new_password }))
            .send()
            .await?;

        match response.status().as_u16() {
            200 => Ok(()),
            401 | 403 => Err(GatewayError::Unauthenticated),
            _ => Err(rejection(response).await),
        }
    }
}

// ── profile store ──

const PROFILE_COLUMNS: &str = "id,role,email,full_name,is_active,deleted_at,created_at";

/// Profile table client over the row-level-secured table API.
#[derive(Debug, Clone)]
pub struct HttpProfileStore {
    client: reqwest::Client,
    config: HttpGatewayConfig,
}

impl HttpProfileStore {
    pub fn new(config: HttpGatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self) -> String {
        format!("{}/rest/v1/profiles", self.config.base_url)
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn profile_by_id(
        &self,
        tokens: &SessionTokens,
        id: UserId,
    ) -> Result<Option<Profile>, GatewayError> {
        let response = self
            .client
            .get(self.url())
            .query(&[
                ("id", format!("eq.{id}")),
                ("select", PROFILE_COLUMNS.to_string()),
                ("limit", "1".to_string()),
            ])
            .header("apikey", &self.config.api_key)
            .bearer_auth(&tokens.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        let mut rows = response
            .json::<Vec<ProfileRow>>()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        Ok(rows.pop().map(Profile::from))
    }

    async fn insert_profile(
        &self,
        tokens: &SessionTokens,
        profile: &NewProfile,
    ) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url())
            .header("apikey", &self.config.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&tokens.access_token)
            .json(profile)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(())
    }
}
