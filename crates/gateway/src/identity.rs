use async_trait::async_trait;

use therabook_core::{Identity, Role, SessionTokens};

use crate::error::GatewayError;

/// Result of a current-user lookup.
///
/// The provider may silently rotate the token pair while answering a read;
/// when it does, `rotated` carries the new pair and the caller must forward
/// it to the response (or store it) before the old pair stops working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub identity: Identity,
    pub rotated: Option<SessionTokens>,
}

/// A freshly issued session: who signed in, and the tokens to carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub identity: Identity,
    pub tokens: SessionTokens,
}

/// Credential/session operations of the hosted identity provider.
///
/// All operations are fallible and asynchronous; failures carry a
/// human-readable message. Implementations must be safe to share across
/// concurrent requests (no per-request mutable state).
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Resolve the identity behind a token pair.
    ///
    /// `Ok(None)` means the session is invalid or expired beyond refresh.
    /// That is not an error, just an unauthenticated request.
    async fn current_user(&self, tokens: &SessionTokens)
    -> Result<Option<SessionUser>, GatewayError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, GatewayError>;

    /// Register a new credential. The companion profile record is created
    /// separately through [`crate::ProfileStore::insert_profile`].
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<AuthSession, GatewayError>;

    /// Revoke the session server-side. Idempotent from the caller's view.
    async fn sign_out(&self, tokens: &SessionTokens) -> Result<(), GatewayError>;

    /// Exchange a refresh token for a new pair.
    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionTokens, GatewayError>;

    /// Trigger the provider's password-reset email flow.
    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), GatewayError>;

    /// Set a new password for the authenticated session.
    async fn update_password(
        &self,
        tokens: &SessionTokens,
        new_password: &str,
    ) -> Result<(), GatewayError>;
}
