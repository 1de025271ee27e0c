//! In-memory gateway fake shared by the monitor and refresher tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use therabook_core::{Role, SessionTokens};
use therabook_gateway::{AuthSession, GatewayError, IdentityGateway, SessionUser};

#[derive(Default)]
pub struct FakeGateway {
    sign_outs: AtomicUsize,
    refreshes: AtomicUsize,
    last_refresh_token: Mutex<Option<String>>,
    fail: bool,
}

impl FakeGateway {
    /// A fake whose sign-out and refresh operations always fail.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sign_outs(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    /// The refresh token presented on the most recent refresh call.
    pub fn last_refresh_token(&self) -> Option<String> {
        self.last_refresh_token.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityGateway for FakeGateway {
    async fn current_user(
        &self,
        _tokens: &SessionTokens,
    ) -> Result<Option<SessionUser>, GatewayError> {
        Ok(None)
    }

    async fn sign_in_with_password(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<AuthSession, GatewayError> {
        Err(GatewayError::Unauthenticated)
    }

    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        _full_name: &str,
        _role: Role,
    ) -> Result<AuthSession, GatewayError> {
        Err(GatewayError::Unauthenticated)
    }

    async fn sign_out(&self, _tokens: &SessionTokens) -> Result<(), GatewayError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GatewayError::rejected(503, "provider unavailable"));
        }
        Ok(())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionTokens, GatewayError> {
        let attempt = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_refresh_token.lock().unwrap() = Some(refresh_token.to_string());
        if self.fail {
            return Err(GatewayError::rejected(503, "provider unavailable"));
        }
        // Rotate deterministically so callers can assert on reuse.
        Ok(SessionTokens::new(
            format!("access-{attempt}"),
            format!("refresh-{attempt}"),
        ))
    }

    async fn reset_password_for_email(
        &self,
        _email: &str,
        _redirect_to: &str,
    ) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn update_password(
        &self,
        _tokens: &SessionTokens,
        _new_password: &str,
    ) -> Result<(), GatewayError> {
        Ok(())
    }
}
