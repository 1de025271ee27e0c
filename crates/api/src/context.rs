use therabook_auth::AuthUser;
use therabook_core::SessionTokens;

/// Per-request session context inserted by the interceptor on `Allow`.
///
/// `user` is present only for an authenticated identity with a usable
/// profile; `tokens` carry whatever pair is current after any silent
/// rotation, so downstream handlers can talk to the gateway on the caller's
/// behalf.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub user: Option<AuthUser>,
    pub tokens: Option<SessionTokens>,
}
