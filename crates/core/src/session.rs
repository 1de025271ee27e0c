use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access/refresh token pair for one provider session.
///
/// The provider owns these values; everything in this workspace only carries
/// them between the request, the gateway and the response. The provider may
/// silently rotate the pair on read, in which case the rotated pair must be
/// propagated to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionTokens {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at: None,
        }
    }
}
