use async_trait::async_trait;

use therabook_core::{NewProfile, Profile, SessionTokens, UserId};

use crate::error::GatewayError;

/// Profile datastore, one record per identity id.
///
/// The store enforces row-level authorization on its side, so every call
/// carries the caller's session tokens. Lookups are exact-match: only the
/// record whose id equals the argument is ever returned.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for an identity id. `Ok(None)` when no row exists
    /// or when row-level rules hide it; callers cannot tell the two apart.
    async fn profile_by_id(
        &self,
        tokens: &SessionTokens,
        id: UserId,
    ) -> Result<Option<Profile>, GatewayError>;

    /// Create the 1:1 companion record at sign-up time.
    async fn insert_profile(
        &self,
        tokens: &SessionTokens,
        profile: &NewProfile,
    ) -> Result<(), GatewayError>;
}
