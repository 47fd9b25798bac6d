//! Authentication for X API access.
//!
//! Loads credentials, signs requests and resolves the acting account.

mod credentials;
mod oauth;

pub use credentials::{
    BearerToken, Credentials, ENV_ACCESS_SECRET, ENV_ACCESS_TOKEN, ENV_API_KEY, ENV_API_SECRET,
    ENV_BEARER_TOKEN,
};
pub use oauth::OAuth1Keys;

use crate::error::AuthError;
use crate::platform::Platform;
use crate::twitter::Identity;

/// Resolve the account behind the platform's credentials.
///
/// Calls the "who am I" endpoint exactly once. Any failure is fatal for the
/// run: nothing may be fetched or deleted without a resolved identity.
pub async fn authenticate(platform: &dyn Platform) -> Result<Identity, AuthError> {
    tracing::info!("Resolving authenticated account");

    match platform.who_am_i().await {
        Ok(identity) => {
            tracing::info!(
                user_id = %identity.user_id,
                handle = %identity.at_handle(),
                "Authenticated"
            );
            Ok(identity)
        }
        Err(e) => {
            tracing::error!(phase = "auth", error = %e, "Authentication failed");
            Err(AuthError(e))
        }
    }
}
