//! Authorization decision logic for upload requests.

use crate::auth::cache::AuthCache;
use crate::auth::client::AuthApiClient;
use dropgate_core::models::{AuthorizationOutcome, ProjectRef, ProjectSelector};
use sha2::{Digest, Sha256};

/// Resolves whether a request may upload, caching grants for a short window.
///
/// The gate never errors: transport failures, malformed upstream responses,
/// and genuine denials all collapse into `Denied`, so a flaky authorization
/// API degrades to refusing uploads instead of failing requests outright.
/// One upstream call at most per cache miss, no retries.
#[derive(Clone)]
pub struct AuthorizationGate {
    client: AuthApiClient,
    cache: AuthCache,
    allow_anonymous: bool,
}

impl AuthorizationGate {
    pub fn new(client: AuthApiClient, cache: AuthCache, allow_anonymous: bool) -> Self {
        Self {
            client,
            cache,
            allow_anonymous,
        }
    }

    pub async fn authorize(
        &self,
        credential: Option<&str>,
        selector: &ProjectSelector,
    ) -> AuthorizationOutcome {
        let Some(credential) = credential else {
            // TODO: drop this bypass once every caller sends a credential
            if self.allow_anonymous {
                return AuthorizationOutcome::Granted {
                    project: ProjectRef {
                        id: "alpha".to_string(),
                        name: "alpha".to_string(),
                    },
                };
            }
            return AuthorizationOutcome::Denied;
        };

        // Nothing to authorize against; skip the remote call entirely.
        if selector.is_empty() {
            return AuthorizationOutcome::Denied;
        }

        let key = cache_key(selector, credential);
        if let Some(outcome) = self.cache.get(&key).await {
            return outcome;
        }

        match self.client.check(credential, selector).await {
            Ok(outcome @ AuthorizationOutcome::Granted { .. }) => {
                // Write-back happens off the response path; only grants are
                // cached, so a transient upstream failure never sticks.
                let cache = self.cache.clone();
                let value = outcome.clone();
                tokio::spawn(async move {
                    cache.put(key, value).await;
                });
                outcome
            }
            Ok(AuthorizationOutcome::Denied) => AuthorizationOutcome::Denied,
            Err(error) => {
                tracing::warn!(error = %error, "Authorization check degraded to denial");
                AuthorizationOutcome::Denied
            }
        }
    }
}

/// Cache key derived from the selector and credential.
///
/// Hashed so the raw bearer token never sits in the map as a key.
fn cache_key(selector: &ProjectSelector, credential: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(selector.name.as_deref().unwrap_or_default());
    hasher.update([0u8]);
    hasher.update(selector.id.as_deref().unwrap_or_default());
    hasher.update([0u8]);
    hasher.update(credential);
    hex::encode(hasher.finalize())
}
