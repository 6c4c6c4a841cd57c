//! Object key generation.
//!
//! Key format: `{ttl_days}{token}`. The token carries 64 bytes of entropy, so
//! collisions are treated as negligible and no existence check is made
//! against the backend.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

const KEY_ENTROPY_BYTES: usize = 64;

/// Generate a storage key for an object with the given TTL.
///
/// The token is drawn from the OS CSPRNG and encoded with the URL-safe base64
/// alphabet, padding stripped, so the key can be used verbatim in a download
/// URL. The TTL-in-days prefix is what bucket lifecycle rules match on.
pub fn generate_object_key(ttl_days: u32) -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let token: Vec<u8> = (0..KEY_ENTROPY_BYTES).map(|_| rng.random()).collect();
    format!("{}{}", ttl_days, URL_SAFE_NO_PAD.encode(token))
}
