//! Fixed values shared across crates.

/// TTL applied when a request carries no usable `ttl` parameter.
pub const DEFAULT_TTL_DAYS: u32 = 1;

/// Largest TTL a caller may request; anything above falls back to the default.
pub const MAX_TTL_DAYS: u32 = 7;

/// Default lifetime of a cached authorization grant.
pub const DEFAULT_AUTH_CACHE_TTL_SECS: u64 = 30;

/// Cache-control metadata applied to every stored object.
pub const OBJECT_CACHE_CONTROL: &str = "public, max-age=86400";
