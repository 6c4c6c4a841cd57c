//! API-level constants.

/// Plain-text identification string served to non-POST requests on `/`.
/// Doubles as the liveness check body.
pub const SERVICE_BANNER: &str = "Dropgate File Drop Service";
