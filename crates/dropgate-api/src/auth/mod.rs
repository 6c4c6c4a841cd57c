//! Authorization gate: cache-aside lookup in front of the remote
//! authorization API.

pub mod cache;
pub mod client;
pub mod gate;

pub use cache::AuthCache;
pub use client::AuthApiClient;
pub use gate::AuthorizationGate;
