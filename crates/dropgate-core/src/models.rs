//! Domain models shared between the gateway, storage, and persistence crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project a grant was resolved against (billing/ownership context).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

/// Outcome of an authorization check.
///
/// `Granted` is only constructed when the authorization API confirmed both the
/// upload permission and an active billing account for the project. Every
/// failure mode (denial, transport error, malformed response) collapses into
/// `Denied` so callers cannot distinguish upstream trouble from a refusal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    Denied,
    Granted { project: ProjectRef },
}

impl AuthorizationOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthorizationOutcome::Granted { .. })
    }

    /// Project attached to a grant, if any.
    pub fn project(&self) -> Option<&ProjectRef> {
        match self {
            AuthorizationOutcome::Granted { project } => Some(project),
            AuthorizationOutcome::Denied => None,
        }
    }
}

/// Caller-supplied project identification: name, id, or both.
///
/// At least one member must be present for an authorization attempt to be
/// worth making.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSelector {
    pub name: Option<String>,
    pub id: Option<String>,
}

impl ProjectSelector {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.id.is_none()
    }
}

/// Metadata record written once per successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UploadRecord {
    pub object_key: String,
    pub project_id: String,
    pub size_bytes: i64,
    pub filename: Option<String>,
    pub ttl_days: i32,
    pub created_at: DateTime<Utc>,
}

/// Fire-and-forget accounting point emitted after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDataPoint {
    pub project_id: String,
    pub colo: Option<String>,
    pub country: Option<String>,
    pub ttl_days: i32,
    pub size_bytes: i64,
}
