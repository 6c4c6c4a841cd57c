//! HTTP client for the remote authorization API.

use dropgate_core::models::{AuthorizationOutcome, ProjectRef, ProjectSelector};
use dropgate_core::AppError;
use serde::{Deserialize, Serialize};

/// Permission the authorization API must confirm for an upload.
const UPLOAD_PERMISSION: &str = "dropbox.upload";

#[derive(Debug, Serialize)]
struct AuthorizeRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<&'a str>,
    #[serde(rename = "projectId", skip_serializing_if = "Option::is_none")]
    project_id: Option<&'a str>,
    permissions: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    result: Option<AuthorizedPayload>,
}

#[derive(Debug, Deserialize)]
struct AuthorizedPayload {
    authorized: bool,
    #[serde(default)]
    project: Option<ProjectPayload>,
}

#[derive(Debug, Deserialize)]
struct ProjectPayload {
    id: String,
    project: String,
    #[serde(rename = "billingAccount", default)]
    billing_account: Option<BillingAccountPayload>,
}

#[derive(Debug, Deserialize)]
struct BillingAccountPayload {
    active: bool,
}

/// Client for the `me.authorized` RPC.
///
/// One POST per call, no retries. Upstream denials (non-2xx status, `ok:
/// false`, `authorized: false`, inactive billing) come back as
/// `Ok(Denied)`; only transport and decode failures surface as `Err`.
#[derive(Clone)]
pub struct AuthApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AuthApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/me.authorized", base_url.trim_end_matches('/')),
        }
    }

    /// Ask the authorization API whether `credential` may upload into the
    /// selected project.
    pub async fn check(
        &self,
        credential: &str,
        selector: &ProjectSelector,
    ) -> Result<AuthorizationOutcome, AppError> {
        let body = AuthorizeRequest {
            project: selector.name.as_deref(),
            project_id: selector.id.as_deref(),
            permissions: [UPLOAD_PERMISSION],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("authorization", credential)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::AuthApi(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            tracing::debug!(
                status = %response.status(),
                "Authorization API returned non-success status"
            );
            return Ok(AuthorizationOutcome::Denied);
        }

        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| AppError::AuthApi(format!("invalid response body: {}", e)))?;

        if !envelope.ok {
            return Ok(AuthorizationOutcome::Denied);
        }
        let Some(result) = envelope.result else {
            return Ok(AuthorizationOutcome::Denied);
        };
        if !result.authorized {
            return Ok(AuthorizationOutcome::Denied);
        }
        let Some(project) = result.project else {
            return Ok(AuthorizationOutcome::Denied);
        };
        let billing_active = project
            .billing_account
            .as_ref()
            .map(|b| b.active)
            .unwrap_or(false);
        if !billing_active {
            return Ok(AuthorizationOutcome::Denied);
        }

        Ok(AuthorizationOutcome::Granted {
            project: ProjectRef {
                id: project.id,
                name: project.project,
            },
        })
    }
}
