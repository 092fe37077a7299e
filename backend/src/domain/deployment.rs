//! Cross-origin deployment relay.
//!
//! Stage 1 accepts a template type and a signed URL from one allow-listed
//! external origin and stages them as a [`DeploymentHandoff`]. Stage 2 reads
//! the handoff back while rendering the deploy dashboard and turns it into a
//! pre-filled [`DeployForm`]. The two stages are bridged by a signed cookie;
//! this module only owns the rules, not the transport.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Error, IdentityId};

/// Maximum age of a handoff before stage 2 ignores it.
pub const HANDOFF_TTL_SECS: i64 = 300;

/// Default external origin allowed to start a deployment.
pub const DEFAULT_DEPLOY_ORIGIN: &str = "https://algocraft.fun";

/// Exact-match origin allow-list with a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPolicy {
    allowed: String,
}

impl OriginPolicy {
    /// Allow exactly `allowed`; a trailing slash is ignored.
    pub fn new(allowed: impl Into<String>) -> Self {
        let allowed = allowed.into();
        let allowed = allowed.trim().trim_end_matches('/').to_owned();
        Self { allowed }
    }

    /// The configured origin, echoed in CORS headers.
    pub fn allowed(&self) -> &str {
        &self.allowed
    }

    /// Whether a request carrying `origin` may use the relay. A missing
    /// origin is refused.
    ///
    /// # Examples
    /// ```
    /// use showcase::domain::OriginPolicy;
    ///
    /// let policy = OriginPolicy::new("https://algocraft.fun");
    /// assert!(policy.permits(Some("https://algocraft.fun")));
    /// assert!(!policy.permits(Some("https://algocraft.fun.evil.test")));
    /// assert!(!policy.permits(None));
    /// ```
    pub fn permits(&self, origin: Option<&str>) -> bool {
        origin.is_some_and(|value| !self.allowed.is_empty() && value == self.allowed)
    }
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_DEPLOY_ORIGIN)
    }
}

/// Deployment parameters staged between the relay's two stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentHandoff {
    pub template_type: String,
    #[serde(rename = "signedURL")]
    pub signed_url: String,
    pub user_id: IdentityId,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
}

impl DeploymentHandoff {
    /// Validate the ingress payload and stamp it for `user_id` at `now`.
    pub fn stage(
        template_type: Option<String>,
        signed_url: Option<String>,
        user_id: IdentityId,
        now: DateTime<Utc>,
    ) -> Result<Self, Error> {
        let template_type = required(template_type, "templateType")?;
        let signed_url = required(signed_url, "signedURL")?;
        Ok(Self {
            template_type,
            signed_url,
            user_id,
            timestamp: now.timestamp_millis(),
        })
    }

    /// Whether the handoff is still within [`HANDOFF_TTL_SECS`] at `now`.
    ///
    /// Handoffs stamped in the future are treated as stale.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let Some(created) = DateTime::<Utc>::from_timestamp_millis(self.timestamp) else {
            return false;
        };
        let age = now.signed_duration_since(created);
        age >= Duration::zero() && age <= Duration::seconds(HANDOFF_TTL_SECS)
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, Error> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or_else(|| {
            Error::invalid_request("templateType and signedURL are required").with_details(
                serde_json::json!({ "field": field, "code": "missing_field" }),
            )
        })
}

/// Project-creation form state shown on the deploy dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployForm {
    pub template_type: Option<String>,
    pub link: Option<String>,
    pub staged: bool,
}

impl DeployForm {
    /// Pre-fill the form from a handoff, or return an empty form when the
    /// handoff is absent, stale, or belongs to someone else.
    pub fn prefill(
        handoff: Option<DeploymentHandoff>,
        viewer: &IdentityId,
        now: DateTime<Utc>,
    ) -> Self {
        match handoff {
            Some(handoff) if handoff.is_fresh(now) && &handoff.user_id == viewer => Self {
                template_type: Some(handoff.template_type),
                link: Some(handoff.signed_url),
                staged: true,
            },
            _ => Self::default(),
        }
    }
}
