//! Compute instance descriptor types

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};

/// A point-in-time snapshot of a compute instance, as reported by its
/// provider. Not subscribed to updates; call
/// [`ComputeProvider::describe`](crate::ComputeProvider::describe) again for
/// a fresh read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// Provider-assigned identifier. Assigned exactly once at creation and
    /// used for every subsequent describe/delete call.
    pub id: String,

    /// Human-readable name/tag
    pub name: String,

    /// Region the instance lives in
    pub region: String,

    /// Image the instance was created from
    pub image: String,

    /// Lifecycle state
    pub state: InstanceState,

    /// Public IPv4 address, once the provider has assigned one
    pub public_ip: Option<String>,
}

impl Instance {
    /// Whether the provider has assigned a public IPv4 address yet.
    /// This is the readiness predicate for instance creation.
    pub fn has_public_ip(&self) -> bool {
        self.public_ip.as_deref().is_some_and(|ip| !ip.is_empty())
    }
}

/// Instance lifecycle state
///
/// Vendor state strings are folded into these four; transitional states the
/// vendor reports (e.g. EC2 `shutting-down`) map to `Pending` until they
/// settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    Pending,
    Active,
    Stopped,
    Terminated,
}

impl InstanceState {
    /// Whether the instance has reached a terminal powered-down state.
    /// This is the readiness predicate for termination.
    pub fn is_down(&self) -> bool {
        matches!(self, InstanceState::Stopped | InstanceState::Terminated)
    }
}

impl std::fmt::Display for InstanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceState::Pending => write!(f, "pending"),
            InstanceState::Active => write!(f, "active"),
            InstanceState::Stopped => write!(f, "stopped"),
            InstanceState::Terminated => write!(f, "terminated"),
        }
    }
}

/// Parameters for creating a single instance
#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// Name/tag attached to the instance
    pub name: String,

    /// Provider region
    pub region: String,

    /// Image slug (DigitalOcean) or AMI id (AWS)
    pub image: String,

    /// Size slug (DigitalOcean) or instance type (AWS)
    pub size: String,

    /// Name of an SSH key already registered with the provider
    pub ssh_key: String,
}

impl CreateRequest {
    /// Reject empty parameters before any remote call is issued.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("name", &self.name),
            ("region", &self.region),
            ("image", &self.image),
            ("size", &self.size),
            ("ssh key", &self.ssh_key),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(CloudError::Validation(format!(
                    "{field} must not be empty"
                )));
            }
        }
        Ok(())
    }
}
