//! DigitalOcean provider implementation

use crate::api::{CreateDropletRequest, DigitalOceanConfig, Droplet, DropletsApi};
use crate::error::{DigitalOceanError, Result};
use async_trait::async_trait;
use spinup_cloud::{CloudError, ComputeProvider, CreateRequest, Instance, InstanceState};

/// Tag attached to every droplet this tool creates, so they can be told
/// apart from manually managed ones in the control panel.
const MANAGED_TAG: &str = "spinup";

/// DigitalOcean provider
pub struct DigitalOceanProvider {
    api: DropletsApi,
}

impl DigitalOceanProvider {
    pub fn new(config: DigitalOceanConfig) -> Self {
        Self {
            api: DropletsApi::new(config),
        }
    }

    /// Build a provider from `DIGITALOCEAN_TOKEN`
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(DigitalOceanConfig::from_env()?))
    }

    /// Droplet ids are numeric; anything else is rejected before a remote
    /// call is issued.
    fn parse_droplet_id(id: &str) -> Result<u64> {
        id.trim()
            .parse::<u64>()
            .map_err(|_| DigitalOceanError::InvalidDropletId(id.to_string()))
    }

    async fn create_instance(&self, request: &CreateRequest) -> Result<Instance> {
        // The API wants the account key id, not its name.
        let key = self
            .api
            .find_ssh_key(&request.ssh_key)
            .await?
            .ok_or_else(|| DigitalOceanError::SshKeyNotFound(request.ssh_key.clone()))?;
        tracing::debug!(key_id = key.id, key_name = %key.name, "resolved SSH key");

        let body = CreateDropletRequest {
            name: request.name.clone(),
            region: request.region.clone(),
            size: request.size.clone(),
            image: request.image.clone(),
            ssh_keys: vec![key.id],
            tags: vec![MANAGED_TAG.to_string()],
        };

        let droplet = self.api.create_droplet(&body).await?;
        tracing::info!(id = droplet.id, name = %droplet.name, "droplet created");
        Ok(droplet_to_instance(droplet))
    }
}

fn droplet_to_instance(droplet: Droplet) -> Instance {
    Instance {
        id: droplet.id.to_string(),
        region: droplet
            .region
            .as_ref()
            .map(|r| r.slug.clone())
            .unwrap_or_default(),
        image: droplet
            .image
            .as_ref()
            .and_then(|i| i.slug.clone().or_else(|| i.name.clone()))
            .unwrap_or_default(),
        state: parse_status(&droplet.status),
        public_ip: droplet.public_ipv4().map(str::to_string),
        name: droplet.name,
    }
}

/// Map the vendor `status` string onto the shared state enum. "new" and
/// anything unrecognized read as pending; a later describe will settle it.
fn parse_status(status: &str) -> InstanceState {
    match status {
        "active" => InstanceState::Active,
        "off" => InstanceState::Stopped,
        "archive" => InstanceState::Terminated,
        _ => InstanceState::Pending,
    }
}

#[async_trait]
impl ComputeProvider for DigitalOceanProvider {
    fn name(&self) -> &str {
        "digitalocean"
    }

    async fn create(&self, request: &CreateRequest) -> spinup_cloud::Result<Instance> {
        request.validate()?;
        self.create_instance(request).await.map_err(CloudError::from)
    }

    async fn describe(&self, id: &str) -> spinup_cloud::Result<Instance> {
        let id = Self::parse_droplet_id(id).map_err(CloudError::from)?;
        let droplet = self.api.get_droplet(id).await.map_err(CloudError::from)?;
        Ok(droplet_to_instance(droplet))
    }

    async fn delete(&self, id: &str) -> spinup_cloud::Result<()> {
        let id = Self::parse_droplet_id(id).map_err(CloudError::from)?;
        self.api.delete_droplet(id).await.map_err(CloudError::from)?;
        tracing::info!(id, "droplet deleted");
        Ok(())
    }
}
