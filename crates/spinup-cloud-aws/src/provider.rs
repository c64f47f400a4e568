//! AWS EC2 provider implementation

use crate::error::{AwsError, Result, from_sdk};
use async_trait::async_trait;
use aws_sdk_ec2::types::{Instance as Ec2Instance, InstanceStateName, InstanceType, Tag};
use spinup_cloud::{
    CloudError, ComputeProvider, CreateRequest, Instance, InstanceState, PollConfig,
    poll_until_ready,
};
use std::time::Duration;

/// Termination settles slowly and unevenly; poll with a jittered interval
/// and a generous budget.
const TERMINATION_ATTEMPTS: u32 = 50;
const TERMINATION_INTERVAL_MIN: Duration = Duration::from_secs(1);
const TERMINATION_INTERVAL_MAX: Duration = Duration::from_secs(3);

/// AWS EC2 provider
pub struct AwsProvider {
    client: aws_sdk_ec2::Client,
}

impl AwsProvider {
    pub fn new(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }

    /// Build a provider from the standard AWS credential/region chain,
    /// optionally overriding the region.
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Self::new(aws_sdk_ec2::Client::new(&config))
    }

    /// Region the client is scoped to, if the chain resolved one
    pub fn region(&self) -> Option<String> {
        self.client.config().region().map(|r| r.to_string())
    }

    fn validate_instance_id(id: &str) -> Result<&str> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AwsError::InvalidInstanceId(id.to_string()));
        }
        Ok(id)
    }

    async fn fetch_instance(&self, id: &str) -> Result<Ec2Instance> {
        let output = self
            .client
            .describe_instances()
            .instance_ids(id)
            .send()
            .await
            .map_err(from_sdk)?;

        output
            .reservations
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|r| r.instances.unwrap_or_default().into_iter().next())
            .ok_or_else(|| AwsError::InstanceNotFound(id.to_string()))
    }

    async fn launch(&self, request: &CreateRequest) -> Result<Instance> {
        let output = self
            .client
            .run_instances()
            .image_id(&request.image)
            .instance_type(InstanceType::from(request.size.as_str()))
            .key_name(&request.ssh_key)
            .min_count(1)
            .max_count(1)
            .send()
            .await
            .map_err(from_sdk)?;

        let instance = output
            .instances
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(AwsError::EmptyReservation)?;
        let id = instance
            .instance_id
            .clone()
            .ok_or(AwsError::EmptyReservation)?;

        // The Name tag is a separate CreateTags call in the EC2 API.
        self.client
            .create_tags()
            .resources(&id)
            .tags(Tag::builder().key("Name").value(&request.name).build())
            .send()
            .await
            .map_err(from_sdk)?;

        tracing::info!(%id, name = %request.name, "instance launched");

        Ok(Instance {
            id,
            name: request.name.clone(),
            region: request.region.clone(),
            image: request.image.clone(),
            state: map_state(instance.state.as_ref().and_then(|s| s.name.as_ref())),
            public_ip: instance.public_ip_address,
        })
    }
}

fn to_instance(instance: &Ec2Instance) -> Instance {
    let name = instance
        .tags
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find(|t| t.key.as_deref() == Some("Name"))
        .and_then(|t| t.value.clone())
        .unwrap_or_default();

    Instance {
        id: instance.instance_id.clone().unwrap_or_default(),
        name,
        region: instance
            .placement
            .as_ref()
            .and_then(|p| p.availability_zone.clone())
            .unwrap_or_default(),
        image: instance.image_id.clone().unwrap_or_default(),
        state: map_state(instance.state.as_ref().and_then(|s| s.name.as_ref())),
        public_ip: instance.public_ip_address.clone(),
    }
}

/// Fold the vendor state machine into the shared enum. Transitional states
/// (`pending`, `shutting-down`, `stopping`) read as pending so that the
/// termination predicate only fires on settled states.
fn map_state(name: Option<&InstanceStateName>) -> InstanceState {
    match name {
        Some(InstanceStateName::Running) => InstanceState::Active,
        Some(InstanceStateName::Stopped) => InstanceState::Stopped,
        Some(InstanceStateName::Terminated) => InstanceState::Terminated,
        _ => InstanceState::Pending,
    }
}

#[async_trait]
impl ComputeProvider for AwsProvider {
    fn name(&self) -> &str {
        "aws"
    }

    async fn create(&self, request: &CreateRequest) -> spinup_cloud::Result<Instance> {
        request.validate()?;
        self.launch(request).await.map_err(CloudError::from)
    }

    async fn describe(&self, id: &str) -> spinup_cloud::Result<Instance> {
        let id = Self::validate_instance_id(id).map_err(CloudError::from)?;
        let instance = self.fetch_instance(id).await.map_err(CloudError::from)?;
        Ok(to_instance(&instance))
    }

    async fn delete(&self, id: &str) -> spinup_cloud::Result<()> {
        let id = Self::validate_instance_id(id).map_err(CloudError::from)?;

        self.client
            .terminate_instances()
            .instance_ids(id)
            .send()
            .await
            .map_err(|e| CloudError::from(from_sdk(e)))?;
        tracing::info!(id, "termination requested");

        // TerminateInstances only acknowledges the request; the instance
        // shuts down asynchronously. Poll until it settles.
        let config = PollConfig::ranged(
            TERMINATION_ATTEMPTS,
            TERMINATION_INTERVAL_MIN,
            TERMINATION_INTERVAL_MAX,
        );
        poll_until_ready(
            &config,
            "instance termination",
            || self.describe(id),
            |instance| instance.state.is_down(),
        )
        .await?;

        Ok(())
    }
}
