use crate::ProviderKind;
use colored::Colorize;
use spinup_cloud::{ComputeProvider, CreateRequest, PollConfig, wait_for_network};
use spinup_cloud_aws::AwsProvider;
use spinup_cloud_digitalocean::DigitalOceanProvider;
use std::time::Duration;

/// Droplets and EC2 instances usually pick up an address within the first
/// half minute.
const READY_ATTEMPTS: u32 = 10;
const READY_INTERVAL: Duration = Duration::from_secs(3);

// Defaults for options the user left off
const DO_REGION: &str = "nyc1";
const DO_IMAGE: &str = "ubuntu-22-04-x64";
const DO_SIZE: &str = "s-1vcpu-1gb";
const EC2_INSTANCE_TYPE: &str = "t2.micro";

pub async fn handle(
    kind: ProviderKind,
    name: String,
    region: Option<String>,
    image: Option<String>,
    size: Option<String>,
    ssh_key: String,
) -> anyhow::Result<()> {
    let (provider, request): (Box<dyn ComputeProvider>, CreateRequest) = match kind {
        ProviderKind::Digitalocean => {
            let provider = DigitalOceanProvider::from_env()?;
            let request = CreateRequest {
                name,
                region: region.unwrap_or_else(|| DO_REGION.to_string()),
                image: image.unwrap_or_else(|| DO_IMAGE.to_string()),
                size: size.unwrap_or_else(|| DO_SIZE.to_string()),
                ssh_key,
            };
            (Box::new(provider), request)
        }
        ProviderKind::Aws => {
            let provider = AwsProvider::from_env(region).await;
            let region = provider.region().ok_or_else(|| {
                anyhow::anyhow!("No AWS region configured. Pass --region or set AWS_REGION")
            })?;
            let image = image
                .ok_or_else(|| anyhow::anyhow!("--image is required for AWS (an AMI id)"))?;
            let request = CreateRequest {
                name,
                region,
                image,
                size: size.unwrap_or_else(|| EC2_INSTANCE_TYPE.to_string()),
                ssh_key,
            };
            (Box::new(provider), request)
        }
    };

    println!(
        "Creating {} instance {}...",
        provider.name().cyan(),
        request.name.bold()
    );
    let instance = provider.create(&request).await?;
    println!("  {} created (id: {})", "✓".green(), instance.id.cyan());

    println!("Waiting for a public IPv4 address...");
    let config = PollConfig::fixed(READY_ATTEMPTS, READY_INTERVAL);
    let instance = wait_for_network(provider.as_ref(), &instance.id, &config).await?;
    println!("  {} instance is reachable", "✓".green());

    println!();
    println!("id: {}", instance.id);
    println!("ip: {}", instance.public_ip.unwrap_or_default());
    Ok(())
}
