use crate::ProviderKind;
use colored::Colorize;
use spinup_cloud::ComputeProvider;
use spinup_cloud_aws::AwsProvider;
use spinup_cloud_digitalocean::DigitalOceanProvider;

pub async fn handle(kind: ProviderKind, id: &str) -> anyhow::Result<()> {
    let provider: Box<dyn ComputeProvider> = match kind {
        ProviderKind::Digitalocean => Box::new(DigitalOceanProvider::from_env()?),
        ProviderKind::Aws => Box::new(AwsProvider::from_env(None).await),
    };

    println!(
        "Deleting {} instance {}...",
        provider.name().cyan(),
        id.bold()
    );
    provider.delete(id).await?;
    println!("  {} deleted", "✓".green());
    Ok(())
}
