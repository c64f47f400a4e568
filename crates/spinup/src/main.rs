mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "spinup")]
#[command(about = "Spin up and tear down cloud compute instances", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a compute instance and wait for its public IP
    Create {
        /// Cloud provider to create the instance on
        #[arg(value_enum)]
        provider: ProviderKind,
        /// Instance name
        #[arg(short, long, default_value = "spinup-vm")]
        name: String,
        /// Provider region (DigitalOcean default: nyc1; AWS: credential chain)
        #[arg(short, long)]
        region: Option<String>,
        /// Image: DigitalOcean image slug, or AMI id (required for AWS)
        #[arg(short, long)]
        image: Option<String>,
        /// Instance size: DigitalOcean size slug or EC2 instance type
        #[arg(short, long)]
        size: Option<String>,
        /// Name of an SSH key already registered with the provider
        #[arg(short = 'k', long = "ssh-key", env = "SPINUP_SSH_KEY")]
        ssh_key: String,
    },
    /// Delete an instance by id
    Rm {
        /// Cloud provider the instance lives on
        #[arg(value_enum)]
        provider: ProviderKind,
        /// Instance id (numeric droplet id, or EC2 instance id)
        id: String,
    },
    /// Print version information
    Version,
}

/// Supported cloud providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderKind {
    Digitalocean,
    Aws,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Every operation failure ends up here: structured message on stderr,
    // non-zero exit.
    if let Err(e) = run(cli).await {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Create {
            provider,
            name,
            region,
            image,
            size,
            ssh_key,
        } => commands::create::handle(provider, name, region, image, size, ssh_key).await,
        Commands::Rm { provider, id } => commands::rm::handle(provider, &id).await,
        Commands::Version => {
            println!("spinup {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
