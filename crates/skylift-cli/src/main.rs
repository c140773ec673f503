use clap::{Parser, Subcommand};
use colored::Colorize;
use skylift::{CloudConfig, InstanceOrchestrator};
use skylift_cloud_azure::AzureCloud;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skylift")]
#[command(about = "Provision and tear down VM instances", long_about = None)]
struct Cli {
    /// Path to the cloud configuration file
    #[arg(short, long, env = "SKYLIFT_CONFIG", default_value = "skylift.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ensure the resource group, storage account and virtual network exist
    Setup,
    /// Create one instance and print its addresses
    Create {
        /// Logical instance name
        name: String,
        /// Path to the SSH public key to install
        #[arg(short, long)]
        key: PathBuf,
        /// Tag applied to the VM (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
        /// Skip provisioning a public IP
        #[arg(long)]
        no_public_ip: bool,
    },
    /// Delete one instance's VM, network interface and public IP
    Delete {
        /// Logical instance name
        name: String,
    },
    /// Print an instance's private and public addresses
    Addr {
        /// Logical instance name
        name: String,
        /// The instance was created without a public IP
        #[arg(long)]
        no_public_ip: bool,
    },
    /// Delete all resources in the group whose name contains MATCH
    Reap {
        /// Substring filter; everything in the group when omitted
        #[arg(short, long)]
        r#match: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = CloudConfig::load(&cli.config)?;
    let clients = AzureCloud::new(config.subscription_id.as_str()).into_clients();
    let orchestrator = InstanceOrchestrator::new(config, clients);

    match cli.command {
        Commands::Setup => {
            orchestrator.ensure_environment().await?;
            println!("{}", "✓ Environment ready".green());
        }
        Commands::Create {
            name,
            key,
            tag,
            no_public_ip,
        } => {
            orchestrator
                .create_instance_from_key_path(&name, &key, &tag, !no_public_ip)
                .await?;
            println!("{} {}", "✓ Created".green(), name.cyan());
            println!(
                "  private: {}",
                orchestrator.get_private_address(&name).await?
            );
            let public = orchestrator.get_public_address(&name).await?;
            if !public.is_empty() {
                println!("  public:  {public}");
            }
        }
        Commands::Delete { name } => {
            // The registry lives with the orchestrator, so a fresh process
            // adopts the instance by name before tearing it down.
            orchestrator.adopt_instance(&name, true).await?;
            orchestrator.delete_instance(&name).await?;
            println!("{} {}", "✓ Deleted".green(), name.cyan());
        }
        Commands::Addr { name, no_public_ip } => {
            orchestrator.adopt_instance(&name, !no_public_ip).await?;
            println!("private: {}", orchestrator.get_private_address(&name).await?);
            let public = orchestrator.get_public_address(&name).await?;
            if !public.is_empty() {
                println!("public:  {public}");
            }
        }
        Commands::Reap { r#match } => {
            orchestrator.delete_all(r#match.as_deref()).await?;
            println!("{}", "✓ Reap complete".green());
        }
    }

    Ok(())
}
