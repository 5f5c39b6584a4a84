use api_shared::HealthService;
use clap::{Parser, Subcommand};
use orchard_core::{ContentReadService, CoreConfig, MySqlContentStore};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "orchard")]
#[command(about = "Orchard Lite content listing CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the 20 most recent items and the total record count
    Recent,
    /// Print every item, newest first
    All,
    /// Print the health payload (does not contact the database)
    Health,
    /// Print the resolved connection target, password redacted
    Config,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigView<'a> {
    connection: String,
    phase: &'a str,
    runtime: &'a str,
    deployment_type: &'a str,
    database_type: &'a str,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let cfg = CoreConfig::from_env()?;

    match cli.command {
        Some(Commands::Recent) => {
            let service = ContentReadService::new(MySqlContentStore::new(cfg.db()));
            match service.recent_content().await {
                Ok(listing) => print_json(&listing)?,
                Err(e) => anyhow::bail!(
                    "Error loading recent content from {}: {}",
                    cfg.db().host(),
                    e
                ),
            }
        }
        Some(Commands::All) => {
            let service = ContentReadService::new(MySqlContentStore::new(cfg.db()));
            match service.all_content().await {
                Ok(listing) => print_json(&listing)?,
                Err(e) => anyhow::bail!("Error loading content: {}", e),
            }
        }
        Some(Commands::Health) => print_json(&HealthService::check_health(&cfg))?,
        Some(Commands::Config) => {
            let labels = cfg.labels();
            print_json(&ConfigView {
                connection: cfg.db().descriptor(),
                phase: &labels.phase,
                runtime: &labels.runtime,
                deployment_type: &labels.deployment_type,
                database_type: &labels.database_type,
            })?;
        }
        None => {
            println!("Use 'orchard --help' for commands");
        }
    }

    Ok(())
}
