//! Cumulus CLI - drive a local emulated control plane
//!
//! Provides commands for:
//! - Replaying a scripted operation sequence against a fresh service
//! - Listing the instance type catalog
//!
//! Binary: cumulus

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cumulus_control::{BatchService, ErrorReply};
use cumulus_core::{
    AccountScope, ClusterRegistry, InstanceFleet, RoleStore, DEFAULT_ACCOUNT_ID, DEFAULT_REGION,
};
use cumulus_sim::{SimClusterRegistry, SimInstanceFleet, SimRoleStore, StaticCatalog};

/// Cumulus CLI - batch control-plane emulator
#[derive(Parser)]
#[command(name = "cumulus")]
#[command(about = "Run batch control-plane scenarios against an in-memory emulation", long_about = None)]
struct Cli {
    /// Simulated region
    #[arg(long, env = "CUMULUS_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// Simulated account id
    #[arg(long, env = "CUMULUS_ACCOUNT", default_value = DEFAULT_ACCOUNT_ID)]
    account: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON scenario file against a fresh service
    Replay {
        /// Scenario file: a JSON array of {"action", "body"} steps
        script: PathBuf,

        /// Role names to pre-create in the role store
        #[arg(long = "role", default_value = "TestRole")]
        roles: Vec<String>,
    },

    /// List the instance type catalog
    Catalog,
}

#[derive(Debug, Deserialize)]
struct ScenarioStep {
    action: String,
    #[serde(default)]
    body: serde_json::Value,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cumulus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let scope = AccountScope::new(cli.account, cli.region);

    match cli.command {
        Commands::Replay { script, roles } => replay(scope, &script, &roles).await,
        Commands::Catalog => {
            for (name, vcpus) in StaticCatalog::with_defaults().entries() {
                println!("{name:<14} {vcpus:>3} vCPUs");
            }
            Ok(())
        }
    }
}

async fn replay(scope: AccountScope, script: &Path, roles: &[String]) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(script)?;
    let steps: Vec<ScenarioStep> = serde_json::from_str(&text)?;

    let catalog = Arc::new(StaticCatalog::with_defaults());
    let fleet = Arc::new(SimInstanceFleet::new(catalog.clone()));
    let clusters = Arc::new(SimClusterRegistry::new(scope.clone()));
    let role_store = Arc::new(SimRoleStore::new(scope.clone()));

    for role in roles {
        let arn = role_store.create_role(role).await?;
        info!("Created role {}", arn);
    }

    let service = BatchService::new(
        scope,
        fleet.clone(),
        clusters.clone(),
        role_store,
        catalog,
    );

    for (index, step) in steps.into_iter().enumerate() {
        match service.dispatch(&step.action, step.body).await {
            Ok(response) => {
                println!(
                    "[{index}] {} =>\n{}",
                    step.action,
                    serde_json::to_string_pretty(&response)?
                );
            }
            Err(err) => {
                let formatted = ErrorReply::from(&err);
                println!(
                    "[{index}] {} => error\n{}",
                    step.action,
                    serde_json::to_string_pretty(&formatted)?
                );
            }
        }
    }

    let instances = fleet.describe_instances().await?;
    let live_clusters = clusters.list_clusters().await?;
    info!(
        "Scenario finished: {} instances in inventory, {} clusters live",
        instances.len(),
        live_clusters.len()
    );
    Ok(())
}
