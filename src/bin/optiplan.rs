//! # OptiPlan CLI
//!
//! Operator entry point: run the optimizer, inspect executions, and manage
//! global settings, scenarios and changeover groups.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use optiplan_core::config::OptiplanConfig;
use optiplan_core::database::{DatabaseConnection, DatabaseMigrations};
use optiplan_core::logging::init_structured_logging;
use optiplan_core::models::{NewOptimizationScenario, OptimizerSetting, OptimizerSettingsUpdate};
use optiplan_core::orchestration::{RunOrchestrator, RunRequest};
use optiplan_core::services::{ChangeoverMatrixStore, ScenarioRegistry};
use optiplan_core::OperationResult;

#[derive(Parser, Debug)]
#[command(name = "optiplan")]
#[command(about = "Changeover matrix and optimizer run management for OptiPlan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (default: config/optiplan.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create or update the database schema
    Migrate,

    /// Run the optimizer once
    Run {
        /// Scenario to resolve against (default scenario when omitted)
        #[arg(short, long)]
        scenario: Option<i64>,

        #[command(flatten)]
        parameters: RunParameters,
    },

    /// List the most recent executions
    Executions,

    /// Global optimizer settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Optimization scenarios
    #[command(subcommand)]
    Scenarios(ScenarioCommands),

    /// Changeover groups
    #[command(subcommand)]
    Groups(GroupCommands),
}

/// Run parameters shared by `run`, `settings set` and `scenarios create`
#[derive(Debug, Args)]
pub struct RunParameters {
    #[arg(long)]
    strategy: Option<String>,

    #[arg(long)]
    campaign_window_days: Option<i64>,

    #[arg(long, conflicts_with = "no_gravity")]
    gravity: bool,

    #[arg(long)]
    no_gravity: bool,

    /// Comma separated resource ids, highest priority first
    #[arg(long, value_delimiter = ',')]
    resource_priority: Option<Vec<i64>>,
}

impl RunParameters {
    fn gravity(&self) -> Option<bool> {
        match (self.gravity, self.no_gravity) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    Show,
    Set {
        #[command(flatten)]
        parameters: RunParameters,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScenarioCommands {
    List,
    Create {
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Make this the default scenario
        #[arg(long)]
        default: bool,

        #[command(flatten)]
        parameters: RunParameters,
    },
    SetDefault {
        id: i64,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum GroupCommands {
    List,
    Create { name: String },
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_structured_logging();

    let cli = Cli::parse();
    let config = OptiplanConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let db = DatabaseConnection::new(&config.database)
        .await
        .with_context(|| format!("connecting to {}", config.database.url))?;
    let pool = db.pool().clone();

    match cli.command {
        Commands::Migrate => {
            for name in DatabaseMigrations::object_names() {
                println!("{name}");
            }
            info!("Schema is up to date");
        }
        Commands::Run {
            scenario,
            parameters,
        } => {
            let request = RunRequest {
                scenario_id: scenario,
                gravity: parameters.gravity(),
                strategy: parameters.strategy,
                campaign_window_days: parameters.campaign_window_days,
                resource_priority: parameters.resource_priority,
            };
            let summary = RunOrchestrator::from_config(pool, &config)
                .run(request)
                .await?;
            print_json(&summary)?;
            if !summary.success {
                bail!("execution {} failed", summary.execution_id);
            }
        }
        Commands::Executions => {
            let executions = RunOrchestrator::from_config(pool, &config)
                .list_executions()
                .await?;
            print_json(&executions)?;
        }
        Commands::Settings(SettingsCommands::Show) => {
            print_json(&OptimizerSetting::get_or_default(&pool).await?)?;
        }
        Commands::Settings(SettingsCommands::Set { parameters }) => {
            let update = OptimizerSettingsUpdate {
                gravity: parameters.gravity(),
                strategy: parameters.strategy,
                campaign_window_days: parameters.campaign_window_days,
                resource_priority: parameters.resource_priority,
            };
            print_json(&OptimizerSetting::update(&pool, update).await?)?;
        }
        Commands::Scenarios(command) => scenarios(ScenarioRegistry::new(pool), command).await?,
        Commands::Groups(command) => groups(ChangeoverMatrixStore::new(pool), command).await?,
    }

    db.close().await;
    Ok(())
}

async fn scenarios(registry: ScenarioRegistry, command: ScenarioCommands) -> Result<()> {
    match command {
        ScenarioCommands::List => print_json(&registry.list().await?),
        ScenarioCommands::Create {
            name,
            description,
            default,
            parameters,
        } => {
            let new_scenario = NewOptimizationScenario {
                name,
                description,
                gravity: parameters.gravity(),
                strategy: parameters.strategy,
                campaign_window_days: parameters.campaign_window_days,
                resource_priority: parameters.resource_priority.unwrap_or_default(),
            };
            print_json(&registry.create(new_scenario, default).await?)
        }
        ScenarioCommands::SetDefault { id } => report(registry.set_default(id).await),
        ScenarioCommands::Delete { id } => report(registry.delete(id).await),
    }
}

async fn groups(store: ChangeoverMatrixStore, command: GroupCommands) -> Result<()> {
    match command {
        GroupCommands::List => print_json(&store.list_groups().await?),
        GroupCommands::Create { name } => print_json(&store.create_group(&name).await?),
        GroupCommands::Delete { id } => report(store.delete_group(id).await),
    }
}

fn report(result: OperationResult) -> Result<()> {
    print_json(&result)?;
    if !result.success {
        bail!(result.message);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
