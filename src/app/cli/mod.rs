//! CLI Adapter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::app::api::{self, ProvisionRequest};
use crate::app::logging::init_logging;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "funcpipe")]
#[command(version)]
#[command(
    about = "Provision an Azure DevOps build and release pipeline for an Azure function app",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Path to a configuration file (defaults to ./.funcpipe.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get or create every resource needed to build and release a function app
    #[clap(visible_alias = "p")]
    Provision {
        /// Function app to deploy to
        #[arg(long = "functionapp")]
        function_app: Option<String>,
        /// Azure DevOps organization
        #[arg(long)]
        organization: Option<String>,
        /// Azure DevOps project
        #[arg(long)]
        project: Option<String>,
    },
    /// Inspect Azure DevOps organizations
    #[clap(visible_alias = "org")]
    Organization {
        #[command(subcommand)]
        command: OrganizationCommands,
    },
    /// Inspect Azure DevOps projects
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
}

#[derive(Subcommand)]
enum OrganizationCommands {
    /// List organizations the token can access
    List,
    /// List regions a new organization can be created in
    Regions,
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List projects of an organization
    List {
        #[arg(long)]
        organization: String,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.config.as_deref();

    let result: Result<(), AppError> = match cli.command {
        Commands::Provision { function_app, organization, project } => {
            run_provision(ProvisionRequest { function_app, organization, project }, config)
        }
        Commands::Organization { command } => match command {
            OrganizationCommands::List => run_organization_list(config),
            OrganizationCommands::Regions => run_region_list(config),
        },
        Commands::Project { command } => match command {
            ProjectCommands::List { organization } => run_project_list(&organization, config),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run_provision(request: ProvisionRequest, config: Option<&Path>) -> Result<(), AppError> {
    let outcome = api::provision(&request, config)?;
    println!(
        "✅ Released build {} of {}/{}/{} to {} ({})",
        outcome.build_id,
        outcome.organization,
        outcome.project,
        outcome.repository,
        outcome.function_app,
        outcome.release.name
    );
    Ok(())
}

fn run_organization_list(config: Option<&Path>) -> Result<(), AppError> {
    for organization in api::list_organizations(config)? {
        println!("{}", organization.name);
    }
    Ok(())
}

fn run_region_list(config: Option<&Path>) -> Result<(), AppError> {
    for region in api::list_regions(config)? {
        println!("{}\t{}", region.code, region.display_name);
    }
    Ok(())
}

fn run_project_list(organization: &str, config: Option<&Path>) -> Result<(), AppError> {
    for project in api::list_projects(organization, config)? {
        println!("{}", project.name);
    }
    Ok(())
}
