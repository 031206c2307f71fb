//! terrarium - container environment manager CLI

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use terrarium_config::{EnvironmentStore, GlobalConfig};
use terrarium_core::EnvironmentManager;
use terrarium_runtime::{
    create_default_runtime, create_selected_runtime, ContainerRuntime, RuntimeType,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "terrarium")]
#[command(author, version, about = "Container environment manager", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override default runtime (docker or podman)
    #[arg(long, global = true, value_parser = ["docker", "podman"])]
    runtime: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured environments
    List,

    /// Print a template environment definition
    Template,

    /// Show the definition of an environment
    Inspect {
        /// Name of the environment
        name: String,
    },

    /// Set up a new environment from a definition file and create its container
    Setup {
        /// Name of the environment
        name: String,
        /// Path to the definition file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Remove an environment: stop and delete its container and definition
    Remove {
        /// Name of the environment
        name: String,
    },

    /// Reset an environment: stop, delete, and recreate its container
    Reset {
        /// Name of the environment
        name: String,
    },

    /// Start an environment, creating its container first if needed
    Start {
        /// Name of the environment
        name: String,
    },

    /// Run a named exec profile in an environment
    Exec {
        /// Name of the environment
        name: String,
        /// Name of the exec profile
        exec_name: String,
    },

    /// Stop an environment's container
    Stop {
        /// Name of the environment
        name: String,
    },

    /// Show global configuration
    Config,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = GlobalConfig::load().unwrap_or_default();
    tracing::debug!("Default runtime: {:?}", config.defaults.runtime);

    // Definition-only commands work without a container runtime
    match &cli.command {
        Commands::List => {
            let store = EnvironmentStore::open_default()?;
            return commands::list(&store);
        }
        Commands::Template => return commands::template(),
        Commands::Inspect { name } => {
            let store = EnvironmentStore::open_default()?;
            return commands::inspect(&store, name);
        }
        Commands::Config => return commands::show_config(&config),
        _ => {}
    }

    let runtime: Box<dyn ContainerRuntime> = match cli.runtime.as_deref() {
        Some("docker") => create_selected_runtime(RuntimeType::Docker, &config).await?,
        Some("podman") => create_selected_runtime(RuntimeType::Podman, &config).await?,
        _ => create_default_runtime(&config).await?,
    };
    let manager = EnvironmentManager::new(runtime)?;

    match cli.command {
        Commands::Setup { name, file } => commands::setup(&manager, &name, &file).await?,
        Commands::Remove { name } => commands::remove(&manager, &name).await?,
        Commands::Reset { name } => commands::reset(&manager, &name).await?,
        Commands::Start { name } => commands::start(&manager, &name).await?,
        Commands::Exec { name, exec_name } => {
            let code = commands::exec(&manager, &name, &exec_name).await?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::Stop { name } => commands::stop(&manager, &name).await?,
        Commands::List
        | Commands::Template
        | Commands::Inspect { .. }
        | Commands::Config => unreachable!(), // Handled above
    }

    Ok(())
}
