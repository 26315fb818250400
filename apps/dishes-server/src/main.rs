use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use runtime::{AppConfig, CliArgs};
use std::path::{Path, PathBuf};

use api_ingress::{ApiIngress, ApiIngressConfig};
use dishes::config::DishesConfig;
use dishes::Dishes;

/// Dishes Server - in-memory dish catalogue over HTTP
#[derive(Parser)]
#[command(name = "dishes-server")]
#[command(about = "Dishes Server - in-memory dish catalogue over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Dishes Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

/// Ingress settings from `modules.api_ingress`, completed from the `server` section.
fn ingress_config(config: &AppConfig) -> Result<ApiIngressConfig> {
    let mut ingress: ApiIngressConfig = config.module_config("api_ingress")?;
    if ingress.bind_addr.trim().is_empty() {
        ingress.bind_addr = format!("{}:{}", config.server.host, config.server.port);
    }
    if config.server.timeout_sec > 0 {
        ingress.request_timeout_secs = config.server.timeout_sec;
    }
    let (host, port) = ingress
        .bind_addr
        .rsplit_once(':')
        .with_context(|| format!("invalid bind address '{}': missing port", ingress.bind_addr))?;
    if host.is_empty() || port.parse::<u16>().is_err() {
        anyhow::bail!("invalid bind address '{}'", ingress.bind_addr);
    }
    Ok(ingress)
}

/// Build every module and mount it; shared by `run` and `check`.
fn build_ingress(config: &AppConfig) -> Result<ApiIngress> {
    let dishes_config: DishesConfig = config.module_config("dishes")?;
    let dishes = Dishes::new(dishes_config)?;
    dishes.register_rest(ApiIngress::new(ingress_config(config)?))
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");
    let ingress = build_ingress(&config)?;
    ingress.serve().await
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    build_ingress(config)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
