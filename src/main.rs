// Content Cascade - command-line entry point

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use content_cascade::cli::{Cli, Commands, ConfigCommands};
use content_cascade::commands::{
    check_health, fallback_warning, generate, init_settings, load_settings, render_health,
    render_outcome, show_settings,
};
use content_cascade::models::settings::{Credentials, SettingsUpdate};
use content_cascade::storage::ConfigService;
use content_cascade::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    // a missing .env file is fine; variables may already be exported
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    if let Err(err) = run_cli(cli).await {
        eprintln!("error: {err:#}");
        tracing::error!("command failed: {err:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => {
            let config = load_settings(cli.config.as_deref(), args.settings_update())
                .context("failed to load settings")?;
            let creds = Credentials::from_env()?;
            let context = AppContext::new(&config, &creds)?;

            let outcome = generate(&context, &args).await;
            if let Some(warning) = fallback_warning(&outcome) {
                eprintln!("{warning}");
            }
            println!("{}", render_outcome(&outcome, args.json, args.show_pipeline)?);
        }
        Commands::Config {
            command: ConfigCommands::Show,
        } => {
            let service = ConfigService::load(cli.config.as_deref())?;
            let creds = Credentials::from_env().ok();
            println!("{}", show_settings(&service, creds.as_ref())?);
        }
        Commands::Config {
            command: ConfigCommands::Init { path, force },
        } => {
            let target = path.or(cli.config);
            println!("{}", init_settings(target.as_deref(), force)?);
        }
        Commands::Doctor => {
            let config = load_settings(cli.config.as_deref(), SettingsUpdate::default())?;
            let creds = Credentials::from_env()?;
            let context = AppContext::new(&config, &creds)?;

            let report = check_health(&context).await;
            println!("{}", render_health(&report));
            if !report.is_healthy() {
                anyhow::bail!("one or more models are unreachable");
            }
        }
    }
    Ok(())
}

fn init_tracing(log_filter: &str) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = resolve_log_filter(log_filter, rust_log.as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))
}

/// RUST_LOG wins over --log-level; an unparsable filter falls back to `info`.
fn resolve_log_filter(flag: &str, rust_log: Option<&str>) -> EnvFilter {
    let directives = rust_log.unwrap_or(flag);
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}
