use anyhow::Result;
use clap::Parser;
use kaniko_ecr::{
    builder::KanikoExecutor,
    cli::Cli,
    config::PluginConfig,
    constants::{env, path},
    env_file,
    registry::AwsRegistryProvider,
    service::{PluginService, ServicePaths},
};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // The env file has to be loaded before flags read their env fallbacks
    let env_path = std::env::var(env::PLUGIN_ENV_FILE)
        .ok()
        .filter(|p| !p.is_empty());
    let loaded = match &env_path {
        Some(file) => Some(env_file::load(Path::new(file))?),
        None => None,
    };

    let cli = Cli::parse();

    // Initialize logging to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbosity.as_deref())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let (Some(file), Some(count)) = (env_path, loaded) {
        debug!("Loaded {} variables from {}", count, file);
    }

    let config = PluginConfig::from_cli(cli, Path::new(path::TAGS_FILE))?;
    info!(
        "Building {} for tags {}",
        config.image_repo(),
        config.tags.join(",")
    );

    let provider = AwsRegistryProvider::new(&config.region);
    let builder = KanikoExecutor::new(path::EXECUTOR);
    PluginService::run(&config, &provider, &builder, &ServicePaths::default()).await
}

/// Map an executor verbosity onto a tracing level
fn log_level(verbosity: Option<&str>) -> &'static str {
    match verbosity.map(str::to_ascii_lowercase).as_deref() {
        Some("panic") | Some("fatal") | Some("error") => "error",
        Some("warn") | Some("warning") => "warn",
        Some("debug") => "debug",
        Some("trace") => "trace",
        _ => "info",
    }
}
