use clap::builder::BoolishValueParser;
use clap::Parser;
use std::path::PathBuf;

use crate::constants::ecr;

#[derive(Parser, Debug)]
#[command(name = "kaniko-ecr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the Dockerfile
    #[arg(long, env = "PLUGIN_DOCKERFILE", default_value = "Dockerfile")]
    pub dockerfile: String,

    /// Build context directory
    #[arg(long, env = "PLUGIN_CONTEXT", default_value = ".")]
    pub context: String,

    /// Tags to push (comma-separated). Falls back to the .tags file, then "latest"
    #[arg(long, env = "PLUGIN_TAGS", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Build arguments, as KEY=VALUE (comma-separated)
    #[arg(long, env = "PLUGIN_BUILD_ARGS", value_delimiter = ',')]
    pub args: Vec<String>,

    /// Build stage to target
    #[arg(long, env = "PLUGIN_TARGET")]
    pub target: Option<String>,

    /// Repository name within the registry
    #[arg(long, env = "PLUGIN_REPO")]
    pub repo: Option<String>,

    /// Create the ECR repository if it does not exist
    #[arg(long, env = "PLUGIN_CREATE_REPOSITORY", value_parser = BoolishValueParser::new())]
    pub create_repository: bool,

    /// AWS region
    #[arg(long, env = "PLUGIN_REGION", default_value = ecr::DEFAULT_REGION)]
    pub region: String,

    /// Additional k=v labels (comma-separated)
    #[arg(long, env = "PLUGIN_CUSTOM_LABELS", value_delimiter = ',')]
    pub custom_labels: Vec<String>,

    /// ECR registry host (e.g., 123456789012.dkr.ecr.us-east-1.amazonaws.com)
    #[arg(long, env = "PLUGIN_REGISTRY")]
    pub registry: Option<String>,

    /// AWS access key, exported for the credential helper
    #[arg(long, env = "PLUGIN_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// AWS secret key, exported for the credential helper
    #[arg(long, env = "PLUGIN_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Snapshot mode, one of full, redo or time
    #[arg(long, env = "PLUGIN_SNAPSHOT_MODE")]
    pub snapshot_mode: Option<String>,

    /// Path to a lifecycle policy file to upload
    #[arg(long, env = "PLUGIN_LIFECYCLE_POLICY")]
    pub lifecycle_policy: Option<PathBuf>,

    /// Path to a repository policy file to upload
    #[arg(long, env = "PLUGIN_REPOSITORY_POLICY")]
    pub repository_policy: Option<PathBuf>,

    /// Enable remote layer caching
    #[arg(long, env = "PLUGIN_ENABLE_CACHE", value_parser = BoolishValueParser::new())]
    pub enable_cache: bool,

    /// Repository in the registry used to store cached layers
    #[arg(long, env = "PLUGIN_CACHE_REPO")]
    pub cache_repo: Option<String>,

    /// Cache timeout in hours (0 keeps the executor default of two weeks)
    #[arg(long, env = "PLUGIN_CACHE_TTL", default_value_t = 0)]
    pub cache_ttl: u32,

    /// Where to write metadata about the pushed images
    #[arg(long, env = "PLUGIN_ARTIFACT_FILE")]
    pub artifact_file: Option<PathBuf>,

    /// Build the image without pushing it
    #[arg(long, env = "PLUGIN_NO_PUSH", value_parser = BoolishValueParser::new())]
    pub no_push: bool,

    /// Executor log level: panic, fatal, error, warn, info, debug or trace
    #[arg(long, env = "PLUGIN_VERBOSITY")]
    pub verbosity: Option<String>,
}
