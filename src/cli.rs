use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "devserver-config",
    about = "Loads and validates the dev-server configuration: framework plugins and local proxy routes",
    version
)]
pub struct Cli {
    /// Path to the configuration file (json, yaml, or toml)
    #[arg(long, default_value = "devserver.toml")]
    pub config: String,

    /// Create a default configuration file at the --config path and exit
    #[arg(long)]
    pub create_config: bool,

    /// Override the backend origin for every proxy route
    #[arg(long, env = "DEVSERVER_BACKEND")]
    pub backend: Option<String>,

    /// Print the effective configuration as JSON to stdout
    #[arg(long)]
    pub print: bool,

    /// Show the upstream forwarding decision for a request path
    #[arg(long, value_name = "PATH")]
    pub resolve: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write logs to a file instead of stderr
    #[arg(long)]
    pub log_to_file: bool,
}
