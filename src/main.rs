use anyhow::Context;
use clap::Parser;
use devserver_config::{
    cli::Cli,
    config_manager::ConfigManager,
};
use flexi_logger::{FileSpec, Logger, WriteMode};
use log::{info, warn};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logger =
        Logger::try_with_str(&cli.log_level)?.write_mode(WriteMode::BufferAndFlush);
    if cli.log_to_file {
        logger = logger.log_to_file(FileSpec::default());
    } else {
        logger = logger.log_to_stderr();
    }
    let _logger = logger.start()?;

    // Handle config file creation
    if cli.create_config {
        ConfigManager::create_default_config(&cli.config)
            .with_context(|| format!("Failed to create config file '{}'", cli.config))?;
        info!("Created default configuration file: {}", cli.config);
        return Ok(());
    }

    // Load and merge configuration
    let mut config_manager = ConfigManager::new(&cli.config);
    config_manager
        .merge_with_cli_args(&cli)
        .context("Failed to apply CLI overrides")?;

    // Validate configuration
    if let Err(errors) = config_manager.validate_config() {
        for error in errors {
            warn!("Configuration error: {}", error);
        }
        return Err(anyhow::anyhow!("Configuration validation failed"));
    }

    let config = config_manager.get_effective_config();

    info!("Dev-server configuration loaded from '{}'", cli.config);
    info!("Configuration Summary:");
    info!(
        "  - Plugins: {:?}",
        config.plugins.iter().map(|p| p.id()).collect::<Vec<_>>()
    );
    for (prefix, route) in &config.proxy {
        info!(
            "  - Proxy: {} -> {} (changeOrigin: {})",
            prefix, route.target, route.change_origin
        );
    }

    if let Some(path) = &cli.resolve {
        match config.resolve_upstream(path, "localhost") {
            Some(upstream) => {
                info!(
                    "{} forwards to {} with Host: {}",
                    path, upstream.url, upstream.host
                );
            }
            None => {
                info!("{} matches no proxy route; served by the dev server", path);
            }
        }
    }

    if cli.print {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    Ok(())
}
