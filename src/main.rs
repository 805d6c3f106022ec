// Sheetful Server entrypoint
//!
//! Initialization, middleware wiring and graceful shutdown live in the
//! library modules so this file remains a thin orchestrator.

use anyhow::Result;
use log::info;
use sheetful_server::lifecycle::{bootstrap, run};
use sheetful_server::{logging, ServerConfig};
use std::env;

#[actix_web::main]
async fn main() -> Result<()> {
    // Optional first argument: path to the config file
    let config_path = env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());

    let config = match ServerConfig::load_or_default(&config_path) {
        Ok((cfg, true)) => {
            eprintln!(
                "✅ Loaded config from: {}",
                std::fs::canonicalize(&config_path)
                    .unwrap_or_else(|_| std::path::PathBuf::from(&config_path))
                    .display()
            );
            cfg
        }
        Ok((cfg, false)) => {
            eprintln!("ℹ️  {} not found, using defaults and environment", config_path);
            cfg
        }
        Err(e) => {
            eprintln!("❌ FATAL: Failed to load {}: {}", config_path, e);
            eprintln!("❌ Server cannot start without valid configuration");
            std::process::exit(1);
        }
    };

    // Logging before any other side effects
    logging::init_logging(&config.logging)?;

    let version = env!("CARGO_PKG_VERSION");
    let commit = env!("GIT_COMMIT_HASH");
    let build_date = env!("BUILD_DATE");
    let branch = env!("GIT_BRANCH");

    info!("╔═══════════════════════════════════════════════════════════════╗");
    info!("║           Sheetful Server v{:<36} ║", version);
    info!("╠═══════════════════════════════════════════════════════════════╣");
    info!("║  Commit:     {:<49} ║", commit);
    info!("║  Branch:     {:<49} ║", branch);
    info!("║  Built:      {:<49} ║", build_date);
    info!("╚═══════════════════════════════════════════════════════════════╝");
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    let components = bootstrap(&config)?;

    run(&config, components).await
}
