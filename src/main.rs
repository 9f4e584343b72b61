//! Transaction monitoring service entry point.
//!
//! This binary loads the configuration from the environment, wires the
//! services together and polls the monitored addresses on a cron schedule
//! until interrupted.
//!
//! # Flow
//! 1. Loads `.env` and sets up logging
//! 2. Loads and validates the configuration (fatal on error)
//! 3. Initializes the explorer client, alert pipeline and watcher
//! 4. Runs one cycle immediately, then on every cron tick
//! 5. Handles graceful shutdown on Ctrl+C

use dotenvy::dotenv;
use tokio_cron_scheduler::JobScheduler;
use tracing::{error, info, warn};

use tx_monitor::{
	bootstrap::{initialize_services, Result},
	models::MonitorConfig,
	services::blockwatcher::AddressWatcherService,
	utils::{
		logging::setup_logging,
		metrics::{init_metrics, server::create_metrics_server},
	},
};

#[tokio::main]
async fn main() -> Result<()> {
	// Load environment variables from .env file
	dotenv().ok();

	setup_logging().unwrap_or_else(|e| {
		eprintln!("Failed to setup logging: {}", e);
	});

	let config = MonitorConfig::from_env()
		.map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

	let watcher = initialize_services(&config)
		.map_err(|e| anyhow::anyhow!("Failed to initialize services: {}", e))?;

	warn!("Watermarks are kept in memory only, a restart re-processes each address from block 0");

	let metrics_server = if config.metrics.enabled {
		init_metrics(&config.addresses);
		info!("Metrics server enabled, starting on {}", config.metrics.address);
		match create_metrics_server(config.metrics.address.clone()) {
			Ok(server) => Some(server),
			Err(e) => {
				error!("Failed to create metrics server: {}", e);
				None
			}
		}
	} else {
		info!("Metrics server disabled. Set METRICS_ENABLED=true to enable");
		None
	};

	let mut service =
		AddressWatcherService::<_, _, JobScheduler>::new(watcher, config.cron_schedule.clone())
			.await?;
	let _initial_cycle = service.start().await?;

	info!("Service started. Press Ctrl+C to shutdown");

	let ctrl_c = tokio::signal::ctrl_c();

	if let Some(metrics_future) = metrics_server {
		tokio::select! {
			result = ctrl_c => {
				if let Err(e) = result {
					error!("Error waiting for Ctrl+C: {}", e);
				}
				info!("Shutdown signal received, stopping services...");
			}
			result = metrics_future => {
				if let Err(e) = result {
					error!("Metrics server error: {}", e);
				}
				info!("Metrics server stopped, shutting down services...");
			}
		}
	} else {
		let _ = ctrl_c.await;
		info!("Shutdown signal received, stopping services...");
	}

	if let Err(e) = service.stop().await {
		error!("Error during shutdown: {}", e);
	}

	info!("Shutdown complete");
	Ok(())
}
