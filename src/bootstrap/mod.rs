//! Bootstrap module for initializing services from configuration.
//!
//! This module wires the clients, filter, alert pipeline and watcher together
//! from a validated [`MonitorConfig`].
//!
//! # Services
//! - `ExplorerClient`: Lists account transactions
//! - `AlertPipeline`: Classifies counterparties and sends email alerts
//! - `AddressWatcher`: Runs polling cycles over the monitored addresses

use std::{error::Error, sync::Arc};
use tracing::{info, warn};

use crate::{
	models::{AlertConfig, MonitorConfig},
	services::{
		blockchain::{BeaconClient, EvmClient, ExplorerClient, TransactionSource},
		blockwatcher::{AddressWatcher, AlertPipeline, InMemoryWatermarkStorage, WatermarkStorage},
		classifier::AddressClassifier,
		filter::FunctionNameFilter,
		notification::{EmailContent, EmailNotifier, NotificationService, Notifier},
	},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Watcher type used by the binary
pub type DefaultAddressWatcher = AddressWatcher<ExplorerClient, InMemoryWatermarkStorage>;

/// Creates the alert pipeline, or `None` when alerts are disabled
///
/// # Errors
/// Returns an error if a client or the SMTP transport cannot be built
pub fn create_alert_pipeline(config: &MonitorConfig) -> Result<Option<AlertPipeline>> {
	let Some(alerts) = &config.alerts else {
		return Ok(None);
	};

	let notifier = EmailNotifier::new(&alerts.smtp, email_content(alerts), config.request_timeout)?;
	create_alert_pipeline_with_notifier(config, alerts, Arc::new(notifier)).map(Some)
}

/// Creates the alert pipeline around an existing delivery channel
pub fn create_alert_pipeline_with_notifier(
	config: &MonitorConfig,
	alerts: &AlertConfig,
	notifier: Arc<dyn Notifier>,
) -> Result<AlertPipeline> {
	let evm_client = Arc::new(EvmClient::new(&config.rpc_url, config.request_timeout)?);
	let beacon_client = match &alerts.beacon_api_url {
		Some(url) => Some(Arc::new(BeaconClient::new(url, config.request_timeout)?)),
		None => {
			info!("Validator lookup disabled");
			None
		}
	};

	let classifier = Arc::new(AddressClassifier::new(evm_client, beacon_client));
	let notifications = Arc::new(NotificationService::new(
		notifier,
		alerts.subject_template.clone(),
		alerts.body_template.clone(),
	));

	Ok(AlertPipeline::new(classifier, notifications))
}

/// Builds a watcher from configuration around the given source and storage
pub fn build_watcher<T, S>(
	config: &MonitorConfig,
	source: Arc<T>,
	storage: Arc<S>,
	pipeline: Option<AlertPipeline>,
) -> Result<AddressWatcher<T, S>>
where
	T: TransactionSource,
	S: WatermarkStorage,
{
	let filter = FunctionNameFilter::new(&config.function_names)?;

	Ok(AddressWatcher::new(
		source,
		storage,
		filter,
		config.addresses.clone(),
		pipeline,
	)
	.with_failure_policy(config.notification_failure_policy)
	.with_concurrency(config.address_concurrency))
}

/// Initializes all services for the monitor
///
/// # Errors
/// Returns an error if any client, filter or transport cannot be created
pub fn initialize_services(config: &MonitorConfig) -> Result<Arc<DefaultAddressWatcher>> {
	let source = Arc::new(ExplorerClient::new(
		&config.explorer.api_url,
		&config.explorer.api_key,
		config.request_timeout,
	)?);
	let storage = Arc::new(InMemoryWatermarkStorage::new());

	let pipeline = create_alert_pipeline(config)?;
	if pipeline.is_none() {
		warn!("Alerts disabled, matching transactions only advance the watermark");
	}

	let watcher = build_watcher(config, source, storage, pipeline)?;
	info!(
		addresses = watcher.addresses().len(),
		alerts = watcher.alerts_enabled(),
		policy = ?config.notification_failure_policy,
		"Services initialized"
	);

	Ok(Arc::new(watcher))
}

fn email_content(alerts: &AlertConfig) -> EmailContent {
	EmailContent {
		sender: alerts.sender.clone(),
		recipients: alerts.recipients.clone(),
	}
}
