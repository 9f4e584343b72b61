//! Address watcher service implementation.
//!
//! Polls the transaction source for every monitored address, advances the
//! per-address watermark and feeds matching transactions through the
//! optional alert pipeline. Cycles are triggered on a cron schedule and
//! never overlap.

use async_trait::async_trait;
use futures::{stream, StreamExt};
use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinHandle};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, instrument, warn};

use crate::{
	models::{NotificationFailurePolicy, Transaction},
	services::{
		blockchain::TransactionSource,
		blockwatcher::{error::BlockWatcherError, storage::WatermarkStorage},
		classifier::AddressClassifierTrait,
		filter::FunctionNameFilter,
		notification::{NotificationError, NotificationService, TransactionAlert},
	},
	utils::metrics::{
		record_watermark, ALERTS_FAILED, ALERTS_SENT, CYCLES_SKIPPED, CYCLES_TOTAL,
		FETCH_FAILURES, TRANSACTIONS_FETCHED, TRANSACTIONS_MATCHED,
	},
};

/// Trait for job scheduler
///
/// This trait is used to abstract the job scheduler implementation.
/// It is used to allow the address watcher service to be used with different job scheduler
/// implementations.
#[async_trait]
pub trait JobSchedulerTrait: Send + Sync + Sized {
	async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>>;
	async fn add(&self, job: Job) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
	async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
	async fn shutdown(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Implementation of the job scheduler trait for the JobScheduler struct
#[async_trait]
impl JobSchedulerTrait for JobScheduler {
	async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
		Self::new().await.map_err(Into::into)
	}

	async fn add(&self, job: Job) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
		self.add(job).await.map(|_| ()).map_err(Into::into)
	}

	async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
		self.start().await.map(|_| ()).map_err(Into::into)
	}

	async fn shutdown(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
		self.shutdown().await.map(|_| ()).map_err(Into::into)
	}
}

/// Result of polling one address
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
	/// Transactions above the watermark that passed the filter, in fetch order
	pub transactions: Vec<Transaction>,
	/// Watermark to store if every transaction is considered processed
	pub next_watermark: u64,
	/// Number of transactions the source returned
	pub fetched: usize,
	/// Whether the fetch failed and was treated as empty
	pub fetch_failed: bool,
}

/// Fetches new activity for `address` and selects the transactions to report.
///
/// A failed fetch is logged and behaves like an empty result, leaving the watermark unchanged.
/// Transactions at or below `watermark` are dropped before filtering, so nothing is reported
/// twice across cycles.
///
/// # Arguments
/// * `source` - Transaction source to query
/// * `filter` - Function-name filter to apply
/// * `address` - Monitored address
/// * `watermark` - Highest block already processed for `address`
pub async fn poll_address<T>(
	source: &T,
	filter: &FunctionNameFilter,
	address: &str,
	watermark: u64,
) -> PollOutcome
where
	T: TransactionSource + ?Sized,
{
	let (fetched, fetch_failed) = match source.get_transactions(address, watermark).await {
		Ok(transactions) => (transactions, false),
		Err(e) => {
			error!(address, error = %e, "Failed to fetch transactions, treating as empty");
			(Vec::new(), true)
		}
	};
	let fetched_count = fetched.len();

	let fresh: Vec<Transaction> = fetched
		.into_iter()
		.filter(|tx| tx.block_number > watermark)
		.collect();
	let transactions = filter.filter(&fresh);

	let next_watermark = transactions
		.iter()
		.map(|tx| tx.block_number)
		.max()
		.map_or(watermark, |highest| highest.max(watermark));

	PollOutcome {
		transactions,
		next_watermark,
		fetched: fetched_count,
		fetch_failed,
	}
}

/// Watermark to persist after alerts were attempted
///
/// Under [`NotificationFailurePolicy::Hold`] the watermark stops below the lowest block whose
/// alert failed so that block is delivered again on the next cycle.
pub fn resolve_watermark(
	policy: NotificationFailurePolicy,
	watermark: u64,
	next_watermark: u64,
	lowest_failed_block: Option<u64>,
) -> u64 {
	match (policy, lowest_failed_block) {
		(NotificationFailurePolicy::Hold, Some(lowest)) => {
			watermark.max(next_watermark.min(lowest.saturating_sub(1)))
		}
		_ => next_watermark,
	}
}

/// Classification and notification for matched transactions
#[derive(Clone)]
pub struct AlertPipeline {
	classifier: Arc<dyn AddressClassifierTrait>,
	notifications: Arc<NotificationService>,
}

impl AlertPipeline {
	pub fn new(
		classifier: Arc<dyn AddressClassifierTrait>,
		notifications: Arc<NotificationService>,
	) -> Self {
		Self {
			classifier,
			notifications,
		}
	}

	/// Classifies the counterparty of `transaction` and sends the alert
	#[instrument(skip_all, fields(tx = %transaction.hash))]
	pub async fn process(
		&self,
		monitored_address: &str,
		transaction: &Transaction,
	) -> Result<(), NotificationError> {
		let counterparty = transaction.counterparty(monitored_address);
		let classification = self.classifier.classify(counterparty, transaction).await;
		let alert = TransactionAlert::new(transaction.clone(), monitored_address, classification);
		self.notifications.send_alert(&alert).await
	}
}

/// Outcome of one address within a cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressOutcome {
	pub address: String,
	pub previous_watermark: u64,
	pub watermark: u64,
	pub fetched: usize,
	pub matched: usize,
	pub alerts_sent: usize,
	pub alerts_failed: usize,
	pub fetch_failed: bool,
	pub storage_failed: bool,
}

/// Outcome of a full polling cycle, one entry per address in configured order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleSummary {
	pub addresses: Vec<AddressOutcome>,
}

impl CycleSummary {
	pub fn total_matched(&self) -> usize {
		self.addresses.iter().map(|a| a.matched).sum()
	}

	pub fn total_alerts_sent(&self) -> usize {
		self.addresses.iter().map(|a| a.alerts_sent).sum()
	}

	pub fn total_alerts_failed(&self) -> usize {
		self.addresses.iter().map(|a| a.alerts_failed).sum()
	}
}

/// Runs polling cycles over the monitored addresses
pub struct AddressWatcher<T, S> {
	source: Arc<T>,
	storage: Arc<S>,
	filter: FunctionNameFilter,
	addresses: Vec<String>,
	pipeline: Option<AlertPipeline>,
	failure_policy: NotificationFailurePolicy,
	concurrency: usize,
	run_guard: Mutex<()>,
}

impl<T, S> AddressWatcher<T, S>
where
	T: TransactionSource,
	S: WatermarkStorage,
{
	/// Creates a new address watcher
	///
	/// # Arguments
	/// * `source` - Transaction source
	/// * `storage` - Watermark storage
	/// * `filter` - Function-name filter
	/// * `addresses` - Monitored addresses, polled in this order
	/// * `pipeline` - Alert pipeline, `None` runs in watermark-only mode
	pub fn new(
		source: Arc<T>,
		storage: Arc<S>,
		filter: FunctionNameFilter,
		addresses: Vec<String>,
		pipeline: Option<AlertPipeline>,
	) -> Self {
		Self {
			source,
			storage,
			filter,
			addresses,
			pipeline,
			failure_policy: NotificationFailurePolicy::default(),
			concurrency: 1,
			run_guard: Mutex::new(()),
		}
	}

	/// Sets how failed alerts affect the watermark
	pub fn with_failure_policy(mut self, policy: NotificationFailurePolicy) -> Self {
		self.failure_policy = policy;
		self
	}

	/// Sets how many addresses are polled at once. Values below 1 are treated as 1.
	pub fn with_concurrency(mut self, concurrency: usize) -> Self {
		self.concurrency = concurrency.max(1);
		self
	}

	pub fn addresses(&self) -> &[String] {
		&self.addresses
	}

	pub fn alerts_enabled(&self) -> bool {
		self.pipeline.is_some()
	}

	/// Whether a cycle is currently running
	pub fn is_running(&self) -> bool {
		self.run_guard.try_lock().is_err()
	}

	/// Runs one polling cycle over every monitored address
	///
	/// # Returns
	/// * `None` - A cycle was already running and this trigger was skipped
	/// * `Some(summary)` - Per-address outcomes in configured order
	pub async fn execute_cycle(&self) -> Option<CycleSummary> {
		let Ok(_guard) = self.run_guard.try_lock() else {
			warn!("Previous polling cycle still running, skipping this trigger");
			CYCLES_SKIPPED.inc();
			return None;
		};

		info!(addresses = self.addresses.len(), "Starting polling cycle");

		let futures: Vec<_> = self
			.addresses
			.iter()
			.map(|address| self.process_address(address))
			.collect();
		let addresses = stream::iter(futures)
			.buffered(self.concurrency)
			.collect::<Vec<_>>()
			.await;

		let summary = CycleSummary { addresses };
		CYCLES_TOTAL.inc();
		info!(
			matched = summary.total_matched(),
			alerts_sent = summary.total_alerts_sent(),
			alerts_failed = summary.total_alerts_failed(),
			"Polling cycle finished"
		);

		Some(summary)
	}

	#[instrument(skip(self))]
	async fn process_address(&self, address: &str) -> AddressOutcome {
		let key = address.to_lowercase();
		let mut outcome = AddressOutcome {
			address: address.to_string(),
			..Default::default()
		};

		let watermark = match self.storage.get_watermark(&key).await {
			Ok(watermark) => watermark.unwrap_or(0),
			Err(e) => {
				error!(error = %e, "Failed to read watermark, skipping address this cycle");
				outcome.storage_failed = true;
				return outcome;
			}
		};
		outcome.previous_watermark = watermark;
		outcome.watermark = watermark;

		let poll = poll_address(self.source.as_ref(), &self.filter, address, watermark).await;
		outcome.fetched = poll.fetched;
		outcome.matched = poll.transactions.len();
		outcome.fetch_failed = poll.fetch_failed;

		TRANSACTIONS_FETCHED
			.with_label_values(&[&key])
			.inc_by(poll.fetched as u64);
		TRANSACTIONS_MATCHED
			.with_label_values(&[&key])
			.inc_by(poll.transactions.len() as u64);
		if poll.fetch_failed {
			FETCH_FAILURES.with_label_values(&[&key]).inc();
		}

		debug!(
			fetched = poll.fetched,
			matched = poll.transactions.len(),
			watermark,
			"Polled address"
		);

		let mut lowest_failed_block: Option<u64> = None;
		if let Some(pipeline) = &self.pipeline {
			for transaction in &poll.transactions {
				match pipeline.process(address, transaction).await {
					Ok(()) => {
						outcome.alerts_sent += 1;
						ALERTS_SENT.inc();
					}
					Err(e) => {
						warn!(
							tx = %transaction.hash,
							block = transaction.block_number,
							error = %e,
							"Failed to deliver alert"
						);
						outcome.alerts_failed += 1;
						ALERTS_FAILED.inc();
						lowest_failed_block = Some(
							lowest_failed_block
								.map_or(transaction.block_number, |b| b.min(transaction.block_number)),
						);
					}
				}
			}
		}

		let next = resolve_watermark(
			self.failure_policy,
			watermark,
			poll.next_watermark,
			lowest_failed_block,
		);

		if next > watermark {
			match self.storage.save_watermark(&key, next).await {
				Ok(()) => {
					outcome.watermark = next;
					record_watermark(&key, next);
				}
				Err(e) => {
					error!(error = %e, block = next, "Failed to save watermark");
					outcome.storage_failed = true;
				}
			}
		}

		outcome
	}
}

/// Schedules polling cycles for an [`AddressWatcher`]
pub struct AddressWatcherService<T, S, J: JobSchedulerTrait> {
	watcher: Arc<AddressWatcher<T, S>>,
	cron_schedule: String,
	pub scheduler: J,
}

impl<T, S, J> AddressWatcherService<T, S, J>
where
	T: TransactionSource + 'static,
	S: WatermarkStorage + 'static,
	J: JobSchedulerTrait,
{
	/// Creates a new service and its scheduler
	///
	/// # Arguments
	/// * `watcher` - Watcher that runs the cycles
	/// * `cron_schedule` - Six-field cron expression
	pub async fn new(
		watcher: Arc<AddressWatcher<T, S>>,
		cron_schedule: impl Into<String>,
	) -> Result<Self, BlockWatcherError> {
		let scheduler = J::new().await.map_err(|e| {
			BlockWatcherError::scheduler_error(format!("Failed to create scheduler: {}", e))
		})?;

		Ok(Self {
			watcher,
			cron_schedule: cron_schedule.into(),
			scheduler,
		})
	}

	pub fn watcher(&self) -> Arc<AddressWatcher<T, S>> {
		self.watcher.clone()
	}

	/// Registers the cron job, starts the scheduler and runs one cycle right away
	///
	/// # Returns
	/// * Handle of the immediate cycle
	pub async fn start(&mut self) -> Result<JoinHandle<Option<CycleSummary>>, BlockWatcherError> {
		let watcher = self.watcher.clone();
		let job = Job::new_async(self.cron_schedule.as_str(), move |_uuid, _l| {
			let watcher = watcher.clone();
			Box::pin(async move {
				if watcher.execute_cycle().await.is_none() {
					debug!("Scheduled cycle skipped");
				}
			})
		})
		.map_err(|e| BlockWatcherError::scheduler_error(format!("Failed to create job: {}", e)))?;

		self.scheduler
			.add(job)
			.await
			.map_err(|e| BlockWatcherError::scheduler_error(format!("Failed to add job: {}", e)))?;

		self.scheduler.start().await.map_err(|e| {
			BlockWatcherError::scheduler_error(format!("Failed to start scheduler: {}", e))
		})?;

		info!(schedule = %self.cron_schedule, "Address watcher scheduled");

		let watcher = self.watcher.clone();
		Ok(tokio::spawn(async move { watcher.execute_cycle().await }))
	}

	/// Stops the scheduler. A cycle already in progress runs to completion.
	pub async fn stop(&mut self) -> Result<(), BlockWatcherError> {
		self.scheduler.shutdown().await.map_err(|e| {
			BlockWatcherError::scheduler_error(format!("Failed to stop scheduler: {}", e))
		})?;

		info!("Address watcher stopped");
		Ok(())
	}
}
