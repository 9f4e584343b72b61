//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines the polling, alerting and cycle metrics.

pub mod server;
use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};

lazy_static! {
	// Global Prometheus registry.
	pub static ref REGISTRY: Registry = Registry::new();

	// Transactions returned by the explorer, per monitored address.
	pub static ref TRANSACTIONS_FETCHED: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("transactions_fetched_total", "Transactions fetched from the explorer"),
			&["address"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Transactions that passed the watermark and function-name filter.
	pub static ref TRANSACTIONS_MATCHED: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("transactions_matched_total", "Transactions that passed the function name filter"),
			&["address"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Failed explorer fetches, per monitored address.
	pub static ref FETCH_FAILURES: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("fetch_failures_total", "Failed explorer fetches"),
			&["address"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	pub static ref ALERTS_SENT: IntCounter = {
		let counter = IntCounter::new("alerts_sent_total", "Alerts delivered").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	pub static ref ALERTS_FAILED: IntCounter = {
		let counter = IntCounter::new("alerts_failed_total", "Alerts that could not be delivered").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Completed polling cycles.
	pub static ref CYCLES_TOTAL: IntCounter = {
		let counter = IntCounter::new("cycles_total", "Completed polling cycles").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Triggers dropped because a cycle was still running.
	pub static ref CYCLES_SKIPPED: IntCounter = {
		let counter = IntCounter::new("cycles_skipped_total", "Polling cycles skipped while another was running").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Current watermark, per monitored address.
	pub static ref ADDRESS_WATERMARK: IntGaugeVec = {
		let gauge = IntGaugeVec::new(
			Opts::new("address_watermark", "Highest processed block per monitored address"),
			&["address"]
		).unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	pub static ref MONITORED_ADDRESSES: IntGauge = {
		let gauge = IntGauge::new("monitored_addresses", "Number of monitored addresses").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	let encoder = TextEncoder::new();
	let metric_families = REGISTRY.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(buffer)
}

/// Records the watermark gauge for an address
pub fn record_watermark(address: &str, block: u64) {
	ADDRESS_WATERMARK
		.with_label_values(&[address])
		.set(i64::try_from(block).unwrap_or(i64::MAX));
}

/// Initializes the static metrics so they appear before the first cycle
pub fn init_metrics(addresses: &[String]) {
	MONITORED_ADDRESSES.set(addresses.len() as i64);
	for address in addresses {
		let key = address.to_lowercase();
		TRANSACTIONS_FETCHED.with_label_values(&[&key]);
		TRANSACTIONS_MATCHED.with_label_values(&[&key]);
		FETCH_FAILURES.with_label_values(&[&key]);
		record_watermark(&key, 0);
	}
	lazy_static::initialize(&ALERTS_SENT);
	lazy_static::initialize(&ALERTS_FAILED);
	lazy_static::initialize(&CYCLES_TOTAL);
	lazy_static::initialize(&CYCLES_SKIPPED);
}
