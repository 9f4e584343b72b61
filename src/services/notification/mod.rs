//! Notification service implementation.
//!
//! Renders alerts for matched transactions and hands them to a delivery
//! channel. Email over SMTP is the only channel.

use async_trait::async_trait;
use std::sync::Arc;

mod alert;
mod email;
mod error;

pub use alert::{format_template, TransactionAlert};
pub use email::{EmailContent, EmailNotifier};
pub use error::NotificationError;

/// Interface for alert delivery channels
#[async_trait]
pub trait Notifier: Send + Sync {
	/// Delivers a rendered alert
	///
	/// # Arguments
	/// * `subject` - Short summary line
	/// * `body` - Full message text
	async fn notify(&self, subject: &str, body: &str) -> Result<(), NotificationError>;
}

/// Renders alerts from templates and delivers them through a [`Notifier`]
pub struct NotificationService {
	notifier: Arc<dyn Notifier>,
	subject_template: String,
	body_template: String,
}

impl NotificationService {
	/// Creates a new notification service
	///
	/// # Arguments
	/// * `notifier` - Delivery channel
	/// * `subject_template` - Subject with `${name}` placeholders
	/// * `body_template` - Body with `${name}` placeholders
	pub fn new(
		notifier: Arc<dyn Notifier>,
		subject_template: impl Into<String>,
		body_template: impl Into<String>,
	) -> Self {
		Self {
			notifier,
			subject_template: subject_template.into(),
			body_template: body_template.into(),
		}
	}

	/// Renders the subject and body for `alert`
	pub fn render(&self, alert: &TransactionAlert) -> (String, String) {
		let variables = alert.variables();
		let subject = format_template(&self.subject_template, &variables);
		let mut body = format_template(&self.body_template, &variables);

		if let Some(details) = alert.validator_details() {
			body.push_str("\n\n");
			body.push_str(&details);
		}

		(subject, body)
	}

	/// Renders and delivers one alert
	pub async fn send_alert(&self, alert: &TransactionAlert) -> Result<(), NotificationError> {
		let (subject, body) = self.render(alert);
		self.notifier.notify(&subject, &body).await
	}
}
