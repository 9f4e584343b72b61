//! Email notification implementation.
//!
//! Provides functionality to send plain-text alerts to a list of recipients
//! via an SMTP relay.

use async_trait::async_trait;
use email_address::EmailAddress;
use lettre::{
	message::{
		header::{self, ContentType},
		Mailboxes,
	},
	transport::smtp::authentication::Credentials,
	Message, SmtpTransport, Transport,
};
use std::{fmt::Display, time::Duration};

use crate::{
	models::SmtpConfig,
	services::notification::{NotificationError, Notifier},
};

/// Sender and recipients of alert emails
#[derive(Clone, Debug)]
pub struct EmailContent {
	pub sender: EmailAddress,
	pub recipients: Vec<EmailAddress>,
}

/// Implementation of email notifications over any lettre transport
pub struct EmailNotifier<T: Transport + Send + Sync = SmtpTransport> {
	/// Transport used for email delivery
	client: T,
	/// Email sender
	sender: EmailAddress,
	/// Email recipients
	recipients: Vec<EmailAddress>,
}

impl EmailNotifier<SmtpTransport> {
	/// Creates a new email notifier backed by an SMTP relay
	///
	/// Port 465 uses implicit TLS, any other port negotiates STARTTLS.
	///
	/// # Arguments
	/// * `smtp_config` - SMTP relay configuration
	/// * `email_content` - Sender and recipients
	/// * `timeout` - Upper bound for a single SMTP exchange
	pub fn new(
		smtp_config: &SmtpConfig,
		email_content: EmailContent,
		timeout: Duration,
	) -> Result<Self, NotificationError> {
		let relay = if smtp_config.port == 465 {
			SmtpTransport::relay(&smtp_config.host)
		} else {
			SmtpTransport::starttls_relay(&smtp_config.host)
		}
		.map_err(|e| NotificationError::config_error(format!("Failed to build client: {}", e)))?;

		let mut builder = relay.port(smtp_config.port).timeout(Some(timeout));
		if let (Some(username), Some(password)) = (&smtp_config.username, &smtp_config.password) {
			builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
		}

		Ok(Self::with_transport(email_content, builder.build()))
	}
}

impl<T> EmailNotifier<T>
where
	T: Transport + Send + Sync,
	T::Error: Display,
{
	/// Creates a notifier that delivers through an existing transport
	pub fn with_transport(email_content: EmailContent, transport: T) -> Self {
		Self {
			client: transport,
			sender: email_content.sender,
			recipients: email_content.recipients,
		}
	}

	/// Builds the outgoing message
	fn build_message(&self, subject: &str, body: &str) -> Result<Message, NotificationError> {
		let recipients_str = self
			.recipients
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(", ");

		let mailboxes: Mailboxes = recipients_str.parse().map_err(|e| {
			NotificationError::internal_error(format!("Failed to parse email recipients: {}", e))
		})?;
		let recipients_header: header::To = mailboxes.into();

		let sender = self.sender.to_string().parse().map_err(|e| {
			NotificationError::internal_error(format!("Failed to parse email sender: {}", e))
		})?;

		Message::builder()
			.mailbox(recipients_header)
			.from(sender)
			.subject(subject)
			.header(ContentType::TEXT_PLAIN)
			.body(body.to_owned())
			.map_err(|e| NotificationError::internal_error(format!("Failed to build email: {}", e)))
	}
}

#[async_trait]
impl<T> Notifier for EmailNotifier<T>
where
	T: Transport + Send + Sync,
	T::Error: Display,
{
	/// Sends a plain-text email to every recipient
	///
	/// # Arguments
	/// * `subject` - Email subject
	/// * `body` - Email body
	///
	/// # Returns
	/// * `Result<(), NotificationError>` - Success or error
	async fn notify(&self, subject: &str, body: &str) -> Result<(), NotificationError> {
		let email = self.build_message(subject, body)?;

		self.client.send(&email).map_err(|e| {
			NotificationError::network_error(format!("Failed to send email: {}", e))
		})?;

		Ok(())
	}
}
