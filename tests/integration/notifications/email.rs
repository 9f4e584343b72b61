use email_address::EmailAddress;
use lettre::{address::Envelope, Message, Transport};
use mockall::mock;
use std::{sync::Arc, time::Duration};

use tx_monitor::{
	models::{AddressClassification, SmtpConfig, Validator},
	services::notification::{
		EmailContent, EmailNotifier, NotificationError, NotificationService, Notifier,
		TransactionAlert,
	},
	utils::constants::{DEFAULT_ALERT_BODY, DEFAULT_ALERT_SUBJECT},
};

use crate::integration::mocks::{
	create_test_transaction, MockNotifier, COUNTERPARTY_ADDRESS, MONITORED_ADDRESS,
};

mock! {
	pub SmtpTransport {}

	impl Transport for SmtpTransport {
		type Ok = String;
		type Error = String;

		fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<String, String>;
		fn send(&self, message: &Message) -> Result<String, String>;
	}
}

fn email_content() -> EmailContent {
	EmailContent {
		sender: EmailAddress::new_unchecked("monitor@example.com"),
		recipients: vec![EmailAddress::new_unchecked("ops@example.com")],
	}
}

fn default_service(notifier: Arc<dyn Notifier>) -> NotificationService {
	NotificationService::new(notifier, DEFAULT_ALERT_SUBJECT, DEFAULT_ALERT_BODY)
}

#[test]
fn test_default_templates_render_every_field() {
	let transaction = create_test_transaction(105, "");
	let alert = TransactionAlert::new(
		transaction.clone(),
		MONITORED_ADDRESS,
		AddressClassification::contract(),
	);

	let (subject, body) = default_service(Arc::new(MockNotifier::new())).render(&alert);

	assert_eq!(
		subject,
		format!("Transaction alert: transfer on {}", MONITORED_ADDRESS)
	);
	assert!(body.contains(&format!("Monitored address: {}", MONITORED_ADDRESS)));
	assert!(body.contains(&format!("Address: {}", COUNTERPARTY_ADDRESS)));
	assert!(body.contains("Address type: smart contract"));
	assert!(body.contains("Block number: 105"));
	assert!(body.contains(&format!("Transaction hash: {}", transaction.hash)));
	assert!(body.contains("Timestamp: 2023-11-14 22:13:20 UTC"));
	assert!(!body.contains("Validator index"));
	assert!(!body.contains("${"));
}

#[test]
fn test_default_templates_append_validator_details() {
	let alert = TransactionAlert::new(
		create_test_transaction(7, "deposit(bytes pubkey, bytes signature)"),
		MONITORED_ADDRESS,
		AddressClassification::validator(Validator {
			index: Some(1234),
			public_key: "0xabcdef".to_string(),
		}),
	);

	let (subject, body) = default_service(Arc::new(MockNotifier::new())).render(&alert);

	assert!(subject.starts_with("Transaction alert: deposit on"));
	assert!(body.contains("Address type: validator"));
	assert!(body.ends_with("\n\nValidator index: 1234\nValidator public key: 0xabcdef"));
}

#[tokio::test]
async fn test_alert_delivered_as_email() {
	let expected_subject = format!("Transaction alert: transfer on {}", MONITORED_ADDRESS);
	let mut transport = MockSmtpTransport::new();
	transport
		.expect_send()
		.withf(move |message| {
			let envelope = message.envelope();
			envelope.from().map(|f| f.to_string()) == Some("monitor@example.com".to_string())
				&& envelope.to().len() == 1
				&& envelope.to()[0].to_string() == "ops@example.com"
				&& message.headers().get_raw("Subject") == Some(expected_subject.as_str())
		})
		.times(1)
		.returning(|_| Ok("250 OK".to_string()));

	let service = default_service(Arc::new(EmailNotifier::with_transport(
		email_content(),
		transport,
	)));
	let alert = TransactionAlert::new(
		create_test_transaction(105, ""),
		MONITORED_ADDRESS,
		AddressClassification::normal(),
	);

	assert!(service.send_alert(&alert).await.is_ok());
}

#[tokio::test]
async fn test_smtp_rejection_is_network_error() {
	let mut transport = MockSmtpTransport::new();
	transport
		.expect_send()
		.returning(|_| Err("535 Authentication failed".to_string()));

	let service = default_service(Arc::new(EmailNotifier::with_transport(
		email_content(),
		transport,
	)));
	let alert = TransactionAlert::new(
		create_test_transaction(1, ""),
		MONITORED_ADDRESS,
		AddressClassification::normal(),
	);

	match service.send_alert(&alert).await {
		Err(NotificationError::NetworkError(msg)) => assert!(msg.contains("535")),
		other => panic!("Expected NetworkError, got {:?}", other),
	}
}

#[tokio::test]
async fn test_unreachable_relay_is_network_error() {
	let config = SmtpConfig {
		host: "127.0.0.1".to_string(),
		port: 1,
		username: Some("user".to_string()),
		password: Some("secret".to_string()),
	};
	let notifier = EmailNotifier::new(&config, email_content(), Duration::from_secs(2)).unwrap();

	let result = notifier.notify("Subject", "Body").await;

	assert!(matches!(result, Err(NotificationError::NetworkError(_))));
}
