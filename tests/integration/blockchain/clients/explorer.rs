use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

use tx_monitor::services::blockchain::{BlockChainError, ExplorerClient, TransactionSource};

use crate::integration::mocks::MONITORED_ADDRESS;

fn txlist_query(start_block: &str) -> Matcher {
	Matcher::AllOf(vec![
		Matcher::UrlEncoded("module".into(), "account".into()),
		Matcher::UrlEncoded("action".into(), "txlist".into()),
		Matcher::UrlEncoded("address".into(), MONITORED_ADDRESS.into()),
		Matcher::UrlEncoded("startblock".into(), start_block.into()),
		Matcher::UrlEncoded("sort".into(), "desc".into()),
		Matcher::UrlEncoded("apikey".into(), "test-key".into()),
	])
}

fn client(url: &str) -> ExplorerClient {
	ExplorerClient::new(url, "test-key", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_get_transactions_success() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", "/")
		.match_query(txlist_query("100"))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			json!({
				"status": "1",
				"message": "OK",
				"result": [
					{
						"blockNumber": "105",
						"timeStamp": "1700000000",
						"hash": "0x05",
						"from": MONITORED_ADDRESS,
						"to": "0x2222222222222222222222222222222222222222",
						"value": "1000",
						"functionName": "",
						"contractAddress": "",
						"isError": "0"
					},
					{
						"blockNumber": "103",
						"hash": "0x03",
						"from": "0x2222222222222222222222222222222222222222",
						"to": MONITORED_ADDRESS,
						"functionName": "approve(address spender, uint256 amount)"
					}
				]
			})
			.to_string(),
		)
		.create_async()
		.await;

	let transactions = client(&server.url())
		.get_transactions(MONITORED_ADDRESS, 100)
		.await
		.unwrap();

	assert_eq!(transactions.len(), 2);
	assert_eq!(transactions[0].block_number, 105);
	assert_eq!(transactions[0].timestamp, Some(1_700_000_000));
	assert_eq!(transactions[0].contract_address, None);
	assert_eq!(transactions[0].raw["isError"], "0");
	assert_eq!(transactions[1].event_name(), "approve");
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_transactions_no_transactions_found() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", "/")
		.match_query(txlist_query("0"))
		.with_status(200)
		.with_body(r#"{"status":"0","message":"No transactions found","result":[]}"#)
		.create_async()
		.await;

	let transactions = client(&server.url())
		.get_transactions(MONITORED_ADDRESS, 0)
		.await
		.unwrap();

	assert!(transactions.is_empty());
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_transactions_api_error() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", "/")
		.match_query(Matcher::Any)
		.with_status(200)
		.with_body(r#"{"status":"0","message":"NOTOK","result":"Invalid API Key"}"#)
		.create_async()
		.await;

	let result = client(&server.url())
		.get_transactions(MONITORED_ADDRESS, 0)
		.await;

	match result {
		Err(BlockChainError::ApiError(msg)) => assert!(msg.contains("Invalid API Key")),
		other => panic!("Expected ApiError, got {:?}", other),
	}
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_transactions_http_error() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", "/")
		.match_query(Matcher::Any)
		.with_status(502)
		.create_async()
		.await;

	let result = client(&server.url())
		.get_transactions(MONITORED_ADDRESS, 0)
		.await;

	assert!(matches!(result, Err(BlockChainError::RequestError(_))));
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_transactions_skips_malformed_records() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", "/")
		.match_query(Matcher::Any)
		.with_status(200)
		.with_body(
			json!({
				"status": "1",
				"message": "OK",
				"result": [
					{"blockNumber": "not-a-number", "hash": "0xbad"},
					{"blockNumber": "7", "hash": "0x07"}
				]
			})
			.to_string(),
		)
		.create_async()
		.await;

	let transactions = client(&server.url())
		.get_transactions(MONITORED_ADDRESS, 0)
		.await
		.unwrap();

	assert_eq!(transactions.len(), 1);
	assert_eq!(transactions[0].hash, "0x07");
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_transactions_connection_refused() {
	let result = client("http://127.0.0.1:1")
		.get_transactions(MONITORED_ADDRESS, 0)
		.await;

	assert!(matches!(result, Err(BlockChainError::ConnectionError(_))));
}
