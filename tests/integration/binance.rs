//! Integration tests for the Binance klines provider

use rsi_signals::services::binance::exchange_symbol;
use rsi_signals::services::{BinanceMarketDataProvider, MarketDataError, MarketDataProvider};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::{declining_candles, kline_rows, mock_klines, mock_klines_status, ts};

fn provider_for(server: &MockServer) -> BinanceMarketDataProvider {
    BinanceMarketDataProvider::with_client(server.uri(), reqwest::Client::new())
}

#[test]
fn exchange_symbol_strips_separators() {
    assert_eq!(exchange_symbol("BTC/USDT"), "BTCUSDT");
    assert_eq!(exchange_symbol("eth-usdt"), "ETHUSDT");
    assert_eq!(exchange_symbol("SOLUSDT"), "SOLUSDT");
}

#[tokio::test]
async fn klines_are_parsed_into_candles() {
    let server = MockServer::start().await;
    let expected = declining_candles(20);

    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("symbol", "BTCUSDT"))
        .and(query_param("interval", "1h"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kline_rows(&expected)))
        .expect(1)
        .mount(&server)
        .await;

    let candles = provider_for(&server)
        .get_candles("BTC/USDT", "1h", 20)
        .await
        .expect("candles");

    assert_eq!(candles, expected);
}

#[tokio::test]
async fn candles_are_sorted_by_open_time() {
    let server = MockServer::start().await;
    let mut shuffled = declining_candles(5);
    shuffled.reverse();
    mock_klines(&server, "BTCUSDT", &shuffled).await;

    let candles = provider_for(&server)
        .get_candles("BTC/USDT", "1h", 5)
        .await
        .unwrap();

    let timestamps: Vec<_> = candles.iter().map(|c| c.timestamp).collect();
    assert_eq!(timestamps, (0..5).map(ts).collect::<Vec<_>>());
}

#[tokio::test]
async fn limit_is_capped_at_exchange_maximum() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kline_rows(&declining_candles(3))))
        .expect(1)
        .mount(&server)
        .await;

    let candles = provider_for(&server)
        .get_candles("BTC/USDT", "1h", 5000)
        .await
        .unwrap();
    assert_eq!(candles.len(), 3);
}

#[tokio::test]
async fn malformed_rows_are_skipped() {
    let server = MockServer::start().await;
    let mut rows = kline_rows(&declining_candles(3));
    let array = rows.as_array_mut().unwrap();
    array.push(json!(["not", "a", "kline"]));
    array.push(json!({ "open": 1 }));

    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(&server)
        .await;

    let candles = provider_for(&server)
        .get_candles("BTC/USDT", "1h", 10)
        .await
        .unwrap();
    assert_eq!(candles.len(), 3);
}

#[tokio::test]
async fn server_errors_are_transient() {
    let server = MockServer::start().await;
    mock_klines_status(&server, "BTCUSDT", 503).await;

    let err = provider_for(&server)
        .get_candles("BTC/USDT", "1h", 10)
        .await
        .unwrap_err();

    assert!(matches!(err, MarketDataError::Status { status: 503, .. }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn client_errors_are_permanent() {
    let server = MockServer::start().await;
    mock_klines_status(&server, "NOPEUSDT", 400).await;

    let err = provider_for(&server)
        .get_candles("NOPE/USDT", "1h", 10)
        .await
        .unwrap_err();

    assert!(matches!(err, MarketDataError::Status { status: 400, .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn empty_response_is_an_error() {
    let server = MockServer::start().await;
    mock_klines(&server, "BTCUSDT", &[]).await;

    let err = provider_for(&server)
        .get_candles("BTC/USDT", "1h", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::Empty { .. }));
}

#[tokio::test]
async fn non_array_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": -1121, "msg": "Invalid symbol." })),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .get_candles("BTC/USDT", "1h", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::Malformed(_)));
    assert!(!err.is_transient());
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let provider =
        BinanceMarketDataProvider::with_client("http://localhost:9000/", reqwest::Client::new());
    assert_eq!(provider.base_url(), "http://localhost:9000");
}
