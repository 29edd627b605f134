//! Integration tests for the collection cycle against a mocked ticker API and market page.

use std::path::Path;

use crawler_collector::config::SourceConfig;
use crawler_collector::{CollectionCycle, CollectorConfig, CollectorError, MARKET_FILE};
use crawler_data::{DataError, MARKET_ROW_LEN, TICKER_ROW_LEN};
use mockito::{Matcher, Server, ServerGuard};
use tempfile::TempDir;

const MARKET_PATH: &str = "/mercados/cambio";

const MARKET_HTML: &str = r#"
    <ul>
      <li class="li-ibovespa"><span class="last">85.365</span></li>
      <li class="li-dolar"><span class="last">R$ 3,31</span></li>
      <li class="li-euro"><span class="last">€ 4,75</span></li>
      <li class="li-nasdaq"><span class="last">7.063,45</span></li>
      <li class="last-child"><span class="last">R$ 26.410,00</span></li>
    </ul>
"#;

fn ticker_json(id: &str, price_usd: &str) -> String {
    format!(
        r#"[{{"id": "{id}", "name": "{id}", "symbol": "SYM", "rank": "1",
            "price_usd": "{price_usd}", "price_btc": "1.0", "24h_volume_usd": "100.0",
            "market_cap_usd": "200", "available_supply": "10", "total_supply": "10",
            "max_supply": null, "percent_change_1h": "0.1", "percent_change_24h": "-0.2",
            "percent_change_7d": "0.3", "last_updated": "1522425867"}}]"#
    )
}

fn cycle_for(server: &ServerGuard, data_dir: &Path, coins: &[&str]) -> CollectionCycle {
    let config = CollectorConfig {
        data_dir: data_dir.to_path_buf(),
        sources: SourceConfig {
            coins: coins.iter().map(|c| c.to_string()).collect(),
            ticker_api: server.url(),
            market_url: format!("{}{}", server.url(), MARKET_PATH),
        },
        ..Default::default()
    };
    CollectionCycle::from_config(&config).expect("cycle")
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("csv file");
    reader
        .records()
        .map(|r| r.expect("record").iter().map(str::to_string).collect())
        .collect()
}

async fn mock_ticker(server: &mut ServerGuard, coin: &str, status: usize, body: &str) -> mockito::Mock {
    server
        .mock("GET", format!("/v1/ticker/{}/", coin).as_str())
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn mock_market(server: &mut ServerGuard, status: usize, body: &str) -> mockito::Mock {
    server
        .mock("GET", MARKET_PATH)
        .with_status(status)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_full_cycle_writes_all_files() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let _bitcoin = mock_ticker(&mut server, "bitcoin", 200, &ticker_json("bitcoin", "9000.12")).await;
    let _ethereum = mock_ticker(&mut server, "ethereum", 200, &ticker_json("ethereum", "395.5")).await;
    let _market = mock_market(&mut server, 200, MARKET_HTML).await;

    let cycle = cycle_for(&server, dir.path(), &["bitcoin", "ethereum"]);
    let report = cycle.run().await;

    assert!(report.is_complete());
    assert_eq!(report.ticker.as_ref().unwrap().success, 2);

    let bitcoin = read_rows(&dir.path().join("bitcoin.csv"));
    assert_eq!(bitcoin.len(), 1);
    assert_eq!(bitcoin[0].len(), TICKER_ROW_LEN);

    let market = read_rows(&dir.path().join(MARKET_FILE));
    assert_eq!(market.len(), 1);
    assert_eq!(market[0].len(), MARKET_ROW_LEN);
    assert_eq!(&market[0][1..], ["3.31", "4.75", "7063.45", "85365.00", "26410.00"]);
}

#[tokio::test]
async fn test_empty_result_skips_coin() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let _bitcoin = mock_ticker(&mut server, "bitcoin", 200, &ticker_json("bitcoin", "9000.12")).await;
    let _ripple = mock_ticker(&mut server, "ripple", 200, "[]").await;
    let _market = mock_market(&mut server, 200, MARKET_HTML).await;

    let cycle = cycle_for(&server, dir.path(), &["bitcoin", "ripple"]);
    let report = cycle.run().await;

    let stats = report.ticker.expect("ticker phase succeeds");
    assert_eq!(stats.success, 1);
    assert_eq!(stats.empty, 1);

    let bitcoin = read_rows(&dir.path().join("bitcoin.csv"));
    assert_eq!(bitcoin.len(), 1);
    assert_eq!(bitcoin[0][4], "9000.12");
    assert_eq!(bitcoin[0][14], "1522425867");
    assert_eq!(bitcoin[0][10], "");
    assert!(!dir.path().join("ripple.csv").exists());
}

#[tokio::test]
async fn test_market_error_does_not_affect_tickers() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let _bitcoin = mock_ticker(&mut server, "bitcoin", 200, &ticker_json("bitcoin", "9000.12")).await;
    let _ripple = mock_ticker(&mut server, "ripple", 200, &ticker_json("ripple", "0.51")).await;
    let _market = mock_market(&mut server, 500, "internal error").await;

    let cycle = cycle_for(&server, dir.path(), &["bitcoin", "ripple"]);
    let report = cycle.run().await;

    assert!(matches!(
        report.market,
        Err(CollectorError::Data(DataError::Transport(_)))
    ));
    assert_eq!(report.ticker.as_ref().unwrap().success, 2);

    assert_eq!(read_rows(&dir.path().join("bitcoin.csv")).len(), 1);
    assert_eq!(read_rows(&dir.path().join("ripple.csv")).len(), 1);
    assert!(!dir.path().join(MARKET_FILE).exists());
}

#[tokio::test]
async fn test_fetch_error_aborts_ticker_phase_only() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let _bitcoin = mock_ticker(&mut server, "bitcoin", 502, "bad gateway").await;
    let ethereum = server
        .mock("GET", Matcher::Regex("^/v1/ticker/ethereum/?$".to_string()))
        .with_status(200)
        .with_body(ticker_json("ethereum", "395.5"))
        .expect(0)
        .create_async()
        .await;
    let _market = mock_market(&mut server, 200, MARKET_HTML).await;

    let cycle = cycle_for(&server, dir.path(), &["bitcoin", "ethereum"]);
    let report = cycle.run().await;

    assert!(report.ticker.is_err());
    assert!(report.market.is_ok());
    ethereum.assert_async().await;

    assert!(!dir.path().join("bitcoin.csv").exists());
    assert!(!dir.path().join("ethereum.csv").exists());
    assert_eq!(read_rows(&dir.path().join(MARKET_FILE)).len(), 1);
}

#[tokio::test]
async fn test_persist_error_skips_only_that_coin() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    // 같은 이름의 디렉토리가 있으면 파일을 열 수 없음
    std::fs::create_dir(dir.path().join("bitcoin.csv")).unwrap();

    let _bitcoin = mock_ticker(&mut server, "bitcoin", 200, &ticker_json("bitcoin", "9000.12")).await;
    let _ripple = mock_ticker(&mut server, "ripple", 200, &ticker_json("ripple", "0.51")).await;
    let _market = mock_market(&mut server, 200, MARKET_HTML).await;

    let cycle = cycle_for(&server, dir.path(), &["bitcoin", "ripple"]);
    let report = cycle.run().await;

    let stats = report.ticker.expect("persist errors are not fatal to the phase");
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.success, 1);
    assert_eq!(read_rows(&dir.path().join("ripple.csv")).len(), 1);
}

#[tokio::test]
async fn test_missing_data_dir_fails_market_phase() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("not-created");

    let _bitcoin = mock_ticker(&mut server, "bitcoin", 200, &ticker_json("bitcoin", "9000.12")).await;
    let _market = mock_market(&mut server, 200, MARKET_HTML).await;

    let cycle = cycle_for(&server, &missing, &["bitcoin"]);
    let report = cycle.run().await;

    assert!(matches!(
        report.market,
        Err(CollectorError::Data(DataError::Persist(_)))
    ));
    assert_eq!(report.ticker.as_ref().unwrap().errors, 1);
    assert!(!missing.exists());
}

#[tokio::test]
async fn test_consecutive_cycles_append() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let _bitcoin = mock_ticker(&mut server, "bitcoin", 200, &ticker_json("bitcoin", "9000.12")).await;
    let _market = mock_market(&mut server, 200, MARKET_HTML).await;

    let cycle = cycle_for(&server, dir.path(), &["bitcoin"]);
    cycle.run().await;
    cycle.run().await;

    let bitcoin = read_rows(&dir.path().join("bitcoin.csv"));
    let market = read_rows(&dir.path().join(MARKET_FILE));
    assert_eq!(bitcoin.len(), 2);
    assert_eq!(market.len(), 2);
    assert!(bitcoin.iter().all(|row| row.len() == TICKER_ROW_LEN));
    assert!(market.iter().all(|row| row.len() == MARKET_ROW_LEN));
}
