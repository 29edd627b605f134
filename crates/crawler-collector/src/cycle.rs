//! 수집 사이클.
//!
//! 한 번의 스케줄 tick에서 시세 단계와 시장 지표 단계를 별도 태스크로 동시에 실행하고
//! 두 태스크가 모두 끝날 때까지 기다립니다. 한 단계의 실패는 다른 단계에 영향을 주지 않습니다.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use crawler_data::{CsvAppender, MarketScraper, TickerFetcher};

use crate::error::CollectorError;
use crate::{modules, CollectionStats, CollectorConfig, Result};

/// 단계별 실행 결과
#[derive(Debug)]
pub struct CycleReport {
    /// 시세 단계 결과
    pub ticker: Result<CollectionStats>,
    /// 시장 지표 단계 결과
    pub market: Result<CollectionStats>,
}

impl CycleReport {
    /// 두 단계 모두 성공했는지 여부
    pub fn is_complete(&self) -> bool {
        self.ticker.is_ok() && self.market.is_ok()
    }
}

/// 수집 사이클 실행기.
///
/// 사이클 간 공유 상태는 없고, 매 실행마다 레코드를 새로 만듭니다.
#[derive(Debug, Clone)]
pub struct CollectionCycle {
    fetcher: TickerFetcher,
    scraper: MarketScraper,
    appender: CsvAppender,
    coins: Arc<[String]>,
}

impl CollectionCycle {
    pub fn new(
        fetcher: TickerFetcher,
        scraper: MarketScraper,
        appender: CsvAppender,
        coins: Vec<String>,
    ) -> Self {
        Self {
            fetcher,
            scraper,
            appender,
            coins: coins.into(),
        }
    }

    /// 설정에서 생성 (HTTP 클라이언트는 두 단계가 공유)
    pub fn from_config(config: &CollectorConfig) -> Result<Self> {
        let client = config.build_http_client()?;
        Ok(Self::new(
            TickerFetcher::new(client.clone(), config.sources.ticker_api.clone()),
            MarketScraper::new(client, config.sources.market_url.clone()),
            CsvAppender::new(config.data_dir.clone()),
            config.sources.coins.clone(),
        ))
    }

    /// 사이클 1회 실행.
    ///
    /// 두 단계가 모두 끝난 뒤 반환합니다. 단계 에러는 로그로 남기고 보고서에 담습니다.
    pub async fn run(&self) -> CycleReport {
        tracing::info!(at = %Utc::now(), "수집 사이클 시작");

        let ticker_phase = {
            let fetcher = self.fetcher.clone();
            let appender = self.appender.clone();
            let coins = Arc::clone(&self.coins);
            async move { modules::collect_tickers(&fetcher, &appender, &coins).await }
        };

        let market_phase = {
            let scraper = self.scraper.clone();
            let appender = self.appender.clone();
            async move { modules::collect_market(&scraper, &appender).await }
        };

        let report = run_phases(ticker_phase, market_phase).await;

        log_phase("암호화폐 시세", &report.ticker);
        log_phase("시장 지표", &report.market);

        tracing::info!(
            at = %Utc::now(),
            complete = report.is_complete(),
            "수집 사이클 완료"
        );
        report
    }
}

/// 두 단계를 별도 태스크로 실행하고 모두 끝날 때까지 대기.
///
/// 패닉한 단계는 `CollectorError::Task`로 보고되며 다른 단계에는 영향을 주지 않습니다.
pub(crate) async fn run_phases<T, M>(ticker: T, market: M) -> CycleReport
where
    T: Future<Output = Result<CollectionStats>> + Send + 'static,
    M: Future<Output = Result<CollectionStats>> + Send + 'static,
{
    let (ticker, market) = tokio::join!(tokio::spawn(ticker), tokio::spawn(market));
    CycleReport {
        ticker: ticker.map_err(CollectorError::from).and_then(|r| r),
        market: market.map_err(CollectorError::from).and_then(|r| r),
    }
}

fn log_phase(operation: &str, result: &Result<CollectionStats>) {
    match result {
        Ok(stats) => stats.log_summary(operation),
        Err(e) => tracing::error!(operation = operation, error = %e, "수집 단계 실패"),
    }
}
