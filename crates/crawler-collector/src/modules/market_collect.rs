//! 시장 지표 수집 모듈.

use crate::config::MARKET_FILE;
use crate::{CollectionStats, Result};
use chrono::Utc;
use crawler_data::{CsvAppender, MarketScraper};
use std::time::Instant;

/// 시세 페이지를 한 번 크롤링해 `market.csv`에 기록.
///
/// 크롤링 실패와 저장 실패 모두 단계 에러로 반환합니다 (사이클당 기록은 한 건뿐).
pub async fn collect_market(
    scraper: &MarketScraper,
    appender: &CsvAppender,
) -> Result<CollectionStats> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();
    stats.total = 1;

    tracing::info!(url = scraper.url(), "시장 지표 수집 시작");

    let snapshot = scraper.scrape_market().await?;
    appender.append(MARKET_FILE, snapshot.to_row())?;

    stats.success = 1;
    stats.elapsed = start.elapsed();
    tracing::info!(
        dollar = snapshot.dollar,
        euro = snapshot.euro,
        at = %Utc::now(),
        "시장 지표 저장 완료"
    );
    Ok(stats)
}
