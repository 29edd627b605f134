//! 암호화폐 시세 수집 모듈.

use crate::{CollectionStats, Result};
use chrono::Utc;
use crawler_data::{CsvAppender, TickerFetcher};
use std::time::Instant;

/// 코인별 CSV 파일명 (예: `bitcoin.csv`)
pub fn coin_file_name(coin_id: &str) -> String {
    format!("{}.csv", coin_id)
}

/// 추적 코인 시세를 순서대로 수집해 코인별 파일에 기록.
///
/// - 조회 실패: 남은 코인을 건너뛰고 단계 전체를 에러로 종료
/// - 빈 응답: 기록 없이 다음 코인으로
/// - 저장 실패: 로그만 남기고 다음 코인으로
pub async fn collect_tickers(
    fetcher: &TickerFetcher,
    appender: &CsvAppender,
    coins: &[String],
) -> Result<CollectionStats> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();

    tracing::info!(coins = coins.len(), "암호화폐 시세 수집 시작");

    for coin in coins {
        stats.total += 1;

        let record = match fetcher.fetch_coin(coin).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                stats.empty += 1;
                tracing::debug!(coin = coin.as_str(), "데이터 없음");
                continue;
            }
            Err(e) => {
                tracing::error!(coin = coin.as_str(), error = %e, "시세 조회 실패, 단계 중단");
                return Err(e.into());
            }
        };

        let row = record.to_row(Utc::now());
        match appender.append(&coin_file_name(coin), &row) {
            Ok(()) => {
                stats.success += 1;
                tracing::debug!(coin = coin.as_str(), price_usd = %record.price_usd, "시세 저장");
            }
            Err(e) => {
                stats.errors += 1;
                tracing::error!(coin = coin.as_str(), error = %e, "시세 저장 실패");
            }
        }
    }

    stats.elapsed = start.elapsed();
    tracing::info!(at = %Utc::now(), "암호화폐 시세 저장 완료");
    Ok(stats)
}
