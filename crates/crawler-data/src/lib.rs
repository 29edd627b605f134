//! 수집 데이터 소스 및 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - 암호화폐 ticker API 클라이언트
//! - 환율/지수 HTML 크롤러
//! - 스크래핑 텍스트 숫자 정규화
//! - Append-only CSV 저장소

pub mod error;
pub mod normalize;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};
pub use normalize::{normalize_number, to_money};

pub use provider::{
    MarketScraper, MarketSnapshot, MarketSnapshotBuilder, TickerFetcher, TickerRecord,
    DEFAULT_MARKET_URL, DEFAULT_TICKER_API, MARKET_ROW_LEN, TICKER_ROW_LEN,
};
pub use storage::{append_row, CsvAppender};
