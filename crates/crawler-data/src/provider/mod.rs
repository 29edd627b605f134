//! 데이터 Provider 모듈.
//!
//! ## 암호화폐 시세 API
//! - `TickerFetcher`: 코인 ID별 JSON 시세 조회
//!
//! ## 시장 지표 페이지
//! - `MarketScraper`: 환율/지수 HTML 크롤러

pub mod market;
pub mod ticker;

pub use market::{
    extract_fields, extract_snapshot, MarketField, MarketScraper, MarketSnapshot,
    MarketSnapshotBuilder, DEFAULT_MARKET_URL, MARKET_ROW_LEN, MARKET_SELECTORS,
};
pub use ticker::{TickerFetcher, TickerRecord, DEFAULT_TICKER_API, TICKER_ROW_LEN};
