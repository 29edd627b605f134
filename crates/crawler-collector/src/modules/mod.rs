//! 데이터 수집 모듈.

pub mod market_collect;
pub mod ticker_collect;

pub use market_collect::collect_market;
pub use ticker_collect::{coin_file_name, collect_tickers};
