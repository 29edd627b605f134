//! Scheduled crypto ticker and market index collector.
//!
//! 이 crate는 고정 주기로 두 종류의 데이터를 수집해 CSV에 추가합니다:
//! - 암호화폐 시세 (JSON API, 코인별 파일)
//! - 환율/주가지수 (HTML 크롤링, `market.csv`)

pub mod config;
pub mod cycle;
pub mod error;
pub mod logging;
pub mod modules;
pub mod scheduler;
pub mod stats;

pub use config::{CollectorConfig, MARKET_FILE, TRACKED_COINS};
pub use cycle::{CollectionCycle, CycleReport};
pub use error::{CollectorError, Result};
pub use scheduler::Scheduler;
pub use stats::CollectionStats;
