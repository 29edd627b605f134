//! 환경변수 기반 설정 모듈.

use crate::error::CollectorError;
use crate::Result;
use crawler_data::{DEFAULT_MARKET_URL, DEFAULT_TICKER_API};
use std::path::PathBuf;
use std::time::Duration;

/// 추적 대상 코인 ID (고정)
pub const TRACKED_COINS: [&str; 5] = ["bitcoin", "ripple", "ethereum", "iota", "bitcoin-cash"];

/// 공유 시장 지표 파일명
pub const MARKET_FILE: &str = "market.csv";

/// 수집 주기 상한 (1년, 분 단위)
pub const MAX_INTERVAL_MINUTES: u64 = 365 * 24 * 60;

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// CSV 출력 디렉토리
    pub data_dir: PathBuf,
    /// 데이터 소스 설정
    pub sources: SourceConfig,
    /// HTTP 클라이언트 설정
    pub http: HttpConfig,
    /// 스케줄러 설정
    pub schedule: ScheduleConfig,
}

/// 데이터 소스 설정.
///
/// 환경변수로 바꿀 수 없으며 테스트에서만 직접 구성합니다.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// 추적 코인 ID 목록
    pub coins: Vec<String>,
    /// ticker API 주소
    pub ticker_api: String,
    /// 시세 페이지 주소
    pub market_url: String,
}

/// HTTP 클라이언트 설정
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// User-Agent 헤더
    pub user_agent: String,
}

/// 스케줄러 설정
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// 수집 주기 (분 단위)
    pub interval_minutes: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            coins: TRACKED_COINS.iter().map(|c| c.to_string()).collect(),
            ticker_api: DEFAULT_TICKER_API.to_string(),
            market_url: DEFAULT_MARKET_URL.to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 15,
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            sources: SourceConfig::default(),
            http: HttpConfig::default(),
            schedule: ScheduleConfig::default(),
        }
    }
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    ///
    /// # 환경변수
    /// * `CRAWLER_INTERVAL_MINUTES` - 수집 주기 (분, 기본: 15)
    /// * `CRAWLER_DATA_DIR` - CSV 출력 디렉토리 (기본: data)
    /// * `CRAWLER_HTTP_TIMEOUT_SECS` - 요청 타임아웃 (초, 기본: 30)
    /// * `CRAWLER_USER_AGENT` - User-Agent 헤더
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            data_dir: std::env::var("CRAWLER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            sources: SourceConfig::default(),
            http: HttpConfig {
                timeout_secs: env_var_parse("CRAWLER_HTTP_TIMEOUT_SECS", 30),
                user_agent: std::env::var("CRAWLER_USER_AGENT")
                    .unwrap_or_else(|_| default_user_agent()),
            },
            schedule: ScheduleConfig {
                interval_minutes: env_var_parse("CRAWLER_INTERVAL_MINUTES", 15),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// 설정 값 검증
    pub fn validate(&self) -> Result<()> {
        if self.schedule.interval_minutes == 0 {
            return Err(CollectorError::Config(
                "CRAWLER_INTERVAL_MINUTES는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.schedule.interval_minutes > MAX_INTERVAL_MINUTES {
            return Err(CollectorError::Config(format!(
                "CRAWLER_INTERVAL_MINUTES는 {} 이하여야 합니다 (입력값: {})",
                MAX_INTERVAL_MINUTES, self.schedule.interval_minutes
            )));
        }
        if self.sources.coins.is_empty() {
            return Err(CollectorError::Config("추적할 코인이 없습니다".to_string()));
        }
        Ok(())
    }

    /// 공유 HTTP 클라이언트 생성
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.http.timeout())
            .user_agent(&self.http.user_agent)
            .build()
            .map_err(|e| CollectorError::Config(format!("HTTP 클라이언트 생성 실패: {}", e)))
    }
}

impl HttpConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ScheduleConfig {
    /// 수집 주기를 Duration으로 반환 (검증 전 값은 포화 처리)
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }
}

fn default_user_agent() -> String {
    format!("crawler/{}", env!("CARGO_PKG_VERSION"))
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
