//! 암호화폐 시세 API 클라이언트.
//!
//! CoinMarketCap 공개 ticker API(`/v1/ticker/{id}/`)에서 코인 한 개의 시세를 조회합니다.
//! 응답은 JSON 배열이며 첫 번째 원소만 사용합니다.
//!
//! ## 사용 예시
//! ```rust,ignore
//! let fetcher = TickerFetcher::new(client, DEFAULT_TICKER_API);
//! if let Some(record) = fetcher.fetch_coin("bitcoin").await? {
//!     println!("BTC: {}", record.price_usd);
//! }
//! ```

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// 기본 ticker API 주소
pub const DEFAULT_TICKER_API: &str = "https://api.coinmarketcap.com";

/// 코인별 CSV 행의 컬럼 수 (타임스탬프 + 14개 필드)
pub const TICKER_ROW_LEN: usize = 15;

/// API가 `null`로 내려주는 필드를 빈 문자열로 디코딩
fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// 코인 시세 레코드.
///
/// 숫자 필드도 API가 준 문자열 그대로 보관하고 검증하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TickerRecord {
    /// 코인 ID (예: "bitcoin")
    #[serde(default, deserialize_with = "nullable_string")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub symbol: String,
    /// 시가총액 순위
    #[serde(default, deserialize_with = "nullable_string")]
    pub rank: String,
    /// USD 가격
    #[serde(default, deserialize_with = "nullable_string")]
    pub price_usd: String,
    /// BTC 가격
    #[serde(default, deserialize_with = "nullable_string")]
    pub price_btc: String,
    /// 24시간 거래대금 (USD)
    #[serde(rename = "24h_volume_usd", default, deserialize_with = "nullable_string")]
    pub volume_24h_usd: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub market_cap_usd: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub available_supply: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub total_supply: String,
    /// 최대 공급량 (상한 없는 코인은 빈 문자열)
    #[serde(default, deserialize_with = "nullable_string")]
    pub max_supply: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub percent_change_1h: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub percent_change_24h: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub percent_change_7d: String,
    /// 제공자 기준 최종 갱신 시각 (Unix 초, 문자열)
    #[serde(default, deserialize_with = "nullable_string")]
    pub last_updated: String,
}

impl TickerRecord {
    /// CSV 행으로 변환.
    ///
    /// 첫 컬럼은 수집 시각(Unix 초)이며 코인 ID는 파일명으로 구분되므로 제외합니다.
    pub fn to_row(&self, captured_at: DateTime<Utc>) -> Vec<String> {
        vec![
            captured_at.timestamp().to_string(),
            self.name.clone(),
            self.symbol.clone(),
            self.rank.clone(),
            self.price_usd.clone(),
            self.price_btc.clone(),
            self.volume_24h_usd.clone(),
            self.market_cap_usd.clone(),
            self.available_supply.clone(),
            self.total_supply.clone(),
            self.max_supply.clone(),
            self.percent_change_1h.clone(),
            self.percent_change_24h.clone(),
            self.percent_change_7d.clone(),
            self.last_updated.clone(),
        ]
    }
}

/// 코인 시세 조회기
#[derive(Debug, Clone)]
pub struct TickerFetcher {
    client: Client,
    api_base: String,
}

impl TickerFetcher {
    /// 공유 HTTP 클라이언트와 API 주소로 생성
    pub fn new(client: Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// 코인 조회 URL
    pub fn coin_url(&self, coin_id: &str) -> String {
        format!("{}/v1/ticker/{}/", self.api_base, coin_id)
    }

    /// 코인 한 개의 시세 조회 (재시도 없음).
    ///
    /// # Returns
    /// * `Ok(Some(record))` - 응답 배열의 첫 번째 레코드
    /// * `Ok(None)` - 빈 배열 (데이터 없음)
    /// * `Err(Transport)` - 네트워크 실패 또는 비정상 HTTP 상태
    /// * `Err(Decode)` - JSON 배열이 아닌 응답
    pub async fn fetch_coin(&self, coin_id: &str) -> Result<Option<TickerRecord>> {
        let url = self.coin_url(coin_id);
        tracing::debug!(coin = coin_id, url = %url, "시세 조회");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.bytes().await?;

        let records: Vec<TickerRecord> = serde_json::from_slice(&body)?;
        Ok(records.into_iter().next())
    }
}
