//! 시장 지표 페이지 크롤러.
//!
//! InfoMoney 환율 페이지에서 다섯 개 지표(보베스파, 달러, 유로, 나스닥, 비트코인)를
//! 한 번의 요청으로 수집합니다.
//!
//! ## 추출 방식
//! - 페이지를 한 번 파싱한 뒤 (셀렉터, 필드) 테이블을 순서대로 평가
//! - 셀렉터가 여러 요소와 매칭되면 문서 순서상 마지막 값이 남음
//! - 매칭되지 않거나 숫자 변환에 실패한 필드는 0
//!
//! ## 사용 예시
//! ```rust,ignore
//! let scraper = MarketScraper::new(client, DEFAULT_MARKET_URL);
//! let snapshot = scraper.scrape_market().await?;
//! println!("USD/BRL: {:.2}", snapshot.dollar);
//! ```

use chrono::{DateTime, Utc};
use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::{DataError, Result};
use crate::normalize::to_money;

/// 기본 시세 페이지 주소
pub const DEFAULT_MARKET_URL: &str = "http://www.infomoney.com.br/mercados/cambio";

/// market.csv 행의 컬럼 수
pub const MARKET_ROW_LEN: usize = 6;

/// 에러 로그에 남길 응답 본문 최대 길이
const ERROR_BODY_LIMIT: usize = 512;

/// 스냅샷 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketField {
    /// 보베스파 지수
    Bovespa,
    /// 달러 환율
    Dollar,
    /// 유로 환율
    Euro,
    /// 나스닥 지수
    Nasdaq,
    /// 비트코인 가격
    Bitcoin,
}

/// (셀렉터, 필드) 추출 테이블. 평가 순서 그대로 적용됩니다.
pub const MARKET_SELECTORS: [(&str, MarketField); 5] = [
    (".li-ibovespa .last", MarketField::Bovespa),
    (".li-dolar .last", MarketField::Dollar),
    (".li-euro .last", MarketField::Euro),
    (".li-nasdaq .last", MarketField::Nasdaq),
    (".last-child .last", MarketField::Bitcoin),
];

/// 시장 지표 스냅샷 (확정된 값)
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    /// 수집 완료 시각
    pub timestamp: DateTime<Utc>,
    pub dollar: f64,
    pub euro: f64,
    pub nasdaq: f64,
    pub bovespa: f64,
    pub bitcoin: f64,
}

impl MarketSnapshot {
    /// CSV 행으로 변환 (timestamp, dollar, euro, nasdaq, bovespa, bitcoin).
    ///
    /// 숫자는 소수점 둘째 자리까지 고정 표기합니다.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.timestamp().to_string(),
            format!("{:.2}", self.dollar),
            format!("{:.2}", self.euro),
            format!("{:.2}", self.nasdaq),
            format!("{:.2}", self.bovespa),
            format!("{:.2}", self.bitcoin),
        ]
    }
}

/// 스냅샷 조립용 빌더.
///
/// 추출 단계 동안 `&mut`로 전달되고 마지막에 [`finish`](Self::finish)로 확정됩니다.
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshotBuilder {
    dollar: f64,
    euro: f64,
    nasdaq: f64,
    bovespa: f64,
    bitcoin: f64,
}

impl MarketSnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드 값 설정 (기존 값 덮어쓰기)
    pub fn set(&mut self, field: MarketField, value: f64) {
        match field {
            MarketField::Bovespa => self.bovespa = value,
            MarketField::Dollar => self.dollar = value,
            MarketField::Euro => self.euro = value,
            MarketField::Nasdaq => self.nasdaq = value,
            MarketField::Bitcoin => self.bitcoin = value,
        }
    }

    /// 타임스탬프를 부여해 스냅샷 확정
    pub fn finish(self, timestamp: DateTime<Utc>) -> MarketSnapshot {
        MarketSnapshot {
            timestamp,
            dollar: self.dollar,
            euro: self.euro,
            nasdaq: self.nasdaq,
            bovespa: self.bovespa,
            bitcoin: self.bitcoin,
        }
    }
}

/// HTML에서 지표 추출 (빌더에 반영).
///
/// 매칭된 요소 수를 반환합니다. 셀렉터 문법 오류만 에러로 처리합니다.
pub fn extract_fields(html: &str, builder: &mut MarketSnapshotBuilder) -> Result<usize> {
    let document = Html::parse_document(html);
    let mut matched = 0;

    for (css, field) in MARKET_SELECTORS {
        let selector = Selector::parse(css)
            .map_err(|e| DataError::Decode(format!("셀렉터 파싱 실패 {}: {}", css, e)))?;

        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            builder.set(field, to_money(text.trim()));
            matched += 1;
        }
    }

    Ok(matched)
}

/// HTML 문서 하나로 스냅샷 생성 (타임스탬프는 현재 시각)
pub fn extract_snapshot(html: &str) -> Result<MarketSnapshot> {
    let mut builder = MarketSnapshotBuilder::new();
    let matched = extract_fields(html, &mut builder)?;

    if matched == 0 {
        tracing::warn!("시세 셀렉터 매칭 없음, 모든 필드 0");
    }

    Ok(builder.finish(Utc::now()))
}

/// 시장 지표 크롤러
#[derive(Debug, Clone)]
pub struct MarketScraper {
    client: Client,
    url: String,
}

impl MarketScraper {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// 대상 페이지 주소
    pub fn url(&self) -> &str {
        &self.url
    }

    /// 페이지를 한 번 방문해 스냅샷 생성.
    ///
    /// 네트워크 실패나 비정상 HTTP 상태는 상태 코드와 응답 본문을 로그로 남긴 뒤
    /// 에러로 반환합니다.
    pub async fn scrape_market(&self) -> Result<MarketSnapshot> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            tracing::error!(url = %self.url, error = %e, "시세 페이지 요청 실패");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = response.error_for_status_ref().err();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                response = %truncate(&body, ERROR_BODY_LIMIT),
                "시세 페이지 응답 오류"
            );
            return Err(match err {
                Some(e) => DataError::Transport(e),
                None => DataError::Decode(format!("unexpected status {}", status)),
            });
        }

        let html = response.text().await?;
        // Html은 Send가 아니므로 await 이후 동기 함수에서만 다룸
        extract_snapshot(&html)
    }
}

/// 문자 경계를 지키며 문자열 자르기
fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
