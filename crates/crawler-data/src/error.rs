//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 수집 파이프라인 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 원격 소스 접근 실패 (네트워크, HTTP 상태 코드)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 응답 형식 오류 (JSON 디코딩, HTML 셀렉터)
    #[error("Decode error: {0}")]
    Decode(String),

    /// 스크래핑한 텍스트를 숫자로 변환할 수 없음
    #[error("Normalize error: cannot parse {text:?}")]
    Normalize { text: String },

    /// 파일 열기/쓰기 실패
    #[error("Persist error: {0}")]
    Persist(String),
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Persist(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Persist(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
