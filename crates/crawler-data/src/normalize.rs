//! 스크래핑 텍스트 숫자 정규화.
//!
//! 시세 페이지는 브라질식 표기(`1.234,56`)를 사용합니다.
//! 천 단위 구분자(`.`), 통화 기호, 공백, 알파벳을 제거한 뒤
//! 첫 번째 쉼표만 소수점으로 바꿔 `f64`로 파싱합니다.
//!
//! ```rust,ignore
//! assert_eq!(normalize_number("R$ 1.234,56")?, 1234.56);
//! assert_eq!(to_money("sem cotação"), 0.0); // 경고 로그 후 0
//! ```

use crate::error::{DataError, Result};

/// 제거 대상 통화 기호 (`$`는 `R$`, `US$` 포함)
const CURRENCY_SYMBOLS: [char; 5] = ['$', '€', '£', '¥', '₿'];

/// 숫자 외 장식 문자 여부
fn is_decoration(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_whitespace() || c == '.' || CURRENCY_SYMBOLS.contains(&c)
}

/// 장식 문자를 제거하고 첫 번째 쉼표를 소수점으로 치환.
///
/// "1.234,56 USD" -> "1234.56"
/// "1,234,56" -> "1.234,56" (두 번째 쉼표는 그대로 남음)
pub fn clean_number_text(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !is_decoration(*c)).collect();
    stripped.replacen(',', ".", 1)
}

/// 스크래핑 텍스트를 `f64`로 변환.
///
/// 실패 시 정리된 텍스트를 담은 [`DataError::Normalize`]를 반환합니다.
pub fn normalize_number(text: &str) -> Result<f64> {
    let cleaned = clean_number_text(text);
    cleaned
        .parse::<f64>()
        .map_err(|_| DataError::Normalize { text: cleaned })
}

/// 스크래핑 텍스트를 금액으로 변환 (실패 시 0).
///
/// 파싱 실패는 경고 로그로만 남기고 스냅샷 조립은 계속됩니다.
pub fn to_money(text: &str) -> f64 {
    match normalize_number(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(raw = text, error = %e, "숫자 변환 실패, 0으로 대체");
            0.0
        }
    }
}
