//! # 문자열 유틸리티
//!
//! 입력값 정리와 쿼리 문자열 처리에 쓰이는 공통 함수들입니다.

use serde::Deserialize;
use crate::core::errors::ClientError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 `message`를 담은 `ValidationError`를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(validate_required_string("  Hello  ", "이름을 입력해주세요.").unwrap(), "Hello");
/// assert!(validate_required_string("   ", "이름을 입력해주세요.").is_err());
/// ```
pub fn validate_required_string(value: &str, message: &str) -> Result<String, ClientError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some으로 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 숫자만 남깁니다 (`"110-1234-56789"` → `"110123456789"`).
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 쿼리 문자열에서 `key`의 값을 찾습니다.
///
/// 앞의 `?`는 있어도 되고 없어도 됩니다. 값은 퍼센트 디코딩되며,
/// 디코딩에 실패한 값은 원본 그대로 돌려줍니다.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| {
            let v = v.replace('+', " ");
            urlencoding::decode(&v)
                .map(|decoded| decoded.into_owned())
                .unwrap_or(v)
        })
}

/// 키/값 쌍으로 퍼센트 인코딩된 쿼리 문자열을 만듭니다.
pub fn build_query(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// 빈 문자열이나 공백만 있는 문자열을 None으로 변환하고,
/// 유효한 문자열은 앞뒤 공백을 제거해 Some으로 반환합니다.
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`와 함께 사용합니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
