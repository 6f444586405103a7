//! 세션 토큰과 클레임
//!
//! `header.claims.signature` 형태의 세션 토큰에서 클레임 구간만 해석합니다.
//! 서명은 검증하지 않으며, 해석한 클레임은 화면 표시 용도로만 사용합니다.
//! 권한 판단은 모든 요청을 다시 검증하는 서버의 몫입니다.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde_json::{Map, Value};
use thiserror::Error;

/// 패딩 유무와 마지막 문자의 남는 비트를 따지지 않고 표준 알파벳을 디코딩하는 엔진
const CLAIMS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// 토큰 해석 실패 사유
///
/// 세션 컨트롤러 밖으로 전달되지 않으며, 모든 경우 익명 상태로 정규화됩니다.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("토큰 구간 수가 3이 아닙니다: {0}")]
    SegmentCount(usize),

    #[error("클레임 구간 Base64 디코딩 실패: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("클레임 구간이 UTF-8이 아닙니다: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("클레임 JSON 파싱 실패: {0}")]
    Json(#[from] serde_json::Error),

    #[error("클레임이 JSON 객체가 아닙니다")]
    NotAnObject,
}

/// 토큰에 담긴 클레임 (이름 → 값)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(map: Map<String, Value>) -> Self {
        Claims(map)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// 표시 가능한 값만 문자열로 돌려줍니다.
    ///
    /// 공백이 아닌 문자열과 숫자만 인정합니다.
    pub fn display_value(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// 후보 클레임 이름을 순서대로 시도하여 처음 찾은 값을 반환합니다.
    pub fn first_of(&self, candidates: &[&str]) -> Option<String> {
        candidates.iter().find_map(|name| self.display_value(name))
    }

    /// 만료 시각 (`exp`, Unix timestamp 초)
    ///
    /// 숫자가 아닌 `exp`는 없는 것으로 취급합니다.
    pub fn expires_at(&self) -> Option<i64> {
        match self.0.get("exp")? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64)),
            _ => None,
        }
    }

    /// `now` 기준으로 만료되었는지 여부
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}

/// 해석된 세션 토큰
#[derive(Debug, Clone, PartialEq)]
pub struct SessionToken {
    raw: String,
    claims: Claims,
}

impl SessionToken {
    /// 토큰 문자열을 해석합니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::SegmentCount` - `.`으로 나눈 구간이 정확히 3개가 아님
    /// * `TokenError::Encoding` / `Utf8` / `Json` / `NotAnObject` - 클레임 구간 해석 실패
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let segments: Vec<&str> = raw.split('.').collect();
        if segments.len() != 3 {
            return Err(TokenError::SegmentCount(segments.len()));
        }

        let claims = decode_claims(segments[1])?;

        Ok(SessionToken {
            raw: raw.to_string(),
            claims,
        })
    }

    /// `Authorization: Bearer` 헤더에 그대로 실을 원본 문자열
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }
}

/// URL-safe 변형(`-`, `_`)을 표준 알파벳으로 바꾼 뒤 클레임 JSON 객체로 해석합니다.
fn decode_claims(segment: &str) -> Result<Claims, TokenError> {
    let standard: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let bytes = CLAIMS_ENGINE.decode(standard.as_bytes())?;
    let text = String::from_utf8(bytes)?;

    match serde_json::from_str::<Value>(&text)? {
        Value::Object(map) => Ok(Claims(map)),
        _ => Err(TokenError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_token;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use serde_json::json;

    #[test]
    fn test_parse_rejects_wrong_segment_count() {
        for raw in ["", "abc", "a.b", "a.b.c.d", "...."] {
            assert!(
                matches!(SessionToken::parse(raw), Err(TokenError::SegmentCount(_))),
                "{raw:?} should fail segment count"
            );
        }
    }

    #[test]
    fn test_parse_reads_claims() {
        let raw = make_token(json!({ "name": "Alice", "exp": 4_102_444_800i64 }));
        let token = SessionToken::parse(&raw).unwrap();

        assert_eq!(token.as_str(), raw);
        assert_eq!(token.claims().display_value("name").as_deref(), Some("Alice"));
        assert_eq!(token.claims().expires_at(), Some(4_102_444_800));
    }

    #[test]
    fn test_parse_accepts_url_safe_and_padded_segments() {
        let claims = json!({ "username": "김철수", "note": "??>>" }).to_string();
        let url_safe = URL_SAFE_NO_PAD.encode(claims.as_bytes());
        let padded = base64::engine::general_purpose::STANDARD.encode(claims.as_bytes());

        for segment in [url_safe, padded] {
            let raw = format!("e30.{}.sig", segment);
            let token = SessionToken::parse(&raw).unwrap();
            assert_eq!(token.claims().display_value("username").as_deref(), Some("김철수"));
        }
    }

    #[test]
    fn test_parse_ignores_nonzero_trailing_bits() {
        let canonical = URL_SAFE_NO_PAD.encode(r#"{"n":"AB"}"#);
        assert_eq!(canonical, "eyJuIjoiQUIifQ");

        for segment in ["eyJuIjoiQUIifR", "eyJuIjoiQUIifR=="] {
            let token = SessionToken::parse(&format!("e30.{}.sig", segment)).unwrap();
            assert_eq!(token.claims().display_value("n").as_deref(), Some("AB"));
        }
    }

    #[test]
    fn test_parse_rejects_bad_claims_segment() {
        let not_base64 = "e30.!!!.sig";
        let not_utf8 = format!("e30.{}.sig", URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]));
        let not_json = format!("e30.{}.sig", URL_SAFE_NO_PAD.encode("not json"));
        let not_object = format!("e30.{}.sig", URL_SAFE_NO_PAD.encode("[1,2,3]"));

        assert!(matches!(SessionToken::parse(not_base64), Err(TokenError::Encoding(_))));
        assert!(matches!(SessionToken::parse(&not_utf8), Err(TokenError::Utf8(_))));
        assert!(matches!(SessionToken::parse(&not_json), Err(TokenError::Json(_))));
        assert!(matches!(SessionToken::parse(&not_object), Err(TokenError::NotAnObject)));
    }

    #[test]
    fn test_first_of_respects_order_and_skips_blank() {
        let claims = Claims::new(
            json!({ "name": "   ", "given_name": "Gil-dong", "sub": "user-42" })
                .as_object()
                .cloned()
                .unwrap(),
        );

        assert_eq!(
            claims.first_of(&["username", "name", "given_name", "sub"]).as_deref(),
            Some("Gil-dong")
        );
        assert_eq!(claims.first_of(&["missing"]), None);
    }

    #[test]
    fn test_numeric_claims_are_displayable() {
        let claims = Claims::new(json!({ "sub": 1024 }).as_object().cloned().unwrap());
        assert_eq!(claims.display_value("sub").as_deref(), Some("1024"));
    }

    #[test]
    fn test_expiry_handling() {
        let claims = Claims::new(json!({ "exp": 1000 }).as_object().cloned().unwrap());
        assert!(claims.is_expired_at(1000));
        assert!(claims.is_expired_at(2000));
        assert!(!claims.is_expired_at(999));

        let fractional = Claims::new(json!({ "exp": 1000.7 }).as_object().cloned().unwrap());
        assert_eq!(fractional.expires_at(), Some(1000));

        let textual = Claims::new(json!({ "exp": "1000" }).as_object().cloned().unwrap());
        assert_eq!(textual.expires_at(), None);
        assert!(!textual.is_expired_at(i64::MAX));
    }
}
