//! # Token Storage Module
//!
//! 세션 토큰을 보관하는 저장소 추상화입니다. 브라우저의 쿠키 저장소와 같은
//! 역할을 하며, 키 하나에 문자열 값 하나와 선택적인 만료 시각을 저장합니다.
//!
//! ## 구현체
//!
//! - [`MemoryTokenStore`] - 프로세스 메모리 저장소 (테스트, 임베딩 용도)
//! - [`FileTokenStore`] - JSON 파일 저장소 (데모 바이너리 용도)
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use oww_banking_client::storage::{MemoryTokenStore, TokenStore};
//!
//! let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
//! store.set("jwt-token", "a.b.c", Some(chrono::Duration::hours(1)))?;
//! assert_eq!(store.get("jwt-token")?.as_deref(), Some("a.b.c"));
//! ```

pub mod memory;
pub mod file;

pub use memory::*;
pub use file::*;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use crate::core::errors::ClientResult;

/// 세션 토큰 저장소
///
/// 세션 컨트롤러와 API 클라이언트가 `Arc<dyn TokenStore>`로 공유하므로
/// 모든 메서드는 `&self`를 받고 내부 잠금으로 동시 접근을 처리합니다.
pub trait TokenStore: Send + Sync {
    /// 저장된 값을 읽습니다. 없거나 만료되었으면 `None`입니다.
    fn get(&self, key: &str) -> ClientResult<Option<String>>;

    /// 값을 저장합니다.
    ///
    /// `max_age`가 0 이하이면 쿠키와 마찬가지로 즉시 삭제됩니다.
    fn set(&self, key: &str, value: &str, max_age: Option<Duration>) -> ClientResult<()>;

    /// 값을 삭제합니다. 없는 키를 삭제해도 에러가 아닙니다.
    fn delete(&self, key: &str) -> ClientResult<()>;
}

/// 저장소에 기록되는 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredEntry {
    /// `max_age`를 `now` 기준 만료 시각으로 바꿉니다.
    ///
    /// 0 이하의 수명은 저장하지 않아야 하므로 `None`을 반환합니다.
    pub fn new(value: &str, max_age: Option<Duration>, now: DateTime<Utc>) -> Option<Self> {
        match max_age {
            Some(age) if age <= Duration::zero() => None,
            Some(age) => Some(StoredEntry {
                value: value.to_string(),
                expires_at: Some(now + age),
            }),
            None => Some(StoredEntry {
                value: value.to_string(),
                expires_at: None,
            }),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// `a=1; b=2` 형태의 쿠키 문자열에서 `name`의 값을 찾습니다.
///
/// 빈 값은 없는 것으로 취급합니다. 값은 퍼센트 디코딩하지 않습니다.
pub fn parse_cookie_header(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}
