//! # Client Error Handling System
//!
//! 뱅킹 클라이언트 전역에서 사용하는 통합 에러 처리 시스템입니다.
//! `thiserror`를 사용하여 타입 안전한 에러를 정의하고, 모든 에러는
//! 화면 계층이 그대로 표시할 수 있는 [`Notice`]로 변환됩니다.
//!
//! ## 에러 분류
//!
//! | ClientError | 복구 가능 | 세션 영향 | 사용 시나리오 |
//! |-------------|-----------|-----------|---------------|
//! | `Validation` | O | 없음 | 입력값 검증 실패 |
//! | `NotReady` | O | 없음 | 이전 단계를 마치지 않은 상태에서 진행 |
//! | `Unauthorized` | X | 익명 전환 + 토큰 삭제 | 백엔드가 토큰을 거부 |
//! | `Rejected` | O | 없음 | 백엔드가 `success: false` 응답 |
//! | `Unavailable` | O | 없음 | 네트워크 오류, 예상하지 못한 응답 형식 |
//! | `Storage` | O | 없음 | 토큰 저장소 입출력 실패 |
//! | `Internal` | X | 없음 | 예상하지 못한 내부 오류 |
//!
//! 백엔드에 연결할 수 없다는 사실은 자격 증명의 유효성에 대해 아무것도
//! 말해주지 않으므로 `Unavailable`은 세션 상태를 바꾸지 않습니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{ClientError, ClientResult};
//!
//! fn check_code(code: &str) -> ClientResult<()> {
//!     if code.chars().count() != 6 {
//!         return Err(ClientError::Validation("6자리 인증번호를 입력하세요.".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! match check_code("123") {
//!     Ok(()) => {}
//!     Err(e) => show_toast(e.notice()),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// 클라이언트 전역 에러 타입
///
/// 페이지 흐름(대시보드, 계좌 개설, 이체)에서 발생할 수 있는 모든 실패를
/// 포괄합니다. 각 변형은 사용자에게 보여줄 한국어 메시지를 담고 있습니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// 입력값 검증 에러
    ///
    /// 요청을 보내기 전에 클라이언트 측에서 걸러낸 입력 오류입니다.
    #[error("{0}")]
    Validation(String),

    /// 흐름 순서 에러
    ///
    /// 예: 받는 계좌를 확인하지 않고 이체 확인 단계로 진행하려는 경우
    #[error("{0}")]
    NotReady(String),

    /// 인증 거부 에러
    ///
    /// 백엔드가 401 응답을 보내거나 토큰 관련 실패 메시지를 반환한 경우입니다.
    /// 호출 측은 세션을 익명 상태로 전환하고 저장된 토큰을 삭제해야 합니다.
    #[error("인증이 필요합니다: {0}")]
    Unauthorized(String),

    /// 업무 거부 에러
    ///
    /// 백엔드가 요청을 처리했지만 `success: false`를 반환한 경우입니다.
    #[error("{0}")]
    Rejected(String),

    /// 백엔드 연결 불가 에러
    ///
    /// 네트워크 실패, 예상하지 못한 상태 코드, 파싱할 수 없는 응답 본문
    #[error("서버와 연결할 수 없습니다: {0}")]
    Unavailable(String),

    /// 토큰 저장소 에러
    #[error("Storage error: {0}")]
    Storage(String),

    /// 내부 에러
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// 사용자가 같은 화면에서 다시 시도할 수 있는 에러인지 여부
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ClientError::Unauthorized(_) | ClientError::Internal(_))
    }

    /// 이 에러를 받은 뒤 세션을 종료해야 하는지 여부
    pub fn requires_logout(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }

    /// 화면 계층에 전달할 알림으로 변환합니다.
    ///
    /// `alert()` 하나로 모든 오류를 표시하던 방식 대신, 메시지와 복구 가능
    /// 여부를 담은 값을 돌려주어 토스트나 인라인 메시지 중 무엇으로
    /// 보여줄지는 호출 측이 결정합니다.
    pub fn notice(&self) -> Notice {
        Notice {
            message: self.to_string(),
            recoverable: self.is_recoverable(),
        }
    }
}

/// 사용자에게 표시할 알림
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// 표시할 메시지
    pub message: String,
    /// 같은 화면에서 재시도 가능한지 여부
    pub recoverable: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            recoverable: true,
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type ClientResult<T> = Result<T, ClientError>;

/// 외부 라이브러리 에러를 ClientError로 변환하는 확장 trait
///
/// # 예제
///
/// ```rust,ignore
/// use crate::core::errors::ErrorContext;
///
/// let raw = std::fs::read_to_string(path).context("세션 파일 읽기 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 `Internal`로 변환합니다.
    fn context(self, msg: &str) -> ClientResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> ClientResult<T>
    where
        F: FnOnce() -> String;

    /// 컨텍스트 정보와 함께 에러를 `Storage`로 변환합니다.
    fn storage_context(self, msg: &str) -> ClientResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> ClientResult<T> {
        self.map_err(|e| ClientError::Internal(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> ClientResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ClientError::Internal(format!("{}: {}", f(), e)))
    }

    fn storage_context(self, msg: &str) -> ClientResult<T> {
        self.map_err(|e| ClientError::Storage(format!("{}: {}", msg, e)))
    }
}
