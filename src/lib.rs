//! OWW 뱅킹 클라이언트
//!
//! 웹 뱅킹 서비스의 클라이언트 측 상호작용 계층입니다.
//! 저장된 세션 토큰으로 로그인 상태를 판단하고, 계좌 요약 대시보드,
//! 계좌 개설, 계좌 이체 흐름과 숫자 키패드 비밀번호 입력을 제공합니다.
//!
//! # Features
//!
//! - **세션 컨트롤러**: 토큰 클레임 기반 화면 모드 결정, 만료 토큰 정리, 보호된 동작 가드
//! - **토큰 저장소**: 메모리/파일 기반 쿠키 저장소
//! - **뱅킹 API**: `reqwest` 기반 백엔드 호출과 응답 분류
//! - **페이지 흐름**: 대시보드, 이체(조회 → 입력 → 확인 → 전송), 계좌 개설(이메일 인증)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Page Flows     │ ← 대시보드, 이체, 계좌 개설
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │ SessionController│ ──▶ │   TokenStore    │ ← 세션 토큰 (쿠키)
//! └─────────────────┘     └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   BankingApi    │ ← JSON over HTTP
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use oww_banking_client::config::SessionSettings;
//! use oww_banking_client::services::session::SessionController;
//! use oww_banking_client::storage::MemoryTokenStore;
//!
//! let store = Arc::new(MemoryTokenStore::new());
//! let session = SessionController::new(store, SessionSettings::default());
//!
//! match session.evaluate_session() {
//!     SessionView::Authenticated(user) => println!("{}", user.greeting()),
//!     SessionView::Anonymous => println!("로그인이 필요합니다."),
//! }
//! ```

pub mod core;
pub mod config;
pub mod domain;
pub mod storage;
pub mod services;
pub mod widgets;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;
    use serde_json::Value;

    /// 서명 구간이 가짜인 세션 토큰을 만듭니다.
    pub fn make_token(claims: Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.signature", header, payload)
    }
}
