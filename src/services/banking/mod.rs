//! 뱅킹 페이지 흐름
//!
//! 모든 흐름은 [`BankingApi`] trait과 [`SessionController`](crate::services::session::SessionController)에
//! 의존하며, 백엔드 호출 전에 로그인 여부를 확인합니다.
//!
//! - [`banking_api`] - 백엔드 호출과 응답 분류
//! - [`dashboard_service`] - 계좌/세이프박스 요약, 메뉴 이동
//! - [`transfer_service`] - 받는 계좌 조회부터 결과 화면까지의 이체 흐름
//! - [`account_service`] - 이메일 인증과 계좌 개설

pub mod banking_api;
pub mod dashboard_service;
pub mod transfer_service;
pub mod account_service;

#[cfg(test)]
pub(crate) mod mock;

pub use banking_api::*;
pub use dashboard_service::*;
pub use transfer_service::*;
pub use account_service::*;
