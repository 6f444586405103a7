//! 세션 상태 관리
//!
//! 저장된 세션 토큰으로 화면 모드를 결정하고, 보호된 동작을 실행하기 전에
//! 로그인 여부를 확인합니다.

pub mod session_service;

pub use session_service::*;
