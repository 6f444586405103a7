//! # Domain Models Module
//!
//! 클라이언트 세션의 값 객체들을 정의합니다.
//!
//! - [`token`] - 세션 토큰 해석과 클레임 조회
//! - [`session`] - 화면 모드(Authenticated/Anonymous)와 사용자 표시 정보

pub mod token;
pub mod session;

pub use token::*;
pub use session::*;
