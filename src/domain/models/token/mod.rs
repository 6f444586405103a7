//! 세션 토큰 모델
//!
//! 토큰 문자열 해석과 클레임 조회를 담당합니다.

pub mod token;

pub use token::*;
