//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//! 문자열 처리, 금액 표시, 터미널 출력 등의 기능을 포함합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 쿼리 문자열 처리
//! - [`money`] - 금액 입력 정리, 원화/계좌번호 표시
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::money::format_won;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! assert_eq!(format_won(150_000), "₩150,000");
//! print_boxed_title("OWW Banking");
//! ```

pub mod string_utils;
pub mod money;
pub mod display_terminal;
