//! 입력 위젯
//!
//! 화면의 입력 컨트롤 중 상태를 가진 것들입니다.
//! 금액 입력 칸의 쉼표 처리는 [`crate::utils::money`]에 있습니다.

pub mod pin_pad;

pub use pin_pad::*;
