//! 세션 화면 상태 모델

pub mod view;

pub use view::*;
