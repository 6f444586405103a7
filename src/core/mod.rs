//! # Core Module
//!
//! 클라이언트 전반에서 공유하는 핵심 기능을 제공합니다.
//!
//! ### [`errors`] - 통합 에러 처리
//! - **ClientError**: 클라이언트 전역 에러 타입
//! - **Notice**: 화면 계층에 전달되는 구조화된 알림
//! - **ErrorContext**: 외부 에러를 `ClientError`로 바꾸는 확장 trait
//!
//! ### [`clock`] - 현재 시각 공급자
//! - 토큰 만료 판정에 사용되며 테스트에서는 고정 시각으로 대체됩니다.

pub mod errors;
pub mod clock;

pub use errors::*;
pub use clock::*;
