//! # Data Transfer Objects (DTO) Module
//!
//! 뱅킹 백엔드와의 데이터 계약을 정의합니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! └── banking/
//!     ├── request.rs      # 폼 요청 (클라이언트 → 서버), validator 검증 포함
//!     └── response.rs     # JSON 응답 (서버 → 클라이언트)
//! ```
//!
//! ## 응답 계약
//!
//! 모든 응답은 `success` 플래그와 실패 시 사람이 읽을 수 있는 `message`를 포함합니다.
//! 엔드포인트별 데이터는 같은 객체에 평평하게 담겨 있습니다.

pub mod banking;

pub use banking::*;
