//! # Domain Module
//!
//! 뱅킹 클라이언트의 도메인 계층입니다.
//!
//! ```text
//! domain/
//! ├── models/          ← 세션 토큰, 클레임, 화면 모드 (값 객체)
//! └── dto/             ← 백엔드와 주고받는 요청/응답
//! ```

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
