//! # Configuration Module
//!
//! 뱅킹 클라이언트의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리하며,
//! 모든 값에는 개발 환경에서 바로 동작하는 기본값이 있습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경 구분
//! - [`client_config`] - 세션 토큰, 로그인 진입점, 백엔드 API 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{BankingApiConfig, SessionConfig};
//!
//! let base_url = BankingApiConfig::base_url();
//! let cookie = SessionConfig::cookie_name();
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export BANKING_API_BASE_URL="https://bank.example.com"
//! export SESSION_COOKIE_NAME="jwt-token"
//! export LOGIN_URL="/oauth2/authorization/google"
//! export SESSION_STORE_PATH="$HOME/.oww-session.json"
//! export ENVIRONMENT="development"
//! ```

pub mod data_config;
pub mod client_config;

pub use data_config::*;
pub use client_config::*;
