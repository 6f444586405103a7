//! 페이지 흐름을 담당하는 서비스 계층 모듈
//!
//! 세션 상태 판단과 뱅킹 화면별 흐름을 제공합니다. 모든 서비스는
//! `Arc`로 공유되는 [`session::SessionController`]를 통해 로그인 여부를 확인합니다.
//!
//! # Modules
//!
//! - [`session`] - 토큰 기반 화면 모드 결정, 가드, 로그아웃
//! - [`banking`] - 백엔드 API 클라이언트, 대시보드, 이체, 계좌 개설
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::services::session::SessionController;
//! use crate::services::banking::{DashboardService, HttpBankingApi};
//!
//! let session = Arc::new(SessionController::new(store, SessionSettings::from_env()));
//! let api = Arc::new(HttpBankingApi::from_env(session.clone()));
//! let dashboard = DashboardService::new(session, api).load().await;
//! ```

pub mod session;
pub mod banking;
