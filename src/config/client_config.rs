//! # Client Configuration Module
//!
//! 세션 토큰 저장 위치, 로그인 진입점, 백엔드 API 주소 등 클라이언트 동작에
//! 필요한 설정을 관리합니다.
//!
//! ## 환경 변수
//!
//! | 변수 | 기본값 | 설명 |
//! |------|--------|------|
//! | `SESSION_COOKIE_NAME` | `jwt-token` | 세션 토큰이 저장되는 키 |
//! | `LOGIN_URL` | `/oauth2/authorization/google` | 비로그인 상태에서 이동할 로그인 진입점 |
//! | `SESSION_STORE_PATH` | `.oww-session.json` | 파일 기반 토큰 저장소 경로 |
//! | `BANKING_API_BASE_URL` | `http://localhost:8080` | 뱅킹 백엔드 주소 |

use std::env;
use std::path::PathBuf;

pub const DEFAULT_COOKIE_NAME: &str = "jwt-token";
pub const DEFAULT_LOGIN_URL: &str = "/oauth2/authorization/google";

/// 세션 관련 설정
pub struct SessionConfig;

impl SessionConfig {
    /// 세션 토큰이 저장되는 쿠키 이름
    pub fn cookie_name() -> String {
        env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.to_string())
    }

    /// 외부 로그인 진입점
    ///
    /// 인증 완료 후 백엔드는 토큰 쿠키를 설정하고 `?login=success`를 붙여
    /// 메인 화면으로 돌려보냅니다.
    pub fn login_url() -> String {
        env::var("LOGIN_URL").unwrap_or_else(|_| DEFAULT_LOGIN_URL.to_string())
    }

    /// 파일 기반 토큰 저장소 경로
    pub fn store_path() -> PathBuf {
        env::var("SESSION_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".oww-session.json"))
    }
}

/// 뱅킹 백엔드 API 설정
pub struct BankingApiConfig;

impl BankingApiConfig {
    /// 백엔드 기본 주소 (끝의 `/`는 제거됩니다)
    pub fn base_url() -> String {
        env::var("BANKING_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string()
    }
}

/// 세션 컨트롤러에 주입되는 설정 값
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub login_url: String,
}

impl SessionSettings {
    pub fn from_env() -> Self {
        SessionSettings {
            cookie_name: SessionConfig::cookie_name(),
            login_url: SessionConfig::login_url(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
        }
    }
}

/// 백엔드 엔드포인트와 화면 이동 경로
pub mod routes {
    pub const ACCOUNT_SUMMARY: &str = "/api/account";
    pub const SEND_VERIFICATION: &str = "/banking/account/send-verification";
    pub const VERIFY_EMAIL: &str = "/banking/account/verify-email";
    pub const CREATE_ACCOUNT: &str = "/banking/account/create";
    pub const CHECK_ACCOUNT: &str = "/banking/check-account";
    pub const TRANSFER: &str = "/banking/transfer";

    pub const CREATE_ACCOUNT_PAGE: &str = "/banking/createAccount";
    pub const CREATE_ACCOUNT_SUCCESS_PAGE: &str = "/banking/account/success";
    pub const SAFEBOX_PAGE: &str = "/banking/safebox";
    pub const TRANSFER_RESULT_PAGE: &str = "/banking/transfer_3";

    /// 이체/계좌 조회 요청에 사용자를 식별하기 위해 붙이는 헤더
    pub const EMAIL_HASH_HEADER: &str = "x-user-email-hash";
}
