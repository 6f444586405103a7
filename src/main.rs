//! OWW 뱅킹 클라이언트 데모
//!
//! 파일에 저장된 세션 토큰으로 로그인 상태를 판단하고, 로그인 상태이면
//! 뱅킹 백엔드에서 계좌 요약을 불러와 터미널에 표시합니다.
//!
//! ```bash
//! # 현재 세션과 대시보드 표시
//! cargo run
//!
//! # 로그인 완료 후 받은 토큰 저장 (환영 인사 표시)
//! cargo run -- login eyJhbGciOi...
//! cargo run -- login "jwt-token=eyJhbGciOi...; JSESSIONID=..."
//!
//! # 로그아웃
//! cargo run -- logout
//! ```

use std::sync::Arc;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use oww_banking_client::config::{Environment, SessionConfig, SessionSettings};
use oww_banking_client::core::errors::ClientResult;
use oww_banking_client::domain::models::session::SessionView;
use oww_banking_client::services::banking::{BankingApi, DashboardService, HttpBankingApi};
use oww_banking_client::services::session::{GuardOutcome, SessionController};
use oww_banking_client::storage::{parse_cookie_header, FileTokenStore, TokenStore};
use oww_banking_client::utils::display_terminal::{
    print_boxed_title, print_dashboard, print_login_redirect, print_notice, print_session,
    print_welcome,
};

/// 로그인 왕복 후 백엔드가 붙여주는 쿼리
const LOGIN_SUCCESS_QUERY: &str = "?login=success";

#[tokio::main]
async fn main() -> ClientResult<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(SessionConfig::store_path()));
    let settings = SessionSettings::from_env();
    let cookie_name = settings.cookie_name.clone();
    let session = Arc::new(SessionController::new(store.clone(), settings));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut query = String::new();

    match args.first().map(String::as_str) {
        Some("login") => {
            let Some(input) = args.get(1) else {
                error!("저장할 토큰이 없습니다: login <token | cookie header>");
                return Ok(());
            };
            // `jwt-token=...; other=...` 형태의 쿠키 문자열도 받습니다
            let token = parse_cookie_header(input, &cookie_name).unwrap_or_else(|| input.clone());
            store.set(&cookie_name, &token, None)?;
            info!("세션 토큰 저장 완료");
            query = LOGIN_SUCCESS_QUERY.to_string();
        }
        Some("logout") => {
            session.logout()?;
            println!("👋 로그아웃되었습니다");
            return Ok(());
        }
        Some(other) => {
            error!("알 수 없는 명령: {}", other);
            return Ok(());
        }
        None => {}
    }

    print_boxed_title("OWW Banking");

    let view = session.evaluate_session();
    print_session(&view);

    if session.take_welcome_marker(&query) {
        print_welcome(&view);
    }

    if let SessionView::Anonymous = view {
        print_login_redirect(&session.login_redirect());
        return Ok(());
    }

    let api: Arc<dyn BankingApi> = Arc::new(HttpBankingApi::from_env(session.clone()));
    let dashboard = DashboardService::new(session.clone(), api);

    match dashboard.load().await {
        GuardOutcome::Proceeded(Ok(dashboard)) => print_dashboard(&dashboard),
        GuardOutcome::Proceeded(Err(e)) => print_notice(&e.notice()),
        GuardOutcome::Redirected(redirect) => print_login_redirect(&redirect),
    }

    Ok(())
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let result = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ()),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ()),
        _ => dotenv().map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("[{}] 환경 파일 로드 실패: {}", profile, e);
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`가 없으면 `ENVIRONMENT`별 기본 필터를 사용합니다.
///
/// ```bash
/// RUST_LOG=oww_banking_client::services=debug cargo run
/// ```
fn init_logging() {
    let environment = Environment::current();
    env_logger::init_from_env(Env::default().default_filter_or(environment.default_log_filter()));
    info!("실행 환경: {:?}", environment);
}
