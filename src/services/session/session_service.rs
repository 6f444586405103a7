//! 세션 화면 컨트롤러
//!
//! 토큰 저장소에서 세션 토큰을 읽어 화면 모드(Authenticated/Anonymous)를
//! 결정하고, 보호된 동작 앞에서 로그인 여부를 확인하는 가드를 제공합니다.
//!
//! ## 상태 전이
//!
//! ```text
//!            평가 성공
//! Anonymous ──────────▶ Authenticated
//!     ▲                      │
//!     └──────────────────────┘
//!   로그아웃 / 만료 감지 / 백엔드 인증 거부
//! ```
//!
//! 토큰이 없거나, 형식이 잘못되었거나, 만료된 경우는 모두 에러가 아니라
//! 익명 상태로 정규화됩니다. 만료된 토큰만 저장소에서 삭제합니다.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use log::{debug, info, warn};
use serde::Serialize;
use crate::config::SessionSettings;
use crate::core::clock::{Clock, SystemClock};
use crate::core::errors::{ClientError, ClientResult, Notice};
use crate::domain::models::session::{SessionView, UserDisplay, ViewMode};
use crate::domain::models::token::SessionToken;
use crate::storage::TokenStore;
use crate::utils::string_utils::query_param;

/// 비로그인 상태에서 보호된 동작을 시도했을 때 표시하는 안내
pub const LOGIN_REQUIRED_MESSAGE: &str = "로그인이 필요합니다.";

/// 로그인 화면으로의 이동 지시
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRedirect {
    pub notice: Notice,
    /// 외부 로그인 진입점
    pub location: String,
}

/// 가드 실행 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<T> {
    /// 로그인 상태였으므로 동작을 실행했습니다.
    Proceeded(T),
    /// 익명 상태였으므로 동작을 실행하지 않았습니다.
    Redirected(LoginRedirect),
}

impl<T> GuardOutcome<T> {
    pub fn is_redirected(&self) -> bool {
        matches!(self, GuardOutcome::Redirected(_))
    }

    pub fn into_result(self) -> Result<T, LoginRedirect> {
        match self {
            GuardOutcome::Proceeded(value) => Ok(value),
            GuardOutcome::Redirected(redirect) => Err(redirect),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> GuardOutcome<U> {
        match self {
            GuardOutcome::Proceeded(value) => GuardOutcome::Proceeded(f(value)),
            GuardOutcome::Redirected(redirect) => GuardOutcome::Redirected(redirect),
        }
    }
}

/// 세션 화면 컨트롤러
///
/// 페이지 흐름(대시보드, 이체, 계좌 개설)이 `Arc<SessionController>`로 공유합니다.
///
/// # Examples
///
/// ```rust,ignore
/// let controller = SessionController::new(store, SessionSettings::from_env());
///
/// match controller.evaluate_session() {
///     SessionView::Authenticated(user) => println!("{}", user.greeting()),
///     SessionView::Anonymous => println!("로그인"),
/// }
/// ```
pub struct SessionController {
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    settings: SessionSettings,
    mode: RwLock<ViewMode>,
    welcome_shown: AtomicBool,
}

impl SessionController {
    pub fn new(store: Arc<dyn TokenStore>, settings: SessionSettings) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), settings)
    }

    pub fn with_clock(
        store: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
        settings: SessionSettings,
    ) -> Self {
        SessionController {
            store,
            clock,
            settings,
            mode: RwLock::new(ViewMode::Anonymous),
            welcome_shown: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// 저장된 토큰으로 현재 화면 모드를 결정합니다.
    ///
    /// 저장소가 바뀌지 않았다면 몇 번을 호출해도 같은 결과를 돌려줍니다.
    /// 만료된 토큰을 발견하면 저장소에서 삭제합니다.
    pub fn evaluate_session(&self) -> SessionView {
        let view = self.read_session();
        self.transition(view.mode());
        view
    }

    fn read_session(&self) -> SessionView {
        let cookie_name = &self.settings.cookie_name;

        let raw = match self.store.get(cookie_name) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return SessionView::Anonymous,
            Err(e) => {
                warn!("세션 토큰을 읽을 수 없습니다: {}", e);
                return SessionView::Anonymous;
            }
        };

        let token = match SessionToken::parse(&raw) {
            Ok(token) => token,
            Err(e) => {
                debug!("세션 토큰 해석 실패, 익명으로 처리합니다: {}", e);
                return SessionView::Anonymous;
            }
        };

        if token.claims().is_expired_at(self.clock.timestamp()) {
            info!("만료된 세션 토큰을 삭제합니다");
            if let Err(e) = self.store.delete(cookie_name) {
                warn!("만료된 세션 토큰 삭제 실패: {}", e);
            }
            return SessionView::Anonymous;
        }

        SessionView::Authenticated(UserDisplay::from_claims(token.claims()))
    }

    fn transition(&self, next: ViewMode) {
        match self.mode.write() {
            Ok(mut mode) => {
                if *mode != next {
                    debug!("화면 모드 전환: {:?} -> {:?}", *mode, next);
                    *mode = next;
                }
            }
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// 마지막 평가 결과의 화면 모드
    pub fn current_mode(&self) -> ViewMode {
        match self.mode.read() {
            Ok(mode) => *mode,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// 로그인 화면 이동 지시
    pub fn login_redirect(&self) -> LoginRedirect {
        LoginRedirect {
            notice: Notice::info(LOGIN_REQUIRED_MESSAGE),
            location: self.settings.login_url.clone(),
        }
    }

    /// 로그인 상태에서만 `action`을 정확히 한 번 실행합니다.
    ///
    /// 익명 상태이면 `action`을 실행하지 않고 로그인 이동 지시를 돌려줍니다.
    pub fn guard<T, F>(&self, action: F) -> GuardOutcome<T>
    where
        F: FnOnce(&UserDisplay) -> T,
    {
        match self.evaluate_session() {
            SessionView::Authenticated(user) => GuardOutcome::Proceeded(action(&user)),
            SessionView::Anonymous => {
                debug!("익명 상태에서 보호된 동작을 차단했습니다");
                GuardOutcome::Redirected(self.login_redirect())
            }
        }
    }

    /// 네트워크 요청처럼 비동기로 끝나는 동작을 위한 [`guard`](Self::guard)
    pub async fn guard_async<T, F, Fut>(&self, action: F) -> GuardOutcome<T>
    where
        F: FnOnce(UserDisplay) -> Fut,
        Fut: Future<Output = T>,
    {
        match self.evaluate_session() {
            SessionView::Authenticated(user) => GuardOutcome::Proceeded(action(user).await),
            SessionView::Anonymous => {
                debug!("익명 상태에서 보호된 동작을 차단했습니다");
                GuardOutcome::Redirected(self.login_redirect())
            }
        }
    }

    /// 백엔드 호출을 감싸는 [`guard_async`](Self::guard_async)
    ///
    /// 백엔드가 토큰을 거부하면 세션을 정리하고 로그인 이동 지시로 바꿉니다.
    /// 그 밖의 에러는 화면 상태를 바꾸지 않고 그대로 돌려줍니다.
    pub async fn guard_request<T, F, Fut>(&self, action: F) -> GuardOutcome<ClientResult<T>>
    where
        F: FnOnce(UserDisplay) -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        match self.guard_async(action).await {
            GuardOutcome::Proceeded(Err(e)) if e.requires_logout() => {
                GuardOutcome::Redirected(self.on_unauthorized())
            }
            other => other,
        }
    }

    /// 로그아웃: 토큰을 삭제하고 익명 상태로 전환합니다.
    ///
    /// 삭제에 실패해도 화면은 익명 상태로 전환됩니다.
    pub fn logout(&self) -> ClientResult<()> {
        info!("로그아웃");
        self.clear_session()
    }

    /// 백엔드가 토큰을 거부했을 때 호출합니다.
    pub fn on_unauthorized(&self) -> LoginRedirect {
        warn!("백엔드가 세션 토큰을 거부했습니다, 세션을 종료합니다");
        if let Err(e) = self.clear_session() {
            warn!("거부된 세션 토큰 삭제 실패: {}", e);
        }
        self.login_redirect()
    }

    /// 에러가 세션 종료를 요구하면 세션을 정리합니다.
    ///
    /// 페이지 흐름이 백엔드 호출 결과를 받은 직후 호출합니다.
    pub fn handle_error(&self, error: &ClientError) {
        if error.requires_logout() {
            self.on_unauthorized();
        }
    }

    fn clear_session(&self) -> ClientResult<()> {
        let result = self.store.delete(&self.settings.cookie_name);
        self.transition(ViewMode::Anonymous);
        result
    }

    /// `Authorization: Bearer` 헤더에 실을 토큰
    ///
    /// 토큰이 저장되어 있을 때만 값을 돌려주며, 형식은 검사하지 않습니다.
    pub fn bearer_token(&self) -> Option<String> {
        match self.store.get(&self.settings.cookie_name) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("세션 토큰을 읽을 수 없습니다: {}", e);
                None
            }
        }
    }

    /// 로그인 직후 환영 인사를 한 번만 표시하기 위한 확인
    ///
    /// 쿼리 문자열에 `login=success`가 있고 로그인 상태일 때 처음 한 번만 true를 돌려줍니다.
    /// 로그아웃 상태에서는 표시 기회를 소비하지 않습니다.
    pub fn take_welcome_marker(&self, query: &str) -> bool {
        if query_param(query, "login").as_deref() != Some("success") {
            return false;
        }
        if !self.evaluate_session().is_authenticated() {
            return false;
        }
        !self.welcome_shown.swap(true, Ordering::SeqCst)
    }
}
