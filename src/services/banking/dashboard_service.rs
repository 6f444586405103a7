//! 메인 화면 대시보드
//!
//! 로그인 상태에서 계좌/세이프박스 요약을 불러와 화면에 표시할 카드로
//! 변환하고, 뱅킹 메뉴 이동 전에 로그인 여부를 확인합니다.

use std::sync::Arc;
use log::info;
use serde::Serialize;
use crate::config::routes;
use crate::core::errors::{ClientError, ClientResult};
use crate::domain::dto::banking::AccountSummary;
use crate::domain::models::session::UserDisplay;
use crate::services::session::{GuardOutcome, SessionController};
use crate::utils::money::{format_account_number, format_won};
use crate::utils::string_utils::clean_optional_string;
use super::BankingApi;

/// 계좌 카드
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum AccountCard {
    Open { number: String, balance: String },
    /// 계좌가 없으면 계좌 개설 화면으로 안내합니다.
    Missing { action: String },
}

/// 세이프박스 카드
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SafeboxCard {
    Open { number: Option<String>, balance: String },
    Missing { action: String },
}

/// 대시보드 화면 데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub user: UserDisplay,
    pub account: AccountCard,
    pub safebox: SafeboxCard,
    /// 계좌 조회/이체 요청에 필요한 사용자 식별값
    pub email_hash: Option<String>,
}

impl Dashboard {
    /// 요약 응답을 화면 데이터로 변환합니다.
    ///
    /// 백엔드가 사용자 이름을 보내면 토큰의 이름 대신 사용합니다.
    pub fn from_summary(token_user: UserDisplay, summary: AccountSummary) -> Self {
        let user = match clean_optional_string(summary.user_name) {
            Some(name) => UserDisplay { name, ..token_user },
            None => token_user,
        };

        let account = if summary.has_account {
            AccountCard::Open {
                number: format_account_number(&summary.account_number.unwrap_or_default()),
                balance: format_won(summary.balance.unwrap_or(0)),
            }
        } else {
            AccountCard::Missing {
                action: routes::CREATE_ACCOUNT_PAGE.to_string(),
            }
        };

        let safebox = if summary.has_safebox {
            SafeboxCard::Open {
                number: clean_optional_string(summary.safebox_number),
                balance: format_won(summary.safebox_balance.unwrap_or(0)),
            }
        } else {
            SafeboxCard::Missing {
                action: routes::SAFEBOX_PAGE.to_string(),
            }
        };

        Dashboard {
            user,
            account,
            safebox,
            email_hash: clean_optional_string(summary.user_email_hash),
        }
    }
}

/// 대시보드 서비스
pub struct DashboardService {
    session: Arc<SessionController>,
    api: Arc<dyn BankingApi>,
}

impl DashboardService {
    pub fn new(session: Arc<SessionController>, api: Arc<dyn BankingApi>) -> Self {
        DashboardService { session, api }
    }

    /// 계좌 요약을 불러옵니다.
    ///
    /// 익명 상태이거나 백엔드가 토큰을 거부하면 로그인 이동 지시를 돌려줍니다.
    pub async fn load(&self) -> GuardOutcome<ClientResult<Dashboard>> {
        let api = self.api.clone();

        self.session
            .guard_request(|user| async move {
                let summary = api.account_summary().await?;
                info!("계좌 요약 로드 완료 (계좌 보유: {})", summary.has_account);
                Ok(Dashboard::from_summary(user, summary))
            })
            .await
    }

    /// 계좌 개설 화면 이동
    pub fn go_to_create_account(&self) -> GuardOutcome<String> {
        self.session.guard(|_| routes::CREATE_ACCOUNT_PAGE.to_string())
    }

    /// 세이프박스 화면 이동
    pub fn go_to_safebox(&self) -> GuardOutcome<String> {
        self.session.guard(|_| routes::SAFEBOX_PAGE.to_string())
    }

    /// 뱅킹 메뉴 버튼의 이동 경로를 따라갑니다.
    ///
    /// 로그인 여부를 먼저 확인하고, 이동 경로가 비어 있으면 검증 에러입니다.
    pub fn follow_banking_link(&self, redirect: Option<&str>) -> GuardOutcome<ClientResult<String>> {
        self.session.guard(|_| {
            redirect
                .map(str::trim)
                .filter(|target| !target.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ClientError::Validation("이동할 주소가 없습니다.".to_string()))
        })
    }
}
