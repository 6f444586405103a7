//! 계좌 개설 흐름
//!
//! 이메일 인증번호 발송 → 인증번호 확인 → 개설 요청 순서로 진행됩니다.
//! 인증번호 입력 칸은 발송에 성공한 뒤에만 표시되고, 확인에 성공하면 잠깁니다.
//! 계좌 비밀번호는 화면 키패드로만 입력받습니다.

use std::sync::Arc;
use log::info;
use validator::Validate;
use crate::config::routes;
use crate::core::errors::{ClientError, ClientResult, Notice};
use crate::domain::dto::banking::{
    first_error, CreateAccountRequest, VerificationRequest, VerifyCodeRequest,
};
use crate::services::session::{GuardOutcome, SessionController};
use crate::widgets::PinPad;
use super::BankingApi;

/// 계좌 개설 폼의 키패드 외 입력값
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountForm {
    pub name: String,
    pub email: String,
    pub email_code: String,
    pub agreed_to_terms: bool,
}

/// 계좌 개설 화면 상태
pub struct AccountCreationFlow {
    session: Arc<SessionController>,
    api: Arc<dyn BankingApi>,
    code_section_visible: bool,
    verified_code: Option<String>,
    pin_pad: PinPad,
}

impl AccountCreationFlow {
    pub fn new(session: Arc<SessionController>, api: Arc<dyn BankingApi>) -> Self {
        AccountCreationFlow {
            session,
            api,
            code_section_visible: false,
            verified_code: None,
            pin_pad: PinPad::new(),
        }
    }

    /// 인증번호 입력 칸 표시 여부
    pub fn code_section_visible(&self) -> bool {
        self.code_section_visible
    }

    /// 인증번호 확인 완료 여부 (완료 후에는 입력 칸이 잠깁니다)
    pub fn is_verified(&self) -> bool {
        self.verified_code.is_some()
    }

    /// 계좌 비밀번호 키패드 (입력 칸에는 [`PinPad::masked`]를 표시합니다)
    pub fn pin_pad(&mut self) -> &mut PinPad {
        &mut self.pin_pad
    }

    /// 인증번호 메일을 보냅니다.
    pub async fn send_verification(&mut self, email: &str) -> GuardOutcome<ClientResult<Notice>> {
        let request = VerificationRequest {
            email: email.trim().to_string(),
        };
        let api = self.api.clone();

        let outcome = self
            .session
            .guard_request(|_| async move {
                request
                    .validate()
                    .map_err(|errors| first_error(&errors, &["email"]))?;
                api.send_verification(&request).await?;
                Ok(Notice::info("인증 메일이 발송되었습니다."))
            })
            .await;

        if let GuardOutcome::Proceeded(Ok(_)) = &outcome {
            self.code_section_visible = true;
        }
        outcome
    }

    /// 인증번호를 확인합니다.
    ///
    /// 이미 확인된 상태이면 백엔드에 다시 묻지 않습니다.
    pub async fn verify_code(&mut self, email: &str, code: &str) -> GuardOutcome<ClientResult<Notice>> {
        if self.is_verified() {
            return GuardOutcome::Proceeded(Ok(Notice::info("이미 인증이 완료되었습니다.")));
        }

        let request = VerifyCodeRequest {
            email: email.trim().to_string(),
            code: code.trim().to_string(),
        };
        let api = self.api.clone();

        let outcome = self
            .session
            .guard_request(|_| async move {
                request
                    .validate()
                    .map_err(|errors| first_error(&errors, &["code", "email"]))?;
                let message = api.verify_email(&request).await?;
                Ok((
                    request.code,
                    Notice::info(message.unwrap_or_else(|| "이메일 인증이 완료되었습니다.".to_string())),
                ))
            })
            .await;

        outcome.map(|result| {
            result.map(|(code, notice)| {
                self.verified_code = Some(code);
                notice
            })
        })
    }

    /// 계좌 개설을 요청하고 완료 화면 주소를 돌려줍니다.
    ///
    /// 비밀번호는 키패드에 입력된 숫자를 사용합니다. 입력 검증은 화면 순서
    /// (이름, 이메일, 인증번호, 비밀번호, 약관)대로 진행되며 첫 번째 오류만 돌려줍니다.
    pub async fn submit(&self, form: AccountForm) -> GuardOutcome<ClientResult<String>> {
        let api = self.api.clone();
        let form = CreateAccountRequest {
            name: form.name,
            email: form.email,
            password: self.pin_pad.value().to_string(),
            email_code: form.email_code,
            agreed_to_terms: form.agreed_to_terms,
        };

        self.session
            .guard_request(|_| async move {
                form.check()?;
                api.create_account(&form).await.map_err(|e| match e {
                    ClientError::Rejected(message) => {
                        ClientError::Rejected(format!("계좌 생성 실패: {}", message))
                    }
                    other => other,
                })?;
                info!("계좌 개설 완료");
                Ok(routes::CREATE_ACCOUNT_SUCCESS_PAGE.to_string())
            })
            .await
    }
}
