//! 뱅킹 백엔드 API 클라이언트
//!
//! 모든 요청은 세션 토큰이 있을 때 `Authorization: Bearer` 헤더를 붙여 보내고,
//! 응답은 아래 규칙으로 [`ClientError`]에 분류됩니다.
//!
//! | 응답 | 결과 |
//! |------|------|
//! | HTTP 401 | `Unauthorized` |
//! | 2xx, `success: false`, 메시지에 `토큰` 포함 또는 `인증이 필요`로 시작 | `Unauthorized` |
//! | 2xx, `success: false` | `Rejected(message)` |
//! | 그 외 상태 코드, 전송 실패, 해석할 수 없는 본문 | `Unavailable` |

use std::sync::Arc;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{header, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use crate::config::{routes, BankingApiConfig};
use crate::core::errors::{ClientError, ClientResult};
use crate::domain::dto::banking::{
    AccountInfo, AccountLookup, AccountLookupRequest, AccountSummary, Ack, ApiResponse,
    CreateAccountRequest, TransferReceipt, TransferRequest, VerificationRequest,
    VerifyCodeRequest,
};
use crate::services::session::SessionController;

/// 401 응답 본문에 메시지가 없을 때 사용하는 문구
const SESSION_EXPIRED_MESSAGE: &str = "세션이 만료되었습니다. 다시 로그인해주세요.";

/// 뱅킹 백엔드 호출 인터페이스
///
/// 페이지 흐름은 이 trait에만 의존하므로 테스트에서는 메모리 구현으로 교체합니다.
#[async_trait]
pub trait BankingApi: Send + Sync {
    /// `GET /api/account`
    async fn account_summary(&self) -> ClientResult<AccountSummary>;

    /// `POST /banking/account/send-verification`
    async fn send_verification(&self, request: &VerificationRequest) -> ClientResult<()>;

    /// `POST /banking/account/verify-email`
    ///
    /// 성공 시 백엔드가 보낸 안내 메시지를 돌려줍니다.
    async fn verify_email(&self, request: &VerifyCodeRequest) -> ClientResult<Option<String>>;

    /// `POST /banking/account/create`
    async fn create_account(&self, request: &CreateAccountRequest) -> ClientResult<()>;

    /// `POST /banking/check-account`
    ///
    /// 백엔드가 계좌 정보를 생략하면 빈 [`AccountInfo`]를 돌려줍니다.
    async fn lookup_account(
        &self,
        request: &AccountLookupRequest,
        email_hash: &str,
    ) -> ClientResult<AccountInfo>;

    /// `POST /banking/transfer`
    async fn transfer(
        &self,
        request: &TransferRequest,
        email_hash: &str,
    ) -> ClientResult<TransferReceipt>;
}

/// 실패 메시지가 세션 문제를 뜻하는지 판단합니다.
fn is_auth_message(message: &str) -> bool {
    message.contains("토큰") || message.starts_with("인증이 필요")
}

/// 상태 코드와 본문을 분류 규칙에 따라 해석합니다.
///
/// `fallback`은 실패 응답에 메시지가 없을 때 사용할 문구입니다.
pub fn interpret_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
    fallback: &str,
) -> ClientResult<ApiResponse<T>> {
    if status == 401 {
        let message = serde_json::from_str::<ApiResponse<Ack>>(body)
            .ok()
            .and_then(|response| response.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string());
        return Err(ClientError::Unauthorized(message));
    }

    if !(200..300).contains(&status) {
        return Err(ClientError::Unavailable(format!("HTTP {}", status)));
    }

    let response: ApiResponse<T> = serde_json::from_str(body)
        .map_err(|e| ClientError::Unavailable(format!("응답 형식 오류: {}", e)))?;

    if response.success {
        return Ok(response);
    }

    let message = response
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    if is_auth_message(&message) {
        Err(ClientError::Unauthorized(message))
    } else {
        Err(ClientError::Rejected(message))
    }
}

/// `reqwest` 기반 구현
pub struct HttpBankingApi {
    client: Client,
    base_url: String,
    session: Arc<SessionController>,
}

impl HttpBankingApi {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionController>) -> Self {
        HttpBankingApi {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    /// `BANKING_API_BASE_URL` 환경 변수의 주소를 사용합니다.
    pub fn from_env(session: Arc<SessionController>) -> Self {
        Self::new(BankingApiConfig::base_url(), session)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(header::ACCEPT, "application/json");

        match self.session.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> ClientResult<ApiResponse<T>> {
        let response = builder.send().await.map_err(|e| {
            warn!("백엔드 요청 실패: {}", e);
            ClientError::Unavailable(format!("요청 실패: {}", e))
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Unavailable(format!("응답 본문 읽기 실패: {}", e)))?;

        debug!("백엔드 응답: HTTP {}", status);

        interpret_response(status, &body, fallback).map_err(|e| {
            warn!("백엔드 요청 거부: {}", e);
            e
        })
    }
}

#[async_trait]
impl BankingApi for HttpBankingApi {
    async fn account_summary(&self) -> ClientResult<AccountSummary> {
        let builder = self.request(Method::GET, routes::ACCOUNT_SUMMARY);
        let response = self
            .execute::<AccountSummary>(builder, "계좌 정보를 불러오는데 실패했습니다.")
            .await?;
        Ok(response.data)
    }

    async fn send_verification(&self, request: &VerificationRequest) -> ClientResult<()> {
        let builder = self
            .request(Method::POST, routes::SEND_VERIFICATION)
            .form(request);
        self.execute::<Ack>(builder, "인증번호 발송에 실패했습니다.").await?;
        Ok(())
    }

    async fn verify_email(&self, request: &VerifyCodeRequest) -> ClientResult<Option<String>> {
        let builder = self.request(Method::POST, routes::VERIFY_EMAIL).form(request);
        let response = self
            .execute::<Ack>(builder, "인증번호 확인에 실패했습니다.")
            .await?;
        Ok(response.message)
    }

    async fn create_account(&self, request: &CreateAccountRequest) -> ClientResult<()> {
        let builder = self
            .request(Method::POST, routes::CREATE_ACCOUNT)
            .form(&request.form_fields());
        self.execute::<Ack>(builder, "계좌 생성에 실패했습니다.").await?;
        Ok(())
    }

    async fn lookup_account(
        &self,
        request: &AccountLookupRequest,
        email_hash: &str,
    ) -> ClientResult<AccountInfo> {
        let builder = self
            .request(Method::POST, routes::CHECK_ACCOUNT)
            .header(routes::EMAIL_HASH_HEADER, email_hash)
            .form(request);
        let response = self
            .execute::<AccountLookup>(builder, "계좌 조회에 실패했습니다.")
            .await?;
        Ok(response.data.account_info.unwrap_or_default())
    }

    async fn transfer(
        &self,
        request: &TransferRequest,
        email_hash: &str,
    ) -> ClientResult<TransferReceipt> {
        let builder = self
            .request(Method::POST, routes::TRANSFER)
            .header(routes::EMAIL_HASH_HEADER, email_hash)
            .form(request);
        let response = self
            .execute::<TransferReceipt>(builder, "이체에 실패했습니다.")
            .await?;
        Ok(response.data)
    }
}
