//! 테스트용 메모리 백엔드

use std::sync::Mutex;
use async_trait::async_trait;
use crate::core::errors::{ClientError, ClientResult};
use crate::domain::dto::banking::{
    AccountInfo, AccountLookupRequest, AccountSummary, CreateAccountRequest, TransferReceipt,
    TransferRequest, VerificationRequest, VerifyCodeRequest,
};
use super::BankingApi;

/// 호출 기록과 미리 정해둔 응답을 가진 백엔드
pub struct MockBankingApi {
    pub summary: Mutex<ClientResult<AccountSummary>>,
    pub send_result: Mutex<ClientResult<()>>,
    pub verify_result: Mutex<ClientResult<Option<String>>>,
    pub create_result: Mutex<ClientResult<()>>,
    pub lookup_result: Mutex<ClientResult<AccountInfo>>,
    pub transfer_result: Mutex<ClientResult<TransferReceipt>>,
    pub calls: Mutex<Vec<String>>,
    pub last_transfer: Mutex<Option<(TransferRequest, String)>>,
    pub last_create: Mutex<Option<CreateAccountRequest>>,
}

impl MockBankingApi {
    pub fn new() -> Self {
        MockBankingApi {
            summary: Mutex::new(Ok(AccountSummary::default())),
            send_result: Mutex::new(Ok(())),
            verify_result: Mutex::new(Ok(Some("이메일 인증이 완료되었습니다.".to_string()))),
            create_result: Mutex::new(Ok(())),
            lookup_result: Mutex::new(Ok(AccountInfo::default())),
            transfer_result: Mutex::new(Ok(TransferReceipt::default())),
            calls: Mutex::new(Vec::new()),
            last_transfer: Mutex::new(None),
            last_create: Mutex::new(None),
        }
    }

    pub fn with_summary(self, summary: ClientResult<AccountSummary>) -> Self {
        *self.summary.lock().unwrap() = summary;
        self
    }

    pub fn with_lookup(self, result: ClientResult<AccountInfo>) -> Self {
        *self.lookup_result.lock().unwrap() = result;
        self
    }

    pub fn with_transfer(self, result: ClientResult<TransferReceipt>) -> Self {
        *self.transfer_result.lock().unwrap() = result;
        self
    }

    pub fn with_send(self, result: ClientResult<()>) -> Self {
        *self.send_result.lock().unwrap() = result;
        self
    }

    pub fn with_verify(self, result: ClientResult<Option<String>>) -> Self {
        *self.verify_result.lock().unwrap() = result;
        self
    }

    pub fn with_create(self, result: ClientResult<()>) -> Self {
        *self.create_result.lock().unwrap() = result;
        self
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == name).count()
    }

    fn record<T: Clone>(&self, name: &str, result: &Mutex<ClientResult<T>>) -> ClientResult<T> {
        self.calls.lock().unwrap().push(name.to_string());
        result
            .lock()
            .map_err(|_| ClientError::Internal("mock lock".to_string()))?
            .clone()
    }
}

#[async_trait]
impl BankingApi for MockBankingApi {
    async fn account_summary(&self) -> ClientResult<AccountSummary> {
        self.record("account_summary", &self.summary)
    }

    async fn send_verification(&self, _request: &VerificationRequest) -> ClientResult<()> {
        self.record("send_verification", &self.send_result)
    }

    async fn verify_email(&self, _request: &VerifyCodeRequest) -> ClientResult<Option<String>> {
        self.record("verify_email", &self.verify_result)
    }

    async fn create_account(&self, request: &CreateAccountRequest) -> ClientResult<()> {
        *self.last_create.lock().unwrap() = Some(request.clone());
        self.record("create_account", &self.create_result)
    }

    async fn lookup_account(
        &self,
        _request: &AccountLookupRequest,
        _email_hash: &str,
    ) -> ClientResult<AccountInfo> {
        self.record("lookup_account", &self.lookup_result)
    }

    async fn transfer(
        &self,
        request: &TransferRequest,
        email_hash: &str,
    ) -> ClientResult<TransferReceipt> {
        *self.last_transfer.lock().unwrap() = Some((request.clone(), email_hash.to_string()));
        self.record("transfer", &self.transfer_result)
    }
}
