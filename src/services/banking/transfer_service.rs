//! 계좌 이체 흐름
//!
//! 받는 계좌 조회 → 금액/메모/비밀번호 입력 → 확인 → 전송 → 결과 화면 이동
//! 순서로 진행됩니다. 전송에 실패하면 확인 단계에 머물러 다시 시도할 수 있습니다.
//! 확인 후 입력값을 바꾸면 입력 단계로 돌아가며, 다시 확인해야 전송할 수 있습니다.
//! 완료된 흐름은 더 이상 진행되지 않으며 새 이체는 새 흐름으로 시작합니다.
//!
//! ```text
//! SelectRecipient ──조회 성공──▶ EnterDetails ──review()──▶ Confirming ──submit() 성공──▶ Completed
//!        ▲                          │    ▲                      │
//!        └──── clear_recipient() ───┘    └── cancel_review() ───┘
//! ```

use std::sync::Arc;
use log::{debug, info};
use serde::Serialize;
use crate::config::routes;
use crate::core::errors::{ClientError, ClientResult};
use crate::domain::dto::banking::{AccountInfo, AccountLookupRequest, TransferRequest};
use crate::services::session::{GuardOutcome, SessionController};
use crate::utils::money::{format_account_number, format_amount, parse_amount};
use crate::utils::string_utils::{
    build_query, clean_optional_string, digits_only, validate_required_string,
};
use crate::widgets::PinPad;
use super::BankingApi;

pub const UNKNOWN_RECIPIENT: &str = "알 수 없음";
pub const EMPTY_MEMO: &str = "메모 없음";
const MISSING_EMAIL_HASH: &str = "인증 정보가 없습니다. 새로고침 후 다시 시도해주세요.";

/// 이체 진행 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferStep {
    SelectRecipient,
    EnterDetails,
    Confirming,
    Completed,
}

/// 조회로 확인된 받는 계좌
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// 숫자만 남긴 계좌번호
    pub account_number: String,
    pub name: Option<String>,
    /// 화면 표시 (`110-1234-56789 (홍길동)`)
    pub label: String,
}

impl Recipient {
    fn new(entered: String, info: AccountInfo) -> Self {
        let name = clean_optional_string(info.user_name);
        let label = format!(
            "{} ({})",
            format_account_number(&entered),
            name.as_deref().unwrap_or(UNKNOWN_RECIPIENT)
        );
        let account_number = clean_optional_string(info.account_number)
            .map(|n| digits_only(&n))
            .filter(|n| !n.is_empty())
            .unwrap_or(entered);

        Recipient { account_number, name, label }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_RECIPIENT)
    }
}

/// 확인 화면 데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferConfirmation {
    pub account: String,
    pub recipient: String,
    /// 쉼표가 들어간 금액 (`50,000`)
    pub amount: String,
    pub memo: String,
}

/// 이체 흐름 상태
pub struct TransferFlow {
    session: Arc<SessionController>,
    api: Arc<dyn BankingApi>,
    email_hash: Option<String>,
    step: TransferStep,
    recipient: Option<Recipient>,
    amount_input: String,
    memo: String,
    password: Option<String>,
    pin_pad: PinPad,
}

impl TransferFlow {
    /// `email_hash`는 대시보드 요약 응답의 `userEmailHash`입니다.
    pub fn new(
        session: Arc<SessionController>,
        api: Arc<dyn BankingApi>,
        email_hash: Option<String>,
    ) -> Self {
        TransferFlow {
            session,
            api,
            email_hash: clean_optional_string(email_hash),
            step: TransferStep::SelectRecipient,
            recipient: None,
            amount_input: String::new(),
            memo: String::new(),
            password: None,
            pin_pad: PinPad::new(),
        }
    }

    pub fn step(&self) -> TransferStep {
        self.step
    }

    pub fn recipient(&self) -> Option<&Recipient> {
        self.recipient.as_ref()
    }

    /// 받는 계좌를 조회합니다.
    ///
    /// 입력에서 숫자만 남겨 조회하며, 성공하면 금액 입력 단계로 넘어갑니다.
    pub async fn lookup_recipient(&mut self, input: &str) -> GuardOutcome<ClientResult<Recipient>> {
        let account_number = digits_only(input);
        let email_hash = self.email_hash.clone();
        let api = self.api.clone();

        let outcome = self
            .session
            .guard_request(|_| async move {
                let account_number =
                    validate_required_string(&account_number, "계좌번호를 입력해주세요.")?;
                let email_hash = email_hash
                    .ok_or_else(|| ClientError::Validation(MISSING_EMAIL_HASH.to_string()))?;

                let request = AccountLookupRequest {
                    account_number: account_number.clone(),
                };
                let info = api.lookup_account(&request, &email_hash).await?;
                Ok(Recipient::new(account_number, info))
            })
            .await;

        if let GuardOutcome::Proceeded(Ok(recipient)) = &outcome {
            debug!("받는 계좌 확인: {}", recipient.label);
            self.recipient = Some(recipient.clone());
            self.move_to(TransferStep::EnterDetails);
        }
        outcome
    }

    /// 선택한 받는 계좌를 지우고 조회 단계로 돌아갑니다.
    pub fn clear_recipient(&mut self) {
        self.recipient = None;
        self.move_to(TransferStep::SelectRecipient);
    }

    /// 완료된 흐름의 단계는 바꾸지 않습니다.
    fn move_to(&mut self, step: TransferStep) {
        if self.step != TransferStep::Completed {
            self.step = step;
        }
    }

    /// 확인한 내용이 바뀌었으므로 입력 단계로 돌아갑니다.
    fn invalidate_review(&mut self) {
        if self.step == TransferStep::Confirming {
            self.step = TransferStep::EnterDetails;
        }
    }

    /// 금액 입력값을 정리해 저장하고 표시할 값을 돌려줍니다.
    pub fn set_amount(&mut self, input: &str) -> &str {
        self.amount_input = format_amount(input);
        self.invalidate_review();
        &self.amount_input
    }

    /// 원 단위 금액
    pub fn amount(&self) -> Option<u64> {
        parse_amount(&self.amount_input)
    }

    pub fn set_memo(&mut self, memo: &str) {
        self.memo = memo.to_string();
        self.invalidate_review();
    }

    /// 비밀번호 입력을 시작합니다. 이전 키패드 입력은 지워집니다.
    pub fn open_pin_pad(&mut self) -> &mut PinPad {
        self.pin_pad.clear();
        &mut self.pin_pad
    }

    /// 키패드 입력을 계좌 비밀번호로 확정합니다.
    pub fn confirm_pin(&mut self) -> ClientResult<()> {
        let pin = self.pin_pad.confirm()?;
        self.password = Some(pin);
        self.invalidate_review();
        Ok(())
    }

    /// 받는 계좌, 0보다 큰 금액, 4자리 비밀번호가 모두 있는지 여부
    pub fn can_transfer(&self) -> bool {
        self.recipient.is_some()
            && self.amount().is_some_and(|amount| amount > 0)
            && self.password.as_ref().is_some_and(|p| p.len() == 4)
    }

    /// 확인 화면을 만듭니다.
    pub fn review(&mut self) -> ClientResult<TransferConfirmation> {
        if self.step == TransferStep::Completed {
            return Err(ClientError::NotReady("이미 완료된 이체입니다.".to_string()));
        }
        if !self.can_transfer() {
            return Err(ClientError::NotReady(
                "받는 계좌, 이체 금액, 비밀번호를 모두 입력해주세요.".to_string(),
            ));
        }

        let recipient = self.recipient.as_ref();
        let confirmation = TransferConfirmation {
            account: recipient
                .map(|r| r.label.clone())
                .unwrap_or_else(|| "입력된 계좌 없음".to_string()),
            recipient: recipient
                .map(|r| r.display_name().to_string())
                .unwrap_or_else(|| UNKNOWN_RECIPIENT.to_string()),
            amount: self.amount_input.clone(),
            memo: clean_optional_string(Some(self.memo.clone()))
                .unwrap_or_else(|| EMPTY_MEMO.to_string()),
        };

        self.step = TransferStep::Confirming;
        Ok(confirmation)
    }

    /// 확인 화면을 닫고 입력 단계로 돌아갑니다.
    pub fn cancel_review(&mut self) {
        self.invalidate_review();
    }

    /// 이체를 전송하고 결과 화면 주소를 돌려줍니다.
    ///
    /// 결과 화면 파라미터는 백엔드 응답 값을 우선하고, 없으면 입력값을 사용합니다.
    /// 실패하면 확인 단계에 머뭅니다.
    pub async fn submit(&mut self) -> GuardOutcome<ClientResult<String>> {
        let prepared = self.prepare_request();
        let email_hash = self.email_hash.clone();
        let api = self.api.clone();

        let outcome = self
            .session
            .guard_request(|_| async move {
                let request = prepared?;
                let email_hash = email_hash
                    .ok_or_else(|| ClientError::Validation(MISSING_EMAIL_HASH.to_string()))?;

                let receipt = api.transfer(&request, &email_hash).await?;
                info!("이체 완료: {}원", request.amount);

                let amount = receipt
                    .amount
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| request.amount.to_string());
                let query = build_query(&[
                    (
                        "recipientName",
                        clean_optional_string(receipt.recipient_name).unwrap_or(request.recipient_name),
                    ),
                    (
                        "toAccountNumber",
                        clean_optional_string(receipt.to_account_number)
                            .unwrap_or(request.to_account_number),
                    ),
                    ("amount", amount),
                    ("memo", clean_optional_string(receipt.memo).unwrap_or(request.memo)),
                ]);

                Ok(format!("{}?{}", routes::TRANSFER_RESULT_PAGE, query))
            })
            .await;

        if let GuardOutcome::Proceeded(Ok(_)) = &outcome {
            self.step = TransferStep::Completed;
        }
        outcome
    }

    fn prepare_request(&self) -> ClientResult<TransferRequest> {
        match self.step {
            TransferStep::Confirming => {}
            TransferStep::Completed => {
                return Err(ClientError::NotReady("이미 완료된 이체입니다.".to_string()));
            }
            _ => {
                return Err(ClientError::NotReady("이체 내용을 먼저 확인해주세요.".to_string()));
            }
        }
        if !self.can_transfer() {
            return Err(ClientError::NotReady("이체 정보가 부족합니다.".to_string()));
        }

        let (Some(recipient), Some(amount), Some(password)) =
            (self.recipient.as_ref(), self.amount(), self.password.as_ref())
        else {
            return Err(ClientError::NotReady("이체 정보가 부족합니다.".to_string()));
        };

        Ok(TransferRequest {
            recipient_name: recipient.name.clone().unwrap_or_default(),
            to_account_number: recipient.account_number.clone(),
            amount,
            memo: self.memo.trim().to_string(),
            password: password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionSettings;
    use crate::core::clock::FixedClock;
    use crate::domain::dto::banking::TransferReceipt;
    use crate::services::banking::mock::MockBankingApi;
    use crate::storage::{MemoryTokenStore, TokenStore};
    use crate::test_support::make_token;
    use crate::utils::string_utils::query_param;
    use serde_json::json;

    fn session(logged_in: bool) -> Arc<SessionController> {
        let store = Arc::new(MemoryTokenStore::new());
        if logged_in {
            let token = make_token(json!({ "username": "alice", "email": "a@x.io" }));
            store.set("jwt-token", &token, None).unwrap();
        }
        Arc::new(SessionController::with_clock(
            store,
            Arc::new(FixedClock::at_timestamp(1_700_000_000)),
            SessionSettings::default(),
        ))
    }

    fn kim() -> AccountInfo {
        AccountInfo {
            user_name: Some("김영희".to_string()),
            account_number: Some("110987654321".to_string()),
        }
    }

    fn enter_pin(flow: &mut TransferFlow, pin: &str) {
        let pad = flow.open_pin_pad();
        for digit in pin.chars() {
            pad.push(digit);
        }
        flow.confirm_pin().unwrap();
    }

    async fn ready_flow(api: Arc<MockBankingApi>) -> TransferFlow {
        let mut flow = TransferFlow::new(session(true), api, Some("hash-1".to_string()));
        flow.lookup_recipient("110-9876-54321").await.into_result().unwrap().unwrap();
        flow.set_amount("50000");
        flow.set_memo("점심 값");
        enter_pin(&mut flow, "1234");
        flow
    }

    #[tokio::test]
    async fn test_lookup_sets_recipient_label() {
        let api = Arc::new(MockBankingApi::new().with_lookup(Ok(kim())));
        let mut flow = TransferFlow::new(session(true), api, Some("hash-1".to_string()));

        let recipient = flow.lookup_recipient("1109876 54321").await.into_result().unwrap().unwrap();

        assert_eq!(recipient.label, "110-9876-54321 (김영희)");
        assert_eq!(recipient.account_number, "110987654321");
        assert_eq!(flow.step(), TransferStep::EnterDetails);
    }

    #[tokio::test]
    async fn test_lookup_without_name_uses_placeholder() {
        let api = Arc::new(MockBankingApi::new());
        let mut flow = TransferFlow::new(session(true), api, Some("hash-1".to_string()));

        let recipient = flow.lookup_recipient("12345").await.into_result().unwrap().unwrap();
        assert_eq!(recipient.label, "12345 (알 수 없음)");
    }

    #[tokio::test]
    async fn test_lookup_validation() {
        let api = Arc::new(MockBankingApi::new());
        let mut flow = TransferFlow::new(session(true), api.clone(), Some("hash-1".to_string()));

        let outcome = flow.lookup_recipient("계좌-").await;
        assert_eq!(
            outcome,
            GuardOutcome::Proceeded(Err(ClientError::Validation("계좌번호를 입력해주세요.".to_string())))
        );

        let mut no_hash = TransferFlow::new(session(true), api.clone(), None);
        assert!(matches!(
            no_hash.lookup_recipient("110987654321").await,
            GuardOutcome::Proceeded(Err(ClientError::Validation(_)))
        ));
        assert_eq!(api.call_count("lookup_account"), 0);
        assert!(flow.recipient().is_none());
    }

    #[tokio::test]
    async fn test_lookup_rejection_keeps_selection_step() {
        let api = Arc::new(MockBankingApi::new().with_lookup(Err(ClientError::Rejected(
            "존재하지 않는 계좌번호입니다.".to_string(),
        ))));
        let mut flow = TransferFlow::new(session(true), api, Some("hash-1".to_string()));

        assert!(matches!(
            flow.lookup_recipient("110987654321").await,
            GuardOutcome::Proceeded(Err(ClientError::Rejected(_)))
        ));
        assert_eq!(flow.step(), TransferStep::SelectRecipient);
    }

    #[tokio::test]
    async fn test_can_transfer_requires_all_inputs() {
        let api = Arc::new(MockBankingApi::new().with_lookup(Ok(kim())));
        let mut flow = TransferFlow::new(session(true), api, Some("hash-1".to_string()));
        assert!(!flow.can_transfer());

        flow.lookup_recipient("110987654321").await;
        assert_eq!(flow.set_amount("1234567"), "1,234,567");
        assert!(!flow.can_transfer());

        enter_pin(&mut flow, "0000");
        assert!(flow.can_transfer());

        flow.set_amount("0");
        assert!(!flow.can_transfer());
        assert!(matches!(flow.review(), Err(ClientError::NotReady(_))));

        flow.set_amount("1000");
        flow.clear_recipient();
        assert!(!flow.can_transfer());
        assert_eq!(flow.step(), TransferStep::SelectRecipient);
    }

    #[tokio::test]
    async fn test_incomplete_pin_is_not_stored() {
        let api = Arc::new(MockBankingApi::new());
        let mut flow = TransferFlow::new(session(true), api, Some("hash-1".to_string()));

        flow.open_pin_pad().push('1');
        assert!(matches!(flow.confirm_pin(), Err(ClientError::Validation(_))));
        assert!(!flow.can_transfer());
    }

    #[tokio::test]
    async fn test_review_builds_confirmation() {
        let api = Arc::new(MockBankingApi::new().with_lookup(Ok(kim())));
        let mut flow = ready_flow(api).await;

        let confirmation = flow.review().unwrap();
        assert_eq!(confirmation.account, "110-9876-54321 (김영희)");
        assert_eq!(confirmation.recipient, "김영희");
        assert_eq!(confirmation.amount, "50,000");
        assert_eq!(confirmation.memo, "점심 값");
        assert_eq!(flow.step(), TransferStep::Confirming);

        flow.set_memo("  ");
        assert_eq!(flow.review().unwrap().memo, EMPTY_MEMO);

        flow.cancel_review();
        assert_eq!(flow.step(), TransferStep::EnterDetails);
    }

    #[tokio::test]
    async fn test_submit_requires_review() {
        let api = Arc::new(MockBankingApi::new().with_lookup(Ok(kim())));
        let mut flow = ready_flow(api.clone()).await;

        assert!(matches!(
            flow.submit().await,
            GuardOutcome::Proceeded(Err(ClientError::NotReady(_)))
        ));
        assert_eq!(api.call_count("transfer"), 0);
    }

    #[tokio::test]
    async fn test_submit_redirects_with_local_fallbacks() {
        let api = Arc::new(MockBankingApi::new().with_lookup(Ok(kim())));
        let mut flow = ready_flow(api.clone()).await;
        flow.review().unwrap();

        let location = flow.submit().await.into_result().unwrap().unwrap();

        assert!(location.starts_with("/banking/transfer_3?"));
        let query = location.split_once('?').unwrap().1;
        assert_eq!(query_param(query, "recipientName").as_deref(), Some("김영희"));
        assert_eq!(query_param(query, "toAccountNumber").as_deref(), Some("110987654321"));
        assert_eq!(query_param(query, "amount").as_deref(), Some("50000"));
        assert_eq!(query_param(query, "memo").as_deref(), Some("점심 값"));
        assert_eq!(flow.step(), TransferStep::Completed);

        let (request, hash) = api.last_transfer.lock().unwrap().clone().unwrap();
        assert_eq!(hash, "hash-1");
        assert_eq!(request.password, "1234");
        assert_eq!(request.amount, 50_000);
    }

    #[tokio::test]
    async fn test_submit_prefers_backend_echo() {
        let receipt = TransferReceipt {
            recipient_name: Some("김영희(확인)".to_string()),
            to_account_number: None,
            amount: Some(49_000),
            memo: None,
        };
        let api = Arc::new(MockBankingApi::new().with_lookup(Ok(kim())).with_transfer(Ok(receipt)));
        let mut flow = ready_flow(api).await;
        flow.review().unwrap();

        let location = flow.submit().await.into_result().unwrap().unwrap();
        let query = location.split_once('?').unwrap().1;

        assert_eq!(query_param(query, "recipientName").as_deref(), Some("김영희(확인)"));
        assert_eq!(query_param(query, "toAccountNumber").as_deref(), Some("110987654321"));
        assert_eq!(query_param(query, "amount").as_deref(), Some("49000"));
    }

    #[tokio::test]
    async fn test_failed_submit_stays_on_confirmation() {
        let api = Arc::new(
            MockBankingApi::new()
                .with_lookup(Ok(kim()))
                .with_transfer(Err(ClientError::Rejected("잔액이 부족합니다.".to_string()))),
        );
        let mut flow = ready_flow(api).await;
        flow.review().unwrap();

        let outcome = flow.submit().await;
        assert_eq!(
            outcome,
            GuardOutcome::Proceeded(Err(ClientError::Rejected("잔액이 부족합니다.".to_string())))
        );
        assert_eq!(flow.step(), TransferStep::Confirming);
    }

    #[tokio::test]
    async fn test_edit_after_review_requires_new_confirmation() {
        let api = Arc::new(MockBankingApi::new().with_lookup(Ok(kim())));
        let mut flow = ready_flow(api.clone()).await;
        assert_eq!(flow.review().unwrap().amount, "50,000");

        flow.set_amount("0");
        assert_eq!(flow.step(), TransferStep::EnterDetails);
        assert!(matches!(
            flow.submit().await,
            GuardOutcome::Proceeded(Err(ClientError::NotReady(_)))
        ));

        flow.set_amount("70000");
        flow.review().unwrap();
        flow.set_memo("저녁 값");
        assert_eq!(flow.step(), TransferStep::EnterDetails);

        flow.review().unwrap();
        enter_pin(&mut flow, "9999");
        assert_eq!(flow.step(), TransferStep::EnterDetails);
        assert_eq!(api.call_count("transfer"), 0);

        flow.review().unwrap();
        flow.submit().await.into_result().unwrap().unwrap();

        let (request, _) = api.last_transfer.lock().unwrap().clone().unwrap();
        assert_eq!(request.amount, 70_000);
        assert_eq!(request.memo, "저녁 값");
        assert_eq!(request.password, "9999");
    }

    #[tokio::test]
    async fn test_completed_transfer_cannot_be_sent_again() {
        let api = Arc::new(MockBankingApi::new().with_lookup(Ok(kim())));
        let mut flow = ready_flow(api.clone()).await;
        flow.review().unwrap();
        flow.submit().await.into_result().unwrap().unwrap();
        assert_eq!(flow.step(), TransferStep::Completed);

        flow.set_amount("50000");
        assert!(matches!(flow.review(), Err(ClientError::NotReady(_))));
        assert!(matches!(
            flow.submit().await,
            GuardOutcome::Proceeded(Err(ClientError::NotReady(_)))
        ));

        flow.clear_recipient();
        flow.lookup_recipient("110987654321").await;
        assert_eq!(flow.step(), TransferStep::Completed);
        assert!(flow.review().is_err());
        assert_eq!(api.call_count("transfer"), 1);
    }

    #[tokio::test]
    async fn test_anonymous_submit_redirects_to_login() {
        let api = Arc::new(MockBankingApi::new().with_lookup(Ok(kim())));
        let mut flow = ready_flow(api.clone()).await;
        flow.review().unwrap();
        flow.session.logout().unwrap();

        assert!(flow.submit().await.is_redirected());
        assert_eq!(api.call_count("transfer"), 0);
    }
}
