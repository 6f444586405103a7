//! 뱅킹 백엔드 응답 DTO
//!
//! 모든 응답은 `success` 플래그와 실패 시 `message`를 담은 JSON 객체입니다.
//! 엔드포인트별 데이터 필드는 같은 객체에 평평하게 섞여 있으므로
//! [`ApiResponse`]가 `#[serde(flatten)]`으로 나머지 필드를 받습니다.
//!
//! ```json
//! {
//!   "success": true,
//!   "userName": "홍길동",
//!   "userEmailHash": "9f86d081884c7d65",
//!   "hasAccount": true,
//!   "accountNumber": "110123456789",
//!   "balance": 150000,
//!   "hasSafebox": false,
//!   "safeboxBalance": 0
//! }
//! ```

use serde::Deserialize;
use crate::utils::money::deserialize_optional_won;
use crate::utils::string_utils::deserialize_optional_string;

/// 공통 응답 래퍼
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

/// 데이터 필드가 없는 응답 (메시지만 전달)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Ack {}

/// `/api/account` 응답 데이터
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountSummary {
    #[serde(deserialize_with = "deserialize_optional_string")]
    pub user_name: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_string")]
    pub user_email_hash: Option<String>,
    pub has_account: bool,
    pub account_number: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_won")]
    pub balance: Option<i64>,
    pub has_safebox: bool,
    pub safebox_number: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_won")]
    pub safebox_balance: Option<i64>,
}

/// 계좌 조회 결과의 계좌 정보
///
/// 백엔드는 데이터베이스 컬럼명을 그대로 대문자 키로 내려줍니다.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AccountInfo {
    #[serde(rename = "USER_NAME", alias = "userName", default)]
    pub user_name: Option<String>,
    #[serde(rename = "ACCOUNT_NUMBER", alias = "accountNumber", default)]
    pub account_number: Option<String>,
}

/// `/banking/check-account` 응답 데이터
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountLookup {
    pub account_info: Option<AccountInfo>,
}

/// `/banking/transfer` 응답 데이터
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferReceipt {
    pub recipient_name: Option<String>,
    pub to_account_number: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_won")]
    pub amount: Option<i64>,
    pub memo: Option<String>,
}
