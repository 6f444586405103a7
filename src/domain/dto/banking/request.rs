//! 뱅킹 백엔드 요청 DTO
//!
//! 모든 요청은 `application/x-www-form-urlencoded` 본문으로 전송됩니다.
//! 계좌 개설 요청은 전송 전에 `validator`로 검증합니다.

use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};
use crate::core::errors::ClientError;

/// 이메일 인증번호 발송 요청
#[derive(Debug, Clone, Serialize, Validate)]
pub struct VerificationRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력하세요."))]
    pub email: String,
}

/// 이메일 인증번호 확인 요청
#[derive(Debug, Clone, Serialize, Validate)]
pub struct VerifyCodeRequest {
    pub email: String,
    #[validate(length(equal = 6, message = "6자리 인증번호를 입력하세요."))]
    pub code: String,
}

/// 계좌 개설 요청
///
/// 검증 실패 시에는 화면의 입력 순서(이름 → 이메일 → 인증번호 → 비밀번호 → 약관)대로
/// 첫 번째 오류만 사용자에게 보여줍니다.
#[derive(Debug, Clone, Validate)]
pub struct CreateAccountRequest {
    #[validate(custom(function = "validate_not_blank", message = "이름을 입력해주세요."))]
    pub name: String,

    #[validate(email(message = "유효한 이메일을 입력해주세요."))]
    pub email: String,

    /// 계좌 비밀번호 (숫자 4자리)
    #[validate(custom(function = "validate_pin", message = "비밀번호 4자리를 입력해주세요."))]
    pub password: String,

    #[validate(length(equal = 6, message = "이메일 인증번호 6자리를 입력해주세요."))]
    pub email_code: String,

    /// 약관 동의 여부 (전송하지 않음)
    #[validate(custom(
        function = "validate_agreed",
        message = "약관에 동의해야 계좌를 개설할 수 있습니다."
    ))]
    pub agreed_to_terms: bool,
}

/// 화면 입력 순서
const CREATE_ACCOUNT_FIELD_ORDER: [&str; 5] =
    ["name", "email", "email_code", "password", "agreed_to_terms"];

impl CreateAccountRequest {
    /// 검증 후 첫 번째 오류를 `ClientError::Validation`으로 돌려줍니다.
    pub fn check(&self) -> Result<(), ClientError> {
        self.validate()
            .map_err(|errors| first_error(&errors, &CREATE_ACCOUNT_FIELD_ORDER))
    }

    /// 폼 본문 필드 (약관 동의 여부는 전송하지 않습니다)
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("name", self.name.trim()),
            ("email", &self.email),
            ("password", &self.password),
            ("emailCode", &self.email_code),
        ]
    }
}

/// 받는 계좌 조회 요청
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLookupRequest {
    pub account_number: String,
}

/// 이체 요청
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub recipient_name: String,
    pub to_account_number: String,
    pub amount: u64,
    pub memo: String,
    pub password: String,
}

/// `field_order` 순서대로 첫 번째 검증 오류 메시지를 찾습니다.
pub fn first_error(errors: &ValidationErrors, field_order: &[&str]) -> ClientError {
    let fields = errors.field_errors();

    let message = field_order
        .iter()
        .filter_map(|field| fields.get(*field))
        .filter_map(|list| list.first())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string());

    ClientError::Validation(message)
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// 숫자 4자리 비밀번호 검증
pub fn validate_pin(value: &str) -> Result<(), ValidationError> {
    if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("invalid_pin"));
    }
    Ok(())
}

fn validate_agreed(agreed: &bool) -> Result<(), ValidationError> {
    if !*agreed {
        return Err(ValidationError::new("terms_not_agreed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateAccountRequest {
        CreateAccountRequest {
            name: "홍길동".to_string(),
            email: "hong@example.com".to_string(),
            password: "1234".to_string(),
            email_code: "987654".to_string(),
            agreed_to_terms: true,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().check().is_ok());
    }

    #[test]
    fn test_first_error_follows_field_order() {
        let request = CreateAccountRequest {
            name: "  ".to_string(),
            email: "not-an-email".to_string(),
            agreed_to_terms: false,
            ..valid_request()
        };

        assert_eq!(
            request.check(),
            Err(ClientError::Validation("이름을 입력해주세요.".to_string()))
        );
    }

    #[test]
    fn test_each_rule_reports_its_message() {
        let cases = [
            (CreateAccountRequest { email: "nope".into(), ..valid_request() }, "유효한 이메일을 입력해주세요."),
            (CreateAccountRequest { email_code: "123".into(), ..valid_request() }, "이메일 인증번호 6자리를 입력해주세요."),
            (CreateAccountRequest { password: "12a4".into(), ..valid_request() }, "비밀번호 4자리를 입력해주세요."),
            (CreateAccountRequest { agreed_to_terms: false, ..valid_request() }, "약관에 동의해야 계좌를 개설할 수 있습니다."),
        ];

        for (request, expected) in cases {
            assert_eq!(request.check(), Err(ClientError::Validation(expected.to_string())));
        }
    }

    #[test]
    fn test_form_fields_skip_agreement() {
        let request = CreateAccountRequest { name: " 홍길동 ".into(), ..valid_request() };
        let fields = request.form_fields();

        assert_eq!(fields[0], ("name", "홍길동"));
        assert_eq!(fields[3], ("emailCode", "987654"));
        assert!(fields.iter().all(|(key, _)| !key.contains("agree")));
    }

    #[test]
    fn test_verification_request_validation() {
        assert!(VerificationRequest { email: "a@b.co".into() }.validate().is_ok());
        assert!(VerificationRequest { email: "ab.co".into() }.validate().is_err());
        assert!(VerifyCodeRequest { email: "a@b.co".into(), code: "12345".into() }.validate().is_err());
    }
}
