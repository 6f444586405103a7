//! 숫자 키패드 비밀번호 입력
//!
//! 계좌 비밀번호는 화면 키패드로만 입력받습니다. 입력 칸에는 자릿수만
//! `● ● ○ ○` 형태로 표시됩니다.

use crate::core::errors::{ClientError, ClientResult};

/// 계좌 비밀번호 자릿수
pub const PIN_LENGTH: usize = 4;

/// 자릿수가 모자랄 때의 안내
pub const PIN_INCOMPLETE_MESSAGE: &str = "4자리 비밀번호를 입력해주세요.";

/// 키패드 입력 상태
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinPad {
    digits: String,
}

impl PinPad {
    pub fn new() -> Self {
        Self::default()
    }

    /// 숫자 하나를 추가합니다.
    ///
    /// 숫자가 아니거나 이미 4자리이면 무시하고 false를 돌려줍니다.
    pub fn push(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() || self.digits.len() >= PIN_LENGTH {
            return false;
        }
        self.digits.push(digit);
        true
    }

    /// 마지막 숫자를 지웁니다.
    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() == PIN_LENGTH
    }

    /// 확정 전 입력값 (자릿수 검증은 호출한 쪽 폼이 담당)
    pub fn value(&self) -> &str {
        &self.digits
    }

    /// 입력을 확정하고 비밀번호를 돌려줍니다.
    ///
    /// 정확히 4자리가 아니면 입력을 그대로 둔 채 검증 에러를 돌려줍니다.
    pub fn confirm(&self) -> ClientResult<String> {
        if !self.is_complete() {
            return Err(ClientError::Validation(PIN_INCOMPLETE_MESSAGE.to_string()));
        }
        Ok(self.digits.clone())
    }

    /// 입력된 자릿수 표시 (`● ● ○ ○`)
    pub fn masked(&self) -> String {
        (0..PIN_LENGTH)
            .map(|i| if i < self.digits.len() { "●" } else { "○" })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
