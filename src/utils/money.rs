//! # 금액 및 계좌번호 표시 유틸리티
//!
//! 원화 금액은 정수(원 단위)로 다룹니다. 입력 칸의 천 단위 쉼표 처리,
//! 잔액 표시(`₩150,000`), 계좌번호 구간 표시(`110-1234-56789`)를 제공합니다.

use serde::Deserialize;
use serde_json::Value;
use crate::utils::string_utils::digits_only;

/// 숫자 문자열에 천 단위 쉼표를 넣습니다 (`"1234567"` → `"1,234,567"`).
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// 금액 입력값을 정리합니다.
///
/// 숫자 이외의 문자를 지우고 천 단위 쉼표를 넣습니다.
/// 입력 중인 값이므로 앞자리 0도 그대로 둡니다.
pub fn format_amount(input: &str) -> String {
    group_thousands(&digits_only(input))
}

/// 쉼표가 포함된 금액 입력값을 원 단위 정수로 읽습니다.
///
/// 숫자가 하나도 없거나 범위를 넘으면 None입니다.
pub fn parse_amount(input: &str) -> Option<u64> {
    let digits = digits_only(input);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// 잔액 표시 (`₩150,000`, 음수는 `-₩3,000`)
pub fn format_won(amount: i64) -> String {
    let grouped = group_thousands(&amount.unsigned_abs().to_string());
    if amount < 0 {
        format!("-₩{}", grouped)
    } else {
        format!("₩{}", grouped)
    }
}

/// 계좌번호 표시
///
/// 12자리 계좌번호는 3-4-5 구간으로 나누고, 그 외 길이는 숫자만 남겨 그대로 둡니다.
pub fn format_account_number(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.len() == 12 {
        format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..])
    } else {
        digits
    }
}

/// 백엔드가 내려주는 금액 필드 deserializer
///
/// 금액은 정수, 소수(`150000.00`), 문자열(`"150,000"`) 중 어느 형태로든 올 수 있습니다.
/// 원 단위 아래는 버립니다.
pub fn deserialize_optional_won<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid amount: {}", n))),
        Value::String(s) => {
            let cleaned = s.replace(',', "");
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                return Ok(None);
            }
            cleaned
                .parse::<f64>()
                .map(|f| Some(f.trunc() as i64))
                .map_err(|_| D::Error::custom(format!("invalid amount: {}", s)))
        }
        other => Err(D::Error::custom(format!("invalid amount: {}", other))),
    }
}
