//! 로그인 상태에 따른 화면 모드와 사용자 표시 정보
//!
//! 화면 모드는 저장된 세션 토큰만으로 결정되는 순수 함수의 결과이며,
//! 별도로 저장되지 않습니다.

use serde::Serialize;
use crate::domain::models::token::Claims;

/// 이름으로 사용할 클레임 후보 (앞쪽이 우선)
pub const NAME_CLAIMS: [&str; 5] = ["username", "name", "given_name", "nickname", "sub"];

/// 이메일로 사용할 클레임 후보 (앞쪽이 우선)
pub const EMAIL_CLAIMS: [&str; 3] = ["email", "userEmail", "sub"];

/// 이름 클레임이 하나도 없을 때 표시할 값
pub const FALLBACK_NAME: &str = "사용자";

/// 이메일 클레임이 하나도 없을 때 표시할 값
pub const FALLBACK_EMAIL: &str = "이메일 정보 없음";

/// 화면 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewMode {
    Anonymous,
    Authenticated,
}

/// 화면에 표시할 사용자 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDisplay {
    pub name: String,
    pub email: String,
}

impl UserDisplay {
    /// 클레임에서 이름과 이메일을 추출합니다.
    ///
    /// 여러 인증 제공자의 클레임 형태를 모두 받아들이기 위해 후보 이름을
    /// 순서대로 시도하고, 하나도 없으면 고정된 대체 문자열을 사용합니다.
    pub fn from_claims(claims: &Claims) -> Self {
        UserDisplay {
            name: claims
                .first_of(&NAME_CLAIMS)
                .unwrap_or_else(|| FALLBACK_NAME.to_string()),
            email: claims
                .first_of(&EMAIL_CLAIMS)
                .unwrap_or_else(|| FALLBACK_EMAIL.to_string()),
        }
    }

    /// 헤더 인사말에 쓰는 존칭 표기 (`홍길동님`)
    pub fn greeting(&self) -> String {
        format!("{}님", self.name)
    }
}

/// 세션 평가 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode")]
pub enum SessionView {
    Anonymous,
    Authenticated(UserDisplay),
}

impl SessionView {
    pub fn mode(&self) -> ViewMode {
        match self {
            SessionView::Anonymous => ViewMode::Anonymous,
            SessionView::Authenticated(_) => ViewMode::Authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionView::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserDisplay> {
        match self {
            SessionView::Authenticated(user) => Some(user),
            SessionView::Anonymous => None,
        }
    }
}
