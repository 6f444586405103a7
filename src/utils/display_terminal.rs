//! 터미널 출력 포맷팅 유틸리티
//!
//! 데모 바이너리가 세션 상태와 대시보드를 터미널에 보여줄 때 사용하는 함수들입니다.
//! 박스 형태의 제목, 카드 항목, 알림 표시를 시각적으로 표현합니다.

use crate::core::errors::Notice;
use crate::domain::models::session::SessionView;
use crate::services::banking::{AccountCard, Dashboard, SafeboxCard};
use crate::services::session::LoginRedirect;

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// Unicode 박스 문자를 사용하여 시각적으로 눈에 띄는 제목을 출력합니다.
/// 텍스트는 자동으로 중앙 정렬됩니다.
///
/// # Examples
///
/// ```rust,ignore
/// use crate::utils::display_terminal::print_boxed_title;
///
/// print_boxed_title("OWW Banking");
/// ```
///
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                   OWW Banking                    ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    // 고정 너비 50칸 사용 (박스 내부 콘텐츠)
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

/// 카드 항목 한 줄을 트리 형태로 출력합니다
///
/// ```text
///    ├─ 계좌번호: 110-1234-56789
/// ```
pub fn print_item(name: &str, value: &str) {
    println!("   ├─ {}: {}", name, value);
}

/// 헤더 영역의 로그인 상태를 출력합니다
pub fn print_session(view: &SessionView) {
    match view {
        SessionView::Authenticated(user) => {
            println!("👤 {} ({})", user.greeting(), user.email);
        }
        SessionView::Anonymous => {
            println!("🔒 로그인하지 않았습니다");
        }
    }
}

/// 로그인 직후 한 번 보여주는 환영 인사
pub fn print_welcome(view: &SessionView) {
    if let Some(user) = view.user() {
        println!();
        print_boxed_title(&format!("🎉 {} 환영합니다", user.greeting()));
    }
}

/// 대시보드 카드를 출력합니다
///
/// ```text
/// 💳 입출금 계좌
///    ├─ 계좌번호: 110-1234-56789
///    ├─ 잔액: ₩150,000
/// 🔐 세이프박스
///    ├─ 세이프박스가 없습니다: /banking/safebox
/// ```
pub fn print_dashboard(dashboard: &Dashboard) {
    println!();
    println!("💳 입출금 계좌");
    match &dashboard.account {
        AccountCard::Open { number, balance } => {
            print_item("계좌번호", number);
            print_item("잔액", balance);
        }
        AccountCard::Missing { action } => {
            print_item("📭 계좌가 없습니다", action);
        }
    }

    println!("🔐 세이프박스");
    match &dashboard.safebox {
        SafeboxCard::Open { number, balance } => {
            if let Some(number) = number {
                print_item("번호", number);
            }
            print_item("잔액", balance);
        }
        SafeboxCard::Missing { action } => {
            print_item("세이프박스가 없습니다", action);
        }
    }
    println!();
}

/// 사용자 알림을 출력합니다
pub fn print_notice(notice: &Notice) {
    let icon = if notice.recoverable { "⚠️" } else { "❌" };
    println!("{} {}", icon, notice.message);
}

/// 로그인 이동 지시를 출력합니다
pub fn print_login_redirect(redirect: &LoginRedirect) {
    print_notice(&redirect.notice);
    println!("   → {}", redirect.location);
}
