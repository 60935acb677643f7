//! 채널 및 요청자 메시지 포맷팅.
//!
//! 모든 함수는 순수 함수이며 I/O가 없습니다. 채널 메시지는 HTML 파싱
//! 모드를 전제로 작성됩니다.

use rust_decimal::Decimal;

use crate::decimal::{display_or, DecimalExt};
use crate::lot::LotCalculation;
use crate::signal::SignalKind;

/// 값이 없는 TP/SL 자리에 들어가는 문구.
pub const NOT_SET: &str = "Not set";

/// 시작 인사 (HTML).
pub const WELCOME_TEXT: &str = "👋 Welcome to <b>Gold Signal Bot</b>!\n\
                                Use /help to see all commands.";

/// 명령어 목록 (HTML).
pub const HELP_TEXT: &str = "📜 <b>Commands</b>\n\
                             /buy - Market Buy\n\
                             /sell - Market Sell\n\
                             /again_buy - Again Buy\n\
                             /again_sell - Again Sell\n\
                             /limit_buy &lt;price&gt;\n\
                             /limit_sell &lt;price&gt;\n\
                             /update_tp &lt;tp&gt;  (optional)\n\
                             /update_sl &lt;sl&gt;  (optional)\n\
                             /update_tpsl &lt;tp&gt; &lt;sl&gt;\n\
                             /calc_lot &lt;balance&gt; &lt;risk%&gt;\n\
                             /set_lot &lt;lot&gt;\n\
                             /morning\n\
                             /psychology\n\
                             /daily\n\
                             /weekly";

/// 발행 완료 응답.
pub const ACK_SENT: &str = "✅ Sent";
/// TP 업데이트 완료 응답.
pub const ACK_TP_UPDATED: &str = "✅ TP Updated";
/// SL 업데이트 완료 응답.
pub const ACK_SL_UPDATED: &str = "✅ SL Updated";
/// TP/SL 업데이트 완료 응답.
pub const ACK_TPSL_UPDATED: &str = "✅ TP/SL Updated";

/// 채널로 발행되는 고정 리포트.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bulletin {
    Morning,
    Psychology,
    Daily,
    Weekly,
}

impl Bulletin {
    /// 채널 메시지 본문.
    pub fn text(&self) -> &'static str {
        match self {
            Bulletin::Morning => "🌅 Morning Message\nHave a disciplined, profitable day!",
            Bulletin::Psychology => "🧠 Psychology Tip\nStick to your plan. Avoid revenge trading.",
            Bulletin::Daily => "📊 Daily Report\n(Write your daily summary here)",
            Bulletin::Weekly => "📈 Weekly Report\n(Write your weekly summary here)",
        }
    }
}

/// 잘못된 인자에 대한 사용법 안내 (`❌ Send: /limit_buy 3375.0`).
pub fn usage_hint(example: &str) -> String {
    format!("❌ Send: {example}")
}

/// 시그널 메시지를 생성합니다.
///
/// 가격과 랏 사이즈는 소수점 둘째 자리로 반올림되어 표시됩니다.
pub fn compose_signal(kind: SignalKind, price: Decimal, lot_size: Decimal) -> String {
    format!(
        "📢 <b>Signal:</b> {}\n\
         💰 <b>Price:</b> {}\n\
         🎯 <b>Lot Size:</b> {}",
        kind.label(),
        price.to_fixed(2),
        lot_size.to_fixed(2)
    )
}

/// TP 업데이트 메시지.
pub fn compose_tp_update(tp: Option<Decimal>) -> String {
    format!(
        "✏️ <b>Update TP</b>\n🎯 <b>TP:</b> {}",
        display_or(tp, NOT_SET)
    )
}

/// SL 업데이트 메시지.
pub fn compose_sl_update(sl: Option<Decimal>) -> String {
    format!(
        "✏️ <b>Update SL</b>\n🛑 <b>SL:</b> {}",
        display_or(sl, NOT_SET)
    )
}

/// TP/SL 동시 업데이트 메시지.
pub fn compose_tpsl_update(tp: Option<Decimal>, sl: Option<Decimal>) -> String {
    format!(
        "✏️ <b>Update TP/SL</b>\n\
         🎯 <b>TP:</b> {}\n\
         🛑 <b>SL:</b> {}",
        display_or(tp, NOT_SET),
        display_or(sl, NOT_SET)
    )
}

/// 랏 계산 결과 메시지.
pub fn compose_lot_report(calc: &LotCalculation) -> String {
    format!(
        "📊 <b>Lot Calculation</b>\n\
         💵 <b>Balance:</b> {}\n\
         ⚖️ <b>Risk:</b> {}%\n\
         🎯 <b>Lot Size:</b> {}",
        calc.balance.to_plain_string(),
        calc.risk_percent.to_plain_string(),
        calc.lot_size.to_plain_string()
    )
}

/// 랏 계산 완료 응답.
pub fn lot_ack(lot_size: Decimal) -> String {
    format!("✅ Lot: {}", lot_size.to_plain_string())
}

/// 기본 랏 변경 완료 응답.
pub fn default_lot_ack(lot_size: Decimal) -> String {
    format!("✅ Default lot set to {}", lot_size.to_fixed(2))
}
