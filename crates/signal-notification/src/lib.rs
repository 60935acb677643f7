//! # Signal Notification
//!
//! 텔레그램 명령어를 받아 시그널을 채널로 발행합니다.
//!
//! # 텔레그램 봇 명령어
//!
//! - `/buy`, `/sell`, `/again_buy`, `/again_sell` - 시장가 시그널
//! - `/limit_buy <price>`, `/limit_sell <price>` - 지정가 시그널
//! - `/update_tp`, `/update_sl`, `/update_tpsl` - TP/SL 업데이트
//! - `/calc_lot <balance> <risk%>` - 리스크 기반 랏 계산
//! - `/set_lot <lot>` - 기본 랏 변경
//! - `/morning`, `/psychology`, `/daily`, `/weekly` - 고정 리포트
//! - `/start`, `/help`

pub mod auth;
pub mod bot_handler;
pub mod desk;
pub mod publisher;
pub mod router;
pub mod telegram;
pub mod types;

pub use auth::*;
pub use bot_handler::*;
pub use desk::*;
pub use publisher::*;
pub use router::*;
pub use telegram::*;
pub use types::*;
