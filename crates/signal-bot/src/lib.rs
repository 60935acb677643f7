//! # Signal Bot
//!
//! 골드 시그널 봇 실행 구성 요소.
//! - liveness 엔드포인트 (호스팅 환경의 상태 확인용)
//! - 설정으로부터 데스크/폴링 핸들러 조립

pub mod liveness;

use std::sync::Arc;

use signal_core::{BotConfig, FixedPrice, LotSizeCell};
use signal_notification::{
    authorization_from_ids, ChannelPublisher, NotificationError, NotificationResult, SignalDesk,
    TelegramBotHandler, TelegramClient, TelegramConfig, TelegramTransport,
};
use tracing::{info, warn};

/// 설정으로 텔레그램 봇 핸들러를 조립합니다.
///
/// `getMe`로 봇 이름을 확인해 그룹 채팅의 `/cmd@name` 멘션 판별에
/// 사용합니다. 토큰이 거부되면 에러를 반환하고, 네트워크 문제로 확인하지
/// 못하면 멘션이 붙은 명령어만 무시한 채 계속 진행합니다.
pub async fn build_bot(config: &BotConfig) -> NotificationResult<TelegramBotHandler> {
    let client = TelegramClient::new(TelegramConfig::from(config));
    let publisher = ChannelPublisher::new(Arc::new(TelegramTransport::new(client.clone())));

    let mut desk = SignalDesk::new(
        publisher,
        Arc::new(LotSizeCell::new(config.default_lot)),
        Arc::new(FixedPrice(config.signal_price)),
    )
    .with_authorization(authorization_from_ids(config.admin_ids.clone()));

    match client.get_me().await {
        Ok(me) => match me.username {
            Some(username) => {
                info!(bot = %username, "봇 계정 확인");
                desk = desk.with_bot_username(username);
            }
            None => warn!(bot_id = me.id, "봇 이름 없음, 멘션 명령어는 무시됩니다"),
        },
        Err(e @ NotificationError::InvalidConfig(_)) => return Err(e),
        Err(e) => warn!("봇 계정 확인 실패, 멘션 명령어는 무시됩니다: {}", e),
    }

    Ok(TelegramBotHandler::new(client, Arc::new(desk)))
}
