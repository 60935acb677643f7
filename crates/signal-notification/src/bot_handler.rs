//! 텔레그램 봇 폴링 핸들러.
//!
//! 롱 폴링으로 업데이트를 수신합니다. 명령어 검증과 기본 랏 변경은
//! 도착 순서대로 처리하고, 메시지 전송만 별도 태스크에서 실행합니다.
//! 발행 대기 중에도 다음 이벤트 처리는 막히지 않습니다.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::desk::SignalDesk;
use crate::telegram::{TelegramClient, TelegramUpdate};
use crate::types::{InboundCommand, NotificationResult};

/// 폴링 실패 후 재시도 대기 시간.
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// 이벤트를 라우팅하고 준비한 뒤 전송 태스크를 생성합니다.
///
/// 준비 단계는 호출 안에서 끝나므로 순서대로 호출하면 기본 랏 변경이
/// 도착 순서를 따릅니다. 이벤트당 최대 한 번만 전송됩니다. 전송 실패는
/// 태스크 안에서 기록되며 재시도하지 않습니다. 보낼 것이 없으면 `None`을
/// 반환합니다.
pub async fn spawn_dispatch(desk: &SignalDesk, event: InboundCommand) -> Option<JoinHandle<()>> {
    let Some(routed) = desk.route(&event.text) else {
        debug!(chat_id = event.requester, "명령어 아님, 무시");
        return None;
    };

    let delivery = desk.prepare(&event, &routed).await.delivery?;
    let publisher = desk.publisher().clone();
    let requester = event.requester;
    let command = routed.name;

    Some(tokio::spawn(async move {
        if let Err(e) = delivery.send(&publisher).await {
            error!(chat_id = requester, command, "명령어 처리 실패: {}", e);
        }
    }))
}

/// 텔레그램 봇 핸들러.
pub struct TelegramBotHandler {
    client: TelegramClient,
    desk: Arc<SignalDesk>,
    last_update_id: RwLock<i64>,
}

impl TelegramBotHandler {
    /// 새 봇 핸들러 생성.
    pub fn new(client: TelegramClient, desk: Arc<SignalDesk>) -> Self {
        Self {
            client,
            desk,
            last_update_id: RwLock::new(0),
        }
    }

    /// 봇 폴링 시작.
    ///
    /// `shutdown`이 취소될 때까지 업데이트를 수신합니다.
    pub async fn start_polling(&self, shutdown: CancellationToken) {
        info!("텔레그램 봇 폴링 시작");

        loop {
            let polled = tokio::select! {
                _ = shutdown.cancelled() => break,
                polled = self.poll_updates() => polled,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        self.process_update(update).await;
                    }
                }
                Err(e) => {
                    error!("업데이트 폴링 실패: {}", e);
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(POLL_ERROR_BACKOFF) => {}
                    }
                }
            }
        }

        info!("텔레그램 봇 폴링 종료");
    }

    /// 업데이트 폴링.
    async fn poll_updates(&self) -> NotificationResult<Vec<TelegramUpdate>> {
        let last_id = *self.last_update_id.read().await;
        let updates = self.client.get_updates(last_id + 1).await?;

        // 마지막 업데이트 ID 갱신
        if let Some(last) = updates.last() {
            *self.last_update_id.write().await = last.update_id;
        }

        Ok(updates)
    }

    /// 개별 업데이트 처리.
    ///
    /// 텍스트 메시지가 명령어와 일치하면 전송 태스크를 반환합니다.
    pub async fn process_update(&self, update: TelegramUpdate) -> Option<JoinHandle<()>> {
        let message = update.message?;
        let text = message.text?;

        let mut event = InboundCommand::new(message.chat.id, text);
        if let Some(user) = message.from {
            event = event.with_sender(user.id);
        }

        spawn_dispatch(&self.desk, event).await
    }
}
