//! 채널 발행 및 요청자 응답.

use std::sync::Arc;

use tracing::{debug, error};

use crate::types::{ChatId, MessageTransport, NotificationResult, OutboundMessage};

/// 브로드캐스트 채널 발행기.
///
/// 발행 후 확인 응답은 브로드캐스트 전송이 완료된 뒤에만 보냅니다.
#[derive(Clone)]
pub struct ChannelPublisher {
    transport: Arc<dyn MessageTransport>,
}

impl ChannelPublisher {
    /// 새 발행기를 생성합니다.
    pub fn new(transport: Arc<dyn MessageTransport>) -> Self {
        Self { transport }
    }

    /// 채널에 HTML 메시지를 발행합니다.
    pub async fn publish(&self, text: &str) -> NotificationResult<()> {
        let message = OutboundMessage::broadcast(text);
        self.transport.send(&message).await.map_err(|e| {
            error!(transport = self.transport.name(), "채널 발행 실패: {}", e);
            e
        })
    }

    /// 요청자에게 일반 텍스트 응답을 보냅니다.
    pub async fn acknowledge(&self, requester: ChatId, text: &str) -> NotificationResult<()> {
        self.reply(OutboundMessage::reply(requester, text)).await
    }

    /// 요청자에게 메시지를 보냅니다.
    pub async fn reply(&self, message: OutboundMessage) -> NotificationResult<()> {
        self.transport.send(&message).await
    }

    /// 채널에 발행하고, 성공하면 요청자에게 확인 응답을 보냅니다.
    ///
    /// 발행이 실패하면 응답은 보내지 않고 에러를 반환합니다.
    pub async fn publish_then_acknowledge(
        &self,
        text: &str,
        requester: ChatId,
        ack: &str,
    ) -> NotificationResult<()> {
        self.publish(text).await?;
        debug!(chat_id = requester, "채널 발행 완료, 확인 응답 전송");
        self.acknowledge(requester, ack).await
    }
}
