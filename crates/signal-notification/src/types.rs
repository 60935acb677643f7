//! 메시지 타입 및 전송 trait 정의.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 명령어를 보낸 채팅 ID.
pub type ChatId = i64;

/// 수신된 명령어 이벤트.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    /// 응답을 보낼 채팅 ID
    pub requester: ChatId,
    /// 보낸 사용자 ID (채널 게시물 등에는 없음)
    pub sender: Option<i64>,
    /// 원본 메시지 텍스트
    pub text: String,
}

impl InboundCommand {
    /// 새 이벤트를 생성합니다.
    pub fn new(requester: ChatId, text: impl Into<String>) -> Self {
        Self {
            requester,
            sender: None,
            text: text.into(),
        }
    }

    /// 보낸 사용자 ID를 설정합니다.
    pub fn with_sender(mut self, sender: i64) -> Self {
        self.sender = Some(sender);
        self
    }
}

/// 메시지 목적지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "chat_id", rename_all = "snake_case")]
pub enum Destination {
    /// 설정된 브로드캐스트 채널
    Broadcast,
    /// 명령어를 보낸 채팅
    Requester(ChatId),
}

/// 전송할 메시지.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// 목적지
    pub destination: Destination,
    /// 본문
    pub body: String,
    /// HTML 파싱 여부
    pub rich_text: bool,
}

impl OutboundMessage {
    /// 브로드캐스트 채널용 HTML 메시지.
    pub fn broadcast(body: impl Into<String>) -> Self {
        Self {
            destination: Destination::Broadcast,
            body: body.into(),
            rich_text: true,
        }
    }

    /// 요청자용 일반 텍스트 메시지.
    pub fn reply(requester: ChatId, body: impl Into<String>) -> Self {
        Self {
            destination: Destination::Requester(requester),
            body: body.into(),
            rich_text: false,
        }
    }

    /// 요청자용 HTML 메시지.
    pub fn reply_html(requester: ChatId, body: impl Into<String>) -> Self {
        Self {
            rich_text: true,
            ..Self::reply(requester, body)
        }
    }
}

/// 알림 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 알림 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("메시지 전송 실패: {0}")]
    SendFailed(String),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),

    #[error("요청 한도 초과: {0}초 후 재시도")]
    RateLimited(u64),

    #[error("네트워크 에러: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("직렬화 에러: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// 메시지 전송 계층 trait.
///
/// 실제 구현은 Telegram Bot API를 사용하며, 테스트에서는 전송 기록용
/// 구현으로 대체됩니다.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// 메시지를 전송합니다.
    async fn send(&self, message: &OutboundMessage) -> NotificationResult<()>;

    /// 전송 계층 이름.
    fn name(&self) -> &str;
}
