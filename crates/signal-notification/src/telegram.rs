//! Telegram Bot API 클라이언트.
//!
//! `sendMessage`로 채널/요청자에게 메시지를 보내고 `getUpdates` 롱 폴링으로
//! 명령어를 수신합니다. 시작 시 `getMe`로 토큰과 봇 이름을 확인합니다.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use signal_core::{BotConfig, DEFAULT_TELEGRAM_API_URL};
use tracing::{debug, error, warn};

use crate::types::{
    ChatId, Destination, MessageTransport, NotificationError, NotificationResult, OutboundMessage,
};

/// 롱 폴링 대기 시간 (초).
const POLL_TIMEOUT_SECS: u64 = 30;

/// Telegram 연결 설정.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// @BotFather에서 받은 봇 토큰
    pub bot_token: String,
    /// 브로드캐스트 채널 ID
    pub channel_id: String,
    /// Bot API 주소
    pub api_base_url: String,
}

impl TelegramConfig {
    /// 새 설정을 생성합니다.
    pub fn new(bot_token: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            channel_id: channel_id.into(),
            api_base_url: DEFAULT_TELEGRAM_API_URL.to_string(),
        }
    }

    /// Bot API 주소를 변경합니다.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base_url, self.bot_token, method)
    }
}

impl From<&BotConfig> for TelegramConfig {
    fn from(config: &BotConfig) -> Self {
        Self::new(config.bot_token.clone(), config.channel_id.clone())
            .with_api_base_url(config.telegram_api_url.clone())
    }
}

/// `getUpdates` 응답.
#[derive(Debug, Deserialize)]
struct TelegramUpdates {
    ok: bool,
    #[serde(default)]
    result: Vec<TelegramUpdate>,
    #[serde(default)]
    description: Option<String>,
}

/// `getMe` 응답.
#[derive(Debug, Deserialize)]
struct TelegramBotInfo {
    ok: bool,
    #[serde(default)]
    result: Option<TelegramUser>,
    #[serde(default)]
    description: Option<String>,
}

/// 개별 업데이트.
#[derive(Debug, Deserialize)]
pub struct TelegramUpdate {
    pub update_id: i64,
    pub message: Option<TelegramMessage>,
}

/// 메시지 정보.
#[derive(Debug, Deserialize)]
pub struct TelegramMessage {
    pub from: Option<TelegramUser>,
    pub chat: TelegramChat,
    pub text: Option<String>,
}

/// 사용자 정보.
#[derive(Debug, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

/// 채팅 정보.
#[derive(Debug, Deserialize)]
pub struct TelegramChat {
    pub id: ChatId,
}

/// Telegram Bot API HTTP 클라이언트.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramClient {
    /// 새 클라이언트를 생성합니다.
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// 설정을 반환합니다.
    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    /// 메시지를 전송합니다.
    ///
    /// `chat_id`는 숫자 ID 또는 `@channel` 형식 모두 가능합니다.
    pub async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<&str>,
    ) -> NotificationResult<()> {
        let mut params = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "disable_web_page_preview": true,
        });
        if let Some(mode) = parse_mode {
            params["parse_mode"] = serde_json::Value::from(mode);
        }

        debug!(chat_id = %chat_id, "Telegram 메시지 전송");

        let response = self
            .client
            .post(self.config.method_url("sendMessage"))
            .json(&params)
            .send()
            .await
            .map_err(NotificationError::NetworkError)?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            warn!(chat_id = %chat_id, "Telegram rate limited");
            return Err(NotificationError::RateLimited(retry_after(&body).unwrap_or(60)));
        }

        error!("Telegram 메시지 전송 실패: {} - {}", status, body);
        Err(NotificationError::SendFailed(format!(
            "HTTP {}: {}",
            status, body
        )))
    }

    /// 봇 계정 정보를 조회합니다.
    ///
    /// 토큰이 거부되면 `InvalidConfig`를 반환합니다.
    pub async fn get_me(&self) -> NotificationResult<TelegramUser> {
        let response = self
            .client
            .post(self.config.method_url("getMe"))
            .send()
            .await
            .map_err(NotificationError::NetworkError)?;

        let body = response.text().await.map_err(NotificationError::NetworkError)?;
        let info: TelegramBotInfo = serde_json::from_str(&body)?;

        match (info.ok, info.result) {
            (true, Some(user)) => Ok(user),
            _ => Err(NotificationError::InvalidConfig(format!(
                "getMe 실패: {}",
                info.description.unwrap_or_default()
            ))),
        }
    }

    /// `offset` 이후의 업데이트를 롱 폴링으로 가져옵니다.
    pub async fn get_updates(&self, offset: i64) -> NotificationResult<Vec<TelegramUpdate>> {
        let params = serde_json::json!({
            "offset": offset,
            "timeout": POLL_TIMEOUT_SECS,
            "allowed_updates": ["message"],
        });

        let response = self
            .client
            .post(self.config.method_url("getUpdates"))
            .json(&params)
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 5))
            .send()
            .await
            .map_err(NotificationError::NetworkError)?;

        let body = response.text().await.map_err(NotificationError::NetworkError)?;
        let updates: TelegramUpdates = serde_json::from_str(&body)?;

        if !updates.ok {
            return Err(NotificationError::SendFailed(format!(
                "getUpdates 실패: {}",
                updates.description.unwrap_or_default()
            )));
        }

        Ok(updates.result)
    }
}

/// 429 응답 본문의 `parameters.retry_after` 값.
fn retry_after(body: &str) -> Option<u64> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("parameters")?.get("retry_after")?.as_u64()
}

/// Telegram 기반 메시지 전송 계층.
///
/// 브로드캐스트는 설정된 채널로, 응답은 요청자의 채팅으로 보냅니다.
#[derive(Debug, Clone)]
pub struct TelegramTransport {
    client: TelegramClient,
}

impl TelegramTransport {
    /// 새 전송 계층을 생성합니다.
    pub fn new(client: TelegramClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessageTransport for TelegramTransport {
    async fn send(&self, message: &OutboundMessage) -> NotificationResult<()> {
        let chat_id = match message.destination {
            Destination::Broadcast => self.client.config().channel_id.clone(),
            Destination::Requester(id) => id.to_string(),
        };
        let parse_mode = message.rich_text.then_some("HTML");

        self.client
            .send_message(&chat_id, &message.body, parse_mode)
            .await
    }

    fn name(&self) -> &str {
        "telegram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url() {
        let config = TelegramConfig::new("123:abc", "-100").with_api_base_url("http://localhost:1");
        assert_eq!(
            config.method_url("sendMessage"),
            "http://localhost:1/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_retry_after_parsed() {
        let body = r#"{"ok":false,"error_code":429,"parameters":{"retry_after":17}}"#;
        assert_eq!(retry_after(body), Some(17));
        assert_eq!(retry_after("not json"), None);
    }

    #[test]
    fn test_update_deserialization() {
        let body = r#"{
            "ok": true,
            "result": [
                {"update_id": 10, "message": {"message_id": 1, "date": 0,
                    "from": {"id": 77, "is_bot": false, "first_name": "a"},
                    "chat": {"id": 77, "type": "private"}, "text": "/buy"}},
                {"update_id": 11}
            ]
        }"#;
        let updates: TelegramUpdates = serde_json::from_str(body).unwrap();

        assert!(updates.ok);
        assert_eq!(updates.result.len(), 2);
        let message = updates.result[0].message.as_ref().unwrap();
        assert_eq!(message.chat.id, 77);
        assert_eq!(message.from.as_ref().unwrap().id, 77);
        assert_eq!(message.text.as_deref(), Some("/buy"));
        assert!(updates.result[1].message.is_none());
    }
}
