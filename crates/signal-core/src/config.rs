//! 설정 관리.
//!
//! 환경 변수(및 선택적 `config/default.toml`)에서 봇 설정을 로드합니다.
//! `BOT_TOKEN`과 `CHANNEL_ID`가 없으면 시작할 수 없습니다.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{SignalError, SignalResult};
use crate::lot::{clamp_lot, DEFAULT_LOT};
use crate::price::DEFAULT_PRICE;

/// 기본 Telegram Bot API 주소.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// 기본 liveness 포트.
pub const DEFAULT_PORT: u16 = 3000;

/// 설정 소스에서 읽은 원시 값.
#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    bot_token: Option<String>,
    #[serde(default)]
    channel_id: Option<String>,
    port: u16,
    signal_price: Decimal,
    default_lot: Decimal,
    #[serde(default)]
    admin_ids: Option<String>,
    telegram_api_url: String,
}

/// 검증된 봇 설정.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram 봇 토큰
    pub bot_token: String,
    /// 브로드캐스트 채널 ID (예: "-1001234567890")
    pub channel_id: String,
    /// liveness 서버 포트
    pub port: u16,
    /// 시장가 시그널 가격
    pub signal_price: Decimal,
    /// 시작 시 기본 랏 사이즈
    pub default_lot: Decimal,
    /// 관리자 ID 목록 (비어 있으면 모두 허용)
    pub admin_ids: Vec<i64>,
    /// Telegram Bot API 주소
    pub telegram_api_url: String,
}

impl BotConfig {
    /// `config/default.toml`(선택)과 환경 변수에서 설정을 로드합니다.
    pub fn load() -> SignalResult<Self> {
        let source = Self::builder()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::default())
            .build()?;

        Self::from_config(source)
    }

    /// 기본값이 채워진 설정 빌더.
    pub fn builder() -> SignalResult<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(config::Config::builder()
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("signal_price", DEFAULT_PRICE.to_string())?
            .set_default("default_lot", DEFAULT_LOT.to_string())?
            .set_default("telegram_api_url", DEFAULT_TELEGRAM_API_URL)?)
    }

    /// 빌드된 설정 소스에서 값을 읽고 검증합니다.
    pub fn from_config(source: config::Config) -> SignalResult<Self> {
        let raw: RawSettings = source.try_deserialize()?;

        let bot_token = non_empty(raw.bot_token).ok_or(SignalError::MissingConfig("BOT_TOKEN"))?;
        let channel_id =
            non_empty(raw.channel_id).ok_or(SignalError::MissingConfig("CHANNEL_ID"))?;

        let admin_ids = match non_empty(raw.admin_ids) {
            Some(list) => parse_id_list(&list)?,
            None => Vec::new(),
        };

        Ok(Self {
            bot_token,
            channel_id,
            port: raw.port,
            signal_price: raw.signal_price,
            default_lot: clamp_lot(raw.default_lot),
            admin_ids,
            telegram_api_url: raw.telegram_api_url.trim_end_matches('/').to_string(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 쉼표로 구분된 ID 목록을 파싱합니다.
fn parse_id_list(list: &str) -> SignalResult<Vec<i64>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| SignalError::Config(format!("ADMIN_IDS에 잘못된 ID: {}", s)))
        })
        .collect()
}
