//! 명령어 핸들러.
//!
//! 라우팅된 명령어를 검증하고 메시지를 만들어 채널에 발행한 뒤 요청자에게
//! 응답합니다. 잘못된 인자는 사용법 안내로 처리되며 발행하지 않습니다.
//!
//! 처리는 두 단계입니다. [`SignalDesk::prepare`]가 검증과 기본 랏 읽기/변경,
//! 메시지 생성을 마치고, [`Delivery::send`]가 실제 전송을 담당합니다.

use std::sync::Arc;

use rust_decimal::Decimal;
use signal_core::format::{
    compose_lot_report, compose_sl_update, compose_tp_update, compose_tpsl_update,
    default_lot_ack, lot_ack, usage_hint, ACK_SENT, ACK_SL_UPDATED, ACK_TPSL_UPDATED,
    ACK_TP_UPDATED, HELP_TEXT, WELCOME_TEXT,
};
use signal_core::{
    calculate_lot, parse_one, parse_two, LotSizeCell, PriceSource, Signal, SignalError,
    SignalKind,
};
use tracing::{debug, info, warn};

use crate::auth::{AllowAll, AuthorizationCheck};
use crate::publisher::ChannelPublisher;
use crate::router::{route, BotCommand, RoutedCommand};
use crate::types::{ChatId, InboundCommand, NotificationResult, OutboundMessage};

/// 명령어 처리 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// 요청자에게만 응답함 (start, help)
    Replied,
    /// 채널에 발행하고 요청자에게 확인 응답함
    Published,
    /// 기본 랏을 변경함
    LotUpdated,
    /// 잘못된 인자로 거부하고 사용법을 안내함
    Rejected,
    /// 권한 없음, 아무것도 보내지 않음
    Unauthorized,
}

/// 전송할 응답.
///
/// 명령어 검증과 기본 랏 읽기/변경은 준비 단계에서 끝나며, 전송만
/// 나중에 비동기로 실행됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// 채널에 발행한 뒤 요청자에게 확인 응답
    Publish {
        text: String,
        requester: ChatId,
        ack: String,
    },
    /// 요청자에게만 응답
    Reply(OutboundMessage),
}

impl Delivery {
    /// 전송을 실행합니다.
    pub async fn send(self, publisher: &ChannelPublisher) -> NotificationResult<()> {
        match self {
            Delivery::Publish {
                text,
                requester,
                ack,
            } => {
                publisher
                    .publish_then_acknowledge(&text, requester, &ack)
                    .await
            }
            Delivery::Reply(message) => publisher.reply(message).await,
        }
    }
}

/// 준비된 명령어: 처리 결과와 보낼 응답.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCommand {
    pub outcome: CommandOutcome,
    /// 권한 없는 명령어는 `None`
    pub delivery: Option<Delivery>,
}

impl PreparedCommand {
    fn publish(requester: ChatId, text: impl Into<String>, ack: impl Into<String>) -> Self {
        Self {
            outcome: CommandOutcome::Published,
            delivery: Some(Delivery::Publish {
                text: text.into(),
                requester,
                ack: ack.into(),
            }),
        }
    }

    fn reply(outcome: CommandOutcome, message: OutboundMessage) -> Self {
        Self {
            outcome,
            delivery: Some(Delivery::Reply(message)),
        }
    }
}

/// 시그널 데스크.
///
/// 기본 랏 셀과 가격 소스는 생성 시 주입되며 모든 명령어가 공유합니다.
pub struct SignalDesk {
    publisher: ChannelPublisher,
    lot: Arc<LotSizeCell>,
    price: Arc<dyn PriceSource>,
    auth: Box<dyn AuthorizationCheck>,
    bot_username: Option<String>,
}

impl SignalDesk {
    /// 새 데스크를 생성합니다. 기본적으로 모든 요청을 허용합니다.
    pub fn new(
        publisher: ChannelPublisher,
        lot: Arc<LotSizeCell>,
        price: Arc<dyn PriceSource>,
    ) -> Self {
        Self {
            publisher,
            lot,
            price,
            auth: Box::new(AllowAll),
            bot_username: None,
        }
    }

    /// 권한 확인기를 교체합니다.
    pub fn with_authorization(mut self, auth: Box<dyn AuthorizationCheck>) -> Self {
        self.auth = auth;
        self
    }

    /// `/cmd@name` 멘션 판별에 쓸 봇 이름을 설정합니다.
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// 공유 기본 랏 셀.
    pub fn lot_cell(&self) -> &Arc<LotSizeCell> {
        &self.lot
    }

    /// 응답 발행기.
    pub fn publisher(&self) -> &ChannelPublisher {
        &self.publisher
    }

    /// 이 봇 기준으로 텍스트를 라우팅합니다.
    pub fn route(&self, text: &str) -> Option<RoutedCommand> {
        route(text, self.bot_username.as_deref())
    }

    /// 이벤트를 라우팅하고 처리합니다.
    ///
    /// 일치하는 명령어가 없으면 아무것도 보내지 않고 `None`을 반환합니다.
    pub async fn dispatch(
        &self,
        event: &InboundCommand,
    ) -> NotificationResult<Option<CommandOutcome>> {
        match self.route(&event.text) {
            Some(routed) => self.execute(event, &routed).await.map(Some),
            None => {
                debug!(chat_id = event.requester, "명령어 아님, 무시");
                Ok(None)
            }
        }
    }

    /// 라우팅된 명령어를 준비하고 응답을 끝까지 전송합니다.
    pub async fn execute(
        &self,
        event: &InboundCommand,
        routed: &RoutedCommand,
    ) -> NotificationResult<CommandOutcome> {
        let prepared = self.prepare(event, routed).await;
        if let Some(delivery) = prepared.delivery {
            delivery.send(&self.publisher).await?;
        }
        Ok(prepared.outcome)
    }

    /// 명령어를 검증하고 보낼 메시지를 만듭니다.
    ///
    /// 기본 랏의 읽기와 변경은 여기서 끝나므로, 호출 순서대로 준비하면
    /// 전송이 나중에 어떤 순서로 실행되더라도 각 시그널은 그 이전에
    /// 도착한 `set_lot`의 값을 사용합니다.
    pub async fn prepare(
        &self,
        event: &InboundCommand,
        routed: &RoutedCommand,
    ) -> PreparedCommand {
        let requester = event.requester;

        if !routed.command.is_informational() && !self.auth.is_authorized(event) {
            warn!(
                chat_id = requester,
                sender = ?event.sender,
                command = routed.name,
                "권한 없는 명령어, 무시"
            );
            return PreparedCommand {
                outcome: CommandOutcome::Unauthorized,
                delivery: None,
            };
        }

        info!(chat_id = requester, command = routed.name, args = %routed.args, "명령어 수신");

        match routed.command {
            BotCommand::Start => PreparedCommand::reply(
                CommandOutcome::Replied,
                OutboundMessage::reply_html(requester, WELCOME_TEXT),
            ),
            BotCommand::Help => PreparedCommand::reply(
                CommandOutcome::Replied,
                OutboundMessage::reply_html(requester, HELP_TEXT),
            ),
            BotCommand::Market(kind) => {
                let price = self.price.current_price();
                self.signal(requester, kind, price).await
            }
            BotCommand::Limit(kind) => match parse_one(&routed.args) {
                Some(price) => self.signal(requester, kind, price).await,
                None => reject(requester, routed, &format!("/{} 3375.0", routed.name)),
            },
            BotCommand::UpdateTp => PreparedCommand::publish(
                requester,
                compose_tp_update(parse_one(&routed.args)),
                ACK_TP_UPDATED,
            ),
            BotCommand::UpdateSl => PreparedCommand::publish(
                requester,
                compose_sl_update(parse_one(&routed.args)),
                ACK_SL_UPDATED,
            ),
            BotCommand::UpdateTpSl => match parse_two(&routed.args) {
                (None, None) => reject(requester, routed, "/update_tpsl 3385 3350"),
                (tp, sl) => PreparedCommand::publish(
                    requester,
                    compose_tpsl_update(tp, sl),
                    ACK_TPSL_UPDATED,
                ),
            },
            BotCommand::CalcLot => {
                let calc = match parse_two(&routed.args) {
                    (Some(balance), Some(risk)) => calculate_lot(balance, risk),
                    _ => None,
                };
                match calc {
                    Some(calc) => PreparedCommand::publish(
                        requester,
                        compose_lot_report(&calc),
                        lot_ack(calc.lot_size),
                    ),
                    None => reject(requester, routed, "/calc_lot 1000 2"),
                }
            }
            BotCommand::SetLot => match parse_one(&routed.args) {
                Some(lot) => {
                    let stored = self.lot.set(lot).await;
                    info!(chat_id = requester, lot = %stored, "기본 랏 변경");
                    PreparedCommand::reply(
                        CommandOutcome::LotUpdated,
                        OutboundMessage::reply(requester, default_lot_ack(stored)),
                    )
                }
                None => reject(requester, routed, "/set_lot 0.10"),
            },
            BotCommand::Bulletin(bulletin) => {
                PreparedCommand::publish(requester, bulletin.text(), ACK_SENT)
            }
        }
    }

    /// 현재 기본 랏으로 시그널을 만듭니다.
    async fn signal(&self, requester: ChatId, kind: SignalKind, price: Decimal) -> PreparedCommand {
        let signal = Signal::new(kind, price, self.lot.get().await);
        PreparedCommand::publish(requester, signal.render(), ACK_SENT)
    }
}

/// 잘못된 인자를 사용법 안내로 응답합니다.
fn reject(requester: ChatId, routed: &RoutedCommand, example: &str) -> PreparedCommand {
    let err = SignalError::InvalidArguments(routed.args.clone());
    debug!(chat_id = requester, command = routed.name, "{}", err);

    PreparedCommand::reply(
        CommandOutcome::Rejected,
        OutboundMessage::reply(requester, usage_hint(example)),
    )
}
