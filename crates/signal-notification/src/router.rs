//! 명령어 라우팅.
//!
//! 고정된 명령어 테이블을 순서대로 검사하여 처음 일치하는 명령어 하나만
//! 선택합니다. 일치하지 않는 텍스트는 조용히 무시됩니다.

use signal_core::format::Bulletin;
use signal_core::SignalKind;

/// 봇 명령어 타입.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// 시작 인사
    Start,
    /// 도움말
    Help,
    /// 현재 가격 시그널 (buy, sell, again_buy, again_sell)
    Market(SignalKind),
    /// 지정가 시그널 (limit_buy, limit_sell)
    Limit(SignalKind),
    /// TP 업데이트
    UpdateTp,
    /// SL 업데이트
    UpdateSl,
    /// TP/SL 동시 업데이트
    UpdateTpSl,
    /// 리스크 기반 랏 계산
    CalcLot,
    /// 기본 랏 변경
    SetLot,
    /// 고정 리포트 발행
    Bulletin(Bulletin),
}

impl BotCommand {
    /// 채널 발행이나 상태 변경이 없는 명령어인지 확인합니다.
    pub fn is_informational(&self) -> bool {
        matches!(self, BotCommand::Start | BotCommand::Help)
    }
}

/// 명령어 테이블. 순서대로 검사됩니다.
pub const COMMAND_TABLE: &[(&str, BotCommand)] = &[
    ("start", BotCommand::Start),
    ("help", BotCommand::Help),
    ("buy", BotCommand::Market(SignalKind::MarketBuy)),
    ("sell", BotCommand::Market(SignalKind::MarketSell)),
    ("again_buy", BotCommand::Market(SignalKind::AgainBuy)),
    ("again_sell", BotCommand::Market(SignalKind::AgainSell)),
    ("limit_buy", BotCommand::Limit(SignalKind::LimitBuy)),
    ("limit_sell", BotCommand::Limit(SignalKind::LimitSell)),
    ("update_tp", BotCommand::UpdateTp),
    ("update_sl", BotCommand::UpdateSl),
    ("update_tpsl", BotCommand::UpdateTpSl),
    ("calc_lot", BotCommand::CalcLot),
    ("set_lot", BotCommand::SetLot),
    ("morning", BotCommand::Bulletin(Bulletin::Morning)),
    ("psychology", BotCommand::Bulletin(Bulletin::Psychology)),
    ("daily", BotCommand::Bulletin(Bulletin::Daily)),
    ("weekly", BotCommand::Bulletin(Bulletin::Weekly)),
];

/// 라우팅된 명령어와 인자 문자열.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedCommand {
    /// 테이블상의 명령어 이름
    pub name: &'static str,
    /// 명령어
    pub command: BotCommand,
    /// 명령어 뒤의 인자 텍스트 (공백 제거됨)
    pub args: String,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `rest`가 `name`으로 시작하고 바로 뒤가 단어 경계이면 나머지를 반환합니다.
fn match_word<'a>(rest: &'a str, name: &str) -> Option<&'a str> {
    let head = rest.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }

    let tail = &rest[name.len()..];
    match tail.chars().next() {
        Some(c) if is_word_char(c) => None,
        _ => Some(tail),
    }
}

/// 그룹 채팅의 `/buy@GoldBot` 형식에서 봇 멘션을 처리합니다.
///
/// 멘션이 이 봇을 가리키면 제거하고, 다른 봇을 가리키거나 봇 이름을
/// 모르면 `None`을 반환합니다.
fn strip_mention<'a>(tail: &'a str, bot_username: Option<&str>) -> Option<&'a str> {
    let Some(mention) = tail.strip_prefix('@') else {
        return Some(tail);
    };

    let end = mention.find(char::is_whitespace).unwrap_or(mention.len());
    let (name, rest) = mention.split_at(end);
    match bot_username {
        Some(own) if name.eq_ignore_ascii_case(own.trim_start_matches('@')) => Some(rest),
        _ => None,
    }
}

/// 텍스트에서 명령어를 찾습니다.
///
/// 텍스트는 `/`로 시작해야 하며 명령어 이름은 대소문자를 구분하지
/// 않습니다. `bot_username`은 `/cmd@name` 멘션을 판별할 때 사용합니다.
/// 일치하는 명령어가 없으면 `None`을 반환합니다.
pub fn route(text: &str, bot_username: Option<&str>) -> Option<RoutedCommand> {
    let rest = text.strip_prefix('/')?;

    COMMAND_TABLE.iter().find_map(|&(name, command)| {
        let tail = match_word(rest, name)?;
        let args = strip_mention(tail, bot_username)?;
        Some(RoutedCommand {
            name,
            command,
            args: args.trim().to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: Option<&str> = Some("GoldSignalBot");

    fn command_of(text: &str) -> Option<BotCommand> {
        route(text, BOT).map(|r| r.command)
    }

    #[test]
    fn test_route_simple_commands() {
        assert_eq!(command_of("/start"), Some(BotCommand::Start));
        assert_eq!(command_of("/help"), Some(BotCommand::Help));
        assert_eq!(
            command_of("/buy"),
            Some(BotCommand::Market(SignalKind::MarketBuy))
        );
        assert_eq!(
            command_of("/again_sell"),
            Some(BotCommand::Market(SignalKind::AgainSell))
        );
        assert_eq!(
            command_of("/weekly"),
            Some(BotCommand::Bulletin(Bulletin::Weekly))
        );
    }

    #[test]
    fn test_route_case_insensitive() {
        assert_eq!(
            command_of("/LIMIT_BUY 3375"),
            Some(BotCommand::Limit(SignalKind::LimitBuy))
        );
        assert_eq!(
            command_of("/Sell"),
            Some(BotCommand::Market(SignalKind::MarketSell))
        );
    }

    #[test]
    fn test_route_word_boundary() {
        assert_eq!(command_of("/update_tp 3385"), Some(BotCommand::UpdateTp));
        assert_eq!(
            command_of("/update_tpsl 3385 3350"),
            Some(BotCommand::UpdateTpSl)
        );
        assert_eq!(command_of("/buyer"), None);
        assert_eq!(command_of("/buy_now"), None);
        assert_eq!(command_of("/sell2"), None);
    }

    #[test]
    fn test_route_extracts_args() {
        let routed = route("/calc_lot   1000  2 ", BOT).unwrap();
        assert_eq!(routed.name, "calc_lot");
        assert_eq!(routed.command, BotCommand::CalcLot);
        assert_eq!(routed.args, "1000  2");

        assert_eq!(route("/set_lot", BOT).unwrap().args, "");
    }

    #[test]
    fn test_route_strips_bot_mention() {
        let routed = route("/limit_sell@GoldSignalBot 3380.5", BOT).unwrap();
        assert_eq!(routed.command, BotCommand::Limit(SignalKind::LimitSell));
        assert_eq!(routed.args, "3380.5");

        assert_eq!(route("/buy@GoldSignalBot", BOT).unwrap().args, "");
        assert_eq!(route("/buy@goldsignalbot", BOT).unwrap().args, "");
    }

    #[test]
    fn test_route_ignores_other_bot_mentions() {
        assert_eq!(route("/set_lot@OtherBot 0.5", BOT), None);
        assert_eq!(route("/buy@OtherBot", BOT), None);
        assert_eq!(route("/buy@GoldSignalBotX", BOT), None);
        assert_eq!(route("/buy@GoldSignalBot", None), None);
        assert_eq!(
            route("/buy", None).map(|r| r.command),
            Some(BotCommand::Market(SignalKind::MarketBuy))
        );
    }

    #[test]
    fn test_route_ignores_non_commands() {
        assert_eq!(route("buy", BOT), None);
        assert_eq!(route("hello /buy", BOT), None);
        assert_eq!(route(" /buy", BOT), None);
        assert_eq!(route("/", BOT), None);
        assert_eq!(route("/unknown", BOT), None);
        assert_eq!(route("", BOT), None);
    }

    #[test]
    fn test_every_table_entry_routes_to_itself() {
        for (name, command) in COMMAND_TABLE {
            let routed = route(&format!("/{}", name), BOT).unwrap();
            assert_eq!(routed.command, *command, "command /{}", name);
        }
    }

    #[test]
    fn test_informational_commands() {
        assert!(BotCommand::Start.is_informational());
        assert!(!BotCommand::SetLot.is_informational());
    }
}
