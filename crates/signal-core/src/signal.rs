//! 채널로 발행되는 트레이딩 시그널.
//!
//! 이 모듈은 시그널 관련 타입을 정의합니다:
//! - `SignalKind` - 고정된 시그널 종류
//! - `Signal` - 요청마다 생성되는 시그널 값 객체

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::compose_signal;

/// 시그널 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// 시장가 매수
    MarketBuy,
    /// 시장가 매도
    MarketSell,
    /// 추가 매수
    AgainBuy,
    /// 추가 매도
    AgainSell,
    /// 지정가 매수
    LimitBuy,
    /// 지정가 매도
    LimitSell,
}

impl SignalKind {
    /// 메시지에 표시되는 이름.
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::MarketBuy => "Market Buy",
            SignalKind::MarketSell => "Market Sell",
            SignalKind::AgainBuy => "Again Buy",
            SignalKind::AgainSell => "Again Sell",
            SignalKind::LimitBuy => "Limit Buy",
            SignalKind::LimitSell => "Limit Sell",
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 한 번의 요청으로 생성되는 시그널.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// 시그널 종류
    pub kind: SignalKind,
    /// 가격
    pub price: Decimal,
    /// 랏 사이즈
    pub lot_size: Decimal,
}

impl Signal {
    /// 새 시그널을 생성합니다.
    pub fn new(kind: SignalKind, price: Decimal, lot_size: Decimal) -> Self {
        Self {
            kind,
            price,
            lot_size,
        }
    }

    /// 채널 메시지로 렌더링합니다.
    pub fn render(&self) -> String {
        compose_signal(self.kind, self.price, self.lot_size)
    }
}
