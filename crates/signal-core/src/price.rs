//! 시그널 가격 소스.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 시장가 시그널에 사용하는 기본 가격.
pub const DEFAULT_PRICE: Decimal = dec!(3375.97);

/// 현재 가격을 제공하는 trait.
pub trait PriceSource: Send + Sync {
    /// 현재 가격을 반환합니다.
    fn current_price(&self) -> Decimal;
}

/// 항상 같은 가격을 반환하는 고정 가격 소스.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrice(pub Decimal);

impl Default for FixedPrice {
    fn default() -> Self {
        Self(DEFAULT_PRICE)
    }
}

impl PriceSource for FixedPrice {
    fn current_price(&self) -> Decimal {
        self.0
    }
}
