//! 랏 사이즈 계산 및 기본 랏 상태.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::RwLock;
use tracing::debug;

use crate::decimal::DecimalExt;

/// 허용되는 최소 랏 사이즈.
pub const MIN_LOT: Decimal = dec!(0.01);

/// 시작 시 기본 랏 사이즈.
pub const DEFAULT_LOT: Decimal = dec!(0.10);

/// 리스크 금액을 랏으로 환산할 때 쓰는 랏 단위당 금액.
pub const LOT_VALUE_DIVISOR: Decimal = dec!(100);

/// 랏 값을 소수점 둘째 자리로 반올림하고 최소값으로 제한합니다.
pub fn clamp_lot(value: Decimal) -> Decimal {
    value.round_half_up(2).max(MIN_LOT)
}

/// 리스크 기반 랏 계산 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotCalculation {
    /// 계좌 잔고
    pub balance: Decimal,
    /// 리스크 비율 (%)
    pub risk_percent: Decimal,
    /// 리스크 금액 (`balance * risk / 100`)
    pub risk_amount: Decimal,
    /// 계산된 랏 사이즈
    pub lot_size: Decimal,
}

/// 잔고와 리스크 비율로 랏 사이즈를 계산합니다.
///
/// `lot = max(0.01, round(balance * risk / 100 / 100, 2))`.
/// 연산이 오버플로하면 `None`을 반환합니다.
pub fn calculate_lot(balance: Decimal, risk_percent: Decimal) -> Option<LotCalculation> {
    let risk_amount = balance
        .checked_mul(risk_percent)?
        .checked_div(dec!(100))?;
    let lot_size = clamp_lot(risk_amount.checked_div(LOT_VALUE_DIVISOR)?);

    Some(LotCalculation {
        balance,
        risk_percent,
        risk_amount,
        lot_size,
    })
}

/// 프로세스 전역 기본 랏 사이즈 셀.
///
/// 모든 시그널 명령어가 읽고 `set_lot`만 변경합니다. 저장된 값은 항상
/// `MIN_LOT` 이상입니다.
#[derive(Debug)]
pub struct LotSizeCell {
    value: RwLock<Decimal>,
}

impl LotSizeCell {
    /// 초기값으로 셀을 생성합니다. 초기값도 최소값으로 제한됩니다.
    pub fn new(initial: Decimal) -> Self {
        Self {
            value: RwLock::new(clamp_lot(initial)),
        }
    }

    /// 현재 기본 랏을 반환합니다.
    pub async fn get(&self) -> Decimal {
        *self.value.read().await
    }

    /// 기본 랏을 변경하고 실제로 저장된 값을 반환합니다.
    pub async fn set(&self, value: Decimal) -> Decimal {
        let clamped = clamp_lot(value);
        let mut guard = self.value.write().await;
        debug!(previous = %*guard, requested = %value, stored = %clamped, "기본 랏 변경");
        *guard = clamped;
        clamped
    }
}

impl Default for LotSizeCell {
    fn default() -> Self {
        Self::new(DEFAULT_LOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_lot_example() {
        let calc = calculate_lot(dec!(1000), dec!(2)).unwrap();
        assert_eq!(calc.risk_amount, dec!(20));
        assert_eq!(calc.lot_size, dec!(0.20));
    }

    #[test]
    fn test_calculate_lot_floor() {
        let calc = calculate_lot(dec!(100), dec!(1)).unwrap();
        assert_eq!(calc.risk_amount, dec!(1));
        assert_eq!(calc.lot_size, MIN_LOT);

        let negative = calculate_lot(dec!(-1000), dec!(2)).unwrap();
        assert_eq!(negative.lot_size, MIN_LOT);
    }

    #[test]
    fn test_calculate_lot_rounding() {
        // 12345 * 1.5 / 100 = 185.175 -> 1.85175 -> 1.85
        let calc = calculate_lot(dec!(12345), dec!(1.5)).unwrap();
        assert_eq!(calc.lot_size, dec!(1.85));
    }

    #[test]
    fn test_calculate_lot_overflow() {
        assert!(calculate_lot(Decimal::MAX, dec!(2)).is_none());
    }

    #[test]
    fn test_clamp_lot() {
        assert_eq!(clamp_lot(dec!(0.005)), dec!(0.01));
        assert_eq!(clamp_lot(dec!(0.004)), dec!(0.01));
        assert_eq!(clamp_lot(dec!(-3)), dec!(0.01));
        assert_eq!(clamp_lot(dec!(0.256)), dec!(0.26));
    }

    #[tokio::test]
    async fn test_cell_default_and_set() {
        let cell = LotSizeCell::default();
        assert_eq!(cell.get().await, dec!(0.10));

        assert_eq!(cell.set(dec!(0.005)).await, dec!(0.01));
        assert_eq!(cell.get().await, dec!(0.01));

        assert_eq!(cell.set(dec!(0.5)).await, dec!(0.5));
        assert_eq!(cell.get().await, dec!(0.50));
    }

    #[tokio::test]
    async fn test_cell_initial_value_is_clamped() {
        let cell = LotSizeCell::new(Decimal::ZERO);
        assert_eq!(cell.get().await, MIN_LOT);
    }
}
