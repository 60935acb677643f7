//! 메시지 렌더링을 위한 Decimal 유틸리티.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal 렌더링을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_half_up(&self, dp: u32) -> Decimal;

    /// 소수점 아래 `dp` 자리로 고정된 문자열을 반환합니다 (예: "3375.00").
    fn to_fixed(&self, dp: u32) -> String;

    /// 불필요한 후행 0을 제거한 문자열을 반환합니다 (예: "3385.50" -> "3385.5").
    fn to_plain_string(&self) -> String;
}

impl DecimalExt for Decimal {
    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_fixed(&self, dp: u32) -> String {
        // 반올림 후 scale <= dp 이므로 precision 지정은 0 채우기만 수행
        format!("{:.*}", dp as usize, self.round_half_up(dp))
    }

    fn to_plain_string(&self) -> String {
        self.normalize().to_string()
    }
}

/// 값이 있으면 자연스러운 소수 형태로, 없으면 `placeholder`로 렌더링합니다.
pub fn display_or(value: Option<Decimal>, placeholder: &str) -> String {
    value
        .map(|v| v.to_plain_string())
        .unwrap_or_else(|| placeholder.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_fixed_rounds_and_pads() {
        assert_eq!(dec!(3375.966).to_fixed(2), "3375.97");
        assert_eq!(dec!(0.1).to_fixed(2), "0.10");
        assert_eq!(dec!(3375).to_fixed(2), "3375.00");
        assert_eq!(dec!(0.005).to_fixed(2), "0.01");
    }

    #[test]
    fn test_to_plain_string_trims_zeros() {
        assert_eq!(dec!(3385.50).to_plain_string(), "3385.5");
        assert_eq!(dec!(3385).to_plain_string(), "3385");
        assert_eq!(dec!(0.20).to_plain_string(), "0.2");
    }

    #[test]
    fn test_display_or_placeholder() {
        assert_eq!(display_or(Some(dec!(3350)), "Not set"), "3350");
        assert_eq!(display_or(None, "Not set"), "Not set");
    }
}
