//! 명령어 인자 숫자 파싱.
//!
//! 명령어 뒤에 붙은 자유 형식 텍스트에서 숫자를 추출합니다.
//! 파싱 실패는 에러가 아니라 `None`으로 표현되며, 숫자가 아닌 토큰이
//! 0으로 바뀌는 일은 없습니다.

use std::str::FromStr;

use rust_decimal::Decimal;

/// 두 개의 선택적 숫자 인자.
pub type ParsedPair = (Option<Decimal>, Option<Decimal>);

/// 단일 토큰을 숫자로 변환합니다.
///
/// 부호, 소수부, 지수 표기(`1e3`)를 허용합니다. `Decimal`은 소수점 아래
/// 28자리까지만 표현하므로 그보다 긴 소수부는 반올림됩니다. 0이 아닌
/// 값이 반올림으로 0이 되면 `None`을 반환합니다.
fn parse_number(token: &str) -> Option<Decimal> {
    if token.is_empty() || token.contains('_') {
        return None;
    }

    let value = Decimal::from_str(token)
        .or_else(|_| Decimal::from_scientific(token))
        .ok()?;

    if value.is_zero() && has_nonzero_digit(token) {
        return None;
    }
    Some(value)
}

/// 지수부를 제외한 가수부에 0이 아닌 숫자가 있는지 확인합니다.
fn has_nonzero_digit(token: &str) -> bool {
    token
        .split(['e', 'E'])
        .next()
        .is_some_and(|mantissa| mantissa.bytes().any(|b| matches!(b, b'1'..=b'9')))
}

/// 텍스트 전체를 하나의 숫자로 파싱합니다.
///
/// 공백을 제거한 뒤 비어 있거나 숫자가 아니면 `None`을 반환합니다.
pub fn parse_one(text: &str) -> Option<Decimal> {
    parse_number(text.trim())
}

/// 공백으로 구분된 앞의 두 토큰을 각각 숫자로 파싱합니다.
///
/// 토큰이 두 개 미만이면 `(None, None)`을 반환합니다. 첫 번째 칸만
/// 부분적으로 채우지 않습니다. 각 토큰은 독립적으로 파싱되며 세 번째
/// 이후 토큰은 무시됩니다.
pub fn parse_two(text: &str) -> ParsedPair {
    let mut tokens = text.split_whitespace();

    match (tokens.next(), tokens.next()) {
        (Some(first), Some(second)) => (parse_number(first), parse_number(second)),
        _ => (None, None),
    }
}
