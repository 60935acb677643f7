//! 시그널 봇의 에러 타입.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum SignalError {
    /// 필수 설정 누락 (시작 시 치명적)
    #[error("필수 설정 누락: {0}")]
    MissingConfig(&'static str),

    /// 잘못된 설정 값
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 명령어 인자
    #[error("잘못된 인자: {0}")]
    InvalidArguments(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type SignalResult<T> = Result<T, SignalError>;

impl From<::config::ConfigError> for SignalError {
    fn from(err: ::config::ConfigError) -> Self {
        SignalError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: SignalError = ::config::ConfigError::Message("bad port".to_string()).into();
        assert!(matches!(err, SignalError::Config(ref msg) if msg.contains("bad port")));
    }

    #[test]
    fn test_missing_config_message_names_key() {
        let err = SignalError::MissingConfig("CHANNEL_ID");
        assert!(err.to_string().contains("CHANNEL_ID"));
    }
}
