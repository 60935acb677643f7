//! # Signal Core
//!
//! 골드 시그널 봇의 핵심 로직을 제공합니다.
//!
//! 이 크레이트는 전송 계층과 무관한 순수 로직만 담고 있습니다:
//! - 명령어 인자 숫자 파싱
//! - 시그널 및 업데이트 메시지 포맷팅
//! - 리스크 기반 랏 사이즈 계산
//! - 기본 랏 사이즈 상태 셀
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod decimal;
pub mod error;
pub mod format;
pub mod logging;
pub mod lot;
pub mod parser;
pub mod price;
pub mod signal;

pub use self::config::*;
pub use decimal::*;
pub use error::*;
pub use logging::*;
pub use lot::*;
pub use parser::*;
pub use price::*;
pub use signal::*;
