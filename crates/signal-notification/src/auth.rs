//! 명령어 권한 확인.

use crate::types::InboundCommand;

/// 발행/상태 변경 명령어에 대한 권한 확인 trait.
pub trait AuthorizationCheck: Send + Sync {
    /// 이벤트를 보낸 사용자가 명령어를 실행할 수 있는지 확인합니다.
    fn is_authorized(&self, command: &InboundCommand) -> bool;
}

/// 모든 요청을 허용합니다 (기본값).
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AuthorizationCheck for AllowAll {
    fn is_authorized(&self, _command: &InboundCommand) -> bool {
        true
    }
}

/// 지정된 사용자/채팅 ID만 허용합니다.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    ids: Vec<i64>,
}

impl AllowList {
    /// 허용 ID 목록으로 생성합니다.
    pub fn new(ids: Vec<i64>) -> Self {
        Self { ids }
    }
}

impl AuthorizationCheck for AllowList {
    fn is_authorized(&self, command: &InboundCommand) -> bool {
        let sender_allowed = command.sender.is_some_and(|id| self.ids.contains(&id));
        sender_allowed || self.ids.contains(&command.requester)
    }
}

/// 설정된 ID 목록에 맞는 권한 확인기를 생성합니다.
///
/// 목록이 비어 있으면 모두 허용합니다.
pub fn authorization_from_ids(ids: Vec<i64>) -> Box<dyn AuthorizationCheck> {
    if ids.is_empty() {
        Box::new(AllowAll)
    } else {
        Box::new(AllowList::new(ids))
    }
}
