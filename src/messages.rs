//! Fixed user-facing strings.

pub const RATE_LIMITED: &str = "API 요청 한도가 초과되었습니다. 잠시 후 다시 시도해주세요.";
pub const INVALID_API_KEY: &str = "API 키가 유효하지 않습니다. 관리자에게 문의해주세요.";
pub const NO_RESPONSE: &str = "응답을 생성할 수 없습니다.";
pub const EMPTY_TEXT_FALLBACK: &str = "죄송합니다. 응답을 생성할 수 없습니다.";
pub const TASK_COMPLETED: &str = "작업을 완료했습니다.";

pub fn upstream_failure(detail: &str) -> String {
    format!("AI 처리 중 오류가 발생했습니다: {}", detail)
}

pub const UNTITLED: &str = "제목 없음";
pub const EVENT_ID_REQUIRED: &str = "이벤트 ID가 필요합니다.";
pub const UNKNOWN_FUNCTION: &str = "알 수 없는 기능입니다.";
pub const EVENT_DELETED: &str = "일정이 삭제되었습니다.";
pub const CREATE_FAILED: &str = "일정 생성에 실패했습니다.";
pub const LOOKUP_FAILED: &str = "일정 조회에 실패했습니다.";
pub const UPDATE_FAILED: &str = "일정 수정에 실패했습니다.";
pub const DELETE_FAILED: &str = "일정 삭제에 실패했습니다.";
