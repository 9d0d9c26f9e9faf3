//! Fixed UI strings. The interface ships a single Korean locale.

pub const VALIDATION_REQUIRED: &str = "키워드와 글 URL을 모두 입력해주세요.";
pub const HTTP_FAILURE: &str = "요청 처리 중 오류가 발생했습니다.";
pub const NETWORK_FAILURE: &str = "서버와 통신 중 오류가 발생했습니다.";
pub const SEARCH_FAILED: &str = "검색 중 오류가 발생했습니다.";

pub const SUBMIT_LABEL: &str = "노출 체크하기";
pub const SUBMIT_BUSY_LABEL: &str = "검색 중...";

pub const EXPOSED_TITLE: &str = "노출됨!";
pub const NOT_EXPOSED_TITLE: &str = "노출되지 않음";
pub const NO_RESULTS: &str = "검색 결과가 없습니다.";
pub const RANK_SUFFIX: &str = "위";
