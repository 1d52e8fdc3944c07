/// 요청 처리 중 발생하는 에러
///
/// 설정 에러(`RuleError`)와 달리 요청 하나만 실패시키며 500 응답으로 변환됩니다.
#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    #[error("규칙 {rule} 실행 실패: {message}")]
    Handler {
        rule: String,
        message: String,
    },

    #[error("미들웨어 {middleware} 실행 중 패닉: {message}")]
    Panic {
        middleware: String,
        message: String,
    },
}
