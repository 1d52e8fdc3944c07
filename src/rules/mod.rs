//! 헤더 변환 규칙 모델
//!
//! 설정에서 읽어 들인 규칙과 규칙 검증 에러를 정의합니다.

mod error;
mod rule;

pub use error::RuleError;
pub use rule::{Rule, RuleType};
