use std::fmt;
use super::RuleType;

/// 규칙 검증 및 체인 생성 시점의 에러
#[derive(Debug)]
pub enum RuleError {
    /// 규칙 타입이 요구하는 필드가 비어 있음
    MissingRequiredFields {
        rule: String,
        rule_type: RuleType,
        fields: &'static str,
    },
    /// 규칙 타입 누락
    MissingType {
        rule: String,
    },
    /// 알 수 없는 규칙 타입
    UnknownRuleType {
        rule: String,
        rule_type: String,
    },
    /// 컴파일할 수 없는 정규식
    InvalidPattern {
        rule: String,
        pattern: String,
        source: regex_lite::Error,
    },
    /// HTTP 헤더 이름으로 쓸 수 없는 값
    InvalidHeaderName {
        rule: String,
        name: String,
    },
    /// HTTP 헤더 값으로 쓸 수 없는 값
    InvalidHeaderValue {
        rule: String,
        value: String,
    },
}

impl RuleError {
    /// 에러가 발생한 규칙 이름
    pub fn rule(&self) -> &str {
        match self {
            Self::MissingRequiredFields { rule, .. }
            | Self::MissingType { rule }
            | Self::UnknownRuleType { rule, .. }
            | Self::InvalidPattern { rule, .. }
            | Self::InvalidHeaderName { rule, .. }
            | Self::InvalidHeaderValue { rule, .. } => rule,
        }
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredFields { rule, rule_type, fields } =>
                write!(f, "규칙 {} ({}) 필수 필드 누락: {}", rule, rule_type, fields),
            Self::MissingType { rule } =>
                write!(f, "규칙 {} 타입 누락", rule),
            Self::UnknownRuleType { rule, rule_type } =>
                write!(f, "규칙 {} 알 수 없는 타입: {}", rule, rule_type),
            Self::InvalidPattern { rule, pattern, source } =>
                write!(f, "규칙 {} 잘못된 정규식 {}: {}", rule, pattern, source),
            Self::InvalidHeaderName { rule, name } =>
                write!(f, "규칙 {} 잘못된 헤더 이름: {:?}", rule, name),
            Self::InvalidHeaderValue { rule, value } =>
                write!(f, "규칙 {} 잘못된 헤더 값: {:?}", rule, value),
        }
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}
