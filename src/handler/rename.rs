use super::{header_name, missing, Target};
use crate::header;
use crate::rules::{Rule, RuleError, RuleType};
use hyper::header::HeaderName;

/// 헤더 이름 변경 핸들러
///
/// 값의 순서와 개수를 유지한 채 `Header`의 값들을 `Value` 이름으로 옮깁니다.
#[derive(Debug)]
pub struct Rename {
    rule: Rule,
    from: HeaderName,
    to: HeaderName,
}

impl Rename {
    pub fn new(rule: Rule) -> Result<Self, RuleError> {
        if rule.header.is_empty() || rule.value.is_empty() {
            return Err(missing(&rule, RuleType::Rename, "Header, Value"));
        }

        let from = header_name(&rule, &rule.header)?;
        let to = header_name(&rule, &rule.value)?;

        Ok(Self { rule, from, to })
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn handle(&self, mut target: Target<'_>) {
        let headers = target.headers_mut();
        let values = header::values(headers, &self.from);
        if values.is_empty() {
            return;
        }

        header::delete(headers, &self.from);
        for value in values {
            header::add(headers, &self.to, value);
        }
    }
}
