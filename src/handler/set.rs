use super::{header_name, header_value, missing, Target};
use crate::rules::{Rule, RuleError, RuleType};
use hyper::header::{HeaderName, HeaderValue};

/// 헤더 값 덮어쓰기 핸들러
#[derive(Debug)]
pub struct Set {
    rule: Rule,
    header: HeaderName,
    value: HeaderValue,
}

impl Set {
    pub fn new(rule: Rule) -> Result<Self, RuleError> {
        if rule.header.is_empty() || rule.value.is_empty() {
            return Err(missing(&rule, RuleType::Set, "Header, Value"));
        }

        let header = header_name(&rule, &rule.header)?;
        let value = header_value(&rule, &rule.value)?;

        Ok(Self { rule, header, value })
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn handle(&self, mut target: Target<'_>) {
        target.headers_mut().insert(self.header.clone(), self.value.clone());
    }
}
