use super::{header_name, header_value, missing, Target};
use crate::header;
use crate::middleware::MiddlewareError;
use crate::rules::{Rule, RuleError, RuleType};
use hyper::header::{HeaderName, HeaderValue};
use regex_lite::Regex;

/// 정규식으로 헤더 값을 다시 쓰는 핸들러
///
/// `Value`는 패턴, `ValueReplace`는 `$1`, `${name}` 형태의 치환 템플릿입니다.
/// 같은 이름의 값이 여러 개면 하나로 합치지 않고 값마다 따로 다시 씁니다.
/// 일치하지 않는 값은 그대로 둡니다.
#[derive(Debug)]
pub struct RewriteValue {
    rule: Rule,
    header: HeaderName,
    pattern: Regex,
}

impl RewriteValue {
    pub fn new(rule: Rule) -> Result<Self, RuleError> {
        if rule.header.is_empty() || rule.value.is_empty() || rule.value_replace.is_empty() {
            return Err(missing(&rule, RuleType::RewriteValue, "Header, Value, ValueReplace"));
        }

        let header = header_name(&rule, &rule.header)?;
        let pattern = Regex::new(&rule.value).map_err(|source| RuleError::InvalidPattern {
            rule: rule.display_name().to_string(),
            pattern: rule.value.clone(),
            source,
        })?;
        // 치환 결과가 유효한 헤더 값이 되도록 템플릿 자체도 검사
        header_value(&rule, &rule.value_replace)?;

        Ok(Self { rule, header, pattern })
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn handle(&self, mut target: Target<'_>) -> Result<(), MiddlewareError> {
        let headers = target.headers_mut();
        let current = header::values(headers, &self.header);

        let mut rewritten = Vec::with_capacity(current.len());
        let mut changed = false;
        for value in &current {
            // obs-text(0x80-0xFF)도 UTF-8이면 문자열로 다룸
            match std::str::from_utf8(value.as_bytes()) {
                Ok(text) if self.pattern.is_match(text) => {
                    rewritten.push(self.rewrite(text)?);
                    changed = true;
                }
                _ => rewritten.push(value.clone()),
            }
        }

        if changed {
            header::delete(headers, &self.header);
            for value in rewritten {
                header::add(headers, &self.header, value);
            }
        }

        Ok(())
    }

    /// 결과는 검증된 템플릿과 원래 값의 조각으로만 이루어집니다.
    fn rewrite(&self, text: &str) -> Result<HeaderValue, MiddlewareError> {
        let replaced = self.pattern.replace_all(text, self.rule.value_replace.as_str());
        HeaderValue::from_str(&replaced).map_err(|e| MiddlewareError::Handler {
            rule: self.rule.display_name().to_string(),
            message: e.to_string(),
        })
    }
}
