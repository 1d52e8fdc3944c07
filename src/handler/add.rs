use super::{header_name, header_value, missing, Target};
use crate::header;
use crate::rules::{Rule, RuleError, RuleType};
use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::Uri;

/// Add 규칙의 값 출처
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSource {
    /// 설정값 그대로
    Literal(HeaderValue),
    /// 요청의 호스트
    Host,
    /// 요청의 다른 헤더 값
    Header(HeaderName),
}

impl ValueSource {
    /// `Value`가 `HeaderPrefix`로 시작하면 접두사를 뗀 나머지를 헤더 이름으로 해석합니다.
    /// 나머지가 비어 있으면 `Value` 자체를 값으로 씁니다.
    pub fn parse(rule: &Rule) -> Result<Self, RuleError> {
        let remainder = if rule.header_prefix.is_empty() {
            None
        } else {
            rule.value.strip_prefix(rule.header_prefix.as_str())
        };

        match remainder {
            None | Some("") => header_value(rule, &rule.value).map(ValueSource::Literal),
            Some(name) if name.eq_ignore_ascii_case("host") => Ok(ValueSource::Host),
            Some(name) => header_name(rule, name).map(ValueSource::Header),
        }
    }

    /// 없는 헤더는 빈 값으로 취급합니다.
    pub fn resolve(&self, headers: &HeaderMap, uri: &Uri) -> HeaderValue {
        let resolved = match self {
            ValueSource::Literal(value) => return value.clone(),
            ValueSource::Host => header::request_host(headers, uri),
            ValueSource::Header(name) => headers.get(name).cloned(),
        };

        resolved.unwrap_or_else(|| HeaderValue::from_static(""))
    }
}

/// 헤더 값 추가 핸들러
#[derive(Debug)]
pub struct Add {
    rule: Rule,
    header: HeaderName,
    source: ValueSource,
}

impl Add {
    pub fn new(rule: Rule) -> Result<Self, RuleError> {
        if rule.header.is_empty() {
            return Err(missing(&rule, RuleType::Add, "Header"));
        }

        let header = header_name(&rule, &rule.header)?;
        let source = ValueSource::parse(&rule)?;

        Ok(Self { rule, header, source })
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn source(&self) -> &ValueSource {
        &self.source
    }

    pub fn handle(&self, mut target: Target<'_>) {
        let value = self.source.resolve(target.request_headers(), target.request_uri());
        header::add(target.headers_mut(), &self.header, value);
    }
}
