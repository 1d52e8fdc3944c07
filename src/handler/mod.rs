//! 규칙 핸들러
//!
//! 규칙 하나를 감싸 검증하고 요청 또는 응답 헤더에 적용합니다.
//! 규칙 타입은 고정되어 있으므로 `Handler`는 닫힌 열거형입니다.

mod add;
mod delete;
mod join;
mod rename;
mod rewrite;
mod set;

pub use add::{Add, ValueSource};
pub use delete::Delete;
pub use join::Join;
pub use rename::Rename;
pub use rewrite::RewriteValue;
pub use set::Set;

use crate::middleware::MiddlewareError;
use crate::rules::{Rule, RuleError, RuleType};
use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::Uri;

/// 핸들러가 실행되는 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 요청을 전달하기 전
    Request,
    /// 다음 단계가 응답을 만든 후
    Response,
}

impl Phase {
    pub fn of(rule: &Rule) -> Self {
        if rule.set_on_response {
            Phase::Response
        } else {
            Phase::Request
        }
    }
}

/// 응답 단계 핸들러가 참조하는 전달된 요청의 사본
#[derive(Debug, Clone, Default)]
pub struct RequestHead {
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl RequestHead {
    pub fn from_request<B>(req: &hyper::Request<B>) -> Self {
        Self {
            uri: req.uri().clone(),
            headers: req.headers().clone(),
        }
    }
}

/// 핸들러가 수정할 헤더 테이블
pub enum Target<'a> {
    /// 요청 헤더. 호스트 삭제를 위해 URI도 함께 받습니다.
    Request {
        headers: &'a mut HeaderMap,
        uri: &'a mut Uri,
    },
    /// 응답 헤더와 전달된 요청
    Response {
        headers: &'a mut HeaderMap,
        request: &'a RequestHead,
    },
}

impl<'a> Target<'a> {
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        match self {
            Target::Request { headers, .. } | Target::Response { headers, .. } => &mut **headers,
        }
    }

    /// 값 치환에 쓰이는 요청 헤더
    pub fn request_headers(&self) -> &HeaderMap {
        match self {
            Target::Request { headers, .. } => &**headers,
            Target::Response { request, .. } => &request.headers,
        }
    }

    pub fn request_uri(&self) -> &Uri {
        match self {
            Target::Request { uri, .. } => &**uri,
            Target::Response { request, .. } => &request.uri,
        }
    }
}

/// 규칙 하나에 묶인 핸들러
#[derive(Debug)]
pub enum Handler {
    Add(Add),
    Delete(Delete),
    Rename(Rename),
    Join(Join),
    RewriteValue(RewriteValue),
    Set(Set),
}

impl Handler {
    /// 규칙 타입에 맞는 핸들러를 만들고 검증합니다.
    pub fn new(rule: Rule) -> Result<Self, RuleError> {
        if rule.rule_type.is_empty() {
            return Err(RuleError::MissingType {
                rule: rule.display_name().to_string(),
            });
        }

        let rule_type: RuleType = rule.rule_type.parse().map_err(|_| RuleError::UnknownRuleType {
            rule: rule.display_name().to_string(),
            rule_type: rule.rule_type.clone(),
        })?;

        let handler = match rule_type {
            RuleType::Add => Handler::Add(Add::new(rule)?),
            RuleType::Delete => Handler::Delete(Delete::new(rule)?),
            RuleType::Rename => Handler::Rename(Rename::new(rule)?),
            RuleType::Join => Handler::Join(Join::new(rule)?),
            RuleType::RewriteValue => Handler::RewriteValue(RewriteValue::new(rule)?),
            RuleType::Set => Handler::Set(Set::new(rule)?),
        };

        Ok(handler)
    }

    pub fn rule(&self) -> &Rule {
        match self {
            Handler::Add(h) => h.rule(),
            Handler::Delete(h) => h.rule(),
            Handler::Rename(h) => h.rule(),
            Handler::Join(h) => h.rule(),
            Handler::RewriteValue(h) => h.rule(),
            Handler::Set(h) => h.rule(),
        }
    }

    pub fn rule_type(&self) -> RuleType {
        match self {
            Handler::Add(_) => RuleType::Add,
            Handler::Delete(_) => RuleType::Delete,
            Handler::Rename(_) => RuleType::Rename,
            Handler::Join(_) => RuleType::Join,
            Handler::RewriteValue(_) => RuleType::RewriteValue,
            Handler::Set(_) => RuleType::Set,
        }
    }

    pub fn name(&self) -> &str {
        self.rule().display_name()
    }

    pub fn phase(&self) -> Phase {
        Phase::of(self.rule())
    }

    /// 규칙을 적용합니다. 단계 선택은 호출자(체인)의 몫입니다.
    pub fn handle(&self, target: Target<'_>) -> Result<(), MiddlewareError> {
        match self {
            Handler::Add(h) => h.handle(target),
            Handler::Delete(h) => h.handle(target),
            Handler::Rename(h) => h.handle(target),
            Handler::Join(h) => h.handle(target),
            Handler::RewriteValue(h) => h.handle(target)?,
            Handler::Set(h) => h.handle(target),
        }
        Ok(())
    }
}

fn missing(rule: &Rule, rule_type: RuleType, fields: &'static str) -> RuleError {
    RuleError::MissingRequiredFields {
        rule: rule.display_name().to_string(),
        rule_type,
        fields,
    }
}

fn header_name(rule: &Rule, name: &str) -> Result<HeaderName, RuleError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| RuleError::InvalidHeaderName {
        rule: rule.display_name().to_string(),
        name: name.to_string(),
    })
}

fn header_value(rule: &Rule, value: &str) -> Result<HeaderValue, RuleError> {
    HeaderValue::from_str(value).map_err(|_| RuleError::InvalidHeaderValue {
        rule: rule.display_name().to_string(),
        value: value.to_string(),
    })
}
