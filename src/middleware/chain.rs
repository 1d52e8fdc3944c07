use crate::handler::{Handler, Phase, RequestHead, Target};
use crate::rules::{Rule, RuleError};
use super::MiddlewareError;
use tracing::debug;

/// 규칙 목록으로부터 한 번 만들어지는 핸들러 체인
///
/// 단계별로 선언 순서를 유지합니다. 생성 후에는 읽기만 하므로
/// 여러 요청이 동시에 공유할 수 있습니다.
#[derive(Debug, Default)]
pub struct HandlerChain {
    request: Vec<Handler>,
    response: Vec<Handler>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// 모든 규칙을 검증하며 체인을 만듭니다. 하나라도 실패하면 체인 전체가 실패합니다.
    pub fn from_rules(rules: &[Rule]) -> Result<Self, RuleError> {
        let mut chain = Self::new();
        for rule in rules {
            let handler = Handler::new(rule.clone())?;
            debug!(
                rule = %handler.name(),
                rule_type = %handler.rule_type(),
                phase = ?handler.phase(),
                "핸들러 생성"
            );
            chain.add(handler);
        }
        Ok(chain)
    }

    pub fn add(&mut self, handler: Handler) {
        match handler.phase() {
            Phase::Request => self.request.push(handler),
            Phase::Response => self.response.push(handler),
        }
    }

    pub fn request_handlers(&self) -> &[Handler] {
        &self.request
    }

    pub fn response_handlers(&self) -> &[Handler] {
        &self.response
    }

    pub fn len(&self) -> usize {
        self.request.len() + self.response.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn execute_request_chain<B>(
        &self,
        request: hyper::Request<B>,
    ) -> Result<hyper::Request<B>, MiddlewareError> {
        if self.request.is_empty() {
            return Ok(request);
        }

        let (mut parts, body) = request.into_parts();
        for handler in &self.request {
            debug!(rule = %handler.name(), rule_type = %handler.rule_type(), "요청 규칙 적용");
            handler.handle(Target::Request {
                headers: &mut parts.headers,
                uri: &mut parts.uri,
            })?;
        }
        Ok(hyper::Request::from_parts(parts, body))
    }

    pub fn execute_response_chain<B>(
        &self,
        request: &RequestHead,
        mut response: hyper::Response<B>,
    ) -> Result<hyper::Response<B>, MiddlewareError> {
        // 요청과 같은 선언 순서로 처리
        for handler in &self.response {
            debug!(rule = %handler.name(), rule_type = %handler.rule_type(), "응답 규칙 적용");
            handler.handle(Target::Response {
                headers: response.headers_mut(),
                request,
            })?;
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleType;
    use hyper::header::HeaderValue;

    #[test]
    fn test_from_rules_splits_phases_in_order() {
        let rules = vec![
            Rule::new(RuleType::Set, "X-A").with_value("1"),
            Rule::new(RuleType::Set, "X-B").with_value("2").on_response(),
            Rule::new(RuleType::Delete, "X-C"),
            Rule::new(RuleType::Add, "X-D").on_response(),
        ];

        let chain = HandlerChain::from_rules(&rules).unwrap();

        let request: Vec<_> = chain.request_handlers().iter().map(Handler::name).collect();
        let response: Vec<_> = chain.response_handlers().iter().map(Handler::name).collect();
        assert_eq!(request, vec!["X-A", "X-C"]);
        assert_eq!(response, vec!["X-B", "X-D"]);
        assert_eq!(chain.len(), 4);
    }

    #[test]
    fn test_from_rules_fails_fast() {
        let rules = vec![
            Rule::new(RuleType::Set, "X-A").with_value("1"),
            Rule::new(RuleType::Set, "X-B"),
            Rule {
                rule_type: "Unknown".to_string(),
                ..Default::default()
            },
        ];

        assert!(matches!(
            HandlerChain::from_rules(&rules),
            Err(RuleError::MissingRequiredFields { .. })
        ));
    }

    #[test]
    fn test_request_chain_observes_previous_handlers() {
        let rules = vec![
            Rule::new(RuleType::Set, "X-A").with_value("first"),
            Rule::new(RuleType::Rename, "X-A").with_value("X-B"),
            Rule::new(RuleType::RewriteValue, "X-B")
                .with_value("(.*)")
                .with_value_replace("$1-rewritten"),
        ];
        let chain = HandlerChain::from_rules(&rules).unwrap();
        let request = hyper::Request::builder().uri("/").body(()).unwrap();

        let request = chain.execute_request_chain(request).unwrap();

        assert!(request.headers().get("x-a").is_none());
        assert_eq!(request.headers().get("x-b").unwrap(), "first-rewritten");
    }

    #[test]
    fn test_response_chain() {
        let rules = vec![Rule::new(RuleType::Add, "Set-Cookie")
            .with_value("session=abc123")
            .on_response()];
        let chain = HandlerChain::from_rules(&rules).unwrap();
        let mut response = hyper::Response::new(());
        response
            .headers_mut()
            .append("set-cookie", HeaderValue::from_static("tracking=xyz"));

        let response = chain
            .execute_response_chain(&RequestHead::default(), response)
            .unwrap();

        let cookies: Vec<_> = response.headers().get_all("set-cookie").iter().collect();
        assert_eq!(cookies, vec!["tracking=xyz", "session=abc123"]);
    }
}
