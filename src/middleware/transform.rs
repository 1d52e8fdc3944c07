use super::{handle_middleware_error, HandlerChain, Middleware, MiddlewareError, Next, Request, Response};
use crate::config::Config;
use crate::handler::RequestHead;
use crate::logging::{log_request, TransformLog};
use crate::rules::RuleError;
use async_trait::async_trait;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{error, info, instrument};
use uuid::Uuid;

const DEFAULT_NAME: &str = "htransformation";

/// 헤더 변환 미들웨어
///
/// 설정 시점에 체인을 한 번 만들고, 요청마다
/// 요청 규칙 적용 → 다음 단계 호출 → 응답 규칙 적용 순서로 처리합니다.
pub struct HeaderTransformation {
    name: String,
    chain: HandlerChain,
    next: Box<dyn Next>,
}

impl HeaderTransformation {
    /// 규칙을 모두 검증하여 미들웨어를 만듭니다. 잘못된 규칙이 하나라도 있으면 실패합니다.
    pub fn build(config: &Config, next: impl Next + 'static) -> Result<Self, RuleError> {
        let chain = HandlerChain::from_rules(&config.rules)?;

        info!(
            middleware = DEFAULT_NAME,
            request_rules = chain.request_handlers().len(),
            response_rules = chain.response_handlers().len(),
            "헤더 변환 체인 생성 완료"
        );

        Ok(Self {
            name: DEFAULT_NAME.to_string(),
            chain,
            next: Box::new(next),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn chain(&self) -> &HandlerChain {
        &self.chain
    }

    /// 요청 하나를 처리합니다.
    ///
    /// 요청 단계에서 실패하면 다음 단계를 호출하지 않고 500 응답을 반환합니다.
    #[instrument(skip_all, fields(middleware = %self.name))]
    pub async fn serve(&self, req: Request) -> Response {
        let start_time = Instant::now();
        let mut log = TransformLog::new(Uuid::new_v4().to_string());
        log.with_request(&req);
        log.with_chain(&self.chain);

        let response = match self.handle_request(req).await {
            Ok(req) => {
                let head = RequestHead::from_request(&req);
                let res = self.next.call(req).await;
                match self.handle_response(&head, res).await {
                    Ok(res) => res,
                    Err(e) => {
                        log.with_error(&e);
                        handle_middleware_error(e)
                    }
                }
            }
            Err(e) => {
                log.with_error(&e);
                handle_middleware_error(e)
            }
        };

        log.with_response(response.status());
        log.duration_ms = start_time.elapsed().as_millis() as u64;
        log_request(&log);

        response
    }

    /// 핸들러 패닉을 요청 단위 에러로 바꿉니다.
    fn guard<T>(
        &self,
        phase: &'static str,
        f: impl FnOnce() -> Result<T, MiddlewareError>,
    ) -> Result<T, MiddlewareError> {
        panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            error!(middleware = %self.name, phase, message = %message, "핸들러 실행 중 패닉");
            Err(MiddlewareError::Panic {
                middleware: self.name.clone(),
                message,
            })
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[async_trait]
impl Middleware for HeaderTransformation {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle_request(&self, req: Request) -> Result<Request, MiddlewareError> {
        self.guard("request", || self.chain.execute_request_chain(req))
    }

    async fn handle_response(
        &self,
        request: &RequestHead,
        res: Response,
    ) -> Result<Response, MiddlewareError> {
        self.guard("response", || self.chain.execute_response_chain(request, res))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn Any + Send> = Box::new(42);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }

    #[test]
    fn test_guard_turns_panic_into_error() {
        let config = Config::default();
        let engine = HeaderTransformation::build(&config, |_req: Request| async {
            Response::new(Default::default())
        })
        .unwrap()
        .with_name("demo-plugin");

        let result: Result<(), MiddlewareError> = engine.guard("request", || panic!("handler fault"));

        match result {
            Err(MiddlewareError::Panic { middleware, message }) => {
                assert_eq!(middleware, "demo-plugin");
                assert_eq!(message, "handler fault");
            }
            other => panic!("패닉이 에러로 변환되어야 함: {:?}", other),
        }
    }
}
