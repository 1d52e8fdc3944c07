use super::{MiddlewareError, Request, Response};
use crate::handler::RequestHead;
use async_trait::async_trait;
use std::future::Future;

/// 미들웨어 트레이트
///
/// HTTP 요청과 응답을 수정할 수 있는 인터페이스를 정의합니다.
/// 요청 전달은 호출자가 담당합니다.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// 미들웨어의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// HTTP 요청을 처리합니다.
    async fn handle_request(&self, req: Request) -> Result<Request, MiddlewareError>;

    /// HTTP 응답을 처리합니다. `request`는 전달된 요청의 사본입니다.
    async fn handle_response(
        &self,
        request: &RequestHead,
        res: Response,
    ) -> Result<Response, MiddlewareError>;
}

/// 파이프라인의 다음 단계 (백엔드 또는 다음 미들웨어)
#[async_trait]
pub trait Next: Send + Sync {
    async fn call(&self, req: Request) -> Response;
}

#[async_trait]
impl<F, Fut> Next for F
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send + 'static,
{
    async fn call(&self, req: Request) -> Response {
        (self)(req).await
    }
}
