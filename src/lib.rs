//! 규칙 기반 HTTP 헤더 변환 미들웨어입니다.
//!
//! # 주요 기능
//!
//! - 요청/응답 헤더 추가, 삭제, 이름 변경, 덮어쓰기
//! - 여러 값을 구분자로 합치기 (Join)
//! - 정규식 기반 값 재작성 (RewriteValueRule)
//! - `HeaderPrefix`를 이용한 다른 헤더 값/호스트 참조
//!
//! 규칙은 설정 시점에 한 번 검증되어 체인으로 만들어지고,
//! 요청마다 선언 순서대로 적용됩니다.
//!
//! # 예제
//!
//! ```
//! use header_transform::config::Config;
//! use header_transform::middleware::{HeaderTransformation, Request, Response};
//! use header_transform::rules::{Rule, RuleType};
//! use bytes::Bytes;
//! use http_body_util::Full;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = Config::new(vec![
//!     Rule::new(RuleType::Rename, "Referer").with_value("Origin"),
//!     Rule::new(RuleType::Set, "X-Frame-Options").with_value("DENY").on_response(),
//! ]);
//!
//! // 다음 단계 (백엔드)
//! let next = |req: Request| async move {
//!     assert!(req.headers().get("referer").is_none());
//!     Response::new(Full::new(Bytes::from("ok")))
//! };
//!
//! let transform = HeaderTransformation::build(&config, next).unwrap();
//!
//! let req = hyper::Request::builder()
//!     .uri("http://example.com/")
//!     .header("Referer", "http://foo.bar")
//!     .body(Full::new(Bytes::new()))
//!     .unwrap();
//!
//! let res = transform.serve(req).await;
//! assert_eq!(res.headers().get("x-frame-options").unwrap(), "DENY");
//! # }
//! ```

pub mod config;
pub mod handler;
pub mod header;
pub mod logging;
pub mod middleware;
pub mod rules;
