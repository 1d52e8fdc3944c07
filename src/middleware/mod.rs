pub mod chain;
pub mod error;
pub mod response;
pub mod traits;
pub mod transform;

use bytes::Bytes;
use http_body_util::Full;

pub use chain::HandlerChain;
pub use error::MiddlewareError;
pub use response::handle_middleware_error;
pub use traits::{Middleware, Next};
pub use transform::HeaderTransformation;

pub type Request = hyper::Request<Full<Bytes>>;
pub type Response = hyper::Response<Full<Bytes>>;
