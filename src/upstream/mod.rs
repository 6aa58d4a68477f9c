//! 上游调用层：请求组装与执行。

pub mod executor;
pub mod request;

pub use executor::{UpstreamExecutor, parse_maybe_json};
pub use request::{MethodConfig, RequestDescriptor, build};
