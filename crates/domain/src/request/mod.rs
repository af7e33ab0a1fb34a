//! HTTP request types

mod body;
mod method;
mod spec;

pub use body::RequestBody;
pub use method::HttpMethod;
pub use spec::PreparedRequest;
