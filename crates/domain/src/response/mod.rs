//! HTTP response types

mod spec;
mod timing;

pub use spec::{ResponseSpec, StatusCode};
pub use timing::RequestTiming;
