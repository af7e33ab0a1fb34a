//! apistep Domain - Core value types
//!
//! This crate defines the domain model for the apistep BDD harness:
//! requests and responses, the scenario cache, and the small enumerations
//! that step phrases are parsed into.
//! All types here are pure Rust with no I/O dependencies.

pub mod cache;
pub mod charset;
pub mod cookie;
pub mod duration;
pub mod error;
pub mod format;
pub mod number;
pub mod request;
pub mod response;
pub mod time;

pub use cache::{Cache, CachedValue};
pub use charset::Charset;
pub use cookie::Cookie;
pub use duration::parse_duration;
pub use error::{DomainError, DomainResult};
pub use format::{DataFormat, NodeType};
pub use number::NumericType;
pub use request::{HttpMethod, PreparedRequest, RequestBody};
pub use response::{RequestTiming, ResponseSpec, StatusCode};
pub use time::TimeDirection;
