//! Template module
//!
//! Step arguments may reference values saved earlier in the scenario with
//! `{{.KEY}}`. Only plain key substitution is supported.
//!
//! # Usage
//!
//! ```
//! use apistep_application::template::TemplateRenderer;
//! use apistep_domain::Cache;
//!
//! let mut cache = Cache::new();
//! cache.save("HOST", "localhost");
//!
//! let rendered = TemplateRenderer::new(&cache).render("http://{{.HOST}}/api").unwrap();
//! assert_eq!(rendered, "http://localhost/api");
//! ```

pub mod engine;
pub mod parser;

pub use engine::TemplateRenderer;
pub use parser::{Placeholder, is_valid_key, parse_placeholders};
