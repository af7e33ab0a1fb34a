//! HTTP Request body types

use std::collections::BTreeMap;

/// Body of a prepared request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Raw text body, sent verbatim
    Raw(String),
    /// Multipart form fields
    Form(BTreeMap<String, String>),
}

impl RequestBody {
    /// Creates a raw text body.
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self::Raw(content.into())
    }

    /// Creates a multipart form body.
    #[must_use]
    pub const fn form(fields: BTreeMap<String, String>) -> Self {
        Self::Form(fields)
    }

    /// Returns whether the body is empty or none.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Raw(content) => content.is_empty(),
            Self::Form(fields) => fields.is_empty(),
        }
    }
}
