//! Parameter definition types

use crate::types::TypeRef;

/// A documented signature parameter
#[derive(Debug, Clone, PartialEq)]
pub struct DocParameter {
    pub name: String,

    /// From the matching `@param` tag
    pub summary: String,

    pub type_ref: TypeRef,

    /// `?`, rest, or has an initializer
    pub optional: bool,

    /// Rest parameter (`...args`)
    pub rest: bool,

    /// Initializer expression text
    pub default: Option<String>,
}

impl DocParameter {
    /// Create a new required parameter
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            summary: String::new(),
            type_ref,
            optional: false,
            rest: false,
            default: None,
        }
    }

    /// Mark as optional
    pub fn as_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Mark as rest parameter
    pub fn as_rest(mut self) -> Self {
        self.rest = true;
        self.optional = true;
        self
    }

    /// Set default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self.optional = true; // Default implies optional
        self
    }

    /// Set documentation
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

/// Copy summaries positionally from `base` into parameters that have none
pub fn backfill_summaries(params: &mut [DocParameter], base: &[DocParameter]) {
    for (param, base) in params.iter_mut().zip(base) {
        if param.summary.is_empty() && !base.summary.is_empty() {
            param.summary = base.summary.clone();
        }
    }
}
