//! TypeScript type parameters (generics)
//!
//! Represents `<T>`, `<T extends Foo>`, `<T = Bar>` on classes, interfaces,
//! aliases and signatures.

use crate::types::TypeRef;

/// A documented type parameter
#[derive(Debug, Clone, PartialEq)]
pub struct DocTypeParameter {
    /// Parameter name (e.g., "T", "K", "V")
    pub name: String,

    /// From the matching `@template` / `@typeparam` tag
    pub summary: String,

    /// The parameter itself, resolved as a `typeParameterRef`
    pub type_ref: TypeRef,

    /// Constraint (extends clause)
    pub constraint: Option<TypeRef>,

    /// Default value
    pub default: Option<TypeRef>,
}

impl DocTypeParameter {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            summary: String::new(),
            type_ref,
            constraint: None,
            default: None,
        }
    }

    /// Set the constraint (extends clause)
    pub fn with_constraint(mut self, constraint: TypeRef) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: TypeRef) -> Self {
        self.default = Some(default);
        self
    }
}

/// Copy summaries positionally from `base` into type parameters that have none
pub fn backfill_summaries(params: &mut [DocTypeParameter], base: &[DocTypeParameter]) {
    for (param, base) in params.iter_mut().zip(base) {
        if param.summary.is_empty() && !base.summary.is_empty() {
            param.summary = base.summary.clone();
        }
    }
}
