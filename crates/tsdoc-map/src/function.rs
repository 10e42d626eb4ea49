//! Method definitions
//!
//! Functions, methods, constructors and index signatures. An overload set is
//! one primary [`MethodDef`] whose `overloads` hold the other declarations,
//! each a method member of its own without nested overloads.

use crate::node::MemberRef;
use crate::types::FunctionType;
use serde::{Deserialize, Serialize};

/// Which declaration shape produced a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MethodKind {
    #[default]
    Function,
    Method,
    Constructor,
    IndexSignature,
}

/// Method definition
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub decl_kind: MethodKind,

    /// Type parameters, parameters, return type and `this` type
    pub signature: FunctionType,

    /// From `@returns`
    pub return_summary: String,

    pub is_async: bool,

    pub is_generator: bool,

    /// Non-implementation declarations, in declaration order
    pub overloads: Vec<MemberRef>,

    /// Class-shaped view of a function merged with a class, interface or namespace
    pub class: Option<MemberRef>,
}

impl MethodDef {
    pub fn new(decl_kind: MethodKind, signature: FunctionType) -> Self {
        Self {
            decl_kind,
            signature,
            return_summary: String::new(),
            is_async: false,
            is_generator: false,
            overloads: Vec::new(),
            class: None,
        }
    }

    pub fn has_overloads(&self) -> bool {
        !self.overloads.is_empty()
    }
}
