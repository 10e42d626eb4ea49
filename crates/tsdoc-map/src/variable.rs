//! Field definitions
//!
//! Variables, properties, accessors and enum members all resolve to a
//! [`FieldDef`]; [`FieldKind`] records which declaration produced it.

use crate::checker::{NodeFlags, SyntaxKind};
use crate::types::TypeRef;
use serde::{Deserialize, Serialize};

/// How a field was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Var,
    Let,
    Const,
    /// Class or interface property
    #[default]
    Field,
    /// `get` / `set` pair
    Accessor,
    EnumMember,
}

impl FieldKind {
    /// Classify the owning (non-pattern) declaration of a field
    ///
    /// `list_flags` are the flags of the enclosing declaration list, which is
    /// where `let`/`const` are recorded.
    pub fn from_declaration(kind: SyntaxKind, list_flags: NodeFlags) -> Self {
        match kind {
            SyntaxKind::VariableDeclaration => {
                if list_flags.contains(NodeFlags::CONST) {
                    FieldKind::Const
                } else if list_flags.contains(NodeFlags::LET) {
                    FieldKind::Let
                } else {
                    FieldKind::Var
                }
            }
            SyntaxKind::EnumMember => FieldKind::EnumMember,
            SyntaxKind::GetAccessor | SyntaxKind::SetAccessor => FieldKind::Accessor,
            _ => FieldKind::Field,
        }
    }

    /// Get TypeScript keyword
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            FieldKind::Var => Some("var"),
            FieldKind::Let => Some("let"),
            FieldKind::Const => Some("const"),
            _ => None,
        }
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub decl_kind: FieldKind,

    pub type_ref: TypeRef,

    pub optional: bool,

    pub read_only: bool,

    /// `const` declaration
    pub is_const: bool,

    /// Initializer expression text
    pub default: Option<String>,
}

impl FieldDef {
    pub fn new(decl_kind: FieldKind, type_ref: TypeRef) -> Self {
        Self {
            decl_kind,
            type_ref,
            optional: false,
            read_only: false,
            is_const: decl_kind == FieldKind::Const,
            default: None,
        }
    }
}
