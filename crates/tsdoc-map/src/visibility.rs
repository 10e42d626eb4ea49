//! Member visibility
//!
//! Visibility starts from the declaration's modifiers and is then adjusted by
//! the doc tags of its comment (see [`crate::js_doc::TagSet`]).

use crate::checker::ModifierFlags;
use serde::{Deserialize, Serialize};

/// Member visibility level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    #[default]
    Public,

    /// `protected` modifier or `@protected`
    Protected,

    /// `private` modifier or `@private`
    Private,

    /// `@internal` / `@package`
    Internal,
}

impl Visibility {
    /// Derive from syntactic modifiers
    pub fn from_modifiers(flags: ModifierFlags) -> Self {
        if flags.contains(ModifierFlags::PRIVATE) {
            Visibility::Private
        } else if flags.contains(ModifierFlags::PROTECTED) {
            Visibility::Protected
        } else {
            Visibility::Public
        }
    }

    /// Derive from the text of an `@access` tag
    pub fn from_access(text: &str) -> Self {
        match text.trim() {
            "package" | "internal" => Visibility::Internal,
            "protected" => Visibility::Protected,
            "private" => Visibility::Private,
            _ => Visibility::Public,
        }
    }

    /// Check if this is publicly visible
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }

    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}
