//! Core documentation node types
//!
//! [`DocMember`] is the single tagged union for every documented entity; the
//! kind-specific payload lives in [`MemberDef`]. Members and types are stored
//! in the arenas of a [`DocGraph`] and linked by [`MemberRef`]/[`TypeRef`].
//! Ownership is tree-shaped: a [`DocSourceFile`] owns its top-level members,
//! containers own their member lists, and everything else is a weak lookup.

use crate::arena::{arena_ref, Arena};
use crate::class::ClassDef;
use crate::function::MethodDef;
use crate::js_doc::DocComment;
use crate::r#enum::EnumDef;
use crate::type_alias::TypeAliasDef;
use crate::types::{DocType, TypeArena, TypeRef};
use crate::variable::FieldDef;
use crate::visibility::Visibility;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

arena_ref!(
    /// Reference to a resolved member
    MemberRef
);

/// Storage for every member resolved during a run
pub type MemberArena = Arena<MemberRef, DocMember>;

/// Source range of a declaration, 0-based
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl SourceLocation {
    /// Create an unknown/unset location
    pub fn unknown() -> Self {
        Self::default()
    }

    /// `file:line:col`, 1-based
    pub fn display(&self) -> String {
        format!("{}:{}:{}", self.file, self.line + 1, self.col + 1)
    }
}

/// Namespace definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceDef {
    /// Exported members, in declaration order
    pub members: Vec<MemberRef>,
}

/// Kind-specific payload of a member
#[derive(Debug, Clone, PartialEq)]
pub enum MemberDef {
    Field(FieldDef),
    Method(MethodDef),
    Class(ClassDef),
    Enum(EnumDef),
    Namespace(NamespaceDef),
    TypeAlias(TypeAliasDef),
}

/// A documented entity
#[derive(Debug, Clone, PartialEq)]
pub struct DocMember {
    /// Symbol name, or the `@name` override
    pub name: String,

    /// Name under which a module exports the member
    pub export_name: Option<String>,

    pub doc: DocComment,

    pub location: SourceLocation,

    pub visibility: Visibility,

    pub is_static: bool,

    pub is_abstract: bool,

    /// Redeclares a base type member, or carries `@override`
    pub is_override: bool,

    /// Base type declaring the overridden member
    pub parent: Option<TypeRef>,

    /// The overridden base member (weak)
    pub overrides: Option<MemberRef>,

    pub def: MemberDef,
}

impl DocMember {
    /// A member with default metadata
    pub fn new(name: impl Into<String>, def: MemberDef) -> Self {
        Self {
            name: name.into(),
            export_name: None,
            doc: DocComment::default(),
            location: SourceLocation::unknown(),
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_override: false,
            parent: None,
            overrides: None,
            def,
        }
    }

    /// Slot content while a member is being resolved
    pub(crate) fn placeholder(name: impl Into<String>) -> Self {
        Self::new(name, MemberDef::Namespace(NamespaceDef::default()))
    }

    /// Discriminant used in serialized output
    pub fn member_type(&self) -> &'static str {
        match &self.def {
            MemberDef::Field(_) => "field",
            MemberDef::Method(_) => "method",
            MemberDef::Class(class) if class.is_interface() => "interface",
            MemberDef::Class(_) => "class",
            MemberDef::Enum(_) => "enum",
            MemberDef::Namespace(_) => "namespace",
            MemberDef::TypeAlias(_) => "type",
        }
    }

    pub fn summary(&self) -> &str {
        &self.doc.summary
    }

    pub fn as_field(&self) -> Option<&FieldDef> {
        match &self.def {
            MemberDef::Field(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDef> {
        match &self.def {
            MemberDef::Method(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassDef> {
        match &self.def {
            MemberDef::Class(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDef> {
        match &self.def {
            MemberDef::Enum(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_namespace(&self) -> Option<&NamespaceDef> {
        match &self.def {
            MemberDef::Namespace(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_type_alias(&self) -> Option<&TypeAliasDef> {
        match &self.def {
            MemberDef::TypeAlias(def) => Some(def),
            _ => None,
        }
    }

    /// Members this one owns, in listing order
    pub fn children(&self) -> Vec<MemberRef> {
        match &self.def {
            MemberDef::Method(def) => def.overloads.iter().copied().chain(def.class).collect(),
            MemberDef::Class(def) => def.owned_members().collect(),
            MemberDef::Enum(def) => def
                .members
                .iter()
                .map(|m| m.member)
                .chain(def.namespace_members.iter().copied())
                .collect(),
            MemberDef::Namespace(def) => def.members.clone(),
            MemberDef::Field(_) | MemberDef::TypeAlias(_) => Vec::new(),
        }
    }
}

/// An import edge of a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocImport {
    /// Specifier as written
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub resolved_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<String>,

    #[serde(default)]
    pub external: bool,

    /// `/// <reference path>` rather than an import
    #[serde(default)]
    pub reference: bool,
}

/// One resolved source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocSourceFile {
    /// Path with `/` separators
    pub file_name: String,

    /// Module name, `@module` override, or the file name
    pub name: String,

    /// `.d.ts` file
    pub declaration: bool,

    /// External module (has imports or exports)
    pub module: bool,

    pub summary: String,

    pub author: Option<String>,

    pub version: Option<String>,

    pub copyright: Option<String>,

    pub license: Option<String>,

    pub custom_tags: IndexMap<String, String>,

    pub imports: Vec<DocImport>,

    /// Top-level members, in declaration order
    pub members: Vec<MemberRef>,
}

/// The arenas every ref in a project points into
#[derive(Debug, Clone, Default)]
pub struct DocGraph {
    pub types: TypeArena,
    pub members: MemberArena,
}

impl DocGraph {
    pub fn member(&self, r: MemberRef) -> &DocMember {
        self.members.get(r)
    }

    pub fn doc_type(&self, r: TypeRef) -> &DocType {
        self.types.get(r)
    }
}

/// The resolved documentation of a whole program
#[derive(Debug, Clone, Default)]
pub struct DocProject {
    pub source_files: Vec<DocSourceFile>,
    pub graph: DocGraph,
}

impl DocProject {
    pub fn member(&self, r: MemberRef) -> &DocMember {
        self.graph.member(r)
    }

    pub fn doc_type(&self, r: TypeRef) -> &DocType {
        self.graph.doc_type(r)
    }

    /// Find a source file by (normalized) file name
    pub fn source_file(&self, file_name: &str) -> Option<&DocSourceFile> {
        self.source_files.iter().find(|f| f.file_name == file_name)
    }

    /// Find a member by dotted path (`Outer.Inner.member`) within a file
    pub fn lookup(&self, file_name: &str, path: &str) -> Option<MemberRef> {
        let file = self.source_file(file_name)?;
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = file
            .members
            .iter()
            .copied()
            .find(|r| self.member(*r).name == first)?;
        for segment in segments {
            current = self
                .lookup_children(current)
                .into_iter()
                .find(|r| self.member(*r).name == segment)?;
        }
        Some(current)
    }

    /// Children of a member, looking through a method's class companion
    fn lookup_children(&self, r: MemberRef) -> Vec<MemberRef> {
        let member = self.member(r);
        let mut children = member.children();
        if let Some(companion) = member.as_method().and_then(|m| m.class) {
            children.extend(self.member(companion).children());
        }
        children
    }
}
