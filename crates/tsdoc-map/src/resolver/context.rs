//! Resolution context
//!
//! One [`ResolveContext`] is threaded through a whole run. It owns the output
//! arenas and the identity-keyed memo maps (symbol -> member, type -> type),
//! which are filled on first visit and never invalidated.

use crate::checker::{Checker, FileId, NodeId, SymbolId, SyntaxKind, TypeId};
use crate::comments::CommentLocator;
use crate::config::DocgenConfig;
use crate::js_doc::{CommentTagReader, TagSet};
use crate::node::{DocGraph, MemberRef, SourceLocation};
use crate::types::{DocType, TypeRef};
use crate::visibility::Visibility;
use rustc_hash::FxHashMap;

/// Memo key for members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum MemberKey {
    /// The member a symbol resolves to
    Symbol(SymbolId),
    /// The class-shaped companion of a function merged with a class or namespace
    Companion(SymbolId),
}

/// State of one resolution run
pub struct ResolveContext<'a> {
    pub(crate) checker: &'a dyn Checker,
    pub(crate) comments: CommentTagReader<'a>,
    pub(crate) config: &'a DocgenConfig,
    pub(crate) graph: DocGraph,
    pub(crate) type_cache: FxHashMap<TypeId, TypeRef>,
    pub(crate) member_cache: FxHashMap<MemberKey, Option<MemberRef>>,
    /// Declaring member of each type parameter seen so far
    pub(crate) type_param_owners: FxHashMap<TypeId, MemberRef>,
    line_starts: FxHashMap<FileId, Vec<usize>>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        checker: &'a dyn Checker,
        locator: &'a dyn CommentLocator,
        config: &'a DocgenConfig,
    ) -> Self {
        Self {
            checker,
            comments: CommentTagReader::new(locator),
            config,
            graph: DocGraph::default(),
            type_cache: FxHashMap::default(),
            member_cache: FxHashMap::default(),
            type_param_owners: FxHashMap::default(),
            line_starts: FxHashMap::default(),
        }
    }

    /// Everything resolved so far
    pub fn graph(&self) -> &DocGraph {
        &self.graph
    }

    pub fn into_graph(self) -> DocGraph {
        self.graph
    }

    /// Resolved member of a symbol, if it has been visited
    pub fn cached_member(&self, symbol: SymbolId) -> Option<MemberRef> {
        self.member_cache
            .get(&MemberKey::Symbol(symbol))
            .copied()
            .flatten()
    }

    /// Resolved type of a type identity, if it has been visited
    pub fn cached_type(&self, ty: TypeId) -> Option<TypeRef> {
        self.type_cache.get(&ty).copied()
    }

    /// Allocate a `mixed` type node (for entities with no type source)
    pub(crate) fn mixed_type(&mut self) -> TypeRef {
        self.graph.types.alloc(DocType::mixed())
    }

    /// Record the declaring member of a type parameter
    ///
    /// A parameter resolved before its owner was known gets its back
    /// reference filled in here.
    pub(crate) fn register_type_param_owner(&mut self, ty: TypeId, owner: MemberRef) {
        self.type_param_owners.entry(ty).or_insert(owner);
        if let Some(r) = self.type_cache.get(&ty).copied() {
            if let DocType::TypeParameterRef { declared_by, .. } = self.graph.types.get_mut(r) {
                declared_by.get_or_insert(owner);
            }
        }
    }

    /// Fold the doc block of a declaration
    ///
    /// Declarations inside a variable statement fall back to the statement's
    /// block, which is where `/** */` is written for `const x = ...`.
    pub(crate) fn read_tags(&self, decl: NodeId) -> TagSet {
        let seed = Visibility::from_modifiers(self.checker.combined_modifier_flags(decl));
        let text = self.checker.file_text(self.checker.node_file(decl));

        let mut node = Some(decl);
        while let Some(current) = node {
            let pos = self.checker.node_span(current).pos;
            if let Some(block) = self.comments.read(text, pos) {
                return TagSet::from_block(Some(&block), seed);
            }
            node = match self.checker.node_kind(current) {
                SyntaxKind::VariableDeclaration
                | SyntaxKind::VariableDeclarationList
                | SyntaxKind::BindingElement
                | SyntaxKind::ObjectBindingPattern
                | SyntaxKind::ArrayBindingPattern => self.checker.node_parent(current),
                _ => None,
            };
        }

        TagSet::from_block(None, seed)
    }

    /// 0-based source range of a declaration
    pub(crate) fn location(&mut self, decl: NodeId) -> SourceLocation {
        let checker = self.checker;
        let file = checker.node_file(decl);
        let span = checker.node_span(decl);
        let text = checker.file_text(file);
        let starts = self
            .line_starts
            .entry(file)
            .or_insert_with(|| line_starts(text));
        let (line, col) = line_col(text, starts, span.start);
        let (end_line, end_col) = line_col(text, starts, span.end);
        SourceLocation {
            file: normalize_path(&checker.file_name(file)),
            line,
            col,
            end_line,
            end_col,
        }
    }
}

/// File name with `/` separators
pub(crate) fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

fn line_col(text: &str, starts: &[usize], offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let line = starts.partition_point(|&s| s <= offset).saturating_sub(1);
    let line_start = starts.get(line).copied().unwrap_or(0);
    let col = text
        .get(line_start..offset)
        .map_or(offset - line_start, |s| s.chars().count());
    (line, col)
}
