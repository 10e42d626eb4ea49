//! Member resolution
//!
//! Maps a symbol onto one [`DocMember`]. Symbols are classified by flag
//! priority ([`classify_symbol`]); anything unmatched is documented as a
//! field. Each symbol's slot is cached before its payload is built, so a
//! member that (indirectly) refers to itself links to its own slot.

use super::context::{MemberKey, ResolveContext};
use crate::checker::{ModifierFlags, NodeId, SymbolFlags, SymbolId, SyntaxKind};
use crate::diagnostics::DocResult;
use crate::function::{MethodDef, MethodKind};
use crate::js_doc::TagSet;
use crate::node::{DocMember, MemberDef, MemberRef};
use crate::params;
use crate::type_alias::TypeAliasDef;
use crate::variable::{FieldDef, FieldKind};
use tracing::{trace, warn};

/// Outcome of symbol classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SymbolClass {
    /// Prototype marker, never documented
    Prototype,
    Method,
    Field,
    Accessor,
    Class,
    Enum,
    Namespace,
    TypeAlias,
    /// Nothing matched
    Unclassified,
}

/// Classify a symbol by flag priority
pub(crate) fn classify_symbol(flags: SymbolFlags) -> SymbolClass {
    if flags.contains(SymbolFlags::PROTOTYPE) {
        SymbolClass::Prototype
    } else if flags.intersects(
        SymbolFlags::FUNCTION | SymbolFlags::METHOD | SymbolFlags::CONSTRUCTOR | SymbolFlags::SIGNATURE,
    ) {
        SymbolClass::Method
    } else if flags.intersects(SymbolFlags::VARIABLE | SymbolFlags::PROPERTY | SymbolFlags::ENUM_MEMBER) {
        SymbolClass::Field
    } else if flags.intersects(SymbolFlags::ACCESSOR) {
        SymbolClass::Accessor
    } else if flags.intersects(SymbolFlags::CLASS | SymbolFlags::INTERFACE) {
        SymbolClass::Class
    } else if flags.intersects(SymbolFlags::ENUM) {
        SymbolClass::Enum
    } else if flags.intersects(SymbolFlags::NAMESPACE) {
        SymbolClass::Namespace
    } else if flags.contains(SymbolFlags::TYPE_ALIAS) {
        SymbolClass::TypeAlias
    } else {
        SymbolClass::Unclassified
    }
}

fn method_kind(kind: SyntaxKind) -> MethodKind {
    match kind {
        SyntaxKind::MethodDeclaration | SyntaxKind::MethodSignature => MethodKind::Method,
        SyntaxKind::Constructor | SyntaxKind::ConstructSignature => MethodKind::Constructor,
        SyntaxKind::IndexSignature => MethodKind::IndexSignature,
        _ => MethodKind::Function,
    }
}

impl<'a> ResolveContext<'a> {
    /// Resolve a symbol to its member
    ///
    /// Returns `None` only for prototype marker symbols.
    pub fn resolve_member(&mut self, symbol: SymbolId) -> DocResult<Option<MemberRef>> {
        let key = MemberKey::Symbol(symbol);
        if let Some(cached) = self.member_cache.get(&key) {
            return Ok(*cached);
        }

        let flags = self.checker.symbol_flags(symbol);
        if classify_symbol(flags) == SymbolClass::Prototype {
            self.member_cache.insert(key, None);
            return Ok(None);
        }

        let slot = self
            .graph
            .members
            .alloc(DocMember::placeholder(self.checker.symbol_name(symbol)));
        self.member_cache.insert(key, Some(slot));
        let member = self.build_member(symbol, slot)?;
        // an override built while this member was in progress takes the slot
        if !self.graph.member(slot).is_override {
            self.graph.members.replace(slot, member);
        }
        Ok(Some(slot))
    }

    /// Build a fresh member for `symbol` into `slot`, bypassing the cache
    pub(crate) fn build_member(&mut self, symbol: SymbolId, slot: MemberRef) -> DocResult<DocMember> {
        let flags = self.checker.symbol_flags(symbol);
        let class = classify_symbol(flags);
        trace!(symbol = %self.checker.symbol_name(symbol), ?class, "resolving member");

        match class {
            SymbolClass::Method => self.resolve_method(symbol, slot),
            SymbolClass::Field | SymbolClass::Prototype => self.resolve_field(symbol),
            SymbolClass::Accessor => self.resolve_accessor(symbol),
            SymbolClass::Class => self.resolve_class(symbol, slot),
            SymbolClass::Enum => self.resolve_enum(symbol),
            SymbolClass::Namespace => self.resolve_namespace(symbol),
            SymbolClass::TypeAlias => self.resolve_type_alias(symbol, slot),
            SymbolClass::Unclassified => {
                warn!(
                    symbol = %self.checker.symbol_name(symbol),
                    flags = ?flags,
                    "unclassified symbol, documenting as field"
                );
                self.resolve_field(symbol)
            }
        }
    }

    /// Fill the fields every member shares from a declaration and its tags
    pub(crate) fn common_member(
        &mut self,
        symbol: SymbolId,
        decl: Option<NodeId>,
        tags: TagSet,
        def: MemberDef,
    ) -> DocMember {
        let mut member = DocMember::new(self.checker.symbol_name(symbol), def);
        if let Some(decl) = decl {
            let modifiers = self.checker.combined_modifier_flags(decl);
            member.location = self.location(decl);
            member.is_static = modifiers.contains(ModifierFlags::STATIC);
            member.is_abstract = modifiers.contains(ModifierFlags::ABSTRACT);
            member.is_override = modifiers.contains(ModifierFlags::OVERRIDE);
        }
        if let Some(name) = tags.name {
            member.name = name;
        }
        member.visibility = tags.visibility;
        member.is_abstract |= tags.is_abstract;
        member.is_override |= tags.is_override;
        member.doc = tags.doc;
        member
    }

    fn tags_for(&self, decl: Option<NodeId>) -> TagSet {
        match decl {
            Some(decl) => self.read_tags(decl),
            None => TagSet::default(),
        }
    }

    /// Functions, methods, constructors and signatures, grouped into one overload set
    fn resolve_method(&mut self, symbol: SymbolId, slot: MemberRef) -> DocResult<DocMember> {
        let checker = self.checker;
        let decls: Vec<NodeId> = checker
            .declarations(symbol)
            .into_iter()
            .filter(|d| !checker.node_kind(*d).is_container_declaration())
            .collect();
        if decls.is_empty() {
            return self.resolve_field(symbol);
        }

        let primary_index = self.implementation_index(&decls);
        let mut primary = self.signature_member(symbol, decls[primary_index], slot)?;

        let mut overloads = Vec::new();
        for (i, &decl) in decls.iter().enumerate() {
            if i == primary_index {
                continue;
            }
            let overload_slot = self
                .graph
                .members
                .alloc(DocMember::placeholder(primary.name.clone()));
            let mut overload = self.signature_member(symbol, decl, overload_slot)?;
            overload.name = primary.name.clone();
            overload.visibility = primary.visibility;
            self.graph.members.replace(overload_slot, overload);
            overloads.push(overload_slot);
        }

        if self.config.backfill_overloads && !overloads.is_empty() {
            self.backfill_overloads(&mut primary, &overloads);
        }

        let flags = checker.symbol_flags(symbol);
        let companion = if flags.intersects(SymbolFlags::CLASS | SymbolFlags::INTERFACE | SymbolFlags::NAMESPACE) {
            self.resolve_companion(symbol)?
        } else {
            None
        };

        if let MemberDef::Method(method) = &mut primary.def {
            method.overloads = overloads;
            method.class = companion;
        }
        Ok(primary)
    }

    /// The declaration documented as the primary entry of an overload set
    fn implementation_index(&self, decls: &[NodeId]) -> usize {
        if decls.len() == 1 {
            return 0;
        }
        let with_body: Vec<usize> = (0..decls.len())
            .filter(|&i| self.checker.has_body(decls[i]))
            .collect();
        if let [only] = with_body.as_slice() {
            return *only;
        }
        decls
            .iter()
            .position(|d| self.checker.is_implementation_of_overload(*d))
            .unwrap_or(0)
    }

    /// One signature-backed method member
    pub(crate) fn signature_member(
        &mut self,
        symbol: SymbolId,
        decl: NodeId,
        slot: MemberRef,
    ) -> DocResult<DocMember> {
        let checker = self.checker;
        let tags = self.read_tags(decl);
        let signature = checker.signature_from_declaration(decl)?;
        let function = self.resolve_signature(signature, &tags, Some(slot))?;

        let mut method = MethodDef::new(method_kind(checker.node_kind(decl)), function);
        method.return_summary = tags.returns.clone().unwrap_or_default();
        method.is_async = checker
            .combined_modifier_flags(decl)
            .contains(ModifierFlags::ASYNC);
        method.is_generator = checker.has_asterisk(decl);

        Ok(self.common_member(symbol, Some(decl), tags, MemberDef::Method(method)))
    }

    /// Share summaries and parameter docs across an overload set
    fn backfill_overloads(&mut self, primary: &mut DocMember, overloads: &[MemberRef]) {
        if primary.doc.summary.is_empty() {
            if let Some(summary) = overloads
                .iter()
                .map(|r| &self.graph.member(*r).doc.summary)
                .find(|s| !s.is_empty())
            {
                primary.doc.summary = summary.clone();
            }
        }

        let MemberDef::Method(primary_method) = &mut primary.def else {
            return;
        };
        for &r in overloads {
            if let Some(overload) = self.graph.member(r).as_method() {
                params::backfill_summaries(
                    &mut primary_method.signature.parameters,
                    &overload.signature.parameters,
                );
                if primary_method.return_summary.is_empty() {
                    primary_method.return_summary = overload.return_summary.clone();
                }
            }
        }
        for &r in overloads {
            if let MemberDef::Method(overload) = &mut self.graph.members.get_mut(r).def {
                params::backfill_summaries(
                    &mut overload.signature.parameters,
                    &primary_method.signature.parameters,
                );
                if overload.return_summary.is_empty() {
                    overload.return_summary = primary_method.return_summary.clone();
                }
            }
        }
    }

    /// Variables, properties, enum members and the unclassified fallback
    pub(crate) fn resolve_field(&mut self, symbol: SymbolId) -> DocResult<DocMember> {
        let checker = self.checker;
        let flags = checker.symbol_flags(symbol);
        let decl = checker
            .value_declaration(symbol)
            .or_else(|| checker.declarations(symbol).first().copied());

        let Some(decl) = decl else {
            let type_ref = self.mixed_type();
            let field = FieldDef::new(FieldKind::Field, type_ref);
            return Ok(self.common_member(symbol, None, TagSet::default(), MemberDef::Field(field)));
        };

        // Destructured bindings take their kind from the enclosing declaration
        let mut owner = decl;
        while checker.node_kind(owner).is_binding_pattern() {
            match checker.node_parent(owner) {
                Some(parent) => owner = parent,
                None => break,
            }
        }
        let list_flags = checker
            .node_parent(owner)
            .map(|list| checker.node_flags(list))
            .unwrap_or_default();
        let decl_kind = FieldKind::from_declaration(checker.node_kind(owner), list_flags);

        let ty = checker.type_of_symbol_at_location(symbol, decl)?;
        let mut field = FieldDef::new(decl_kind, self.resolve_type(ty)?);
        field.optional = flags.contains(SymbolFlags::OPTIONAL) || checker.has_question_token(decl);
        field.read_only = decl_kind == FieldKind::Const
            || decl_kind == FieldKind::EnumMember
            || checker
                .combined_modifier_flags(decl)
                .contains(ModifierFlags::READONLY);
        field.default = checker.initializer_text(decl);

        let tags = self.read_tags(decl);
        Ok(self.common_member(symbol, Some(decl), tags, MemberDef::Field(field)))
    }

    /// `get`/`set` pairs, merged into one field
    fn resolve_accessor(&mut self, symbol: SymbolId) -> DocResult<DocMember> {
        let checker = self.checker;
        let flags = checker.symbol_flags(symbol);
        let decls = checker.declarations(symbol);
        let Some(&first) = decls.first() else {
            return self.resolve_field(symbol);
        };

        let ty = checker.type_of_symbol_at_location(symbol, first)?;
        let mut field = FieldDef::new(FieldKind::Accessor, self.resolve_type(ty)?);
        field.read_only = !flags.contains(SymbolFlags::SET_ACCESSOR);
        field.optional = flags.contains(SymbolFlags::OPTIONAL);

        // the first of the pair that carries a comment documents both
        let tags = decls
            .iter()
            .map(|d| self.read_tags(*d))
            .find(|t| !t.doc.is_empty())
            .unwrap_or_else(|| self.read_tags(first));
        Ok(self.common_member(symbol, Some(first), tags, MemberDef::Field(field)))
    }

    fn resolve_type_alias(&mut self, symbol: SymbolId, slot: MemberRef) -> DocResult<DocMember> {
        let checker = self.checker;
        let decls = checker.declarations(symbol);
        let decl = decls
            .iter()
            .copied()
            .find(|d| checker.node_kind(*d) == SyntaxKind::TypeAliasDeclaration)
            .or_else(|| decls.first().copied());
        let tags = self.tags_for(decl);

        let type_parameters = self.resolve_type_parameters(
            &checker.declared_type_parameters(symbol),
            &tags.type_params,
            Some(slot),
        )?;
        let declared = checker.declared_type_of_symbol(symbol)?;
        let alias = TypeAliasDef::new(self.resolve_type(declared)?).with_type_parameters(type_parameters);

        Ok(self.common_member(symbol, decl, tags, MemberDef::TypeAlias(alias)))
    }
}
