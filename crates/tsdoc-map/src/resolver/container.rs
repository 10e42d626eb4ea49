//! Container assembly
//!
//! Builds the ordered member lists of classes, interfaces, enums and
//! namespaces, including the inheritance pass: an own member that redeclares
//! a base type member becomes a new override entry that fills its missing
//! documentation from the base member, and members only reachable through a
//! base type are listed as weak references.

use super::context::{MemberKey, ResolveContext};
use crate::checker::{ConstantValue, NodeId, SymbolFlags, SymbolId, SyntaxKind, TypeId};
use crate::class::{ClassDef, ClassKind};
use crate::diagnostics::DocResult;
use crate::js_doc::TagSet;
use crate::node::{DocMember, MemberDef, MemberRef, NamespaceDef};
use crate::params;
use crate::r#enum::{EnumCounter, EnumDef, EnumMemberDef, EnumValue};
use crate::ts_type_params;
use rustc_hash::FxHashMap;
use tracing::trace;

/// Base type member visible under a name
#[derive(Debug, Clone, Copy)]
struct BaseProperty {
    symbol: SymbolId,
    base_type: TypeId,
}

impl<'a> ResolveContext<'a> {
    /// First declaration of the given kinds, in preference order
    fn preferred_declaration(&self, symbol: SymbolId, kinds: &[SyntaxKind]) -> Option<NodeId> {
        let decls = self.checker.declarations(symbol);
        kinds
            .iter()
            .find_map(|kind| {
                decls
                    .iter()
                    .copied()
                    .find(|d| self.checker.node_kind(*d) == *kind)
            })
            .or_else(|| decls.first().copied())
    }

    pub(crate) fn resolve_class(&mut self, symbol: SymbolId, slot: MemberRef) -> DocResult<DocMember> {
        let decl = self.preferred_declaration(
            symbol,
            &[SyntaxKind::ClassDeclaration, SyntaxKind::InterfaceDeclaration],
        );
        let tags = match decl {
            Some(decl) => self.read_tags(decl),
            None => TagSet::default(),
        };
        let class = self.class_def(symbol, decl, &tags, slot)?;
        let mut member = self.common_member(symbol, decl, tags, MemberDef::Class(class));
        self.append_indexer_summary(&mut member);
        Ok(member)
    }

    /// Class-shaped view of a function merged with a class, interface or namespace
    pub(crate) fn resolve_companion(&mut self, symbol: SymbolId) -> DocResult<Option<MemberRef>> {
        let key = MemberKey::Companion(symbol);
        if let Some(cached) = self.member_cache.get(&key) {
            return Ok(*cached);
        }

        let slot = self
            .graph
            .members
            .alloc(DocMember::placeholder(self.checker.symbol_name(symbol)));
        self.member_cache.insert(key, Some(slot));

        let decl = self.preferred_declaration(
            symbol,
            &[
                SyntaxKind::ClassDeclaration,
                SyntaxKind::InterfaceDeclaration,
                SyntaxKind::ModuleDeclaration,
            ],
        );
        let tags = match decl {
            Some(decl) => self.read_tags(decl),
            None => TagSet::default(),
        };
        let class = self.class_def(symbol, decl, &tags, slot)?;
        let mut member = self.common_member(symbol, decl, tags, MemberDef::Class(class));
        self.append_indexer_summary(&mut member);
        self.graph.members.replace(slot, member);
        Ok(Some(slot))
    }

    fn class_def(
        &mut self,
        symbol: SymbolId,
        decl: Option<NodeId>,
        tags: &TagSet,
        slot: MemberRef,
    ) -> DocResult<ClassDef> {
        let checker = self.checker;
        let flags = checker.symbol_flags(symbol);
        let kind = if flags.contains(SymbolFlags::INTERFACE) && !flags.contains(SymbolFlags::CLASS) {
            ClassKind::Interface
        } else {
            ClassKind::Class
        };
        let mut class = ClassDef::new(kind);

        // a namespace merged into a function has no declared type of its own
        let declared = if flags.intersects(SymbolFlags::CLASS | SymbolFlags::INTERFACE) {
            Some(checker.declared_type_of_symbol(symbol)?)
        } else {
            None
        };

        class.type_parameters = self.resolve_type_parameters(
            &checker.declared_type_parameters(symbol),
            &tags.type_params,
            Some(slot),
        )?;

        let base_types = declared.map(|ty| checker.base_types(ty)).unwrap_or_default();
        for &base in &base_types {
            class.extends.push(self.resolve_type(base)?);
        }

        if let Some(decl) = decl.filter(|d| checker.node_kind(*d) == SyntaxKind::ClassDeclaration) {
            for expression in checker.implements_clause(decl) {
                let ty = checker.type_at_location(expression)?;
                class.implements.push(self.resolve_type(ty)?);
            }
        }

        // statics and merged namespace exports
        for export in checker.exports(symbol) {
            class.members.extend(self.resolve_member(export)?);
        }

        let base_properties = self.base_properties(&base_types);
        for member in checker.members(symbol) {
            let member_flags = checker.symbol_flags(member);
            if member_flags.contains(SymbolFlags::PROTOTYPE) {
                continue;
            }
            if member_flags.contains(SymbolFlags::CONSTRUCTOR) {
                class.constructor = self.resolve_member(member)?;
                continue;
            }
            if member_flags.contains(SymbolFlags::SIGNATURE) {
                let signature_kind = checker
                    .declarations(member)
                    .first()
                    .map(|d| checker.node_kind(*d));
                match signature_kind {
                    Some(SyntaxKind::IndexSignature) => class.indexer = self.resolve_member(member)?,
                    Some(SyntaxKind::ConstructSignature) => {
                        class.new_signature = self.resolve_member(member)?
                    }
                    // call signatures surface through the type, not as members
                    _ => {}
                }
                continue;
            }

            let name = checker.symbol_name(member);
            let resolved = match base_properties.get(&name) {
                Some(base) => Some(self.resolve_override(member, *base)?),
                None => self.resolve_member(member)?,
            };
            class.instance_members.extend(resolved);
        }

        if let Some(declared) = declared {
            for property in checker.properties_of_type(declared) {
                if checker.parent_symbol(property) == Some(symbol) {
                    continue;
                }
                if checker.symbol_flags(property).contains(SymbolFlags::PROTOTYPE) {
                    continue;
                }
                class.extended_members.extend(self.resolve_member(property)?);
            }
        }

        Ok(class)
    }

    /// An index signature's doc text is appended to its owner's summary
    fn append_indexer_summary(&self, member: &mut DocMember) {
        let Some(indexer) = member.as_class().and_then(|class| class.indexer) else {
            return;
        };
        let text = &self.graph.member(indexer).doc.summary;
        if text.is_empty() {
            return;
        }
        if !member.doc.summary.is_empty() {
            member.doc.summary.push('\n');
        }
        member.doc.summary.push_str(text);
    }

    /// Every property visible on the base types, by name; nearest base wins
    fn base_properties(&self, base_types: &[TypeId]) -> FxHashMap<String, BaseProperty> {
        let mut properties = FxHashMap::default();
        for &base_type in base_types {
            for symbol in self.checker.properties_of_type(base_type) {
                properties
                    .entry(self.checker.symbol_name(symbol))
                    .or_insert(BaseProperty { symbol, base_type });
            }
        }
        properties
    }

    /// The member for an own declaration that redeclares a base member
    ///
    /// The override becomes the symbol's cached member; a plain member cached
    /// earlier for the same symbol is rebuilt in place.
    fn resolve_override(&mut self, symbol: SymbolId, base: BaseProperty) -> DocResult<MemberRef> {
        let key = MemberKey::Symbol(symbol);
        let slot = match self.member_cache.get(&key).copied().flatten() {
            Some(slot) if self.graph.member(slot).is_override => return Ok(slot),
            Some(slot) => slot,
            None => {
                let slot = self
                    .graph
                    .members
                    .alloc(DocMember::placeholder(self.checker.symbol_name(symbol)));
                self.member_cache.insert(key, Some(slot));
                slot
            }
        };
        let mut member = self.build_member(symbol, slot)?;

        let base_ref = self.resolve_member(base.symbol)?;
        member.is_override = true;
        member.parent = Some(self.resolve_type(base.base_type)?);
        member.overrides = base_ref;

        if self.config.inherit_docs {
            if let Some(base_ref) = base_ref {
                trace!(member = %member.name, "inheriting docs from base member");
                inherit_member_docs(&mut member, self.graph.member(base_ref));
            }
        }

        self.graph.members.replace(slot, member);
        Ok(slot)
    }

    pub(crate) fn resolve_enum(&mut self, symbol: SymbolId) -> DocResult<DocMember> {
        let checker = self.checker;
        let flags = checker.symbol_flags(symbol);
        let decl = self.preferred_declaration(symbol, &[SyntaxKind::EnumDeclaration]);
        let tags = match decl {
            Some(decl) => self.read_tags(decl),
            None => TagSet::default(),
        };

        let mut def = EnumDef::new(flags.contains(SymbolFlags::CONST_ENUM));
        let mut counter = EnumCounter::default();
        for export in checker.exports(symbol) {
            if !checker.symbol_flags(export).contains(SymbolFlags::ENUM_MEMBER) {
                def.namespace_members.extend(self.resolve_member(export)?);
                continue;
            }
            let Some(member) = self.resolve_member(export)? else {
                continue;
            };
            let name = checker.symbol_name(export);
            let explicit = self.enum_initializer(export);
            let value = counter.assign(&name, explicit);
            def.members.push(EnumMemberDef { name, value, member });
        }

        Ok(self.common_member(symbol, decl, tags, MemberDef::Enum(def)))
    }

    /// Value written on an enum member, if it has an initializer
    fn enum_initializer(&self, member: SymbolId) -> Option<EnumValue> {
        let checker = self.checker;
        let decl = checker
            .value_declaration(member)
            .or_else(|| checker.declarations(member).first().copied())?;
        let text = checker.initializer_text(decl)?;
        EnumValue::parse_literal(&text)
            .or_else(|| {
                checker.constant_value(decl).map(|value| match value {
                    ConstantValue::Number(n) => EnumValue::Number(n),
                    ConstantValue::String(s) => EnumValue::String(s),
                })
            })
            .or(Some(EnumValue::String(text)))
    }

    pub(crate) fn resolve_namespace(&mut self, symbol: SymbolId) -> DocResult<DocMember> {
        let decl = self.preferred_declaration(symbol, &[SyntaxKind::ModuleDeclaration]);
        let tags = match decl {
            Some(decl) => self.read_tags(decl),
            None => TagSet::default(),
        };
        let mut namespace = NamespaceDef::default();
        for export in self.checker.exports(symbol) {
            namespace.members.extend(self.resolve_member(export)?);
        }
        Ok(self.common_member(symbol, decl, tags, MemberDef::Namespace(namespace)))
    }
}

/// Fill an override's missing documentation from the member it overrides
fn inherit_member_docs(member: &mut DocMember, base: &DocMember) {
    member.doc.inherit_from(&base.doc);
    if let (MemberDef::Method(own), MemberDef::Method(inherited)) = (&mut member.def, &base.def) {
        params::backfill_summaries(&mut own.signature.parameters, &inherited.signature.parameters);
        ts_type_params::backfill_summaries(
            &mut own.signature.type_parameters,
            &inherited.signature.type_parameters,
        );
        if own.return_summary.is_empty() {
            own.return_summary = inherited.return_summary.clone();
        }
    }
}
