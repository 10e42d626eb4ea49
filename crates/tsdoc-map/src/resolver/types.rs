//! Type resolution
//!
//! Maps checker type identities onto [`DocType`] nodes. Classification is a
//! pure ordered table over the type's flags ([`classify_type`]); building a
//! composite node registers its slot in the type cache before any child is
//! resolved, so recursive types close over their own ancestor slot.

use super::context::ResolveContext;
use crate::checker::{LiteralData, ObjectFlags, SignatureId, SymbolFlags, SymbolId, TypeFlags, TypeId};
use crate::diagnostics::DocResult;
use crate::js_doc::TagSet;
use crate::node::MemberRef;
use crate::params::DocParameter;
use crate::ts_type_params::DocTypeParameter;
use crate::types::{DocType, FunctionType, LiteralValue, NativeType, TypeOperator, TypeRef};
use indexmap::IndexMap;
use tracing::{trace, warn};

/// Outcome of the classification table
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TypeClass {
    Native(NativeType),
    ClassRef,
    Array,
    Tuple,
    Generic,
    Function(SignatureId),
    TypeOf(SymbolId),
    Object,
    Literal,
    Union,
    Intersection,
    Conditional,
    IndexedAccess,
    KeyOf,
    This,
    TypeParameter,
    Substitution(TypeId),
    Mixed,
}

/// Ordered, first-match-wins classification of a type
pub(crate) fn classify_type(ctx: &ResolveContext<'_>, ty: TypeId) -> TypeClass {
    let checker = ctx.checker;
    let flags = checker.type_flags(ty);

    if flags.intersects(TypeFlags::INTRINSIC) {
        return TypeClass::Native(native_type(checker.intrinsic_name(ty).as_deref(), flags));
    }

    if flags.contains(TypeFlags::OBJECT) {
        let object_flags = checker.object_flags(ty);
        if object_flags.intersects(ObjectFlags::CLASS_OR_INTERFACE) {
            return TypeClass::ClassRef;
        }
        if object_flags.contains(ObjectFlags::REFERENCE) {
            if checker.is_array_type(ty) {
                return TypeClass::Array;
            }
            let is_tuple = checker
                .reference_target(ty)
                .map_or(false, |target| checker.object_flags(target).contains(ObjectFlags::TUPLE));
            return if is_tuple { TypeClass::Tuple } else { TypeClass::Generic };
        }
        if object_flags.intersects(ObjectFlags::ANONYMOUS | ObjectFlags::MAPPED) {
            let signatures = checker.call_signatures(ty);
            if let [signature] = signatures.as_slice() {
                return TypeClass::Function(*signature);
            }
            return match declaring_symbol(ctx, ty) {
                Some(symbol) => TypeClass::TypeOf(symbol),
                None => TypeClass::Object,
            };
        }
    }

    if flags.intersects(
        TypeFlags::STRING_OR_NUMBER_LITERAL | TypeFlags::BOOLEAN_LITERAL | TypeFlags::BIG_INT_LITERAL,
    ) {
        return TypeClass::Literal;
    }
    if flags.contains(TypeFlags::UNION) {
        return TypeClass::Union;
    }
    if flags.contains(TypeFlags::INTERSECTION) {
        return TypeClass::Intersection;
    }
    if flags.contains(TypeFlags::CONDITIONAL) {
        return TypeClass::Conditional;
    }
    if flags.contains(TypeFlags::INDEXED_ACCESS) {
        return TypeClass::IndexedAccess;
    }
    if flags.contains(TypeFlags::INDEX) {
        return TypeClass::KeyOf;
    }
    if flags.contains(TypeFlags::TYPE_PARAMETER) {
        return if checker.is_this_type(ty) {
            TypeClass::This
        } else {
            TypeClass::TypeParameter
        };
    }
    if flags.contains(TypeFlags::UNIQUE_ES_SYMBOL) {
        return TypeClass::Native(NativeType::UniqueSymbol);
    }
    // enum types without a literal or union shape name their declaring symbol
    if flags.intersects(TypeFlags::ENUM | TypeFlags::ENUM_LITERAL) {
        if let Some(symbol) = checker.type_symbol(ty) {
            return TypeClass::TypeOf(symbol);
        }
    }
    if flags.contains(TypeFlags::SUBSTITUTION) {
        if let Some(base) = checker.substitution_base(ty) {
            return TypeClass::Substitution(base);
        }
    }

    TypeClass::Mixed
}

/// Symbol that names an anonymous object type, ignoring synthetic literal symbols
fn declaring_symbol(ctx: &ResolveContext<'_>, ty: TypeId) -> Option<SymbolId> {
    let symbol = ctx.checker.type_symbol(ty)?;
    let flags = ctx.checker.symbol_flags(symbol);
    if flags.intersects(SymbolFlags::TYPE_LITERAL | SymbolFlags::OBJECT_LITERAL) {
        None
    } else {
        Some(symbol)
    }
}

fn native_type(intrinsic_name: Option<&str>, flags: TypeFlags) -> NativeType {
    if let Some(name) = intrinsic_name {
        let native = NativeType::from_intrinsic_name(name);
        if native != NativeType::Mixed {
            return native;
        }
    }
    let table = [
        (TypeFlags::ANY, NativeType::Any),
        (TypeFlags::UNKNOWN, NativeType::Unknown),
        (TypeFlags::STRING, NativeType::String),
        (TypeFlags::NUMBER, NativeType::Number),
        (TypeFlags::BOOLEAN, NativeType::Boolean),
        (TypeFlags::BIG_INT, NativeType::BigInt),
        (TypeFlags::ES_SYMBOL, NativeType::Symbol),
        (TypeFlags::VOID, NativeType::Void),
        (TypeFlags::UNDEFINED, NativeType::Undefined),
        (TypeFlags::NULL, NativeType::Null),
        (TypeFlags::NEVER, NativeType::Never),
        (TypeFlags::NON_PRIMITIVE, NativeType::Object),
    ];
    table
        .iter()
        .find(|(flag, _)| flags.contains(*flag))
        .map_or(NativeType::Mixed, |(_, native)| *native)
}

impl<'a> ResolveContext<'a> {
    /// Resolve a type identity, reusing the node of an earlier visit
    pub fn resolve_type(&mut self, ty: TypeId) -> DocResult<TypeRef> {
        if let Some(r) = self.type_cache.get(&ty) {
            return Ok(*r);
        }

        let class = classify_type(self, ty);
        trace!(type_id = ty.0, ?class, "resolving type");

        let class = match class {
            TypeClass::Native(native) => return Ok(self.leaf(ty, DocType::Native(native))),
            TypeClass::Literal => {
                let value = self.literal_value(ty);
                return Ok(self.leaf(ty, value));
            }
            TypeClass::This => return Ok(self.leaf(ty, DocType::This)),
            TypeClass::Mixed => {
                warn!(type_id = ty.0, flags = ?self.checker.type_flags(ty), "unsupported type shape");
                return Ok(self.leaf(ty, DocType::mixed()));
            }
            TypeClass::TypeParameter => {
                let name = self.type_parameter_name(ty);
                let declared_by = self.type_param_owners.get(&ty).copied();
                return Ok(self.leaf(ty, DocType::TypeParameterRef { name, declared_by }));
            }
            TypeClass::Substitution(base) => {
                // transparent: the substitution shares its base's node
                let r = self.resolve_type(base)?;
                self.type_cache.insert(ty, r);
                return Ok(r);
            }
            composite => composite,
        };

        let slot = self.graph.types.alloc(DocType::mixed());
        self.type_cache.insert(ty, slot);
        let built = self.build_composite(ty, class)?;
        self.graph.types.replace(slot, built);
        Ok(slot)
    }

    fn leaf(&mut self, ty: TypeId, node: DocType) -> TypeRef {
        let r = self.graph.types.alloc(node);
        self.type_cache.insert(ty, r);
        r
    }

    fn build_composite(&mut self, ty: TypeId, class: TypeClass) -> DocResult<DocType> {
        let checker = self.checker;
        let node = match class {
            TypeClass::ClassRef => DocType::Class {
                class: self.resolve_type_symbol(ty)?,
            },
            TypeClass::Array => {
                let element = checker.element_type_of_array(ty)?;
                DocType::Array {
                    element: self.resolve_type(element)?,
                }
            }
            TypeClass::Tuple => DocType::Tuple {
                elements: self.resolve_types(&checker.type_arguments(ty))?,
            },
            TypeClass::Generic => {
                let target = match checker.reference_target(ty) {
                    Some(target) if target != ty => self.resolve_type(target)?,
                    _ => self.mixed_type(),
                };
                DocType::Generic {
                    target,
                    type_arguments: self.resolve_types(&checker.type_arguments(ty))?,
                }
            }
            TypeClass::Function(signature) => {
                DocType::Function(self.resolve_signature(signature, &TagSet::default(), None)?)
            }
            TypeClass::TypeOf(symbol) => DocType::TypeOf {
                member: self.resolve_member(symbol)?,
            },
            TypeClass::Object => {
                let mut members = Vec::new();
                for property in checker.properties_of_type(ty) {
                    members.extend(self.resolve_member(property)?);
                }
                DocType::Object { members }
            }
            TypeClass::Union => DocType::Union {
                operands: self.resolve_types(&checker.operand_types(ty))?,
            },
            TypeClass::Intersection => DocType::Intersection {
                operands: self.resolve_types(&checker.operand_types(ty))?,
            },
            TypeClass::Conditional => match checker.conditional_root(ty) {
                Some(root) => DocType::Conditional {
                    check_type: self.resolve_type(root.check_type)?,
                    extends_type: self.resolve_type(root.extends_type)?,
                    true_type: self.resolve_type(root.true_type)?,
                    false_type: self.resolve_type(root.false_type)?,
                },
                None => DocType::mixed(),
            },
            TypeClass::IndexedAccess => match checker.indexed_access_parts(ty) {
                Some((operand, argument)) => DocType::IndexedAccess {
                    operand: self.resolve_type(operand)?,
                    argument: self.resolve_type(argument)?,
                },
                None => DocType::mixed(),
            },
            TypeClass::KeyOf => match checker.index_operand(ty) {
                Some(operand) => DocType::Unary {
                    operator: TypeOperator::KeyOf,
                    operand: self.resolve_type(operand)?,
                },
                None => DocType::mixed(),
            },
            // leaves are handled by the caller
            TypeClass::Native(_)
            | TypeClass::Literal
            | TypeClass::This
            | TypeClass::TypeParameter
            | TypeClass::Substitution(_)
            | TypeClass::Mixed => DocType::mixed(),
        };
        Ok(node)
    }

    fn resolve_types(&mut self, types: &[TypeId]) -> DocResult<Vec<TypeRef>> {
        types.iter().map(|ty| self.resolve_type(*ty)).collect()
    }

    fn resolve_type_symbol(&mut self, ty: TypeId) -> DocResult<Option<MemberRef>> {
        match self.checker.type_symbol(ty) {
            Some(symbol) => self.resolve_member(symbol),
            None => Ok(None),
        }
    }

    fn literal_value(&self, ty: TypeId) -> DocType {
        let checker = self.checker;
        if checker.type_flags(ty).contains(TypeFlags::BOOLEAN_LITERAL) {
            let value = checker.intrinsic_name(ty).as_deref() == Some("true");
            return DocType::Literal(LiteralValue::Boolean(value));
        }
        match checker.literal_value(ty) {
            Some(LiteralData::String(s)) => DocType::Literal(LiteralValue::String(s)),
            Some(LiteralData::Number(n)) => DocType::Literal(LiteralValue::Number(n)),
            Some(LiteralData::BigInt {
                negative,
                base10_value,
            }) => {
                let text = if negative {
                    format!("-{base10_value}")
                } else {
                    base10_value
                };
                DocType::Literal(LiteralValue::BigInt(text))
            }
            None => DocType::mixed(),
        }
    }

    fn type_parameter_name(&self, ty: TypeId) -> String {
        self.checker
            .type_symbol(ty)
            .map(|symbol| self.checker.symbol_name(symbol))
            .or_else(|| self.checker.intrinsic_name(ty))
            .unwrap_or_default()
    }

    /// Resolve declared type parameters, recording `owner` as their declarer
    pub(crate) fn resolve_type_parameters(
        &mut self,
        params: &[TypeId],
        summaries: &IndexMap<String, String>,
        owner: Option<MemberRef>,
    ) -> DocResult<Vec<DocTypeParameter>> {
        let mut resolved = Vec::with_capacity(params.len());
        for &param in params {
            if let Some(owner) = owner {
                self.register_type_param_owner(param, owner);
            }
            let name = self.type_parameter_name(param);
            let mut doc = DocTypeParameter::new(name, self.resolve_type(param)?);
            if let Some(constraint) = self.checker.constraint_of(param) {
                doc.constraint = Some(self.resolve_type(constraint)?);
            }
            if let Some(default) = self.checker.default_of(param) {
                doc.default = Some(self.resolve_type(default)?);
            }
            if let Some(summary) = summaries.get(&doc.name) {
                doc.summary = summary.clone();
            }
            resolved.push(doc);
        }
        Ok(resolved)
    }

    /// Resolve one signature; shared by methods and function types
    pub(crate) fn resolve_signature(
        &mut self,
        signature: SignatureId,
        tags: &TagSet,
        owner: Option<MemberRef>,
    ) -> DocResult<FunctionType> {
        let checker = self.checker;

        let type_parameters = self.resolve_type_parameters(
            &checker.signature_type_parameters(signature),
            &tags.type_params,
            owner,
        )?;

        let mut parameters = Vec::new();
        for symbol in checker.signature_parameters(signature) {
            parameters.push(self.resolve_parameter(symbol, tags)?);
        }

        let this_type = match checker.signature_this_parameter(signature) {
            Some(symbol) => Some(self.resolve_symbol_type(symbol)?),
            None => None,
        };

        let return_type = self.resolve_type(checker.return_type(signature))?;

        Ok(FunctionType {
            type_parameters,
            parameters,
            return_type,
            this_type,
        })
    }

    fn resolve_parameter(&mut self, symbol: SymbolId, tags: &TagSet) -> DocResult<DocParameter> {
        let checker = self.checker;
        let name = checker.symbol_name(symbol);
        let type_ref = self.resolve_symbol_type(symbol)?;
        let mut param = DocParameter::new(name, type_ref);

        if let Some(decl) = checker
            .value_declaration(symbol)
            .or_else(|| checker.declarations(symbol).first().copied())
        {
            if checker.has_dot_dot_dot(decl) {
                param = param.as_rest();
            }
            if checker.has_question_token(decl) {
                param = param.as_optional();
            }
            if let Some(default) = checker.initializer_text(decl) {
                param = param.with_default(default);
            }
        }
        if let Some(summary) = tags.params.get(&param.name) {
            param.summary = summary.clone();
        }
        Ok(param)
    }

    /// Type of a symbol at its own declaration; `mixed` when it has none
    pub(crate) fn resolve_symbol_type(&mut self, symbol: SymbolId) -> DocResult<TypeRef> {
        let checker = self.checker;
        let decl = checker
            .value_declaration(symbol)
            .or_else(|| checker.declarations(symbol).first().copied());
        match decl {
            Some(decl) => {
                let ty = checker.type_of_symbol_at_location(symbol, decl)?;
                self.resolve_type(ty)
            }
            None => Ok(self.mixed_type()),
        }
    }
}
