//! Test utilities: an in-memory program
//!
//! [`ProgramBuilder`] assembles a small program declaration by declaration.
//! Every declaration is also written into its file's source text, with the
//! doc comment in front of it, so comment lookup and source locations go
//! through the same code paths as with a real front end. [`MemoryProgram`]
//! answers the [`Checker`] queries from the recorded tables.
//!
//! # Example
//!
//! ```
//! use tsdoc_map::test::{ProgramBuilder, Sig, Param};
//! use tsdoc_map::ProjectAssembler;
//!
//! let mut b = ProgramBuilder::new();
//! let file = b.module("math.ts");
//! let number = b.number_type();
//! b.function(
//!     file,
//!     "/** Add two numbers\n * @param a left */",
//!     "add",
//!     Sig::returning(number)
//!         .param(Param::new("a", number))
//!         .param(Param::new("b", number)),
//! );
//! let program = b.build();
//!
//! let project = ProjectAssembler::new(&program).assemble_roots().unwrap();
//! let add = project.lookup("math.ts", "add").unwrap();
//! let method = project.member(add).as_method().unwrap();
//! assert_eq!(method.signature.parameters[0].summary, "left");
//! ```

use crate::checker::{
    Checker, ConditionalRoot, ConstantValue, FileId, LiteralData, ModifierFlags, NodeFlags, NodeId,
    ObjectFlags, ResolvedModule, SignatureId, Span, SymbolFlags, SymbolId, SyntaxKind, TypeFlags,
    TypeId,
};
use crate::diagnostics::{DocError, DocResult};
use crate::r#enum::{EnumCounter, EnumValue};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone)]
struct FileData {
    name: String,
    text: String,
    module_name: Option<String>,
    declaration: bool,
    module: bool,
    node: NodeId,
    symbol: SymbolId,
    locals: Vec<SymbolId>,
    resolved_modules: Vec<ResolvedModule>,
    referenced_files: Vec<String>,
}

#[derive(Debug, Clone)]
struct SymbolData {
    name: String,
    flags: SymbolFlags,
    declarations: Vec<NodeId>,
    value_declaration: Option<NodeId>,
    exports: Vec<SymbolId>,
    members: Vec<SymbolId>,
    parent: Option<SymbolId>,
    ty: Option<TypeId>,
    declared_type: Option<TypeId>,
    type_parameters: Vec<TypeId>,
}

#[derive(Debug, Clone, Default)]
struct TypeData {
    flags: TypeFlags,
    object_flags: ObjectFlags,
    symbol: Option<SymbolId>,
    intrinsic_name: Option<String>,
    literal: Option<LiteralData>,
    target: Option<TypeId>,
    arguments: Vec<TypeId>,
    operands: Vec<TypeId>,
    conditional: Option<ConditionalRoot>,
    indexed_access: Option<(TypeId, TypeId)>,
    index_operand: Option<TypeId>,
    is_this: bool,
    substitution_base: Option<TypeId>,
    constraint: Option<TypeId>,
    default: Option<TypeId>,
    base_types: Vec<TypeId>,
    properties: Vec<SymbolId>,
    call_signatures: Vec<SignatureId>,
    element: Option<TypeId>,
}

#[derive(Debug, Clone)]
struct SignatureData {
    declaration: Option<NodeId>,
    type_parameters: Vec<TypeId>,
    parameters: Vec<SymbolId>,
    this_parameter: Option<SymbolId>,
    return_type: TypeId,
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: SyntaxKind,
    parent: Option<NodeId>,
    file: FileId,
    span: Span,
    flags: NodeFlags,
    modifiers: ModifierFlags,
    name: Option<String>,
    initializer: Option<String>,
    has_body: bool,
    asterisk: bool,
    question: bool,
    dot_dot_dot: bool,
    implements: Vec<NodeId>,
    constant: Option<ConstantValue>,
    signature: Option<SignatureId>,
    implementation: bool,
    type_at: Option<TypeId>,
    symbol: Option<SymbolId>,
}

impl NodeData {
    fn new(kind: SyntaxKind, file: FileId, span: Span, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            file,
            span,
            flags: NodeFlags::empty(),
            modifiers: ModifierFlags::empty(),
            name: None,
            initializer: None,
            has_body: false,
            asterisk: false,
            question: false,
            dot_dot_dot: false,
            implements: Vec::new(),
            constant: None,
            signature: None,
            implementation: false,
            type_at: None,
            symbol: None,
        }
    }
}

/// A resolved program held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryProgram {
    files: Vec<FileData>,
    symbols: Vec<SymbolData>,
    types: Vec<TypeData>,
    signatures: Vec<SignatureData>,
    nodes: Vec<NodeData>,
    failing: FxHashSet<NodeId>,
}

impl MemoryProgram {
    fn symbol(&self, symbol: SymbolId) -> &SymbolData {
        &self.symbols[symbol.index()]
    }

    fn ty(&self, ty: TypeId) -> &TypeData {
        &self.types[ty.index()]
    }

    fn node(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.index()]
    }

    fn try_symbol(&self, symbol: SymbolId) -> DocResult<&SymbolData> {
        self.symbols
            .get(symbol.index())
            .ok_or_else(|| DocError::unknown_handle("symbol", symbol.0))
    }

    /// Known node that the checker has not been told to reject
    fn checked_node(&self, node: NodeId) -> DocResult<&NodeData> {
        let data = self
            .nodes
            .get(node.index())
            .ok_or_else(|| DocError::unknown_handle("node", node.0))?;
        if self.failing.contains(&node) {
            return Err(DocError::checker(format!(
                "cannot resolve {:?} node #{}",
                data.kind, node.0
            )));
        }
        Ok(data)
    }

    /// Instance properties of a class or interface type, own first, then inherited
    fn collect_properties(&self, ty: TypeId) -> Vec<SymbolId> {
        let data = self.ty(ty);
        if !data.object_flags.intersects(ObjectFlags::CLASS_OR_INTERFACE) {
            return match data.target {
                Some(target) if target != ty => self.collect_properties(target),
                _ => data.properties.clone(),
            };
        }

        let mut properties: Vec<SymbolId> = data
            .symbol
            .map(|owner| {
                self.symbol(owner)
                    .members
                    .iter()
                    .copied()
                    .filter(|m| {
                        !self
                            .symbol(*m)
                            .flags
                            .intersects(SymbolFlags::CONSTRUCTOR | SymbolFlags::SIGNATURE)
                    })
                    .collect()
            })
            .unwrap_or_default();

        for &base in &data.base_types {
            for inherited in self.collect_properties(base) {
                let name = &self.symbol(inherited).name;
                if !properties.iter().any(|p| &self.symbol(*p).name == name) {
                    properties.push(inherited);
                }
            }
        }
        properties
    }
}

impl Checker for MemoryProgram {
    fn root_files(&self) -> Vec<FileId> {
        (0..self.files.len()).map(|i| FileId(i as u32)).collect()
    }

    fn file_name(&self, file: FileId) -> String {
        self.files[file.index()].name.clone()
    }

    fn file_text(&self, file: FileId) -> &str {
        &self.files[file.index()].text
    }

    fn module_name(&self, file: FileId) -> Option<String> {
        self.files[file.index()].module_name.clone()
    }

    fn is_declaration_file(&self, file: FileId) -> bool {
        self.files[file.index()].declaration
    }

    fn is_external_module(&self, file: FileId) -> bool {
        self.files[file.index()].module
    }

    fn file_node(&self, file: FileId) -> NodeId {
        self.files[file.index()].node
    }

    fn file_locals(&self, file: FileId) -> Vec<SymbolId> {
        self.files[file.index()].locals.clone()
    }

    fn resolved_modules(&self, file: FileId) -> Vec<ResolvedModule> {
        self.files[file.index()].resolved_modules.clone()
    }

    fn referenced_files(&self, file: FileId) -> Vec<String> {
        self.files[file.index()].referenced_files.clone()
    }

    fn symbol_name(&self, symbol: SymbolId) -> String {
        self.symbol(symbol).name.clone()
    }

    fn symbol_flags(&self, symbol: SymbolId) -> SymbolFlags {
        self.symbol(symbol).flags
    }

    fn declarations(&self, symbol: SymbolId) -> Vec<NodeId> {
        self.symbol(symbol).declarations.clone()
    }

    fn value_declaration(&self, symbol: SymbolId) -> Option<NodeId> {
        self.symbol(symbol).value_declaration
    }

    fn exports(&self, symbol: SymbolId) -> Vec<SymbolId> {
        self.symbol(symbol).exports.clone()
    }

    fn members(&self, symbol: SymbolId) -> Vec<SymbolId> {
        self.symbol(symbol).members.clone()
    }

    fn parent_symbol(&self, symbol: SymbolId) -> Option<SymbolId> {
        self.symbol(symbol).parent
    }

    fn symbol_at_location(&self, node: NodeId) -> DocResult<SymbolId> {
        self.checked_node(node)?
            .symbol
            .ok_or_else(|| DocError::checker(format!("no symbol at node #{}", node.0)))
    }

    fn declared_type_parameters(&self, symbol: SymbolId) -> Vec<TypeId> {
        self.symbol(symbol).type_parameters.clone()
    }

    fn exports_of_module(&self, module: SymbolId) -> DocResult<Vec<SymbolId>> {
        Ok(self.try_symbol(module)?.exports.clone())
    }

    fn type_of_symbol_at_location(&self, symbol: SymbolId, node: NodeId) -> DocResult<TypeId> {
        self.checked_node(node)?;
        let data = self.try_symbol(symbol)?;
        data.ty
            .ok_or_else(|| DocError::checker(format!("no type for `{}`", data.name)))
    }

    fn declared_type_of_symbol(&self, symbol: SymbolId) -> DocResult<TypeId> {
        let data = self.try_symbol(symbol)?;
        data.declared_type
            .ok_or_else(|| DocError::checker(format!("`{}` declares no type", data.name)))
    }

    fn type_at_location(&self, node: NodeId) -> DocResult<TypeId> {
        self.checked_node(node)?
            .type_at
            .ok_or_else(|| DocError::checker(format!("no type at node #{}", node.0)))
    }

    fn base_types(&self, ty: TypeId) -> Vec<TypeId> {
        self.ty(ty).base_types.clone()
    }

    fn properties_of_type(&self, ty: TypeId) -> Vec<SymbolId> {
        self.collect_properties(ty)
    }

    fn call_signatures(&self, ty: TypeId) -> Vec<SignatureId> {
        self.ty(ty).call_signatures.clone()
    }

    fn is_array_type(&self, ty: TypeId) -> bool {
        self.ty(ty).element.is_some()
    }

    fn element_type_of_array(&self, ty: TypeId) -> DocResult<TypeId> {
        self.types
            .get(ty.index())
            .ok_or_else(|| DocError::unknown_handle("type", ty.0))?
            .element
            .ok_or_else(|| DocError::checker(format!("type #{} is not an array", ty.0)))
    }

    fn type_flags(&self, ty: TypeId) -> TypeFlags {
        self.ty(ty).flags
    }

    fn object_flags(&self, ty: TypeId) -> ObjectFlags {
        self.ty(ty).object_flags
    }

    fn type_symbol(&self, ty: TypeId) -> Option<SymbolId> {
        self.ty(ty).symbol
    }

    fn intrinsic_name(&self, ty: TypeId) -> Option<String> {
        self.ty(ty).intrinsic_name.clone()
    }

    fn literal_value(&self, ty: TypeId) -> Option<LiteralData> {
        self.ty(ty).literal.clone()
    }

    fn reference_target(&self, ty: TypeId) -> Option<TypeId> {
        self.ty(ty).target
    }

    fn type_arguments(&self, ty: TypeId) -> Vec<TypeId> {
        self.ty(ty).arguments.clone()
    }

    fn operand_types(&self, ty: TypeId) -> Vec<TypeId> {
        self.ty(ty).operands.clone()
    }

    fn conditional_root(&self, ty: TypeId) -> Option<ConditionalRoot> {
        self.ty(ty).conditional
    }

    fn indexed_access_parts(&self, ty: TypeId) -> Option<(TypeId, TypeId)> {
        self.ty(ty).indexed_access
    }

    fn index_operand(&self, ty: TypeId) -> Option<TypeId> {
        self.ty(ty).index_operand
    }

    fn is_this_type(&self, ty: TypeId) -> bool {
        self.ty(ty).is_this
    }

    fn substitution_base(&self, ty: TypeId) -> Option<TypeId> {
        self.ty(ty).substitution_base
    }

    fn constraint_of(&self, ty: TypeId) -> Option<TypeId> {
        self.ty(ty).constraint
    }

    fn default_of(&self, ty: TypeId) -> Option<TypeId> {
        self.ty(ty).default
    }

    fn signature_from_declaration(&self, node: NodeId) -> DocResult<SignatureId> {
        self.checked_node(node)?
            .signature
            .ok_or_else(|| DocError::checker(format!("node #{} has no signature", node.0)))
    }

    fn signature_declaration(&self, signature: SignatureId) -> Option<NodeId> {
        self.signatures[signature.index()].declaration
    }

    fn signature_type_parameters(&self, signature: SignatureId) -> Vec<TypeId> {
        self.signatures[signature.index()].type_parameters.clone()
    }

    fn signature_parameters(&self, signature: SignatureId) -> Vec<SymbolId> {
        self.signatures[signature.index()].parameters.clone()
    }

    fn signature_this_parameter(&self, signature: SignatureId) -> Option<SymbolId> {
        self.signatures[signature.index()].this_parameter
    }

    fn return_type(&self, signature: SignatureId) -> TypeId {
        self.signatures[signature.index()].return_type
    }

    fn is_implementation_of_overload(&self, node: NodeId) -> bool {
        self.node(node).implementation
    }

    fn node_kind(&self, node: NodeId) -> SyntaxKind {
        self.node(node).kind
    }

    fn node_parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn node_file(&self, node: NodeId) -> FileId {
        self.node(node).file
    }

    fn node_span(&self, node: NodeId) -> Span {
        self.node(node).span
    }

    fn node_flags(&self, node: NodeId) -> NodeFlags {
        self.node(node).flags
    }

    fn combined_modifier_flags(&self, node: NodeId) -> ModifierFlags {
        self.node(node).modifiers
    }

    fn declaration_name(&self, node: NodeId) -> Option<String> {
        self.node(node).name.clone()
    }

    fn initializer_text(&self, node: NodeId) -> Option<String> {
        self.node(node).initializer.clone()
    }

    fn has_body(&self, node: NodeId) -> bool {
        self.node(node).has_body
    }

    fn has_asterisk(&self, node: NodeId) -> bool {
        self.node(node).asterisk
    }

    fn has_question_token(&self, node: NodeId) -> bool {
        self.node(node).question
    }

    fn has_dot_dot_dot(&self, node: NodeId) -> bool {
        self.node(node).dot_dot_dot
    }

    fn implements_clause(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).implements.clone()
    }

    fn constant_value(&self, node: NodeId) -> Option<ConstantValue> {
        self.node(node).constant.clone()
    }
}

/// Where a new declaration is added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Top level of a file (module exports or script locals)
    File(FileId),
    /// Export table of a namespace, enum or class (statics)
    Exports(SymbolId),
    /// Member table of a class or interface
    Members(SymbolId),
}

impl From<FileId> for Scope {
    fn from(file: FileId) -> Self {
        Scope::File(file)
    }
}

impl From<SymbolId> for Scope {
    fn from(symbol: SymbolId) -> Self {
        Scope::Exports(symbol)
    }
}

/// A parameter of a [`Sig`]
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    ty: TypeId,
    optional: bool,
    rest: bool,
    default: Option<String>,
}

impl Param {
    pub fn new(name: &str, ty: TypeId) -> Self {
        Self {
            name: name.to_string(),
            ty,
            optional: false,
            rest: false,
            default: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn rest(mut self) -> Self {
        self.rest = true;
        self
    }

    pub fn default(mut self, text: &str) -> Self {
        self.default = Some(text.to_string());
        self
    }

    fn source(&self) -> String {
        let dots = if self.rest { "..." } else { "" };
        let question = if self.optional { "?" } else { "" };
        let default = self
            .default
            .as_ref()
            .map(|d| format!(" = {d}"))
            .unwrap_or_default();
        format!("{dots}{}{question}{default}", self.name)
    }
}

/// A call signature to declare
#[derive(Debug, Clone)]
pub struct Sig {
    type_parameters: Vec<TypeId>,
    params: Vec<Param>,
    this_type: Option<TypeId>,
    return_type: TypeId,
    is_async: bool,
    generator: bool,
}

impl Sig {
    pub fn returning(return_type: TypeId) -> Self {
        Self {
            type_parameters: Vec::new(),
            params: Vec::new(),
            this_type: None,
            return_type,
            is_async: false,
            generator: false,
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn type_param(mut self, ty: TypeId) -> Self {
        self.type_parameters.push(ty);
        self
    }

    /// Explicit `this` parameter
    pub fn this(mut self, ty: TypeId) -> Self {
        self.this_type = Some(ty);
        self
    }

    pub fn async_fn(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn generator(mut self) -> Self {
        self.generator = true;
        self
    }

    fn source(&self) -> String {
        let params: Vec<String> = self.params.iter().map(Param::source).collect();
        format!("({})", params.join(", "))
    }
}

/// Type of an enum member; without a known value it is only an enum literal
fn enum_literal_type(member: SymbolId, value: Option<EnumValue>) -> TypeData {
    let (flags, literal) = match value {
        Some(EnumValue::Number(n)) => (TypeFlags::NUMBER_LITERAL, Some(LiteralData::Number(n))),
        Some(EnumValue::String(s)) => (TypeFlags::STRING_LITERAL, Some(LiteralData::String(s))),
        None => (TypeFlags::empty(), None),
    };
    TypeData {
        flags: TypeFlags::ENUM_LITERAL | flags,
        symbol: Some(member),
        literal,
        ..Default::default()
    }
}

/// Builds a [`MemoryProgram`]
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    program: MemoryProgram,
    intrinsics: FxHashMap<&'static str, TypeId>,
    enum_counters: FxHashMap<SymbolId, EnumCounter>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> MemoryProgram {
        self.program
    }

    // Files

    /// An external module; its top-level declarations are its exports
    pub fn module(&mut self, name: &str) -> FileId {
        self.file(name, true)
    }

    /// A global script; its top-level declarations are file locals
    pub fn script(&mut self, name: &str) -> FileId {
        self.file(name, false)
    }

    fn file(&mut self, name: &str, module: bool) -> FileId {
        let file = FileId(self.program.files.len() as u32);
        let module_symbol = name
            .rsplit_once('.')
            .map_or(name, |(stem, _)| stem)
            .to_string();
        let symbol = self.add_symbol(&format!("\"{module_symbol}\""), SymbolFlags::VALUE_MODULE);
        let node = self.add_node(SyntaxKind::SourceFile, file, Span::default(), None);
        self.declare(symbol, node);
        self.program.files.push(FileData {
            name: name.to_string(),
            text: String::new(),
            module_name: None,
            declaration: name.ends_with(".d.ts"),
            module,
            node,
            symbol,
            locals: Vec::new(),
            resolved_modules: Vec::new(),
            referenced_files: Vec::new(),
        });
        file
    }

    /// Append a comment at the current end of a file (call before declarations for a header)
    pub fn file_comment(&mut self, file: FileId, comment: &str) {
        let text = &mut self.program.files[file.index()].text;
        text.push_str(comment);
        text.push('\n');
    }

    pub fn set_module_name(&mut self, file: FileId, name: &str) {
        self.program.files[file.index()].module_name = Some(name.to_string());
    }

    pub fn import(&mut self, file: FileId, specifier: &str, resolved: &str, external: bool) {
        self.program.files[file.index()]
            .resolved_modules
            .push(ResolvedModule {
                name: specifier.to_string(),
                resolved_file_name: resolved.to_string(),
                original_path: None,
                is_external_library_import: external,
            });
    }

    /// `/// <reference path>`
    pub fn reference_path(&mut self, file: FileId, path: &str) {
        self.program.files[file.index()]
            .referenced_files
            .push(path.to_string());
    }

    // Types

    /// A built-in type by keyword; the same keyword always yields the same identity
    pub fn intrinsic(&mut self, name: &'static str) -> TypeId {
        if let Some(ty) = self.intrinsics.get(name) {
            return *ty;
        }
        let flags = match name {
            "any" => TypeFlags::ANY,
            "unknown" => TypeFlags::UNKNOWN,
            "string" => TypeFlags::STRING,
            "number" => TypeFlags::NUMBER,
            "boolean" => TypeFlags::BOOLEAN,
            "bigint" => TypeFlags::BIG_INT,
            "symbol" => TypeFlags::ES_SYMBOL,
            "void" => TypeFlags::VOID,
            "undefined" => TypeFlags::UNDEFINED,
            "null" => TypeFlags::NULL,
            "never" => TypeFlags::NEVER,
            "object" => TypeFlags::NON_PRIMITIVE,
            _ => TypeFlags::empty(),
        };
        let ty = self.add_type(TypeData {
            flags,
            intrinsic_name: Some(name.to_string()),
            ..Default::default()
        });
        self.intrinsics.insert(name, ty);
        ty
    }

    pub fn string_type(&mut self) -> TypeId {
        self.intrinsic("string")
    }

    pub fn number_type(&mut self) -> TypeId {
        self.intrinsic("number")
    }

    pub fn boolean_type(&mut self) -> TypeId {
        self.intrinsic("boolean")
    }

    pub fn void_type(&mut self) -> TypeId {
        self.intrinsic("void")
    }

    pub fn string_literal(&mut self, value: &str) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::STRING_LITERAL,
            literal: Some(LiteralData::String(value.to_string())),
            ..Default::default()
        })
    }

    pub fn number_literal(&mut self, value: f64) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::NUMBER_LITERAL,
            literal: Some(LiteralData::Number(value)),
            ..Default::default()
        })
    }

    pub fn boolean_literal(&mut self, value: bool) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::BOOLEAN_LITERAL,
            intrinsic_name: Some(value.to_string()),
            ..Default::default()
        })
    }

    pub fn bigint_literal(&mut self, negative: bool, base10_value: &str) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::BIG_INT_LITERAL,
            literal: Some(LiteralData::BigInt {
                negative,
                base10_value: base10_value.to_string(),
            }),
            ..Default::default()
        })
    }

    pub fn union(&mut self, operands: Vec<TypeId>) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::UNION,
            operands,
            ..Default::default()
        })
    }

    pub fn intersection(&mut self, operands: Vec<TypeId>) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::INTERSECTION,
            operands,
            ..Default::default()
        })
    }

    pub fn array(&mut self, element: TypeId) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::REFERENCE,
            arguments: vec![element],
            element: Some(element),
            ..Default::default()
        })
    }

    pub fn tuple(&mut self, elements: Vec<TypeId>) -> TypeId {
        let target = self.add_type(TypeData {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::TUPLE,
            ..Default::default()
        });
        self.add_type(TypeData {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::REFERENCE,
            target: Some(target),
            arguments: elements,
            ..Default::default()
        })
    }

    /// `Target<args>`
    pub fn type_reference(&mut self, target: TypeId, arguments: Vec<TypeId>) -> TypeId {
        let symbol = self.program.types[target.index()].symbol;
        self.add_type(TypeData {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::REFERENCE,
            symbol,
            target: Some(target),
            arguments,
            ..Default::default()
        })
    }

    pub fn keyof(&mut self, operand: TypeId) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::INDEX,
            index_operand: Some(operand),
            ..Default::default()
        })
    }

    pub fn indexed_access(&mut self, object: TypeId, index: TypeId) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::INDEXED_ACCESS,
            indexed_access: Some((object, index)),
            ..Default::default()
        })
    }

    pub fn conditional(
        &mut self,
        check_type: TypeId,
        extends_type: TypeId,
        true_type: TypeId,
        false_type: TypeId,
    ) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::CONDITIONAL,
            conditional: Some(ConditionalRoot {
                check_type,
                extends_type,
                true_type,
                false_type,
            }),
            ..Default::default()
        })
    }

    pub fn substitution(&mut self, base: TypeId) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::SUBSTITUTION,
            substitution_base: Some(base),
            ..Default::default()
        })
    }

    pub fn type_parameter(&mut self, name: &str) -> TypeId {
        let symbol = self.add_symbol(name, SymbolFlags::TYPE_PARAMETER);
        self.add_type(TypeData {
            flags: TypeFlags::TYPE_PARAMETER,
            symbol: Some(symbol),
            ..Default::default()
        })
    }

    pub fn constrain(&mut self, type_parameter: TypeId, constraint: TypeId) {
        self.program.types[type_parameter.index()].constraint = Some(constraint);
    }

    pub fn default_type(&mut self, type_parameter: TypeId, default: TypeId) {
        self.program.types[type_parameter.index()].default = Some(default);
    }

    /// The implicit `this` type
    pub fn this_type(&mut self) -> TypeId {
        let symbol = self.add_symbol("this", SymbolFlags::TYPE_PARAMETER);
        self.add_type(TypeData {
            flags: TypeFlags::TYPE_PARAMETER,
            symbol: Some(symbol),
            is_this: true,
            ..Default::default()
        })
    }

    pub fn unique_symbol(&mut self) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::UNIQUE_ES_SYMBOL,
            ..Default::default()
        })
    }

    /// A template literal type such as `` `id-${string}` ``
    pub fn template_literal(&mut self) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::TEMPLATE_LITERAL,
            ..Default::default()
        })
    }

    /// The anonymous type of a named value, as in `typeof helpers`
    pub fn typeof_symbol(&mut self, symbol: SymbolId) -> TypeId {
        self.add_type(TypeData {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::ANONYMOUS,
            symbol: Some(symbol),
            ..Default::default()
        })
    }

    /// An empty anonymous object type (`{}`); see [`Self::type_property`]
    pub fn object_type(&mut self) -> TypeId {
        let symbol = self.add_symbol("__type", SymbolFlags::TYPE_LITERAL);
        self.add_type(TypeData {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::ANONYMOUS,
            symbol: Some(symbol),
            ..Default::default()
        })
    }

    /// Add a property to an object type created by [`Self::object_type`]
    pub fn type_property(&mut self, file: FileId, object: TypeId, doc: &str, name: &str, ty: TypeId) -> SymbolId {
        let span = self.push_text(file, doc, &format!("{name}: T;"));
        let node = self.add_node(SyntaxKind::PropertySignature, file, span, None);
        self.program.nodes[node.index()].name = Some(name.to_string());
        let symbol = self.add_symbol(name, SymbolFlags::PROPERTY);
        self.program.symbols[symbol.index()].ty = Some(ty);
        self.program.symbols[symbol.index()].parent = self.program.types[object.index()].symbol;
        self.declare(symbol, node);
        self.program.types[object.index()].properties.push(symbol);
        symbol
    }

    /// A function type with a single call signature
    pub fn function_type(&mut self, signature: SignatureId) -> TypeId {
        let symbol = self.add_symbol("__type", SymbolFlags::TYPE_LITERAL);
        self.add_type(TypeData {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::ANONYMOUS,
            symbol: Some(symbol),
            call_signatures: vec![signature],
            ..Default::default()
        })
    }

    // Signatures

    /// A standalone signature (for function types); parameters are declared in `file`
    pub fn signature(&mut self, file: FileId, sig: &Sig) -> SignatureId {
        let mut parameters = Vec::with_capacity(sig.params.len());
        for param in &sig.params {
            let node = self.add_node(SyntaxKind::Parameter, file, Span::default(), None);
            {
                let data = &mut self.program.nodes[node.index()];
                data.name = Some(param.name.clone());
                data.question = param.optional;
                data.dot_dot_dot = param.rest;
                data.initializer = param.default.clone();
            }
            let symbol = self.add_symbol(&param.name, SymbolFlags::FUNCTION_SCOPED_VARIABLE);
            self.program.symbols[symbol.index()].ty = Some(param.ty);
            self.declare(symbol, node);
            parameters.push(symbol);
        }

        let this_parameter = sig.this_type.map(|ty| {
            let node = self.add_node(SyntaxKind::Parameter, file, Span::default(), None);
            let symbol = self.add_symbol("this", SymbolFlags::FUNCTION_SCOPED_VARIABLE);
            self.program.symbols[symbol.index()].ty = Some(ty);
            self.declare(symbol, node);
            symbol
        });

        let signature = SignatureId(self.program.signatures.len() as u32);
        self.program.signatures.push(SignatureData {
            declaration: None,
            type_parameters: sig.type_parameters.clone(),
            parameters,
            this_parameter,
            return_type: sig.return_type,
        });
        signature
    }

    /// Replace a signature's return type (for self-referential function types)
    pub fn set_return_type(&mut self, signature: SignatureId, ty: TypeId) {
        self.program.signatures[signature.index()].return_type = ty;
    }

    #[allow(clippy::too_many_arguments)]
    fn signature_declaration(
        &mut self,
        file: FileId,
        kind: SyntaxKind,
        parent: Option<NodeId>,
        doc: &str,
        code: &str,
        sig: &Sig,
        has_body: bool,
    ) -> NodeId {
        let span = self.push_text(file, doc, code);
        let node = self.add_node(kind, file, span, parent);
        let signature = self.signature(file, sig);
        self.program.signatures[signature.index()].declaration = Some(node);
        for param in self.program.signatures[signature.index()].parameters.clone() {
            if let Some(decl) = self.program.symbols[param.index()].value_declaration {
                self.program.nodes[decl.index()].parent = Some(node);
            }
        }
        let data = &mut self.program.nodes[node.index()];
        data.signature = Some(signature);
        data.has_body = has_body;
        data.asterisk = sig.generator;
        if sig.is_async {
            data.modifiers |= ModifierFlags::ASYNC;
        }
        node
    }

    // Declarations

    /// `const name: ty;`
    pub fn const_var(&mut self, scope: impl Into<Scope>, doc: &str, name: &str, ty: TypeId) -> SymbolId {
        self.variable(scope, doc, "const", name, ty, None)
    }

    /// `var`, `let` or `const` declaration
    pub fn variable(
        &mut self,
        scope: impl Into<Scope>,
        doc: &str,
        keyword: &str,
        name: &str,
        ty: TypeId,
        initializer: Option<&str>,
    ) -> SymbolId {
        let scope = scope.into();
        let init = initializer.map(|i| format!(" = {i}")).unwrap_or_default();
        let (statement, list, decl_pos, end) =
            self.variable_statement(scope, doc, keyword, &format!("{name}{init}"));
        let flags = if keyword == "var" {
            SymbolFlags::FUNCTION_SCOPED_VARIABLE
        } else {
            SymbolFlags::BLOCK_SCOPED_VARIABLE
        };
        let file = self.program.nodes[statement.index()].file;
        let decl = self.add_node(
            SyntaxKind::VariableDeclaration,
            file,
            Span {
                pos: decl_pos,
                start: decl_pos,
                end,
            },
            Some(list),
        );
        {
            let data = &mut self.program.nodes[decl.index()];
            data.name = Some(name.to_string());
            data.initializer = initializer.map(str::to_string);
        }
        let symbol = self.add_symbol(name, flags);
        self.program.symbols[symbol.index()].ty = Some(ty);
        self.declare(symbol, decl);
        self.attach(scope, symbol);
        symbol
    }

    /// `const { a, b } = initializer;`
    pub fn destructured_const(
        &mut self,
        scope: impl Into<Scope>,
        doc: &str,
        bindings: &[(&str, TypeId)],
        initializer: &str,
    ) -> Vec<SymbolId> {
        let scope = scope.into();
        let names: Vec<&str> = bindings.iter().map(|(name, _)| *name).collect();
        let target = format!("{{ {} }} = {initializer}", names.join(", "));
        let (statement, list, decl_pos, end) = self.variable_statement(scope, doc, "const", &target);
        let file = self.program.nodes[statement.index()].file;
        let decl_span = Span {
            pos: decl_pos,
            start: decl_pos,
            end,
        };
        let decl = self.add_node(SyntaxKind::VariableDeclaration, file, decl_span, Some(list));
        self.program.nodes[decl.index()].initializer = Some(initializer.to_string());
        let pattern = self.add_node(SyntaxKind::ObjectBindingPattern, file, decl_span, Some(decl));

        let mut offset = decl_pos + 2;
        let mut symbols = Vec::with_capacity(bindings.len());
        for (name, ty) in bindings {
            let span = Span {
                pos: offset,
                start: offset,
                end: offset + name.len(),
            };
            let element = self.add_node(SyntaxKind::BindingElement, file, span, Some(pattern));
            self.program.nodes[element.index()].name = Some(name.to_string());
            let symbol = self.add_symbol(name, SymbolFlags::BLOCK_SCOPED_VARIABLE);
            self.program.symbols[symbol.index()].ty = Some(*ty);
            self.declare(symbol, element);
            self.attach(scope, symbol);
            symbols.push(symbol);
            offset += name.len() + 2;
        }
        symbols
    }

    /// Statement and list nodes of a variable statement; returns (statement, list, declaration start, end)
    fn variable_statement(
        &mut self,
        scope: Scope,
        doc: &str,
        keyword: &str,
        declaration: &str,
    ) -> (NodeId, NodeId, usize, usize) {
        let file = self.scope_file(scope);
        let parent = self.scope_node(scope);
        let span = self.push_text(file, doc, &format!("{keyword} {declaration};"));
        let statement = self.add_node(SyntaxKind::VariableStatement, file, span, parent);
        let list_span = Span {
            pos: span.start,
            start: span.start,
            end: span.end - 1,
        };
        let list = self.add_node(SyntaxKind::VariableDeclarationList, file, list_span, Some(statement));
        self.program.nodes[list.index()].flags = match keyword {
            "const" => NodeFlags::CONST,
            "let" => NodeFlags::LET,
            _ => NodeFlags::empty(),
        };
        (statement, list, span.start + keyword.len() + 1, span.end - 1)
    }

    /// A function with a single, implemented declaration
    pub fn function(&mut self, scope: impl Into<Scope>, doc: &str, name: &str, sig: Sig) -> SymbolId {
        self.overloaded_function(scope, name, vec![(doc, sig, true)])
    }

    /// One function symbol with several declarations `(doc, signature, has_body)`
    pub fn overloaded_function(
        &mut self,
        scope: impl Into<Scope>,
        name: &str,
        declarations: Vec<(&str, Sig, bool)>,
    ) -> SymbolId {
        let scope = scope.into();
        let file = self.scope_file(scope);
        let parent = self.scope_node(scope);
        let symbol = self.add_symbol(name, SymbolFlags::FUNCTION);
        for (doc, sig, has_body) in declarations {
            let body = if has_body { " {}" } else { ";" };
            let code = format!("function {name}{}{body}", sig.source());
            let node = self.signature_declaration(
                file,
                SyntaxKind::FunctionDeclaration,
                parent,
                doc,
                &code,
                &sig,
                has_body,
            );
            self.program.nodes[node.index()].name = Some(name.to_string());
            self.declare(symbol, node);
        }
        self.attach(scope, symbol);
        symbol
    }

    pub fn class(&mut self, scope: impl Into<Scope>, doc: &str, name: &str) -> SymbolId {
        let symbol = self.class_like(scope.into(), doc, name, SyntaxKind::ClassDeclaration);
        let prototype = self.add_symbol("prototype", SymbolFlags::PROPERTY | SymbolFlags::PROTOTYPE);
        self.program.symbols[prototype.index()].parent = Some(symbol);
        self.program.symbols[symbol.index()].exports.push(prototype);
        symbol
    }

    pub fn interface(&mut self, scope: impl Into<Scope>, doc: &str, name: &str) -> SymbolId {
        self.class_like(scope.into(), doc, name, SyntaxKind::InterfaceDeclaration)
    }

    fn class_like(&mut self, scope: Scope, doc: &str, name: &str, kind: SyntaxKind) -> SymbolId {
        let (keyword, symbol_flags, object_flags) = if kind == SyntaxKind::ClassDeclaration {
            ("class", SymbolFlags::CLASS, ObjectFlags::CLASS)
        } else {
            ("interface", SymbolFlags::INTERFACE, ObjectFlags::INTERFACE)
        };
        let file = self.scope_file(scope);
        let parent = self.scope_node(scope);
        let span = self.push_text(file, doc, &format!("{keyword} {name} {{}}"));
        let node = self.add_node(kind, file, span, parent);
        self.program.nodes[node.index()].name = Some(name.to_string());

        let symbol = self.add_symbol(name, symbol_flags);
        let declared = self.add_type(TypeData {
            flags: TypeFlags::OBJECT,
            object_flags,
            symbol: Some(symbol),
            ..Default::default()
        });
        let data = &mut self.program.symbols[symbol.index()];
        data.declared_type = Some(declared);
        data.ty = Some(declared);
        self.declare(symbol, node);
        self.attach(scope, symbol);
        symbol
    }

    /// Declared (instance) type of a class, interface, enum or type alias
    pub fn declared_type(&self, symbol: SymbolId) -> Option<TypeId> {
        self.program.symbols[symbol.index()].declared_type
    }

    /// Add a base type to a class or interface
    pub fn extends(&mut self, symbol: SymbolId, base: TypeId) {
        if let Some(declared) = self.declared_type(symbol) {
            self.program.types[declared.index()].base_types.push(base);
        }
    }

    /// Add an `implements` clause entry to a class
    pub fn implements(&mut self, class: SymbolId, ty: TypeId) {
        let Some(&decl) = self.program.symbols[class.index()].declarations.first() else {
            return;
        };
        let file = self.program.nodes[decl.index()].file;
        let span = self.program.nodes[decl.index()].span;
        let clause = self.add_node(SyntaxKind::ExpressionWithTypeArguments, file, span, Some(decl));
        self.program.nodes[clause.index()].type_at = Some(ty);
        self.program.nodes[decl.index()].implements.push(clause);
    }

    pub fn set_type_parameters(&mut self, symbol: SymbolId, params: Vec<TypeId>) {
        self.program.symbols[symbol.index()].type_parameters = params;
    }

    /// Instance property of a class or interface
    pub fn property(&mut self, owner: SymbolId, doc: &str, name: &str, ty: TypeId) -> SymbolId {
        let kind = if self.is_interface(owner) {
            SyntaxKind::PropertySignature
        } else {
            SyntaxKind::PropertyDeclaration
        };
        self.member_property(Scope::Members(owner), kind, doc, name, ty)
    }

    /// `name?: ty`
    pub fn optional_property(&mut self, owner: SymbolId, doc: &str, name: &str, ty: TypeId) -> SymbolId {
        let symbol = self.property(owner, doc, name, ty);
        self.program.symbols[symbol.index()].flags |= SymbolFlags::OPTIONAL;
        for decl in self.program.symbols[symbol.index()].declarations.clone() {
            self.program.nodes[decl.index()].question = true;
        }
        symbol
    }

    /// `static name: ty` on a class
    pub fn static_property(&mut self, owner: SymbolId, doc: &str, name: &str, ty: TypeId) -> SymbolId {
        let symbol = self.member_property(
            Scope::Exports(owner),
            SyntaxKind::PropertyDeclaration,
            doc,
            name,
            ty,
        );
        self.set_modifiers(symbol, ModifierFlags::STATIC);
        symbol
    }

    fn member_property(&mut self, scope: Scope, kind: SyntaxKind, doc: &str, name: &str, ty: TypeId) -> SymbolId {
        let file = self.scope_file(scope);
        let parent = self.scope_node(scope);
        let span = self.push_text(file, doc, &format!("{name}: T;"));
        let node = self.add_node(kind, file, span, parent);
        self.program.nodes[node.index()].name = Some(name.to_string());
        let symbol = self.add_symbol(name, SymbolFlags::PROPERTY);
        self.program.symbols[symbol.index()].ty = Some(ty);
        self.declare(symbol, node);
        self.attach(scope, symbol);
        symbol
    }

    /// Instance method of a class (with body) or interface (signature)
    pub fn method(&mut self, owner: SymbolId, doc: &str, name: &str, sig: Sig) -> SymbolId {
        self.overloaded_method(owner, name, vec![(doc, sig)])
    }

    /// Several declarations of one method; on a class the last one is the implementation
    pub fn overloaded_method(&mut self, owner: SymbolId, name: &str, declarations: Vec<(&str, Sig)>) -> SymbolId {
        let interface = self.is_interface(owner);
        let kind = if interface {
            SyntaxKind::MethodSignature
        } else {
            SyntaxKind::MethodDeclaration
        };
        let scope = Scope::Members(owner);
        let file = self.scope_file(scope);
        let parent = self.scope_node(scope);
        let symbol = self.add_symbol(name, SymbolFlags::METHOD);
        let last = declarations.len().saturating_sub(1);
        for (i, (doc, sig)) in declarations.into_iter().enumerate() {
            let has_body = !interface && i == last;
            let body = if has_body { " {}" } else { ";" };
            let code = format!("{name}{}{body}", sig.source());
            let node = self.signature_declaration(file, kind, parent, doc, &code, &sig, has_body);
            self.program.nodes[node.index()].name = Some(name.to_string());
            self.declare(symbol, node);
        }
        self.attach(scope, symbol);
        symbol
    }

    pub fn constructor(&mut self, owner: SymbolId, doc: &str, sig: Sig) -> SymbolId {
        self.signature_member(owner, SymbolFlags::CONSTRUCTOR, "__constructor", SyntaxKind::Constructor, doc, "constructor", sig)
    }

    /// `[key: K]: ty`
    pub fn index_signature(&mut self, owner: SymbolId, doc: &str, key: Param, ty: TypeId) -> SymbolId {
        let code = format!("[{}: K]: T;", key.name);
        let sig = Sig::returning(ty).param(key);
        self.signature_member(owner, SymbolFlags::SIGNATURE, "__index", SyntaxKind::IndexSignature, doc, &code, sig)
    }

    /// `new (...): ty` on an interface
    pub fn construct_signature(&mut self, owner: SymbolId, doc: &str, sig: Sig) -> SymbolId {
        self.signature_member(owner, SymbolFlags::SIGNATURE, "__new", SyntaxKind::ConstructSignature, doc, "new", sig)
    }

    /// `(...): ty` on an interface
    pub fn call_signature(&mut self, owner: SymbolId, doc: &str, sig: Sig) -> SymbolId {
        self.signature_member(owner, SymbolFlags::SIGNATURE, "__call", SyntaxKind::CallSignature, doc, "", sig)
    }

    #[allow(clippy::too_many_arguments)]
    fn signature_member(
        &mut self,
        owner: SymbolId,
        flags: SymbolFlags,
        name: &str,
        kind: SyntaxKind,
        doc: &str,
        code: &str,
        sig: Sig,
    ) -> SymbolId {
        let scope = Scope::Members(owner);
        let file = self.scope_file(scope);
        let parent = self.scope_node(scope);
        let has_body = kind == SyntaxKind::Constructor && !self.is_interface(owner);
        let code = if kind == SyntaxKind::IndexSignature {
            code.to_string()
        } else {
            format!("{code}{};", sig.source())
        };
        let node = self.signature_declaration(file, kind, parent, doc, &code, &sig, has_body);
        let symbol = self.add_symbol(name, flags);
        self.declare(symbol, node);
        self.attach(scope, symbol);
        symbol
    }

    /// `get name()` with an optional `set name(v)`
    pub fn accessor(
        &mut self,
        owner: SymbolId,
        name: &str,
        ty: TypeId,
        getter_doc: &str,
        setter_doc: Option<&str>,
    ) -> SymbolId {
        let scope = Scope::Members(owner);
        let file = self.scope_file(scope);
        let parent = self.scope_node(scope);
        let mut flags = SymbolFlags::GET_ACCESSOR;
        if setter_doc.is_some() {
            flags |= SymbolFlags::SET_ACCESSOR;
        }
        let symbol = self.add_symbol(name, flags);
        self.program.symbols[symbol.index()].ty = Some(ty);

        let span = self.push_text(file, getter_doc, &format!("get {name}() {{}}"));
        let getter = self.add_node(SyntaxKind::GetAccessor, file, span, parent);
        self.program.nodes[getter.index()].name = Some(name.to_string());
        self.declare(symbol, getter);
        if let Some(doc) = setter_doc {
            let span = self.push_text(file, doc, &format!("set {name}(value) {{}}"));
            let setter = self.add_node(SyntaxKind::SetAccessor, file, span, parent);
            self.program.nodes[setter.index()].name = Some(name.to_string());
            self.declare(symbol, setter);
        }
        self.attach(scope, symbol);
        symbol
    }

    /// Add modifiers to every declaration of a symbol
    pub fn set_modifiers(&mut self, symbol: SymbolId, modifiers: ModifierFlags) {
        for decl in self.program.symbols[symbol.index()].declarations.clone() {
            self.program.nodes[decl.index()].modifiers |= modifiers;
        }
    }

    pub fn enumeration(&mut self, scope: impl Into<Scope>, doc: &str, name: &str, is_const: bool) -> SymbolId {
        let scope = scope.into();
        let file = self.scope_file(scope);
        let parent = self.scope_node(scope);
        let keyword = if is_const { "const enum" } else { "enum" };
        let span = self.push_text(file, doc, &format!("{keyword} {name} {{}}"));
        let node = self.add_node(SyntaxKind::EnumDeclaration, file, span, parent);
        self.program.nodes[node.index()].name = Some(name.to_string());
        let flags = if is_const {
            SymbolFlags::CONST_ENUM
        } else {
            SymbolFlags::REGULAR_ENUM
        };
        let symbol = self.add_symbol(name, flags);
        let declared = self.add_type(TypeData {
            flags: TypeFlags::ENUM | TypeFlags::UNION,
            symbol: Some(symbol),
            ..Default::default()
        });
        let data = &mut self.program.symbols[symbol.index()];
        data.declared_type = Some(declared);
        data.ty = Some(declared);
        self.declare(symbol, node);
        self.attach(scope, symbol);
        symbol
    }

    /// Member of an enum, with its initializer text if it has one
    pub fn enum_member(&mut self, enumeration: SymbolId, doc: &str, name: &str, initializer: Option<&str>) -> SymbolId {
        let scope = Scope::Exports(enumeration);
        let file = self.scope_file(scope);
        let parent = self.scope_node(scope);
        let code = match initializer {
            Some(init) => format!("{name} = {init},"),
            None => format!("{name},"),
        };
        let span = self.push_text(file, doc, &code);
        let node = self.add_node(SyntaxKind::EnumMember, file, span, parent);
        {
            let data = &mut self.program.nodes[node.index()];
            data.name = Some(name.to_string());
            data.initializer = initializer.map(str::to_string);
        }
        let symbol = self.add_symbol(name, SymbolFlags::ENUM_MEMBER);
        // computed initializers have no literal until a constant value is set
        let explicit = initializer.map(|init| EnumValue::parse_literal(init).ok_or(init));
        let counter = self.enum_counters.entry(enumeration).or_default();
        let literal = match explicit {
            Some(Err(computed)) => {
                counter.assign(name, Some(EnumValue::String(computed.to_string())));
                None
            }
            Some(Ok(value)) => Some(counter.assign(name, Some(value))),
            None => Some(counter.assign(name, None)),
        };
        let ty = self.add_type(enum_literal_type(symbol, literal));
        self.program.symbols[symbol.index()].ty = Some(ty);
        if let Some(declared) = self.declared_type(enumeration) {
            self.program.types[declared.index()].operands.push(ty);
        }
        self.declare(symbol, node);
        self.attach(scope, symbol);
        symbol
    }

    /// The checker's computed value for an enum member
    pub fn set_constant_value(&mut self, member: SymbolId, value: ConstantValue) {
        for decl in self.program.symbols[member.index()].declarations.clone() {
            self.program.nodes[decl.index()].constant = Some(value.clone());
        }
        if let Some(ty) = self.program.symbols[member.index()].ty {
            let literal = match value {
                ConstantValue::Number(n) => EnumValue::Number(n),
                ConstantValue::String(s) => EnumValue::String(s),
            };
            self.program.types[ty.index()] = enum_literal_type(member, Some(literal));
        }
    }

    pub fn namespace(&mut self, scope: impl Into<Scope>, doc: &str, name: &str) -> SymbolId {
        let scope = scope.into();
        let symbol = self.add_symbol(name, SymbolFlags::VALUE_MODULE | SymbolFlags::NAMESPACE_MODULE);
        self.namespace_declaration(scope, symbol, doc);
        self.attach(scope, symbol);
        symbol
    }

    /// Merge a `namespace` of the same name into an existing symbol
    pub fn merge_namespace(&mut self, symbol: SymbolId, doc: &str) {
        let scope = match self.program.symbols[symbol.index()].parent {
            Some(parent) => self.scope_of(parent),
            None => Scope::File(self.symbol_file(symbol)),
        };
        self.program.symbols[symbol.index()].flags |= SymbolFlags::VALUE_MODULE | SymbolFlags::NAMESPACE_MODULE;
        self.namespace_declaration(scope, symbol, doc);
    }

    fn namespace_declaration(&mut self, scope: Scope, symbol: SymbolId, doc: &str) {
        let file = self.scope_file(scope);
        let parent = self.scope_node(scope);
        let name = self.program.symbols[symbol.index()].name.clone();
        let span = self.push_text(file, doc, &format!("namespace {name} {{}}"));
        let node = self.add_node(SyntaxKind::ModuleDeclaration, file, span, parent);
        self.program.nodes[node.index()].name = Some(name);
        self.declare(symbol, node);
    }

    /// `type name = ty;`
    pub fn type_alias(&mut self, scope: impl Into<Scope>, doc: &str, name: &str, ty: TypeId) -> SymbolId {
        let scope = scope.into();
        let file = self.scope_file(scope);
        let parent = self.scope_node(scope);
        let span = self.push_text(file, doc, &format!("type {name} = T;"));
        let node = self.add_node(SyntaxKind::TypeAliasDeclaration, file, span, parent);
        self.program.nodes[node.index()].name = Some(name.to_string());
        let symbol = self.add_symbol(name, SymbolFlags::TYPE_ALIAS);
        self.program.symbols[symbol.index()].declared_type = Some(ty);
        self.declare(symbol, node);
        self.attach(scope, symbol);
        symbol
    }

    /// A symbol with the given flags and no declarations
    pub fn bare_symbol(&mut self, scope: impl Into<Scope>, name: &str, flags: SymbolFlags) -> SymbolId {
        let symbol = self.add_symbol(name, flags);
        self.attach(scope.into(), symbol);
        symbol
    }

    // Failure injection

    /// Make every fallible query about the symbol's declarations fail
    pub fn fail_declarations(&mut self, symbol: SymbolId) {
        let decls = self.program.symbols[symbol.index()].declarations.clone();
        self.program.failing.extend(decls);
    }

    /// Make the file's module symbol lookup fail
    pub fn fail_file(&mut self, file: FileId) {
        let node = self.program.files[file.index()].node;
        self.program.failing.insert(node);
    }

    // Internals

    fn add_symbol(&mut self, name: &str, flags: SymbolFlags) -> SymbolId {
        let symbol = SymbolId(self.program.symbols.len() as u32);
        self.program.symbols.push(SymbolData {
            name: name.to_string(),
            flags,
            declarations: Vec::new(),
            value_declaration: None,
            exports: Vec::new(),
            members: Vec::new(),
            parent: None,
            ty: None,
            declared_type: None,
            type_parameters: Vec::new(),
        });
        symbol
    }

    fn add_type(&mut self, data: TypeData) -> TypeId {
        let ty = TypeId(self.program.types.len() as u32);
        self.program.types.push(data);
        ty
    }

    fn add_node(&mut self, kind: SyntaxKind, file: FileId, span: Span, parent: Option<NodeId>) -> NodeId {
        let node = NodeId(self.program.nodes.len() as u32);
        self.program.nodes.push(NodeData::new(kind, file, span, parent));
        node
    }

    /// Append `doc` and `code` on their own lines; the span covers `code`, with `doc` as trivia
    fn push_text(&mut self, file: FileId, doc: &str, code: &str) -> Span {
        let text = &mut self.program.files[file.index()].text;
        let pos = text.len();
        if !doc.is_empty() {
            text.push_str(doc);
            text.push('\n');
        }
        let start = text.len();
        text.push_str(code);
        let end = text.len();
        text.push('\n');
        Span { pos, start, end }
    }

    fn declare(&mut self, symbol: SymbolId, node: NodeId) {
        let kind = self.program.nodes[node.index()].kind;
        self.program.nodes[node.index()].symbol = Some(symbol);
        let data = &mut self.program.symbols[symbol.index()];
        data.declarations.push(node);
        let is_value = !matches!(
            kind,
            SyntaxKind::InterfaceDeclaration
                | SyntaxKind::TypeAliasDeclaration
                | SyntaxKind::ModuleDeclaration
                | SyntaxKind::SourceFile
        );
        if is_value && data.value_declaration.is_none() {
            data.value_declaration = Some(node);
        }
    }

    fn attach(&mut self, scope: Scope, symbol: SymbolId) {
        match scope {
            Scope::File(file) => {
                let data = &mut self.program.files[file.index()];
                data.locals.push(symbol);
                let file_symbol = data.symbol;
                if data.module {
                    self.program.symbols[file_symbol.index()].exports.push(symbol);
                }
                self.program.symbols[symbol.index()].parent = Some(file_symbol);
            }
            Scope::Exports(owner) => {
                self.program.symbols[owner.index()].exports.push(symbol);
                self.program.symbols[symbol.index()].parent = Some(owner);
            }
            Scope::Members(owner) => {
                self.program.symbols[owner.index()].members.push(symbol);
                self.program.symbols[symbol.index()].parent = Some(owner);
            }
        }
    }

    /// Scope a symbol's own declarations were added to
    fn scope_of(&self, owner: SymbolId) -> Scope {
        match self
            .program
            .files
            .iter()
            .position(|f| f.symbol == owner)
        {
            Some(i) => Scope::File(FileId(i as u32)),
            None => Scope::Exports(owner),
        }
    }

    fn symbol_file(&self, symbol: SymbolId) -> FileId {
        self.program.symbols[symbol.index()]
            .declarations
            .first()
            .map_or(FileId(0), |decl| self.program.nodes[decl.index()].file)
    }

    fn scope_file(&self, scope: Scope) -> FileId {
        match scope {
            Scope::File(file) => file,
            Scope::Exports(owner) | Scope::Members(owner) => self.symbol_file(owner),
        }
    }

    fn scope_node(&self, scope: Scope) -> Option<NodeId> {
        match scope {
            Scope::File(file) => Some(self.program.files[file.index()].node),
            Scope::Exports(owner) | Scope::Members(owner) => {
                self.program.symbols[owner.index()].declarations.first().copied()
            }
        }
    }

    fn is_interface(&self, symbol: SymbolId) -> bool {
        let flags = self.program.symbols[symbol.index()].flags;
        flags.contains(SymbolFlags::INTERFACE) && !flags.contains(SymbolFlags::CLASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations_write_source_text() {
        let mut b = ProgramBuilder::new();
        let file = b.module("a.ts");
        let string = b.string_type();
        let symbol = b.const_var(file, "/** Doc */", "x", string);
        let program = b.build();

        assert_eq!(program.file_text(file), "/** Doc */\nconst x;\n");
        let decl = program.value_declaration(symbol).unwrap();
        assert_eq!(program.node_kind(decl), SyntaxKind::VariableDeclaration);
        let span = program.node_span(decl);
        assert_eq!(&program.file_text(file)[span.start..span.end], "x");
    }

    #[test]
    fn test_module_exports_and_script_locals() {
        let mut b = ProgramBuilder::new();
        let module = b.module("m.ts");
        let script = b.script("s.ts");
        let number = b.number_type();
        let exported = b.const_var(module, "", "a", number);
        let local = b.const_var(script, "", "b", number);
        let program = b.build();

        let file_symbol = program.symbol_at_location(program.file_node(module)).unwrap();
        assert_eq!(program.exports_of_module(file_symbol).unwrap(), vec![exported]);
        assert_eq!(program.file_locals(script), vec![local]);
        assert!(program.is_external_module(module));
        assert!(!program.is_external_module(script));
    }

    #[test]
    fn test_inherited_properties() {
        let mut b = ProgramBuilder::new();
        let file = b.module("a.ts");
        let number = b.number_type();
        let base = b.interface(file, "", "Base");
        let base_x = b.property(base, "", "x", number);
        let base_y = b.property(base, "", "y", number);
        let derived = b.interface(file, "", "Derived");
        let base_type = b.declared_type(base).unwrap();
        b.extends(derived, base_type);
        let own_x = b.property(derived, "", "x", number);
        let program = b.build();

        let derived_type = program.declared_type_of_symbol(derived).unwrap();
        assert_eq!(program.properties_of_type(derived_type), vec![own_x, base_y]);
        assert_eq!(program.properties_of_type(base_type), vec![base_x, base_y]);
    }

    #[test]
    fn test_failure_injection() {
        let mut b = ProgramBuilder::new();
        let file = b.module("a.ts");
        b.fail_file(file);
        let program = b.build();
        let err = program.symbol_at_location(program.file_node(file)).unwrap_err();
        assert!(err.is_collaborator_failure());

        let err = program.exports_of_module(SymbolId(99)).unwrap_err();
        assert!(matches!(err, DocError::UnknownHandle { kind: "symbol", index: 99 }));
    }
}
