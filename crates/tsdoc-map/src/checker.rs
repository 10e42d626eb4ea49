//! Front-end collaborator contract
//!
//! The resolvers never parse or type-check anything themselves. They consume a
//! resolved program through [`Checker`]: opaque, hashable handles for symbols,
//! types, signatures, declaration nodes and source files, plus the flag sets the
//! classification tables dispatch on.

use crate::diagnostics::DocResult;
use bitflags::bitflags;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Index into the collaborator's own tables
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

handle!(
    /// A front-end symbol (name binding)
    SymbolId
);
handle!(
    /// A checker type identity
    TypeId
);
handle!(
    /// A single call/construct/index signature
    SignatureId
);
handle!(
    /// A syntax node (declaration, binding pattern, heritage expression, ...)
    NodeId
);
handle!(
    /// A parsed source file
    FileId
);

bitflags! {
    /// Symbol classification flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SymbolFlags: u32 {
        const FUNCTION_SCOPED_VARIABLE = 1 << 0;
        const BLOCK_SCOPED_VARIABLE = 1 << 1;
        const PROPERTY = 1 << 2;
        const ENUM_MEMBER = 1 << 3;
        const FUNCTION = 1 << 4;
        const CLASS = 1 << 5;
        const INTERFACE = 1 << 6;
        const CONST_ENUM = 1 << 7;
        const REGULAR_ENUM = 1 << 8;
        const VALUE_MODULE = 1 << 9;
        const NAMESPACE_MODULE = 1 << 10;
        const TYPE_LITERAL = 1 << 11;
        const OBJECT_LITERAL = 1 << 12;
        const METHOD = 1 << 13;
        const CONSTRUCTOR = 1 << 14;
        const GET_ACCESSOR = 1 << 15;
        const SET_ACCESSOR = 1 << 16;
        const SIGNATURE = 1 << 17;
        const TYPE_PARAMETER = 1 << 18;
        const TYPE_ALIAS = 1 << 19;
        const ALIAS = 1 << 20;
        const PROTOTYPE = 1 << 21;
        const OPTIONAL = 1 << 22;

        const VARIABLE = Self::FUNCTION_SCOPED_VARIABLE.bits() | Self::BLOCK_SCOPED_VARIABLE.bits();
        const ENUM = Self::REGULAR_ENUM.bits() | Self::CONST_ENUM.bits();
        const ACCESSOR = Self::GET_ACCESSOR.bits() | Self::SET_ACCESSOR.bits();
        const NAMESPACE = Self::VALUE_MODULE.bits() | Self::NAMESPACE_MODULE.bits();
    }
}

bitflags! {
    /// Type classification flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u32 {
        const ANY = 1 << 0;
        const UNKNOWN = 1 << 1;
        const STRING = 1 << 2;
        const NUMBER = 1 << 3;
        const BOOLEAN = 1 << 4;
        const ENUM = 1 << 5;
        const BIG_INT = 1 << 6;
        const STRING_LITERAL = 1 << 7;
        const NUMBER_LITERAL = 1 << 8;
        const BOOLEAN_LITERAL = 1 << 9;
        const ENUM_LITERAL = 1 << 10;
        const BIG_INT_LITERAL = 1 << 11;
        const ES_SYMBOL = 1 << 12;
        const UNIQUE_ES_SYMBOL = 1 << 13;
        const VOID = 1 << 14;
        const UNDEFINED = 1 << 15;
        const NULL = 1 << 16;
        const NEVER = 1 << 17;
        const TYPE_PARAMETER = 1 << 18;
        const OBJECT = 1 << 19;
        const UNION = 1 << 20;
        const INTERSECTION = 1 << 21;
        const INDEX = 1 << 22;
        const INDEXED_ACCESS = 1 << 23;
        const CONDITIONAL = 1 << 24;
        const SUBSTITUTION = 1 << 25;
        const NON_PRIMITIVE = 1 << 26;
        const TEMPLATE_LITERAL = 1 << 27;

        const INTRINSIC = Self::ANY.bits()
            | Self::UNKNOWN.bits()
            | Self::STRING.bits()
            | Self::NUMBER.bits()
            | Self::BOOLEAN.bits()
            | Self::BIG_INT.bits()
            | Self::ES_SYMBOL.bits()
            | Self::VOID.bits()
            | Self::UNDEFINED.bits()
            | Self::NULL.bits()
            | Self::NEVER.bits()
            | Self::NON_PRIMITIVE.bits();
        const STRING_OR_NUMBER_LITERAL = Self::STRING_LITERAL.bits() | Self::NUMBER_LITERAL.bits();
        const UNION_OR_INTERSECTION = Self::UNION.bits() | Self::INTERSECTION.bits();
    }
}

bitflags! {
    /// Object type shape flags (only meaningful with [`TypeFlags::OBJECT`])
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ObjectFlags: u32 {
        const CLASS = 1 << 0;
        const INTERFACE = 1 << 1;
        const REFERENCE = 1 << 2;
        const TUPLE = 1 << 3;
        const ANONYMOUS = 1 << 4;
        const MAPPED = 1 << 5;

        const CLASS_OR_INTERFACE = Self::CLASS.bits() | Self::INTERFACE.bits();
    }
}

bitflags! {
    /// Combined declaration modifiers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const EXPORT = 1 << 0;
        const AMBIENT = 1 << 1;
        const PUBLIC = 1 << 2;
        const PRIVATE = 1 << 3;
        const PROTECTED = 1 << 4;
        const STATIC = 1 << 5;
        const READONLY = 1 << 6;
        const ABSTRACT = 1 << 7;
        const ASYNC = 1 << 8;
        const DEFAULT = 1 << 9;
        const CONST = 1 << 10;
        const OVERRIDE = 1 << 11;
    }
}

bitflags! {
    /// Syntax node flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const LET = 1 << 0;
        const CONST = 1 << 1;
    }
}

/// Declaration node kinds the resolvers distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    SourceFile,
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    ObjectBindingPattern,
    ArrayBindingPattern,
    BindingElement,
    Parameter,
    TypeParameter,
    FunctionDeclaration,
    MethodDeclaration,
    MethodSignature,
    Constructor,
    CallSignature,
    ConstructSignature,
    IndexSignature,
    PropertyDeclaration,
    PropertySignature,
    GetAccessor,
    SetAccessor,
    ClassDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    EnumMember,
    ModuleDeclaration,
    TypeAliasDeclaration,
    TypeLiteral,
    FunctionType,
    ExpressionWithTypeArguments,
    Other,
}

impl SyntaxKind {
    /// Destructuring pattern nodes, skipped when looking for the owning declaration
    pub fn is_binding_pattern(self) -> bool {
        matches!(
            self,
            SyntaxKind::BindingElement
                | SyntaxKind::ObjectBindingPattern
                | SyntaxKind::ArrayBindingPattern
        )
    }

    /// Declarations that belong to a merged container rather than an overload set
    pub fn is_container_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::ModuleDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::ClassDeclaration
                | SyntaxKind::EnumDeclaration
        )
    }
}

/// Byte offsets of a node within its file's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Full start, including leading trivia and comments
    pub pos: usize,
    /// First token of the node
    pub start: usize,
    /// End of the node
    pub end: usize,
}

/// Raw literal value of a literal type
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralData {
    String(String),
    Number(f64),
    BigInt { negative: bool, base10_value: String },
}

/// Compile-time value of an enum member initializer
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Number(f64),
    String(String),
}

/// Unresolved root clause of a conditional type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalRoot {
    pub check_type: TypeId,
    pub extends_type: TypeId,
    pub true_type: TypeId,
    pub false_type: TypeId,
}

/// A module import resolved by the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    /// Specifier as written
    pub name: String,
    /// Resolved file name
    pub resolved_file_name: String,
    /// Path before symlink resolution, if different
    pub original_path: Option<String>,
    /// Resolved into an external library
    pub is_external_library_import: bool,
}

/// The capability set of a resolved program
///
/// Infallible accessors read data the front end has already computed. The
/// `DocResult` operations may legitimately fail for programs with unresolvable
/// parts; such an error aborts the resolution run.
pub trait Checker {
    // Program

    /// Root source files in the order the program was created with
    fn root_files(&self) -> Vec<FileId>;

    // Source files

    fn file_name(&self, file: FileId) -> String;
    fn file_text(&self, file: FileId) -> &str;
    /// Logical module name (`/// <amd-module name>` and similar)
    fn module_name(&self, file: FileId) -> Option<String>;
    fn is_declaration_file(&self, file: FileId) -> bool;
    fn is_external_module(&self, file: FileId) -> bool;
    /// The node representing the file itself
    fn file_node(&self, file: FileId) -> NodeId;
    /// Script-scope symbols in declaration order
    fn file_locals(&self, file: FileId) -> Vec<SymbolId>;
    fn resolved_modules(&self, file: FileId) -> Vec<ResolvedModule>;
    /// `/// <reference path>` targets
    fn referenced_files(&self, file: FileId) -> Vec<String>;

    // Symbols

    fn symbol_name(&self, symbol: SymbolId) -> String;
    fn symbol_flags(&self, symbol: SymbolId) -> SymbolFlags;
    /// All declarations in source order
    fn declarations(&self, symbol: SymbolId) -> Vec<NodeId>;
    fn value_declaration(&self, symbol: SymbolId) -> Option<NodeId>;
    /// Export table in declaration order
    fn exports(&self, symbol: SymbolId) -> Vec<SymbolId>;
    /// Member table in declaration order (instance members, signatures)
    fn members(&self, symbol: SymbolId) -> Vec<SymbolId>;
    /// Declaring container of a member symbol
    fn parent_symbol(&self, symbol: SymbolId) -> Option<SymbolId>;
    fn symbol_at_location(&self, node: NodeId) -> DocResult<SymbolId>;
    /// Type parameters declared by a class, interface or type alias symbol
    fn declared_type_parameters(&self, symbol: SymbolId) -> Vec<TypeId>;
    fn exports_of_module(&self, module: SymbolId) -> DocResult<Vec<SymbolId>>;

    // Types of symbols and nodes

    fn type_of_symbol_at_location(&self, symbol: SymbolId, node: NodeId) -> DocResult<TypeId>;
    fn declared_type_of_symbol(&self, symbol: SymbolId) -> DocResult<TypeId>;
    fn type_at_location(&self, node: NodeId) -> DocResult<TypeId>;
    fn base_types(&self, ty: TypeId) -> Vec<TypeId>;
    /// All properties, own and inherited
    fn properties_of_type(&self, ty: TypeId) -> Vec<SymbolId>;
    fn call_signatures(&self, ty: TypeId) -> Vec<SignatureId>;
    fn is_array_type(&self, ty: TypeId) -> bool;
    fn element_type_of_array(&self, ty: TypeId) -> DocResult<TypeId>;

    // Type structure

    fn type_flags(&self, ty: TypeId) -> TypeFlags;
    fn object_flags(&self, ty: TypeId) -> ObjectFlags;
    fn type_symbol(&self, ty: TypeId) -> Option<SymbolId>;
    fn intrinsic_name(&self, ty: TypeId) -> Option<String>;
    fn literal_value(&self, ty: TypeId) -> Option<LiteralData>;
    /// Generic target of a type reference
    fn reference_target(&self, ty: TypeId) -> Option<TypeId>;
    fn type_arguments(&self, ty: TypeId) -> Vec<TypeId>;
    /// Operands of a union or intersection, in declaration order
    fn operand_types(&self, ty: TypeId) -> Vec<TypeId>;
    fn conditional_root(&self, ty: TypeId) -> Option<ConditionalRoot>;
    /// `(object type, index type)` of an indexed access
    fn indexed_access_parts(&self, ty: TypeId) -> Option<(TypeId, TypeId)>;
    /// Operand of a `keyof` index type
    fn index_operand(&self, ty: TypeId) -> Option<TypeId>;
    /// Whether a type parameter is the implicit `this` type
    fn is_this_type(&self, ty: TypeId) -> bool;
    /// Type variable behind a substitution type
    fn substitution_base(&self, ty: TypeId) -> Option<TypeId>;
    fn constraint_of(&self, ty: TypeId) -> Option<TypeId>;
    fn default_of(&self, ty: TypeId) -> Option<TypeId>;

    // Signatures

    fn signature_from_declaration(&self, node: NodeId) -> DocResult<SignatureId>;
    fn signature_declaration(&self, signature: SignatureId) -> Option<NodeId>;
    fn signature_type_parameters(&self, signature: SignatureId) -> Vec<TypeId>;
    /// Parameters, excluding an explicit `this` parameter
    fn signature_parameters(&self, signature: SignatureId) -> Vec<SymbolId>;
    fn signature_this_parameter(&self, signature: SignatureId) -> Option<SymbolId>;
    fn return_type(&self, signature: SignatureId) -> TypeId;
    fn is_implementation_of_overload(&self, node: NodeId) -> bool;

    // Nodes

    fn node_kind(&self, node: NodeId) -> SyntaxKind;
    fn node_parent(&self, node: NodeId) -> Option<NodeId>;
    fn node_file(&self, node: NodeId) -> FileId;
    fn node_span(&self, node: NodeId) -> Span;
    fn node_flags(&self, node: NodeId) -> NodeFlags;
    /// Syntactic modifiers, combined through binding patterns and declaration lists
    fn combined_modifier_flags(&self, node: NodeId) -> ModifierFlags;
    /// Text of the declared name, if the declaration is named
    fn declaration_name(&self, node: NodeId) -> Option<String>;
    /// Source text of the initializer expression
    fn initializer_text(&self, node: NodeId) -> Option<String>;
    fn has_body(&self, node: NodeId) -> bool;
    fn has_asterisk(&self, node: NodeId) -> bool;
    fn has_question_token(&self, node: NodeId) -> bool;
    fn has_dot_dot_dot(&self, node: NodeId) -> bool;
    /// Expressions of a class's `implements` clause
    fn implements_clause(&self, node: NodeId) -> Vec<NodeId>;
    /// Constant value of an enum member declaration
    fn constant_value(&self, node: NodeId) -> Option<ConstantValue>;
}
