//! Resolved type representation
//!
//! A [`DocType`] is a walkable type tree, not display text. Composite variants
//! hold [`TypeRef`]s into the run's [`TypeArena`], so a type that refers to
//! itself is a cycle of refs rather than an unbounded tree. The `class`,
//! `typeof` and `typeParameterRef` variants point at members through weak
//! [`MemberRef`]s.

use crate::arena::{arena_ref, Arena};
use crate::node::MemberRef;
use crate::params::DocParameter;
use crate::ts_type_params::DocTypeParameter;
use serde::{Deserialize, Serialize};

arena_ref!(
    /// Reference to a resolved type
    TypeRef
);

/// Storage for every type resolved during a run
pub type TypeArena = Arena<TypeRef, DocType>;

/// Built-in type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeType {
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "bigint")]
    BigInt,
    #[serde(rename = "symbol")]
    Symbol,
    #[serde(rename = "unique symbol")]
    UniqueSymbol,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "undefined")]
    Undefined,
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "object")]
    Object,
    /// Anything the resolver could not classify
    #[serde(rename = "mixed")]
    Mixed,
}

impl NativeType {
    /// Map a checker intrinsic name; unknown names become `mixed`
    pub fn from_intrinsic_name(name: &str) -> Self {
        match name {
            "any" => NativeType::Any,
            "unknown" => NativeType::Unknown,
            "string" => NativeType::String,
            "number" => NativeType::Number,
            "boolean" => NativeType::Boolean,
            "bigint" => NativeType::BigInt,
            "symbol" => NativeType::Symbol,
            "unique symbol" => NativeType::UniqueSymbol,
            "void" => NativeType::Void,
            "undefined" => NativeType::Undefined,
            "null" => NativeType::Null,
            "never" => NativeType::Never,
            "object" => NativeType::Object,
            _ => NativeType::Mixed,
        }
    }

    /// TypeScript keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            NativeType::Any => "any",
            NativeType::Unknown => "unknown",
            NativeType::String => "string",
            NativeType::Number => "number",
            NativeType::Boolean => "boolean",
            NativeType::BigInt => "bigint",
            NativeType::Symbol => "symbol",
            NativeType::UniqueSymbol => "unique symbol",
            NativeType::Void => "void",
            NativeType::Undefined => "undefined",
            NativeType::Null => "null",
            NativeType::Never => "never",
            NativeType::Object => "object",
            NativeType::Mixed => "mixed",
        }
    }
}

/// Value of a literal type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    /// Decimal digits, with a leading `-` when negative
    BigInt(String),
}

impl LiteralValue {
    /// TypeScript source form
    pub fn to_typescript(&self) -> String {
        match self {
            LiteralValue::String(s) => format!("{s:?}"),
            LiteralValue::Number(n) => format_number(*n),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::BigInt(digits) => format!("{digits}n"),
        }
    }
}

/// Format a number the way it would be written in source
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Prefix operator of a unary type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeOperator {
    KeyOf,
}

impl TypeOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeOperator::KeyOf => "keyof",
        }
    }
}

/// Shape of a call signature, shared by methods and function types
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub type_parameters: Vec<DocTypeParameter>,
    pub parameters: Vec<DocParameter>,
    pub return_type: TypeRef,
    /// Explicit `this` parameter type
    pub this_type: Option<TypeRef>,
}

/// A resolved type
#[derive(Debug, Clone, PartialEq)]
pub enum DocType {
    Native(NativeType),
    Literal(LiteralValue),
    Array {
        element: TypeRef,
    },
    Tuple {
        elements: Vec<TypeRef>,
    },
    Generic {
        target: TypeRef,
        type_arguments: Vec<TypeRef>,
    },
    Function(FunctionType),
    /// Anonymous object type; members are owned by this type
    Object {
        members: Vec<MemberRef>,
    },
    Union {
        operands: Vec<TypeRef>,
    },
    Intersection {
        operands: Vec<TypeRef>,
    },
    Conditional {
        check_type: TypeRef,
        extends_type: TypeRef,
        true_type: TypeRef,
        false_type: TypeRef,
    },
    IndexedAccess {
        operand: TypeRef,
        argument: TypeRef,
    },
    Unary {
        operator: TypeOperator,
        operand: TypeRef,
    },
    TypeParameterRef {
        name: String,
        /// Member declaring the parameter, when known
        declared_by: Option<MemberRef>,
    },
    This,
    TypeOf {
        member: Option<MemberRef>,
    },
    Class {
        class: Option<MemberRef>,
    },
}

impl DocType {
    pub fn mixed() -> Self {
        DocType::Native(NativeType::Mixed)
    }

    /// Discriminant used in serialized output
    pub fn kind(&self) -> &'static str {
        match self {
            DocType::Native(_) => "native",
            DocType::Literal(_) => "literal",
            DocType::Array { .. } => "array",
            DocType::Tuple { .. } => "tuple",
            DocType::Generic { .. } => "generic",
            DocType::Function(_) => "function",
            DocType::Object { .. } => "object",
            DocType::Union { .. } => "union",
            DocType::Intersection { .. } => "intersection",
            DocType::Conditional { .. } => "conditional",
            DocType::IndexedAccess { .. } => "indexedAccess",
            DocType::Unary { .. } => "unary",
            DocType::TypeParameterRef { .. } => "typeParameterRef",
            DocType::This => "this",
            DocType::TypeOf { .. } => "typeof",
            DocType::Class { .. } => "class",
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, DocType::Native(NativeType::Mixed))
    }

    /// Types this node points at (owning edges only)
    pub fn children(&self) -> Vec<TypeRef> {
        match self {
            DocType::Array { element } => vec![*element],
            DocType::Tuple { elements } => elements.clone(),
            DocType::Generic {
                target,
                type_arguments,
            } => std::iter::once(*target)
                .chain(type_arguments.iter().copied())
                .collect(),
            DocType::Function(f) => f
                .parameters
                .iter()
                .map(|p| p.type_ref)
                .chain(std::iter::once(f.return_type))
                .collect(),
            DocType::Union { operands } | DocType::Intersection { operands } => operands.clone(),
            DocType::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => vec![*check_type, *extends_type, *true_type, *false_type],
            DocType::IndexedAccess { operand, argument } => vec![*operand, *argument],
            DocType::Unary { operand, .. } => vec![*operand],
            _ => Vec::new(),
        }
    }
}
