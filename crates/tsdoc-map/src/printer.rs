//! TypeScript-like display of resolved types
//!
//! A presentation helper only: the resolved [`DocType`] graph stays the source
//! of truth, and nothing here rewrites or compacts it.
//!
//! # Example
//!
//! ```
//! use tsdoc_map::node::DocGraph;
//! use tsdoc_map::printer::to_typescript;
//! use tsdoc_map::types::{DocType, NativeType};
//!
//! let mut graph = DocGraph::default();
//! let string = graph.types.alloc(DocType::Native(NativeType::String));
//! let array = graph.types.alloc(DocType::Array { element: string });
//! assert_eq!(to_typescript(&graph, array), "string[]");
//! ```

use crate::node::{DocGraph, MemberDef, MemberRef};
use crate::params::DocParameter;
use crate::ts_type_params::DocTypeParameter;
use crate::types::{DocType, FunctionType, TypeRef};
use std::fmt::{self, Display, Formatter, Write};

/// Render a type to TypeScript-like text
pub fn to_typescript(graph: &DocGraph, ty: TypeRef) -> String {
    TypeDisplay::new(graph, ty).to_string()
}

/// [`Display`] adapter for a [`TypeRef`]
pub struct TypeDisplay<'a> {
    graph: &'a DocGraph,
    ty: TypeRef,
}

impl<'a> TypeDisplay<'a> {
    pub fn new(graph: &'a DocGraph, ty: TypeRef) -> Self {
        Self { graph, ty }
    }
}

impl Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut printer = Printer {
            graph: self.graph,
            path: Vec::new(),
            out: String::new(),
        };
        printer.ty(self.ty)?;
        f.write_str(&printer.out)
    }
}

struct Printer<'a> {
    graph: &'a DocGraph,
    /// Types being printed, outermost first
    path: Vec<TypeRef>,
    out: String,
}

impl Printer<'_> {
    fn ty(&mut self, r: TypeRef) -> fmt::Result {
        if self.path.contains(&r) {
            return self.out.write_str("...");
        }
        self.path.push(r);
        let result = self.node(r);
        self.path.pop();
        result
    }

    fn node(&mut self, r: TypeRef) -> fmt::Result {
        let graph = self.graph;
        match graph.doc_type(r) {
            DocType::Native(native) => self.out.write_str(native.as_str()),
            DocType::Literal(value) => self.out.write_str(&value.to_typescript()),
            DocType::Array { element } => {
                self.operand(*element)?;
                self.out.write_str("[]")
            }
            DocType::Tuple { elements } => {
                self.out.write_char('[')?;
                self.list(elements, ", ")?;
                self.out.write_char(']')
            }
            DocType::Generic {
                target,
                type_arguments,
            } => {
                self.ty(*target)?;
                if !type_arguments.is_empty() {
                    self.out.write_char('<')?;
                    self.list(type_arguments, ", ")?;
                    self.out.write_char('>')?;
                }
                Ok(())
            }
            DocType::Function(function) => self.function(function, " => "),
            DocType::Object { members } => self.object(members),
            DocType::Union { operands } => self.operands(operands, " | "),
            DocType::Intersection { operands } => self.operands(operands, " & "),
            DocType::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => {
                self.operand(*check_type)?;
                self.out.write_str(" extends ")?;
                self.operand(*extends_type)?;
                self.out.write_str(" ? ")?;
                self.ty(*true_type)?;
                self.out.write_str(" : ")?;
                self.ty(*false_type)
            }
            DocType::IndexedAccess { operand, argument } => {
                self.operand(*operand)?;
                self.out.write_char('[')?;
                self.ty(*argument)?;
                self.out.write_char(']')
            }
            DocType::Unary { operator, operand } => {
                write!(self.out, "{} ", operator.as_str())?;
                self.operand(*operand)
            }
            DocType::TypeParameterRef { name, .. } => self.out.write_str(name),
            DocType::This => self.out.write_str("this"),
            DocType::TypeOf { member } => {
                let name = self.member_name(*member);
                write!(self.out, "typeof {name}")
            }
            DocType::Class { class } => {
                let name = self.member_name(*class);
                self.out.write_str(&name)
            }
        }
    }

    fn member_name(&self, member: Option<MemberRef>) -> String {
        member.map_or_else(
            || "unknown".to_string(),
            |r| self.graph.member(r).name.clone(),
        )
    }

    /// A type in operand position, parenthesized when it would otherwise bind loosely
    fn operand(&mut self, r: TypeRef) -> fmt::Result {
        let loose = matches!(
            self.graph.doc_type(r),
            DocType::Union { .. }
                | DocType::Intersection { .. }
                | DocType::Function(_)
                | DocType::Conditional { .. }
        ) && !self.path.contains(&r);
        if loose {
            self.out.write_char('(')?;
            self.ty(r)?;
            self.out.write_char(')')
        } else {
            self.ty(r)
        }
    }

    fn operands(&mut self, operands: &[TypeRef], separator: &str) -> fmt::Result {
        for (i, operand) in operands.iter().enumerate() {
            if i > 0 {
                self.out.write_str(separator)?;
            }
            self.operand(*operand)?;
        }
        Ok(())
    }

    fn list(&mut self, types: &[TypeRef], separator: &str) -> fmt::Result {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                self.out.write_str(separator)?;
            }
            self.ty(*ty)?;
        }
        Ok(())
    }

    fn function(&mut self, function: &FunctionType, arrow: &str) -> fmt::Result {
        self.type_parameters(&function.type_parameters)?;
        self.out.write_char('(')?;
        let mut first = true;
        if let Some(this_type) = function.this_type {
            self.out.write_str("this: ")?;
            self.ty(this_type)?;
            first = false;
        }
        for param in &function.parameters {
            if !first {
                self.out.write_str(", ")?;
            }
            first = false;
            self.parameter(param)?;
        }
        self.out.write_char(')')?;
        self.out.write_str(arrow)?;
        self.ty(function.return_type)
    }

    fn parameter(&mut self, param: &DocParameter) -> fmt::Result {
        if param.rest {
            self.out.write_str("...")?;
        }
        self.out.write_str(&param.name)?;
        if param.optional && !param.rest {
            self.out.write_char('?')?;
        }
        self.out.write_str(": ")?;
        self.ty(param.type_ref)
    }

    fn type_parameters(&mut self, params: &[DocTypeParameter]) -> fmt::Result {
        if params.is_empty() {
            return Ok(());
        }
        self.out.write_char('<')?;
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.out.write_str(&param.name)?;
            if let Some(constraint) = param.constraint {
                self.out.write_str(" extends ")?;
                self.ty(constraint)?;
            }
            if let Some(default) = param.default {
                self.out.write_str(" = ")?;
                self.ty(default)?;
            }
        }
        self.out.write_char('>')
    }

    fn object(&mut self, members: &[MemberRef]) -> fmt::Result {
        if members.is_empty() {
            return self.out.write_str("{}");
        }
        let graph = self.graph;
        self.out.write_str("{ ")?;
        for (i, &r) in members.iter().enumerate() {
            if i > 0 {
                self.out.write_str("; ")?;
            }
            let member = graph.member(r);
            match &member.def {
                MemberDef::Field(field) => {
                    if field.read_only {
                        self.out.write_str("readonly ")?;
                    }
                    self.out.write_str(&member.name)?;
                    if field.optional {
                        self.out.write_char('?')?;
                    }
                    self.out.write_str(": ")?;
                    self.ty(field.type_ref)?;
                }
                MemberDef::Method(method) => {
                    self.out.write_str(&member.name)?;
                    self.function(&method.signature, ": ")?;
                }
                _ => self.out.write_str(&member.name)?,
            }
        }
        self.out.write_str(" }")
    }
}
