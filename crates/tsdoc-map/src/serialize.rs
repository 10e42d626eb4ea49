//! Nested JSON view of a resolved project
//!
//! The arenas are flattened back into the tree `DocProject -> sourceFiles[] ->
//! members[]`. Owned edges are expanded in place. Weak edges (class and
//! `typeof` targets, type parameter owners, overridden and inherited members)
//! become `{"name", "location"}` stubs, and a node already open higher on the
//! current path becomes `{"kind": "recursive", "text"}`, so the output is
//! always finite.

use crate::config::DocgenConfig;
use crate::diagnostics::DocResult;
use crate::node::{DocGraph, DocMember, DocProject, DocSourceFile, MemberDef, MemberRef};
use crate::params::DocParameter;
use crate::printer::to_typescript;
use crate::ts_type_params::DocTypeParameter;
use crate::types::{DocType, FunctionType, TypeRef};
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// Builds the JSON tree for one project
pub struct JsonView<'a> {
    graph: &'a DocGraph,
    include_hidden: bool,
    open_types: Vec<TypeRef>,
    open_members: Vec<MemberRef>,
}

impl<'a> JsonView<'a> {
    pub fn new(graph: &'a DocGraph, include_hidden: bool) -> Self {
        Self {
            graph,
            include_hidden,
            open_types: Vec::new(),
            open_members: Vec::new(),
        }
    }

    pub fn project(&mut self, project: &DocProject) -> DocResult<Value> {
        let files = project
            .source_files
            .iter()
            .map(|file| self.source_file(file))
            .collect::<DocResult<Vec<_>>>()?;
        Ok(json!({ "sourceFiles": files }))
    }

    pub fn source_file(&mut self, file: &DocSourceFile) -> DocResult<Value> {
        let mut out = Map::new();
        out.insert("fileName".into(), json!(file.file_name));
        out.insert("name".into(), json!(file.name));
        out.insert("declaration".into(), json!(file.declaration));
        out.insert("module".into(), json!(file.module));
        if !file.summary.is_empty() {
            out.insert("summary".into(), json!(file.summary));
        }
        for (key, value) in [
            ("author", &file.author),
            ("version", &file.version),
            ("copyright", &file.copyright),
            ("license", &file.license),
        ] {
            if let Some(value) = value {
                out.insert(key.into(), json!(value));
            }
        }
        if !file.custom_tags.is_empty() {
            out.insert("customTags".into(), serde_json::to_value(&file.custom_tags)?);
        }
        out.insert("imports".into(), serde_json::to_value(&file.imports)?);
        out.insert("members".into(), self.members(&file.members)?);
        Ok(Value::Object(out))
    }

    /// Owned member list, dropping `@hidden` members unless configured otherwise
    fn members(&mut self, members: &[MemberRef]) -> DocResult<Value> {
        let mut out = Vec::with_capacity(members.len());
        for &r in members {
            if !self.include_hidden && self.graph.member(r).doc.hidden {
                continue;
            }
            out.push(self.member(r)?);
        }
        Ok(Value::Array(out))
    }

    fn member(&mut self, r: MemberRef) -> DocResult<Value> {
        if self.open_members.contains(&r) {
            return Ok(json!({ "kind": "recursive", "text": self.graph.member(r).name }));
        }
        let graph = self.graph;
        self.open_members.push(r);
        let result = self.member_body(graph.member(r));
        self.open_members.pop();
        result
    }

    fn member_body(&mut self, member: &'a DocMember) -> DocResult<Value> {
        let mut out = Map::new();
        out.insert("memberType".into(), json!(member.member_type()));
        out.insert("name".into(), json!(member.name));
        if let Some(export_name) = &member.export_name {
            out.insert("exportName".into(), json!(export_name));
        }
        if let Value::Object(doc) = serde_json::to_value(&member.doc)? {
            out.extend(doc);
        }
        out.insert("location".into(), serde_json::to_value(&member.location)?);
        out.insert("visibility".into(), json!(member.visibility.display()));
        out.insert("static".into(), json!(member.is_static));
        out.insert("abstract".into(), json!(member.is_abstract));
        out.insert("override".into(), json!(member.is_override));
        if let Some(parent) = member.parent {
            out.insert("parent".into(), self.doc_type(parent)?);
        }
        if let Some(overrides) = member.overrides {
            out.insert("overrides".into(), self.weak(overrides));
        }

        match &member.def {
            MemberDef::Field(field) => {
                out.insert("declKind".into(), serde_json::to_value(field.decl_kind)?);
                out.insert("type".into(), self.doc_type(field.type_ref)?);
                out.insert("optional".into(), json!(field.optional));
                out.insert("readOnly".into(), json!(field.read_only));
                out.insert("const".into(), json!(field.is_const));
                if let Some(default) = &field.default {
                    out.insert("default".into(), json!(default));
                }
            }
            MemberDef::Method(method) => {
                out.insert("declKind".into(), serde_json::to_value(method.decl_kind)?);
                self.function_fields(&method.signature, &mut out)?;
                if !method.return_summary.is_empty() {
                    out.insert("returnSummary".into(), json!(method.return_summary));
                }
                out.insert("async".into(), json!(method.is_async));
                out.insert("generator".into(), json!(method.is_generator));
                out.insert("overloads".into(), self.members(&method.overloads)?);
                if let Some(class) = method.class {
                    out.insert("class".into(), self.member(class)?);
                }
            }
            MemberDef::Class(class) => {
                out.insert(
                    "typeParameters".into(),
                    self.type_parameters(&class.type_parameters)?,
                );
                out.insert("extends".into(), self.types(&class.extends)?);
                out.insert("implements".into(), self.types(&class.implements)?);
                out.insert("members".into(), self.members(&class.members)?);
                out.insert("instanceMembers".into(), self.members(&class.instance_members)?);
                let extended: Vec<Value> = class
                    .extended_members
                    .iter()
                    .map(|r| self.weak(*r))
                    .collect();
                out.insert("extendedMembers".into(), Value::Array(extended));
                for (key, slot) in [
                    ("constructor", class.constructor),
                    ("indexer", class.indexer),
                    ("newSignature", class.new_signature),
                ] {
                    if let Some(r) = slot {
                        out.insert(key.into(), self.member(r)?);
                    }
                }
            }
            MemberDef::Enum(def) => {
                out.insert("const".into(), json!(def.is_const));
                let mut members = Vec::with_capacity(def.members.len());
                for entry in &def.members {
                    if !self.include_hidden && self.graph.member(entry.member).doc.hidden {
                        continue;
                    }
                    let mut value = self.member(entry.member)?;
                    if let Value::Object(map) = &mut value {
                        map.insert("value".into(), serde_json::to_value(&entry.value)?);
                    }
                    members.push(value);
                }
                out.insert("members".into(), Value::Array(members));
                out.insert("namespaceMembers".into(), self.members(&def.namespace_members)?);
            }
            MemberDef::Namespace(namespace) => {
                out.insert("members".into(), self.members(&namespace.members)?);
            }
            MemberDef::TypeAlias(alias) => {
                out.insert("type".into(), self.doc_type(alias.type_ref)?);
                out.insert(
                    "typeParameters".into(),
                    self.type_parameters(&alias.type_parameters)?,
                );
            }
        }

        Ok(Value::Object(out))
    }

    /// Lookup-only reference to a member
    fn weak(&self, r: MemberRef) -> Value {
        let member = self.graph.member(r);
        json!({ "name": member.name, "location": member.location.display() })
    }

    fn weak_opt(&self, r: Option<MemberRef>) -> Value {
        r.map_or(Value::Null, |r| self.weak(r))
    }

    fn types(&mut self, types: &[TypeRef]) -> DocResult<Value> {
        types
            .iter()
            .map(|ty| self.doc_type(*ty))
            .collect::<DocResult<Vec<_>>>()
            .map(Value::Array)
    }

    pub fn doc_type(&mut self, r: TypeRef) -> DocResult<Value> {
        if self.open_types.contains(&r) {
            return Ok(json!({ "kind": "recursive", "text": to_typescript(self.graph, r) }));
        }
        let graph = self.graph;
        self.open_types.push(r);
        let result = self.type_body(graph.doc_type(r));
        self.open_types.pop();
        result
    }

    fn type_body(&mut self, ty: &'a DocType) -> DocResult<Value> {
        let mut out = Map::new();
        out.insert("kind".into(), json!(ty.kind()));
        match ty {
            DocType::Native(native) => {
                out.insert("name".into(), serde_json::to_value(native)?);
            }
            DocType::Literal(value) => {
                out.insert("value".into(), serde_json::to_value(value)?);
            }
            DocType::Array { element } => {
                out.insert("element".into(), self.doc_type(*element)?);
            }
            DocType::Tuple { elements } => {
                out.insert("elements".into(), self.types(elements)?);
            }
            DocType::Generic {
                target,
                type_arguments,
            } => {
                out.insert("target".into(), self.doc_type(*target)?);
                out.insert("typeArguments".into(), self.types(type_arguments)?);
            }
            DocType::Function(function) => self.function_fields(function, &mut out)?,
            DocType::Object { members } => {
                out.insert("members".into(), self.members(members)?);
            }
            DocType::Union { operands } | DocType::Intersection { operands } => {
                out.insert("operands".into(), self.types(operands)?);
            }
            DocType::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => {
                out.insert("checkType".into(), self.doc_type(*check_type)?);
                out.insert("extendsType".into(), self.doc_type(*extends_type)?);
                out.insert("trueType".into(), self.doc_type(*true_type)?);
                out.insert("falseType".into(), self.doc_type(*false_type)?);
            }
            DocType::IndexedAccess { operand, argument } => {
                out.insert("operand".into(), self.doc_type(*operand)?);
                out.insert("argument".into(), self.doc_type(*argument)?);
            }
            DocType::Unary { operator, operand } => {
                out.insert("operator".into(), json!(operator.as_str()));
                out.insert("operand".into(), self.doc_type(*operand)?);
            }
            DocType::TypeParameterRef { name, declared_by } => {
                out.insert("name".into(), json!(name));
                out.insert("declaredBy".into(), self.weak_opt(*declared_by));
            }
            DocType::This => {}
            DocType::TypeOf { member } => {
                out.insert("member".into(), self.weak_opt(*member));
            }
            DocType::Class { class } => {
                out.insert("class".into(), self.weak_opt(*class));
            }
        }
        Ok(Value::Object(out))
    }

    fn function_fields(&mut self, function: &FunctionType, out: &mut Map<String, Value>) -> DocResult<()> {
        out.insert(
            "typeParameters".into(),
            self.type_parameters(&function.type_parameters)?,
        );
        let mut parameters = Vec::with_capacity(function.parameters.len());
        for param in &function.parameters {
            parameters.push(self.parameter(param)?);
        }
        out.insert("parameters".into(), Value::Array(parameters));
        out.insert("returnType".into(), self.doc_type(function.return_type)?);
        if let Some(this_type) = function.this_type {
            out.insert("thisType".into(), self.doc_type(this_type)?);
        }
        Ok(())
    }

    fn parameter(&mut self, param: &DocParameter) -> DocResult<Value> {
        let mut out = Map::new();
        out.insert("name".into(), json!(param.name));
        if !param.summary.is_empty() {
            out.insert("summary".into(), json!(param.summary));
        }
        out.insert("type".into(), self.doc_type(param.type_ref)?);
        out.insert("optional".into(), json!(param.optional));
        out.insert("rest".into(), json!(param.rest));
        if let Some(default) = &param.default {
            out.insert("default".into(), json!(default));
        }
        Ok(Value::Object(out))
    }

    fn type_parameters(&mut self, params: &[DocTypeParameter]) -> DocResult<Value> {
        let mut out = Vec::with_capacity(params.len());
        for param in params {
            let mut entry = Map::new();
            entry.insert("name".into(), json!(param.name));
            if !param.summary.is_empty() {
                entry.insert("summary".into(), json!(param.summary));
            }
            if let Some(constraint) = param.constraint {
                entry.insert("constraint".into(), self.doc_type(constraint)?);
            }
            if let Some(default) = param.default {
                entry.insert("default".into(), self.doc_type(default)?);
            }
            out.push(Value::Object(entry));
        }
        Ok(Value::Array(out))
    }
}

impl DocProject {
    /// The nested JSON tree
    pub fn to_value(&self, config: &DocgenConfig) -> DocResult<Value> {
        JsonView::new(&self.graph, config.include_hidden).project(self)
    }

    /// JSON text, honouring `pretty_json` and `include_hidden`
    pub fn to_json(&self, config: &DocgenConfig) -> DocResult<String> {
        let value = self.to_value(config)?;
        let text = if config.pretty_json {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }
}

impl Serialize for DocProject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value(&DocgenConfig::default())
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}
