//! tsdoc-map: Documentation model for type-checked TypeScript programs
//!
//! This crate maps the symbols and types of an already resolved TypeScript
//! program onto a self-contained documentation graph by:
//! - Classifying every exported symbol into one documented member kind
//! - Classifying every checker type into a structural [`DocType`] node
//! - Folding JSDoc blocks into summaries, tags and visibility
//! - Grouping overloads and merging accessor pairs
//! - Back-filling documentation across overloads and from base-type members
//! - Serializing the graph to JSON, with weak references for shared nodes
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐
//! │ Checker         │    │ CommentLocator   │
//! │ (front end)     │    │ (JSDoc blocks)   │
//! └────────┬────────┘    └────────┬─────────┘
//!          │                      │
//!          └──────────┬───────────┘
//!                     ▼
//!             ┌────────────────┐
//!             │ ResolveContext │
//!             └───────┬────────┘
//!                     ▼
//!              ┌──────────────┐
//!              │  DocProject  │
//!              └──────┬───────┘
//!                     │
//!          ┌──────────┴──────────┐
//!          ▼                     ▼
//!    ┌──────────┐         ┌─────────────┐
//!    │   JSON   │         │ TS display  │
//!    └──────────┘         └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use tsdoc_map::test::ProgramBuilder;
//! use tsdoc_map::{DocgenConfig, ProjectAssembler};
//!
//! let mut builder = ProgramBuilder::new();
//! let file = builder.module("lib.ts");
//! let number = builder.number_type();
//! builder.const_var(file, "/** Maximum retries */", "MAX_RETRIES", number);
//! let program = builder.build();
//!
//! let project = ProjectAssembler::new(&program).assemble_roots().unwrap();
//! let json = project.to_value(&DocgenConfig::default()).unwrap();
//! let member = &json["sourceFiles"][0]["members"][0];
//! assert_eq!(member["name"], "MAX_RETRIES");
//! assert_eq!(member["summary"], "Maximum retries");
//! assert_eq!(member["type"]["kind"], "native");
//! ```

// Core types
pub mod arena;
pub mod js_doc;
pub mod node;
pub mod params;
pub mod types;

// TypeScript construct types
pub mod class;
pub mod r#enum;
pub mod function;
pub mod ts_type_params;
pub mod type_alias;
pub mod variable;

// Front end contract
pub mod checker;
pub mod comments;

// Resolution and output
pub mod config;
pub mod diagnostics;
pub mod printer;
pub mod resolver;
pub mod serialize;
pub mod test;
pub mod visibility;

// Re-exports for convenience
pub use arena::Arena;
pub use checker::{Checker, FileId, NodeId, SignatureId, SymbolId, TypeId};
pub use class::{ClassDef, ClassKind};
pub use comments::{CommentBlock, CommentLocator, JsDocLocator};
pub use config::DocgenConfig;
pub use diagnostics::{DocError, DocResult};
pub use function::{MethodDef, MethodKind};
pub use js_doc::{DocComment, TagSet};
pub use node::{
    DocGraph, DocImport, DocMember, DocProject, DocSourceFile, MemberDef, MemberRef,
    NamespaceDef, SourceLocation,
};
pub use params::DocParameter;
pub use r#enum::{EnumDef, EnumMemberDef, EnumValue};
pub use ts_type_params::DocTypeParameter;
pub use type_alias::TypeAliasDef;
pub use types::{DocType, FunctionType, LiteralValue, NativeType, TypeOperator, TypeRef};
pub use variable::{FieldDef, FieldKind};
pub use visibility::Visibility;

// Resolution
pub use resolver::{ProjectAssembler, ResolveContext};

// Output
pub use printer::{to_typescript, TypeDisplay};
pub use serialize::JsonView;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
