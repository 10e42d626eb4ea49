//! Symbol-to-documentation resolution
//!
//! ```text
//! ProjectAssembler
//!   └─ resolve_source_file       (source_file.rs)
//!        └─ resolve_member       (members.rs, container.rs)
//!             ├─ resolve_type    (types.rs)
//!             └─ read_tags       (context.rs → js_doc)
//! ```
//!
//! All entry points are methods on [`ResolveContext`], which owns the memo
//! maps for one run.

mod container;
mod context;
mod members;
mod project;
mod source_file;
mod types;

pub use context::ResolveContext;
pub use project::ProjectAssembler;
