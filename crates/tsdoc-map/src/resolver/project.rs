//! Project assembly (entry point)

use super::context::ResolveContext;
use crate::checker::{Checker, FileId};
use crate::comments::{CommentLocator, JsDocLocator};
use crate::config::DocgenConfig;
use crate::diagnostics::DocResult;
use crate::node::DocProject;
use tracing::info;

/// Resolves a set of source files into one [`DocProject`]
///
/// # Example
///
/// ```
/// use tsdoc_map::test::ProgramBuilder;
/// use tsdoc_map::ProjectAssembler;
///
/// let mut builder = ProgramBuilder::new();
/// let file = builder.module("lib.ts");
/// let string = builder.string_type();
/// builder.const_var(file, "/** The answer */", "answer", string);
/// let program = builder.build();
///
/// let project = ProjectAssembler::new(&program).assemble_roots().unwrap();
/// let answer = project.lookup("lib.ts", "answer").unwrap();
/// assert_eq!(project.member(answer).summary(), "The answer");
/// ```
pub struct ProjectAssembler<'a> {
    checker: &'a dyn Checker,
    locator: &'a dyn CommentLocator,
    config: DocgenConfig,
}

impl<'a> ProjectAssembler<'a> {
    /// Create an assembler using the built-in JSDoc locator and default config
    pub fn new(checker: &'a dyn Checker) -> Self {
        Self {
            checker,
            locator: &JsDocLocator,
            config: DocgenConfig::default(),
        }
    }

    /// Use a different comment locator
    pub fn with_locator(mut self, locator: &'a dyn CommentLocator) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_config(mut self, config: DocgenConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DocgenConfig {
        &self.config
    }

    /// Resolve the given files, in order, with one shared context
    pub fn assemble(&self, files: &[FileId]) -> DocResult<DocProject> {
        info!(files = files.len(), "assembling documentation project");
        let mut ctx = ResolveContext::new(self.checker, self.locator, &self.config);

        let mut source_files = Vec::with_capacity(files.len());
        for &file in files {
            source_files.push(ctx.resolve_source_file(file)?);
        }

        let graph = ctx.into_graph();
        info!(
            files = source_files.len(),
            members = graph.members.len(),
            types = graph.types.len(),
            "documentation project assembled"
        );
        Ok(DocProject {
            source_files,
            graph,
        })
    }

    /// Resolve every root file of the program
    pub fn assemble_roots(&self) -> DocResult<DocProject> {
        self.assemble(&self.checker.root_files())
    }
}
