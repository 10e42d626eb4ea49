//! Source file resolution

use super::context::{normalize_path, ResolveContext};
use crate::checker::FileId;
use crate::diagnostics::DocResult;
use crate::node::{DocImport, DocSourceFile};
use tracing::debug;

impl<'a> ResolveContext<'a> {
    /// Resolve one source file: file tags, import edges and top-level members
    pub fn resolve_source_file(&mut self, file: FileId) -> DocResult<DocSourceFile> {
        let checker = self.checker;
        let file_name = normalize_path(&checker.file_name(file));
        debug!(file = %file_name, "resolving source file");

        let tags = self.comments.read_file(checker.file_text(file));
        let module = checker.is_external_module(file);

        let mut source = DocSourceFile {
            name: tags
                .name
                .clone()
                .or_else(|| checker.module_name(file))
                .unwrap_or_else(|| file_name.clone()),
            file_name,
            declaration: checker.is_declaration_file(file),
            module,
            summary: tags.summary.unwrap_or_default(),
            author: tags.author,
            version: tags.version,
            copyright: tags.copyright,
            license: tags.license,
            custom_tags: tags.custom_tags,
            ..Default::default()
        };

        if module {
            for resolved in checker.resolved_modules(file) {
                source.imports.push(DocImport {
                    name: resolved.name,
                    resolved_name: Some(normalize_path(&resolved.resolved_file_name)),
                    path: resolved.original_path.map(|p| normalize_path(&p)),
                    external: resolved.is_external_library_import,
                    reference: false,
                });
            }
        }
        for path in checker.referenced_files(file) {
            source.imports.push(DocImport {
                name: path,
                resolved_name: None,
                path: None,
                external: false,
                reference: true,
            });
        }

        if module {
            let file_symbol = checker.symbol_at_location(checker.file_node(file))?;
            for export in checker.exports_of_module(file_symbol)? {
                let Some(member) = self.resolve_member(export)? else {
                    continue;
                };
                let export_name = checker.symbol_name(export);
                self.graph
                    .members
                    .get_mut(member)
                    .export_name
                    .get_or_insert(export_name);
                source.members.push(member);
            }
        } else {
            for local in checker.file_locals(file) {
                source.members.extend(self.resolve_member(local)?);
            }
        }

        debug!(
            file = %source.file_name,
            members = source.members.len(),
            imports = source.imports.len(),
            "resolved source file"
        );
        Ok(source)
    }
}
