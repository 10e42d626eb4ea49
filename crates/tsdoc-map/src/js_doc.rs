//! Doc comment reading and tag dispatch
//!
//! [`CommentTagReader`] finds the doc block belonging to a declaration and
//! [`TagSet::from_block`] folds its tags into the structured fields every
//! documented member carries ([`DocComment`]) plus the member-level facts
//! tags can change (visibility, display name, parameter summaries).

use crate::comments::{CommentBlock, CommentLocator};
use crate::visibility::Visibility;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// `{type} [name=default] - text` as written after `@param` or `@template`
    static ref PARAM_TAG: Regex = Regex::new(
        r"(?s)^(?:\{[^}]*\}\s*)?\[?([\w$.]+)(?:=[^\]]*)?\]?\s*(?:-\s+)?(.*)$"
    ).unwrap();
}

/// Tags that mark a leading block as describing the file rather than a declaration
pub const FILE_MARKER_TAGS: &[&str] = &[
    "file",
    "overview",
    "fileoverview",
    "fileOverview",
    "copyright",
    "license",
    "licence",
    "module",
];

/// Documentation fields shared by every member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocComment {
    /// Leading free text, or the last `@summary`
    #[serde(default)]
    pub summary: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub examples: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sees: Vec<String>,

    /// Unrecognized tags by name, repeated tags newline-joined
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub custom_tags: IndexMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub deprecated: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub since: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version: Option<String>,

    /// `@hidden`: excluded from default listings
    #[serde(skip_serializing_if = "is_false", default)]
    pub hidden: bool,

    /// `@virtual`
    #[serde(rename = "virtual", skip_serializing_if = "is_false", default)]
    pub is_virtual: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl DocComment {
    /// Create from a summary only
    pub fn from_summary(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Default::default()
        }
    }

    /// Check if nothing was documented
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fill every absent or empty field from `base`
    pub fn inherit_from(&mut self, base: &DocComment) {
        if self.summary.is_empty() {
            self.summary = base.summary.clone();
        }
        inherit_opt(&mut self.description, &base.description);
        if self.examples.is_empty() {
            self.examples = base.examples.clone();
        }
        if self.sees.is_empty() {
            self.sees = base.sees.clone();
        }
        for (name, text) in &base.custom_tags {
            self.custom_tags
                .entry(name.clone())
                .or_insert_with(|| text.clone());
        }
        inherit_opt(&mut self.deprecated, &base.deprecated);
        inherit_opt(&mut self.since, &base.since);
        inherit_opt(&mut self.category, &base.category);
        inherit_opt(&mut self.default_value, &base.default_value);
        inherit_opt(&mut self.author, &base.author);
        inherit_opt(&mut self.version, &base.version);
        self.hidden |= base.hidden;
        self.is_virtual |= base.is_virtual;
    }
}

fn inherit_opt(own: &mut Option<String>, base: &Option<String>) {
    if own.as_deref().map_or(true, str::is_empty) && base.is_some() {
        own.clone_from(base);
    }
}

/// Append `text` on a new line, keeping the first non-empty value
pub fn concat_comment(slot: &mut Option<String>, text: &str) {
    match slot {
        Some(existing) if !existing.is_empty() => {
            if !text.is_empty() {
                existing.push('\n');
                existing.push_str(text);
            }
        }
        _ => *slot = Some(text.to_string()),
    }
}

fn add_custom_tag(tags: &mut IndexMap<String, String>, name: &str, text: &str) {
    match tags.get_mut(name) {
        Some(existing) if !existing.is_empty() => {
            if !text.is_empty() {
                existing.push('\n');
                existing.push_str(text);
            }
        }
        Some(existing) => *existing = text.to_string(),
        None => {
            tags.insert(name.to_string(), text.to_string());
        }
    }
}

/// Split `@param`-style tag text into `(name, summary)`
pub fn split_param_tag(text: &str) -> Option<(String, String)> {
    let caps = PARAM_TAG.captures(text.trim())?;
    let name = caps.get(1)?.as_str().to_string();
    let summary = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
    Some((name, summary))
}

/// Everything a declaration's doc block contributes to its member
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSet {
    pub doc: DocComment,
    pub visibility: Visibility,
    /// Display name override
    pub name: Option<String>,
    /// `@param` summaries by parameter name
    pub params: IndexMap<String, String>,
    /// `@template` summaries by type parameter name
    pub type_params: IndexMap<String, String>,
    pub returns: Option<String>,
    pub is_abstract: bool,
    pub is_override: bool,
}

impl TagSet {
    /// Fold a doc block over a visibility seeded from modifiers
    pub fn from_block(block: Option<&CommentBlock>, seed: Visibility) -> Self {
        let mut set = TagSet {
            visibility: seed,
            ..Default::default()
        };
        let Some(block) = block else {
            return set;
        };
        set.doc.summary = block.summary.clone();

        for tag in &block.tags {
            let text = tag.text.as_str();
            match tag.name.as_str() {
                "example" | "sample" | "demo" => set.doc.examples.push(text.to_string()),
                "see" | "seeAlso" | "seealso" => set.doc.sees.push(text.to_string()),
                "desc" | "description" | "remark" => concat_comment(&mut set.doc.description, text),
                "summary" => set.doc.summary = text.to_string(),
                "name" | "member" | "method" | "property" | "field" | "getter" | "setter" => {
                    set.name = Some(text.to_string())
                }
                "internal" | "package" => set.visibility = Visibility::Internal,
                "private" => set.visibility = Visibility::Private,
                "protected" => set.visibility = Visibility::Protected,
                "access" => set.visibility = Visibility::from_access(text),
                "hidden" => set.doc.hidden = true,
                "virtual" => set.doc.is_virtual = true,
                "abstract" => set.is_abstract = true,
                "override" => set.is_override = true,
                "category" => concat_comment(&mut set.doc.category, text),
                "since" => concat_comment(&mut set.doc.since, text),
                "deprecated" => concat_comment(&mut set.doc.deprecated, text),
                "author" => concat_comment(&mut set.doc.author, text),
                "version" => concat_comment(&mut set.doc.version, text),
                "default" => set.doc.default_value = Some(text.to_string()),
                "param" | "arg" | "argument" => {
                    if let Some((name, summary)) = split_param_tag(text) {
                        set.params.insert(name, summary);
                    }
                }
                "template" | "typeparam" | "typeParam" => {
                    if let Some((name, summary)) = split_param_tag(text) {
                        set.type_params.insert(name, summary);
                    }
                }
                "returns" | "return" => concat_comment(&mut set.returns, text),
                other => add_custom_tag(&mut set.doc.custom_tags, other, text),
            }
        }

        set
    }
}

/// File-level facts from the leading blocks of a source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileTags {
    pub summary: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub copyright: Option<String>,
    pub license: Option<String>,
    /// `@module` / `@name`
    pub name: Option<String>,
    pub custom_tags: IndexMap<String, String>,
}

impl FileTags {
    /// Apply a block if it is file-level; returns whether it was
    pub fn apply(&mut self, block: &CommentBlock) -> bool {
        if !block.has_tag(FILE_MARKER_TAGS) {
            return false;
        }
        for tag in &block.tags {
            let text = tag.text.as_str();
            match tag.name.as_str() {
                "file" | "overview" | "fileoverview" | "fileOverview" => {
                    concat_comment(&mut self.summary, text)
                }
                "author" => concat_comment(&mut self.author, text),
                "version" => concat_comment(&mut self.version, text),
                "copyright" => concat_comment(&mut self.copyright, text),
                "license" | "licence" => concat_comment(&mut self.license, text),
                "name" | "module" => self.name = Some(text.to_string()),
                other => add_custom_tag(&mut self.custom_tags, other, text),
            }
        }
        true
    }
}

/// Locates the doc block of a declaration or file
pub struct CommentTagReader<'a> {
    locator: &'a dyn CommentLocator,
}

impl<'a> CommentTagReader<'a> {
    pub fn new(locator: &'a dyn CommentLocator) -> Self {
        Self { locator }
    }

    /// The doc block nearest to a declaration starting (with trivia) at `pos`
    ///
    /// File-level blocks are never attributed to a declaration.
    pub fn read(&self, text: &str, pos: usize) -> Option<CommentBlock> {
        self.locator
            .leading_comment_ranges(text, pos)
            .iter()
            .rev()
            .filter_map(|range| self.locator.parse_comment_block(text, range))
            .find(|block| !block.has_tag(FILE_MARKER_TAGS))
    }

    /// Fold every file-level doc block at the top of a file
    pub fn read_file(&self, text: &str) -> FileTags {
        let mut tags = FileTags::default();
        for range in self.locator.leading_comment_ranges(text, 0) {
            if let Some(block) = self.locator.parse_comment_block(text, &range) {
                tags.apply(&block);
            }
        }
        tags
    }
}
