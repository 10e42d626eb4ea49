//! Leading comment location and doc block tokenizing
//!
//! [`CommentLocator`] is the seam to whatever tokenizer the front end
//! provides. [`JsDocLocator`] is the built-in implementation: it scans the
//! trivia in front of a declaration and splits `/** ... */` blocks into a
//! summary plus ordered `@tag` entries.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A tag starts at `@name` when preceded by whitespace or the start of the text
    static ref TAG_START: Regex = Regex::new(r"(?:^|\s)@(\w+)").unwrap();
}

/// Kind of a comment range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// Byte range of one comment in a source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentRange {
    pub pos: usize,
    pub end: usize,
    pub kind: CommentKind,
}

impl CommentRange {
    /// The comment text including delimiters
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.pos..self.end).unwrap_or_default()
    }
}

/// One `@tag` of a doc block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub name: String,
    pub text: String,
}

impl RawTag {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A tokenized doc block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentBlock {
    /// Free text before the first tag
    pub summary: String,
    /// Tags in source order
    pub tags: Vec<RawTag>,
}

impl CommentBlock {
    pub fn has_tag(&self, names: &[&str]) -> bool {
        self.tags.iter().any(|t| names.contains(&t.name.as_str()))
    }
}

/// Locates leading comments and tokenizes doc blocks
pub trait CommentLocator {
    /// Comments between `pos` and the next token, in source order
    fn leading_comment_ranges(&self, text: &str, pos: usize) -> Vec<CommentRange>;

    /// Tokenize a comment; `None` for anything that is not a doc block
    fn parse_comment_block(&self, text: &str, range: &CommentRange) -> Option<CommentBlock>;
}

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Whitespace between tokens, including a stray byte order mark
fn is_trivia(c: char) -> bool {
    c.is_whitespace() || c == BYTE_ORDER_MARK
}

/// Built-in JSDoc comment locator
#[derive(Debug, Clone, Copy, Default)]
pub struct JsDocLocator;

impl CommentLocator for JsDocLocator {
    fn leading_comment_ranges(&self, text: &str, pos: usize) -> Vec<CommentRange> {
        let bytes = text.as_bytes();
        let mut ranges = Vec::new();
        let mut i = pos.min(bytes.len());

        if i == 0 {
            if text.starts_with(BYTE_ORDER_MARK) {
                i = BYTE_ORDER_MARK.len_utf8();
            }
            // A shebang is trivia only at the very start of a file
            if text[i..].starts_with("#!") {
                i += text[i..].find('\n').unwrap_or(bytes.len() - i);
            }
        }

        loop {
            i += text[i..]
                .chars()
                .take_while(|c| is_trivia(*c))
                .map(char::len_utf8)
                .sum::<usize>();
            if !text[i..].starts_with('/') {
                break;
            }
            if text[i..].starts_with("//") {
                let end = text[i..].find('\n').map_or(bytes.len(), |n| i + n);
                ranges.push(CommentRange {
                    pos: i,
                    end,
                    kind: CommentKind::Line,
                });
                i = end;
            } else if text[i..].starts_with("/*") {
                let Some(close) = text[i + 2..].find("*/") else {
                    // unterminated
                    break;
                };
                let end = i + 2 + close + 2;
                ranges.push(CommentRange {
                    pos: i,
                    end,
                    kind: CommentKind::Block,
                });
                i = end;
            } else {
                break;
            }
        }

        ranges
    }

    fn parse_comment_block(&self, text: &str, range: &CommentRange) -> Option<CommentBlock> {
        if range.kind != CommentKind::Block {
            return None;
        }
        let raw = range.slice(text);
        if !raw.starts_with("/**") || raw == "/**/" {
            return None;
        }
        let inner = raw.strip_prefix("/**")?.strip_suffix("*/")?;
        Some(split_tags(&clean_doc_lines(inner)))
    }
}

/// Strip the leading `*` gutter from each line, keeping relative indentation
pub fn clean_doc_lines(inner: &str) -> String {
    let lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let content = match trimmed.strip_prefix('*') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
                None => trimmed,
            };
            content.trim_end()
        })
        .collect();

    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}

/// Split cleaned doc text into a summary and tags
///
/// `@` inside fenced code blocks does not start a tag.
pub fn split_tags(cleaned: &str) -> CommentBlock {
    let fenced = fenced_ranges(cleaned);
    let starts: Vec<(usize, usize, &str)> = TAG_START
        .captures_iter(cleaned)
        .filter_map(|caps| {
            let name = caps.get(1)?;
            let at = name.start() - 1;
            if fenced.iter().any(|(s, e)| at >= *s && at < *e) {
                return None;
            }
            Some((at, name.end(), name.as_str()))
        })
        .collect();

    let summary_end = starts.first().map_or(cleaned.len(), |(at, _, _)| *at);
    let summary = cleaned[..summary_end].trim().to_string();

    let tags = starts
        .iter()
        .enumerate()
        .map(|(i, (_, name_end, name))| {
            let text_end = starts.get(i + 1).map_or(cleaned.len(), |(at, _, _)| *at);
            RawTag::new(*name, cleaned[*name_end..text_end].trim())
        })
        .collect();

    CommentBlock { summary, tags }
}

fn fenced_ranges(text: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut open: Option<usize> = None;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_start().starts_with("```") {
            match open.take() {
                Some(start) => ranges.push((start, offset + line.len())),
                None => open = Some(offset),
            }
        }
        offset += line.len();
    }
    if let Some(start) = open {
        ranges.push((start, text.len()));
    }
    ranges
}
