//! Enum definitions
//!
//! Supports numeric, string and const enums. Values follow enum
//! auto-numbering: a member without an initializer is the previous value
//! plus one, starting at 0.

use crate::node::MemberRef;
use crate::types::format_number;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref NUMERIC_LITERAL: Regex =
        Regex::new(r"^[+-]?\s*(?:0[xX][0-9a-fA-F_]+|0[oO][0-7_]+|0[bB][01_]+|[0-9][0-9_]*(?:\.[0-9_]*)?(?:[eE][+-]?[0-9]+)?)$")
            .unwrap();
}

/// Value of an enum member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Number(f64),
    String(String),
}

impl EnumValue {
    /// Get TypeScript representation
    pub fn to_typescript(&self) -> String {
        match self {
            EnumValue::Number(n) => format_number(*n),
            EnumValue::String(s) => format!("{s:?}"),
        }
    }

    /// Parse initializer text written as a numeric or quoted string literal
    pub fn parse_literal(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(s) = unquote(text) {
            return Some(EnumValue::String(s));
        }
        if !NUMERIC_LITERAL.is_match(text) {
            return None;
        }
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, text.trim_start_matches('+').trim_start()),
        };
        let digits = digits.replace('_', "");
        let value = if let Some(hex) = digits.strip_prefix("0x").or(digits.strip_prefix("0X")) {
            i64::from_str_radix(hex, 16).ok()? as f64
        } else if let Some(oct) = digits.strip_prefix("0o").or(digits.strip_prefix("0O")) {
            i64::from_str_radix(oct, 8).ok()? as f64
        } else if let Some(bin) = digits.strip_prefix("0b").or(digits.strip_prefix("0B")) {
            i64::from_str_radix(bin, 2).ok()? as f64
        } else {
            digits.parse::<f64>().ok()?
        };
        Some(EnumValue::Number(if negative { -value } else { value }))
    }
}

fn unquote(text: &str) -> Option<String> {
    let quote = text.chars().next()?;
    if !matches!(quote, '"' | '\'' | '`') || text.len() < 2 || !text.ends_with(quote) {
        return None;
    }
    Some(text[1..text.len() - 1].to_string())
}

/// Enum member entry
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMemberDef {
    pub name: String,

    pub value: EnumValue,

    /// The member's own field entry
    pub member: MemberRef,
}

/// Enum definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumDef {
    /// `const enum`
    pub is_const: bool,

    pub members: Vec<EnumMemberDef>,

    /// Exports of a namespace merged into the enum
    pub namespace_members: Vec<MemberRef>,
}

impl EnumDef {
    pub fn new(is_const: bool) -> Self {
        Self {
            is_const,
            ..Default::default()
        }
    }

    /// Get a member by name
    pub fn member(&self, name: &str) -> Option<&EnumMemberDef> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Auto-numbering state while walking enum members in order
#[derive(Debug, Clone, Copy)]
pub struct EnumCounter {
    next: Option<f64>,
}

impl Default for EnumCounter {
    fn default() -> Self {
        Self { next: Some(0.0) }
    }
}

impl EnumCounter {
    /// Value of the next member; `explicit` is its resolved initializer
    ///
    /// After a string-valued member there is no numeric successor, so
    /// auto-numbered members fall back to their own name.
    pub fn assign(&mut self, name: &str, explicit: Option<EnumValue>) -> EnumValue {
        let value = match explicit {
            Some(value) => value,
            None => match self.next {
                Some(n) => EnumValue::Number(n),
                None => EnumValue::String(name.to_string()),
            },
        };
        self.next = match &value {
            EnumValue::Number(n) => Some(n + 1.0),
            EnumValue::String(_) => None,
        };
        value
    }
}
