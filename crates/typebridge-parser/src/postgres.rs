//! PostgreSQL array literals: `{1,"a b",{2,3},NULL}`

use crate::decode::decode_literal;
use crate::element::{ArrayElement, Element, float_literal, float32_literal};
use crate::scanner::Dialect;
use crate::ArrayCodec;
use typebridge_diagnostics::Result;
use typebridge_types::Value;

/// Brace dialect codec.
///
/// Elements are double-quoted only when they must be: empty strings, the
/// text `NULL`, and text containing braces, commas, quotes, backslashes or
/// whitespace. Booleans render as `t`/`f`. An explicit dimension prefix such
/// as `[1:3]={1,2,3}` is skipped on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostgresArrayCodec;

impl PostgresArrayCodec {
    pub const fn new() -> Self {
        Self
    }

    /// Format any slice of list items
    pub fn format_slice<T: ArrayElement>(&self, items: &[T]) -> String {
        let mut out = String::new();
        self.write_list(items, &mut out);
        out
    }

    fn write_list<T: ArrayElement>(&self, items: &[T], out: &mut String) {
        out.push('{');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write_element(item.as_element(), out);
        }
        out.push('}');
    }

    fn write_element(&self, element: Element<'_>, out: &mut String) {
        match element {
            Element::Null => out.push_str("NULL"),
            Element::Bool(b) => out.push(if b { 't' } else { 'f' }),
            Element::Int(i) => out.push_str(&i.to_string()),
            Element::UInt(u) => out.push_str(&u.to_string()),
            Element::Float(f) => out.push_str(&float_literal(f)),
            Element::Float32(f) => out.push_str(&float32_literal(f)),
            Element::Decimal(d) => out.push_str(&d.to_string()),
            Element::Text(s) if needs_quotes(&s) => quote_into(&s, out),
            Element::Text(s) => out.push_str(&s),
            Element::Nested(items) => self.write_list(items, out),
        }
    }
}

impl ArrayCodec for PostgresArrayCodec {
    fn parse_array(&self, literal: &str, element_type: &str) -> Result<Vec<Value>> {
        decode_literal(&Dialect::BRACE, literal, dimension_prefix_len(literal), element_type)
    }

    fn format_array(&self, items: &[Value]) -> String {
        self.format_slice(items)
    }
}

/// Length of a leading `[lo:hi]...=` dimension decoration, or 0
fn dimension_prefix_len(literal: &str) -> usize {
    let trimmed = literal.trim_start();
    if !trimmed.starts_with('[') {
        return 0;
    }
    match trimmed.find('=') {
        Some(eq)
            if trimmed[..eq]
                .bytes()
                .all(|b| b.is_ascii_digit() || matches!(b, b'[' | b']' | b':' | b'-')) =>
        {
            literal.len() - trimmed.len() + eq + 1
        }
        _ => 0,
    }
}

fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text.eq_ignore_ascii_case("NULL")
        || text
            .chars()
            .any(|c| matches!(c, '{' | '}' | ',' | '"' | '\\') || c.is_whitespace())
}

fn quote_into(text: &str, out: &mut String) {
    out.push('"');
    for ch in text.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
}
