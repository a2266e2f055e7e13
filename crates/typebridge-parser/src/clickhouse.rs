//! ClickHouse array literals: `[1,'a',[2,3],NULL]`

use crate::decode::decode_literal;
use crate::element::{ArrayElement, Element, float_literal, float32_literal};
use crate::scanner::Dialect;
use crate::ArrayCodec;
use typebridge_diagnostics::Result;
use typebridge_types::Value;

/// Bracket dialect codec.
///
/// Strings are single-quoted with backslash escapes, booleans render as `1`
/// and `0`, absent elements as `NULL`. Either quote character is accepted on
/// input. Unquoted numbers are read as numbers even inside `Array(String)`,
/// since the server never leaves a string unquoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickHouseArrayCodec;

impl ClickHouseArrayCodec {
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
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write_element(item.as_element(), out);
        }
        out.push(']');
    }

    fn write_element(&self, element: Element<'_>, out: &mut String) {
        match element {
            Element::Null => out.push_str("NULL"),
            Element::Bool(b) => out.push(if b { '1' } else { '0' }),
            Element::Int(i) => out.push_str(&i.to_string()),
            Element::UInt(u) => out.push_str(&u.to_string()),
            Element::Float(f) => out.push_str(&float_literal(f)),
            Element::Float32(f) => out.push_str(&float32_literal(f)),
            Element::Decimal(d) => out.push_str(&d.to_string()),
            Element::Text(s) => quote_into(&s, out),
            Element::Nested(items) => self.write_list(items, out),
        }
    }
}

impl ArrayCodec for ClickHouseArrayCodec {
    fn parse_array(&self, literal: &str, element_type: &str) -> Result<Vec<Value>> {
        decode_literal(&Dialect::BRACKET, literal, 0, element_type)
    }

    fn format_array(&self, items: &[Value]) -> String {
        self.format_slice(items)
    }
}

fn quote_into(text: &str, out: &mut String) {
    out.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            other => out.push(other),
        }
    }
    out.push('\'');
}
