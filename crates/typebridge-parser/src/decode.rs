//! Literal to value decoding shared by both dialects
//!
//! Nested lists are decoded in place: every element keeps its absolute span
//! in the original literal, so an error deep inside `[[1,[2]],3]` points at
//! the right byte of the whole input.

use crate::element::ElementKind;
use crate::scanner::{Dialect, RawElement, malformed, split_elements};
use typebridge_diagnostics::{Result, Span, TB0200, TB0204};
use typebridge_types::Value;

/// Decode the literal that starts at byte `from` of `source`
pub fn decode_literal(
    dialect: &Dialect,
    source: &str,
    from: usize,
    element_type: &str,
) -> Result<Vec<Value>> {
    let rest = &source[from..];
    let trimmed = rest.trim();
    let start = from + (rest.len() - rest.trim_start().len());
    let list = Span::new(start, start + trimmed.len());

    if !dialect.is_delimited(trimmed) {
        let message = format!(
            "expected a list delimited by '{}' and '{}'",
            char::from(dialect.open),
            char::from(dialect.close)
        );
        return Err(malformed(TB0200, &message, source, list));
    }

    decode_list(dialect, source, list, element_type)
}

fn decode_list(
    dialect: &Dialect,
    source: &str,
    list: Span,
    element_type: &str,
) -> Result<Vec<Value>> {
    let kind = ElementKind::classify(element_type);
    split_elements(dialect, source, list)?
        .iter()
        .map(|raw| decode_element(dialect, source, raw, kind, element_type))
        .collect()
}

fn decode_element(
    dialect: &Dialect,
    source: &str,
    raw: &RawElement<'_>,
    kind: ElementKind<'_>,
    element_type: &str,
) -> Result<Value> {
    let text = raw.text;

    if dialect.is_delimited(text) {
        let inner_type = kind.nested_type(element_type);
        return decode_list(dialect, source, raw.span, inner_type).map(Value::Array);
    }

    if dialect.is_quoted(text) {
        return Ok(Value::Text(dialect.unescape(&text[1..text.len() - 1])));
    }

    let bytes = text.as_bytes();
    if bytes[0] == dialect.open || bytes[bytes.len() - 1] == dialect.close {
        return Err(malformed(
            TB0204,
            "nested list mixed with other text",
            source,
            raw.span,
        ));
    }

    if text.eq_ignore_ascii_case("NULL") {
        return Ok(Value::Null);
    }

    Ok(kind.convert_scalar(text, dialect.infer_untyped))
}
