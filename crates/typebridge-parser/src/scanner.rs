//! Top-level element scanner shared by both array dialects

use smallvec::SmallVec;
use typebridge_diagnostics::{ConvertError, ErrorCode, Result, Span, TB0201, TB0202, TB0203};

/// Delimiters and quoting rules of one array literal syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Opening delimiter of a list
    pub open: u8,
    /// Closing delimiter of a list
    pub close: u8,
    /// Characters that start and end a quoted element
    pub quotes: &'static [u8],
    /// Map `\n`, `\t`, `\r` and `\0` to control characters when unescaping
    pub control_escapes: bool,
    /// Read unquoted numbers as numbers even when the element type is not numeric
    pub infer_untyped: bool,
}

impl Dialect {
    /// `[1,'a',NULL]`
    pub const BRACKET: Self = Self {
        open: b'[',
        close: b']',
        quotes: b"'\"",
        control_escapes: true,
        infer_untyped: true,
    };

    /// `{1,"a",NULL}`
    pub const BRACE: Self = Self {
        open: b'{',
        close: b'}',
        quotes: b"\"",
        control_escapes: false,
        infer_untyped: false,
    };

    /// Check if a byte opens or closes a quoted element
    #[inline]
    pub fn is_quote(&self, b: u8) -> bool {
        self.quotes.contains(&b)
    }

    /// Check if `text` starts with the opening and ends with the closing delimiter
    pub fn is_delimited(&self, text: &str) -> bool {
        let bytes = text.as_bytes();
        bytes.len() >= 2 && bytes[0] == self.open && bytes[bytes.len() - 1] == self.close
    }

    /// Check if `text` is wrapped in a matching pair of quote characters
    pub fn is_quoted(&self, text: &str) -> bool {
        let bytes = text.as_bytes();
        bytes.len() >= 2 && self.is_quote(bytes[0]) && bytes[0] == bytes[bytes.len() - 1]
    }

    /// Remove backslash escapes in a single pass.
    ///
    /// `\c` yields `c`; with control escapes enabled `\n`, `\t`, `\r` and `\0`
    /// yield the matching control character. A trailing lone backslash is kept.
    pub fn unescape(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('n') if self.control_escapes => out.push('\n'),
                Some('t') if self.control_escapes => out.push('\t'),
                Some('r') if self.control_escapes => out.push('\r'),
                Some('0') if self.control_escapes => out.push('\0'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        }
        out
    }
}

/// One top-level element of a list, trimmed, with its byte span in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawElement<'a> {
    pub text: &'a str,
    pub span: Span,
}

/// Split the list at `list` into its top-level elements.
///
/// `list` covers the opening and closing delimiters inside `source`. Commas
/// split elements only outside quotes and at nesting depth zero. A backslash
/// escapes exactly one following character, inside or outside quotes.
/// Whitespace-only elements are skipped, so `[1,,2]` has two elements.
pub fn split_elements<'a>(
    dialect: &Dialect,
    source: &'a str,
    list: Span,
) -> Result<SmallVec<[RawElement<'a>; 8]>> {
    let bytes = source.as_bytes();
    let body_start = list.start + 1;
    let body_end = list.end.saturating_sub(1).max(body_start);

    let mut elements = SmallVec::new();
    let mut openers: SmallVec<[usize; 4]> = SmallVec::new();
    let mut quote: Option<(u8, usize)> = None;
    let mut escaped = false;
    let mut element_start = body_start;

    for (pos, &b) in bytes.iter().enumerate().take(body_end).skip(body_start) {
        if escaped {
            escaped = false;
            continue;
        }
        if b == b'\\' {
            escaped = true;
            continue;
        }

        match quote {
            Some((q, _)) => {
                if b == q {
                    quote = None;
                }
                continue;
            }
            None if dialect.is_quote(b) => {
                quote = Some((b, pos));
                continue;
            }
            None => {}
        }

        if b == dialect.open {
            openers.push(pos);
        } else if b == dialect.close {
            if openers.pop().is_none() {
                return Err(malformed(
                    TB0201,
                    "unmatched closing bracket",
                    source,
                    Span::single(pos),
                ));
            }
        } else if b == b',' && openers.is_empty() {
            push_element(&mut elements, source, element_start, pos);
            element_start = pos + 1;
        }
    }

    if let Some((_, start)) = quote {
        return Err(malformed(
            TB0203,
            "unterminated quoted element",
            source,
            Span::new(start, body_end),
        ));
    }
    if let Some(&pos) = openers.last() {
        return Err(malformed(
            TB0202,
            "unmatched opening bracket",
            source,
            Span::single(pos),
        ));
    }

    push_element(&mut elements, source, element_start, body_end);
    Ok(elements)
}

fn push_element<'a>(
    elements: &mut SmallVec<[RawElement<'a>; 8]>,
    source: &'a str,
    start: usize,
    end: usize,
) {
    let raw = &source[start..end];
    let text = raw.trim();
    if text.is_empty() {
        return;
    }
    let start = start + (raw.len() - raw.trim_start().len());
    elements.push(RawElement {
        text,
        span: Span::new(start, start + text.len()),
    });
}

pub fn malformed(code: ErrorCode, message: &str, source: &str, span: Span) -> ConvertError {
    ConvertError::malformed_array(code, message, source).with_span(span)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<&str> {
        let list = Span::new(0, source.len());
        split_elements(&Dialect::BRACKET, source, list)
            .unwrap()
            .iter()
            .map(|e| e.text)
            .collect()
    }

    #[test]
    fn test_split_flat() {
        assert_eq!(texts("[1, 2 ,3]"), vec!["1", "2", "3"]);
        assert!(texts("[]").is_empty());
        assert!(texts("[  ]").is_empty());
    }

    #[test]
    fn test_split_respects_quotes_and_nesting() {
        assert_eq!(
            texts("[1,[2,'x,y'],\"a]b\",'it\\'s']"),
            vec!["1", "[2,'x,y']", "\"a]b\"", "'it\\'s'"]
        );
    }

    #[test]
    fn test_split_skips_empty_elements() {
        assert_eq!(texts("[1,,2, ]"), vec!["1", "2"]);
    }

    #[test]
    fn test_element_spans_are_absolute() {
        let source = "[ab, [c]]";
        let elements = split_elements(&Dialect::BRACKET, source, Span::new(0, 9)).unwrap();
        assert_eq!(elements[0].span, Span::new(1, 3));
        assert_eq!(elements[1].span, Span::new(5, 8));
        assert_eq!(&source[elements[1].span.as_range()], "[c]");
    }

    #[test]
    fn test_unmatched_closing() {
        let source = "[1],[2]";
        let err = split_elements(&Dialect::BRACKET, source, Span::new(0, 7)).unwrap_err();
        assert_eq!(err.code(), TB0201);
        assert_eq!(err.span(), Some(Span::single(2)));
    }

    #[test]
    fn test_unmatched_opening() {
        let err = split_elements(&Dialect::BRACKET, "[1,[2]", Span::new(0, 6)).unwrap_err();
        assert_eq!(err.code(), TB0202);
        assert_eq!(err.span(), Some(Span::single(3)));
    }

    #[test]
    fn test_unterminated_quote() {
        let err = split_elements(&Dialect::BRACKET, "['abc]", Span::new(0, 6)).unwrap_err();
        assert_eq!(err.code(), TB0203);
        assert_eq!(err.span(), Some(Span::new(1, 5)));
    }

    #[test]
    fn test_brace_dialect_ignores_apostrophes() {
        let source = "{it's,\"b,c\"}";
        let elements =
            split_elements(&Dialect::BRACE, source, Span::new(0, source.len())).unwrap();
        let texts: Vec<_> = elements.iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["it's", "\"b,c\""]);
    }

    #[test]
    fn test_unescape() {
        assert_eq!(Dialect::BRACKET.unescape(r"a\'b\\c\nd"), "a'b\\c\nd");
        assert_eq!(Dialect::BRACE.unescape(r"a\nb"), "anb");
        assert_eq!(Dialect::BRACE.unescape("x\\"), "x\\");
    }
}
