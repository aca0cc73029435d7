//! Conversion between raw text and the escaped form used inside PO string
//! literals (and inside the string literals of the scanned source files).

/// Decodes an escaped literal body.
///
/// Recognized escapes are `\0`, `\t`, `\n`, `\r`, `\"`, `\\` and `\uXXXX`.
/// Other backslash pairs are kept as they are. Returns `None` when a `\u`
/// escape is not followed by four hex digits forming a Unicode scalar, or
/// when the text ends with a lone backslash.
///
/// ```rust
/// use pocatalog::escape::unescape;
/// assert_eq!(unescape(r#"Say \"hi\"\n"#).as_deref(), Some("Say \"hi\"\n"));
/// assert_eq!(unescape(r"\u00e9t\u00e9").as_deref(), Some("été"));
/// assert_eq!(unescape(r"\u12"), None);
/// ```
pub fn unescape(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '0' => out.push('\0'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            'u' => {
                let mut value = 0u32;
                for _ in 0..4 {
                    let digit = chars.next()?.to_digit(16)?;
                    value = value * 16 + digit;
                }
                out.push(char::from_u32(value)?);
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Some(out)
}

/// Escapes text for a quoted PO literal.
///
/// With `ascii_only`, every non-ASCII character is additionally written as
/// `\bXXXX` (lowercase hex). That form is only meant for display; [`unescape`]
/// does not read it back.
pub fn escape(text: &str, ascii_only: bool) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if ascii_only && !c.is_ascii() => {
                out.push_str(&format!("\\b{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}
