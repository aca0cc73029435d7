//! Locale-aware ordering shared by the parser and the merge engine.
//!
//! Strings are compared the way a file browser sorts names: case and
//! character width are ignored, accents only break ties, and runs of digits
//! compare by numeric value (`"Item 2"` sorts before `"Item 10"`). When two
//! strings are still equal after that, their raw code points decide, so
//! [`compare`] only returns [`Ordering::Equal`] for identical strings.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::types::{Entry, Reference};

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    /// A run of ASCII digits with leading zeros removed.
    Number(String),
    Text(char),
}

impl Segment {
    fn cmp(&self, other: &Segment) -> Ordering {
        match (self, other) {
            (Segment::Number(a), Segment::Number(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            (Segment::Text(c), Segment::Number(_)) => c.cmp(&'0'),
            (Segment::Number(_), Segment::Text(c)) => '0'.cmp(c),
        }
    }
}

fn segments(s: &str, ignore_marks: bool) -> Vec<Segment> {
    let mut out = Vec::with_capacity(s.len());
    let mut digits = String::new();

    let folded = s
        .nfkd()
        .filter(|c| !(ignore_marks && is_combining_mark(*c)))
        .flat_map(char::to_lowercase);

    for c in folded {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        flush_number(&mut out, &mut digits);
        out.push(Segment::Text(c));
    }
    flush_number(&mut out, &mut digits);
    out
}

fn flush_number(out: &mut Vec<Segment>, digits: &mut String) {
    if !digits.is_empty() {
        let value = digits.trim_start_matches('0').to_string();
        digits.clear();
        out.push(Segment::Number(value));
    }
}

fn compare_segments(a: &[Segment], b: &[Segment]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ord = x.cmp(y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

/// Compares two strings in locale-aware order.
///
/// ```rust
/// use std::cmp::Ordering;
/// use pocatalog::collation::compare;
/// assert_eq!(compare("Item 2", "Item 10"), Ordering::Less);
/// assert_eq!(compare("apple", "Banana"), Ordering::Less);
/// assert_eq!(compare("same", "same"), Ordering::Equal);
/// ```
pub fn compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    compare_segments(&segments(a, true), &segments(b, true))
        .then_with(|| compare_segments(&segments(a, false), &segments(b, false)))
        .then_with(|| a.cmp(b))
}

/// Orders `(id, context)` keys: by id, then entries without context first,
/// then by context.
pub fn compare_keys(
    id_a: &str,
    context_a: Option<&str>,
    id_b: &str,
    context_b: Option<&str>,
) -> Ordering {
    compare(id_a, id_b).then_with(|| match (context_a, context_b) {
        (Some(a), Some(b)) => compare(a, b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

/// The catalog entry order. `Equal` means the two entries share a key.
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    compare_keys(&a.id, a.context.as_deref(), &b.id, b.context.as_deref())
}

/// Orders references by path, then line number; a reference with a line
/// number sorts before one without on the same path.
pub fn compare_references(a: &Reference, b: &Reference) -> Ordering {
    compare(&a.source_file_path, &b.source_file_path).then_with(|| {
        match (a.line_number, b.line_number) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    })
}

/// Sorts entries in catalog order and returns the first pair of entries that
/// share a key, if any.
pub fn sort_entries(entries: &mut [Entry]) -> Option<&Entry> {
    entries.sort_by(compare_entries);
    entries
        .windows(2)
        .position(|pair| compare_entries(&pair[0], &pair[1]) == Ordering::Equal)
        .map(|index| &entries[index])
}
