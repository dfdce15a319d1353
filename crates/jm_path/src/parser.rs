//! Single pass parser producing segment spans.

use alloc::vec::Vec;

use crate::SegmentKind;

/// Initial capacity of the span table, enough for most config keys.
const DEFAULT_CAPACITY: usize = 6;

// -----------------------------------------------------------------------------
// Span

/// A segment boundary inside the source text, `[start, end)` in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SegmentKind,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize, kind: SegmentKind) -> Self {
        Self { start, end, kind }
    }

    /// Returns the same span moved `offset` bytes to the right.
    #[inline]
    pub const fn shift(self, offset: usize) -> Self {
        Self::new(self.start + offset, self.end + offset, self.kind)
    }
}

// -----------------------------------------------------------------------------
// Parser

/// Splits `text` into spans.
///
/// - `[` at depth zero closes the pending segment and opens an `INDEXED` one.
/// - `]` returning to depth zero closes the indexed segment.
/// - `separator` at depth zero closes the pending segment.
/// - Any other character refines the pending [`SegmentKind`].
///
/// A separator never produces an empty segment, and unbalanced brackets mark
/// the final span `CORRUPTED` instead of failing.
pub(crate) fn parse(text: &str, separator: char) -> Vec<Span> {
    let mut spans = Vec::with_capacity(DEFAULT_CAPACITY);
    let mut depth: isize = 0;
    let mut offset = 0;
    let mut kind = SegmentKind::EMPTY;
    // Set once a `]` has no matching `[`; later brackets cannot undo it.
    let mut stray_close = false;

    for (position, c) in text.char_indices() {
        match c {
            '[' => {
                if depth == 0 {
                    if offset < position {
                        spans.push(Span::new(offset, position, close(kind)));
                    }
                    offset = position + 1;
                    kind = SegmentKind::INDEXED;
                }
                depth += 1;
            }
            ']' => {
                depth -= 1;
                if depth < 0 {
                    stray_close = true;
                } else if depth == 0 {
                    spans.push(Span::new(offset, position, kind));
                    offset = position + 1;
                    kind = SegmentKind::EMPTY;
                }
            }
            c if c == separator && depth == 0 => {
                if offset < position {
                    spans.push(Span::new(offset, position, close(kind)));
                }
                offset = position + c.len_utf8();
                kind = SegmentKind::EMPTY;
            }
            c => kind = classify(c, kind),
        }
    }

    if depth != 0 || stray_close {
        kind |= SegmentKind::CORRUPTED;
    }

    let end = text.len();
    if offset < end {
        spans.push(Span::new(offset, end, close(kind)));
    } else if !kind.is_empty() || spans.is_empty() {
        // Keeps `a[` (corrupted) and the lone segment of `""`.
        spans.push(Span::new(offset, end, kind));
    }

    spans
}

/// Refines `kind` with the class of `c`.
///
/// Digits count as `NUMERIC` only while no letter has been seen.
#[inline]
fn classify(c: char, kind: SegmentKind) -> SegmentKind {
    if c.is_ascii_alphabetic() {
        kind | SegmentKind::DEFAULT
    } else if c.is_ascii_digit() && !kind.is_default() {
        kind | SegmentKind::NUMERIC
    } else if c == '-' {
        kind | SegmentKind::DASHED
    } else {
        kind
    }
}

/// A non-empty plain segment without any recognised character is still `DEFAULT`.
#[inline]
fn close(kind: SegmentKind) -> SegmentKind {
    if kind.is_empty() {
        SegmentKind::DEFAULT
    } else {
        kind
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{Span, parse};
    use crate::SegmentKind;

    fn pieces(text: &str) -> Vec<(&str, SegmentKind)> {
        parse(text, '.')
            .into_iter()
            .map(|Span { start, end, kind }| (&text[start..end], kind))
            .collect()
    }

    #[test]
    fn dotted_indexed_dashed() {
        assert_eq!(
            pieces("a.b[0].c-d"),
            [
                ("a", SegmentKind::DEFAULT),
                ("b", SegmentKind::DEFAULT),
                ("0", SegmentKind::INDEXED | SegmentKind::NUMERIC),
                ("c-d", SegmentKind::DEFAULT | SegmentKind::DASHED),
            ]
        );
    }

    #[test]
    fn separator_inside_brackets() {
        assert_eq!(
            pieces("log[org.jmouse.core].level"),
            [
                ("log", SegmentKind::DEFAULT),
                ("org.jmouse.core", SegmentKind::INDEXED | SegmentKind::DEFAULT),
                ("level", SegmentKind::DEFAULT),
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(pieces(""), [("", SegmentKind::EMPTY)]);
    }

    #[test]
    fn leading_and_trailing_separators() {
        assert_eq!(pieces(".a"), [("a", SegmentKind::DEFAULT)]);
        assert_eq!(pieces("a."), [("a", SegmentKind::DEFAULT)]);
        assert_eq!(
            pieces("a..b"),
            [("a", SegmentKind::DEFAULT), ("b", SegmentKind::DEFAULT)]
        );
    }

    #[test]
    fn adjacent_brackets() {
        assert_eq!(
            pieces("a[0][1]"),
            [
                ("a", SegmentKind::DEFAULT),
                ("0", SegmentKind::INDEXED | SegmentKind::NUMERIC),
                ("1", SegmentKind::INDEXED | SegmentKind::NUMERIC),
            ]
        );
    }

    #[test]
    fn nested_brackets_keep_outer_extent() {
        assert_eq!(
            pieces("a[b[0]].c"),
            [
                ("a", SegmentKind::DEFAULT),
                ("b[0]", SegmentKind::INDEXED | SegmentKind::DEFAULT),
                ("c", SegmentKind::DEFAULT),
            ]
        );
    }

    #[test]
    fn unbalanced_brackets_are_corrupted() {
        let open = pieces("a[0");
        assert_eq!(open.len(), 2);
        assert_eq!(open[1].0, "0");
        assert!(open[1].1.is_corrupted());
        assert!(open[1].1.is_indexed());

        let bare = pieces("a[");
        assert_eq!(bare.len(), 2);
        assert!(bare[1].1.is_corrupted());

        let stray = pieces("a]b.c");
        assert!(stray.last().unwrap().1.is_corrupted());

        // A stray `]` stays corrupted even when a later `[` rebalances the count.
        for text in ["]a[", "a]b[c"] {
            let spans = pieces(text);
            assert!(spans.last().unwrap().1.is_corrupted(), "{text}");
        }
    }

    #[test]
    fn numeric_only_before_letters() {
        assert_eq!(pieces("1a"), [("1a", SegmentKind::NUMERIC | SegmentKind::DEFAULT)]);
        assert_eq!(pieces("a1"), [("a1", SegmentKind::DEFAULT)]);
        assert_eq!(pieces("_"), [("_", SegmentKind::DEFAULT)]);
    }

    #[test]
    fn custom_separator() {
        let spans = parse("a/b[x/y]", '/');
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[2], Span::new(4, 7, SegmentKind::INDEXED | SegmentKind::DEFAULT));
    }
}
