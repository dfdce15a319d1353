use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt::{self, Write};
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::parser::{Span, parse};
use crate::{PathError, SEPARATOR, SegmentKind};

// -----------------------------------------------------------------------------
// Segment

/// A borrowed view of one segment of a [`NamePath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment<'a> {
    text: &'a str,
    kind: SegmentKind,
}

impl<'a> Segment<'a> {
    /// Returns the segment text, without brackets.
    #[inline]
    pub const fn as_str(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub const fn kind(&self) -> SegmentKind {
        self.kind
    }

    #[inline]
    pub const fn is_indexed(&self) -> bool {
        self.kind.is_indexed()
    }

    /// Parses the segment as a list index.
    ///
    /// Only purely numeric segments qualify, so `[1a]` and `1-2` return `None`.
    pub fn as_index(&self) -> Option<usize> {
        if self.kind.is_corrupted() || !self.text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.text.parse().ok()
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

// -----------------------------------------------------------------------------
// NamePath

/// A parsed, immutable property path such as `server.hosts[0].name`.
///
/// The source text and the segment table are shared, so cloning, slicing
/// and iterating never copy characters. Merging (`append`, `prepend`)
/// produces a new path whose second half is re-based, not re-parsed.
///
/// # Rendering
///
/// A path that covers all of its segments renders its source text
/// verbatim, so `NamePath::new(s).to_string() == s` for well formed input.
/// A slice renders canonically: plain segments joined by the separator,
/// indexed segments wrapped in brackets.
///
/// # Examples
///
/// ```
/// use jm_path::NamePath;
///
/// let path = NamePath::new("server.hosts[0].name");
/// assert_eq!(path.get(1), Some("hosts"));
///
/// let hosts = path.slice(1, 3).unwrap();
/// assert_eq!(hosts.to_string(), "hosts[0]");
///
/// let port = path.limit(1).append_str("port");
/// assert_eq!(port.to_string(), "server.port");
/// ```
#[derive(Clone)]
pub struct NamePath {
    text: Arc<str>,
    spans: Arc<[Span]>,
    offset: usize,
    limit: usize,
    separator: char,
}

impl Default for NamePath {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl NamePath {
    /// Parses `name` using the default `.` separator.
    #[inline]
    pub fn new(name: &str) -> Self {
        Self::with_separator(name, SEPARATOR)
    }

    /// Parses `name` using a custom separator.
    ///
    /// Brackets always delimit indexed segments, whatever the separator.
    pub fn with_separator(name: &str, separator: char) -> Self {
        let spans = parse(name, separator);
        Self::from_parts(Arc::from(name), spans, separator)
    }

    /// A path without any segment.
    pub fn empty() -> Self {
        Self::from_parts(Arc::from(""), Vec::new(), SEPARATOR)
    }

    fn from_parts(text: Arc<str>, spans: Vec<Span>, separator: char) -> Self {
        let limit = spans.len();
        Self {
            text,
            spans: Arc::from(spans),
            offset: 0,
            limit,
            separator,
        }
    }

    #[inline]
    fn spans(&self) -> &[Span] {
        &self.spans[self.offset..self.limit]
    }

    // Covers the whole span table, so `text` is an exact rendering.
    #[inline]
    fn is_full(&self) -> bool {
        self.offset == 0 && self.limit == self.spans.len()
    }

    #[inline]
    fn span_text(&self, span: &Span) -> &str {
        &self.text[span.start..span.end]
    }

    /// Returns the number of segments.
    ///
    /// The empty string parses to a single `EMPTY` segment.
    #[inline]
    pub fn len(&self) -> usize {
        self.limit - self.offset
    }

    /// Returns `true` if the path renders to an empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0 || (self.is_full() && self.text.is_empty())
    }

    /// Returns the separator this path was parsed with.
    #[inline]
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Returns the text of the segment at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.spans().get(index).map(|span| self.span_text(span))
    }

    /// Returns the segment at `index`.
    pub fn segment(&self, index: usize) -> Option<Segment<'_>> {
        self.spans().get(index).map(|span| Segment {
            text: self.span_text(span),
            kind: span.kind,
        })
    }

    /// Returns the kind of the segment at `index`.
    #[inline]
    pub fn kind(&self, index: usize) -> Option<SegmentKind> {
        self.spans().get(index).map(|span| span.kind)
    }

    /// Returns the byte length of the segment at `index`.
    #[inline]
    pub fn segment_len(&self, index: usize) -> Option<usize> {
        self.spans().get(index).map(|span| span.end - span.start)
    }

    #[inline]
    pub fn first(&self) -> Option<Segment<'_>> {
        self.segment(0)
    }

    #[inline]
    pub fn last(&self) -> Option<Segment<'_>> {
        self.len().checked_sub(1).and_then(|index| self.segment(index))
    }

    /// Returns `true` if `index` addresses the last segment.
    #[inline]
    pub fn is_last(&self, index: usize) -> bool {
        self.len().checked_sub(1) == Some(index)
    }

    /// Returns `true` if any segment is `CORRUPTED`.
    pub fn is_corrupted(&self) -> bool {
        self.spans().iter().any(|span| span.kind.is_corrupted())
    }

    /// Returns an iterator over the segments in source order.
    #[inline]
    pub fn iter(&self) -> Segments<'_> {
        self.into_iter()
    }

    /// Returns the segments `[offset, limit)` as a new path.
    ///
    /// The result shares the text and the segment table with `self`.
    pub fn slice(&self, offset: usize, limit: usize) -> Result<Self, PathError> {
        if offset > limit {
            return Err(PathError::InvalidRange {
                start: offset,
                end: limit,
            });
        }
        if limit > self.len() {
            return Err(PathError::OutOfBounds {
                index: limit,
                len: self.len(),
            });
        }

        Ok(Self {
            text: self.text.clone(),
            spans: self.spans.clone(),
            offset: self.offset + offset,
            limit: self.offset + limit,
            separator: self.separator,
        })
    }

    /// Drops the first `count` segments.
    #[inline]
    pub fn skip(&self, count: usize) -> Result<Self, PathError> {
        self.slice(count, self.len())
    }

    /// Keeps at most the first `limit` segments.
    #[inline]
    pub fn limit(&self, limit: usize) -> Self {
        let limit = limit.min(self.len());
        Self {
            limit: self.offset + limit,
            ..self.clone()
        }
    }

    /// Returns `self` followed by `suffix`.
    ///
    /// The separator is inserted unless either side is empty or `suffix`
    /// starts with an indexed segment.
    #[inline]
    pub fn append(&self, suffix: &NamePath) -> Self {
        merge(self, suffix)
    }

    /// Returns `prefix` followed by `self`.
    #[inline]
    pub fn prepend(&self, prefix: &NamePath) -> Self {
        merge(prefix, self)
    }

    /// Parses `suffix` and appends it.
    #[inline]
    pub fn append_str(&self, suffix: &str) -> Self {
        self.append(&Self::with_separator(suffix, self.separator))
    }

    /// Parses `prefix` and prepends it.
    #[inline]
    pub fn prepend_str(&self, prefix: &str) -> Self {
        self.prepend(&Self::with_separator(prefix, self.separator))
    }

    /// Appends `suffix` in place.
    pub fn suffix(&mut self, suffix: &str) {
        *self = self.append_str(suffix);
    }

    /// Prepends `prefix` in place.
    pub fn prefix(&mut self, prefix: &str) {
        *self = self.prepend_str(prefix);
    }

    /// Returns the rendered path.
    ///
    /// Borrowed for a full path, rendered for a slice.
    pub fn path(&self) -> Cow<'_, str> {
        if self.is_full() {
            Cow::Borrowed(&self.text)
        } else {
            Cow::Owned(self.to_string())
        }
    }

    // Does the rendering begin with `[`?
    fn starts_indexed(&self) -> bool {
        if self.is_full() {
            self.text.starts_with('[')
        } else {
            self.spans().first().is_some_and(|span| span.kind.is_indexed())
        }
    }

    /// Writes the rendering of `self` to `text`, recording spans re-based on `text`.
    fn render_into(&self, text: &mut String, spans: &mut Vec<Span>) {
        let base = text.len();

        if self.is_full() {
            text.push_str(&self.text);
            spans.extend(self.spans.iter().map(|span| span.shift(base)));
            return;
        }

        for (index, span) in self.spans().iter().enumerate() {
            let segment = self.span_text(span);
            if span.kind.is_indexed() {
                text.push('[');
                let start = text.len();
                text.push_str(segment);
                spans.push(Span::new(start, text.len(), span.kind));
                if !span.kind.is_corrupted() {
                    text.push(']');
                }
            } else {
                if index > 0 {
                    text.push(self.separator);
                }
                let start = text.len();
                text.push_str(segment);
                spans.push(Span::new(start, text.len(), span.kind));
            }
        }
    }
}

fn merge(left: &NamePath, right: &NamePath) -> NamePath {
    if right.is_empty() {
        return left.clone();
    }
    if left.is_empty() {
        return right.clone();
    }

    let mut text = String::with_capacity(left.text.len() + right.text.len() + 1);
    let mut spans = Vec::with_capacity(left.len() + right.len());

    left.render_into(&mut text, &mut spans);
    if !right.starts_indexed() {
        text.push(left.separator);
    }
    right.render_into(&mut text, &mut spans);

    NamePath::from_parts(Arc::from(text), spans, left.separator)
}

// -----------------------------------------------------------------------------
// Traits

impl fmt::Display for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_full() {
            return f.write_str(&self.text);
        }

        for (index, span) in self.spans().iter().enumerate() {
            let segment = self.span_text(span);
            if span.kind.is_indexed() {
                f.write_char('[')?;
                f.write_str(segment)?;
                if !span.kind.is_corrupted() {
                    f.write_char(']')?;
                }
            } else {
                if index > 0 {
                    f.write_char(self.separator)?;
                }
                f.write_str(segment)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamePath").field(&self.path()).finish()
    }
}

impl PartialEq for NamePath {
    fn eq(&self, other: &Self) -> bool {
        self.path() == other.path()
    }
}

impl Eq for NamePath {}

impl Hash for NamePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path().hash(state);
    }
}

impl FromStr for NamePath {
    type Err = Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for NamePath {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&String> for NamePath {
    #[inline]
    fn from(value: &String) -> Self {
        Self::new(value)
    }
}

impl<'a> IntoIterator for &'a NamePath {
    type Item = Segment<'a>;
    type IntoIter = Segments<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Segments {
            text: &self.text,
            spans: self.spans().iter(),
        }
    }
}

/// An iterator over the segments of a [`NamePath`].
#[derive(Clone)]
pub struct Segments<'a> {
    text: &'a str,
    spans: core::slice::Iter<'a, Span>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let span = self.spans.next()?;
        Some(Segment {
            text: &self.text[span.start..span.end],
            kind: span.kind,
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.spans.size_hint()
    }
}

impl ExactSizeIterator for Segments<'_> {}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::NamePath;
    use crate::{PathError, SegmentKind};

    fn texts(path: &NamePath) -> Vec<&str> {
        path.iter().map(|segment| segment.as_str()).collect()
    }

    #[test]
    fn round_trip() {
        for text in [
            "",
            "a",
            "a.b.c",
            "a.b[0].c-d",
            "server.hosts[0].name",
            "log[org.jmouse.core].level",
            "a[0][1]",
            "[0].name",
            "a..b",
            ".a.",
        ] {
            assert_eq!(NamePath::new(text).to_string(), text);
            assert_eq!(NamePath::new(text).path(), text);
        }
    }

    #[test]
    fn four_segments() {
        let path = NamePath::new("a.b[0].c-d");
        assert_eq!(path.len(), 4);
        assert_eq!(texts(&path), ["a", "b", "0", "c-d"]);
        assert_eq!(path.kind(0), Some(SegmentKind::DEFAULT));
        assert_eq!(path.kind(1), Some(SegmentKind::DEFAULT));
        assert_eq!(path.kind(2), Some(SegmentKind::INDEXED | SegmentKind::NUMERIC));
        assert_eq!(path.kind(3), Some(SegmentKind::DEFAULT | SegmentKind::DASHED));
        assert_eq!(path.segment_len(3), Some(3));
        assert_eq!(path.first().unwrap().as_str(), "a");
        assert_eq!(path.last().unwrap().as_str(), "c-d");
        assert!(path.is_last(3));
        assert!(!path.is_last(2));
        assert!(!path.is_last(usize::MAX));
        assert!(!NamePath::empty().is_last(0));
        assert_eq!(path.segment(2).unwrap().as_index(), Some(0));
        assert_eq!(path.segment(3).unwrap().as_index(), None);
    }

    #[test]
    fn bracketed_separator_is_not_split() {
        let path = NamePath::new("log[org.jmouse.core].level");
        assert_eq!(texts(&path), ["log", "org.jmouse.core", "level"]);
        assert!(path.segment(1).unwrap().is_indexed());
    }

    #[test]
    fn corrupted_input() {
        let path = NamePath::new("a[0");
        assert!(path.last().unwrap().kind().is_corrupted());
        assert!(path.is_corrupted());
        assert!(!NamePath::new("a[0]").is_corrupted());
    }

    #[test]
    fn empty_paths() {
        let blank = NamePath::new("");
        assert_eq!(blank.len(), 1);
        assert_eq!(blank.kind(0), Some(SegmentKind::EMPTY));
        assert!(blank.is_empty());

        let empty = NamePath::empty();
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());
        assert!(empty.first().is_none());
        assert!(empty.last().is_none());
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn append_inserts_separator() {
        let path = NamePath::new("a.b").append(&NamePath::new("c.d"));
        assert_eq!(path.to_string(), "a.b.c.d");
        assert_eq!(texts(&path), ["a", "b", "c", "d"]);
    }

    #[test]
    fn append_indexed_has_no_separator() {
        let path = NamePath::new("list").append(&NamePath::new("[2].name"));
        assert_eq!(path.to_string(), "list[2].name");
        assert_eq!(texts(&path), ["list", "2", "name"]);
        assert_eq!(path.kind(1), Some(SegmentKind::INDEXED | SegmentKind::NUMERIC));
    }

    #[test]
    fn append_with_empty_side() {
        let path = NamePath::new("a.b");
        assert_eq!(path.append(&NamePath::new("")).to_string(), "a.b");
        assert_eq!(NamePath::new("").append(&path).to_string(), "a.b");
        assert_eq!(NamePath::empty().append_str("x").len(), 1);
    }

    #[test]
    fn append_rebases_offsets() {
        let path = NamePath::new("server").append_str("hosts[1].name");
        assert_eq!(path.get(1), Some("hosts"));
        assert_eq!(path.get(2), Some("1"));
        assert_eq!(path.get(3), Some("name"));
    }

    #[test]
    fn prefix_and_suffix_in_place() {
        let mut path = NamePath::new("port");
        path.prefix("server");
        path.suffix("[0]");
        assert_eq!(path.to_string(), "server.port[0]");
        assert_eq!(NamePath::new("b").prepend_str("a").to_string(), "a.b");
    }

    #[test]
    fn slice_skip_limit() {
        let path = NamePath::new("a.b[0].c-d");

        let middle = path.slice(1, 3).unwrap();
        assert_eq!(texts(&middle), ["b", "0"]);
        assert_eq!(middle.to_string(), "b[0]");

        assert_eq!(texts(&path.skip(2).unwrap()), ["0", "c-d"]);
        assert_eq!(path.skip(2).unwrap().to_string(), "[0].c-d");
        assert_eq!(texts(&path.limit(2)), ["a", "b"]);
        assert_eq!(path.limit(10).len(), 4);
        assert!(path.skip(4).unwrap().is_empty());
    }

    #[test]
    fn slice_bounds() {
        let path = NamePath::new("a.b");
        assert_eq!(
            path.slice(0, 3).unwrap_err(),
            PathError::OutOfBounds { index: 3, len: 2 }
        );
        assert_eq!(
            path.slice(2, 1).unwrap_err(),
            PathError::InvalidRange { start: 2, end: 1 }
        );
        assert!(path.skip(3).is_err());
    }

    #[test]
    fn adjacent_slices_rejoin() {
        let path = NamePath::new("a.b[0].c-d[x.y]");
        for split in 0..=path.len() {
            let head = path.limit(split);
            let tail = path.skip(split).unwrap();
            let joined = head.append(&tail);
            assert_eq!(joined, path);
            assert_eq!(
                joined.iter().collect::<Vec<_>>(),
                path.iter().collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn equality_by_rendering() {
        let full = NamePath::new("a.b");
        let sliced = NamePath::new("a.b.c").limit(2);
        assert_eq!(full, sliced);
        assert_ne!(full, NamePath::new("a.c"));
        assert_eq!(format!("{full:?}"), "NamePath(\"a.b\")");
    }

    #[test]
    fn custom_separator() {
        let path = NamePath::with_separator("a/b", '/').append_str("c");
        assert_eq!(path.to_string(), "a/b/c");
        assert_eq!(path.separator(), '/');
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn from_str() {
        let path: NamePath = "a.b".parse().unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(NamePath::from("x"), NamePath::new("x"));
    }
}
