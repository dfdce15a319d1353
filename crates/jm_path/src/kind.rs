use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// The classification of a single path segment.
    ///
    /// Flags combine: `[0]` is `INDEXED | NUMERIC`, `c-d` is `DEFAULT | DASHED`.
    /// The empty set is exposed as [`SegmentKind::EMPTY`].
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct SegmentKind: u16 {
        /// The segment contains at least one letter.
        const DEFAULT   = 1 << 2;
        /// The segment was written inside brackets, e.g. `[0]` or `[org.jmouse]`.
        const INDEXED   = 1 << 4;
        /// The segment starts with digits, before any letter.
        const NUMERIC   = 1 << 6;
        /// The segment contains a `-`.
        const DASHED    = 1 << 8;
        /// The segment was cut short by an unbalanced bracket.
        const CORRUPTED = 1 << 10;
    }
}

impl SegmentKind {
    /// No classification: the segment is empty.
    pub const EMPTY: Self = Self::empty();

    #[inline]
    pub const fn is_default(self) -> bool {
        self.contains(Self::DEFAULT)
    }

    #[inline]
    pub const fn is_indexed(self) -> bool {
        self.contains(Self::INDEXED)
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.contains(Self::NUMERIC)
    }

    #[inline]
    pub const fn is_dashed(self) -> bool {
        self.contains(Self::DASHED)
    }

    #[inline]
    pub const fn is_corrupted(self) -> bool {
        self.contains(Self::CORRUPTED)
    }
}

impl fmt::Display for SegmentKind {
    /// Formats as `[EMPTY]` or `[DEFAULT & NUMERIC]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("[EMPTY]");
        }

        f.write_str("[")?;
        for (index, (name, _)) in self.iter_names().enumerate() {
            if index > 0 {
                f.write_str(" & ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("]")
    }
}
