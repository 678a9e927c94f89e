use std::fmt;

/// A byte range `[start, end)` into the source text.
///
/// Offsets are absolute: a span produced while scanning a fragment that begins
/// at byte `base` of a larger document already has `base` added in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Shifts both ends back by `base`, turning an absolute span into an
    /// index range for the fragment that started at `base`.
    #[must_use]
    pub fn relative_to(self, base: usize) -> std::ops::Range<usize> {
        self.start.saturating_sub(base)..self.end.saturating_sub(base)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
