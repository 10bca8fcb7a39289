use std::fmt::{self, Debug, Formatter};
use std::ops::Range;

use serde::{Serialize, Serializer};

/// A source location, identifying both a file (via [Span::source_id], an
/// index into the compiler's source table) and a 1-based line number.
///
/// Unlike `prqlc`'s `Span`, this does not carry a byte range usable for
/// snippet rendering: spec diagnostics are `file:line`, not `file:line:col`.
///
/// `source_id` is only an index — this type has no access to the path it
/// names, the same way `prqlc_ast::Span` never carries one either. `Debug`
/// below prints the raw `source_id:line` pair; rendering the real
/// `path:line` a user sees requires the `source_id -> path` table built
/// during `require` resolution (`sddl::SourceMap`), so that happens one
/// layer up, in `sddl::CompileError`'s `Display`.
#[derive(Clone, PartialEq, Eq, Copy, Hash)]
pub struct Span {
    pub source_id: u16,
    pub line: u32,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(source_id: u16, line: u32, range: Range<usize>) -> Self {
        Span {
            source_id,
            line,
            start: range.start,
            end: range.end,
        }
    }

    pub fn merge(a: Span, b: Span) -> Span {
        debug_assert_eq!(a.source_id, b.source_id);
        Span {
            source_id: a.source_id,
            line: a.line.min(b.line),
            start: a.start.min(b.start),
            end: a.end.max(b.end),
        }
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source_id, self.line)
    }
}

impl Serialize for Span {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self:?}"))
    }
}
