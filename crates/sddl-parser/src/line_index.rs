/// Maps byte offsets to 1-based line numbers. Parsing runs over a token
/// stream annotated with 0-based byte `Range<usize>` spans (chumsky's
/// native span type); this is applied once, after a file parses
/// successfully, to stamp every `sddl_ast::Span` with its real line number
/// instead of threading a line lookup through every grammar rule.
pub struct LineIndex {
    /// Byte offset of the start of each line; `newline_at[0] == 0`.
    newline_at: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut newline_at = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                newline_at.push(i + 1);
            }
        }
        LineIndex { newline_at }
    }

    /// 1-based line number containing `offset`.
    pub fn line_of(&self, offset: usize) -> u32 {
        let line0 = self.newline_at.partition_point(|&start| start <= offset);
        line0 as u32
    }
}
