/// Byte cursor over path data with single-character lookahead.
///
/// The grammar is ASCII-only, so the cursor walks bytes and reports them
/// as `char`s; end of input is `None` rather than a sentinel value.
#[derive(Debug)]
pub struct Reader<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader over the given source text.
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
        }
    }

    /// Current byte offset, used for error reporting.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.src.get(self.pos).map(|&b| b as char)
    }

    /// Consumes and returns the next character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Consumes any run of whitespace and comma separators.
    pub fn skip_separators(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r' | ',')) {
            self.pos += 1;
        }
    }
}
