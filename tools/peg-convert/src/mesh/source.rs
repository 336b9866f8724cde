//! Cursor-based scanner over OBJ source text

/// Owned source text with a forward-only cursor.
///
/// Only [`SourceBuffer::reset`] moves the cursor backward. Spaces and tabs are
/// skipped before every token; line breaks are not.
pub struct SourceBuffer {
    bytes: Vec<u8>,
    pos: usize,
}

impl SourceBuffer {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            pos: 0,
        }
    }

    /// Current byte offset of the cursor
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Move the cursor back to the start (required between parser passes)
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// True at `\r`, `\n` or end of input
    pub fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some(b'\r' | b'\n'))
    }

    pub fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
    }

    /// Consume `byte` if it sits directly at the cursor (no space skipping)
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skip spaces, then consume `text` if the remaining input starts with it
    pub fn match_literal(&mut self, text: &str) -> bool {
        self.skip_spaces();
        if self.bytes[self.pos..].starts_with(text.as_bytes()) {
            self.pos += text.len();
            true
        } else {
            false
        }
    }

    /// Advance past the next `\n`, or to the end of input
    pub fn skip_to_next_line(&mut self) {
        match self.bytes[self.pos..].iter().position(|&b| b == b'\n') {
            Some(offset) => self.pos += offset + 1,
            None => self.pos = self.bytes.len(),
        }
    }

    /// Advance over the current run of non-whitespace bytes
    pub fn skip_token(&mut self) {
        while matches!(self.peek(), Some(b) if !b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skip spaces, then consume and return the next whitespace-delimited token
    pub fn read_keyword(&mut self) -> &[u8] {
        self.skip_spaces();
        let start = self.pos;
        self.skip_token();
        &self.bytes[start..self.pos]
    }

    /// Read a decimal or exponential literal, 0.0 if none is present
    pub fn read_float(&mut self) -> f32 {
        self.skip_spaces();
        let len = float_literal_len(&self.bytes[self.pos..]);
        let text = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        std::str::from_utf8(text)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.0)
    }

    /// Read an unsigned run of digits, 0 if none is present or it overflows
    pub fn read_int(&mut self) -> u32 {
        self.skip_spaces();
        let len = digit_run(&self.bytes[self.pos..]);
        let text = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        std::str::from_utf8(text)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    /// 1-based line number of the cursor
    pub fn line_number(&self) -> usize {
        self.bytes[..self.pos].iter().filter(|&&b| b == b'\n').count() + 1
    }

    /// Text from `from` up to the end of its line, cut to `max_chars`
    pub fn preview(&self, from: usize, max_chars: usize) -> String {
        let rest = &self.bytes[from.min(self.bytes.len())..];
        let end = rest
            .iter()
            .position(|&b| b == b'\r' || b == b'\n')
            .unwrap_or(rest.len());
        String::from_utf8_lossy(&rest[..end])
            .chars()
            .take(max_chars)
            .collect()
    }
}

fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of the longest prefix of `bytes` forming a float literal
fn float_literal_len(bytes: &[u8]) -> usize {
    let mut len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = digit_run(&bytes[len..]);
    len += int_digits;

    let mut frac_digits = 0;
    if bytes.get(len) == Some(&b'.') {
        frac_digits = digit_run(&bytes[len + 1..]);
        len += 1 + frac_digits;
    }

    if int_digits + frac_digits == 0 {
        return 0;
    }

    // Exponent only counts when at least one digit follows
    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let mut exp = len + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digit_run(&bytes[exp..]);
        if exp_digits > 0 {
            len = exp + exp_digits;
        }
    }

    len
}
