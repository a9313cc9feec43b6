//! Line framing
//!
//! Messages are delimited by a single `\n`. There is no length prefix and no
//! escaping, so framing is just appending the delimiter on the way out and
//! scanning for it on the way in.

/// Message delimiter
pub const DELIMITER: u8 = b'\n';

/// Frame a message for the wire: the text followed by exactly one delimiter
pub fn frame(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len() + 1);
    bytes.extend_from_slice(text.as_bytes());
    bytes.push(DELIMITER);
    bytes
}

/// Growth buffer that accumulates inbound bytes until a delimiter completes a line.
///
/// Bytes after the first delimiter stay buffered for the next line.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
    /// Prefix of `buf` already known to hold no delimiter
    scanned: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Remove and return the next complete line, delimiter included.
    ///
    /// Valid UTF-8 is decoded as such. Any other line is taken as single-byte
    /// text and each byte maps to the char with the same value, so no byte is
    /// lost or replaced.
    pub fn take_line(&mut self) -> Option<String> {
        self.take_line_within(usize::MAX).unwrap_or(None)
    }

    /// Like [`take_line`](Self::take_line), but a complete line longer than
    /// `max_len` bytes (delimiter included) is dropped and its length returned
    /// as the error.
    pub fn take_line_within(&mut self, max_len: usize) -> Result<Option<String>, usize> {
        let offset = self.buf[self.scanned..]
            .iter()
            .position(|&b| b == DELIMITER);

        match offset {
            Some(i) => {
                let end = self.scanned + i + 1;
                let line: Vec<u8> = self.buf.drain(..end).collect();
                self.scanned = 0;
                if line.len() > max_len {
                    return Err(line.len());
                }
                Ok(Some(decode_line(line)))
            }
            None => {
                self.scanned = self.buf.len();
                Ok(None)
            }
        }
    }

    /// Number of buffered bytes not yet returned as a line
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drop any partial line, returning how many bytes were discarded
    pub fn discard(&mut self) -> usize {
        let n = self.buf.len();
        self.buf.clear();
        self.scanned = 0;
        n
    }
}

fn decode_line(line: Vec<u8>) -> String {
    match String::from_utf8(line) {
        Ok(text) => text,
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unframe(bytes: &[u8]) -> String {
        let mut buffer = LineBuffer::new();
        buffer.extend(bytes);
        let line = buffer.take_line().expect("complete line");
        assert!(buffer.is_empty());
        line.strip_suffix('\n').unwrap().to_string()
    }

    #[test]
    fn test_frame_appends_one_delimiter() {
        assert_eq!(frame("list"), b"list\n");
        assert_eq!(frame(""), b"\n");
    }

    #[test]
    fn test_frame_then_unframe_returns_text() {
        for text in ["", "play", "nameMike", "move1,0;1,0", "{\"Height\": 10}", "with\rcarriage"] {
            assert_eq!(unframe(&frame(text)), text);
        }
    }

    #[test]
    fn test_lines_do_not_leak_across_boundaries() {
        let mut buffer = LineBuffer::new();
        buffer.extend(b"ok\r\nwelc");
        assert_eq!(buffer.take_line().as_deref(), Some("ok\r\n"));
        assert_eq!(buffer.take_line(), None);
        assert_eq!(buffer.len(), 4);

        buffer.extend(b"ome Mike\n{\"Height\":");
        assert_eq!(buffer.take_line().as_deref(), Some("welcome Mike\n"));
        assert_eq!(buffer.take_line(), None);

        buffer.extend(b" 10}\n");
        assert_eq!(buffer.take_line().as_deref(), Some("{\"Height\": 10}\n"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_single_byte_text_kept() {
        let mut buffer = LineBuffer::new();
        buffer.extend(b"caf\xe9 cr\xe8me\n");
        let line = buffer.take_line().unwrap();
        assert_eq!(line, "caf\u{e9} cr\u{e8}me\n");

        let bytes: Vec<u8> = line.chars().map(|c| c as u8).collect();
        assert_eq!(bytes, b"caf\xe9 cr\xe8me\n");

        buffer.extend("café\n".as_bytes());
        assert_eq!(buffer.take_line().as_deref(), Some("café\n"));
    }

    #[test]
    fn test_line_over_limit_dropped() {
        let mut buffer = LineBuffer::new();
        buffer.extend(b"0123456789\nok\n");
        assert_eq!(buffer.take_line_within(8), Err(11));
        assert_eq!(buffer.take_line_within(8), Ok(Some("ok\n".to_string())));
    }

    #[test]
    fn test_discard_partial_line() {
        let mut buffer = LineBuffer::new();
        buffer.extend(b"half a li");
        assert_eq!(buffer.take_line(), None);
        assert_eq!(buffer.discard(), 9);
        assert!(buffer.is_empty());

        buffer.extend(b"fresh\n");
        assert_eq!(buffer.take_line().as_deref(), Some("fresh\n"));
    }
}
