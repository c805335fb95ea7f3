//! Inbound line framing
//!
//! Splits the client byte stream on `\n`. Lines are relayed verbatim, so
//! bytes that are not valid UTF-8 are replaced rather than rejected. A line
//! longer than the limit is a read error and ends the session.

use std::io;

use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// Longest accepted line in bytes, excluding the terminator
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Newline-delimited decoder yielding lossily decoded `String`s
#[derive(Debug, Clone)]
pub struct ChatLineCodec {
    max_length: usize,
    /// Bytes already scanned for `\n`
    next_index: usize,
}

impl ChatLineCodec {
    /// Codec with the default `MAX_LINE_LENGTH` limit
    pub fn new() -> Self {
        Self::with_max_length(MAX_LINE_LENGTH)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
        }
    }
}

impl Default for ChatLineCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip a trailing `\r` and decode, replacing invalid UTF-8
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

impl Decoder for ChatLineCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, io::Error> {
        let read_to = buf.len().min(self.max_length + 1);

        if let Some(offset) = buf[self.next_index..read_to].iter().position(|b| *b == b'\n') {
            let newline = self.next_index + offset;
            self.next_index = 0;
            let line = buf.split_to(newline + 1);
            return Ok(Some(decode_line(&line[..newline])));
        }

        if buf.len() > self.max_length {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line exceeds {} bytes", self.max_length),
            ));
        }

        self.next_index = read_to;
        Ok(None)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, io::Error> {
        if let Some(line) = self.decode(buf)? {
            return Ok(Some(line));
        }
        if buf.is_empty() {
            return Ok(None);
        }

        // Unterminated final line
        self.next_index = 0;
        let line = buf.split_to(buf.len());
        Ok(Some(decode_line(&line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_lines_and_strips_cr() {
        let mut codec = ChatLineCodec::new();
        let mut buf = BytesMut::from(&b"hello\r\nworld\npart"[..]);

        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("hello"));
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("world"));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"ial\n");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("partial"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut codec = ChatLineCodec::new();
        let mut buf = BytesMut::from(&b"caf\xe9\n"[..]);

        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("caf\u{FFFD}"));
    }

    #[test]
    fn test_empty_line() {
        let mut codec = ChatLineCodec::new();
        let mut buf = BytesMut::from(&b"\n"[..]);

        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_line_at_limit_is_accepted() {
        let mut codec = ChatLineCodec::with_max_length(4);
        let mut buf = BytesMut::from(&b"abcd\n"[..]);

        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("abcd"));
    }

    #[test]
    fn test_overlong_line_is_an_error() {
        let mut codec = ChatLineCodec::with_max_length(4);
        let mut buf = BytesMut::from(&b"abc"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"de");
        let err = codec.decode(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_unterminated_line_at_eof() {
        let mut codec = ChatLineCodec::new();
        let mut buf = BytesMut::from(&b"bye"[..]);

        assert_eq!(codec.decode_eof(&mut buf).unwrap().as_deref(), Some("bye"));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }
}
