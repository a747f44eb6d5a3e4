//! UTF-8 decoding and encoding.
//!
//! [`Decoder`] is the byte-at-a-time state machine used by the parser to turn
//! a byte stream into code points; it is a transcription of Björn Höhrmann's
//! DFA-based decoder (see <http://bjoern.hoehrmann.de/utf-8/decoder/dfa/>).
//!
//! The [`encode`] and [`decode`] functions convert whole in-memory sequences;
//! they are provided for callers that already hold their text in memory and
//! are not used by the parser itself.
//!
//! ```
//! use edn::utf8;
//!
//! let chars: Vec<char> = "λx".chars().collect();
//! let bytes = utf8::encode(&chars);
//! assert_eq!(bytes, "λx".as_bytes());
//! assert_eq!(utf8::decode(&bytes).unwrap(), chars);
//! assert!(utf8::decode(b"\xC0\xAF").is_err());
//! ```

use std::error;
use std::fmt::{self, Display};

const ACCEPT: u8 = 0;
const REJECT: u8 = 12;

// Maps bytes to character classes, which keeps the transition table small.
#[rustfmt::skip]
static CLASSES: [u8; 256] = [
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1, 9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,
    7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7, 7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,
    8,8,2,2,2,2,2,2,2,2,2,2,2,2,2,2, 2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,
    10,3,3,3,3,3,3,3,3,3,3,3,3,4,3,3, 11,6,6,6,5,8,8,8,8,8,8,8,8,8,8,8,
];

// Maps a combination of a state and a character class to the next state.
// States are multiples of 12 so that `state + class` indexes this table.
#[rustfmt::skip]
static TRANSITIONS: [u8; 108] = [
    0,12,24,36,60,96,84,12,12,12,48,72, 12,12,12,12,12,12,12,12,12,12,12,12,
    12, 0,12,12,12,12,12, 0,12, 0,12,12, 12,24,12,12,12,12,12,24,12,24,12,12,
    12,12,12,12,12,12,12,24,12,12,12,12, 12,24,12,12,12,12,12,12,12,24,12,12,
    12,12,12,12,12,12,12,36,12,36,12,12, 12,36,12,12,12,12,12,36,12,36,12,12,
    12,36,12,12,12,12,12,12,12,12,12,12,
];

/// Result of feeding one byte to a [`Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The byte completed a code point.
    Char(char),
    /// More bytes are needed to complete the current code point.
    Incomplete,
    /// The byte cannot continue a well-formed UTF-8 sequence. The decoder
    /// has been reset.
    Invalid,
}

/// Incremental UTF-8 decoder.
///
/// Overlong encodings, surrogate code points and code points beyond
/// `U+10FFFF` are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    state: u8,
    codepoint: u32,
}

impl Decoder {
    /// Creates a decoder positioned at a code point boundary.
    pub fn new() -> Self {
        Decoder {
            state: ACCEPT,
            codepoint: 0,
        }
    }

    /// Feeds the next byte of input.
    #[inline]
    pub fn push(&mut self, byte: u8) -> Step {
        let class = CLASSES[byte as usize];
        self.codepoint = if self.state == ACCEPT {
            (0xff >> class) & u32::from(byte)
        } else {
            u32::from(byte & 0x3f) | (self.codepoint << 6)
        };
        self.state = TRANSITIONS[(self.state + class) as usize];
        match self.state {
            ACCEPT => char::from_u32(self.codepoint).map_or(Step::Invalid, Step::Char),
            REJECT => {
                self.reset();
                Step::Invalid
            }
            _ => Step::Incomplete,
        }
    }

    /// Returns true if the decoder is in the middle of a multi-byte sequence.
    pub fn is_pending(&self) -> bool {
        self.state != ACCEPT
    }

    /// Discards any partially decoded sequence.
    pub fn reset(&mut self) {
        self.state = ACCEPT;
        self.codepoint = 0;
    }
}

/// Input that is not well-formed UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    offset: usize,
}

impl DecodeError {
    pub(crate) fn new(offset: usize) -> Self {
        DecodeError { offset }
    }

    /// Offset of the first byte of the malformed sequence.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid UTF-8 sequence at byte offset {}", self.offset)
    }
}

impl error::Error for DecodeError {}

/// Encodes a sequence of code points as UTF-8.
pub fn encode(chars: &[char]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(chars.len());
    let mut buf = [0; 4];
    for c in chars {
        bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }
    bytes
}

/// Decodes a complete UTF-8 byte sequence into code points.
///
/// Fails on the first malformed sequence, including one that is cut short by
/// the end of the input.
pub fn decode(bytes: &[u8]) -> Result<Vec<char>, DecodeError> {
    let mut decoder = Decoder::new();
    let mut chars = Vec::with_capacity(bytes.len());
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if !decoder.is_pending() {
            start = i;
        }
        match decoder.push(byte) {
            Step::Char(c) => chars.push(c),
            Step::Incomplete => {}
            Step::Invalid => return Err(DecodeError::new(start)),
        }
    }
    if decoder.is_pending() {
        return Err(DecodeError::new(start));
    }
    Ok(chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_one(bytes: &[u8]) -> Option<char> {
        match decode(bytes) {
            Ok(chars) if chars.len() == 1 => Some(chars[0]),
            _ => None,
        }
    }

    #[test]
    fn test_seven_bit() {
        let bytes: Vec<u8> = (0..128).collect();
        let chars = decode(&bytes).unwrap();
        assert_eq!(chars.len(), 128);
        for (i, c) in chars.into_iter().enumerate() {
            assert_eq!(u32::from(c), i as u32);
        }
    }

    #[test]
    fn test_wikipedia_samples() {
        for &(codepoint, bytes) in &[
            (0x0024, b"\x24" as &[u8]),
            (0x00a2, b"\xc2\xa2"),
            (0x0939, b"\xe0\xa4\xb9"),
            (0x20ac, b"\xe2\x82\xac"),
            (0xd55c, b"\xed\x95\x9c"),
            (0x10348, b"\xf0\x90\x8d\x88"),
        ] {
            assert_eq!(decode_one(bytes), char::from_u32(codepoint));
        }
    }

    #[test]
    fn test_malformed() {
        // Lone continuation byte
        assert_eq!(decode(b"a\x80").unwrap_err().offset(), 1);
        // Overlong encoding of '/'
        assert_eq!(decode(b"\xc0\xaf").unwrap_err().offset(), 0);
        // UTF-16 surrogate half
        assert_eq!(decode(b"ab\xed\xa0\x80").unwrap_err().offset(), 2);
        // Beyond U+10FFFF
        assert!(decode(b"\xf4\x90\x80\x80").is_err());
        // Truncated sequence
        assert_eq!(decode(b"xy\xe2\x82").unwrap_err().offset(), 2);
        assert!(decode(b"\xff").is_err());
    }

    #[test]
    fn test_decoder_recovers_after_reset() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.push(0xe2), Step::Incomplete);
        assert!(decoder.is_pending());
        assert_eq!(decoder.push(b'x'), Step::Invalid);
        assert!(!decoder.is_pending());
        assert_eq!(decoder.push(b'x'), Step::Char('x'));
    }

    #[test]
    fn test_encode_matches_std() {
        let text = "plain, ümlaut, \u{20ac}, \u{10348}";
        let chars: Vec<char> = text.chars().collect();
        assert_eq!(encode(&chars), text.as_bytes());
        assert_eq!(decode(text.as_bytes()).unwrap(), chars);
    }
}
