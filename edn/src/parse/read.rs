use std::io;

use super::error::{Error, Result};
use crate::utf8::{Decoder, Step};

/// Trait used by the parser for obtaining code points from an input source.
///
/// Byte-oriented sources run their input through the incremental UTF-8
/// [`Decoder`]; `StrRead` skips decoding as its input is known to be valid.
///
/// This trait is sealed and cannot be implemented for types outside of
/// `edn`.
pub trait Read: private::Sealed {
    /// Decodes the next code point; `None` at the end of input.
    ///
    /// Decoding errors are returned without a location, the caller knows
    /// better.
    #[doc(hidden)]
    fn next_char(&mut self) -> Result<Option<char>>;

    /// Number of bytes consumed from the underlying source.
    #[doc(hidden)]
    fn byte_offset(&self) -> usize;
}

/// EDN input source that reads from a std::io input stream.
pub struct IoRead<R>
where
    R: io::Read,
{
    bytes: io::Bytes<R>,
    decoder: Decoder,
    offset: usize,
}

/// EDN input source that reads from a slice of bytes.
pub struct SliceRead<'a> {
    slice: &'a [u8],
    /// Index of the *next* byte that will be decoded.
    index: usize,
    decoder: Decoder,
}

/// EDN input source that reads from a UTF-8 string.
pub struct StrRead<'a> {
    input: &'a str,
    index: usize,
}

// Prevent users from implementing the Read trait.
mod private {
    pub trait Sealed {}
}

/// Drives `decoder` with bytes from `next_byte` until a code point is
/// complete. `offset` tracks the number of bytes consumed.
#[inline]
fn decode_char<F>(
    decoder: &mut Decoder,
    offset: &mut usize,
    mut next_byte: F,
) -> Result<Option<char>>
where
    F: FnMut() -> Result<Option<u8>>,
{
    let start = *offset;
    loop {
        match next_byte()? {
            Some(byte) => {
                *offset += 1;
                match decoder.push(byte) {
                    Step::Char(c) => return Ok(Some(c)),
                    Step::Incomplete => {}
                    Step::Invalid => return Err(Error::decode(start)),
                }
            }
            None if decoder.is_pending() => {
                decoder.reset();
                return Err(Error::decode(start));
            }
            None => return Ok(None),
        }
    }
}

//////////////////////////////////////////////////////////////////////////////

impl<R> IoRead<R>
where
    R: io::Read,
{
    /// Create an EDN input source to read from a std::io input stream.
    pub fn new(reader: R) -> Self {
        IoRead {
            bytes: reader.bytes(),
            decoder: Decoder::new(),
            offset: 0,
        }
    }
}

impl<R> private::Sealed for IoRead<R> where R: io::Read {}

impl<R> Read for IoRead<R>
where
    R: io::Read,
{
    fn next_char(&mut self) -> Result<Option<char>> {
        let bytes = &mut self.bytes;
        decode_char(&mut self.decoder, &mut self.offset, || match bytes.next() {
            Some(Ok(byte)) => Ok(Some(byte)),
            Some(Err(err)) => Err(Error::io(err)),
            None => Ok(None),
        })
    }

    fn byte_offset(&self) -> usize {
        self.offset
    }
}

//////////////////////////////////////////////////////////////////////////////

impl<'a> SliceRead<'a> {
    /// Create an EDN input source to read from a slice of bytes.
    pub fn new(slice: &'a [u8]) -> Self {
        SliceRead {
            slice,
            index: 0,
            decoder: Decoder::new(),
        }
    }
}

impl<'a> private::Sealed for SliceRead<'a> {}

impl<'a> Read for SliceRead<'a> {
    #[inline]
    fn next_char(&mut self) -> Result<Option<char>> {
        // ASCII does not need the state machine.
        if let Some(&byte) = self.slice.get(self.index) {
            if byte.is_ascii() && !self.decoder.is_pending() {
                self.index += 1;
                return Ok(Some(char::from(byte)));
            }
        }
        let slice = self.slice;
        let mut next = self.index;
        decode_char(&mut self.decoder, &mut self.index, || {
            let byte = slice.get(next).copied();
            next += 1;
            Ok(byte)
        })
    }

    fn byte_offset(&self) -> usize {
        self.index
    }
}

//////////////////////////////////////////////////////////////////////////////

impl<'a> StrRead<'a> {
    /// Create an EDN input source to read from a UTF-8 string.
    pub fn new(s: &'a str) -> Self {
        StrRead { input: s, index: 0 }
    }
}

impl<'a> private::Sealed for StrRead<'a> {}

impl<'a> Read for StrRead<'a> {
    #[inline]
    fn next_char(&mut self) -> Result<Option<char>> {
        Ok(self.input[self.index..].chars().next().map(|c| {
            self.index += c.len_utf8();
            c
        }))
    }

    fn byte_offset(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<R: Read>(mut read: R) -> Result<String> {
        let mut s = String::new();
        while let Some(c) = read.next_char()? {
            s.push(c);
        }
        Ok(s)
    }

    #[test]
    fn test_sources_agree() {
        let text = "(:a \"ü\" \u{1f600})";
        assert_eq!(drain(StrRead::new(text)).unwrap(), text);
        assert_eq!(drain(SliceRead::new(text.as_bytes())).unwrap(), text);
        assert_eq!(drain(IoRead::new(text.as_bytes())).unwrap(), text);
    }

    #[test]
    fn test_byte_offset() {
        let mut read = SliceRead::new("aé".as_bytes());
        assert_eq!(read.next_char().unwrap(), Some('a'));
        assert_eq!(read.byte_offset(), 1);
        assert_eq!(read.next_char().unwrap(), Some('é'));
        assert_eq!(read.byte_offset(), 3);
        assert_eq!(read.next_char().unwrap(), None);
        assert_eq!(read.byte_offset(), 3);
    }

    #[test]
    fn test_malformed_input() {
        let err = drain(SliceRead::new(b"ab\xff")).unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.byte_offset(), Some(2));

        let err = drain(IoRead::new(&b"abc\xe2\x82"[..])).unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.byte_offset(), Some(3));
    }
}
