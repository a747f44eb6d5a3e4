use std::collections::VecDeque;

use tracing::debug;

use super::error::{Location, Result};
use super::read::Read;

// Number of consumed code points whose preceding location is remembered, so
// that pushing them back can restore `location()`.
const TRAIL_LEN: usize = 256;

/// A code point reader with lookahead and unbounded pushback.
///
/// Code points are taken from the pushback buffer first, in LIFO order, and
/// decoded from the underlying source once the buffer is empty. Pushing back
/// a sequence with [`unget_all`] and reading it again reproduces it in its
/// original order.
///
/// ```
/// use edn::parse::{CharReader, StrRead};
///
/// let mut chars = CharReader::new(StrRead::new("nil!"));
/// let word = chars.take_while(char::is_alphabetic).unwrap();
/// assert_eq!(word, "nil");
/// assert_eq!(chars.peek().unwrap(), Some('!'));
///
/// let word: Vec<char> = word.chars().collect();
/// chars.unget_all(&word);
/// assert_eq!(chars.take_until(|c| c == '!').unwrap(), "nil");
/// ```
///
/// [`unget_all`]: CharReader::unget_all
pub struct CharReader<R> {
    read: R,
    /// Pushed back code points, each with the location to restore when it is
    /// consumed again.
    pushback: Vec<(char, Location)>,
    /// Locations preceding the most recently consumed code points.
    trail: VecDeque<Location>,
    location: Location,
}

impl<R: Read> CharReader<R> {
    /// Creates a reader decoding code points from `read`.
    pub fn new(read: R) -> Self {
        CharReader {
            read,
            pushback: Vec::new(),
            trail: VecDeque::with_capacity(TRAIL_LEN),
            location: Location::start(),
        }
    }

    /// Consumes the next code point, or returns `None` at the end of input.
    ///
    /// The end of input is not an error; the reader keeps returning `None`
    /// until code points are pushed back.
    pub fn next(&mut self) -> Result<Option<char>> {
        if let Some((c, location)) = self.pushback.pop() {
            self.remember();
            self.location = location;
            return Ok(Some(c));
        }
        match self.read.next_char() {
            Ok(Some(c)) => {
                self.remember();
                self.location = self.location.advance(c);
                Ok(Some(c))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                if err.is_decode() {
                    debug!(
                        byte_offset = self.read.byte_offset(),
                        line = self.location.line(),
                        column = self.location.column(),
                        "malformed UTF-8 input"
                    );
                }
                Err(err.at(self.location))
            }
        }
    }

    /// Returns the next code point without consuming it.
    pub fn peek(&mut self) -> Result<Option<char>> {
        let next = self.next()?;
        if let Some(c) = next {
            self.unget(c);
        }
        Ok(next)
    }

    /// Pushes back a single code point; it is the next one to be consumed.
    pub fn unget(&mut self, c: char) {
        self.pushback.push((c, self.location));
        if let Some(previous) = self.trail.pop_back() {
            self.location = previous;
        }
    }

    /// Pushes back a sequence of code points, to be consumed again in the
    /// order they appear in `chars`.
    pub fn unget_all(&mut self, chars: &[char]) {
        for &c in chars.iter().rev() {
            self.unget(c);
        }
    }

    /// Pushes back the code points of a string, to be consumed again in
    /// order.
    pub fn unget_str(&mut self, s: &str) {
        for c in s.chars().rev() {
            self.unget(c);
        }
    }

    /// Consumes code points as long as `pred` holds for them.
    ///
    /// The first code point failing `pred` is left to be consumed next.
    pub fn take_while<P>(&mut self, mut pred: P) -> Result<String>
    where
        P: FnMut(char) -> bool,
    {
        let mut taken = String::new();
        while let Some(c) = self.next()? {
            if !pred(c) {
                self.unget(c);
                break;
            }
            taken.push(c);
        }
        Ok(taken)
    }

    /// Consumes code points until `pred` holds for one of them.
    ///
    /// The code point satisfying `pred` is left to be consumed next.
    pub fn take_until<P>(&mut self, mut pred: P) -> Result<String>
    where
        P: FnMut(char) -> bool,
    {
        self.take_while(|c| !pred(c))
    }

    /// Like `take_while`, but without collecting the consumed code points.
    pub fn skip_while<P>(&mut self, mut pred: P) -> Result<()>
    where
        P: FnMut(char) -> bool,
    {
        while let Some(c) = self.next()? {
            if !pred(c) {
                self.unget(c);
                break;
            }
        }
        Ok(())
    }

    /// Location of the most recently consumed code point.
    ///
    /// Peeking does not move the location, and pushing back a consumed code
    /// point restores the location from before it was consumed, as long as
    /// it is among the last few hundred code points.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Number of bytes consumed from the underlying source so far.
    ///
    /// Pushed back code points do not give back their bytes.
    pub fn byte_offset(&self) -> usize {
        self.read.byte_offset()
    }

    /// Unwraps the underlying input source, dropping any pushed back code
    /// points.
    pub fn into_inner(self) -> R {
        self.read
    }

    fn remember(&mut self) {
        if self.trail.len() == TRAIL_LEN {
            self.trail.pop_front();
        }
        self.trail.push_back(self.location);
    }
}
