//! When parsing EDN data goes wrong.

use std::error;
use std::fmt::{self, Debug, Display};
use std::io;
use std::result;

/// This type represents the possible errors when parsing EDN data.
pub struct Error {
    /// This `Box` allows us to keep the size of `Error` as small as possible. A
    /// larger `Error` type was substantially slower due to all the functions
    /// that pass around `Result<T, Error>`.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `edn::parse::Error`.
pub type Result<T> = result::Result<T, Error>;

/// Position in the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    line: usize,
    column: usize,
}

impl Location {
    pub(crate) fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }

    /// The location before any input has been consumed.
    pub(crate) fn start() -> Self {
        Location::new(1, 0)
    }

    /// The location after consuming `c` at this location.
    pub(crate) fn advance(self, c: char) -> Self {
        if c == '\n' {
            Location::new(self.line + 1, 0)
        } else {
            Location::new(self.line, self.column + 1)
        }
    }

    /// One-based line number.
    ///
    /// Characters in the first line of the input (before the first newline
    /// character) are in line 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// One-based column number, counted in code points.
    ///
    /// The first character in the input and any characters immediately
    /// following a newline character are in column 1.
    ///
    /// Note that errors may occur in column 0, for example if a read from an IO
    /// stream fails immediately following a previously read newline character.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl Error {
    /// Location of the error in the input stream.
    pub fn location(&self) -> Option<Location> {
        self.err.location
    }

    /// Offset of the first byte of the malformed UTF-8 sequence, if this is a
    /// decoding error.
    pub fn byte_offset(&self) -> Option<usize> {
        match self.err.code {
            ErrorCode::InvalidUtf8(offset) => Some(offset),
            _ => None,
        }
    }

    /// Categorizes the cause of this error.
    ///
    /// - `Category::Io` - failure to read bytes from an IO stream
    /// - `Category::Decode` - input that is not well-formed UTF-8
    /// - `Category::Syntax` - input that is not syntactically valid EDN
    /// - `Category::IntegerOverflow` - an integer literal outside the 64-bit range
    pub fn classify(&self) -> Category {
        match self.err.code {
            ErrorCode::Io(_) => Category::Io,
            ErrorCode::InvalidUtf8(_) => Category::Decode,
            ErrorCode::IntegerOverflow => Category::IntegerOverflow,
            ErrorCode::EofWhileParsingList
            | ErrorCode::EofWhileParsingVector
            | ErrorCode::EofWhileParsingMap
            | ErrorCode::EofWhileParsingSet
            | ErrorCode::EofWhileParsingString
            | ErrorCode::EofWhileParsingCharacter
            | ErrorCode::EofWhileParsingValue
            | ErrorCode::ExpectedSomeValue
            | ErrorCode::UnexpectedDelimiter
            | ErrorCode::MismatchedDelimiter
            | ErrorCode::OddMapLength
            | ErrorCode::InvalidEscape
            | ErrorCode::InvalidCharacter
            | ErrorCode::InvalidNumber
            | ErrorCode::InvalidSymbol
            | ErrorCode::InvalidKeyword
            | ErrorCode::InvalidTag
            | ErrorCode::InvalidDispatch
            | ErrorCode::InvalidSymbolicValue
            | ErrorCode::NumberOutOfRange
            | ErrorCode::UnsupportedRatio
            | ErrorCode::ZeroDenominator
            | ErrorCode::UnsupportedPrecision
            | ErrorCode::TrailingCharacters
            | ErrorCode::RecursionLimitExceeded => Category::Syntax,
        }
    }

    /// Returns true if this error was caused by a failure to read bytes on an
    /// IO stream.
    pub fn is_io(&self) -> bool {
        self.classify() == Category::Io
    }

    /// Returns true if this error was caused by input that is not well-formed
    /// UTF-8.
    pub fn is_decode(&self) -> bool {
        self.classify() == Category::Decode
    }

    /// Returns true if this error was caused by input that was not
    /// syntactically valid EDN.
    pub fn is_syntax(&self) -> bool {
        self.classify() == Category::Syntax
    }

    /// Returns true if this error was caused by an integer literal that does
    /// not fit into 64 bits.
    pub fn is_integer_overflow(&self) -> bool {
        self.classify() == Category::IntegerOverflow
    }

    /// Returns true if this syntax error was caused by prematurely reaching
    /// the end of the input data, e.g. inside a string or a collection.
    ///
    /// Callers that process streaming input may be interested in retrying the
    /// parse once more data is available.
    pub fn is_eof(&self) -> bool {
        matches!(
            self.err.code,
            ErrorCode::EofWhileParsingList
                | ErrorCode::EofWhileParsingVector
                | ErrorCode::EofWhileParsingMap
                | ErrorCode::EofWhileParsingSet
                | ErrorCode::EofWhileParsingString
                | ErrorCode::EofWhileParsingCharacter
                | ErrorCode::EofWhileParsingValue
        )
    }
}

/// Categorizes the cause of a `edn::parse::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// The error was caused by a failure to read bytes from an input source.
    Io,

    /// The error was caused by a byte sequence that is not well-formed UTF-8.
    Decode,

    /// The error was caused by input that was not syntactically valid EDN.
    ///
    /// This includes prematurely reaching the end of input inside a literal;
    /// use [`Error::is_eof`] to tell these apart.
    Syntax,

    /// The error was caused by an integer literal whose value is outside the
    /// range of `i64`.
    IntegerOverflow,
}

impl From<Error> for io::Error {
    /// Convert a `edn::parse::Error` into an `io::Error`.
    ///
    /// Decoding and syntax errors are turned into `InvalidData` IO errors,
    /// except for premature end of input, which is turned into an
    /// `UnexpectedEof` IO error.
    ///
    /// ```
    /// use std::io;
    ///
    /// enum MyError {
    ///     Io(io::Error),
    ///     Parse(edn::parse::Error),
    /// }
    ///
    /// impl From<edn::parse::Error> for MyError {
    ///     fn from(err: edn::parse::Error) -> MyError {
    ///         use edn::parse::error::Category;
    ///         match err.classify() {
    ///             Category::Io => MyError::Io(err.into()),
    ///             Category::Decode | Category::Syntax | Category::IntegerOverflow => {
    ///                 MyError::Parse(err)
    ///             }
    ///         }
    ///     }
    /// }
    /// ```
    fn from(e: Error) -> Self {
        if let ErrorCode::Io(err) = e.err.code {
            err
        } else if e.is_eof() {
            io::Error::new(io::ErrorKind::UnexpectedEof, e)
        } else {
            io::Error::new(io::ErrorKind::InvalidData, e)
        }
    }
}

impl Error {
    pub(crate) fn syntax(code: ErrorCode, location: Location) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code,
                location: Some(location),
            }),
        }
    }

    pub(crate) fn decode(offset: usize) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code: ErrorCode::InvalidUtf8(offset),
                location: None,
            }),
        }
    }

    pub(crate) fn io(error: io::Error) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code: ErrorCode::Io(error),
                location: None,
            }),
        }
    }

    /// Fills in the location unless it is already known.
    pub(crate) fn at(mut self, location: Location) -> Self {
        if self.err.location.is_none() && !self.is_io() {
            self.err.location = Some(location);
        }
        self
    }
}

struct ErrorImpl {
    code: ErrorCode,
    location: Option<Location>,
}

pub(crate) enum ErrorCode {
    /// Some IO error occurred while reading the input.
    Io(io::Error),

    /// Malformed UTF-8 starting at the given byte offset.
    InvalidUtf8(usize),

    /// EOF while parsing a list.
    EofWhileParsingList,

    /// EOF while parsing a vector.
    EofWhileParsingVector,

    /// EOF while parsing a map.
    EofWhileParsingMap,

    /// EOF while parsing a set.
    EofWhileParsingSet,

    /// EOF while parsing a string.
    EofWhileParsingString,

    /// EOF while parsing a character literal.
    EofWhileParsingCharacter,

    /// EOF where a value was required.
    EofWhileParsingValue,

    /// No literal syntax starts with the input.
    ExpectedSomeValue,

    /// A closing delimiter without an open collection.
    UnexpectedDelimiter,

    /// A collection closed with the wrong kind of delimiter.
    MismatchedDelimiter,

    /// A map literal with a key that has no value.
    OddMapLength,

    /// Unknown escape sequence in a string.
    InvalidEscape,

    /// Invalid character literal.
    InvalidCharacter,

    /// Invalid number.
    InvalidNumber,

    /// Invalid symbol.
    InvalidSymbol,

    /// Invalid keyword.
    InvalidKeyword,

    /// Invalid tag of a tagged literal.
    InvalidTag,

    /// `#` followed by a character that starts no dispatch form.
    InvalidDispatch,

    /// `##` followed by something other than `Inf`, `-Inf` or `NaN`.
    InvalidSymbolicValue,

    /// Floating point literal too large for `f64`.
    NumberOutOfRange,

    /// Integer literal too large for `i64`.
    IntegerOverflow,

    /// Ratio literal while ratios are rejected.
    UnsupportedRatio,

    /// Ratio literal with a zero denominator.
    ZeroDenominator,

    /// `N` or `M` suffix while these are rejected.
    UnsupportedPrecision,

    /// Input has non-whitespace trailing characters after the value.
    TrailingCharacters,

    /// Encountered nesting deeper than the configured recursion limit.
    RecursionLimitExceeded,
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ErrorCode::Io(ref err) => Display::fmt(err, f),
            ErrorCode::InvalidUtf8(offset) => {
                write!(f, "invalid UTF-8 sequence at byte offset {}", offset)
            }
            ErrorCode::EofWhileParsingList => f.write_str("EOF while parsing a list"),
            ErrorCode::EofWhileParsingVector => f.write_str("EOF while parsing a vector"),
            ErrorCode::EofWhileParsingMap => f.write_str("EOF while parsing a map"),
            ErrorCode::EofWhileParsingSet => f.write_str("EOF while parsing a set"),
            ErrorCode::EofWhileParsingString => f.write_str("EOF while parsing a string"),
            ErrorCode::EofWhileParsingCharacter => {
                f.write_str("EOF while parsing a character literal")
            }
            ErrorCode::EofWhileParsingValue => f.write_str("EOF while parsing a value"),
            ErrorCode::ExpectedSomeValue => f.write_str("unable to recognize EDN"),
            ErrorCode::UnexpectedDelimiter => f.write_str("unexpected closing delimiter"),
            ErrorCode::MismatchedDelimiter => f.write_str("mismatched closing delimiter"),
            ErrorCode::OddMapLength => {
                f.write_str("map literal must contain an even number of forms")
            }
            ErrorCode::InvalidEscape => f.write_str("invalid escape"),
            ErrorCode::InvalidCharacter => f.write_str("invalid character literal"),
            ErrorCode::InvalidNumber => f.write_str("invalid number"),
            ErrorCode::InvalidSymbol => f.write_str("invalid symbol"),
            ErrorCode::InvalidKeyword => f.write_str("invalid keyword"),
            ErrorCode::InvalidTag => f.write_str("invalid tag"),
            ErrorCode::InvalidDispatch => f.write_str("invalid dispatch character"),
            ErrorCode::InvalidSymbolicValue => f.write_str("invalid symbolic value"),
            ErrorCode::NumberOutOfRange => f.write_str("number out of range"),
            ErrorCode::IntegerOverflow => f.write_str("integer overflow"),
            ErrorCode::UnsupportedRatio => f.write_str("unsupported ratio"),
            ErrorCode::ZeroDenominator => f.write_str("ratio with zero denominator"),
            ErrorCode::UnsupportedPrecision => {
                f.write_str("unsupported arbitrary precision number")
            }
            ErrorCode::TrailingCharacters => f.write_str("trailing characters"),
            ErrorCode::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.err.code {
            ErrorCode::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&*self.err, f)
    }
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = self.location {
            write!(
                f,
                "{} at line {} column {}",
                self.code, loc.line, loc.column
            )
        } else {
            Display::fmt(&self.code, f)
        }
    }
}

// Remove two layers of verbosity from the debug representation. Humans often
// end up seeing this representation because it is what unwrap() shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = self.err.location {
            write!(
                f,
                "Error({:?}, line: {}, column: {})",
                self.err.code.to_string(),
                loc.line,
                loc.column,
            )
        } else {
            write!(f, "Error({:?})", self.err.code.to_string())
        }
    }
}
