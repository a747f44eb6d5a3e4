//! When serializing or deserializing EDN goes wrong.

use std::fmt::{self, Debug, Display};
use std::{error, io, result};

use serde::{de, ser};

use edn::parse;
pub use edn::parse::error::Location;

/// This type represents all possible errors that can occur when
/// serializing or deserializing EDN data.
pub struct Error(Box<ErrorImpl>);

/// Alias for a `Result` with the error type `serde_edn::Error`.
pub type Result<T> = result::Result<T, Error>;

enum ErrorImpl {
    Message(String, Option<Location>),
    Io(io::Error),
    Parse(parse::Error),
}

impl Error {
    /// Location of the error in the input stream.
    pub fn location(&self) -> Option<Location> {
        match &*self.0 {
            ErrorImpl::Message(_, loc) => *loc,
            ErrorImpl::Parse(e) => e.location(),
            ErrorImpl::Io(_) => None,
        }
    }

    /// Categorizes the cause of this error.
    ///
    /// - `Category::Io` - failure to read or write bytes on an IO stream
    /// - `Category::Decode` - input that is not valid UTF-8
    /// - `Category::Syntax` - input that is not syntactically valid EDN
    /// - `Category::IntegerOverflow` - an integer literal outside the 64-bit range
    /// - `Category::Data` - input data that is semantically incorrect
    pub fn classify(&self) -> Category {
        match &*self.0 {
            ErrorImpl::Message(_, _) => Category::Data,
            ErrorImpl::Io(_) => Category::Io,
            ErrorImpl::Parse(e) => match e.classify() {
                parse::error::Category::Io => Category::Io,
                parse::error::Category::Decode => Category::Decode,
                parse::error::Category::Syntax => Category::Syntax,
                parse::error::Category::IntegerOverflow => Category::IntegerOverflow,
            },
        }
    }

    /// Returns true if the input ended in the middle of a value.
    ///
    /// Callers that process streaming input may be interested in retrying the
    /// deserialization once more data is available.
    pub fn is_eof(&self) -> bool {
        match &*self.0 {
            ErrorImpl::Parse(e) => e.is_eof(),
            _ => false,
        }
    }
}

/// Categorizes the cause of a `serde_edn::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// The error was caused by a failure to read or write bytes on an IO
    /// stream.
    Io,

    /// The error was caused by input that is not well-formed UTF-8.
    Decode,

    /// The error was caused by input that was not syntactically valid EDN.
    Syntax,

    /// The error was caused by an integer literal that does not fit into 64
    /// bits.
    IntegerOverflow,

    /// The error was caused by input data that was semantically incorrect.
    ///
    /// For example, EDN text representing a number is semantically incorrect
    /// when the type being deserialized into holds a String.
    Data,
}

impl From<Error> for io::Error {
    /// Convert a `serde_edn::Error` into an `io::Error`.
    ///
    /// EDN syntax and data errors are turned into `InvalidData` IO errors.
    /// Premature end of input is turned into an `UnexpectedEof` IO error.
    ///
    /// ```
    /// use std::io;
    ///
    /// enum MyError {
    ///     Io(io::Error),
    ///     Edn(serde_edn::Error),
    /// }
    ///
    /// impl From<serde_edn::Error> for MyError {
    ///     fn from(err: serde_edn::Error) -> MyError {
    ///         use serde_edn::error::Category;
    ///         match err.classify() {
    ///             Category::Io => {
    ///                 MyError::Io(err.into())
    ///             }
    ///             Category::Decode
    ///             | Category::Syntax
    ///             | Category::IntegerOverflow
    ///             | Category::Data => MyError::Edn(err),
    ///         }
    ///     }
    /// }
    /// ```
    fn from(e: Error) -> Self {
        match *e.0 {
            ErrorImpl::Io(err) => err,
            ErrorImpl::Parse(err) => err.into(),
            ErrorImpl::Message(..) => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &*self.0 {
            ErrorImpl::Io(e) => Some(e),
            ErrorImpl::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            ErrorImpl::Message(msg, _) => Display::fmt(msg, f),
            ErrorImpl::Io(e) => Display::fmt(e, f),
            ErrorImpl::Parse(e) => Display::fmt(e, f),
        }
    }
}

impl Debug for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            ErrorImpl::Message(msg, loc) => formatter
                .debug_tuple("Message")
                .field(msg)
                .field(loc)
                .finish(),
            ErrorImpl::Io(e) => formatter.debug_tuple("Io").field(e).finish(),
            ErrorImpl::Parse(e) => formatter.debug_tuple("Parse").field(e).finish(),
        }
    }
}

impl de::Error for Error {
    fn custom<T: Display>(msg: T) -> Error {
        Error(Box::new(ErrorImpl::Message(msg.to_string(), None)))
    }

    fn invalid_type(unexp: de::Unexpected<'_>, exp: &dyn de::Expected) -> Self {
        if let de::Unexpected::Unit = unexp {
            Error::custom(format_args!("invalid type: nil, expected {}", exp))
        } else {
            Error::custom(format_args!("invalid type: {}, expected {}", unexp, exp))
        }
    }
}

impl ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Error {
        Error(Box::new(ErrorImpl::Message(msg.to_string(), None)))
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error(Box::new(ErrorImpl::Io(e)))
    }
}

impl From<parse::Error> for Error {
    fn from(e: parse::Error) -> Self {
        Error(Box::new(ErrorImpl::Parse(e)))
    }
}
