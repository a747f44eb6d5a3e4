//! EDN parser and options.
//!
//! # Terminology
//!
//! The process of converting EDN text into values is referred to as
//! "reading" in Clojure. To avoid confusion with Rust's `Read` trait, `edn`
//! uses "parsing" instead.
//!
//! # Grammar notes
//!
//! - Whitespace is space, tab, carriage return, newline and the comma. A `;`
//!   starts a comment extending to the end of the line.
//! - Bare tokens (`nil`, `true`, `false`, numbers and symbols) end at
//!   whitespace, a bracket, `"`, `;` or the end of input. `niladic` is a
//!   symbol, not `nil` followed by garbage.
//! - Numbers are tried before symbols. A token starting with a digit, or
//!   with a sign followed by a digit, must be a valid number.
//! - Characters are written `\c` or `'c`, with the names `newline`,
//!   `return`, `space`, `tab`, `backspace`, `formfeed` and `uXXXX`.
//! - `#{...}` is a set, `#_` discards the following value, `##Inf`,
//!   `##-Inf` and `##NaN` are symbolic floats, and `#tag value` is a tagged
//!   literal.
//! - Maps with duplicate keys keep the last value; sets with duplicate
//!   elements keep the first.

use std::io;

use tracing::trace;

use crate::value::{Map, Name, Set, Tagged};
use crate::Value;

use error::{ErrorCode, Location};

pub use chars::CharReader;
pub use read::{IoRead, Read, SliceRead, StrRead};

#[doc(inline)]
pub use error::{Error, Result};

/// Parser for the EDN text representation.
///
/// This type, given an input source, provides the [`parse`] method,
/// which can be used to read successive top-level values from the input
/// source until it is exhausted.
///
/// [`parse`]: struct.Parser.html#method.parse
pub struct Parser<R> {
    chars: CharReader<R>,
    scratch: String,
    remaining_depth: u8,
    options: Options,
}

/// Various options to influence parser behavior.
#[derive(Debug, Clone)]
pub struct Options {
    ratios: Ratios,
    precision_suffixes: PrecisionSuffixes,
    recursion_limit: u8,
}

/// Defines the treatment of ratio literals like `22/7`.
///
/// [`Value`] has no rational variant, so ratios either have to be rejected
/// or approximated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ratios {
    /// Ratio literals are a syntax error.
    Reject,

    /// Ratio literals are converted to the nearest floating point value.
    Float,
}

/// Defines the treatment of the arbitrary precision suffixes `N` (on
/// integers) and `M` (on decimals).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrecisionSuffixes {
    /// Numbers with a suffix are a syntax error.
    Reject,

    /// The suffix is ignored: `42N` is read as a 64-bit integer, failing if it
    /// does not fit, and `1.5M` is read as a float.
    Lossy,
}

impl Options {
    /// Construct the default set of options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how to parse ratio literals.
    pub fn with_ratios(mut self, treatment: Ratios) -> Self {
        self.ratios = treatment;
        self
    }

    /// Choose how to parse numbers with arbitrary precision suffixes.
    pub fn with_precision_suffixes(mut self, treatment: PrecisionSuffixes) -> Self {
        self.precision_suffixes = treatment;
        self
    }

    /// Set the maximum nesting depth of collections, tagged literals and
    /// discarded values.
    pub fn with_recursion_limit(mut self, limit: u8) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Query the way ratio literals are handled.
    pub fn ratios(&self) -> Ratios {
        self.ratios
    }

    /// Query the way arbitrary precision suffixes are handled.
    pub fn precision_suffixes(&self) -> PrecisionSuffixes {
        self.precision_suffixes
    }

    /// Query the maximum nesting depth.
    pub fn recursion_limit(&self) -> u8 {
        self.recursion_limit
    }
}

impl Default for Options {
    /// Construct a default set of options:
    ///
    /// - Ratio literals are rejected.
    /// - Arbitrary precision suffixes are rejected.
    /// - Values may be nested 128 levels deep.
    fn default() -> Self {
        Options {
            ratios: Ratios::Reject,
            precision_suffixes: PrecisionSuffixes::Reject,
            recursion_limit: 128,
        }
    }
}

impl<R> Parser<R>
where
    R: Read,
{
    /// Create an EDN parser from one of the possible input sources.
    ///
    /// Typically it is more convenient to use one of these methods
    /// instead:
    ///
    ///   - `Parser::from_str`
    ///   - `Parser::from_slice`
    ///   - `Parser::from_reader`
    pub fn new(read: R) -> Self {
        Parser::with_options(read, Options::default())
    }

    /// Create a customized EDN parser from one of the possible input
    /// sources.
    ///
    /// Typically it is more convenient to use one of these methods
    /// instead:
    ///
    ///   - `Parser::from_str_custom`
    ///   - `Parser::from_slice_custom`
    ///   - `Parser::from_reader_custom`
    pub fn with_options(read: R, options: Options) -> Self {
        Parser {
            chars: CharReader::new(read),
            scratch: String::with_capacity(128),
            remaining_depth: options.recursion_limit,
            options,
        }
    }
}

impl<R> Parser<IoRead<R>>
where
    R: io::Read,
{
    /// Creates an EDN parser from an `io::Read`.
    pub fn from_reader(reader: R) -> Self {
        Parser::new(IoRead::new(reader))
    }

    /// Creates an EDN parser from an `io::Read`.
    pub fn from_reader_custom(reader: R, options: Options) -> Self {
        Parser::with_options(IoRead::new(reader), options)
    }
}

impl<'a> Parser<SliceRead<'a>> {
    /// Creates an EDN parser from a `&[u8]`.
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        Parser::new(SliceRead::new(bytes))
    }

    /// Creates an EDN parser from a `&[u8]`.
    pub fn from_slice_custom(bytes: &'a [u8], options: Options) -> Self {
        Parser::with_options(SliceRead::new(bytes), options)
    }
}

impl<'a> Parser<StrRead<'a>> {
    /// Creates an EDN parser from a `&str`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &'a str) -> Self {
        Parser::new(StrRead::new(s))
    }

    /// Creates an EDN parser from a `&str`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str_custom(s: &'a str, options: Options) -> Self {
        Parser::with_options(StrRead::new(s), options)
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | ',')
}

fn is_terminator(c: char) -> bool {
    is_whitespace(c) || matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '"' | ';')
}

fn is_closing_delimiter(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

impl<R: Read> Parser<R> {
    /// The `Parser::end` method should be called after a value has been fully
    /// parsed.  This allows the `Parser` to validate that the input stream is
    /// at the end or that it only has trailing whitespace, comments and
    /// discarded values.
    pub fn end(&mut self) -> Result<()> {
        if self.parse_whitespace()?.is_none() {
            return Ok(());
        }
        let location = self.peek_location()?;
        match self.parse()? {
            Some(_) => Err(Error::syntax(ErrorCode::TrailingCharacters, location)),
            None => Ok(()),
        }
    }

    /// Parse the next value from the input source, which must exist.
    ///
    /// This expects a value to be actually present, and returns an `Err`
    /// when called at the end of input. Use `Parser::parse` if you need to
    /// handle end of input gracefully.
    ///
    /// ```
    /// # use edn::{Parser, Value};
    /// let mut parser = Parser::from_str(r#"foo ("bar" 3.14) :baz"#);
    /// assert_eq!(parser.expect_value().unwrap(), Value::symbol("foo"));
    /// assert_eq!(
    ///     parser.expect_value().unwrap(),
    ///     Value::list(vec![Value::from("bar"), Value::from(3.14)])
    /// );
    /// assert_eq!(parser.expect_value().unwrap(), Value::keyword("baz"));
    /// assert!(parser.expect_value().is_err());
    /// ```
    pub fn expect_value(&mut self) -> Result<Value> {
        match self.parse()? {
            Some(value) => Ok(value),
            None => Err(self.error(ErrorCode::EofWhileParsingValue)),
        }
    }

    /// Parse the next value from the input source.
    ///
    /// If the end of input is encountered, this will return `Ok(None)`,
    /// otherwise, if parsing succeeded, `Ok(Some(Value))`. Discarded values
    /// are skipped and never returned.
    ///
    /// ```
    /// # use edn::{Parser, Value};
    /// let mut parser = Parser::from_str("nil #_42 7 ; the end");
    /// assert_eq!(parser.parse().unwrap(), Some(Value::Nil));
    /// assert_eq!(parser.parse().unwrap(), Some(Value::from(7)));
    /// assert_eq!(parser.parse().unwrap(), None);
    /// ```
    pub fn parse(&mut self) -> Result<Option<Value>> {
        loop {
            match self.parse_form()? {
                Some(Value::Discard(_)) => {}
                other => return Ok(other),
            }
        }
    }

    /// Iterate over the remaining values of the input source.
    ///
    /// ```
    /// # use edn::{Parser, Value};
    /// let mut parser = Parser::from_str("1 2 3");
    /// let values: Vec<Value> = parser.value_iter().collect::<Result<_, _>>().unwrap();
    /// assert_eq!(values, vec![Value::from(1), Value::from(2), Value::from(3)]);
    /// ```
    pub fn value_iter(&mut self) -> ValueIter<'_, R> {
        ValueIter { parser: self }
    }

    /// The parser options in use.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Location of the most recently consumed character.
    pub fn location(&self) -> Location {
        self.chars.location()
    }

    /// Error at the most recently consumed character.
    fn error(&self, reason: ErrorCode) -> Error {
        Error::syntax(reason, self.chars.location())
    }

    /// The location the next character will have once consumed.
    fn peek_location(&mut self) -> Result<Location> {
        match self.chars.next()? {
            Some(c) => {
                let location = self.chars.location();
                self.chars.unget(c);
                Ok(location)
            }
            None => Ok(self.chars.location()),
        }
    }

    /// Skips whitespace and comments, and returns the next character without
    /// consuming it, or `None` at the end of input.
    fn parse_whitespace(&mut self) -> Result<Option<char>> {
        loop {
            self.chars.skip_while(is_whitespace)?;
            match self.chars.peek()? {
                Some(';') => self.chars.skip_while(|c| c != '\n')?,
                other => return Ok(other),
            }
        }
    }

    /// Parses the next form, which may be a discarded one.
    fn parse_form(&mut self) -> Result<Option<Value>> {
        if self.parse_whitespace()?.is_none() {
            return Ok(None);
        }
        let c = match self.chars.next()? {
            Some(c) => c,
            None => return Ok(None),
        };
        let start = self.chars.location();
        let value = match c {
            '"' => self.parse_string()?,
            '\'' | '\\' => self.parse_char(start)?,
            ':' => self.parse_keyword(start)?,
            '(' => Value::List(
                self.parse_nested(|p| p.parse_seq(')', ErrorCode::EofWhileParsingList))?,
            ),
            '[' => Value::Vector(
                self.parse_nested(|p| p.parse_seq(']', ErrorCode::EofWhileParsingVector))?,
            ),
            '{' => self.parse_nested(Self::parse_map)?,
            '#' => self.parse_dispatch()?,
            c if is_closing_delimiter(c) => {
                return Err(Error::syntax(ErrorCode::UnexpectedDelimiter, start))
            }
            c => {
                self.chars.unget(c);
                self.parse_token(start)?
            }
        };
        Ok(Some(value))
    }

    /// Parses the next value that is not discarded; the end of input is an
    /// error.
    fn parse_element(&mut self) -> Result<Value> {
        loop {
            match self.parse_form()? {
                Some(Value::Discard(_)) => {}
                Some(value) => return Ok(value),
                None => return Err(self.error(ErrorCode::EofWhileParsingValue)),
            }
        }
    }

    fn parse_nested<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        if self.remaining_depth == 0 {
            return Err(self.error(ErrorCode::RecursionLimitExceeded));
        }
        self.remaining_depth -= 1;
        let ret = f(self);
        self.remaining_depth += 1;
        ret
    }

    /// Parses elements up to and including the closing delimiter `close`.
    fn parse_seq(&mut self, close: char, eof: ErrorCode) -> Result<Vec<Value>> {
        let mut elements = Vec::new();
        loop {
            match self.parse_whitespace()? {
                None => return Err(self.error(eof)),
                Some(c) if c == close => {
                    self.chars.next()?;
                    return Ok(elements);
                }
                Some(c) if is_closing_delimiter(c) => {
                    self.chars.next()?;
                    return Err(self.error(ErrorCode::MismatchedDelimiter));
                }
                Some(_) => match self.parse_form()? {
                    Some(Value::Discard(_)) => {}
                    Some(value) => elements.push(value),
                    None => return Err(self.error(eof)),
                },
            }
        }
    }

    fn parse_map(&mut self) -> Result<Value> {
        let elements = self.parse_seq('}', ErrorCode::EofWhileParsingMap)?;
        if elements.len() % 2 != 0 {
            return Err(self.error(ErrorCode::OddMapLength));
        }
        let mut map = Map::with_capacity(elements.len() / 2);
        let mut elements = elements.into_iter();
        while let (Some(key), Some(value)) = (elements.next(), elements.next()) {
            // Keeps the first key, replaces the value.
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }

    fn parse_set(&mut self) -> Result<Value> {
        let elements = self.parse_seq('}', ErrorCode::EofWhileParsingSet)?;
        let mut set = Set::with_capacity(elements.len());
        for element in elements {
            // `insert` does not replace an equal element already present.
            set.insert(element);
        }
        Ok(Value::Set(set))
    }

    /// Parses what follows a `#`.
    fn parse_dispatch(&mut self) -> Result<Value> {
        match self.chars.next()? {
            Some('{') => self.parse_nested(Self::parse_set),
            Some('_') => {
                let value = self.parse_nested(Self::parse_element)?;
                trace!(discarded = %value, "dropping discarded value");
                Ok(Value::Discard(Box::new(value)))
            }
            Some('#') => self.parse_symbolic_value(),
            Some(c) if c.is_alphabetic() => {
                self.chars.unget(c);
                let start = self.peek_location()?;
                let token = self.chars.take_until(is_terminator)?;
                let tag = match parse_name(&token) {
                    Some(tag) => tag,
                    None => return Err(Error::syntax(ErrorCode::InvalidTag, start)),
                };
                trace!(%tag, "dispatching tagged literal");
                let value = self.parse_nested(Self::parse_element)?;
                Ok(Value::Tagged(Tagged::new(tag, value)))
            }
            Some(_) => Err(self.error(ErrorCode::InvalidDispatch)),
            None => Err(self.error(ErrorCode::EofWhileParsingValue)),
        }
    }

    fn parse_symbolic_value(&mut self) -> Result<Value> {
        let token = self.chars.take_until(is_terminator)?;
        match token.as_str() {
            "Inf" => Ok(Value::Float(f64::INFINITY)),
            "-Inf" => Ok(Value::Float(f64::NEG_INFINITY)),
            "NaN" => Ok(Value::Float(f64::NAN)),
            _ => Err(self.error(ErrorCode::InvalidSymbolicValue)),
        }
    }

    /// Parses a string, after its opening quote.
    fn parse_string(&mut self) -> Result<Value> {
        self.scratch.clear();
        loop {
            match self.chars.next()? {
                Some('"') => return Ok(Value::from(self.scratch.as_str())),
                Some('\\') => {
                    let unescaped = match self.chars.next()? {
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('n') => '\n',
                        Some('\\') => '\\',
                        Some('"') => '"',
                        Some(_) => return Err(self.error(ErrorCode::InvalidEscape)),
                        None => return Err(self.error(ErrorCode::EofWhileParsingString)),
                    };
                    self.scratch.push(unescaped);
                }
                Some(c) => self.scratch.push(c),
                None => return Err(self.error(ErrorCode::EofWhileParsingString)),
            }
        }
    }

    /// Parses a character literal, after its leading `\` or `'`.
    fn parse_char(&mut self, start: Location) -> Result<Value> {
        let first = match self.chars.next()? {
            Some(c) => c,
            None => return Err(self.error(ErrorCode::EofWhileParsingCharacter)),
        };
        let rest = self.chars.take_until(is_terminator)?;
        if rest.is_empty() {
            return Ok(Value::Char(first));
        }
        let c = match (first, rest.as_str()) {
            ('n', "ewline") => Some('\n'),
            ('r', "eturn") => Some('\r'),
            ('s', "pace") => Some(' '),
            ('t', "ab") => Some('\t'),
            ('b', "ackspace") => Some('\u{08}'),
            ('f', "ormfeed") => Some('\u{0c}'),
            ('u', hex) if hex.len() == 4 && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            }
            _ => None,
        };
        match c {
            Some(c) => Ok(Value::Char(c)),
            None => Err(Error::syntax(ErrorCode::InvalidCharacter, start)),
        }
    }

    /// Parses a keyword, after its leading colon.
    fn parse_keyword(&mut self, start: Location) -> Result<Value> {
        let token = self.chars.take_until(is_terminator)?;
        match parse_name(&token) {
            Some(name) => Ok(Value::Keyword(name)),
            None => Err(Error::syntax(ErrorCode::InvalidKeyword, start)),
        }
    }

    /// Parses a bare token: `nil`, `true`, `false`, a number or a symbol, in
    /// that order of preference.
    fn parse_token(&mut self, start: Location) -> Result<Value> {
        if self.match_token("nil")? {
            return Ok(Value::Nil);
        }
        if self.match_token("true")? {
            return Ok(Value::Bool(true));
        }
        if self.match_token("false")? {
            return Ok(Value::Bool(false));
        }
        if let Some(number) = self.parse_number(start)? {
            return Ok(number);
        }
        let token = self.chars.take_until(is_terminator)?;
        match parse_name(&token) {
            Some(name) => Ok(Value::Symbol(name)),
            None if token.starts_with(is_symbol_char) => {
                Err(Error::syntax(ErrorCode::InvalidSymbol, start))
            }
            None => Err(Error::syntax(ErrorCode::ExpectedSomeValue, start)),
        }
    }

    /// Consumes `word` if it is the complete next token. Otherwise, nothing
    /// is consumed.
    fn match_token(&mut self, word: &str) -> Result<bool> {
        let mut consumed = Vec::with_capacity(word.len());
        for expected in word.chars() {
            match self.chars.next()? {
                Some(c) => {
                    consumed.push(c);
                    if c != expected {
                        self.chars.unget_all(&consumed);
                        return Ok(false);
                    }
                }
                None => {
                    self.chars.unget_all(&consumed);
                    return Ok(false);
                }
            }
        }
        match self.chars.peek()? {
            Some(c) if !is_terminator(c) => {
                self.chars.unget_all(&consumed);
                Ok(false)
            }
            _ => Ok(true),
        }
    }

    /// Parses a number if the next token starts like one. Once a token is
    /// recognized as numeric, it has to be a valid number.
    fn parse_number(&mut self, start: Location) -> Result<Option<Value>> {
        let first = match self.chars.next()? {
            Some(c) => c,
            None => return Ok(None),
        };
        let numeric = match first {
            '0'..='9' => true,
            '+' | '-' => matches!(self.chars.peek()?, Some('0'..='9')),
            _ => false,
        };
        if !numeric {
            self.chars.unget(first);
            return Ok(None);
        }
        let mut token = String::with_capacity(16);
        token.push(first);
        token.push_str(&self.chars.take_until(is_terminator)?);
        self.number_from_token(&token, start).map(Some)
    }

    fn number_from_token(&self, token: &str, start: Location) -> Result<Value> {
        let error = |code| Error::syntax(code, start);
        let number = match NumberSyntax::scan(token) {
            Some(number) => number,
            None => return Err(error(ErrorCode::InvalidNumber)),
        };
        if number.suffix.is_some()
            && self.options.precision_suffixes == PrecisionSuffixes::Reject
        {
            return Err(error(ErrorCode::UnsupportedPrecision));
        }
        match number.kind {
            NumberKind::Integer => parse_i64(number.mantissa, start).map(Value::Integer),
            NumberKind::Float => number
                .mantissa
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float)
                .ok_or_else(|| error(ErrorCode::NumberOutOfRange)),
            NumberKind::Ratio(split) => {
                let (numerator, denominator) =
                    (&number.mantissa[..split], &number.mantissa[split + 1..]);
                if denominator.bytes().all(|b| b == b'0') {
                    return Err(error(ErrorCode::ZeroDenominator));
                }
                if self.options.ratios == Ratios::Reject {
                    return Err(error(ErrorCode::UnsupportedRatio));
                }
                let numerator = parse_i64(numerator, start)?;
                let denominator = parse_i64(denominator, start)?;
                Ok(Value::Float(numerator as f64 / denominator as f64))
            }
        }
    }
}

fn parse_i64(digits: &str, start: Location) -> Result<i64> {
    use std::num::IntErrorKind;

    digits.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            Error::syntax(ErrorCode::IntegerOverflow, start)
        }
        _ => Error::syntax(ErrorCode::InvalidNumber, start),
    })
}

enum NumberKind {
    Integer,
    Float,
    /// Byte index of the `/`.
    Ratio(usize),
}

/// The lexical structure of a numeric token.
struct NumberSyntax<'a> {
    /// The token without suffix.
    mantissa: &'a str,
    kind: NumberKind,
    suffix: Option<char>,
}

impl<'a> NumberSyntax<'a> {
    /// Checks `token` against the grammar
    ///
    /// ```text
    /// [+-]? int ( '/' digits | ('.' digits*)? ([eE] [+-]? digits)? ) [NM]?
    /// ```
    ///
    /// where `int` has no leading zeros. `N` only applies to integers.
    fn scan(token: &'a str) -> Option<Self> {
        let bytes = token.as_bytes();
        let mut i = 0;
        if let Some(b'+') | Some(b'-') = bytes.first() {
            i += 1;
        }
        let int_start = i;
        i = skip_digits(bytes, i);
        if i == int_start || (bytes[int_start] == b'0' && i - int_start > 1) {
            return None;
        }

        if bytes.get(i) == Some(&b'/') {
            let denominator_start = i + 1;
            let end = skip_digits(bytes, denominator_start);
            if end == denominator_start || end != bytes.len() {
                return None;
            }
            return Some(NumberSyntax {
                mantissa: token,
                kind: NumberKind::Ratio(i),
                suffix: None,
            });
        }

        let mut kind = NumberKind::Integer;
        if bytes.get(i) == Some(&b'.') {
            kind = NumberKind::Float;
            i = skip_digits(bytes, i + 1);
        }
        if let Some(b'e') | Some(b'E') = bytes.get(i) {
            kind = NumberKind::Float;
            i += 1;
            if let Some(b'+') | Some(b'-') = bytes.get(i) {
                i += 1;
            }
            let exponent_start = i;
            i = skip_digits(bytes, i);
            if i == exponent_start {
                return None;
            }
        }

        let mantissa = &token[..i];
        let suffix = match (&bytes[i..], &kind) {
            (b"", _) => None,
            (b"N", NumberKind::Integer) => Some('N'),
            (b"M", _) => {
                kind = NumberKind::Float;
                Some('M')
            }
            _ => return None,
        };
        Some(NumberSyntax {
            mantissa,
            kind,
            suffix,
        })
    }
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '.' | '*' | '+' | '!' | '-' | '_' | '?' | '$' | '%' | '&' | '=' | '<' | '>' | '\''
                | ':' | '#'
        )
}

fn is_segment(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if first.is_ascii_digit() || first == ':' || first == '#' {
        return false;
    }
    if matches!(first, '+' | '-' | '.') {
        if let Some(second) = s[1..].chars().next() {
            if second.is_ascii_digit() {
                return false;
            }
        }
    }
    is_symbol_char(first) && chars.all(is_symbol_char)
}

/// Splits a symbol, keyword or tag token into namespace and name.
fn parse_name(token: &str) -> Option<Name> {
    if token == "/" {
        return Some(Name::new(token));
    }
    match token.find('/') {
        None if is_segment(token) => Some(Name::new(token)),
        None => None,
        Some(slash) => {
            let (namespace, name) = (&token[..slash], &token[slash + 1..]);
            if is_segment(namespace) && (name == "/" || is_segment(name)) {
                Some(Name::namespaced(namespace, name))
            } else {
                None
            }
        }
    }
}

/// Whether `name` prints as a token that `parse_name` splits back into the
/// same name.
pub(crate) fn is_readable_name(name: &Name) -> bool {
    let readable_name = name.name() == "/" || is_segment(name.name());
    match name.namespace() {
        None => readable_name,
        Some(namespace) => is_segment(namespace) && readable_name,
    }
}

/// Iterator over the values of an input source, created by
/// [`Parser::value_iter`].
pub struct ValueIter<'a, R> {
    parser: &'a mut Parser<R>,
}

impl<'a, R: Read> Iterator for ValueIter<'a, R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.parse().transpose()
    }
}

fn from_trait<R>(read: R, options: Options) -> Result<Value>
where
    R: Read,
{
    let mut parser = Parser::with_options(read, options);
    let value = parser.expect_value()?;
    parser.end()?;

    Ok(value)
}

/// Parse a value from an IO stream containing a single EDN value.
///
/// The content of the IO stream is parsed directly from the stream
/// without being buffered in memory.
///
/// When reading from a source against which short reads are not efficient, such
/// as a [`File`], you will want to apply your own buffering, e.g. using
/// [`std::io::BufReader`].
///
/// ```
/// use std::error::Error;
/// use std::fs::File;
/// use std::io::BufReader;
/// use std::path::Path;
///
/// fn read_value_from_file<P: AsRef<Path>>(path: P) -> Result<edn::Value, Box<dyn Error>> {
///     // Open the file in read-only mode with buffer.
///     let file = File::open(path)?;
///     let reader = BufReader::new(file);
///
///     // Read an arbitrary EDN value, converting ratios to floats.
///     let options = edn::parse::Options::new().with_ratios(edn::parse::Ratios::Float);
///     let value = edn::from_reader_custom(reader, options)?;
///
///     // Return the value.
///     Ok(value)
/// }
///
/// fn main() {
/// # }
/// # fn fake_main() {
///     let value = read_value_from_file("config.edn").unwrap();
///     println!("{:?}", value);
/// }
/// ```
///
/// [`File`]: https://doc.rust-lang.org/std/fs/struct.File.html
/// [`BufReader`]: https://doc.rust-lang.org/std/io/struct.BufReader.html
pub fn from_reader_custom(rdr: impl io::Read, options: Options) -> Result<Value> {
    from_trait(IoRead::new(rdr), options)
}

/// Parse a value from an IO stream of EDN text, using the default parser
/// options.
///
/// See [`from_reader_custom`] for more information.
///
/// [`from_reader_custom`]: fn.from_reader_custom.html
pub fn from_reader(rdr: impl io::Read) -> Result<Value> {
    from_reader_custom(rdr, Options::default())
}

/// Parse a value from bytes representing a single EDN value.
///
/// ```
/// let options = edn::parse::Options::new().with_ratios(edn::parse::Ratios::Float);
/// let value = edn::from_slice_custom(b"[1/4 (nested) list]", options).unwrap();
/// assert_eq!(value[0], edn::Value::from(0.25));
/// ```
pub fn from_slice_custom(bytes: &[u8], options: Options) -> Result<Value> {
    from_trait(SliceRead::new(bytes), options)
}

/// Parse a value from bytes representing a single EDN value, using the
/// default parser options.
///
/// See [`from_slice_custom`] for more information.
///
/// [`from_slice_custom`]: fn.from_slice_custom.html
pub fn from_slice(bytes: &[u8]) -> Result<Value> {
    from_slice_custom(bytes, Options::default())
}

/// Parse a value from a string slice representing a single EDN value.
///
/// ```
/// let options = edn::parse::Options::new().with_recursion_limit(2);
/// assert!(edn::from_str_custom("[[1]]", options.clone()).is_ok());
/// assert!(edn::from_str_custom("[[[1]]]", options).is_err());
/// ```
pub fn from_str_custom(s: &str, options: Options) -> Result<Value> {
    from_trait(StrRead::new(s), options)
}

/// Parse a value from a string slice representing a single EDN value, using
/// the default parser options.
///
/// See [`from_str_custom`] for more information.
///
/// [`from_str_custom`]: fn.from_str_custom.html
pub fn from_str(s: &str) -> Result<Value> {
    from_str_custom(s, Options::default())
}

mod chars;
pub mod error;
mod read;

#[cfg(test)]
mod tests;
