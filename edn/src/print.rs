//! Converting EDN values into text.
//!
//! The output of the printer can be read back by the parser: for every value
//! that contains neither a `NaN` float nor a discarded form, parsing the
//! printed text yields an equal value. Keywords, symbols and tags whose names
//! would not read back as themselves (`Value::symbol("nil")`,
//! `Value::keyword("a b")`) are refused with an `InvalidData` error.
//!
//! ```
//! use edn::Value;
//!
//! let value = Value::list(vec![Value::keyword("a"), Value::from("b\n"), Value::from('c')]);
//! let text = edn::to_string(&value).unwrap();
//! assert_eq!(text, r#"(:a "b\n" \c)"#);
//! assert_eq!(edn::from_str(&text).unwrap(), value);
//! ```

use std::io;

use crate::parse::is_readable_name;
use crate::value::{Map, Name, Set};
use crate::Value;

/// Options for printing EDN values.
#[derive(Clone, Debug)]
pub struct Options {
    char_syntax: CharSyntax,
    map_separator: MapSeparator,
}

impl Options {
    /// Construct the default set of options: characters are printed with a
    /// backslash and map entries are separated by commas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the syntax used for printing characters.
    pub fn with_char_syntax(mut self, syntax: CharSyntax) -> Self {
        self.char_syntax = syntax;
        self
    }

    /// Set the separator written between map entries.
    pub fn with_map_separator(mut self, separator: MapSeparator) -> Self {
        self.map_separator = separator;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            char_syntax: CharSyntax::Backslash,
            map_separator: MapSeparator::Comma,
        }
    }
}

/// How to print characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharSyntax {
    /// The conventional `\c` notation.
    Backslash,
    /// The `'c` notation, also accepted by the parser.
    Quote,
}

/// What to write between map entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSeparator {
    /// `{:a 1 :b 2}`
    Space,
    /// `{:a 1, :b 2}`
    Comma,
}

/// Represents a character escape code in a type-safe manner.
pub enum CharEscape {
    /// An escaped quote `"`
    Quote,
    /// An escaped reverse solidus `\`
    ReverseSolidus,
    /// An escaped line feed character (escaped as `\n`)
    LineFeed,
    /// An escaped carriage return character (escaped as `\r`)
    CarriageReturn,
    /// An escaped tab character (escaped as `\t`)
    Tab,
}

impl CharEscape {
    #[inline]
    fn from_escape_table(escape: u8) -> Option<CharEscape> {
        match escape {
            self::TT => Some(CharEscape::Tab),
            self::NN => Some(CharEscape::LineFeed),
            self::RR => Some(CharEscape::CarriageReturn),
            self::QU => Some(CharEscape::Quote),
            self::BS => Some(CharEscape::ReverseSolidus),
            _ => None,
        }
    }
}

/// This trait abstracts away writing the pieces of EDN text, which allows
/// the implementer to customize the output, e.g. to pretty print it.
///
/// The default implementation produces compact, single-line text.
pub trait Formatter {
    /// Writes `nil` to the specified writer.
    #[inline]
    fn write_nil<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"nil")
    }

    /// Writes a boolean value to the specified writer.
    #[inline]
    fn write_bool<W: ?Sized>(&mut self, writer: &mut W, value: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(if value { b"true" } else { b"false" })
    }

    /// Writes an integer value like `-123` to the specified writer.
    #[inline]
    fn write_integer<W: ?Sized>(&mut self, writer: &mut W, value: i64) -> io::Result<()>
    where
        W: io::Write,
    {
        let mut buffer = itoa::Buffer::new();
        writer.write_all(buffer.format(value).as_bytes())
    }

    /// Writes a floating point value like `-31.26e+12` to the specified
    /// writer.
    ///
    /// Infinities and `NaN` are written using the symbolic values `##Inf`,
    /// `##-Inf` and `##NaN`.
    #[inline]
    fn write_float<W: ?Sized>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: io::Write,
    {
        if value.is_nan() {
            writer.write_all(b"##NaN")
        } else if value.is_infinite() {
            writer.write_all(if value > 0.0 { b"##Inf" } else { b"##-Inf" })
        } else {
            let mut buffer = ryu::Buffer::new();
            writer.write_all(buffer.format_finite(value).as_bytes())
        }
    }

    /// Writes a character to the specified writer.
    ///
    /// The implementation provided by the trait uses backslash notation
    /// (`\c`).
    #[inline]
    fn write_char<W: ?Sized>(&mut self, writer: &mut W, c: char) -> io::Result<()>
    where
        W: io::Write,
    {
        write_char_literal(writer, b'\\', c)
    }

    /// Called before each series of `write_string_fragment` and
    /// `write_char_escape`.  Writes a `"` to the specified writer.
    #[inline]
    fn begin_string<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"\"")
    }

    /// Called after each series of `write_string_fragment` and
    /// `write_char_escape`.  Writes a `"` to the specified writer.
    #[inline]
    fn end_string<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"\"")
    }

    /// Writes a string fragment that doesn't need any escaping to the specified
    /// writer.
    #[inline]
    fn write_string_fragment<W: ?Sized>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(fragment.as_bytes())
    }

    /// Writes a character escape code to the specified writer.
    #[inline]
    fn write_char_escape<W: ?Sized>(
        &mut self,
        writer: &mut W,
        char_escape: CharEscape,
    ) -> io::Result<()>
    where
        W: io::Write,
    {
        use self::CharEscape::*;

        let s = match char_escape {
            Quote => b"\\\"",
            ReverseSolidus => b"\\\\",
            LineFeed => b"\\n",
            CarriageReturn => b"\\r",
            Tab => b"\\t",
        };
        writer.write_all(s)
    }

    /// Writes a symbol to the specified writer.
    #[inline]
    fn write_symbol<W: ?Sized>(&mut self, writer: &mut W, name: &Name) -> io::Result<()>
    where
        W: io::Write,
    {
        write_name(writer, name)
    }

    /// Writes a keyword, including the leading colon, to the specified
    /// writer.
    #[inline]
    fn write_keyword<W: ?Sized>(&mut self, writer: &mut W, name: &Name) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b":")?;
        write_name(writer, name)
    }

    /// Writes the tag of a tagged literal, including the leading `#`, to the
    /// specified writer.
    #[inline]
    fn write_tag<W: ?Sized>(&mut self, writer: &mut W, tag: &Name) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"#")?;
        write_name(writer, tag)?;
        writer.write_all(b" ")
    }

    /// Writes the `#_` prefix of a discarded form.
    #[inline]
    fn write_discard<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"#_ ")
    }

    /// Called before any list elements.  Writes a `(` to the specified
    /// writer.
    #[inline]
    fn begin_list<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"(")
    }

    /// Called after all list elements have been written.  Writes a `)` to the
    /// specified writer.
    #[inline]
    fn end_list<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b")")
    }

    /// Called before any vector elements.  Writes a `[` to the specified
    /// writer.
    #[inline]
    fn begin_vector<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"[")
    }

    /// Called after all vector elements have been written.  Writes a `]` to
    /// the specified writer.
    #[inline]
    fn end_vector<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"]")
    }

    /// Called before any set elements.  Writes a `#{` to the specified
    /// writer.
    #[inline]
    fn begin_set<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"#{")
    }

    /// Called after all set elements have been written.  Writes a `}` to the
    /// specified writer.
    #[inline]
    fn end_set<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"}")
    }

    /// Called before starting to write a list, vector or set element. Writes
    /// a space to the specified writer, if needed.
    #[inline]
    fn begin_seq_element<W: ?Sized>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b" ")
        }
    }

    /// Called before any map entries.  Writes a `{` to the specified writer.
    #[inline]
    fn begin_map<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"{")
    }

    /// Called after all map entries have been written.  Writes a `}` to the
    /// specified writer.
    #[inline]
    fn end_map<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"}")
    }

    /// Called before every map key. Writes `, ` to the specified writer,
    /// unless this is the first entry.
    #[inline]
    fn begin_map_key<W: ?Sized>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    /// Called between a map key and its value. Writes a space to the
    /// specified writer.
    #[inline]
    fn begin_map_value<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b" ")
    }
}

/// This structure compacts an EDN value on a single line, using the default
/// representation.
#[derive(Clone, Debug)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {}

/// A formatter which can be tuned with regards to the EDN representation.
#[derive(Clone, Debug)]
pub struct CustomizedFormatter {
    options: Options,
}

impl Formatter for CustomizedFormatter {
    fn write_char<W: ?Sized>(&mut self, writer: &mut W, c: char) -> io::Result<()>
    where
        W: io::Write,
    {
        match self.options.char_syntax {
            CharSyntax::Backslash => write_char_literal(writer, b'\\', c),
            CharSyntax::Quote => write_char_literal(writer, b'\'', c),
        }
    }

    fn begin_map_key<W: ?Sized>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        match (first, self.options.map_separator) {
            (true, _) => Ok(()),
            (false, MapSeparator::Space) => writer.write_all(b" "),
            (false, MapSeparator::Comma) => writer.write_all(b", "),
        }
    }
}

/// A printer for EDN values.
#[derive(Debug)]
pub struct Printer<W, F = DefaultFormatter> {
    writer: W,
    formatter: F,
}

impl<W> Printer<W>
where
    W: io::Write,
{
    /// Creates a new EDN printer.
    #[inline]
    pub fn new(writer: W) -> Self {
        Printer::with_formatter(writer, DefaultFormatter)
    }
}

impl<W> Printer<W, CustomizedFormatter>
where
    W: io::Write,
{
    /// Construct an EDN printer tuned given the specified options.
    pub fn with_options(writer: W, options: Options) -> Self {
        Printer {
            writer,
            formatter: CustomizedFormatter { options },
        }
    }
}

impl<W, F> Printer<W, F>
where
    W: io::Write,
    F: Formatter,
{
    /// Creates a new EDN printer whose output will be written to the writer
    /// specified.
    #[inline]
    pub fn with_formatter(writer: W, formatter: F) -> Self {
        Printer { writer, formatter }
    }

    /// Unwrap the `Writer` from the `Printer`.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Output the representation of the specified value to the underlying
    /// writer.
    pub fn print(&mut self, value: &Value) -> io::Result<()> {
        match value {
            Value::Nil => self.formatter.write_nil(&mut self.writer),
            Value::Bool(b) => self.formatter.write_bool(&mut self.writer, *b),
            Value::Char(c) => self.formatter.write_char(&mut self.writer, *c),
            Value::String(s) => format_escaped_str(&mut self.writer, &mut self.formatter, s),
            Value::Keyword(name) => {
                check_name(name, NameRole::Keyword)?;
                self.formatter.write_keyword(&mut self.writer, name)
            }
            Value::Symbol(name) => {
                check_name(name, NameRole::Symbol)?;
                self.formatter.write_symbol(&mut self.writer, name)
            }
            Value::Integer(n) => self.formatter.write_integer(&mut self.writer, *n),
            Value::Float(n) => self.formatter.write_float(&mut self.writer, *n),
            Value::List(elements) => {
                self.formatter.begin_list(&mut self.writer)?;
                self.print_elements(elements)?;
                self.formatter.end_list(&mut self.writer)
            }
            Value::Vector(elements) => {
                self.formatter.begin_vector(&mut self.writer)?;
                self.print_elements(elements)?;
                self.formatter.end_vector(&mut self.writer)
            }
            Value::Map(map) => self.print_map(map),
            Value::Set(set) => self.print_set(set),
            Value::Tagged(tagged) => {
                check_name(tagged.tag(), NameRole::Tag)?;
                self.formatter.write_tag(&mut self.writer, tagged.tag())?;
                self.print(tagged.value())
            }
            Value::Discard(value) => {
                self.formatter.write_discard(&mut self.writer)?;
                self.print(value)
            }
        }
    }

    fn print_elements<'a, I>(&mut self, elements: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        for (i, element) in elements.into_iter().enumerate() {
            self.formatter.begin_seq_element(&mut self.writer, i == 0)?;
            self.print(element)?;
        }
        Ok(())
    }

    fn print_map(&mut self, map: &Map) -> io::Result<()> {
        self.formatter.begin_map(&mut self.writer)?;
        for (i, (key, value)) in map.iter().enumerate() {
            self.formatter.begin_map_key(&mut self.writer, i == 0)?;
            self.print(key)?;
            self.formatter.begin_map_value(&mut self.writer)?;
            self.print(value)?;
        }
        self.formatter.end_map(&mut self.writer)
    }

    fn print_set(&mut self, set: &Set) -> io::Result<()> {
        self.formatter.begin_set(&mut self.writer)?;
        self.print_elements(set)?;
        self.formatter.end_set(&mut self.writer)
    }
}

#[derive(Clone, Copy)]
enum NameRole {
    Keyword,
    Symbol,
    Tag,
}

/// Refuses names the parser would read back as something else.
fn check_name(name: &Name, role: NameRole) -> io::Result<()> {
    let readable = is_readable_name(name)
        && match role {
            NameRole::Keyword => true,
            NameRole::Symbol => {
                name.namespace().is_some() || !matches!(name.name(), "nil" | "true" | "false")
            }
            NameRole::Tag => name
                .namespace()
                .unwrap_or_else(|| name.name())
                .starts_with(char::is_alphabetic),
        };
    if readable {
        Ok(())
    } else {
        let what = match role {
            NameRole::Keyword => "keyword",
            NameRole::Symbol => "symbol",
            NameRole::Tag => "tag",
        };
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} `{}` cannot be read back", what, name),
        ))
    }
}

fn write_name<W: ?Sized>(writer: &mut W, name: &Name) -> io::Result<()>
where
    W: io::Write,
{
    if let Some(namespace) = name.namespace() {
        writer.write_all(namespace.as_bytes())?;
        writer.write_all(b"/")?;
    }
    writer.write_all(name.name().as_bytes())
}

fn write_char_literal<W: ?Sized>(writer: &mut W, lead: u8, c: char) -> io::Result<()>
where
    W: io::Write,
{
    writer.write_all(&[lead])?;
    match c {
        '\n' => writer.write_all(b"newline"),
        '\r' => writer.write_all(b"return"),
        ' ' => writer.write_all(b"space"),
        '\t' => writer.write_all(b"tab"),
        '\u{08}' => writer.write_all(b"backspace"),
        '\u{0c}' => writer.write_all(b"formfeed"),
        // Control characters are all in the BMP, so four digits suffice.
        c if c.is_control() || c.is_whitespace() => write!(writer, "u{:04X}", u32::from(c)),
        c => {
            let mut buf = [0; 4];
            writer.write_all(c.encode_utf8(&mut buf).as_bytes())
        }
    }
}

fn format_escaped_str<W: ?Sized, F: ?Sized>(
    writer: &mut W,
    formatter: &mut F,
    value: &str,
) -> io::Result<()>
where
    W: io::Write,
    F: Formatter,
{
    formatter.begin_string(writer)?;
    format_escaped_str_contents(writer, formatter, value)?;
    formatter.end_string(writer)?;
    Ok(())
}

fn format_escaped_str_contents<W: ?Sized, F: ?Sized>(
    writer: &mut W,
    formatter: &mut F,
    value: &str,
) -> io::Result<()>
where
    W: io::Write,
    F: Formatter,
{
    let bytes = value.as_bytes();

    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        let char_escape = match CharEscape::from_escape_table(ESCAPE[byte as usize]) {
            Some(char_escape) => char_escape,
            None => continue,
        };

        if start < i {
            formatter.write_string_fragment(writer, &value[start..i])?;
        }
        formatter.write_char_escape(writer, char_escape)?;

        start = i + 1;
    }

    if start != bytes.len() {
        formatter.write_string_fragment(writer, &value[start..])?;
    }

    Ok(())
}

const TT: u8 = b't'; // \x09
const NN: u8 = b'n'; // \x0A
const RR: u8 = b'r'; // \x0D
const QU: u8 = b'"'; // \x22
const BS: u8 = b'\\'; // \x5C
const __: u8 = 0;

// Lookup table of escape sequences. A value of b'x' at index i means that byte
// i is escaped as "\x". A value of 0 means that byte i is written as is; the
// parser has no escapes for other control characters.
static ESCAPE: [u8; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    __, __, __, __, __, __, __, __, __, TT, NN, __, __, RR, __, __, // 0
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
    __, __, QU, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 3
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
    __, __, __, __, __, __, __, __, __, __, __, __, BS, __, __, __, // 5
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
];

/// Serialize the given value as EDN text into the IO stream, using the
/// default printer options.
#[inline]
pub fn to_writer<W: io::Write>(writer: W, value: &Value) -> io::Result<()> {
    let mut printer = Printer::new(writer);
    printer.print(value)?;
    Ok(())
}

/// Serialize the given value as EDN text into the IO stream.
#[inline]
pub fn to_writer_custom<W: io::Write>(
    writer: W,
    value: &Value,
    options: Options,
) -> io::Result<()> {
    let mut printer = Printer::with_options(writer, options);
    printer.print(value)?;
    Ok(())
}

/// Serialize the given value as byte vector containing EDN text, using the
/// default printer options.
#[inline]
pub fn to_vec(value: &Value) -> io::Result<Vec<u8>> {
    let mut writer = Vec::with_capacity(128);
    to_writer(&mut writer, value)?;
    Ok(writer)
}

/// Serialize the given value as byte vector containing EDN text.
#[inline]
pub fn to_vec_custom(value: &Value, options: Options) -> io::Result<Vec<u8>> {
    let mut writer = Vec::with_capacity(128);
    to_writer_custom(&mut writer, value, options)?;
    Ok(writer)
}

/// Serialize the given value as an EDN string, using the default printer
/// options.
#[inline]
pub fn to_string(value: &Value) -> io::Result<String> {
    let vec = to_vec(value)?;
    let string = unsafe {
        // We do not emit invalid UTF-8.
        String::from_utf8_unchecked(vec)
    };
    Ok(string)
}

/// Serialize the given value as an EDN string.
#[inline]
pub fn to_string_custom(value: &Value, options: Options) -> io::Result<String> {
    let vec = to_vec_custom(value, options)?;
    let string = unsafe {
        // We do not emit invalid UTF-8.
        String::from_utf8_unchecked(vec)
    };
    Ok(string)
}

#[cfg(test)]
mod tests;
