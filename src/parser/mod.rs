//! Module for parsing JSON text into a stream of events
//!
//! [`Parser`] is a pull parser: each call to [`next`](Parser::next) returns
//! the next [`Event`] of the document, or `None` once the current top-level
//! value (and in single-value mode, the input) is exhausted. The low-level
//! tokenizer it drives lives in the [`lexer`] module and can be used on its
//! own.

pub mod lexer;

use std::io::Read;

use duplicate::duplicate_item;
use thiserror::Error;

use self::lexer::{Container, Lexer, LexError, Location, Token};
use crate::event::Event;

type IoError = std::io::Error;

/// Error describing why JSON input text is invalid
///
/// The message has the form `<name>:<line>:<column>: error: <description>`,
/// suitable for single-line diagnostics. Line and column are 1-based; the
/// byte position is 0-based and points one byte past the character at fault.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
#[error("{name}:{line}:{column}: error: {description}")]
pub struct InvalidInput {
    /// Name identifying the input, as passed to the parser constructor
    pub name: String,
    /// Line of the error, 1-based
    pub line: u64,
    /// Column of the error, 1-based
    pub column: u64,
    /// Byte position one past the character at fault, 0-based
    pub position: u64,
    /// Why the input is invalid
    pub description: String,
}

/// Error which occurred while parsing
///
/// All errors are fatal: after an error was returned the parser must not be
/// used any further.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input is not valid JSON, or a typed value conversion failed
    #[error("{0}")]
    Invalid(#[from] InvalidInput),
    /// Reading from the underlying byte source failed
    #[error("{name}:{line}:{column}: error: unable to read JSON input text")]
    Io {
        /// Name identifying the input, as passed to the parser constructor
        name: String,
        /// Line at which the source failed, 1-based
        line: u64,
        /// Column at which the source failed, 1-based
        column: u64,
        /// Byte position at which the source failed, 0-based
        position: u64,
        /// The error reported by the source
        #[source]
        source: IoError,
    },
}

/// Settings to customize the parser behavior
///
/// These settings are used by [`Parser::new_custom`]. To avoid repeating the
/// default values for unchanged settings `..Default::default()` can be used:
/// ```
/// # use evson::parser::ParserSettings;
/// ParserSettings {
///     multi_value: true,
///     // For all other settings use the default
///     ..Default::default()
/// }
/// # ;
/// ```
#[derive(Clone, Debug)]
pub struct ParserSettings {
    /// Whether the input consists of multiple top-level values
    ///
    /// When `false`, exactly one top-level value is required and trailing
    /// data other than whitespace is an error. When `true`, zero or more
    /// top-level values are parsed; [`Parser::next`] returns `None` after
    /// each balanced value and the following call starts the next value.
    pub multi_value: bool,

    /// Which separators are required between top-level values
    ///
    /// Only meaningful in multi-value mode:
    /// - `None`: no separator is required (JSON whitespace is still skipped).
    /// - `Some("")`: at least one JSON whitespace character is required.
    /// - `Some(set)`: at least one character from `set` is required; JSON
    ///   whitespace around the separators is skipped.
    ///
    /// Separators before the first value and after the last value are
    /// permitted and skipped. For RS-delimited JSON (RFC 7464) use
    /// `Some("\u{1E}".to_owned())`.
    pub separators: Option<String>,
}

impl Default for ParserSettings {
    /// Creates the default parser settings
    ///
    /// - multiple top-level values: disallowed
    /// - separators: none required
    fn default() -> Self {
        ParserSettings {
            multi_value: false,
            separators: None,
        }
    }
}

/// A pull parser producing JSON [`Event`]s from a [`Read`]
///
/// In-memory data is parsed by passing it as byte slice, for example
/// `"[1]".as_bytes()`; any other byte source is used through its [`Read`]
/// implementation. The input is expected to be UTF-8 text without a byte
/// order mark.
///
/// The `(event, lexeme)` pairs produced by [`next`](Self::next) and
/// [`data`](Self::data) are legal input for
/// [`Serializer::next`](crate::serializer::Serializer::next), so a document
/// can be reserialized without interpreting it:
///
/// ```
/// # use evson::parser::Parser;
/// # use evson::serializer::{Serializer, VecSink};
/// let mut parser = Parser::new(r#"{"a": [1, true]}"#.as_bytes(), "example");
/// let mut out = Vec::new();
/// let mut serializer = Serializer::new(VecSink::new(&mut out));
///
/// loop {
///     let event = parser.next()?;
///     serializer.next(event, parser.data().map(str::as_bytes), true)?;
///     if event.is_none() {
///         break;
///     }
/// }
/// assert_eq!(r#"{"a":[1,true]}"#, String::from_utf8(out)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
/// All errors are fatal: after a method returned a [`ParseError`] the parser
/// is in an unspecified state and must not be used any further.
///
/// # Panics
/// The accessors [`name`](Self::name), [`value`](Self::value) and
/// [`value_mut`](Self::value_mut) panic when the current event is not of the
/// matching kind. This indicates incorrect usage and is unrelated to the
/// JSON data.
pub struct Parser<R: Read> {
    lexer: Lexer<R>,
    input_name: String,
    multi_value: bool,
    separators: Option<String>,

    /// Event of the most recent [`next`](Self::next) call; the inner `None`
    /// is the end-of-value marker
    parsed: Option<Option<Event>>,
    /// Event produced by lookahead and not consumed yet
    peeked: Option<Option<Event>>,

    /// Copies of the parsed event's name/value, filled before a peek
    /// overwrites the lexer's lexeme buffer
    cached_name: String,
    cached_value: String,
    name_cached: bool,
    value_cached: bool,
    cached_location: Option<Location>,
}

// Implementation with public constructor methods
impl<R: Read> Parser<R> {
    /// Creates a parser with [default settings](ParserSettings::default)
    ///
    /// The `input_name` identifies the input in error messages, for example
    /// a file name or `"<stdin>"`.
    pub fn new(reader: R, input_name: impl Into<String>) -> Self {
        Parser::new_custom(reader, input_name, ParserSettings::default())
    }

    /// Creates a parser with custom settings
    pub fn new_custom(
        reader: R,
        input_name: impl Into<String>,
        settings: ParserSettings,
    ) -> Self {
        let multi_value = settings.multi_value;
        Self {
            lexer: if multi_value {
                Lexer::new_streaming(reader)
            } else {
                Lexer::new(reader)
            },
            input_name: input_name.into(),
            multi_value,
            separators: settings.separators,
            parsed: None,
            peeked: None,
            cached_name: String::new(),
            cached_value: String::new(),
            name_cached: false,
            value_cached: false,
            cached_location: None,
        }
    }

    /// The name identifying the input, as passed to the constructor
    pub fn input_name(&self) -> &str {
        &self.input_name
    }
}

// Implementation with error utility methods
impl<R: Read> Parser<R> {
    fn invalid_input(&self, description: impl Into<String>) -> ParseError {
        self.invalid_input_at(
            Location {
                line: self.line(),
                column: self.column(),
                position: self.position(),
            },
            description,
        )
    }

    fn invalid_input_at(&self, location: Location, description: impl Into<String>) -> ParseError {
        ParseError::Invalid(InvalidInput {
            name: self.input_name.clone(),
            line: location.line,
            column: location.column,
            position: location.position,
            description: description.into(),
        })
    }

    fn lex_error(&self, e: LexError) -> ParseError {
        match e {
            LexError::Syntax {
                location,
                description,
            } => ParseError::Invalid(InvalidInput {
                name: self.input_name.clone(),
                line: location.line,
                column: location.column,
                position: location.position,
                description,
            }),
            LexError::Io { location, source } => ParseError::Io {
                name: self.input_name.clone(),
                line: location.line,
                column: location.column,
                position: location.position,
                source,
            },
        }
    }
}

// Implementation with parsing methods
impl<R: Read> Parser<R> {
    /// Returns the next event, or `None` at the end of the value
    ///
    /// In single-value mode `None` means the end of the input has been
    /// reached. In multi-value mode `None` additionally separates the
    /// top-level values: it is returned once after each balanced value, and
    /// the following call starts parsing the next value. Repeated calls at
    /// the end of the input keep returning `None`.
    ///
    /// ```
    /// # use evson::{parser::Parser, Event};
    /// let mut parser = Parser::new("[true]".as_bytes(), "example");
    /// assert_eq!(Some(Event::BeginArray), parser.next()?);
    /// assert_eq!(Some(Event::Boolean), parser.next()?);
    /// assert_eq!(Some(Event::EndArray), parser.next()?);
    /// assert_eq!(None, parser.next()?);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn next(&mut self) -> Result<Option<Event>, ParseError> {
        self.name_cached = false;
        self.value_cached = false;
        self.cached_location = None;

        let event = match self.peeked.take() {
            Some(peeked) => peeked,
            None => self.advance()?,
        };
        self.parsed = Some(event);
        Ok(event)
    }

    /// Peeks at the next event without consuming it
    ///
    /// Repeated calls are idempotent and return the same event, which the
    /// following [`next`](Self::next) call then consumes. Peeking does not
    /// affect [`name`](Self::name), [`value`](Self::value) and the location
    /// accessors, which keep referring to the most recent `next` event;
    /// only [`data`](Self::data) switches to the peeked token.
    pub fn peek(&mut self) -> Result<Option<Event>, ParseError> {
        if self.peeked.is_none() {
            if self.parsed.is_some() {
                // Advancing will overwrite the lexer's lexeme buffer and
                // location, so preserve them for the parsed event
                self.cache_parsed_data();
                self.cached_location = Some(self.lexer.location());
            }
            self.peeked = Some(self.advance()?);
        }
        Ok(self.peeked.unwrap())
    }

    /// Advances the lexer by one token, handling inter-value separation in
    /// multi-value mode, and translates the token
    fn advance(&mut self) -> Result<Option<Event>, ParseError> {
        // Skip any separators and whitespace preceding the first value
        if self.multi_value && self.parsed.is_none() && self.peeked.is_none() {
            self.skip_separators()?;
        }

        let token = self.lexer.next().map_err(|e| self.lex_error(e))?;

        if token == Token::Done {
            // Deal with the separators following the value. This must not be
            // done for the `Done` which signals the end of the input (the
            // previous token was itself `Done`, or there were no values).
            let previous = self.peeked.or(self.parsed);
            if self.multi_value && previous.is_some_and(|e| e.is_some()) {
                let (separated, next_byte) = self.skip_separators()?;

                // Separators are not required after the last value
                if !separated && next_byte.is_some() {
                    // Consume the byte so the error location points past it
                    self.lexer.source_get().map_err(|e| self.lex_error(e))?;
                    return Err(self.invalid_input_at(
                        self.lexer.location(),
                        "missing separator between JSON values",
                    ));
                }

                self.lexer.reset();
            }
            return Ok(None);
        }

        Ok(Some(self.translate(token)))
    }

    /// Classifies a token as event; string tokens inside an object at an odd
    /// token count are member names
    fn translate(&self, token: Token) -> Event {
        match token {
            Token::BeginObject => Event::BeginObject,
            Token::EndObject => Event::EndObject,
            Token::BeginArray => Event::BeginArray,
            Token::EndArray => Event::EndArray,
            Token::String => match self.lexer.context() {
                Some((Container::Object, count)) if count % 2 == 1 => Event::Name,
                _ => Event::String,
            },
            Token::Number => Event::Number,
            Token::True | Token::False => Event::Boolean,
            Token::Null => Event::Null,
            Token::Done => unreachable!("Done is handled by the caller"),
        }
    }

    /// Reads characters between top-level values, skipping required
    /// separators and JSON whitespace
    ///
    /// Returns whether a required separator was encountered, and the first
    /// byte which is neither separator nor whitespace (not consumed).
    fn skip_separators(&mut self) -> Result<(bool, Option<u8>), ParseError> {
        let mut separated = self.separators.is_none();

        loop {
            let byte = match self.lexer.source_peek().map_err(|e| self.lex_error(e))? {
                Some(byte) => byte,
                None => return Ok((separated, None)),
            };

            // User separator
            if let Some(separators) = &self.separators {
                if !separators.is_empty() && separators.as_bytes().contains(&byte) {
                    separated = true;
                    self.lexer.source_get().map_err(|e| self.lex_error(e))?;
                    continue;
                }
            }

            // JSON whitespace
            if matches!(byte, b' ' | b'\t' | b'\n' | b'\r') {
                if matches!(&self.separators, Some(s) if s.is_empty()) {
                    separated = true;
                }
                self.lexer.source_get().map_err(|e| self.lex_error(e))?;
                continue;
            }

            return Ok((separated, Some(byte)));
        }
    }

    fn cache_parsed_data(&mut self) {
        self.name_cached = false;
        self.value_cached = false;
        if let Some(Some(event)) = self.parsed {
            if event == Event::Name {
                self.cached_name.clear();
                self.cached_name.push_str(self.lexer.lexeme());
                self.name_cached = true;
            } else if event.is_value() {
                self.cached_value.clear();
                self.cached_value.push_str(self.lexer.lexeme());
                self.value_cached = true;
            }
        }
    }
}

// Implementation with data access methods
impl<R: Read> Parser<R> {
    /// The most recently produced event, preferring a peeked one
    fn latest(&self) -> Option<Option<Event>> {
        self.peeked.or(self.parsed)
    }

    /// The object member name of the current event
    ///
    /// Refers to the most recent event returned by [`next`](Self::next),
    /// also when a [`peek`](Self::peek) happened afterwards.
    ///
    /// # Panics
    /// Panics when the current event is not [`Event::Name`].
    pub fn name(&self) -> &str {
        if self.parsed != Some(Some(Event::Name)) {
            panic!("Incorrect parser usage: name() is only valid for a name event");
        }
        if self.name_cached {
            &self.cached_name
        } else {
            self.lexer.lexeme()
        }
    }

    /// The text of the current value event
    ///
    /// Any value event (string, number, boolean and null) can be retrieved
    /// as text; strings have their escape sequences already resolved.
    /// Refers to the most recent event returned by [`next`](Self::next),
    /// also when a [`peek`](Self::peek) happened afterwards.
    ///
    /// # Panics
    /// Panics when the current event is not a value event.
    pub fn value(&self) -> &str {
        if !matches!(self.parsed, Some(Some(e)) if e.is_value()) {
            panic!("Incorrect parser usage: value() is only valid for a value event");
        }
        if self.value_cached {
            &self.cached_value
        } else {
            self.lexer.lexeme()
        }
    }

    /// Mutable access to the text of the current value event
    ///
    /// The caller may move the string out, but should not do so
    /// unnecessarily: the storage is reused for subsequent values and no
    /// guarantee is made about its contents after the next advance.
    ///
    /// # Panics
    /// Panics when the current event is not a value event.
    pub fn value_mut(&mut self) -> &mut String {
        if !matches!(self.parsed, Some(Some(e)) if e.is_value()) {
            panic!("Incorrect parser usage: value_mut() is only valid for a value event");
        }
        if self.value_cached {
            &mut self.cached_value
        } else {
            self.lexer.lexeme_mut()
        }
    }

    /// The raw lexeme of the latest event, whether it came from
    /// [`next`](Self::next) or [`peek`](Self::peek)
    ///
    /// `None` for structural events and for the absent event. The returned
    /// text is suitable as lexeme argument for
    /// [`Serializer::next`](crate::serializer::Serializer::next).
    pub fn data(&self) -> Option<&str> {
        match self.latest() {
            Some(Some(e)) if e.is_value() || e == Event::Name => Some(self.lexer.lexeme()),
            _ => None,
        }
    }

    /// Converts the current value to an integer, floating-point or boolean type
    ///
    /// The conversion fails with an [`InvalidInput`] error when it would be
    /// lossy: integer conversions reject overflow and fractional values
    /// (exponent forms which scale to an integer, such as `1.2e2`, are
    /// accepted), and boolean conversion requires exactly `true` or `false`.
    ///
    /// ```
    /// # use evson::parser::Parser;
    /// let mut parser = Parser::new("1.2e2".as_bytes(), "example");
    /// parser.next()?;
    /// assert_eq!(120_u32, parser.value_as::<u32>()?);
    /// assert!(parser.value_as::<f64>().is_ok());
    /// assert!(parser.value_as::<bool>().is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// # Panics
    /// Panics when the current event is not a value event.
    pub fn value_as<T: FromLexeme>(&self) -> Result<T, ParseError> {
        let value = self.value();
        T::from_lexeme(value)
            .ok_or_else(|| self.invalid_input(format!("invalid {} value: '{value}'", T::TYPE_NAME)))
    }

    /// Line of the most recent [`next`](Self::next) event, 1-based
    ///
    /// 0 before the first event was returned.
    pub fn line(&self) -> u64 {
        if let Some(location) = self.cached_location {
            return location.line;
        }
        if self.parsed.is_none() {
            return 0;
        }
        self.lexer.line()
    }

    /// Column one past the most recent [`next`](Self::next) event, 1-based
    ///
    /// 0 before the first event was returned.
    pub fn column(&self) -> u64 {
        if let Some(location) = self.cached_location {
            return location.column;
        }
        if self.parsed.is_none() {
            return 0;
        }
        self.lexer.column()
    }

    /// Byte position one past the most recent [`next`](Self::next) event, 0-based
    pub fn position(&self) -> u64 {
        if let Some(location) = self.cached_location {
            return location.position;
        }
        if self.parsed.is_none() {
            return 0;
        }
        self.lexer.position()
    }
}

// Implementation with the next_expect convenience family
impl<R: Read> Parser<R> {
    fn expectation_error<T>(
        &self,
        expected: Event,
        actual: Option<Event>,
    ) -> Result<T, ParseError> {
        let actual = actual.map_or_else(|| "end of text".to_owned(), |e| e.to_string());
        Err(self.invalid_input(format!("expected {expected} instead of {actual}")))
    }

    /// Parses the next event, failing unless it is the expected one
    pub fn next_expect(&mut self, expected: Event) -> Result<(), ParseError> {
        let event = self.next()?;
        if event == Some(expected) {
            Ok(())
        } else {
            self.expectation_error(expected, event)
        }
    }

    /// Parses the next event, expecting the beginning of an object
    pub fn next_expect_begin_object(&mut self) -> Result<(), ParseError> {
        self.next_expect(Event::BeginObject)
    }

    /// Parses the next event, expecting the end of an object
    pub fn next_expect_end_object(&mut self) -> Result<(), ParseError> {
        self.next_expect(Event::EndObject)
    }

    /// Parses the next event, expecting the beginning of an array
    pub fn next_expect_begin_array(&mut self) -> Result<(), ParseError> {
        self.next_expect(Event::BeginArray)
    }

    /// Parses the next event, expecting the end of an array
    pub fn next_expect_end_array(&mut self) -> Result<(), ParseError> {
        self.next_expect(Event::EndArray)
    }

    /// Parses the next event, expecting a member name, and returns it
    pub fn next_expect_name(&mut self) -> Result<&str, ParseError> {
        self.next_expect(Event::Name)?;
        Ok(self.name())
    }

    /// Parses the next event, expecting a string value, and returns it
    pub fn next_expect_string(&mut self) -> Result<&str, ParseError> {
        self.next_expect(Event::String)?;
        Ok(self.value())
    }

    /// Parses the next event, expecting a number value, and converts it
    pub fn next_expect_number<T: FromLexeme>(&mut self) -> Result<T, ParseError> {
        self.next_expect(Event::Number)?;
        self.value_as()
    }

    /// Parses the next event, expecting a boolean value, and returns it
    pub fn next_expect_boolean(&mut self) -> Result<bool, ParseError> {
        self.next_expect(Event::Boolean)?;
        self.value_as()
    }

    /// Parses the next event, expecting a null value
    pub fn next_expect_null(&mut self) -> Result<(), ParseError> {
        self.next_expect(Event::Null)
    }
}

/// Sealed trait for types a JSON value lexeme can be converted to
///
/// Implemented for all primitive integer types (lossless conversion), for
/// `f32`/`f64` and for `bool`. Used by [`Parser::value_as`].
pub trait FromLexeme: Sized + private::Sealed {
    /// Type name used in conversion error messages
    const TYPE_NAME: &'static str;

    /// Converts a value lexeme, returning `None` if the conversion would be
    /// lossy or the lexeme does not have the right form
    fn from_lexeme(lexeme: &str) -> Option<Self>;
}

mod private {
    use duplicate::duplicate_item;

    pub trait Sealed {}

    #[duplicate_item(type_template; [u8]; [i8]; [u16]; [i16]; [u32]; [i32]; [u64]; [i64]; [u128]; [i128]; [usize]; [isize]; [f32]; [f64]; [bool])]
    impl Sealed for type_template {}
}

/// Parses an integer lexeme losslessly
///
/// Fraction and exponent forms are accepted as long as they scale to an
/// integer without remainder, e.g. `1.2e2` is 120 while `1.2` and `1e-2`
/// are rejected. Overflowing values are rejected.
fn parse_integer_lexeme<T: TryFrom<u128> + TryFrom<i128>>(lexeme: &str) -> Option<T> {
    let bytes = lexeme.as_bytes();
    let mut index = 0;

    let negative = bytes.first() == Some(&b'-');
    if negative {
        index += 1;
    }

    // Integer and fraction digits, with the decimal point removed
    let mut digits = Vec::with_capacity(bytes.len());
    let mut fraction_len = 0_i64;
    while index < bytes.len() && bytes[index].is_ascii_digit() {
        digits.push(bytes[index]);
        index += 1;
    }
    if digits.is_empty() {
        return None;
    }
    if index < bytes.len() && bytes[index] == b'.' {
        index += 1;
        let fraction_start = index;
        while index < bytes.len() && bytes[index].is_ascii_digit() {
            digits.push(bytes[index]);
            index += 1;
        }
        if index == fraction_start {
            return None;
        }
        fraction_len = (index - fraction_start) as i64;
    }

    let mut exponent = 0_i64;
    if index < bytes.len() && (bytes[index] == b'e' || bytes[index] == b'E') {
        index += 1;
        let exponent_negative = match bytes.get(index) {
            Some(b'-') => {
                index += 1;
                true
            }
            Some(b'+') => {
                index += 1;
                false
            }
            _ => false,
        };
        let exponent_start = index;
        while index < bytes.len() && bytes[index].is_ascii_digit() {
            // Saturate; the magnitude checks below reject absurd exponents anyway
            exponent = (exponent * 10 + i64::from(bytes[index] - b'0')).min(1_000_000);
            index += 1;
        }
        if index == exponent_start {
            return None;
        }
        if exponent_negative {
            exponent = -exponent;
        }
    }

    if index != bytes.len() {
        return None;
    }

    // Number of zeros to append to (positive) or strip from (negative) the digits
    let scale = exponent - fraction_len;

    let mut end = digits.len();
    if scale < 0 {
        // The stripped digits must all be zero, otherwise the value is fractional
        let stripped = ((-scale) as usize).min(digits.len());
        end = digits.len() - stripped;
        if digits[end..].iter().any(|&d| d != b'0') {
            return None;
        }
    }

    let mut magnitude = 0_u128;
    for &digit in &digits[..end] {
        magnitude = magnitude
            .checked_mul(10)?
            .checked_add(u128::from(digit - b'0'))?;
    }
    if scale > 0 {
        // u128::MAX has 39 digits; a larger scale can only overflow
        if scale > 39 && magnitude != 0 {
            return None;
        }
        for _ in 0..scale.min(40) {
            magnitude = magnitude.checked_mul(10)?;
            if magnitude == 0 {
                break;
            }
        }
    }

    if negative {
        let signed = if magnitude <= i128::MAX as u128 {
            -(magnitude as i128)
        } else if magnitude == i128::MAX as u128 + 1 {
            i128::MIN
        } else {
            return None;
        };
        T::try_from(signed).ok()
    } else {
        T::try_from(magnitude).ok()
    }
}

#[duplicate_item(type_template; [u8]; [i8]; [u16]; [i16]; [u32]; [i32]; [u64]; [i64]; [u128]; [i128]; [usize]; [isize])]
impl FromLexeme for type_template {
    const TYPE_NAME: &'static str = stringify!(type_template);

    fn from_lexeme(lexeme: &str) -> Option<Self> {
        parse_integer_lexeme(lexeme)
    }
}

#[duplicate_item(type_template; [f32]; [f64])]
impl FromLexeme for type_template {
    const TYPE_NAME: &'static str = stringify!(type_template);

    fn from_lexeme(lexeme: &str) -> Option<Self> {
        // The lexer has already enforced the JSON number grammar, which is a
        // subset of what Rust's float parsing accepts
        lexeme.parse().ok()
    }
}

impl FromLexeme for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}
