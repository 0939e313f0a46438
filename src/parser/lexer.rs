//! Low-level JSON tokenizer
//!
//! [`Lexer`] drives the RFC 8259 lexical grammar over a byte source and
//! emits [`Token`]s together with their decoded lexemes. It knows about the
//! structural nesting of objects and arrays (it has to, in order to demand
//! colons and commas in the right places) but it does not distinguish member
//! names from string values; that classification is performed by the
//! [`Parser`](super::Parser) based on the [context](Lexer::context).

use std::io::{ErrorKind, Read};

use thiserror::Error;

use crate::json_number::{consume_json_number, NumberBytesProvider};
use crate::utf8;

type IoError = std::io::Error;

const READER_BUF_SIZE: usize = 1024;
const INITIAL_LEXEME_CAPACITY: usize = 128;

/// Maximum nesting depth of arrays and objects
pub const MAX_NESTING_DEPTH: usize = 2048;

/// A raw token of the JSON grammar
///
/// String tokens cover both member names and string values; the two are
/// distinguished by the parser. [`Token::Done`] marks the end of a top-level
/// value (in streaming mode) or the end of the input.
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
#[strum(serialize_all = "snake_case")]
pub enum Token {
    /// End of the current value, respectively end of the input
    Done,
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// Member name or string value; the decoded text is in [`Lexer::lexeme`]
    String,
    /// Number value; the digits as seen are in [`Lexer::lexeme`]
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
}

/// Kind of an open structured value
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Container {
    /// A JSON array
    Array,
    /// A JSON object
    Object,
}

/// A position in the input text
///
/// Line and column are 1-based; the byte position is 0-based and points one
/// byte past the most recently consumed byte. Columns advance once per
/// decoded character, so a multi-byte UTF-8 character counts as one column.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct Location {
    /// Line number, 1-based
    pub line: u64,
    /// Column of the most recently consumed character within the line, 1-based
    pub column: u64,
    /// Byte position one past the most recently consumed byte, 0-based
    pub position: u64,
}

/// Error emitted by the lexer
///
/// For syntax errors the location points one byte past the character at
/// fault. The lexer (and any parser on top of it) must not be used after an
/// error was returned.
#[derive(Error, Debug)]
pub enum LexError {
    /// The input is not valid JSON
    #[error("{description}")]
    Syntax {
        /// Location of the error
        location: Location,
        /// Why the input is not valid JSON
        description: String,
    },
    /// Reading from the underlying byte source failed
    #[error("unable to read JSON input text")]
    Io {
        /// Rough location at which the source failed
        location: Location,
        /// The error reported by the source
        #[source]
        source: IoError,
    },
}

struct Frame {
    kind: Container,
    /// Number of tokens emitted inside this frame; inside objects an odd
    /// count means a member name was just emitted
    count: u32,
}

/// A tokenizer which consumes JSON text from a [`Read`]
///
/// The lexer buffers data internally, so it is normally not necessary to
/// wrap the provided reader in a [`std::io::BufReader`]. If the reader
/// returns an error of kind [`ErrorKind::Interrupted`] the lexer retries
/// the read.
///
/// In streaming mode (see [`new_streaming`](Self::new_streaming)) the lexer
/// emits [`Token::Done`] after each balanced top-level value *without*
/// consuming the following whitespace, and [`reset`](Self::reset) re-arms it
/// for the next value. Otherwise exactly one top-level value is expected and
/// trailing data other than whitespace is an error.
pub struct Lexer<R: Read> {
    reader: R,
    /// Buffer containing some bytes read from [`reader`](Self::reader)
    buf: [u8; READER_BUF_SIZE],
    /// Start index (inclusive) at which data in [`buf`](Self::buf) starts
    buf_pos: usize,
    /// Index (exclusive) up to which [`buf`](Self::buf) is filled
    buf_end_pos: usize,
    reached_eof: bool,

    /// Decoded lexeme of the most recent value token; reused between tokens
    lexeme: String,

    stack: Vec<Frame>,
    streaming: bool,
    /// A top-level value is balanced; the next token is `Done`
    value_complete: bool,
    /// `Done` was emitted; sticky until [`reset`](Self::reset)
    done: bool,

    line: u64,
    column: u64,
    position: u64,
}

impl<R: Read> Lexer<R> {
    /// Creates a lexer expecting a single top-level value
    pub fn new(reader: R) -> Self {
        Self::create(reader, false)
    }

    /// Creates a lexer in streaming mode, expecting zero or more top-level values
    pub fn new_streaming(reader: R) -> Self {
        Self::create(reader, true)
    }

    fn create(reader: R, streaming: bool) -> Self {
        Self {
            reader,
            buf: [0; READER_BUF_SIZE],
            buf_pos: 0,
            buf_end_pos: 0,
            reached_eof: false,
            lexeme: String::with_capacity(INITIAL_LEXEME_CAPACITY),
            stack: Vec::with_capacity(16),
            streaming,
            value_complete: false,
            done: false,
            line: 1,
            column: 0,
            position: 0,
        }
    }

    /// The decoded lexeme of the most recent `String`, `Number`, `True`,
    /// `False` or `Null` token
    ///
    /// For strings, escape sequences have already been resolved. The backing
    /// storage is reused by the next advance.
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Mutable access to the lexeme storage
    ///
    /// The caller may move the string out, but the storage is reused by the
    /// next advance.
    pub fn lexeme_mut(&mut self) -> &mut String {
        &mut self.lexeme
    }

    /// The current location in the input text
    pub fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
            position: self.position,
        }
    }

    /// Line of the most recently consumed character, 1-based
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Column of the most recently consumed character, 1-based
    pub fn column(&self) -> u64 {
        self.column
    }

    /// Byte position one past the most recently consumed byte, 0-based
    pub fn position(&self) -> u64 {
        self.position
    }

    /// The innermost open container and the number of tokens emitted inside it
    pub fn context(&self) -> Option<(Container, u32)> {
        self.stack.last().map(|f| (f.kind, f.count))
    }

    /// Re-arms a streaming-mode lexer after `Done` to lex the next top-level value
    ///
    /// # Panics
    /// Panics when called while a value is still being lexed. This indicates
    /// incorrect usage and is unrelated to the JSON data.
    pub fn reset(&mut self) {
        if !self.stack.is_empty() {
            panic!("Incorrect lexer usage: Cannot reset while a value is incomplete");
        }
        self.value_complete = false;
        self.done = false;
    }
}

// Implementation with low level byte reading methods
impl<R: Read> Lexer<R> {
    fn fill_buffer(&mut self) -> Result<bool, LexError> {
        if self.reached_eof {
            return Ok(false);
        }
        debug_assert!(self.buf_pos >= self.buf_end_pos);

        self.buf_pos = 0;
        loop {
            let read_bytes_count = match self.reader.read(&mut self.buf) {
                Ok(read_bytes_count) => read_bytes_count,
                // Retry if interrupted
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(LexError::Io {
                        location: self.location(),
                        source: e,
                    })
                }
            };
            self.buf_end_pos = read_bytes_count;
            break;
        }
        if self.buf_end_pos == 0 {
            self.reached_eof = true;
            Ok(false)
        } else {
            Ok(true)
        }
    }

    /// Peeks at the next byte without consuming it
    ///
    /// Returns `None` if the end of the input has been reached.
    fn peek_byte(&mut self) -> Result<Option<u8>, LexError> {
        if self.buf_pos < self.buf_end_pos {
            return Ok(Some(self.buf[self.buf_pos]));
        }
        if self.fill_buffer()? {
            Ok(Some(self.buf[self.buf_pos]))
        } else {
            Ok(None)
        }
    }

    /// Consumes the byte last returned by [`peek_byte`](Self::peek_byte),
    /// updating the location counters
    fn skip_peeked_byte(&mut self, byte: u8) {
        debug_assert!(self.buf_pos < self.buf_end_pos);
        self.buf_pos += 1;
        self.position += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 0;
        } else if !utf8::is_continuation(byte) {
            // Continuation bytes do not advance the column, so a multi-byte
            // UTF-8 character counts as a single column
            self.column += 1;
        }
    }

    /// Reads the next byte, failing with `description` if the end of the
    /// input has been reached
    fn read_byte(&mut self, description: &str) -> Result<u8, LexError> {
        if let Some(b) = self.peek_byte()? {
            self.skip_peeked_byte(b);
            Ok(b)
        } else {
            Err(self.syntax_error(description))
        }
    }

    /// Peeks at the next byte for the parser's inter-value separator scanning
    pub(crate) fn source_peek(&mut self) -> Result<Option<u8>, LexError> {
        self.peek_byte()
    }

    /// Consumes the next byte for the parser's inter-value separator scanning
    pub(crate) fn source_get(&mut self) -> Result<Option<u8>, LexError> {
        let b = self.peek_byte()?;
        if let Some(b) = b {
            self.skip_peeked_byte(b);
        }
        Ok(b)
    }

    fn syntax_error(&self, description: impl Into<String>) -> LexError {
        LexError::Syntax {
            location: self.location(),
            description: description.into(),
        }
    }

    /// Creates an "unexpected character" error, consuming the peeked byte
    /// first so the reported location points one byte past it
    fn unexpected_character(&mut self, byte: u8) -> LexError {
        self.skip_peeked_byte(byte);
        if byte.is_ascii_graphic() {
            self.syntax_error(format!("unexpected character '{}'", byte as char))
        } else {
            self.syntax_error(format!("unexpected byte 0x{byte:02X}"))
        }
    }
}

// Implementation with whitespace and token dispatch logic
impl<R: Read> Lexer<R> {
    fn skip_whitespace(&mut self) -> Result<Option<u8>, LexError> {
        while let Some(byte) = self.peek_byte()? {
            match byte {
                b' ' | b'\t' | b'\n' | b'\r' => self.skip_peeked_byte(byte),
                _ => return Ok(Some(byte)),
            }
        }
        Ok(None)
    }

    fn skip_whitespace_no_eof(&mut self) -> Result<u8, LexError> {
        self.skip_whitespace()?
            .ok_or_else(|| self.syntax_error("unexpected end of text"))
    }

    /// Advances to the next token
    ///
    /// After an `Err` the lexer must not be used any further.
    pub fn next(&mut self) -> Result<Token, LexError> {
        if self.done {
            return Ok(Token::Done);
        }
        if self.value_complete {
            if !self.streaming {
                // A single top-level value is expected; only whitespace may follow
                if let Some(byte) = self.skip_whitespace()? {
                    return Err(self.unexpected_trailing_data(byte));
                }
            }
            self.done = true;
            return Ok(Token::Done);
        }

        if self.stack.is_empty() {
            // Start of a top-level value
            let byte = match self.skip_whitespace()? {
                Some(byte) => byte,
                None => {
                    if self.streaming {
                        self.done = true;
                        return Ok(Token::Done);
                    }
                    return Err(self.syntax_error("unexpected end of text"));
                }
            };
            return self.lex_value(byte);
        }

        let byte = self.skip_whitespace_no_eof()?;
        let (kind, count) = {
            let frame = self.stack.last().unwrap();
            (frame.kind, frame.count)
        };

        match kind {
            Container::Object => {
                if count % 2 == 1 {
                    // A member name was emitted; expect the colon and the value
                    if byte != b':' {
                        return Err(self.unexpected_character(byte));
                    }
                    self.skip_peeked_byte(byte);
                    let byte = self.skip_whitespace_no_eof()?;
                    self.lex_value(byte)
                } else if count == 0 {
                    // First member name or end of object
                    match byte {
                        b'}' => self.end_container(byte, Token::EndObject),
                        b'"' => self.lex_string(byte),
                        _ => Err(self.unexpected_character(byte)),
                    }
                } else {
                    // Further member (after a comma) or end of object
                    match byte {
                        b'}' => self.end_container(byte, Token::EndObject),
                        b',' => {
                            self.skip_peeked_byte(byte);
                            let byte = self.skip_whitespace_no_eof()?;
                            if byte != b'"' {
                                return Err(self.unexpected_character(byte));
                            }
                            self.lex_string(byte)
                        }
                        _ => Err(self.unexpected_character(byte)),
                    }
                }
            }
            Container::Array => {
                if count == 0 {
                    match byte {
                        b']' => self.end_container(byte, Token::EndArray),
                        _ => self.lex_value(byte),
                    }
                } else {
                    match byte {
                        b']' => self.end_container(byte, Token::EndArray),
                        b',' => {
                            self.skip_peeked_byte(byte);
                            let byte = self.skip_whitespace_no_eof()?;
                            self.lex_value(byte)
                        }
                        _ => Err(self.unexpected_character(byte)),
                    }
                }
            }
        }
    }

    fn unexpected_trailing_data(&mut self, byte: u8) -> LexError {
        self.skip_peeked_byte(byte);
        self.syntax_error("expected end of text")
    }

    /// Counts an emitted token towards the enclosing frame and marks the
    /// top-level value complete when the stack is empty
    fn on_token(&mut self) {
        match self.stack.last_mut() {
            Some(frame) => frame.count += 1,
            None => self.value_complete = true,
        }
    }

    fn begin_container(&mut self, byte: u8, kind: Container, token: Token) -> Result<Token, LexError> {
        self.skip_peeked_byte(byte);
        if self.stack.len() >= MAX_NESTING_DEPTH {
            return Err(self.syntax_error("maximum nesting depth exceeded"));
        }
        if let Some(frame) = self.stack.last_mut() {
            frame.count += 1;
        }
        self.stack.push(Frame { kind, count: 0 });
        Ok(token)
    }

    fn end_container(&mut self, byte: u8, token: Token) -> Result<Token, LexError> {
        self.skip_peeked_byte(byte);
        self.stack.pop();
        if self.stack.is_empty() {
            self.value_complete = true;
        }
        Ok(token)
    }

    fn lex_value(&mut self, byte: u8) -> Result<Token, LexError> {
        match byte {
            b'{' => self.begin_container(byte, Container::Object, Token::BeginObject),
            b'[' => self.begin_container(byte, Container::Array, Token::BeginArray),
            b'"' => self.lex_string(byte),
            b'-' | b'0'..=b'9' => self.lex_number(byte),
            b't' => self.lex_literal("true", Token::True),
            b'f' => self.lex_literal("false", Token::False),
            b'n' => self.lex_literal("null", Token::Null),
            _ => Err(self.unexpected_character(byte)),
        }
    }
}

// Implementation with literal lexing logic
impl<R: Read> Lexer<R> {
    fn lex_literal(&mut self, literal: &'static str, token: Token) -> Result<Token, LexError> {
        for expected_byte in literal.bytes() {
            let byte = self.read_byte("invalid literal")?;
            if byte != expected_byte {
                return Err(self.syntax_error("invalid literal"));
            }
        }

        // Make sure there are no misleading chars directly afterwards, e.g. "truey"
        if let Some(byte) = self.peek_byte()? {
            self.verify_value_separator(byte, "invalid literal")?;
        }

        self.lexeme.clear();
        self.lexeme.push_str(literal);
        self.on_token();
        Ok(token)
    }

    /// Verifies that the byte directly following a literal or number cannot
    /// be misread as part of it
    fn verify_value_separator(&mut self, byte: u8, description: &str) -> Result<(), LexError> {
        match byte {
            b',' | b']' | b'}' | b' ' | b'\t' | b'\n' | b'\r' => Ok(()),
            _ => {
                self.skip_peeked_byte(byte);
                Err(self.syntax_error(description))
            }
        }
    }
}

/// Adapter which lets [`consume_json_number`] drive the lexer, appending
/// the consumed digits to the lexeme
struct LexerNumberBytesProvider<'l, R: Read> {
    lexer: &'l mut Lexer<R>,
    current: u8,
}

impl<R: Read> NumberBytesProvider<LexError> for LexerNumberBytesProvider<'_, R> {
    fn consume_current_peek_next(&mut self) -> Result<Option<u8>, LexError> {
        self.lexer.skip_peeked_byte(self.current);
        self.lexer.lexeme.push(self.current as char);
        let next = self.lexer.peek_byte()?;
        if let Some(b) = next {
            self.current = b;
        }
        Ok(next)
    }
}

// Implementation with number lexing logic
impl<R: Read> Lexer<R> {
    fn lex_number(&mut self, first_byte: u8) -> Result<Token, LexError> {
        self.lexeme.clear();

        let mut provider = LexerNumberBytesProvider {
            lexer: self,
            current: first_byte,
        };
        let is_valid = consume_json_number(&mut provider, first_byte)?;

        if !is_valid {
            // Consume the offending byte (if any) so the error points past it
            if let Some(byte) = self.peek_byte()? {
                self.skip_peeked_byte(byte);
            }
            return Err(self.syntax_error("invalid number"));
        }

        // Numbers have no terminator of their own; make sure the following
        // byte cannot be misread as trailing number data, e.g. "123a"
        if let Some(byte) = self.peek_byte()? {
            self.verify_value_separator(byte, "invalid number")?;
        }

        self.on_token();
        Ok(Token::Number)
    }
}

// Implementation with string lexing logic
impl<R: Read> Lexer<R> {
    fn lex_string(&mut self, opening_quote: u8) -> Result<Token, LexError> {
        debug_assert!(opening_quote == b'"');
        self.skip_peeked_byte(opening_quote);
        self.lexeme.clear();

        loop {
            let byte = self.read_byte("unterminated string")?;
            match byte {
                b'"' => break,
                b'\\' => {
                    let c = self.read_escape_sequence()?;
                    self.lexeme.push(c);
                }
                0x00..=0x1F => {
                    return Err(self.syntax_error("unescaped control character in string"));
                }
                _ if utf8::is_1byte(byte) => self.lexeme.push(byte as char),
                _ => self.read_utf8_multibyte(byte)?,
            }
        }

        self.on_token();
        Ok(Token::String)
    }

    /// Reads the remainder of a UTF-8 multi-byte sequence whose lead byte has
    /// already been consumed, validates it and appends it to the lexeme
    fn read_utf8_multibyte(&mut self, lead: u8) -> Result<(), LexError> {
        let len = match utf8::sequence_len(lead) {
            Some(len) if len > 1 => len,
            _ => return Err(self.syntax_error("invalid UTF-8 sequence")),
        };

        let mut bytes = [0_u8; utf8::MAX_BYTES_PER_CHAR];
        bytes[0] = lead;
        for i in 1..len {
            let byte = self.read_byte("invalid UTF-8 sequence")?;
            let valid = if i == 1 {
                utf8::is_valid_second_byte(lead, byte)
            } else {
                utf8::is_continuation(byte)
            };
            if !valid {
                return Err(self.syntax_error("invalid UTF-8 sequence"));
            }
            bytes[i] = byte;
        }

        self.lexeme.push_str(utf8::to_str_unchecked(&bytes[..len]));
        Ok(())
    }

    /// Reads an escape sequence; the `\` has already been consumed
    fn read_escape_sequence(&mut self) -> Result<char, LexError> {
        let byte = self.read_byte("invalid escape sequence")?;
        Ok(match byte {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => self.read_unicode_escape_char()?,
            _ => return Err(self.syntax_error("invalid escape sequence")),
        })
    }

    fn read_unicode_escape(&mut self) -> Result<u32, LexError> {
        let mut value = 0_u32;
        for _ in 0..4 {
            let digit = match self.read_byte("invalid Unicode escape sequence")? {
                b @ b'0'..=b'9' => u32::from(b - b'0'),
                b @ b'a'..=b'f' => u32::from(b - b'a' + 10),
                b @ b'A'..=b'F' => u32::from(b - b'A' + 10),
                _ => return Err(self.syntax_error("invalid Unicode escape sequence")),
            };
            value = value << 4 | digit;
        }
        Ok(value)
    }

    /// Reads a Unicode-escaped char; the initial `\u` has already been consumed
    ///
    /// A high surrogate must be followed by a second escape sequence with the
    /// low surrogate; the pair is combined into a single code point.
    fn read_unicode_escape_char(&mut self) -> Result<char, LexError> {
        let c = self.read_unicode_escape()?;

        // Unpaired low surrogate
        if (0xDC00..=0xDFFF).contains(&c) {
            return Err(self.syntax_error("unpaired surrogate in Unicode escape sequence"));
        }

        let c = if (0xD800..=0xDBFF).contains(&c) {
            // High surrogate; expect the Unicode-escaped low surrogate
            if self.read_byte("unpaired surrogate in Unicode escape sequence")? != b'\\'
                || self.read_byte("unpaired surrogate in Unicode escape sequence")? != b'u'
            {
                return Err(self.syntax_error("unpaired surrogate in Unicode escape sequence"));
            }
            let c2 = self.read_unicode_escape()?;
            if !(0xDC00..=0xDFFF).contains(&c2) {
                return Err(self.syntax_error("unpaired surrogate in Unicode escape sequence"));
            }
            ((c - 0xD800) << 10 | (c2 - 0xDC00)) + 0x10000
        } else {
            c
        };

        // The checks above made sure this is a valid Rust `char`
        Ok(char::from_u32(c).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn collect_tokens(json: &str) -> Result<Vec<(Token, String)>, LexError> {
        let mut lexer = Lexer::new(json.as_bytes());
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next()?;
            if token == Token::Done {
                return Ok(tokens);
            }
            tokens.push((token, lexer.lexeme().to_owned()));
        }
    }

    fn assert_syntax_error_bytes(json: &[u8], expected_description: &str) {
        let mut lexer = Lexer::new(json);
        loop {
            match lexer.next() {
                Ok(Token::Done) => panic!("Should have failed for: {json:02X?}"),
                Ok(_) => continue,
                Err(LexError::Syntax { description, .. }) => {
                    assert_eq!(expected_description, description, "for input: {json:02X?}");
                    return;
                }
                Err(e) => panic!("Unexpected error for {json:02X?}: {e:?}"),
            }
        }
    }

    fn assert_syntax_error(json: &str, expected_description: &str) {
        assert_syntax_error_bytes(json.as_bytes(), expected_description)
    }

    #[test]
    fn tokens() -> TestResult {
        assert_eq!(
            vec![
                (Token::BeginObject, String::new()),
                (Token::String, "a".to_owned()),
                (Token::BeginArray, "a".to_owned()),
                (Token::Number, "1".to_owned()),
                (Token::True, "true".to_owned()),
                (Token::False, "false".to_owned()),
                (Token::Null, "null".to_owned()),
                (Token::EndArray, "null".to_owned()),
                (Token::EndObject, "null".to_owned()),
            ],
            collect_tokens(r#"{"a": [1, true, false, null]}"#)?
        );
        Ok(())
    }

    #[test]
    fn done_is_sticky() -> TestResult {
        let mut lexer = Lexer::new("1".as_bytes());
        assert_eq!(Token::Number, lexer.next()?);
        assert_eq!(Token::Done, lexer.next()?);
        assert_eq!(Token::Done, lexer.next()?);
        Ok(())
    }

    #[test]
    fn string_escapes() -> TestResult {
        let tokens = collect_tokens(r#""a\"b\\c\/d\b\f\n\r\t""#)?;
        assert_eq!(
            vec![(Token::String, "a\"b\\c/d\u{0008}\u{000C}\n\r\t".to_owned())],
            tokens
        );

        let tokens = collect_tokens(r#""Aé€😀""#)?;
        assert_eq!(vec![(Token::String, "Aé€😀".to_owned())], tokens);
        Ok(())
    }

    #[test]
    fn string_raw_utf8() -> TestResult {
        let tokens = collect_tokens("\"é€😀\"")?;
        assert_eq!(vec![(Token::String, "é€😀".to_owned())], tokens);
        Ok(())
    }

    #[test]
    fn string_errors() {
        assert_syntax_error("\"a", "unterminated string");
        assert_syntax_error("\"\x01\"", "unescaped control character in string");
        assert_syntax_error(r#""\x""#, "invalid escape sequence");
        assert_syntax_error(r#""\u00G0""#, "invalid Unicode escape sequence");
        assert_syntax_error(r#""\uDC00""#, "unpaired surrogate in Unicode escape sequence");
        assert_syntax_error(r#""\uD800x""#, "unpaired surrogate in Unicode escape sequence");
        assert_syntax_error(r#""\uD800A""#, "unpaired surrogate in Unicode escape sequence");

        // Stray continuation byte; truncated sequence; overlong encoding;
        // surrogate encoded in UTF-8
        assert_syntax_error_bytes(b"\"\x80\"", "invalid UTF-8 sequence");
        assert_syntax_error_bytes(b"\"\xC3\"", "invalid UTF-8 sequence");
        assert_syntax_error_bytes(b"\"\xC0\xB0\"", "invalid UTF-8 sequence");
        assert_syntax_error_bytes(b"\"\xE0\x9F\x80\"", "invalid UTF-8 sequence");
        assert_syntax_error_bytes(b"\"\xED\xA0\x80\"", "invalid UTF-8 sequence");
        assert_syntax_error_bytes(b"\"\xF4\x90\x80\x80\"", "invalid UTF-8 sequence");
    }

    #[test]
    fn numbers() -> TestResult {
        for number in ["0", "-0", "123", "-123", "12.30", "1e5", "1.2e-5", "0.1E+2"] {
            assert_eq!(
                vec![(Token::Number, number.to_owned())],
                collect_tokens(number)?,
                "for input: {number}"
            );
        }

        for invalid in ["01", "-", "1.", ".5", "1e", "1e+", "--1", "1.2.3", "123a", "+1"] {
            // "+1" fails with "unexpected character", the others with "invalid number"
            let mut lexer = Lexer::new(invalid.as_bytes());
            assert!(lexer.next().is_err(), "Should have failed for: {invalid}");
        }
        Ok(())
    }

    #[test]
    fn literal_errors() {
        assert_syntax_error("truE", "invalid literal");
        assert_syntax_error("tru", "invalid literal");
        assert_syntax_error("truey", "invalid literal");
        assert_syntax_error("nul", "invalid literal");
    }

    #[test]
    fn structure_errors() {
        assert_syntax_error("", "unexpected end of text");
        assert_syntax_error("[1 2]", "unexpected character '2'");
        assert_syntax_error("[1,]", "unexpected character ']'");
        assert_syntax_error(r#"{"a" 1}"#, "unexpected character '1'");
        assert_syntax_error(r#"{"a":1,}"#, "unexpected character '}'");
        assert_syntax_error(r#"{1: 2}"#, "unexpected character '1'");
        assert_syntax_error("[}", "unexpected character '}'");
        assert_syntax_error("{]", "unexpected character ']'");
        assert_syntax_error("[1", "unexpected end of text");
        assert_syntax_error("1 2", "expected end of text");
    }

    #[test]
    fn locations() -> TestResult {
        let mut lexer = Lexer::new("[1,\n 22]".as_bytes());
        assert_eq!(Token::BeginArray, lexer.next()?);
        assert_eq!((1, 1, 1), (lexer.line(), lexer.column(), lexer.position()));
        assert_eq!(Token::Number, lexer.next()?);
        assert_eq!((1, 2, 2), (lexer.line(), lexer.column(), lexer.position()));
        assert_eq!(Token::Number, lexer.next()?);
        // "22" ends at line 2, column 3, byte position 7
        assert_eq!((2, 3, 7), (lexer.line(), lexer.column(), lexer.position()));
        assert_eq!(Token::EndArray, lexer.next()?);
        assert_eq!((2, 4, 8), (lexer.line(), lexer.column(), lexer.position()));
        Ok(())
    }

    #[test]
    fn location_counts_chars_not_bytes() -> TestResult {
        // '€' is 3 UTF-8 bytes but one column
        let mut lexer = Lexer::new("\"€\"".as_bytes());
        assert_eq!(Token::String, lexer.next()?);
        assert_eq!(3, lexer.column());
        assert_eq!(5, lexer.position());
        Ok(())
    }

    #[test]
    fn error_location() {
        let mut lexer = Lexer::new("[1, x]".as_bytes());
        lexer.next().unwrap();
        lexer.next().unwrap();
        match lexer.next() {
            Err(LexError::Syntax { location, description }) => {
                assert_eq!("unexpected character 'x'", description);
                // One byte past the 'x'
                assert_eq!(5, location.position);
                assert_eq!(5, location.column);
                assert_eq!(1, location.line);
            }
            r => panic!("Unexpected result: {r:?}"),
        }
    }

    #[test]
    fn nesting_depth() -> TestResult {
        let json = "[".repeat(MAX_NESTING_DEPTH) + &"]".repeat(MAX_NESTING_DEPTH);
        let mut lexer = Lexer::new(json.as_bytes());
        loop {
            if lexer.next()? == Token::Done {
                break;
            }
        }

        let json = "[".repeat(MAX_NESTING_DEPTH + 1);
        let mut lexer = Lexer::new(json.as_bytes());
        let result = loop {
            match lexer.next() {
                Ok(_) => continue,
                Err(e) => break e,
            }
        };
        assert_eq!("maximum nesting depth exceeded", result.to_string());
        Ok(())
    }

    #[test]
    fn streaming_reset() -> TestResult {
        let mut lexer = Lexer::new_streaming("1 2".as_bytes());
        assert_eq!(Token::Number, lexer.next()?);
        assert_eq!("1", lexer.lexeme());
        assert_eq!(Token::Done, lexer.next()?);

        // The lexer has not consumed the separating whitespace
        assert_eq!(Some(b' '), lexer.source_peek().unwrap());
        assert_eq!(Some(b' '), lexer.source_get().unwrap());

        lexer.reset();
        assert_eq!(Token::Number, lexer.next()?);
        assert_eq!("2", lexer.lexeme());
        assert_eq!(Token::Done, lexer.next()?);

        lexer.reset();
        // End of input: streaming mode reports done instead of an error
        assert_eq!(Token::Done, lexer.next()?);
        Ok(())
    }

    #[test]
    fn streaming_empty_input() -> TestResult {
        let mut lexer = Lexer::new_streaming("  ".as_bytes());
        assert_eq!(Token::Done, lexer.next()?);
        Ok(())
    }

    #[test]
    fn io_error() {
        struct FailingRead;
        impl Read for FailingRead {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(IoError::new(ErrorKind::Other, "test error"))
            }
        }

        let mut lexer = Lexer::new(FailingRead);
        match lexer.next() {
            Err(LexError::Io { source, .. }) => {
                assert_eq!("test error", source.to_string());
            }
            r => panic!("Unexpected result: {r:?}"),
        }
    }
}
