//! Module for serializing a stream of events to JSON text
//!
//! [`Serializer`] is a push serializer: events are fed to
//! [`next`](Serializer::next) (or through the higher-level value methods)
//! and RFC 8259 conformant JSON text is written to a [`Sink`]. The
//! serializer makes sure the resulting JSON is syntactically correct, but
//! not necessarily semantically meaningful; with checking disabled it is for
//! example possible to serialize a number event with non-numeric data.
//!
//! Unlike the parser, the serializer is always in multi-value mode and
//! accepts zero or more top-level values. Values are separated with the
//! configured separator (a newline by default); there is no trailing
//! separator after the last value.
//!
//! While RFC 8259 recommends object members to have unique names, the
//! serializer does not enforce this.

mod sink;
pub use sink::*;

use duplicate::duplicate_item;
use thiserror::Error;

use crate::event::Event;
use crate::json_number::is_valid_json_number;
use crate::utf8;

/// Code classifying an [`InvalidOutput`] error
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    /// The sink could not provide enough space for the next write
    BufferOverflow,
    /// The event is not valid in the current structural state
    UnexpectedEvent,
    /// A member name is not valid UTF-8
    InvalidName,
    /// A value is malformed, or an absent event arrived at the wrong time
    InvalidValue,
}

/// Error describing why the serialized output would not be valid JSON
#[derive(Error, PartialEq, Eq, Clone, Debug)]
#[error("{description}")]
pub struct InvalidOutput {
    /// Event which triggered the error; `None` for an absent event
    pub event: Option<Event>,
    /// Classification of the error
    pub code: ErrorCode,
    /// Why the output would not be valid JSON
    pub description: String,
    /// For UTF-8 validation errors, the byte index of the first invalid byte
    /// within the value
    pub offset: Option<usize>,
}

/// Error which occurred while serializing
///
/// All errors are fatal: after an error was returned the serializer must not
/// be used any further.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SerializeError {
    /// The event stream or a value is invalid, or the output buffer is full
    #[error("invalid JSON output: {0}")]
    Invalid(#[from] InvalidOutput),
    /// Writing to the underlying stream failed
    #[error("unable to write JSON output text")]
    Io(#[from] std::io::Error),
}

fn invalid_output(
    event: Option<Event>,
    code: ErrorCode,
    description: impl Into<String>,
) -> SerializeError {
    SerializeError::Invalid(InvalidOutput {
        event,
        code,
        description: description.into(),
        offset: None,
    })
}

/// Settings to customize the serializer behavior
///
/// These settings are used by [`Serializer::new_custom`]. To avoid repeating
/// the default values for unchanged settings `..Default::default()` can be
/// used:
/// ```
/// # use evson::serializer::SerializerSettings;
/// SerializerSettings {
///     indentation: 2,
///     // For all other settings use the default
///     ..Default::default()
/// }
/// # ;
/// ```
#[derive(Clone, Debug)]
pub struct SerializerSettings {
    /// Number of spaces with which to indent, once for each level of nesting
    ///
    /// If zero, pretty-printing is disabled and compact JSON is written.
    pub indentation: usize,

    /// Separator written between top-level values
    ///
    /// A newline by default. An empty string makes values adjoin (which not
    /// every parser can read back, e.g. `truefalse`); `"\u{1E}"` produces
    /// RS-delimited JSON. No separator is written after the last value.
    pub value_separator: String,
}

impl Default for SerializerSettings {
    /// Creates the default serializer settings
    ///
    /// - indentation: 0 (= compact JSON is written)
    /// - value separator: `"\n"`
    fn default() -> Self {
        SerializerSettings {
            indentation: 0,
            value_separator: "\n".to_owned(),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum StackValue {
    Array,
    Object,
}

struct Frame {
    kind: StackValue,
    /// Number of events serialized inside this frame; inside objects an odd
    /// count means a member name was just serialized
    count: u32,
}

/// Separator to place in front of the bytes of an event
///
/// The pretty-printing forms are all slices of the single backing string
/// maintained in [`Serializer::separator`], avoiding per-write allocations.
#[derive(Clone, Copy)]
enum Separator {
    None,
    /// `:` between a name and its value
    Colon,
    /// `: ` between a name and its value when pretty-printing
    ColonSpace,
    /// `,` before a subsequent element
    Comma,
    /// `,\n` + indent before a subsequent element when pretty-printing
    CommaIndent,
    /// `\n` + indent before the first element when pretty-printing
    OpenIndent,
    /// `\n` + outdent before the closing bracket when pretty-printing
    CloseIndent,
    /// The configured separator between top-level values
    TopLevel,
}

/// A push serializer producing JSON text from a stream of events
///
/// ```
/// # use evson::{Event, serializer::{Serializer, VecSink}};
/// let mut out = Vec::new();
/// let mut serializer = Serializer::new(VecSink::new(&mut out));
///
/// serializer.begin_object()?;
/// serializer.name("a")?;
/// serializer.number_value(1)?;
/// serializer.name("b")?;
/// serializer.bool_value(true)?;
/// serializer.end_object()?;
/// // Verify the value is complete
/// serializer.next(None, None, true)?;
///
/// assert_eq!(r#"{"a":1,"b":true}"#, String::from_utf8(out)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
/// All errors are fatal: after a method returned a [`SerializeError`] the
/// serializer is in an unspecified state and must not be used any further.
pub struct Serializer<S: Sink> {
    sink: S,
    /// Number of occupied bytes in the sink's buffer
    size: usize,

    /// Stack of open structured values
    stack: Vec<Frame>,
    /// Number of consecutive absent events serialized so far; initialized
    /// to 1 so that a single absent event declares an empty value sequence
    /// complete
    absent: u8,
    /// Number of complete top-level values serialized so far
    values: u64,

    indentation: usize,
    value_separator: String,
    /// `",\n"` followed by the current indent prefix; the pretty-printing
    /// separators are slices of this string
    separator: String,
}

// Implementation with public constructor methods
impl<S: Sink> Serializer<S> {
    /// Creates a serializer with [default settings](SerializerSettings::default)
    pub fn new(sink: S) -> Self {
        Serializer::new_custom(sink, SerializerSettings::default())
    }

    /// Creates a serializer with custom settings
    pub fn new_custom(sink: S, settings: SerializerSettings) -> Self {
        let size = sink.initial_size();
        Self {
            sink,
            size,
            stack: Vec::with_capacity(16),
            absent: 1,
            values: 0,
            indentation: settings.indentation,
            value_separator: settings.value_separator,
            separator: ",\n".to_owned(),
        }
    }

    /// Number of bytes currently occupied in the sink's buffer
    ///
    /// For a [`SliceSink`] this is the total length of the output text.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the underlying sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}

// Implementation with the event-driven serialization method
impl<S: Sink> Serializer<S> {
    /// Serializes the next event
    ///
    /// If `check` is false, values are trusted: member names and string
    /// values are copied verbatim without UTF-8 validation or escaping, and
    /// number and literal values are not validated. The caller is then
    /// responsible for passing valid UTF-8 without characters which would
    /// need escaping.
    ///
    /// Returns `true` if more events are required to complete the current
    /// top-level value and `false` otherwise.
    ///
    /// At the end of a value an optional absent event (`None`) can be
    /// serialized to verify the value is complete; if it is incomplete an
    /// error is returned. A followup absent event indicates the completion
    /// of the value sequence (a single absent event declares a zero-value
    /// sequence). Serializing anything to a complete sequence is an error.
    ///
    /// This method is designed to be invoked with the output of
    /// [`Parser::next`](crate::parser::Parser::next) and
    /// [`Parser::data`](crate::parser::Parser::data). For a single-value
    /// parse:
    ///
    /// ```
    /// # use evson::parser::Parser;
    /// # use evson::serializer::{Serializer, VecSink};
    /// # let mut parser = Parser::new("[1]".as_bytes(), "example");
    /// # let mut out = Vec::new();
    /// # let mut serializer = Serializer::new(VecSink::new(&mut out));
    /// loop {
    ///     let event = parser.next()?;
    ///     serializer.next(event, parser.data().map(str::as_bytes), true)?;
    ///     if event.is_none() {
    ///         break;
    ///     }
    /// }
    /// # assert_eq!("[1]", String::from_utf8(out)?);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn next(
        &mut self,
        event: Option<Event>,
        lexeme: Option<&[u8]>,
        check: bool,
    ) -> Result<bool, SerializeError> {
        if self.absent == 2 {
            return Err(invalid_output(
                event,
                ErrorCode::InvalidValue,
                "value sequence is complete",
            ));
        }

        let Some(event) = event else {
            if !self.stack.is_empty() {
                return Err(invalid_output(
                    None,
                    ErrorCode::InvalidValue,
                    "value is incomplete",
                ));
            }
            self.absent += 1;
            return Ok(false);
        };

        // Clear the inter-value absent event
        self.absent = 0;

        let frame = self.stack.last().map(|f| (f.kind, f.count));
        let name_expected =
            matches!(frame, Some((StackValue::Object, count)) if count % 2 == 0);
        let pretty = self.indentation != 0;

        // There are two separators: between a name and its value, which is
        // always ":" (or ": "), and before a value inside an object or
        // array, which is a comma and, when pretty-printing, a newline
        // followed by indentation. The latter forms are sliced out of the
        // single backing string in `self.separator`, which grows and
        // shrinks by one indent level as containers are entered and left.
        let separator = match frame {
            Some((StackValue::Object, count)) if count % 2 == 1 => {
                if pretty {
                    Separator::ColonSpace
                } else {
                    Separator::Colon
                }
            }
            // No comma when closing a container, but outdent one level prior
            // to the bracket; empty containers get no separator at all
            Some((_, count)) if matches!(event, Event::EndArray | Event::EndObject) => {
                if !pretty || count == 0 {
                    Separator::None
                } else {
                    Separator::CloseIndent
                }
            }
            // First value inside a container
            Some((_, 0)) => {
                if pretty {
                    Separator::OpenIndent
                } else {
                    Separator::None
                }
            }
            Some(_) => {
                if pretty {
                    Separator::CommaIndent
                } else {
                    Separator::Comma
                }
            }
            // Subsequent top-level value
            None if self.values != 0 => Separator::TopLevel,
            None => Separator::None,
        };

        match event {
            Event::BeginArray | Event::BeginObject => {
                if name_expected {
                    return Err(invalid_output(
                        Some(event),
                        ErrorCode::UnexpectedEvent,
                        "unexpected event",
                    ));
                }

                let bracket: &[u8] = if event == Event::BeginArray { b"[" } else { b"{" };
                self.write_value(event, separator, bracket, false, false)?;

                if let Some(f) = self.stack.last_mut() {
                    f.count += 1;
                }
                if pretty {
                    self.separator
                        .extend(std::iter::repeat(' ').take(self.indentation));
                }
                self.stack.push(Frame {
                    kind: if event == Event::BeginArray {
                        StackValue::Array
                    } else {
                        StackValue::Object
                    },
                    count: 0,
                });
            }
            Event::EndArray | Event::EndObject => {
                let valid = match frame {
                    None => false,
                    Some((kind, _)) if event == Event::EndArray => kind == StackValue::Array,
                    Some(_) => name_expected,
                };
                if !valid {
                    return Err(invalid_output(
                        Some(event),
                        ErrorCode::UnexpectedEvent,
                        "unexpected event",
                    ));
                }

                let bracket: &[u8] = if event == Event::EndArray { b"]" } else { b"}" };
                self.write_value(event, separator, bracket, false, false)?;

                if pretty {
                    let len = self.separator.len() - self.indentation;
                    self.separator.truncate(len);
                }
                self.stack.pop();
            }
            Event::Name | Event::String => {
                let valid = if event == Event::Name {
                    name_expected
                } else {
                    !name_expected
                };
                if !valid {
                    return Err(invalid_output(
                        Some(event),
                        ErrorCode::UnexpectedEvent,
                        "unexpected event",
                    ));
                }

                self.write_value(event, separator, lexeme.unwrap_or(b""), check, true)?;

                if let Some(f) = self.stack.last_mut() {
                    f.count += 1;
                }
            }
            Event::Null | Event::Boolean | Event::Number => {
                // A null event without a lexeme is materialized as "null"
                let defaulted_null = event == Event::Null && lexeme.is_none();
                let value = if defaulted_null {
                    &b"null"[..]
                } else {
                    lexeme.unwrap_or(b"")
                };

                if check && !defaulted_null {
                    match event {
                        Event::Null if value != b"null" => {
                            return Err(invalid_output(
                                Some(event),
                                ErrorCode::InvalidValue,
                                "invalid null value",
                            ));
                        }
                        Event::Boolean if value != b"true" && value != b"false" => {
                            return Err(invalid_output(
                                Some(event),
                                ErrorCode::InvalidValue,
                                "invalid boolean value",
                            ));
                        }
                        Event::Number if !is_valid_json_number(value) => {
                            return Err(invalid_output(
                                Some(event),
                                ErrorCode::InvalidValue,
                                "invalid number value",
                            ));
                        }
                        _ => {}
                    }
                }

                if name_expected {
                    return Err(invalid_output(
                        Some(event),
                        ErrorCode::UnexpectedEvent,
                        "unexpected event",
                    ));
                }

                // The value was validated above (or is trusted); it needs
                // neither escaping nor UTF-8 validation
                self.write_value(event, separator, value, false, false)?;

                if let Some(f) = self.stack.last_mut() {
                    f.count += 1;
                }
            }
        }

        if self.stack.is_empty() {
            self.values += 1;
            self.sink.flush(&mut self.size, event)?;
            return Ok(false);
        }

        Ok(true)
    }
}

// Implementation with the buffer writing logic
impl<S: Sink> Serializer<S> {
    /// Writes `separator` + `val` (quoted if requested) to the sink
    ///
    /// Guarantees that the separator, the quotes, UTF-8 sequences (up to 4
    /// bytes) and escape sequences (up to 6 bytes) are never split across an
    /// overflow call; the minimum extra space requested on overflow is 6
    /// bytes, which covers the latter two.
    fn write_value(
        &mut self,
        event: Event,
        separator: Separator,
        val: &[u8],
        check: bool,
        quote: bool,
    ) -> Result<(), SerializeError> {
        let sep: &[u8] = match separator {
            Separator::None => b"",
            Separator::Colon => b":",
            Separator::ColonSpace => b": ",
            Separator::Comma => b",",
            Separator::CommaIndent => self.separator.as_bytes(),
            Separator::OpenIndent => &self.separator.as_bytes()[1..],
            Separator::CloseIndent => {
                let bytes = self.separator.as_bytes();
                &bytes[1..bytes.len() - self.indentation]
            }
            Separator::TopLevel => self.value_separator.as_bytes(),
        };

        let mut val = val;
        // Value's original length, used to calculate the offset of the
        // errant byte in case of a validation failure
        let vn = val.len();
        // Total number of bytes remaining to be written
        let mut needed = sep.len() + val.len() + if quote { 2 } else { 0 };

        // Write the separator, if any; it is never split
        if !sep.is_empty() {
            if capacity(&mut self.sink, self.size) < sep.len()
                && !grow(&mut self.sink, &mut self.size, event, needed, sep.len(), 0)?
            {
                return Err(no_space(event));
            }
            append(&mut self.sink, &mut self.size, sep);
            needed -= sep.len();
        }

        // Write the value's opening quote, if requested
        if quote {
            if capacity(&mut self.sink, self.size) == 0
                && !grow(&mut self.sink, &mut self.size, event, needed, 1, 0)?
            {
                return Err(no_space(event));
            }
            append(&mut self.sink, &mut self.size, b"\"");
            needed -= 1;
        }

        // Write the value, unless empty
        while !val.is_empty() {
            let cap = capacity(&mut self.sink, self.size);
            if cap == 0 {
                if !grow(&mut self.sink, &mut self.size, event, needed, 6, 0)? {
                    return Err(no_space(event));
                }
                continue;
            }

            if check {
                match chunk_checked(&mut val, cap) {
                    CheckedChunk::Bytes(bytes) => {
                        append(&mut self.sink, &mut self.size, bytes);
                        needed -= bytes.len();
                    }
                    CheckedChunk::Escape(escape) => {
                        append(&mut self.sink, &mut self.size, escape.as_bytes());
                        needed -= 1;
                    }
                    CheckedChunk::NoFit { extra } => {
                        if !grow(&mut self.sink, &mut self.size, event, needed, 6, extra)? {
                            return Err(no_space(event));
                        }
                    }
                    CheckedChunk::InvalidUtf8 => {
                        let code = if event == Event::Name {
                            ErrorCode::InvalidName
                        } else {
                            ErrorCode::InvalidValue
                        };
                        return Err(SerializeError::Invalid(InvalidOutput {
                            event: Some(event),
                            code,
                            description: "invalid UTF-8 text".to_owned(),
                            offset: Some(vn - val.len()),
                        }));
                    }
                }
            } else {
                match chunk(&mut val, cap) {
                    Some(bytes) => {
                        append(&mut self.sink, &mut self.size, bytes);
                        needed -= bytes.len();
                    }
                    None => {
                        if !grow(&mut self.sink, &mut self.size, event, needed, 6, 0)? {
                            return Err(no_space(event));
                        }
                    }
                }
            }
        }

        // Write the value's closing quote, if requested
        if quote {
            if capacity(&mut self.sink, self.size) == 0
                && !grow(&mut self.sink, &mut self.size, event, needed, 1, 0)?
            {
                return Err(no_space(event));
            }
            append(&mut self.sink, &mut self.size, b"\"");
        }

        Ok(())
    }
}

fn no_space(event: Event) -> SerializeError {
    invalid_output(
        Some(event),
        ErrorCode::BufferOverflow,
        "insufficient space in buffer",
    )
}

fn capacity<S: Sink>(sink: &mut S, size: usize) -> usize {
    sink.buf().len().saturating_sub(size)
}

fn append<S: Sink>(sink: &mut S, size: &mut usize, bytes: &[u8]) {
    sink.buf()[*size..*size + bytes.len()].copy_from_slice(bytes);
    *size += bytes.len();
}

/// Asks the sink for more space; `needed + extra` bytes are requested (but
/// at least `min`). Returns whether at least `min` bytes are now free.
fn grow<S: Sink>(
    sink: &mut S,
    size: &mut usize,
    event: Event,
    needed: usize,
    min: usize,
    extra: usize,
) -> Result<bool, SerializeError> {
    let cap = capacity(sink, *size);
    let request = (needed + extra).saturating_sub(cap).max(min);
    sink.overflow(size, event, request)?;
    Ok(capacity(sink, *size) >= min)
}

// JSON escape sequences for control characters <= 0x1F
const CONTROL_ESCAPES: [&str; 32] = [
    "\\u0000", "\\u0001", "\\u0002", "\\u0003", "\\u0004", "\\u0005", "\\u0006", "\\u0007",
    "\\b", "\\t", "\\n", "\\u000B", "\\f", "\\r", "\\u000E", "\\u000F", "\\u0010", "\\u0011",
    "\\u0012", "\\u0013", "\\u0014", "\\u0015", "\\u0016", "\\u0017", "\\u0018", "\\u0019",
    "\\u001A", "\\u001B", "\\u001C", "\\u001D", "\\u001E", "\\u001F",
];

/// Returns the longest prefix of `val` which fits into `cap` bytes and does
/// not end in the middle of a multi-byte UTF-8 sequence, advancing `val`
/// past it
///
/// Returns `None` if no prefix fits. Assumes `val` is not empty and holds
/// valid UTF-8.
fn chunk<'v>(val: &mut &'v [u8], cap: usize) -> Option<&'v [u8]> {
    let end = if cap >= val.len() {
        val.len()
    } else {
        // Seek back from the first byte past the capacity to the nearest
        // UTF-8 sequence boundary
        let mut end = cap;
        while end > 0 && utf8::is_continuation(val[end]) {
            end -= 1;
        }
        end
    };

    if end == 0 {
        return None;
    }
    let (bytes, rest) = val.split_at(end);
    *val = rest;
    Some(bytes)
}

enum CheckedChunk<'v> {
    /// Bytes which fit the capacity, need no escaping and are valid UTF-8
    Bytes(&'v [u8]),
    /// Escape sequence replacing the single byte `val` was advanced past
    Escape(&'static str),
    /// Nothing fits; `extra` is the space an escape needs beyond the raw byte
    NoFit { extra: usize },
    /// `val` was advanced to the first invalid byte
    InvalidUtf8,
}

/// Escaping and UTF-8-validating version of [`chunk`]
///
/// If the input begins with a byte which must be escaped, only its escape
/// sequence is returned. Otherwise everything up to the end of the input or
/// the capacity is validated and returned, cutting short before the next
/// byte which must be escaped or the first UTF-8 sequence which would not
/// fit. Assumes `val` is not empty and `cap` is not zero.
fn chunk_checked<'v>(val: &mut &'v [u8], cap: usize) -> CheckedChunk<'v> {
    debug_assert!(!val.is_empty() && cap != 0);

    // Check whether the first byte needs to be escaped
    let first = val[0];
    let escape = match first {
        b'"' => Some("\\\""),
        b'\\' => Some("\\\\"),
        0x00..=0x1F => Some(CONTROL_ESCAPES[first as usize]),
        _ => None,
    };
    if let Some(escape) = escape {
        if escape.len() > cap {
            return CheckedChunk::NoFit {
                extra: escape.len() - 1,
            };
        }
        *val = &val[1..];
        return CheckedChunk::Escape(escape);
    }

    // The first byte does not need to be escaped; return as much of the
    // rest of the input as possible
    let mut i = 0;
    let n = cap.min(val.len());
    while i < n {
        let byte = val[i];

        if byte == b'"' || byte == b'\\' || byte <= 0x1F {
            break;
        }

        if byte >= 0x80 {
            let len = match utf8::sequence_len(byte) {
                // Stray continuation byte or invalid lead
                None => {
                    *val = &val[i..];
                    return CheckedChunk::InvalidUtf8;
                }
                Some(len) => len,
            };
            if i + len > val.len() {
                // Sequence is truncated within the value
                *val = &val[i..];
                return CheckedChunk::InvalidUtf8;
            }
            if i + len > cap {
                // Sequence would not fit; never split it
                break;
            }
            let valid = utf8::is_valid_second_byte(byte, val[i + 1])
                && (len < 3 || utf8::is_continuation(val[i + 2]))
                && (len < 4 || utf8::is_continuation(val[i + 3]));
            if !valid {
                *val = &val[i..];
                return CheckedChunk::InvalidUtf8;
            }
            i += len;
            continue;
        }

        i += 1;
    }

    if i == 0 {
        return CheckedChunk::NoFit { extra: 0 };
    }
    let (bytes, rest) = val.split_at(i);
    *val = rest;
    CheckedChunk::Bytes(bytes)
}

// Implementation with high-level value methods
impl<S: Sink> Serializer<S> {
    /// Begins serializing a JSON object
    pub fn begin_object(&mut self) -> Result<(), SerializeError> {
        self.next(Some(Event::BeginObject), None, false).map(drop)
    }

    /// Ends the current JSON object
    pub fn end_object(&mut self) -> Result<(), SerializeError> {
        self.next(Some(Event::EndObject), None, false).map(drop)
    }

    /// Begins serializing a JSON array
    pub fn begin_array(&mut self) -> Result<(), SerializeError> {
        self.next(Some(Event::BeginArray), None, false).map(drop)
    }

    /// Ends the current JSON array
    pub fn end_array(&mut self) -> Result<(), SerializeError> {
        self.next(Some(Event::EndArray), None, false).map(drop)
    }

    /// Serializes an object member name
    ///
    /// Characters are escaped as necessary.
    pub fn name(&mut self, name: &str) -> Result<(), SerializeError> {
        self.next(Some(Event::Name), Some(name.as_bytes()), true)
            .map(drop)
    }

    /// Serializes a string value
    ///
    /// Characters are escaped as necessary.
    pub fn string_value(&mut self, value: &str) -> Result<(), SerializeError> {
        self.next(Some(Event::String), Some(value.as_bytes()), true)
            .map(drop)
    }

    /// Serializes a boolean value
    pub fn bool_value(&mut self, value: bool) -> Result<(), SerializeError> {
        let lexeme: &[u8] = if value { b"true" } else { b"false" };
        self.next(Some(Event::Boolean), Some(lexeme), false)
            .map(drop)
    }

    /// Serializes a null value
    pub fn null_value(&mut self) -> Result<(), SerializeError> {
        self.next(Some(Event::Null), None, false).map(drop)
    }

    /// Serializes an integer number value
    pub fn number_value<N: FiniteNumber>(&mut self, value: N) -> Result<(), SerializeError> {
        value.use_json_number(|number| {
            self.next(Some(Event::Number), Some(number.as_bytes()), false)
                .map(drop)
        })
    }

    /// Serializes a floating-point number value
    ///
    /// The number is written in its shortest representation which parses
    /// back to the same binary value; very large and very small magnitudes
    /// use scientific notation. Non-finite values (NaN and the infinities)
    /// are not valid JSON and are rejected with an `invalid_value` error.
    pub fn fp_number_value<N: FloatingPointNumber>(
        &mut self,
        value: N,
    ) -> Result<(), SerializeError> {
        value.use_json_number(|number| {
            self.next(Some(Event::Number), Some(number.as_bytes()), false)
                .map(drop)
        })
    }

    /// Serializes the string representation of a number value
    ///
    /// Fails with an `invalid_value` error when the string is not a valid
    /// JSON number (for example `NaN`, or `+1` which RFC 8259 forbids).
    pub fn number_value_from_string(&mut self, value: &str) -> Result<(), SerializeError> {
        self.next(Some(Event::Number), Some(value.as_bytes()), true)
            .map(drop)
    }
}

/// Sealed trait for finite number types such as `u32`
///
/// Values of these types are always valid JSON numbers.
pub trait FiniteNumber: private::Sealed {
    /// Converts this number to a JSON number string
    ///
    /// The JSON number string is passed to the given `consumer`.
    fn use_json_number<C: FnOnce(&str) -> Result<(), SerializeError>>(
        &self,
        consumer: C,
    ) -> Result<(), SerializeError>;
}

/// Sealed trait for floating point number types such as `f64`
///
/// Non-finite values are rejected during serialization since JSON has no
/// representation for them.
pub trait FloatingPointNumber: private::Sealed {
    /// Converts this number to a JSON number string
    ///
    /// The JSON number string is passed to the given `consumer`. Fails for
    /// non-finite values.
    fn use_json_number<C: FnOnce(&str) -> Result<(), SerializeError>>(
        &self,
        consumer: C,
    ) -> Result<(), SerializeError>;
}

mod private {
    use duplicate::duplicate_item;

    pub trait Sealed {}

    #[duplicate_item(type_template; [u8]; [i8]; [u16]; [i16]; [u32]; [i32]; [u64]; [i64]; [u128]; [i128]; [usize]; [isize]; [f32]; [f64])]
    impl Sealed for type_template {}
}

#[duplicate_item(type_template; [u8]; [i8]; [u16]; [i16]; [u32]; [i32]; [u64]; [i64]; [u128]; [i128]; [usize]; [isize])]
impl FiniteNumber for type_template {
    fn use_json_number<C: FnOnce(&str) -> Result<(), SerializeError>>(
        &self,
        consumer: C,
    ) -> Result<(), SerializeError> {
        let string = self.to_string();
        debug_assert!(
            is_valid_json_number(string.as_bytes()),
            "Unexpected: Not a valid JSON number: {string}"
        );
        consumer(&string)
    }
}

#[duplicate_item(type_template; [f32]; [f64])]
impl FloatingPointNumber for type_template {
    fn use_json_number<C: FnOnce(&str) -> Result<(), SerializeError>>(
        &self,
        consumer: C,
    ) -> Result<(), SerializeError> {
        if !self.is_finite() {
            return Err(invalid_output(
                Some(Event::Number),
                ErrorCode::InvalidValue,
                "unable to convert number to string",
            ));
        }

        let value = *self;
        let magnitude = value.abs();
        // Long numbers are written in scientific notation; both forms are
        // shortest-roundtrip
        let string = if value != 0.0 && (magnitude >= 1e21 || magnitude < 1e-6) {
            format!("{value:e}")
        } else {
            value.to_string()
        };
        debug_assert!(
            is_valid_json_number(string.as_bytes()),
            "Unexpected: Not a valid JSON number: {string}"
        );
        consumer(&string)
    }
}
