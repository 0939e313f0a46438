#![warn(missing_docs)]
// Enable 'unused' warnings for doc tests (are disabled by default)
#![doc(test(no_crate_inject))]
#![doc(test(attr(warn(unused))))]
// Fail on warnings in doc tests
#![doc(test(attr(deny(warnings))))]

//! Evson is an [RFC 8259](https://www.rfc-editor.org/rfc/rfc8259.html) compliant
//! streaming JSON pull parser and push serializer.
//!
//! Both halves work on a stream of [`Event`]s instead of an in-memory
//! document tree, which allows processing JSON data of arbitrary size with
//! constant memory. Evson is *not* an object mapper converting structs to
//! JSON and vice versa; a dedicated library such as
//! [Serde](https://github.com/serde-rs/json) should be used for that.
//!
//! The parser pulls events out of JSON text with [`Parser::next`] (with
//! single-token lookahead via [`Parser::peek`]) and reports byte-accurate
//! locations for malformed input. The serializer pushes events through
//! [`Serializer::next`] into a pluggable byte [`Sink`]. The two event
//! streams are symmetric, so parser output can be fed directly into the
//! serializer to reformat a document. Both support multi-value streams such
//! as JSON Lines or RS-delimited JSON (RFC 7464).
//!
//! [`Parser::next`]: crate::parser::Parser::next
//! [`Parser::peek`]: crate::parser::Parser::peek
//! [`Serializer::next`]: crate::serializer::Serializer::next
//! [`Sink`]: crate::serializer::Sink
//!
//! # Terminology
//!
//! This crate uses the same terminology as the JSON specification:
//!
//! - *object*: `{ ... }`
//!   - *member*: Entry in an object. For example the JSON object `{"a": 1}`
//!     has the member `"a": 1` where `"a"` is the member *name* and `1` is
//!     the member *value*.
//! - *array*: `[ ... ]`
//! - *literal*:
//!   - *boolean*: `true` or `false`
//!   - `null`
//! - *number*: number value, for example `123.4e+10`
//! - *string*: string value, for example `"text in \"quotes\""`
//!
//! # Usage examples
//!
//! ## Parsing
//! See [`Parser`](crate::parser::Parser).
//!
//! ```
//! use evson::{Event, parser::Parser};
//!
//! // In this example JSON data comes from a string;
//! // normally it would come from a file or a network connection
//! let json = r#"{"a": [1, true]}"#;
//! let mut parser = Parser::new(json.as_bytes(), "example");
//!
//! parser.next_expect_begin_object()?;
//! assert_eq!("a", parser.next_expect_name()?);
//!
//! parser.next_expect_begin_array()?;
//! assert_eq!(1_u32, parser.next_expect_number()?);
//! assert_eq!(true, parser.next_expect_boolean()?);
//! parser.next_expect_end_array()?;
//!
//! parser.next_expect_end_object()?;
//! // Ensures that there is no trailing data
//! assert_eq!(None, parser.next()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Serializing
//! See [`Serializer`](crate::serializer::Serializer).
//!
//! ```
//! use evson::serializer::{Serializer, VecSink};
//!
//! // In this example JSON bytes are stored in a Vec;
//! // normally they would be written to a file or network connection
//! let mut out = Vec::<u8>::new();
//! let mut serializer = Serializer::new(VecSink::new(&mut out));
//!
//! serializer.begin_object()?;
//! serializer.name("a")?;
//!
//! serializer.begin_array()?;
//! serializer.number_value(1)?;
//! serializer.bool_value(true)?;
//! serializer.end_array()?;
//!
//! serializer.end_object()?;
//! // Verifies that the value is complete
//! serializer.next(None, None, true)?;
//!
//! assert_eq!(r#"{"a":[1,true]}"#, String::from_utf8(out)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Reserializing
//!
//! Since the parser's events and lexemes are legal serializer input, a
//! document can be reformatted without interpreting it:
//!
//! ```
//! use evson::parser::Parser;
//! use evson::serializer::{Serializer, SerializerSettings, VecSink};
//!
//! let mut parser = Parser::new(r#"{"a":[1,true]}"#.as_bytes(), "example");
//! let mut out = Vec::<u8>::new();
//! let mut serializer = Serializer::new_custom(
//!     VecSink::new(&mut out),
//!     SerializerSettings {
//!         indentation: 2,
//!         ..Default::default()
//!     },
//! );
//!
//! loop {
//!     let event = parser.next()?;
//!     serializer.next(event, parser.data().map(str::as_bytes), true)?;
//!     if event.is_none() {
//!         break;
//!     }
//! }
//!
//! assert_eq!(
//!     "{\n  \"a\": [\n    1,\n    true\n  ]\n}",
//!     String::from_utf8(out)?
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod parser;
pub mod serializer;

mod event;
mod json_number;
mod utf8;

pub use event::Event;
