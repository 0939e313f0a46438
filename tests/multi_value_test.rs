use std::io::Read;

use evson::parser::{ParseError, Parser, ParserSettings};
use evson::Event;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn multi_value_parser<'a>(json: &'a str, separators: Option<&str>) -> Parser<&'a [u8]> {
    Parser::new_custom(
        json.as_bytes(),
        "test",
        ParserSettings {
            multi_value: true,
            separators: separators.map(str::to_owned),
        },
    )
}

/// Collects the values of a stream of top-level scalar values
fn collect_scalars<R: Read>(parser: &mut Parser<R>) -> Result<Vec<String>, ParseError> {
    let mut values = Vec::new();
    while parser.peek()?.is_some() {
        parser.next()?;
        values.push(parser.value().to_owned());
        // End of this value
        assert_eq!(None, parser.next()?);
    }
    Ok(values)
}

#[test]
fn newline_delimited_stream() -> TestResult {
    let mut parser = multi_value_parser("1\n2\n3", Some("\n"));
    assert_eq!(vec!["1", "2", "3"], collect_scalars(&mut parser)?);
    Ok(())
}

#[test]
fn record_separated_stream() -> TestResult {
    // RS-delimited JSON (RFC 7464): each value preceded by RS, followed by LF
    let json = "\u{1E}{\"a\": 1}\n\u{1E}[2, 3]\n\u{1E}\"text\"\n";
    let mut parser = multi_value_parser(json, Some("\u{1E}"));

    assert_eq!(Some(Event::BeginObject), parser.next()?);
    assert_eq!(Some(Event::Name), parser.next()?);
    assert_eq!("a", parser.name());
    assert_eq!(Some(Event::Number), parser.next()?);
    assert_eq!(Some(Event::EndObject), parser.next()?);
    assert_eq!(None, parser.next()?);

    assert_eq!(Some(Event::BeginArray), parser.next()?);
    assert_eq!(Some(Event::Number), parser.next()?);
    assert_eq!(Some(Event::Number), parser.next()?);
    assert_eq!(Some(Event::EndArray), parser.next()?);
    assert_eq!(None, parser.next()?);

    assert_eq!(Some(Event::String), parser.next()?);
    assert_eq!("text", parser.value());
    assert_eq!(None, parser.next()?);

    // End of input
    assert_eq!(None, parser.next()?);
    assert_eq!(None, parser.peek()?);
    Ok(())
}

#[test]
fn missing_separator_diagnostics() -> TestResult {
    let mut parser = multi_value_parser("1 2", Some("\n"));
    assert_eq!(Some(Event::Number), parser.next()?);

    match parser.next() {
        Err(ParseError::Invalid(e)) => {
            assert_eq!("missing separator between JSON values", e.description);
            assert_eq!(1, e.line);
            assert_eq!(3, e.column);
            // One byte past the '2'
            assert_eq!(3, e.position);
            assert_eq!(
                "test:1:3: error: missing separator between JSON values",
                e.to_string()
            );
        }
        r => panic!("Unexpected result: {r:?}"),
    }
    Ok(())
}

/// A single value does not need any separator at all
#[test]
fn single_value_needs_no_separator() -> TestResult {
    let mut parser = multi_value_parser("12", Some("\n"));
    assert_eq!(Some(Event::Number), parser.next()?);
    assert_eq!("12", parser.value());
    assert_eq!(None, parser.next()?);
    assert_eq!(None, parser.next()?);
    Ok(())
}

/// Stray separators after the final value are skipped; the parser then
/// reports plain end of input
#[test]
fn trailing_separators_after_last_value() -> TestResult {
    let mut parser = multi_value_parser("1\n2\n\n \n", Some("\n"));
    assert_eq!(vec!["1", "2"], collect_scalars(&mut parser)?);
    assert_eq!(None, parser.next()?);
    Ok(())
}

/// Separators before the first value are skipped as well
#[test]
fn leading_separators() -> TestResult {
    let mut parser = multi_value_parser("\n\n1", Some("\n"));
    assert_eq!(Some(Event::Number), parser.next()?);
    assert_eq!("1", parser.value());
    Ok(())
}

#[test]
fn empty_stream() -> TestResult {
    let mut parser = multi_value_parser("", Some("\n"));
    assert_eq!(None, parser.next()?);
    assert_eq!(None, parser.peek()?);

    // Only separators and whitespace is an empty stream too
    let mut parser = multi_value_parser(" \n\n ", Some("\n"));
    assert_eq!(None, parser.next()?);
    Ok(())
}

#[test]
fn whitespace_separator_set() -> TestResult {
    // An empty separator set requires at least one JSON whitespace
    let mut parser = multi_value_parser("true false", Some(""));
    assert_eq!(Some(Event::Boolean), parser.next()?);
    assert_eq!(None, parser.next()?);
    assert_eq!(Some(Event::Boolean), parser.next()?);
    assert_eq!(None, parser.next()?);

    let mut parser = multi_value_parser("1[]", Some(""));
    assert_eq!(Some(Event::Number), parser.next()?);
    match parser.next() {
        Err(ParseError::Invalid(e)) => {
            assert_eq!("missing separator between JSON values", e.description);
        }
        r => panic!("Unexpected result: {r:?}"),
    }
    Ok(())
}
