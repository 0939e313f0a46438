use evson::parser::{Parser, ParserSettings};
use evson::serializer::{Serializer, SerializerSettings, VecSink};

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Parses `json` and feeds the events unchanged into a serializer
fn reserialize(json: &str, indentation: usize) -> Result<String, Box<dyn std::error::Error>> {
    let mut parser = Parser::new(json.as_bytes(), "test");
    let mut out = Vec::new();
    let mut serializer = Serializer::new_custom(
        VecSink::new(&mut out),
        SerializerSettings {
            indentation,
            ..Default::default()
        },
    );

    loop {
        let event = parser.next()?;
        serializer.next(event, parser.data().map(str::as_bytes), true)?;
        if event.is_none() {
            break;
        }
    }

    drop(serializer);
    Ok(String::from_utf8(out)?)
}

/// Compact document whose escapes are in the serializer's canonical form,
/// so reserialization is byte-identical
const CANONICAL_DOCUMENT: &str = "{\"name\":\"evson\",\"versions\":[1,2.5,-3e2,0],\
\"nested\":{\"empty_object\":{},\"empty_array\":[],\
\"escapes\":\"quote \\\" backslash \\\\ tab \\t control \\u0001\",\
\"unicode\":\"é€😀\"},\
\"flags\":[true,false,null],\
\"big\":18446744073709551615}";

#[test]
fn compact_roundtrip_is_byte_identical() -> TestResult {
    assert_eq!(CANONICAL_DOCUMENT, reserialize(CANONICAL_DOCUMENT, 0)?);
    Ok(())
}

#[test]
fn roundtrip_is_semantically_equivalent() -> TestResult {
    // Uses non-canonical escapes and insignificant whitespace, so compare
    // value trees instead of bytes
    let json = r#"
    {
        "a": [1, 2.5e3, -0.125],
        "b": {"text": "caf\u00e9 \uD83D\uDE00", "empty": ""},
        "c": [true, false, null, {}, []]
    }"#;

    let expected: serde_json::Value = serde_json::from_str(json)?;

    let compact = reserialize(json, 0)?;
    let actual: serde_json::Value = serde_json::from_str(&compact)?;
    assert_eq!(expected, actual);

    let pretty = reserialize(json, 3)?;
    let actual: serde_json::Value = serde_json::from_str(&pretty)?;
    assert_eq!(expected, actual);

    // Reformatting the pretty output compactly reproduces the compact form
    assert_eq!(compact, reserialize(&pretty, 0)?);
    Ok(())
}

#[test]
fn pretty_roundtrip() -> TestResult {
    assert_eq!(
        "{\n   \"a\": [\n      1,\n      true\n   ],\n   \"b\": {}\n}",
        reserialize(r#"{"a":[1,true],"b":{}}"#, 3)?
    );
    Ok(())
}

#[test]
fn scalar_top_level_values() -> TestResult {
    for json in ["1", "-2.5e-3", "true", "false", "null", "\"text\"", "\"\""] {
        assert_eq!(json, reserialize(json, 0)?, "for input: {json}");
    }
    Ok(())
}

#[test]
fn multi_value_roundtrip() -> TestResult {
    let json = "1\n{\"a\":2}\n[3]";
    let mut parser = Parser::new_custom(
        json.as_bytes(),
        "test",
        ParserSettings {
            multi_value: true,
            separators: Some("\n".to_owned()),
        },
    );

    let mut out = Vec::new();
    let mut serializer = Serializer::new(VecSink::new(&mut out));

    // The serializer is always in multi-value mode; one absent event ends
    // each value, a final one ends the sequence
    while parser.peek()?.is_some() {
        loop {
            let event = parser.next()?;
            serializer.next(event, parser.data().map(str::as_bytes), true)?;
            if event.is_none() {
                break;
            }
        }
    }
    serializer.next(None, None, true)?;

    drop(serializer);
    assert_eq!(json, String::from_utf8(out)?);
    Ok(())
}
