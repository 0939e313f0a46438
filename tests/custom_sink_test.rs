//! Tests a custom [`Sink`] implementation which drains a tiny buffer into an
//! external destination, exercising the overflow/flush contract

use evson::serializer::{SerializeError, Serializer, Sink};
use evson::Event;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Sink with a small fixed scratch buffer which drains into `chunks` on
/// every overflow and flush call
struct DrainingSink {
    scratch: [u8; 8],
    /// Every drained piece, in order
    chunks: Vec<Vec<u8>>,
    overflow_calls: usize,
    flush_calls: usize,
}

impl DrainingSink {
    fn new() -> Self {
        Self {
            scratch: [0; 8],
            chunks: Vec::new(),
            overflow_calls: 0,
            flush_calls: 0,
        }
    }

    fn drain(&mut self, size: &mut usize) {
        if *size > 0 {
            self.chunks.push(self.scratch[..*size].to_vec());
            *size = 0;
        }
    }

    fn output(&self) -> Vec<u8> {
        self.chunks.concat()
    }
}

impl Sink for DrainingSink {
    fn buf(&mut self) -> &mut [u8] {
        &mut self.scratch
    }

    fn overflow(
        &mut self,
        size: &mut usize,
        _event: Event,
        _extra: usize,
    ) -> Result<(), SerializeError> {
        self.overflow_calls += 1;
        self.drain(size);
        Ok(())
    }

    fn flush(&mut self, size: &mut usize, _event: Event) -> Result<(), SerializeError> {
        self.flush_calls += 1;
        self.drain(size);
        Ok(())
    }
}

#[test]
fn draining_sink() -> TestResult {
    let mut serializer = Serializer::new(DrainingSink::new());

    serializer.begin_object()?;
    serializer.name("text")?;
    serializer.string_value("escapes \"\\\u{1}\t and unicode é€😀")?;
    serializer.name("numbers")?;
    serializer.begin_array()?;
    for i in 0..20 {
        serializer.number_value(i * 1111)?;
    }
    serializer.end_array()?;
    serializer.end_object()?;
    serializer.next(None, None, true)?;
    serializer.next(None, None, true)?;

    let sink = serializer.into_sink();

    // With an 8 byte buffer a document this size must have overflowed many
    // times, and flushed exactly once (one top-level value)
    assert!(sink.overflow_calls > 10, "calls: {}", sink.overflow_calls);
    assert_eq!(1, sink.flush_calls);

    let expected = format!(
        "{{\"text\":\"escapes \\\"\\\\\\u0001\\t and unicode é€😀\",\"numbers\":[{}]}}",
        (0..20)
            .map(|i| (i * 1111).to_string())
            .collect::<Vec<_>>()
            .join(",")
    );
    assert_eq!(expected.as_bytes(), &sink.output()[..]);
    Ok(())
}

/// No drained piece may end in the middle of a UTF-8 sequence or an escape
/// sequence: every piece on its own must be valid UTF-8
#[test]
fn drained_pieces_are_never_split_mid_sequence() -> TestResult {
    let mut serializer = Serializer::new(DrainingSink::new());

    // Escape- and multi-byte-heavy content around every buffer boundary
    serializer.begin_array()?;
    serializer.string_value("ééé\u{1}\u{2}\u{3}€€€\"\\😀😀")?;
    serializer.string_value("\u{4}\u{5}ééé😀")?;
    serializer.end_array()?;
    serializer.next(None, None, true)?;

    let sink = serializer.into_sink();
    for (index, chunk) in sink.chunks.iter().enumerate() {
        assert!(
            std::str::from_utf8(chunk).is_ok(),
            "chunk {index} ends mid-sequence: {chunk:02X?}"
        );
        let text = std::str::from_utf8(chunk).unwrap();
        // An escape is split if a piece ends with an odd number of backslashes
        let trailing_backslashes = text.len() - text.trim_end_matches('\\').len();
        // Pieces containing "\\" (the escaped backslash) are written
        // atomically, so any trailing backslashes come in pairs or as the
        // start of a not-yet-written escape -- which must not happen
        assert!(
            trailing_backslashes % 2 == 0,
            "chunk {index} ends mid-escape: {text:?}"
        );
    }
    Ok(())
}
