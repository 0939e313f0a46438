//! Internal module for consuming / validating JSON numbers
//!
//! The grammar (RFC 8259 section 6) is
//! `-? (0 | [1-9][0-9]*) ('.' [0-9]+)? ([eE][+-]?[0-9]+)?`; in particular a
//! leading `0` before further integer digits, a bare `.` and a leading `+`
//! are rejected. The same consumption routine backs the lexer (which feeds
//! bytes from the input source) and the serializer's number validation
//! (which feeds bytes from a slice).

pub(crate) trait NumberBytesProvider<E> {
    /// Consumes the byte which is currently processed, and peeks at the next.
    ///
    /// Returns `None` if the end of the number input has been reached.
    fn consume_current_peek_next(&mut self) -> Result<Option<u8>, E>;
}

/// Consumes a JSON number, returning whether it matched the grammar
///
/// `first_byte` is the already peeked (but not yet consumed) first byte of
/// the number. Consumption stops at the first byte which cannot be part of
/// a number; that byte is left unconsumed. A trailing byte which *looks*
/// numeric (for example the second `0` of `01`, or a `-` directly after the
/// digits) makes the whole number invalid instead of ending it.
pub(crate) fn consume_json_number<E, R: NumberBytesProvider<E>>(
    reader: &mut R,
    first_byte: u8,
) -> Result<bool, E> {
    let mut byte = first_byte;

    if byte == b'-' {
        if let Some(b) = reader.consume_current_peek_next()? {
            byte = b;
        } else {
            // Missing integer part
            return Ok(false);
        }
    }

    // Integer part; a leading 0 must not be followed by further digits
    if (b'1'..=b'9').contains(&byte) {
        loop {
            if let Some(b) = reader.consume_current_peek_next()? {
                byte = b;
            } else {
                return Ok(true);
            }

            if !byte.is_ascii_digit() {
                break;
            }
        }
    } else if byte == b'0' {
        if let Some(b) = reader.consume_current_peek_next()? {
            byte = b;
        } else {
            return Ok(true);
        }
    } else {
        // Invalid integer part
        return Ok(false);
    }

    // Fraction part
    if byte == b'.' {
        if let Some(b) = reader.consume_current_peek_next()? {
            byte = b;
        } else {
            // Missing fraction digits
            return Ok(false);
        }

        if !byte.is_ascii_digit() {
            return Ok(false);
        }

        loop {
            if let Some(b) = reader.consume_current_peek_next()? {
                byte = b;
            } else {
                return Ok(true);
            }

            if !byte.is_ascii_digit() {
                break;
            }
        }
    }

    // Exponent part
    if byte == b'e' || byte == b'E' {
        if let Some(b) = reader.consume_current_peek_next()? {
            byte = b;
        } else {
            // Missing exponent digits
            return Ok(false);
        }

        if byte == b'-' || byte == b'+' {
            if let Some(b) = reader.consume_current_peek_next()? {
                byte = b;
            } else {
                return Ok(false);
            }
        }

        if !byte.is_ascii_digit() {
            return Ok(false);
        }

        loop {
            if let Some(b) = reader.consume_current_peek_next()? {
                byte = b;
            } else {
                return Ok(true);
            }

            if !byte.is_ascii_digit() {
                break;
            }
        }
    }

    // If the char directly after the number is a number char, treat the
    // number as invalid, e.g. `01`, `1.2.3` or `1-`
    Ok(!(byte.is_ascii_digit()
        || byte == b'-'
        || byte == b'+'
        || byte == b'.'
        || byte == b'e'
        || byte == b'E'))
}

struct BytesSliceNumberBytesProvider<'a> {
    bytes: &'a [u8],
    index: usize,
}
impl NumberBytesProvider<()> for BytesSliceNumberBytesProvider<'_> {
    fn consume_current_peek_next(&mut self) -> Result<Option<u8>, ()> {
        self.index += 1;
        if self.index < self.bytes.len() {
            Ok(Some(self.bytes[self.index]))
        } else {
            Ok(None)
        }
    }
}

/// Whether the complete byte slice is a valid JSON number
pub(crate) fn is_valid_json_number(value: &[u8]) -> bool {
    if value.is_empty() {
        return false;
    }

    let mut bytes_provider = BytesSliceNumberBytesProvider {
        bytes: value,
        index: 0,
    };
    let is_valid = consume_json_number(&mut bytes_provider, value[0]).unwrap();

    // Is valid and complete slice was consumed
    is_valid && bytes_provider.index >= value.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_validation() {
        assert!(is_valid_json_number(b"0"));
        assert!(is_valid_json_number(b"-0"));
        assert!(is_valid_json_number(b"1230.1"));
        assert!(is_valid_json_number(b"1.01e1"));
        assert!(is_valid_json_number(b"12.120e+01"));
        assert!(is_valid_json_number(b"12.120e-10"));

        assert_eq!(false, is_valid_json_number(b"00"));
        assert_eq!(false, is_valid_json_number(b"-00"));
        assert_eq!(false, is_valid_json_number(b"+1"));
        assert_eq!(false, is_valid_json_number(b".1"));
        assert_eq!(false, is_valid_json_number(b"1."));
        assert_eq!(false, is_valid_json_number(b"1.-1"));
        assert_eq!(false, is_valid_json_number(b"1e"));
        assert_eq!(false, is_valid_json_number(b"1e+-1"));
        assert_eq!(false, is_valid_json_number(b"1e.1"));

        assert_eq!(false, is_valid_json_number(b""));
        assert_eq!(false, is_valid_json_number(b"1a"));
        assert_eq!(false, is_valid_json_number(b"NaN"));
        assert_eq!(false, is_valid_json_number(b"nan"));
        assert_eq!(false, is_valid_json_number(b"Infinity"));
        assert_eq!(false, is_valid_json_number(b"-Infinity"));
    }
}
