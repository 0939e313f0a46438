//! The event model shared by the parser and the serializer

/// A parsing or serialization event
///
/// Events describe the structure of a JSON document in the order in which it
/// is read or written. The parser produces them from JSON text, the
/// serializer consumes them to produce JSON text; the two streams are
/// symmetric, so parser output can be fed to [`Serializer::next`](crate::serializer::Serializer::next)
/// unchanged.
///
/// The absence of an event (end of a top-level value, or end of input) is
/// represented as `Option<Event>::None`.
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
#[strum(serialize_all = "snake_case")]
pub enum Event {
    /// Start of a JSON object: `{`
    BeginObject,
    /// End of a JSON object: `}`
    EndObject,
    /// Start of a JSON array: `[`
    BeginArray,
    /// End of a JSON array: `]`
    EndArray,
    /// Name of an object member
    ///
    /// Inside an object, string tokens at even positions are member names;
    /// everywhere else they are [`Event::String`] values.
    Name,
    /// JSON string value, for example `"text in \"quotes\""`
    String,
    /// JSON number value, for example `123.4e+10`
    Number,
    /// JSON boolean value, `true` or `false`
    Boolean,
    /// JSON `null`
    Null,
}

impl Event {
    /// Whether the event carries a value lexeme (string, number, boolean or null)
    pub(crate) fn is_value(self) -> bool {
        matches!(
            self,
            Event::String | Event::Number | Event::Boolean | Event::Null
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!("begin_object", Event::BeginObject.to_string());
        assert_eq!("end_array", Event::EndArray.to_string());
        assert_eq!("name", Event::Name.to_string());
        assert_eq!("boolean", Event::Boolean.to_string());
    }
}
