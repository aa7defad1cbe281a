use std::fmt;

/// Failure raised by a [`ScriptMapper`] for structurally invalid legacy byte
/// sequences.
///
/// Recovered per unit by the orchestrator: the original text is substituted
/// for the failing unit and span conversion continues.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MapError {
    reason: String,
}

impl MapError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mapping failed: {}", self.reason)
    }
}

impl std::error::Error for MapError {}

/// External legacy-encoding-to-Unicode mapping collaborator.
///
/// Implementations must be pure: the same input always yields the same
/// output, and the input is never mutated. The orchestrator invokes the
/// mapper per unit or per fully-qualified legacy-font span.
pub trait ScriptMapper {
    fn map(&self, encoding: &str, text: &str) -> Result<String, MapError>;
}

impl<F> ScriptMapper for F
where
    F: Fn(&str, &str) -> Result<String, MapError>,
{
    fn map(&self, encoding: &str, text: &str) -> Result<String, MapError> {
        self(encoding, text)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn closures_act_as_mappers() {
        let mapper =
            |_: &str, text: &str| -> Result<String, MapError> { Ok(text.to_uppercase()) };
        assert_eq!(mapper.map("bijoy", "abc").unwrap(), "ABC");
    }

    #[test]
    fn map_error_carries_its_reason() {
        let err = MapError::new("truncated conjunct");
        assert_eq!(err.reason(), "truncated conjunct");
        assert_eq!(err.to_string(), "mapping failed: truncated conjunct");
    }
}
