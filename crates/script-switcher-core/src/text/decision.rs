/// Per-unit verdict of the conversion pipeline.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    Convert,
    Skip(SkipReason),
}

/// Why a unit passes through unchanged.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SkipReason {
    Whitespace,
    IgnoreListExact,
    IgnoreListPrefix,
    NonTargetFont,
    StructuralDelimiter,
}

impl SkipReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Whitespace => "whitespace",
            SkipReason::IgnoreListExact => "ignore_list_exact",
            SkipReason::IgnoreListPrefix => "ignore_list_prefix",
            SkipReason::NonTargetFont => "non_target_font",
            SkipReason::StructuralDelimiter => "structural_delimiter",
        }
    }
}

/// Bare parentheses and the vertical bar are layout scaffolding in legacy
/// documents and are never submitted to the mapper.
#[must_use]
pub fn is_structural(trimmed: &str) -> bool {
    matches!(trimmed, "(" | ")" | "|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_check_covers_layout_marks_only() {
        assert!(is_structural("("));
        assert!(is_structural(")"));
        assert!(is_structural("|"));
        assert!(!is_structural("()"));
        assert!(!is_structural("-"));
        assert!(!is_structural("word"));
    }

    #[test]
    fn skip_reasons_have_stable_labels() {
        assert_eq!(SkipReason::Whitespace.as_str(), "whitespace");
        assert_eq!(SkipReason::NonTargetFont.as_str(), "non_target_font");
        assert_eq!(
            SkipReason::StructuralDelimiter.as_str(),
            "structural_delimiter"
        );
    }
}
