/// Classification of a token produced by [`tokenize`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UnitKind {
    /// Maximal run of non-delimiter characters.
    Word,
    /// A single non-whitespace delimiter character.
    Delimiter,
    /// A single whitespace delimiter character.
    Whitespace,
}

/// A single addressable token of a text span.
///
/// Offsets are byte offsets into the tokenized input. `content` borrows the
/// input slice, so units are referenced rather than copied until rewrite.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextUnit<'a> {
    pub start: usize,
    pub end: usize,
    pub content: &'a str,
    pub kind: UnitKind,
}

impl TextUnit<'_> {
    /// Returns `true` when the unit's content trims to nothing.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Paragraph-granularity delimiter alphabet: CR, LF, VT and the Unicode
/// line/paragraph separators.
///
/// TAB and space are deliberately absent so that space-joined runs stay
/// together when a span is split at paragraph granularity.
pub const LINE_BREAK_DELIMITERS: [char; 5] = ['\r', '\n', '\u{000B}', '\u{2028}', '\u{2029}'];

/// Word-granularity delimiter alphabet used for font-boundary-aware splits.
pub const WORD_DELIMITERS: [char; 13] = [
    ' ', ',', '\t', '\r', '\n', '\u{000B}', '\u{2028}', '\u{2029}', '(', ')', '-', '=', '/',
];

/// Word alphabet extended with terminal punctuation; used when splitting for
/// script detection and font substitution.
pub const WORD_DELIMITERS_WITH_PUNCT: [char; 18] = [
    ' ', ',', '\t', '\r', '\n', '\u{000B}', '\u{2028}', '\u{2029}', '(', ')', '-', '=', '/', '.',
    ';', ':', '!', '?',
];

/// Splits `text` into ordered units along `delimiters`.
///
/// Every maximal run of non-delimiter characters becomes one `Word` unit and
/// every delimiter character becomes its own single-character unit,
/// classified [`UnitKind::Whitespace`] when `char::is_whitespace` holds and
/// [`UnitKind::Delimiter`] otherwise.
///
/// Invariants:
/// - concatenating unit contents in order reproduces `text` exactly
/// - no unit has zero length
/// - empty input yields an empty vec
#[must_use]
pub fn tokenize<'a>(text: &'a str, delimiters: &[char]) -> Vec<TextUnit<'a>> {
    let mut units = Vec::new();
    let mut word_start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if !delimiters.contains(&ch) {
            word_start.get_or_insert(idx);
            continue;
        }

        if let Some(start) = word_start.take() {
            units.push(TextUnit {
                start,
                end: idx,
                content: &text[start..idx],
                kind: UnitKind::Word,
            });
        }

        let end = idx + ch.len_utf8();
        let kind = if ch.is_whitespace() {
            UnitKind::Whitespace
        } else {
            UnitKind::Delimiter
        };
        units.push(TextUnit {
            start: idx,
            end,
            content: &text[idx..end],
            kind,
        });
    }

    if let Some(start) = word_start {
        units.push(TextUnit {
            start,
            end: text.len(),
            content: &text[start..],
            kind: UnitKind::Word,
        });
    }

    units
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn reassemble(units: &[TextUnit<'_>]) -> String {
        units.iter().map(|u| u.content).collect()
    }

    #[test]
    fn empty_input_yields_no_units() {
        assert!(tokenize("", &WORD_DELIMITERS).is_empty());
    }

    #[test]
    fn concatenation_reconstructs_input_exactly() {
        let text = "word1  word2\nword3 (x)=a/b";
        let units = tokenize(text, &WORD_DELIMITERS);
        assert_eq!(reassemble(&units), text);

        let units = tokenize(text, &LINE_BREAK_DELIMITERS);
        assert_eq!(reassemble(&units), text);
    }

    #[test]
    fn delimiters_become_single_character_units() {
        let units = tokenize("a--b", &WORD_DELIMITERS);
        assert_eq!(units.len(), 4);
        assert_eq!(units[1].content, "-");
        assert_eq!(units[1].kind, UnitKind::Delimiter);
        assert_eq!(units[2].content, "-");
    }

    #[test]
    fn whitespace_and_punctuation_classify_separately() {
        let units = tokenize("a b,c", &WORD_DELIMITERS);
        let kinds: Vec<UnitKind> = units.iter().map(|u| u.kind).collect();
        assert_eq!(
            kinds,
            vec![
                UnitKind::Word,
                UnitKind::Whitespace,
                UnitKind::Word,
                UnitKind::Delimiter,
                UnitKind::Word,
            ]
        );
    }

    #[test]
    fn line_break_alphabet_keeps_spaced_runs_together() {
        let units = tokenize("one two\nthree four", &LINE_BREAK_DELIMITERS);
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].content, "one two");
        assert_eq!(units[0].kind, UnitKind::Word);
        assert_eq!(units[1].content, "\n");
        assert_eq!(units[1].kind, UnitKind::Whitespace);
        assert_eq!(units[2].content, "three four");
    }

    #[test]
    fn offsets_index_the_original_text() {
        let text = "ab\u{2028}cd";
        let units = tokenize(text, &LINE_BREAK_DELIMITERS);
        for unit in &units {
            assert_eq!(&text[unit.start..unit.end], unit.content);
            assert!(unit.start < unit.end);
        }
    }

    #[test]
    fn multibyte_words_tokenize_with_correct_boundaries() {
        let text = "লেখা কলম";
        let units = tokenize(text, &WORD_DELIMITERS);
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].content, "লেখা");
        assert_eq!(units[2].content, "কলম");
        assert_eq!(reassemble(&units), text);
    }
}
