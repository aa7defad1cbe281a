//! Font gating and script-run detection.

use script_switcher_core::text::decision::{Decision, SkipReason};

use crate::surface::FontInfo;

/// True when `font_name` case-insensitively contains the legacy-font marker.
#[must_use]
pub fn is_legacy_font(font_name: &str, marker: &str) -> bool {
    !marker.is_empty() && font_name.to_lowercase().contains(&marker.to_lowercase())
}

/// Font verdict for one unit. A unit with no reported font name never
/// qualifies.
#[must_use]
pub fn font_decision(font: &FontInfo, marker: &str) -> Decision {
    let qualifies = font
        .name
        .as_deref()
        .is_some_and(|name| is_legacy_font(name, marker));
    if qualifies {
        Decision::Convert
    } else {
        Decision::Skip(SkipReason::NonTargetFont)
    }
}

/// Unicode blocks of the font-substitution target script (Arabic, including
/// supplements and presentation forms).
pub const ARABIC_SCRIPT_RANGES: [(char, char); 5] = [
    ('\u{0600}', '\u{06FF}'),
    ('\u{0750}', '\u{077F}'),
    ('\u{08A0}', '\u{08FF}'),
    ('\u{FB50}', '\u{FDFF}'),
    ('\u{FE70}', '\u{FEFF}'),
];

/// True when any character of `text` falls inside one of `ranges`.
#[must_use]
pub fn contains_script(text: &str, ranges: &[(char, char)]) -> bool {
    text.chars()
        .any(|ch| ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&ch)))
}

#[cfg(test)]
mod tests {
    use script_switcher_core::text::decision::{Decision, SkipReason};

    use super::*;
    use crate::surface::FontInfo;

    #[test]
    fn marker_match_is_case_insensitive() {
        assert!(is_legacy_font("SutonnyMJ", "sutonnymj"));
        assert!(is_legacy_font("sutonnymj-bold", "SutonnyMJ"));
        assert!(!is_legacy_font("Kalpurush", "sutonnymj"));
    }

    #[test]
    fn missing_font_name_never_qualifies() {
        let verdict = font_decision(&FontInfo::default(), "sutonnymj");
        assert_eq!(verdict, Decision::Skip(SkipReason::NonTargetFont));
    }

    #[test]
    fn qualifying_font_converts() {
        let font = FontInfo::named("SutonnyMJ");
        assert_eq!(font_decision(&font, "sutonnymj"), Decision::Convert);
    }

    #[test]
    fn script_detection_spans_all_configured_blocks() {
        assert!(contains_script("بسم", &ARABIC_SCRIPT_RANGES));
        assert!(contains_script("mixed ﷲ text", &ARABIC_SCRIPT_RANGES));
        assert!(!contains_script("লেখা plain", &ARABIC_SCRIPT_RANGES));
    }
}
