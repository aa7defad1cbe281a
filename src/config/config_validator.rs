use script_switcher_core::text::ignore::MatchPolicy;

use super::raw_config::RawConfig;

/// Returns a human-readable description of the first invalid setting, or
/// `None` when the configuration is usable.
pub fn find_invalid_setting(raw: &RawConfig) -> Option<String> {
    if raw.encoding.trim().is_empty() {
        return Some("encoding must not be empty".to_owned());
    }
    if raw.legacy_font_marker.trim().is_empty() {
        return Some("legacy_font_marker must not be empty".to_owned());
    }
    if raw.target_font.trim().is_empty() {
        return Some("target_font must not be empty".to_owned());
    }
    if raw.script_font.trim().is_empty() {
        return Some("script_font must not be empty".to_owned());
    }
    if raw.word_batch_size == 0 {
        return Some("word_batch_size must be at least 1".to_owned());
    }
    if raw.font_batch_size == 0 {
        return Some("font_batch_size must be at least 1".to_owned());
    }
    if raw.paragraph_sync_interval == 0 {
        return Some("paragraph_sync_interval must be at least 1".to_owned());
    }
    if MatchPolicy::parse(&raw.match_policy).is_none() {
        return Some(format!(
            "unknown match_policy '{}' (expected exact_and_prefix, exact or contains)",
            raw.match_policy
        ));
    }
    None
}
