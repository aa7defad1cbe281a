use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_ENCODING, DEFAULT_FONT_BATCH_SIZE, DEFAULT_LEGACY_FONT_MARKER, DEFAULT_MATCH_POLICY,
    DEFAULT_PARAGRAPH_SYNC_INTERVAL, DEFAULT_SCRIPT_FONT, DEFAULT_TARGET_FONT,
    DEFAULT_WORD_BATCH_SIZE,
};

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_owned()
}

fn default_legacy_font_marker() -> String {
    DEFAULT_LEGACY_FONT_MARKER.to_owned()
}

fn default_target_font() -> String {
    DEFAULT_TARGET_FONT.to_owned()
}

fn default_script_font() -> String {
    DEFAULT_SCRIPT_FONT.to_owned()
}

fn default_match_policy() -> String {
    DEFAULT_MATCH_POLICY.to_owned()
}

fn default_word_batch_size() -> usize {
    DEFAULT_WORD_BATCH_SIZE
}

fn default_font_batch_size() -> usize {
    DEFAULT_FONT_BATCH_SIZE
}

fn default_paragraph_sync_interval() -> usize {
    DEFAULT_PARAGRAPH_SYNC_INTERVAL
}

fn default_true() -> bool {
    true
}

/// Unvalidated configuration as it sits on disk.
///
/// Every field carries a serde default so a partial file loads cleanly;
/// [`Config`](super::Config) construction runs the validator over it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default = "default_encoding")]
    pub encoding: String,

    #[serde(default = "default_legacy_font_marker")]
    pub legacy_font_marker: String,

    #[serde(default = "default_target_font")]
    pub target_font: String,

    #[serde(default = "default_script_font")]
    pub script_font: String,

    #[serde(default = "default_true")]
    pub preserve_font_size: bool,

    #[serde(default = "default_match_policy")]
    pub match_policy: String,

    #[serde(default = "default_word_batch_size")]
    pub word_batch_size: usize,

    #[serde(default = "default_font_batch_size")]
    pub font_batch_size: usize,

    #[serde(default = "default_paragraph_sync_interval")]
    pub paragraph_sync_interval: usize,

    #[serde(default)]
    pub split_terminal_punctuation: bool,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            legacy_font_marker: default_legacy_font_marker(),
            target_font: default_target_font(),
            script_font: default_script_font(),
            preserve_font_size: true,
            match_policy: default_match_policy(),
            word_batch_size: default_word_batch_size(),
            font_batch_size: default_font_batch_size(),
            paragraph_sync_interval: default_paragraph_sync_interval(),
            split_terminal_punctuation: false,
        }
    }
}
