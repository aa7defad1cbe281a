mod config_validator;
pub mod constants;
pub mod raw_config;

use std::{
    io,
    path::{Path, PathBuf},
};

pub use raw_config::RawConfig;
use script_switcher_core::text::{
    ignore::MatchPolicy,
    tokenize::{WORD_DELIMITERS, WORD_DELIMITERS_WITH_PUNCT},
};
use serde::{Deserialize, Deserializer, Serialize};

use constants::{
    DEFAULT_ENCODING, DEFAULT_FONT_BATCH_SIZE, DEFAULT_LEGACY_FONT_MARKER, DEFAULT_MATCH_POLICY,
    DEFAULT_PARAGRAPH_SYNC_INTERVAL, DEFAULT_SCRIPT_FONT, DEFAULT_TARGET_FONT,
    DEFAULT_WORD_BATCH_SIZE,
};

const APP_DIR: &str = "ScriptSwitcher";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "SCRIPT_SWITCHER_CONFIG_DIR";

/// Validated runtime configuration.
///
/// Construction goes through [`RawConfig`] so every loaded value has passed
/// the validator; accessors on this type are therefore infallible.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Encoding identifier handed to the mapper.
    pub encoding: String,
    /// Substring (matched case-insensitively) marking legacy font names.
    pub legacy_font_marker: String,
    /// Unicode font written over converted ranges.
    pub target_font: String,
    /// Font family applied by script-run font substitution.
    pub script_font: String,

    pub(crate) preserve_font_size: bool,
    pub(crate) match_policy: String,
    pub(crate) word_batch_size: usize,
    pub(crate) font_batch_size: usize,
    pub(crate) paragraph_sync_interval: usize,
    pub(crate) split_terminal_punctuation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_owned(),
            legacy_font_marker: DEFAULT_LEGACY_FONT_MARKER.to_owned(),
            target_font: DEFAULT_TARGET_FONT.to_owned(),
            script_font: DEFAULT_SCRIPT_FONT.to_owned(),
            preserve_font_size: true,
            match_policy: DEFAULT_MATCH_POLICY.to_owned(),
            word_batch_size: DEFAULT_WORD_BATCH_SIZE,
            font_batch_size: DEFAULT_FONT_BATCH_SIZE,
            paragraph_sync_interval: DEFAULT_PARAGRAPH_SYNC_INTERVAL,
            split_terminal_punctuation: false,
        }
    }
}

pub fn config_path() -> io::Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir).join(CONFIG_FILE));
    }

    let home = std::env::var_os("HOME")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "HOME is not set"))?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join(APP_DIR)
        .join(CONFIG_FILE))
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    std::fs::create_dir_all(dir)
}

fn confy_err(e: confy::ConfyError) -> io::Error {
    io::Error::other(e)
}

pub fn load() -> io::Result<Config> {
    let path = config_path()?;
    ensure_parent_dir(&path)?;

    confy::load_path(&path).map_err(confy_err)
}

pub fn save(cfg: &Config) -> io::Result<()> {
    let path = config_path()?;
    ensure_parent_dir(&path)?;
    confy::store_path(path, cfg).map_err(confy_err)
}

impl TryFrom<RawConfig> for Config {
    type Error = String;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        if let Some(problem) = config_validator::find_invalid_setting(&raw) {
            return Err(problem);
        }

        Ok(Self {
            encoding: raw.encoding,
            legacy_font_marker: raw.legacy_font_marker,
            target_font: raw.target_font,
            script_font: raw.script_font,
            preserve_font_size: raw.preserve_font_size,
            match_policy: raw.match_policy,
            word_batch_size: raw.word_batch_size,
            font_batch_size: raw.font_batch_size,
            paragraph_sync_interval: raw.paragraph_sync_interval,
            split_terminal_punctuation: raw.split_terminal_punctuation,
        })
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawConfig::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl Config {
    /// Ignore-word matching policy; validated at load time.
    #[must_use]
    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy::parse(&self.match_policy).unwrap_or_default()
    }

    #[must_use]
    pub fn preserve_font_size(&self) -> bool {
        self.preserve_font_size
    }

    #[must_use]
    pub fn word_batch_size(&self) -> usize {
        self.word_batch_size
    }

    #[must_use]
    pub fn font_batch_size(&self) -> usize {
        self.font_batch_size
    }

    #[must_use]
    pub fn paragraph_sync_interval(&self) -> usize {
        self.paragraph_sync_interval
    }

    /// Word alphabet for font-boundary splitting, honoring the terminal
    /// punctuation toggle.
    #[must_use]
    pub fn word_delimiters(&self) -> &'static [char] {
        if self.split_terminal_punctuation {
            &WORD_DELIMITERS_WITH_PUNCT
        } else {
            &WORD_DELIMITERS
        }
    }

    /// Alphabet used when splitting for script detection; always includes
    /// terminal punctuation so sentence tails don't glue to script runs.
    #[must_use]
    pub fn script_delimiters(&self) -> &'static [char] {
        &WORD_DELIMITERS_WITH_PUNCT
    }
}
