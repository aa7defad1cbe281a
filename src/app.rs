//! Cross-invocation application state.
//!
//! `App` owns the pieces that outlive a single conversion call: the
//! validated configuration and the ignore-list index cache. Everything else
//! (units, font runs, rewrite batches) is created fresh per invocation and
//! discarded after commit.

use script_switcher_core::text::{ignore::IgnoreCache, mapper::ScriptMapper};

use crate::{
    config::Config,
    conversion,
    domain::outcome::{ActionOutcome, ConvertStats},
    surface::TextSurface,
};

/// Conversion engine state shared across invocations.
///
/// The ignore index is rebuilt lazily, only when the supplied ignore text
/// hashes to new content; callers hold one `App` per editing session.
#[derive(Debug, Default)]
pub struct App {
    config: Config,
    ignore: IgnoreCache,
}

impl App {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ignore: IgnoreCache::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of ignore-index builds that actually ran.
    #[must_use]
    pub fn ignore_rebuilds(&self) -> u64 {
        self.ignore.rebuilds()
    }

    /// Converts the current selection regardless of font metadata.
    pub fn convert_selection<S, M>(
        &mut self,
        surface: &mut S,
        mapper: &M,
        ignore_text: &str,
    ) -> ActionOutcome
    where
        S: TextSurface,
        M: ScriptMapper,
    {
        conversion::convert_selection(surface, mapper, ignore_text, &self.config, &mut self.ignore)
    }

    /// Font-gated conversion of the current selection.
    pub fn detect_and_convert_by_font<S, M>(
        &mut self,
        surface: &mut S,
        mapper: &M,
        ignore_text: &str,
    ) -> ActionOutcome
    where
        S: TextSurface,
        M: ScriptMapper,
    {
        conversion::detect_and_convert_by_font(
            surface,
            mapper,
            ignore_text,
            &self.config,
            &mut self.ignore,
        )
    }

    /// Applies the configured script font to detected script runs.
    pub fn apply_script_font<S: TextSurface>(&mut self, surface: &mut S) -> ActionOutcome {
        conversion::apply_script_font(surface, &self.config)
    }

    /// Converts free text for the side input box.
    pub fn convert_text<M: ScriptMapper>(
        &mut self,
        text: &str,
        mapper: &M,
        ignore_text: &str,
    ) -> (String, ConvertStats) {
        conversion::plain::convert_text(text, mapper, ignore_text, &self.config, &mut self.ignore)
    }
}
