//! Free-text conversion for the side input box.

use script_switcher_core::text::{
    convert::{ConvertRequest, convert_multiline},
    ignore::IgnoreCache,
    mapper::ScriptMapper,
};

use crate::{
    config::Config,
    domain::outcome::ConvertStats,
};

/// Converts multi-line free text, line by line.
///
/// Blank lines and every whitespace character are preserved verbatim, and a
/// line whose units all fail to map comes back as typed. Input that trims to
/// nothing is returned unchanged.
#[tracing::instrument(level = "trace", skip_all)]
pub fn convert_text<M: ScriptMapper>(
    text: &str,
    mapper: &M,
    ignore_text: &str,
    cfg: &Config,
    cache: &mut IgnoreCache,
) -> (String, ConvertStats) {
    if text.trim().is_empty() {
        tracing::trace!("blank input");
        return (text.to_owned(), ConvertStats::default());
    }

    let index = cache.index_for(ignore_text);
    let req = ConvertRequest {
        encoding: &cfg.encoding,
        index,
        policy: cfg.match_policy(),
        mapper,
    };

    let (out, span) = convert_multiline(text, cfg.word_delimiters(), &req);
    let mut stats = ConvertStats::default();
    stats.absorb_span(span);
    tracing::trace!(
        units = stats.units,
        converted = stats.converted,
        mapping_failures = stats.mapping_failures,
        "free text converted"
    );
    (out, stats)
}
