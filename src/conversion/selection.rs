//! Selection conversion entry points.

use script_switcher_core::text::{
    convert::{ConvertRequest, convert_span_text, strip_trailing_line_breaks},
    decision::{Decision, is_structural},
    ignore::IgnoreCache,
    mapper::ScriptMapper,
    tokenize::LINE_BREAK_DELIMITERS,
};

use super::scheduler::{self, Replacement, RewriteBatch};
use crate::{
    config::Config,
    domain::{
        outcome::{ActionOutcome, ConvertStats},
        selector::{ARABIC_SCRIPT_RANGES, contains_script, font_decision, is_legacy_font},
    },
    surface::{FontInfo, HostError, TextSurface},
};

/// Converts the current selection regardless of font metadata.
///
/// The selection is split at paragraph granularity and every sub-range is
/// converted against the ignore list; commits run in reverse positional
/// order. A host that reports the whole selection as one range (block
/// selections) gets a single-shot whole-span rewrite instead.
#[tracing::instrument(level = "trace", skip_all)]
pub fn convert_selection<S, M>(
    surface: &mut S,
    mapper: &M,
    ignore_text: &str,
    cfg: &Config,
    cache: &mut IgnoreCache,
) -> ActionOutcome
where
    S: TextSurface,
    M: ScriptMapper,
{
    run(convert_selection_impl(
        surface,
        mapper,
        ignore_text,
        cfg,
        cache,
    ))
}

/// Font-gated conversion of the current selection.
///
/// A selection whose whole extent already reports the legacy font is
/// converted at paragraph granularity in one pass, trading a single extra
/// font query against one per word. Mixed-font selections degrade to
/// word-granularity classification with a font query per unit.
#[tracing::instrument(level = "trace", skip_all)]
pub fn detect_and_convert_by_font<S, M>(
    surface: &mut S,
    mapper: &M,
    ignore_text: &str,
    cfg: &Config,
    cache: &mut IgnoreCache,
) -> ActionOutcome
where
    S: TextSurface,
    M: ScriptMapper,
{
    run(detect_and_convert_impl(
        surface,
        mapper,
        ignore_text,
        cfg,
        cache,
    ))
}

/// Applies the configured script font to every selection word containing
/// characters of the substitution-target script. Font-only writes; the text
/// itself is never mutated.
#[tracing::instrument(level = "trace", skip_all)]
pub fn apply_script_font<S: TextSurface>(surface: &mut S, cfg: &Config) -> ActionOutcome {
    run(apply_script_font_impl(surface, cfg))
}

fn run(result: Result<ActionOutcome, HostError>) -> ActionOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(kind = e.as_str(), error = %e, "host rejected conversion");
            ActionOutcome::Failed(e)
        }
    }
}

fn convert_selection_impl<S: TextSurface>(
    surface: &mut S,
    mapper: &dyn ScriptMapper,
    ignore_text: &str,
    cfg: &Config,
    cache: &mut IgnoreCache,
) -> Result<ActionOutcome, HostError> {
    let selection = surface.selection()?;
    let text = surface.text_of(&selection)?;
    if text.trim().is_empty() {
        tracing::trace!("no selection");
        return Ok(ActionOutcome::Noop);
    }

    let index = cache.index_for(ignore_text);
    let req = ConvertRequest {
        encoding: &cfg.encoding,
        index,
        policy: cfg.match_policy(),
        mapper,
    };

    let ranges = surface.split(&selection, &LINE_BREAK_DELIMITERS)?;
    let mut stats = ConvertStats::default();
    let mut batch = RewriteBatch::new();

    if ranges.len() <= 1 {
        tracing::trace!("single-range selection, converting in one shot");
        let (converted, span) = convert_span_text(&text, cfg.word_delimiters(), &req);
        stats.absorb_span(span);
        let converted = strip_trailing_line_breaks(&converted);
        if converted != text {
            batch.push(Replacement {
                range: selection.clone(),
                position: 0,
                text: Some(converted.to_owned()),
                font: None,
            });
        }
    } else {
        for (position, range) in ranges.iter().enumerate() {
            let line = surface.text_of(range)?;
            if line.is_empty() {
                continue;
            }
            let (converted, span) = convert_span_text(&line, cfg.word_delimiters(), &req);
            stats.absorb_span(span);
            let converted = strip_trailing_line_breaks(&converted);
            if converted == line {
                continue;
            }
            batch.push(Replacement {
                range: range.clone(),
                position,
                text: Some(converted.to_owned()),
                font: None,
            });
        }
    }

    finish(surface, batch, cfg.word_batch_size(), stats)
}

fn detect_and_convert_impl<S: TextSurface>(
    surface: &mut S,
    mapper: &dyn ScriptMapper,
    ignore_text: &str,
    cfg: &Config,
    cache: &mut IgnoreCache,
) -> Result<ActionOutcome, HostError> {
    let selection = surface.selection()?;
    let text = surface.text_of(&selection)?;
    if text.trim().is_empty() {
        tracing::trace!("no selection");
        return Ok(ActionOutcome::Noop);
    }

    let index = cache.index_for(ignore_text);
    let req = ConvertRequest {
        encoding: &cfg.encoding,
        index,
        policy: cfg.match_policy(),
        mapper,
    };

    let whole = surface.font_of(&selection)?;
    let uniform = whole
        .name
        .as_deref()
        .is_some_and(|name| is_legacy_font(name, &cfg.legacy_font_marker));

    if uniform {
        tracing::trace!(font = ?whole.name, "uniform legacy span, paragraph pass");
        convert_uniform_span(surface, &selection, &req, cfg)
    } else {
        tracing::trace!(font = ?whole.name, "mixed fonts, word-granularity pass");
        convert_words_in_span(surface, &selection, &req, cfg)
    }
}

/// Paragraph-granularity pass over a span whose whole extent reports the
/// legacy font. Each paragraph is still font-checked once so a stray
/// non-legacy paragraph inside the selection stays untouched, and its size
/// is carried over when the target Unicode font is applied.
fn convert_uniform_span<S: TextSurface>(
    surface: &mut S,
    selection: &S::Range,
    req: &ConvertRequest<'_>,
    cfg: &Config,
) -> Result<ActionOutcome, HostError> {
    let paragraphs = surface.split(selection, &LINE_BREAK_DELIMITERS)?;
    let mut stats = ConvertStats::default();
    let mut batch = RewriteBatch::new();

    for (position, paragraph) in paragraphs.iter().enumerate() {
        let text = surface.text_of(paragraph)?;
        if text.trim().is_empty() {
            continue;
        }
        let font = surface.font_of(paragraph)?;
        if let Decision::Skip(reason) = font_decision(&font, &cfg.legacy_font_marker) {
            stats.skipped += 1;
            tracing::trace!(reason = reason.as_str(), "paragraph skipped");
            continue;
        }

        let (converted, span) = convert_span_text(&text, cfg.word_delimiters(), req);
        stats.absorb_span(span);
        batch.push(Replacement {
            range: paragraph.clone(),
            position,
            text: Some(strip_trailing_line_breaks(&converted).to_owned()),
            font: Some(target_font(cfg, &font)),
        });
    }

    finish(surface, batch, cfg.paragraph_sync_interval(), stats)
}

/// Word-granularity pass with a font query per unit.
fn convert_words_in_span<S: TextSurface>(
    surface: &mut S,
    selection: &S::Range,
    req: &ConvertRequest<'_>,
    cfg: &Config,
) -> Result<ActionOutcome, HostError> {
    let words = surface.split(selection, cfg.word_delimiters())?;
    let mut stats = ConvertStats::default();
    let mut batch = RewriteBatch::new();

    for (position, word) in words.iter().enumerate() {
        stats.units += 1;
        let content = surface.text_of(word)?;
        let trimmed = content.trim();
        if trimmed.is_empty() || is_structural(trimmed) {
            stats.skipped += 1;
            continue;
        }
        if let Some(reason) = req.index.matches(trimmed, req.policy) {
            stats.skipped += 1;
            tracing::trace!(word = %trimmed, reason = reason.as_str(), "unit skipped");
            continue;
        }
        let font = surface.font_of(word)?;
        if let Decision::Skip(reason) = font_decision(&font, &cfg.legacy_font_marker) {
            stats.skipped += 1;
            tracing::trace!(word = %trimmed, reason = reason.as_str(), "unit skipped");
            continue;
        }

        match req.mapper.map(req.encoding, &content) {
            Ok(converted) => {
                stats.converted += 1;
                batch.push(Replacement {
                    range: word.clone(),
                    position,
                    text: Some(converted),
                    font: Some(target_font(cfg, &font)),
                });
            }
            Err(e) => {
                stats.mapping_failures += 1;
                tracing::warn!(word = %trimmed, error = %e, "unit mapping failed, original kept");
            }
        }
    }

    finish(surface, batch, cfg.word_batch_size(), stats)
}

fn apply_script_font_impl<S: TextSurface>(
    surface: &mut S,
    cfg: &Config,
) -> Result<ActionOutcome, HostError> {
    let selection = surface.selection()?;
    let text = surface.text_of(&selection)?;
    if text.trim().is_empty() || !contains_script(&text, &ARABIC_SCRIPT_RANGES) {
        tracing::trace!("no script runs in selection");
        return Ok(ActionOutcome::Noop);
    }

    let words = surface.split(&selection, cfg.script_delimiters())?;
    let mut stats = ConvertStats::default();
    let mut batch = RewriteBatch::new();

    for (position, word) in words.iter().enumerate() {
        stats.units += 1;
        let content = surface.text_of(word)?;
        let trimmed = content.trim();
        if trimmed.is_empty() || !contains_script(trimmed, &ARABIC_SCRIPT_RANGES) {
            stats.skipped += 1;
            continue;
        }
        batch.push(Replacement {
            range: word.clone(),
            position,
            text: None,
            font: Some(FontInfo::named(&cfg.script_font)),
        });
    }

    if batch.is_empty() {
        return Ok(ActionOutcome::Noop);
    }
    finish(surface, batch, cfg.font_batch_size(), stats)
}

fn target_font(cfg: &Config, original: &FontInfo) -> FontInfo {
    FontInfo {
        name: Some(cfg.target_font.clone()),
        size: cfg.preserve_font_size().then_some(original.size).flatten(),
    }
}

fn finish<S: TextSurface>(
    surface: &mut S,
    batch: RewriteBatch<S::Range>,
    batch_size: usize,
    mut stats: ConvertStats,
) -> Result<ActionOutcome, HostError> {
    if batch.is_empty() {
        tracing::trace!("nothing to rewrite");
        return Ok(ActionOutcome::Applied(stats));
    }
    let commit = scheduler::commit(surface, batch, batch_size)?;
    stats.replacements = commit.applied;
    stats.syncs = commit.syncs;
    tracing::trace!(
        replacements = stats.replacements,
        syncs = stats.syncs,
        "selection rewrites committed"
    );
    Ok(ActionOutcome::Applied(stats))
}
