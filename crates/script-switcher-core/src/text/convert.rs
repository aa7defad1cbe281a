use std::thread;

use super::{
    decision::{Decision, SkipReason, is_structural},
    ignore::{IgnoreIndex, MatchPolicy},
    mapper::ScriptMapper,
    tokenize::{LINE_BREAK_DELIMITERS, TextUnit, UnitKind, tokenize},
};

/// Voluntary yield interval for bulk text.
///
/// A scheduling courtesy to the host UI thread; carries no ordering
/// obligation.
const YIELD_INTERVAL: usize = 1000;

/// Everything a span conversion needs besides the text itself.
pub struct ConvertRequest<'a> {
    pub encoding: &'a str,
    pub index: &'a IgnoreIndex,
    pub policy: MatchPolicy,
    pub mapper: &'a dyn ScriptMapper,
}

/// Per-span accounting, surfaced to callers for logging.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SpanStats {
    pub units: usize,
    pub converted: usize,
    pub skipped: usize,
    pub mapping_failures: usize,
}

impl SpanStats {
    pub fn absorb(&mut self, other: SpanStats) {
        self.units += other.units;
        self.converted += other.converted;
        self.skipped += other.skipped;
        self.mapping_failures += other.mapping_failures;
    }
}

/// Decides one unit against the ignore list.
///
/// Whitespace always passes through; units that trim to nothing or are pure
/// layout marks are structural; the rest consult the index under `policy`.
#[must_use]
pub fn decide_unit(unit: &TextUnit<'_>, index: &IgnoreIndex, policy: MatchPolicy) -> Decision {
    if unit.kind == UnitKind::Whitespace {
        return Decision::Skip(SkipReason::Whitespace);
    }
    let trimmed = unit.content.trim();
    if trimmed.is_empty() || is_structural(trimmed) {
        return Decision::Skip(SkipReason::StructuralDelimiter);
    }
    match index.matches(trimmed, policy) {
        Some(reason) => Decision::Skip(reason),
        None => Decision::Convert,
    }
}

/// Converts one tokenized span.
///
/// Units are decided and assembled in original left-to-right order; skipped
/// units and whitespace are copied verbatim, so output unit count equals
/// input unit count and document structure survives. A unit-level mapping
/// failure substitutes the original text for that unit only; conversion of
/// one unit never aborts conversion of the span.
pub fn convert_span_text(
    text: &str,
    delimiters: &[char],
    req: &ConvertRequest<'_>,
) -> (String, SpanStats) {
    let units = tokenize(text, delimiters);
    let mut out = String::with_capacity(text.len().saturating_mul(2));
    let mut stats = SpanStats {
        units: units.len(),
        ..SpanStats::default()
    };

    for (i, unit) in units.iter().enumerate() {
        if i > 0 && i % YIELD_INTERVAL == 0 {
            thread::yield_now();
        }

        match decide_unit(unit, req.index, req.policy) {
            Decision::Skip(_) => {
                stats.skipped += 1;
                out.push_str(unit.content);
            }
            Decision::Convert => match req.mapper.map(req.encoding, unit.content) {
                Ok(mapped) => {
                    stats.converted += 1;
                    out.push_str(&mapped);
                }
                Err(_) => {
                    stats.mapping_failures += 1;
                    out.push_str(unit.content);
                }
            },
        }
    }

    (out, stats)
}

/// Strips line-break characters from the tail of an assembled replacement.
///
/// When a multi-line range collapses into a single host insertion, a
/// trailing break would mint a spurious blank paragraph.
#[must_use]
pub fn strip_trailing_line_breaks(text: &str) -> &str {
    text.trim_end_matches(&LINE_BREAK_DELIMITERS[..])
}

/// Line-by-line conversion of free text.
///
/// Line breaks, blank lines and all other whitespace are preserved verbatim;
/// each line is converted independently so one malformed line cannot poison
/// the rest. Unlike host-bound replacements, nothing is stripped, so the
/// round-trip invariant holds exactly here.
pub fn convert_multiline(
    text: &str,
    word_delimiters: &[char],
    req: &ConvertRequest<'_>,
) -> (String, SpanStats) {
    let mut out = String::with_capacity(text.len().saturating_mul(2));
    let mut stats = SpanStats::default();

    for unit in tokenize(text, &LINE_BREAK_DELIMITERS) {
        if unit.kind == UnitKind::Word {
            let (line, line_stats) = convert_span_text(unit.content, word_delimiters, req);
            stats.absorb(line_stats);
            out.push_str(&line);
        } else {
            out.push_str(unit.content);
        }
    }

    (out, stats)
}
