//! In-memory reference host.
//!
//! Backs the test suite and doubles as a plain-buffer host for terminal use.
//! Handles are byte ranges into the current text, so an out-of-order
//! replacement invalidates later handles exactly the way a shared offset
//! space does in a real host; the scheduler's reverse-order commit is
//! directly observable here.

use std::ops::Range;

use script_switcher_core::text::tokenize::{UnitKind, tokenize};

use super::{FontInfo, FontRun, HostError, TextSurface};

/// Plain text buffer with font runs and byte-range handles.
///
/// Writes land immediately; [`TextSurface::sync`] only records the flush
/// point, which lets tests assert the scheduler's batching discipline.
#[derive(Debug, Default)]
pub struct BufferSurface {
    text: String,
    fonts: Vec<FontRun>,
    selection: Range<usize>,
    syncs: usize,
}

impl BufferSurface {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            fonts: Vec::new(),
            selection: 0..text.len(),
            syncs: 0,
        }
    }

    /// Declares a font run over `span`. Runs declared later shadow earlier
    /// ones where they overlap.
    #[must_use]
    pub fn with_font(mut self, span: Range<usize>, font: FontInfo) -> Self {
        self.fonts.insert(0, FontRun { span, font });
        self
    }

    pub fn select(&mut self, span: Range<usize>) {
        self.selection = span;
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn sync_count(&self) -> usize {
        self.syncs
    }

    #[must_use]
    pub fn font_runs(&self) -> &[FontRun] {
        &self.fonts
    }

    fn check(&self, range: &Range<usize>) -> Result<(), HostError> {
        let valid = range.start <= range.end
            && range.end <= self.text.len()
            && self.text.is_char_boundary(range.start)
            && self.text.is_char_boundary(range.end);
        if valid {
            Ok(())
        } else {
            Err(HostError::Read(format!("stale handle {range:?}")))
        }
    }

    fn dominant_font(&self, range: &Range<usize>) -> FontInfo {
        self.fonts
            .iter()
            .find(|run| run.span.start < range.end.max(range.start + 1) && range.start < run.span.end)
            .map(|run| run.font.clone())
            .unwrap_or_default()
    }

    fn shift_spans(&mut self, edited: &Range<usize>, new_len: usize) {
        let old_len = edited.end - edited.start;
        let shift = |pos: usize| -> usize {
            if pos <= edited.start {
                pos
            } else if pos >= edited.end {
                pos - old_len + new_len
            } else {
                edited.start + new_len.min(pos - edited.start)
            }
        };
        for run in &mut self.fonts {
            run.span = shift(run.span.start)..shift(run.span.end);
        }
        self.selection = shift(self.selection.start)..shift(self.selection.end);
    }
}

impl TextSurface for BufferSurface {
    type Range = Range<usize>;

    fn selection(&mut self) -> Result<Self::Range, HostError> {
        Ok(self.selection.clone())
    }

    fn text_of(&mut self, range: &Self::Range) -> Result<String, HostError> {
        self.check(range)?;
        Ok(self.text[range.clone()].to_owned())
    }

    fn split(
        &mut self,
        range: &Self::Range,
        delimiters: &[char],
    ) -> Result<Vec<Self::Range>, HostError> {
        self.check(range)?;
        let base = range.start;
        let ranges = tokenize(&self.text[range.clone()], delimiters)
            .into_iter()
            .filter(|unit| unit.kind != UnitKind::Whitespace)
            .map(|unit| base + unit.start..base + unit.end)
            .collect();
        Ok(ranges)
    }

    fn font_of(&mut self, range: &Self::Range) -> Result<FontInfo, HostError> {
        self.check(range)?;
        Ok(self.dominant_font(range))
    }

    fn replace_text(&mut self, range: &Self::Range, text: &str) -> Result<(), HostError> {
        self.check(range)
            .map_err(|_| HostError::Write(format!("stale handle {range:?}")))?;
        self.text.replace_range(range.clone(), text);
        self.shift_spans(range, text.len());
        Ok(())
    }

    fn set_font(&mut self, range: &Self::Range, font: &FontInfo) -> Result<(), HostError> {
        self.check(range)
            .map_err(|_| HostError::Write(format!("stale handle {range:?}")))?;
        let current = self.dominant_font(range);
        let merged = FontInfo {
            name: font.name.clone().or(current.name),
            size: font.size.or(current.size),
        };
        self.fonts.insert(
            0,
            FontRun {
                span: range.clone(),
                font: merged,
            },
        );
        Ok(())
    }

    fn sync(&mut self) -> Result<(), HostError> {
        self.syncs += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use script_switcher_core::text::tokenize::{LINE_BREAK_DELIMITERS, WORD_DELIMITERS};

    use super::*;

    #[test]
    fn split_returns_word_and_delimiter_ranges_in_order() {
        let mut surface = BufferSurface::new("one two(three)");
        let selection = surface.selection().unwrap();
        let ranges = surface.split(&selection, &WORD_DELIMITERS).unwrap();
        let texts: Vec<String> = ranges
            .iter()
            .map(|r| surface.text_of(r).unwrap())
            .collect();
        assert_eq!(texts, vec!["one", "two", "(", "three", ")"]);
    }

    #[test]
    fn split_at_line_granularity_keeps_spaces_inside_ranges() {
        let mut surface = BufferSurface::new("one two\nthree");
        let selection = surface.selection().unwrap();
        let ranges = surface.split(&selection, &LINE_BREAK_DELIMITERS).unwrap();
        assert_eq!(ranges.len(), 2);
        assert_eq!(surface.text_of(&ranges[0]).unwrap(), "one two");
    }

    #[test]
    fn replace_shifts_later_font_runs() {
        let mut surface =
            BufferSurface::new("ab cd").with_font(3..5, FontInfo::named("SutonnyMJ"));
        surface.replace_text(&(0..2), "longer").unwrap();
        assert_eq!(surface.text(), "longer cd");
        let font = surface.font_of(&(7..9)).unwrap();
        assert_eq!(font.name.as_deref(), Some("SutonnyMJ"));
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut surface = BufferSurface::new("short");
        assert!(surface.text_of(&(0..99)).is_err());
    }

    #[test]
    fn set_font_preserves_unspecified_fields() {
        let mut surface = BufferSurface::new("word").with_font(
            0..4,
            FontInfo {
                name: Some("SutonnyMJ".to_owned()),
                size: Some(14.0),
            },
        );
        surface.set_font(&(0..4), &FontInfo::named("Kalpurush")).unwrap();
        let font = surface.font_of(&(0..4)).unwrap();
        assert_eq!(font.name.as_deref(), Some("Kalpurush"));
        assert_eq!(font.size, Some(14.0));
    }

    #[test]
    fn sync_only_counts_flush_points() {
        let mut surface = BufferSurface::new("text");
        surface.sync().unwrap();
        surface.sync().unwrap();
        assert_eq!(surface.sync_count(), 2);
        assert_eq!(surface.text(), "text");
    }
}
