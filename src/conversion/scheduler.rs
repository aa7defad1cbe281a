//! Rewrite scheduling: dependency-safe ordering and batched host commits.

use std::thread;

use crate::surface::{FontInfo, HostError, TextSurface};

/// One pending rewrite against a host range.
#[derive(Clone, Debug)]
pub struct Replacement<R> {
    pub range: R,
    /// Ordinal of the range within its split, monotone in start offset.
    pub position: usize,
    /// Replacement text; `None` leaves the text untouched (font-only write).
    pub text: Option<String>,
    /// Font written after the text lands; `None` fields stay untouched.
    pub font: Option<FontInfo>,
}

/// Ordered list of pending rewrites.
///
/// Spans within one uncommitted batch never overlap; positions are unique
/// because every item comes from a distinct sub-range of a single split.
#[derive(Debug)]
pub struct RewriteBatch<R> {
    items: Vec<Replacement<R>>,
}

impl<R> Default for RewriteBatch<R> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<R> RewriteBatch<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Replacement<R>) {
        debug_assert!(
            self.items.iter().all(|it| it.position != item.position),
            "duplicate rewrite position {}",
            item.position
        );
        self.items.push(item);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Commit accounting.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CommitStats {
    pub applied: usize,
    pub syncs: usize,
}

/// Applies `batch` to the host in reverse positional order, highest first.
///
/// Replacing text at an earlier offset shifts the offsets of later text
/// still pending replacement, so when handles share one materialized offset
/// space, forward order corrupts every pending handle behind the edit.
/// Reverse order is a correctness invariant of this function, never to be
/// silently switched. Hosts with independently addressable handles are
/// order-insensitive and simply get the same discipline.
///
/// A host `sync` lands after every `batch_size` rewrites and once more for
/// the remainder, bounding host queue growth; the voluntary yield between
/// batches keeps the surrounding event loop responsive on large documents.
///
/// A host failure abandons the remaining rewrites of this invocation;
/// already-flushed batches stand.
pub fn commit<S: TextSurface>(
    surface: &mut S,
    mut batch: RewriteBatch<S::Range>,
    batch_size: usize,
) -> Result<CommitStats, HostError> {
    let batch_size = batch_size.max(1);
    batch.items.sort_by(|a, b| b.position.cmp(&a.position));

    let mut stats = CommitStats::default();
    let mut pending = 0usize;

    for item in &batch.items {
        // Font first: the handle still denotes the pre-edit extent, and the
        // host carries the run over the incoming text when it lands.
        if let Some(font) = &item.font {
            surface.set_font(&item.range, font)?;
        }
        if let Some(text) = &item.text {
            surface.replace_text(&item.range, text)?;
        }
        stats.applied += 1;
        pending += 1;

        if pending >= batch_size {
            surface.sync()?;
            stats.syncs += 1;
            pending = 0;
            tracing::trace!(applied = stats.applied, "rewrite batch flushed");
            thread::yield_now();
        }
    }

    if pending > 0 {
        surface.sync()?;
        stats.syncs += 1;
    }

    Ok(stats)
}
