//! Host document capability consumed by the conversion pipeline.
//!
//! Any concrete host (document editor, plain buffer, terminal) implements
//! [`TextSurface`]; the pipeline receives the surface by injection and never
//! touches environment globals.

pub mod buffer;

use std::{fmt, ops::Range};

/// Presentation metadata attached to a contiguous text region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontInfo {
    pub name: Option<String>,
    pub size: Option<f32>,
}

impl FontInfo {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            size: None,
        }
    }
}

/// A contiguous region carrying one dominant font, as reported by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct FontRun {
    pub span: Range<usize>,
    pub font: FontInfo,
}

/// Errors surfaced by the host document surface.
///
/// Any of these abandons the remaining batches of the current invocation;
/// already-committed batches stand. Partial application is documented
/// behavior, not rolled back.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HostError {
    /// The host rejected a queued read/write flush.
    Sync(String),
    /// A read against a stale or out-of-bounds handle.
    Read(String),
    /// An in-place replacement or font write failed.
    Write(String),
}

impl HostError {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HostError::Sync(_) => "sync",
            HostError::Read(_) => "read",
            HostError::Write(_) => "write",
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Sync(detail) => write!(f, "host sync failed: {detail}"),
            HostError::Read(detail) => write!(f, "host read failed: {detail}"),
            HostError::Write(detail) => write!(f, "host write failed: {detail}"),
        }
    }
}

impl std::error::Error for HostError {}

/// Abstract host document surface.
///
/// Reads return immediately; writes may be queued by the host until
/// [`TextSurface::sync`] flushes them. Handles produced by [`TextSurface::split`]
/// stay addressable until an overlapping region is mutated, which is why the
/// scheduler commits in reverse positional order.
pub trait TextSurface {
    /// Addressable handle to a sub-range of the document.
    type Range: Clone;

    /// The current selection. May denote an empty region.
    fn selection(&mut self) -> Result<Self::Range, HostError>;

    /// Plain text of `range`.
    fn text_of(&mut self, range: &Self::Range) -> Result<String, HostError>;

    /// Splits `range` along `delimiters` into sub-ranges in document order,
    /// each with its own addressable handle. Whitespace-only regions are not
    /// returned; non-whitespace delimiters come back as their own ranges.
    fn split(
        &mut self,
        range: &Self::Range,
        delimiters: &[char],
    ) -> Result<Vec<Self::Range>, HostError>;

    /// Dominant font of `range`.
    fn font_of(&mut self, range: &Self::Range) -> Result<FontInfo, HostError>;

    /// Replaces the text of `range` in place.
    fn replace_text(&mut self, range: &Self::Range, text: &str) -> Result<(), HostError>;

    /// Writes font metadata over `range`. `None` fields are left untouched.
    fn set_font(&mut self, range: &Self::Range, font: &FontInfo) -> Result<(), HostError>;

    /// Flushes queued writes and resolves once the host has applied them.
    fn sync(&mut self) -> Result<(), HostError>;
}
