use script_switcher_core::text::convert::SpanStats;

use crate::surface::HostError;

/// High level outcome of a conversion action.
///
/// Designed for UI boundary code to decide whether to notify the user.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    Applied(ConvertStats),
    Noop,
    Failed(HostError),
}

impl ActionOutcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionOutcome::Applied(_) => "applied",
            ActionOutcome::Noop => "noop",
            ActionOutcome::Failed(_) => "failed",
        }
    }
}

/// Accounting across one conversion invocation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub units: usize,
    pub converted: usize,
    pub skipped: usize,
    pub mapping_failures: usize,
    pub replacements: usize,
    pub syncs: usize,
}

impl ConvertStats {
    pub fn absorb_span(&mut self, span: SpanStats) {
        self.units += span.units;
        self.converted += span.converted;
        self.skipped += span.skipped;
        self.mapping_failures += span.mapping_failures;
    }
}
