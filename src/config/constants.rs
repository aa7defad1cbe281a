pub const DEFAULT_ENCODING: &str = "bijoy";
pub const DEFAULT_LEGACY_FONT_MARKER: &str = "sutonnymj";
pub const DEFAULT_TARGET_FONT: &str = "Kalpurush";
pub const DEFAULT_SCRIPT_FONT: &str = "Al Majeed Quranic Font";
pub const DEFAULT_MATCH_POLICY: &str = "exact_and_prefix";
pub const DEFAULT_WORD_BATCH_SIZE: usize = 20;
pub const DEFAULT_FONT_BATCH_SIZE: usize = 500;
pub const DEFAULT_PARAGRAPH_SYNC_INTERVAL: usize = 5;
