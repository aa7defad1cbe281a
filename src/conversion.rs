pub mod plain;
pub mod scheduler;
mod selection;

pub use selection::{apply_script_font, convert_selection, detect_and_convert_by_font};
