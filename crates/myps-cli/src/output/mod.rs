pub mod line;

pub use line::{IdLabel, LineFormatter, Palette};

/// Wrap `text` in an ANSI SGR color sequence.
#[must_use]
pub fn paint(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
