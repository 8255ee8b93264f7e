use std::io::IsTerminal;

use crate::output::Palette;

/// Colors are used only on an interactive stdout and when `NO_COLOR` is unset.
#[must_use]
pub fn palette() -> Option<Palette> {
    let is_tty = std::io::stdout().is_terminal();
    (is_tty && std::env::var_os("NO_COLOR").is_none()).then(Palette::default)
}
