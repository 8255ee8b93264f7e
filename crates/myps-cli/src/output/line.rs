//! Tab-separated `label:value` lines, one per session.

use myps_core::SessionRecord;

use super::paint;

/// INFO is cut to this many characters unless `--full` is given.
pub const MAX_INFO_CHARS: usize = 110;

/// Label of the leading id field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdLabel {
    /// Sessions that were only reported.
    Id,
    /// Sessions a kill was issued for (or that were already gone).
    Killed,
}

impl IdLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Killed => "KILLED",
        }
    }
}

/// ANSI color codes used when stdout is a terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub label: &'static str,
    pub warn_label: &'static str,
    pub value: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            label: "32",
            warn_label: "31",
            value: "35",
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LineFormatter {
    full: bool,
    palette: Option<Palette>,
}

impl LineFormatter {
    /// `palette` is `None` for plain, pipe-safe output.
    #[must_use]
    pub const fn new(full: bool, palette: Option<Palette>) -> Self {
        Self { full, palette }
    }

    /// Render `record` as one newline-terminated line.
    #[must_use]
    pub fn format(&self, record: &SessionRecord, label: IdLabel) -> String {
        let id_is_warning = label == IdLabel::Killed;
        let fields = [
            (label.as_str(), record.id.to_string(), id_is_warning),
            ("USER", record.user.clone(), false),
            ("HOST", record.host.clone(), false),
            ("DB", record.db.clone(), false),
            ("COMMAND", record.command.clone(), false),
            ("TIME", record.elapsed_seconds.to_string(), false),
            ("STATE", record.state.clone(), false),
            ("INFO", truncate_info(&record.info, self.full).to_string(), false),
        ];

        let mut line = fields
            .iter()
            .map(|(label, value, warn)| self.field(label, value, *warn))
            .collect::<Vec<_>>()
            .join("\t");
        line.push('\n');
        line
    }

    fn field(&self, label: &str, value: &str, warn: bool) -> String {
        let value = escape_value(value);
        match self.palette {
            Some(palette) => {
                let label_color = if warn {
                    palette.warn_label
                } else {
                    palette.label
                };
                format!(
                    "{}:{}",
                    paint(label, label_color),
                    paint(&value, palette.value)
                )
            }
            None => format!("{label}:{value}"),
        }
    }
}

/// Cut `info` to [`MAX_INFO_CHARS`] characters unless `full` is set.
///
/// Counts `char`s, not bytes, and never splits one. No ellipsis is added.
#[must_use]
pub fn truncate_info(info: &str, full: bool) -> &str {
    if full {
        return info;
    }
    match info.char_indices().nth(MAX_INFO_CHARS) {
        Some((cut, _)) => &info[..cut],
        None => info,
    }
}

/// Escape control characters and backslashes so a value cannot break the
/// tab-separated field layout. Double quotes are left as they are.
#[must_use]
pub fn escape_value(value: &str) -> String {
    let quoted = format!("{value:?}");
    quoted[1..quoted.len() - 1].replace("\\\"", "\"")
}
