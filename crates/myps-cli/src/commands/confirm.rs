use std::io::{BufRead, Write};

use anyhow::Context;

use crate::output::{Palette, paint};

pub const PROMPT: &str = "Are you sure you want to kill threads? [y/N]:";

/// Ask for confirmation and read one line of `input`.
///
/// Only a lone `y` or `Y` confirms. Anything else, including an empty line or
/// end of input, declines.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    palette: Option<Palette>,
) -> anyhow::Result<bool> {
    let prompt = palette.map_or_else(|| PROMPT.to_string(), |p| paint(PROMPT, p.value));
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(is_affirmative(&answer))
}

#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim_end_matches(['\r', '\n']), "y" | "Y")
}
