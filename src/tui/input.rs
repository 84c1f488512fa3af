use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use rustyline::{ColorMode, DefaultEditor, config::Configurer};

use crate::range::Range;

/// Commands that can be parsed from user input
pub enum Command {
    Quit,
    All,
    Default(String),
}

/// Parses user input commands from the terminal
pub fn parse_commands() -> Result<Command> {
    let mut rl = DefaultEditor::new()?;
    rl.set_color_mode(ColorMode::Enabled);
    let prompt = "~❯ ".red().to_string();
    let cmd = match rl.readline(&prompt).map(|line| line.trim().to_owned()) {
        Ok(line) if line.len() == 1 && line.contains(['q', 'Q']) => Command::Quit,
        Ok(line) if line.is_empty() => Command::All,
        Ok(line) => Command::Default(line),
        Err(err) => bail!(err),
    };

    Ok(cmd)
}

/// Parses a selection string into a sorted list of 1-based indices
///
/// Supports formats like:
/// - "1,2,3" - individual selections
/// - "1-3" - range selection
/// - "2-" - open-ended range (up to content_len)
///
/// Indices past content_len are dropped.
pub fn parse_input(line: &str, content_len: usize) -> Result<Vec<usize>> {
    let last = u32::try_from(content_len).unwrap_or(u32::MAX);

    let mut selected = vec![];
    let selection = line
        .split_terminator(&[' ', ','])
        .filter(|s| !s.is_empty())
        .map(|s| s.trim());

    for s in selection {
        match s.parse::<Range>() {
            Ok(range) => selected.extend(range.expand(last).map(|i| i as usize)),
            Err(_) => bail!("Invalid input"),
        }
    }

    selected.retain(|i| (1..=content_len).contains(i));
    selected.sort_unstable();
    selected.dedup();

    Ok(selected)
}
