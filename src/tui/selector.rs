use std::process::exit;

use anyhow::{Result, ensure};

use animeunity::Episode;

use super::input::{Command, parse_commands, parse_input};
use super::table::{build_episodes_table, print_prompt, print_title};

/// Selects episodes from an anime
pub fn select_episodes(title: &str, episodes: &[Episode]) -> Result<Vec<Episode>> {
    ensure!(!episodes.is_empty(), "No episode found");

    let rows = episodes
        .iter()
        .enumerate()
        .map(|(i, e)| vec![(i + 1).to_string(), e.number.to_string(), e.name.clone()])
        .collect();

    let table = build_episodes_table(vec!["Index", "Number", "Name"], rows, None);

    print_title(title);
    println!("{table}");
    print_prompt("Make your selection (eg: 1 2 3 or 1-3) [<enter> for all, <q> for exit]");

    let selected: Vec<_> = match parse_commands()? {
        Command::Default(input) => parse_input(&input, episodes.len())?
            .iter()
            .filter_map(|i| episodes.get(i - 1).cloned())
            .collect(),
        Command::All => episodes.to_vec(),
        Command::Quit => exit(0),
    };
    println!();

    ensure!(!selected.is_empty(), "Invalid input");

    Ok(selected)
}
