use anyhow::{Context, Result};
use clap::Parser;

use animeunity::filters::{Genre, SEASONS, STATUSES, Select, TYPES, YEARS};
use animeunity::{Archive, CatalogClient, FilterState};

use crate::tui::Tui;

/// Search the archive
#[derive(Parser, Debug, Default)]
pub struct Args {
    /// Title to search
    pub query: Vec<String>,

    /// Page to fetch
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Type (TV, Movie, OVA, ONA, Special)
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,

    /// Status (In Corso, Terminato)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Release year
    #[arg(short, long)]
    pub year: Option<String>,

    /// Season (winter, spring, summer, fall)
    #[arg(long)]
    pub season: Option<String>,

    /// Genre name, can be repeated
    #[arg(short, long = "genre")]
    pub genres: Vec<String>,

    /// Only dubbed anime
    #[arg(short, long)]
    pub dubbed: bool,

    /// Pick a random anime, other filters are ignored
    #[arg(short, long)]
    pub random: bool,
}

impl Args {
    fn filters(&self) -> Result<FilterState> {
        let genres = self
            .genres
            .iter()
            .map(|g| Genre::find(g).map(|g| g.id).with_context(|| format!("Unknown genre `{g}`")))
            .collect::<Result<_>>()?;

        let state = FilterState {
            random: self.random,
            dubbed: self.dubbed,
            kind: position(&TYPES, self.kind.as_deref())?,
            status: position(&STATUSES, self.status.as_deref())?,
            year: position(&YEARS, self.year.as_deref())?,
            season: position(&SEASONS, self.season.as_deref())?,
            genres,
        };

        Ok(state)
    }
}

fn position(select: &Select, input: Option<&str>) -> Result<usize> {
    let Some(input) = input else { return Ok(0) };

    select.position(input).with_context(|| {
        let labels = select.options.iter().map(|(l, _)| *l).collect::<Vec<_>>();
        format!("Invalid {} `{input}`, expected one of: {}", select.name, labels.join(", "))
    })
}

pub async fn execute(client: CatalogClient, cmd: Args) -> Result<()> {
    let filters = cmd.filters()?;
    let query = cmd.query.join(" ");

    let res = client.search(cmd.page, &query, &filters).await?;

    let title = match (filters.random, query.as_str()) {
        (true, _) => "Random".to_owned(),
        (_, "") => "Search".to_owned(),
        (_, q) => format!("Search `{q}`"),
    };
    Tui::print_page(&title, cmd.page, &res);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters() {
        let args = Args {
            kind: Some("movie".into()),
            year: Some("2020".into()),
            season: Some("summer".into()),
            genres: vec!["action".into(), "Slice of Life".into()],
            dubbed: true,
            ..Default::default()
        };

        let state = args.filters().unwrap();
        assert_eq!(state.kind, 2);
        assert_eq!(state.status, 0);
        assert_eq!(state.year, 6);
        assert_eq!(state.season, 3);
        assert_eq!(state.genres, vec![51, 50]);
        assert!(state.dubbed);

        let params = state.params();
        assert_eq!(params.kind, "Movie");
        assert_eq!(params.season, "summer");
    }

    #[test]
    fn test_wrong_filters() {
        let args = Args {
            status: Some("Sospeso".into()),
            ..Default::default()
        };
        assert!(args.filters().is_err());

        let args = Args {
            genres: vec!["Cooking".into()],
            ..Default::default()
        };
        assert!(args.filters().is_err());
    }
}
