pub mod input;
pub mod progress;
pub mod selector;
pub mod style;
pub mod table;

use anyhow::Result;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use animeunity::{AnimeDetail, AnimePage, Episode, Filter};

use progress::ProgressManager;

/// Main TUI struct for managing terminal user interface
pub struct Tui {
    progress: ProgressManager,
}

impl Default for Tui {
    fn default() -> Self {
        Self::new()
    }
}

impl Tui {
    pub fn new() -> Self {
        Self {
            progress: ProgressManager::new(),
        }
    }

    pub fn add_bar(&self) -> ProgressBar {
        self.progress.add_bar()
    }

    pub fn select_episodes(title: &str, episodes: &[Episode]) -> Result<Vec<Episode>> {
        selector::select_episodes(title, episodes)
    }

    pub fn print_page(title: &str, page: u32, res: &AnimePage) {
        let rows = res
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| vec![(i + 1).to_string(), e.title.clone(), e.path.clone()])
            .collect();

        table::print_title(&format!("{title} (page {page})"));
        if res.entries.is_empty() {
            println!("{}", "No anime found".yellow());
        } else {
            println!("{}", table::build_entries_table(vec!["Index", "Title", "Path"], rows));
        }

        if res.has_next {
            println!("\n{} {}", "::".red(), format!("More results on page {}", u64::from(page) + 1).bold());
        }
    }

    pub fn print_detail(detail: &AnimeDetail, episodes: &[Episode]) {
        let entry = &detail.entry;
        let title = match entry.title.as_str() {
            "" => entry.path.as_str(),
            t => t,
        };
        table::print_title(title);

        let fields = [
            ("Status", detail.status.to_string()),
            ("Studio", detail.studio.clone()),
            ("Genres", detail.genre_line()),
            ("Cover", entry.thumbnail_url.clone()),
        ];
        for (name, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
            println!("{} {value}", format!("{name}:").green().bold());
        }
        if !detail.description.is_empty() {
            println!("\n{}", detail.description);
        }

        let rows = episodes
            .iter()
            .map(|e| vec![e.number.to_string(), e.name.clone()])
            .collect();
        println!("\n{}", table::build_episodes_table(vec!["Number", "Name"], rows, None));
    }

    pub fn print_filters(filters: &[Filter]) {
        let mut rows = vec![];
        for filter in filters {
            match filter {
                Filter::Select(select) => {
                    let options = select
                        .options
                        .iter()
                        .map(|(label, _)| *label)
                        .collect::<Vec<_>>()
                        .join(", ");
                    rows.push(vec![select.name.to_string(), "select".into(), options]);
                }
                Filter::CheckBox(name) => rows.push(vec![name.to_string(), "toggle".into(), String::new()]),
                Filter::Group(name, genres) => {
                    let options = genres.iter().map(|g| g.name).collect::<Vec<_>>().join(", ");
                    rows.push(vec![name.to_string(), "checkbox".into(), options]);
                }
                Filter::Header(_) | Filter::Separator => {}
            }
        }

        println!("{}", table::build_filters_table(vec!["Filter", "Kind", "Options"], rows));
    }

    pub fn print_err(err: anyhow::Error) {
        eprintln!("{} {}", "::".red(), format!("{err:#}").red());
    }
}
