use anyhow::{Context, Result, ensure};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use animeunity::{Archive, CatalogClient, CatalogEntry, Episode, Video, default_client, parser};

use crate::config;
use crate::range::Range;
use crate::tui::Tui;

mod browse;
mod download;
mod info;
mod search;
mod stream;

/// Browse, stream and download anime from AnimeUnity
#[derive(Parser, Debug)]
#[command(author, version, about, arg_required_else_help = true)]
struct Args {
    /// Site address, overrides the configured one
    #[arg(long, global = true, env = "ANIMEUNITY_URL")]
    url: Option<String>,

    /// Print debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Most popular anime
    Popular(browse::Args),
    /// Latest updated anime
    Latest(browse::Args),
    #[command(alias = "s")]
    Search(search::Args),
    #[command(alias = "i")]
    Info(info::Args),
    Stream(stream::Args),
    #[command(alias = "d")]
    Download(download::Args),
    /// Print the search filters
    Filters,
    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(clap::Subcommand, Debug)]
enum ConfigCommand {
    /// Store the site address
    SetUrl { url: String },
    /// Print the site address in use
    Show,
    /// Delete the configuration file
    Clean,
}

pub async fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Popular(cmd) => browse::popular(client(args.url)?, cmd).await,
        Command::Latest(cmd) => browse::latest(client(args.url)?, cmd).await,
        Command::Search(cmd) => search::execute(client(args.url)?, cmd).await,
        Command::Info(cmd) => info::execute(client(args.url)?, cmd).await,
        Command::Stream(cmd) => stream::execute(client(args.url)?, cmd).await,
        Command::Download(cmd) => download::execute(client(args.url)?, cmd).await,
        Command::Filters => {
            Tui::print_filters(&client(args.url)?.filters());
            Ok(())
        }
        Command::Config(cmd) => configure(cmd, args.url),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("animeunity=debug,aunity=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn site_url(url: Option<String>) -> String {
    url.or_else(config::load_url)
        .unwrap_or_else(|| CatalogClient::REFERRER.to_owned())
}

fn client(url: Option<String>) -> Result<CatalogClient> {
    let base_url = site_url(url);
    tracing::debug!(%base_url, "using site");

    let client = CatalogClient::try_with_base_url(default_client()?, &base_url)?;

    Ok(client)
}

fn configure(cmd: ConfigCommand, url: Option<String>) -> Result<()> {
    match cmd {
        ConfigCommand::SetUrl { url } => {
            let url = url.trim_end_matches('/');
            CatalogClient::try_with_base_url(default_client()?, url)?;
            config::save_url(url)?;
            println!("Saved {url} in {}", config::config_path().display());
        }
        ConfigCommand::Show => println!("{}", site_url(url)),
        ConfigCommand::Clean => config::clean()?,
    }

    Ok(())
}

fn entry(input: &str) -> Result<CatalogEntry> {
    parser::entry_from_path(input)
        .with_context(|| format!("`{input}` is not an anime path (eg: /anime/5-demo)"))
}

/// Episodes of `input` in `range`, or chosen interactively without one.
async fn select_episodes(
    client: &CatalogClient,
    input: &str,
    range: Option<Range>,
) -> Result<(String, Vec<Episode>)> {
    let entry = entry(input)?;
    let detail = client.detail(&entry).await?;
    let episodes = client.episodes(&entry).await?;
    ensure!(!episodes.is_empty(), "No episode found");

    let title = match detail.entry.title.as_str() {
        "" => entry.slug.clone(),
        t => t.to_owned(),
    };

    let selected: Vec<_> = match range {
        Some(range) => episodes.into_iter().filter(|e| range.contains(e.number)).collect(),
        None => Tui::select_episodes(&title, &episodes)?,
    };
    ensure!(!selected.is_empty(), "No episode found in range");

    Ok((title, selected))
}

async fn resolve(client: &CatalogClient, episode: &Episode, quality: &str) -> Result<Video> {
    client
        .videos(episode)
        .await?
        .into_iter()
        .find(|v| v.quality == quality)
        .with_context(|| format!("No video found for {}", episode.name))
}
