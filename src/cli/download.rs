use clap::Parser;

use std::path::PathBuf;

use animeunity::anime::QUALITIES;
use animeunity::{CatalogClient, Video, parser};

use crate::range::Range;
use crate::tui::Tui;

use anyhow::{Context, Result, ensure};
use futures::stream::StreamExt;
use indicatif::ProgressBar;
use reqwest::header::{CONTENT_LENGTH, RANGE};
use reqwest::{Client, StatusCode};
use tokio::{fs, io::AsyncWriteExt};
use tokio_stream as stream;

/// Download anime
#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct Args {
    /// Anime path or url (eg: /anime/5-demo)
    pub input: String,

    /// Save files in a folder named after the anime
    #[arg(short = 'D', long = "default-dir")]
    pub auto_dir: bool,

    /// Maximum number of simultaneous downloads allowed
    #[arg(
        default_value = "4",
        short = 'm',
        long = "max-concurrent",
        name = "MAX"
    )]
    pub dim_buff: usize,

    /// Root path where store files
    #[arg(default_value = ".", short, long)]
    pub dir: PathBuf,

    /// Override existent files
    #[arg(short, long)]
    pub force: bool,

    /// Episodes to download (es. `1-4` or `3`), interactive choice if missing
    #[arg(short = 'r', long = "range")]
    pub range: Option<Range>,

    /// Video quality
    #[arg(short, long, default_value = "1080p", value_parser = QUALITIES)]
    pub quality: String,
}

pub async fn execute(client: CatalogClient, cmd: Args) -> Result<()> {
    let (title, episodes) = super::select_episodes(&client, &cmd.input, cmd.range).await?;

    let mut parent = cmd.dir.clone();
    if cmd.auto_dir {
        parent.push(dir_name(&title));
    }

    let mut videos = vec![];
    for episode in &episodes {
        let video = super::resolve(&client, episode, &cmd.quality).await?;
        videos.push((format!("Ep. {:02} {title}", episode.number), video));
    }

    let tui = Tui::new();
    let http = Client::new();
    let pool = videos.into_iter().map(|(msg, video)| {
        let pb = tui.add_bar();
        fetch(&http, video, parent.clone(), msg, cmd.force, pb)
    });

    let results = stream::iter(pool)
        .buffer_unordered(cmd.dim_buff.max(1))
        .collect::<Vec<_>>()
        .await;

    for err in results.into_iter().filter_map(Result::err) {
        Tui::print_err(err);
    }

    Ok(())
}

async fn fetch(
    client: &Client,
    video: Video,
    mut path: PathBuf,
    msg: String,
    force: bool,
    pb: ProgressBar,
) -> Result<()> {
    let filename = parser::parse_filename(&video.url)
        .with_context(|| format!("Unable to get a filename from {}", video.url))?;

    let source_size: u64 = client
        .head(&video.url)
        .headers(video.headers.clone())
        .send()
        .await?
        .error_for_status()?
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|ct_len| ct_len.to_str().ok())
        .and_then(|ct_len| ct_len.parse().ok())
        .unwrap_or_default();

    let mut dest = {
        if !path.exists() {
            fs::create_dir_all(&path).await?;
        }
        path.push(&filename);

        fs::OpenOptions::new()
            .append(!force)
            .truncate(force)
            .write(force)
            .create(true)
            .open(&path)
            .await?
    };

    let mut file_size = dest.metadata().await?.len();
    // unknown length means every existing file gets resumed
    ensure!(
        source_size == 0 || file_size < source_size,
        "{filename} already exists"
    );

    let mut source = client
        .get(&video.url)
        .headers(video.headers)
        .header(RANGE, format!("bytes={file_size}-"))
        .send()
        .await?
        .error_for_status()?;

    if file_size > 0 && source.status() != StatusCode::PARTIAL_CONTENT {
        tracing::debug!(%filename, "range ignored by server, restarting");
        dest.set_len(0).await?;
        file_size = 0;
    }

    pb.set_position(file_size);
    pb.set_length(source_size);
    pb.set_message(msg);

    while let Some(chunk) = source.chunk().await? {
        dest.write_all(&chunk).await?;
        pb.inc(chunk.len() as u64);
    }

    pb.finish_with_message(pb.message() + " 👍");

    Ok(())
}

fn dir_name(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
