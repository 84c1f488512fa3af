use clap::Parser;

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Result;
use tokio::process::Command;
use which::which;

use animeunity::CatalogClient;
use animeunity::anime::{QUALITIES, VIDEO_REFERER};

use crate::range::Range;

/// Stream anime in a media player
#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct Args {
    /// Anime path or url (eg: /anime/5-demo)
    pub input: String,

    /// Episodes to play (es. `1-4` or `3`), interactive choice if missing
    #[arg(short = 'r', long = "range")]
    pub range: Option<Range>,

    /// Video quality
    #[arg(short, long, default_value = "1080p", value_parser = QUALITIES)]
    pub quality: String,
}

pub async fn execute(client: CatalogClient, cmd: Args) -> Result<()> {
    let (_, episodes) = super::select_episodes(&client, &cmd.input, cmd.range).await?;

    let mut referrer = VIDEO_REFERER.to_owned();
    let mut urls = vec![];
    for episode in &episodes {
        let video = super::resolve(&client, episode, &cmd.quality).await?;
        if let Some(r) = video.referer() {
            referrer = r.to_owned();
        }
        urls.push(video.url);
    }

    let (cmd, cmd_referrer) = match which("mpv") {
        Ok(c) => (c, format!("--referrer={referrer}")),
        _ => (
            which("vlc").unwrap_or_else(|_| PathBuf::from(r"C:\Program Files\VideoLAN\VLC\vlc")),
            format!("--http-referrer={referrer}"),
        ),
    };
    tracing::debug!(player = %cmd.display(), count = urls.len(), "starting player");

    Command::new(cmd)
        .arg(&cmd_referrer)
        .args(urls)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(())
}
