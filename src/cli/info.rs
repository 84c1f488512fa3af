use anyhow::Result;
use clap::Parser;

use animeunity::{Archive, CatalogClient};

use crate::tui::Tui;

/// Show details and episodes of an anime
#[derive(Parser, Debug)]
pub struct Args {
    /// Anime path or url (eg: /anime/5-demo)
    pub input: String,
}

pub async fn execute(client: CatalogClient, cmd: Args) -> Result<()> {
    let entry = super::entry(&cmd.input)?;

    let detail = client.detail(&entry).await?;
    let episodes = client.episodes(&entry).await?;
    Tui::print_detail(&detail, &episodes);

    Ok(())
}
