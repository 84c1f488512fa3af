use anyhow::Result;
use clap::Parser;

use animeunity::{Archive, CatalogClient};

use crate::tui::Tui;

#[derive(Parser, Debug)]
pub struct Args {
    /// Page to fetch
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,
}

pub async fn popular(client: CatalogClient, cmd: Args) -> Result<()> {
    let res = client.popular(cmd.page).await?;
    Tui::print_page("Popular", cmd.page, &res);

    Ok(())
}

pub async fn latest(client: CatalogClient, cmd: Args) -> Result<()> {
    let res = client.latest(cmd.page).await?;
    Tui::print_page("Latest", cmd.page, &res);

    Ok(())
}
