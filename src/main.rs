mod cli;
mod config;
mod range;
mod tui;

use tui::Tui;

#[tokio::main]
async fn main() {
    if let Err(err) = cli::run().await {
        Tui::print_err(err);
        std::process::exit(1);
    }
}
