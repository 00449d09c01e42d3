//! Command-line entry for the dynconfig editor.

use std::path::PathBuf;

use clap::Parser;

/// Schema-free TUI configuration editor.
#[derive(Parser)]
#[command(name = "dynconfig", version, about)]
struct Cli {
    /// Configuration file to edit (.toml or .json).
    config: PathBuf,

    /// Comments file; defaults to `<stem>-comments.json` next to the config.
    #[arg(long)]
    comments: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let saved = dynconfig::run_file(&cli.config, cli.comments.as_deref()).await?;
    if saved {
        println!("Configuration saved to {}", cli.config.display());
    } else {
        println!("Configuration unchanged");
    }
    Ok(())
}
