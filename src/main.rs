use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use rusty_bnb::config::load_config;
use rusty_bnb::ListingShell;

/// Interactive statistics for short-term rental listings
#[derive(Parser, Debug)]
#[command(version, about = "Interactive statistics for short-term rental listings")]
struct Args {
    /// Listings CSV file (prompted for when omitted)
    path: Option<PathBuf>,

    /// Configuration file (defaults to ~/.config/rusty-bnb/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Default folder offered by the export command
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let loaded = load_config(args.config.as_deref());
    if let Some(warning) = &loaded.warning {
        eprintln!("Warning: {warning}");
    }
    let mut config = loaded.config;
    if let Some(dir) = args.export_dir {
        config.export_dir = dir;
    }

    let stdin = io::stdin();
    let mut shell = ListingShell::new(stdin.lock(), io::stdout(), config);

    // A path that fails to load falls back to the prompt.
    let loaded = match &args.path {
        Some(path) => shell.load_reported(path)?,
        None => false,
    };
    if !loaded && !shell.load_interactive()? {
        return Ok(());
    }
    shell.run()
}
