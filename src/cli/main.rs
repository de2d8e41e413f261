use std::path::PathBuf;

use clap::Parser;
use gigbook::config::Config;

mod commands;

use commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "gigbook")]
#[command(about = "Inspect and edit a local gigbook session", long_about = None)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Folder holding the session (defaults to $GIGBOOK_ROOT, the config file, then the data dir)"
    )]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Cli::parse();
    let config = Config::discover();
    let mut store = config.open_store(args.root.as_deref())?;

    args.command.run(&config, &mut store).await
}
