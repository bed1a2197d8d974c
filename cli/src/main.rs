use std::io;

use anyhow::Result;
use clap::Parser;

use crate::session::{Options, Session};

mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Console minesweeper on an 18 x 25 board", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Do not suggest a first move
    #[arg(long)]
    no_hint: bool,

    /// Print each move's outcome as a JSON line instead of drawing the board
    #[arg(long)]
    json: bool,

    /// Print the mine layout when a game ends
    #[arg(long)]
    show_layout: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let options = Options {
        hint: !args.no_hint,
        json: args.json,
        show_layout: args.show_layout,
    };
    let mut session = Session::new(io::stdin().lock(), io::stdout().lock(), options, seed);
    session.run()
}
