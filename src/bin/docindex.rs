//! docindex CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::{Builder, Env};

use docindex::cli::args::DocIndexArgs;
use docindex::cli::commands::execute_command;

/// `DOCINDEX_LOG` overrides the level picked from `-v`/`-q`.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };

    Builder::from_env(Env::default().filter_or("DOCINDEX_LOG", default_level))
        .format(|buf, record| {
            writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
        })
        .init();
}

fn main() {
    let args = DocIndexArgs::parse();
    init_logging(args.verbosity());

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
