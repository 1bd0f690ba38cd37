use std::path::PathBuf;

use clap::Parser;
use clap_derive::{Parser, Subcommand};
use time::format_description::well_known::Rfc3339;
use time::UtcOffset;
use tracing::Level;
use tracing_subscriber::fmt::time::OffsetTime;

use crate::command::STDIO;
use crate::pack::PackError;

mod command;
mod io_ext;
mod pack;

/// Builds Minecraft Bedrock skin packs (.mcpack) from a JSON description.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Log every archive entry as it is written.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a skin pack from a request document.
    Build {
        /// Request JSON file, or '-' to read it from stdin.
        #[arg(short, long, default_value = STDIO)]
        input: PathBuf,

        /// Output directory. Defaults to ./output for packs and stdout for responses.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the {name, content} response instead of the .mcpack file.
        #[arg(short, long)]
        response: bool,
    },
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let res = match &args.command {
        Command::Build { input, output, response } => command::build::build(input, output, *response),
    };

    if let Err(err) = res {
        eprintln!("Failed to build skin pack: {:?}", err);
        let client_error = err.downcast_ref::<PackError>()
            .is_some_and(PackError::is_client_error);
        std::process::exit(if client_error { 2 } else { 1 });
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    // must be queried before any other thread is spawned
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_timer(OffsetTime::new(offset, Rfc3339))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
