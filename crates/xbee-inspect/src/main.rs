mod cmd;
mod error;
mod logging;
mod output;

use std::path::PathBuf;

use clap::Parser;
use xbee_api::{Codec, SchemaTables};

use crate::cmd::Command;
use crate::error::CliResult;

#[derive(Parser, Debug)]
#[command(name = "xbee-inspect", version, about = "Encode and decode XBee API frame bodies")]
struct Cli {
    /// YAML schema configuration to use instead of the built-in tables.
    #[arg(long, value_name = "FILE", env = "XBEE_SCHEMA", global = true)]
    schema: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

fn load_codec(schema: Option<&PathBuf>) -> CliResult<Codec> {
    match schema {
        Some(path) => {
            let tables = SchemaTables::load(path)?;
            tracing::info!(
                path = %path.display(),
                commands = tables.commands().len(),
                responses = tables.responses().count(),
                "loaded schema"
            );
            Ok(Codec::with_tables(tables))
        }
        None => Ok(Codec::new()),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = load_codec(cli.schema.as_ref()).and_then(|codec| cmd::run(cli.command, &codec));

    if let Err(err) = result {
        tracing::error!("{}", err);
        std::process::exit(error::FAILURE);
    }
}
