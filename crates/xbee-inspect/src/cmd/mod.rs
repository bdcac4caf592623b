use clap::{Args, Subcommand};
use xbee_api::Codec;

use crate::error::CliResult;
use crate::output::OutputFormat;

pub mod commands;
pub mod decode;
pub mod encode;
pub mod schema;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a command frame body and print it as hex.
    Encode(EncodeArgs),
    /// Decode a hex response frame body.
    Decode(DecodeArgs),
    /// Dump the active schema tables.
    Schema(SchemaArgs),
    /// List command names with their API ids.
    Commands,
}

pub fn run(command: Command, codec: &Codec) -> CliResult<()> {
    match command {
        Command::Encode(args) => encode::run(args, codec),
        Command::Decode(args) => decode::run(args, codec),
        Command::Schema(args) => schema::run(args, codec),
        Command::Commands => commands::run(codec),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Command name (e.g. at, remote_at, tx).
    pub command: String,
    /// Field value as NAME=HEX (repeatable).
    #[arg(short = 'f', long = "field", value_name = "NAME=HEX", value_parser = encode::parse_hex_field)]
    pub fields: Vec<(String, Vec<u8>)>,
    /// Field value as NAME=TEXT, taken as raw ASCII bytes (repeatable).
    #[arg(short = 'a', long = "ascii", value_name = "NAME=TEXT", value_parser = encode::parse_ascii_field)]
    pub ascii: Vec<(String, Vec<u8>)>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame body as hex, starting with the tag byte. Whitespace is ignored.
    pub body: String,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}
