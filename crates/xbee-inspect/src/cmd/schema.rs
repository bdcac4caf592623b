use xbee_api::Codec;

use crate::cmd::SchemaArgs;
use crate::error::CliResult;
use crate::output::render;

pub fn run(args: SchemaArgs, codec: &Codec) -> CliResult<()> {
    let config = codec.tables().to_config();
    println!("{}", render(&config, args.format)?);
    Ok(())
}
