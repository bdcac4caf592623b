use xbee_api::Codec;

use crate::cmd::DecodeArgs;
use crate::error::CliResult;
use crate::output::render;

pub fn run(args: DecodeArgs, codec: &Codec) -> CliResult<()> {
    let body = parse_body(&args.body)?;
    let frame = codec.decode(&body)?;
    tracing::debug!(id = frame.id(), fields = frame.len(), "decoded");
    println!("{}", render(&frame, args.format)?);
    Ok(())
}

/// Hex frame body, tolerating whitespace and `:` separators.
fn parse_body(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body("890100").unwrap(), vec![0x89, 0x01, 0x00]);
        assert_eq!(parse_body("89 01:00\n").unwrap(), vec![0x89, 0x01, 0x00]);
        assert!(parse_body("89 0").is_err());
    }
}
