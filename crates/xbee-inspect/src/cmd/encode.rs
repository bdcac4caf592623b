use xbee_api::{Codec, CommandFields};

use crate::cmd::EncodeArgs;
use crate::error::CliResult;

pub fn run(args: EncodeArgs, codec: &Codec) -> CliResult<()> {
    let fields: CommandFields = args.fields.into_iter().chain(args.ascii).collect();
    let body = codec.encode(&args.command, &fields)?;
    tracing::debug!(command = %args.command, len = body.len(), "encoded");
    println!("{}", hex::encode(body));
    Ok(())
}

fn split_field(arg: &str) -> Result<(&str, &str), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(format!("expected NAME=VALUE, got '{}'", arg)),
    }
}

pub fn parse_hex_field(arg: &str) -> Result<(String, Vec<u8>), String> {
    let (name, value) = split_field(arg)?;
    let bytes = hex::decode(value).map_err(|e| format!("invalid hex for '{}': {}", name, e))?;
    Ok((name.to_string(), bytes))
}

pub fn parse_ascii_field(arg: &str) -> Result<(String, Vec<u8>), String> {
    let (name, value) = split_field(arg)?;
    Ok((name.to_string(), value.as_bytes().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_field() {
        assert_eq!(
            parse_hex_field("dest_addr=0013a200").unwrap(),
            ("dest_addr".to_string(), vec![0x00, 0x13, 0xA2, 0x00])
        );
        assert_eq!(
            parse_hex_field("parameter=").unwrap(),
            ("parameter".to_string(), Vec::new())
        );
        assert!(parse_hex_field("command").is_err());
        assert!(parse_hex_field("=01").is_err());
        assert!(parse_hex_field("frame_id=0").is_err());
        assert!(parse_hex_field("frame_id=zz").is_err());
    }

    #[test]
    fn test_parse_ascii_field() {
        assert_eq!(
            parse_ascii_field("command=NI").unwrap(),
            ("command".to_string(), b"NI".to_vec())
        );
        assert_eq!(
            parse_ascii_field("parameter=a=b").unwrap(),
            ("parameter".to_string(), b"a=b".to_vec())
        );
    }
}
