use xbee_api::{Codec, CommandSpec};

use crate::error::CliResult;

pub fn run(codec: &Codec) -> CliResult<()> {
    for command in codec.tables().commands() {
        println!("{}", describe(command));
    }
    Ok(())
}

/// One listing line: name, API id and field names.
fn describe(command: &CommandSpec) -> String {
    let id = match command.api_id() {
        Some(id) => format!("0x{:02X}", id),
        None => "-".to_string(),
    };
    let fields: Vec<&str> = command.fields.iter().map(|f| &*f.name).collect();
    format!("{:<14} {:<5} {}", command.name, id, fields.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xbee_api::SchemaTables;

    #[test]
    fn test_describe() {
        let at = SchemaTables::builtin().command("at").unwrap();
        assert_eq!(describe(at), "at             0x08  id frame_id command parameter");
    }
}
