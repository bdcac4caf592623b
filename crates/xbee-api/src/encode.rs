//! Command frame encoding.

use bytes::BufMut;

use crate::error::{ApiError, Result};
use crate::schema::{FieldLength, SchemaTables};
use crate::value::CommandFields;

/// Encode the command `name` into a frame body.
///
/// Each field takes the caller's value, falling back to its default. Fixed
/// fields must end up with exactly their declared length; the variable
/// field is appended verbatim, or omitted when not provided. Fields the
/// command does not declare are ignored.
pub fn encode_command(tables: &SchemaTables, name: &str, fields: &CommandFields) -> Result<Vec<u8>> {
    let spec = tables
        .command(name)
        .ok_or_else(|| ApiError::UnknownCommand(name.to_string()))?;

    for provided in fields.names().filter(|field| spec.field(field).is_none()) {
        log::debug!("{}: ignoring undeclared field '{}'", name, provided);
    }

    let variable_len = spec
        .variable_field()
        .and_then(|field| fields.get(&field.name))
        .map_or(0, <[u8]>::len);
    let mut buf = Vec::with_capacity(spec.min_len() + variable_len);

    for field in spec.fields.iter() {
        let value = fields.get(&field.name).or(field.default.as_deref());

        match (field.length, value) {
            (FieldLength::Fixed(len), Some(value)) if value.len() != len => {
                return Err(ApiError::FieldLength {
                    command: name.to_string(),
                    field: field.name.to_string(),
                    expected: len,
                    actual: value.len(),
                });
            }
            (FieldLength::Fixed(_), None) => {
                return Err(ApiError::MissingField {
                    command: name.to_string(),
                    field: field.name.to_string(),
                });
            }
            (_, Some(value)) => buf.put_slice(value),
            (FieldLength::Variable, None) => {}
        }
    }

    log::trace!("{}: encoded {} bytes", name, buf.len());
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(name: &str, fields: CommandFields) -> Result<Vec<u8>> {
        encode_command(SchemaTables::builtin(), name, &fields)
    }

    #[test]
    fn test_encode_at_with_defaults() {
        let body = encode("at", CommandFields::new().with("command", b"MY")).unwrap();
        assert_eq!(body, vec![0x08, 0x00, b'M', b'Y']);
    }

    #[test]
    fn test_encode_at_with_parameter() {
        let fields = CommandFields::new()
            .with("frame_id", [0x52u8])
            .with("command", b"NJ")
            .with("parameter", [0xFFu8]);
        assert_eq!(encode("at", fields).unwrap(), vec![0x08, 0x52, b'N', b'J', 0xFF]);
    }

    #[test]
    fn test_encode_remote_at() {
        let fields = CommandFields::new()
            .with("frame_id", [0x01u8])
            .with("dest_addr_long", [0x00u8, 0x13, 0xA2, 0x00, 0x40, 0x52, 0x2B, 0xAA])
            .with("command", b"D0")
            .with("parameter", [0x05u8]);
        let body = encode("remote_at", fields).unwrap();
        assert_eq!(
            body,
            vec![0x07, 0x01, 0x00, 0x13, 0xA2, 0x00, 0x40, 0x52, 0x2B, 0xAA, 0x02, b'D', b'0', 0x05]
        );
    }

    #[test]
    fn test_encode_tx_without_data() {
        let fields = CommandFields::new().with("dest_addr", [0x56u8, 0x78]);
        assert_eq!(encode("tx", fields).unwrap(), vec![0x01, 0x00, 0x56, 0x78, 0x00]);
    }

    #[test]
    fn test_tx_aliases_encode_identically() {
        let fields = CommandFields::new()
            .with("dest_addr", [0x00u8, 0x13, 0xA2, 0x00, 0x40, 0x0A, 0x01, 0x27])
            .with("data", b"Hi");
        assert_eq!(
            encode("tx_64", fields.clone()).unwrap(),
            encode("tx_long_addr", fields).unwrap()
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = encode("xyz", CommandFields::new()).unwrap_err();
        assert!(matches!(err, ApiError::UnknownCommand(ref name) if name == "xyz"));
    }

    #[test]
    fn test_missing_required_field() {
        let err = encode("at", CommandFields::new()).unwrap_err();
        assert!(matches!(
            err,
            ApiError::MissingField { ref command, ref field } if command == "at" && field == "command"
        ));
    }

    #[test]
    fn test_wrong_field_length() {
        let err = encode("at", CommandFields::new().with("command", b"MYX")).unwrap_err();
        assert!(matches!(
            err,
            ApiError::FieldLength { expected: 2, actual: 3, .. }
        ));

        // Overriding a default is checked the same way.
        let fields = CommandFields::new()
            .with("command", b"MY")
            .with("frame_id", [0x01u8, 0x02]);
        assert!(matches!(
            encode("at", fields),
            Err(ApiError::FieldLength { ref field, .. }) if field == "frame_id"
        ));
    }

    #[test]
    fn test_undeclared_fields_are_ignored() {
        let fields = CommandFields::new()
            .with("command", b"MY")
            .with("bogus", [0x01u8, 0x02, 0x03]);
        assert_eq!(encode("at", fields).unwrap(), vec![0x08, 0x00, b'M', b'Y']);
    }
}
