//! Encoder and decoder bundled with the tables they run against.

use std::sync::Arc;

use crate::decode::decode_response;
use crate::encode::encode_command;
use crate::error::Result;
use crate::schema::SchemaTables;
use crate::value::{CommandFields, DecodedFrame};

/// A frame codec over a fixed set of schema tables.
///
/// Cloning is cheap; the tables are shared and never mutated, so one codec
/// can be used from any number of threads.
///
/// ```rust
/// use xbee_api::{Codec, CommandFields};
///
/// let codec = Codec::new();
/// let body = codec.encode("at", &CommandFields::new().with("command", b"MY")).unwrap();
/// assert_eq!(body, [0x08, 0x00, b'M', b'Y']);
///
/// let frame = codec.decode(&[0x89, 0x01, 0x00]).unwrap();
/// assert_eq!(frame.id(), "tx_status");
/// ```
#[derive(Debug, Clone)]
pub struct Codec {
    tables: Arc<SchemaTables>,
}

impl Codec {
    /// A codec over the built-in XBee WiFi tables.
    pub fn new() -> Self {
        Codec {
            tables: Arc::clone(SchemaTables::builtin_shared()),
        }
    }

    /// A codec over custom tables.
    pub fn with_tables(tables: impl Into<Arc<SchemaTables>>) -> Self {
        Codec {
            tables: tables.into(),
        }
    }

    /// The tables this codec encodes and decodes with.
    pub fn tables(&self) -> &SchemaTables {
        &self.tables
    }

    /// Encode a command frame body. See [`encode_command`].
    pub fn encode(&self, command: &str, fields: &CommandFields) -> Result<Vec<u8>> {
        encode_command(&self.tables, command, fields)
    }

    /// Decode a response frame body. See [`decode_response`].
    pub fn decode(&self, body: &[u8]) -> Result<DecodedFrame> {
        decode_response(&self.tables, body)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CommandSpec, FieldSpec, ResponseSpec};

    #[test]
    fn test_codec_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Codec>();
    }

    #[test]
    fn test_builtin_tables_shared() {
        let a = Codec::new();
        let b = Codec::default();
        assert!(Arc::ptr_eq(&a.tables, &b.tables));
        assert!(std::ptr::eq(a.tables(), SchemaTables::builtin()));
    }

    #[test]
    fn test_custom_tables() {
        const PING: &[FieldSpec] = &[
            FieldSpec::defaulted("id", &[0x42]),
            FieldSpec::fixed("seq", 1),
        ];
        const PONG: &[FieldSpec] = &[FieldSpec::fixed("seq", 1)];

        let tables = SchemaTables::new(
            vec![CommandSpec::new("ping", PING)],
            vec![ResponseSpec::new(0xC2, "pong", PONG, &[])],
        )
        .unwrap();
        let codec = Codec::with_tables(tables);

        let fields = CommandFields::new().with("seq", [0x07u8]);
        assert_eq!(codec.encode("ping", &fields).unwrap(), vec![0x42, 0x07]);
        assert_eq!(codec.decode(&[0xC2, 0x07]).unwrap().bytes("seq"), Some(&[0x07][..]));
        assert!(codec.encode("at", &fields).is_err());
    }

    #[test]
    fn test_concurrent_decode() {
        let codec = Codec::new();
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let codec = codec.clone();
                std::thread::spawn(move || codec.decode(&[0x89, i, 0x00]).unwrap())
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let frame = handle.join().unwrap();
            assert_eq!(frame.bytes("frame_id"), Some(&[i as u8][..]));
        }
    }
}
