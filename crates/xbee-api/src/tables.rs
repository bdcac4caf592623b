//! Built-in XBee WiFi frame layouts.
//!
//! Command layouts start with the `id` field carrying the API identifier as
//! its default; response structures start after the tag byte.

use crate::constants::*;
use crate::schema::{layout_is_valid, CommandSpec, FieldSpec, HookSpec, ParseHook, ResponseSpec};

// ============================================================================
// Commands
// ============================================================================

const AT: &[FieldSpec] = &[
    FieldSpec::defaulted("id", &[API_ID_AT]),
    FieldSpec::defaulted("frame_id", &[0x00]),
    FieldSpec::fixed("command", 2),
    FieldSpec::variable("parameter"),
];

const QUEUED_AT: &[FieldSpec] = &[
    FieldSpec::defaulted("id", &[API_ID_QUEUED_AT]),
    FieldSpec::defaulted("frame_id", &[0x00]),
    FieldSpec::fixed("command", 2),
    FieldSpec::variable("parameter"),
];

const REMOTE_AT: &[FieldSpec] = &[
    FieldSpec::defaulted("id", &[API_ID_REMOTE_AT]),
    FieldSpec::defaulted("frame_id", &[0x00]),
    FieldSpec::defaulted("dest_addr_long", &[0x00; 8]),
    // 0x02: apply changes on the remote immediately
    FieldSpec::defaulted("options", &[0x02]),
    FieldSpec::fixed("command", 2),
    FieldSpec::variable("parameter"),
];

const TX_64: &[FieldSpec] = &[
    FieldSpec::defaulted("id", &[API_ID_TX_64]),
    FieldSpec::defaulted("frame_id", &[0x00]),
    FieldSpec::fixed("dest_addr", 8),
    FieldSpec::defaulted("options", &[0x00]),
    FieldSpec::variable("data"),
];

const TX: &[FieldSpec] = &[
    FieldSpec::defaulted("id", &[API_ID_TX]),
    FieldSpec::defaulted("frame_id", &[0x00]),
    FieldSpec::fixed("dest_addr", 2),
    FieldSpec::defaulted("options", &[0x00]),
    FieldSpec::variable("data"),
];

/// Outbound command layouts, in lookup order.
///
/// `tx_long_addr` and `tx_64` are two names for the same frame.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new("at", AT),
    CommandSpec::new("queued_at", QUEUED_AT),
    CommandSpec::new("remote_at", REMOTE_AT),
    CommandSpec::new("tx_long_addr", TX_64),
    CommandSpec::new("tx_64", TX_64),
    CommandSpec::new("tx", TX),
];

// ============================================================================
// Responses
// ============================================================================

const RX_64: &[FieldSpec] = &[
    FieldSpec::fixed("source_addr", 8),
    FieldSpec::fixed("rssi", 1),
    FieldSpec::fixed("options", 1),
    FieldSpec::variable("rf_data"),
];

const RX_16: &[FieldSpec] = &[
    FieldSpec::fixed("source_addr", 2),
    FieldSpec::fixed("rssi", 1),
    FieldSpec::fixed("options", 1),
    FieldSpec::variable("rf_data"),
];

const RX_IO_64: &[FieldSpec] = &[
    FieldSpec::fixed("source_addr_long", 8),
    FieldSpec::fixed("rssi", 1),
    FieldSpec::fixed("options", 1),
    FieldSpec::variable("samples"),
];

const RX_IO_16: &[FieldSpec] = &[
    FieldSpec::fixed("source_addr", 2),
    FieldSpec::fixed("rssi", 1),
    FieldSpec::fixed("options", 1),
    FieldSpec::variable("samples"),
];

const RX_IPV4: &[FieldSpec] = &[
    FieldSpec::fixed("src_ip", 4),
    FieldSpec::fixed("dest_port", 4),
    FieldSpec::fixed("src_port", 4),
    FieldSpec::fixed("protocol", 1),
    FieldSpec::variable("rf_data"),
];

const TX_STATUS: &[FieldSpec] = &[FieldSpec::fixed("frame_id", 1), FieldSpec::fixed("status", 1)];

const STATUS: &[FieldSpec] = &[FieldSpec::fixed("status", 1)];

const AT_RESPONSE: &[FieldSpec] = &[
    FieldSpec::fixed("frame_id", 1),
    FieldSpec::fixed("command", 2),
    FieldSpec::fixed("status", 1),
    FieldSpec::variable("parameter"),
];

const WIFI_REMOTE_AT_RESPONSE: &[FieldSpec] = &[
    FieldSpec::fixed("frame_id", 1),
    FieldSpec::fixed("source_addr_long", 8),
    FieldSpec::fixed("command", 2),
    FieldSpec::fixed("status", 1),
    FieldSpec::variable("parameter"),
];

const REMOTE_AT_RESPONSE: &[FieldSpec] = &[
    FieldSpec::fixed("frame_id", 1),
    FieldSpec::fixed("source_addr_long", 8),
    FieldSpec::fixed("source_addr", 2),
    FieldSpec::fixed("command", 2),
    FieldSpec::fixed("status", 1),
    FieldSpec::variable("parameter"),
];

const SAMPLE_HOOKS: &[HookSpec] = &[HookSpec::new("samples", ParseHook::IoSamples)];

const IS_AT_HOOKS: &[HookSpec] = &[HookSpec::new("parameter", ParseHook::IsAtResponse)];

/// Inbound response layouts.
pub const RESPONSES: &[ResponseSpec] = &[
    ResponseSpec::new(API_ID_WIFI_RX_64, "wifi_rx_64", RX_64, &[]),
    ResponseSpec::new(API_ID_RX, "rx", RX_16, &[]),
    ResponseSpec::new(
        API_ID_RX_IO_DATA_LONG_ADDR,
        "rx_io_data_long_addr",
        RX_IO_64,
        SAMPLE_HOOKS,
    ),
    ResponseSpec::new(API_ID_WIFI_RX_IPV4, "wifi_rx_ipv4", RX_IPV4, &[]),
    ResponseSpec::new(API_ID_RX_IO_DATA, "rx_io_data", RX_IO_16, SAMPLE_HOOKS),
    ResponseSpec::new(API_ID_WIFI_RX_IO_DATA, "wifi_rx_io_data", RX_IO_64, SAMPLE_HOOKS),
    ResponseSpec::new(API_ID_TX_STATUS, "tx_status", TX_STATUS, &[]),
    ResponseSpec::new(API_ID_STATUS, "status", STATUS, &[]),
    ResponseSpec::new(API_ID_AT_RESPONSE, "at_response", AT_RESPONSE, IS_AT_HOOKS),
    ResponseSpec::new(
        API_ID_WIFI_REMOTE_AT_RESPONSE,
        "wifi_remote_at_response",
        WIFI_REMOTE_AT_RESPONSE,
        IS_AT_HOOKS,
    ),
    ResponseSpec::new(
        API_ID_REMOTE_AT_RESPONSE,
        "remote_at_response",
        REMOTE_AT_RESPONSE,
        IS_AT_HOOKS,
    ),
];

const _: () = {
    assert!(layout_is_valid(AT));
    assert!(layout_is_valid(QUEUED_AT));
    assert!(layout_is_valid(REMOTE_AT));
    assert!(layout_is_valid(TX_64));
    assert!(layout_is_valid(TX));
    assert!(layout_is_valid(RX_64));
    assert!(layout_is_valid(RX_16));
    assert!(layout_is_valid(RX_IO_64));
    assert!(layout_is_valid(RX_IO_16));
    assert!(layout_is_valid(RX_IPV4));
    assert!(layout_is_valid(TX_STATUS));
    assert!(layout_is_valid(STATUS));
    assert!(layout_is_valid(AT_RESPONSE));
    assert!(layout_is_valid(WIFI_REMOTE_AT_RESPONSE));
    assert!(layout_is_valid(REMOTE_AT_RESPONSE));
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldLength, SchemaTables};

    #[test]
    fn test_builtin_tables_validate() {
        let tables = SchemaTables::builtin();
        assert_eq!(tables.commands().len(), COMMANDS.len());
        assert_eq!(tables.responses().count(), RESPONSES.len());
    }

    #[test]
    fn test_command_ids() {
        let tables = SchemaTables::builtin();
        let ids: Vec<(&str, Option<u8>)> = tables
            .commands()
            .iter()
            .map(|c| (&*c.name, c.api_id()))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("at", Some(0x08)),
                ("queued_at", Some(0x09)),
                ("remote_at", Some(0x07)),
                ("tx_long_addr", Some(0x00)),
                ("tx_64", Some(0x00)),
                ("tx", Some(0x01)),
            ]
        );
        // Both 64-bit transmit names share an id; lookup returns the first.
        assert_eq!(tables.command_by_id(0x00).map(|c| &*c.name), Some("tx_long_addr"));
    }

    #[test]
    fn test_remote_at_defaults() {
        let remote_at = SchemaTables::builtin().command("remote_at").unwrap();
        let dest = remote_at.field("dest_addr_long").unwrap();
        assert_eq!(dest.length, FieldLength::Fixed(8));
        assert_eq!(dest.default.as_deref(), Some(&[0u8; 8][..]));
        assert_eq!(remote_at.field("options").unwrap().default.as_deref(), Some(&[0x02][..]));
    }

    #[test]
    fn test_responses_have_at_most_one_variable_field() {
        for response in SchemaTables::builtin().responses() {
            let variable = response.structure.iter().filter(|f| f.length.is_variable()).count();
            assert!(variable <= 1, "{} has {} variable fields", response.name, variable);
        }
    }

    #[test]
    fn test_hooked_responses() {
        let tables = SchemaTables::builtin();
        for name in ["rx_io_data_long_addr", "rx_io_data", "wifi_rx_io_data"] {
            let spec = tables.response_by_name(name).unwrap();
            assert_eq!(&*spec.hooks, SAMPLE_HOOKS);
        }
        for name in AT_ECHO_RESPONSES {
            let spec = tables.response_by_name(name).unwrap();
            assert_eq!(&*spec.hooks, IS_AT_HOOKS);
        }
        assert!(tables.response(API_ID_TX_STATUS).unwrap().hooks.is_empty());
    }
}
