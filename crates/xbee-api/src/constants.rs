//! Protocol constants
//!
//! API identifiers, IO sample layout values and AT status codes used by the
//! XBee WiFi API frame set.

// ============================================================================
// Command API Identifiers (host → module)
// ============================================================================

/// Transmit request to a 64-bit address.
pub const API_ID_TX_64: u8 = 0x00;
/// Transmit request to a 16-bit address.
pub const API_ID_TX: u8 = 0x01;
/// Remote AT command request.
pub const API_ID_REMOTE_AT: u8 = 0x07;
/// Local AT command, applied immediately.
pub const API_ID_AT: u8 = 0x08;
/// Local AT command, queued until `AC` or another `at` frame.
pub const API_ID_QUEUED_AT: u8 = 0x09;

// ============================================================================
// Response API Identifiers (module → host)
// ============================================================================

/// Received data from a 64-bit source address.
pub const API_ID_WIFI_RX_64: u8 = 0x80;
/// Received data from a 16-bit source address.
pub const API_ID_RX: u8 = 0x81;
/// IO samples from a 64-bit source address.
pub const API_ID_RX_IO_DATA_LONG_ADDR: u8 = 0x82;
/// IO samples from a 16-bit source address.
pub const API_ID_RX_IO_DATA: u8 = 0x83;
/// Remote AT command response (WiFi, no 16-bit address).
pub const API_ID_WIFI_REMOTE_AT_RESPONSE: u8 = 0x87;
/// Local AT command response.
pub const API_ID_AT_RESPONSE: u8 = 0x88;
/// Transmit status.
pub const API_ID_TX_STATUS: u8 = 0x89;
/// Modem status.
pub const API_ID_STATUS: u8 = 0x8A;
/// IO samples received over WiFi.
pub const API_ID_WIFI_RX_IO_DATA: u8 = 0x8F;
/// Remote AT command response.
pub const API_ID_REMOTE_AT_RESPONSE: u8 = 0x97;
/// Received IPv4 data.
pub const API_ID_WIFI_RX_IPV4: u8 = 0xB0;

// ============================================================================
// AT Commands
// ============================================================================

/// AT command that forces an IO sample; its response carries sample data.
pub const AT_COMMAND_IS: &[u8; 2] = b"IS";
/// AT response status for success.
pub const AT_STATUS_OK: u8 = 0x00;

/// Response kinds that echo the AT command code back to the host.
pub const AT_ECHO_RESPONSES: [&str; 3] = [
    "at_response",
    "remote_at_response",
    "wifi_remote_at_response",
];

// ============================================================================
// IO Samples
// ============================================================================

/// Size of the IO sample header (count, 16-bit DIO mask, 8-bit AIO mask).
pub const IO_SAMPLE_HEADER_SIZE: usize = 4;
/// Number of digital channels that can be reported (bits 0-8 of the mask).
pub const DIO_CHANNEL_COUNT: u8 = 9;
/// Number of analog channels that can be reported (bits 0-6 of the mask).
pub const AIO_CHANNEL_COUNT: u8 = 7;
/// Bytes per digital or analog reading.
pub const IO_READING_SIZE: usize = 2;
