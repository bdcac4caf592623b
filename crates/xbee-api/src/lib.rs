//! XBee API frame codec
//!
//! This crate converts between named field values and the binary bodies of
//! XBee API frames. Frame layouts are data: every command and response is
//! described by a schema (an ordered list of fields with fixed or trailing
//! variable lengths), and a single encoder and decoder work over any schema
//! table.
//!
//! # Frame Bodies
//!
//! The codec operates on the body of an API frame, after the transport has
//! removed the start delimiter, length, escaping and checksum:
//!
//! - **Commands** (host → module): start with the command's API id, which
//!   the built-in tables supply as the default of the `id` field
//! - **Responses** (module → host): start with a tag byte selecting the
//!   response layout
//!
//! Responses that carry IO samples are expanded into per-channel readings
//! after the structural decode, including `IS` AT responses whose
//! `parameter` holds sample data.
//!
//! # Example
//!
//! ```rust
//! use xbee_api::{Codec, CommandFields};
//!
//! let codec = Codec::new();
//!
//! // Build a command
//! let fields = CommandFields::new().with("frame_id", [0x01u8]).with("command", b"IS");
//! let body = codec.encode("at", &fields)?;
//! assert_eq!(body, [0x08, 0x01, b'I', b'S']);
//!
//! // Parse its response
//! let frame = codec.decode(&[0x88, 0x01, b'I', b'S', 0x00, 0x01, 0x00, 0x00, 0x01, 0x01, 0x2C])?;
//! assert_eq!(frame.samples("parameter").unwrap()[0].adc(0), Some(300));
//! # Ok::<(), xbee_api::ApiError>(())
//! ```

mod codec;
mod config;
mod constants;
mod decode;
mod encode;
mod error;
mod hooks;
mod samples;
mod schema;
mod tables;
mod value;

pub use codec::*;
pub use config::*;
pub use constants::*;
pub use decode::*;
pub use encode::*;
pub use error::*;
pub use hooks::*;
pub use samples::*;
pub use schema::*;
pub use tables::*;
pub use value::*;
