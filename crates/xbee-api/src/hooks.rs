//! Post-decode field transforms.
//!
//! A hook runs after the structural decode of a response and may replace the
//! value of its field based on the other fields already in the frame. Hooks
//! never see raw wire bytes beyond what the structure produced.

use crate::constants::*;
use crate::error::Result;
use crate::samples::decode_samples;
use crate::schema::ParseHook;
use crate::value::{DecodedFrame, FieldValue};

impl ParseHook {
    /// Compute the replacement for `field` in `frame`.
    ///
    /// Returns `Ok(None)` when the field should keep its current value.
    pub fn apply(&self, field: &str, frame: &DecodedFrame) -> Result<Option<FieldValue>> {
        match self {
            ParseHook::IoSamples => expand_samples(field, frame),
            ParseHook::IsAtResponse => {
                if is_sample_at_response(frame) {
                    expand_samples(field, frame)
                } else {
                    Ok(None)
                }
            }
        }
    }
}

fn expand_samples(field: &str, frame: &DecodedFrame) -> Result<Option<FieldValue>> {
    match frame.bytes(field) {
        Some(io_bytes) => Ok(Some(FieldValue::Samples(decode_samples(io_bytes)?))),
        None => Ok(None),
    }
}

/// Whether `frame` is a successful `IS` (force sample) AT response, whose
/// parameter carries IO sample data rather than a register value.
pub fn is_sample_at_response(frame: &DecodedFrame) -> bool {
    if !AT_ECHO_RESPONSES.contains(&frame.id()) {
        return false;
    }
    let command_is = frame
        .bytes("command")
        .is_some_and(|command| command.eq_ignore_ascii_case(AT_COMMAND_IS));
    let succeeded = frame.bytes("status") == Some(&[AT_STATUS_OK][..]);
    command_is && succeeded
}
