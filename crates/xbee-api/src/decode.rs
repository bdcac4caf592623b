//! Response frame decoding.
//!
//! A body is the frame payload between the length and checksum of an API
//! frame: a tag byte selecting the [`ResponseSpec`](crate::ResponseSpec),
//! followed by the fields of its structure.

use crate::error::{ApiError, Result};
use crate::schema::{FieldLength, SchemaTables, ID_FIELD};
use crate::value::{DecodedFrame, FieldValue};

/// Decode a response frame body.
///
/// Fixed fields consume exactly their length; the variable field takes the
/// rest and is left out when nothing remains. Parse hooks then run in
/// declaration order. Any failure discards the partially decoded frame.
pub fn decode_response(tables: &SchemaTables, body: &[u8]) -> Result<DecodedFrame> {
    let Some((&tag, mut rest)) = body.split_first() else {
        return Err(ApiError::truncated(ID_FIELD, 1, 0));
    };

    let Some(spec) = tables.response(tag) else {
        let command = tables.command_by_id(tag).map(|c| c.name.to_string());
        return Err(ApiError::UnknownFrameType { tag, command });
    };

    let mut frame = DecodedFrame::new(tag, spec.name.clone());

    for field in spec.structure.iter() {
        match field.length {
            FieldLength::Fixed(len) => {
                if rest.len() < len {
                    return Err(ApiError::truncated(&*field.name, len, rest.len()));
                }
                let (value, tail) = rest.split_at(len);
                log::trace!("{}.{} = {}", spec.name, field.name, hex::encode(value));
                frame.push(field.name.clone(), FieldValue::Bytes(value.to_vec()));
                rest = tail;
            }
            FieldLength::Variable => {
                if !rest.is_empty() {
                    log::trace!("{}.{} = {} bytes", spec.name, field.name, rest.len());
                    frame.push(field.name.clone(), FieldValue::Bytes(rest.to_vec()));
                }
                rest = &[];
            }
        }
    }

    if !rest.is_empty() {
        return Err(ApiError::TrailingBytes {
            frame: spec.name.to_string(),
            expected: body.len() - rest.len(),
            actual: body.len(),
        });
    }

    for hook in spec.hooks.iter() {
        if !frame.contains(&hook.field) {
            continue;
        }
        if let Some(value) = hook.hook.apply(&hook.field, &frame)? {
            log::trace!("{}.{} replaced by {}", spec.name, hook.field, hook.hook);
            frame.replace(&hook.field, value);
        }
    }

    Ok(frame)
}
