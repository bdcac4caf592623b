//! Values produced by the decoder and consumed by the encoder.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::samples::Sample;
use crate::schema::ID_FIELD;

/// The value of one decoded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Raw bytes as they appeared on the wire.
    Bytes(Vec<u8>),
    /// IO samples expanded by a parse hook.
    Samples(Vec<Sample>),
}

impl FieldValue {
    /// The raw bytes, unless a hook replaced them.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Bytes(bytes) => Some(bytes.as_slice()),
            FieldValue::Samples(_) => None,
        }
    }

    /// The decoded samples, if a hook produced them.
    pub fn as_samples(&self) -> Option<&[Sample]> {
        match self {
            FieldValue::Samples(samples) => Some(samples.as_slice()),
            FieldValue::Bytes(_) => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Bytes(bytes) => serializer.serialize_str(&hex::encode(bytes)),
            FieldValue::Samples(samples) => samples.serialize(serializer),
        }
    }
}

/// A fully decoded response frame.
///
/// Fields keep wire order. The response name is exposed through
/// [`DecodedFrame::id`] and is serialized as the leading `"id"` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    tag: u8,
    id: Cow<'static, str>,
    fields: Vec<(Cow<'static, str>, FieldValue)>,
}

impl DecodedFrame {
    pub(crate) fn new(tag: u8, id: Cow<'static, str>) -> Self {
        DecodedFrame {
            tag,
            id,
            fields: Vec::new(),
        }
    }

    /// Response name (e.g. `"at_response"`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Tag byte the frame was decoded from.
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Look up a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Raw bytes of a field that was not replaced by a hook.
    pub fn bytes(&self, name: &str) -> Option<&[u8]> {
        self.get(name).and_then(FieldValue::as_bytes)
    }

    /// Samples produced for a field by a hook.
    pub fn samples(&self, name: &str) -> Option<&[Sample]> {
        self.get(name).and_then(FieldValue::as_samples)
    }

    /// Whether the field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Fields in wire order, excluding the synthetic `id`.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (&**name, value))
    }

    /// Number of decoded fields, excluding `id`.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the frame carries no fields besides `id`.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn push(&mut self, name: Cow<'static, str>, value: FieldValue) {
        self.fields.push((name, value));
    }

    pub(crate) fn replace(&mut self, name: &str, value: FieldValue) {
        if let Some(slot) = self.fields.iter_mut().find(|(field, _)| field == name) {
            slot.1 = value;
        }
    }
}

impl Serialize for DecodedFrame {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Field values supplied when encoding a command.
///
/// ```rust
/// use xbee_api::CommandFields;
///
/// let fields = CommandFields::new()
///     .with("command", b"NI")
///     .with("parameter", b"sensor-1");
/// assert_eq!(fields.get("command"), Some(&b"NI"[..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandFields {
    values: BTreeMap<String, Vec<u8>>,
}

impl CommandFields {
    /// An empty set of fields; every field falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`CommandFields::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl AsRef<[u8]>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field's value, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl AsRef<[u8]>) {
        self.values.insert(name.into(), value.as_ref().to_vec());
    }

    /// The value provided for a field.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.values.get(name).map(Vec::as_slice)
    }

    /// Names of all provided fields.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Whether no field was provided.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CommandFields
where
    K: Into<String>,
    V: AsRef<[u8]>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = CommandFields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DecodedFrame {
        let mut frame = DecodedFrame::new(0x89, Cow::Borrowed("tx_status"));
        frame.push(Cow::Borrowed("frame_id"), FieldValue::Bytes(vec![0x01]));
        frame.push(Cow::Borrowed("status"), FieldValue::Bytes(vec![0x00]));
        frame
    }

    #[test]
    fn test_decoded_frame_accessors() {
        let frame = frame();
        assert_eq!(frame.id(), "tx_status");
        assert_eq!(frame.tag(), 0x89);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.bytes("status"), Some(&[0x00][..]));
        assert!(frame.samples("status").is_none());
        assert!(!frame.contains("rf_data"));

        let names: Vec<&str> = frame.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["frame_id", "status"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut frame = frame();
        frame.replace("frame_id", FieldValue::Samples(vec![Sample::default()]));
        let names: Vec<&str> = frame.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["frame_id", "status"]);
        assert_eq!(frame.samples("frame_id").map(<[Sample]>::len), Some(1));
    }

    #[test]
    fn test_decoded_frame_serializes_id_first() {
        let json = serde_json::to_string(&frame()).unwrap();
        assert_eq!(json, r#"{"id":"tx_status","frame_id":"01","status":"00"}"#);
    }

    #[test]
    fn test_command_fields() {
        let fields: CommandFields = [("command", &b"IS"[..]), ("frame_id", &[0x01][..])]
            .into_iter()
            .collect();
        assert_eq!(fields.get("command"), Some(&b"IS"[..]));
        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["command", "frame_id"]);

        let fields = fields.with("command", b"NI");
        assert_eq!(fields.get("command"), Some(&b"NI"[..]));
        assert!(CommandFields::new().is_empty());
    }
}
