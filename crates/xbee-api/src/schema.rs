//! Frame layout descriptors and the schema tables that hold them.
//!
//! Every command and response is described as an ordered list of
//! [`FieldSpec`]s. The descriptors are plain data with `const` constructors so
//! the built-in tables can live in static memory, and they derive serde so
//! custom tables can be loaded from configuration.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ApiError, Result};
use crate::tables;

/// Name of the synthetic field that carries the response name in a decoded frame.
pub const ID_FIELD: &str = "id";

// ============================================================================
// Field Descriptors
// ============================================================================

/// Length of a field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldLength {
    /// Exactly this many bytes.
    Fixed(usize),
    /// Everything that remains in the frame. Only valid for the last field.
    Variable,
}

impl FieldLength {
    /// The fixed byte count, or `None` for a variable field.
    pub const fn fixed(&self) -> Option<usize> {
        match self {
            FieldLength::Fixed(len) => Some(*len),
            FieldLength::Variable => None,
        }
    }

    /// Whether this is the trailing variable-length kind.
    pub const fn is_variable(&self) -> bool {
        matches!(self, FieldLength::Variable)
    }
}

// Configuration files write `len: 2` for fixed fields and omit `len` (or
// write `null`) for the variable one.
impl Serialize for FieldLength {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.fixed().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldLength {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<usize>::deserialize(deserializer)? {
            Some(len) => FieldLength::Fixed(len),
            None => FieldLength::Variable,
        })
    }
}

fn variable_length() -> FieldLength {
    FieldLength::Variable
}

/// A single named field in a command or response layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    /// Field name, used as the key when encoding and decoding.
    pub name: Cow<'static, str>,
    /// Wire length.
    #[serde(
        rename = "len",
        default = "variable_length",
        skip_serializing_if = "FieldLength::is_variable"
    )]
    pub length: FieldLength,
    /// Value sent when the caller does not provide one (commands only).
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hex_bytes")]
    pub default: Option<Cow<'static, [u8]>>,
}

impl FieldSpec {
    /// A required fixed-length field.
    pub const fn fixed(name: &'static str, len: usize) -> Self {
        Self {
            name: Cow::Borrowed(name),
            length: FieldLength::Fixed(len),
            default: None,
        }
    }

    /// A fixed-length field whose length is that of its default value.
    pub const fn defaulted(name: &'static str, default: &'static [u8]) -> Self {
        Self {
            name: Cow::Borrowed(name),
            length: FieldLength::Fixed(default.len()),
            default: Some(Cow::Borrowed(default)),
        }
    }

    /// The trailing variable-length field.
    pub const fn variable(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            length: FieldLength::Variable,
            default: None,
        }
    }

    /// Whether the encoder can fill this field without caller input.
    pub fn is_optional(&self) -> bool {
        self.default.is_some() || self.length.is_variable()
    }
}

/// Compile-time check of the "one variable field, and only last" rule.
///
/// Used to assert the built-in tables; runtime tables go through
/// [`SchemaTables::new`], which also checks names and defaults.
pub(crate) const fn layout_is_valid(fields: &[FieldSpec]) -> bool {
    let mut i = 0;
    while i < fields.len() {
        match fields[i].length {
            FieldLength::Variable if i + 1 != fields.len() => return false,
            FieldLength::Fixed(0) => return false,
            _ => {}
        }
        i += 1;
    }
    true
}

fn validate_layout(spec: &str, fields: &[FieldSpec], allow_defaults: bool) -> Result<()> {
    let mut seen = HashSet::new();
    let last = fields.len().saturating_sub(1);

    for (index, field) in fields.iter().enumerate() {
        if field.name.is_empty() {
            return Err(ApiError::schema(spec, format!("field {} has no name", index)));
        }
        if !seen.insert(&*field.name) {
            return Err(ApiError::schema(
                spec,
                format!("duplicate field '{}'", field.name),
            ));
        }

        match field.length {
            FieldLength::Fixed(0) => {
                return Err(ApiError::schema(
                    spec,
                    format!("field '{}' has zero length", field.name),
                ));
            }
            FieldLength::Variable if index != last => {
                return Err(ApiError::schema(
                    spec,
                    format!(
                        "variable-length field '{}' must be the last field",
                        field.name
                    ),
                ));
            }
            _ => {}
        }

        if let Some(default) = &field.default {
            if !allow_defaults {
                return Err(ApiError::schema(
                    spec,
                    format!("response field '{}' cannot have a default", field.name),
                ));
            }
            if let FieldLength::Fixed(len) = field.length {
                if default.len() != len {
                    return Err(ApiError::schema(
                        spec,
                        format!(
                            "default for '{}' is {} bytes, field is {}",
                            field.name,
                            default.len(),
                            len
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}

fn min_len(fields: &[FieldSpec]) -> usize {
    fields.iter().filter_map(|f| f.length.fixed()).sum()
}

fn variable_field(fields: &[FieldSpec]) -> Option<&FieldSpec> {
    fields.last().filter(|f| f.length.is_variable())
}

// ============================================================================
// Commands
// ============================================================================

/// Layout of an outbound command frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    /// Command name used by callers (e.g. `"at"`, `"tx"`).
    pub name: Cow<'static, str>,
    /// Fields in wire order.
    pub fields: Cow<'static, [FieldSpec]>,
}

impl CommandSpec {
    /// Declare a command over a static field list.
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self {
            name: Cow::Borrowed(name),
            fields: Cow::Borrowed(fields),
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The frame's API identifier: the default of a leading 1-byte `id` field.
    pub fn api_id(&self) -> Option<u8> {
        let first = self.fields.first()?;
        if first.name != ID_FIELD || first.length != FieldLength::Fixed(1) {
            return None;
        }
        first.default.as_deref()?.first().copied()
    }

    /// Encoded length with an empty variable field.
    pub fn min_len(&self) -> usize {
        min_len(&self.fields)
    }

    /// The trailing variable-length field, if the layout has one.
    pub fn variable_field(&self) -> Option<&FieldSpec> {
        variable_field(&self.fields)
    }

    /// Fields the caller must always provide.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| !f.is_optional())
    }

    fn validate(&self) -> Result<()> {
        validate_layout(&self.name, &self.fields, true)
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Post-decode transforms that can be attached to a response field.
///
/// Each variant is a self-contained routine over the partially decoded
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseHook {
    /// Expand the field's raw bytes into IO samples.
    IoSamples,
    /// Expand `parameter` into IO samples for successful `IS` AT responses.
    IsAtResponse,
}

impl ParseHook {
    /// Stable name of the hook, as used in configuration.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ParseHook::IoSamples => "io_samples",
            ParseHook::IsAtResponse => "is_at_response",
        }
    }
}

impl std::fmt::Display for ParseHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hook bound to the field whose value it replaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookSpec {
    /// Field to replace.
    pub field: Cow<'static, str>,
    /// Transform producing the replacement.
    pub hook: ParseHook,
}

impl HookSpec {
    /// Bind `hook` to `field`.
    pub const fn new(field: &'static str, hook: ParseHook) -> Self {
        Self {
            field: Cow::Borrowed(field),
            hook,
        }
    }
}

fn no_hooks(hooks: &Cow<'static, [HookSpec]>) -> bool {
    hooks.is_empty()
}

/// Layout of an inbound response frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseSpec {
    /// Tag byte that starts every body of this kind.
    pub id: u8,
    /// Response name reported as the decoded frame's `id`.
    pub name: Cow<'static, str>,
    /// Fields following the tag byte, in wire order.
    pub structure: Cow<'static, [FieldSpec]>,
    /// Transforms run after the structural decode, in order.
    #[serde(default, skip_serializing_if = "no_hooks")]
    pub hooks: Cow<'static, [HookSpec]>,
}

impl ResponseSpec {
    /// Declare a response over static structure and hook lists.
    pub const fn new(
        id: u8,
        name: &'static str,
        structure: &'static [FieldSpec],
        hooks: &'static [HookSpec],
    ) -> Self {
        Self {
            id,
            name: Cow::Borrowed(name),
            structure: Cow::Borrowed(structure),
            hooks: Cow::Borrowed(hooks),
        }
    }

    /// Look up a structure field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.structure.iter().find(|f| f.name == name)
    }

    /// Smallest body (tag byte included) this response can decode from.
    pub fn min_len(&self) -> usize {
        1 + min_len(&self.structure)
    }

    /// The trailing variable-length field, if the layout has one.
    pub fn variable_field(&self) -> Option<&FieldSpec> {
        variable_field(&self.structure)
    }

    fn validate(&self) -> Result<()> {
        validate_layout(&self.name, &self.structure, false)?;

        if self.field(ID_FIELD).is_some() {
            return Err(ApiError::schema(
                &*self.name,
                format!("field name '{}' is reserved", ID_FIELD),
            ));
        }
        for hook in self.hooks.iter() {
            if self.field(&hook.field).is_none() {
                return Err(ApiError::schema(
                    &*self.name,
                    format!("hook {} targets unknown field '{}'", hook.hook, hook.field),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Schema Tables
// ============================================================================

/// The validated set of command and response layouts a codec works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaTables {
    commands: Vec<CommandSpec>,
    responses: BTreeMap<u8, ResponseSpec>,
}

static BUILTIN: OnceLock<Arc<SchemaTables>> = OnceLock::new();

impl SchemaTables {
    /// Build tables from command and response layouts, validating every
    /// layout invariant up front.
    pub fn new(
        commands: impl IntoIterator<Item = CommandSpec>,
        responses: impl IntoIterator<Item = ResponseSpec>,
    ) -> Result<Self> {
        let mut tables = SchemaTables {
            commands: Vec::new(),
            responses: BTreeMap::new(),
        };

        for command in commands {
            command.validate()?;
            if tables.command(&command.name).is_some() {
                return Err(ApiError::schema(&*command.name, "duplicate command name"));
            }
            tables.commands.push(command);
        }

        for response in responses {
            response.validate()?;
            if tables.response_by_name(&response.name).is_some() {
                return Err(ApiError::schema(&*response.name, "duplicate response name"));
            }
            if let Some(existing) = tables.responses.get(&response.id) {
                return Err(ApiError::schema(
                    &*response.name,
                    format!("tag 0x{:02X} already used by '{}'", response.id, existing.name),
                ));
            }
            tables.responses.insert(response.id, response);
        }

        Ok(tables)
    }

    /// The XBee WiFi command and response tables, built once per process.
    pub fn builtin() -> &'static SchemaTables {
        Self::builtin_shared().as_ref()
    }

    pub(crate) fn builtin_shared() -> &'static Arc<SchemaTables> {
        BUILTIN.get_or_init(|| {
            let tables = SchemaTables::new(
                tables::COMMANDS.iter().cloned(),
                tables::RESPONSES.iter().cloned(),
            )
            .expect("built-in schema tables are well formed");
            Arc::new(tables)
        })
    }

    /// A copy of these tables with `commands` and `responses` added.
    ///
    /// Entries replace existing ones with the same command name or response
    /// tag; the result is validated like [`SchemaTables::new`].
    pub fn merged(
        &self,
        commands: impl IntoIterator<Item = CommandSpec>,
        responses: impl IntoIterator<Item = ResponseSpec>,
    ) -> Result<Self> {
        let mut merged_commands = self.commands.clone();
        for command in commands {
            match merged_commands.iter_mut().find(|c| c.name == command.name) {
                Some(slot) => *slot = command,
                None => merged_commands.push(command),
            }
        }

        let mut merged_responses = self.responses.clone();
        for response in responses {
            merged_responses.insert(response.id, response);
        }

        SchemaTables::new(merged_commands, merged_responses.into_values())
    }

    /// Look up a command by name.
    pub fn command(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// First command (in table order) whose API id is `id`.
    pub fn command_by_id(&self, id: u8) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.api_id() == Some(id))
    }

    /// Look up a response by its tag byte.
    pub fn response(&self, tag: u8) -> Option<&ResponseSpec> {
        self.responses.get(&tag)
    }

    /// Look up a response by name.
    pub fn response_by_name(&self, name: &str) -> Option<&ResponseSpec> {
        self.responses.values().find(|r| r.name == name)
    }

    /// All commands in declaration order.
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// All responses ordered by tag.
    pub fn responses(&self) -> impl Iterator<Item = &ResponseSpec> {
        self.responses.values()
    }
}

// ============================================================================
// Serde Helpers
// ============================================================================

mod hex_bytes {
    use std::borrow::Cow;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Cow<'static, [u8]>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_str(&hex::encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Cow<'static, [u8]>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        hex::decode(&compact)
            .map(|bytes| Some(Cow::Owned(bytes)))
            .map_err(|e| serde::de::Error::custom(format!("invalid hex '{}': {}", text, e)))
    }
}
