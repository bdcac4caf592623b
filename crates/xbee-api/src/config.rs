//! Schema tables from YAML configuration.
//!
//! ```yaml
//! include_builtin: true
//! commands:
//!   - name: ping
//!     fields:
//!       - { name: id, len: 1, default: "42" }
//!       - { name: seq, len: 1 }
//!       - { name: payload }          # no len: variable
//! responses:
//!   - id: 0xC2
//!     name: pong
//!     structure:
//!       - { name: seq, len: 1 }
//!       - { name: samples }
//!     hooks:
//!       - { field: samples, hook: io_samples }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{CommandSpec, ResponseSpec, SchemaTables};

/// Schema configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Start from the built-in tables; entries below override built-ins
    /// with the same command name or response tag.
    #[serde(default)]
    pub include_builtin: bool,
    /// Command layouts.
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
    /// Response layouts.
    #[serde(default)]
    pub responses: Vec<ResponseSpec>,
}

impl SchemaConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded schema configuration from {}", path.as_ref().display());
        Self::from_yaml_str(&text)
    }

    /// Render the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl SchemaTables {
    /// Build validated tables from a configuration.
    pub fn from_config(config: SchemaConfig) -> Result<Self> {
        let SchemaConfig {
            include_builtin,
            commands,
            responses,
        } = config;

        if include_builtin {
            SchemaTables::builtin().merged(commands, responses)
        } else {
            SchemaTables::new(commands, responses)
        }
    }

    /// Parse and validate tables from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::from_config(SchemaConfig::from_yaml_str(yaml)?)
    }

    /// Load and validate tables from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(SchemaConfig::load(path)?)
    }

    /// A self-contained configuration describing these tables.
    pub fn to_config(&self) -> SchemaConfig {
        SchemaConfig {
            include_builtin: false,
            commands: self.commands().to_vec(),
            responses: self.responses().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::schema::{FieldLength, ParseHook};

    const PING_PONG: &str = r#"
commands:
  - name: ping
    fields:
      - { name: id, len: 1, default: "42" }
      - { name: seq, len: 1 }
      - { name: payload }
responses:
  - id: 0xC2
    name: pong
    structure:
      - { name: seq, len: 1 }
      - { name: samples }
    hooks:
      - { field: samples, hook: io_samples }
"#;

    #[test]
    fn test_load_custom_tables() {
        let tables = SchemaTables::from_yaml_str(PING_PONG).unwrap();
        assert_eq!(tables.commands().len(), 1);

        let ping = tables.command("ping").unwrap();
        assert_eq!(ping.api_id(), Some(0x42));
        assert_eq!(ping.field("payload").unwrap().length, FieldLength::Variable);

        let pong = tables.response(0xC2).unwrap();
        assert_eq!(pong.name, "pong");
        assert_eq!(pong.hooks[0].hook, ParseHook::IoSamples);
        assert!(tables.command("at").is_none());
    }

    #[test]
    fn test_include_builtin_overrides() {
        let yaml = r#"
include_builtin: true
responses:
  - id: 0x8A
    name: modem_status
    structure:
      - { name: status, len: 1 }
"#;
        let tables = SchemaTables::from_yaml_str(yaml).unwrap();
        assert!(tables.command("remote_at").is_some());
        assert_eq!(tables.response(0x8A).map(|r| &*r.name), Some("modem_status"));
        assert!(tables.response_by_name("status").is_none());
        assert_eq!(
            tables.responses().count(),
            SchemaTables::builtin().responses().count()
        );
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let yaml = r#"
commands:
  - name: broken
    fields:
      - { name: data }
      - { name: status, len: 1 }
"#;
        let err = SchemaTables::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ApiError::SchemaInvariant { ref spec, .. } if spec == "broken"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = SchemaTables::from_yaml_str("command: []\n").unwrap_err();
        assert!(matches!(err, ApiError::Yaml(_)));
    }

    #[test]
    fn test_bad_hex_default_rejected() {
        let yaml = "commands:\n  - name: x\n    fields:\n      - { name: id, len: 1, default: zz }\n";
        assert!(matches!(
            SchemaTables::from_yaml_str(yaml),
            Err(ApiError::Yaml(_))
        ));
    }

    #[test]
    fn test_builtin_round_trip() {
        let yaml = SchemaTables::builtin().to_config().to_yaml_string().unwrap();
        let reloaded = SchemaTables::from_yaml_str(&yaml).unwrap();
        assert_eq!(&reloaded, SchemaTables::builtin());
    }

    #[test]
    fn test_missing_file() {
        let err = SchemaTables::load("/nonexistent/xbee-schema.yaml").unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
    }
}
