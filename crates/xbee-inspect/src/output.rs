use clap::ValueEnum;
use serde::Serialize;

use crate::error::CliResult;

/// Output format for structured results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Render `value` in `format`, without a trailing newline.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> CliResult<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(text.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xbee_api::Codec;

    #[test]
    fn test_render_frame() {
        let frame = Codec::new().decode(&[0x89, 0x01, 0x00]).unwrap();

        let json = render(&frame, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "tx_status");
        assert_eq!(value["frame_id"], "01");

        let yaml = render(&frame, OutputFormat::Yaml).unwrap();
        assert!(yaml.starts_with("id: tx_status"));
    }
}
