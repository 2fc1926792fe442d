//! # Output Formatting
//!
//! Shared `--format` flag for subcommands that print structured data.

use clap::ValueEnum;
use serde::Serialize;

/// Structured output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Render `value` in the chosen format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        state: &'static str,
        fee: &'static str,
    }

    #[test]
    fn json_is_pretty() {
        let out = render(&Sample { state: "CA", fee: "$70" }, OutputFormat::Json).unwrap();
        assert!(out.contains("\n  \"state\": \"CA\""));
    }

    #[test]
    fn yaml_has_plain_keys() {
        let out = render(&Sample { state: "CA", fee: "$70" }, OutputFormat::Yaml).unwrap();
        assert!(out.contains("state: CA"));
        assert!(out.contains("fee: $70"));
    }
}
