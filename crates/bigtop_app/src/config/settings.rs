//! Settings struct with TOML-based sections.
//!
//! Each section maps to a TOML table and can be updated independently.

use bigtop_core::keyframes::{HeaderCheck, ParseOptions};
use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Log parsing behaviour.
    #[serde(default)]
    pub parser: ParserSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Output formatting.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Parser configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserSettings {
    /// Require the header to be exactly `new state,previous state,action,reward`.
    #[serde(default)]
    pub strict_header: bool,
}

impl ParserSettings {
    /// Parse options for these settings.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            header: if self.strict_header {
                HeaderCheck::Exact
            } else {
                HeaderCheck::FieldCount
            },
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Parser,
    Logging,
    Output,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 3] = [
        ConfigSection::Parser,
        ConfigSection::Logging,
        ConfigSection::Output,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Parser => "parser",
            ConfigSection::Logging => "logging",
            ConfigSection::Output => "output",
        }
    }

    /// Comment written above the section.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Parser => "Log parsing",
            ConfigSection::Logging => "Logging configuration (RUST_LOG overrides the level)",
            ConfigSection::Output => "Output formatting",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[parser]"));
        assert!(toml.contains("[logging]"));
        assert!(toml.contains("strict_header = false"));
        assert!(toml.contains("level = \"info\""));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[parser]\nstrict_header = true";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        assert!(parsed.parser.strict_header);
        assert_eq!(parsed.logging.level, LogLevel::Info);
        assert!(parsed.output.pretty);
    }

    #[test]
    fn parse_options_follow_strict_header() {
        let mut parser = ParserSettings::default();
        assert_eq!(parser.parse_options().header, HeaderCheck::FieldCount);

        parser.strict_header = true;
        assert_eq!(parser.parse_options(), ParseOptions::strict());
    }

    #[test]
    fn log_level_is_lowercase() {
        let parsed: Settings = toml::from_str("[logging]\nlevel = \"debug\"").unwrap();
        assert_eq!(parsed.logging.level, LogLevel::Debug);
    }
}
