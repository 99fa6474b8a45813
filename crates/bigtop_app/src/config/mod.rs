//! Configuration management for Bigtop.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Defaults for every missing key
//!
//! # Example
//!
//! ```ignore
//! use crate::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new("bigtop.toml");
//! config.load_or_create()?;
//!
//! config.settings_mut().parser.strict_header = true;
//! config.update_section(ConfigSection::Parser)?;
//! ```

mod manager;
mod settings;

pub use manager::ConfigManager;
pub use settings::{ConfigSection, OutputSettings, Settings};
