//! Bigtop Core - cart-pole episode log parsing
//!
//! This crate turns the text log of a cart-pole run into typed keyframes and
//! chapter boundaries. It has zero UI dependencies and performs no I/O; hosts
//! hand it text and consume plain data.

pub mod keyframes;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
