//! Startup battle tuning loaded from an optional TOML file.
//!
//! Every constant is fixed once at startup; absent fields fall back to the
//! defaults baked into [`BattleConfig`].

use std::{fs, path::Path};

use anyhow::{Context, Result};
use lane_defence_core::BattleConfig;

/// Loads the battle configuration, overlaying the TOML file at `path` over
/// the defaults when one is provided.
pub(crate) fn load(path: Option<&Path>) -> Result<BattleConfig> {
    let Some(path) = path else {
        return Ok(BattleConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to parse tuning file {}", path.display()))
}

fn parse(contents: &str) -> Result<BattleConfig> {
    toml::from_str(contents).context("invalid battle tuning")
}
