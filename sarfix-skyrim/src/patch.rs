//! Patcher entry point for a Skyrim load order.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::{info, warn};

use sarfix_core::record::Plugin;
use sarfix_core::{LoadOrder, ModKey, PatcherConfig, RunSummary};

use crate::presets::WeaponPreset;
use crate::settings;

/// Runs the patch engine with a fixed configuration.
#[derive(Debug, Clone)]
pub struct SkyrimPatcher {
    config: PatcherConfig,
}

/// Result of one patch run.
#[derive(Debug, Clone, Serialize)]
pub struct PatchOutput {
    /// The patch plugin.
    pub patch: Plugin,
    /// Change counts.
    pub summary: RunSummary,
}

impl SkyrimPatcher {
    /// Patcher with an explicit configuration.
    #[must_use]
    pub fn new(config: PatcherConfig) -> Self {
        Self { config }
    }

    /// Patcher with default settings and the given weapon preset.
    #[must_use]
    pub fn from_preset(preset: WeaponPreset) -> Self {
        Self::new(preset.config())
    }

    /// Patcher configured from a `settings.json` file.
    ///
    /// # Errors
    /// Returns an error if the settings cannot be loaded.
    pub fn from_settings(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::new(settings::load_config(path)?))
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PatcherConfig {
        &self.config
    }

    /// An empty load order writing to the configured patch name.
    #[must_use]
    pub fn load_order(&self) -> LoadOrder {
        LoadOrder::new(self.config.general.patch_name.as_str())
    }

    /// Run every rule family over `load_order` and return its patch.
    ///
    /// # Errors
    /// Returns an error if the engine fails.
    pub fn run(&self, mut load_order: LoadOrder) -> anyhow::Result<PatchOutput> {
        let expected = ModKey::new(self.config.general.patch_name.as_str());
        if load_order.patch().mod_key != expected {
            warn!(
                patch = %load_order.patch().mod_key,
                configured = %expected,
                "Load order writes to a different patch than configured"
            );
        }

        let summary = sarfix_core::run(&self.config, &mut load_order).context("Patch run failed")?;
        info!(
            game_settings = summary.game_settings + summary.game_settings_added,
            attacks = summary.attacks,
            weapons = summary.weapons,
            removed = summary.removed_overrides,
            "Patch complete"
        );
        Ok(PatchOutput {
            patch: load_order.into_patch(),
            summary,
        })
    }
}

impl PatchOutput {
    /// Write the patch and summary as pretty JSON into `dir`.
    ///
    /// Returns the path of the written file, `<patch name>.json`.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn write_json(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let path = dir.join(format!("{}.json", self.patch.mod_key));
        let json = serde_json::to_string_pretty(self).context("Failed to serialize patch")?;
        std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), records = self.patch.record_count(), "Patch written");
        Ok(path)
    }
}
