//! Engine-level configuration (spec §6).
//!
//! This is deliberately narrow: the host process owns its own logging,
//! CLI and packaging configuration (explicit Non-goals); this struct only
//! covers the handful of values the engine itself reads.

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether the E2SM-KPM service model is enabled at all.
    pub e2sm_kpm_enabled: bool,
    /// Bounded per-UE history depth, keyed by the measurement source.
    pub per_ue_metric_history_depth: HistoryDepthConfig,
    /// Implicit format bound on the number of UEs a single report service
    /// tracks (65535, per the wire format's list-length limit).
    pub report_service_max_ues: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            e2sm_kpm_enabled: true,
            per_ue_metric_history_depth: HistoryDepthConfig::default(),
            report_service_max_ues: 65535,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryDepthConfig {
    /// PDCP-sourced per-UE history depth (default 10).
    pub pdcp: usize,
    /// RLC-sourced per-UE history depth (default 30).
    pub rlc: usize,
}

impl Default for HistoryDepthConfig {
    fn default() -> Self {
        Self { pdcp: 10, rlc: 30 }
    }
}

impl EngineConfig {
    /// Load from a TOML file, falling back to defaults for any field group
    /// the file doesn't specify.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Read { path: path.as_ref().display().to_string(), source: e })?;
        toml::from_str(&text).map_err(ConfigError::Parse)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read { path: String, source: std::io::Error },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = EngineConfig::default();
        assert!(cfg.e2sm_kpm_enabled);
        assert_eq!(cfg.per_ue_metric_history_depth.pdcp, 10);
        assert_eq!(cfg.per_ue_metric_history_depth.rlc, 30);
        assert_eq!(cfg.report_service_max_ues, 65535);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: EngineConfig = toml::from_str("e2sm_kpm_enabled = false\n").unwrap();
        assert!(!cfg.e2sm_kpm_enabled);
        assert_eq!(cfg.per_ue_metric_history_depth.rlc, 30);
    }
}
