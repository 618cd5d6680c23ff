//! Calibration file loading
//!
//! The file holds an ordered `[[range]]` array (classification order) and
//! optional session tuning:
//!
//! ```toml
//! inactivity_timeout_ms = 30000
//!
//! [[range]]
//! label = "R"
//! lower = [149, 144, 152]
//! upper = [0, 255, 255]
//!
//! [layout]
//! points = [[250, 170], [320, 170], [390, 170], ...]
//!
//! [confirm]
//! window = 5
//! confirm_frames = 3
//!
//! [scan]
//! window = 10
//! stable_frames = 3
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use cubeguide_core::color::{ColorRange, Hsv};
use cubeguide_core::config::{
    CalibrationError, ColorCalibration, ConfirmConfig, SamplingLayout, ScanConfig, SessionConfig,
};
use cubeguide_core::cube::FaceLabel;

/// Configuration errors; all of them are fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    /// Range label that is not one of U R F D L B
    #[error("unknown color label {0:?}")]
    UnknownLabel(String),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// One `[[range]]` table as written in the file
#[derive(Debug, Deserialize)]
struct RangeEntry {
    label: String,
    lower: Hsv,
    upper: Hsv,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default, rename = "range")]
    ranges: Vec<RangeEntry>,
    #[serde(default)]
    layout: Option<SamplingLayout>,
    #[serde(default)]
    confirm: ConfirmConfig,
    #[serde(default)]
    scan: ScanConfig,
    #[serde(default)]
    inactivity_timeout_ms: Option<u32>,
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub calibration: ColorCalibration,
    pub session: SessionConfig,
}

/// Read and validate the configuration file at `path`
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    info!("Loading configuration from {}", path.display());
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes of TOML", text.len());

    let config = parse_config(&text)?;
    log_config_summary(&config);
    Ok(config)
}

/// Parse and validate configuration text
///
/// Missing labels are only warned about; classification simply never
/// yields them.
pub fn parse_config(text: &str) -> Result<LoadedConfig, ConfigError> {
    let file: ConfigFile = toml::from_str(text)?;

    let mut calibration = ColorCalibration::new();
    for entry in &file.ranges {
        let label = label_from_str(&entry.label)
            .ok_or_else(|| ConfigError::UnknownLabel(entry.label.clone()))?;
        calibration.try_insert(label, ColorRange::new(entry.lower, entry.upper))?;
    }

    let missing = calibration.missing_labels();
    if !missing.is_empty() {
        let letters: String = missing.iter().map(|l| l.as_char()).collect();
        warn!(
            "Calibration has {} of 6 colors, missing {}; those faces cannot be read",
            calibration.len(),
            letters
        );
    }

    let session = SessionConfig {
        layout: file.layout.unwrap_or_default(),
        confirm: file.confirm.normalized(),
        scan: file.scan.normalized(),
        inactivity_timeout_ms: file.inactivity_timeout_ms,
    };
    Ok(LoadedConfig {
        calibration,
        session,
    })
}

fn label_from_str(text: &str) -> Option<FaceLabel> {
    let mut chars = text.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => FaceLabel::from_char(c.to_ascii_uppercase()),
        _ => None,
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &LoadedConfig) {
    info!("Configuration loaded successfully");
    for entry in config.calibration.iter() {
        debug!(
            "  {}: {:?} .. {:?}{}",
            entry.label,
            entry.range.lower,
            entry.range.upper,
            if entry.range.wraps() { " (wraps)" } else { "" }
        );
    }
    let session = &config.session;
    debug!("  grid center {:?}", session.layout.point(4));
    debug!(
        "  confirm {}/{} frames, scan {}/{} frames",
        session.confirm.confirm_frames,
        session.confirm.window,
        session.scan.stable_frames,
        session.scan.window
    );
    match session.inactivity_timeout_ms {
        Some(ms) => debug!("  inactivity timeout {} ms", ms),
        None => debug!("  no inactivity timeout"),
    }
}
