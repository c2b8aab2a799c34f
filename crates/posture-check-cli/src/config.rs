//! Configuration file support for posture-check.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/posture-check/config.toml` (lowest priority)
//! - Project-local: `.posture-check.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Squat rule thresholds.
    pub squat: SquatConfig,
    /// Sitting rule thresholds.
    pub sitting: SittingConfig,
    /// Pose detector settings.
    pub detector: DetectorConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default activity: "squat" or "sitting".
    pub activity: Option<String>,
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Squat rule configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SquatConfig {
    /// Minimum back angle in degrees (0.0-180.0).
    pub back_angle_min: Option<f32>,
    /// Maximum knee angle for squat depth in degrees (0.0-180.0).
    pub knee_angle_max: Option<f32>,
}

/// Sitting rule configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SittingConfig {
    /// Maximum forward-head angle in degrees (0.0-180.0).
    pub neck_angle_max: Option<f32>,
    /// Minimum back angle in degrees (0.0-180.0).
    pub back_angle_min: Option<f32>,
    /// Maximum shoulder height difference, normalized (0.0-1.0).
    pub shoulder_tolerance: Option<f32>,
}

/// Pose detector configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Drop landmarks below this visibility (0.0-1.0).
    pub min_visibility: Option<f32>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
    /// Directory for annotated frame copies.
    pub annotate_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/posture-check/config.toml`
    /// 2. Project-local: `.posture-check.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        // Validate merged config
        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        // Activity validation
        if let Some(ref a) = self.general.activity {
            if !a.eq_ignore_ascii_case("squat") && !a.eq_ignore_ascii_case("sitting") {
                return Err(format!(
                    "general.activity must be 'squat' or 'sitting', got '{a}'"
                ));
            }
        }

        // Angle validations (degrees, 0.0-180.0 range)
        if let Some(v) = self.squat.back_angle_min {
            if !(0.0..=180.0).contains(&v) {
                return Err(format!("squat.back_angle_min must be 0.0-180.0, got {v}"));
            }
        }
        if let Some(v) = self.squat.knee_angle_max {
            if !(0.0..=180.0).contains(&v) {
                return Err(format!("squat.knee_angle_max must be 0.0-180.0, got {v}"));
            }
        }
        if let Some(v) = self.sitting.neck_angle_max {
            if !(0.0..=180.0).contains(&v) {
                return Err(format!("sitting.neck_angle_max must be 0.0-180.0, got {v}"));
            }
        }
        if let Some(v) = self.sitting.back_angle_min {
            if !(0.0..=180.0).contains(&v) {
                return Err(format!("sitting.back_angle_min must be 0.0-180.0, got {v}"));
            }
        }

        // Ratio validations (0.0-1.0 range)
        if let Some(v) = self.sitting.shoulder_tolerance {
            if !(0.0..=1.0).contains(&v) {
                return Err(format!(
                    "sitting.shoulder_tolerance must be 0.0-1.0, got {v}"
                ));
            }
        }
        if let Some(v) = self.detector.min_visibility {
            if !(0.0..=1.0).contains(&v) {
                return Err(format!("detector.min_visibility must be 0.0-1.0, got {v}"));
            }
        }

        // Output format validation
        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.activity = other
            .general
            .activity
            .or_else(|| self.general.activity.take());
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Squat
        self.squat.back_angle_min = other.squat.back_angle_min.or(self.squat.back_angle_min);
        self.squat.knee_angle_max = other.squat.knee_angle_max.or(self.squat.knee_angle_max);

        // Sitting
        self.sitting.neck_angle_max = other.sitting.neck_angle_max.or(self.sitting.neck_angle_max);
        self.sitting.back_angle_min = other.sitting.back_angle_min.or(self.sitting.back_angle_min);
        self.sitting.shoulder_tolerance = other
            .sitting
            .shoulder_tolerance
            .or(self.sitting.shoulder_tolerance);

        // Detector
        self.detector.min_visibility = other
            .detector
            .min_visibility
            .or(self.detector.min_visibility);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
        self.output.annotate_dir = other
            .output
            .annotate_dir
            .or_else(|| self.output.annotate_dir.take());
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("posture-check").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.posture-check.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".posture-check.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
