//! Check command - analyze frames for posture defects.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use posture_check_adapters::{annotate_frame, FsImageSource, LandmarkFileDetector};
use posture_check_core::{
    analyze_with, Activity, AnalysisError, FrameReport, ImageSource, PoseDetector, ProgressEvent,
    ProgressSink, ResultOutput, RuleConfig, SittingConfig, SquatConfig,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Hardcoded default values for thresholds.
mod defaults {
    pub const ACTIVITY: posture_check_core::Activity = posture_check_core::Activity::Squat;
    pub const BACK_ANGLE_MIN: f32 = 150.0;
    pub const KNEE_ANGLE_MAX: f32 = 100.0;
    pub const NECK_ANGLE_MAX: f32 = 30.0;
    pub const SITTING_BACK_ANGLE_MIN: f32 = 160.0;
    pub const SHOULDER_TOLERANCE: f32 = 0.05;
    pub const MIN_VISIBILITY: f32 = 0.0;
}

/// Parse and validate an angle threshold in degrees (0.0-180.0).
fn parse_angle(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=180.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=180.0"))
    }
}

/// Parse and validate a normalized ratio (0.0-1.0).
fn parse_ratio(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Parse an activity tag, accepting any casing.
fn parse_activity(s: &str) -> Result<Activity, String> {
    s.parse().map_err(|e: AnalysisError| e.to_string())
}

/// Shared arguments for frame analysis.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Files or directories to analyze
    pub paths: Vec<PathBuf>,

    /// Activity whose rules to apply: squat or sitting (default: squat)
    #[arg(short, long, value_parser = parse_activity)]
    pub activity: Option<Activity>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Minimum back angle during a squat, in degrees (0.0-180.0)
    #[arg(long, value_parser = parse_angle)]
    pub back_angle_min: Option<f32>,

    /// Maximum knee angle for sufficient squat depth, in degrees (0.0-180.0)
    #[arg(long, value_parser = parse_angle)]
    pub knee_angle_max: Option<f32>,

    /// Maximum forward-head angle while sitting, in degrees (0.0-180.0)
    #[arg(long, value_parser = parse_angle)]
    pub neck_angle_max: Option<f32>,

    /// Minimum back angle while sitting, in degrees (0.0-180.0)
    #[arg(long, value_parser = parse_angle)]
    pub sitting_back_angle_min: Option<f32>,

    /// Maximum shoulder height difference, normalized (0.0-1.0)
    #[arg(long, value_parser = parse_ratio)]
    pub shoulder_tolerance: Option<f32>,

    /// Drop landmarks below this visibility (0.0-1.0)
    #[arg(long, value_parser = parse_ratio)]
    pub min_visibility: Option<f32>,

    /// Write annotated copies of analyzed frames to this directory
    #[arg(long, value_name = "DIR")]
    pub annotate_dir: Option<PathBuf>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    ///
    /// For boolean flags: the CLI flag always wins when passed. Config can
    /// set them only when the CLI flag wasn't given.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Recursive: config applies only if CLI --recursive not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // Activity: CLI > config (accessor provides the squat fallback).
        // validate() already warned about unparseable values.
        if args.activity.is_none() {
            args.activity = config
                .general
                .activity
                .as_deref()
                .and_then(|s| s.parse().ok());
        }

        // Thresholds: CLI > config (accessor provides hardcoded fallback)
        args.back_angle_min = args.back_angle_min.or(config.squat.back_angle_min);
        args.knee_angle_max = args.knee_angle_max.or(config.squat.knee_angle_max);
        args.neck_angle_max = args.neck_angle_max.or(config.sitting.neck_angle_max);
        args.sitting_back_angle_min = args
            .sitting_back_angle_min
            .or(config.sitting.back_angle_min);
        args.shoulder_tolerance = args
            .shoulder_tolerance
            .or(config.sitting.shoulder_tolerance);

        // Detector: CLI > config
        args.min_visibility = args.min_visibility.or(config.detector.min_visibility);

        // Annotation directory: CLI > config
        if args.annotate_dir.is_none() {
            args.annotate_dir.clone_from(&config.output.annotate_dir);
        }

        // Output format: CLI > config (accessor provides fallback)
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Get the activity with fallback to squat.
    fn activity(&self) -> Activity {
        self.activity.unwrap_or(defaults::ACTIVITY)
    }

    /// Get the squat back-angle floor with fallback to hardcoded default.
    fn back_angle_min(&self) -> f32 {
        self.back_angle_min.unwrap_or(defaults::BACK_ANGLE_MIN)
    }

    /// Get the squat depth ceiling with fallback to hardcoded default.
    fn knee_angle_max(&self) -> f32 {
        self.knee_angle_max.unwrap_or(defaults::KNEE_ANGLE_MAX)
    }

    /// Get the forward-head ceiling with fallback to hardcoded default.
    fn neck_angle_max(&self) -> f32 {
        self.neck_angle_max.unwrap_or(defaults::NECK_ANGLE_MAX)
    }

    /// Get the sitting back-angle floor with fallback to hardcoded default.
    fn sitting_back_angle_min(&self) -> f32 {
        self.sitting_back_angle_min
            .unwrap_or(defaults::SITTING_BACK_ANGLE_MIN)
    }

    /// Get the shoulder level tolerance with fallback to hardcoded default.
    fn shoulder_tolerance(&self) -> f32 {
        self.shoulder_tolerance
            .unwrap_or(defaults::SHOULDER_TOLERANCE)
    }

    /// Get the visibility floor with fallback to keeping every landmark.
    fn min_visibility(&self) -> f32 {
        self.min_visibility.unwrap_or(defaults::MIN_VISIBILITY)
    }

    /// Rule thresholds merged from CLI flags, config, and defaults.
    fn rule_config(&self) -> RuleConfig {
        RuleConfig {
            squat: SquatConfig {
                back_angle_min: self.back_angle_min(),
                knee_angle_max: self.knee_angle_max(),
            },
            sitting: SittingConfig {
                neck_angle_max: self.neck_angle_max(),
                back_angle_min: self.sitting_back_angle_min(),
                shoulder_level_tolerance: self.shoulder_tolerance(),
            },
        }
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Result of running the check command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct CheckResult {
    /// Number of frames analyzed.
    pub processed: usize,
    /// Number of frames skipped.
    pub skipped: usize,
    /// Number of frames with posture defects.
    pub with_issues: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    // Initialize frame source
    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());

    // Initialize progress bar
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    // Initialize output adapter
    let output = JsonOutput::stdout();

    // Detector reads landmark sidecar files next to each frame
    let detector = LandmarkFileDetector::new().with_min_visibility(args.min_visibility());

    debug!("Judging frames against {} rules", args.activity());

    process_frames(&source, &detector, &output, &progress_bar, args)
}

/// Process frames through pose detection and rule analysis.
fn process_frames(
    source: &FsImageSource,
    detector: &LandmarkFileDetector,
    output: &JsonOutput,
    progress: &ProgressBar,
    args: &CheckArgs,
) -> Result<CheckResult> {
    let total = source.count_hint();
    let activity = args.activity();
    let rule_config = args.rule_config();

    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut with_issues = 0usize;
    let mut all_reports: Vec<FrameReport> = Vec::new();

    for (index, image_result) in source.images().enumerate() {
        let image = match image_result {
            Ok(img) => img,
            Err(e) => {
                // Note: error message contains the path via anyhow context
                progress.on_event(ProgressEvent::Skipped {
                    path: format!("frame {index}"),
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        let path = image.path.clone();

        progress.on_event(ProgressEvent::Started {
            path: path.clone(),
            index,
            total,
        });

        let landmarks = match detector.detect(&image) {
            Ok(Some(landmarks)) => landmarks,
            Ok(None) => {
                progress.on_event(ProgressEvent::Skipped {
                    path,
                    reason: AnalysisError::NoPoseDetected.to_string(),
                });
                skipped += 1;
                continue;
            }
            Err(e) => {
                warn!("Detection failed for {path}: {e:#}");
                progress.on_event(ProgressEvent::Skipped {
                    path,
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        // A partial set can lack landmarks a rule needs; that frame is
        // skipped, never half-judged.
        let analysis = match analyze_with(&landmarks, activity, &rule_config) {
            Ok(analysis) => analysis,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path,
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        if analysis.has_bad_posture {
            with_issues += 1;
        }

        // Build per-frame report
        let mut report = FrameReport::new(path, iso_timestamp(), image.dimensions(), analysis);

        if let Some(ref dir) = args.annotate_dir {
            match annotate_frame(&image, &landmarks, dir) {
                Ok(annotated) => {
                    report = report.with_annotated_image(annotated.to_string_lossy());
                }
                Err(e) => {
                    warn!("Annotation failed for {}: {e:#}", report.path);
                }
            }
        }

        progress.on_event(ProgressEvent::Completed {
            report: report.clone(),
        });

        // Output based on format
        match args.format() {
            OutputFormat::Jsonl => {
                output.write(&report)?;
            }
            OutputFormat::Json => {
                all_reports.push(report);
            }
        }

        processed += 1;
    }

    // For JSON format, output all reports as array via adapter
    if matches!(args.format(), OutputFormat::Json) {
        output.write_array(&all_reports, args.pretty)?;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    // Determine exit code
    let exit_code = if with_issues > 0 {
        ExitCode::IssuesFound
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        processed,
        skipped,
        with_issues,
        exit_code,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
