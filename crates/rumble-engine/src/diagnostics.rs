//! Optional per-tick CSV log of the pipeline's key envelopes.
//!
//! The recorder is strictly best effort: a directory that cannot be created,
//! a file that cannot be opened or a failed write logs one warning and
//! switches the recorder to [`RecorderStatus::Disabled`]. Telemetry
//! processing is never affected.

use std::fs::{self, File};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rumble_errors::{ErrorContext, Result, ResultExt};
use tracing::{debug, info, warn};

use crate::config::DebugConfig;
use crate::pipeline::PipelineState;

/// Column order of every diagnostic log.
pub const CSV_COLUMNS: [&str; 32] = [
    "TimeSec",
    "GameId",
    "SpeedKmh",
    "Gear",
    "RpmNorm",
    "Throttle",
    "Brake",
    "Clutch",
    "SlipFL",
    "SlipFR",
    "SlipRL",
    "SlipRR",
    "SlipFront",
    "SlipRear",
    "BrakeFeelFront",
    "BrakeFeelRear",
    "BrakeNSlipFront",
    "BrakeNSlipRear",
    "BrakeLockFront",
    "BrakeLockRear",
    "TCFrontEnv",
    "TCRearEnv",
    "RoadFeelFront",
    "RoadFeelRear",
    "SuspImpactFront",
    "SuspImpactRear",
    "EngTyresFrontEnv",
    "EngTyresRearEnv",
    "GearShiftEnv",
    "GearShiftGrindEnv",
    "GearShiftFwdKick",
    "GearShiftBackKick",
];

/// File-name stand-in when the host has not reported a game.
pub const UNKNOWN_GAME: &str = "UnknownGame";

pub fn csv_header() -> String {
    CSV_COLUMNS.join(",")
}

/// Game id reduced to characters that are safe in a file name.
pub fn sanitize_game_id(game_id: &str) -> String {
    let trimmed = game_id.trim();
    if trimmed.is_empty() {
        return UNKNOWN_GAME.to_string();
    }
    trimmed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `rumble_{game}_{yyyyMMdd_HHmmss}.csv`
pub fn log_file_name(game_id: &str, now: DateTime<Utc>) -> String {
    format!(
        "rumble_{}_{}.csv",
        sanitize_game_id(game_id),
        now.format("%Y%m%d_%H%M%S")
    )
}

/// One CSV row for the state after a tick.
pub fn format_row(elapsed_secs: f64, game_id: &str, state: &PipelineState) -> String {
    let inputs = &state.inputs;
    let slip = &state.slip;
    let slip_axles = slip.wheel_means();
    let gearshift = &state.gearshift;

    let envelopes = [
        slip.wheels.fl,
        slip.wheels.fr,
        slip.wheels.rl,
        slip.wheels.rr,
        slip_axles.front,
        slip_axles.rear,
        state.brake.feel_level().front,
        state.brake.feel_level().rear,
        state.brake.hybrid_level().front,
        state.brake.hybrid_level().rear,
        state.brake.lock_level().front,
        state.brake.lock_level().rear,
        state.traction.level().front,
        state.traction.level().rear,
        state.road_feel.level().front,
        state.road_feel.level().rear,
        state.suspension.impact_level().front,
        state.suspension.impact_level().rear,
        state.engine_tyres.level().front,
        state.engine_tyres.level().rear,
        gearshift.gear_env,
        gearshift.grind,
        gearshift.fwd_kick,
        gearshift.back_kick,
    ];

    let mut fields = Vec::with_capacity(CSV_COLUMNS.len());
    fields.push(format!("{elapsed_secs:.3}"));
    fields.push(game_id.replace(',', "_"));
    fields.push(format!("{:.2}", inputs.speed_kmh));
    fields.push(inputs.gear.to_string());
    fields.push(format!("{:.4}", inputs.rpm_norm));
    fields.push(format!("{:.3}", inputs.throttle));
    fields.push(format!("{:.3}", inputs.brake));
    fields.push(format!("{:.3}", inputs.clutch));
    fields.extend(envelopes.iter().map(|v| format!("{v:.4}")));
    fields.join(",")
}

/// Lifecycle of the diagnostic log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderStatus {
    /// Logging is switched off, or on but no file has been opened yet.
    #[default]
    Idle,
    Recording,
    /// A filesystem failure switched logging off until the toggle is cycled.
    Disabled,
}

struct OpenLog {
    writer: LineWriter<File>,
    path: PathBuf,
    started: DateTime<Utc>,
}

/// Appends one row per tick while the debug toggle is on.
pub struct DiagnosticRecorder {
    config: DebugConfig,
    log: Option<OpenLog>,
    status: RecorderStatus,
}

impl std::fmt::Debug for DiagnosticRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticRecorder")
            .field("config", &self.config)
            .field("path", &self.path())
            .field("status", &self.status)
            .finish()
    }
}

impl DiagnosticRecorder {
    pub fn new(config: DebugConfig) -> Self {
        Self {
            config,
            log: None,
            status: RecorderStatus::Idle,
        }
    }

    pub fn config(&self) -> &DebugConfig {
        &self.config
    }

    /// Apply a new toggle or directory; the open file is closed when either changes.
    pub fn set_config(&mut self, config: DebugConfig) {
        if config != self.config {
            self.close();
            self.config = config;
        }
    }

    pub fn status(&self) -> RecorderStatus {
        self.status
    }

    /// Path of the file currently being written.
    pub fn path(&self) -> Option<&Path> {
        self.log.as_ref().map(|log| log.path.as_path())
    }

    /// Log the state after a tick. Never fails; problems disable the recorder.
    pub fn record(&mut self, game_id: &str, state: &PipelineState) {
        if !self.config.enabled {
            self.close();
            return;
        }
        if self.status == RecorderStatus::Disabled {
            return;
        }

        if self.log.is_none() {
            match self.open(game_id) {
                Ok(log) => {
                    info!(path = %log.path.display(), "Diagnostic log opened");
                    self.log = Some(log);
                    self.status = RecorderStatus::Recording;
                }
                Err(e) => {
                    warn!(error = %e, "Diagnostic log disabled");
                    self.status = RecorderStatus::Disabled;
                    return;
                }
            }
        }

        let Some(log) = self.log.as_mut() else {
            return;
        };
        let elapsed = Utc::now().signed_duration_since(log.started);
        let row = format_row(elapsed.num_milliseconds() as f64 / 1000.0, game_id, state);
        if let Err(e) = writeln!(log.writer, "{row}") {
            warn!(error = %e, path = %log.path.display(), "Diagnostic log write failed; disabling");
            self.log = None;
            self.status = RecorderStatus::Disabled;
        }
    }

    /// Flush and close the current file. Cycling the toggle re-arms a disabled recorder.
    pub fn close(&mut self) {
        if let Some(mut log) = self.log.take() {
            if let Err(e) = log.writer.flush() {
                warn!(error = %e, path = %log.path.display(), "Diagnostic log flush failed");
            }
            debug!(path = %log.path.display(), "Diagnostic log closed");
        }
        self.status = RecorderStatus::Idle;
    }

    fn open(&self, game_id: &str) -> Result<OpenLog> {
        let dir = &self.config.log_dir;
        let context = || ErrorContext::new("open diagnostic log").with("dir", dir.display().to_string());

        fs::create_dir_all(dir).context(context())?;

        let now = Utc::now();
        let path = dir.join(log_file_name(game_id, now));
        let file = File::create(&path).context(context())?;
        let mut writer = LineWriter::new(file);
        writeln!(writer, "{}", csv_header()).context(context())?;

        Ok(OpenLog {
            writer,
            path,
            started: now,
        })
    }
}

impl Drop for DiagnosticRecorder {
    fn drop(&mut self) {
        self.close();
    }
}
