//! Per-tick pipeline: state record, pure step function and host façade.
//!
//! Modules run once per tick in dependency order:
//!
//! ```text
//! basic ─┬─ suspension ──────────────┐
//!        ├─ slip ─┬─ brake           │
//! motion │        ├─ traction ───────┤
//! steer ─┘        ├─ scrub ─┬─ road feel ── surface
//!                 └─────────┴─ engine & tyres
//! basic ── clutch ── gearshift
//! ```
//!
//! [`PipelineState::advance`] is infallible: the sample is sanitized first and
//! every envelope clamps its own output, so a tick always completes with a
//! finite, in-range [`SignalBank`].

use rumble_errors::Result;
use rumble_telemetry::channels::GAME_ID;
use rumble_telemetry::{CoreTelemetry, SignalSink, TelemetrySample, TelemetrySource};
use tracing::{debug, trace};

use crate::basic::{DriverInputs, TyreState};
use crate::brake::BrakeState;
use crate::clutch::ClutchState;
use crate::config::PipelineConfig;
use crate::diagnostics::{DiagnosticRecorder, RecorderStatus};
use crate::engine_tyres::{CornerContext, EngineTyresState};
use crate::gearshift::GearshiftState;
use crate::motion::MotionState;
use crate::road_feel::RoadFeelState;
use crate::scrub::ScrubState;
use crate::signals::{Signal, SignalBank};
use crate::slip::{SlipFusion, SlipState};
use crate::steering::SteeringState;
use crate::surface::{SurfaceInputs, SurfaceState};
use crate::suspension::SuspensionState;
use crate::traction::TractionState;
use crate::types::AxlePair;

/// Everything the pipeline remembers between ticks, grouped per module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineState {
    /// Ticks processed since creation or the last reset.
    pub tick: u64,
    pub inputs: DriverInputs,
    pub tyres: TyreState,
    pub motion: MotionState,
    pub suspension: SuspensionState,
    pub slip: SlipState,
    pub brake: BrakeState,
    pub steering: SteeringState,
    pub traction: TractionState,
    pub scrub: ScrubState,
    pub road_feel: RoadFeelState,
    pub engine_tyres: EngineTyresState,
    pub surface: SurfaceState,
    pub clutch: ClutchState,
    pub gearshift: GearshiftState,
}

impl PipelineState {
    /// Run every module once for `sample`.
    pub fn advance(&mut self, sample: &TelemetrySample, fusion: &SlipFusion) {
        let sample = sample.sanitized();
        if self.tick == 0 {
            debug!(gear = sample.gear, max_rpm = sample.max_rpm, "First pipeline tick");
        }

        self.inputs = DriverInputs::from_sample(&sample);
        let inputs = self.inputs;

        self.tyres.update(&sample.tyre_temp);
        self.motion.update(&sample);
        self.suspension.update(&sample, inputs.speed_norm);
        self.slip.update(&sample, &inputs, fusion);
        let learned = self.slip.learned();

        self.brake.update(&inputs, learned);
        self.steering.update(sample.steering);
        self.traction.update(&inputs, &self.steering, self.slip.spin);
        self.scrub.update(&inputs, &self.tyres, learned);
        self.road_feel.update(
            &inputs,
            &self.motion.dof,
            &self.tyres,
            self.suspension.vibration_level(),
            learned,
        );
        self.engine_tyres.update(&CornerContext {
            inputs: &inputs,
            steering: &self.steering,
            tyres: &self.tyres,
            learned_slip: learned,
            scrub: self.scrub.level(),
            traction: self.traction.level(),
            dominance: self.slip.dominance,
            burnout: self.slip.burnout,
        });
        self.surface.update(&SurfaceInputs {
            dof: self.motion.dof,
            heave_norm: self.motion.road.heave,
            speed_norm: inputs.speed_norm,
            tyres: AxlePair::new(self.tyres.front, self.tyres.rear),
            vibration: self.suspension.vibration_level(),
            impact: self.suspension.impact_level(),
            learned_slip: learned,
        });

        self.clutch.update(&inputs);
        self.gearshift.update(&inputs);

        self.tick = self.tick.saturating_add(1);
        trace!(tick = self.tick, "Pipeline tick complete");
    }

    /// Raw (unclamped, ungained) value of `signal` in this state.
    pub fn signal_value(&self, signal: Signal) -> f64 {
        let inputs = &self.inputs;
        let tyres = &self.tyres;
        let road = &self.motion.road;
        let dof = &self.motion.dof;
        let slip = &self.slip;
        let corners = &self.suspension.corners;
        let surface = &self.surface;
        let gearshift = &self.gearshift;

        match signal {
            Signal::EngineRpmNorm => inputs.rpm_norm,
            Signal::EngineThrottle => inputs.throttle,
            Signal::EngineBrake => inputs.brake,
            Signal::CarSpeedNorm => inputs.speed_norm,

            Signal::TyreFl => tyres.wheels.fl,
            Signal::TyreFr => tyres.wheels.fr,
            Signal::TyreRl => tyres.wheels.rl,
            Signal::TyreRr => tyres.wheels.rr,
            Signal::TyreFront => tyres.front,
            Signal::TyreRear => tyres.rear,
            Signal::TyreAll => tyres.all,

            Signal::RoadSurgeNorm => road.surge,
            Signal::RoadSwayNorm => road.sway,
            Signal::RoadHeaveNorm => road.heave,

            Signal::MotionSurge => dof.surge,
            Signal::MotionSway => dof.sway,
            Signal::MotionHeave => dof.heave,
            Signal::MotionPitch | Signal::MotionRoll => 0.0,

            Signal::SlipFl => slip.wheels.fl,
            Signal::SlipFr => slip.wheels.fr,
            Signal::SlipRl => slip.wheels.rl,
            Signal::SlipRr => slip.wheels.rr,
            Signal::SlipFront => slip.learners.front.intensity(),
            Signal::SlipRear => slip.learners.rear.intensity(),

            Signal::EngineTyresFront => self.engine_tyres.level().front,
            Signal::EngineTyresRear => self.engine_tyres.level().rear,

            Signal::ScrubFront => self.scrub.level().front,
            Signal::ScrubRear => self.scrub.level().rear,

            Signal::RoadFeelFront => self.road_feel.level().front,
            Signal::RoadFeelRear => self.road_feel.level().rear,

            Signal::SuspensionFl => corners.fl,
            Signal::SuspensionFr => corners.fr,
            Signal::SuspensionRl => corners.rl,
            Signal::SuspensionRr => corners.rr,
            Signal::VibrationFront => self.suspension.vibration_level().front,
            Signal::VibrationRear => self.suspension.vibration_level().rear,
            Signal::ImpactFront => self.suspension.impact_level().front,
            Signal::ImpactRear => self.suspension.impact_level().rear,

            Signal::SurfaceGrain => surface.grain,
            Signal::SurfaceHarshness => surface.harshness,
            Signal::SurfaceImpactBias => surface.impact_bias,
            Signal::LoadEnvFront => surface.load.front,
            Signal::LoadEnvRear => surface.load.rear,
            Signal::GripBudgetFront => surface.grip_budget.front,
            Signal::GripBudgetRear => surface.grip_budget.rear,

            Signal::BrakeFeelFront => self.brake.feel_level().front,
            Signal::BrakeFeelRear => self.brake.feel_level().rear,
            Signal::BrakeLockFront => self.brake.lock_level().front,
            Signal::BrakeLockRear => self.brake.lock_level().rear,
            Signal::BrakeNSlipFront => self.brake.hybrid_level().front,
            Signal::BrakeNSlipRear => self.brake.hybrid_level().rear,

            Signal::TractionFront => self.traction.level().front,
            Signal::TractionRear => self.traction.level().rear,

            Signal::ClutchFree => self.clutch.level(),

            Signal::GearShift => gearshift.gear_env,
            Signal::GearShiftGrind => gearshift.grind,
            Signal::GearShiftFwdKick => gearshift.fwd_kick,
            Signal::GearShiftBackKick => gearshift.back_kick,
        }
    }
}

/// Pure `(state, sample) -> state` form of one tick with the standard slip sources.
pub fn step(state: PipelineState, sample: &TelemetrySample) -> PipelineState {
    step_with(state, sample, &SlipFusion::standard())
}

/// [`step`] with a caller-chosen slip fusion.
pub fn step_with(mut state: PipelineState, sample: &TelemetrySample, fusion: &SlipFusion) -> PipelineState {
    state.advance(sample, fusion);
    state
}

/// Host-facing pipeline: state, signal bank, configuration and diagnostic log.
#[derive(Debug)]
pub struct HapticPipeline {
    config: PipelineConfig,
    state: PipelineState,
    bank: SignalBank,
    fusion: SlipFusion,
    /// `"{prefix}.{name}"` per signal, in catalogue order.
    published_names: Vec<String>,
    recorder: DiagnosticRecorder,
    game_id: String,
}

fn published_names(prefix: &str) -> Vec<String> {
    Signal::ALL
        .iter()
        .map(|signal| format!("{prefix}.{}", signal.name()))
        .collect()
}

impl HapticPipeline {
    /// Create a pipeline after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the prefix or a gain is invalid.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            published_names: published_names(&config.signal_prefix),
            recorder: DiagnosticRecorder::new(config.debug.clone()),
            config,
            state: PipelineState::default(),
            bank: SignalBank::default(),
            fusion: SlipFusion::standard(),
            game_id: String::new(),
        })
    }

    /// Replace the slip estimators.
    pub fn with_fusion(mut self, fusion: SlipFusion) -> Self {
        self.fusion = fusion;
        self
    }

    /// Process one tick.
    pub fn update(&mut self, sample: &TelemetrySample) {
        self.state.advance(sample, &self.fusion);
        self.bank.refresh(&self.state);
        self.recorder.record(&self.game_id, &self.state);
    }

    /// Build the tick's sample from the host's typed record plus named channels.
    pub fn update_from_source<S: TelemetrySource + ?Sized>(
        &mut self,
        core: &CoreTelemetry<'_>,
        source: &S,
    ) {
        if let Some(game_id) = source.read_text(GAME_ID) {
            self.set_game_id(game_id);
        }
        let sample = TelemetrySample::from_source(core, source);
        self.update(&sample);
    }

    /// Remember the active game; blank ids keep the previous one.
    pub fn set_game_id(&mut self, game_id: &str) {
        let game_id = game_id.trim();
        if !game_id.is_empty() && game_id != self.game_id {
            debug!(game_id, "Active game changed");
            self.game_id = game_id.to_string();
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn bank(&self) -> &SignalBank {
        &self.bank
    }

    /// Value of `signal` after gains, exactly as published.
    pub fn value(&self, signal: Signal) -> f64 {
        self.bank.scaled(signal, &self.config.gains)
    }

    /// Published name of `signal` under the configured prefix.
    pub fn published_name(&self, signal: Signal) -> &str {
        self.published_names
            .get(signal.index())
            .map_or(signal.name(), String::as_str)
    }

    /// Push every signal, prefixed and gain-scaled, into `sink`.
    pub fn publish<K: SignalSink + ?Sized>(&self, sink: &mut K) {
        for ((signal, value), name) in self.bank.iter().zip(&self.published_names) {
            sink.publish(name, signal.scale(value, &self.config.gains));
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Apply new gains, prefix or debug settings without touching learned state.
    ///
    /// # Errors
    ///
    /// Returns a validation error and keeps the old configuration when
    /// `config` is invalid.
    pub fn set_config(&mut self, config: PipelineConfig) -> Result<()> {
        config.validate()?;
        if config.signal_prefix != self.config.signal_prefix {
            self.published_names = published_names(&config.signal_prefix);
        }
        self.recorder.set_config(config.debug.clone());
        self.config = config;
        Ok(())
    }

    pub fn recorder_status(&self) -> RecorderStatus {
        self.recorder.status()
    }

    /// Forget everything learned this session.
    pub fn reset(&mut self) {
        debug!(ticks = self.state.tick, "Pipeline state reset");
        self.state = PipelineState::default();
        self.bank = SignalBank::default();
    }
}
