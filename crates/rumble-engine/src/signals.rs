//! Published signal catalogue and the per-tick signal bank.

use rumble_filters::{clamp_signed, clamp01};
use serde::Serialize;

use crate::config::GainConfig;
use crate::pipeline::PipelineState;

/// Declared output range of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangeClass {
    /// `[0, 1]` haptic intensity
    Unit,
    /// `[-1, 1]` motion channel
    Signed,
    /// `[0, 1]` read-only diagnostic
    Diagnostic,
}

/// Family gain applied (together with the global gain) when publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GainFamily {
    RoadFeel,
    SuspensionImpact,
    SuspensionVibration,
    EngineTyres,
    BrakeFeel,
    BrakeNSlip,
    Abs,
    Traction,
    ClutchFree,
    Gearshift,
}

impl GainFamily {
    /// Combined `family * global` multiplier.
    pub fn multiplier(self, gains: &GainConfig) -> f64 {
        let family = match self {
            GainFamily::RoadFeel => gains.road_feel,
            GainFamily::SuspensionImpact => gains.suspension_impact,
            GainFamily::SuspensionVibration => gains.suspension_vibration,
            GainFamily::EngineTyres => gains.engine_tyres,
            GainFamily::BrakeFeel => gains.brake_feel,
            GainFamily::BrakeNSlip => gains.brake_n_slip,
            GainFamily::Abs => gains.abs,
            GainFamily::Traction => gains.traction,
            GainFamily::ClutchFree => gains.clutch_free,
            GainFamily::Gearshift => gains.gearshift,
        };
        family * gains.global
    }
}

macro_rules! signal_catalogue {
    ($( $variant:ident => $name:literal, $range:ident, $gain:expr; )+) => {
        /// Every published signal.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[repr(u8)]
        pub enum Signal {
            $( $variant, )+
        }

        impl Signal {
            /// All signals in publication order.
            pub const ALL: &'static [Signal] = &[ $( Signal::$variant, )+ ];

            /// Number of signals in the catalogue.
            pub const COUNT: usize = Self::ALL.len();

            /// Name without the configured prefix, e.g. `"BrakeFeel.FrontIntensity"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Signal::$variant => $name, )+
                }
            }

            pub const fn range(self) -> RangeClass {
                match self {
                    $( Signal::$variant => RangeClass::$range, )+
                }
            }

            pub const fn gain_family(self) -> Option<GainFamily> {
                match self {
                    $( Signal::$variant => $gain, )+
                }
            }
        }
    };
}

signal_catalogue! {
    EngineRpmNorm => "Engine.RpmNorm", Unit, None;
    EngineThrottle => "Engine.Throttle", Unit, None;
    EngineBrake => "Engine.Brake", Unit, None;
    CarSpeedNorm => "Car.SpeedNorm", Unit, None;

    TyreFl => "Tyres.FL.Intensity", Unit, None;
    TyreFr => "Tyres.FR.Intensity", Unit, None;
    TyreRl => "Tyres.RL.Intensity", Unit, None;
    TyreRr => "Tyres.RR.Intensity", Unit, None;
    TyreFront => "Tyres.Front.Intensity", Unit, None;
    TyreRear => "Tyres.Rear.Intensity", Unit, None;
    TyreAll => "Tyres.All.Intensity", Unit, None;

    RoadSurgeNorm => "Road.SurgeNorm", Unit, None;
    RoadSwayNorm => "Road.SwayNorm", Unit, None;
    RoadHeaveNorm => "Road.HeaveNorm", Unit, None;

    MotionSurge => "Motion.Surge", Signed, None;
    MotionSway => "Motion.Sway", Signed, None;
    MotionHeave => "Motion.Heave", Signed, None;
    MotionPitch => "Motion.Pitch", Signed, None;
    MotionRoll => "Motion.Roll", Signed, None;

    SlipFl => "Slip.FL", Diagnostic, None;
    SlipFr => "Slip.FR", Diagnostic, None;
    SlipRl => "Slip.RL", Diagnostic, None;
    SlipRr => "Slip.RR", Diagnostic, None;
    SlipFront => "Slip.Front.Intensity", Unit, None;
    SlipRear => "Slip.Rear.Intensity", Unit, None;

    EngineTyresFront => "EngineTyres.FrontIntensity", Unit, Some(GainFamily::EngineTyres);
    EngineTyresRear => "EngineTyres.RearIntensity", Unit, Some(GainFamily::EngineTyres);

    ScrubFront => "TyreScrub.FrontIntensity", Unit, None;
    ScrubRear => "TyreScrub.RearIntensity", Unit, None;

    RoadFeelFront => "RoadFeel.FrontIntensity", Unit, Some(GainFamily::RoadFeel);
    RoadFeelRear => "RoadFeel.RearIntensity", Unit, Some(GainFamily::RoadFeel);

    SuspensionFl => "Suspension.FL", Unit, None;
    SuspensionFr => "Suspension.FR", Unit, None;
    SuspensionRl => "Suspension.RL", Unit, None;
    SuspensionRr => "Suspension.RR", Unit, None;
    VibrationFront => "Suspension.VibrationFront", Unit, Some(GainFamily::SuspensionVibration);
    VibrationRear => "Suspension.VibrationRear", Unit, Some(GainFamily::SuspensionVibration);
    ImpactFront => "Suspension.ImpactFront", Unit, Some(GainFamily::SuspensionImpact);
    ImpactRear => "Suspension.ImpactRear", Unit, Some(GainFamily::SuspensionImpact);

    SurfaceGrain => "Surface.Grain", Diagnostic, None;
    SurfaceHarshness => "Surface.Harshness", Diagnostic, None;
    SurfaceImpactBias => "Surface.ImpactBias", Diagnostic, None;
    LoadEnvFront => "Suspension.Front.LoadEnv", Diagnostic, None;
    LoadEnvRear => "Suspension.Rear.LoadEnv", Diagnostic, None;
    GripBudgetFront => "GripBudget.Front", Diagnostic, None;
    GripBudgetRear => "GripBudget.Rear", Diagnostic, None;

    BrakeFeelFront => "BrakeFeel.FrontIntensity", Unit, Some(GainFamily::BrakeFeel);
    BrakeFeelRear => "BrakeFeel.RearIntensity", Unit, Some(GainFamily::BrakeFeel);
    BrakeLockFront => "BrakeLock.FrontIntensity", Unit, Some(GainFamily::Abs);
    BrakeLockRear => "BrakeLock.RearIntensity", Unit, Some(GainFamily::Abs);
    BrakeNSlipFront => "BrakeNSlip.FrontIntensity", Unit, Some(GainFamily::BrakeNSlip);
    BrakeNSlipRear => "BrakeNSlip.RearIntensity", Unit, Some(GainFamily::BrakeNSlip);

    TractionFront => "TC.FrontActivity", Unit, Some(GainFamily::Traction);
    TractionRear => "TC.RearActivity", Unit, Some(GainFamily::Traction);

    ClutchFree => "Drivetrain.ClutchFreeIntensity", Unit, Some(GainFamily::ClutchFree);

    GearShift => "GearShift.Intensity", Unit, Some(GainFamily::Gearshift);
    GearShiftGrind => "GearShift.GrindIntensity", Unit, Some(GainFamily::Gearshift);
    GearShiftFwdKick => "GearShift.FwdKick", Unit, Some(GainFamily::Gearshift);
    GearShiftBackKick => "GearShift.BackKick", Unit, Some(GainFamily::Gearshift);
}

impl Signal {
    /// Look a signal up by its unprefixed name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }

    /// Clamp `value` into this signal's declared range; non-finite becomes 0.
    pub fn clamp(self, value: f64) -> f64 {
        match self.range() {
            RangeClass::Signed => clamp_signed(value),
            RangeClass::Unit | RangeClass::Diagnostic => clamp01(value),
        }
    }

    /// Apply configured gains and clamp for publication.
    pub fn scale(self, value: f64, gains: &GainConfig) -> f64 {
        match self.gain_family() {
            Some(family) => self.clamp(value * family.multiplier(gains)),
            None => self.clamp(value),
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Unscaled value of every signal for the current tick.
///
/// Derived from [`PipelineState`] after each update; holds no state of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBank {
    values: [f64; Signal::COUNT],
}

impl Default for SignalBank {
    fn default() -> Self {
        Self {
            values: [0.0; Signal::COUNT],
        }
    }
}

impl SignalBank {
    /// Snapshot every signal from the pipeline state.
    pub fn from_state(state: &PipelineState) -> Self {
        let mut bank = Self::default();
        bank.refresh(state);
        bank
    }

    /// Recompute every signal in place.
    pub fn refresh(&mut self, state: &PipelineState) {
        for &signal in Signal::ALL {
            let value = signal.clamp(state.signal_value(signal));
            if let Some(slot) = self.values.get_mut(signal.index()) {
                *slot = value;
            }
        }
    }

    /// Unscaled, range-clamped value.
    pub fn get(&self, signal: Signal) -> f64 {
        self.values.get(signal.index()).copied().unwrap_or(0.0)
    }

    /// Value after gains, as a host would see it.
    pub fn scaled(&self, signal: Signal, gains: &GainConfig) -> f64 {
        signal.scale(self.get(signal), gains)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Signal, f64)> + '_ {
        Signal::ALL.iter().map(|&signal| (signal, self.get(signal)))
    }
}
