//! External channel names.
//!
//! These are the property paths exposed by the host's data layer. Lists are in
//! priority order where a quantity has several candidate channels.

use crate::sample::Wheels;

/// Suspension travel per wheel (metres).
pub const SUSPENSION_TRAVEL: Wheels<&str> = Wheels {
    fl: "DataCorePlugin.GameRawData.Physics.SuspensionTravelFL",
    fr: "DataCorePlugin.GameRawData.Physics.SuspensionTravelFR",
    rl: "DataCorePlugin.GameRawData.Physics.SuspensionTravelRL",
    rr: "DataCorePlugin.GameRawData.Physics.SuspensionTravelRR",
};

/// Damper velocity per wheel (m/s), exposed by some simulators only.
pub const DAMPER_VELOCITY: Wheels<&str> = Wheels {
    fl: "DataCorePlugin.GameRawData.Physics.SuspensionVelocityFL",
    fr: "DataCorePlugin.GameRawData.Physics.SuspensionVelocityFR",
    rl: "DataCorePlugin.GameRawData.Physics.SuspensionVelocityRL",
    rr: "DataCorePlugin.GameRawData.Physics.SuspensionVelocityRR",
};

/// Computed longitudinal slip ratio per wheel from a companion plugin.
pub const SLIP_RATIO: Wheels<&str> = Wheels {
    fl: "ViperDataPlugin.CalcLngWheelSlip.Computed.LngWheelSlip_FL",
    fr: "ViperDataPlugin.CalcLngWheelSlip.Computed.LngWheelSlip_FR",
    rl: "ViperDataPlugin.CalcLngWheelSlip.Computed.LngWheelSlip_RL",
    rr: "ViperDataPlugin.CalcLngWheelSlip.Computed.LngWheelSlip_RR",
};

/// Raw simulator slip channel per wheel; semantics vary by simulator.
pub const SIM_SLIP: Wheels<&str> = Wheels {
    fl: "DataCorePlugin.GameRawData.Physics.WheelSlip01",
    fr: "DataCorePlugin.GameRawData.Physics.WheelSlip02",
    rl: "DataCorePlugin.GameRawData.Physics.WheelSlip03",
    rr: "DataCorePlugin.GameRawData.Physics.WheelSlip04",
};

/// Wheel angular speed per wheel.
pub const WHEEL_ANGULAR_SPEED: Wheels<&str> = Wheels {
    fl: "DataCorePlugin.GameRawData.Physics.WheelAngularSpeed01",
    fr: "DataCorePlugin.GameRawData.Physics.WheelAngularSpeed02",
    rl: "DataCorePlugin.GameRawData.Physics.WheelAngularSpeed03",
    rr: "DataCorePlugin.GameRawData.Physics.WheelAngularSpeed04",
};

/// Wheel linear speed per wheel (km/h).
pub const WHEEL_LINEAR_SPEED: Wheels<&str> = Wheels {
    fl: "DataCorePlugin.GameRawData.Physics.WheelSpeed01",
    fr: "DataCorePlugin.GameRawData.Physics.WheelSpeed02",
    rl: "DataCorePlugin.GameRawData.Physics.WheelSpeed03",
    rr: "DataCorePlugin.GameRawData.Physics.WheelSpeed04",
};

/// Raw speed channel used when the typed speed is not positive.
pub const RAW_SPEED_KMH: &str = "DataCorePlugin.GameRawData.Physics.SpeedKmh";

/// Longitudinal acceleration (G).
pub const SURGE: &str = "DataCorePlugin.GameData.Surge";
/// Lateral acceleration (G).
pub const SWAY: &str = "DataCorePlugin.GameData.Sway";
/// Vertical acceleration (G).
pub const HEAVE: &str = "DataCorePlugin.GameData.Heave";

/// Steering candidates: normalized or angular, depending on the simulator.
pub const STEERING: [&str; 4] = [
    "DataCorePlugin.GameRawData.Physics.SteerAngle",
    "DataCorePlugin.GameData.SteeringWheelAngle",
    "DataCorePlugin.GameData.SteeringAngle",
    "DataCorePlugin.GameRawData.mSteering",
];

/// Clutch pedal candidates.
pub const CLUTCH: [&str; 3] = [
    "DataCorePlugin.GameData.Clutch",
    "DataCorePlugin.GameRawData.Physics.Clutch",
    "DataCorePlugin.GameData.ClutchPosition",
];

/// Identifier of the running game (text).
pub const GAME_ID: &str = "DataCorePlugin.CurrentGame";
