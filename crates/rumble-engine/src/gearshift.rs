//! Gearshift kicks and the mis-shift (grind) state machine.
//!
//! A gear change fires an impulse into the forward or backward kick and the
//! shared shift envelope; those only ever decay. A change made with a sloppy
//! clutch under load, or flat-shifted with the clutch out, also arms a grind
//! window. While the window is armed the grind envelope follows how hard the
//! driver keeps abusing the gearbox, and releases once they stop.

use rumble_filters::{clamp01, snap_to_zero};
use tracing::debug;

use crate::basic::DriverInputs;

/// Minimum rpm-norm for a gear change to register at all.
pub const ENGINE_AWAKE: f64 = 0.05;
pub const ENGINE_LOADED: f64 = 0.12;
pub const DOWNSHIFT_BOOST: f64 = 1.10;
pub const GEAR_ENV_SHARE: f64 = 0.7;

pub const SHIFT_THROTTLE: f64 = 0.08;
/// Clutch within this distance of either end counts as properly used.
pub const CLUTCH_EXTREME: f64 = 0.10;
pub const ABUSE_CAP: f64 = 1.8;
pub const MID_BOOST_CAP: f64 = 1.55;

pub const WINDOW_DECAY: f64 = 0.985;
pub const WINDOW_CLOSE: f64 = 0.01;
pub const GRIND_RELEASE: f64 = 0.90;

pub const KICK_DECAY: f64 = 0.85;
pub const GEAR_ENV_DECAY: f64 = 0.80;

/// How long the gearbox keeps listening for continued abuse after a mis-shift.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GrindWindow {
    #[default]
    Idle,
    /// Remaining window level in `(0.01, 1]`.
    Armed(f64),
}

impl GrindWindow {
    pub fn level(self) -> f64 {
        match self {
            GrindWindow::Idle => 0.0,
            GrindWindow::Armed(level) => level,
        }
    }

    pub fn is_armed(self) -> bool {
        matches!(self, GrindWindow::Armed(_))
    }
}

/// Direction of a detected gear change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GearshiftState {
    last_gear: Option<i32>,
    pub fwd_kick: f64,
    pub back_kick: f64,
    /// Combined shift envelope.
    pub gear_env: f64,
    pub grind: f64,
    pub window: GrindWindow,
    /// Shift registered on the latest tick, if any.
    pub last_shift: Option<Shift>,
}

/// Distance of the clutch from either extreme: `0` at 0 or 1, `0.5` at half.
fn clutch_mid(clutch: f64) -> f64 {
    clutch.min(1.0 - clutch)
}

impl GearshiftState {
    pub fn update(&mut self, inputs: &DriverInputs) {
        let gear = inputs.gear;
        let previous = *self.last_gear.get_or_insert(gear);
        let clutch = clamp01(inputs.clutch);
        let mid = clutch_mid(clutch);

        self.sustain_grind(inputs, mid);

        self.last_shift = None;
        if gear != previous && inputs.rpm_norm > ENGINE_AWAKE {
            let shift = if gear > previous { Shift::Up } else { Shift::Down };
            self.kick(inputs, shift);
            self.last_shift = Some(shift);
            debug!(from = previous, to = gear, ?shift, "Gear change");

            if is_mis_shift(inputs, gear, clutch, mid) {
                self.window = GrindWindow::Armed(1.0);
                let abuse = (0.40 + 1.2 * mid + inputs.throttle).min(ABUSE_CAP);
                let spike =
                    clamp01(inputs.rpm_norm * 2.6 * (0.40 + 0.60 * inputs.throttle) * abuse);
                self.grind = self.grind.max(spike);
                debug!(spike, clutch, throttle = inputs.throttle, "Mis-shift detected");
            }
        }

        self.fwd_kick = clamp01(snap_to_zero(self.fwd_kick * KICK_DECAY));
        self.back_kick = clamp01(snap_to_zero(self.back_kick * KICK_DECAY));
        self.gear_env = clamp01(snap_to_zero(self.gear_env * GEAR_ENV_DECAY));
        self.grind = clamp01(self.grind);
        self.last_gear = Some(gear);
    }

    fn kick(&mut self, inputs: &DriverInputs, shift: Shift) {
        let mut hit = clamp01(inputs.rpm_norm * 3.0 * (0.55 + 0.45 * inputs.throttle));
        match shift {
            Shift::Up => self.back_kick = self.back_kick.max(hit),
            Shift::Down => {
                hit = (hit * DOWNSHIFT_BOOST).min(1.0);
                self.fwd_kick = self.fwd_kick.max(hit);
            }
        }
        self.gear_env = self.gear_env.max(hit * GEAR_ENV_SHARE);
    }

    /// Follow continued abuse while the window from an earlier tick is open.
    fn sustain_grind(&mut self, inputs: &DriverInputs, mid: f64) {
        let GrindWindow::Armed(level) = self.window else {
            self.release_grind();
            return;
        };

        let level = level * WINDOW_DECAY;
        if level < WINDOW_CLOSE {
            self.window = GrindWindow::Idle;
            debug!(grind = self.grind, "Grind window closed");
            self.release_grind();
            return;
        }
        self.window = GrindWindow::Armed(level);

        let coasting = inputs.throttle < 0.02 && inputs.brake < 0.02 && inputs.clutch <= CLUTCH_EXTREME;
        let abusing = inputs.gear != 0
            && inputs.rpm_norm > ENGINE_LOADED
            && (inputs.throttle > 0.10 || coasting);

        if abusing {
            let sustained = clamp01(inputs.rpm_norm * 2.6 * (0.35 + 0.65 * inputs.throttle))
                * (1.0 + 1.1 * mid).min(MID_BOOST_CAP);
            self.grind = self.grind * 0.35 + sustained * 0.65;
        } else {
            self.release_grind();
        }
    }

    fn release_grind(&mut self) {
        self.grind = snap_to_zero(self.grind * GRIND_RELEASE);
    }
}

/// In gear, engine loaded, on the throttle, and the clutch either half-used
/// or not used at all.
fn is_mis_shift(inputs: &DriverInputs, gear: i32, clutch: f64, mid: f64) -> bool {
    gear != 0
        && inputs.rpm_norm > ENGINE_LOADED
        && inputs.throttle > SHIFT_THROTTLE
        && (mid > CLUTCH_EXTREME || clutch <= CLUTCH_EXTREME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_gear(gear: i32, rpm_norm: f64, throttle: f64, clutch: f64) -> DriverInputs {
        DriverInputs {
            gear,
            rpm_norm,
            throttle,
            clutch,
            ..DriverInputs::default()
        }
    }

    #[test]
    fn test_first_tick_seeds_previous_gear() {
        let mut gs = GearshiftState::default();
        gs.update(&in_gear(4, 0.8, 1.0, 0.0));
        assert_eq!(gs.last_shift, None);
        assert_eq!(gs.back_kick, 0.0);
        assert_eq!(gs.window, GrindWindow::Idle);
    }

    #[test]
    fn test_flat_upshift_kicks_and_arms_window() {
        let mut gs = GearshiftState::default();
        gs.update(&in_gear(2, 0.5, 1.0, 0.0));
        gs.update(&in_gear(3, 0.5, 1.0, 0.0));

        assert_eq!(gs.last_shift, Some(Shift::Up));
        assert!(gs.back_kick > 0.0);
        assert_eq!(gs.fwd_kick, 0.0);
        assert!(gs.grind > 0.0);
        assert_eq!(gs.window.level(), 1.0);
        // hit = 1.0, decayed once
        assert!((gs.back_kick - KICK_DECAY).abs() < 1e-12);
        assert!((gs.gear_env - 0.7 * GEAR_ENV_DECAY).abs() < 1e-12);
    }

    #[test]
    fn test_clean_clutched_shift_does_not_grind() {
        let mut gs = GearshiftState::default();
        gs.update(&in_gear(2, 0.5, 0.0, 1.0));
        gs.update(&in_gear(3, 0.5, 0.0, 1.0));
        assert!(gs.back_kick > 0.0);
        assert_eq!(gs.grind, 0.0);
        assert_eq!(gs.window, GrindWindow::Idle);
    }

    #[test]
    fn test_downshift_boost() {
        let mut gs = GearshiftState::default();
        gs.update(&in_gear(4, 0.2, 0.0, 1.0));
        gs.update(&in_gear(3, 0.2, 0.0, 1.0));
        let hit = 0.2 * 3.0 * 0.55 * DOWNSHIFT_BOOST;
        assert!((gs.fwd_kick - hit * KICK_DECAY).abs() < 1e-12);
        assert_eq!(gs.last_shift, Some(Shift::Down));
    }

    #[test]
    fn test_sleeping_engine_ignores_change() {
        let mut gs = GearshiftState::default();
        gs.update(&in_gear(0, 0.0, 0.0, 1.0));
        gs.update(&in_gear(1, 0.0, 0.0, 1.0));
        assert_eq!(gs.last_shift, None);
        assert_eq!(gs.back_kick, 0.0);
    }

    #[test]
    fn test_grind_sustains_while_abusing_then_window_closes() {
        let mut gs = GearshiftState::default();
        gs.update(&in_gear(2, 0.5, 1.0, 0.5));
        gs.update(&in_gear(3, 0.5, 1.0, 0.5));
        assert!(gs.window.is_armed());

        for _ in 0..50 {
            gs.update(&in_gear(3, 0.5, 1.0, 0.5));
        }
        assert!(gs.grind > 0.9);

        for _ in 0..400 {
            gs.update(&in_gear(3, 0.5, 1.0, 0.5));
        }
        assert_eq!(gs.window, GrindWindow::Idle);

        for _ in 0..100 {
            gs.update(&in_gear(3, 0.5, 1.0, 0.5));
        }
        assert_eq!(gs.grind, 0.0);
    }

    #[test]
    fn test_grind_releases_when_abuse_stops() {
        let mut gs = GearshiftState::default();
        gs.update(&in_gear(2, 0.5, 1.0, 0.0));
        gs.update(&in_gear(3, 0.5, 1.0, 0.0));
        let spike = gs.grind;
        // clutch fully in: not abusing
        gs.update(&in_gear(3, 0.5, 0.0, 1.0));
        assert!((gs.grind - spike * GRIND_RELEASE).abs() < 1e-12);
        assert!(gs.window.is_armed());
    }

    #[test]
    fn test_kicks_decay_to_zero() {
        let mut gs = GearshiftState::default();
        gs.update(&in_gear(2, 0.5, 1.0, 1.0));
        gs.update(&in_gear(3, 0.5, 1.0, 1.0));
        for _ in 0..60 {
            gs.update(&in_gear(3, 0.5, 1.0, 1.0));
        }
        assert_eq!(gs.back_kick, 0.0);
        assert_eq!(gs.gear_env, 0.0);
    }
}
