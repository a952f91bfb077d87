//! Small shared value types.

use serde::{Deserialize, Serialize};

/// Front or rear wheel pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axle {
    Front,
    Rear,
}

impl Axle {
    pub const fn other(self) -> Self {
        match self {
            Axle::Front => Axle::Rear,
            Axle::Rear => Axle::Front,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Axle::Front => "front",
            Axle::Rear => "rear",
        }
    }
}

/// One value per axle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxlePair<T> {
    pub front: T,
    pub rear: T,
}

impl<T> AxlePair<T> {
    pub const fn new(front: T, rear: T) -> Self {
        Self { front, rear }
    }

    pub fn get(&self, axle: Axle) -> &T {
        match axle {
            Axle::Front => &self.front,
            Axle::Rear => &self.rear,
        }
    }

    pub fn get_mut(&mut self, axle: Axle) -> &mut T {
        match axle {
            Axle::Front => &mut self.front,
            Axle::Rear => &mut self.rear,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> AxlePair<U> {
        AxlePair {
            front: f(self.front),
            rear: f(self.rear),
        }
    }
}

impl<T: Copy> AxlePair<T> {
    pub const fn splat(value: T) -> Self {
        Self {
            front: value,
            rear: value,
        }
    }
}

/// Which axle, if any, is clearly spinning more than the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dominance {
    #[default]
    Balanced,
    Front,
    Rear,
}

impl Dominance {
    /// An axle dominates when its spin exceeds 1.2x the other axle's.
    pub fn classify(front_spin: f64, rear_spin: f64) -> Self {
        if front_spin > rear_spin * DOMINANCE_RATIO {
            Dominance::Front
        } else if rear_spin > front_spin * DOMINANCE_RATIO {
            Dominance::Rear
        } else {
            Dominance::Balanced
        }
    }

    pub fn is(self, axle: Axle) -> bool {
        matches!(
            (self, axle),
            (Dominance::Front, Axle::Front) | (Dominance::Rear, Axle::Rear)
        )
    }
}

pub const DOMINANCE_RATIO: f64 = 1.2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominance_needs_clear_margin() {
        assert_eq!(Dominance::classify(0.5, 0.45), Dominance::Balanced);
        assert_eq!(Dominance::classify(0.5, 0.41), Dominance::Front);
        assert_eq!(Dominance::classify(0.0, 0.1), Dominance::Rear);
        assert_eq!(Dominance::classify(0.0, 0.0), Dominance::Balanced);
    }

    #[test]
    fn test_dominance_is_axle() {
        assert!(Dominance::Front.is(Axle::Front));
        assert!(!Dominance::Front.is(Axle::Rear));
        assert!(!Dominance::Balanced.is(Axle::Rear));
    }

    #[test]
    fn test_axle_pair_access() {
        let mut pair = AxlePair::new(1, 2);
        *pair.get_mut(Axle::Rear) += 5;
        assert_eq!(*pair.get(Axle::Rear), 7);
        assert_eq!(Axle::Front.other(), Axle::Rear);
    }
}
