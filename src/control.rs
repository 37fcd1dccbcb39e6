use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::ephemeris::Body;

const TARGET_NONE: u8 = 0;
const TARGET_SUN: u8 = 1;
const TARGET_MOON: u8 = 2;

/// Operator-shared control state: written by the command loop, read by the
/// tracker and dispatcher. Two independent atoms; no invariant spans both.
#[derive(Debug, Default)]
pub struct ControlState {
    target: AtomicU8,
    tracking: AtomicBool,
}

impl ControlState {
    pub fn new(target: Option<Body>, tracking: bool) -> Self {
        let state = Self::default();
        state.set_target(target);
        state.set_tracking(tracking);
        state
    }

    pub fn target(&self) -> Option<Body> {
        match self.target.load(Ordering::Relaxed) {
            TARGET_SUN => Some(Body::Sun),
            TARGET_MOON => Some(Body::Moon),
            _ => None,
        }
    }

    pub fn set_target(&self, target: Option<Body>) {
        let value = match target {
            None => TARGET_NONE,
            Some(Body::Sun) => TARGET_SUN,
            Some(Body::Moon) => TARGET_MOON,
        };
        self.target.store(value, Ordering::Relaxed);
    }

    pub fn tracking(&self) -> bool {
        self.tracking.load(Ordering::Relaxed)
    }

    pub fn set_tracking(&self, on: bool) {
        self.tracking.store(on, Ordering::Relaxed);
    }
}
