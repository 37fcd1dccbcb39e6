use std::sync::Arc;

use strum_macros::{Display, EnumString};

use crate::control::ControlState;
use crate::ephemeris::BodyPosition;

use super::controller::MountController;

/// Cardinal reference orientations used to align the mount at the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Alignment {
    North,
    South,
    East,
    West,
}

impl Alignment {
    pub fn azimuth_deg(self) -> f64 {
        match self {
            Alignment::North => 0.0,
            Alignment::East => 90.0,
            Alignment::South => 180.0,
            Alignment::West => 270.0,
        }
    }
}

/// Forwards tracking samples and manual commands to the motor controller.
/// Mount failures are logged and swallowed; tracking never stops for a
/// missed command.
#[derive(Clone)]
pub struct Dispatcher {
    mount: Arc<dyn MountController>,
    control: Arc<ControlState>,
}

impl Dispatcher {
    pub fn new(mount: Arc<dyn MountController>, control: Arc<ControlState>) -> Self {
        Self { mount, control }
    }

    /// Sends the sample as a non-blocking move when a target is selected and
    /// tracking is enabled.
    pub fn dispatch(&self, sample: &BodyPosition) {
        if self.control.target().is_none() || !self.control.tracking() {
            return;
        }
        if let Err(e) = self
            .mount
            .goto(sample.altitude_deg, sample.azimuth_deg, false)
        {
            log::warn!("move command failed: {e}");
        }
    }

    /// Points the mount at a cardinal direction at zero altitude, bypassing
    /// the tracking cycle. Leaves the observer frame and target selection
    /// untouched.
    pub fn align(&self, alignment: Alignment) {
        if let Err(e) = self.mount.set_pos(0.0, alignment.azimuth_deg()) {
            log::warn!("alignment command failed: {e}");
        }
    }
}
