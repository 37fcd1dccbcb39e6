use thiserror::Error;

#[derive(Debug, Error)]
pub enum MountError {
    #[error("mount rejected command: {0}")]
    Rejected(String),
}

/// Non-blocking motor controller. Implementations must return promptly and
/// tolerate repeated and concurrent commands; the command transport behind
/// them is not this crate's concern.
pub trait MountController: Send + Sync {
    /// Slew toward the given horizontal position.
    fn goto(&self, altitude_deg: f64, azimuth_deg: f64, synchronous: bool)
        -> Result<(), MountError>;

    /// Declare the mount's current physical orientation.
    fn set_pos(&self, altitude_deg: f64, azimuth_deg: f64) -> Result<(), MountError>;
}

/// Stand-in controller that only logs the commands it would send.
pub struct LogMount;

impl MountController for LogMount {
    fn goto(
        &self,
        altitude_deg: f64,
        azimuth_deg: f64,
        synchronous: bool,
    ) -> Result<(), MountError> {
        log::info!(
            "mount goto alt {altitude_deg:.2} az {azimuth_deg:.2} (synchronous: {synchronous})"
        );
        Ok(())
    }

    fn set_pos(&self, altitude_deg: f64, azimuth_deg: f64) -> Result<(), MountError> {
        log::info!("mount set_pos alt {altitude_deg:.2} az {azimuth_deg:.2}");
        Ok(())
    }
}
