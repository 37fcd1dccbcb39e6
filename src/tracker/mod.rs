mod observer;
mod rates;
mod sample;
mod tracker;

pub use observer::Observer;
pub use sample::{RateEstimate, Readout};
pub use tracker::{Tracker, TrackerConfig};
