mod decoder;
mod error;
mod reader;
mod serial;
mod types;

pub use decoder::Decoder;
pub use error::TelemetryError;
pub use reader::{run_reader, LineSource};
pub use serial::SerialSource;
pub use types::{Decoded, Fix};
