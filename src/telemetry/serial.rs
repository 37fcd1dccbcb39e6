use std::io::{self, BufRead, BufReader};
use std::time::Duration;

use serialport::SerialPort;

use super::error::TelemetryError;
use super::reader::LineSource;

/// Line-oriented view of a byte-stream serial connection. The port timeout
/// doubles as the cancellation poll interval of the reader loop.
pub struct SerialSource {
    reader: BufReader<Box<dyn SerialPort>>,
}

impl SerialSource {
    pub fn open(port: &str, baud: u32, timeout: Duration) -> Result<Self, TelemetryError> {
        let handle = serialport::new(port, baud)
            .timeout(timeout)
            .open()
            .map_err(|source| TelemetryError::Open {
                port: port.to_string(),
                source,
            })?;
        log::info!("opened serial port {port} at {baud} baud");
        Ok(Self {
            reader: BufReader::new(handle),
        })
    }
}

impl LineSource for SerialSource {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            // A clean EOF means the device went away; let the caller retry.
            Ok(0) => Err(io::ErrorKind::UnexpectedEof.into()),
            Ok(_) => Ok(Some(String::from_utf8_lossy(&buf).into_owned())),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(e),
        }
    }
}
