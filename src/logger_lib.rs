use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use rand::Rng;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::error;

use crate::current_timestamp;
use crate::data_structure::Reading;

const HEADER: [&str; 5] = ["LoopCount", "Timestamp", "Temperature", "Humidity", "CO2"];

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unable to open {} for appending", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write data to the file")]
    Write(#[from] csv::Error),
}

/// One CSV row. Sensor values are rounded to whole numbers on the way out,
/// whatever precision the simulation used internally.
#[derive(Serialize)]
struct LogRow<'a> {
    loop_count: u64,
    timestamp: &'a str,
    #[serde(serialize_with = "round_whole")]
    temperature: f64,
    #[serde(serialize_with = "round_whole")]
    humidity: f64,
    #[serde(serialize_with = "round_whole")]
    co2: f64,
}

fn round_whole<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(value.round() as i64)
}

/// Append-only CSV logger for simulated sensor readings.
///
/// The random generator is injected once and lives as long as the logger,
/// so runs are reproducible when the caller seeds it. The file handle is
/// owned by the csv writer and released when the logger goes out of scope,
/// on every exit path.
pub struct SensorDataLogger<R: Rng> {
    writer: Writer<File>,
    rng: R,
}

impl<R: Rng> std::fmt::Debug for SensorDataLogger<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorDataLogger").finish_non_exhaustive()
    }
}

impl<R: Rng> SensorDataLogger<R> {
    /// Opens `path` for appending, creating it if absent. Writes the fixed
    /// header row first when `write_header` is set and the file is empty.
    /// Existing content is never touched.
    pub fn open(path: &Path, write_header: bool, rng: R) -> Result<Self, LoggerError> {
        let open_err = |source| LoggerError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(open_err)?;
        let empty = file.metadata().map_err(open_err)?.len() == 0;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if write_header && empty {
            writer.write_record(HEADER)?;
            writer.flush().map_err(csv::Error::from)?;
        }

        Ok(Self { writer, rng })
    }

    /// Simulates one sensor snapshot: a local-time timestamp and three
    /// independent uniform samples over [0, 100), drawn temperature first,
    /// then humidity, then co2.
    pub fn generate_reading(&mut self) -> Reading {
        Reading {
            timestamp: current_timestamp(),
            temperature: self.rng.random_range(0.0..100.0),
            humidity: self.rng.random_range(0.0..100.0),
            co2: self.rng.random_range(0.0..100.0),
        }
    }

    /// Appends one row labeled `loop_count` and flushes it. A failure here
    /// means the row was not written; the caller decides whether to go on.
    pub fn log_reading(&mut self, loop_count: u64, reading: &Reading) -> Result<(), LoggerError> {
        self.writer.serialize(LogRow {
            loop_count,
            timestamp: &reading.timestamp,
            temperature: reading.temperature,
            humidity: reading.humidity,
            co2: reading.co2,
        })?;
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Generates and logs one reading. Write failures are reported and the
    /// row skipped; the session keeps running.
    pub fn run(&mut self, loop_count: u64) {
        let reading = self.generate_reading();
        match self.log_reading(loop_count, &reading) {
            Ok(()) => println!("Data logged successfully!"),
            Err(err) => error!("{err}"),
        }
    }

    /// Flushes and releases the file handle. Dropping the logger does the
    /// same, but only `close` surfaces a final flush error.
    pub fn close(mut self) -> Result<(), LoggerError> {
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
