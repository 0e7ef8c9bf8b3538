use std::io::{self, BufRead};

use rand::Rng;
use tracing::warn;

use crate::logger_lib::SensorDataLogger;

/// Input value that stops the program.
pub const SENTINEL: i64 = -1;

/// Drives the interactive prompt loop until the sentinel or end of input.
///
/// Row labels come from a process-run-wide index that starts at 1 and keeps
/// counting across prompt cycles; it never restarts while the loop runs.
/// A counter of zero or below re-prompts without logging, and non-numeric
/// input is rejected with a warning. Returns the number of rows logged.
pub fn run_control_loop<In, R>(
    input: &mut In,
    logger: &mut SensorDataLogger<R>,
) -> io::Result<u64>
where
    In: BufRead,
    R: Rng,
{
    let mut next_index: u64 = 1;

    loop {
        println!("Enter the Loop Counter Value: (Enter -1 to STOP Program)");

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // closed input ends the session like the sentinel would
            break;
        }

        let entered = line.trim();
        let count: i64 = match entered.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("ignoring non-numeric input {entered:?}");
                continue;
            }
        };

        if count == SENTINEL {
            break;
        }

        let mut remaining = count;
        while remaining > 0 {
            logger.run(next_index);
            next_index += 1;
            remaining -= 1;
            if remaining > 0 {
                println!("Remaining iterations: {remaining}");
            }
        }
    }

    Ok(next_index - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger_lib::SensorDataLogger;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    fn drive(path: &Path, script: &str, write_header: bool) -> u64 {
        let mut logger =
            SensorDataLogger::open(path, write_header, StdRng::seed_from_u64(7)).expect("open");
        let logged =
            run_control_loop(&mut Cursor::new(script.as_bytes()), &mut logger).expect("loop");
        logger.close().expect("close");
        logged
    }

    fn labels(contents: &str) -> Vec<u64> {
        contents
            .lines()
            .filter_map(|line| line.split(',').next())
            .filter_map(|field| field.parse().ok())
            .collect()
    }

    #[test]
    fn sentinel_terminates_without_rows() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("sensor_data.csv");

        assert_eq!(drive(&path, "-1\n", false), 0);
        assert_eq!(fs::read_to_string(&path).expect("read"), "");
    }

    #[test]
    fn logs_requested_rows_with_consecutive_labels() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("sensor_data.csv");

        assert_eq!(drive(&path, "3\n-1\n", false), 3);
        let contents = fs::read_to_string(&path).expect("read");
        assert_eq!(labels(&contents), vec![1, 2, 3]);
    }

    #[test]
    fn index_spans_multiple_cycles() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("sensor_data.csv");

        assert_eq!(drive(&path, "2\n2\n-1\n", false), 4);
        let contents = fs::read_to_string(&path).expect("read");
        assert_eq!(labels(&contents), vec![1, 2, 3, 4]);
    }

    #[test]
    fn zero_reprompts_without_logging() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("sensor_data.csv");

        assert_eq!(drive(&path, "0\n-1\n", false), 0);
        assert_eq!(fs::read_to_string(&path).expect("read"), "");
    }

    #[test]
    fn negative_values_reprompt_without_logging() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("sensor_data.csv");

        assert_eq!(drive(&path, "-5\n-1\n", false), 0);
        assert_eq!(fs::read_to_string(&path).expect("read"), "");
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("sensor_data.csv");

        assert_eq!(drive(&path, "abc\n2\n-1\n", false), 2);
        let contents = fs::read_to_string(&path).expect("read");
        assert_eq!(labels(&contents), vec![1, 2]);
    }

    #[test]
    fn end_of_input_terminates() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("sensor_data.csv");

        assert_eq!(drive(&path, "1\n", false), 1);
        let contents = fs::read_to_string(&path).expect("read");
        assert_eq!(labels(&contents), vec![1]);
    }

    #[test]
    fn fresh_run_restarts_labels_and_keeps_header_unique() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("sensor_data.csv");

        assert_eq!(drive(&path, "2\n-1\n", true), 2);
        assert_eq!(drive(&path, "1\n-1\n", true), 1);

        let contents = fs::read_to_string(&path).expect("read");
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("LoopCount,Timestamp,Temperature,Humidity,CO2")
        );
        assert_eq!(labels(&contents), vec![1, 2, 1]);
        assert_eq!(contents.lines().count(), 4);
    }
}
