//! Recording session lifecycle
//!
//! A [`RecordingSession`] owns the output stream and the file-naming state
//! for one capture session. Starting a session opens a timestamped CSV under
//! the recordings directory, writes the static-info preamble and the column
//! headers; stopping it flushes the remaining buffered samples, closes the
//! file and renames it to carry the closing time.
//!
//! All file-system failures here are absorbed: recording is best-effort and
//! must never fault the poll loop. A session whose file failed to open keeps
//! reporting as recording; each flush retries the open and, failing that,
//! drops the drained rows.

use crate::recorder::preamble;
use crate::recorder::SampleBuffer;
use crate::sensors::Topology;
use crate::staticinfo::StaticInfoSnapshot;
use chrono::Local;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Fractional digits used for every recorded sample value
const VALUE_PRECISION: usize = 4;

/// Manages the recording and saving of captured sensor data
pub struct RecordingSession {
    active: bool,
    header_written: bool,
    writer: Option<BufWriter<File>>,
    /// Extension-less path of the open file, kept for the close-time rename
    base_path: Option<PathBuf>,
    recordings_dir: PathBuf,
}

impl RecordingSession {
    /// Create an idle session writing under `recordings_dir`
    pub fn new(recordings_dir: impl Into<PathBuf>) -> Self {
        Self {
            active: false,
            header_written: false,
            writer: None,
            base_path: None,
            recordings_dir: recordings_dir.into(),
        }
    }

    /// Whether a session is currently active.
    ///
    /// Stays true even if the underlying file failed to open; recording is
    /// best-effort and the state machine does not revert on I/O failure.
    pub fn is_recording(&self) -> bool {
        self.active
    }

    /// Path of the file currently being written, if a stream is open
    pub fn current_file(&self) -> Option<PathBuf> {
        self.base_path
            .as_ref()
            .map(|base| PathBuf::from(format!("{}.csv", base.display())))
    }

    /// Begin a session. No-op when already active.
    ///
    /// Resets the per-session flags, opens a new output file if none is open,
    /// then writes the static-info preamble and the column-header row.
    pub fn start(&mut self, topology: &Topology, static_info: &StaticInfoSnapshot) {
        if self.active {
            return;
        }

        self.header_written = false;

        if self.writer.is_none() {
            self.init_stream();
        }

        self.active = true;

        self.write_static_preamble(static_info);
        self.write_column_headers(topology);
    }

    /// End the session. No-op when idle.
    ///
    /// Flushes everything still buffered, closes the file and renames it to
    /// carry the closing time.
    pub fn stop(&mut self, buffer: &mut SampleBuffer) {
        if !self.active {
            return;
        }

        if self.writer.is_some() {
            self.close_stream(buffer);
        }

        self.active = false;
    }

    /// Start or stop depending on the current state
    pub fn toggle(
        &mut self,
        topology: &Topology,
        static_info: &StaticInfoSnapshot,
        buffer: &mut SampleBuffer,
    ) {
        if self.active {
            self.stop(buffer);
        } else {
            self.start(topology, static_info);
        }
    }

    /// Drain the buffer to the output stream.
    ///
    /// Opens a stream first if none is open, so a flush before any start is
    /// still observable (a fresh file with no preamble or header). Each sweep
    /// becomes one comma-joined row of fixed-precision values; sweeping stops
    /// when a sweep comes back empty. Flushing an empty buffer writes
    /// nothing. Rows drained while no stream could be opened are dropped.
    pub fn flush(&mut self, buffer: &mut SampleBuffer) {
        if self.writer.is_none() {
            self.init_stream();
        }

        loop {
            let row = buffer.sweep();
            if row.is_empty() {
                break;
            }

            if let Some(writer) = self.writer.as_mut() {
                let mut line = String::new();
                for (i, value) in row.iter().enumerate() {
                    if i > 0 {
                        line.push(',');
                    }
                    let _ = write!(line, "{:.prec$}", value, prec = VALUE_PRECISION);
                }
                line.push('\n');

                if let Err(e) = writer.write_all(line.as_bytes()) {
                    log::warn!("failed to write sample row: {}", e);
                }
            }
        }
    }

    /// Create the recordings directory and open a fresh timestamped file.
    ///
    /// Failures are logged and swallowed; on a failed open the session keeps
    /// running without a stream.
    fn init_stream(&mut self) {
        if let Err(e) = fs::create_dir_all(&self.recordings_dir) {
            log::warn!(
                "failed to create recordings directory {}: {}",
                self.recordings_dir.display(),
                e
            );
        }

        let base = current_datetime_filename();
        let path = self.recordings_dir.join(format!("{}.csv", base));

        match File::create(&path) {
            Ok(file) => {
                log::info!("recording to {}", path.display());
                self.writer = Some(BufWriter::new(file));
                self.base_path = Some(self.recordings_dir.join(base));
            }
            Err(e) => {
                log::warn!("failed to open recording file {}: {}", path.display(), e);
                self.writer = None;
                self.base_path = None;
            }
        }
    }

    /// Final flush, close, and best-effort rename to
    /// `<base> - <HH-MM-SS>.csv`
    fn close_stream(&mut self, buffer: &mut SampleBuffer) {
        self.flush(buffer);

        let Some(mut writer) = self.writer.take() else {
            return;
        };
        if let Err(e) = writer.flush() {
            log::warn!("failed to flush recording file: {}", e);
        }
        drop(writer);

        if let Some(base) = self.base_path.take() {
            let open_name = PathBuf::from(format!("{}.csv", base.display()));
            let close_name =
                PathBuf::from(format!("{} - {}.csv", base.display(), current_time_filename()));

            if let Err(e) = fs::rename(&open_name, &close_name) {
                // The file stays under its open-time name
                log::warn!("failed to rename {}: {}", open_name.display(), e);
            }
        }
    }

    fn write_static_preamble(&mut self, static_info: &StaticInfoSnapshot) {
        if let Some(writer) = self.writer.as_mut() {
            if let Err(e) = preamble::write_preamble(writer, static_info) {
                log::warn!("failed to write static info preamble: {}", e);
            }
        }
    }

    /// Write the `Component.Sensor.Kind` header row, at most once per file
    fn write_column_headers(&mut self, topology: &Topology) {
        if self.header_written {
            return;
        }

        if let Some(writer) = self.writer.as_mut() {
            let header = topology
                .components
                .iter()
                .flat_map(|component| {
                    component.sensors.iter().map(move |sensor| {
                        format!("{}.{}.{}", component.name, sensor.name, sensor.kind)
                    })
                })
                .collect::<Vec<_>>()
                .join(",");

            if let Err(e) = writeln!(writer, "{}", header) {
                log::warn!("failed to write column headers: {}", e);
            }
        }

        self.header_written = true;
    }
}

/// Current local date-time with filesystem-invalid characters replaced
fn current_datetime_filename() -> String {
    sanitize_timestamp(&Local::now().format("%Y/%m/%d %H:%M:%S").to_string())
}

/// Current local time with filesystem-invalid characters replaced
fn current_time_filename() -> String {
    sanitize_timestamp(&Local::now().format("%H:%M:%S").to_string())
}

/// Replace the characters Windows and Unix file names cannot carry
fn sanitize_timestamp(raw: &str) -> String {
    raw.replace([':', '/'], "-")
}
