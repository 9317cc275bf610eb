//! # Telemetry Monitor (telmon)
//!
//! A hardware telemetry monitor that polls CPU, GPU, disk, network and
//! mainboard sensors at a fixed cadence, renders them on a scrolling
//! terminal display, and records sessions of readings to durable CSV files.
//!
//! ## Features
//!
//! - **Live sensor view**: scrollable terminal display of every enumerated
//!   sensor, refreshed on a fixed poll cadence
//! - **Session recording**: buffered capture of all readings into
//!   per-sensor queues, drained to a timestamped CSV file
//! - **Memory-pressure flushing**: the buffer is flushed automatically when
//!   its in-memory footprint reaches a fraction of the available memory
//! - **Static hardware preamble**: disks, volumes and network adapters are
//!   described once at the head of every recording
//!
//! ## Quick Start
//!
//! ```no_run
//! use telmon::config::Config;
//! use telmon::monitor::Monitor;
//! use telmon::sensors::LinuxSensors;
//! use telmon::staticinfo::StaticInfoSnapshot;
//!
//! # fn main() -> telmon::Result<()> {
//! let config = Config::load()?;
//! let source = Box::new(LinuxSensors::new()?);
//! let static_info = StaticInfoSnapshot::collect();
//!
//! let mut monitor = Monitor::new(source, static_info, &config);
//! monitor.start_recording();
//! for _ in 0..10 {
//!     monitor.tick();
//!     std::thread::sleep(std::time::Duration::from_millis(
//!         config.general.update_interval_ms,
//!     ));
//! }
//! monitor.stop_recording();
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency model
//!
//! Everything runs on one thread, cooperatively: sensor refresh, buffer
//! capture, flushing, file I/O and display updates are interleaved with a
//! short non-blocking input poll. A flush runs to completion once invoked;
//! long file I/O stalls input until it finishes. This is a deliberate
//! trade-off, not an accident — a multi-threaded embedding must add its own
//! mutual exclusion around buffer push/drain pairs.

pub mod config; // Configuration management with TOML persistence
pub mod error;
pub mod monitor; // Monitor context: source + recorder + driver
pub mod recorder; // Sample buffering, session lifecycle, capture driver
pub mod sensors; // Sensor source abstraction and platform adapters
pub mod staticinfo; // One-shot disk/volume/adapter information

#[cfg(feature = "cli")]
pub mod tui; // Terminal UI

// Re-export main types
pub use config::{Config, GeneralConfig, RecordingConfig};
pub use error::{MonitorError, Result};
pub use monitor::{ComponentSnapshot, Monitor, SensorReading, Snapshot};
pub use recorder::{
    CaptureDriver, RecordingSession, SampleBuffer, TickOutcome, DEFAULT_PRESSURE_FRACTION,
};
pub use sensors::{
    ComponentInfo, SensorInfo, SensorKind, SensorRef, SensorSource, Topology,
};
pub use staticinfo::{AdapterInfo, PhysicalDiskInfo, StaticInfoSnapshot, VolumeInfo};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
