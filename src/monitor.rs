//! Main monitor context
//!
//! [`Monitor`] bundles everything one process instance needs: the sensor
//! source, the static-info snapshot, the sample buffer, the recording
//! session and the capture driver. It is constructed once at startup and
//! passed by reference to the display and CLI layers; there are no
//! process-wide singletons.

use crate::config::Config;
use crate::recorder::{CaptureDriver, RecordingSession, SampleBuffer, TickOutcome};
use crate::sensors::{SensorKind, SensorRef, SensorSource, Topology};
use crate::staticinfo::StaticInfoSnapshot;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One sensor's current reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    /// Sensor name
    pub name: String,
    /// Kind of value the sensor reports
    pub kind: SensorKind,
    /// Current value, or `None` when the sensor reports nothing
    pub value: Option<f32>,
}

/// One component's current readings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSnapshot {
    /// Component name
    pub name: String,
    /// Readings in sensor order
    pub sensors: Vec<SensorReading>,
}

/// Complete snapshot of all current sensor readings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Components in topology order
    pub components: Vec<ComponentSnapshot>,
}

/// Main monitor interface: sensor source, recorder state, and the capture
/// driver, owned together
pub struct Monitor {
    source: Box<dyn SensorSource>,
    static_info: StaticInfoSnapshot,
    buffer: SampleBuffer,
    session: RecordingSession,
    driver: CaptureDriver,
}

impl Monitor {
    /// Build the monitor context from an enumerated source and the startup
    /// static-info snapshot
    pub fn new(
        source: Box<dyn SensorSource>,
        static_info: StaticInfoSnapshot,
        config: &Config,
    ) -> Self {
        let mut buffer = SampleBuffer::new();
        buffer.initialize(source.topology());

        let session = RecordingSession::new(&config.recording.directory);
        let driver = CaptureDriver::with_policy(
            config.recording.pressure_fraction,
            config.recording.record_missing_as_zero,
        );

        Self {
            source,
            static_info,
            buffer,
            session,
            driver,
        }
    }

    /// Run one poll cycle: refresh, capture, pressure check
    pub fn tick(&mut self) -> TickOutcome {
        self.driver
            .tick(self.source.as_mut(), &mut self.buffer, &mut self.session)
    }

    /// The fixed component/sensor enumeration
    pub fn topology(&self) -> &Topology {
        self.source.topology()
    }

    /// Current value of a sensor
    pub fn value_of(&self, r: SensorRef) -> Option<f32> {
        self.source.value_of(r)
    }

    /// The startup static-info snapshot
    pub fn static_info(&self) -> &StaticInfoSnapshot {
        &self.static_info
    }

    /// Whether a recording session is active
    pub fn is_recording(&self) -> bool {
        self.session.is_recording()
    }

    /// Path of the file currently being written, if any
    pub fn current_file(&self) -> Option<PathBuf> {
        self.session.current_file()
    }

    /// Begin a recording session
    pub fn start_recording(&mut self) {
        let topology = self.source.topology();
        self.session.start(topology, &self.static_info);
    }

    /// End the recording session, flushing everything still buffered
    pub fn stop_recording(&mut self) {
        self.session.stop(&mut self.buffer);
    }

    /// Start or stop recording depending on the current state
    pub fn toggle_recording(&mut self) {
        let topology = self.source.topology();
        self.session
            .toggle(topology, &self.static_info, &mut self.buffer);
    }

    /// Manually drain the sample buffer to the output file
    pub fn flush(&mut self) {
        self.session.flush(&mut self.buffer);
    }

    /// Snapshot of all current readings, in topology order
    pub fn snapshot(&self) -> Snapshot {
        let topology = self.source.topology();
        let components = topology
            .components
            .iter()
            .enumerate()
            .map(|(ci, component)| ComponentSnapshot {
                name: component.name.clone(),
                sensors: component
                    .sensors
                    .iter()
                    .enumerate()
                    .map(|(si, sensor)| SensorReading {
                        name: sensor.name.clone(),
                        kind: sensor.kind,
                        value: self.source.value_of(SensorRef::new(ci, si)),
                    })
                    .collect(),
            })
            .collect();

        Snapshot { components }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{ComponentInfo, SensorInfo};

    struct FixedSensors {
        topology: Topology,
        value: Option<f32>,
    }

    impl SensorSource for FixedSensors {
        fn refresh(&mut self) {}

        fn topology(&self) -> &Topology {
            &self.topology
        }

        fn value_of(&self, _r: SensorRef) -> Option<f32> {
            self.value
        }
    }

    fn fixed_monitor(dir: &std::path::Path, value: Option<f32>) -> Monitor {
        let source = FixedSensors {
            topology: Topology {
                components: vec![ComponentInfo {
                    name: "cpu".to_string(),
                    sensors: vec![SensorInfo {
                        name: "Core 0".to_string(),
                        kind: SensorKind::Temperature,
                    }],
                }],
            },
            value,
        };
        let mut config = Config::default();
        config.recording.directory = dir.to_string_lossy().to_string();
        Monitor::new(Box::new(source), StaticInfoSnapshot::default(), &config)
    }

    #[test]
    fn test_snapshot_mirrors_topology() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = fixed_monitor(dir.path(), Some(51.5));

        let snapshot = monitor.snapshot();
        assert_eq!(snapshot.components.len(), 1);
        assert_eq!(snapshot.components[0].name, "cpu");
        assert_eq!(snapshot.components[0].sensors[0].value, Some(51.5));
    }

    #[test]
    fn test_recording_lifecycle_through_context() {
        let dir = tempfile::tempdir().unwrap();
        let mut monitor = fixed_monitor(dir.path(), Some(51.5));

        assert!(!monitor.is_recording());
        monitor.toggle_recording();
        assert!(monitor.is_recording());

        monitor.tick();
        monitor.tick();
        monitor.toggle_recording();
        assert!(!monitor.is_recording());

        let files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(files.len(), 1);

        let contents = std::fs::read_to_string(files[0].path()).unwrap();
        assert!(contents.contains("cpu.Core 0.Temperature"));
        assert_eq!(contents.matches("51.5000").count(), 2);
    }
}
