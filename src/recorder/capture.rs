//! Per-tick capture orchestration
//!
//! On every poll cycle the driver refreshes the sensor source, pushes the
//! current readings into the sample buffer while a session is active, and
//! then evaluates the automatic flush trigger: when the buffer structure's
//! in-memory footprint reaches a fraction of the currently available memory,
//! the session is flushed. The footprint-versus-free-memory comparison is a
//! coarse, conservative backpressure mechanism, not a precise memory budget.
//!
//! Pushes for a tick always precede that tick's pressure check. Everything
//! runs synchronously on the calling thread.

use crate::recorder::{RecordingSession, SampleBuffer};
use crate::sensors::{SensorRef, SensorSource};

/// Fraction of available memory the buffer footprint may reach before an
/// automatic flush is triggered
pub const DEFAULT_PRESSURE_FRACTION: f64 = 0.05;

/// What a single tick did
#[derive(Debug, Clone, Copy, Default)]
pub struct TickOutcome {
    /// Samples pushed into the buffer this tick
    pub pushed: usize,
    /// Whether the pressure trigger invoked a flush
    pub flushed: bool,
}

/// Drives one capture cycle per poll tick
pub struct CaptureDriver {
    pressure_fraction: f64,
    record_missing_as_zero: bool,
}

impl CaptureDriver {
    /// Driver with the default pressure policy and guarded pushes
    pub fn new() -> Self {
        Self::with_policy(DEFAULT_PRESSURE_FRACTION, false)
    }

    /// Driver with an explicit pressure fraction and missing-value policy.
    ///
    /// `record_missing_as_zero` switches the capture path from skipping
    /// sensors that currently report no value to pushing `0.0` for them.
    pub fn with_policy(pressure_fraction: f64, record_missing_as_zero: bool) -> Self {
        Self {
            pressure_fraction,
            record_missing_as_zero,
        }
    }

    /// Run one poll cycle: refresh, push, pressure check.
    pub fn tick(
        &self,
        source: &mut dyn SensorSource,
        buffer: &mut SampleBuffer,
        session: &mut RecordingSession,
    ) -> TickOutcome {
        source.refresh();

        let mut outcome = TickOutcome::default();

        if !session.is_recording() {
            return outcome;
        }

        let refs: Vec<SensorRef> = source.topology().flat_refs().collect();
        for r in refs {
            match source.value_of(r) {
                Some(value) => {
                    buffer.push(r, value);
                    outcome.pushed += 1;
                }
                None if self.record_missing_as_zero => {
                    buffer.push(r, 0.0);
                    outcome.pushed += 1;
                }
                None => {}
            }
        }

        if let Some(free) = free_memory_bytes(source) {
            let threshold = free * self.pressure_fraction;
            if buffer.footprint_bytes() as f64 >= threshold {
                session.flush(buffer);
                outcome.flushed = true;
            }
        }

        outcome
    }
}

impl Default for CaptureDriver {
    fn default() -> Self {
        Self::new()
    }
}

/// Current available memory in bytes, if the source exposes the designated
/// sensor and it has a usable value. `None` disables the pressure trigger
/// for the tick.
fn free_memory_bytes(source: &dyn SensorSource) -> Option<f64> {
    let r = source.available_memory()?;
    let value = source.value_of(r)?;
    if value.is_finite() {
        Some(f64::from(value))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{ComponentInfo, SensorInfo, SensorKind, Topology};
    use crate::staticinfo::StaticInfoSnapshot;

    /// Scriptable sensor source for driver tests
    struct MockSensors {
        topology: Topology,
        values: Vec<Vec<Option<f32>>>,
        memory_ref: Option<SensorRef>,
        refreshes: usize,
    }

    impl MockSensors {
        /// Two components: one with two temperature sensors, one Memory
        /// component whose single sensor is the designated pressure input
        fn new(free_memory: Option<f32>) -> Self {
            let topology = Topology {
                components: vec![
                    ComponentInfo {
                        name: "cpu".to_string(),
                        sensors: vec![
                            SensorInfo {
                                name: "Core 0".to_string(),
                                kind: SensorKind::Temperature,
                            },
                            SensorInfo {
                                name: "Core 1".to_string(),
                                kind: SensorKind::Temperature,
                            },
                        ],
                    },
                    ComponentInfo {
                        name: "Memory".to_string(),
                        sensors: vec![SensorInfo {
                            name: "Available Memory".to_string(),
                            kind: SensorKind::Data,
                        }],
                    },
                ],
            };
            Self {
                topology,
                values: vec![vec![Some(42.0), Some(43.0)], vec![free_memory]],
                memory_ref: Some(SensorRef::new(1, 0)),
                refreshes: 0,
            }
        }
    }

    impl SensorSource for MockSensors {
        fn refresh(&mut self) {
            self.refreshes += 1;
        }

        fn topology(&self) -> &Topology {
            &self.topology
        }

        fn value_of(&self, r: SensorRef) -> Option<f32> {
            *self.values.get(r.component)?.get(r.sensor)?
        }

        fn available_memory(&self) -> Option<SensorRef> {
            self.memory_ref
        }
    }

    fn recording_fixture(
        source: &MockSensors,
        dir: &std::path::Path,
    ) -> (SampleBuffer, RecordingSession) {
        let mut buffer = SampleBuffer::new();
        buffer.initialize(&source.topology);
        let mut session = RecordingSession::new(dir);
        session.start(&source.topology, &StaticInfoSnapshot::default());
        (buffer, session)
    }

    #[test]
    fn test_idle_session_captures_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MockSensors::new(Some(1.0e12));
        let mut buffer = SampleBuffer::new();
        buffer.initialize(&source.topology);
        let mut session = RecordingSession::new(dir.path());

        let outcome = CaptureDriver::new().tick(&mut source, &mut buffer, &mut session);

        // The source is still refreshed for the display path
        assert_eq!(source.refreshes, 1);
        assert_eq!(outcome.pushed, 0);
        assert!(!outcome.flushed);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_active_session_pushes_every_present_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MockSensors::new(Some(1.0e12));
        let (mut buffer, mut session) = recording_fixture(&source, dir.path());

        let outcome = CaptureDriver::new().tick(&mut source, &mut buffer, &mut session);

        // Plenty of free memory: samples stay buffered
        assert_eq!(outcome.pushed, 3);
        assert!(!outcome.flushed);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_missing_value_is_skipped_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MockSensors::new(Some(1.0e12));
        source.values[0][1] = None;
        let (mut buffer, mut session) = recording_fixture(&source, dir.path());

        let outcome = CaptureDriver::new().tick(&mut source, &mut buffer, &mut session);
        assert_eq!(outcome.pushed, 2);

        // The dry sensor's queue simply stays shallower
        assert_eq!(buffer.drain_all(), vec![vec![42.0, 1.0e12]]);
    }

    #[test]
    fn test_missing_value_recorded_as_zero_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MockSensors::new(Some(1.0e12));
        source.values[0][1] = None;
        let (mut buffer, mut session) = recording_fixture(&source, dir.path());

        let driver = CaptureDriver::with_policy(DEFAULT_PRESSURE_FRACTION, true);
        let outcome = driver.tick(&mut source, &mut buffer, &mut session);
        assert_eq!(outcome.pushed, 3);
        assert_eq!(buffer.drain_all(), vec![vec![42.0, 0.0, 1.0e12]]);
    }

    #[test]
    fn test_pressure_threshold_triggers_one_flush() {
        let dir = tempfile::tempdir().unwrap();
        // 100 bytes free: the buffer structure alone exceeds 5% of that
        let mut source = MockSensors::new(Some(100.0));
        let (mut buffer, mut session) = recording_fixture(&source, dir.path());

        let outcome = CaptureDriver::new().tick(&mut source, &mut buffer, &mut session);

        // Pushes happened first, then exactly one flush drained them all
        assert_eq!(outcome.pushed, 3);
        assert!(outcome.flushed);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_unresolved_memory_sensor_disables_trigger() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MockSensors::new(Some(100.0));
        source.memory_ref = None;
        let (mut buffer, mut session) = recording_fixture(&source, dir.path());

        let outcome = CaptureDriver::new().tick(&mut source, &mut buffer, &mut session);
        assert!(!outcome.flushed);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_memory_sensor_without_value_disables_trigger() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MockSensors::new(None);
        let (mut buffer, mut session) = recording_fixture(&source, dir.path());

        let outcome = CaptureDriver::new().tick(&mut source, &mut buffer, &mut session);
        assert!(!outcome.flushed);
        assert_eq!(buffer.len(), 2);
    }
}
