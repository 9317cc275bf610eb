//! Sensor source abstraction
//!
//! The monitor core never talks to hardware directly. It consumes a narrow
//! [`SensorSource`] trait: `refresh` re-reads live values, `topology` exposes
//! the fixed component/sensor enumeration established at startup, and
//! `value_of` returns the current reading of a single sensor (or `None` when
//! the sensor has nothing to report this cycle). Platform adapters implement
//! the trait; everything above it is platform-neutral.

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use linux::LinuxSensors;

use serde::{Deserialize, Serialize};

/// Identifies a sensor by its position in the topology.
///
/// The pair is assigned once when the hardware topology is enumerated and is
/// never reused, even if the sensor later stops reporting values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorRef {
    /// Index of the owning component in the topology
    pub component: usize,
    /// Index of the sensor within the component
    pub sensor: usize,
}

impl SensorRef {
    /// Create a new sensor reference
    pub fn new(component: usize, sensor: usize) -> Self {
        Self { component, sensor }
    }
}

/// Kind of value a sensor reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorKind {
    Temperature,
    Voltage,
    Fan,
    Power,
    Clock,
    Load,
    Data,
    Throughput,
    Control,
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SensorKind::Temperature => "Temperature",
            SensorKind::Voltage => "Voltage",
            SensorKind::Fan => "Fan",
            SensorKind::Power => "Power",
            SensorKind::Clock => "Clock",
            SensorKind::Load => "Load",
            SensorKind::Data => "Data",
            SensorKind::Throughput => "Throughput",
            SensorKind::Control => "Control",
        };
        write!(f, "{}", name)
    }
}

/// Static description of a single sensor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorInfo {
    /// Sensor name (e.g., "Package Temp", "Available Memory")
    pub name: String,
    /// Kind of value the sensor reports
    pub kind: SensorKind,
}

/// Static description of a hardware component and its sensors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Component name (e.g., "coretemp", "Memory")
    pub name: String,
    /// Sensors exposed by the component, in enumeration order
    pub sensors: Vec<SensorInfo>,
}

/// The fixed enumeration of components and their sensors.
///
/// Established once at startup; component and sensor indices are stable for
/// the lifetime of the process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topology {
    /// Components in enumeration order
    pub components: Vec<ComponentInfo>,
}

impl Topology {
    /// Number of components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Total number of sensors across all components
    pub fn sensor_count(&self) -> usize {
        self.components.iter().map(|c| c.sensors.len()).sum()
    }

    /// Per-component sensor counts, in component order
    pub fn shape(&self) -> Vec<usize> {
        self.components.iter().map(|c| c.sensors.len()).collect()
    }

    /// Iterate over all sensor references in topology order
    /// (component ascending, then sensor ascending within component)
    pub fn flat_refs(&self) -> impl Iterator<Item = SensorRef> + '_ {
        self.components.iter().enumerate().flat_map(|(ci, comp)| {
            (0..comp.sensors.len()).map(move |si| SensorRef::new(ci, si))
        })
    }

    /// Look up the static description of a sensor
    pub fn sensor(&self, r: SensorRef) -> Option<&SensorInfo> {
        self.components.get(r.component)?.sensors.get(r.sensor)
    }

    /// Look up the component owning a sensor
    pub fn component(&self, index: usize) -> Option<&ComponentInfo> {
        self.components.get(index)
    }
}

/// Narrow interface over a hardware sensor provider.
///
/// Implementations must be polled explicitly: readings only change on
/// [`refresh`](SensorSource::refresh). The topology is fixed after
/// construction.
pub trait SensorSource {
    /// Re-read the current value of every sensor
    fn refresh(&mut self);

    /// The fixed component/sensor enumeration
    fn topology(&self) -> &Topology;

    /// Current value of a sensor, or `None` if it reports nothing this cycle
    fn value_of(&self, r: SensorRef) -> Option<f32>;

    /// The designated available-memory sensor, if the platform exposes one.
    ///
    /// Its values are bytes of memory currently available; the capture driver
    /// uses it as the flush-pressure input. `None` disables the automatic
    /// flush trigger.
    fn available_memory(&self) -> Option<SensorRef> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_topology() -> Topology {
        Topology {
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
        }
    }

    #[test]
    fn test_flat_refs_topology_order() {
        let topo = sample_topology();
        let refs: Vec<SensorRef> = topo.flat_refs().collect();
        assert_eq!(
            refs,
            vec![
                SensorRef::new(0, 0),
                SensorRef::new(0, 1),
                SensorRef::new(1, 0),
            ]
        );
    }

    #[test]
    fn test_counts_and_shape() {
        let topo = sample_topology();
        assert_eq!(topo.component_count(), 2);
        assert_eq!(topo.sensor_count(), 3);
        assert_eq!(topo.shape(), vec![2, 1]);
    }

    #[test]
    fn test_sensor_lookup() {
        let topo = sample_topology();
        let info = topo.sensor(SensorRef::new(1, 0)).unwrap();
        assert_eq!(info.name, "Available Memory");
        assert_eq!(info.kind, SensorKind::Data);
        assert!(topo.sensor(SensorRef::new(2, 0)).is_none());
        assert!(topo.sensor(SensorRef::new(0, 5)).is_none());
    }
}
