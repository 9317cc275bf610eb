// Linux sensor adapter
//
// On Linux, hardware sensors are exposed via:
// - /sys/class/hwmon/* for temperatures, fans, voltages, power
// - /proc/meminfo for memory figures
// - /proc/loadavg for system load
//
// The topology is enumerated once at construction: every hwmon chip becomes a
// component and every readable input channel becomes a sensor with a stable
// index. refresh() re-reads the stored input paths; a channel that fails to
// read reports "no value" for that cycle instead of dropping out.

use super::{ComponentInfo, SensorInfo, SensorKind, SensorRef, SensorSource, Topology};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// How one sensor reading is obtained on refresh
enum Channel {
    /// A sysfs input file; the raw integer is divided by `scale`
    SysfsInput { path: PathBuf, scale: f32 },
    /// MemAvailable from /proc/meminfo, reported in bytes
    MemAvailable,
    /// MemTotal - MemAvailable from /proc/meminfo, reported in bytes
    MemUsed,
    /// MemTotal from /proc/meminfo, reported in bytes
    MemTotal,
    /// One of the three load averages from /proc/loadavg
    LoadAvg(usize),
}

/// Sensor source backed by sysfs and procfs
pub struct LinuxSensors {
    topology: Topology,
    channels: Vec<Vec<Channel>>,
    values: Vec<Vec<Option<f32>>>,
    memory_ref: Option<SensorRef>,
}

impl LinuxSensors {
    /// Enumerate the hardware topology and build the adapter.
    ///
    /// The component and sensor indices assigned here are stable for the
    /// lifetime of the process.
    pub fn new() -> Result<Self> {
        Self::with_hwmon_root(Path::new("/sys/class/hwmon"))
    }

    /// Enumerate against a specific hwmon root (tests use a temp dir)
    pub fn with_hwmon_root(hwmon_root: &Path) -> Result<Self> {
        let mut components = Vec::new();
        let mut channels = Vec::new();
        let mut memory_ref = None;

        enumerate_hwmon_chips(hwmon_root, &mut components, &mut channels);

        // Memory component from /proc/meminfo; its Available Memory sensor is
        // the designated flush-pressure input
        if Path::new("/proc/meminfo").exists() {
            let component = components.len();
            components.push(ComponentInfo {
                name: "Memory".to_string(),
                sensors: vec![
                    SensorInfo {
                        name: "Used Memory".to_string(),
                        kind: SensorKind::Data,
                    },
                    SensorInfo {
                        name: "Available Memory".to_string(),
                        kind: SensorKind::Data,
                    },
                    SensorInfo {
                        name: "Total Memory".to_string(),
                        kind: SensorKind::Data,
                    },
                ],
            });
            channels.push(vec![
                Channel::MemUsed,
                Channel::MemAvailable,
                Channel::MemTotal,
            ]);
            memory_ref = Some(SensorRef::new(component, 1));
        }

        // System load from /proc/loadavg
        if Path::new("/proc/loadavg").exists() {
            components.push(ComponentInfo {
                name: "System".to_string(),
                sensors: vec![
                    SensorInfo {
                        name: "Load 1 min".to_string(),
                        kind: SensorKind::Load,
                    },
                    SensorInfo {
                        name: "Load 5 min".to_string(),
                        kind: SensorKind::Load,
                    },
                    SensorInfo {
                        name: "Load 15 min".to_string(),
                        kind: SensorKind::Load,
                    },
                ],
            });
            channels.push(vec![
                Channel::LoadAvg(0),
                Channel::LoadAvg(1),
                Channel::LoadAvg(2),
            ]);
        }

        let values = channels.iter().map(|c| vec![None; c.len()]).collect();

        let mut sensors = Self {
            topology: Topology { components },
            channels,
            values,
            memory_ref,
        };
        sensors.refresh();
        Ok(sensors)
    }
}

impl SensorSource for LinuxSensors {
    fn refresh(&mut self) {
        for (ci, chip) in self.channels.iter().enumerate() {
            for (si, channel) in chip.iter().enumerate() {
                self.values[ci][si] = read_channel(channel);
            }
        }
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

/// Scan hwmon chips and append one component per chip
fn enumerate_hwmon_chips(
    hwmon_root: &Path,
    components: &mut Vec<ComponentInfo>,
    channels: &mut Vec<Vec<Channel>>,
) {
    let mut entries: Vec<PathBuf> = match fs::read_dir(hwmon_root) {
        Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(_) => return,
    };
    entries.sort();

    for path in entries {
        let chip_name = fs::read_to_string(path.join("name"))
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| {
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "hwmon".to_string())
            });

        let mut sensors = Vec::new();
        let mut chip_channels = Vec::new();

        // temp*_input files report millidegrees Celsius
        for i in 1..=16 {
            let input = path.join(format!("temp{}_input", i));
            if input.exists() {
                sensors.push(SensorInfo {
                    name: channel_label(&path, "temp", i, "Temp"),
                    kind: SensorKind::Temperature,
                });
                chip_channels.push(Channel::SysfsInput {
                    path: input,
                    scale: 1000.0,
                });
            }
        }

        // fan*_input files report RPM
        for i in 1..=8 {
            let input = path.join(format!("fan{}_input", i));
            if input.exists() {
                sensors.push(SensorInfo {
                    name: channel_label(&path, "fan", i, "Fan"),
                    kind: SensorKind::Fan,
                });
                chip_channels.push(Channel::SysfsInput {
                    path: input,
                    scale: 1.0,
                });
            }
        }

        // in*_input files report millivolts (channel numbering starts at 0)
        for i in 0..=16 {
            let input = path.join(format!("in{}_input", i));
            if input.exists() {
                sensors.push(SensorInfo {
                    name: channel_label(&path, "in", i, "Voltage"),
                    kind: SensorKind::Voltage,
                });
                chip_channels.push(Channel::SysfsInput {
                    path: input,
                    scale: 1000.0,
                });
            }
        }

        // power*_input files report microwatts
        for i in 1..=8 {
            let input = path.join(format!("power{}_input", i));
            if input.exists() {
                sensors.push(SensorInfo {
                    name: channel_label(&path, "power", i, "Power"),
                    kind: SensorKind::Power,
                });
                chip_channels.push(Channel::SysfsInput {
                    path: input,
                    scale: 1_000_000.0,
                });
            }
        }

        // pwm* files report a 0-255 duty cycle, shown as percent
        for i in 1..=8 {
            let input = path.join(format!("pwm{}", i));
            if input.exists() {
                sensors.push(SensorInfo {
                    name: format!("PWM {}", i),
                    kind: SensorKind::Control,
                });
                chip_channels.push(Channel::SysfsInput {
                    path: input,
                    scale: 2.55,
                });
            }
        }

        if !sensors.is_empty() {
            components.push(ComponentInfo {
                name: chip_name,
                sensors,
            });
            channels.push(chip_channels);
        }
    }
}

/// Label for a hwmon channel, falling back to "<Kind> <n>"
fn channel_label(chip_path: &Path, prefix: &str, index: usize, fallback: &str) -> String {
    fs::read_to_string(chip_path.join(format!("{}{}_label", prefix, index)))
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| format!("{} {}", fallback, index))
}

fn read_channel(channel: &Channel) -> Option<f32> {
    match channel {
        Channel::SysfsInput { path, scale } => {
            let raw: f32 = fs::read_to_string(path).ok()?.trim().parse().ok()?;
            Some(raw / scale)
        }
        Channel::MemAvailable => meminfo_field("MemAvailable"),
        Channel::MemTotal => meminfo_field("MemTotal"),
        Channel::MemUsed => {
            let total = meminfo_field("MemTotal")?;
            let available = meminfo_field("MemAvailable")?;
            Some((total - available).max(0.0))
        }
        Channel::LoadAvg(field) => {
            let loadavg = fs::read_to_string("/proc/loadavg").ok()?;
            loadavg.split_whitespace().nth(*field)?.parse().ok()
        }
    }
}

/// Read a /proc/meminfo field, converted from kB to bytes
fn meminfo_field(key: &str) -> Option<f32> {
    let meminfo = fs::read_to_string("/proc/meminfo").ok()?;
    for line in meminfo.lines() {
        let mut parts = line.split_whitespace();
        if parts.next()?.trim_end_matches(':') == key {
            let kb: f32 = parts.next()?.parse().ok()?;
            return Some(kb * 1024.0);
        }
    }
    None
}
