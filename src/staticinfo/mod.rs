//! One-shot static hardware information
//!
//! Descriptive records for physical disks, mounted volumes, and network
//! adapters, captured once at process start. The recorder references the
//! snapshot for the file preamble; nothing here is re-queried at runtime.

#[cfg(target_os = "linux")]
mod linux;

use serde::{Deserialize, Serialize};

/// Static description of a physical storage device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicalDiskInfo {
    /// Media classification (e.g., "NVMe SSD", "SATA HDD"); heads the
    /// device's preamble block
    pub media_type: String,
    /// Device model
    pub name: String,
    /// Vendor string, if exposed
    pub vendor: Option<String>,
    /// Bus the device sits on (e.g., "NVMe", "SATA/SCSI")
    pub bus_type: String,
    /// Device node (e.g., "/dev/nvme0n1")
    pub device_id: String,
    /// Serial number, if exposed
    pub serial: Option<String>,
    /// Physical sector size in bytes
    pub physical_sector_size: u64,
    /// Logical sector size in bytes
    pub logical_sector_size: u64,
    /// Total capacity in bytes
    pub size: u64,
}

/// Static description of a mounted volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeInfo {
    /// Mount point; heads the volume's preamble block
    pub mount_point: String,
    /// Source device or pseudo-filesystem name
    pub volume_name: String,
    /// Filesystem type (e.g., "ext4", "btrfs")
    pub volume_type: String,
    /// Mount options as reported by the kernel
    pub options: String,
}

/// Static description of a network adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterInfo {
    /// Interface name; heads the adapter's preamble block
    pub name: String,
    /// Adapter classification (e.g., "Ethernet", "Wireless", "Loopback")
    pub adapter_type: String,
    /// MAC address, if exposed
    pub mac_address: Option<String>,
    /// Link speed in Mbps, if the link reports one
    pub max_speed_mbps: Option<u32>,
    /// Maximum Transmission Unit
    pub mtu: Option<u32>,
    /// Kernel interface index
    pub interface_index: Option<u32>,
    /// Whether the interface is administratively up
    pub net_enabled: bool,
    /// Operational state as reported by the kernel (e.g., "up", "down")
    pub status: String,
}

/// Immutable record of all static disk/volume/adapter information,
/// captured once at process start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticInfoSnapshot {
    /// Physical storage devices
    pub physical_disks: Vec<PhysicalDiskInfo>,
    /// Mounted volumes
    pub volumes: Vec<VolumeInfo>,
    /// Network adapters
    pub adapters: Vec<AdapterInfo>,
}

impl StaticInfoSnapshot {
    /// Capture the snapshot from the running system.
    ///
    /// Collection is best-effort: a category that cannot be enumerated is
    /// simply left empty.
    pub fn collect() -> Self {
        #[cfg(target_os = "linux")]
        {
            linux::collect()
        }
        #[cfg(not(target_os = "linux"))]
        {
            log::warn!("static hardware info collection not supported on this platform");
            Self::default()
        }
    }
}
