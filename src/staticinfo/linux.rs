// Linux static info collectors: /sys/block, /proc/mounts, /sys/class/net

use super::{AdapterInfo, PhysicalDiskInfo, StaticInfoSnapshot, VolumeInfo};
use std::fs;
use std::path::{Path, PathBuf};

pub fn collect() -> StaticInfoSnapshot {
    StaticInfoSnapshot {
        physical_disks: collect_physical_disks(),
        volumes: collect_volumes(),
        adapters: collect_adapters(),
    }
}

fn collect_physical_disks() -> Vec<PhysicalDiskInfo> {
    let mut disks = Vec::new();

    let mut entries: Vec<PathBuf> = match fs::read_dir("/sys/block") {
        Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(_) => return disks,
    };
    entries.sort();

    for path in entries {
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => continue,
        };

        // Skip pseudo block devices that describe no physical media
        if name.starts_with("loop") || name.starts_with("ram") || name.starts_with("zram") {
            continue;
        }

        let model = read_sysfs_string(&path, "device/model").unwrap_or_else(|| name.clone());
        let vendor = read_sysfs_string(&path, "device/vendor");
        let serial = read_sysfs_string(&path, "device/serial");

        // Capacity is reported in 512-byte sectors regardless of block size
        let sectors = read_sysfs_u64(&path, "size").unwrap_or(0);
        let logical = read_sysfs_u64(&path, "queue/logical_block_size").unwrap_or(512);
        let physical = read_sysfs_u64(&path, "queue/physical_block_size").unwrap_or(512);
        let rotational = read_sysfs_u64(&path, "queue/rotational").unwrap_or(0) == 1;

        let (media_type, bus_type) = classify_block_device(&name, rotational);

        disks.push(PhysicalDiskInfo {
            media_type,
            name: model,
            vendor,
            bus_type,
            device_id: format!("/dev/{}", name),
            serial,
            physical_sector_size: physical,
            logical_sector_size: logical,
            size: sectors * 512,
        });
    }

    disks
}

fn classify_block_device(name: &str, rotational: bool) -> (String, String) {
    if name.starts_with("nvme") {
        ("NVMe SSD".to_string(), "NVMe".to_string())
    } else if name.starts_with("mmcblk") {
        ("eMMC/SD".to_string(), "MMC".to_string())
    } else if name.starts_with("vd") {
        ("Virtual Disk".to_string(), "Virtio".to_string())
    } else if rotational {
        ("SATA HDD".to_string(), "SATA/SCSI".to_string())
    } else {
        ("SATA SSD".to_string(), "SATA/SCSI".to_string())
    }
}

fn collect_volumes() -> Vec<VolumeInfo> {
    let mounts = match fs::read_to_string("/proc/mounts") {
        Ok(mounts) => mounts,
        Err(_) => return Vec::new(),
    };

    mounts
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let device = parts.next()?;
            let mount_point = parts.next()?;
            let fs_type = parts.next()?;
            let options = parts.next().unwrap_or("");

            // Only real block-device mounts; pseudo filesystems carry no
            // descriptive value in the preamble
            if !device.starts_with("/dev/") {
                return None;
            }

            Some(VolumeInfo {
                mount_point: mount_point.to_string(),
                volume_name: device.to_string(),
                volume_type: fs_type.to_string(),
                options: options.to_string(),
            })
        })
        .collect()
}

fn collect_adapters() -> Vec<AdapterInfo> {
    let mut adapters = Vec::new();

    let mut entries: Vec<PathBuf> = match fs::read_dir("/sys/class/net") {
        Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(_) => return adapters,
    };
    entries.sort();

    for path in entries {
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => continue,
        };

        let operstate =
            read_sysfs_string(&path, "operstate").unwrap_or_else(|| "unknown".to_string());
        let mac_address = read_sysfs_string(&path, "address").filter(|a| !a.is_empty());
        let speed = read_sysfs_u64(&path, "speed").map(|s| s as u32);
        let mtu = read_sysfs_u64(&path, "mtu").map(|m| m as u32);
        let ifindex = read_sysfs_u64(&path, "ifindex").map(|i| i as u32);

        adapters.push(AdapterInfo {
            adapter_type: classify_interface(&name, &path),
            mac_address,
            max_speed_mbps: speed,
            mtu,
            interface_index: ifindex,
            net_enabled: operstate == "up",
            status: operstate,
            name,
        });
    }

    adapters
}

fn classify_interface(name: &str, path: &Path) -> String {
    if name == "lo" {
        "Loopback".to_string()
    } else if path.join("wireless").exists() || name.starts_with("wl") {
        "Wireless".to_string()
    } else if name.starts_with("docker") || name.starts_with("veth") || name.starts_with("br") {
        "Virtual".to_string()
    } else {
        "Ethernet".to_string()
    }
}

fn read_sysfs_string(base: &Path, attribute: &str) -> Option<String> {
    fs::read_to_string(base.join(attribute))
        .ok()
        .map(|s| s.trim().to_string())
}

fn read_sysfs_u64(base: &Path, attribute: &str) -> Option<u64> {
    read_sysfs_string(base, attribute)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_block_device() {
        assert_eq!(
            classify_block_device("nvme0n1", false),
            ("NVMe SSD".to_string(), "NVMe".to_string())
        );
        assert_eq!(
            classify_block_device("sda", true),
            ("SATA HDD".to_string(), "SATA/SCSI".to_string())
        );
        assert_eq!(
            classify_block_device("sdb", false),
            ("SATA SSD".to_string(), "SATA/SCSI".to_string())
        );
    }

    #[test]
    fn test_collect_is_best_effort() {
        // Must not panic even in minimal containers without /sys/block
        let snapshot = collect();
        for disk in &snapshot.physical_disks {
            assert!(disk.device_id.starts_with("/dev/"));
        }
        for volume in &snapshot.volumes {
            assert!(volume.volume_name.starts_with("/dev/"));
        }
    }
}
