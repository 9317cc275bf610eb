//! Static-info preamble formatting
//!
//! Renders the one-shot storage/network snapshots at the head of a recording
//! file: one block per category, each entity introduced by a marker line,
//! each attribute a `Name,Value` pair.

use crate::staticinfo::StaticInfoSnapshot;
use std::io::{self, Write};

/// Marks the end of the preamble and the start of the sample rows
pub const DYNAMIC_DATA_MARKER: &str = "==== Dynamic data ====";

/// Suffix of the line introducing one entity within a category block
pub const ENTITY_MARKER: &str = "====>";

/// Write the full preamble: disks, volumes, adapters, then the dynamic-data
/// marker separating static info from the sample rows
pub fn write_preamble<W: Write>(w: &mut W, info: &StaticInfoSnapshot) -> io::Result<()> {
    write_storage_info(w, info)?;
    write_network_info(w, info)?;
    writeln!(w, "{}", DYNAMIC_DATA_MARKER)
}

/// Physical disk and volume blocks
fn write_storage_info<W: Write>(w: &mut W, info: &StaticInfoSnapshot) -> io::Result<()> {
    writeln!(w, "==== Physical Disks info ====")?;
    for disk in &info.physical_disks {
        writeln!(w, "{}{}", disk.media_type, ENTITY_MARKER)?;
        writeln!(w, "Name,{}", disk.name)?;
        writeln!(w, "Vendor,{}", disk.vendor.as_deref().unwrap_or("Unknown"))?;
        writeln!(w, "Bus Type,{}", disk.bus_type)?;
        writeln!(w, "Device ID,{}", disk.device_id)?;
        writeln!(w, "Serial,{}", disk.serial.as_deref().unwrap_or("Unknown"))?;
        writeln!(w, "Physical Sector Size,{}", disk.physical_sector_size)?;
        writeln!(w, "Logical Sector Size,{}", disk.logical_sector_size)?;
        writeln!(w, "Size,{}", disk.size)?;
    }

    writeln!(w, "==== Drives info ====")?;
    for volume in &info.volumes {
        writeln!(w, "{}{}", volume.mount_point, ENTITY_MARKER)?;
        writeln!(w, "Volume Name,{}", volume.volume_name)?;
        writeln!(w, "Volume Type,{}", volume.volume_type)?;
        writeln!(w, "Mount Options,{}", volume.options)?;
    }

    Ok(())
}

/// Network adapter block
fn write_network_info<W: Write>(w: &mut W, info: &StaticInfoSnapshot) -> io::Result<()> {
    writeln!(w, "==== Network adapters ====")?;
    for adapter in &info.adapters {
        writeln!(w, "{}{}", adapter.name, ENTITY_MARKER)?;
        writeln!(w, "Adapter Type,{}", adapter.adapter_type)?;
        writeln!(
            w,
            "MAC Address,{}",
            adapter.mac_address.as_deref().unwrap_or("Unknown")
        )?;
        match adapter.max_speed_mbps {
            Some(speed) => writeln!(w, "Max Speed,{}", speed)?,
            None => writeln!(w, "Max Speed,Unknown")?,
        }
        match adapter.mtu {
            Some(mtu) => writeln!(w, "MTU,{}", mtu)?,
            None => writeln!(w, "MTU,Unknown")?,
        }
        match adapter.interface_index {
            Some(index) => writeln!(w, "Interface Index,{}", index)?,
            None => writeln!(w, "Interface Index,Unknown")?,
        }
        writeln!(w, "Net Enabled,{}", u8::from(adapter.net_enabled))?;
        writeln!(w, "Status,{}", adapter.status)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staticinfo::{AdapterInfo, PhysicalDiskInfo, VolumeInfo};

    fn sample_snapshot() -> StaticInfoSnapshot {
        StaticInfoSnapshot {
            physical_disks: vec![PhysicalDiskInfo {
                media_type: "NVMe SSD".to_string(),
                name: "ACME NV500".to_string(),
                vendor: None,
                bus_type: "NVMe".to_string(),
                device_id: "/dev/nvme0n1".to_string(),
                serial: Some("SN123".to_string()),
                physical_sector_size: 512,
                logical_sector_size: 512,
                size: 500_107_862_016,
            }],
            volumes: vec![VolumeInfo {
                mount_point: "/".to_string(),
                volume_name: "/dev/nvme0n1p2".to_string(),
                volume_type: "ext4".to_string(),
                options: "rw,relatime".to_string(),
            }],
            adapters: vec![AdapterInfo {
                name: "eth0".to_string(),
                adapter_type: "Ethernet".to_string(),
                mac_address: Some("aa:bb:cc:dd:ee:ff".to_string()),
                max_speed_mbps: Some(1000),
                mtu: Some(1500),
                interface_index: Some(2),
                net_enabled: true,
                status: "up".to_string(),
            }],
        }
    }

    #[test]
    fn test_preamble_block_structure() {
        let mut out = Vec::new();
        write_preamble(&mut out, &sample_snapshot()).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "==== Physical Disks info ====");
        assert_eq!(lines[1], "NVMe SSD====>");
        assert_eq!(lines[2], "Name,ACME NV500");
        assert_eq!(lines[3], "Vendor,Unknown");

        assert!(text.contains("==== Drives info ====\n/====>\n"));
        assert!(text.contains("Volume Type,ext4"));
        assert!(text.contains("==== Network adapters ====\neth0====>\n"));
        assert!(text.contains("Net Enabled,1"));

        // The dynamic-data marker terminates the preamble
        assert_eq!(lines.last().unwrap(), &DYNAMIC_DATA_MARKER);
    }

    #[test]
    fn test_empty_snapshot_still_emits_markers() {
        let mut out = Vec::new();
        write_preamble(&mut out, &StaticInfoSnapshot::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "==== Physical Disks info ====\n==== Drives info ====\n\
             ==== Network adapters ====\n==== Dynamic data ====\n"
        );
    }
}
