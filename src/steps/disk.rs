// src/steps/disk.rs

//! Disk-space probing for before/after comparisons.

use std::path::Path;

use sysinfo::Disks;
use tracing::warn;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Filesystem usage snapshot, in bytes.
#[derive(Debug, Clone, Copy)]
pub struct DiskUsage {
    pub total: u64,
    pub free: u64,
}

impl DiskUsage {
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }

    pub fn percent_used(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used() as f64 / self.total as f64 * 100.0
    }
}

/// Probe filesystem usage for the disk holding `path`.
///
/// Returns `None` when no mounted disk covers the path; the caller decides
/// whether that is worth reporting.
pub fn probe(path: &Path) -> Option<DiskUsage> {
    let disks = Disks::new_with_refreshed_list();

    disks
        .list()
        .iter()
        .filter(|disk| path.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len())
        .map(|disk| DiskUsage {
            total: disk.total_space(),
            free: disk.available_space(),
        })
}

/// Print a labelled one-line usage summary for the root filesystem.
pub fn show(label: &str) {
    match probe(Path::new("/")) {
        Some(usage) => {
            println!("{label}:");
            println!(
                "  Used: {:.1}G / Available: {:.1}G ({:.1}% used)",
                usage.used() as f64 / GIB,
                usage.free as f64 / GIB,
                usage.percent_used()
            );
        }
        None => warn!(label, "could not determine disk usage"),
    }
}
