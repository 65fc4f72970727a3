//! Collects normalized per-container memory statistics.
//!
//! One [`MemoryStats`] record is produced fresh per container per report;
//! the kernel counters change continuously, so nothing is cached between
//! invocations.

use std::path::PathBuf;

use crate::container::{ContainerID, ContainerRef};

use super::{CgroupVersion, reader, resolver};

/// Page-counter ceiling cgroup v1 reports when no limit is configured.
const V1_NO_LIMIT: u64 = 0x7FFF_FFFF_FFFF_F000;

/// Normalized memory statistics for one container.
///
/// Every field is independently optional: `None` means the underlying
/// counter was missing, unreadable, or reported as unlimited. Absence is
/// never conflated with zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryStats {
    /// Current resident memory in bytes.
    pub ram: Option<u64>,
    /// Current swap in bytes; derived from `memsw - ram` on v1, read
    /// directly on v2.
    pub swap: Option<u64>,
    /// Memory ceiling in bytes; `None` when unlimited or unreadable.
    pub limit: Option<u64>,
    /// Swap ceiling in bytes, analogous to `limit`.
    pub swap_limit: Option<u64>,
    /// Anonymous (non-file-backed) memory from `memory.stat`.
    pub anon: Option<u64>,
    /// File/pagecache memory from `memory.stat`.
    pub file: Option<u64>,
    /// Shared memory from `memory.stat`.
    pub shmem: Option<u64>,
    /// Resident set size from `memory.stat`.
    pub rss: Option<u64>,
}

/// A container's stats tagged with the [`ContainerRef`] that produced them.
#[derive(Debug, Clone)]
pub struct ContainerReport {
    pub container: ContainerRef,
    pub stats: MemoryStats,
}

/// Reads per-container memory statistics from cgroup accounting files.
#[derive(Debug)]
pub struct MemoryCollector {
    cgroup_root: PathBuf,
    version: CgroupVersion,
}

impl MemoryCollector {
    pub fn new(cgroup_root: impl Into<PathBuf>, version: CgroupVersion) -> Self {
        Self {
            cgroup_root: cgroup_root.into(),
            version,
        }
    }

    /// Collects stats for every listed container, preserving input order and
    /// count exactly.
    pub fn collect_all(&self, containers: &[ContainerRef]) -> Vec<ContainerReport> {
        containers
            .iter()
            .map(|container| ContainerReport {
                container: container.clone(),
                stats: self.collect(&container.id),
            })
            .collect()
    }

    /// Produces a fresh [`MemoryStats`] snapshot for one container.
    ///
    /// Never fails: a missing cgroup directory or unreadable counter
    /// degrades to absent fields, so one exiting container cannot abort a
    /// whole-host report.
    pub fn collect(&self, id: &ContainerID) -> MemoryStats {
        match self.version {
            CgroupVersion::V1 => self.collect_v1(id),
            CgroupVersion::V2 => self.collect_v2(id),
        }
    }

    fn collect_v1(&self, id: &ContainerID) -> MemoryStats {
        let dir = resolver::v1_container_dir(&self.cgroup_root, id);

        let ram = reader::read_scalar(&dir.join("memory.usage_in_bytes"));
        let memsw = reader::read_scalar(&dir.join("memory.memsw.usage_in_bytes"));
        // Limits at the page-counter ceiling mean "no limit configured".
        let limit =
            reader::read_scalar(&dir.join("memory.limit_in_bytes")).filter(|&v| v < V1_NO_LIMIT);
        let memsw_limit = reader::read_scalar(&dir.join("memory.memsw.limit_in_bytes"))
            .filter(|&v| v < V1_NO_LIMIT);
        let stat = reader::read_keyed_stats(&dir.join("memory.stat"));

        MemoryStats {
            ram,
            swap: sub_counters(memsw, ram),
            limit,
            swap_limit: sub_counters(memsw_limit, limit),
            anon: stat.get("anon").copied(),
            file: stat.get("file").copied(),
            shmem: stat.get("shmem").copied(),
            rss: stat.get("rss").copied(),
        }
    }

    fn collect_v2(&self, id: &ContainerID) -> MemoryStats {
        let Some(dir) = resolver::find_v2_scope_dir(&self.cgroup_root, id) else {
            return MemoryStats::default();
        };

        // The swap counters do not exist on kernels built without swap
        // accounting, so they are existence-checked up front.
        let swap_path = dir.join("memory.swap.current");
        let swap = swap_path
            .exists()
            .then(|| reader::read_scalar(&swap_path))
            .flatten();
        let swap_limit_path = dir.join("memory.swap.max");
        let swap_limit = swap_limit_path
            .exists()
            .then(|| reader::read_scalar(&swap_limit_path))
            .flatten();
        let stat = reader::read_keyed_stats(&dir.join("memory.stat"));

        MemoryStats {
            ram: reader::read_scalar(&dir.join("memory.current")),
            swap,
            limit: reader::read_scalar(&dir.join("memory.max")),
            swap_limit,
            anon: stat.get("anon").copied(),
            file: stat.get("file").copied(),
            shmem: stat.get("shmem").copied(),
            rss: stat.get("rss").copied(),
        }
    }
}

/// Difference of a combined counter and one of its components.
///
/// Produced only when both operands are present; an absent operand never
/// defaults to zero. The two counters are read at slightly different times,
/// so a race can make the combined value fall below its component; the
/// difference saturates at zero in that case.
fn sub_counters(total: Option<u64>, part: Option<u64>) -> Option<u64> {
    let (total, part) = total.zip(part)?;
    if total < part {
        log::debug!("combined counter {total} below component {part}, clamping to 0");
    }
    Some(total.saturating_sub(part))
}
