use std::fmt;
use std::path::Path;

/// The two incompatible cgroup hierarchy layouts a Linux host can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CgroupVersion {
    /// Legacy layout with per-controller directories.
    V1,
    /// Unified hierarchy.
    V2,
}

impl fmt::Display for CgroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CgroupVersion::V1 => f.write_str("v1"),
            CgroupVersion::V2 => f.write_str("v2"),
        }
    }
}

/// Determines the cgroup hierarchy version from the layout under `root`.
///
/// The unified v2 hierarchy always exposes a `cgroup.controllers` file at
/// its root; its absence means the legacy v1 layout. There is no error path:
/// an unreadable or empty root falls back to v1 as a best effort.
pub fn detect_version(root: &Path) -> CgroupVersion {
    if root.join("cgroup.controllers").exists() {
        log::debug!("detected cgroup v2 under {}", root.display());
        CgroupVersion::V2
    } else {
        log::debug!("assuming cgroup v1 under {}", root.display());
        CgroupVersion::V1
    }
}
