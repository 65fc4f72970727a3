//! Maps a container ID to its cgroup directory.
//!
//! On v1 the memory controller keeps containers in a fixed location, so the
//! path is a plain join. On v2 the nesting above a container's
//! `docker-<id>.scope` directory depends on the init system (systemd slices,
//! nested slices, non-systemd layouts), so there is no deterministic path
//! and the hierarchy has to be searched.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::container::ContainerID;

/// Deterministic v1 location of a container's memory controller directory.
///
/// Requires the full untruncated container ID; a shortened ID would name a
/// directory that does not exist.
pub fn v1_container_dir(root: &Path, id: &ContainerID) -> PathBuf {
    root.join("memory").join("docker").join(id.as_ref())
}

/// Locates the `docker-<id>.scope` directory for a container under the
/// unified v2 hierarchy.
///
/// Walks the hierarchy iteratively and returns the first directory whose
/// name matches, at any depth. Traversal order is filesystem-dependent, so
/// if multiple matches existed (they should not on a healthy host) the
/// result is not guaranteed stable. Unreadable subtrees are skipped; no
/// match yields `None` and the caller reports the container with all fields
/// absent.
pub fn find_v2_scope_dir(root: &Path, id: &ContainerID) -> Option<PathBuf> {
    let scope_name = format!("docker-{id}.scope");
    let mut stack = VecDeque::new();
    stack.push_back(root.to_path_buf());

    while let Some(dir) = stack.pop_back() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::debug!("skipping unreadable directory {}: {err}", dir.display());
                continue;
            }
        };
        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_dir() {
                continue;
            }
            if entry.file_name() == scope_name.as_str() {
                let path = entry.path();
                log::debug!("found cgroup v2 path for {id}: {}", path.display());
                return Some(path);
            }
            stack.push_back(entry.path());
        }
    }

    log::warn!("could not find cgroup v2 path for container {id}");
    None
}
