//! Lists running containers by shelling out to the docker CLI.
//!
//! The cgroup collector needs the *full* container ID to build v1 paths and
//! match v2 scope names, so `docker ps` is invoked with `--no-trunc`;
//! truncation to the familiar 12-character form happens at render time only.

use std::io;
use std::process::Command;

use super::{ContainerID, ContainerRef, Error, Result};

const PS_FORMAT: &str = "{{.ID}} {{.Names}}";

/// Lists the currently running containers as `{id, name}` pairs, in the
/// order `docker ps` reports them.
///
/// Lines that do not carry a usable full-length container ID are skipped
/// with a warning rather than failing the listing.
///
/// # Errors
///
/// Returns an error if the docker CLI is missing from `PATH`, cannot be
/// spawned, or `docker ps` exits unsuccessfully. This is the only failure in
/// the program that aborts a report.
pub fn list_running() -> Result<Vec<ContainerRef>> {
    let output = Command::new("docker")
        .args(["ps", "--no-trunc", "--format", PS_FORMAT])
        .output()
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Error::DockerNotFound,
            _ => Error::Spawn(err),
        })?;

    if !output.status.success() {
        return Err(Error::DockerPs {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }

    Ok(parse_ps_lines(&String::from_utf8_lossy(&output.stdout)))
}

/// Parses `docker ps --no-trunc --format "{{.ID}} {{.Names}}"` output.
fn parse_ps_lines(stdout: &str) -> Vec<ContainerRef> {
    let mut containers = Vec::new();
    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((id, name)) = line.split_once(char::is_whitespace) else {
            log::warn!("skipping malformed `docker ps` line: {line}");
            continue;
        };
        match ContainerID::new(id) {
            Ok(id) => containers.push(ContainerRef {
                id,
                name: name.trim().to_owned(),
            }),
            Err(err) => log::warn!("skipping `docker ps` line: {err}"),
        }
    }
    containers
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID_A: &str = "aaaa567890abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
    const ID_B: &str = "bbbb567890abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn test_parse_well_formed_lines() {
        let stdout = format!("{ID_A} web\n{ID_B} db\n");
        let containers = parse_ps_lines(&stdout);
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].id.as_ref(), ID_A);
        assert_eq!(containers[0].name, "web");
        assert_eq!(containers[1].id.as_ref(), ID_B);
        assert_eq!(containers[1].name, "db");
    }

    #[test]
    fn test_parse_preserves_input_order() {
        let stdout = format!("{ID_B} db\n{ID_A} web\n");
        let containers = parse_ps_lines(&stdout);
        assert_eq!(containers[0].name, "db");
        assert_eq!(containers[1].name, "web");
    }

    #[test]
    fn test_parse_skips_truncated_id() {
        let stdout = format!("{} web\n{ID_B} db\n", &ID_A[..12]);
        let containers = parse_ps_lines(&stdout);
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].name, "db");
    }

    #[test]
    fn test_parse_skips_id_only_line() {
        let containers = parse_ps_lines(ID_A);
        assert!(containers.is_empty());
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_ps_lines("").is_empty());
        assert!(parse_ps_lines("\n\n").is_empty());
    }

    #[test]
    fn test_parse_keeps_name_remainder() {
        // `{{.Names}}` can join several names with a space for odd setups;
        // everything after the ID is the name.
        let stdout = format!("{ID_A} web primary\n");
        let containers = parse_ps_lines(&stdout);
        assert_eq!(containers[0].name, "web primary");
    }
}
