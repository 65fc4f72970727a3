use std::path::Path;

/// dmem: reports per-container memory (RAM and swap) usage by reading Linux
/// cgroup accounting files directly, avoiding per-container Docker API round
/// trips.
///
/// This library provides the core functionality for listing running Docker
/// containers, detecting the host's cgroup hierarchy version, collecting
/// per-container memory statistics, and rendering them as a table, JSON, or
/// CSV.
pub mod cgroup;
pub mod cli;
pub mod container;
pub mod output;

/// Root of the cgroup filesystem on a standard Linux host.
const CGROUP_ROOT: &str = "/sys/fs/cgroup";

/// Runs one dmem report.
///
/// Detects the cgroup version, lists running containers, collects a memory
/// snapshot per container, and renders the result in the requested format.
///
/// Per-container read failures degrade to absent fields and never abort the
/// report; an empty container list is a valid outcome and renders an empty
/// report.
///
/// # Errors
///
/// Returns a [`container::Error`] only when the container list itself cannot
/// be obtained, i.e. the docker CLI is missing or `docker ps` fails.
pub fn run(args: &cli::Cli) -> Result<(), container::Error> {
    if args.help_cols {
        println!("{}", output::COLUMN_HELP);
        return Ok(());
    }

    let root = Path::new(CGROUP_ROOT);
    let version = cgroup::detect_version(root);

    let mut containers = container::docker::list_running()?;
    if let Some(filter) = &args.filter {
        let needle = filter.to_lowercase();
        containers.retain(|c| {
            c.name.to_lowercase().contains(&needle) || c.id.as_ref().contains(&needle)
        });
    }

    let collector = cgroup::MemoryCollector::new(root, version);
    let reports = collector.collect_all(&containers);

    output::render(&reports, args.output, args.details);
    Ok(())
}
