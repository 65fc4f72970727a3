//! Renders container memory reports as a colorized table, JSON, or CSV.
//!
//! The cgroup collector hands this module one [`ContainerReport`] per
//! container; everything here is presentation: humanizing byte counts,
//! truncating names, highlighting hot containers, and choosing the output
//! encoding. Absent counters render as `N/A` in every format.

mod format;

pub use format::{format_bytes, truncate_name};

use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;

use crate::cgroup::ContainerReport;

/// RAM/swap level at which a table cell turns yellow.
const WARN_BYTES: u64 = 500 * 1024 * 1024;
/// RAM/swap level at which a table cell turns red.
const CRIT_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Display width of the container name column.
const NAME_WIDTH: usize = 30;

/// Per-column descriptions, printed by `--help-cols`.
pub const COLUMN_HELP: &str = "\
COLUMNS:
  CONTAINER   - Docker container name
  RAM Used    - Current RAM usage by container
  SWAP Used   - Current swap usage by container
  Limit       - RAM limit for container (if set)
  SwapLimit   - Swap limit for container (if set)
  Anon        - Anonymous memory (non-file-backed)
  File        - File/pagecache memory
  Shmem       - Shared memory
  RSS         - Resident Set Size (anon + part of file)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// One presentation row, with byte counts already humanized.
///
/// The raw RAM/swap values ride along for threshold highlighting but are
/// never serialized; detail fields are populated only with `--details` and
/// disappear from JSON otherwise.
#[derive(Debug, Serialize)]
struct Row {
    container: String,
    id: String,
    ram: String,
    swap: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    swaplimit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shmem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rss: Option<String>,
    #[serde(skip)]
    ram_raw: Option<u64>,
    #[serde(skip)]
    swap_raw: Option<u64>,
}

impl Row {
    fn from_report(report: &ContainerReport, details: bool) -> Self {
        let stats = &report.stats;
        Self {
            container: report.container.name.clone(),
            id: report.container.id.short().to_owned(),
            ram: format_bytes(stats.ram),
            swap: format_bytes(stats.swap),
            limit: details.then(|| format_bytes(stats.limit)),
            swaplimit: details.then(|| format_bytes(stats.swap_limit)),
            anon: details.then(|| format_bytes(stats.anon)),
            file: details.then(|| format_bytes(stats.file)),
            shmem: details.then(|| format_bytes(stats.shmem)),
            rss: details.then(|| format_bytes(stats.rss)),
            ram_raw: stats.ram,
            swap_raw: stats.swap,
        }
    }
}

/// Renders the report to stdout in the requested format.
pub fn render(reports: &[ContainerReport], format: OutputFormat, details: bool) {
    let rows: Vec<Row> = reports
        .iter()
        .map(|report| Row::from_report(report, details))
        .collect();

    match format {
        OutputFormat::Table => render_table(&rows, details),
        OutputFormat::Json => render_json(&rows),
        OutputFormat::Csv => render_csv(&rows, details),
    }
}

fn render_json(rows: &[Row]) {
    let json = serde_json::to_string_pretty(rows).expect("rows serialize to JSON");
    println!("{json}");
}

fn render_csv(rows: &[Row], details: bool) {
    if rows.is_empty() {
        println!();
        return;
    }
    println!("{}", csv_header(details));
    for row in rows {
        println!("{}", csv_line(row));
    }
}

fn csv_header(details: bool) -> String {
    let mut columns = vec!["container", "id", "ram", "swap"];
    if details {
        columns.extend(["limit", "swaplimit", "anon", "file", "shmem", "rss"]);
    }
    columns.join(",")
}

fn csv_line(row: &Row) -> String {
    // Docker names and humanized byte counts cannot contain commas, so no
    // quoting is needed.
    let mut fields = vec![
        row.container.as_str(),
        row.id.as_str(),
        row.ram.as_str(),
        row.swap.as_str(),
    ];
    for detail in [
        &row.limit,
        &row.swaplimit,
        &row.anon,
        &row.file,
        &row.shmem,
        &row.rss,
    ] {
        if let Some(value) = detail {
            fields.push(value.as_str());
        }
    }
    fields.join(",")
}

fn render_table(rows: &[Row], details: bool) {
    let (header, rule_width) = if details {
        (
            format!(
                "{:<31} {:<12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
                "CONTAINER",
                "ID",
                "RAM Used",
                "SWAP Used",
                "Limit",
                "SwapLimit",
                "Anon",
                "File",
                "Shmem",
                "RSS"
            ),
            171,
        )
    } else {
        (
            format!(
                "{:<31} {:<12} {:>12} {:>12}",
                "CONTAINER", "ID", "RAM Used", "SWAP Used"
            ),
            67,
        )
    };
    println!(
        "{}",
        header.if_supports_color(Stream::Stdout, |text| {
            text.style(Style::new().bright_cyan().bold())
        })
    );
    println!(
        "{}",
        "-".repeat(rule_width)
            .if_supports_color(Stream::Stdout, |text| text.bright_cyan())
    );

    for row in rows {
        let container = format!("{:<31}", truncate_name(&row.container, NAME_WIDTH));
        let ram = colorize(format!("{:>12}", row.ram), row.ram_raw);
        let swap = colorize(format!("{:>12}", row.swap), row.swap_raw);
        if details {
            println!(
                "{container} {:<12} {ram} {swap} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
                row.id,
                row.limit.as_deref().unwrap_or("N/A"),
                row.swaplimit.as_deref().unwrap_or("N/A"),
                row.anon.as_deref().unwrap_or("N/A"),
                row.file.as_deref().unwrap_or("N/A"),
                row.shmem.as_deref().unwrap_or("N/A"),
                row.rss.as_deref().unwrap_or("N/A"),
            );
        } else {
            println!("{container} {:<12} {ram} {swap}", row.id);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Highlight {
    Normal,
    Warn,
    Crit,
}

/// Classifies a raw byte value against the visual highlighting thresholds.
///
/// Absent values are never highlighted.
fn highlight(raw: Option<u64>) -> Highlight {
    match raw {
        Some(value) if value >= CRIT_BYTES => Highlight::Crit,
        Some(value) if value >= WARN_BYTES => Highlight::Warn,
        _ => Highlight::Normal,
    }
}

fn colorize(cell: String, raw: Option<u64>) -> String {
    match highlight(raw) {
        Highlight::Crit => format!(
            "{}",
            cell.if_supports_color(Stream::Stdout, |text| text.bright_red())
        ),
        Highlight::Warn => format!(
            "{}",
            cell.if_supports_color(Stream::Stdout, |text| text.bright_yellow())
        ),
        Highlight::Normal => cell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cgroup::MemoryStats;
    use crate::container::{ContainerID, ContainerRef};

    fn report(name: &str, stats: MemoryStats) -> ContainerReport {
        let id = ContainerID::new(
            "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef",
        )
        .unwrap();
        ContainerReport {
            container: ContainerRef {
                id,
                name: name.to_owned(),
            },
            stats,
        }
    }

    #[test]
    fn test_row_uses_short_id_and_formatted_values() {
        let stats = MemoryStats {
            ram: Some(104857600),
            swap: Some(52428800),
            ..MemoryStats::default()
        };
        let row = Row::from_report(&report("web", stats), false);
        assert_eq!(row.id, "0123456789ab");
        assert_eq!(row.ram, "100.0 MB");
        assert_eq!(row.swap, "50.0 MB");
        assert_eq!(row.limit, None);
    }

    #[test]
    fn test_row_details_render_absent_as_na() {
        let row = Row::from_report(&report("web", MemoryStats::default()), true);
        assert_eq!(row.ram, "N/A");
        assert_eq!(row.limit.as_deref(), Some("N/A"));
        assert_eq!(row.rss.as_deref(), Some("N/A"));
    }

    #[test]
    fn test_json_omits_detail_fields_without_details() {
        let row = Row::from_report(&report("web", MemoryStats::default()), false);
        let value = serde_json::to_value(&row).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("ram"));
        assert!(!object.contains_key("limit"));
        assert!(!object.contains_key("ram_raw"));
    }

    #[test]
    fn test_json_includes_detail_fields_with_details() {
        let stats = MemoryStats {
            limit: Some(536870912),
            ..MemoryStats::default()
        };
        let row = Row::from_report(&report("web", stats), true);
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["limit"], "512.0 MB");
    }

    #[test]
    fn test_csv_header_and_line() {
        let stats = MemoryStats {
            ram: Some(1024),
            ..MemoryStats::default()
        };
        let row = Row::from_report(&report("web", stats), false);
        assert_eq!(csv_header(false), "container,id,ram,swap");
        assert_eq!(csv_line(&row), "web,0123456789ab,1.0 KB,N/A");
    }

    #[test]
    fn test_csv_detailed_line_has_ten_fields() {
        let row = Row::from_report(&report("web", MemoryStats::default()), true);
        assert_eq!(csv_header(true).split(',').count(), 10);
        assert_eq!(csv_line(&row).split(',').count(), 10);
    }

    #[test]
    fn test_highlight_thresholds() {
        assert_eq!(highlight(None), Highlight::Normal);
        assert_eq!(highlight(Some(0)), Highlight::Normal);
        assert_eq!(highlight(Some(WARN_BYTES - 1)), Highlight::Normal);
        assert_eq!(highlight(Some(WARN_BYTES)), Highlight::Warn);
        assert_eq!(highlight(Some(CRIT_BYTES - 1)), Highlight::Warn);
        assert_eq!(highlight(Some(CRIT_BYTES)), Highlight::Crit);
    }
}
