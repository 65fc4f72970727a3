use clap::Parser;

use crate::output::OutputFormat;

/// Show Docker container memory usage (RAM and SWAP).
#[derive(Debug, Parser)]
#[command(name = "dmem", version, about)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Show detailed output with all columns: Limit, SwapLimit, Anon, File, Shmem, RSS.
    #[arg(short, long)]
    pub details: bool,

    /// Show description for each output column and exit.
    #[arg(long)]
    pub help_cols: bool,

    /// Show only containers whose name or ID contains the given substring.
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["dmem"]);
        assert!(!cli.verbose);
        assert!(!cli.details);
        assert!(!cli.help_cols);
        assert_eq!(cli.filter, None);
        assert_eq!(cli.output, OutputFormat::Table);
    }

    #[test]
    fn test_output_format_values() {
        let cli = Cli::parse_from(["dmem", "-o", "json"]);
        assert_eq!(cli.output, OutputFormat::Json);
        let cli = Cli::parse_from(["dmem", "--output", "csv", "--filter", "web"]);
        assert_eq!(cli.output, OutputFormat::Csv);
        assert_eq!(cli.filter.as_deref(), Some("web"));
    }
}
