//! Command-line argument definitions and parsing

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "mdsite",
    version,
    about = "Build static HTML pages from annotated markdown",
    long_about = "mdsite converts every markdown file of a source directory into an HTML \
                  page. Each file opens with a '---' front matter block whose title, \
                  stylesheet and scripts entries are injected into a shared template."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (defaults to ./site.yaml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build every markdown source into an HTML page
    Build(BuildArgs),
    /// Parse and validate every source without writing anything
    Check(CheckArgs),
}

/// Directory overrides shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct SiteOptions {
    /// Directory containing the markdown sources
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Directory receiving the generated site
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Base HTML template
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub site: SiteOptions,

    /// Stop at the first document that fails
    #[arg(long)]
    pub strict: bool,

    /// Show what would be written without touching the output directory
    #[arg(long)]
    pub dry_run: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Human)]
    pub format: ReportFormat,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub site: SiteOptions,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Human)]
    pub format: ReportFormat,
}

/// How build and check results are printed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// One line per document
    Human,
    /// The build report as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from([
            "mdsite", "-v", "build", "--source", "docs", "--strict", "--format", "json",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.site.source, Some(PathBuf::from("docs")));
                assert!(args.strict);
                assert!(!args.dry_run);
                assert_eq!(args.format, ReportFormat::Json);
            }
            Commands::Check(_) => panic!("expected build"),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["mdsite", "-v", "-q", "check"]).is_err());
    }
}
