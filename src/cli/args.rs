use crate::reporting::ReportFormat;
use clap::Parser;
use std::path::PathBuf;

/// sqlbatch – run sqlmap over a list of targets and summarize the results
#[derive(Parser, Debug)]
#[command(
    name = "sqlbatch",
    version,
    about = "sqlbatch – batch sqlmap scanner with CSV output",
    long_about = r#"
sqlbatch drives an installed sqlmap over a list of URL/parameter pairs, one
target at a time, and writes one summary row per target:

  target, param, status, dbms, os, webapp_techs, techniques

sqlmap output is streamed to the terminal while it runs. When a run shows a
login-style redirect (the session cookie probably expired), sqlbatch stops and
asks for a fresh cookie, then scans the same target again.

TARGETS FILE:
  One target per line, URL and parameter separated by '|':

    https://app.example.com/item.php?id=1|id
    https://app.example.com/search?q=test&cat=2|cat

  Blank lines and lines without '|' are skipped.
"#,
    after_help = r#"EXAMPLES:

  sqlbatch --targets targets.txt
  sqlbatch --targets targets.txt --output results.csv --level 3 --risk 2
  sqlbatch --targets targets.txt --cookie-file cookie.txt --log-file batch.log
  sqlbatch --targets targets.txt --format json -o results.json
  sqlbatch --targets targets.txt --non-interactive --sqlmap /opt/sqlmap/sqlmap.py"#
)]
pub struct Cli {
    /// File with targets (format: url|param)
    #[arg(long, required = true)]
    pub targets: PathBuf,

    /// Report output file
    #[arg(short, long, default_value = "sqlmap_results.csv", help_heading = "OUTPUT")]
    pub output: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Csv, help_heading = "OUTPUT")]
    pub format: ReportFormat,

    /// Also append log records to this file
    #[arg(long = "log-file", help_heading = "OUTPUT")]
    pub log_file: Option<PathBuf>,

    /// Skip the banner display
    #[arg(long, help_heading = "OUTPUT")]
    pub no_banner: bool,

    /// Quiet mode (warnings only, sqlmap output not echoed)
    #[arg(short, long, conflicts_with = "verbose", help_heading = "OUTPUT")]
    pub quiet: bool,

    /// Verbose output (debug level)
    #[arg(short, long, help_heading = "OUTPUT")]
    pub verbose: bool,

    /// Path to cookie file (optional)
    #[arg(long = "cookie-file", help_heading = "SESSION")]
    pub cookie_file: Option<PathBuf>,

    /// Never prompt for a new cookie; accept redirected runs as they are
    #[arg(long = "non-interactive", help_heading = "SESSION")]
    pub non_interactive: bool,

    /// Maximum cookie prompts per target (unlimited if not set)
    #[arg(long = "max-retries", help_heading = "SESSION")]
    pub max_retries: Option<u32>,

    /// Sqlmap level (1-5)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5), help_heading = "SQLMAP")]
    pub level: u8,

    /// Sqlmap risk (1-3)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3), help_heading = "SQLMAP")]
    pub risk: u8,

    /// Sqlmap executable
    #[arg(long = "sqlmap", default_value = "sqlmap", help_heading = "SQLMAP")]
    pub sqlmap_bin: PathBuf,

    /// Directory sqlmap keeps its session files in
    #[arg(long = "output-dir", default_value = "/tmp/sqlmap-output", help_heading = "SQLMAP")]
    pub output_dir: PathBuf,
}
