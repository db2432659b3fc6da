//! Global context for a batch run

use crate::cli::args::Cli;
use crate::batch::cookie;
use crate::reporting::ReportFormat;
use crate::session::RetryPolicy;
use crate::sqlmap::SqlmapSettings;
use std::io::IsTerminal;
use std::path::PathBuf;

pub struct Context {
    pub targets_file: PathBuf,
    pub output_file: PathBuf,
    pub output_format: ReportFormat,
    pub quiet: bool,
    pub sqlmap: SqlmapSettings,
    pub retry: RetryPolicy,
    // Authentication
    pub cookie: Option<String>,
}

impl Context {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let cookie = cli.cookie_file.as_ref().and_then(cookie::load_cookie);

        let sqlmap = SqlmapSettings {
            binary: cli.sqlmap_bin,
            level: cli.level,
            risk: cli.risk,
            output_dir: cli.output_dir,
        };

        let interactive = !cli.non_interactive;
        if interactive && !std::io::stdin().is_terminal() {
            tracing::debug!("stdin is not a terminal, cookie prompts will read piped input");
        }

        Ok(Self {
            targets_file: cli.targets,
            output_file: cli.output,
            output_format: cli.format,
            quiet: cli.quiet,
            sqlmap,
            retry: RetryPolicy {
                interactive,
                max_retries: cli.max_retries,
            },
            cookie,
        })
    }
}
