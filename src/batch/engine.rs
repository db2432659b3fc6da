//! Batch engine
//!
//! Reads the target list, scans each target in order and feeds the report.

use crate::batch::context::Context;
use crate::reporting::csv::CsvSink;
use crate::reporting::reporter::Reporter;
use crate::reporting::{json, text, ReportFormat};
use crate::session::{CookiePrompt, LinePrompt, Session};
use crate::sqlmap::{ScanRunner, SqlmapRunner};
use crate::targets::load_targets;
use anyhow::Context as _;
use std::fs::File;

pub struct Engine {
    ctx: Context,
}

impl Engine {
    pub fn new(ctx: Context) -> anyhow::Result<Self> {
        Ok(Self { ctx })
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let runner = SqlmapRunner::new(!self.ctx.quiet);
        self.run_with(runner, LinePrompt::stdin()).await?;
        Ok(())
    }

    /// Run the whole batch with the given scanner and prompt. Returns the
    /// collected results, or `None` when the target file is missing.
    pub async fn run_with<R, P>(&self, runner: R, prompt: P) -> anyhow::Result<Option<Reporter>>
    where
        R: ScanRunner,
        P: CookiePrompt,
    {
        if !self.ctx.targets_file.exists() {
            tracing::error!("Target file not found: {}", self.ctx.targets_file.display());
            return Ok(None);
        }

        let targets = load_targets(&self.ctx.targets_file)?;
        tracing::info!(
            "Loaded {} targets from {}",
            targets.len(),
            self.ctx.targets_file.display()
        );
        tracing::debug!(
            "sqlmap: {} level={} risk={} output-dir={}",
            self.ctx.sqlmap.binary.display(),
            self.ctx.sqlmap.level,
            self.ctx.sqlmap.risk,
            self.ctx.sqlmap.output_dir.display()
        );

        // CSV rows are written as they come in; JSON is rendered at the end.
        let mut csv_sink = match self.ctx.output_format {
            ReportFormat::Csv => Some(CsvSink::create(&self.ctx.output_file)?),
            ReportFormat::Json => None,
        };

        let mut session = Session::new(
            self.ctx.sqlmap.clone(),
            runner,
            prompt,
            self.ctx.retry.clone(),
            self.ctx.cookie.clone(),
        );
        let mut reporter = Reporter::new();

        for (idx, target) in targets.iter().enumerate() {
            tracing::debug!("Target {}/{}", idx + 1, targets.len());
            let result = session.scan(target).await?;

            if let Some(sink) = csv_sink.as_mut() {
                sink.append(&result)?;
            }
            reporter.add(result);
        }

        if session.cookie() != self.ctx.cookie.as_deref() {
            tracing::info!("Session cookie was replaced during the run");
        }

        match csv_sink {
            Some(sink) => {
                tracing::debug!("Wrote {} CSV rows", sink.rows());
                sink.into_inner()?;
            }
            None => self.write_json(&reporter)?,
        }

        tracing::info!(
            "{} of {} targets vulnerable",
            reporter.vulnerable_count(),
            reporter.results().len()
        );
        tracing::info!(
            "Scan complete. Results saved to {}",
            self.ctx.output_file.display()
        );

        if !self.ctx.quiet {
            text::render(reporter.results(), &self.ctx.output_file.display().to_string());
        }

        Ok(Some(reporter))
    }

    fn write_json(&self, reporter: &Reporter) -> anyhow::Result<()> {
        let rendered = json::render(reporter.results())?;
        let mut file = File::create(&self.ctx.output_file).with_context(|| {
            format!("Failed to create JSON report {}", self.ctx.output_file.display())
        })?;
        std::io::Write::write_all(&mut file, rendered.as_bytes())?;
        Ok(())
    }
}
