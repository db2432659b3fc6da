//! sqlmap process execution with live output capture

use crate::sqlmap::command::Invocation;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::Write;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// Runs one scanner invocation and returns its combined text output.
#[async_trait]
pub trait ScanRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<String>;
}

/// Spawns the real sqlmap binary.
pub struct SqlmapRunner {
    echo: bool,
}

impl SqlmapRunner {
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }

    fn record(&self, transcript: &mut String, line: &str) {
        if self.echo {
            let mut stdout = std::io::stdout().lock();
            // A closed stdout must not abort the batch.
            let _ = writeln!(stdout, "{}", line);
        }
        transcript.push_str(line);
        transcript.push('\n');
    }
}

#[async_trait]
impl ScanRunner for SqlmapRunner {
    async fn run(&self, invocation: &Invocation) -> Result<String> {
        tracing::debug!("Executing: {}", invocation);

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to start {} (is sqlmap installed and on PATH?)",
                    invocation.program.display()
                )
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("sqlmap stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow::anyhow!("sqlmap stderr was not captured"))?;

        // Both streams feed one channel so lines keep their arrival order.
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let out_task = tokio::spawn(forward_lines(stdout, tx.clone()));
        let err_task = tokio::spawn(forward_lines(stderr, tx));

        let mut transcript = String::new();
        while let Some(line) = rx.recv().await {
            self.record(&mut transcript, &line);
        }

        for task in [out_task, err_task] {
            if let Err(e) = task.await? {
                tracing::warn!("Error reading sqlmap output: {}", e);
            }
        }

        let status = child.wait().await?;
        if !status.success() {
            tracing::warn!("sqlmap exited with {}", status);
        }

        Ok(transcript)
    }
}

async fn forward_lines<R>(reader: R, tx: mpsc::UnboundedSender<String>) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let chunk = String::from_utf8_lossy(&buf);
        for line in split_terminal_line(&chunk) {
            if tx.send(line.to_string()).is_err() {
                return Ok(());
            }
        }
    }
}

/// Break one `\n`-terminated chunk into lines the way a terminal would see
/// them: a bare `\r` (progress redraw) ends a line as well.
fn split_terminal_line(chunk: &str) -> impl Iterator<Item = &str> {
    let chunk = chunk.strip_suffix('\n').unwrap_or(chunk);
    let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);
    chunk.split('\r')
}
