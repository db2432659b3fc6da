//! Per-target scan session with the human-in-the-loop cookie retry.
//!
//! When sqlmap reports a login-style redirect the session cookie has most
//! likely expired. The operator is asked for a fresh cookie (or to keep the
//! current one) and the same target is scanned again, until a run finishes
//! without a redirect warning.

use crate::reporting::model::ScanResult;
use crate::sqlmap::command::SqlmapSettings;
use crate::sqlmap::output;
use crate::sqlmap::runner::ScanRunner;
use crate::targets::Target;
use anyhow::Result;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAnswer {
    /// Retry with the cookie already in use
    Keep,
    /// Retry with this cookie, and use it for every later target too
    Replace(String),
    /// Input is exhausted; stop retrying
    Closed,
}

pub trait CookiePrompt {
    fn ask(&mut self, url: &str) -> Result<PromptAnswer>;
}

/// Reads the answer from a line-oriented input, stdin by default.
pub struct LinePrompt<I, O> {
    input: I,
    out: O,
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<I: BufRead, O: Write> LinePrompt<I, O> {
    pub fn new(input: I, out: O) -> Self {
        Self { input, out }
    }
}

impl<I: BufRead, O: Write> CookiePrompt for LinePrompt<I, O> {
    fn ask(&mut self, url: &str) -> Result<PromptAnswer> {
        writeln!(self.out)?;
        writeln!(self.out, "[!] Warning: Possible false positive or login redirect detected.")?;
        writeln!(self.out, "URL: {}", url)?;
        writeln!(self.out, "Cookie might be invalid or session expired.")?;
        writeln!(self.out)?;
        writeln!(self.out, "Press Enter to continue with same cookie...")?;
        writeln!(self.out, "Or paste a new cookie (e.g., sessionid=abc123;csrftoken=xyz):")?;
        write!(self.out, "> ")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(PromptAnswer::Closed);
        }

        let answer = line.trim();
        if answer.is_empty() {
            Ok(PromptAnswer::Keep)
        } else {
            Ok(PromptAnswer::Replace(answer.to_string()))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    /// Ask the operator when a redirect is seen; otherwise accept the run as is
    pub interactive: bool,
    /// Upper bound on re-runs per target; `None` keeps asking
    pub max_retries: Option<u32>,
}

pub struct Session<R, P> {
    settings: SqlmapSettings,
    runner: R,
    prompt: P,
    policy: RetryPolicy,
    cookie: Option<String>,
}

impl<R: ScanRunner, P: CookiePrompt> Session<R, P> {
    pub fn new(
        settings: SqlmapSettings,
        runner: R,
        prompt: P,
        policy: RetryPolicy,
        cookie: Option<String>,
    ) -> Self {
        Self {
            settings,
            runner,
            prompt,
            policy,
            cookie,
        }
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Scan one target, re-running sqlmap for as long as the operator keeps
    /// answering the redirect prompt.
    pub async fn scan(&mut self, target: &Target) -> Result<ScanResult> {
        let mut retries: u32 = 0;

        let transcript = loop {
            let invocation =
                self.settings
                    .invocation(&target.url, &target.param, self.cookie.as_deref());

            tracing::info!("Running sqlmap for: {} (param: {})", target.url, target.param);
            let transcript = self.runner.run(&invocation).await?;

            if !output::has_redirect_warning(&transcript) {
                break transcript;
            }

            tracing::warn!("Redirect detected for {}, session cookie may be stale", target.url);

            if !self.policy.interactive {
                tracing::warn!("Non-interactive mode: keeping the last result");
                break transcript;
            }
            if let Some(max) = self.policy.max_retries {
                if retries >= max {
                    tracing::warn!("Giving up on {} after {} cookie retries", target.url, max);
                    break transcript;
                }
            }

            match self.prompt.ask(&target.url)? {
                PromptAnswer::Keep => {
                    tracing::info!("Continuing with original cookie.");
                }
                PromptAnswer::Replace(cookie) => {
                    tracing::info!("Using new user-provided cookie.");
                    self.cookie = Some(cookie);
                }
                PromptAnswer::Closed => {
                    tracing::warn!("Prompt input closed: keeping the last result");
                    break transcript;
                }
            }
            retries += 1;
        };

        let result = output::classify(&target.url, &target.param, &transcript);
        tracing::info!(
            "Result: {}, DBMS: {}, OS: {}, Techs: {}",
            result.status,
            result.dbms,
            result.os,
            result.webapp_techs
        );

        Ok(result)
    }
}
