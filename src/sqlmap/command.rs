//! sqlmap invocation settings and argument construction

use crate::batch::cookie::redact_cookie;
use std::path::PathBuf;

pub const DEFAULT_BINARY: &str = "sqlmap";
pub const DEFAULT_OUTPUT_DIR: &str = "/tmp/sqlmap-output";

/// Settings shared by every invocation in a batch.
#[derive(Debug, Clone)]
pub struct SqlmapSettings {
    pub binary: PathBuf,
    pub level: u8,
    pub risk: u8,
    pub output_dir: PathBuf,
}

impl Default for SqlmapSettings {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
            level: 1,
            risk: 1,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// One fully specified sqlmap run.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl SqlmapSettings {
    pub fn invocation(&self, url: &str, param: &str, cookie: Option<&str>) -> Invocation {
        let mut args = vec![
            "-u".to_string(),
            url.to_string(),
            "-p".to_string(),
            param.to_string(),
            "--batch".to_string(),
            "-v".to_string(),
            "0".to_string(),
            "--level".to_string(),
            self.level.to_string(),
            "--risk".to_string(),
            self.risk.to_string(),
            "--disable-coloring".to_string(),
            format!("--output-dir={}", self.output_dir.display()),
        ];

        if let Some(cookie) = cookie.filter(|c| !c.is_empty()) {
            args.push("--cookie".to_string());
            args.push(cookie.to_string());
        }

        Invocation {
            program: self.binary.clone(),
            args,
        }
    }
}

impl std::fmt::Display for Invocation {
    /// Shell-like rendering for logs. Cookie values are redacted.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program.display())?;
        let mut redact_next = false;
        for arg in &self.args {
            if redact_next {
                write!(f, " '{}'", redact_cookie(arg))?;
                redact_next = false;
                continue;
            }
            redact_next = arg == "--cookie";
            if arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
