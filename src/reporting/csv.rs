//! Incremental CSV report writer.
//!
//! Rows are flushed as soon as each target finishes, so an interrupted run
//! still leaves a readable file behind.

use crate::reporting::model::{ScanResult, RECORD_HEADER};
use anyhow::{Context, Result};
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub struct CsvSink<W: Write> {
    writer: Writer<W>,
    rows: usize,
}

impl CsvSink<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV report {}", path.display()))?;
        Self::from_writer(file)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W) -> Result<Self> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record(RECORD_HEADER)?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn append(&mut self, result: &ScanResult) -> Result<()> {
        self.writer.write_record(result.record())?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to finish CSV report: {}", e.error()))
    }
}
