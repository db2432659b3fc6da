use crate::reporting::model::ScanResult;
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    scan_metadata: ScanMetadata,
    summary: Summary,
    results: &'a [ScanResult],
}

#[derive(Serialize)]
struct ScanMetadata {
    tool: String,
    version: String,
    scan_date: String,
    report_format: String,
}

#[derive(Serialize)]
struct Summary {
    total_targets: usize,
    vulnerable: usize,
    not_vulnerable: usize,
}

pub fn render(results: &[ScanResult]) -> anyhow::Result<String> {
    let vulnerable = results.iter().filter(|r| r.is_vulnerable()).count();
    let summary = Summary {
        total_targets: results.len(),
        vulnerable,
        not_vulnerable: results.len() - vulnerable,
    };

    let report = Report {
        scan_metadata: ScanMetadata {
            tool: "sqlbatch".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            scan_date: chrono::Utc::now().to_rfc3339(),
            report_format: "application/json".to_string(),
        },
        summary,
        results,
    };

    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}
