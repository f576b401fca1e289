use crate::error::{AppError, AppResult, SinkError};
use crate::metrics::RunReport;

use super::config::ReportSinks;
use super::format::write_line;

/// Write the configured report exports to their destinations.
///
/// # Errors
///
/// Returns an error if any export fails to serialize or write.
pub async fn write_reports(sinks: &ReportSinks, report: &RunReport) -> AppResult<()> {
    if let Some(path) = sinks.csv.as_ref() {
        let rendered = render_csv(report)?;
        tokio::fs::write(path, rendered).await.map_err(|err| {
            AppError::sink(SinkError::WriteCsv {
                path: path.clone(),
                source: err,
            })
        })?;
    }
    if let Some(path) = sinks.json.as_ref() {
        let rendered = render_json(report)?;
        tokio::fs::write(path, rendered).await.map_err(|err| {
            AppError::sink(SinkError::WriteJson {
                path: path.clone(),
                source: err,
            })
        })?;
    }
    Ok(())
}

pub(super) fn render_csv(report: &RunReport) -> AppResult<String> {
    let mut output = String::new();
    write_line(&mut output, "tag,passed,failed")?;
    for (tag, counts) in &report.checks {
        write_line(
            &mut output,
            &format!("{},{},{}", tag, counts.passed, counts.failed),
        )?;
    }
    write_line(
        &mut output,
        &format!("total,{},{}", report.total_passed(), report.total_failed()),
    )?;
    Ok(output)
}

pub(super) fn render_json(report: &RunReport) -> AppResult<Vec<u8>> {
    let checks: Vec<serde_json::Value> = report
        .checks
        .iter()
        .map(|(tag, counts)| {
            serde_json::json!({
                "tag": tag.as_str(),
                "passed": counts.passed,
                "failed": counts.failed,
            })
        })
        .collect();

    let payload = serde_json::json!({
        "started_at": report.started_at.to_rfc3339(),
        "duration_ms": u64::try_from(report.duration.as_millis()).unwrap_or(u64::MAX),
        "iterations": report.iterations,
        "vus": report.vus,
        "iterations_completed": report.iterations_completed,
        "checks": checks,
        "totals": {
            "passed": report.total_passed(),
            "failed": report.total_failed(),
            "checks": report.total_checks(),
        },
    });

    serde_json::to_vec_pretty(&payload)
        .map_err(|err| AppError::sink(SinkError::SerializeReport { source: err }))
}
