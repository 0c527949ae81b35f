//! Report serialization and rendering.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::api::results::{DimensionAnalysis, StrategicAuditReport};
use crate::core::errors::Result;
use crate::core::scoring::CheckpointStatus;

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Pretty-printed JSON of the full report
    Json,
    /// Human-readable plain-text summary
    Summary,
}

/// Serialize the full report as pretty-printed JSON.
pub fn to_json(report: &StrategicAuditReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render the report in the requested format.
pub fn render(report: &StrategicAuditReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => to_json(report),
        ReportFormat::Summary => Ok(render_summary(report)),
    }
}

/// Write the rendered report to a file.
pub fn write_to_file(
    report: &StrategicAuditReport,
    format: ReportFormat,
    path: &Path,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(render(report, format)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Render the plain-text summary.
pub fn render_summary(report: &StrategicAuditReport) -> String {
    let mut out = String::new();
    let push = |out: &mut String, line: &str| {
        out.push_str(line);
        out.push('\n');
    };

    push(&mut out, "Schema Audit Report");
    push(&mut out, "===================");
    push(&mut out, &format!("Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M UTC")));
    push(&mut out, "");
    push(&mut out, &report.summary.headline);
    push(&mut out, "");

    push(&mut out, "Scores");
    push(&mut out, "------");
    push(
        &mut out,
        &format!("Overall: {:>5.1} / 100", report.overall_score),
    );
    for category in &report.category_scores {
        push(
            &mut out,
            &format!(
                "  {:<16} {:>5.1}  (weight {:.2})",
                category.category.label(),
                category.score,
                category.weight
            ),
        );
    }
    push(&mut out, "");

    for dimension in &report.dimensions {
        render_dimension(&mut out, dimension);
    }

    if !report.issues.is_empty() {
        push(&mut out, "Issues");
        push(&mut out, "------");
        for issue in &report.issues {
            push(
                &mut out,
                &format!(
                    "[{:<8}] {} ({})",
                    issue.severity.label(),
                    issue.title,
                    issue.id
                ),
            );
            push(&mut out, &format!("           {}", issue.recommendation));
        }
        push(&mut out, "");
    }

    if !report.roadmap.is_empty() {
        push(&mut out, "Roadmap");
        push(&mut out, "-------");
        for phase in &report.roadmap {
            push(&mut out, &format!("{}:", phase.title));
            for task in &phase.tasks {
                push(&mut out, &format!("  - {}", task.action));
            }
        }
        push(&mut out, "");
    }

    if !report.summary.quick_wins.is_empty() {
        push(&mut out, "Quick wins");
        push(&mut out, "----------");
        for win in &report.summary.quick_wins {
            push(&mut out, &format!("  - {win}"));
        }
    }

    out
}

fn render_dimension(out: &mut String, dimension: &DimensionAnalysis) {
    out.push_str(&format!(
        "{} ({:.1}/100)\n",
        dimension.category.label(),
        dimension.score
    ));
    for checkpoint in &dimension.checkpoints {
        let marker = match checkpoint.status {
            CheckpointStatus::Good => "ok",
            CheckpointStatus::Warning => "warn",
            CheckpointStatus::Issue => "FAIL",
        };
        out.push_str(&format!("  [{marker:<4}] {}\n", checkpoint.title));
        for example in &checkpoint.examples {
            out.push_str(&format!("         e.g. {example}\n"));
        }
    }
    for note in &dimension.notes {
        out.push_str(&format!("  note: {note}\n"));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::engine::AuditEngine;
    use crate::core::schema::{EntryCounts, Field, ModelType, Schema};

    fn sample_report() -> StrategicAuditReport {
        let schema = Schema::new(
            vec![ModelType::model(
                "Article",
                vec![Field::scalar("title", "String")],
            )],
            vec![],
            vec![],
        );
        let counts = EntryCounts::empty().with("Article", 2, 40);
        AuditEngine::with_defaults().audit(&schema, &counts)
    }

    #[test]
    fn json_output_round_trips() {
        let report = sample_report();
        let json = to_json(&report).unwrap();
        let parsed: StrategicAuditReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.overall_score, report.overall_score);
        assert_eq!(parsed.dimensions.len(), 6);
    }

    #[test]
    fn summary_contains_scores_and_headline() {
        let report = sample_report();
        let text = render_summary(&report);
        assert!(text.contains("Schema Audit Report"));
        assert!(text.contains("Overall:"));
        assert!(text.contains(&report.summary.headline));
        assert!(text.contains("structure"));
        assert!(text.contains("content_health"));
    }

    #[test]
    fn reports_write_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_to_file(&sample_report(), ReportFormat::Json, &path).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.trim_start().starts_with('{'));
    }
}
